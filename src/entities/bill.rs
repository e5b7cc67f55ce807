use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::entities::{
    ApprovalStatus, BillComObject, CreateParams, IsActive, PaymentStatus, require, require_items,
};
use crate::error::{Error, Result};
use crate::request;
use crate::utils::date_format::{bdc_date_format_option, bdc_datetime_format_option};

/// A payable bill from a vendor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub entity: String,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<IsActive>,
    #[serde(
        default,
        with = "bdc_datetime_format_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_time: Option<OffsetDateTime>,
    #[serde(
        default,
        with = "bdc_datetime_format_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_time: Option<OffsetDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approval_status: Option<ApprovalStatus>,
    #[serde(
        default,
        with = "bdc_date_format_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub invoice_date: Option<Date>,
    #[serde(
        default,
        with = "bdc_date_format_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<Date>,
    #[serde(
        default,
        with = "bdc_date_format_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub gl_posting_date: Option<Date>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<Decimal>,
    /// Remaining unpaid amount; absent once the bill is paid in full.
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub po_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pay_from_bank_account_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pay_from_chart_of_account_id: Option<String>,
    #[serde(default, deserialize_with = "crate::entities::line_items")]
    pub bill_line_items: Vec<BillLineItem>,
}

impl BillComObject for Bill {
    const ENTITY: &'static str = "Bill";
}

/// One charge line of a bill. Exists only inside its parent's array.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillLineItem {
    pub entity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill_id: Option<String>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_of_account_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_billable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        with = "bdc_datetime_format_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_time: Option<OffsetDateTime>,
    #[serde(
        default,
        with = "bdc_datetime_format_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_time: Option<OffsetDateTime>,
}

impl BillComObject for BillLineItem {
    const ENTITY: &'static str = "BillLineItem";
}

/// Line-item parameters for a bill create. Required: `amount`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemBuilder {
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_of_account_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_billable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl LineItemBuilder {
    #[must_use]
    pub fn new(amount: Decimal) -> Self {
        Self {
            amount: Some(amount),
            ..Self::default()
        }
    }
}

impl BillComObject for LineItemBuilder {
    const ENTITY: &'static str = BillLineItem::ENTITY;
}

/// Parameters for `Crud/Create/Bill.json`.
///
/// Required, in order: `vendorId`, `invoiceNumber`, `invoiceDate`, `dueDate`,
/// `billLineItems` (each line item requires `amount`).
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Builder {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    #[serde(
        default,
        with = "bdc_date_format_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub invoice_date: Option<Date>,
    #[serde(
        default,
        with = "bdc_date_format_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<Date>,
    #[serde(serialize_with = "request::tagged_items")]
    pub bill_line_items: Vec<LineItemBuilder>,
    pub is_active: IsActive,
    #[serde(
        default,
        with = "bdc_date_format_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub gl_posting_date: Option<Date>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub po_number: Option<String>,
}

impl Builder {
    #[must_use]
    pub fn new(
        vendor_id: impl Into<String>,
        invoice_number: impl Into<String>,
        invoice_date: Date,
        due_date: Date,
        bill_line_items: Vec<LineItemBuilder>,
    ) -> Self {
        Self {
            vendor_id: Some(vendor_id.into()),
            invoice_number: Some(invoice_number.into()),
            invoice_date: Some(invoice_date),
            due_date: Some(due_date),
            bill_line_items,
            ..Self::default()
        }
    }
}

impl BillComObject for Builder {
    const ENTITY: &'static str = Bill::ENTITY;
}

impl CreateParams for Builder {
    type Entity = Bill;

    fn validate(&self) -> Result<()> {
        require(self.vendor_id.as_ref(), "vendorId")?;
        require(self.invoice_number.as_ref(), "invoiceNumber")?;
        require(self.invoice_date.as_ref(), "invoiceDate")?;
        require(self.due_date.as_ref(), "dueDate")?;
        require_items(&self.bill_line_items, "billLineItems")?;
        for item in &self.bill_line_items {
            if item.amount.is_none() {
                return Err(Error::MissingRequiredField { field: "amount" });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use serde_json::json;
    use time::macros::date;

    use super::*;
    use crate::entities::from_value;

    fn builder() -> Builder {
        Builder::new(
            "00901VENDOR",
            "INV-42",
            date!(2025 - 06 - 01),
            date!(2025 - 07 - 01),
            vec![LineItemBuilder::new(dec!(120.50))],
        )
    }

    #[test]
    fn missing_fields_fail_in_documented_order() {
        let err = Builder::default().validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required field: vendorId, please define vendorId."
        );

        let mut b = builder();
        b.invoice_number = None;
        assert_eq!(
            b.validate().unwrap_err().to_string(),
            "Missing required field: invoiceNumber, please define invoiceNumber."
        );

        let mut b = builder();
        b.bill_line_items.clear();
        assert_eq!(
            b.validate().unwrap_err().to_string(),
            "Missing required field: billLineItems, please define billLineItems."
        );

        let mut b = builder();
        b.bill_line_items[0].amount = None;
        assert_eq!(
            b.validate().unwrap_err().to_string(),
            "Missing required field: amount, please define amount."
        );
    }

    #[test]
    fn create_payload_tags_nested_line_items() {
        let data = request::data_object(Bill::ENTITY, &builder(), false).unwrap();
        let obj = &data["obj"];
        assert_eq!(obj["entity"], json!("Bill"));
        assert_eq!(obj["invoiceDate"], json!("2025-06-01"));
        let items = obj["billLineItems"].as_array().unwrap();
        assert_eq!(items[0]["entity"], json!("BillLineItem"));
        assert_eq!(items[0]["amount"], json!(120.5));
    }

    #[test]
    fn response_decodes_into_typed_line_items() {
        let bill: Bill = from_value(json!({
            "entity": "Bill",
            "id": "00n01BILL",
            "vendorId": "00901VENDOR",
            "invoiceNumber": "INV-42",
            "invoiceDate": "2025-06-01",
            "dueDate": "2025-07-01",
            "amount": 120.5,
            "paymentStatus": "1",
            "billLineItems": [
                {"entity": "BillLineItem", "id": "bli01", "amount": 120.5}
            ]
        }))
        .unwrap();

        assert_eq!(bill.entity, "Bill");
        assert_eq!(bill.payment_status, Some(PaymentStatus::Open));
        assert_eq!(bill.bill_line_items.len(), 1);
        assert_eq!(bill.bill_line_items[0].amount, Some(dec!(120.5)));
    }

    #[test]
    fn mismatched_line_item_discriminator_is_rejected() {
        let result: crate::error::Result<Bill> = from_value(json!({
            "entity": "Bill",
            "id": "00n01BILL",
            "billLineItems": [{"entity": "InvoiceLineItem", "amount": 1.0}]
        }));
        assert!(result.is_err());
    }
}
