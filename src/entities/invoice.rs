use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::entities::{BillComObject, CreateParams, IsActive, PaymentStatus, require, require_items};
use crate::error::{Error, Result};
use crate::request;
use crate::utils::date_format::{bdc_date_format_option, bdc_datetime_format_option};

/// A receivable invoice sent to a customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
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
    pub customer_id: Option<String>,
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
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount_due: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub po_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_to_be_printed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_to_be_emailed: Option<bool>,
    #[serde(
        default,
        with = "bdc_datetime_format_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_sent_time: Option<OffsetDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_sales_tax: Option<String>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub sales_tax_total: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terms: Option<String>,
    #[serde(default, deserialize_with = "crate::entities::line_items")]
    pub invoice_line_items: Vec<InvoiceLineItem>,
}

impl BillComObject for Invoice {
    const ENTITY: &'static str = "Invoice";
}

/// One charge line of an invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLineItem {
    pub entity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub quantity: Option<Decimal>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<Decimal>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<Decimal>,
    #[serde(
        default,
        with = "bdc_date_format_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub service_date: Option<Date>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_of_account_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taxable: Option<bool>,
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

impl BillComObject for InvoiceLineItem {
    const ENTITY: &'static str = "InvoiceLineItem";
}

/// Line-item parameters for an invoice create. Required: `quantity`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemBuilder {
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub quantity: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<Decimal>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taxable: Option<bool>,
}

impl LineItemBuilder {
    #[must_use]
    pub fn new(quantity: Decimal) -> Self {
        Self {
            quantity: Some(quantity),
            ..Self::default()
        }
    }
}

impl BillComObject for LineItemBuilder {
    const ENTITY: &'static str = InvoiceLineItem::ENTITY;
}

/// Parameters for `Crud/Create/Invoice.json`.
///
/// Required, in order: `customerId`, `invoiceNumber`, `invoiceDate`,
/// `dueDate`, `invoiceLineItems` (each line item requires `quantity`).
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Builder {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
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
    pub invoice_line_items: Vec<LineItemBuilder>,
    pub is_active: IsActive,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub po_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_to_be_printed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_to_be_emailed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terms: Option<String>,
}

impl Builder {
    #[must_use]
    pub fn new(
        customer_id: impl Into<String>,
        invoice_number: impl Into<String>,
        invoice_date: Date,
        due_date: Date,
        invoice_line_items: Vec<LineItemBuilder>,
    ) -> Self {
        Self {
            customer_id: Some(customer_id.into()),
            invoice_number: Some(invoice_number.into()),
            invoice_date: Some(invoice_date),
            due_date: Some(due_date),
            invoice_line_items,
            ..Self::default()
        }
    }
}

impl BillComObject for Builder {
    const ENTITY: &'static str = Invoice::ENTITY;
}

impl CreateParams for Builder {
    type Entity = Invoice;

    fn validate(&self) -> Result<()> {
        require(self.customer_id.as_ref(), "customerId")?;
        require(self.invoice_number.as_ref(), "invoiceNumber")?;
        require(self.invoice_date.as_ref(), "invoiceDate")?;
        require(self.due_date.as_ref(), "dueDate")?;
        require_items(&self.invoice_line_items, "invoiceLineItems")?;
        for item in &self.invoice_line_items {
            if item.quantity.is_none() {
                return Err(Error::MissingRequiredField { field: "quantity" });
            }
        }
        Ok(())
    }
}
