use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::entities::{ApprovalStatus, BillComObject, CreateParams, IsActive, require, require_items};
use crate::error::{Error, Result};
use crate::request;
use crate::utils::date_format::{bdc_date_format_option, bdc_datetime_format_option};

/// A credit issued by a vendor, applicable against that vendor's bills.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorCredit {
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
    pub ref_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approval_status: Option<ApprovalStatus>,
    #[serde(
        default,
        with = "bdc_date_format_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub credit_date: Option<Date>,
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
    pub applied_amount: Option<Decimal>,
    /// String-coded application state of the credit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub po_number: Option<String>,
    #[serde(default, deserialize_with = "crate::entities::line_items")]
    pub vendor_credit_line_items: Vec<VendorCreditLineItem>,
}

impl BillComObject for VendorCredit {
    const ENTITY: &'static str = "VendorCredit";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorCreditLineItem {
    pub entity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_credit_id: Option<String>,
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

impl BillComObject for VendorCreditLineItem {
    const ENTITY: &'static str = "VendorCreditLineItem";
}

/// Line-item parameters for a vendor-credit create. Required: `amount`.
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
    const ENTITY: &'static str = VendorCreditLineItem::ENTITY;
}

/// Parameters for `Crud/Create/VendorCredit.json`.
///
/// Required, in order: `vendorId`, `refNumber`, `creditDate`,
/// `vendorCreditLineItems` (each requires `amount`).
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Builder {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref_number: Option<String>,
    #[serde(
        default,
        with = "bdc_date_format_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub credit_date: Option<Date>,
    #[serde(serialize_with = "request::tagged_items")]
    pub vendor_credit_line_items: Vec<LineItemBuilder>,
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

impl BillComObject for Builder {
    const ENTITY: &'static str = VendorCredit::ENTITY;
}

impl CreateParams for Builder {
    type Entity = VendorCredit;

    fn validate(&self) -> Result<()> {
        require(self.vendor_id.as_ref(), "vendorId")?;
        require(self.ref_number.as_ref(), "refNumber")?;
        require(self.credit_date.as_ref(), "creditDate")?;
        require_items(&self.vendor_credit_line_items, "vendorCreditLineItems")?;
        for item in &self.vendor_credit_line_items {
            if item.amount.is_none() {
                return Err(Error::MissingRequiredField { field: "amount" });
            }
        }
        Ok(())
    }
}
