use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::entities::{BillComObject, CreateParams, IsActive, require, require_items};
use crate::error::{Error, Result};
use crate::request;
use crate::utils::date_format::{bdc_date_format_option, bdc_datetime_format_option};

/// A template that generates bills on a schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringBill {
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
    /// String-coded schedule interval as returned by the API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_period: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_per_time_period: Option<u32>,
    #[serde(
        default,
        with = "bdc_date_format_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub next_due_date: Option<Date>,
    #[serde(
        default,
        with = "bdc_date_format_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date: Option<Date>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_in_advance: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "crate::entities::line_items")]
    pub recurring_bill_line_items: Vec<RecurringBillLineItem>,
}

impl BillComObject for RecurringBill {
    const ENTITY: &'static str = "RecurringBill";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringBillLineItem {
    pub entity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurring_bill_id: Option<String>,
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

impl BillComObject for RecurringBillLineItem {
    const ENTITY: &'static str = "RecurringBillLineItem";
}

/// Line-item parameters for a recurring-bill create. Required: `amount`.
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
    const ENTITY: &'static str = RecurringBillLineItem::ENTITY;
}

/// Parameters for `Crud/Create/RecurringBill.json`.
///
/// Required, in order: `vendorId`, `timePeriod`, `frequencyPerTimePeriod`,
/// `nextDueDate`, `recurringBillLineItems` (each requires `amount`).
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Builder {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_period: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_per_time_period: Option<u32>,
    #[serde(
        default,
        with = "bdc_date_format_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub next_due_date: Option<Date>,
    #[serde(serialize_with = "request::tagged_items")]
    pub recurring_bill_line_items: Vec<LineItemBuilder>,
    pub is_active: IsActive,
    #[serde(
        default,
        with = "bdc_date_format_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date: Option<Date>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_in_advance: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl BillComObject for Builder {
    const ENTITY: &'static str = RecurringBill::ENTITY;
}

impl CreateParams for Builder {
    type Entity = RecurringBill;

    fn validate(&self) -> Result<()> {
        require(self.vendor_id.as_ref(), "vendorId")?;
        require(self.time_period.as_ref(), "timePeriod")?;
        require(self.frequency_per_time_period.as_ref(), "frequencyPerTimePeriod")?;
        require(self.next_due_date.as_ref(), "nextDueDate")?;
        require_items(&self.recurring_bill_line_items, "recurringBillLineItems")?;
        for item in &self.recurring_bill_line_items {
            if item.amount.is_none() {
                return Err(Error::MissingRequiredField { field: "amount" });
            }
        }
        Ok(())
    }
}
