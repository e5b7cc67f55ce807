use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::entities::{BillComObject, CreateParams, IsActive, require, require_items};
use crate::error::{Error, Result};
use crate::request;
use crate::utils::date_format::{bdc_date_format_option, bdc_datetime_format_option};

/// A template that generates invoices on a schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringInvoice {
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
    pub is_to_be_printed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_to_be_emailed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_to_be_auto_emailed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_to_be_auto_charged: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_sales_tax: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "crate::entities::line_items")]
    pub recurring_invoice_line_items: Vec<RecurringInvoiceLineItem>,
}

impl BillComObject for RecurringInvoice {
    const ENTITY: &'static str = "RecurringInvoice";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringInvoiceLineItem {
    pub entity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurring_invoice_id: Option<String>,
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

impl BillComObject for RecurringInvoiceLineItem {
    const ENTITY: &'static str = "RecurringInvoiceLineItem";
}

/// Line-item parameters for a recurring-invoice create. Required: `quantity`.
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
    const ENTITY: &'static str = RecurringInvoiceLineItem::ENTITY;
}

/// Parameters for `Crud/Create/RecurringInvoice.json`.
///
/// Required, in order: `customerId`, `timePeriod`, `frequencyPerTimePeriod`,
/// `nextDueDate`, `recurringInvoiceLineItems` (each requires `quantity`).
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Builder {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
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
    pub recurring_invoice_line_items: Vec<LineItemBuilder>,
    pub is_active: IsActive,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_in_advance: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_to_be_printed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_to_be_emailed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl BillComObject for Builder {
    const ENTITY: &'static str = RecurringInvoice::ENTITY;
}

impl CreateParams for Builder {
    type Entity = RecurringInvoice;

    fn validate(&self) -> Result<()> {
        require(self.customer_id.as_ref(), "customerId")?;
        require(self.time_period.as_ref(), "timePeriod")?;
        require(self.frequency_per_time_period.as_ref(), "frequencyPerTimePeriod")?;
        require(self.next_due_date.as_ref(), "nextDueDate")?;
        require_items(&self.recurring_invoice_line_items, "recurringInvoiceLineItems")?;
        for item in &self.recurring_invoice_line_items {
            if item.quantity.is_none() {
                return Err(Error::MissingRequiredField { field: "quantity" });
            }
        }
        Ok(())
    }
}
