use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::entities::{BillComObject, PaymentStatus};
use crate::utils::date_format::{bdc_date_format_option, bdc_datetime_format_option};

/// Disbursement state of an outbound payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentPayStatus {
    #[serde(rename = "0")]
    Scheduled,
    #[serde(rename = "1")]
    Paid,
    #[serde(rename = "2")]
    Canceled,
    #[serde(rename = "3")]
    Void,
    #[serde(rename = "4")]
    Failed,
}

/// An outbound (accounts-payable) payment, covering one or more bills.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentPay {
    pub entity: String,
    pub id: String,
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
    #[serde(
        default,
        with = "bdc_date_format_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub process_date: Option<Date>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SentPayStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub txn_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// False for offline payments recorded after the fact.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_online: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_of_account_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sync_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_print_check: Option<bool>,
    #[serde(default, deserialize_with = "crate::entities::line_items")]
    pub bill_pays: Vec<BillPay>,
}

impl BillComObject for SentPay {
    const ENTITY: &'static str = "SentPay";
}

/// The application of one payment to one bill.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillPay {
    pub entity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        with = "bdc_date_format_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub process_date: Option<Date>,
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

impl BillComObject for BillPay {
    const ENTITY: &'static str = "BillPay";
}

/// An inbound (accounts-receivable) payment from a customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceivedPay {
    pub entity: String,
    pub id: String,
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
    /// String-coded settlement state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(
        default,
        with = "bdc_date_format_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub payment_date: Option<Date>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deposit_to_account_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_online: Option<bool>,
    /// Payment instrument code (cash, check, ACH, credit card, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_type: Option<String>,
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
    pub conv_fee_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref_number: Option<String>,
    #[serde(default, deserialize_with = "crate::entities::line_items")]
    pub invoice_pays: Vec<InvoicePay>,
}

impl BillComObject for ReceivedPay {
    const ENTITY: &'static str = "ReceivedPay";
}

/// The application of one received payment to one invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePay {
    pub entity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<String>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<Decimal>,
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

impl BillComObject for InvoicePay {
    const ENTITY: &'static str = "InvoicePay";
}
