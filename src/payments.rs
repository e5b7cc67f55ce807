//! Payment operations that sit outside the generic CRUD surface: disbursing
//! bill payments, charging customers, recording offline payments, and
//! emailing invoices.

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Value, json};
use time::Date;

use crate::client::Client;
use crate::endpoints::{BillComEndpoint, CrudOp};
use crate::entities::payment::{ReceivedPay, SentPay};
use crate::entities::{BillComObject, from_value, require, require_items};
use crate::error::{Error, Result};
use crate::request::ListParams;
use crate::utils::date_format::bdc_date_format_option;

/// One bill to cover with a payment, used by [`PaymentsApi::pay_bills`] and
/// [`PaymentsApi::record_ap_payment`]. Both `bill_id` and `amount` are
/// required.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillPayParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill_id: Option<String>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<Decimal>,
}

impl BillPayParams {
    #[must_use]
    pub fn new(bill_id: impl Into<String>, amount: Decimal) -> Self {
        Self {
            bill_id: Some(bill_id.into()),
            amount: Some(amount),
        }
    }

    fn validate(&self) -> Result<()> {
        require(self.bill_id.as_ref(), "billId")?;
        require(self.amount.as_ref(), "amount")
    }
}

/// Parameters for `PayBills.json`. Disburses online payments against one
/// vendor's bills; the API caps a single batch at 200 resulting payments.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayBillsParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<String>,
    #[serde(
        default,
        with = "bdc_date_format_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub process_date: Option<Date>,
    pub bill_pays: Vec<BillPayParams>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PayBillsParams {
    #[must_use]
    pub fn new(vendor_id: impl Into<String>, bill_pays: Vec<BillPayParams>) -> Self {
        Self {
            vendor_id: Some(vendor_id.into()),
            bill_pays,
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<()> {
        require(self.vendor_id.as_ref(), "vendorId")?;
        require_items(&self.bill_pays, "billPays")?;
        for bill_pay in &self.bill_pays {
            bill_pay.validate()?;
        }
        Ok(())
    }
}

/// Parameters for `RecordAPPayment.json`: an offline payment made outside
/// Bill.com, recorded after the fact against one vendor's bills.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordApPaymentParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<String>,
    #[serde(
        default,
        with = "bdc_date_format_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub process_date: Option<Date>,
    pub bill_pays: Vec<BillPayParams>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_print_check: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_of_account_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sync_reference: Option<String>,
}

impl RecordApPaymentParams {
    #[must_use]
    pub fn new(
        vendor_id: impl Into<String>,
        process_date: Date,
        bill_pays: Vec<BillPayParams>,
    ) -> Self {
        Self {
            vendor_id: Some(vendor_id.into()),
            process_date: Some(process_date),
            bill_pays,
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<()> {
        require(self.vendor_id.as_ref(), "vendorId")?;
        require(self.process_date.as_ref(), "processDate")?;
        require_items(&self.bill_pays, "billPays")?;
        for bill_pay in &self.bill_pays {
            bill_pay.validate()?;
        }
        Ok(())
    }
}

/// One invoice to settle with a received payment. Both `invoice_id` and
/// `amount` are required.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePayParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<String>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<Decimal>,
}

impl InvoicePayParams {
    #[must_use]
    pub fn new(invoice_id: impl Into<String>, amount: Decimal) -> Self {
        Self {
            invoice_id: Some(invoice_id.into()),
            amount: Some(amount),
        }
    }

    fn validate(&self) -> Result<()> {
        require(self.invoice_id.as_ref(), "invoiceId")?;
        require(self.amount.as_ref(), "amount")
    }
}

/// Parameters for `ChargeCustomer.json`: pull funds from a customer's stored
/// payment account against their open invoices.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeCustomerParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    /// Payment instrument code, e.g. `"3"` for ACH.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_account_id: Option<String>,
    #[serde(
        default,
        with = "bdc_date_format_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub payment_date: Option<Date>,
    pub invoice_pays: Vec<InvoicePayParams>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

impl ChargeCustomerParams {
    #[must_use]
    pub fn new(
        customer_id: impl Into<String>,
        payment_type: impl Into<String>,
        invoice_pays: Vec<InvoicePayParams>,
    ) -> Self {
        Self {
            customer_id: Some(customer_id.into()),
            payment_type: Some(payment_type.into()),
            invoice_pays,
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<()> {
        require(self.customer_id.as_ref(), "customerId")?;
        require(self.payment_type.as_ref(), "paymentType")?;
        require_items(&self.invoice_pays, "invoicePays")?;
        for invoice_pay in &self.invoice_pays {
            invoice_pay.validate()?;
        }
        Ok(())
    }
}

/// Parameters for `RecordARPayment.json`: an offline customer payment (cash,
/// paper check, ...) recorded against invoices.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordArPaymentParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    #[serde(
        default,
        with = "bdc_date_format_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub payment_date: Option<Date>,
    /// Payment instrument code, e.g. `"0"` for cash, `"1"` for check.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_type: Option<String>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deposit_to_account_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref_number: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub invoice_pays: Vec<InvoicePayParams>,
}

impl RecordArPaymentParams {
    #[must_use]
    pub fn new(
        customer_id: impl Into<String>,
        payment_date: Date,
        payment_type: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            customer_id: Some(customer_id.into()),
            payment_date: Some(payment_date),
            payment_type: Some(payment_type.into()),
            amount: Some(amount),
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<()> {
        require(self.customer_id.as_ref(), "customerId")?;
        require(self.payment_date.as_ref(), "paymentDate")?;
        require(self.payment_type.as_ref(), "paymentType")?;
        require(self.amount.as_ref(), "amount")?;
        for invoice_pay in &self.invoice_pays {
            invoice_pay.validate()?;
        }
        Ok(())
    }
}

/// Mail headers for [`PaymentsApi::send_invoice`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MailHeaders {
    pub from_user_id: String,
    pub to_email_addresses: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

/// Handle for the payment operations, obtained from [`Client::payments`].
#[derive(Debug)]
pub struct PaymentsApi<'a> {
    client: &'a Client,
}

impl<'a> PaymentsApi<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Disburses online payments for one vendor's bills via `PayBills.json`.
    ///
    /// The response carries the resulting payments under `sentPays`, as an
    /// array or as a bare object when only one payment was created; both
    /// shapes decode to a `Vec`.
    #[instrument(skip(self, params))]
    pub async fn pay_bills(&self, params: &PayBillsParams) -> Result<Vec<SentPay>> {
        params.validate()?;
        let data = serde_json::to_value(params)?;
        let response = self
            .client
            .post(BillComEndpoint::PayBills, Some(data))
            .await?;
        sent_pays(&response)
    }

    /// Records an offline (already made) payment via `RecordAPPayment.json`,
    /// returning the created [`SentPay`].
    #[instrument(skip(self, params))]
    pub async fn record_ap_payment(&self, params: &RecordApPaymentParams) -> Result<SentPay> {
        params.validate()?;
        let data = serde_json::to_value(params)?;
        let response = self
            .client
            .post(BillComEndpoint::RecordApPayment, Some(data))
            .await?;
        from_value(response)
    }

    /// Charges a customer's stored payment account via `ChargeCustomer.json`.
    ///
    /// The created [`ReceivedPay`] comes back nested under
    /// `chargedReceivedPay`.
    #[instrument(skip(self, params))]
    pub async fn charge_customer(&self, params: &ChargeCustomerParams) -> Result<ReceivedPay> {
        params.validate()?;
        let data = serde_json::to_value(params)?;
        let response = self
            .client
            .post(BillComEndpoint::ChargeCustomer, Some(data))
            .await?;
        let charged = response
            .get("chargedReceivedPay")
            .cloned()
            .ok_or_else(|| Error::UnknownEntity {
                name: "(missing discriminator)".to_string(),
            })?;
        from_value(charged)
    }

    /// Records an offline customer payment via `RecordARPayment.json`,
    /// returning the created [`ReceivedPay`] with its nested `invoicePays`.
    #[instrument(skip(self, params))]
    pub async fn record_ar_payment(&self, params: &RecordArPaymentParams) -> Result<ReceivedPay> {
        params.validate()?;
        let data = serde_json::to_value(params)?;
        let response = self
            .client
            .post(BillComEndpoint::RecordArPayment, Some(data))
            .await?;
        from_value(response)
    }

    /// Emails an invoice to the customer via `SendInvoice.json`.
    /// Fire-and-forget: success returns no payload.
    #[instrument(skip(self, headers, content))]
    pub async fn send_invoice(
        &self,
        invoice_id: &str,
        headers: &MailHeaders,
        content: &str,
    ) -> Result<()> {
        if invoice_id.is_empty() {
            return Err(Error::MissingRequiredField { field: "invoiceId" });
        }
        let data = json!({
            "invoiceId": invoice_id,
            "headers": headers,
            "content": { "body": content },
        });
        self.client
            .post(BillComEndpoint::SendInvoice, Some(data))
            .await?;
        Ok(())
    }

    /// Lists sent payments, equivalent to `client.sent_pays().list(params)`.
    #[instrument(skip(self, params))]
    pub async fn list_sent_pays(&self, params: ListParams) -> Result<Vec<SentPay>> {
        let data = serde_json::to_value(&params)?;
        let response = self
            .client
            .post(
                BillComEndpoint::Crud(CrudOp::List, SentPay::ENTITY),
                Some(data),
            )
            .await?;
        let items: Vec<Value> = serde_json::from_value(response)?;
        items.into_iter().map(from_value).collect()
    }
}

/// Decodes the `sentPays` member of a payment response, accepting both the
/// array and single-object shapes the API produces.
fn sent_pays(response: &Value) -> Result<Vec<SentPay>> {
    match response.get("sentPays") {
        Some(Value::Array(items)) => items.iter().cloned().map(from_value).collect(),
        Some(single @ Value::Object(_)) => Ok(vec![from_value(single.clone())?]),
        _ => Err(Error::UnknownEntity {
            name: "(missing discriminator)".to_string(),
        }),
    }
}
