use std::collections::HashMap;

use serde::Deserialize;
use tokio::sync::OnceCell;

use crate::entities::{
    bank_account::{CustomerBankAccount, VendorBankAccount},
    bill::Bill,
    customer::Customer,
    invoice::Invoice,
    payment::{ReceivedPay, SentPay},
    recurring_bill::RecurringBill,
    recurring_invoice::RecurringInvoice,
    vendor::Vendor,
    vendor_credit::VendorCredit,
    BillComObject,
};

/// API-provided schema description for one entity type, fetched from
/// `GetEntityMetadata.json`. Attached to resource handles for inspection,
/// never validated against.
#[derive(Debug, Clone, Deserialize)]
pub struct Metadata {
    pub fields: HashMap<String, FieldMetadata>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMetadata {
    /// The entity type this field belongs to.
    pub entity: String,
    #[serde(default, rename = "type")]
    pub field_type: Option<String>,
    #[serde(default)]
    pub is_read_only: Option<bool>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub max_length: Option<u32>,
}

/// Per-client cache of entity metadata, one lazily-filled cell per resource.
/// The first call fetches; everything after reads the cached value.
#[derive(Debug, Default)]
pub(crate) struct MetadataCache {
    customer: OnceCell<Metadata>,
    vendor: OnceCell<Metadata>,
    bill: OnceCell<Metadata>,
    invoice: OnceCell<Metadata>,
    recurring_bill: OnceCell<Metadata>,
    recurring_invoice: OnceCell<Metadata>,
    vendor_credit: OnceCell<Metadata>,
    vendor_bank_account: OnceCell<Metadata>,
    customer_bank_account: OnceCell<Metadata>,
    sent_pay: OnceCell<Metadata>,
    received_pay: OnceCell<Metadata>,
}

impl MetadataCache {
    pub(crate) fn cell(&self, entity: &str) -> Option<&OnceCell<Metadata>> {
        let cell = match entity {
            Customer::ENTITY => &self.customer,
            Vendor::ENTITY => &self.vendor,
            Bill::ENTITY => &self.bill,
            Invoice::ENTITY => &self.invoice,
            RecurringBill::ENTITY => &self.recurring_bill,
            RecurringInvoice::ENTITY => &self.recurring_invoice,
            VendorCredit::ENTITY => &self.vendor_credit,
            VendorBankAccount::ENTITY => &self.vendor_bank_account,
            CustomerBankAccount::ENTITY => &self.customer_bank_account,
            SentPay::ENTITY => &self.sent_pay,
            ReceivedPay::ENTITY => &self.received_pay,
            _ => return None,
        };
        Some(cell)
    }
}
