use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

pub mod bank_account;
pub mod bill;
pub mod customer;
pub mod invoice;
pub mod metadata;
pub mod payment;
pub mod recurring_bill;
pub mod recurring_invoice;
pub mod resource;
pub mod vendor;
pub mod vendor_credit;

use self::bank_account::{CustomerBankAccount, VendorBankAccount};
use self::bill::{Bill, BillLineItem};
use self::customer::Customer;
use self::invoice::{Invoice, InvoiceLineItem};
use self::payment::{BillPay, InvoicePay, ReceivedPay, SentPay};
use self::recurring_bill::{RecurringBill, RecurringBillLineItem};
use self::recurring_invoice::{RecurringInvoice, RecurringInvoiceLineItem};
use self::vendor::Vendor;
use self::vendor_credit::{VendorCredit, VendorCreditLineItem};

/// A Bill.com record type, tagged on the wire by its `entity` discriminator.
pub trait BillComObject {
    const ENTITY: &'static str;
}

/// Parameter sets for `Crud/Create` calls.
///
/// `validate` checks required fields in the documented left-to-right order
/// before anything goes on the wire; the first missing field wins.
pub trait CreateParams: Serialize + std::fmt::Debug {
    type Entity: BillComObject + DeserializeOwned;

    fn validate(&self) -> Result<()>;
}

/// Decodes a raw response object into a typed entity, failing fast when the
/// `entity` discriminator does not match the expected type.
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: BillComObject + DeserializeOwned,
{
    match value.get("entity").and_then(Value::as_str) {
        Some(tag) if tag == T::ENTITY => serde_json::from_value(value).map_err(Error::from),
        Some(tag) => Err(Error::IncorrectEntityType {
            actual: tag.to_string(),
            expected: T::ENTITY,
        }),
        None => Err(Error::UnknownEntity {
            name: "(missing discriminator)".to_string(),
        }),
    }
}

/// `deserialize_with` helper for nested line-item arrays: every element must
/// carry the child type's discriminator.
pub(crate) fn line_items<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: BillComObject + DeserializeOwned,
{
    let values = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    values
        .into_iter()
        .map(|value| {
            match value.get("entity").and_then(Value::as_str) {
                Some(tag) if tag == T::ENTITY => {}
                Some(tag) => {
                    return Err(de::Error::custom(format!(
                        "Incorrect entity type: {tag}. Expected entity type: {}.",
                        T::ENTITY
                    )));
                }
                None => {
                    return Err(de::Error::custom(format!(
                        "missing entity discriminator, expected {}",
                        T::ENTITY
                    )));
                }
            }
            serde_json::from_value(value).map_err(de::Error::custom)
        })
        .collect()
}

pub(crate) fn require<T>(field: Option<&T>, name: &'static str) -> Result<()> {
    match field {
        Some(_) => Ok(()),
        None => Err(Error::MissingRequiredField { field: name }),
    }
}

pub(crate) fn require_items<T>(items: &[T], name: &'static str) -> Result<()> {
    if items.is_empty() {
        Err(Error::MissingRequiredField { field: name })
    } else {
        Ok(())
    }
}

/// Bill.com's string-coded active flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IsActive {
    #[serde(rename = "1")]
    Active,
    #[serde(rename = "2")]
    Inactive,
}

impl Default for IsActive {
    fn default() -> Self {
        Self::Active
    }
}

/// Payment state of a payable/receivable document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    #[serde(rename = "0")]
    PaidInFull,
    #[serde(rename = "1")]
    Open,
    #[serde(rename = "2")]
    PartialPayment,
    #[serde(rename = "4")]
    Scheduled,
}

/// Approval workflow state. The API skips code 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApprovalStatus {
    #[serde(rename = "0")]
    Unassigned,
    #[serde(rename = "1")]
    Assigned,
    #[serde(rename = "3")]
    Approving,
    #[serde(rename = "4")]
    Approved,
    #[serde(rename = "5")]
    Denied,
}

/// The registry of every entity type this crate recognizes, keyed by its
/// discriminator. Dispatch is exhaustive; a discriminator outside this set is
/// an `UnknownEntity` error, never a silent drop.
#[derive(Debug, Clone)]
pub enum Entity {
    Customer(Customer),
    Vendor(Vendor),
    Bill(Bill),
    BillLineItem(BillLineItem),
    Invoice(Invoice),
    InvoiceLineItem(InvoiceLineItem),
    RecurringBill(RecurringBill),
    RecurringBillLineItem(RecurringBillLineItem),
    RecurringInvoice(RecurringInvoice),
    RecurringInvoiceLineItem(RecurringInvoiceLineItem),
    VendorCredit(VendorCredit),
    VendorCreditLineItem(VendorCreditLineItem),
    VendorBankAccount(VendorBankAccount),
    CustomerBankAccount(CustomerBankAccount),
    SentPay(SentPay),
    BillPay(BillPay),
    ReceivedPay(ReceivedPay),
    InvoicePay(InvoicePay),
}

impl Entity {
    /// Decodes any recognized entity from a raw response object.
    pub fn from_value(value: Value) -> Result<Self> {
        let tag = value
            .get("entity")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::UnknownEntity {
                name: "(missing discriminator)".to_string(),
            })?
            .to_string();

        let entity = match tag.as_str() {
            Customer::ENTITY => Self::Customer(serde_json::from_value(value)?),
            Vendor::ENTITY => Self::Vendor(serde_json::from_value(value)?),
            Bill::ENTITY => Self::Bill(serde_json::from_value(value)?),
            BillLineItem::ENTITY => Self::BillLineItem(serde_json::from_value(value)?),
            Invoice::ENTITY => Self::Invoice(serde_json::from_value(value)?),
            InvoiceLineItem::ENTITY => Self::InvoiceLineItem(serde_json::from_value(value)?),
            RecurringBill::ENTITY => Self::RecurringBill(serde_json::from_value(value)?),
            RecurringBillLineItem::ENTITY => {
                Self::RecurringBillLineItem(serde_json::from_value(value)?)
            }
            RecurringInvoice::ENTITY => Self::RecurringInvoice(serde_json::from_value(value)?),
            RecurringInvoiceLineItem::ENTITY => {
                Self::RecurringInvoiceLineItem(serde_json::from_value(value)?)
            }
            VendorCredit::ENTITY => Self::VendorCredit(serde_json::from_value(value)?),
            VendorCreditLineItem::ENTITY => {
                Self::VendorCreditLineItem(serde_json::from_value(value)?)
            }
            VendorBankAccount::ENTITY => Self::VendorBankAccount(serde_json::from_value(value)?),
            CustomerBankAccount::ENTITY => {
                Self::CustomerBankAccount(serde_json::from_value(value)?)
            }
            SentPay::ENTITY => Self::SentPay(serde_json::from_value(value)?),
            BillPay::ENTITY => Self::BillPay(serde_json::from_value(value)?),
            ReceivedPay::ENTITY => Self::ReceivedPay(serde_json::from_value(value)?),
            InvoicePay::ENTITY => Self::InvoicePay(serde_json::from_value(value)?),
            _ => return Err(Error::UnknownEntity { name: tag }),
        };
        Ok(entity)
    }

    /// The discriminator of the wrapped entity.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Customer(_) => Customer::ENTITY,
            Self::Vendor(_) => Vendor::ENTITY,
            Self::Bill(_) => Bill::ENTITY,
            Self::BillLineItem(_) => BillLineItem::ENTITY,
            Self::Invoice(_) => Invoice::ENTITY,
            Self::InvoiceLineItem(_) => InvoiceLineItem::ENTITY,
            Self::RecurringBill(_) => RecurringBill::ENTITY,
            Self::RecurringBillLineItem(_) => RecurringBillLineItem::ENTITY,
            Self::RecurringInvoice(_) => RecurringInvoice::ENTITY,
            Self::RecurringInvoiceLineItem(_) => RecurringInvoiceLineItem::ENTITY,
            Self::VendorCredit(_) => VendorCredit::ENTITY,
            Self::VendorCreditLineItem(_) => VendorCreditLineItem::ENTITY,
            Self::VendorBankAccount(_) => VendorBankAccount::ENTITY,
            Self::CustomerBankAccount(_) => CustomerBankAccount::ENTITY,
            Self::SentPay(_) => SentPay::ENTITY,
            Self::BillPay(_) => BillPay::ENTITY,
            Self::ReceivedPay(_) => ReceivedPay::ENTITY,
            Self::InvoicePay(_) => InvoicePay::ENTITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn from_value_rejects_mismatched_discriminator() {
        let err = from_value::<Customer>(json!({"entity": "Vendor", "id": "x"})).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Incorrect entity type: Vendor. Expected entity type: Customer."
        );
    }

    #[test]
    fn registry_rejects_unknown_discriminator() {
        let err = Entity::from_value(json!({"entity": "FluxCapacitor", "id": "x"})).unwrap_err();
        assert!(matches!(err, Error::UnknownEntity { name } if name == "FluxCapacitor"));
    }

    #[test]
    fn registry_dispatches_on_discriminator() {
        let entity =
            Entity::from_value(json!({"entity": "Vendor", "id": "00901ABCDEF", "name": "Acme"}))
                .unwrap();
        assert_eq!(entity.name(), "Vendor");
        assert!(matches!(entity, Entity::Vendor(_)));
    }
}
