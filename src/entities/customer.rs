use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::entities::{BillComObject, CreateParams, IsActive, require};
use crate::error::Result;
use crate::utils::date_format::bdc_datetime_format_option;

/// A customer record (the payer side of receivables).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
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
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_customer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acc_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill_address1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill_address2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill_address_city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill_address_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill_address_country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill_address_zip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fax: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub print_as: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_authorized_to_charge: Option<bool>,
}

impl BillComObject for Customer {
    const ENTITY: &'static str = "Customer";
}

/// Parameters for `Crud/Create/Customer.json`. Required: `name`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Builder {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub is_active: IsActive,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_customer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Builder {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

impl BillComObject for Builder {
    const ENTITY: &'static str = Customer::ENTITY;
}

impl CreateParams for Builder {
    type Entity = Customer;

    fn validate(&self) -> Result<()> {
        require(self.name.as_ref(), "name")
    }
}
