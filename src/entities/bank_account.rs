use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::entities::{BillComObject, CreateParams, IsActive, require};
use crate::error::Result;
use crate::utils::date_format::bdc_datetime_format_option;

/// A vendor's receiving bank account. Account numbers come back masked.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorBankAccount {
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
    pub routing_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_savings: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_personal_acct: Option<bool>,
}

impl BillComObject for VendorBankAccount {
    const ENTITY: &'static str = "VendorBankAccount";
}

/// Parameters for `Crud/Create/VendorBankAccount.json`.
///
/// Required, in order: `vendorId`, `routingNumber`, `accountNumber`,
/// `usersId`. The `agreedWithTOS` flag is serialized outside the `obj`
/// wrapper by the payload builder.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorBankAccountBuilder {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routing_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users_id: Option<String>,
    pub is_active: IsActive,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_savings: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_personal_acct: Option<bool>,
    #[serde(rename = "agreedWithTOS", skip_serializing_if = "Option::is_none")]
    pub agreed_with_tos: Option<bool>,
}

impl BillComObject for VendorBankAccountBuilder {
    const ENTITY: &'static str = VendorBankAccount::ENTITY;
}

impl CreateParams for VendorBankAccountBuilder {
    type Entity = VendorBankAccount;

    fn validate(&self) -> Result<()> {
        require(self.vendor_id.as_ref(), "vendorId")?;
        require(self.routing_number.as_ref(), "routingNumber")?;
        require(self.account_number.as_ref(), "accountNumber")?;
        require(self.users_id.as_ref(), "usersId")
    }
}

/// A customer's charging bank account, used by the charge-customer flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerBankAccount {
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
    pub name_on_account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routing_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_savings: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_written_auth: Option<bool>,
}

impl BillComObject for CustomerBankAccount {
    const ENTITY: &'static str = "CustomerBankAccount";
}

/// Parameters for `Crud/Create/CustomerBankAccount.json`.
///
/// Required, in order: `customerId`, `nameOnAccount`, `routingNumber`,
/// `accountNumber`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerBankAccountBuilder {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_on_account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routing_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    pub is_active: IsActive,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_savings: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_written_auth: Option<bool>,
    #[serde(rename = "agreedWithTOS", skip_serializing_if = "Option::is_none")]
    pub agreed_with_tos: Option<bool>,
}

impl BillComObject for CustomerBankAccountBuilder {
    const ENTITY: &'static str = CustomerBankAccount::ENTITY;
}

impl CreateParams for CustomerBankAccountBuilder {
    type Entity = CustomerBankAccount;

    fn validate(&self) -> Result<()> {
        require(self.customer_id.as_ref(), "customerId")?;
        require(self.name_on_account.as_ref(), "nameOnAccount")?;
        require(self.routing_number.as_ref(), "routingNumber")?;
        require(self.account_number.as_ref(), "accountNumber")
    }
}
