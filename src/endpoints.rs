use std::fmt;

use url::Url;

use crate::error::{Error, Result};

pub const SANDBOX_URL: &str = "https://api-sandbox.bill.com/api/v2/";
pub const APP_TEST_URL: &str = "https://app-test.bill.com/api/v2/";

/// Which Bill.com deployment to talk to.
///
/// `"sandbox"` and `"app-test"` resolve to the two known hosts; any other
/// string falls back to the sandbox. `Custom` exists so tests can point the
/// client at a local mock server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Sandbox,
    AppTest,
    Custom(Url),
}

impl Environment {
    pub fn base_url(&self) -> Result<Url> {
        let url = match self {
            Self::Sandbox => SANDBOX_URL,
            Self::AppTest => APP_TEST_URL,
            Self::Custom(url) => return Ok(url.clone()),
        };
        Url::parse(url).map_err(|_| Error::InvalidEndpoint)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::Sandbox
    }
}

impl From<&str> for Environment {
    fn from(env: &str) -> Self {
        match env {
            "app-test" => Self::AppTest,
            // Unrecognized environments default to the sandbox rather than
            // accidentally hitting production.
            _ => Self::Sandbox,
        }
    }
}

/// The four generic CRUD operations every Bill.com resource exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrudOp {
    Create,
    Read,
    Update,
    List,
}

impl CrudOp {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::Read => "Read",
            Self::Update => "Update",
            Self::List => "List",
        }
    }
}

/// A typed representation of Bill.com v2 API endpoints.
///
/// Every endpoint is a POST to `<base>/<path>.json`; this enum provides a
/// type-safe way to construct those paths.
#[derive(Debug, Clone)]
pub enum BillComEndpoint {
    // Session endpoints
    Login,
    Logout,
    MfaChallenge,
    MfaAuthenticate,
    MfaStatus,

    // Generic resource endpoints, e.g. `Crud/Create/Bill.json`
    Crud(CrudOp, &'static str),
    EntityMetadata,

    // Payment endpoints
    PayBills,
    RecordApPayment,
    ChargeCustomer,
    RecordArPayment,
    SendInvoice,

    // Custom endpoint with a raw path component
    Custom(String),
}

impl BillComEndpoint {
    /// Resolves the endpoint against an environment's base URL.
    pub fn to_url(&self, env: &Environment) -> Result<Url> {
        let base = env.base_url()?;

        let path = match self {
            Self::Login => "Login.json".to_string(),
            Self::Logout => "Logout.json".to_string(),
            Self::MfaChallenge => "MFAChallenge.json".to_string(),
            Self::MfaAuthenticate => "MFAAuthenticate.json".to_string(),
            Self::MfaStatus => "MFAStatus.json".to_string(),
            Self::Crud(op, entity) => format!("Crud/{}/{entity}.json", op.as_str()),
            Self::EntityMetadata => "GetEntityMetadata.json".to_string(),
            Self::PayBills => "PayBills.json".to_string(),
            Self::RecordApPayment => "RecordAPPayment.json".to_string(),
            Self::ChargeCustomer => "ChargeCustomer.json".to_string(),
            Self::RecordArPayment => "RecordARPayment.json".to_string(),
            Self::SendInvoice => "SendInvoice.json".to_string(),
            Self::Custom(path) => path.clone(),
        };

        base.join(&path).map_err(|_| Error::InvalidEndpoint)
    }
}

impl fmt::Display for BillComEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_url(&Environment::Sandbox) {
            Ok(url) => write!(f, "{url}"),
            Err(_) => write!(f, "Invalid endpoint"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crud_endpoints_join_operation_and_entity() {
        let url = BillComEndpoint::Crud(CrudOp::Create, "Bill")
            .to_url(&Environment::Sandbox)
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api-sandbox.bill.com/api/v2/Crud/Create/Bill.json"
        );
    }

    #[test]
    fn app_test_resolves_to_its_own_host() {
        let url = BillComEndpoint::Login.to_url(&Environment::AppTest).unwrap();
        assert_eq!(url.as_str(), "https://app-test.bill.com/api/v2/Login.json");
    }

    #[test]
    fn unrecognized_environment_defaults_to_sandbox() {
        assert_eq!(Environment::from("production"), Environment::Sandbox);
        assert_eq!(Environment::from("app-test"), Environment::AppTest);
        assert_eq!(Environment::from("sandbox"), Environment::Sandbox);
    }
}
