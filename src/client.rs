use core::fmt;

use reqwest::header;
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::sync::OnceCell;

use crate::endpoints::{BillComEndpoint, Environment};
use crate::entities::bank_account::{CustomerBankAccount, VendorBankAccount};
use crate::entities::bill::Bill;
use crate::entities::customer::Customer;
use crate::entities::invoice::Invoice;
use crate::entities::metadata::{Metadata, MetadataCache};
use crate::entities::payment::{ReceivedPay, SentPay};
use crate::entities::recurring_bill::RecurringBill;
use crate::entities::recurring_invoice::RecurringInvoice;
use crate::entities::resource::Resource;
use crate::entities::vendor::Vendor;
use crate::entities::vendor_credit::VendorCredit;
use crate::error::{Error, Result};
use crate::payments::PaymentsApi;

/// Developer credentials for the Bill.com API.
#[derive(Clone)]
pub struct Credentials {
    pub user_name: String,
    pub password: String,
    pub dev_key: String,
    pub env: Environment,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user_name", &self.user_name)
            .field("password", &"<redacted>")
            .field("dev_key", &"<redacted>")
            .field("env", &self.env)
            .finish()
    }
}

/// The state returned by a successful login, replayed on every later call.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub session_id: String,
    #[serde(default)]
    pub org_id: Option<String>,
    #[serde(default)]
    pub users_id: Option<String>,
}

/// The fixed response envelope every Bill.com call returns with HTTP 200.
/// `response_status` 0 is success, 1 is failure.
#[derive(Debug, Deserialize)]
struct Envelope {
    response_status: i64,
    #[serde(default)]
    response_message: String,
    #[serde(default)]
    response_data: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MfaChallengeResponse {
    challenge_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MfaAuthenticateResponse {
    mfa_id: String,
}

/// Trust status of an MFA-authenticated device.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MfaStatus {
    pub is_trusted: bool,
}

/// The client used for interacting with the Bill.com API. It holds the
/// developer credentials, the session obtained from `login`, and the
/// per-session metadata cache.
///
/// There is no refresh, retry, or expiry handling: a session invalidated
/// server-side simply causes the next call to fail with the API's own error.
#[derive(Debug)]
pub struct Client {
    credentials: Credentials,
    session: Option<Session>,
    cookies: Vec<String>,
    http: reqwest::Client,
    metadata: MetadataCache,
}

impl Client {
    /// Builds a client from credentials.
    ///
    /// # Errors
    /// Fails when any of user name, password, or developer key is empty.
    pub fn new(credentials: Credentials) -> Result<Self> {
        if credentials.user_name.is_empty() {
            return Err(Error::MissingCredential { field: "userName" });
        }
        if credentials.password.is_empty() {
            return Err(Error::MissingCredential { field: "password" });
        }
        if credentials.dev_key.is_empty() {
            return Err(Error::MissingCredential { field: "devKey" });
        }

        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            credentials,
            session: None,
            cookies: Vec::new(),
            http,
            metadata: MetadataCache::default(),
        })
    }

    /// The currently held session, if logged in.
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn environment(&self) -> &Environment {
        &self.credentials.env
    }

    pub(crate) fn metadata_cell(&self, entity: &str) -> Option<&OnceCell<Metadata>> {
        self.metadata.cell(entity)
    }

    /// Sends one form-encoded POST and decodes the response envelope.
    ///
    /// Returns the inner `response_data` plus any `Set-Cookie` values, the
    /// latter only when no cookie was already held (the login case).
    async fn post_form(
        &self,
        endpoint: BillComEndpoint,
        form: Vec<(&'static str, String)>,
    ) -> Result<(Value, Vec<String>)> {
        let url = endpoint.to_url(&self.credentials.env)?;
        trace!(%url, "making POST request");

        let mut request = self
            .http
            .post(url)
            .header(header::ACCEPT, "application/json")
            .form(&form);
        if !self.cookies.is_empty() {
            request = request.header(header::COOKIE, self.cookies.join("; "));
        }

        let response = request.send().await?;

        let cookies = if self.cookies.is_empty() {
            response
                .headers()
                .get_all(header::SET_COOKIE)
                .iter()
                .filter_map(|value| value.to_str().ok())
                .filter_map(|value| value.split(';').next())
                .map(str::to_string)
                .collect()
        } else {
            Vec::new()
        };

        // The API signals failure in the body, not the HTTP status.
        let text = response.text().await?;
        let envelope: Envelope =
            serde_json::from_str(&text).map_err(|e| Error::Decode(e, Some(text)))?;

        if envelope.response_status == 0 {
            Ok((envelope.response_data, cookies))
        } else {
            let code = envelope.response_data["error_code"]
                .as_str()
                .unwrap_or("unknown")
                .to_string();
            let message = envelope.response_data["error_message"]
                .as_str()
                .unwrap_or(&envelope.response_message)
                .to_string();
            debug!(%code, %message, "API reported failure");
            Err(Error::Api {
                code,
                message,
                span_trace: tracing_error::SpanTrace::capture(),
            })
        }
    }

    /// Performs an API call with the standard credential fields
    /// (`devKey`, `sessionId`) plus an optional `data` payload.
    #[instrument(skip(self, data))]
    pub async fn post(&self, endpoint: BillComEndpoint, data: Option<Value>) -> Result<Value> {
        let mut form: Vec<(&'static str, String)> =
            vec![("devKey", self.credentials.dev_key.clone())];
        if let Some(session) = &self.session {
            form.push(("sessionId", session.session_id.clone()));
        }
        if let Some(data) = data {
            form.push(("data", serde_json::to_string(&data)?));
        }

        let (response_data, _) = self.post_form(endpoint, form).await?;
        Ok(response_data)
    }

    /// Logs in to one organization, storing the returned session for all
    /// subsequent calls. `mfa_id` and `device_id` replay a previously trusted
    /// MFA device.
    #[instrument(skip(self))]
    pub async fn login(
        &mut self,
        org_id: &str,
        mfa_id: Option<&str>,
        device_id: Option<&str>,
    ) -> Result<Session> {
        if org_id.is_empty() {
            return Err(Error::MissingRequiredField { field: "orgId" });
        }

        let mut form: Vec<(&'static str, String)> = vec![
            ("userName", self.credentials.user_name.clone()),
            ("password", self.credentials.password.clone()),
            ("orgId", org_id.to_string()),
            ("devKey", self.credentials.dev_key.clone()),
        ];
        if let Some(mfa_id) = mfa_id {
            form.push(("mfaId", mfa_id.to_string()));
        }
        if let Some(device_id) = device_id {
            form.push(("deviceId", device_id.to_string()));
        }

        let (response_data, cookies) = self.post_form(BillComEndpoint::Login, form).await?;
        let session: Session = serde_json::from_value(response_data)?;
        info!(org_id, "logged in to Bill.com");

        self.cookies = cookies;
        self.session = Some(session.clone());
        Ok(session)
    }

    /// Ends the session and clears the stored credentials state.
    #[instrument(skip(self))]
    pub async fn logout(&mut self) -> Result<()> {
        self.post(BillComEndpoint::Logout, None).await?;
        self.session = None;
        self.cookies.clear();
        Ok(())
    }

    /// Starts an MFA challenge, returning the challenge ID the user's token
    /// must answer.
    #[instrument(skip(self))]
    pub async fn mfa_challenge(&self, use_backup: bool) -> Result<String> {
        let response = self
            .post(
                BillComEndpoint::MfaChallenge,
                Some(json!({ "useBackup": use_backup })),
            )
            .await?;
        let challenge: MfaChallengeResponse = serde_json::from_value(response)?;
        Ok(challenge.challenge_id)
    }

    /// Answers an MFA challenge, returning the `mfaId` to replay on later
    /// logins from this device.
    #[instrument(skip(self, token))]
    pub async fn mfa_authenticate(
        &self,
        challenge_id: &str,
        token: &str,
        device_id: &str,
        machine_name: &str,
        remember_me: bool,
    ) -> Result<String> {
        let response = self
            .post(
                BillComEndpoint::MfaAuthenticate,
                Some(json!({
                    "challengeId": challenge_id,
                    "token": token,
                    "deviceId": device_id,
                    "machineName": machine_name,
                    "rememberMe": remember_me,
                })),
            )
            .await?;
        let auth: MfaAuthenticateResponse = serde_json::from_value(response)?;
        Ok(auth.mfa_id)
    }

    /// Checks whether an MFA device is still trusted.
    #[instrument(skip(self))]
    pub async fn mfa_status(&self, mfa_id: &str, device_id: &str) -> Result<MfaStatus> {
        let response = self
            .post(
                BillComEndpoint::MfaStatus,
                Some(json!({ "mfaId": mfa_id, "deviceId": device_id })),
            )
            .await?;
        serde_json::from_value(response).map_err(Error::from)
    }

    /// Access the customers resource
    #[must_use]
    pub fn customers(&self) -> Resource<'_, Customer> {
        Resource::new(self)
    }

    /// Access the vendors resource
    #[must_use]
    pub fn vendors(&self) -> Resource<'_, Vendor> {
        Resource::new(self)
    }

    /// Access the bills resource
    #[must_use]
    pub fn bills(&self) -> Resource<'_, Bill> {
        Resource::new(self)
    }

    /// Access the invoices resource
    #[must_use]
    pub fn invoices(&self) -> Resource<'_, Invoice> {
        Resource::new(self)
    }

    /// Access the recurring bills resource
    #[must_use]
    pub fn recurring_bills(&self) -> Resource<'_, RecurringBill> {
        Resource::new(self)
    }

    /// Access the recurring invoices resource
    #[must_use]
    pub fn recurring_invoices(&self) -> Resource<'_, RecurringInvoice> {
        Resource::new(self)
    }

    /// Access the vendor credits resource
    #[must_use]
    pub fn vendor_credits(&self) -> Resource<'_, VendorCredit> {
        Resource::new(self)
    }

    /// Access the vendor bank accounts resource
    #[must_use]
    pub fn vendor_bank_accounts(&self) -> Resource<'_, VendorBankAccount> {
        Resource::new(self)
    }

    /// Access the customer bank accounts resource
    #[must_use]
    pub fn customer_bank_accounts(&self) -> Resource<'_, CustomerBankAccount> {
        Resource::new(self)
    }

    /// Access the sent payments (accounts payable) resource
    #[must_use]
    pub fn sent_pays(&self) -> Resource<'_, SentPay> {
        Resource::new(self)
    }

    /// Access the received payments (accounts receivable) resource
    #[must_use]
    pub fn received_pays(&self) -> Resource<'_, ReceivedPay> {
        Resource::new(self)
    }

    /// Access the payment operations (pay bills, charge customers, record
    /// offline payments, send invoices)
    #[must_use]
    pub fn payments(&self) -> PaymentsApi<'_> {
        PaymentsApi::new(self)
    }
}
