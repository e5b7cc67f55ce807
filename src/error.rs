use miette::Diagnostic;
use thiserror::Error;
use tracing_error::SpanTrace;

/// Errors that can occur when interacting with the Bill.com API.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("missing credential: {field}")]
    #[diagnostic(
        code(billdotcom_rs::missing_credential),
        help("Provide a non-empty {field} when constructing the client")
    )]
    MissingCredential { field: &'static str },

    /// Raised client-side before any network call when a required field of a
    /// create request is absent. Fields are checked in the documented order,
    /// first missing field wins.
    #[error("Missing required field: {field}, please define {field}.")]
    #[diagnostic(
        code(billdotcom_rs::missing_required_field),
        help("Set {field} on the request parameters before calling the API")
    )]
    MissingRequiredField { field: &'static str },

    /// The `entity` discriminator of a record did not match the expected type.
    #[error("Incorrect entity type: {actual}. Expected entity type: {expected}.")]
    #[diagnostic(
        code(billdotcom_rs::incorrect_entity_type),
        help("The payload describes a {actual}; this operation expects a {expected}")
    )]
    IncorrectEntityType {
        actual: String,
        expected: &'static str,
    },

    /// The `entity` discriminator matched no known Bill.com type. Unrecognized
    /// discriminators fail loudly instead of being dropped.
    #[error("unknown entity type: {name}")]
    #[diagnostic(
        code(billdotcom_rs::unknown_entity),
        help("The API returned an entity discriminator this crate does not recognize")
    )]
    UnknownEntity { name: String },

    /// The remote API reported a failure (`response_status != 0`). The message
    /// and error code are the API's own, verbatim. Never retried.
    #[error("Bill.com API error {code}: {message}")]
    #[diagnostic(
        code(billdotcom_rs::api_error),
        help("Review the error message returned by the Bill.com API")
    )]
    Api {
        code: String,
        message: String,
        span_trace: SpanTrace,
    },

    #[error("error making request: {0:?}")]
    #[diagnostic(
        code(billdotcom_rs::request_error),
        help("Check your network connection and Bill.com API availability")
    )]
    Request(#[source] reqwest::Error),

    #[error("error decoding response: {0:?}")]
    #[diagnostic(
        code(billdotcom_rs::deserialization_error),
        help("The API returned data in an unexpected format")
    )]
    Decode(#[source] serde_json::Error, Option<String>),

    #[error("endpoint could not be parsed as a URL")]
    #[diagnostic(
        code(billdotcom_rs::invalid_endpoint),
        help("Check that the API endpoint URL is correctly formatted")
    )]
    InvalidEndpoint,
}

impl Error {
    /// True for errors raised before anything went on the wire, i.e. "fix
    /// your input" as opposed to a remote or transport failure.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingCredential { .. }
                | Self::MissingRequiredField { .. }
                | Self::IncorrectEntityType { .. }
        )
    }

    /// The async span trace captured where a remote failure surfaced, when
    /// one was recorded.
    #[must_use]
    pub fn span_trace(&self) -> Option<&SpanTrace> {
        match self {
            Self::Api { span_trace, .. } => Some(span_trace),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Self::Request(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e, None)
    }
}

/// Type alias for results from this crate.
pub type Result<O> = std::result::Result<O, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_message_matches_documented_form() {
        let err = Error::MissingRequiredField { field: "vendorId" };
        assert_eq!(
            err.to_string(),
            "Missing required field: vendorId, please define vendorId."
        );
    }

    #[test]
    fn incorrect_entity_message_matches_documented_form() {
        let err = Error::IncorrectEntityType {
            actual: "Vendor".to_string(),
            expected: "Bill",
        };
        assert_eq!(
            err.to_string(),
            "Incorrect entity type: Vendor. Expected entity type: Bill."
        );
    }

    #[test]
    fn validation_errors_are_distinguishable_from_remote_failures() {
        assert!(Error::MissingRequiredField { field: "id" }.is_validation());
        assert!(
            !Error::Api {
                code: "BDC_1121".to_string(),
                message: "Session is invalid.".to_string(),
                span_trace: SpanTrace::capture(),
            }
            .is_validation()
        );
    }
}
