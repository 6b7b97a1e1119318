//! Credential check for live mock requests.

use axum::http::header::InvalidHeaderName;
use axum::http::{HeaderMap, HeaderName};

use crate::error::ApiError;
use crate::mock::MockConfiguration;

/// Request-time credential check against a mock configuration.
///
/// Holds no verdicts: every call re-reads the configuration it is given.
#[derive(Debug, Clone)]
pub struct AuthGuard {
    header: HeaderName,
    /// Header name as configured, used in rejection messages.
    label: String,
}

impl AuthGuard {
    /// Guard reading the credential from `header`.
    pub fn new(header: &str) -> Result<Self, InvalidHeaderName> {
        Ok(Self {
            header: HeaderName::from_bytes(header.as_bytes())?,
            label: header.to_string(),
        })
    }

    /// Name of the header carrying the credential, as configured.
    pub fn header(&self) -> &str {
        &self.label
    }

    /// Permit or reject a request.
    ///
    /// Open configurations always pass. Otherwise the first value of the
    /// credential header must equal the credential byte for byte.
    pub fn verify(&self, config: &MockConfiguration, headers: &HeaderMap) -> Result<(), ApiError> {
        let Some(expected) = config.active_credential() else {
            return Ok(());
        };

        match headers.get(&self.header) {
            Some(supplied) if supplied.as_bytes() == expected.as_bytes() => Ok(()),
            _ => Err(self.rejection()),
        }
    }

    /// The error every rejected request receives, whatever the cause.
    pub fn rejection(&self) -> ApiError {
        ApiError::Unauthorized {
            header: self.label.clone(),
        }
    }
}

impl Default for AuthGuard {
    fn default() -> Self {
        Self {
            header: HeaderName::from_static("x-api-key"),
            label: "X-API-Key".to_string(),
        }
    }
}
