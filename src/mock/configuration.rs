//! The live mock description.

use indexmap::IndexMap;
use serde::Serialize;

use crate::mock::credential::Credential;
use crate::mock::slug::Slug;

/// Field name → example value, in request order.
pub type PayloadTemplate = IndexMap<String, String>;

/// Build the payload template for a list of field names.
///
/// Repeated names collapse onto one key; the last occurrence wins.
pub fn payload_template<I, S>(fields: I) -> PayloadTemplate
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    fields
        .into_iter()
        .map(|field| {
            let field = field.as_ref();
            (field.to_string(), format!("sample_{}", field))
        })
        .collect()
}

/// The two mirrored endpoint paths for a service pairing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutePair {
    /// `/<a>to<b>`
    pub forward: String,
    /// `/<b>to<a>`
    pub reverse: String,
}

impl RoutePair {
    pub fn from_slugs(first: &Slug, second: &Slug) -> Self {
        Self {
            forward: format!("/{}to{}", first, second),
            reverse: format!("/{}to{}", second, first),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        [self.forward.as_str(), self.reverse.as_str()].into_iter()
    }
}

/// Response body served by a live mock on success.
#[derive(Debug, Serialize)]
pub struct Envelope<'a> {
    pub status: &'static str,
    pub data: &'a PayloadTemplate,
}

/// The single currently-active generated mock.
///
/// Immutable once built; the store swaps whole values, so the credential,
/// payload and paths a request observes always belong together.
#[derive(Debug, Clone)]
pub struct MockConfiguration {
    credential: Credential,
    auth_required: bool,
    payload: PayloadTemplate,
    routes: RoutePair,
}

impl MockConfiguration {
    pub fn new(
        credential: Credential,
        auth_required: bool,
        payload: PayloadTemplate,
        routes: RoutePair,
    ) -> Self {
        Self {
            credential,
            auth_required,
            payload,
            routes,
        }
    }

    /// The credential requests must present, or `None` when auth is off.
    pub fn active_credential(&self) -> Option<&Credential> {
        self.auth_required.then_some(&self.credential)
    }

    /// The credential drawn for this generation, whether enforced or not.
    pub fn issued_credential(&self) -> &Credential {
        &self.credential
    }

    pub fn auth_required(&self) -> bool {
        self.auth_required
    }

    pub fn payload(&self) -> &PayloadTemplate {
        &self.payload
    }

    pub fn routes(&self) -> &RoutePair {
        &self.routes
    }

    pub fn envelope(&self) -> Envelope<'_> {
        Envelope {
            status: "success",
            data: &self.payload,
        }
    }
}
