//! Generation request parsing.

use crate::error::ApiError;

/// Inputs of one generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub app1: String,
    pub app2: String,
    /// Field names as supplied; `None` means "use the default list".
    pub fields: Option<Vec<String>>,
    pub require_auth: bool,
}

impl GenerationRequest {
    pub fn new(app1: impl Into<String>, app2: impl Into<String>) -> Self {
        Self {
            app1: app1.into(),
            app2: app2.into(),
            fields: None,
            require_auth: true,
        }
    }

    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_auth(mut self, require_auth: bool) -> Self {
        self.require_auth = require_auth;
        self
    }

    /// Parse a raw query string.
    ///
    /// `fields` may repeat and is collected in order. Unknown keys are ignored.
    pub fn from_query(query: &str) -> Result<Self, ApiError> {
        let mut app1 = None;
        let mut app2 = None;
        let mut fields: Option<Vec<String>> = None;
        let mut require_auth = true;

        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "app1" => app1 = Some(value.into_owned()),
                "app2" => app2 = Some(value.into_owned()),
                "fields" => fields.get_or_insert_with(Vec::new).push(value.into_owned()),
                "require_auth" => require_auth = parse_bool(&value)?,
                _ => {}
            }
        }

        Ok(Self {
            app1: app1.ok_or_else(|| missing("app1"))?,
            app2: app2.ok_or_else(|| missing("app2"))?,
            fields,
            require_auth,
        })
    }
}

fn missing(name: &str) -> ApiError {
    ApiError::Validation(format!("Missing required query parameter '{}'", name))
}

fn parse_bool(value: &str) -> Result<bool, ApiError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ApiError::Validation(format!(
            "Query parameter 'require_auth' must be a boolean, got '{}'",
            value
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_repeated_fields_in_order() {
        let req = GenerationRequest::from_query("app1=WhatsApp%20Swiggy&app2=Zomato&fields=id&fields=name").unwrap();
        assert_eq!(req.app1, "WhatsApp Swiggy");
        assert_eq!(req.app2, "Zomato");
        assert_eq!(req.fields, Some(vec!["id".to_string(), "name".to_string()]));
        assert!(req.require_auth);
    }

    #[test]
    fn test_absent_fields_is_none() {
        let req = GenerationRequest::from_query("app1=a&app2=b").unwrap();
        assert_eq!(req.fields, None);
    }

    #[test]
    fn test_present_but_empty_fields_is_kept() {
        let req = GenerationRequest::from_query("app1=a&app2=b&fields=").unwrap();
        assert_eq!(req.fields, Some(vec![String::new()]));
    }

    #[test]
    fn test_plus_decodes_to_space() {
        let req = GenerationRequest::from_query("app1=Google+Sheets&app2=b").unwrap();
        assert_eq!(req.app1, "Google Sheets");
    }

    #[test]
    fn test_require_auth_values() {
        for (raw, expected) in [("false", false), ("0", false), ("No", false), ("TRUE", true), ("on", true)] {
            let req = GenerationRequest::from_query(&format!("app1=a&app2=b&require_auth={raw}")).unwrap();
            assert_eq!(req.require_auth, expected, "{raw}");
        }
        assert!(GenerationRequest::from_query("app1=a&app2=b&require_auth=maybe").is_err());
    }

    #[test]
    fn test_missing_names_rejected() {
        let err = GenerationRequest::from_query("app1=a").unwrap_err();
        assert!(matches!(err, ApiError::Validation(ref m) if m.contains("app2")));
    }

    #[test]
    fn test_builder() {
        let req = GenerationRequest::new("a", "b").with_fields(["id"]).with_auth(false);
        assert_eq!(req.fields, Some(vec!["id".to_string()]));
        assert!(!req.require_auth);
    }
}
