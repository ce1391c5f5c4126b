use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub mod parameters;
pub mod source;

pub use source::{PresentationDefinitionResolver, PresentationDefinitionSource, PresentationError};

/// The typed view of the Authorization Request fields that locate a Presentation Definition.
///
/// Unlike the generic [UntypedObject](crate::core::object::UntypedObject) view, every field is a
/// string: `presentation_definition` carries the JSON-encoded definition. Other request
/// parameters are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthorizationRequestData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presentation_definition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presentation_definition_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl AuthorizationRequestData {
    /// Parse from urlencoded query parameters.
    /// ```
    /// # use presentation_exchange::core::authorization_request::AuthorizationRequestData;
    /// let query = "client_id=xyz&scope=com.example.healthCardCredential_presentation";
    ///
    /// let request = AuthorizationRequestData::from_query_params(query).unwrap();
    ///
    /// assert_eq!(request.scope.as_deref(), Some("com.example.healthCardCredential_presentation"));
    /// assert!(request.presentation_definition.is_none());
    /// ```
    pub fn from_query_params(query_params: &str) -> Result<Self> {
        serde_urlencoded::from_str(query_params)
            .context("unable to parse Authorization Request from query params")
    }

    /// Encode as urlencoded query parameters.
    pub fn to_query_params(&self) -> Result<String> {
        serde_urlencoded::to_string(self)
            .context("unable to encode Authorization Request as query params")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_params() {
        let request = AuthorizationRequestData {
            presentation_definition: Some(r#"{"id":"a b"}"#.into()),
            scope: Some("openid profile".into()),
            ..Default::default()
        };

        let query = request.to_query_params().unwrap();
        assert!(!query.contains("presentation_definition_uri"));

        let decoded = AuthorizationRequestData::from_query_params(&query).unwrap();
        assert_eq!(decoded, request);
    }

    #[test]
    fn empty_query() {
        let request = AuthorizationRequestData::from_query_params("").unwrap();
        assert_eq!(request, AuthorizationRequestData::default());
    }
}
