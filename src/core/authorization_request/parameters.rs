use crate::core::object::TypedParameter;
use anyhow::{bail, Error};
use serde_json::Value as Json;
use url::Url;

/// `presentation_definition` field in the Authorization Request, as a raw JSON document.
///
/// The value is not decoded into a [PresentationDefinition](crate::core::presentation_definition::PresentationDefinition)
/// here: decoding and schema validation are performed by the resolver.
#[derive(Debug, Clone, PartialEq)]
pub struct PresentationDefinition(pub Json);

impl TypedParameter for PresentationDefinition {
    const KEY: &'static str = "presentation_definition";
}

impl TryFrom<Json> for PresentationDefinition {
    type Error = Error;

    fn try_from(value: Json) -> Result<Self, Self::Error> {
        if !value.is_object() {
            bail!("expected a JSON object")
        }
        Ok(Self(value))
    }
}

impl From<PresentationDefinition> for Json {
    fn from(value: PresentationDefinition) -> Self {
        value.0
    }
}

/// `presentation_definition_uri` field in the Authorization Request.
///
/// Any well-formed URL is accepted when parsing; the `https` scheme
/// requirement is enforced by the resolver.
#[derive(Debug, Clone, PartialEq)]
pub struct PresentationDefinitionUri(pub Url);

impl TypedParameter for PresentationDefinitionUri {
    const KEY: &'static str = "presentation_definition_uri";
}

impl TryFrom<Json> for PresentationDefinitionUri {
    type Error = Error;

    fn try_from(value: Json) -> Result<Self, Self::Error> {
        Ok(serde_json::from_value(value).map(Self)?)
    }
}

impl From<PresentationDefinitionUri> for Json {
    fn from(value: PresentationDefinitionUri) -> Self {
        value.0.to_string().into()
    }
}

/// `scope` field in the Authorization Request: a space-separated list of scope values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope(pub String);

impl Scope {
    /// Return the scope values in order of appearance.
    ///
    /// Runs of whitespace separate values, so no value is ever empty.
    /// Duplicates are kept.
    pub fn tokens(&self) -> Vec<String> {
        self.0.split_whitespace().map(ToOwned::to_owned).collect()
    }
}

impl TypedParameter for Scope {
    const KEY: &'static str = "scope";
}

impl TryFrom<Json> for Scope {
    type Error = Error;

    fn try_from(value: Json) -> Result<Self, Self::Error> {
        Ok(Self(serde_json::from_value(value)?))
    }
}

impl From<Scope> for Json {
    fn from(value: Scope) -> Self {
        Json::String(value.0)
    }
}
