use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use serde_json::Value as Json;
use tracing::debug;
use url::Url;

use super::{
    parameters::{
        PresentationDefinition as PresentationDefinitionParameter, PresentationDefinitionUri,
        Scope,
    },
    AuthorizationRequestData,
};
use crate::{
    core::{
        object::{ParsingErrorContext, UntypedObject},
        presentation_definition::PresentationDefinition,
        util::{base_request, AsyncHttpClient, HttpsUrl},
    },
    json_schema_validation::DefinitionSchema,
    utils::NonEmptyVec,
};

/// Where the Presentation Definition of an Authorization Request comes from.
///
/// Exactly one source is determined per request, see [PresentationDefinitionResolver].
#[derive(Debug, Clone, PartialEq)]
pub enum PresentationDefinitionSource {
    /// The definition was passed inline in the `presentation_definition` parameter.
    PassByValue(PresentationDefinition),
    /// The definition must be fetched from the `presentation_definition_uri` parameter.
    FetchByReference(HttpsUrl),
    /// The definition is implied by the `scope` parameter values, in order of appearance.
    Implied(NonEmptyVec<String>),
}

/// Errors raised while determining the [PresentationDefinitionSource] of a request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PresentationError {
    /// The request either carries a `presentation_definition` or `presentation_definition_uri`
    /// that is not valid, or does not carry any usable way to determine the definition.
    ///
    /// The contained message is diagnostic only.
    #[error("invalid presentation definition: {0}")]
    InvalidPresentationDefinition(String),
}

impl PresentationError {
    fn invalid(error: anyhow::Error) -> Self {
        Self::InvalidPresentationDefinition(format!("{error:#}"))
    }
}

/// The request fields the resolver inspects, extracted from either request view.
///
/// `None` means the field is absent. A present field holds either its candidate value or
/// the reason it could not be read.
struct RequestFields {
    presentation_definition: Option<Result<Json>>,
    presentation_definition_uri: Option<Result<Url>>,
    scope: Option<Result<Scope>>,
}

impl From<&UntypedObject> for RequestFields {
    fn from(object: &UntypedObject) -> Self {
        Self {
            presentation_definition: object
                .get::<PresentationDefinitionParameter>()
                .map(|parameter| parameter.parsing_error().map(|pd| pd.0)),
            presentation_definition_uri: object
                .get::<PresentationDefinitionUri>()
                .map(|parameter| parameter.parsing_error().map(|uri| uri.0)),
            scope: object.get::<Scope>(),
        }
    }
}

impl From<&AuthorizationRequestData> for RequestFields {
    fn from(data: &AuthorizationRequestData) -> Self {
        Self {
            presentation_definition: data.presentation_definition.as_deref().map(|json| {
                serde_json::from_str(json)
                    .context("'presentation_definition' is not a valid JSON string")
            }),
            presentation_definition_uri: data.presentation_definition_uri.as_deref().map(|uri| {
                Url::parse(uri).context("'presentation_definition_uri' could not be parsed")
            }),
            scope: data.scope.clone().map(|scope| Ok(Scope(scope))),
        }
    }
}

/// Determines the [PresentationDefinitionSource] of an Authorization Request.
///
/// The request fields are inspected in a fixed order, and the first field that is present
/// decides the outcome on its own:
///
/// 1. `presentation_definition`: must decode into a [PresentationDefinition] (and conform to the
///    schema, if one is configured), otherwise resolution fails.
/// 2. `presentation_definition_uri`: must be a valid `https` URL, otherwise resolution fails.
/// 3. `scope`: used when it holds at least one scope value.
///
/// A request with none of the above fails with [PresentationError::InvalidPresentationDefinition].
///
/// Resolution performs no I/O.
#[derive(Debug, Clone, Default)]
pub struct PresentationDefinitionResolver {
    schema: Option<Arc<DefinitionSchema>>,
}

impl PresentationDefinitionResolver {
    /// A resolver that relies on the structural validation of the decoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// A resolver that additionally requires inline definitions to conform to `schema`.
    pub fn with_schema(schema: DefinitionSchema) -> Self {
        Self {
            schema: Some(Arc::new(schema)),
        }
    }

    /// Resolve the source from the generic JSON view of the request, where
    /// `presentation_definition` is an inline JSON object.
    pub fn resolve_object(
        &self,
        request: &UntypedObject,
    ) -> Result<PresentationDefinitionSource, PresentationError> {
        self.resolve(RequestFields::from(request))
    }

    /// Resolve the source from the typed view of the request, where
    /// `presentation_definition` is a JSON-encoded string.
    pub fn resolve_data(
        &self,
        request: &AuthorizationRequestData,
    ) -> Result<PresentationDefinitionSource, PresentationError> {
        self.resolve(RequestFields::from(request))
    }

    fn resolve(
        &self,
        fields: RequestFields,
    ) -> Result<PresentationDefinitionSource, PresentationError> {
        if let Some(candidate) = fields.presentation_definition {
            let definition = candidate
                .and_then(|document| self.decode(document))
                .map_err(PresentationError::invalid)?;
            return Ok(PresentationDefinitionSource::PassByValue(definition));
        }

        if let Some(uri) = fields.presentation_definition_uri {
            let url = uri
                .and_then(|url| {
                    HttpsUrl::try_from(url).context("'presentation_definition_uri' is not accepted")
                })
                .map_err(PresentationError::invalid)?;
            return Ok(PresentationDefinitionSource::FetchByReference(url));
        }

        // An empty scope falls through to the error below.
        if let Some(Ok(scope)) = fields.scope {
            if let Some(tokens) = NonEmptyVec::maybe_new(scope.tokens()) {
                return Ok(PresentationDefinitionSource::Implied(tokens));
            }
        }

        Err(PresentationError::InvalidPresentationDefinition(
            "unable to determine the presentation definition from the request".into(),
        ))
    }

    fn decode(&self, document: Json) -> Result<PresentationDefinition> {
        if let Some(schema) = &self.schema {
            let violations = schema.validate(&document);
            if !violations.is_empty() {
                let violations = violations
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; ");
                bail!("'presentation_definition' does not conform to the schema: {violations}")
            }
        }

        document.try_into()
    }
}

impl TryFrom<&UntypedObject> for PresentationDefinitionSource {
    type Error = PresentationError;

    fn try_from(request: &UntypedObject) -> Result<Self, Self::Error> {
        PresentationDefinitionResolver::new().resolve_object(request)
    }
}

impl TryFrom<&AuthorizationRequestData> for PresentationDefinitionSource {
    type Error = PresentationError;

    fn try_from(request: &AuthorizationRequestData) -> Result<Self, Self::Error> {
        PresentationDefinitionResolver::new().resolve_data(request)
    }
}

impl PresentationDefinitionSource {
    /// Obtain the [PresentationDefinition] described by this source.
    ///
    /// A definition passed by value is returned as is. A definition passed by reference is
    /// requested from its URL with `http_client`. Scope values carry no definition: mapping
    /// them to one is left to the caller, so this returns an error.
    pub async fn fetch<H: AsyncHttpClient + ?Sized>(
        &self,
        http_client: &H,
    ) -> Result<PresentationDefinition> {
        match self {
            Self::PassByValue(definition) => Ok(definition.clone()),
            Self::FetchByReference(url) => {
                debug!("fetching presentation definition from {url}");

                let request = base_request()
                    .method("GET")
                    .uri(url.as_str())
                    .body(vec![])
                    .context("failed to build presentation definition request")?;

                let response = http_client.execute(request).await.context(format!(
                    "failed to make presentation definition request at {url}"
                ))?;

                let status = response.status();

                if !status.is_success() {
                    bail!("presentation definition request was unsuccessful (status: {status})")
                }

                serde_json::from_slice::<Json>(response.body())
                    .context(format!(
                        "failed to parse presentation definition response as JSON from {url} (status: {status})"
                    ))?
                    .try_into()
            }
            Self::Implied(scope) => Err(anyhow!(
                "presentation definition is implied by scope '{}' and cannot be fetched",
                scope.join(" ")
            )),
        }
    }
}
