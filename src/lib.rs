//! This library determines where the [Presentation Definition] of an [OID4VP] Authorization
//! Request comes from, and provides the registry of claim format designations used by
//! Presentation Definitions.
//!
//! [Presentation Definition]: <https://identity.foundation/presentation-exchange/spec/v2.0.0/#presentation-definition>
//! [OID4VP]: <https://openid.net/specs/openid-4-verifiable-presentations-1_0.html>
//!
//! # Resolving a Presentation Definition source
//!
//! An Authorization Request carries its Presentation Definition in one of three ways, checked
//! in this order:
//!
//! 1. inline, in the `presentation_definition` parameter;
//! 2. by reference, in the `presentation_definition_uri` parameter, which must be an `https` URL;
//! 3. implied by the values of the `scope` parameter.
//!
//! The first parameter that is present decides the outcome: an invalid inline definition or a
//! non-`https` reference is an error, even when a later parameter would have been usable.
//!
//! ```
//! use presentation_exchange::core::{
//!     authorization_request::PresentationDefinitionSource, object::UntypedObject,
//! };
//! use serde_json::json;
//!
//! let request: UntypedObject = serde_json::from_value(json!({
//!     "presentation_definition_uri": "https://verifier.example/pd/1",
//!     "scope": "com.example.healthCardCredential_presentation",
//! }))
//! .unwrap();
//!
//! let source = PresentationDefinitionSource::try_from(&request).unwrap();
//!
//! let PresentationDefinitionSource::FetchByReference(url) = source else {
//!     panic!("expected a reference")
//! };
//! assert_eq!(url.as_str(), "https://verifier.example/pd/1");
//! ```
//!
//! Requests can also be read from query parameters with
//! [`AuthorizationRequestData`], and inline definitions can be checked against a JSON Schema
//! by building a [`PresentationDefinitionResolver`] from a [`Config`].
//!
//! Fetching a referenced definition is left to an [`AsyncHttpClient`] implementation, see
//! [`PresentationDefinitionSource::fetch`].
//!
//! [`AuthorizationRequestData`]: crate::core::authorization_request::AuthorizationRequestData
//! [`PresentationDefinitionResolver`]: crate::core::authorization_request::PresentationDefinitionResolver
//! [`PresentationDefinitionSource::fetch`]: crate::core::authorization_request::PresentationDefinitionSource::fetch
//! [`Config`]: crate::config::Config
//! [`AsyncHttpClient`]: crate::core::util::AsyncHttpClient
//!
//! # Claim Formats
//!
//! [`ClaimFormat`] maps every supported claim format to its wire identifier, e.g. `mso_mdoc`,
//! `jwt_vc`, `ldp_vp` or `vc+sd-jwt`.
//!
//! ```
//! use presentation_exchange::core::credential_format::{ClaimFormat, SdJwtType};
//!
//! assert_eq!(ClaimFormat::SdJwt(SdJwtType::VcZkp).identifier(), "vc+sd-jwt+zkp");
//! assert_eq!(ClaimFormat::from_identifier("mso_mdoc"), Some(ClaimFormat::MsoMdoc));
//! assert_eq!(ClaimFormat::from_identifier("unknown-xyz"), None);
//! ```
//!
//! [`ClaimFormat`]: crate::core::credential_format::ClaimFormat

pub mod config;
pub mod core;
pub mod json_schema_validation;
pub mod utils;
