use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{
    core::authorization_request::PresentationDefinitionResolver,
    json_schema_validation::DefinitionSchema,
};

/// Resolver configuration.
///
/// ```
/// # use presentation_exchange::config::Config;
/// let config: Config = serde_json::from_str("{}").unwrap();
///
/// assert!(config.presentation_definition_schema.is_none());
/// assert!(config.resolver().is_ok());
/// ```
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Path of a JSON Schema document that inline presentation definitions must conform to.
    ///
    /// When unset, inline definitions are only checked by decoding them.
    #[serde(default)]
    pub presentation_definition_schema: Option<PathBuf>,
}

impl Config {
    /// Build a [PresentationDefinitionResolver] from the configuration.
    ///
    /// # Errors
    ///
    /// If a schema is configured but cannot be loaded or compiled, this will return an error.
    pub fn resolver(&self) -> Result<PresentationDefinitionResolver> {
        let Some(path) = &self.presentation_definition_schema else {
            warn!("no presentation definition schema configured, inline definitions are not schema-validated");
            return Ok(PresentationDefinitionResolver::new());
        };

        debug!("loading presentation definition schema from {}", path.display());
        let schema = DefinitionSchema::from_file(path).context(format!(
            "failed to load presentation definition schema from {}",
            path.display()
        ))?;

        Ok(PresentationDefinitionResolver::with_schema(schema))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_fields_rejected() {
        assert!(serde_json::from_str::<Config>(r#"{"schema": "x.json"}"#).is_err());
    }

    #[test]
    fn missing_schema_file() {
        let config = Config {
            presentation_definition_schema: Some("tests/fixtures/missing.json".into()),
        };
        let err = config.resolver().unwrap_err();
        assert!(format!("{err:#}").contains("file not found"));
    }

    #[test]
    fn schema_file() {
        let config: Config = serde_json::from_str(
            r#"{"presentation_definition_schema": "tests/fixtures/presentation-definition.json"}"#,
        )
        .unwrap();
        assert!(config.resolver().is_ok());
    }
}
