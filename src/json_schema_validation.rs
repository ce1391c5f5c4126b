use std::fmt;

use anyhow::{anyhow, Result};
use jsonschema::JSONSchema;
use serde_json::Value as Json;
use tracing::debug;

use crate::utils::json_object_from_file;

/// A single violation reported when a document does not conform to a [DefinitionSchema].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// JSON pointer to the offending location in the validated document.
    pub instance_path: String,
    pub message: String,
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.instance_path, self.message)
        }
    }
}

/// A compiled JSON Schema that candidate Presentation Definition documents are checked against,
/// e.g. the DIF Presentation Exchange `presentation-definition` schema.
///
/// See: [https://identity.foundation/presentation-exchange/spec/v2.0.0/#json-schema](https://identity.foundation/presentation-exchange/spec/v2.0.0/#json-schema)
pub struct DefinitionSchema(JSONSchema);

impl DefinitionSchema {
    /// Compile a JSON Schema document.
    ///
    /// # Errors
    ///
    /// If the document is not a valid JSON Schema, this will return an error.
    pub fn compile(schema: &Json) -> Result<Self> {
        JSONSchema::compile(schema)
            .map(Self)
            .map_err(|e| anyhow!("invalid JSON schema: {e}"))
    }

    /// Load and compile the JSON Schema document at `path`.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let schema = json_object_from_file(path)?;
        Self::compile(&Json::Object(schema))
    }

    /// Validate a document against the schema, returning every violation found.
    ///
    /// An empty list means the document conforms.
    pub fn validate(&self, document: &Json) -> Vec<SchemaViolation> {
        match self.0.validate(document) {
            Ok(()) => Vec::new(),
            Err(errors) => errors
                .map(|error| {
                    debug!("document did not pass schema validation: {error}");
                    SchemaViolation {
                        instance_path: error.instance_path.to_string(),
                        message: error.to_string(),
                    }
                })
                .collect(),
        }
    }

    /// Return `true` if the document conforms to the schema.
    pub fn is_valid(&self, document: &Json) -> bool {
        self.0.is_valid(document)
    }
}

impl fmt::Debug for DefinitionSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefinitionSchema").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    fn schema() -> DefinitionSchema {
        DefinitionSchema::compile(&json!({
            "type": "object",
            "required": ["id", "input_descriptors"],
            "properties": {
                "id": { "type": "string" },
                "input_descriptors": { "type": "array", "minItems": 1 }
            }
        }))
        .unwrap()
    }

    #[test]
    fn valid_document() {
        let document = json!({ "id": "a", "input_descriptors": [{ "id": "b" }] });
        assert!(schema().validate(&document).is_empty());
        assert!(schema().is_valid(&document));
    }

    #[test]
    fn violations_are_reported() {
        let document = json!({ "id": 7, "input_descriptors": [] });
        let violations = schema().validate(&document);

        assert_eq!(violations.len(), 2);
        assert!(violations.iter().any(|v| v.instance_path == "/id"));
        assert!(violations
            .iter()
            .any(|v| v.instance_path == "/input_descriptors"));
    }

    #[test]
    fn invalid_schema() {
        assert!(DefinitionSchema::compile(&json!({ "type": 12 })).is_err());
    }
}
