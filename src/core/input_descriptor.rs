use std::collections::HashSet;

use super::credential_format::*;
use crate::utils::{to_human_readable_string, NonEmptyVec};

use serde::{Deserialize, Serialize};

/// Identifier of a group of Input Descriptors, referenced by submission requirements.
pub type GroupId = String;

/// A JSONPath expression locating a claim within a credential.
pub type JsonPath = String;

/// Whether the Holder should answer a field with the boolean result of its filter
/// instead of the value itself.
///
/// See: [https://identity.foundation/presentation-exchange/#predicate-feature](https://identity.foundation/presentation-exchange/#predicate-feature)
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Predicate {
    Required,
    Preferred,
}

/// One credential requested by a [PresentationDefinition](crate::core::presentation_definition::PresentationDefinition).
///
/// See: [https://identity.foundation/presentation-exchange/spec/v2.0.0/#input-descriptor-object](https://identity.foundation/presentation-exchange/spec/v2.0.0/#input-descriptor-object)
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InputDescriptor {
    id: String,
    #[serde(default)]
    constraints: Constraints,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    purpose: Option<String>,
    #[serde(default, skip_serializing_if = "ClaimFormatMap::is_empty")]
    format: ClaimFormatMap,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    group: Vec<GroupId>,
}

impl InputDescriptor {
    pub fn new(id: String, constraints: Constraints) -> Self {
        Self {
            id,
            constraints,
            ..Default::default()
        }
    }

    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    pub fn name(&self) -> Option<&String> {
        self.name.as_ref()
    }

    pub fn purpose(&self) -> Option<&String> {
        self.purpose.as_ref()
    }

    /// The raw `format` object, unknown designations included.
    pub fn format(&self) -> &ClaimFormatMap {
        &self.format
    }

    /// Return the claim formats of the input descriptor known to the registry.
    pub fn claim_formats(&self) -> HashSet<ClaimFormat> {
        self.format
            .keys()
            .filter_map(|identifier| ClaimFormat::from_identifier(identifier))
            .collect()
    }

    pub fn groups(&self) -> &Vec<GroupId> {
        self.group.as_ref()
    }
}

/// Constraints a submitted credential must satisfy. An empty object is allowed.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Constraints {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    fields: Vec<ConstraintsField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit_disclosure: Option<ConstraintsLimitDisclosure>,
}

impl Constraints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_constraint(mut self, field: ConstraintsField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn fields(&self) -> &Vec<ConstraintsField> {
        self.fields.as_ref()
    }

    pub fn limit_disclosure(&self) -> Option<&ConstraintsLimitDisclosure> {
        self.limit_disclosure.as_ref()
    }

    /// Returns true if any field must be satisfied.
    pub fn is_required(&self) -> bool {
        self.fields.iter().any(|field| field.is_required())
    }
}

/// A single claim constraint: where to find the claim, and optionally a JSON Schema
/// `filter` its value must match.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConstraintsField {
    path: NonEmptyVec<JsonPath>,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    purpose: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    predicate: Option<Predicate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    optional: Option<bool>,
    #[serde(default)]
    intent_to_retain: bool,
}

impl ConstraintsField {
    pub fn new(path: JsonPath) -> ConstraintsField {
        ConstraintsField {
            path: NonEmptyVec::new(path),
            id: None,
            purpose: None,
            name: None,
            predicate: None,
            filter: None,
            optional: None,
            intent_to_retain: false,
        }
    }

    /// Add an alternative path to the field.
    pub fn add_path(mut self, path: JsonPath) -> Self {
        self.path.push(path);
        self
    }

    pub fn path(&self) -> &NonEmptyVec<JsonPath> {
        &self.path
    }

    pub fn id(&self) -> Option<&String> {
        self.id.as_ref()
    }

    pub fn purpose(&self) -> Option<&String> {
        self.purpose.as_ref()
    }

    pub fn name(&self) -> Option<&String> {
        self.name.as_ref()
    }

    pub fn predicate(&self) -> Option<&Predicate> {
        self.predicate.as_ref()
    }

    pub fn filter(&self) -> Option<&serde_json::Value> {
        self.filter.as_ref()
    }

    pub fn is_optional(&self) -> bool {
        self.optional.unwrap_or(false)
    }

    pub fn is_required(&self) -> bool {
        !self.is_optional()
    }

    pub fn intent_to_retain(&self) -> bool {
        self.intent_to_retain
    }

    /// Return the last segment of each path, e.g. `dateOfBirth` for
    /// `$.credentialSubject.dateOfBirth`.
    pub fn requested_fields(&self) -> Vec<String> {
        self.path()
            .iter()
            // The last segment is assumed to name the claim.
            .filter_map(|path| path.split(&['-', '.', ':', '@'][..]).last())
            .map(ToOwned::to_owned)
            .collect()
    }

    /// [requested_fields](Self::requested_fields) as display strings, e.g. `Date Of Birth`.
    pub fn requested_fields_human_readable(&self) -> Vec<String> {
        self.requested_fields()
            .into_iter()
            .map(to_human_readable_string)
            .collect()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConstraintsLimitDisclosure {
    Required,
    Preferred,
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn decode_mdl_descriptor() {
        let descriptor: InputDescriptor = serde_json::from_value(json!({
            "id": "org.iso.18013.5.1.mDL",
            "name": "Mobile driving licence",
            "format": {
                "mso_mdoc": { "alg": ["ES256"] },
                "dc+sd-jwt": { "sd-jwt_alg_values": ["ES256"] }
            },
            "constraints": {
                "limit_disclosure": "required",
                "fields": [
                    {
                        "path": ["$['org.iso.18013.5.1']['family_name']"],
                        "intent_to_retain": false
                    },
                    {
                        "id": "portrait",
                        "path": ["$['org.iso.18013.5.1']['portrait']"],
                        "intent_to_retain": true,
                        "optional": true
                    },
                    {
                        "path": ["$['org.iso.18013.5.1']['age_over_18']"],
                        "filter": { "type": "boolean" },
                        "predicate": "required"
                    }
                ]
            }
        }))
        .unwrap();

        assert_eq!(descriptor.id(), "org.iso.18013.5.1.mDL");
        assert_eq!(
            descriptor.name().map(String::as_str),
            Some("Mobile driving licence")
        );
        assert_eq!(
            descriptor.claim_formats(),
            HashSet::from([ClaimFormat::MsoMdoc])
        );
        assert_eq!(descriptor.format().len(), 2);

        let constraints = descriptor.constraints();
        assert_eq!(
            constraints.limit_disclosure(),
            Some(&ConstraintsLimitDisclosure::Required)
        );
        assert!(constraints.is_required());

        let portrait = &constraints.fields()[1];
        assert_eq!(portrait.id().map(String::as_str), Some("portrait"));
        assert!(portrait.is_optional());
        assert!(portrait.intent_to_retain());

        let age = &constraints.fields()[2];
        assert_eq!(age.predicate(), Some(&Predicate::Required));
        assert_eq!(age.filter(), Some(&json!({ "type": "boolean" })));
    }

    #[test]
    fn empty_constraints() {
        let descriptor: InputDescriptor =
            serde_json::from_value(json!({ "id": "any", "constraints": {} })).unwrap();

        assert!(descriptor.constraints().fields().is_empty());
        assert!(!descriptor.constraints().is_required());
        assert_eq!(
            serde_json::to_value(&descriptor).unwrap(),
            json!({ "id": "any", "constraints": {} })
        );
    }

    #[test]
    fn requested_fields() {
        let field = ConstraintsField::new("$.credentialSubject.familyName".into())
            .add_path("$.vc.credentialSubject.family_name".into());

        assert_eq!(field.requested_fields(), vec!["familyName", "family_name"]);
        assert_eq!(
            field.requested_fields_human_readable(),
            vec!["Family Name", "Family Name"]
        );
    }

    #[test]
    fn empty_path_rejected() {
        let result = serde_json::from_value::<ConstraintsField>(json!({ "path": [] }));
        assert!(result.is_err());
    }
}
