use super::credential_format::*;
use super::input_descriptor::*;
use crate::utils::NonEmptyVec;

use anyhow::{Context, Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

/// What a Verifier asks the Holder to present: one or more [InputDescriptor]s, optionally
/// combined by [SubmissionRequirement]s and restricted to claim formats.
///
/// See: [https://identity.foundation/presentation-exchange/spec/v2.0.0/#presentation-definition](https://identity.foundation/presentation-exchange/spec/v2.0.0/#presentation-definition)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PresentationDefinition {
    id: String,
    input_descriptors: NonEmptyVec<InputDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    submission_requirements: Option<Vec<SubmissionRequirement>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    purpose: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<ClaimFormatMap>,
}

impl PresentationDefinition {
    /// A definition with a single input descriptor.
    pub fn new(id: String, input_descriptor: InputDescriptor) -> Self {
        Self {
            id,
            input_descriptors: NonEmptyVec::new(input_descriptor),
            submission_requirements: None,
            name: None,
            purpose: None,
            format: None,
        }
    }

    /// Decode a presentation definition from a JSON-encoded string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("failed to decode presentation definition")
    }

    /// Return the id of the presentation definition.
    pub fn id(&self) -> &String {
        &self.id
    }

    /// Return the input descriptors of the presentation definition.
    pub fn input_descriptors(&self) -> &[InputDescriptor] {
        &self.input_descriptors
    }

    /// Set the human-friendly name of the presentation definition.
    pub fn set_name(mut self, name: String) -> Self {
        self.name = Some(name);
        self
    }

    /// Return the name of the presentation definition.
    pub fn name(&self) -> Option<&String> {
        self.name.as_ref()
    }

    /// Return the purpose of the presentation definition.
    pub fn purpose(&self) -> Option<&String> {
        self.purpose.as_ref()
    }

    /// Add a claim format to the top-level `format` object, replacing any payload already
    /// registered for it.
    pub fn add_format(mut self, format: ClaimFormat, value: ClaimFormatPayload) -> Self {
        self.format
            .get_or_insert_with(ClaimFormatMap::new)
            .insert(format.identifier().to_owned(), value);
        self
    }

    /// Return the format of the presentation definition.
    pub fn format(&self) -> Option<&ClaimFormatMap> {
        self.format.as_ref()
    }

    /// Return the claim formats of the top-level `format` property that are
    /// known to the registry. Unknown identifiers are skipped.
    pub fn claim_formats(&self) -> Vec<ClaimFormat> {
        self.format
            .iter()
            .flat_map(|format| format.keys())
            .filter_map(|identifier| ClaimFormat::from_identifier(identifier))
            .collect()
    }

    /// Return the submission requirements of the presentation definition.
    pub fn submission_requirements(&self) -> Option<&Vec<SubmissionRequirement>> {
        self.submission_requirements.as_ref()
    }

    /// Return the human-readable string representation of the fields requested
    /// in the presentation definition's input descriptors.
    ///
    /// For example, the following paths would be coverted as follows:
    ///
    /// `$.credentialSubject.givenName` -> Given Name
    /// `$.credentialSubject.familyName` -> Family Name
    pub fn requested_fields(&self) -> Vec<String> {
        self.input_descriptors
            .iter()
            .flat_map(|input_descriptor| input_descriptor.constraints().fields())
            .flat_map(|field| field.requested_fields_human_readable())
            .collect()
    }
}

impl TryFrom<Json> for PresentationDefinition {
    type Error = Error;

    fn try_from(value: Json) -> Result<Self, Self::Error> {
        serde_json::from_value(value).context("failed to decode presentation definition")
    }
}

/// Submission Requirements specify combinations of inputs, grouped by
/// [InputDescriptor] `group`, a [Holder](https://identity.foundation/presentation-exchange/spec/v2.0.0/#term:holder) may submit.
///
/// See: [https://identity.foundation/presentation-exchange/spec/v2.0.0/#submission-requirements](https://identity.foundation/presentation-exchange/spec/v2.0.0/#submission-requirements)
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct SubmissionRequirement {
    pub rule: SubmissionRequirementRule,
    #[serde(flatten)]
    pub source: SubmissionRequirementSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<u64>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionRequirementRule {
    All,
    Pick,
}

/// The inputs a [SubmissionRequirement] applies to: either an input descriptor
/// group, or further nested requirements.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionRequirementSource {
    From(GroupId),
    FromNested(Vec<SubmissionRequirement>),
}
