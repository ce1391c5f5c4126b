use core::fmt;
use std::{collections::BTreeMap, str::FromStr};

use serde::{Deserialize, Serialize};

const FORMAT_MSO_MDOC: &str = "mso_mdoc";
const FORMAT_JWT: &str = "jwt";
const FORMAT_JWT_VC: &str = "jwt_vc";
const FORMAT_JWT_VP: &str = "jwt_vp";
const FORMAT_LDP: &str = "ldp";
const FORMAT_LDP_VC: &str = "ldp_vc";
const FORMAT_LDP_VP: &str = "ldp_vp";
const FORMAT_SD_JWT_VC: &str = "vc+sd-jwt";
const FORMAT_SD_JWT_VC_ZKP: &str = "vc+sd-jwt+zkp";

/// A Json object of claim formats, keyed by claim format identifier.
///
/// Keys are kept as raw strings so that a definition naming a format this
/// library does not know about still decodes. Use [ClaimFormat::from_identifier]
/// to recognise a key.
pub type ClaimFormatMap = BTreeMap<String, ClaimFormatPayload>;

/// The claim format designation used by a Presentation Definition and its
/// Input Descriptors to express the envelope a credential or presentation
/// must be submitted in.
///
/// The set of formats is closed: every value has exactly one wire identifier,
/// see [ClaimFormat::identifier]. Identifiers outside the registry are not an
/// error, [ClaimFormat::from_identifier] returns `None` for them.
///
/// Registry of claim format type: https://identity.foundation/claim-format-registry/#registry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClaimFormat {
    /// The format is defined by ISO/IEC 18013-5:2021 [ISO.18013-5](https://identity.foundation/claim-format-registry/#term:iso.18013-5)
    /// which defines a mobile driving license (mDL) Credential in the mobile document (mdoc) format.
    MsoMdoc,
    /// JSON Web Token based formats. Expression of supported algorithms MUST be
    /// conveyed using an `alg` property.
    Jwt(JwtType),
    /// Linked-Data Proof based formats. Expression of supported algorithms MUST be
    /// conveyed using a `proof_type` property.
    Ldp(LdpType),
    /// Selective Disclosure JWT based formats.
    SdJwt(SdJwtType),
}

/// JWT claim formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JwtType {
    /// A JSON Web Token as defined by [RFC7519](https://identity.foundation/claim-format-registry/#ref:RFC7519).
    Jwt,
    /// A W3C Verifiable Credential secured as a JWT.
    JwtVc,
    /// A W3C Verifiable Presentation secured as a JWT.
    JwtVp,
}

/// Linked-Data Proof claim formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LdpType {
    /// A Linked-Data Proof submitted as an object.
    Ldp,
    /// A W3C Verifiable Credential signed with a Linked-Data Proof.
    LdpVc,
    /// A W3C Verifiable Presentation signed with a Linked-Data Proof.
    LdpVp,
}

/// SD-JWT claim formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SdJwtType {
    /// An SD-JWT Verifiable Credential.
    Vc,
    /// An SD-JWT Verifiable Credential with zero-knowledge proof support.
    VcZkp,
}

impl ClaimFormat {
    /// Every claim format in the registry.
    pub const ALL: [ClaimFormat; 9] = [
        ClaimFormat::MsoMdoc,
        ClaimFormat::Jwt(JwtType::Jwt),
        ClaimFormat::Jwt(JwtType::JwtVc),
        ClaimFormat::Jwt(JwtType::JwtVp),
        ClaimFormat::Ldp(LdpType::Ldp),
        ClaimFormat::Ldp(LdpType::LdpVc),
        ClaimFormat::Ldp(LdpType::LdpVp),
        ClaimFormat::SdJwt(SdJwtType::Vc),
        ClaimFormat::SdJwt(SdJwtType::VcZkp),
    ];

    /// Returns the canonical wire identifier of the claim format.
    ///
    /// e.g., mso_mdoc, jwt_vc, ldp_vp, vc+sd-jwt
    pub fn identifier(&self) -> &'static str {
        match self {
            Self::MsoMdoc => FORMAT_MSO_MDOC,
            Self::Jwt(JwtType::Jwt) => FORMAT_JWT,
            Self::Jwt(JwtType::JwtVc) => FORMAT_JWT_VC,
            Self::Jwt(JwtType::JwtVp) => FORMAT_JWT_VP,
            Self::Ldp(LdpType::Ldp) => FORMAT_LDP,
            Self::Ldp(LdpType::LdpVc) => FORMAT_LDP_VC,
            Self::Ldp(LdpType::LdpVp) => FORMAT_LDP_VP,
            Self::SdJwt(SdJwtType::Vc) => FORMAT_SD_JWT_VC,
            Self::SdJwt(SdJwtType::VcZkp) => FORMAT_SD_JWT_VC_ZKP,
        }
    }

    /// Look up a claim format by its wire identifier.
    ///
    /// The comparison is exact: no case folding and no trimming. Unknown
    /// identifiers yield `None`.
    pub fn from_identifier(identifier: &str) -> Option<Self> {
        match identifier {
            FORMAT_MSO_MDOC => Some(Self::MsoMdoc),
            FORMAT_JWT => Some(Self::Jwt(JwtType::Jwt)),
            FORMAT_JWT_VC => Some(Self::Jwt(JwtType::JwtVc)),
            FORMAT_JWT_VP => Some(Self::Jwt(JwtType::JwtVp)),
            FORMAT_LDP => Some(Self::Ldp(LdpType::Ldp)),
            FORMAT_LDP_VC => Some(Self::Ldp(LdpType::LdpVc)),
            FORMAT_LDP_VP => Some(Self::Ldp(LdpType::LdpVp)),
            FORMAT_SD_JWT_VC => Some(Self::SdJwt(SdJwtType::Vc)),
            FORMAT_SD_JWT_VC_ZKP => Some(Self::SdJwt(SdJwtType::VcZkp)),
            _ => None,
        }
    }
}

/// Returned by [ClaimFormat::from_str] for identifiers outside the registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown claim format: {0}")]
pub struct UnknownClaimFormat(pub String);

impl FromStr for ClaimFormat {
    type Err = UnknownClaimFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_identifier(s).ok_or_else(|| UnknownClaimFormat(s.to_owned()))
    }
}

impl From<ClaimFormat> for String {
    fn from(format: ClaimFormat) -> Self {
        format.identifier().to_owned()
    }
}

impl fmt::Display for ClaimFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.identifier().fmt(f)
    }
}

impl Serialize for ClaimFormat {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.identifier().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ClaimFormat {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let identifier = String::deserialize(deserializer)?;
        identifier.parse().map_err(serde::de::Error::custom)
    }
}

/// Claim format payload
///
/// The object MUST include a format-specific property (i.e., alg, proof_type) that expresses which
/// algorithms the Verifier supports for the format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ClaimFormatPayload {
    #[serde(rename = "alg")]
    Alg(Vec<String>),
    #[serde(rename = "proof_type")]
    ProofType(Vec<String>),
    #[serde(untagged)]
    Other(serde_json::Value),
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn identifiers_round_trip() {
        for format in ClaimFormat::ALL {
            assert_eq!(
                ClaimFormat::from_identifier(format.identifier()),
                Some(format)
            );
        }
    }

    #[test]
    fn identifiers_are_distinct() {
        let identifiers: std::collections::HashSet<_> =
            ClaimFormat::ALL.iter().map(ClaimFormat::identifier).collect();
        assert_eq!(identifiers.len(), ClaimFormat::ALL.len());
    }

    #[test]
    fn sd_jwt_identifiers() {
        assert_eq!(ClaimFormat::SdJwt(SdJwtType::Vc).identifier(), "vc+sd-jwt");
        assert_eq!(
            ClaimFormat::SdJwt(SdJwtType::VcZkp).identifier(),
            "vc+sd-jwt+zkp"
        );
    }

    #[test]
    fn unknown_identifier() {
        assert_eq!(ClaimFormat::from_identifier("unknown-xyz"), None);
        assert_eq!(ClaimFormat::from_identifier("JWT_VC"), None);
        assert_eq!(ClaimFormat::from_identifier(" jwt_vc"), None);
        assert_eq!(ClaimFormat::from_identifier(""), None);

        let err = "dc+sd-jwt".parse::<ClaimFormat>().unwrap_err();
        assert_eq!(err.to_string(), "unknown claim format: dc+sd-jwt");
    }

    #[test]
    fn serializes_as_identifier() {
        let value = serde_json::to_value(ClaimFormat::Ldp(LdpType::LdpVp)).unwrap();
        assert_eq!(value, json!("ldp_vp"));

        let format: ClaimFormat = serde_json::from_value(json!("mso_mdoc")).unwrap();
        assert_eq!(format, ClaimFormat::MsoMdoc);

        assert!(serde_json::from_value::<ClaimFormat>(json!("sd_jwt_vc")).is_err());
    }

    #[test]
    fn test_claim_format_map_deserialization() {
        let value = json!({
          "jwt_vc": {
            "alg": ["ES256", "EdDSA"]
          },
          "ldp_vp": {
            "proof_type": ["Ed25519Signature2018", "EcdsaSecp256k1Signature2019"]
          },
          "com.example.custom_vc": {
            "version": "1.0"
          }
        });

        let claim_format_map: ClaimFormatMap =
            serde_json::from_value(value).expect("Failed to parse claim format map");

        assert_eq!(
            claim_format_map.get("jwt_vc"),
            Some(&ClaimFormatPayload::Alg(vec![
                "ES256".to_string(),
                "EdDSA".to_string()
            ]))
        );
        assert!(matches!(
            claim_format_map.get("ldp_vp"),
            Some(ClaimFormatPayload::ProofType(_))
        ));
        assert!(matches!(
            claim_format_map.get("com.example.custom_vc"),
            Some(ClaimFormatPayload::Other(_))
        ));
    }
}
