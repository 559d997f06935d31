//! Backend payload shapes.
//!
//! The backend is loosely typed: ids may be strings or numbers, list fields
//! may arrive as arrays or comma-separated strings, and several fields have
//! historical aliases. Everything here is deliberately lenient; the strict
//! canonical form is produced by [`crate::normalize`].

use crate::error::{ModelError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// A registration record exactly as the list endpoint returns it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRegistration {
    /// Internal backend id.
    #[serde(default, alias = "_id", deserialize_with = "lenient::opt_string")]
    pub id: Option<String>,

    /// Human-facing registration id.
    #[serde(
        default,
        alias = "registrationID",
        alias = "regId",
        deserialize_with = "lenient::opt_string"
    )]
    pub registration_id: Option<String>,

    #[serde(default, alias = "fullName", deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub email: Option<String>,

    #[serde(
        default,
        alias = "phoneNumber",
        alias = "mobile",
        deserialize_with = "lenient::opt_string"
    )]
    pub phone: Option<String>,

    #[serde(
        default,
        alias = "profileImage",
        alias = "profilePicture",
        alias = "avatarUrl",
        deserialize_with = "lenient::opt_string"
    )]
    pub avatar: Option<String>,

    #[serde(default, alias = "qualification", deserialize_with = "lenient::string_list")]
    pub qualifications: Vec<String>,

    /// Years of experience; numbers and numeric strings are accepted.
    #[serde(
        default,
        alias = "yearsOfExperience",
        alias = "experienceYears",
        deserialize_with = "lenient::opt_number"
    )]
    pub experience: Option<f32>,

    #[serde(
        default,
        alias = "specialization",
        alias = "expertise",
        deserialize_with = "lenient::string_list"
    )]
    pub specializations: Vec<String>,

    #[serde(default, alias = "about", deserialize_with = "lenient::opt_string")]
    pub bio: Option<String>,

    #[serde(default, deserialize_with = "lenient::string_list")]
    pub achievements: Vec<String>,

    #[serde(default, deserialize_with = "lenient::string_list")]
    pub publications: Vec<String>,

    #[serde(
        default,
        alias = "proofType",
        alias = "idProofType",
        deserialize_with = "lenient::opt_string"
    )]
    pub kyc_proof_type: Option<String>,

    #[serde(
        default,
        alias = "proofDocument",
        alias = "kycDocumentUrl",
        alias = "idProof",
        deserialize_with = "lenient::opt_string"
    )]
    pub kyc_document: Option<String>,

    #[serde(default, alias = "verified", deserialize_with = "lenient::bool")]
    pub is_verified: bool,

    /// Raw backend status string, only `"rejected"` is meaningful.
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub status: Option<String>,

    #[serde(default, alias = "submittedAt", deserialize_with = "lenient::opt_string")]
    pub applied_at: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub created_at: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub updated_at: Option<String>,
}

/// Decoder for the list endpoint body.
///
/// Accepts a bare array or an object wrapping the array under `data`,
/// `registrations` or `mentors`. Records that fail to decode are skipped
/// with a warning instead of failing the whole list.
pub struct RegistrationList;

impl RegistrationList {
    /// Decode a list body from raw bytes.
    pub fn from_slice(body: &[u8]) -> Result<Vec<RawRegistration>> {
        let value: Value =
            serde_json::from_slice(body).map_err(|e| ModelError::Malformed(e.to_string()))?;
        Self::from_value(value)
    }

    /// Decode a list body from an already parsed JSON value.
    pub fn from_value(value: Value) -> Result<Vec<RawRegistration>> {
        let items = match value {
            Value::Array(items) => items,
            Value::Object(mut map) => {
                let wrapped = ["data", "registrations", "mentors"]
                    .iter()
                    .find_map(|key| match map.remove(*key) {
                        Some(Value::Array(items)) => Some(items),
                        _ => None,
                    });
                wrapped.ok_or_else(|| {
                    ModelError::Malformed("expected an array of registrations".to_string())
                })?
            }
            other => {
                return Err(ModelError::Malformed(format!(
                    "expected an array of registrations, got {}",
                    type_name(&other)
                )));
            }
        };

        let mut records = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            match serde_json::from_value::<RawRegistration>(merge_aliases(item)) {
                Ok(record) => records.push(record),
                Err(e) => warn!(index, error = %e, "Skipping undecodable registration record"),
            }
        }
        Ok(records)
    }
}

/// Field spellings seen in the wild, canonical key first, then fallbacks in
/// priority order. `_id` outranks the `id` virtual.
const FIELD_SPELLINGS: &[(&str, &[&str])] = &[
    ("id", &["_id", "id"]),
    ("registrationId", &["registrationId", "registrationID", "regId"]),
    ("name", &["name", "fullName"]),
    ("phone", &["phone", "phoneNumber", "mobile"]),
    ("avatar", &["avatar", "profileImage", "profilePicture", "avatarUrl"]),
    ("qualifications", &["qualifications", "qualification"]),
    ("experience", &["experience", "yearsOfExperience", "experienceYears"]),
    ("specializations", &["specializations", "specialization", "expertise"]),
    ("bio", &["bio", "about"]),
    ("kycProofType", &["kycProofType", "proofType", "idProofType"]),
    ("kycDocument", &["kycDocument", "proofDocument", "kycDocumentUrl", "idProof"]),
    ("isVerified", &["isVerified", "verified"]),
    ("appliedAt", &["appliedAt", "submittedAt"]),
];

/// Collapse every spelling of a field onto its canonical key.
///
/// A record may carry several spellings at once (e.g. `_id` and `id`);
/// decoding that through serde aliases is a duplicate-field error. The
/// first spelling holding a usable value wins and the rest are removed.
fn merge_aliases(item: Value) -> Value {
    let Value::Object(mut map) = item else {
        return item;
    };
    for (canonical, spellings) in FIELD_SPELLINGS {
        let mut chosen = None;
        for spelling in spellings.iter() {
            if let Some(value) = map.remove(*spelling) {
                if chosen.is_none() && is_usable(&value) {
                    chosen = Some(value);
                }
            }
        }
        if let Some(value) = chosen {
            map.insert((*canonical).to_string(), value);
        }
    }
    Value::Object(map)
}

fn is_usable(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<Value>::deserialize(deserializer)?.and_then(scalar_to_string))
    }

    pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let list = match Option::<Value>::deserialize(deserializer)? {
            Some(Value::Array(items)) => items.into_iter().filter_map(scalar_to_string).collect(),
            Some(Value::String(joined)) => joined
                .split([',', '\n'])
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        };
        Ok(list)
    }

    pub fn opt_number<'de, D>(deserializer: D) -> Result<Option<f32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let number = match Option::<Value>::deserialize(deserializer)? {
            Some(Value::Number(n)) => n.as_f64().map(|v| v as f32),
            // "5", "5.5", "5 years"
            Some(Value::String(s)) => s
                .split_whitespace()
                .next()
                .and_then(|token| token.trim_end_matches('+').parse::<f32>().ok()),
            _ => None,
        };
        Ok(number.filter(|v| v.is_finite() && *v >= 0.0))
    }

    pub fn bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        let flag = match Option::<Value>::deserialize(deserializer)? {
            Some(Value::Bool(b)) => b,
            Some(Value::Number(n)) => n.as_i64() == Some(1),
            Some(Value::String(s)) => {
                matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "yes" | "1")
            }
            _ => false,
        };
        Ok(flag)
    }

    fn scalar_to_string(value: Value) -> Option<String> {
        match value {
            Value::String(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}
