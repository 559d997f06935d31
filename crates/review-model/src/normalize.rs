//! Payload normalization.
//!
//! Turns a [`RawRegistration`] into the canonical [`Registration`]. All
//! fallbacks (missing ids, missing name, generated avatar, applied-at
//! falling back to created-at) are decided here and nowhere else.

use crate::error::{ModelError, Result};
use crate::raw::RawRegistration;
use crate::registration::{Kyc, Profile, ProofType, Registration};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tracing::warn;

/// Default service used to render initials avatars.
pub const DEFAULT_AVATAR_BASE_URL: &str = "https://ui-avatars.com/api/";

/// Name shown when the backend sends none.
pub const UNNAMED_APPLICANT: &str = "Unnamed applicant";

/// Knobs for normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Base URL of the initials-avatar service.
    pub avatar_base_url: String,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            avatar_base_url: DEFAULT_AVATAR_BASE_URL.to_string(),
        }
    }
}

/// Normalize a single record.
///
/// Fails only when the record has no usable id; every other gap is filled
/// with a documented fallback.
pub fn normalize(raw: RawRegistration, options: &NormalizeOptions) -> Result<Registration> {
    let (id, registration_id) = match (raw.id, raw.registration_id) {
        (Some(id), Some(reg)) => (id, reg),
        (Some(id), None) => (id.clone(), id),
        (None, Some(reg)) => (reg.clone(), reg),
        (None, None) => return Err(ModelError::MissingId),
    };

    let name = raw.name.unwrap_or_else(|| UNNAMED_APPLICANT.to_string());
    let avatar_url = raw
        .avatar
        .unwrap_or_else(|| avatar_for(&name, &options.avatar_base_url));

    let created_at = parse_timestamp(raw.created_at.as_deref(), &id, "createdAt");
    let applied_at = parse_timestamp(raw.applied_at.as_deref(), &id, "appliedAt").or(created_at);
    let updated_at = parse_timestamp(raw.updated_at.as_deref(), &id, "updatedAt");

    let kyc = Kyc {
        proof_type: raw.kyc_proof_type.as_deref().map(ProofType::parse),
        document_url: raw.kyc_document,
        verified: raw.is_verified,
    };

    let profile = Profile {
        qualifications: raw.qualifications,
        experience_years: raw.experience,
        specializations: raw.specializations,
        bio: raw.bio,
        achievements: raw.achievements,
        publications: raw.publications,
    };

    Ok(Registration::assemble(
        id,
        registration_id,
        name,
        raw.email,
        raw.phone,
        avatar_url,
        profile,
        kyc,
        raw.status,
        [applied_at, created_at, updated_at],
    ))
}

/// Normalize a whole list, dropping records without an id.
pub fn normalize_all(
    records: impl IntoIterator<Item = RawRegistration>,
    options: &NormalizeOptions,
) -> Vec<Registration> {
    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, raw)| match normalize(raw, options) {
            Ok(registration) => Some(registration),
            Err(e) => {
                warn!(index, error = %e, "Dropping registration record");
                None
            }
        })
        .collect()
}

/// Initials avatar URL for a name.
pub fn avatar_for(name: &str, base_url: &str) -> String {
    format!(
        "{}?name={}&background=random",
        base_url,
        urlencoding::encode(name.trim())
    )
}

/// Parse the timestamp formats the backend is known to emit.
fn parse_timestamp(value: Option<&str>, id: &str, field: &str) -> Option<DateTime<Utc>> {
    let value = value?;
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    if let Some(midnight) = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Some(midnight.and_utc());
    }
    // epoch milliseconds
    if let Some(dt) = value
        .parse::<i64>()
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
    {
        return Some(dt);
    }
    warn!(registration_id = %id, field, value, "Unparseable timestamp");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::ReviewStatus;
    use chrono::{Datelike, Timelike};
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawRegistration {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_full_record() {
        let registration = normalize(
            raw(json!({
                "_id": "65f1c0",
                "registrationId": "MR-2024-001",
                "name": "Asha Rao",
                "email": "asha@example.com",
                "qualifications": ["PhD", "M.Tech"],
                "experience": 12,
                "kycProofType": "aadhaar",
                "kycDocument": "https://cdn.example.com/a.pdf",
                "isVerified": false,
                "status": "rejected",
                "appliedAt": "2024-03-05T10:30:00Z",
                "createdAt": "2024-03-04T08:00:00Z"
            })),
            &NormalizeOptions::default(),
        )
        .unwrap();

        assert_eq!(registration.id, "65f1c0");
        assert_eq!(registration.registration_id, "MR-2024-001");
        assert_eq!(registration.qualifications, vec!["PhD", "M.Tech"]);
        assert_eq!(registration.kyc.proof_type, Some(ProofType::Aadhaar));
        assert_eq!(registration.status(), ReviewStatus::Rejected);
        assert_eq!(registration.backend_status(), Some("rejected"));
        let applied = registration.applied_at.unwrap();
        assert_eq!((applied.day(), applied.hour()), (5, 10));
        assert_eq!(registration.experience_label(), "12 years");
    }

    #[test]
    fn test_id_fallbacks() {
        let only_internal = normalize(raw(json!({ "id": "X" })), &NormalizeOptions::default());
        assert_eq!(only_internal.unwrap().registration_id, "X");

        let only_public =
            normalize(raw(json!({ "registrationId": "MR-9" })), &NormalizeOptions::default());
        assert_eq!(only_public.unwrap().id, "MR-9");

        let none = normalize(raw(json!({ "name": "Ghost" })), &NormalizeOptions::default());
        assert_eq!(none, Err(ModelError::MissingId));
    }

    #[test]
    fn test_avatar_and_name_fallback() {
        let registration =
            normalize(raw(json!({ "id": "R1" })), &NormalizeOptions::default()).unwrap();
        assert_eq!(registration.name, UNNAMED_APPLICANT);
        assert!(registration.avatar_url.starts_with(DEFAULT_AVATAR_BASE_URL));
        assert!(registration.avatar_url.contains("name=Unnamed%20applicant"));

        let with_avatar = normalize(
            raw(json!({ "id": "R2", "avatar": "https://img.example.com/r2.png" })),
            &NormalizeOptions::default(),
        )
        .unwrap();
        assert_eq!(with_avatar.avatar_url, "https://img.example.com/r2.png");
    }

    #[test]
    fn test_avatar_encoding() {
        assert_eq!(
            avatar_for("Zoë O'Neil", "https://a.test/"),
            "https://a.test/?name=Zo%C3%AB%20O%27Neil&background=random"
        );
    }

    #[test]
    fn test_applied_at_falls_back_to_created_at() {
        let registration = normalize(
            raw(json!({ "id": "R1", "createdAt": "2024-01-02" })),
            &NormalizeOptions::default(),
        )
        .unwrap();
        assert_eq!(registration.applied_at, registration.created_at);
        assert!(registration.applied_at.is_some());
    }

    #[test]
    fn test_timestamp_formats() {
        assert!(parse_timestamp(Some("2024-01-02T03:04:05.123+05:30"), "r", "f").is_some());
        assert!(parse_timestamp(Some("2024-01-02 03:04:05"), "r", "f").is_some());
        assert!(parse_timestamp(Some("1704164645000"), "r", "f").is_some());
        assert!(parse_timestamp(Some("last tuesday"), "r", "f").is_none());
        assert!(parse_timestamp(None, "r", "f").is_none());
    }

    #[test]
    fn test_normalize_all_drops_idless_records() {
        let records = vec![
            raw(json!({ "id": "A" })),
            raw(json!({ "name": "no id" })),
            raw(json!({ "id": "B", "isVerified": true })),
        ];
        let registrations = normalize_all(records, &NormalizeOptions::default());
        assert_eq!(registrations.len(), 2);
        assert_eq!(registrations[1].status(), ReviewStatus::Approved);
    }
}
