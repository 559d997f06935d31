//! Canonical registration record.

use crate::status::{derive_status, ReviewStatus};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write as _};

/// Used when a configured date format cannot be rendered.
pub const FALLBACK_DATE_FORMAT: &str = "%Y-%m-%d";

/// Whether `format` is a strftime string chrono can render.
pub fn is_valid_date_format(format: &str) -> bool {
    StrftimeItems::new(format).all(|item| !matches!(item, Item::Error))
}

/// Kind of identity proof submitted for KYC.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProofType {
    /// Aadhaar card.
    Aadhaar,
    /// PAN card.
    Pan,
    /// Anything else the backend sends, kept verbatim.
    Other(String),
}

impl ProofType {
    /// Parse the backend's free-form proof type string.
    pub fn parse(value: &str) -> Self {
        let normalized: String = value
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "aadhaar" | "aadhar" | "aadhaarcard" | "aadharcard" => ProofType::Aadhaar,
            "pan" | "pancard" => ProofType::Pan,
            _ => ProofType::Other(value.trim().to_string()),
        }
    }

    /// Label used in the UI.
    pub fn label(&self) -> &str {
        match self {
            ProofType::Aadhaar => "Aadhaar Card",
            ProofType::Pan => "PAN Card",
            ProofType::Other(other) if other.is_empty() => "Other",
            ProofType::Other(other) => other,
        }
    }
}

impl fmt::Display for ProofType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// KYC block of a registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kyc {
    /// Proof type, if the applicant declared one.
    pub proof_type: Option<ProofType>,
    /// Opaque document URL; never fetched or validated.
    pub document_url: Option<String>,
    /// Backend verification flag.
    pub verified: bool,
}

/// Read-only projection of a mentor registration.
///
/// Built only by [`crate::normalize`]. The review status is derived at
/// construction time and has no setter: a status change is observed by
/// fetching the record again.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Registration {
    /// Internal backend id, used for approve/reject calls.
    pub id: String,
    /// Human-facing registration id.
    pub registration_id: String,
    /// Applicant name.
    pub name: String,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Avatar URL, generated from the name when the backend has none.
    pub avatar_url: String,
    /// Qualifications in the order the applicant listed them.
    pub qualifications: Vec<String>,
    /// Years of experience.
    pub experience_years: Option<f32>,
    /// Areas of specialization.
    pub specializations: Vec<String>,
    /// Free-text bio.
    pub bio: Option<String>,
    /// Listed achievements.
    pub achievements: Vec<String>,
    /// Listed publications.
    pub publications: Vec<String>,
    /// Identity proof.
    pub kyc: Kyc,
    /// When the application was submitted (falls back to creation time).
    pub applied_at: Option<DateTime<Utc>>,
    /// Record creation time.
    pub created_at: Option<DateTime<Utc>>,
    /// Last backend update.
    pub updated_at: Option<DateTime<Utc>>,
    /// Raw backend status string kept for derivation.
    backend_status: Option<String>,
    status: ReviewStatus,
}

impl Registration {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn assemble(
        id: String,
        registration_id: String,
        name: String,
        email: Option<String>,
        phone: Option<String>,
        avatar_url: String,
        profile: Profile,
        kyc: Kyc,
        backend_status: Option<String>,
        timestamps: [Option<DateTime<Utc>>; 3],
    ) -> Self {
        let status = derive_status(kyc.verified, backend_status.as_deref());
        let [applied_at, created_at, updated_at] = timestamps;
        Self {
            id,
            registration_id,
            name,
            email,
            phone,
            avatar_url,
            qualifications: profile.qualifications,
            experience_years: profile.experience_years,
            specializations: profile.specializations,
            bio: profile.bio,
            achievements: profile.achievements,
            publications: profile.publications,
            kyc,
            applied_at,
            created_at,
            updated_at,
            backend_status,
            status,
        }
    }

    /// Derived review status.
    pub fn status(&self) -> ReviewStatus {
        self.status
    }

    /// Raw backend status string.
    pub fn backend_status(&self) -> Option<&str> {
        self.backend_status.as_deref()
    }

    /// Whether approve/reject controls should be shown.
    pub fn is_actionable(&self) -> bool {
        self.status.is_actionable()
    }

    /// True when `key` is either the internal id or the registration id.
    pub fn matches_id(&self, key: &str) -> bool {
        let key = key.trim();
        !key.is_empty() && (self.id == key || self.registration_id == key)
    }

    /// Format a timestamp for display, `"—"` when absent.
    ///
    /// A format chrono cannot render falls back to [`FALLBACK_DATE_FORMAT`].
    pub fn display_date(value: Option<&DateTime<Utc>>, format: &str) -> String {
        let Some(dt) = value else {
            return "—".to_string();
        };
        let mut rendered = String::new();
        if write!(rendered, "{}", dt.format(format)).is_err() {
            rendered.clear();
            let _ = write!(rendered, "{}", dt.format(FALLBACK_DATE_FORMAT));
        }
        rendered
    }

    /// Experience rendered as "N years".
    pub fn experience_label(&self) -> String {
        match self.experience_years {
            Some(years) if years.fract() == 0.0 && years as u32 == 1 => "1 year".to_string(),
            Some(years) if years.fract() == 0.0 => format!("{} years", years as u32),
            Some(years) => format!("{:.1} years", years),
            None => "Not specified".to_string(),
        }
    }
}

/// Professional section, grouped to keep [`Registration::assemble`] readable.
#[derive(Debug, Clone, Default)]
pub(crate) struct Profile {
    pub qualifications: Vec<String>,
    pub experience_years: Option<f32>,
    pub specializations: Vec<String>,
    pub bio: Option<String>,
    pub achievements: Vec<String>,
    pub publications: Vec<String>,
}
