//! Derived review status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Backend status string that marks an explicit rejection.
pub const REJECTED_MARKER: &str = "rejected";

/// Three-state review status shown in the UI.
///
/// Never stored on its own: it is computed from the backend's verification
/// flag and status string each time a registration is (re-)fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    /// Awaiting a decision.
    Pending,
    /// Verified by an admin.
    Approved,
    /// Explicitly rejected by an admin.
    Rejected,
}

impl ReviewStatus {
    /// All statuses in display order.
    pub const ALL: [ReviewStatus; 3] = [
        ReviewStatus::Pending,
        ReviewStatus::Approved,
        ReviewStatus::Rejected,
    ];

    /// Lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "pending",
            ReviewStatus::Approved => "approved",
            ReviewStatus::Rejected => "rejected",
        }
    }

    /// Capitalized badge label.
    pub fn label(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "Pending",
            ReviewStatus::Approved => "Approved",
            ReviewStatus::Rejected => "Rejected",
        }
    }

    /// Only pending registrations expose approve/reject controls.
    pub fn is_actionable(&self) -> bool {
        matches!(self, ReviewStatus::Pending)
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for ReviewStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(ReviewStatus::Pending),
            "approved" => Ok(ReviewStatus::Approved),
            "rejected" => Ok(ReviewStatus::Rejected),
            other => Err(format!("unknown review status '{}'", other)),
        }
    }
}

/// Map raw backend fields to the derived status.
///
/// `verified` always wins; otherwise only the exact `"rejected"` marker
/// yields [`ReviewStatus::Rejected`]. Every other value, including a
/// missing or unknown status, is pending.
pub fn derive_status(is_verified: bool, status: Option<&str>) -> ReviewStatus {
    if is_verified {
        ReviewStatus::Approved
    } else if status == Some(REJECTED_MARKER) {
        ReviewStatus::Rejected
    } else {
        ReviewStatus::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(true, None, ReviewStatus::Approved)]
    #[case(true, Some("rejected"), ReviewStatus::Approved)]
    #[case(true, Some("pending"), ReviewStatus::Approved)]
    #[case(false, Some("rejected"), ReviewStatus::Rejected)]
    #[case(false, None, ReviewStatus::Pending)]
    #[case(false, Some("pending"), ReviewStatus::Pending)]
    #[case(false, Some("approved"), ReviewStatus::Pending)]
    #[case(false, Some(""), ReviewStatus::Pending)]
    #[case(false, Some("REJECTED"), ReviewStatus::Pending)]
    #[case(false, Some("on-hold"), ReviewStatus::Pending)]
    fn test_derive_status(
        #[case] verified: bool,
        #[case] status: Option<&str>,
        #[case] expected: ReviewStatus,
    ) {
        assert_eq!(derive_status(verified, status), expected);
    }

    #[test]
    fn test_derive_status_is_idempotent() {
        for verified in [true, false] {
            for status in [None, Some("rejected"), Some("x")] {
                let first = derive_status(verified, status);
                let second = derive_status(verified, status);
                assert_eq!(first, second);
                assert!(ReviewStatus::ALL.contains(&first));
            }
        }
    }

    #[test]
    fn test_only_pending_is_actionable() {
        assert!(ReviewStatus::Pending.is_actionable());
        assert!(!ReviewStatus::Approved.is_actionable());
        assert!(!ReviewStatus::Rejected.is_actionable());
    }

    #[test]
    fn test_parse_status() {
        assert_eq!("Pending".parse::<ReviewStatus>(), Ok(ReviewStatus::Pending));
        assert_eq!(" approved ".parse::<ReviewStatus>(), Ok(ReviewStatus::Approved));
        assert!("archived".parse::<ReviewStatus>().is_err());
    }
}
