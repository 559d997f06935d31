//! # mentor-review-model
//!
//! Runtime-agnostic building blocks of the mentor registration review
//! workflow. Both the native review client and the browser front-end
//! depend on this crate, so nothing in here performs I/O or needs an
//! async runtime.
//!
//! ## What lives here
//!
//! - **Registration model**: the canonical, read-only projection of a
//!   backend registration record ([`Registration`]).
//! - **Normalization**: the single place where the loosely shaped backend
//!   payload ([`RawRegistration`]) becomes a [`Registration`].
//! - **Status derivation**: the pure `(verified, status) -> ReviewStatus`
//!   mapping ([`derive_status`]).
//! - **Filtering**: status tabs, search and pagination over the fetched
//!   collection ([`RegistrationQuery`]).
//! - **Review bookkeeping**: rejection-reason validation
//!   ([`RejectionReason`]) and the per-registration in-flight set
//!   ([`InFlightSet`]).
//!
//! ## Quick Start
//!
//! ```rust
//! use mentor_review_model::{normalize, NormalizeOptions, RawRegistration, ReviewStatus};
//!
//! let raw: RawRegistration = serde_json::from_str(
//!     r#"{ "_id": "R1", "name": "Asha Rao", "isVerified": false }"#,
//! ).unwrap();
//! let registration = normalize(raw, &NormalizeOptions::default()).unwrap();
//!
//! assert_eq!(registration.status(), ReviewStatus::Pending);
//! assert!(registration.is_actionable());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod filter;
pub mod inflight;
pub mod normalize;
pub mod raw;
pub mod registration;
pub mod review;
pub mod status;

// Re-exports for convenience
pub use error::{ModelError, Result, ValidationError};
pub use filter::{Page, RegistrationQuery, StatusCounts, StatusFilter};
pub use inflight::{InFlightGuard, InFlightSet};
pub use normalize::{normalize, normalize_all, NormalizeOptions};
pub use raw::{RawRegistration, RegistrationList};
pub use registration::{is_valid_date_format, Kyc, ProofType, Registration};
pub use review::{RejectionReason, ReviewAction};
pub use status::{derive_status, ReviewStatus};
