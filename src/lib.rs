//! # mentor-review
//!
//! Review client for mentor registrations: the list/detail/approve/reject
//! slice of the platform's admin front-end, backed by an external API.
//!
//! ## Overview
//!
//! The crate can be used in two ways:
//!
//! 1. **As a CLI** - Run the `mentor-review` binary
//! 2. **As a library** - Drive the headless views from your own front-end
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,ignore
//! use mentor_review::{HttpRegistrationBackend, RegistrationListView, ReviewConfig, ReviewCoordinator};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ReviewConfig::load_or_default("mentor-review.toml")?;
//!     let backend = Arc::new(HttpRegistrationBackend::from_config(&config.backend)?);
//!     let coordinator = ReviewCoordinator::new(backend);
//!
//!     let list = RegistrationListView::new(coordinator, &config.display);
//!     list.load().await;
//!     for row in list.rows() {
//!         println!("{} {}", row.name, row.status);
//!     }
//!
//!     list.approve("65f1c0ab").await;
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`api`] - Backend contract and its `reqwest` implementation
//! - [`review`] - Review Action Coordinator (approve/reject, in-flight set)
//! - [`views`] - Headless list and detail view models
//! - [`cli`] - Command-line interface
//! - [`types`] - Wire types and the crate error
//! - [`utils`] - Configuration and logging
//!
//! The data model, normalization and status derivation live in the
//! runtime-agnostic `mentor-review-model` crate, re-exported as [`model`].

/// Backend API access.
pub mod api;
/// Command-line interface.
pub mod cli;
/// Review actions.
pub mod review;
/// Wire types and errors.
pub mod types;
/// Configuration and logging.
pub mod utils;
/// Headless view models.
pub mod views;

pub use mentor_review_model as model;

pub use api::{HttpRegistrationBackend, RegistrationBackend};
pub use review::ReviewCoordinator;
pub use types::{ActionAck, AppError, Result};
pub use utils::toml_config::{BackendConfig, DisplayConfig, ReviewConfig};
pub use views::{
    ActionOutcome, DetailState, ListState, RegistrationDetailView, RegistrationListView,
    StatusUpdate,
};
