//! Backend API access
//!
//! The review client talks to an external backend that owns registrations.
//! This module defines the contract the front-end expects from it and a
//! `reqwest` implementation of that contract.
//!
//! # Module Structure
//!
//! - [`api::client`](crate::api::client) - The [`RegistrationBackend`] trait
//! - [`api::http`](crate::api::http) - HTTP implementation over JSON
//!
//! # Endpoints
//!
//! Routes are configurable (see [`BackendConfig`](crate::utils::toml_config::BackendConfig)):
//!
//! - `GET {list_path}` - All registrations (the only read path)
//! - `POST {approve_path}` - Approve one registration
//! - `POST {reject_path}` - Reject one registration
//!
//! # Authentication
//!
//! When the configured token variable is set, every request carries:
//! ```text
//! Authorization: Bearer <token>
//! ```

/// Backend contract.
pub mod client;
/// `reqwest`-based backend.
pub mod http;

pub use client::RegistrationBackend;
pub use http::HttpRegistrationBackend;
