//! Review actions
//!
//! The [`ReviewCoordinator`] is the only component that issues approve or
//! reject calls. Views hold a clone of it and re-fetch after it reports a
//! confirmed action.

pub mod coordinator;

pub use coordinator::ReviewCoordinator;
