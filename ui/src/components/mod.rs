//! Reusable UI components

pub mod header;
pub mod loading;
pub mod reject_modal;
pub mod settings;
pub mod status_badge;
pub mod toast;

pub use header::Header;
pub use loading::{LoadingSpinner, Skeleton};
pub use reject_modal::RejectModal;
pub use settings::SettingsPanel;
pub use status_badge::StatusBadge;
pub use toast::ToastHost;
