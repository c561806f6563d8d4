//! Core module - application infrastructure
//!
//! - [`ClientSettings`] - User preferences (authority URL, API key, view colour)
//! - [`settings_persistence`] - JSON load/save in the user's config directory
//! - [`CoreError`] - Errors from the above
//!
//! # Usage Example
//!
//! ```rust,ignore
//! use chess_capture::core::{load_settings, save_settings};
//!
//! let mut settings = load_settings(None);
//! settings.view_color = PieceColor::Black;
//! save_settings(&settings, None);
//! ```

pub mod error;
pub mod settings;
pub mod settings_persistence;

// Re-export commonly used items
pub use error::{CoreError, CoreResult};
pub use settings::ClientSettings;
pub use settings_persistence::{
    load_settings, load_settings_from, save_settings, save_settings_to, settings_path,
};
