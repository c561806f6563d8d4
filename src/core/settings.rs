//! Client settings
//!
//! Stored as JSON by [`crate::core::settings_persistence`]. Missing fields
//! take their defaults, so older files keep loading.

use crate::core::error::{CoreError, CoreResult};
use crate::game::types::PieceColor;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default authority base URL
pub const DEFAULT_AUTHORITY_URL: &str = "http://localhost:8080/api";

/// User preferences for the board client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// Base URL of the move authority
    pub authority_url: String,

    /// Sent as the `API-KEY` header when set
    pub api_key: Option<String>,

    /// Side of the board facing the player
    pub view_color: PieceColor,

    /// Per-request timeout for authority calls
    pub request_timeout_secs: u64,

    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            authority_url: DEFAULT_AUTHORITY_URL.to_string(),
            api_key: None,
            view_color: PieceColor::White,
            request_timeout_secs: 10,
            log_level: "info".to_string(),
        }
    }
}

impl ClientSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Reject values that would make the client unusable
    pub fn validate(&self) -> CoreResult<()> {
        if self.authority_url.trim().is_empty() {
            return Err(CoreError::InvalidSetting {
                field: "authority_url",
                message: "must not be empty".to_string(),
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(CoreError::InvalidSetting {
                field: "request_timeout_secs",
                message: "must be at least 1 second".to_string(),
            });
        }
        Ok(())
    }
}
