use serde::{Deserialize, Serialize};

/// Path of the endpoint that starts a fresh game (POST)
pub const START_PATH: &str = "/start";
/// Path of the endpoint that validates and applies one move (POST)
pub const MOVE_PATH: &str = "/move";
/// Path of the endpoint that reports the current position (GET)
pub const STATE_PATH: &str = "/moves";
/// Header carrying the optional API key
pub const API_KEY_HEADER: &str = "API-KEY";

/// Authority snapshot returned by `/start` and `/moves`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct GameStateResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fen: Option<String>,
    #[serde(default)]
    pub move_count: usize,
    /// Long algebraic moves, e.g. `e2e4` or `e7e8q`
    #[serde(default)]
    pub legal_moves: Vec<String>,
}

/// Body of a `/move` request
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct MoveRequestBody {
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<String>,
    /// Position the move is played from; the authority falls back to the
    /// initial position when it is missing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fen: Option<String>,
}

/// Verdict returned by `/move`, both on success (200) and rejection (400)
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct MoveResponseBody {
    pub success: bool,
    #[serde(default, alias = "Message", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fen: Option<String>,
    #[serde(default)]
    pub legal_moves: Vec<String>,
}
