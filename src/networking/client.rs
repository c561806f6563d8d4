//! Remote authority client
//!
//! The authority owns the real game position and decides legality. The board
//! client only submits candidate moves and applies what comes back as
//! accepted. [`RemoteAuthority`] is the seam; [`HttpAuthority`] talks to the
//! JSON HTTP authority (`POST /start`, `POST /move`, `GET /moves`).

use async_trait::async_trait;
use reqwest::StatusCode;
use shared::protocol::{
    GameStateResponse, MoveRequestBody, MoveResponseBody, API_KEY_HEADER, MOVE_PATH, START_PATH,
    STATE_PATH,
};
use std::time::Duration;
use tracing::{debug, error, info};

/// Errors talking to the authority
///
/// A rejected move is not an error: it comes back as a [`MoveVerdict`] with
/// `success == false`.
#[derive(Debug, thiserror::Error)]
pub enum AuthorityError {
    /// Could not reach the authority or the connection broke
    #[error("Network error: could not reach the authority: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success status without a decodable body
    #[error("HTTP error! status: {status}{}", message.as_ref().map(|m| format!(" ({m})")).unwrap_or_default())]
    Status {
        status: u16,
        message: Option<String>,
    },

    /// Success status but the body was not the expected JSON
    #[error("Invalid JSON response from authority: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    /// Authority settings that cannot be used
    #[error("Invalid authority configuration: {message}")]
    Config { message: String },
}

/// Result type alias for authority calls
pub type AuthorityResult<T> = Result<T, AuthorityError>;

/// Position snapshot from `start_game` / `fetch_state`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameStart {
    pub fen: Option<String>,
    pub legal_moves: Vec<String>,
}

impl From<GameStateResponse> for GameStart {
    fn from(response: GameStateResponse) -> Self {
        Self {
            fen: response.fen,
            legal_moves: response.legal_moves,
        }
    }
}

/// A candidate move as sent to the authority
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveSubmission {
    pub from: String,
    pub to: String,
    /// `q`, `r`, `b` or `n`
    pub promotion: Option<char>,
    /// Last position the authority reported, if any
    pub fen: Option<String>,
}

impl From<MoveSubmission> for MoveRequestBody {
    fn from(submission: MoveSubmission) -> Self {
        Self {
            from: submission.from,
            to: submission.to,
            promotion: submission.promotion.map(String::from),
            fen: submission.fen,
        }
    }
}

/// The authority's answer to a move
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MoveVerdict {
    pub success: bool,
    pub message: Option<String>,
    pub fen: Option<String>,
    pub legal_moves: Vec<String>,
}

impl MoveVerdict {
    pub fn accepted() -> Self {
        Self {
            success: true,
            ..Self::default()
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            ..Self::default()
        }
    }
}

impl From<MoveResponseBody> for MoveVerdict {
    fn from(body: MoveResponseBody) -> Self {
        Self {
            success: body.success,
            message: body.message,
            fen: body.fen,
            legal_moves: body.legal_moves,
        }
    }
}

/// The sole legality gate for moves
#[async_trait]
pub trait RemoteAuthority: Send + Sync {
    /// Begin a new game on the authority
    async fn start_game(&self) -> AuthorityResult<GameStart>;

    /// Validate and play one move
    async fn make_move(&self, submission: MoveSubmission) -> AuthorityResult<MoveVerdict>;

    /// Current position and legal moves without changing anything
    async fn fetch_state(&self) -> AuthorityResult<GameStart>;
}

/// JSON-over-HTTP authority client
#[derive(Debug, Clone)]
pub struct HttpAuthority {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpAuthority {
    /// Build a client for `base_url` (e.g. `http://localhost:8080/api`)
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> AuthorityResult<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(AuthorityError::Config {
                message: format!("authority url must be http(s): {base_url:?}"),
            });
        }

        let client = reqwest::Client::builder().timeout(timeout).build()?;
        info!("[AUTHORITY] Using authority at {}", base_url);
        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn with_key(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.header(API_KEY_HEADER, key),
            None => request,
        }
    }

    /// Read a response body, mapping error statuses the way the web client did:
    /// a JSON body on an error status is still handed back to the caller when
    /// `accept_error_body` is set, otherwise it becomes [`AuthorityError::Status`].
    async fn read_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
        accept_error_body: bool,
    ) -> AuthorityResult<T> {
        let status = response.status();
        let bytes = response.bytes().await?;
        let parsed = serde_json::from_slice::<T>(&bytes);

        if status.is_success() {
            return Ok(parsed?);
        }

        match parsed {
            Ok(body) if accept_error_body => Ok(body),
            _ => Err(AuthorityError::Status {
                status: status.as_u16(),
                message: error_message(status, &bytes),
            }),
        }
    }
}

/// Pull a human-readable message out of an error body
fn error_message(status: StatusCode, bytes: &[u8]) -> Option<String> {
    if let Ok(body) = serde_json::from_slice::<MoveResponseBody>(bytes) {
        if body.message.is_some() {
            return body.message;
        }
    }
    let text = String::from_utf8_lossy(bytes).trim().to_string();
    if text.is_empty() {
        status.canonical_reason().map(str::to_string)
    } else {
        Some(text)
    }
}

#[async_trait]
impl RemoteAuthority for HttpAuthority {
    async fn start_game(&self) -> AuthorityResult<GameStart> {
        let request = self
            .client
            .post(self.url(START_PATH))
            .json(&serde_json::json!({}));
        let response = self.with_key(request).send().await.inspect_err(|e| {
            error!("[AUTHORITY] start_game failed: {}", e);
        })?;
        let body: GameStateResponse = Self::read_json(response, false).await?;
        debug!("[AUTHORITY] Game started, {} legal moves", body.legal_moves.len());
        Ok(body.into())
    }

    async fn make_move(&self, submission: MoveSubmission) -> AuthorityResult<MoveVerdict> {
        debug!(
            "[AUTHORITY] Submitting {}-{} (promotion: {:?})",
            submission.from, submission.to, submission.promotion
        );
        let body = MoveRequestBody::from(submission);
        let request = self.client.post(self.url(MOVE_PATH)).json(&body);
        let response = self.with_key(request).send().await?;
        // Rejections arrive as 400 with a JSON verdict.
        let verdict: MoveResponseBody = Self::read_json(response, true).await?;
        Ok(verdict.into())
    }

    async fn fetch_state(&self) -> AuthorityResult<GameStart> {
        let request = self.client.get(self.url(STATE_PATH));
        let response = self.with_key(request).send().await?;
        let body: GameStateResponse = Self::read_json(response, false).await?;
        Ok(body.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_http_urls() {
        let result = HttpAuthority::new("localhost:8080", None, Duration::from_secs(1));
        assert!(matches!(result, Err(AuthorityError::Config { .. })));
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let authority =
            HttpAuthority::new("http://localhost:8080/api/", None, Duration::from_secs(1)).unwrap();
        assert_eq!(authority.base_url(), "http://localhost:8080/api");
        assert_eq!(authority.url(MOVE_PATH), "http://localhost:8080/api/move");
    }

    #[test]
    fn test_submission_to_body() {
        let body = MoveRequestBody::from(MoveSubmission {
            from: "a7".to_string(),
            to: "a8".to_string(),
            promotion: Some('q'),
            fen: None,
        });
        assert_eq!(body.promotion.as_deref(), Some("q"));
        assert!(body.fen.is_none());
    }

    #[test]
    fn test_error_message_prefers_json_message() {
        let msg = error_message(StatusCode::BAD_REQUEST, br#"{"success":false,"message":"nope"}"#);
        assert_eq!(msg.as_deref(), Some("nope"));

        let msg = error_message(StatusCode::UNAUTHORIZED, b"Unauthorized\n");
        assert_eq!(msg.as_deref(), Some("Unauthorized"));

        let msg = error_message(StatusCode::INTERNAL_SERVER_ERROR, b"");
        assert_eq!(msg.as_deref(), Some("Internal Server Error"));
    }

    #[test]
    fn test_status_error_display() {
        let err = AuthorityError::Status {
            status: 401,
            message: Some("Unauthorized".to_string()),
        };
        assert_eq!(err.to_string(), "HTTP error! status: 401 (Unauthorized)");
    }
}
