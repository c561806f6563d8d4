//! Networking Tests
//!
//! Exercises [`HttpAuthority`] against an in-process axum authority bound to
//! an ephemeral port: request shapes, verdict decoding (including 400
//! rejections), API key handling and transport failures.

use async_trait::async_trait;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chess_capture::game::resources::{GameSession, PendingPromotion, PromotionGate};
use chess_capture::game::rules::BoardState;
use chess_capture::game::systems::{AttemptOutcome, ClickOutcome, MoveController};
use chess_capture::game::types::{PieceColor, PromotionPiece};
use chess_capture::networking::{AuthorityError, HttpAuthority, MoveSubmission, RemoteAuthority};
use serde_json::json;
use shared::protocol::{GameStateResponse, MoveRequestBody, API_KEY_HEADER};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
const AFTER_E4_FEN: &str = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1";

/// Everything the fake authority received
#[derive(Clone, Default)]
struct Recorded {
    moves: Arc<Mutex<Vec<MoveRequestBody>>>,
    api_keys: Arc<Mutex<Vec<Option<String>>>>,
}

async fn start_handler() -> Json<GameStateResponse> {
    Json(GameStateResponse {
        fen: Some(START_FEN.to_string()),
        move_count: 0,
        legal_moves: vec!["e2e4".to_string(), "g1f3".to_string()],
    })
}

async fn moves_handler() -> Json<GameStateResponse> {
    Json(GameStateResponse {
        fen: Some(AFTER_E4_FEN.to_string()),
        move_count: 1,
        legal_moves: vec!["e7e5".to_string()],
    })
}

/// Accepts e2-e4 and any promotion, rejects everything else with 400
async fn move_handler(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
    Json(body): Json<MoveRequestBody>,
) -> Response {
    recorded.api_keys.lock().unwrap().push(
        headers
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    );
    recorded.moves.lock().unwrap().push(body.clone());

    let accepted = (body.from == "e2" && body.to == "e4") || body.promotion.is_some();
    if accepted {
        Json(json!({
            "success": true,
            "message": "Move applied",
            "fen": AFTER_E4_FEN,
            "legal_moves": ["e7e5", "d7d5"],
        }))
        .into_response()
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "Message": "Illegal move" })),
        )
            .into_response()
    }
}

fn authority_router(recorded: Recorded) -> Router {
    let api = Router::new()
        .route("/start", post(start_handler))
        .route("/move", post(move_handler))
        .route("/moves", get(moves_handler))
        .with_state(recorded);
    Router::new().nest("/api", api)
}

/// Serve `router` on 127.0.0.1 and return its `/api` base URL
async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/api", addr)
}

fn client(base: &str, api_key: Option<&str>) -> HttpAuthority {
    HttpAuthority::new(base, api_key.map(str::to_string), Duration::from_secs(5)).unwrap()
}

fn submission(from: &str, to: &str) -> MoveSubmission {
    MoveSubmission {
        from: from.to_string(),
        to: to.to_string(),
        promotion: None,
        fen: None,
    }
}

// ============================================================================
// Endpoint Tests
// ============================================================================

#[tokio::test]
async fn test_start_game_decodes_position() {
    let base = serve(authority_router(Recorded::default())).await;

    let start = client(&base, None).start_game().await.unwrap();

    assert_eq!(start.fen.as_deref(), Some(START_FEN));
    assert_eq!(start.legal_moves, vec!["e2e4", "g1f3"]);
}

#[tokio::test]
async fn test_fetch_state_uses_moves_endpoint() {
    let base = serve(authority_router(Recorded::default())).await;

    let state = client(&base, None).fetch_state().await.unwrap();

    assert_eq!(state.fen.as_deref(), Some(AFTER_E4_FEN));
    assert_eq!(state.legal_moves, vec!["e7e5"]);
}

#[tokio::test]
async fn test_accepted_move_returns_verdict() {
    let base = serve(authority_router(Recorded::default())).await;

    let verdict = client(&base, None)
        .make_move(submission("e2", "e4"))
        .await
        .unwrap();

    assert!(verdict.success);
    assert_eq!(verdict.message.as_deref(), Some("Move applied"));
    assert_eq!(verdict.fen.as_deref(), Some(AFTER_E4_FEN));
    assert_eq!(verdict.legal_moves.len(), 2);
}

#[tokio::test]
async fn test_rejection_with_400_is_a_verdict_not_an_error() {
    //! The authority answers illegal moves with 400 and a JSON body

    let base = serve(authority_router(Recorded::default())).await;

    let verdict = client(&base, None)
        .make_move(submission("e2", "e5"))
        .await
        .unwrap();

    assert!(!verdict.success);
    assert_eq!(verdict.message.as_deref(), Some("Illegal move"));
}

#[tokio::test]
async fn test_submission_fields_reach_the_authority() {
    let recorded = Recorded::default();
    let base = serve(authority_router(recorded.clone())).await;

    let mut promote = submission("a7", "a8");
    promote.promotion = Some('q');
    promote.fen = Some(START_FEN.to_string());
    client(&base, Some("secret")).make_move(promote).await.unwrap();

    let moves = recorded.moves.lock().unwrap();
    assert_eq!(moves[0].promotion.as_deref(), Some("q"));
    assert_eq!(moves[0].fen.as_deref(), Some(START_FEN));
    assert_eq!(
        recorded.api_keys.lock().unwrap()[0].as_deref(),
        Some("secret")
    );
}

#[tokio::test]
async fn test_api_key_header_is_omitted_when_unset() {
    let recorded = Recorded::default();
    let base = serve(authority_router(recorded.clone())).await;

    client(&base, None)
        .make_move(submission("e2", "e4"))
        .await
        .unwrap();

    assert_eq!(recorded.api_keys.lock().unwrap()[0], None);
}

// ============================================================================
// Failure Tests
// ============================================================================

#[tokio::test]
async fn test_plain_text_error_becomes_status_error() {
    let router = Router::new().route(
        "/api/move",
        post(|| async { (StatusCode::UNAUTHORIZED, "Unauthorized") }),
    );
    let base = serve(router).await;

    let err = client(&base, None)
        .make_move(submission("e2", "e4"))
        .await
        .unwrap_err();

    match err {
        AuthorityError::Status { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message.as_deref(), Some("Unauthorized"));
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_start_game_error_status_is_not_decoded() {
    let router = Router::new().route(
        "/api/start",
        post(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "legal_moves": [] })),
            )
        }),
    );
    let base = serve(router).await;

    let err = client(&base, None).start_game().await.unwrap_err();

    assert!(matches!(err, AuthorityError::Status { status: 500, .. }));
}

#[tokio::test]
async fn test_unreachable_authority_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{}/api", addr), None)
        .start_game()
        .await
        .unwrap_err();

    assert!(matches!(err, AuthorityError::Transport(_)));
}

#[tokio::test]
async fn test_slow_authority_times_out() {
    let router = Router::new().route(
        "/api/move",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            "too late"
        }),
    );
    let base = serve(router).await;
    let authority = HttpAuthority::new(base, None, Duration::from_millis(200)).unwrap();

    let err = authority
        .make_move(submission("e2", "e4"))
        .await
        .unwrap_err();

    assert!(matches!(err, AuthorityError::Transport(_)));
}

// ============================================================================
// End-to-end Tests
// ============================================================================

struct AlwaysQueen;

#[async_trait]
impl PromotionGate for AlwaysQueen {
    async fn request_promotion_choice(
        &mut self,
        _pending: &PendingPromotion,
    ) -> Option<PromotionPiece> {
        Some(PromotionPiece::Queen)
    }
}

#[tokio::test]
async fn test_controller_over_http() {
    //! New game, one accepted move, one rejected move, one promotion

    let recorded = Recorded::default();
    let base = serve(authority_router(recorded.clone())).await;
    let mut controller = MoveController::new(client(&base, None), AlwaysQueen, PieceColor::White);

    controller.new_game().await.unwrap();
    assert_eq!(controller.session().current_fen.as_deref(), Some(START_FEN));

    controller.click("7-5").await;
    let outcome = controller.click("5-5").await;
    assert!(matches!(
        outcome,
        ClickOutcome::Attempted(AttemptOutcome::Applied { .. })
    ));
    assert_eq!(controller.session().current_fen.as_deref(), Some(AFTER_E4_FEN));

    let before = controller.session().board.clone();
    controller.click("2-4").await;
    let outcome = controller.click("5-4").await;
    assert_eq!(
        outcome,
        ClickOutcome::Attempted(AttemptOutcome::Rejected {
            message: Some("Illegal move".to_string())
        })
    );
    assert_eq!(controller.session().board, before);

    let moves = recorded.moves.lock().unwrap();
    assert_eq!(moves.len(), 2);
    assert_eq!(moves[0].fen.as_deref(), Some(START_FEN));
    assert_eq!(moves[1].fen.as_deref(), Some(AFTER_E4_FEN));
}

#[tokio::test]
async fn test_promotion_over_http_sends_lowercase_piece() {
    let recorded = Recorded::default();
    let base = serve(authority_router(recorded.clone())).await;
    let mut session = GameSession::new(PieceColor::White);
    session.board = BoardState::from_layout(
        "....k...\nP.......\n........\n........\n\
         ........\n........\n........\n....K...",
    )
    .unwrap();
    let mut controller = MoveController::with_session(client(&base, None), AlwaysQueen, session);

    controller.click("2-1").await;
    let outcome = controller.click("1-1").await;

    let ClickOutcome::Attempted(AttemptOutcome::Applied { entry, .. }) = outcome else {
        panic!("promotion should apply, got {:?}", outcome);
    };
    assert_eq!(entry.notation, "Qa7-a8");
    let moves = recorded.moves.lock().unwrap();
    assert_eq!(moves[0].from, "a7");
    assert_eq!(moves[0].to, "a8");
    assert_eq!(moves[0].promotion.as_deref(), Some("q"));
}
