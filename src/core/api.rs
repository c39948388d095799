//! HTTP API for the game
//!
//! Endpoints:
//! - GET /session/new - Deal a shuffled, tagged deck
//! - POST /session/answer - Judge one guess
//! - GET /health - Health check
//!
//! The server keeps no session state: a client holding a deck is a session.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::core::judge::judge;
use crate::core::pool::PhrasePool;
use crate::types::PhraseRecord;
use crate::GameError;

/// App state
pub struct AppState {
    pub pool: PhrasePool,
    pub rng: Mutex<StdRng>,
}

impl AppState {
    /// Seeded shuffles when `seed` is given, OS entropy otherwise
    pub fn new(pool: PhrasePool, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            pool,
            rng: Mutex::new(rng),
        }
    }
}

/// New session response
#[derive(Debug, Serialize, Deserialize)]
pub struct NewSessionResponse {
    pub phrases: Vec<PhraseRecord>,
    pub total: usize,
}

/// Answer response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerResponse {
    pub correct: bool,
    pub is_real: bool,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub authentic: usize,
    pub fabricated: usize,
}

/// Error body
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// [`GameError`] rendered as a status code and JSON body
#[derive(Debug)]
pub struct ApiError(pub GameError);

impl From<GameError> for ApiError {
    fn from(e: GameError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            GameError::MalformedAnswerRequest(_) => (StatusCode::BAD_REQUEST, "Invalid request"),
            GameError::UnknownIdentifierTag(_) => (StatusCode::BAD_REQUEST, "Unknown phrase identifier"),
            GameError::DeckUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "Failed to load phrases"),
            GameError::JudgeUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "Judge unavailable"),
            GameError::PoolIo { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "Failed to load phrases"),
        };
        warn!(status = status.as_u16(), error = %self.0, "request rejected");
        (status, Json(ErrorBody { error: message.to_string() })).into_response()
    }
}

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/session/new", get(new_session))
        .route("/session/answer", post(answer))
        .with_state(Arc::new(state))
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        authentic: state.pool.authentic.len(),
        fabricated: state.pool.fabricated.len(),
    })
}

/// Deal a new deck
async fn new_session(State(state): State<Arc<AppState>>) -> Result<Json<NewSessionResponse>, ApiError> {
    let phrases = {
        let mut rng = state.rng.lock().await;
        state.pool.deal(&mut *rng)?
    };
    info!(total = phrases.len(), "deck dealt");

    Ok(Json(NewSessionResponse {
        total: phrases.len(),
        phrases,
    }))
}

/// Judge one guess
async fn answer(body: Bytes) -> Result<Json<AnswerResponse>, ApiError> {
    let (phrase_id, guess) = parse_answer(&body)?;
    let verdict = judge(&phrase_id, guess)?;
    debug!(%phrase_id, guess, correct = verdict.correct, "answer judged");

    Ok(Json(AnswerResponse {
        correct: verdict.correct,
        is_real: verdict.actual_is_authentic,
    }))
}

/// Pull `phraseId` (non-empty string) and `guess` (boolean) out of a body
fn parse_answer(body: &[u8]) -> Result<(String, bool), GameError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| GameError::MalformedAnswerRequest(e.to_string()))?;

    let phrase_id = value
        .get("phraseId")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| GameError::MalformedAnswerRequest("phraseId missing".to_string()))?;
    let guess = value
        .get("guess")
        .and_then(Value::as_bool)
        .ok_or_else(|| GameError::MalformedAnswerRequest("guess must be a boolean".to_string()))?;

    Ok((phrase_id.to_string(), guess))
}

/// Run the API server
pub async fn run_server(addr: &str, state: AppState) -> std::io::Result<()> {
    let router = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "UVB-76 API listening");
    println!("  GET  /session/new    - Deal a deck");
    println!("  POST /session/answer - Judge a guess");
    println!("  GET  /health         - Health check");
    axum::serve(listener, router).await
}
