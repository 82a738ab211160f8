//! HTTP API handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rps_arena_core::{ArenaError, Game, GameId, GameStatus, Move, MoveCommitment, Nonce, PlayerId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::state::AppState;

/// Starting balance handed to every registered player
const STARTING_BALANCE: u64 = 10_000;

// ============ Request/Response types ============

#[derive(Serialize)]
pub struct PlayerResponse {
    pub id: Uuid,
    pub balance: u64,
}

#[derive(Deserialize)]
pub struct CreateGameRequest {
    /// Hex-encoded commitment to the creator's move
    pub commitment: String,
    pub stake: u64,
}

#[derive(Deserialize)]
pub struct JoinGameRequest {
    /// "rock", "paper" or "scissor"
    pub r#move: String,
    pub stake: u64,
}

#[derive(Deserialize)]
pub struct RevealRequest {
    pub r#move: String,
    /// Hex-encoded nonce used when producing the commitment
    pub nonce: String,
}

#[derive(Deserialize)]
pub struct TickRequest {
    pub seconds: i64,
}

#[derive(Serialize)]
pub struct GameResponse {
    pub id: u64,
    pub status: GameStatus,
    pub creator: Uuid,
    pub opponent: Option<Uuid>,
    pub creator_commitment: String,
    pub creator_move: Option<String>,
    pub opponent_move: Option<String>,
    pub started_at: String,
}

impl GameResponse {
    fn from_game(id: GameId, game: Game) -> Self {
        Self {
            id: id.index(),
            status: game.status,
            creator: *game.creator.as_uuid(),
            opponent: game.opponent.map(|p| *p.as_uuid()),
            creator_commitment: game.creator_commitment.to_string(),
            creator_move: game.creator_move.map(|m| m.to_string()),
            opponent_move: game.opponent_move.map(|m| m.to_string()),
            started_at: game.started_at.to_rfc3339(),
        }
    }
}

// ============ Helpers ============

fn player_id_from_header(headers: &axum::http::HeaderMap) -> Option<PlayerId> {
    headers
        .get("X-Player-Id")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse().ok())
}

fn missing_header() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({"error": "Missing X-Player-Id header"})),
    )
}

fn arena_error(err: ArenaError) -> (StatusCode, Json<serde_json::Value>) {
    let status = match err {
        ArenaError::FeeMismatch | ArenaError::InvalidMove | ArenaError::CommitmentMismatch => {
            StatusCode::BAD_REQUEST
        }
        ArenaError::NotCreator => StatusCode::FORBIDDEN,
        ArenaError::GameNotStarted => StatusCode::NOT_FOUND,
        _ => StatusCode::CONFLICT,
    };
    (status, Json(serde_json::json!({"error": err.to_string()})))
}

fn bad_request(message: &str) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({"error": message})),
    )
}

// ============ Player handlers ============

pub async fn register_player(State(state): State<AppState>) -> impl IntoResponse {
    let player = state.register_player(STARTING_BALANCE);
    (
        StatusCode::OK,
        Json(serde_json::json!(PlayerResponse {
            id: *player.as_uuid(),
            balance: STARTING_BALANCE,
        })),
    )
}

pub async fn get_current_player(
    State(state): State<AppState>,
    headers: axum::http::HeaderMap,
) -> impl IntoResponse {
    let player = match player_id_from_header(&headers) {
        Some(id) => id,
        None => return missing_header(),
    };
    (
        StatusCode::OK,
        Json(serde_json::json!(PlayerResponse {
            id: *player.as_uuid(),
            balance: state.ledger().balance(&player),
        })),
    )
}

// ============ Game handlers ============

pub async fn create_game(
    State(state): State<AppState>,
    headers: axum::http::HeaderMap,
    Json(req): Json<CreateGameRequest>,
) -> impl IntoResponse {
    let creator = match player_id_from_header(&headers) {
        Some(id) => id,
        None => return missing_header(),
    };
    let commitment: MoveCommitment = match req.commitment.parse() {
        Ok(c) => c,
        Err(_) => return bad_request("commitment must be 64 hex characters"),
    };
    if !state.ledger().debit(&creator, req.stake) {
        return bad_request("insufficient balance for stake");
    }
    match state.arena().create(creator, commitment, req.stake, state.now()) {
        Ok(id) => (
            StatusCode::OK,
            Json(serde_json::json!({"game_id": id.index()})),
        ),
        Err(err) => {
            state.ledger().credit(&creator, req.stake);
            arena_error(err)
        }
    }
}

pub async fn join_game(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    headers: axum::http::HeaderMap,
    Json(req): Json<JoinGameRequest>,
) -> impl IntoResponse {
    let opponent = match player_id_from_header(&headers) {
        Some(id) => id,
        None => return missing_header(),
    };
    let mv: Move = match req.r#move.parse() {
        Ok(mv) => mv,
        Err(err) => return arena_error(err),
    };
    if !state.ledger().debit(&opponent, req.stake) {
        return bad_request("insufficient balance for stake");
    }
    let game_id = GameId::from_index(id);
    match state
        .arena()
        .join(game_id, opponent, mv, req.stake, state.now())
    {
        Ok(()) => (StatusCode::OK, Json(serde_json::json!({"joined": true}))),
        Err(err) => {
            state.ledger().credit(&opponent, req.stake);
            arena_error(err)
        }
    }
}

pub async fn reveal_move(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    headers: axum::http::HeaderMap,
    Json(req): Json<RevealRequest>,
) -> impl IntoResponse {
    let caller = match player_id_from_header(&headers) {
        Some(id) => id,
        None => return missing_header(),
    };
    let mv: Move = match req.r#move.parse() {
        Ok(mv) => mv,
        Err(err) => return arena_error(err),
    };
    let nonce: Nonce = match req.nonce.parse() {
        Ok(n) => n,
        Err(_) => return bad_request("nonce must be 64 hex characters"),
    };
    match state
        .arena()
        .reveal(GameId::from_index(id), caller, mv, &nonce)
    {
        Ok(()) => (StatusCode::OK, Json(serde_json::json!({"revealed": true}))),
        Err(err) => arena_error(err),
    }
}

pub async fn finalize_game(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> impl IntoResponse {
    match state.arena().finalize(GameId::from_index(id), state.now()) {
        Ok(event) => (StatusCode::OK, Json(serde_json::json!(event))),
        Err(err) => arena_error(err),
    }
}

pub async fn get_game(State(state): State<AppState>, Path(id): Path<u64>) -> impl IntoResponse {
    let game_id = GameId::from_index(id);
    match state.arena().game(game_id) {
        Some(game) => (
            StatusCode::OK,
            Json(serde_json::json!(GameResponse::from_game(game_id, game))),
        ),
        None => arena_error(ArenaError::GameNotStarted),
    }
}

pub async fn game_expired(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> impl IntoResponse {
    match state
        .arena()
        .is_expired(GameId::from_index(id), state.now())
    {
        Ok(expired) => (StatusCode::OK, Json(serde_json::json!({"expired": expired}))),
        Err(err) => arena_error(err),
    }
}

pub async fn pool_balance(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({"pool": state.arena().pool_balance()}))
}

// ============ System handlers ============

pub async fn tick(
    State(state): State<AppState>,
    Json(req): Json<TickRequest>,
) -> impl IntoResponse {
    state.advance_time(req.seconds);
    Json(serde_json::json!({"now": state.now().to_rfc3339()}))
}
