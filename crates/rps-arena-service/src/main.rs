//! RPS Arena Service
//!
//! HTTP boundary for the commit-reveal rock-paper-scissors arena:
//! players escrow a fixed stake, the creator commits to a move, an
//! opponent joins with an open move, and anyone may settle the game.

mod handlers;
mod state;

use axum::{
    routing::{get, post},
    Router,
};
use rps_arena_core::{Arena, ArenaConfig, MockLedger};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use handlers::*;
use state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .init();

    let fee: u64 = std::env::var("ARENA_FEE")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(100);
    let max_hours: i64 = std::env::var("ARENA_MAX_HOURS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(48);
    let config = ArenaConfig::new(fee, chrono::Duration::hours(max_hours));
    tracing::info!(fee, max_hours, "arena configured");

    let ledger = MockLedger::new();
    let arena = Arena::new(config, Arc::new(ledger.clone()));
    let state = AppState::new(arena, ledger);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        // Players
        .route("/api/player/register", post(register_player))
        .route("/api/player/me", get(get_current_player))
        // Games
        .route("/api/games", post(create_game))
        .route("/api/games/:id", get(get_game))
        .route("/api/games/:id/join", post(join_game))
        .route("/api/games/:id/reveal", post(reveal_move))
        .route("/api/games/:id/finalize", post(finalize_game))
        .route("/api/games/:id/expired", get(game_expired))
        // Pool
        .route("/api/pool", get(pool_balance))
        // System
        .route("/api/system/tick", post(tick))
        // Health
        .route("/api/health", get(health))
        .layer(cors)
        .with_state(state);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(3000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("arena service starting on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

async fn health() -> &'static str {
    "ok"
}
