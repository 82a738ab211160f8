//! Application state: arena handle, mock ledger, simulated clock.

use chrono::{DateTime, Utc};
use rps_arena_core::{Arena, MockLedger, PlayerId};
use std::sync::{Arc, Mutex};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    arena: Arena,
    ledger: MockLedger,
    /// Simulated current time (for expiry testing)
    current_time: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl AppState {
    pub fn new(arena: Arena, ledger: MockLedger) -> Self {
        Self {
            arena,
            ledger,
            current_time: Arc::new(Mutex::new(None)),
        }
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn ledger(&self) -> &MockLedger {
        &self.ledger
    }

    /// Get current time (real or simulated)
    pub fn now(&self) -> DateTime<Utc> {
        self.current_time.lock().unwrap().unwrap_or_else(Utc::now)
    }

    /// Advance simulated time by seconds
    pub fn advance_time(&self, seconds: i64) {
        let mut current_time = self.current_time.lock().unwrap();
        let current = current_time.unwrap_or_else(Utc::now);
        *current_time = Some(current + chrono::Duration::seconds(seconds));
    }

    /// Register a fresh player with a starting balance on the mock ledger
    pub fn register_player(&self, initial_balance: u64) -> PlayerId {
        let player = PlayerId::new();
        self.ledger.register(player, initial_balance);
        player
    }
}
