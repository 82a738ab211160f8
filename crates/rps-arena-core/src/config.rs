//! Arena configuration.

use chrono::Duration;

/// Fixed configuration supplied at arena construction, immutable afterwards.
#[derive(Clone, Copy, Debug)]
pub struct ArenaConfig {
    /// Escrow amount each player must stake, in base units
    pub fee: u64,
    /// How long a game stays joinable before the creator can reclaim the stake
    pub max_duration: Duration,
}

impl ArenaConfig {
    pub fn new(fee: u64, max_duration: Duration) -> Self {
        Self { fee, max_duration }
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            fee: 100,
            max_duration: Duration::hours(48),
        }
    }
}
