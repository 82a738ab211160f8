//! Game records and identifiers.

use crate::crypto::MoveCommitment;
use crate::moves::Move;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque player identity.
///
/// How callers prove control of an identity is outside this crate; the
/// boundary hands us an already-authenticated id.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(Uuid);

impl PlayerId {
    /// Create a new random player ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Get bytes representation for hashing
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for PlayerId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl fmt::Debug for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlayerId({})", self.0)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Game identifier: an index into the registry arena.
///
/// Allocation is strictly sequential and an index is never reused, even
/// for expired or refunded games.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(u64);

impl GameId {
    /// Create from a raw index
    pub fn from_index(index: u64) -> Self {
        Self(index)
    }

    /// Get the raw index
    pub fn index(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GameId({})", self.0)
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status of a game record.
///
/// `NotStarted` is only ever observed as the sentinel for an identifier
/// that was never allocated; a stored record is `Live` or `Ended`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    NotStarted,
    Live,
    Ended,
}

/// One escrowed match.
#[derive(Clone, Debug, Serialize)]
pub struct Game {
    pub status: GameStatus,
    pub creator: PlayerId,
    pub opponent: Option<PlayerId>,
    pub creator_commitment: MoveCommitment,
    pub creator_move: Option<Move>,
    pub opponent_move: Option<Move>,
    pub started_at: DateTime<Utc>,
}

impl Game {
    pub(crate) fn open(
        creator: PlayerId,
        commitment: MoveCommitment,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            status: GameStatus::Live,
            creator,
            opponent: None,
            creator_commitment: commitment,
            creator_move: None,
            opponent_move: None,
            started_at: now,
        }
    }

    /// Deadline check against a caller-supplied clock
    pub fn is_expired(&self, now: DateTime<Utc>, max_duration: Duration) -> bool {
        now - self.started_at >= max_duration
    }
}

/// Settlement notification emitted by a successful finalize.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameEvent {
    /// Decisive win: the winner took both stakes plus the whole pool
    Won {
        game_id: GameId,
        winner: PlayerId,
        amount: u64,
    },
    /// Draw: both slots refunded half a stake, the rest carried to the pool
    Draw {
        game_id: GameId,
        refund_each: u64,
        pool_after: u64,
    },
    /// No opponent ever joined and the deadline passed
    Expired {
        game_id: GameId,
        creator: PlayerId,
        refund: u64,
    },
}
