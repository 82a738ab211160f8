//! RPS Arena Core Library
//!
//! This crate provides the game lifecycle state machine and settlement
//! engine for fund-escrowing rock-paper-scissors matches: the move
//! encoding, the commit-reveal scheme, the game registry, and payout
//! accounting with the draw-carryover pool.

pub mod arena;
pub mod config;
pub mod crypto;
pub mod error;
pub mod moves;
pub mod transfer;

pub use arena::{Arena, Game, GameEvent, GameId, GameStatus, PlayerId};
pub use config::ArenaConfig;
pub use crypto::{MoveCommitment, Nonce};
pub use error::ArenaError;
pub use moves::{Move, Outcome};
pub use transfer::{MockLedger, ValueTransfer};
