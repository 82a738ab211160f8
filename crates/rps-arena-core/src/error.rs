//! Error type for arena operations.

use thiserror::Error;

/// Errors from arena operations.
///
/// Every operation is all-or-nothing: an error means no state was
/// mutated. Nothing is retried internally.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ArenaError {
    #[error("escrowed amount does not match the configured fee")]
    FeeMismatch,

    #[error("move is not one of rock, paper, scissor")]
    InvalidMove,

    #[error("game was never created")]
    GameNotStarted,

    #[error("game is not live")]
    GameNotLive,

    #[error("game deadline has passed")]
    GameExpired,

    #[error("game deadline has not passed yet")]
    GameNotExpired,

    #[error("game already has an opponent")]
    GameFull,

    #[error("no opponent has joined yet")]
    NoOpponent,

    #[error("caller is not the game creator")]
    NotCreator,

    #[error("revealed move does not match the commitment")]
    CommitmentMismatch,

    #[error("creator has not revealed a move")]
    MoveNotRevealed,

    #[error("game is already finalized")]
    AlreadyFinalized,
}
