//! Game registry and settlement engine behind one shared handle.

mod game;
mod registry;
mod settlement;

pub use game::{Game, GameEvent, GameId, GameStatus, PlayerId};
pub use registry::GameRegistry;
pub use settlement::{refund_expired, settle, Payout, Settlement};

use crate::config::ArenaConfig;
use crate::crypto::{MoveCommitment, Nonce};
use crate::error::ArenaError;
use crate::moves::{Move, Outcome};
use crate::transfer::ValueTransfer;
use chrono::{DateTime, Utc};
use std::cell::Cell;
use std::sync::{Arc, Mutex};

thread_local! {
    /// Set while a transfer is in flight on this thread's call stack.
    /// Per-thread on purpose: the guard exists to stop a recipient from
    /// re-entering the arena during its own payout, not to serialize
    /// unrelated settlements running on other threads.
    static TRANSFER_IN_FLIGHT: Cell<bool> = const { Cell::new(false) };
}

/// Shared handle to the game registry and settlement engine.
///
/// Clones share one underlying store. Every mutation commits under the
/// store lock before any external transfer is issued, so a transfer
/// recipient calling back into the arena always observes fully settled
/// state.
#[derive(Clone)]
pub struct Arena {
    inner: Arc<Mutex<ArenaInner>>,
    transfer: Arc<dyn ValueTransfer>,
    config: ArenaConfig,
}

struct ArenaInner {
    registry: GameRegistry,
    pool: u64,
}

impl Arena {
    pub fn new(config: ArenaConfig, transfer: Arc<dyn ValueTransfer>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ArenaInner {
                registry: GameRegistry::new(),
                pool: 0,
            })),
            transfer,
            config,
        }
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// Open a game. The caller has already escrowed `stake`, which must
    /// equal the configured fee exactly.
    pub fn create(
        &self,
        creator: PlayerId,
        commitment: MoveCommitment,
        stake: u64,
        now: DateTime<Utc>,
    ) -> Result<GameId, ArenaError> {
        if stake != self.config.fee {
            return Err(ArenaError::FeeMismatch);
        }
        let id = self
            .inner
            .lock()
            .unwrap()
            .registry
            .create(creator, commitment, now);
        tracing::info!(game = %id, player = %creator, "game created");
        Ok(id)
    }

    /// Fill the opponent slot with a move, escrowing `stake`.
    pub fn join(
        &self,
        id: GameId,
        opponent: PlayerId,
        mv: Move,
        stake: u64,
        now: DateTime<Utc>,
    ) -> Result<(), ArenaError> {
        if stake != self.config.fee {
            return Err(ArenaError::FeeMismatch);
        }
        self.inner
            .lock()
            .unwrap()
            .registry
            .join(id, opponent, mv, now, self.config.max_duration)?;
        tracing::info!(game = %id, player = %opponent, "opponent joined");
        Ok(())
    }

    /// Reveal the creator's committed move.
    pub fn reveal(
        &self,
        id: GameId,
        caller: PlayerId,
        mv: Move,
        nonce: &Nonce,
    ) -> Result<(), ArenaError> {
        self.inner
            .lock()
            .unwrap()
            .registry
            .reveal(id, caller, mv, nonce)?;
        tracing::info!(game = %id, %mv, "creator revealed");
        Ok(())
    }

    /// Settle a game: decide the outcome, commit the terminal state and
    /// pool update, then pay out.
    ///
    /// The record is `Ended` and the pool already updated before the
    /// first transfer goes out, and neither is rolled back if a transfer
    /// fails or the recipient misbehaves mid-transfer.
    pub fn finalize(&self, id: GameId, now: DateTime<Utc>) -> Result<GameEvent, ArenaError> {
        let (event, payouts) = {
            let mut inner = self.inner.lock().unwrap();
            let game = match inner.registry.get(id) {
                Some(game) => game,
                None => return Err(ArenaError::GameNotStarted),
            };
            if game.status == GameStatus::Ended {
                return Err(ArenaError::AlreadyFinalized);
            }
            let fee = self.config.fee;
            let creator = game.creator;

            match game.opponent {
                Some(opponent) => {
                    let creator_move = game.creator_move.ok_or(ArenaError::MoveNotRevealed)?;
                    // Set atomically with the opponent slot at join time.
                    let opponent_move = game.opponent_move.ok_or(ArenaError::MoveNotRevealed)?;

                    let outcome = Outcome::of(creator_move, opponent_move);
                    let pool_before = inner.pool;
                    let settled = settle(outcome, creator, opponent, fee, pool_before);

                    inner.registry.end(id);
                    inner.pool = settled.pool_after;

                    let event = match outcome {
                        Outcome::Draw => GameEvent::Draw {
                            game_id: id,
                            refund_each: fee / 2,
                            pool_after: settled.pool_after,
                        },
                        Outcome::CreatorWins => GameEvent::Won {
                            game_id: id,
                            winner: creator,
                            amount: 2 * fee + pool_before,
                        },
                        Outcome::OpponentWins => GameEvent::Won {
                            game_id: id,
                            winner: opponent,
                            amount: 2 * fee + pool_before,
                        },
                    };
                    (event, settled.payouts)
                }
                None => {
                    if !game.is_expired(now, self.config.max_duration) {
                        return Err(ArenaError::GameNotExpired);
                    }
                    let settled = refund_expired(creator, fee, inner.pool);
                    inner.registry.end(id);
                    inner.pool = settled.pool_after;
                    let event = GameEvent::Expired {
                        game_id: id,
                        creator,
                        refund: fee,
                    };
                    (event, settled.payouts)
                }
            }
        };

        match &event {
            GameEvent::Won { winner, amount, .. } => {
                tracing::info!(game = %id, %winner, amount, "decisive win")
            }
            GameEvent::Draw {
                refund_each,
                pool_after,
                ..
            } => tracing::info!(game = %id, refund_each, pool_after, "draw"),
            GameEvent::Expired { creator, .. } => {
                tracing::info!(game = %id, %creator, "expired without opponent")
            }
        }

        for payout in &payouts {
            self.pay(&payout.recipient, payout.amount);
        }
        Ok(event)
    }

    /// Whether the game's join/refund deadline has passed.
    pub fn is_expired(&self, id: GameId, now: DateTime<Utc>) -> Result<bool, ArenaError> {
        let inner = self.inner.lock().unwrap();
        let game = inner.registry.get(id).ok_or(ArenaError::GameNotStarted)?;
        Ok(game.is_expired(now, self.config.max_duration))
    }

    /// Snapshot of a game record.
    pub fn game(&self, id: GameId) -> Option<Game> {
        self.inner.lock().unwrap().registry.get(id).cloned()
    }

    /// Status of an identifier; `NotStarted` for one never allocated.
    pub fn status_of(&self, id: GameId) -> GameStatus {
        self.inner.lock().unwrap().registry.status_of(id)
    }

    /// Current draw-carryover pool balance.
    ///
    /// Known limitation of the carryover rules: an actor controlling both
    /// slots of a game through two identities can draw on purpose and
    /// later claim the accumulated pool with a decisive win.
    pub fn pool_balance(&self) -> u64 {
        self.inner.lock().unwrap().pool
    }

    /// Issue one transfer through the collaborator. While a transfer is
    /// in flight on the current call stack, any nested issuance attempt
    /// is dropped, so a recipient cannot redirect or duplicate the
    /// transfer it is receiving. Transfers issued by other threads are
    /// not affected.
    fn pay(&self, recipient: &PlayerId, amount: u64) {
        if amount == 0 {
            return;
        }
        if TRANSFER_IN_FLIGHT.with(|flag| flag.replace(true)) {
            // The outer transfer's flag stays set until it returns.
            tracing::warn!(player = %recipient, amount, "dropped nested transfer attempt");
            return;
        }
        let delivered = self.transfer.transfer(recipient, amount);
        TRANSFER_IN_FLIGHT.with(|flag| flag.set(false));
        if !delivered {
            tracing::warn!(player = %recipient, amount, "transfer failed, committed state stands");
        }
    }
}
