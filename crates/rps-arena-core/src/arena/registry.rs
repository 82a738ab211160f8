//! Game registry: record ownership and per-game state transitions.

use super::game::{Game, GameId, GameStatus, PlayerId};
use crate::crypto::{MoveCommitment, Nonce};
use crate::error::ArenaError;
use crate::moves::Move;
use chrono::{DateTime, Duration, Utc};

/// Owns the arena of game records, keyed by monotonically increasing index.
#[derive(Default)]
pub struct GameRegistry {
    games: Vec<Game>,
}

impl GameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: GameId) -> Option<&Game> {
        self.games.get(id.index() as usize)
    }

    fn get_mut(&mut self, id: GameId) -> Option<&mut Game> {
        self.games.get_mut(id.index() as usize)
    }

    /// Status of an identifier; `NotStarted` for one never allocated
    pub fn status_of(&self, id: GameId) -> GameStatus {
        self.get(id).map(|g| g.status).unwrap_or(GameStatus::NotStarted)
    }

    /// Allocate the next identifier and store a live record.
    pub fn create(
        &mut self,
        creator: PlayerId,
        commitment: MoveCommitment,
        now: DateTime<Utc>,
    ) -> GameId {
        let id = GameId::from_index(self.games.len() as u64);
        self.games.push(Game::open(creator, commitment, now));
        id
    }

    /// Fill the opponent slot. The slot and the opponent's move are set
    /// together; only one join can ever succeed per game.
    pub fn join(
        &mut self,
        id: GameId,
        opponent: PlayerId,
        mv: Move,
        now: DateTime<Utc>,
        max_duration: Duration,
    ) -> Result<(), ArenaError> {
        let game = self.get_mut(id).ok_or(ArenaError::GameNotLive)?;
        if game.status != GameStatus::Live {
            return Err(ArenaError::GameNotLive);
        }
        if game.is_expired(now, max_duration) {
            return Err(ArenaError::GameExpired);
        }
        if game.opponent.is_some() {
            return Err(ArenaError::GameFull);
        }
        game.opponent = Some(opponent);
        game.opponent_move = Some(mv);
        Ok(())
    }

    /// Record the creator's move after verifying it against the original
    /// commitment. A failed attempt changes nothing and may be retried;
    /// every attempt is checked against the commitment stored at create
    /// time, which is never overwritten.
    pub fn reveal(
        &mut self,
        id: GameId,
        caller: PlayerId,
        mv: Move,
        nonce: &Nonce,
    ) -> Result<(), ArenaError> {
        let game = self.get_mut(id).ok_or(ArenaError::GameNotLive)?;
        if game.status != GameStatus::Live {
            return Err(ArenaError::GameNotLive);
        }
        if game.opponent.is_none() {
            return Err(ArenaError::NoOpponent);
        }
        if caller != game.creator {
            return Err(ArenaError::NotCreator);
        }
        if !game.creator_commitment.verify(&caller, mv, nonce) {
            return Err(ArenaError::CommitmentMismatch);
        }
        game.creator_move = Some(mv);
        Ok(())
    }

    /// Transition a live record to `Ended`. Terminal; called exactly once
    /// per record by the settlement engine.
    pub(crate) fn end(&mut self, id: GameId) {
        if let Some(game) = self.get_mut(id) {
            debug_assert_eq!(game.status, GameStatus::Live);
            game.status = GameStatus::Ended;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
    }

    fn commitment_for(player: &PlayerId, mv: Move) -> (MoveCommitment, Nonce) {
        let nonce = Nonce::random();
        (MoveCommitment::new(player, mv, &nonce), nonce)
    }

    #[test]
    fn test_ids_are_sequential_and_never_reused() {
        let mut registry = GameRegistry::new();
        let creator = PlayerId::new();
        let (commitment, _) = commitment_for(&creator, Move::Rock);

        let a = registry.create(creator, commitment, t0());
        let b = registry.create(creator, commitment, t0());
        registry.end(a);
        let c = registry.create(creator, commitment, t0());

        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(c.index(), 2);
    }

    #[test]
    fn test_status_of_unallocated_is_not_started() {
        let registry = GameRegistry::new();
        assert_eq!(
            registry.status_of(GameId::from_index(7)),
            GameStatus::NotStarted
        );
    }

    #[test]
    fn test_only_one_join_succeeds() {
        let mut registry = GameRegistry::new();
        let creator = PlayerId::new();
        let (commitment, _) = commitment_for(&creator, Move::Rock);
        let id = registry.create(creator, commitment, t0());

        let first = PlayerId::new();
        let second = PlayerId::new();
        registry
            .join(id, first, Move::Paper, t0(), Duration::hours(48))
            .unwrap();
        assert_eq!(
            registry.join(id, second, Move::Scissor, t0(), Duration::hours(48)),
            Err(ArenaError::GameFull)
        );

        let game = registry.get(id).unwrap();
        assert_eq!(game.opponent, Some(first));
        assert_eq!(game.opponent_move, Some(Move::Paper));
    }

    #[test]
    fn test_join_after_deadline_fails() {
        let mut registry = GameRegistry::new();
        let creator = PlayerId::new();
        let (commitment, _) = commitment_for(&creator, Move::Rock);
        let id = registry.create(creator, commitment, t0());

        let late = t0() + Duration::hours(48);
        assert_eq!(
            registry.join(id, PlayerId::new(), Move::Paper, late, Duration::hours(48)),
            Err(ArenaError::GameExpired)
        );
    }

    #[test]
    fn test_reveal_requires_opponent_and_creator() {
        let mut registry = GameRegistry::new();
        let creator = PlayerId::new();
        let (commitment, nonce) = commitment_for(&creator, Move::Rock);
        let id = registry.create(creator, commitment, t0());

        assert_eq!(
            registry.reveal(id, creator, Move::Rock, &nonce),
            Err(ArenaError::NoOpponent)
        );

        registry
            .join(id, PlayerId::new(), Move::Paper, t0(), Duration::hours(48))
            .unwrap();
        assert_eq!(
            registry.reveal(id, PlayerId::new(), Move::Rock, &nonce),
            Err(ArenaError::NotCreator)
        );
        registry.reveal(id, creator, Move::Rock, &nonce).unwrap();
        assert_eq!(registry.get(id).unwrap().creator_move, Some(Move::Rock));
    }

    #[test]
    fn test_failed_reveal_changes_nothing_and_can_be_retried() {
        let mut registry = GameRegistry::new();
        let creator = PlayerId::new();
        let (commitment, nonce) = commitment_for(&creator, Move::Scissor);
        let id = registry.create(creator, commitment, t0());
        registry
            .join(id, PlayerId::new(), Move::Rock, t0(), Duration::hours(48))
            .unwrap();

        // Wrong move first, then wrong nonce: both rejected against the
        // original commitment.
        assert_eq!(
            registry.reveal(id, creator, Move::Rock, &nonce),
            Err(ArenaError::CommitmentMismatch)
        );
        assert_eq!(
            registry.reveal(id, creator, Move::Scissor, &Nonce::random()),
            Err(ArenaError::CommitmentMismatch)
        );
        assert_eq!(registry.get(id).unwrap().creator_move, None);

        registry.reveal(id, creator, Move::Scissor, &nonce).unwrap();
        assert_eq!(registry.get(id).unwrap().creator_move, Some(Move::Scissor));
    }
}
