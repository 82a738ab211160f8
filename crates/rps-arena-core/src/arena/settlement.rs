//! Settlement math: payout amounts and draw-carryover pool accounting.
//!
//! Pure functions over (outcome, fee, pool) so the arithmetic is
//! testable without a store or a transfer collaborator.

use super::game::PlayerId;
use crate::moves::Outcome;

/// A single payout owed to a recipient.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Payout {
    pub recipient: PlayerId,
    pub amount: u64,
}

/// Payouts plus the pool balance after settling one game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settlement {
    pub payouts: Vec<Payout>,
    pub pool_after: u64,
}

/// Settle a game where both moves are known.
///
/// Draw: each slot is refunded `fee / 2` and the pool grows by
/// `fee + (fee % 2) * 2`. This is the original accounting, kept verbatim:
/// with an odd fee the pool gains one unit more than the undistributed
/// remainder, and callers relying on the published rules expect exactly
/// that number.
///
/// Decisive: the winner takes `2 * fee` plus the entire pool, and the
/// pool resets to zero in the same step.
pub fn settle(
    outcome: Outcome,
    creator: PlayerId,
    opponent: PlayerId,
    fee: u64,
    pool: u64,
) -> Settlement {
    let settlement = match outcome {
        Outcome::Draw => Settlement {
            payouts: vec![
                Payout {
                    recipient: creator,
                    amount: fee / 2,
                },
                Payout {
                    recipient: opponent,
                    amount: fee / 2,
                },
            ],
            pool_after: pool + fee + (fee % 2) * 2,
        },
        Outcome::CreatorWins => Settlement {
            payouts: vec![Payout {
                recipient: creator,
                amount: 2 * fee + pool,
            }],
            pool_after: 0,
        },
        Outcome::OpponentWins => Settlement {
            payouts: vec![Payout {
                recipient: opponent,
                amount: 2 * fee + pool,
            }],
            pool_after: 0,
        },
    };
    merge_payouts(settlement)
}

/// Settle an expired game that never got an opponent: the creator's full
/// stake comes back and the pool is untouched.
pub fn refund_expired(creator: PlayerId, fee: u64, pool: u64) -> Settlement {
    Settlement {
        payouts: vec![Payout {
            recipient: creator,
            amount: fee,
        }],
        pool_after: pool,
    }
}

/// Coalesce payouts to the same recipient into one transfer, so a
/// recipient is paid at most once per finalize even when it occupies
/// both slots of a drawn game.
fn merge_payouts(mut settlement: Settlement) -> Settlement {
    let mut merged: Vec<Payout> = Vec::with_capacity(settlement.payouts.len());
    for payout in settlement.payouts.drain(..) {
        match merged.iter_mut().find(|p| p.recipient == payout.recipient) {
            Some(existing) => existing.amount += payout.amount,
            None => merged.push(payout),
        }
    }
    settlement.payouts = merged;
    settlement
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_even_fee() {
        let (a, b) = (PlayerId::new(), PlayerId::new());
        let s = settle(Outcome::Draw, a, b, 100, 0);

        assert_eq!(
            s.payouts,
            vec![
                Payout { recipient: a, amount: 50 },
                Payout { recipient: b, amount: 50 },
            ]
        );
        assert_eq!(s.pool_after, 100);
    }

    #[test]
    fn test_draw_odd_fee_pool_accounting() {
        let (a, b) = (PlayerId::new(), PlayerId::new());
        let s = settle(Outcome::Draw, a, b, 101, 0);

        // 101 / 2 = 50 each, pool += 101 + (101 % 2) * 2 = 103
        assert_eq!(s.payouts[0].amount, 50);
        assert_eq!(s.payouts[1].amount, 50);
        assert_eq!(s.pool_after, 103);
    }

    #[test]
    fn test_draw_accumulates_existing_pool() {
        let (a, b) = (PlayerId::new(), PlayerId::new());
        let s = settle(Outcome::Draw, a, b, 100, 250);
        assert_eq!(s.pool_after, 350);
    }

    #[test]
    fn test_decisive_win_drains_pool_whole() {
        let (a, b) = (PlayerId::new(), PlayerId::new());

        let s = settle(Outcome::CreatorWins, a, b, 100, 103);
        assert_eq!(s.payouts, vec![Payout { recipient: a, amount: 303 }]);
        assert_eq!(s.pool_after, 0);

        let s = settle(Outcome::OpponentWins, a, b, 100, 103);
        assert_eq!(s.payouts, vec![Payout { recipient: b, amount: 303 }]);
        assert_eq!(s.pool_after, 0);
    }

    #[test]
    fn test_decisive_win_empty_pool() {
        let (a, b) = (PlayerId::new(), PlayerId::new());
        let s = settle(Outcome::CreatorWins, a, b, 100, 0);
        assert_eq!(s.payouts, vec![Payout { recipient: a, amount: 200 }]);
    }

    #[test]
    fn test_refund_expired_leaves_pool() {
        let a = PlayerId::new();
        let s = refund_expired(a, 100, 77);
        assert_eq!(s.payouts, vec![Payout { recipient: a, amount: 100 }]);
        assert_eq!(s.pool_after, 77);
    }

    #[test]
    fn test_same_player_in_both_slots_paid_once() {
        let a = PlayerId::new();
        let s = settle(Outcome::Draw, a, a, 100, 0);
        assert_eq!(s.payouts, vec![Payout { recipient: a, amount: 100 }]);
    }
}
