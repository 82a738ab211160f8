//! Value transfer trait definition.

use crate::arena::PlayerId;

/// Trait for the value-transfer collaborator that delivers payouts.
///
/// The recipient of a transfer is an active collaborator, not inert
/// storage: an implementation may synchronously call back into the arena
/// from inside `transfer` before returning. The settlement engine commits
/// all internal state before invoking this, issues at most one transfer
/// per recipient per finalize, and never retries a failed transfer.
pub trait ValueTransfer: Send + Sync {
    /// Deliver `amount` to `recipient`. A `false` return means delivery
    /// failed on the collaborator side; the caller's committed state is
    /// not rolled back.
    fn transfer(&self, recipient: &PlayerId, amount: u64) -> bool;
}
