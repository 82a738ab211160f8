//! In-memory ledger for testing and the demo service.

use super::traits::ValueTransfer;
use crate::arena::PlayerId;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

type TransferHook = Arc<dyn Fn(&PlayerId, u64) + Send + Sync>;

/// In-memory mock of the value-transfer collaborator.
///
/// Clones share one underlying ledger. Tests can mark recipients whose
/// transfers fail, and install a hook that runs from inside `transfer`
/// to model an adversarial recipient calling back into the arena.
#[derive(Clone, Default)]
pub struct MockLedger {
    balances: Arc<Mutex<HashMap<PlayerId, u64>>>,
    failing: Arc<Mutex<HashSet<PlayerId>>>,
    on_transfer: Arc<Mutex<Option<TransferHook>>>,
}

impl MockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a player with an initial balance
    pub fn register(&self, player: PlayerId, initial_balance: u64) {
        self.balances.lock().unwrap().insert(player, initial_balance);
    }

    /// Current balance, zero for unknown players
    pub fn balance(&self, player: &PlayerId) -> u64 {
        self.balances
            .lock()
            .unwrap()
            .get(player)
            .copied()
            .unwrap_or(0)
    }

    /// Add funds to a player
    pub fn credit(&self, player: &PlayerId, amount: u64) {
        *self.balances.lock().unwrap().entry(*player).or_insert(0) += amount;
    }

    /// Remove funds from a player; returns false if the balance is short
    pub fn debit(&self, player: &PlayerId, amount: u64) -> bool {
        let mut balances = self.balances.lock().unwrap();
        match balances.get_mut(player) {
            Some(balance) if *balance >= amount => {
                *balance -= amount;
                true
            }
            _ => false,
        }
    }

    /// Make every transfer to this recipient report failure
    pub fn fail_transfers_to(&self, player: PlayerId) {
        self.failing.lock().unwrap().insert(player);
    }

    /// Install a hook invoked synchronously from inside `transfer`, after
    /// the recipient has been credited and before `transfer` returns.
    pub fn set_transfer_hook(&self, hook: impl Fn(&PlayerId, u64) + Send + Sync + 'static) {
        *self.on_transfer.lock().unwrap() = Some(Arc::new(hook));
    }
}

impl ValueTransfer for MockLedger {
    fn transfer(&self, recipient: &PlayerId, amount: u64) -> bool {
        if self.failing.lock().unwrap().contains(recipient) {
            return false;
        }
        self.credit(recipient, amount);

        // The recipient acts before the transfer returns. The hook runs
        // with no ledger lock held, so it may block or call back freely
        // while transfers proceed on other threads.
        let hook = self.on_transfer.lock().unwrap().clone();
        if let Some(hook) = hook {
            hook(recipient, amount);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_balance() {
        let ledger = MockLedger::new();
        let player = PlayerId::new();

        assert_eq!(ledger.balance(&player), 0);
        ledger.register(player, 500);
        assert_eq!(ledger.balance(&player), 500);
    }

    #[test]
    fn test_debit_insufficient_funds() {
        let ledger = MockLedger::new();
        let player = PlayerId::new();
        ledger.register(player, 100);

        assert!(!ledger.debit(&player, 101));
        assert_eq!(ledger.balance(&player), 100);
        assert!(ledger.debit(&player, 100));
        assert_eq!(ledger.balance(&player), 0);
    }

    #[test]
    fn test_transfer_credits_recipient() {
        let ledger = MockLedger::new();
        let player = PlayerId::new();

        assert!(ledger.transfer(&player, 250));
        assert_eq!(ledger.balance(&player), 250);
    }

    #[test]
    fn test_failing_recipient() {
        let ledger = MockLedger::new();
        let player = PlayerId::new();
        ledger.fail_transfers_to(player);

        assert!(!ledger.transfer(&player, 250));
        assert_eq!(ledger.balance(&player), 0);
    }

    #[test]
    fn test_hook_runs_after_credit() {
        let ledger = MockLedger::new();
        let player = PlayerId::new();

        let seen = Arc::new(Mutex::new(None));
        let seen_in_hook = seen.clone();
        let ledger_in_hook = ledger.clone();
        ledger.set_transfer_hook(move |recipient, _amount| {
            *seen_in_hook.lock().unwrap() = Some(ledger_in_hook.balance(recipient));
        });

        assert!(ledger.transfer(&player, 42));
        assert_eq!(*seen.lock().unwrap(), Some(42));
    }
}
