// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Journaled world state.
//!
//! Every balance and storage write records the value it replaced. A
//! checkpoint is the journal length at some point in time; reverting to it
//! undoes the recorded writes newest-first, which restores the exact state
//! observed when the checkpoint was taken.

use std::collections::HashMap;

use alloy::primitives::{Address, U256};

/// Position in the journal that state can be reverted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(usize);

#[derive(Debug, Clone)]
enum JournalEntry {
    Balance {
        address: Address,
        previous: U256,
    },
    Storage {
        address: Address,
        slot: U256,
        previous: Option<U256>,
    },
}

/// Account balances and contract storage with undo support.
#[derive(Debug, Default)]
pub struct WorldState {
    balances: HashMap<Address, U256>,
    storage: HashMap<Address, HashMap<U256, U256>>,
    journal: Vec<JournalEntry>,
}

impl WorldState {
    pub fn balance(&self, address: Address) -> U256 {
        self.balances.get(&address).copied().unwrap_or_default()
    }

    pub fn set_balance(&mut self, address: Address, balance: U256) {
        let previous = self.balance(address);
        self.journal.push(JournalEntry::Balance { address, previous });
        self.balances.insert(address, balance);
    }

    pub fn sload(&self, address: Address, slot: U256) -> U256 {
        self.storage
            .get(&address)
            .and_then(|slots| slots.get(&slot))
            .copied()
            .unwrap_or_default()
    }

    pub fn sstore(&mut self, address: Address, slot: U256, value: U256) {
        let previous = self.storage.entry(address).or_default().insert(slot, value);
        self.journal.push(JournalEntry::Storage {
            address,
            slot,
            previous,
        });
    }

    /// Move `amount` from one account to another.
    ///
    /// Returns `false` without touching state when `from` cannot cover it.
    pub fn transfer(&mut self, from: Address, to: Address, amount: U256) -> bool {
        if amount.is_zero() {
            return true;
        }
        let Some(remaining) = self.balance(from).checked_sub(amount) else {
            return false;
        };
        self.set_balance(from, remaining);
        let credited = self.balance(to).saturating_add(amount);
        self.set_balance(to, credited);
        true
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.journal.len())
    }

    /// Undo every write made after `checkpoint`.
    pub fn revert_to(&mut self, checkpoint: Checkpoint) {
        while self.journal.len() > checkpoint.0 {
            let Some(entry) = self.journal.pop() else {
                break;
            };
            match entry {
                JournalEntry::Balance { address, previous } => {
                    self.balances.insert(address, previous);
                }
                JournalEntry::Storage {
                    address,
                    slot,
                    previous,
                } => {
                    let slots = self.storage.entry(address).or_default();
                    match previous {
                        Some(value) => {
                            slots.insert(slot, value);
                        }
                        None => {
                            slots.remove(&slot);
                        }
                    }
                }
            }
        }
    }

    /// Make all journaled writes permanent.
    pub fn commit(&mut self) {
        self.journal.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(byte: u8) -> Address {
        Address::repeat_byte(byte)
    }

    #[test]
    fn unknown_accounts_read_as_zero() {
        let state = WorldState::default();
        assert_eq!(state.balance(addr(1)), U256::ZERO);
        assert_eq!(state.sload(addr(1), U256::ZERO), U256::ZERO);
    }

    #[test]
    fn transfer_moves_exact_amount() {
        let mut state = WorldState::default();
        state.set_balance(addr(1), U256::from(100u64));

        assert!(state.transfer(addr(1), addr(2), U256::from(30u64)));
        assert_eq!(state.balance(addr(1)), U256::from(70u64));
        assert_eq!(state.balance(addr(2)), U256::from(30u64));
    }

    #[test]
    fn transfer_rejects_overdraft_without_side_effects() {
        let mut state = WorldState::default();
        state.set_balance(addr(1), U256::from(10u64));
        let checkpoint = state.checkpoint();

        assert!(!state.transfer(addr(1), addr(2), U256::from(11u64)));
        assert_eq!(state.checkpoint(), checkpoint);
        assert_eq!(state.balance(addr(1)), U256::from(10u64));
    }

    #[test]
    fn revert_restores_balances_and_storage() {
        let mut state = WorldState::default();
        state.set_balance(addr(1), U256::from(50u64));
        state.sstore(addr(9), U256::ZERO, U256::from(7u64));
        state.commit();

        let checkpoint = state.checkpoint();
        state.transfer(addr(1), addr(2), U256::from(20u64));
        state.sstore(addr(9), U256::ZERO, U256::from(8u64));
        state.sstore(addr(9), U256::from(1u64), U256::from(3u64));
        state.revert_to(checkpoint);

        assert_eq!(state.balance(addr(1)), U256::from(50u64));
        assert_eq!(state.balance(addr(2)), U256::ZERO);
        assert_eq!(state.sload(addr(9), U256::ZERO), U256::from(7u64));
        assert_eq!(state.sload(addr(9), U256::from(1u64)), U256::ZERO);
    }

    #[test]
    fn nested_checkpoints_revert_independently() {
        let mut state = WorldState::default();
        let outer = state.checkpoint();
        state.sstore(addr(9), U256::ZERO, U256::from(1u64));

        let inner = state.checkpoint();
        state.sstore(addr(9), U256::ZERO, U256::from(2u64));
        state.revert_to(inner);
        assert_eq!(state.sload(addr(9), U256::ZERO), U256::from(1u64));

        state.revert_to(outer);
        assert_eq!(state.sload(addr(9), U256::ZERO), U256::ZERO);
    }
}
