// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Contract code and the per-frame execution context.

use std::fmt;

use alloy::primitives::{Address, Bytes, U256};

use super::Chain;

/// Code installed at an address.
///
/// Contracts hold no state of their own: everything persistent goes
/// through [`CallContext::sload`] / [`CallContext::sstore`] so that it is
/// journaled and rolled back with the frame that wrote it.
pub trait Contract: fmt::Debug + Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Run once at deployment with the constructor arguments.
    ///
    /// Failing here aborts the deployment.
    fn construct(&self, _ctx: &mut CallContext<'_>, _args: &[u8]) -> Result<(), Bytes> {
        Ok(())
    }

    /// Handle a call. `Err` carries the raw failure data.
    fn call(&self, ctx: &mut CallContext<'_>, input: &[u8]) -> Result<Bytes, Bytes>;
}

/// What a contract sees while one of its frames runs.
pub struct CallContext<'a> {
    chain: &'a mut Chain,
    address: Address,
    caller: Address,
    value: U256,
    depth: usize,
}

impl<'a> CallContext<'a> {
    pub(super) fn new(
        chain: &'a mut Chain,
        address: Address,
        caller: Address,
        value: U256,
        depth: usize,
    ) -> Self {
        Self {
            chain,
            address,
            caller,
            value,
            depth,
        }
    }

    /// Address of the executing contract.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Authenticated identity that issued this call.
    pub fn caller(&self) -> Address {
        self.caller
    }

    /// Value attached to this call (already credited to `address()`).
    pub fn value(&self) -> U256 {
        self.value
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn balance(&self, address: Address) -> U256 {
        self.chain.state.balance(address)
    }

    pub fn self_balance(&self) -> U256 {
        self.balance(self.address)
    }

    /// Read a storage slot of the executing contract.
    pub fn sload(&self, slot: U256) -> U256 {
        self.chain.state.sload(self.address, slot)
    }

    /// Write a storage slot of the executing contract.
    pub fn sstore(&mut self, slot: U256, value: U256) {
        self.chain.state.sstore(self.address, slot, value);
    }

    /// Call `target` from this contract, sending `value` from its balance.
    ///
    /// The nested call is atomic: on `Err` every effect it had, including
    /// the value transfer, has already been undone. Running out of balance
    /// or call depth fails with empty data.
    pub fn call(&mut self, target: Address, value: U256, input: &[u8]) -> Result<Bytes, Bytes> {
        self.chain
            .call_frame(self.address, target, value, input, self.depth + 1)
    }
}

impl fmt::Debug for CallContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallContext")
            .field("address", &self.address)
            .field("caller", &self.caller)
            .field("value", &self.value)
            .field("depth", &self.depth)
            .finish()
    }
}
