// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-process execution environment.
//!
//! This module provides the guarantees the account relies on:
//! - Every call carries an authenticated caller identity
//! - Every call frame is atomic (journaled, reverted on failure)
//! - Value moves alongside calls
//! - Accounts without code accept value unconditionally

pub mod contract;
pub mod journal;
pub mod types;

use std::collections::HashMap;
use std::sync::Arc;

use alloy::primitives::{keccak256, Address, Bytes, U256};

use crate::config::ChainConfig;

pub use contract::{CallContext, Contract};
pub use journal::{Checkpoint, WorldState};
pub use types::*;

/// Errors surfaced to whoever submits a transaction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChainError {
    #[error("Insufficient balance for {address}: need {needed}, have {available}")]
    InsufficientBalance {
        address: Address,
        needed: U256,
        available: U256,
    },

    #[error("Execution reverted with {} bytes of data", .0.len())]
    Reverted(Bytes),

    #[error("Contract already deployed at {0}")]
    AddressCollision(Address),
}

/// A single-threaded chain holding balances, storage and contract code.
///
/// Operations run one at a time to completion; `&mut self` on every
/// state-changing method enforces that.
#[derive(Debug, Default)]
pub struct Chain {
    config: ChainConfig,
    state: WorldState,
    code: HashMap<Address, Arc<dyn Contract>>,
    nonces: HashMap<Address, u64>,
    trace: Vec<CallRecord>,
}

impl Chain {
    pub fn new(config: ChainConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Build a chain configured from the environment.
    pub fn from_env() -> Self {
        Self::new(ChainConfig::from_env())
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    pub fn balance_of(&self, address: Address) -> U256 {
        self.state.balance(address)
    }

    /// Credit `amount` to `address` outside of any transaction.
    pub fn fund(&mut self, address: Address, amount: U256) {
        let balance = self.state.balance(address).saturating_add(amount);
        self.state.set_balance(address, balance);
        self.state.commit();
        tracing::debug!(%address, amount = %format_ether(amount), "Funded account");
    }

    /// Read a storage slot of any account.
    pub fn storage_at(&self, address: Address, slot: U256) -> U256 {
        self.state.sload(address, slot)
    }

    pub fn has_code(&self, address: Address) -> bool {
        self.code.contains_key(&address)
    }

    /// Number of deployments made by `address`.
    pub fn nonce(&self, address: Address) -> u64 {
        self.nonces.get(&address).copied().unwrap_or_default()
    }

    /// Frames of the most recent transaction, deployment or view.
    pub fn trace(&self) -> &[CallRecord] {
        &self.trace
    }

    /// The most recent trace as a JSON array.
    pub fn trace_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.trace)
    }

    /// Install `contract` at a fresh address and run its constructor.
    ///
    /// The address is derived from the deployer and its nonce. The nonce
    /// advances even when the constructor fails; nothing else survives a
    /// failed deployment.
    pub fn deploy<C>(
        &mut self,
        deployer: Address,
        contract: C,
        constructor_args: &[u8],
    ) -> Result<Address, ChainError>
    where
        C: Contract + 'static,
    {
        let nonce = self.nonces.entry(deployer).or_default();
        let address = contract_address(deployer, *nonce);
        *nonce += 1;

        if self.code.contains_key(&address) {
            return Err(ChainError::AddressCollision(address));
        }

        self.trace.clear();
        let contract: Arc<dyn Contract> = Arc::new(contract);
        self.code.insert(address, Arc::clone(&contract));

        let checkpoint = self.state.checkpoint();
        let result = {
            let mut ctx = CallContext::new(self, address, deployer, U256::ZERO, 0);
            contract.construct(&mut ctx, constructor_args)
        };

        match result {
            Ok(()) => {
                self.state.commit();
                tracing::info!(
                    %address,
                    %deployer,
                    contract = contract.name(),
                    "Contract deployed"
                );
                Ok(address)
            }
            Err(data) => {
                self.state.revert_to(checkpoint);
                self.state.commit();
                self.code.remove(&address);
                tracing::warn!(
                    %deployer,
                    contract = contract.name(),
                    revert_data = %data,
                    "Constructor reverted"
                );
                Err(ChainError::Reverted(data))
            }
        }
    }

    /// Submit a top-level call as one atomic unit of work.
    ///
    /// On success every effect is committed and the callee's return data
    /// is returned. On failure nothing changes, and the callee's raw
    /// failure data is returned in [`ChainError::Reverted`].
    pub fn transact(
        &mut self,
        from: Address,
        to: Address,
        value: U256,
        input: &[u8],
    ) -> Result<Bytes, ChainError> {
        let available = self.state.balance(from);
        if available < value {
            return Err(ChainError::InsufficientBalance {
                address: from,
                needed: value,
                available,
            });
        }

        self.trace.clear();
        let checkpoint = self.state.checkpoint();
        let result = self.call_frame(from, to, value, input, 0);
        if result.is_err() {
            self.state.revert_to(checkpoint);
        }
        self.state.commit();

        result.map_err(ChainError::Reverted)
    }

    /// Run a call and discard all of its state changes.
    pub fn view(&mut self, from: Address, to: Address, input: &[u8]) -> Result<Bytes, ChainError> {
        self.trace.clear();
        let checkpoint = self.state.checkpoint();
        let result = self.call_frame(from, to, U256::ZERO, input, 0);
        self.state.revert_to(checkpoint);

        result.map_err(ChainError::Reverted)
    }

    /// Execute one call frame at `depth`.
    fn call_frame(
        &mut self,
        caller: Address,
        target: Address,
        value: U256,
        input: &[u8],
        depth: usize,
    ) -> Result<Bytes, Bytes> {
        let checkpoint = self.state.checkpoint();
        let result = self.run_frame(caller, target, value, input, depth);
        if result.is_err() {
            self.state.revert_to(checkpoint);
        }

        let (success, output) = match &result {
            Ok(data) => (true, data.clone()),
            Err(data) => (false, data.clone()),
        };
        self.trace.push(CallRecord {
            depth,
            caller,
            target,
            value,
            input: Bytes::copy_from_slice(input),
            success,
            output,
        });

        result
    }

    fn run_frame(
        &mut self,
        caller: Address,
        target: Address,
        value: U256,
        input: &[u8],
        depth: usize,
    ) -> Result<Bytes, Bytes> {
        if depth >= self.config.max_call_depth {
            tracing::warn!(%caller, %target, depth, "Call depth exceeded");
            return Err(Bytes::new());
        }

        if !self.state.transfer(caller, target, value) {
            tracing::debug!(
                %caller,
                %target,
                value = %format_ether(value),
                "Insufficient balance for nested call"
            );
            return Err(Bytes::new());
        }

        let Some(contract) = self.code.get(&target).cloned() else {
            // Plain accounts accept any call and any value.
            return Ok(Bytes::new());
        };

        tracing::debug!(
            %caller,
            %target,
            contract = contract.name(),
            depth,
            value = %format_ether(value),
            "Entering call frame"
        );

        let mut ctx = CallContext::new(self, target, caller, value, depth);
        let result = contract.call(&mut ctx, input);

        if let Err(data) = &result {
            tracing::debug!(%target, depth, revert_data = %data, "Call frame reverted");
        }
        result
    }
}

/// Deterministic contract address for the `nonce`-th deployment of `deployer`.
fn contract_address(deployer: Address, nonce: u64) -> Address {
    let mut preimage = Vec::with_capacity(28);
    preimage.extend_from_slice(deployer.as_slice());
    preimage.extend_from_slice(&nonce.to_be_bytes());
    Address::from_word(keccak256(preimage))
}
