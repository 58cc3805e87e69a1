// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Typed access to a deployed account.

use alloy::{
    primitives::{Address, Bytes, U256},
    sol_types::{SolCall, SolValue},
};

use super::{BasicAccount, IBasicAccount};
use crate::chain::Chain;
use crate::error::AccountError;

/// Handle to an account deployed on a [`Chain`].
///
/// Encodes calls, submits them as transactions from a given caller and
/// decodes returns and failures into [`AccountError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountClient {
    address: Address,
}

impl AccountClient {
    /// Deploy a new account owned by `initial_owner`.
    pub fn deploy(
        chain: &mut Chain,
        deployer: Address,
        initial_owner: Address,
    ) -> Result<Self, AccountError> {
        let address = chain.deploy(deployer, BasicAccount, &initial_owner.abi_encode())?;
        Ok(Self { address })
    }

    /// Wrap an already deployed account.
    pub fn at(address: Address) -> Self {
        Self { address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn balance(&self, chain: &Chain) -> U256 {
        chain.balance_of(self.address)
    }

    /// Current owner.
    pub fn owner(&self, chain: &mut Chain) -> Result<Address, AccountError> {
        let input = IBasicAccount::ownerCall {}.abi_encode();
        let out = chain.view(Address::ZERO, self.address, &input)?;
        Address::abi_decode(&out).map_err(|e| AccountError::Decode(e.to_string()))
    }

    /// Forward a call to `target` as `caller`, sending `value` from the
    /// account's balance. Returns the target's raw return data.
    pub fn execute(
        &self,
        chain: &mut Chain,
        caller: Address,
        target: Address,
        value: U256,
        data: impl Into<Bytes>,
    ) -> Result<Bytes, AccountError> {
        let input = IBasicAccount::executeCall {
            target,
            value,
            data: data.into(),
        }
        .abi_encode();

        let out = chain.transact(caller, self.address, U256::ZERO, &input)?;
        Bytes::abi_decode(&out).map_err(|e| AccountError::Decode(e.to_string()))
    }

    /// Hand ownership to `new_owner` as `caller`.
    pub fn set_owner(
        &self,
        chain: &mut Chain,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), AccountError> {
        let input = IBasicAccount::setOwnerCall {
            newOwner: new_owner,
        }
        .abi_encode();

        chain.transact(caller, self.address, U256::ZERO, &input)?;
        Ok(())
    }

    /// Send `amount` to the account with no payload.
    pub fn deposit(
        &self,
        chain: &mut Chain,
        from: Address,
        amount: U256,
    ) -> Result<(), AccountError> {
        chain.transact(from, self.address, amount, &[])?;
        Ok(())
    }
}
