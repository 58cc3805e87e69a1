// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Single-owner call-forwarding account.
//!
//! The account keeps exactly one piece of state, its owner, in storage
//! slot 0. Only the owner may forward calls (`execute`) or hand ownership
//! to someone else (`setOwner`). Empty calls are plain value deposits and
//! always succeed.

pub mod abi;
pub mod client;

use alloy::{
    primitives::{Address, Bytes, B256, U256},
    sol_types::{SolInterface, SolValue},
};

use crate::chain::{CallContext, Contract};

pub use abi::{IBasicAccount, IBasicAccountCalls, IBasicAccountErrors};
pub use client::AccountClient;

/// Storage slot holding the owner address.
pub const OWNER_SLOT: U256 = U256::ZERO;

/// Decode an owner address from its storage word.
pub fn owner_from_word(word: U256) -> Address {
    Address::from_word(B256::from(word.to_be_bytes::<32>()))
}

fn owner_to_word(owner: Address) -> U256 {
    U256::from_be_bytes(owner.into_word().0)
}

/// Account code. Constructor arguments are the ABI-encoded initial owner.
#[derive(Debug, Default, Clone, Copy)]
pub struct BasicAccount;

impl BasicAccount {
    fn owner(ctx: &CallContext<'_>) -> Address {
        owner_from_word(ctx.sload(OWNER_SLOT))
    }

    fn store_owner(ctx: &mut CallContext<'_>, owner: Address) {
        ctx.sstore(OWNER_SLOT, owner_to_word(owner));
    }

    fn only_owner(ctx: &CallContext<'_>) -> Result<(), IBasicAccountErrors> {
        let owner = Self::owner(ctx);
        if ctx.caller() != owner {
            tracing::warn!(
                account = %ctx.address(),
                caller = %ctx.caller(),
                "Rejected privileged call from non-owner"
            );
            return Err(IBasicAccountErrors::NotOwner(IBasicAccount::NotOwner {}));
        }
        Ok(())
    }

    fn execute(
        ctx: &mut CallContext<'_>,
        target: Address,
        value: U256,
        data: &[u8],
    ) -> Result<Bytes, IBasicAccountErrors> {
        Self::only_owner(ctx)?;

        ctx.call(target, value, data).map_err(|data| {
            tracing::debug!(
                account = %ctx.address(),
                %target,
                revert_data = %data,
                "Forwarded call failed"
            );
            IBasicAccountErrors::CallFailed(IBasicAccount::CallFailed { data })
        })
    }

    fn set_owner(ctx: &mut CallContext<'_>, new_owner: Address) -> Result<(), IBasicAccountErrors> {
        Self::only_owner(ctx)?;
        if new_owner.is_zero() {
            return Err(IBasicAccountErrors::ZeroOwner(IBasicAccount::ZeroOwner {}));
        }

        let previous = Self::owner(ctx);
        Self::store_owner(ctx, new_owner);
        tracing::info!(
            account = %ctx.address(),
            %previous,
            %new_owner,
            "Account owner changed"
        );
        Ok(())
    }
}

impl Contract for BasicAccount {
    fn name(&self) -> &'static str {
        "BasicAccount"
    }

    fn construct(&self, ctx: &mut CallContext<'_>, args: &[u8]) -> Result<(), Bytes> {
        let initial_owner = Address::abi_decode(args).map_err(|_| Bytes::new())?;
        if initial_owner.is_zero() {
            return Err(IBasicAccountErrors::ZeroOwner(IBasicAccount::ZeroOwner {})
                .abi_encode()
                .into());
        }
        Self::store_owner(ctx, initial_owner);
        Ok(())
    }

    fn call(&self, ctx: &mut CallContext<'_>, input: &[u8]) -> Result<Bytes, Bytes> {
        if input.is_empty() {
            tracing::debug!(
                account = %ctx.address(),
                from = %ctx.caller(),
                value = %ctx.value(),
                "Received value"
            );
            return Ok(Bytes::new());
        }

        let call = IBasicAccountCalls::abi_decode(input).map_err(|_| Bytes::new())?;

        // None of the entry points are payable.
        if !ctx.value().is_zero() {
            return Err(Bytes::new());
        }

        let result = match call {
            IBasicAccountCalls::owner(_) => Ok(Self::owner(ctx).abi_encode().into()),
            IBasicAccountCalls::execute(call) => {
                Self::execute(ctx, call.target, call.value, &call.data)
                    .map(|ret| ret.abi_encode().into())
            }
            IBasicAccountCalls::setOwner(call) => {
                Self::set_owner(ctx, call.newOwner).map(|()| Bytes::new())
            }
        };

        result.map_err(|err| err.abi_encode().into())
    }
}
