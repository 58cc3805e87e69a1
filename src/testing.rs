// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Fixture contracts for exercising accounts.

use alloy::{
    primitives::{Address, Bytes, U256},
    sol,
    sol_types::{Revert, SolError, SolInterface, SolValue},
};

use crate::chain::{CallContext, Contract};

sol! {
    interface ICounter {
        function x() external view returns (uint256);
        function inc() external;
        function incBy(uint256 by) external;
        function increment() external returns (uint256);
        function willRevert() external;
        function incThenRevert() external;
    }
}

const X_SLOT: U256 = U256::ZERO;

/// A counter stored in slot 0.
///
/// `willRevert` and `incThenRevert` fail with `Error(string)` carrying
/// [`Counter::REVERT_REASON`]. Unknown input fails with empty data.
#[derive(Debug, Default, Clone, Copy)]
pub struct Counter;

impl Counter {
    pub const REVERT_REASON: &'static str = "Counter: reverted on purpose";

    /// Failure data produced by the reverting entry points.
    pub fn revert_data() -> Bytes {
        let reason = Revert {
            reason: Self::REVERT_REASON.to_string(),
        };
        SolError::abi_encode(&reason).into()
    }

    fn bump(ctx: &mut CallContext<'_>, by: U256) -> U256 {
        let next = ctx.sload(X_SLOT).wrapping_add(by);
        ctx.sstore(X_SLOT, next);
        next
    }
}

impl Contract for Counter {
    fn name(&self) -> &'static str {
        "Counter"
    }

    fn call(&self, ctx: &mut CallContext<'_>, input: &[u8]) -> Result<Bytes, Bytes> {
        let call = ICounter::ICounterCalls::abi_decode(input).map_err(|_| Bytes::new())?;

        match call {
            ICounter::ICounterCalls::x(_) => Ok(ctx.sload(X_SLOT).abi_encode().into()),
            ICounter::ICounterCalls::inc(_) => {
                Self::bump(ctx, U256::from(1u64));
                Ok(Bytes::new())
            }
            ICounter::ICounterCalls::incBy(call) => {
                Self::bump(ctx, call.by);
                Ok(Bytes::new())
            }
            ICounter::ICounterCalls::increment(_) => {
                let next = Self::bump(ctx, U256::from(1u64));
                Ok(next.abi_encode().into())
            }
            ICounter::ICounterCalls::willRevert(_) => Err(Self::revert_data()),
            ICounter::ICounterCalls::incThenRevert(_) => {
                Self::bump(ctx, U256::from(1u64));
                Err(Self::revert_data())
            }
        }
    }
}

/// Forwards every call it receives, input unchanged, to a fixed address.
///
/// The relay's own identity becomes the caller of the forwarded call.
/// Return and failure data are passed back verbatim. Any value received
/// stays with the relay.
#[derive(Debug, Clone, Copy)]
pub struct Relay {
    to: Address,
}

impl Relay {
    pub fn new(to: Address) -> Self {
        Self { to }
    }
}

impl Contract for Relay {
    fn name(&self) -> &'static str {
        "Relay"
    }

    fn call(&self, ctx: &mut CallContext<'_>, input: &[u8]) -> Result<Bytes, Bytes> {
        ctx.call(self.to, U256::ZERO, input)
    }
}
