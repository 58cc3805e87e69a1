// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Solidity ABI of the account.
//!
//! Calls, return values and failures use standard ABI encoding, so the
//! failure data of `NotOwner()`, `ZeroOwner()` and `CallFailed(bytes)` is
//! byte-compatible with any EVM tooling decoding it.

use alloy::sol;

sol! {
    interface IBasicAccount {
        /// Caller is not the current owner.
        error NotOwner();
        /// Attempted to hand ownership to the zero address.
        error ZeroOwner();
        /// The forwarded call failed; `data` is the target's failure data.
        error CallFailed(bytes data);

        function owner() external view returns (address);
        function execute(address target, uint256 value, bytes calldata data) external returns (bytes memory);
        function setOwner(address newOwner) external;
    }
}

pub use IBasicAccount::{IBasicAccountCalls, IBasicAccountErrors};
