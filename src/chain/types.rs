// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Chain types and helpers.

use alloy::primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};

/// Decimals of the native value unit (wei per ether).
pub const NATIVE_DECIMALS: u8 = 18;

/// One call frame in a transaction's trace.
///
/// Frames are recorded in the order they finish, so a nested call appears
/// before the frame that issued it. Reverted frames stay in the trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRecord {
    /// Nesting level (0 for the top-level call)
    pub depth: usize,
    /// Identity that issued the call
    pub caller: Address,
    /// Called account
    pub target: Address,
    /// Value attached to the call
    pub value: U256,
    /// Call input
    pub input: Bytes,
    /// Whether the frame completed without failing
    pub success: bool,
    /// Return data on success, failure data otherwise
    pub output: Bytes,
}

/// Format an amount in the smallest unit with the given decimals.
///
/// Keeps at most 6 fractional digits; extra precision is truncated.
pub fn format_units(amount: U256, decimals: u8) -> String {
    if amount.is_zero() {
        return "0".to_string();
    }

    let divisor = U256::from(10u64).pow(U256::from(decimals));
    let whole = amount / divisor;
    let remainder = amount % divisor;

    if remainder.is_zero() {
        whole.to_string()
    } else {
        let decimal_str = format!("{:0>width$}", remainder, width = decimals as usize);
        let trimmed = decimal_str.trim_end_matches('0');
        if trimmed.is_empty() {
            whole.to_string()
        } else {
            format!("{}.{}", whole, &trimmed[..trimmed.len().min(6)])
        }
    }
}

/// Format a native amount (wei) as ether.
pub fn format_ether(amount: U256) -> String {
    format_units(amount, NATIVE_DECIMALS)
}

/// `amount` ether expressed in wei.
pub fn ether(amount: u64) -> U256 {
    U256::from(amount) * U256::from(10u64).pow(U256::from(NATIVE_DECIMALS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_units() {
        let one = U256::from(1_000_000_000_000_000_000u64);
        assert_eq!(format_units(one, 18), "1");

        let tenth = U256::from(100_000_000_000_000_000u64);
        assert_eq!(format_units(tenth, 18), "0.1");

        let complex = U256::from(1_234_567_890_000_000_000u64);
        assert_eq!(format_units(complex, 18), "1.234567");

        assert_eq!(format_units(U256::ZERO, 18), "0");
        assert_eq!(format_units(U256::from(1_000_000u64), 6), "1");
    }

    #[test]
    fn ether_scales_to_wei() {
        assert_eq!(ether(2), U256::from(2_000_000_000_000_000_000u64));
        assert_eq!(format_ether(ether(3)), "3");
    }

    #[test]
    fn call_record_serializes_to_json() {
        let record = CallRecord {
            depth: 1,
            caller: Address::repeat_byte(0x11),
            target: Address::repeat_byte(0x22),
            value: U256::from(5u64),
            input: Bytes::from_static(&[0xde, 0xad]),
            success: false,
            output: Bytes::new(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["depth"], 1);
        assert_eq!(json["success"], false);
        assert_eq!(json["input"], "0xdead");

        let back: CallRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
