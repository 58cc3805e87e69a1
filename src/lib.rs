// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Basic Account - Single-Owner Call Forwarder
//!
//! An account contract that forwards arbitrary calls, with optional value,
//! on behalf of exactly one owner, running on an in-process chain with
//! journaled, all-or-nothing call frames.
//!
//! ## Modules
//!
//! - `account` - The account contract, its ABI and a typed client
//! - `chain` - Execution environment (balances, storage, call frames)
//! - `config` - Environment-driven settings
//! - `error` - Account operation errors
//! - `telemetry` - Tracing subscriber setup
//! - `testing` - Fixture contracts

pub mod account;
pub mod chain;
pub mod config;
pub mod error;
pub mod telemetry;
pub mod testing;

pub use account::{AccountClient, BasicAccount};
pub use chain::{Chain, ChainError};
pub use config::ChainConfig;
pub use error::AccountError;
