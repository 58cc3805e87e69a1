// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Account operation errors.

use alloy::{primitives::Bytes, sol_types::SolInterface};

use crate::account::{IBasicAccount, IBasicAccountErrors};
use crate::chain::ChainError;

/// Failure of an account operation, as seen by its caller.
///
/// `NotAuthorized`, `InvalidOwner` and `ForwardedCallFailed` are raised
/// by the account itself. The other variants come from the environment or
/// from failure data that does not belong to the account's ABI.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccountError {
    #[error("Caller is not the account owner")]
    NotAuthorized,

    #[error("New owner must not be the zero address")]
    InvalidOwner,

    /// Carries the target's failure data exactly as it returned it.
    #[error("Forwarded call failed with data {0}")]
    ForwardedCallFailed(Bytes),

    #[error("Unrecognized revert data: {0}")]
    UnexpectedRevert(Bytes),

    #[error("Malformed return data: {0}")]
    Decode(String),

    #[error(transparent)]
    Chain(ChainError),
}

impl AccountError {
    /// Stable identifier for this error kind.
    pub fn error_code(&self) -> &'static str {
        match self {
            AccountError::NotAuthorized => "not_authorized",
            AccountError::InvalidOwner => "invalid_owner",
            AccountError::ForwardedCallFailed(_) => "forwarded_call_failed",
            AccountError::UnexpectedRevert(_) => "unexpected_revert",
            AccountError::Decode(_) => "decode_error",
            AccountError::Chain(_) => "chain_error",
        }
    }

    /// Decode failure data returned by an account.
    pub fn from_revert_data(data: Bytes) -> Self {
        match IBasicAccountErrors::abi_decode(&data) {
            Ok(err) => err.into(),
            Err(_) => AccountError::UnexpectedRevert(data),
        }
    }

    /// ABI-encoded failure data for errors raised by the account.
    pub fn revert_data(&self) -> Option<Bytes> {
        let err = match self {
            AccountError::NotAuthorized => IBasicAccountErrors::NotOwner(IBasicAccount::NotOwner {}),
            AccountError::InvalidOwner => IBasicAccountErrors::ZeroOwner(IBasicAccount::ZeroOwner {}),
            AccountError::ForwardedCallFailed(data) => {
                IBasicAccountErrors::CallFailed(IBasicAccount::CallFailed { data: data.clone() })
            }
            _ => return None,
        };
        Some(err.abi_encode().into())
    }
}

impl From<IBasicAccountErrors> for AccountError {
    fn from(err: IBasicAccountErrors) -> Self {
        match err {
            IBasicAccountErrors::NotOwner(_) => AccountError::NotAuthorized,
            IBasicAccountErrors::ZeroOwner(_) => AccountError::InvalidOwner,
            IBasicAccountErrors::CallFailed(failed) => AccountError::ForwardedCallFailed(failed.data),
        }
    }
}

impl From<ChainError> for AccountError {
    fn from(err: ChainError) -> Self {
        match err {
            ChainError::Reverted(data) => AccountError::from_revert_data(data),
            other => AccountError::Chain(other),
        }
    }
}
