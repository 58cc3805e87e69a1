// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names and default values used
//! by the chain and the logging setup. Configuration is loaded from the
//! environment when a harness builds its [`Chain`](crate::chain::Chain).
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `MAX_CALL_DEPTH` | Maximum nesting of call frames | `1024` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info` |

use std::env;

use serde::Deserialize;

/// Environment variable name for the maximum call depth.
pub const MAX_CALL_DEPTH_ENV: &str = "MAX_CALL_DEPTH";

/// Environment variable name for the log output format.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Maximum call depth, matching the EVM limit.
///
/// A nested call issued at this depth fails with empty failure data
/// instead of running the target.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 1024;

/// Chain execution settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Maximum number of nested call frames, including the top-level one.
    pub max_call_depth: usize,
}

impl ChainConfig {
    /// Load configuration from the environment.
    ///
    /// Missing or unparsable values fall back to their defaults.
    pub fn from_env() -> Self {
        let max_call_depth = match env::var(MAX_CALL_DEPTH_ENV) {
            Ok(raw) => parse_call_depth(&raw).unwrap_or_else(|| {
                tracing::warn!(
                    value = %raw,
                    default = DEFAULT_MAX_CALL_DEPTH,
                    "Invalid MAX_CALL_DEPTH, using default"
                );
                DEFAULT_MAX_CALL_DEPTH
            }),
            Err(_) => DEFAULT_MAX_CALL_DEPTH,
        };

        Self { max_call_depth }
    }

    /// Override the maximum call depth.
    pub fn with_max_call_depth(mut self, max_call_depth: usize) -> Self {
        self.max_call_depth = max_call_depth;
        self
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }
}

/// A depth of zero would reject every call, so it is treated as invalid.
fn parse_call_depth(raw: &str) -> Option<usize> {
    raw.trim().parse::<usize>().ok().filter(|depth| *depth > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_uses_evm_depth() {
        assert_eq!(ChainConfig::default().max_call_depth, 1024);
    }

    #[test]
    fn parse_call_depth_accepts_positive_integers() {
        assert_eq!(parse_call_depth("16"), Some(16));
        assert_eq!(parse_call_depth(" 8 "), Some(8));
    }

    #[test]
    fn parse_call_depth_rejects_zero_and_garbage() {
        assert_eq!(parse_call_depth("0"), None);
        assert_eq!(parse_call_depth("-1"), None);
        assert_eq!(parse_call_depth("deep"), None);
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: ChainConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ChainConfig::default());

        let config: ChainConfig = serde_json::from_str(r#"{"max_call_depth": 4}"#).unwrap();
        assert_eq!(config.max_call_depth, 4);
    }

    #[test]
    fn with_max_call_depth_overrides() {
        let config = ChainConfig::default().with_max_call_depth(3);
        assert_eq!(config.max_call_depth, 3);
    }
}
