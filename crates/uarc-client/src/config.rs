// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Publish-engine configuration.

use serde::{Deserialize, Serialize};

use crate::error::{ClientResult, EngineError};

/// Default number of publish requests kept in flight.
pub const DEFAULT_PIPELINE_DEPTH: u32 = 5;

/// Default timeout hint in milliseconds.
pub const DEFAULT_TIMEOUT_HINT_MS: u32 = 10_000;

// =============================================================================
// EngineConfig
// =============================================================================

/// Configuration for the client publish engine.
///
/// # Examples
///
/// ```
/// use uarc_client::EngineConfig;
///
/// let config = EngineConfig::builder()
///     .pipeline_depth(3)
///     .initial_timeout_hint_ms(20_000)
///     .build()
///     .unwrap();
/// assert_eq!(config.pipeline_depth, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Publish requests kept outstanding per registration burst. The burst
    /// compensates for network latency: the server always holds a request
    /// it can answer with the next notification.
    #[serde(default = "default_pipeline_depth")]
    pub pipeline_depth: u32,

    /// Starting timeout hint in milliseconds. The effective hint grows with
    /// the registered subscriptions' hints and never shrinks.
    #[serde(default = "default_timeout_hint_ms")]
    pub initial_timeout_hint_ms: u32,
}

fn default_pipeline_depth() -> u32 {
    DEFAULT_PIPELINE_DEPTH
}

fn default_timeout_hint_ms() -> u32 {
    DEFAULT_TIMEOUT_HINT_MS
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pipeline_depth: DEFAULT_PIPELINE_DEPTH,
            initial_timeout_hint_ms: DEFAULT_TIMEOUT_HINT_MS,
        }
    }
}

impl EngineConfig {
    /// Creates a configuration builder.
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }

    /// Validates this configuration.
    pub fn validate(&self) -> ClientResult<()> {
        if self.pipeline_depth == 0 {
            return Err(EngineError::invalid_configuration(
                "pipeline depth must be at least 1",
            )
            .into());
        }
        Ok(())
    }
}

// =============================================================================
// EngineConfigBuilder
// =============================================================================

/// Builder for [`EngineConfig`].
#[derive(Debug, Default)]
pub struct EngineConfigBuilder {
    pipeline_depth: Option<u32>,
    initial_timeout_hint_ms: Option<u32>,
}

impl EngineConfigBuilder {
    /// Sets the pipeline depth.
    pub fn pipeline_depth(mut self, depth: u32) -> Self {
        self.pipeline_depth = Some(depth);
        self
    }

    /// Sets the initial timeout hint in milliseconds.
    pub fn initial_timeout_hint_ms(mut self, hint_ms: u32) -> Self {
        self.initial_timeout_hint_ms = Some(hint_ms);
        self
    }

    /// Builds and validates the configuration.
    pub fn build(self) -> ClientResult<EngineConfig> {
        let config = EngineConfig {
            pipeline_depth: self.pipeline_depth.unwrap_or(DEFAULT_PIPELINE_DEPTH),
            initial_timeout_hint_ms: self
                .initial_timeout_hint_ms
                .unwrap_or(DEFAULT_TIMEOUT_HINT_MS),
        };
        config.validate()?;
        Ok(config)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.pipeline_depth, 5);
        assert_eq!(config.initial_timeout_hint_ms, 10_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_depth_rejected() {
        let result = EngineConfig::builder().pipeline_depth(0).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_serde_defaults() {
        let config: EngineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }
}
