// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Client-side error types.
//!
//! The hierarchy separates engine-state errors (caller mistakes such as
//! double registration) from session transport errors (failures the session
//! reports on a publish call). Transport errors are retryable by nature:
//! the pipeline logs them and refills while subscriptions remain.

use thiserror::Error;

// =============================================================================
// ClientError - Root Error Type
// =============================================================================

/// Result alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// The root error type for the client crate.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Publish-engine state errors.
    #[error("{0}")]
    Engine(#[from] EngineError),

    /// Session transport errors.
    #[error("{0}")]
    Session(#[from] SessionError),
}

impl ClientError {
    /// Creates an engine error.
    #[inline]
    pub fn engine(error: EngineError) -> Self {
        Self::Engine(error)
    }

    /// Creates a session error.
    #[inline]
    pub fn session(error: SessionError) -> Self {
        Self::Session(error)
    }

    /// Returns `true` if a retry may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Engine(e) => e.is_retryable(),
            Self::Session(e) => e.is_retryable(),
        }
    }
}

// =============================================================================
// EngineError
// =============================================================================

/// Errors raised by the publish engine's own state machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The subscription id already has a registered callback.
    #[error("subscription {subscription_id} is already registered")]
    SubscriptionAlreadyRegistered {
        /// The conflicting subscription id.
        subscription_id: u32,
    },

    /// The subscription id has no registered callback.
    #[error("subscription {subscription_id} is not registered")]
    SubscriptionNotRegistered {
        /// The unknown subscription id.
        subscription_id: u32,
    },

    /// The engine was terminated; no further requests are issued.
    #[error("the publish engine has been terminated")]
    Terminated,

    /// The engine configuration failed validation.
    #[error("invalid engine configuration: {message}")]
    InvalidConfiguration {
        /// What failed to validate.
        message: String,
    },
}

impl EngineError {
    /// Creates an already-registered error.
    pub fn already_registered(subscription_id: u32) -> Self {
        Self::SubscriptionAlreadyRegistered { subscription_id }
    }

    /// Creates a not-registered error.
    pub fn not_registered(subscription_id: u32) -> Self {
        Self::SubscriptionNotRegistered { subscription_id }
    }

    /// Creates an invalid-configuration error.
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }

    /// Engine-state errors are never retryable.
    pub const fn is_retryable(&self) -> bool {
        false
    }
}

// =============================================================================
// SessionError
// =============================================================================

/// Errors a session reports on a publish call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The transport failed to deliver the request or the response.
    #[error("transport failure: {message}")]
    Transport {
        /// Details from the transport layer.
        message: String,
    },

    /// The server did not answer within the session's deadline.
    #[error("publish request timed out after {timeout_ms} ms")]
    Timeout {
        /// The elapsed deadline in milliseconds.
        timeout_ms: u32,
    },

    /// The session is closed and will never answer.
    #[error("session closed")]
    Closed,
}

impl SessionError {
    /// Creates a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates a timeout error.
    pub fn timeout(timeout_ms: u32) -> Self {
        Self::Timeout { timeout_ms }
    }

    /// Returns `true` if a retry may succeed.
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Timeout { .. })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryability() {
        assert!(SessionError::transport("connection reset").is_retryable());
        assert!(SessionError::timeout(5000).is_retryable());
        assert!(!SessionError::Closed.is_retryable());

        assert!(!EngineError::already_registered(1).is_retryable());
        assert!(!ClientError::engine(EngineError::Terminated).is_retryable());
        assert!(ClientError::session(SessionError::timeout(1)).is_retryable());
    }

    #[test]
    fn test_error_display() {
        let error = EngineError::already_registered(7);
        assert!(error.to_string().contains('7'));

        let error: ClientError = SessionError::Closed.into();
        assert_eq!(error.to_string(), "session closed");
    }
}
