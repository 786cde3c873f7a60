// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Session abstraction consumed by the publish engine.
//!
//! The engine does not own a transport; it drives any implementation of
//! [`PublishSession`]. The contract mirrors the service layer's behavior:
//! one response (or error) per call, completion at most once, and responses
//! delivered in the order the server answers.

use async_trait::async_trait;
use uarc_core::{PublishRequest, PublishResponse};

use crate::error::SessionError;

// =============================================================================
// PublishSession
// =============================================================================

/// An established session able to carry publish requests.
///
/// Implementations queue the request on the session's transport and resolve
/// when the matching response (or a transport failure) arrives. The engine
/// holds the session behind an `Arc` and never outlives it.
#[async_trait]
pub trait PublishSession: Send + Sync {
    /// Sends one publish request and waits for its response.
    async fn publish(&self, request: PublishRequest) -> Result<PublishResponse, SessionError>;
}
