// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # uarc-client
//!
//! Client-side publish pipeline for the UARC OPC UA runtime.
//!
//! The centerpiece is the [`PublishEngine`]: a pipelined publish-request
//! issuer that keeps the server supplied with outstanding requests,
//! batches acknowledgements, and demultiplexes responses to
//! per-subscription callbacks. The engine drives any transport that
//! implements [`PublishSession`]; it owns no sockets and spawns no threads.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use uarc_client::{ChannelCallback, PublishEngine};
//!
//! let engine = PublishEngine::new(session);
//!
//! let (callback, mut notifications) = ChannelCallback::with_channel(64);
//! engine.register_subscription_callback(subscription_id, 1_000, Arc::new(callback))?;
//!
//! while let Some(notification) = notifications.recv().await {
//!     for data in &notification.notification_data {
//!         println!("change: {:?}", data);
//!     }
//!     // Keep-alives are not acknowledged; data notifications already are.
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod callback;
pub mod config;
pub mod engine;
pub mod error;
pub mod session;

// Re-export commonly used types
pub use callback::{ChannelCallback, NotificationCallback, PublishNotification};
pub use config::{EngineConfig, EngineConfigBuilder, DEFAULT_PIPELINE_DEPTH, DEFAULT_TIMEOUT_HINT_MS};
pub use engine::{EngineStatsSnapshot, PublishEngine};
pub use error::{ClientError, ClientResult, EngineError, SessionError};
pub use session::PublishSession;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
