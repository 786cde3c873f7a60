// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! The client-side publish pipeline.
//!
//! The engine keeps a configurable number of publish requests outstanding so
//! the server always holds one it can answer with the next notification.
//! Registering a subscription pipelines an initial burst; every response
//! triggers one replacement request while subscriptions remain, so the
//! pipeline holds its depth in steady state and drains once the last
//! subscription unregisters.
//!
//! # Architecture
//!
//! ```text
//! register ──► burst of N requests ──► session.publish(...)
//!                                            │ response
//!                                            ▼
//!                        ┌─── acknowledgement queued (unless keep-alive)
//!                        ├─── callback dispatched per subscription id
//!                        └─── one replacement request (if subscriptions > 0)
//! ```
//!
//! Acknowledgements accumulate between requests and ride out with the next
//! one (FIFO drain). Request issuance is deferred onto the runtime, so acks
//! pushed by a callback that is still on the stack are included in the next
//! request rather than a concurrent one.
//!
//! The timeout hint sent to the server scales with the number of requests in
//! flight: some servers misread `timeout_hint = 0` and answer `BadTimeout`,
//! so every outstanding request carries a hint larger than any reasonable
//! keep-alive gap. The base hint only ever grows across registrations.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use uarc_core::{PublishRequest, PublishResponse, RequestHeader, SubscriptionAcknowledgement};

use crate::callback::{NotificationCallback, PublishNotification};
use crate::config::EngineConfig;
use crate::error::{ClientResult, EngineError};
use crate::session::PublishSession;

// =============================================================================
// PublishEngine
// =============================================================================

/// Pipelined publish-request issuer and response dispatcher.
///
/// Single-owner and cooperatively driven: all mutation happens on the
/// caller's thread or inside the session's response path. The engine spawns
/// no threads of its own; request bodies run as tasks on the ambient
/// runtime.
pub struct PublishEngine {
    inner: Arc<EngineInner>,
}

impl PublishEngine {
    /// Creates an engine attached to a session, with default configuration.
    pub fn new(session: Arc<dyn PublishSession>) -> Self {
        Self {
            inner: Arc::new(EngineInner {
                session: RwLock::new(Some(session)),
                config: EngineConfig::default(),
                timeout_hint_ms: AtomicU32::new(EngineConfig::default().initial_timeout_hint_ms),
                pending_publish_requests: AtomicU32::new(0),
                active_subscriptions: AtomicU32::new(0),
                state: Mutex::new(EngineState::default()),
                stats: EngineStats::default(),
            }),
        }
    }

    /// Creates an engine with an explicit configuration.
    pub fn with_config(
        session: Arc<dyn PublishSession>,
        config: EngineConfig,
    ) -> ClientResult<Self> {
        config.validate()?;
        let initial_hint = config.initial_timeout_hint_ms;
        Ok(Self {
            inner: Arc::new(EngineInner {
                session: RwLock::new(Some(session)),
                config,
                timeout_hint_ms: AtomicU32::new(initial_hint),
                pending_publish_requests: AtomicU32::new(0),
                active_subscriptions: AtomicU32::new(0),
                state: Mutex::new(EngineState::default()),
                stats: EngineStats::default(),
            }),
        })
    }

    // =========================================================================
    // Subscription Lifecycle
    // =========================================================================

    /// Registers a notification callback for a subscription and pipelines
    /// the initial burst of publish requests.
    ///
    /// The engine's base timeout hint becomes the maximum of its current
    /// value and `timeout_hint_ms`; it never shrinks.
    ///
    /// # Errors
    ///
    /// Fails when the id is already registered or the engine is terminated.
    pub fn register_subscription_callback(
        &self,
        subscription_id: u32,
        timeout_hint_ms: u32,
        callback: Arc<dyn NotificationCallback>,
    ) -> ClientResult<()> {
        if self.inner.session.read().is_none() {
            return Err(EngineError::Terminated.into());
        }

        {
            let mut state = self.inner.state.lock();
            if state.callbacks.contains_key(&subscription_id) {
                return Err(EngineError::already_registered(subscription_id).into());
            }
            state.callbacks.insert(subscription_id, callback);
        }
        self.inner.active_subscriptions.fetch_add(1, Ordering::SeqCst);
        self.inner
            .timeout_hint_ms
            .fetch_max(timeout_hint_ms, Ordering::SeqCst);

        tracing::info!(
            subscription_id,
            timeout_hint_ms,
            pipeline_depth = self.inner.config.pipeline_depth,
            "subscription callback registered"
        );

        // Initial burst; steady-state replacements keep the depth afterwards.
        for _ in 0..self.inner.config.pipeline_depth {
            EngineInner::pipeline_publish_request(&self.inner);
        }
        Ok(())
    }

    /// Removes a subscription's callback.
    ///
    /// In-flight requests are not cancelled; their responses find no
    /// callback and are dropped.
    pub fn unregister_subscription_callback(&self, subscription_id: u32) -> ClientResult<()> {
        let removed = self.inner.state.lock().callbacks.remove(&subscription_id);
        if removed.is_none() {
            return Err(EngineError::not_registered(subscription_id).into());
        }
        self.inner.active_subscriptions.fetch_sub(1, Ordering::SeqCst);
        tracing::info!(subscription_id, "subscription callback unregistered");
        Ok(())
    }

    // =========================================================================
    // Acknowledgements
    // =========================================================================

    /// Queues an acknowledgement for the next outgoing publish request.
    pub fn acknowledge_notification(&self, subscription_id: u32, sequence_number: u32) {
        self.inner
            .state
            .lock()
            .acknowledgements
            .push(SubscriptionAcknowledgement {
                subscription_id,
                sequence_number,
            });
    }

    /// Discards every queued acknowledgement for a subscription.
    ///
    /// Used when a subscription is torn down before its acks flush.
    pub fn cleanup_acknowledgments(&self, subscription_id: u32) {
        self.inner
            .state
            .lock()
            .acknowledgements
            .retain(|ack| ack.subscription_id != subscription_id);
    }

    // =========================================================================
    // Termination & Observables
    // =========================================================================

    /// Detaches the session. Idempotent; every later request and response
    /// path becomes a no-op.
    pub fn terminate(&self) {
        let previous = self.inner.session.write().take();
        if previous.is_some() {
            tracing::info!("publish engine terminated");
        }
    }

    /// Returns `true` once [`terminate`](Self::terminate) has run.
    pub fn is_terminated(&self) -> bool {
        self.inner.session.read().is_none()
    }

    /// Number of registered subscription callbacks.
    pub fn subscription_count(&self) -> usize {
        self.inner.state.lock().callbacks.len()
    }

    /// Number of publish requests currently in flight.
    pub fn pending_publish_request_count(&self) -> u32 {
        self.inner.pending_publish_requests.load(Ordering::SeqCst)
    }

    /// Number of acknowledgements waiting for the next request.
    pub fn pending_acknowledgement_count(&self) -> usize {
        self.inner.state.lock().acknowledgements.len()
    }

    /// The current base timeout hint in milliseconds.
    pub fn timeout_hint_ms(&self) -> u32 {
        self.inner.timeout_hint_ms.load(Ordering::SeqCst)
    }

    /// Snapshot of the engine counters.
    pub fn stats(&self) -> EngineStatsSnapshot {
        self.inner.stats.snapshot()
    }
}

impl std::fmt::Debug for PublishEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublishEngine")
            .field("terminated", &self.is_terminated())
            .field("subscriptions", &self.subscription_count())
            .field("pending_requests", &self.pending_publish_request_count())
            .finish()
    }
}

// =============================================================================
// EngineInner
// =============================================================================

struct EngineInner {
    /// Cleared on terminate; checked at every request and dispatch.
    session: RwLock<Option<Arc<dyn PublishSession>>>,

    config: EngineConfig,

    /// Base timeout hint; grows monotonically under registration.
    timeout_hint_ms: AtomicU32,

    /// Requests in flight; incremented before issue, decremented on
    /// completion, never negative.
    pending_publish_requests: AtomicU32,

    active_subscriptions: AtomicU32,

    state: Mutex<EngineState>,

    stats: EngineStats,
}

#[derive(Default)]
struct EngineState {
    /// FIFO acknowledgement batch, drained into each outgoing request.
    acknowledgements: Vec<SubscriptionAcknowledgement>,

    callbacks: HashMap<u32, Arc<dyn NotificationCallback>>,
}

impl EngineInner {
    /// Schedules one publish request onto the runtime.
    ///
    /// The spawn defers the body past the current turn: the caller's stack
    /// unwinds first, so acknowledgements pushed by a running callback are
    /// drained into this request.
    fn pipeline_publish_request(inner: &Arc<EngineInner>) {
        let inner = Arc::clone(inner);
        tokio::spawn(async move {
            let Some(session) = inner.session.read().clone() else {
                tracing::trace!("engine terminated, publish request dropped");
                return;
            };

            let pending = inner.pending_publish_requests.fetch_add(1, Ordering::SeqCst) + 1;
            let subscription_acknowledgements = {
                let mut state = inner.state.lock();
                std::mem::take(&mut state.acknowledgements)
            };

            // Scaled so every outstanding request outlives the keep-alive
            // interval even on servers that misread small hints.
            let timeout_hint =
                pending.saturating_mul(inner.timeout_hint_ms.load(Ordering::SeqCst));

            tracing::debug!(
                pending,
                timeout_hint,
                acknowledgement_count = subscription_acknowledgements.len(),
                "issuing publish request"
            );
            inner.stats.record_request();

            let outcome = session
                .publish(PublishRequest {
                    request_header: RequestHeader { timeout_hint },
                    subscription_acknowledgements,
                })
                .await;
            inner.pending_publish_requests.fetch_sub(1, Ordering::SeqCst);

            match outcome {
                Ok(response) => inner.receive_publish_response(response).await,
                Err(error) => {
                    inner.stats.record_transport_error();
                    tracing::warn!(error = %error, "publish request failed");
                }
            }

            // One replacement per completed request keeps the pipeline at
            // depth; with no subscriptions left it drains to zero.
            if inner.active_subscriptions.load(Ordering::SeqCst) > 0 {
                Self::pipeline_publish_request(&inner);
            }
        });
    }

    /// Demultiplexes one publish response.
    async fn receive_publish_response(&self, response: PublishResponse) {
        self.stats.record_response();
        let subscription_id = response.subscription_id;
        let message = response.notification_message;

        let callback = {
            let mut state = self.state.lock();
            if message.is_keep_alive() {
                // Keep-alives are not acknowledged.
                self.stats.record_keep_alive();
            } else {
                state.acknowledgements.push(SubscriptionAcknowledgement {
                    subscription_id,
                    sequence_number: message.sequence_number,
                });
            }
            state.callbacks.get(&subscription_id).cloned()
        };

        if self.session.read().is_none() {
            self.stats.record_dropped_response();
            tracing::debug!(subscription_id, "engine terminated, response dropped");
            return;
        }

        match callback {
            Some(callback) => {
                callback
                    .on_publish(PublishNotification {
                        subscription_id,
                        notification_data: message.notification_data,
                        publish_time: message.publish_time,
                        more_notifications: response.more_notifications,
                    })
                    .await;
            }
            None => {
                self.stats.record_dropped_response();
                tracing::debug!(subscription_id, "no callback registered, response dropped");
            }
        }
    }
}

// =============================================================================
// EngineStats
// =============================================================================

/// Counters for the publish pipeline.
#[derive(Debug, Default)]
struct EngineStats {
    requests_sent: AtomicU64,
    responses_received: AtomicU64,
    keep_alives: AtomicU64,
    transport_errors: AtomicU64,
    dropped_responses: AtomicU64,
}

impl EngineStats {
    fn record_request(&self) {
        self.requests_sent.fetch_add(1, Ordering::Relaxed);
    }

    fn record_response(&self) {
        self.responses_received.fetch_add(1, Ordering::Relaxed);
    }

    fn record_keep_alive(&self) {
        self.keep_alives.fetch_add(1, Ordering::Relaxed);
    }

    fn record_transport_error(&self) {
        self.transport_errors.fetch_add(1, Ordering::Relaxed);
    }

    fn record_dropped_response(&self) {
        self.dropped_responses.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> EngineStatsSnapshot {
        EngineStatsSnapshot {
            requests_sent: self.requests_sent.load(Ordering::Relaxed),
            responses_received: self.responses_received.load(Ordering::Relaxed),
            keep_alives: self.keep_alives.load(Ordering::Relaxed),
            transport_errors: self.transport_errors.load(Ordering::Relaxed),
            dropped_responses: self.dropped_responses.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time view of the engine counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EngineStatsSnapshot {
    /// Publish requests issued.
    pub requests_sent: u64,

    /// Publish responses completed.
    pub responses_received: u64,

    /// Responses that carried no notification payloads.
    pub keep_alives: u64,

    /// Publish calls that failed in the session.
    pub transport_errors: u64,

    /// Responses dropped for lack of a callback or after termination.
    pub dropped_responses: u64,
}

// =============================================================================
// Tests
// =============================================================================
