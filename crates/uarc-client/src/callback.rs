// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Notification callbacks.
//!
//! Each subscription registers one [`NotificationCallback`]; the engine
//! invokes it with the demultiplexed notification payloads of every
//! non-dropped publish response for that subscription.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use uarc_core::NotificationData;

// =============================================================================
// PublishNotification
// =============================================================================

/// The demultiplexed content of one publish response.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishNotification {
    /// Subscription the response belonged to.
    pub subscription_id: u32,

    /// Notification payloads; empty for a keep-alive.
    pub notification_data: Vec<NotificationData>,

    /// Time the server published the message.
    pub publish_time: DateTime<Utc>,

    /// `true` if the server has more notifications queued.
    pub more_notifications: bool,
}

impl PublishNotification {
    /// Returns `true` if this is a keep-alive (no payloads).
    pub fn is_keep_alive(&self) -> bool {
        self.notification_data.is_empty()
    }
}

// =============================================================================
// NotificationCallback
// =============================================================================

/// Per-subscription notification handler.
#[async_trait]
pub trait NotificationCallback: Send + Sync {
    /// Called once per dispatched publish response.
    async fn on_publish(&self, notification: PublishNotification);
}

// =============================================================================
// ChannelCallback
// =============================================================================

/// A channel-backed callback: notifications are forwarded into an mpsc
/// queue for consumption elsewhere.
pub struct ChannelCallback {
    sender: mpsc::Sender<PublishNotification>,
}

impl ChannelCallback {
    /// Creates a callback forwarding into an existing sender.
    pub fn new(sender: mpsc::Sender<PublishNotification>) -> Self {
        Self { sender }
    }

    /// Creates a callback together with its receiver.
    pub fn with_channel(capacity: usize) -> (Self, mpsc::Receiver<PublishNotification>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self::new(tx), rx)
    }
}

#[async_trait]
impl NotificationCallback for ChannelCallback {
    async fn on_publish(&self, notification: PublishNotification) {
        // Best effort; a closed receiver just drops the notification.
        let _ = self.sender.send(notification).await;
    }
}

// =============================================================================
// Tests
// =============================================================================
