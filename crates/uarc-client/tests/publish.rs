// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Publish-pipeline integration tests.
//!
//! A scripted in-process session parks every publish request until the test
//! releases it, which makes the pipelining, acknowledgement batching, and
//! dispatch behavior observable deterministically.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use tokio::sync::oneshot;

use uarc_client::{
    ChannelCallback, PublishEngine, PublishNotification, PublishSession, SessionError,
};
use uarc_core::{
    DataValue, MonitoredItemNotification, NotificationData, NotificationMessage, PublishRequest,
    PublishResponse, SubscriptionAcknowledgement, Variant,
};

// =============================================================================
// Scripted Session
// =============================================================================

struct ParkedRequest {
    request: PublishRequest,
    reply: oneshot::Sender<Result<PublishResponse, SessionError>>,
}

/// Parks publish requests until the test answers them.
struct ScriptedSession {
    parked: Mutex<VecDeque<ParkedRequest>>,

    /// Every request ever issued, in issue order.
    history: Mutex<Vec<PublishRequest>>,
}

impl ScriptedSession {
    fn new() -> Self {
        Self {
            parked: Mutex::new(VecDeque::new()),
            history: Mutex::new(Vec::new()),
        }
    }

    async fn wait_for_parked(&self, count: usize) {
        for _ in 0..1000 {
            if self.parked.lock().len() >= count {
                return;
            }
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        panic!(
            "session holds {} of {count} expected requests",
            self.parked.lock().len()
        );
    }

    fn parked_count(&self) -> usize {
        self.parked.lock().len()
    }

    fn history(&self) -> Vec<PublishRequest> {
        self.history.lock().clone()
    }

    /// Answers the oldest parked request and returns what it carried.
    fn respond_next(&self, response: PublishResponse) -> PublishRequest {
        let parked = self.parked.lock().pop_front().expect("no parked request");
        parked.reply.send(Ok(response)).expect("engine dropped reply");
        parked.request
    }

    /// Fails the oldest parked request.
    fn fail_next(&self, error: SessionError) -> PublishRequest {
        let parked = self.parked.lock().pop_front().expect("no parked request");
        parked.reply.send(Err(error)).expect("engine dropped reply");
        parked.request
    }
}

#[async_trait]
impl PublishSession for ScriptedSession {
    async fn publish(&self, request: PublishRequest) -> Result<PublishResponse, SessionError> {
        let (reply, receiver) = oneshot::channel();
        self.history.lock().push(request.clone());
        self.parked.lock().push_back(ParkedRequest { request, reply });
        receiver.await.unwrap_or(Err(SessionError::Closed))
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn new_engine() -> (PublishEngine, Arc<ScriptedSession>) {
    let session = Arc::new(ScriptedSession::new());
    let engine = PublishEngine::new(session.clone());
    (engine, session)
}

fn data_response(subscription_id: u32, sequence_number: u32, items: usize) -> PublishResponse {
    let monitored_items = (0..items)
        .map(|i| MonitoredItemNotification {
            client_handle: i as u32,
            value: DataValue::good(Variant::UInt32(i as u32)),
        })
        .collect();
    PublishResponse {
        subscription_id,
        available_sequence_numbers: vec![sequence_number],
        more_notifications: false,
        notification_message: NotificationMessage {
            sequence_number,
            publish_time: Utc::now(),
            notification_data: vec![NotificationData::DataChange { monitored_items }],
        },
    }
}

fn keep_alive_response(subscription_id: u32, sequence_number: u32) -> PublishResponse {
    PublishResponse {
        subscription_id,
        available_sequence_numbers: Vec::new(),
        more_notifications: false,
        notification_message: NotificationMessage::keep_alive(sequence_number, Utc::now()),
    }
}

fn register(engine: &PublishEngine, subscription_id: u32) -> tokio::sync::mpsc::Receiver<PublishNotification> {
    let (callback, receiver) = ChannelCallback::with_channel(64);
    engine
        .register_subscription_callback(subscription_id, 1000, Arc::new(callback))
        .unwrap();
    receiver
}

// =============================================================================
// Tests
// =============================================================================

/// One registration pipelines five requests whose timeout hints scale with
/// the number already outstanding: 1x..5x the 10s base.
#[tokio::test]
async fn initial_burst_scales_timeout_hints() {
    let (engine, session) = new_engine();
    let _notifications = register(&engine, 1);

    session.wait_for_parked(5).await;

    let hints: Vec<u32> = session
        .history()
        .iter()
        .map(|request| request.request_header.timeout_hint)
        .collect();
    assert_eq!(hints, vec![10_000, 20_000, 30_000, 40_000, 50_000]);
    assert_eq!(engine.pending_publish_request_count(), 5);
}

/// A data notification is acknowledged on the next outgoing request.
#[tokio::test]
async fn data_response_is_acknowledged_on_next_request() {
    let (engine, session) = new_engine();
    let mut notifications = register(&engine, 1);

    session.wait_for_parked(5).await;
    session.respond_next(data_response(1, 42, 2));

    // The response triggers one replacement request carrying the ack.
    session.wait_for_parked(5).await;
    let last = session.history().pop().unwrap();
    assert_eq!(
        last.subscription_acknowledgements,
        vec![SubscriptionAcknowledgement {
            subscription_id: 1,
            sequence_number: 42,
        }]
    );

    let notification = notifications.recv().await.unwrap();
    assert_eq!(notification.subscription_id, 1);
    assert_eq!(notification.notification_data.len(), 1);
}

/// Keep-alives dispatch to the callback but are never acknowledged.
#[tokio::test]
async fn keep_alive_is_not_acknowledged() {
    let (engine, session) = new_engine();
    let mut notifications = register(&engine, 1);

    session.wait_for_parked(5).await;
    session.respond_next(keep_alive_response(1, 7));
    session.wait_for_parked(5).await;

    let last = session.history().pop().unwrap();
    assert!(last.subscription_acknowledgements.is_empty());

    let notification = notifications.recv().await.unwrap();
    assert!(notification.is_keep_alive());
    assert_eq!(engine.stats().keep_alives, 1);
}

/// Manually queued acknowledgements drain FIFO into the next request.
#[tokio::test]
async fn acknowledgements_drain_in_fifo_order() {
    let (engine, session) = new_engine();
    let _notifications = register(&engine, 1);
    session.wait_for_parked(5).await;

    engine.acknowledge_notification(1, 5);
    engine.acknowledge_notification(1, 6);
    engine.acknowledge_notification(1, 7);

    session.respond_next(keep_alive_response(1, 1));
    session.wait_for_parked(5).await;

    let last = session.history().pop().unwrap();
    let sequence_numbers: Vec<u32> = last
        .subscription_acknowledgements
        .iter()
        .map(|ack| ack.sequence_number)
        .collect();
    assert_eq!(sequence_numbers, vec![5, 6, 7]);
    assert_eq!(engine.pending_acknowledgement_count(), 0);
}

/// Responses route to the subscription they name; others see nothing.
#[tokio::test]
async fn responses_demultiplex_by_subscription() {
    let (engine, session) = new_engine();
    let mut first = register(&engine, 1);
    let mut second = register(&engine, 2);

    session.wait_for_parked(10).await;
    session.respond_next(data_response(2, 3, 1));

    let notification = second.recv().await.unwrap();
    assert_eq!(notification.subscription_id, 2);

    // Subscription 1 saw nothing.
    assert!(first.try_recv().is_err());
}

/// A response for an unregistered subscription is dropped silently.
#[tokio::test]
async fn unmatched_response_is_dropped() {
    let (engine, session) = new_engine();
    let mut notifications = register(&engine, 1);

    session.wait_for_parked(5).await;
    engine.unregister_subscription_callback(1).unwrap();
    session.respond_next(data_response(1, 9, 1));

    // Give the dispatch path time to run.
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert!(notifications.try_recv().is_err());
    assert_eq!(engine.stats().dropped_responses, 1);
}

/// With no subscriptions left, completed requests are not replaced and the
/// pipeline drains to zero.
#[tokio::test]
async fn pipeline_drains_after_last_unregister() {
    let (engine, session) = new_engine();
    let _notifications = register(&engine, 1);

    session.wait_for_parked(5).await;
    engine.unregister_subscription_callback(1).unwrap();
    assert_eq!(engine.subscription_count(), 0);

    for sequence in 0..5 {
        session.respond_next(keep_alive_response(1, sequence));
    }

    for _ in 0..1000 {
        if engine.pending_publish_request_count() == 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
    assert_eq!(engine.pending_publish_request_count(), 0);
    assert_eq!(session.parked_count(), 0);
}

/// After terminate, in-flight responses are dropped and nothing refills.
#[tokio::test]
async fn terminate_silences_in_flight_responses() {
    let (engine, session) = new_engine();
    let mut notifications = register(&engine, 1);

    session.wait_for_parked(5).await;
    engine.terminate();

    session.respond_next(data_response(1, 42, 1));
    tokio::time::sleep(Duration::from_millis(10)).await;

    assert!(notifications.try_recv().is_err());
    assert_eq!(session.parked_count(), 4);
    assert_eq!(engine.stats().dropped_responses, 1);
}

/// Transport errors decrement the pending counter and the pipeline refills
/// while subscriptions remain.
#[tokio::test]
async fn transport_error_refills_pipeline() {
    let (engine, session) = new_engine();
    let _notifications = register(&engine, 1);

    session.wait_for_parked(5).await;
    session.fail_next(SessionError::transport("connection reset"));

    // The failed slot is replaced.
    session.wait_for_parked(5).await;
    assert_eq!(engine.pending_publish_request_count(), 5);
    assert_eq!(engine.stats().transport_errors, 1);
}
