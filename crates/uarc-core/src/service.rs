// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Service request and response shapes.
//!
//! These are the wire-level structures exchanged between the service layer
//! and the two runtime subsystems: browse-path translation
//! ([`BrowsePath`]/[`BrowsePathResult`]) and the publish pipeline
//! ([`PublishRequest`]/[`PublishResponse`]). Encoding and transport are
//! handled elsewhere; this module only defines the semantic shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::names::QualifiedName;
use crate::node_id::NodeId;
use crate::status::StatusCode;
use crate::values::DataValue;

/// Sentinel `remaining_path_index` meaning the entire path was consumed.
pub const NO_REMAINING_PATH: u32 = 0xFFFF_FFFF;

// =============================================================================
// Browse Path Types
// =============================================================================

/// One hop of a relative path: a reference-type filter plus a target name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelativePathElement {
    /// Reference type to follow; the null id or `References` (i=31) matches
    /// every reference type.
    pub reference_type_id: NodeId,

    /// Follow the reference against its natural direction.
    #[serde(default)]
    pub is_inverse: bool,

    /// Also match subtypes of the reference type.
    #[serde(default)]
    pub include_subtypes: bool,

    /// Browse name the hop must land on.
    pub target_name: QualifiedName,
}

impl RelativePathElement {
    /// Creates an element matching any reference type.
    pub fn any_reference(target_name: QualifiedName) -> Self {
        Self {
            reference_type_id: NodeId::null(),
            is_inverse: false,
            include_subtypes: false,
            target_name,
        }
    }

    /// Checks whether a browse name satisfies this element's target name.
    ///
    /// A namespace-0 target name matches the name part in any namespace;
    /// otherwise both namespace and name must agree.
    pub fn matches_browse_name(&self, browse_name: &QualifiedName) -> bool {
        if self.target_name.namespace_index == 0 {
            self.target_name.name == browse_name.name
        } else {
            self.target_name == *browse_name
        }
    }
}

/// A sequence of hops from a starting node.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RelativePath {
    /// The hops, applied in order.
    pub elements: Vec<RelativePathElement>,
}

/// A starting node plus a relative path to translate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowsePath {
    /// Node the path is anchored at.
    pub starting_node: NodeId,

    /// Hops to follow from the starting node.
    pub relative_path: RelativePath,
}

/// One node reached by a translated path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowsePathTarget {
    /// The node the path resolved to.
    pub target_id: NodeId,

    /// Index of the first unprocessed path element, or
    /// [`NO_REMAINING_PATH`] when the whole path was consumed.
    pub remaining_path_index: u32,
}

/// Outcome of translating one browse path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowsePathResult {
    /// Overall status of the translation.
    pub status_code: StatusCode,

    /// Matching targets in depth-first traversal order.
    pub targets: Vec<BrowsePathTarget>,
}

impl BrowsePathResult {
    /// Creates a failed result with no targets.
    pub fn bad(status_code: StatusCode) -> Self {
        Self {
            status_code,
            targets: Vec::new(),
        }
    }

    /// Creates a good result from the collected targets.
    pub fn good(targets: Vec<BrowsePathTarget>) -> Self {
        Self {
            status_code: StatusCode::Good,
            targets,
        }
    }
}

// =============================================================================
// Publish Service Types
// =============================================================================

/// Common request header; only the timeout hint matters to this core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RequestHeader {
    /// Advisory per-request timeout in milliseconds. Zero means no hint,
    /// which some servers misread as "immediately stale".
    pub timeout_hint: u32,
}

/// Acknowledgement of one received notification message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionAcknowledgement {
    /// Subscription the notification belonged to.
    pub subscription_id: u32,

    /// Sequence number being acknowledged.
    pub sequence_number: u32,
}

/// A publish request: outstanding credit for the server plus batched acks.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PublishRequest {
    /// Request header carrying the timeout hint.
    pub request_header: RequestHeader,

    /// Acknowledgements drained from the pending batch.
    pub subscription_acknowledgements: Vec<SubscriptionAcknowledgement>,
}

/// Notification payload kinds carried inside a notification message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NotificationData {
    /// Data-change notifications for monitored items.
    DataChange {
        /// Changed items in server order.
        monitored_items: Vec<MonitoredItemNotification>,
    },

    /// A subscription status change.
    StatusChange {
        /// The new subscription status.
        status: StatusCode,
    },
}

/// One changed monitored item inside a data-change notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitoredItemNotification {
    /// Client-assigned handle correlating the item.
    pub client_handle: u32,

    /// The new value.
    pub value: DataValue,
}

/// A sequenced batch of notifications for one subscription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationMessage {
    /// Sequence number of this message within its subscription.
    pub sequence_number: u32,

    /// Time the server published the message.
    pub publish_time: DateTime<Utc>,

    /// Notification payloads; empty for a keep-alive.
    #[serde(default)]
    pub notification_data: Vec<NotificationData>,
}

impl NotificationMessage {
    /// Creates a keep-alive message (no notification payloads).
    pub fn keep_alive(sequence_number: u32, publish_time: DateTime<Utc>) -> Self {
        Self {
            sequence_number,
            publish_time,
            notification_data: Vec::new(),
        }
    }

    /// Returns `true` if this message carries no payloads.
    pub fn is_keep_alive(&self) -> bool {
        self.notification_data.is_empty()
    }
}

/// A publish response demultiplexed to one subscription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishResponse {
    /// Subscription the notification message belongs to.
    pub subscription_id: u32,

    /// Sequence numbers the server still holds for retransmission.
    #[serde(default)]
    pub available_sequence_numbers: Vec<u32>,

    /// `true` if further notifications are queued server-side.
    #[serde(default)]
    pub more_notifications: bool,

    /// The notification message itself.
    pub notification_message: NotificationMessage,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_name_matching() {
        let element = RelativePathElement::any_reference(QualifiedName::standard("Objects"));
        assert!(element.matches_browse_name(&QualifiedName::standard("Objects")));
        // Namespace 0 in the filter matches the same name in any namespace.
        assert!(element.matches_browse_name(&QualifiedName::new(2, "Objects")));
        assert!(!element.matches_browse_name(&QualifiedName::standard("Types")));

        let qualified = RelativePathElement::any_reference(QualifiedName::new(2, "Pump"));
        assert!(qualified.matches_browse_name(&QualifiedName::new(2, "Pump")));
        assert!(!qualified.matches_browse_name(&QualifiedName::new(3, "Pump")));
    }

    #[test]
    fn test_keep_alive_detection() {
        let message = NotificationMessage::keep_alive(9, Utc::now());
        assert!(message.is_keep_alive());

        let data = NotificationMessage {
            sequence_number: 10,
            publish_time: Utc::now(),
            notification_data: vec![NotificationData::StatusChange {
                status: StatusCode::Good,
            }],
        };
        assert!(!data.is_keep_alive());
    }

    #[test]
    fn test_publish_request_serde() {
        let request = PublishRequest {
            request_header: RequestHeader { timeout_hint: 10_000 },
            subscription_acknowledgements: vec![SubscriptionAcknowledgement {
                subscription_id: 1,
                sequence_number: 42,
            }],
        };

        let json = serde_json::to_string(&request).unwrap();
        let decoded: PublishRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, request);
    }

    #[test]
    fn test_remaining_path_sentinel() {
        assert_eq!(NO_REMAINING_PATH, u32::MAX);
    }
}
