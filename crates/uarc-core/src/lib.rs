// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # uarc-core
//!
//! Core types shared by the UARC OPC UA runtime.
//!
//! This crate provides the foundational identity and value types used by both
//! the server-side address space (`uarc-space`) and the client-side publish
//! engine (`uarc-client`):
//!
//! - **NodeId**: All four OPC UA node identifier types with parsing and the
//!   canonical `ns=N;i=M` string form
//! - **QualifiedName / LocalizedText**: Namespaced browse names and
//!   human-readable labels
//! - **NodeClass / AttributeId**: The closed node-class and attribute
//!   enumerations
//! - **StatusCode**: OPC UA status codes with severity predicates
//! - **Variant / DataValue**: The attribute value model
//! - **Service types**: Browse-path and publish request/response shapes
//!
//! # Example
//!
//! ```
//! use uarc_core::{NodeId, QualifiedName, StatusCode};
//!
//! let node: NodeId = "ns=2;s=Machine.Temperature".parse().unwrap();
//! assert_eq!(node.to_opc_string(), "ns=2;s=Machine.Temperature");
//!
//! let name = QualifiedName::from("2:Temperature");
//! assert_eq!(name.namespace_index, 2);
//!
//! assert!(StatusCode::Good.is_good());
//! assert!(StatusCode::BadNoMatch.is_bad());
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod attribute;
pub mod error;
pub mod names;
pub mod node_id;
pub mod service;
pub mod status;
pub mod values;

// Re-export commonly used types
pub use attribute::{AttributeId, NodeClass};
pub use error::IdentifierError;
pub use names::{LocalizedText, QualifiedName};
pub use node_id::{NodeId, NodeIdentifier};
pub use service::{
    BrowsePath, BrowsePathResult, BrowsePathTarget, MonitoredItemNotification,
    NotificationData, NotificationMessage, PublishRequest, PublishResponse, RelativePath,
    RelativePathElement, RequestHeader, SubscriptionAcknowledgement, NO_REMAINING_PATH,
};
pub use status::StatusCode;
pub use values::{DataValue, Variant};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
