// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # uarc-space
//!
//! Server-side address space for the UARC OPC UA runtime.
//!
//! The address space is a typed directed multigraph: nodes are objects,
//! variables, types, and views; edges are typed, bidirectional references.
//! This crate provides:
//!
//! - **Node variants**: the seven node classes with class-specific attributes
//!   and a uniform `read_attribute` surface
//! - **References**: typed edges stored by target node id, so dangling
//!   references in a partial load are a tolerated first-class state
//! - **AddressSpace**: the owning registry with per-class browse-name
//!   indices, an alias table, and the forward/inverse reference-type tables
//! - **Browse-path translation**: the recursive `TranslateBrowsePathsToNodeIds`
//!   resolution with OPC UA status-code semantics
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         AddressSpace                            │
//! │   nodes (owning)   aliases   browse-name indices   ref-types    │
//! └─────────────────────────────────────────────────────────────────┘
//!          │                   │                    │
//!          ▼                   ▼                    ▼
//!   NodeDefinition        Reference          translate_browse_path
//!   (construction)     (typed edges)        (path → BrowsePathResult)
//! ```
//!
//! # Example
//!
//! ```
//! use uarc_space::AddressSpace;
//! use uarc_core::NodeId;
//!
//! let space = AddressSpace::with_standard_nodes().unwrap();
//!
//! let objects = space.simple_browse_path("/", "Objects").unwrap();
//! assert_eq!(objects, NodeId::OBJECTS_FOLDER);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod definition;
pub mod error;
pub mod node;
pub mod reference;
pub mod space;
pub mod standard;
pub mod translate;

// Re-export commonly used types
pub use definition::NodeDefinition;
pub use error::SpaceError;
pub use node::{
    DataTypeNode, Node, NodeBase, ObjectNode, ObjectTypeNode, ReferenceTypeNode, VariableNode,
    VariableTypeNode, ViewNode,
};
pub use reference::{Reference, ReferenceDescriptor};
pub use space::{AddressSpace, NodeRef};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
