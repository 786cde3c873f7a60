// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Address-space construction errors.
//!
//! These errors surface programmer mistakes during address-space load:
//! duplicate ids, malformed references, missing required fields. They abort
//! the load. Runtime queries never produce them; query failure is expressed
//! through `Option` returns and OPC UA status codes.

use thiserror::Error;
use uarc_core::{NodeClass, NodeId};

// =============================================================================
// SpaceError
// =============================================================================

/// Errors raised while constructing or mutating the address space.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpaceError {
    /// A node with the same id is already registered.
    #[error("node id {node_id} is already registered")]
    DuplicateNodeId {
        /// The conflicting node id.
        node_id: NodeId,
    },

    /// A node was defined with an empty browse name.
    #[error("node {node_id} has an empty browse name")]
    EmptyBrowseName {
        /// The offending node id.
        node_id: NodeId,
    },

    /// A reference type was defined without an inverse name.
    #[error("reference type {node_id} has an empty inverse name")]
    EmptyInverseName {
        /// The offending node id.
        node_id: NodeId,
    },

    /// The node class has no variant in this address space.
    #[error("node class {node_class:?} is not supported for node {node_id}")]
    UnsupportedNodeClass {
        /// The offending node id.
        node_id: NodeId,
        /// The unsupported class.
        node_class: NodeClass,
    },

    /// A reference was built with an empty reference-type name.
    #[error("reference type name must not be empty")]
    EmptyReferenceType,

    /// A reference named its type with a node-id string instead of a browse
    /// name.
    #[error("reference type '{reference_type}' looks like a node id, expected a browse name")]
    InvalidReferenceType {
        /// The offending reference-type string.
        reference_type: String,
    },

    /// An operation named a node that is not registered.
    #[error("node {node_id} is not registered in the address space")]
    UnknownNode {
        /// The missing node id.
        node_id: NodeId,
    },
}

impl SpaceError {
    /// Creates a duplicate-node-id error.
    pub fn duplicate_node_id(node_id: NodeId) -> Self {
        Self::DuplicateNodeId { node_id }
    }

    /// Creates an empty-browse-name error.
    pub fn empty_browse_name(node_id: NodeId) -> Self {
        Self::EmptyBrowseName { node_id }
    }

    /// Creates an empty-inverse-name error.
    pub fn empty_inverse_name(node_id: NodeId) -> Self {
        Self::EmptyInverseName { node_id }
    }

    /// Creates an unsupported-node-class error.
    pub fn unsupported_node_class(node_id: NodeId, node_class: NodeClass) -> Self {
        Self::UnsupportedNodeClass {
            node_id,
            node_class,
        }
    }

    /// Creates an invalid-reference-type error.
    pub fn invalid_reference_type(reference_type: impl Into<String>) -> Self {
        Self::InvalidReferenceType {
            reference_type: reference_type.into(),
        }
    }

    /// Creates an unknown-node error.
    pub fn unknown_node(node_id: NodeId) -> Self {
        Self::UnknownNode { node_id }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = SpaceError::duplicate_node_id(NodeId::numeric(0, 84));
        assert!(error.to_string().contains("i=84"));

        let error = SpaceError::invalid_reference_type("i=35");
        assert!(error.to_string().contains("i=35"));
    }
}
