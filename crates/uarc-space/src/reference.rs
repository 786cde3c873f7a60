// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Typed references between nodes.
//!
//! A [`Reference`] is a directed edge `(reference type, target, direction)`.
//! The reference type is always a browse name, never a node-id string; the
//! target is held by node id and resolved lazily through the address space,
//! which keeps the graph free of owning cycles and makes dangling targets a
//! tolerated state during partial loads.

use std::fmt;

use serde::{Deserialize, Serialize};
use uarc_core::NodeId;

use crate::error::SpaceError;

// =============================================================================
// Reference
// =============================================================================

/// A typed directed edge from the node holding it to `target_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// Browse name of the reference type (e.g. `Organizes`).
    pub reference_type: String,

    /// The node the edge points at; may be absent from the space.
    pub target_id: NodeId,

    /// `true` when the edge follows the reference type's natural direction.
    pub is_forward: bool,
}

impl Reference {
    /// Creates a validated reference.
    ///
    /// # Errors
    ///
    /// Returns [`SpaceError::EmptyReferenceType`] for an empty type name and
    /// [`SpaceError::InvalidReferenceType`] when the name looks like a
    /// node-id string (`i=...`, `ns=...`), which signals a corrupt load.
    pub fn new(
        reference_type: impl Into<String>,
        target_id: NodeId,
        is_forward: bool,
    ) -> Result<Self, SpaceError> {
        let reference_type = reference_type.into();
        if reference_type.is_empty() {
            return Err(SpaceError::EmptyReferenceType);
        }
        if NodeId::is_node_id_string(&reference_type) {
            return Err(SpaceError::invalid_reference_type(reference_type));
        }
        Ok(Self {
            reference_type,
            target_id,
            is_forward,
        })
    }

    /// Creates a validated forward reference.
    pub fn forward(
        reference_type: impl Into<String>,
        target_id: NodeId,
    ) -> Result<Self, SpaceError> {
        Self::new(reference_type, target_id, true)
    }

    /// Creates a validated inverse reference.
    pub fn inverse(
        reference_type: impl Into<String>,
        target_id: NodeId,
    ) -> Result<Self, SpaceError> {
        Self::new(reference_type, target_id, false)
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrow = if self.is_forward { "->" } else { "<-" };
        write!(f, "{} {} {}", self.reference_type, arrow, self.target_id)
    }
}

// =============================================================================
// ReferenceDescriptor
// =============================================================================

/// A reference-type name paired with an optional direction.
///
/// Inputs may name a reference type by its inverse browse name (e.g.
/// `OrganizedBy`); [`AddressSpace::normalize_reference_type`] canonicalises a
/// descriptor so the name is always the forward browse name, flipping the
/// direction when needed. An absent direction means forward.
///
/// [`AddressSpace::normalize_reference_type`]: crate::space::AddressSpace::normalize_reference_type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceDescriptor {
    /// Reference-type browse name, forward or inverse.
    pub reference_type: String,

    /// Direction; `None` is treated as forward.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_forward: Option<bool>,
}

impl ReferenceDescriptor {
    /// Creates a descriptor with an explicit direction.
    pub fn new(reference_type: impl Into<String>, is_forward: bool) -> Self {
        Self {
            reference_type: reference_type.into(),
            is_forward: Some(is_forward),
        }
    }

    /// Creates a descriptor with no stated direction.
    pub fn unspecified(reference_type: impl Into<String>) -> Self {
        Self {
            reference_type: reference_type.into(),
            is_forward: None,
        }
    }

    /// Returns the effective direction, defaulting to forward.
    pub fn effective_is_forward(&self) -> bool {
        self.is_forward.unwrap_or(true)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_validation() {
        let ok = Reference::forward("Organizes", NodeId::OBJECTS_FOLDER);
        assert!(ok.is_ok());

        let empty = Reference::forward("", NodeId::OBJECTS_FOLDER);
        assert_eq!(empty.unwrap_err(), SpaceError::EmptyReferenceType);

        let node_id_string = Reference::forward("i=35", NodeId::OBJECTS_FOLDER);
        assert!(matches!(
            node_id_string.unwrap_err(),
            SpaceError::InvalidReferenceType { .. }
        ));

        let namespaced = Reference::forward("ns=1;s=Custom", NodeId::OBJECTS_FOLDER);
        assert!(namespaced.is_err());
    }

    #[test]
    fn test_reference_display() {
        let reference = Reference::inverse("Organizes", NodeId::ROOT_FOLDER).unwrap();
        assert_eq!(reference.to_string(), "Organizes <- i=84");
    }

    #[test]
    fn test_descriptor_direction_default() {
        assert!(ReferenceDescriptor::unspecified("Organizes").effective_is_forward());
        assert!(!ReferenceDescriptor::new("Organizes", false).effective_is_forward());
    }
}
