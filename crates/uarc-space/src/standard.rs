// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Standard-namespace bootstrap.
//!
//! Seeds the minimal ns=0 skeleton most loaders expect to find: the root
//! folder hierarchy, the core reference types with their inverse names and
//! subtype edges, and one alias per reference type. Everything goes through
//! [`AddressSpace::create_node`], the same path external loaders use.

use uarc_core::{NodeClass, NodeId};

use crate::definition::NodeDefinition;
use crate::error::SpaceError;
use crate::reference::Reference;
use crate::space::AddressSpace;

/// Standard reference-type node ids (OPC UA Part 5).
pub mod reference_types {
    use uarc_core::NodeId;

    /// References (abstract base type) - i=31.
    pub const REFERENCES: NodeId = NodeId::numeric(0, 31);

    /// NonHierarchicalReferences (abstract) - i=32.
    pub const NON_HIERARCHICAL_REFERENCES: NodeId = NodeId::numeric(0, 32);

    /// HierarchicalReferences (abstract) - i=33.
    pub const HIERARCHICAL_REFERENCES: NodeId = NodeId::numeric(0, 33);

    /// HasChild (abstract) - i=34.
    pub const HAS_CHILD: NodeId = NodeId::numeric(0, 34);

    /// Organizes - i=35.
    pub const ORGANIZES: NodeId = NodeId::numeric(0, 35);

    /// HasTypeDefinition - i=40.
    pub const HAS_TYPE_DEFINITION: NodeId = NodeId::numeric(0, 40);

    /// HasSubtype - i=45.
    pub const HAS_SUBTYPE: NodeId = NodeId::numeric(0, 45);

    /// HasProperty - i=46.
    pub const HAS_PROPERTY: NodeId = NodeId::numeric(0, 46);

    /// HasComponent - i=47.
    pub const HAS_COMPONENT: NodeId = NodeId::numeric(0, 47);
}

/// The core reference types: (id, browse name, inverse name, abstract,
/// symmetric).
const CORE_REFERENCE_TYPES: &[(NodeId, &str, &str, bool, bool)] = &[
    (reference_types::REFERENCES, "References", "References", true, true),
    (
        reference_types::NON_HIERARCHICAL_REFERENCES,
        "NonHierarchicalReferences",
        "InverseNonHierarchicalReferences",
        true,
        false,
    ),
    (
        reference_types::HIERARCHICAL_REFERENCES,
        "HierarchicalReferences",
        "InverseHierarchicalReferences",
        true,
        false,
    ),
    (reference_types::HAS_CHILD, "HasChild", "ChildOf", true, false),
    (reference_types::ORGANIZES, "Organizes", "OrganizedBy", false, false),
    (
        reference_types::HAS_TYPE_DEFINITION,
        "HasTypeDefinition",
        "TypeDefinitionOf",
        false,
        false,
    ),
    (reference_types::HAS_SUBTYPE, "HasSubtype", "SubtypeOf", false, false),
    (reference_types::HAS_PROPERTY, "HasProperty", "PropertyOf", false, false),
    (reference_types::HAS_COMPONENT, "HasComponent", "ComponentOf", false, false),
];

/// Subtype edges of the core reference-type hierarchy: (supertype, subtype).
const CORE_SUBTYPE_EDGES: &[(NodeId, NodeId)] = &[
    (reference_types::REFERENCES, reference_types::HIERARCHICAL_REFERENCES),
    (reference_types::REFERENCES, reference_types::NON_HIERARCHICAL_REFERENCES),
    (
        reference_types::NON_HIERARCHICAL_REFERENCES,
        reference_types::HAS_TYPE_DEFINITION,
    ),
    (reference_types::HIERARCHICAL_REFERENCES, reference_types::HAS_CHILD),
    (reference_types::HIERARCHICAL_REFERENCES, reference_types::ORGANIZES),
    (reference_types::HAS_CHILD, reference_types::HAS_SUBTYPE),
    (reference_types::HAS_CHILD, reference_types::HAS_COMPONENT),
    (reference_types::HAS_CHILD, reference_types::HAS_PROPERTY),
];

/// The root folder hierarchy: (id, browse name).
const CORE_FOLDERS: &[(NodeId, &str)] = &[
    (NodeId::ROOT_FOLDER, "Root"),
    (NodeId::OBJECTS_FOLDER, "Objects"),
    (NodeId::TYPES_FOLDER, "Types"),
    (NodeId::VIEWS_FOLDER, "Views"),
];

impl AddressSpace {
    /// Creates an address space seeded with the standard ns=0 skeleton.
    pub fn with_standard_nodes() -> Result<Self, SpaceError> {
        let mut space = Self::new();
        space.load_standard_nodes()?;
        Ok(space)
    }

    /// Loads the standard skeleton into this space.
    ///
    /// Reference types come first so the folder edges normalize against
    /// fully populated tables.
    pub fn load_standard_nodes(&mut self) -> Result<(), SpaceError> {
        for (node_id, browse_name, inverse_name, is_abstract, symmetric) in CORE_REFERENCE_TYPES {
            self.create_node(
                NodeDefinition::new(node_id.clone(), NodeClass::ReferenceType, *browse_name)
                    .with_inverse_name(*inverse_name)
                    .with_is_abstract(*is_abstract)
                    .with_symmetric(*symmetric),
            )?;
            self.add_alias(*browse_name, node_id.clone());
        }

        for (supertype, subtype) in CORE_SUBTYPE_EDGES {
            self.add_reference(
                supertype,
                Reference::forward("HasSubtype", subtype.clone())?,
            )?;
        }

        for (node_id, browse_name) in CORE_FOLDERS {
            self.create_node(NodeDefinition::new(
                node_id.clone(),
                NodeClass::Object,
                *browse_name,
            ))?;
        }

        for folder in [
            NodeId::OBJECTS_FOLDER,
            NodeId::TYPES_FOLDER,
            NodeId::VIEWS_FOLDER,
        ] {
            self.add_reference(
                &NodeId::ROOT_FOLDER,
                Reference::forward("Organizes", folder)?,
            )?;
        }

        tracing::debug!(node_count = self.len(), "standard namespace loaded");
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
