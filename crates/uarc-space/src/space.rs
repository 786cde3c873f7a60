// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! The address-space registry.
//!
//! [`AddressSpace`] owns every node and maintains the secondary indices:
//! per-class browse-name maps, the alias table, and the forward/inverse
//! reference-type tables. Secondary indices store node ids and resolve
//! through the primary map, so ownership stays single-rooted.
//!
//! Mutation happens on the load path (`create_node`, `add_reference`,
//! `add_alias`); after the load the space is queried read-only. Query
//! failures are `Option`/status-code outcomes, never errors.

use std::collections::HashMap;

use uarc_core::{IdentifierError, NodeClass, NodeId};

use crate::definition::NodeDefinition;
use crate::error::SpaceError;
use crate::node::{Node, ReferenceTypeNode};
use crate::reference::{Reference, ReferenceDescriptor};

// =============================================================================
// NodeRef
// =============================================================================

/// A node designator: either an id or a string to resolve.
///
/// Strings are checked against the alias table before falling back to the
/// canonical node-id grammar.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    /// An already-resolved node id.
    Id(&'a NodeId),

    /// An alias or canonical node-id string.
    Text(&'a str),
}

impl<'a> From<&'a NodeId> for NodeRef<'a> {
    fn from(node_id: &'a NodeId) -> Self {
        Self::Id(node_id)
    }
}

impl<'a> From<&'a str> for NodeRef<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

// =============================================================================
// AddressSpace
// =============================================================================

/// The server-side node graph with its lookup indices.
#[derive(Debug, Default)]
pub struct AddressSpace {
    /// Primary, owning map.
    nodes: HashMap<NodeId, Node>,

    /// Alias table consulted before node-id parsing.
    aliases: HashMap<String, NodeId>,

    /// Objects and Variables share one browse-name index: both are
    /// browsable instance nodes.
    objects_by_browse_name: HashMap<String, NodeId>,

    object_types_by_browse_name: HashMap<String, NodeId>,
    variable_types_by_browse_name: HashMap<String, NodeId>,
    data_types_by_browse_name: HashMap<String, NodeId>,
    views_by_browse_name: HashMap<String, NodeId>,

    /// Reference types by forward browse name.
    reference_types_by_browse_name: HashMap<String, NodeId>,

    /// Reference types by inverse browse name; maps back to the same nodes.
    reference_types_by_inverse_name: HashMap<String, NodeId>,
}

impl AddressSpace {
    /// Creates an empty address space.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of registered nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if no nodes are registered.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // =========================================================================
    // Construction
    // =========================================================================

    /// Creates a node from a definition and registers it.
    ///
    /// This is the single construction entry point. The definition's initial
    /// references are normalized against the reference-type tables and
    /// attached after registration.
    ///
    /// # Errors
    ///
    /// Any [`SpaceError`] here signals a corrupt load and should abort it.
    pub fn create_node(&mut self, definition: NodeDefinition) -> Result<NodeId, SpaceError> {
        let (node, references) = definition.build()?;
        let node_id = self.register(node)?;
        for reference in references {
            self.add_reference(&node_id, reference)?;
        }
        Ok(node_id)
    }

    /// Registers a built node into the primary map and its class index.
    fn register(&mut self, node: Node) -> Result<NodeId, SpaceError> {
        let node_id = node.node_id().clone();
        if self.nodes.contains_key(&node_id) {
            return Err(SpaceError::duplicate_node_id(node_id));
        }

        let browse_name = node.browse_name().name.clone();
        match &node {
            Node::Object(_) | Node::Variable(_) => {
                self.objects_by_browse_name
                    .insert(browse_name.clone(), node_id.clone());
            }
            Node::ObjectType(_) => {
                self.object_types_by_browse_name
                    .insert(browse_name.clone(), node_id.clone());
            }
            Node::VariableType(_) => {
                self.variable_types_by_browse_name
                    .insert(browse_name.clone(), node_id.clone());
            }
            Node::DataType(_) => {
                self.data_types_by_browse_name
                    .insert(browse_name.clone(), node_id.clone());
            }
            Node::View(_) => {
                self.views_by_browse_name
                    .insert(browse_name.clone(), node_id.clone());
            }
            Node::ReferenceType(reference_type) => {
                // Indexed under both directions; empty inverse names are
                // rejected at build time.
                self.reference_types_by_browse_name
                    .insert(browse_name.clone(), node_id.clone());
                self.reference_types_by_inverse_name
                    .insert(reference_type.inverse_name.text.clone(), node_id.clone());
            }
        }

        tracing::debug!(
            node_id = %node_id,
            browse_name = %browse_name,
            node_class = ?node.node_class(),
            "node registered"
        );

        self.nodes.insert(node_id.clone(), node);
        Ok(node_id)
    }

    /// Appends a reference to a registered node.
    ///
    /// The reference is normalized first, so inverse-name inputs are stored
    /// under the forward browse name with the direction flipped.
    pub fn add_reference(
        &mut self,
        source: &NodeId,
        reference: Reference,
    ) -> Result<(), SpaceError> {
        let normalized = self.normalize_reference_type(&ReferenceDescriptor::new(
            reference.reference_type,
            reference.is_forward,
        ));

        let node = self
            .nodes
            .get_mut(source)
            .ok_or_else(|| SpaceError::unknown_node(source.clone()))?;

        let is_forward = normalized.effective_is_forward();
        node.base_mut().references.push(Reference {
            reference_type: normalized.reference_type,
            target_id: reference.target_id,
            is_forward,
        });
        Ok(())
    }

    /// Registers an alias for a node id.
    pub fn add_alias(&mut self, alias: impl Into<String>, node_id: NodeId) {
        let alias = alias.into();
        tracing::trace!(alias = %alias, node_id = %node_id, "alias registered");
        self.aliases.insert(alias, node_id);
    }

    // =========================================================================
    // Resolution & Lookup
    // =========================================================================

    /// Resolves a node designator to an id.
    ///
    /// Strings match the alias table first, then the canonical node-id
    /// grammar. At protocol surfaces a parse failure becomes
    /// `BadNodeIdInvalid`.
    pub fn resolve_node_id<'a>(
        &self,
        input: impl Into<NodeRef<'a>>,
    ) -> Result<NodeId, IdentifierError> {
        match input.into() {
            NodeRef::Id(node_id) => Ok(node_id.clone()),
            NodeRef::Text(text) => {
                if let Some(node_id) = self.aliases.get(text) {
                    return Ok(node_id.clone());
                }
                text.parse()
            }
        }
    }

    /// Looks up a node by id.
    pub fn find_node(&self, node_id: &NodeId) -> Option<&Node> {
        self.nodes.get(node_id)
    }

    /// Looks up a node by id or string; absent on unknown or unparseable
    /// input.
    pub fn find_object<'a>(&self, input: impl Into<NodeRef<'a>>) -> Option<&Node> {
        let node_id = self.resolve_node_id(input).ok()?;
        self.nodes.get(&node_id)
    }

    /// Looks up an instance node (Object or Variable) by browse name.
    pub fn find_object_by_browse_name(&self, browse_name: &str) -> Option<&Node> {
        self.nodes.get(self.objects_by_browse_name.get(browse_name)?)
    }

    /// Looks up an object type by browse name.
    pub fn find_object_type(&self, browse_name: &str) -> Option<&Node> {
        self.nodes
            .get(self.object_types_by_browse_name.get(browse_name)?)
    }

    /// Looks up a variable type by browse name.
    pub fn find_variable_type(&self, browse_name: &str) -> Option<&Node> {
        self.nodes
            .get(self.variable_types_by_browse_name.get(browse_name)?)
    }

    /// Looks up a data type by browse name.
    pub fn find_data_type(&self, browse_name: &str) -> Option<&Node> {
        self.nodes
            .get(self.data_types_by_browse_name.get(browse_name)?)
    }

    /// Looks up a view by browse name.
    pub fn find_view(&self, browse_name: &str) -> Option<&Node> {
        self.nodes.get(self.views_by_browse_name.get(browse_name)?)
    }

    /// Looks up a reference type by forward browse name or node-id string.
    ///
    /// A name starting with `i=`/`ns=` is resolved as a node id; the result
    /// must be a ReferenceType node.
    pub fn find_reference_type(&self, name: &str) -> Option<&ReferenceTypeNode> {
        let node_id = if NodeId::is_node_id_string(name) {
            name.parse().ok()?
        } else {
            self.reference_types_by_browse_name.get(name)?.clone()
        };
        let node = self.nodes.get(&node_id)?;
        debug_assert!(
            node.node_class() == NodeClass::ReferenceType,
            "id {node_id} does not name a reference type"
        );
        node.as_reference_type()
    }

    /// Looks up a reference type by its inverse browse name.
    pub fn find_reference_type_from_inverse_name(
        &self,
        inverse_name: &str,
    ) -> Option<&ReferenceTypeNode> {
        let node_id = self.reference_types_by_inverse_name.get(inverse_name)?;
        self.nodes.get(node_id)?.as_reference_type()
    }

    // =========================================================================
    // Reference-Type Inversion
    // =========================================================================

    /// Canonicalises a reference descriptor onto the forward browse name.
    ///
    /// - A forward name passes through (direction defaulted to forward).
    /// - An inverse-only name is replaced by the forward name and the
    ///   direction flips.
    /// - Unknown names pass through unchanged; unknown types are tolerated.
    ///
    /// Normalization is idempotent.
    pub fn normalize_reference_type(
        &self,
        descriptor: &ReferenceDescriptor,
    ) -> ReferenceDescriptor {
        let is_forward = descriptor.effective_is_forward();

        if self
            .reference_types_by_browse_name
            .contains_key(&descriptor.reference_type)
        {
            return ReferenceDescriptor::new(descriptor.reference_type.clone(), is_forward);
        }

        if let Some(node_id) = self
            .reference_types_by_inverse_name
            .get(&descriptor.reference_type)
        {
            if let Some(node) = self.nodes.get(node_id) {
                return ReferenceDescriptor::new(node.browse_name().name.clone(), !is_forward);
            }
        }

        ReferenceDescriptor::new(descriptor.reference_type.clone(), is_forward)
    }

    /// Returns the partner name of a reference-type name, in either
    /// direction: forward name → inverse name, inverse name → forward name.
    pub fn inverse_reference_type(&self, name: &str) -> Option<String> {
        if let Some(node_id) = self.reference_types_by_browse_name.get(name) {
            let reference_type = self.nodes.get(node_id)?.as_reference_type()?;
            return Some(reference_type.inverse_name.text.clone());
        }
        if let Some(node_id) = self.reference_types_by_inverse_name.get(name) {
            return Some(self.nodes.get(node_id)?.browse_name().name.clone());
        }
        None
    }

    // =========================================================================
    // Index Access (internal)
    // =========================================================================

    pub(crate) fn reference_type_id_by_name(&self, name: &str) -> Option<&NodeId> {
        self.reference_types_by_browse_name.get(name)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::NodeDefinition;
    use uarc_core::QualifiedName;

    fn space_with_organizes() -> AddressSpace {
        let mut space = AddressSpace::new();
        space
            .create_node(
                NodeDefinition::new(NodeId::numeric(0, 35), NodeClass::ReferenceType, "Organizes")
                    .with_inverse_name("OrganizedBy"),
            )
            .unwrap();
        space
    }

    #[test]
    fn test_register_and_find() {
        let mut space = AddressSpace::new();
        let node_id = space
            .create_node(NodeDefinition::new(
                NodeId::numeric(1, 100),
                NodeClass::Object,
                "Boiler",
            ))
            .unwrap();

        let node = space.find_node(&node_id).unwrap();
        assert_eq!(node.browse_name(), &QualifiedName::standard("Boiler"));
        assert_eq!(space.len(), 1);
    }

    #[test]
    fn test_duplicate_node_id_rejected() {
        let mut space = AddressSpace::new();
        let definition =
            NodeDefinition::new(NodeId::numeric(1, 100), NodeClass::Object, "Boiler");
        space.create_node(definition.clone()).unwrap();

        let result = space.create_node(definition);
        assert!(matches!(result, Err(SpaceError::DuplicateNodeId { .. })));
    }

    #[test]
    fn test_alias_resolution() {
        let mut space = AddressSpace::new();
        space.add_alias("HasTypeDefinition", NodeId::numeric(0, 40));

        let resolved = space.resolve_node_id("HasTypeDefinition").unwrap();
        assert_eq!(resolved, NodeId::numeric(0, 40));

        // Non-aliases fall through to the canonical grammar.
        let resolved = space.resolve_node_id("i=84").unwrap();
        assert_eq!(resolved, NodeId::ROOT_FOLDER);

        assert!(space.resolve_node_id("NotAnAliasOrId").is_err());
    }

    #[test]
    fn test_find_object_absent_on_unknown() {
        let space = AddressSpace::new();
        assert!(space.find_object(&NodeId::numeric(1, 999)).is_none());
        assert!(space.find_object("i=999").is_none());
        assert!(space.find_object("not parseable").is_none());
    }

    #[test]
    fn test_reference_type_indices() {
        let space = space_with_organizes();

        let by_name = space.find_reference_type("Organizes").unwrap();
        assert_eq!(by_name.inverse_name.text, "OrganizedBy");

        let by_inverse = space
            .find_reference_type_from_inverse_name("OrganizedBy")
            .unwrap();
        assert_eq!(by_inverse.base.node_id, NodeId::numeric(0, 35));

        // Lookup through a node-id string.
        let by_id = space.find_reference_type("i=35").unwrap();
        assert_eq!(by_id.base.browse_name.name, "Organizes");

        assert!(space.find_reference_type("HasChild").is_none());
    }

    #[test]
    fn test_normalize_reference_type() {
        let space = space_with_organizes();

        // Inverse name flips direction and renames (scenario from the OPC UA
        // translate semantics).
        let normalized = space
            .normalize_reference_type(&ReferenceDescriptor::new("OrganizedBy", true));
        assert_eq!(normalized, ReferenceDescriptor::new("Organizes", false));

        // Forward name passes through.
        let normalized =
            space.normalize_reference_type(&ReferenceDescriptor::new("Organizes", false));
        assert_eq!(normalized, ReferenceDescriptor::new("Organizes", false));

        // Absent direction defaults to forward.
        let normalized =
            space.normalize_reference_type(&ReferenceDescriptor::unspecified("OrganizedBy"));
        assert_eq!(normalized, ReferenceDescriptor::new("Organizes", false));

        // Unknown names pass through.
        let unknown = ReferenceDescriptor::new("HasWidget", true);
        assert_eq!(space.normalize_reference_type(&unknown), unknown);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let space = space_with_organizes();

        for descriptor in [
            ReferenceDescriptor::new("OrganizedBy", true),
            ReferenceDescriptor::new("Organizes", true),
            ReferenceDescriptor::unspecified("OrganizedBy"),
            ReferenceDescriptor::new("HasWidget", false),
        ] {
            let once = space.normalize_reference_type(&descriptor);
            let twice = space.normalize_reference_type(&once);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_inverse_reference_type_involution() {
        let space = space_with_organizes();

        assert_eq!(
            space.inverse_reference_type("Organizes").as_deref(),
            Some("OrganizedBy")
        );
        assert_eq!(
            space.inverse_reference_type("OrganizedBy").as_deref(),
            Some("Organizes")
        );
        assert_eq!(space.inverse_reference_type("HasWidget"), None);

        let inverse = space.inverse_reference_type("Organizes").unwrap();
        assert_eq!(
            space.inverse_reference_type(&inverse).as_deref(),
            Some("Organizes")
        );
    }

    #[test]
    fn test_add_reference_normalizes() {
        let mut space = space_with_organizes();
        let root = space
            .create_node(NodeDefinition::new(
                NodeId::ROOT_FOLDER,
                NodeClass::Object,
                "Root",
            ))
            .unwrap();

        space
            .add_reference(
                &root,
                Reference::new("OrganizedBy", NodeId::OBJECTS_FOLDER, false).unwrap(),
            )
            .unwrap();

        let stored = &space.find_node(&root).unwrap().base().references[0];
        assert_eq!(stored.reference_type, "Organizes");
        assert!(stored.is_forward);
    }

    #[test]
    fn test_add_reference_unknown_source() {
        let mut space = AddressSpace::new();
        let result = space.add_reference(
            &NodeId::numeric(1, 1),
            Reference::forward("Organizes", NodeId::numeric(1, 2)).unwrap(),
        );
        assert!(matches!(result, Err(SpaceError::UnknownNode { .. })));
    }

    #[test]
    fn test_browse_name_lookups_by_class() {
        let mut space = AddressSpace::new();
        space
            .create_node(NodeDefinition::new(
                NodeId::numeric(0, 24),
                NodeClass::DataType,
                "BaseDataType",
            ))
            .unwrap();
        space
            .create_node(NodeDefinition::new(
                NodeId::numeric(0, 58),
                NodeClass::ObjectType,
                "BaseObjectType",
            ))
            .unwrap();
        space
            .create_node(NodeDefinition::new(
                NodeId::numeric(0, 62),
                NodeClass::VariableType,
                "BaseVariableType",
            ))
            .unwrap();
        space
            .create_node(NodeDefinition::new(
                NodeId::numeric(1, 5000),
                NodeClass::View,
                "PlantView",
            ))
            .unwrap();

        assert!(space.find_data_type("BaseDataType").is_some());
        assert!(space.find_object_type("BaseObjectType").is_some());
        assert!(space.find_variable_type("BaseVariableType").is_some());
        assert!(space.find_view("PlantView").is_some());

        // Each node registers in exactly one class index.
        assert!(space.find_object_by_browse_name("BaseDataType").is_none());
        assert!(space.find_data_type("BaseObjectType").is_none());
    }

    #[test]
    fn test_variables_share_object_index() {
        let mut space = AddressSpace::new();
        space
            .create_node(NodeDefinition::new(
                NodeId::numeric(2, 1),
                NodeClass::Variable,
                "Speed",
            ))
            .unwrap();

        // Variables land in the merged instance index alongside objects.
        assert!(space.objects_by_browse_name.contains_key("Speed"));
        assert!(space.variable_types_by_browse_name.is_empty());
    }
}
