// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Node construction templates.
//!
//! A [`NodeDefinition`] captures everything needed to build one node:
//! identity, class, browse name, and the class-specific attributes. It is
//! the single input to [`AddressSpace::create_node`], the only way nodes
//! enter the space.
//!
//! [`AddressSpace::create_node`]: crate::space::AddressSpace::create_node
//!
//! # Examples
//!
//! ```
//! use uarc_space::{AddressSpace, NodeDefinition};
//! use uarc_core::{NodeClass, NodeId};
//!
//! let mut space = AddressSpace::new();
//! space
//!     .create_node(
//!         NodeDefinition::new(NodeId::numeric(1, 100), NodeClass::Object, "Boiler")
//!             .with_display_name("Boiler #1")
//!             .with_event_notifier(1),
//!     )
//!     .unwrap();
//! ```

use uarc_core::{DataValue, LocalizedText, NodeClass, NodeId, QualifiedName};

use crate::error::SpaceError;
use crate::node::{
    DataTypeNode, Node, NodeBase, ObjectNode, ObjectTypeNode, ReferenceTypeNode, VariableNode,
    VariableTypeNode, ViewNode,
};
use crate::reference::Reference;

// =============================================================================
// NodeDefinition
// =============================================================================

/// Template for one node, consumed by `AddressSpace::create_node`.
#[derive(Debug, Clone)]
pub struct NodeDefinition {
    pub(crate) node_id: NodeId,
    pub(crate) node_class: NodeClass,
    pub(crate) browse_name: QualifiedName,
    pub(crate) display_name: Option<LocalizedText>,
    pub(crate) description: Option<LocalizedText>,
    pub(crate) references: Vec<Reference>,

    // Object / View
    pub(crate) event_notifier: u8,
    pub(crate) contains_no_loops: bool,

    // Type nodes
    pub(crate) is_abstract: bool,
    pub(crate) symmetric: bool,
    pub(crate) inverse_name: Option<LocalizedText>,

    // Variable
    pub(crate) value: DataValue,
    pub(crate) data_type: NodeId,
    pub(crate) value_rank: i32,
    pub(crate) array_dimensions: Vec<u32>,
    pub(crate) access_level: u8,
    pub(crate) user_access_level: u8,
    pub(crate) minimum_sampling_interval: f64,
    pub(crate) historizing: bool,
}

impl NodeDefinition {
    /// Creates a definition with the three required attributes.
    pub fn new(
        node_id: NodeId,
        node_class: NodeClass,
        browse_name: impl Into<QualifiedName>,
    ) -> Self {
        Self {
            node_id,
            node_class,
            browse_name: browse_name.into(),
            display_name: None,
            description: None,
            references: Vec::new(),
            event_notifier: 0,
            contains_no_loops: false,
            is_abstract: false,
            symmetric: false,
            inverse_name: None,
            value: DataValue::default(),
            data_type: NodeId::null(),
            value_rank: -1,
            array_dimensions: Vec::new(),
            access_level: 1,
            user_access_level: 1,
            minimum_sampling_interval: 0.0,
            historizing: false,
        }
    }

    /// Sets the display name.
    pub fn with_display_name(mut self, display_name: impl Into<LocalizedText>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<LocalizedText>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds an initial reference.
    pub fn with_reference(mut self, reference: Reference) -> Self {
        self.references.push(reference);
        self
    }

    /// Sets the event notifier bits (Object, View).
    pub fn with_event_notifier(mut self, event_notifier: u8) -> Self {
        self.event_notifier = event_notifier;
        self
    }

    /// Sets the contains-no-loops flag (View).
    pub fn with_contains_no_loops(mut self, contains_no_loops: bool) -> Self {
        self.contains_no_loops = contains_no_loops;
        self
    }

    /// Sets the abstract flag (type nodes).
    pub fn with_is_abstract(mut self, is_abstract: bool) -> Self {
        self.is_abstract = is_abstract;
        self
    }

    /// Sets the symmetric flag (ReferenceType).
    pub fn with_symmetric(mut self, symmetric: bool) -> Self {
        self.symmetric = symmetric;
        self
    }

    /// Sets the inverse browse name (ReferenceType, required).
    pub fn with_inverse_name(mut self, inverse_name: impl Into<LocalizedText>) -> Self {
        self.inverse_name = Some(inverse_name.into());
        self
    }

    /// Sets the value (Variable).
    pub fn with_value(mut self, value: DataValue) -> Self {
        self.value = value;
        self
    }

    /// Sets the data type (Variable).
    pub fn with_data_type(mut self, data_type: NodeId) -> Self {
        self.data_type = data_type;
        self
    }

    /// Sets the value rank (Variable).
    pub fn with_value_rank(mut self, value_rank: i32) -> Self {
        self.value_rank = value_rank;
        self
    }

    /// Sets the array dimensions (Variable).
    pub fn with_array_dimensions(mut self, array_dimensions: Vec<u32>) -> Self {
        self.array_dimensions = array_dimensions;
        self
    }

    /// Sets access level and user access level (Variable).
    pub fn with_access_levels(mut self, access_level: u8, user_access_level: u8) -> Self {
        self.access_level = access_level;
        self.user_access_level = user_access_level;
        self
    }

    /// Sets the minimum sampling interval in milliseconds (Variable).
    pub fn with_minimum_sampling_interval(mut self, interval_ms: f64) -> Self {
        self.minimum_sampling_interval = interval_ms;
        self
    }

    /// Sets the historizing flag (Variable).
    pub fn with_historizing(mut self, historizing: bool) -> Self {
        self.historizing = historizing;
        self
    }

    /// Builds the node variant, consuming the definition.
    ///
    /// Initial references are returned separately so the address space can
    /// normalize them against its reference-type tables after registration.
    pub(crate) fn build(self) -> Result<(Node, Vec<Reference>), SpaceError> {
        if self.browse_name.is_empty() {
            return Err(SpaceError::empty_browse_name(self.node_id));
        }

        let mut base = NodeBase::new(self.node_id.clone(), self.browse_name);
        if let Some(display_name) = self.display_name {
            base.display_name = display_name;
        }
        if let Some(description) = self.description {
            base.description = description;
        }

        let node = match self.node_class {
            NodeClass::Object => Node::Object(ObjectNode {
                base,
                event_notifier: self.event_notifier,
            }),
            NodeClass::ObjectType => Node::ObjectType(ObjectTypeNode {
                base,
                is_abstract: self.is_abstract,
            }),
            NodeClass::Variable => Node::Variable(VariableNode {
                base,
                value: self.value,
                data_type: self.data_type,
                value_rank: self.value_rank,
                array_dimensions: self.array_dimensions,
                access_level: self.access_level,
                user_access_level: self.user_access_level,
                minimum_sampling_interval: self.minimum_sampling_interval,
                historizing: self.historizing,
            }),
            NodeClass::VariableType => Node::VariableType(VariableTypeNode {
                base,
                is_abstract: self.is_abstract,
            }),
            NodeClass::ReferenceType => {
                let inverse_name = self
                    .inverse_name
                    .ok_or_else(|| SpaceError::empty_inverse_name(self.node_id.clone()))?;
                if inverse_name.is_empty() {
                    return Err(SpaceError::empty_inverse_name(self.node_id));
                }
                Node::ReferenceType(ReferenceTypeNode {
                    base,
                    inverse_name,
                    is_abstract: self.is_abstract,
                    symmetric: self.symmetric,
                })
            }
            NodeClass::DataType => Node::DataType(DataTypeNode {
                base,
                is_abstract: self.is_abstract,
            }),
            NodeClass::View => Node::View(ViewNode {
                base,
                contains_no_loops: self.contains_no_loops,
                event_notifier: self.event_notifier,
            }),
            NodeClass::Method => {
                return Err(SpaceError::unsupported_node_class(
                    self.node_id,
                    NodeClass::Method,
                ));
            }
        };

        Ok((node, self.references))
    }
}

// =============================================================================
// Tests
// =============================================================================
