// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Node variants of the address space.
//!
//! Every node shares the [`NodeBase`] attributes; the class-specific payload
//! lives in the variant structs, and the sealed [`Node`] sum type dispatches
//! over them. Attribute reads follow the OPC UA model: the variant answers
//! its own attributes and falls back to the base handler for the common
//! ones; anything else yields a `DataValue` carrying `BadAttributeIdInvalid`.
//!
//! Nodes hold no pointer back to their address space. Graph queries that need
//! the surrounding space (`browse_node_by_target_name` and friends) are
//! methods on [`AddressSpace`] taking a node id.
//!
//! [`AddressSpace`]: crate::space::AddressSpace

use uarc_core::{
    AttributeId, DataValue, LocalizedText, NodeClass, NodeId, QualifiedName, StatusCode, Variant,
};

use crate::reference::Reference;

// =============================================================================
// NodeBase
// =============================================================================

/// Attributes common to every node class.
///
/// `node_id`, `browse_name`, and the node class are immutable after
/// construction; only the reference list may grow.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeBase {
    /// The node's identity.
    pub node_id: NodeId,

    /// Namespaced browse name; never empty.
    pub browse_name: QualifiedName,

    /// Human-readable display name.
    pub display_name: LocalizedText,

    /// Optional description.
    pub description: LocalizedText,

    /// Outgoing and incoming typed edges, held by target id.
    pub references: Vec<Reference>,
}

impl NodeBase {
    /// Creates a base with the display name defaulting to the browse name.
    pub fn new(node_id: NodeId, browse_name: QualifiedName) -> Self {
        let display_name = LocalizedText::new(browse_name.name.clone());
        Self {
            node_id,
            browse_name,
            display_name,
            description: LocalizedText::default(),
            references: Vec::new(),
        }
    }

    /// Answers the attributes every node class shares.
    fn read_attribute(&self, attribute: AttributeId, node_class: NodeClass) -> DataValue {
        match attribute {
            AttributeId::NodeId => DataValue::good(Variant::NodeId(self.node_id.clone())),
            AttributeId::NodeClass => DataValue::good(Variant::Int32(node_class.value() as i32)),
            AttributeId::BrowseName => {
                DataValue::good(Variant::QualifiedName(self.browse_name.clone()))
            }
            AttributeId::DisplayName => {
                DataValue::good(Variant::LocalizedText(self.display_name.clone()))
            }
            AttributeId::Description => {
                DataValue::good(Variant::LocalizedText(self.description.clone()))
            }
            _ => DataValue::bad(StatusCode::BadAttributeIdInvalid),
        }
    }
}

// =============================================================================
// Node Variants
// =============================================================================

/// An Object node.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectNode {
    /// Common attributes.
    pub base: NodeBase,

    /// Event notifier bits.
    pub event_notifier: u8,
}

impl ObjectNode {
    fn read_attribute(&self, attribute: AttributeId) -> DataValue {
        match attribute {
            AttributeId::EventNotifier => DataValue::good(Variant::Byte(self.event_notifier)),
            _ => self.base.read_attribute(attribute, NodeClass::Object),
        }
    }
}

/// An ObjectType node.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectTypeNode {
    /// Common attributes.
    pub base: NodeBase,

    /// `true` if the type cannot be instantiated directly.
    pub is_abstract: bool,
}

impl ObjectTypeNode {
    fn read_attribute(&self, attribute: AttributeId) -> DataValue {
        match attribute {
            AttributeId::IsAbstract => DataValue::good(Variant::Boolean(self.is_abstract)),
            _ => self.base.read_attribute(attribute, NodeClass::ObjectType),
        }
    }
}

/// A Variable node.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableNode {
    /// Common attributes.
    pub base: NodeBase,

    /// Current value.
    pub value: DataValue,

    /// Data type of the value.
    pub data_type: NodeId,

    /// Value rank (-1 = scalar).
    pub value_rank: i32,

    /// Array dimensions for array-valued variables.
    pub array_dimensions: Vec<u32>,

    /// Access level bits.
    pub access_level: u8,

    /// User access level bits.
    pub user_access_level: u8,

    /// Minimum sampling interval in milliseconds.
    pub minimum_sampling_interval: f64,

    /// `true` if the server keeps history for this variable.
    pub historizing: bool,
}

impl VariableNode {
    fn read_attribute(&self, attribute: AttributeId) -> DataValue {
        match attribute {
            AttributeId::Value => self.value.clone(),
            AttributeId::DataType => DataValue::good(Variant::NodeId(self.data_type.clone())),
            AttributeId::ValueRank => DataValue::good(Variant::Int32(self.value_rank)),
            AttributeId::ArrayDimensions => DataValue::good(Variant::Array(
                self.array_dimensions.iter().map(|d| Variant::UInt32(*d)).collect(),
            )),
            AttributeId::AccessLevel => DataValue::good(Variant::Byte(self.access_level)),
            AttributeId::UserAccessLevel => {
                DataValue::good(Variant::Byte(self.user_access_level))
            }
            AttributeId::MinimumSamplingInterval => {
                DataValue::good(Variant::Double(self.minimum_sampling_interval))
            }
            AttributeId::Historizing => DataValue::good(Variant::Boolean(self.historizing)),
            _ => self.base.read_attribute(attribute, NodeClass::Variable),
        }
    }
}

/// A VariableType node.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableTypeNode {
    /// Common attributes.
    pub base: NodeBase,

    /// `true` if the type cannot be instantiated directly.
    pub is_abstract: bool,
}

impl VariableTypeNode {
    fn read_attribute(&self, attribute: AttributeId) -> DataValue {
        match attribute {
            AttributeId::IsAbstract => DataValue::good(Variant::Boolean(self.is_abstract)),
            _ => self.base.read_attribute(attribute, NodeClass::VariableType),
        }
    }
}

/// A ReferenceType node.
///
/// Every reference type carries an inverse browse name; the address space
/// indexes both directions so either name resolves to the same node.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceTypeNode {
    /// Common attributes.
    pub base: NodeBase,

    /// Browse name of the inverse direction; never empty.
    pub inverse_name: LocalizedText,

    /// `true` if the reference type is abstract.
    pub is_abstract: bool,

    /// `true` if the reference reads the same in both directions.
    pub symmetric: bool,
}

impl ReferenceTypeNode {
    fn read_attribute(&self, attribute: AttributeId) -> DataValue {
        match attribute {
            AttributeId::IsAbstract => DataValue::good(Variant::Boolean(self.is_abstract)),
            AttributeId::Symmetric => DataValue::good(Variant::Boolean(self.symmetric)),
            AttributeId::InverseName => {
                DataValue::good(Variant::LocalizedText(self.inverse_name.clone()))
            }
            _ => self.base.read_attribute(attribute, NodeClass::ReferenceType),
        }
    }
}

/// A DataType node.
#[derive(Debug, Clone, PartialEq)]
pub struct DataTypeNode {
    /// Common attributes.
    pub base: NodeBase,

    /// `true` if the data type is abstract.
    pub is_abstract: bool,
}

impl DataTypeNode {
    fn read_attribute(&self, attribute: AttributeId) -> DataValue {
        match attribute {
            AttributeId::IsAbstract => DataValue::good(Variant::Boolean(self.is_abstract)),
            _ => self.base.read_attribute(attribute, NodeClass::DataType),
        }
    }
}

/// A View node.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewNode {
    /// Common attributes.
    pub base: NodeBase,

    /// `true` if the view's subgraph is loop-free.
    pub contains_no_loops: bool,

    /// Event notifier bits.
    pub event_notifier: u8,
}

impl ViewNode {
    fn read_attribute(&self, attribute: AttributeId) -> DataValue {
        match attribute {
            AttributeId::EventNotifier => {
                DataValue::good(Variant::UInt32(self.event_notifier as u32))
            }
            AttributeId::ContainsNoLoops => {
                DataValue::good(Variant::Boolean(self.contains_no_loops))
            }
            _ => self.base.read_attribute(attribute, NodeClass::View),
        }
    }
}

// =============================================================================
// Node
// =============================================================================

/// The sealed sum of node classes held by the address space.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Object node.
    Object(ObjectNode),
    /// ObjectType node.
    ObjectType(ObjectTypeNode),
    /// Variable node.
    Variable(VariableNode),
    /// VariableType node.
    VariableType(VariableTypeNode),
    /// ReferenceType node.
    ReferenceType(ReferenceTypeNode),
    /// DataType node.
    DataType(DataTypeNode),
    /// View node.
    View(ViewNode),
}

impl Node {
    /// Returns the node's class.
    pub const fn node_class(&self) -> NodeClass {
        match self {
            Self::Object(_) => NodeClass::Object,
            Self::ObjectType(_) => NodeClass::ObjectType,
            Self::Variable(_) => NodeClass::Variable,
            Self::VariableType(_) => NodeClass::VariableType,
            Self::ReferenceType(_) => NodeClass::ReferenceType,
            Self::DataType(_) => NodeClass::DataType,
            Self::View(_) => NodeClass::View,
        }
    }

    /// Returns the shared base attributes.
    pub const fn base(&self) -> &NodeBase {
        match self {
            Self::Object(n) => &n.base,
            Self::ObjectType(n) => &n.base,
            Self::Variable(n) => &n.base,
            Self::VariableType(n) => &n.base,
            Self::ReferenceType(n) => &n.base,
            Self::DataType(n) => &n.base,
            Self::View(n) => &n.base,
        }
    }

    /// Returns the shared base attributes mutably.
    pub fn base_mut(&mut self) -> &mut NodeBase {
        match self {
            Self::Object(n) => &mut n.base,
            Self::ObjectType(n) => &mut n.base,
            Self::Variable(n) => &mut n.base,
            Self::VariableType(n) => &mut n.base,
            Self::ReferenceType(n) => &mut n.base,
            Self::DataType(n) => &mut n.base,
            Self::View(n) => &mut n.base,
        }
    }

    /// Returns the node id.
    pub const fn node_id(&self) -> &NodeId {
        &self.base().node_id
    }

    /// Returns the browse name.
    pub const fn browse_name(&self) -> &QualifiedName {
        &self.base().browse_name
    }

    /// Returns the reference-type payload, if this is a ReferenceType node.
    pub const fn as_reference_type(&self) -> Option<&ReferenceTypeNode> {
        match self {
            Self::ReferenceType(n) => Some(n),
            _ => None,
        }
    }

    /// Returns the variable payload, if this is a Variable node.
    pub const fn as_variable(&self) -> Option<&VariableNode> {
        match self {
            Self::Variable(n) => Some(n),
            _ => None,
        }
    }

    /// Reads an attribute, answering `BadAttributeIdInvalid` for attributes
    /// the node class does not carry.
    pub fn read_attribute(&self, attribute: AttributeId) -> DataValue {
        match self {
            Self::Object(n) => n.read_attribute(attribute),
            Self::ObjectType(n) => n.read_attribute(attribute),
            Self::Variable(n) => n.read_attribute(attribute),
            Self::VariableType(n) => n.read_attribute(attribute),
            Self::ReferenceType(n) => n.read_attribute(attribute),
            Self::DataType(n) => n.read_attribute(attribute),
            Self::View(n) => n.read_attribute(attribute),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn view_node() -> Node {
        Node::View(ViewNode {
            base: NodeBase::new(NodeId::numeric(1, 2000), QualifiedName::new(1, "PlantView")),
            contains_no_loops: true,
            event_notifier: 1,
        })
    }

    #[test]
    fn test_common_attributes() {
        let node = view_node();

        let value = node.read_attribute(AttributeId::BrowseName);
        assert!(value.is_good());
        assert_eq!(
            value.value,
            Some(Variant::QualifiedName(QualifiedName::new(1, "PlantView")))
        );

        let value = node.read_attribute(AttributeId::NodeClass);
        assert_eq!(value.value.unwrap().as_i64(), Some(NodeClass::View.value() as i64));
    }

    #[test]
    fn test_view_specific_attributes() {
        let node = view_node();

        let event_notifier = node.read_attribute(AttributeId::EventNotifier);
        assert!(event_notifier.is_good());
        assert_eq!(event_notifier.value, Some(Variant::UInt32(1)));

        let no_loops = node.read_attribute(AttributeId::ContainsNoLoops);
        assert_eq!(no_loops.value, Some(Variant::Boolean(true)));
    }

    #[test]
    fn test_unsupported_attribute() {
        let node = view_node();
        let value = node.read_attribute(AttributeId::Historizing);
        assert_eq!(value.status, StatusCode::BadAttributeIdInvalid);
        assert!(value.value.is_none());
    }

    #[test]
    fn test_variable_attributes() {
        let node = Node::Variable(VariableNode {
            base: NodeBase::new(NodeId::numeric(2, 10), QualifiedName::new(2, "Speed")),
            value: DataValue::good(Variant::Double(42.5)),
            data_type: NodeId::numeric(0, 11),
            value_rank: -1,
            array_dimensions: Vec::new(),
            access_level: 3,
            user_access_level: 3,
            minimum_sampling_interval: 100.0,
            historizing: false,
        });

        assert_eq!(
            node.read_attribute(AttributeId::Value).value,
            Some(Variant::Double(42.5))
        );
        assert_eq!(
            node.read_attribute(AttributeId::DataType).value,
            Some(Variant::NodeId(NodeId::numeric(0, 11)))
        );
        assert_eq!(
            node.read_attribute(AttributeId::AccessLevel).value,
            Some(Variant::Byte(3))
        );
        assert_eq!(
            node.read_attribute(AttributeId::Executable).status,
            StatusCode::BadAttributeIdInvalid
        );
    }

    #[test]
    fn test_reference_type_attributes() {
        let node = Node::ReferenceType(ReferenceTypeNode {
            base: NodeBase::new(NodeId::numeric(0, 35), QualifiedName::standard("Organizes")),
            inverse_name: LocalizedText::new("OrganizedBy"),
            is_abstract: false,
            symmetric: false,
        });

        assert_eq!(
            node.read_attribute(AttributeId::InverseName).value,
            Some(Variant::LocalizedText(LocalizedText::new("OrganizedBy")))
        );
        assert_eq!(
            node.read_attribute(AttributeId::Symmetric).value,
            Some(Variant::Boolean(false))
        );
    }

    #[test]
    fn test_display_name_defaults_to_browse_name() {
        let base = NodeBase::new(NodeId::numeric(1, 1), QualifiedName::new(1, "Boiler"));
        assert_eq!(base.display_name.text, "Boiler");
    }
}
