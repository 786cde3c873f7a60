// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Node classes and attribute identifiers.

use serde::{Deserialize, Serialize};

// =============================================================================
// NodeClass
// =============================================================================

/// OPC UA node class.
///
/// The class of a node is fixed at construction and determines which
/// attributes it answers and which browse-name index it registers in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeClass {
    /// Object node.
    Object,
    /// Variable node.
    Variable,
    /// Method node.
    Method,
    /// Object type node.
    ObjectType,
    /// Variable type node.
    VariableType,
    /// Reference type node.
    ReferenceType,
    /// Data type node.
    DataType,
    /// View node.
    View,
}

impl NodeClass {
    /// Returns the OPC UA bit mask value.
    pub const fn value(&self) -> u32 {
        match self {
            Self::Object => 1,
            Self::Variable => 2,
            Self::Method => 4,
            Self::ObjectType => 8,
            Self::VariableType => 16,
            Self::ReferenceType => 32,
            Self::DataType => 64,
            Self::View => 128,
        }
    }

    /// Creates from the OPC UA bit mask value.
    pub fn from_value(value: u32) -> Option<Self> {
        match value {
            1 => Some(Self::Object),
            2 => Some(Self::Variable),
            4 => Some(Self::Method),
            8 => Some(Self::ObjectType),
            16 => Some(Self::VariableType),
            32 => Some(Self::ReferenceType),
            64 => Some(Self::DataType),
            128 => Some(Self::View),
            _ => None,
        }
    }

    /// Returns `true` if this node class carries a value attribute.
    pub const fn has_value(&self) -> bool {
        matches!(self, Self::Variable)
    }

    /// Returns `true` if this is one of the type-defining classes.
    pub const fn is_type(&self) -> bool {
        matches!(
            self,
            Self::ObjectType | Self::VariableType | Self::ReferenceType | Self::DataType
        )
    }
}

// =============================================================================
// AttributeId
// =============================================================================

/// OPC UA attribute identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AttributeId {
    /// Node id attribute.
    NodeId,
    /// Node class attribute.
    NodeClass,
    /// Browse name attribute.
    BrowseName,
    /// Display name attribute.
    DisplayName,
    /// Description attribute.
    Description,
    /// Write mask attribute.
    WriteMask,
    /// User write mask attribute.
    UserWriteMask,
    /// Is abstract attribute.
    IsAbstract,
    /// Symmetric attribute.
    Symmetric,
    /// Inverse name attribute.
    InverseName,
    /// Contains no loops attribute.
    ContainsNoLoops,
    /// Event notifier attribute.
    EventNotifier,
    /// Value attribute.
    #[default]
    Value,
    /// Data type attribute.
    DataType,
    /// Value rank attribute.
    ValueRank,
    /// Array dimensions attribute.
    ArrayDimensions,
    /// Access level attribute.
    AccessLevel,
    /// User access level attribute.
    UserAccessLevel,
    /// Minimum sampling interval attribute.
    MinimumSamplingInterval,
    /// Historizing attribute.
    Historizing,
    /// Executable attribute.
    Executable,
    /// User executable attribute.
    UserExecutable,
}

impl AttributeId {
    /// Returns the OPC UA numeric value.
    pub const fn value(&self) -> u32 {
        match self {
            Self::NodeId => 1,
            Self::NodeClass => 2,
            Self::BrowseName => 3,
            Self::DisplayName => 4,
            Self::Description => 5,
            Self::WriteMask => 6,
            Self::UserWriteMask => 7,
            Self::IsAbstract => 8,
            Self::Symmetric => 9,
            Self::InverseName => 10,
            Self::ContainsNoLoops => 11,
            Self::EventNotifier => 12,
            Self::Value => 13,
            Self::DataType => 14,
            Self::ValueRank => 15,
            Self::ArrayDimensions => 16,
            Self::AccessLevel => 17,
            Self::UserAccessLevel => 18,
            Self::MinimumSamplingInterval => 19,
            Self::Historizing => 20,
            Self::Executable => 21,
            Self::UserExecutable => 22,
        }
    }

    /// Creates from the OPC UA numeric value.
    pub fn from_value(value: u32) -> Option<Self> {
        match value {
            1 => Some(Self::NodeId),
            2 => Some(Self::NodeClass),
            3 => Some(Self::BrowseName),
            4 => Some(Self::DisplayName),
            5 => Some(Self::Description),
            6 => Some(Self::WriteMask),
            7 => Some(Self::UserWriteMask),
            8 => Some(Self::IsAbstract),
            9 => Some(Self::Symmetric),
            10 => Some(Self::InverseName),
            11 => Some(Self::ContainsNoLoops),
            12 => Some(Self::EventNotifier),
            13 => Some(Self::Value),
            14 => Some(Self::DataType),
            15 => Some(Self::ValueRank),
            16 => Some(Self::ArrayDimensions),
            17 => Some(Self::AccessLevel),
            18 => Some(Self::UserAccessLevel),
            19 => Some(Self::MinimumSamplingInterval),
            20 => Some(Self::Historizing),
            21 => Some(Self::Executable),
            22 => Some(Self::UserExecutable),
            _ => None,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
