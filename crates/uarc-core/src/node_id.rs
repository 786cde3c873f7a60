// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! OPC UA node identifiers.
//!
//! A [`NodeId`] uniquely identifies a node within a server's address space.
//! It pairs a namespace index with one of four identifier kinds (numeric,
//! string, GUID, opaque) and has a canonical string form used for parsing,
//! display, and hashing:
//!
//! - `i=84` (numeric, namespace 0)
//! - `ns=2;s=Machine.Temperature` (string, namespace 2)
//! - `ns=2;g=550e8400-e29b-41d4-a716-446655440000` (GUID)
//! - `ns=2;b=AQIDBA==` (opaque, base64 encoded)
//!
//! # Examples
//!
//! ```
//! use uarc_core::NodeId;
//!
//! let root = NodeId::ROOT_FOLDER;
//! assert_eq!(root.to_opc_string(), "i=84");
//!
//! let parsed: NodeId = "ns=2;s=Pump.Speed".parse().unwrap();
//! assert_eq!(parsed.as_string(), Some("Pump.Speed"));
//! ```

use std::fmt;
use std::str::FromStr;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::IdentifierError;

// =============================================================================
// NodeId
// =============================================================================

/// OPC UA node identifier.
///
/// Equality is structural; hashing follows the canonical string form, so two
/// ids that print the same hash the same.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId {
    /// Namespace index (0 = OPC UA standard namespace).
    pub namespace_index: u16,

    /// The node identifier.
    pub identifier: NodeIdentifier,
}

impl NodeId {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Creates a numeric node id.
    #[inline]
    pub const fn numeric(namespace_index: u16, value: u32) -> Self {
        Self {
            namespace_index,
            identifier: NodeIdentifier::Numeric(value),
        }
    }

    /// Creates a string node id.
    #[inline]
    pub fn string(namespace_index: u16, value: impl Into<String>) -> Self {
        Self {
            namespace_index,
            identifier: NodeIdentifier::String(value.into()),
        }
    }

    /// Creates a GUID node id.
    #[inline]
    pub const fn guid(namespace_index: u16, value: Uuid) -> Self {
        Self {
            namespace_index,
            identifier: NodeIdentifier::Guid(value),
        }
    }

    /// Creates a GUID node id from its string form.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError::InvalidGuid`] if the string is not a UUID.
    pub fn guid_from_str(namespace_index: u16, value: &str) -> Result<Self, IdentifierError> {
        let uuid = Uuid::parse_str(value)
            .map_err(|e| IdentifierError::invalid_guid(value, e.to_string()))?;
        Ok(Self::guid(namespace_index, uuid))
    }

    /// Creates an opaque (byte string) node id.
    #[inline]
    pub fn opaque(namespace_index: u16, value: Vec<u8>) -> Self {
        Self {
            namespace_index,
            identifier: NodeIdentifier::Opaque(value),
        }
    }

    /// Creates an opaque node id from a base64-encoded string.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError::InvalidOpaque`] if the string is not valid
    /// base64.
    pub fn opaque_from_base64(
        namespace_index: u16,
        value: &str,
    ) -> Result<Self, IdentifierError> {
        let bytes = BASE64
            .decode(value)
            .map_err(|e| IdentifierError::invalid_opaque(value, e.to_string()))?;
        Ok(Self::opaque(namespace_index, bytes))
    }

    // =========================================================================
    // Well-Known Node Ids
    // =========================================================================

    /// The `RootFolder` node (ns=0, i=84).
    pub const ROOT_FOLDER: NodeId = NodeId::numeric(0, 84);

    /// The `ObjectsFolder` node (ns=0, i=85).
    pub const OBJECTS_FOLDER: NodeId = NodeId::numeric(0, 85);

    /// The `TypesFolder` node (ns=0, i=86).
    pub const TYPES_FOLDER: NodeId = NodeId::numeric(0, 86);

    /// The `ViewsFolder` node (ns=0, i=87).
    pub const VIEWS_FOLDER: NodeId = NodeId::numeric(0, 87);

    /// The abstract `References` reference type (ns=0, i=31).
    pub const REFERENCES: NodeId = NodeId::numeric(0, 31);

    // =========================================================================
    // Properties
    // =========================================================================

    /// Returns `true` if this is a numeric identifier.
    #[inline]
    pub const fn is_numeric(&self) -> bool {
        matches!(self.identifier, NodeIdentifier::Numeric(_))
    }

    /// Returns `true` if this is a string identifier.
    #[inline]
    pub const fn is_string(&self) -> bool {
        matches!(self.identifier, NodeIdentifier::String(_))
    }

    /// Returns `true` if this is a GUID identifier.
    #[inline]
    pub const fn is_guid(&self) -> bool {
        matches!(self.identifier, NodeIdentifier::Guid(_))
    }

    /// Returns `true` if this is an opaque identifier.
    #[inline]
    pub const fn is_opaque(&self) -> bool {
        matches!(self.identifier, NodeIdentifier::Opaque(_))
    }

    /// Returns `true` if this id lives in the standard namespace (ns=0).
    #[inline]
    pub const fn is_standard(&self) -> bool {
        self.namespace_index == 0
    }

    /// Returns `true` if this is the null node id (ns=0, i=0).
    #[inline]
    pub fn is_null(&self) -> bool {
        self.namespace_index == 0 && matches!(self.identifier, NodeIdentifier::Numeric(0))
    }

    /// Returns the null node id (ns=0, i=0).
    #[inline]
    pub const fn null() -> Self {
        Self::numeric(0, 0)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Returns the numeric value if this is a numeric identifier.
    #[inline]
    pub fn as_numeric(&self) -> Option<u32> {
        match &self.identifier {
            NodeIdentifier::Numeric(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the string value if this is a string identifier.
    #[inline]
    pub fn as_string(&self) -> Option<&str> {
        match &self.identifier {
            NodeIdentifier::String(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the GUID value if this is a GUID identifier.
    #[inline]
    pub fn as_guid(&self) -> Option<&Uuid> {
        match &self.identifier {
            NodeIdentifier::Guid(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the byte slice if this is an opaque identifier.
    #[inline]
    pub fn as_opaque(&self) -> Option<&[u8]> {
        match &self.identifier {
            NodeIdentifier::Opaque(v) => Some(v),
            _ => None,
        }
    }

    // =========================================================================
    // Canonical String Form
    // =========================================================================

    /// Converts to the canonical OPC UA string form.
    ///
    /// Namespace 0 omits the `ns=` prefix: `i=84`, `s=Name`. Other
    /// namespaces print as `ns=N;i=M` etc.
    pub fn to_opc_string(&self) -> String {
        if self.namespace_index == 0 {
            self.identifier.to_string()
        } else {
            format!("ns={};{}", self.namespace_index, self.identifier)
        }
    }

    /// Returns `true` if a string looks like a node id rather than a browse
    /// name.
    ///
    /// Used to reject node-id strings where a reference-type browse name is
    /// required, and to route strings to id resolution in lookups.
    pub fn is_node_id_string(s: &str) -> bool {
        s.starts_with("ns=")
            || s.starts_with("i=")
            || s.starts_with("s=")
            || s.starts_with("g=")
            || s.starts_with("b=")
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::null()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_opc_string())
    }
}

impl FromStr for NodeId {
    type Err = IdentifierError;

    /// Parses a node id from the canonical OPC UA string form.
    ///
    /// A bare identifier (`i=84`, `s=Name`) defaults to namespace 0.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        let (namespace_index, identifier_part) = if let Some(rest) = s.strip_prefix("ns=") {
            let (ns_str, id_part) = rest
                .split_once(';')
                .ok_or_else(|| IdentifierError::missing_identifier(s))?;
            let ns: u16 = ns_str
                .parse()
                .map_err(|_| IdentifierError::invalid_namespace(s))?;
            (ns, id_part)
        } else {
            (0, s)
        };

        let identifier = if let Some(id) = identifier_part.strip_prefix("i=") {
            let value: u32 = id.parse().map_err(|_| IdentifierError::invalid_numeric(s))?;
            NodeIdentifier::Numeric(value)
        } else if let Some(id) = identifier_part.strip_prefix("s=") {
            NodeIdentifier::String(id.to_string())
        } else if let Some(id) = identifier_part.strip_prefix("g=") {
            let uuid = Uuid::parse_str(id)
                .map_err(|e| IdentifierError::invalid_guid(s, e.to_string()))?;
            NodeIdentifier::Guid(uuid)
        } else if let Some(id) = identifier_part.strip_prefix("b=") {
            let bytes = BASE64
                .decode(id)
                .map_err(|e| IdentifierError::invalid_opaque(s, e.to_string()))?;
            NodeIdentifier::Opaque(bytes)
        } else {
            return Err(IdentifierError::unknown_identifier_type(s));
        };

        Ok(Self {
            namespace_index,
            identifier,
        })
    }
}

// =============================================================================
// NodeIdentifier
// =============================================================================

/// The four identifier kinds defined by the OPC UA specification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum NodeIdentifier {
    /// Numeric identifier, used for all standard-namespace nodes.
    Numeric(u32),

    /// String identifier, common for vendor namespaces.
    String(String),

    /// Globally unique identifier.
    Guid(Uuid),

    /// Application-specific byte array.
    Opaque(Vec<u8>),
}

impl NodeIdentifier {
    /// Returns the single-character prefix of the canonical string form.
    pub const fn type_prefix(&self) -> char {
        match self {
            Self::Numeric(_) => 'i',
            Self::String(_) => 's',
            Self::Guid(_) => 'g',
            Self::Opaque(_) => 'b',
        }
    }
}

impl fmt::Display for NodeIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(v) => write!(f, "i={}", v),
            Self::String(v) => write!(f, "s={}", v),
            Self::Guid(v) => write!(f, "g={}", v),
            Self::Opaque(v) => write!(f, "b={}", BASE64.encode(v)),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
