// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! The attribute value model.
//!
//! A [`Variant`] is the typed payload of an attribute read; a [`DataValue`]
//! wraps it with a status code and optional timestamps. Unsupported
//! attribute reads answer with [`DataValue::bad`] carrying
//! `BadAttributeIdInvalid` rather than an error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::names::{LocalizedText, QualifiedName};
use crate::node_id::NodeId;
use crate::status::StatusCode;

// =============================================================================
// Variant
// =============================================================================

/// A typed OPC UA value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Variant {
    /// Empty value.
    #[default]
    Null,

    /// Boolean value.
    Boolean(bool),

    /// Signed 8-bit integer.
    SByte(i8),

    /// Unsigned 8-bit integer.
    Byte(u8),

    /// Signed 16-bit integer.
    Int16(i16),

    /// Unsigned 16-bit integer.
    UInt16(u16),

    /// Signed 32-bit integer.
    Int32(i32),

    /// Unsigned 32-bit integer.
    UInt32(u32),

    /// Signed 64-bit integer.
    Int64(i64),

    /// Unsigned 64-bit integer.
    UInt64(u64),

    /// 32-bit IEEE 754 float.
    Float(f32),

    /// 64-bit IEEE 754 double.
    Double(f64),

    /// UTF-8 string.
    String(String),

    /// Date and time.
    DateTime(DateTime<Utc>),

    /// GUID.
    Guid(Uuid),

    /// Raw byte string.
    ByteString(Vec<u8>),

    /// Node id.
    NodeId(NodeId),

    /// Qualified name.
    QualifiedName(QualifiedName),

    /// Localized text.
    LocalizedText(LocalizedText),

    /// Status code.
    StatusCode(StatusCode),

    /// Array of values.
    Array(Vec<Variant>),
}

impl Variant {
    /// Returns `true` if this is the null value.
    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Attempts to read the value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    /// Attempts to read the value as an i64, widening integers.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::SByte(v) => Some(*v as i64),
            Self::Byte(v) => Some(*v as i64),
            Self::Int16(v) => Some(*v as i64),
            Self::UInt16(v) => Some(*v as i64),
            Self::Int32(v) => Some(*v as i64),
            Self::UInt32(v) => Some(*v as i64),
            Self::Int64(v) => Some(*v),
            Self::UInt64(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }

    /// Attempts to read the value as an f64, widening numerics.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v as f64),
            Self::Double(v) => Some(*v),
            _ => self.as_i64().map(|v| v as f64),
        }
    }

    /// Attempts to read the value as a string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    /// Attempts to read the value as a node id.
    pub fn as_node_id(&self) -> Option<&NodeId> {
        match self {
            Self::NodeId(v) => Some(v),
            _ => None,
        }
    }
}

impl From<u32> for Variant {
    fn from(v: u32) -> Self {
        Self::UInt32(v)
    }
}

impl From<bool> for Variant {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<&str> for Variant {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

// =============================================================================
// DataValue
// =============================================================================

/// A value together with its status code and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataValue {
    /// The value, absent on failed reads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Variant>,

    /// Status of the read that produced this value.
    pub status: StatusCode,

    /// Timestamp assigned by the data source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_timestamp: Option<DateTime<Utc>>,

    /// Timestamp assigned by the server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_timestamp: Option<DateTime<Utc>>,
}

impl DataValue {
    /// Creates a good data value.
    pub fn good(value: Variant) -> Self {
        Self {
            value: Some(value),
            status: StatusCode::Good,
            source_timestamp: None,
            server_timestamp: None,
        }
    }

    /// Creates a failed data value carrying only a status code.
    pub fn bad(status: StatusCode) -> Self {
        Self {
            value: None,
            status,
            source_timestamp: None,
            server_timestamp: None,
        }
    }

    /// Sets the source timestamp.
    pub fn with_source_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.source_timestamp = Some(timestamp);
        self
    }

    /// Sets the server timestamp.
    pub fn with_server_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.server_timestamp = Some(timestamp);
        self
    }

    /// Returns `true` if the status is good.
    #[inline]
    pub const fn is_good(&self) -> bool {
        self.status.is_good()
    }
}

impl Default for DataValue {
    fn default() -> Self {
        Self::good(Variant::Null)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_accessors() {
        assert_eq!(Variant::UInt32(7).as_i64(), Some(7));
        assert_eq!(Variant::Boolean(true).as_bool(), Some(true));
        assert_eq!(Variant::Double(1.5).as_f64(), Some(1.5));
        assert_eq!(Variant::from("abc").as_str(), Some("abc"));
        assert!(Variant::Null.is_null());
        assert_eq!(Variant::String("x".into()).as_i64(), None);
    }

    #[test]
    fn test_data_value_constructors() {
        let good = DataValue::good(Variant::UInt32(4));
        assert!(good.is_good());
        assert_eq!(good.value, Some(Variant::UInt32(4)));

        let bad = DataValue::bad(StatusCode::BadAttributeIdInvalid);
        assert!(!bad.is_good());
        assert!(bad.value.is_none());
    }

    #[test]
    fn test_data_value_timestamps() {
        let now = Utc::now();
        let value = DataValue::good(Variant::Boolean(false)).with_source_timestamp(now);
        assert_eq!(value.source_timestamp, Some(now));
        assert_eq!(value.server_timestamp, None);
    }
}
