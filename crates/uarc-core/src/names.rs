// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Qualified names and localized text.

use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// QualifiedName
// =============================================================================

/// OPC UA qualified name (namespace index + name).
///
/// Qualified names identify nodes within their parent scope during browsing.
/// The string form is `N:name`, with the `N:` prefix omitted for namespace 0.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QualifiedName {
    /// Namespace index.
    pub namespace_index: u16,

    /// The name string.
    pub name: String,
}

impl QualifiedName {
    /// Creates a new qualified name.
    pub fn new(namespace_index: u16, name: impl Into<String>) -> Self {
        Self {
            namespace_index,
            name: name.into(),
        }
    }

    /// Creates a qualified name in the standard namespace (0).
    pub fn standard(name: impl Into<String>) -> Self {
        Self::new(0, name)
    }

    /// Returns `true` if the name part is empty.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace_index == 0 {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}:{}", self.namespace_index, self.name)
        }
    }
}

impl From<&str> for QualifiedName {
    /// Parses `N:name` syntax; anything without a numeric prefix is a
    /// namespace-0 name.
    fn from(s: &str) -> Self {
        if let Some((ns, name)) = s.split_once(':') {
            if let Ok(ns_index) = ns.parse::<u16>() {
                return Self::new(ns_index, name);
            }
        }
        Self::standard(s)
    }
}

// =============================================================================
// LocalizedText
// =============================================================================

/// OPC UA localized text (optional locale + text).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LocalizedText {
    /// Locale identifier (e.g. "en"), if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,

    /// The text content.
    pub text: String,
}

impl LocalizedText {
    /// Creates localized text without a locale.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            locale: None,
            text: text.into(),
        }
    }

    /// Creates localized text with a locale.
    pub fn with_locale(locale: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            locale: Some(locale.into()),
            text: text.into(),
        }
    }

    /// Returns `true` if the text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for LocalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl From<&str> for LocalizedText {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for LocalizedText {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

// =============================================================================
// Tests
// =============================================================================
