// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Error types for identity parsing.
//!
//! Parse failures are programmer-visible errors at the API boundary; at
//! protocol surfaces they are mapped to [`StatusCode::BadNodeIdInvalid`]
//! rather than propagated as `Err`.
//!
//! [`StatusCode::BadNodeIdInvalid`]: crate::status::StatusCode::BadNodeIdInvalid

use thiserror::Error;

use crate::status::StatusCode;

// =============================================================================
// IdentifierError
// =============================================================================

/// Errors produced while parsing node identifiers from their string form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    /// The namespace prefix was present but the index did not parse.
    #[error("invalid namespace index in node id '{input}'")]
    InvalidNamespace {
        /// The offending input string.
        input: String,
    },

    /// A `ns=N` prefix without an identifier part after the semicolon.
    #[error("missing identifier after namespace in node id '{input}'")]
    MissingIdentifier {
        /// The offending input string.
        input: String,
    },

    /// An `i=` identifier that is not a valid u32.
    #[error("invalid numeric identifier in node id '{input}'")]
    InvalidNumeric {
        /// The offending input string.
        input: String,
    },

    /// A `g=` identifier that is not a valid GUID.
    #[error("invalid GUID identifier in node id '{input}': {reason}")]
    InvalidGuid {
        /// The offending input string.
        input: String,
        /// Details from the GUID parser.
        reason: String,
    },

    /// A `b=` identifier that is not valid base64.
    #[error("invalid opaque identifier in node id '{input}': {reason}")]
    InvalidOpaque {
        /// The offending input string.
        input: String,
        /// Details from the base64 decoder.
        reason: String,
    },

    /// The identifier part carried none of the known `i=`/`s=`/`g=`/`b=` prefixes.
    #[error("unknown identifier type in node id '{input}', expected i=, s=, g= or b=")]
    UnknownIdentifierType {
        /// The offending input string.
        input: String,
    },
}

impl IdentifierError {
    /// Creates an invalid-namespace error.
    pub fn invalid_namespace(input: impl Into<String>) -> Self {
        Self::InvalidNamespace {
            input: input.into(),
        }
    }

    /// Creates a missing-identifier error.
    pub fn missing_identifier(input: impl Into<String>) -> Self {
        Self::MissingIdentifier {
            input: input.into(),
        }
    }

    /// Creates an invalid-numeric error.
    pub fn invalid_numeric(input: impl Into<String>) -> Self {
        Self::InvalidNumeric {
            input: input.into(),
        }
    }

    /// Creates an invalid-GUID error.
    pub fn invalid_guid(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidGuid {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid-opaque error.
    pub fn invalid_opaque(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOpaque {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Creates an unknown-identifier-type error.
    pub fn unknown_identifier_type(input: impl Into<String>) -> Self {
        Self::UnknownIdentifierType {
            input: input.into(),
        }
    }

    /// Returns the status code this error maps to at protocol surfaces.
    pub const fn status_code(&self) -> StatusCode {
        StatusCode::BadNodeIdInvalid
    }
}

// =============================================================================
// Tests
// =============================================================================
