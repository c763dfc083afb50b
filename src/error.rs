// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `v6m_lib` library.
//!
//! This module provides the error hierarchy for failures across the
//! library: value validation, socket communication, and frame parsing.
//!
//! Connectivity and parse failures are handled inside the background
//! tasks that detect them and are logged rather than surfaced through
//! [`Board`](crate::Board) operations; these types exist for the places
//! where callers interact with the protocol directly (constructing
//! addresses, parsing frames they captured themselves).

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred during socket communication.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while parsing a status frame.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Errors related to value validation and constraints.
///
/// These errors occur when attempting to create constrained types
/// with invalid values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A relay or sensor address is outside the board's range.
    #[error("address {actual} is out of range [0, 7]")]
    AddressOutOfRange {
        /// The actual value that was provided.
        actual: u8,
    },

    /// An invalid tri-state string was provided.
    #[error("invalid tri-state: {0}")]
    InvalidTriState(String),
}

/// Errors related to socket communication with the board.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// A socket operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No connection to the board is currently established.
    #[error("not connected to the board")]
    NotConnected,
}

/// Errors related to parsing status frames from the board.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Expected field is missing from the frame.
    #[error("missing field in frame: {0}")]
    MissingField(&'static str),

    /// A field is present but does not have the expected shape.
    #[error("failed to parse {field}: {message}")]
    InvalidValue {
        /// The field that failed to parse.
        field: &'static str,
        /// Description of the parsing failure.
        message: String,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
