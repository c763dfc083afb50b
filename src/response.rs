// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Status frame decoding.
//!
//! The board answers a status query with a JSON object carrying two
//! 8-character bit strings, e.g.
//! `{"output":"10000000","input":"00000000"}`. `"output"` mirrors the
//! relays, `"input"` the sensors.

use serde::Deserialize;

use crate::error::ParseError;
use crate::types::Address;
use crate::{RELAY_COUNT, SENSOR_COUNT};

/// A decoded status frame: the reported state of all relays and sensors.
///
/// # Examples
///
/// ```
/// use v6m_lib::{Address, StatusReport};
///
/// let report = StatusReport::parse(r#"{"output":"10000000","input":"00000000"}"#).unwrap();
/// assert!(report.output(Address::new(0).unwrap()));
/// assert!(!report.output(Address::new(1).unwrap()));
/// assert!(!report.input(Address::new(0).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusReport {
    outputs: [bool; RELAY_COUNT],
    inputs: [bool; SENSOR_COUNT],
}

/// The raw JSON shape of a status frame. Fields are optional so that
/// absence is reported as [`ParseError::MissingField`] instead of a
/// generic serde error.
#[derive(Debug, Deserialize)]
struct RawFrame {
    #[serde(default)]
    output: Option<String>,
    #[serde(default)]
    input: Option<String>,
}

impl StatusReport {
    /// Creates a report from raw relay and sensor states.
    #[must_use]
    pub const fn new(outputs: [bool; RELAY_COUNT], inputs: [bool; SENSOR_COUNT]) -> Self {
        Self { outputs, inputs }
    }

    /// Parses one status frame.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the text is not a JSON object, if the
    /// `"output"` or `"input"` field is absent, or if a field is not
    /// exactly 8 characters of `'0'`/`'1'`.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let raw: RawFrame = serde_json::from_str(text)?;
        let output = raw.output.ok_or(ParseError::MissingField("output"))?;
        let input = raw.input.ok_or(ParseError::MissingField("input"))?;
        Ok(Self {
            outputs: decode_bits("output", &output)?,
            inputs: decode_bits("input", &input)?,
        })
    }

    /// Returns the reported state of one relay.
    #[must_use]
    pub const fn output(&self, addr: Address) -> bool {
        self.outputs[addr.index()]
    }

    /// Returns the reported state of one sensor.
    #[must_use]
    pub const fn input(&self, addr: Address) -> bool {
        self.inputs[addr.index()]
    }

    /// Returns all reported relay states.
    #[must_use]
    pub const fn outputs(&self) -> &[bool; RELAY_COUNT] {
        &self.outputs
    }

    /// Returns all reported sensor states.
    #[must_use]
    pub const fn inputs(&self) -> &[bool; SENSOR_COUNT] {
        &self.inputs
    }
}

/// Decodes an 8-character `'0'`/`'1'` string into a bit array.
fn decode_bits(field: &'static str, text: &str) -> Result<[bool; 8], ParseError> {
    if text.len() != 8 || !text.bytes().all(|b| b == b'0' || b == b'1') {
        return Err(ParseError::InvalidValue {
            field,
            message: format!("expected 8 characters of '0' or '1', got {text:?}"),
        });
    }
    let mut bits = [false; 8];
    for (slot, byte) in bits.iter_mut().zip(text.bytes()) {
        *slot = byte == b'1';
    }
    Ok(bits)
}
