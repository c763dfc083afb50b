// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tri-state value for mirrored relay and sensor states.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// The mirrored state of a relay or sensor.
///
/// Until the first status frame arrives after a (re)connect, every
/// channel is [`TriState::Unknown`]. "Never observed" is type-distinct
/// from "observed off".
///
/// # Examples
///
/// ```
/// use v6m_lib::TriState;
///
/// assert_eq!(TriState::default(), TriState::Unknown);
/// assert_eq!(TriState::from(true), TriState::On);
/// assert!(TriState::On.is_on());
/// assert!(!TriState::Unknown.is_known());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TriState {
    /// No status frame has reported this channel yet.
    #[default]
    Unknown,
    /// The channel was reported off.
    Off,
    /// The channel was reported on.
    On,
}

impl TriState {
    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::Off => "OFF",
            Self::On => "ON",
        }
    }

    /// Returns `true` if the channel was reported on.
    #[must_use]
    pub const fn is_on(&self) -> bool {
        matches!(self, Self::On)
    }

    /// Returns `true` if the channel was reported off.
    #[must_use]
    pub const fn is_off(&self) -> bool {
        matches!(self, Self::Off)
    }

    /// Returns `true` if any status frame has reported this channel.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for TriState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<bool> for TriState {
    fn from(value: bool) -> Self {
        if value { Self::On } else { Self::Off }
    }
}

impl FromStr for TriState {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "UNKNOWN" => Ok(Self::Unknown),
            "OFF" | "0" | "FALSE" => Ok(Self::Off),
            "ON" | "1" | "TRUE" => Ok(Self::On),
            _ => Err(ValueError::InvalidTriState(s.to_string())),
        }
    }
}
