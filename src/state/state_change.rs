// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State change representation.
//!
//! A [`StateChange`] is the unit handed to callback dispatch: one
//! channel's previous and newly reported value. One status frame
//! produces sixteen changes, relays before sensors, each in ascending
//! address order.

use crate::types::{Address, TriState};

/// One observed channel update.
///
/// # Examples
///
/// ```
/// use v6m_lib::{Address, StateChange, TriState};
///
/// let change = StateChange::relay(Address::new(0).unwrap(), TriState::Unknown, TriState::On);
/// assert!(change.is_transition());
///
/// let refresh = StateChange::relay(Address::new(0).unwrap(), TriState::On, TriState::On);
/// assert!(!refresh.is_transition());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateChange {
    /// A relay update from a status frame.
    Relay {
        /// The relay address.
        addr: Address,
        /// The previously stored value.
        old: TriState,
        /// The newly reported value.
        new: TriState,
    },
    /// A sensor update from a status frame.
    Sensor {
        /// The sensor address.
        addr: Address,
        /// The previously stored value.
        old: TriState,
        /// The newly reported value.
        new: TriState,
    },
}

impl StateChange {
    /// Creates a relay update.
    #[must_use]
    pub const fn relay(addr: Address, old: TriState, new: TriState) -> Self {
        Self::Relay { addr, old, new }
    }

    /// Creates a sensor update.
    #[must_use]
    pub const fn sensor(addr: Address, old: TriState, new: TriState) -> Self {
        Self::Sensor { addr, old, new }
    }

    /// Returns the address of the updated channel.
    #[must_use]
    pub const fn addr(&self) -> Address {
        match self {
            Self::Relay { addr, .. } | Self::Sensor { addr, .. } => *addr,
        }
    }

    /// Returns `true` if the reported value differs from the stored one.
    ///
    /// A frame re-reporting an unchanged value still produces a change
    /// (the board's refresh semantics); this distinguishes real
    /// transitions from refreshes.
    #[must_use]
    pub fn is_transition(&self) -> bool {
        match self {
            Self::Relay { old, new, .. } | Self::Sensor { old, new, .. } => old != new,
        }
    }
}
