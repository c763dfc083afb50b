// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mirrored board state.

use crate::types::{Address, TriState};
use crate::{RELAY_COUNT, SENSOR_COUNT};

/// The last-known state of all relays and sensors.
///
/// Every channel starts as [`TriState::Unknown`] and goes back to
/// `Unknown` on each reconnect; values only become known when a status
/// frame reports them.
///
/// # Examples
///
/// ```
/// use v6m_lib::{Address, BoardState, TriState};
///
/// let mut state = BoardState::new();
/// let addr = Address::new(1).unwrap();
/// assert_eq!(state.relay(addr), TriState::Unknown);
///
/// state.set_relay(addr, TriState::On);
/// assert_eq!(state.relay(addr), TriState::On);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardState {
    relays: [TriState; RELAY_COUNT],
    sensors: [TriState; SENSOR_COUNT],
}

impl BoardState {
    /// Creates a state with every channel unknown.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the last-known state of one relay.
    #[must_use]
    pub const fn relay(&self, addr: Address) -> TriState {
        self.relays[addr.index()]
    }

    /// Stores the state of one relay.
    pub const fn set_relay(&mut self, addr: Address, state: TriState) {
        self.relays[addr.index()] = state;
    }

    /// Returns the last-known state of one sensor.
    #[must_use]
    pub const fn sensor(&self, addr: Address) -> TriState {
        self.sensors[addr.index()]
    }

    /// Stores the state of one sensor.
    pub const fn set_sensor(&mut self, addr: Address, state: TriState) {
        self.sensors[addr.index()] = state;
    }

    /// Returns all relay states in address order.
    #[must_use]
    pub const fn relays(&self) -> &[TriState; RELAY_COUNT] {
        &self.relays
    }

    /// Returns all sensor states in address order.
    #[must_use]
    pub const fn sensors(&self) -> &[TriState; SENSOR_COUNT] {
        &self.sensors
    }

    /// Returns `true` if any relay is known to be on.
    #[must_use]
    pub fn is_any_relay_on(&self) -> bool {
        self.relays.iter().any(TriState::is_on)
    }

    /// Resets every channel to unknown.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
