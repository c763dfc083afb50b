// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wire commands for the V6M board.
//!
//! The board speaks a small plain-text command set. A relay command
//! carries an 8-character mask with exactly one real bit; the other
//! positions are the `'x'` wildcard, leaving those relays untouched.
//! Every command is terminated with a carriage return on the wire; the
//! terminator is appended by the connection, not by [`BoardCommand::encode`].

use std::fmt;

use crate::RELAY_COUNT;
use crate::types::Address;

/// A command that can be sent to the board.
///
/// # Examples
///
/// ```
/// use v6m_lib::{Address, BoardCommand};
///
/// let set = BoardCommand::set_relay(Address::new(2).unwrap(), true);
/// assert_eq!(set.encode(), "setr=xx1xxxxx");
///
/// let off = BoardCommand::set_relay(Address::new(0).unwrap(), false);
/// assert_eq!(off.encode(), "setr=0xxxxxxx");
///
/// assert_eq!(BoardCommand::query_status().encode(), "state=?");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardCommand {
    /// Switch a single relay on or off.
    SetRelay {
        /// The relay to switch.
        addr: Address,
        /// The desired state.
        on: bool,
    },
    /// Request a full status frame for all relays and sensors.
    QueryStatus,
}

impl BoardCommand {
    /// Creates a command to switch a relay.
    #[must_use]
    pub const fn set_relay(addr: Address, on: bool) -> Self {
        Self::SetRelay { addr, on }
    }

    /// Creates a command to request full board status.
    #[must_use]
    pub const fn query_status() -> Self {
        Self::QueryStatus
    }

    /// Encodes the command into its wire form, without the trailing
    /// carriage return.
    #[must_use]
    pub fn encode(&self) -> String {
        match self {
            Self::SetRelay { addr, on } => {
                let mut mask = String::with_capacity(RELAY_COUNT);
                for position in Address::iter() {
                    if position == *addr {
                        mask.push(if *on { '1' } else { '0' });
                    } else {
                        mask.push('x');
                    }
                }
                format!("setr={mask}")
            }
            Self::QueryStatus => "state=?".to_string(),
        }
    }
}

impl fmt::Display for BoardCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.encode())
    }
}
