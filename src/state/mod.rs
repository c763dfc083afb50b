// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Board state management.
//!
//! [`BoardState`] mirrors the last-known relay and sensor states,
//! [`StateChange`] describes one observed channel update, and
//! [`StateStore`] is the shared, lock-guarded home of both plus the
//! callback dispatch point.
//!
//! # Examples
//!
//! ```
//! use v6m_lib::{Address, BoardState, TriState};
//!
//! let mut state = BoardState::new();
//! state.set_relay(Address::new(0).unwrap(), TriState::On);
//! assert!(state.is_any_relay_on());
//! ```

mod board_state;
mod state_change;
mod store;

pub use board_state::BoardState;
pub use state_change::StateChange;
pub use store::{NotifyMode, StateStore};
