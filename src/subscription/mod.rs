// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Subscription system for board state changes.
//!
//! Callbacks receive `(address, old, new)` for each channel of each
//! applied status frame — by default even when `old == new`, which is
//! the board's refresh semantics (see
//! [`NotifyMode`](crate::state::NotifyMode) to opt out).
//!
//! Subscriptions are typically created through the board handle:
//!
//! ```no_run
//! use v6m_lib::Board;
//!
//! let board = Board::builder("192.168.1.166", 1234).start();
//!
//! let sub_id = board.on_relay_changed(|addr, old, new| {
//!     println!("relay {addr} changed: {old} -> {new}");
//! });
//!
//! // Later, unsubscribe
//! board.unsubscribe(sub_id);
//! ```

mod callback;

pub use callback::{CallbackRegistry, SubscriptionId};
