// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `v6m_lib` - A Rust library to control V6M relay boards.
//!
//! The V6M is an 8-channel Ethernet relay board with 8 sensor inputs,
//! speaking a small line-oriented, JSON-framed text protocol over a raw
//! TCP socket. This library keeps a live mirror of the board's relays
//! and sensors, issues relay commands, and notifies subscribers when
//! the board reports a state change.
//!
//! # How it works
//!
//! A [`Board`] handle owns two background tasks: a reader that owns the
//! socket (connecting, reconnecting, and decoding status frames into
//! the mirror) and a poller that requests a full status every
//! [`DEFAULT_POLL_INTERVAL`]. Relay commands are fire-and-forget; the
//! mirror reflects a change only once the board's next status frame
//! confirms it. Connectivity problems never surface as errors from the
//! handle — queries degrade to [`TriState::Unknown`] and commands
//! issued while disconnected are dropped.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::time::Duration;
//! use v6m_lib::{Address, Board};
//!
//! #[tokio::main]
//! async fn main() {
//!     let board = Board::builder("192.168.1.166", 1234)
//!         .on_relay_changed(|addr, old, new| {
//!             println!("relay {addr}: {old} -> {new}");
//!         })
//!         .on_sensor_changed(|addr, old, new| {
//!             println!("sensor {addr}: {old} -> {new}");
//!         })
//!         .start();
//!
//!     let door = Address::new(0).unwrap();
//!     board.set_relay(door, true);
//!
//!     tokio::time::sleep(Duration::from_secs(2)).await;
//!     println!("relay 0 is {}", board.relay(door));
//!
//!     board.close().await;
//! }
//! ```
//!
//! # Wire protocol
//!
//! Commands are plain text terminated with a carriage return:
//! `setr=` plus an 8-character mask switches one relay
//! (`'1'`/`'0'` at the target address, `'x'` wildcards elsewhere);
//! `state=?` requests a full status. The board answers with a JSON
//! object terminated by the literal byte `'}'`, carrying `"output"`
//! and `"input"` as 8-character bit strings.

use std::time::Duration;

mod board;
pub mod command;
pub mod error;
pub mod protocol;
pub mod response;
pub mod state;
pub mod subscription;
pub mod types;

pub use board::{Board, BoardBuilder};
pub use command::BoardCommand;
pub use error::{Error, ParseError, ProtocolError, Result, ValueError};
pub use protocol::FrameExtractor;
pub use response::StatusReport;
pub use state::{BoardState, NotifyMode, StateChange};
pub use subscription::{CallbackRegistry, SubscriptionId};
pub use types::{Address, TriState};

/// Number of relay outputs on a board.
pub const RELAY_COUNT: usize = 8;

/// Number of sensor inputs on a board.
pub const SENSOR_COUNT: usize = 8;

/// Default interval between status polls, also used to pace reconnect
/// attempts.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);
