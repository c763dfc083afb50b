// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport layer: framing, connection management, and the two
//! background tasks (reader and poller) that keep the mirrored state
//! fresh.
//!
//! The socket has exactly one owner, the reader task. Commands from the
//! caller and from the poller travel over one mpsc channel that the
//! reader drains onto the write half, so writes are serialized without
//! a lock around the socket.

mod connection;
mod framing;
mod poller;
mod reader;

pub use framing::FrameExtractor;

pub(crate) use connection::Connection;
pub(crate) use poller::run_poller;
pub(crate) use reader::run_reader;
