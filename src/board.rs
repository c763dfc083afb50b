// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! High-level board handle.
//!
//! [`Board`] is the public surface of the library: it owns the reader
//! and poller tasks, queues commands onto the shared connection, and
//! answers state queries from the mirrored store.
//!
//! Connectivity problems never surface through `Board` operations.
//! Commands issued while disconnected are dropped, and queries answer
//! from the last mirror — [`TriState::Unknown`] right after a
//! (re)connect. The only visible failure signal is the absence of
//! expected updates.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::DEFAULT_POLL_INTERVAL;
use crate::command::BoardCommand;
use crate::protocol::{Connection, run_poller, run_reader};
use crate::state::{BoardState, NotifyMode, StateStore};
use crate::subscription::{CallbackRegistry, SubscriptionId};
use crate::types::{Address, TriState};

/// Commands queued between callers/poller and the reader task. The
/// queue stays small on purpose: commands are fire-and-forget and must
/// not pile up while the board is unreachable.
const COMMAND_QUEUE_DEPTH: usize = 8;

/// Handle to a V6M relay board.
///
/// Created via [`Board::builder`]. Construction schedules the
/// background tasks and returns immediately; the first connection
/// attempt happens on the reader task, and the mirror fills in once
/// the first status frame arrives (within one poll interval on a
/// healthy link).
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use v6m_lib::{Address, Board, TriState};
///
/// #[tokio::main]
/// async fn main() {
///     let board = Board::builder("192.168.1.166", 1234)
///         .on_relay_changed(|addr, old, new| {
///             println!("relay {addr}: {old} -> {new}");
///         })
///         .start();
///
///     let addr = Address::new(0).unwrap();
///     board.set_relay(addr, true);
///
///     tokio::time::sleep(Duration::from_secs(2)).await;
///     if board.relay(addr) == TriState::On {
///         println!("relay 0 confirmed on");
///     }
///
///     board.close().await;
/// }
/// ```
#[derive(Debug)]
pub struct Board {
    command_tx: mpsc::Sender<String>,
    store: Arc<StateStore>,
    callbacks: Arc<CallbackRegistry>,
    shutdown_tx: watch::Sender<bool>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl Board {
    /// Starts configuring a board handle.
    #[must_use]
    pub fn builder(host: impl Into<String>, port: u16) -> BoardBuilder {
        BoardBuilder::new(host.into(), port)
    }

    /// Switches a relay on or off.
    ///
    /// Fire-and-forget: the command is queued for the connection and
    /// the call returns immediately. The mirror reflects the change
    /// only once the board's next status frame reports it. If the
    /// board is unreachable the command is dropped (and logged), never
    /// buffered for replay.
    pub fn set_relay(&self, addr: Address, on: bool) {
        let command = BoardCommand::set_relay(addr, on).encode();
        if let Err(err) = self.command_tx.try_send(command) {
            tracing::warn!(addr = %addr, on, error = %err, "relay command dropped");
        }
    }

    /// Returns the last-known state of one relay.
    ///
    /// [`TriState::Unknown`] until the first status frame after a
    /// (re)connect has been applied.
    #[must_use]
    pub fn relay(&self, addr: Address) -> TriState {
        self.store.relay(addr)
    }

    /// Returns the last-known state of one sensor.
    #[must_use]
    pub fn sensor(&self, addr: Address) -> TriState {
        self.store.sensor(addr)
    }

    /// Returns a snapshot of the whole mirror.
    #[must_use]
    pub fn state(&self) -> BoardState {
        self.store.snapshot()
    }

    /// Registers a callback for every relay update.
    pub fn on_relay_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(Address, TriState, TriState) + Send + Sync + 'static,
    {
        self.callbacks.on_relay_changed(callback)
    }

    /// Registers a callback for updates of one relay.
    pub fn on_relay_at<F>(&self, addr: Address, callback: F) -> SubscriptionId
    where
        F: Fn(Address, TriState, TriState) + Send + Sync + 'static,
    {
        self.callbacks.on_relay_at(addr, callback)
    }

    /// Registers a callback for every sensor update.
    pub fn on_sensor_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(Address, TriState, TriState) + Send + Sync + 'static,
    {
        self.callbacks.on_sensor_changed(callback)
    }

    /// Registers a callback for updates of one sensor.
    pub fn on_sensor_at<F>(&self, addr: Address, callback: F) -> SubscriptionId
    where
        F: Fn(Address, TriState, TriState) + Send + Sync + 'static,
    {
        self.callbacks.on_sensor_at(addr, callback)
    }

    /// Unregisters a callback.
    ///
    /// Returns `true` if a callback was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.callbacks.unsubscribe(id)
    }

    /// Returns `true` once [`close`](Self::close) has completed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.tasks.lock().is_empty()
    }

    /// Stops the background tasks and releases the socket.
    ///
    /// Idempotent: a second call finds nothing to stop and returns
    /// immediately.
    pub async fn close(&self) {
        let handles: Vec<JoinHandle<()>> = {
            let mut tasks = self.tasks.lock();
            tasks.drain(..).collect()
        };
        if handles.is_empty() {
            return;
        }

        let _ = self.shutdown_tx.send(true);
        for handle in handles {
            if let Err(err) = handle.await {
                tracing::debug!(error = %err, "background task ended abnormally");
            }
        }
        tracing::debug!("board closed");
    }
}

/// Builder for a [`Board`] handle.
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use v6m_lib::{Board, NotifyMode};
///
/// #[tokio::main]
/// async fn main() {
///     let board = Board::builder("192.168.1.166", 1234)
///         .poll_interval(Duration::from_millis(500))
///         .notify_mode(NotifyMode::OnChange)
///         .start();
///
///     board.close().await;
/// }
/// ```
#[derive(Debug)]
pub struct BoardBuilder {
    host: String,
    port: u16,
    poll_interval: Duration,
    notify_mode: NotifyMode,
    callbacks: Arc<CallbackRegistry>,
}

impl BoardBuilder {
    fn new(host: String, port: u16) -> Self {
        Self {
            host,
            port,
            poll_interval: DEFAULT_POLL_INTERVAL,
            notify_mode: NotifyMode::default(),
            callbacks: Arc::new(CallbackRegistry::new()),
        }
    }

    /// Sets the status polling interval (default 1 second). The same
    /// interval paces reconnect attempts after a failed connect.
    #[must_use]
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Sets when callbacks fire (default [`NotifyMode::Always`]).
    #[must_use]
    pub fn notify_mode(mut self, mode: NotifyMode) -> Self {
        self.notify_mode = mode;
        self
    }

    /// Registers a relay callback before the first frame can arrive.
    #[must_use]
    pub fn on_relay_changed<F>(self, callback: F) -> Self
    where
        F: Fn(Address, TriState, TriState) + Send + Sync + 'static,
    {
        self.callbacks.on_relay_changed(callback);
        self
    }

    /// Registers a sensor callback before the first frame can arrive.
    #[must_use]
    pub fn on_sensor_changed<F>(self, callback: F) -> Self
    where
        F: Fn(Address, TriState, TriState) + Send + Sync + 'static,
    {
        self.callbacks.on_sensor_changed(callback);
        self
    }

    /// Spawns the reader and poller and returns the board handle.
    ///
    /// Returns once both tasks are scheduled; the first connection
    /// attempt runs on the reader task, so the handle may not be
    /// connected yet.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    #[must_use]
    pub fn start(self) -> Board {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_QUEUE_DEPTH);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let store = Arc::new(StateStore::new(
            Arc::clone(&self.callbacks),
            self.notify_mode,
        ));

        let connection = Connection::new(self.host, self.port);
        let reader = tokio::spawn(run_reader(
            connection,
            command_rx,
            shutdown_rx.clone(),
            Arc::clone(&store),
            self.poll_interval,
        ));
        let poller = tokio::spawn(run_poller(
            command_tx.clone(),
            self.poll_interval,
            shutdown_rx,
        ));

        Board {
            command_tx,
            store,
            callbacks: self.callbacks,
            shutdown_tx,
            tasks: Mutex::new(vec![reader, poller]),
        }
    }
}
