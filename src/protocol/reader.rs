// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The reader task: connection lifecycle and inbound frame processing.

use std::sync::Arc;
use std::time::Duration;

use tokio::io::AsyncReadExt;
use tokio::sync::{mpsc, watch};

use crate::response::StatusReport;
use crate::state::StateStore;

use super::connection::Connection;
use super::framing::FrameExtractor;

/// Runs the board's I/O loop until shutdown.
///
/// The task is the sole owner of the socket: it establishes every
/// connection, drains the command channel onto the write half, and
/// feeds inbound bytes through the frame extractor into the state
/// store. Read or write failures drop the connection and re-enter the
/// connect phase; connect failures are retried forever, paced by
/// `reconnect_delay`. Commands arriving while disconnected are dropped,
/// never queued for replay.
pub(crate) async fn run_reader(
    mut connection: Connection,
    mut command_rx: mpsc::Receiver<String>,
    mut shutdown_rx: watch::Receiver<bool>,
    store: Arc<StateStore>,
    reconnect_delay: Duration,
) {
    loop {
        if *shutdown_rx.borrow() {
            return;
        }

        let mut read_half = match connection.connect().await {
            Ok(read_half) => {
                // Stale pre-disconnect state must not survive a reconnect.
                store.reset();
                read_half
            }
            Err(err) => {
                tracing::warn!(
                    endpoint = %connection.endpoint(),
                    error = %err,
                    "connect failed, retrying"
                );
                drop_pending_commands(&mut command_rx);
                tokio::select! {
                    _ = shutdown_rx.changed() => return,
                    () = tokio::time::sleep(reconnect_delay) => continue,
                }
            }
        };

        let mut extractor = FrameExtractor::new();
        let mut buf = [0_u8; 256];
        loop {
            tokio::select! {
                _ = shutdown_rx.changed() => return,
                command = command_rx.recv() => {
                    // A closed channel means the board handle is gone.
                    let Some(command) = command else { return };
                    if let Err(err) = connection.send(&command).await {
                        tracing::warn!(error = %err, "send failed, reconnecting");
                        break;
                    }
                }
                read = read_half.read(&mut buf) => match read {
                    Ok(0) => {
                        tracing::warn!(endpoint = %connection.endpoint(), "board closed the connection");
                        break;
                    }
                    Ok(n) => {
                        for frame in extractor.extend(&buf[..n]) {
                            match StatusReport::parse(&frame) {
                                Ok(report) => store.apply(&report),
                                Err(err) => {
                                    tracing::warn!(error = %err, frame = %frame, "discarding malformed frame");
                                }
                            }
                        }
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "read failed, reconnecting");
                        break;
                    }
                },
            }
        }
        connection.disconnect();
    }
}

/// Discards every queued command. Called while disconnected so the
/// channel cannot act as a replay buffer across reconnects.
fn drop_pending_commands(command_rx: &mut mpsc::Receiver<String>) {
    let mut dropped = 0_usize;
    while command_rx.try_recv().is_ok() {
        dropped += 1;
    }
    if dropped > 0 {
        tracing::debug!(dropped, "dropped commands while disconnected");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn drop_pending_commands_empties_channel() {
        let (tx, mut rx) = mpsc::channel(8);
        tx.send("state=?".to_string()).await.unwrap();
        tx.send("setr=1xxxxxxx".to_string()).await.unwrap();

        drop_pending_commands(&mut rx);
        assert!(rx.try_recv().is_err());
    }
}
