// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The poller task: periodic status queries.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::MissedTickBehavior;

use crate::command::BoardCommand;

/// Sends a status query into the command channel on every tick until
/// shutdown. The first tick fires immediately, so the board is queried
/// as soon as the first connection is up. The poller's only coupling to
/// the rest of the system is the shared command channel; a closed
/// channel means the reader is gone and the poller exits with it.
pub(crate) async fn run_poller(
    command_tx: mpsc::Sender<String>,
    poll_interval: Duration,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        tokio::select! {
            _ = shutdown_rx.changed() => return,
            _ = ticker.tick() => {
                if command_tx
                    .send(BoardCommand::query_status().encode())
                    .await
                    .is_err()
                {
                    return;
                }
            }
        }
    }
}
