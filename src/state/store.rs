// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The state store: lock-guarded mirror plus callback dispatch.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::response::StatusReport;
use crate::subscription::CallbackRegistry;
use crate::types::{Address, TriState};

use super::{BoardState, StateChange};

/// Controls when registered callbacks fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotifyMode {
    /// Fire for every channel of every applied frame, even when the
    /// reported value equals the stored one. This mirrors the board's
    /// refresh semantics and is the default.
    #[default]
    Always,
    /// Fire only when the reported value differs from the stored one.
    OnChange,
}

/// Holds the mirrored board state and notifies subscribers on updates.
///
/// Shared between the reader task (which applies frames and resets on
/// reconnect) and callers (which read snapshots). Callbacks run outside
/// the state lock, one channel at a time, so a callback may query the
/// store without deadlocking.
#[derive(Debug)]
pub struct StateStore {
    state: RwLock<BoardState>,
    callbacks: Arc<CallbackRegistry>,
    notify_mode: NotifyMode,
}

impl StateStore {
    /// Creates a store with every channel unknown.
    #[must_use]
    pub fn new(callbacks: Arc<CallbackRegistry>, notify_mode: NotifyMode) -> Self {
        Self {
            state: RwLock::new(BoardState::new()),
            callbacks,
            notify_mode,
        }
    }

    /// Returns the last-known state of one relay.
    #[must_use]
    pub fn relay(&self, addr: Address) -> TriState {
        self.state.read().relay(addr)
    }

    /// Returns the last-known state of one sensor.
    #[must_use]
    pub fn sensor(&self, addr: Address) -> TriState {
        self.state.read().sensor(addr)
    }

    /// Returns a snapshot of the whole board.
    #[must_use]
    pub fn snapshot(&self) -> BoardState {
        self.state.read().clone()
    }

    /// Resets every channel to unknown without firing callbacks.
    ///
    /// Called on every successful (re)connect so stale pre-disconnect
    /// values never answer queries against the new session.
    pub fn reset(&self) {
        self.state.write().reset();
        tracing::debug!("board state reset to unknown");
    }

    /// Applies one decoded status frame.
    ///
    /// For each channel, ascending over relays first and sensors
    /// second: notify subscribers with the previous and newly reported
    /// value, then store the new value. No lock is held while a
    /// callback runs, so callbacks may query the store. A frame is
    /// applied in full or not at all; partial application cannot be
    /// observed because only the reader task applies frames.
    pub fn apply(&self, report: &StatusReport) {
        for addr in Address::iter() {
            let new = TriState::from(report.output(addr));
            let old = self.state.read().relay(addr);
            self.dispatch(StateChange::relay(addr, old, new));
            self.state.write().set_relay(addr, new);
        }
        for addr in Address::iter() {
            let new = TriState::from(report.input(addr));
            let old = self.state.read().sensor(addr);
            self.dispatch(StateChange::sensor(addr, old, new));
            self.state.write().set_sensor(addr, new);
        }
    }

    fn dispatch(&self, change: StateChange) {
        if self.notify_mode == NotifyMode::OnChange && !change.is_transition() {
            return;
        }
        self.callbacks.dispatch(&change);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use parking_lot::Mutex;

    fn addr(value: u8) -> Address {
        Address::new(value).unwrap()
    }

    fn report(output: &str, input: &str) -> StatusReport {
        StatusReport::parse(&format!(r#"{{"output":"{output}","input":"{input}"}}"#)).unwrap()
    }

    fn recording_store(notify_mode: NotifyMode) -> (Arc<StateStore>, Arc<Mutex<Vec<StateChange>>>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let callbacks = Arc::new(CallbackRegistry::new());
        let relay_events = Arc::clone(&events);
        callbacks.on_relay_changed(move |a, old, new| {
            relay_events.lock().push(StateChange::relay(a, old, new));
        });
        let sensor_events = Arc::clone(&events);
        callbacks.on_sensor_changed(move |a, old, new| {
            sensor_events.lock().push(StateChange::sensor(a, old, new));
        });
        (Arc::new(StateStore::new(callbacks, notify_mode)), events)
    }

    #[test]
    fn apply_stores_reported_values() {
        let (store, _events) = recording_store(NotifyMode::Always);
        store.apply(&report("11110000", "00000001"));

        assert_eq!(store.relay(addr(0)), TriState::On);
        assert_eq!(store.relay(addr(4)), TriState::Off);
        assert_eq!(store.sensor(addr(7)), TriState::On);
        assert_eq!(store.sensor(addr(0)), TriState::Off);
    }

    #[test]
    fn apply_notifies_relays_before_sensors_in_address_order() {
        let (store, events) = recording_store(NotifyMode::Always);
        store.apply(&report("10000000", "00000000"));

        let events = events.lock();
        assert_eq!(events.len(), 16);
        for (position, change) in events.iter().enumerate() {
            if position < 8 {
                assert!(matches!(change, StateChange::Relay { .. }));
            } else {
                assert!(matches!(change, StateChange::Sensor { .. }));
            }
            assert_eq!(change.addr().index(), position % 8);
        }
        assert_eq!(
            events[0],
            StateChange::relay(addr(0), TriState::Unknown, TriState::On)
        );
    }

    #[test]
    fn identical_frames_notify_twice_by_default() {
        let (store, events) = recording_store(NotifyMode::Always);
        let frame = report("10000000", "00000000");
        store.apply(&frame);
        store.apply(&frame);

        let events = events.lock();
        assert_eq!(events.len(), 32);
        // Second round re-reports the stored values.
        assert_eq!(
            events[16],
            StateChange::relay(addr(0), TriState::On, TriState::On)
        );
        assert!(!events[16].is_transition());
    }

    #[test]
    fn on_change_mode_suppresses_refreshes() {
        let (store, events) = recording_store(NotifyMode::OnChange);
        let frame = report("10000000", "00000000");
        store.apply(&frame);
        assert_eq!(events.lock().len(), 16);

        store.apply(&frame);
        // Nothing changed, nothing fired.
        assert_eq!(events.lock().len(), 16);

        store.apply(&report("01000000", "00000000"));
        // Exactly the two flipped relays fired.
        assert_eq!(events.lock().len(), 18);
    }

    #[test]
    fn reset_returns_channels_to_unknown_without_notifying() {
        let (store, events) = recording_store(NotifyMode::Always);
        store.apply(&report("11111111", "11111111"));
        events.lock().clear();

        store.reset();

        assert!(events.lock().is_empty());
        for address in Address::iter() {
            assert_eq!(store.relay(address), TriState::Unknown);
            assert_eq!(store.sensor(address), TriState::Unknown);
        }
    }

    #[test]
    fn callback_sees_old_value_after_reset() {
        let (store, events) = recording_store(NotifyMode::Always);
        store.apply(&report("10000000", "00000000"));
        store.reset();
        events.lock().clear();

        store.apply(&report("10000000", "00000000"));
        assert_eq!(
            events.lock()[0],
            StateChange::relay(addr(0), TriState::Unknown, TriState::On)
        );
    }

    #[test]
    fn snapshot_is_detached() {
        let (store, _events) = recording_store(NotifyMode::Always);
        let snapshot = store.snapshot();
        store.apply(&report("11111111", "00000000"));

        assert_eq!(snapshot.relay(addr(0)), TriState::Unknown);
        assert_eq!(store.relay(addr(0)), TriState::On);
    }
}
