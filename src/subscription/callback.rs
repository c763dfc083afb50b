// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Callback management for board state subscriptions.
//!
//! This module provides the core types for managing subscription
//! callbacks:
//!
//! - [`SubscriptionId`] - Unique identifier for unsubscribing
//! - [`CallbackRegistry`] - Registry for storing and dispatching callbacks

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::state::StateChange;
use crate::types::{Address, TriState};

/// Unique identifier for a subscription.
///
/// Returned when registering a callback; pass it back to unsubscribe.
/// IDs are unique within a board's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Creates a new subscription ID with the given value.
    #[must_use]
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", self.0)
    }
}

/// Type alias for state change callbacks.
///
/// Receives the channel address, the previously stored value, and the
/// newly reported value, in that order.
type ChangeCallback = Arc<dyn Fn(Address, TriState, TriState) + Send + Sync>;

/// One registered callback, optionally pinned to a single address.
struct Registration {
    filter: Option<Address>,
    callback: ChangeCallback,
}

/// Registry for board subscription callbacks.
///
/// Thread-safe via `parking_lot::RwLock`; callbacks are wrapped in
/// `Arc` so registration is cheap. Dispatch calls every matching
/// callback synchronously; multiple callbacks for the same channel run
/// in arbitrary order relative to each other.
pub struct CallbackRegistry {
    /// Counter for generating unique subscription IDs.
    next_id: AtomicU64,
    /// Relay change callbacks.
    relay_callbacks: RwLock<HashMap<SubscriptionId, Registration>>,
    /// Sensor change callbacks.
    sensor_callbacks: RwLock<HashMap<SubscriptionId, Registration>>,
}

impl CallbackRegistry {
    /// Creates a new empty callback registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            relay_callbacks: RwLock::new(HashMap::new()),
            sensor_callbacks: RwLock::new(HashMap::new()),
        }
    }

    /// Generates a new unique subscription ID.
    fn next_id(&self) -> SubscriptionId {
        SubscriptionId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Registers a callback for every relay update.
    pub fn on_relay_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(Address, TriState, TriState) + Send + Sync + 'static,
    {
        self.insert(&self.relay_callbacks, None, callback)
    }

    /// Registers a callback for updates of one relay.
    pub fn on_relay_at<F>(&self, addr: Address, callback: F) -> SubscriptionId
    where
        F: Fn(Address, TriState, TriState) + Send + Sync + 'static,
    {
        self.insert(&self.relay_callbacks, Some(addr), callback)
    }

    /// Registers a callback for every sensor update.
    pub fn on_sensor_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(Address, TriState, TriState) + Send + Sync + 'static,
    {
        self.insert(&self.sensor_callbacks, None, callback)
    }

    /// Registers a callback for updates of one sensor.
    pub fn on_sensor_at<F>(&self, addr: Address, callback: F) -> SubscriptionId
    where
        F: Fn(Address, TriState, TriState) + Send + Sync + 'static,
    {
        self.insert(&self.sensor_callbacks, Some(addr), callback)
    }

    fn insert<F>(
        &self,
        callbacks: &RwLock<HashMap<SubscriptionId, Registration>>,
        filter: Option<Address>,
        callback: F,
    ) -> SubscriptionId
    where
        F: Fn(Address, TriState, TriState) + Send + Sync + 'static,
    {
        let id = self.next_id();
        callbacks.write().insert(
            id,
            Registration {
                filter,
                callback: Arc::new(callback),
            },
        );
        id
    }

    /// Unregisters a callback by its subscription ID.
    ///
    /// Returns `true` if a callback was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        if self.relay_callbacks.write().remove(&id).is_some() {
            return true;
        }
        if self.sensor_callbacks.write().remove(&id).is_some() {
            return true;
        }
        false
    }

    /// Clears all callbacks.
    pub fn clear(&self) {
        self.relay_callbacks.write().clear();
        self.sensor_callbacks.write().clear();
    }

    /// Returns the total number of registered callbacks.
    #[must_use]
    pub fn callback_count(&self) -> usize {
        self.relay_callbacks.read().len() + self.sensor_callbacks.read().len()
    }

    /// Returns `true` if there are no registered callbacks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callback_count() == 0
    }

    /// Dispatches one channel update to every matching callback.
    pub fn dispatch(&self, change: &StateChange) {
        match change {
            StateChange::Relay { addr, old, new } => {
                Self::dispatch_to(&self.relay_callbacks, *addr, *old, *new);
            }
            StateChange::Sensor { addr, old, new } => {
                Self::dispatch_to(&self.sensor_callbacks, *addr, *old, *new);
            }
        }
    }

    fn dispatch_to(
        callbacks: &RwLock<HashMap<SubscriptionId, Registration>>,
        addr: Address,
        old: TriState,
        new: TriState,
    ) {
        let callbacks = callbacks.read();
        for registration in callbacks.values() {
            if registration.filter.is_none_or(|filter| filter == addr) {
                (registration.callback)(addr, old, new);
            }
        }
    }
}

impl Default for CallbackRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("callback_count", &self.callback_count())
            .finish()
    }
}
