// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Watching several devices at once.

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::config::GroupConfig;
use crate::error::{ConfigError, Result};
use crate::probe::{HttpProbe, Probe};
use crate::watcher::{StateWatcher, WatchConfig};

use super::{EventBus, StateChangeEvent};

#[derive(Debug)]
struct WatchedDevice {
    name: String,
    cancel_token: CancellationToken,
    forwarder: JoinHandle<()>,
}

/// Runs one watcher per device and publishes their transitions on a shared
/// event bus.
///
/// Each device keeps its own task and last known state; events of a single
/// device arrive in order, events of different devices interleave freely.
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use stbwatch::Device;
/// use stbwatch::event::WatchGroup;
/// use stbwatch::probe::{HttpProbe, StateEndpoint};
/// use stbwatch::watcher::WatchConfig;
///
/// # async fn example() -> stbwatch::Result<()> {
/// let mut group = WatchGroup::new();
/// let mut events = group.subscribe();
///
/// for (name, host) in [("living room", "192.168.1.20"), ("bedroom", "192.168.1.21")] {
///     let probe = HttpProbe::new(Device::new(host), &StateEndpoint::enigma2(), Duration::from_secs(3))?;
///     group.add(name, probe, WatchConfig::new())?;
/// }
///
/// while let Ok(event) = events.recv().await {
///     println!("{event}");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct WatchGroup {
    event_bus: EventBus,
    devices: Vec<WatchedDevice>,
    cancel_token: CancellationToken,
}

impl WatchGroup {
    /// Creates an empty group with the default event capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_event_bus(EventBus::new())
    }

    /// Creates an empty group whose event bus buffers `capacity` events.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_event_bus(EventBus::with_capacity(capacity))
    }

    fn with_event_bus(event_bus: EventBus) -> Self {
        Self {
            event_bus,
            devices: Vec::new(),
            cancel_token: CancellationToken::new(),
        }
    }

    /// Builds a group from a configuration document and starts every watcher.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is invalid or an HTTP client cannot
    /// be created.
    pub fn from_config(config: &GroupConfig) -> Result<Self> {
        config.validate()?;

        let mut group = match config.event_capacity {
            Some(capacity) => Self::with_capacity(capacity),
            None => Self::new(),
        };

        for entry in &config.devices {
            let probe = HttpProbe::new(entry.device(), &entry.endpoint()?, entry.timeout())?;
            group.add(entry.name.clone(), probe, entry.watch_config())?;
        }

        Ok(group)
    }

    /// Subscribes to state changes of every device in the group.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StateChangeEvent> {
        self.event_bus.subscribe()
    }

    /// Starts watching a device under the given name.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateDevice`] if the name is already taken,
    /// or a configuration error if `config` is invalid.
    pub fn add<P: Probe + 'static>(
        &mut self,
        name: impl Into<String>,
        probe: P,
        config: WatchConfig,
    ) -> Result<()> {
        let name = name.into();
        if self.contains(&name) {
            return Err(ConfigError::DuplicateDevice(name).into());
        }

        let cancel_token = self.cancel_token.child_token();
        let mut states = StateWatcher::new(probe, config)?
            .with_label(name.clone())
            .spawn_with_token(cancel_token.clone());

        let event_bus = self.event_bus.clone();
        let device = name.clone();
        let forwarder = tokio::spawn(async move {
            while let Some(online) = states.recv().await {
                event_bus.publish(StateChangeEvent::new(device.clone(), online));
            }
        });

        tracing::debug!(device = %name, "Added device to watch group");

        self.devices.push(WatchedDevice {
            name,
            cancel_token,
            forwarder,
        });
        Ok(())
    }

    /// Stops watching the named device.
    ///
    /// Returns `false` if no device has that name.
    pub fn remove(&mut self, name: &str) -> bool {
        let Some(index) = self.devices.iter().position(|d| d.name == name) else {
            return false;
        };
        let device = self.devices.remove(index);
        device.cancel_token.cancel();
        tracing::debug!(device = %name, "Removed device from watch group");
        true
    }

    /// Returns `true` if a device with this name is being watched.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.devices.iter().any(|d| d.name == name)
    }

    /// Returns the names of all watched devices, in insertion order.
    #[must_use]
    pub fn device_names(&self) -> Vec<&str> {
        self.devices.iter().map(|d| d.name.as_str()).collect()
    }

    /// Returns the number of watched devices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Returns `true` if no device is being watched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Stops every watcher in the group.
    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }

    /// Stops every watcher and waits for their tasks to finish.
    pub async fn shutdown_and_wait(mut self) {
        self.cancel_token.cancel();
        for device in self.devices.drain(..) {
            if let Err(e) = device.forwarder.await {
                tracing::warn!(device = %device.name, error = %e, "Watcher task failed");
            }
        }
    }
}

impl Default for WatchGroup {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for WatchGroup {
    fn drop(&mut self) {
        self.cancel_token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_group_is_empty() {
        let group = WatchGroup::with_capacity(4);
        assert!(group.is_empty());
        assert!(group.device_names().is_empty());
    }

    #[test]
    #[should_panic(expected = "capacity")]
    fn zero_capacity_panics() {
        let _ = WatchGroup::with_capacity(0);
    }
}
