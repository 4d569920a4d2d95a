// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Declarative configuration for a [`WatchGroup`](crate::event::WatchGroup).
//!
//! Every field except a device's `name` and `host` is optional; missing
//! values fall back to the defaults of [`Device`], [`StateEndpoint`],
//! [`WatchConfig`] and [`HttpProbe`].
//!
//! # Examples
//!
//! ```
//! use stbwatch::config::GroupConfig;
//!
//! let config = GroupConfig::from_json(r#"{
//!     "devices": [
//!         { "name": "living room", "host": "192.168.1.20", "interval_secs": 10 },
//!         { "name": "bedroom", "host": "192.168.1.21", "first_observation": "report" }
//!     ]
//! }"#).unwrap();
//!
//! assert_eq!(config.devices.len(), 2);
//! assert!(config.validate().is_ok());
//! ```

use std::collections::HashSet;
use std::time::Duration;

use serde::Deserialize;

use crate::device::Device;
use crate::error::ConfigError;
use crate::probe::{HttpProbe, StateEndpoint};
use crate::watcher::{FirstObservation, WatchConfig};

/// Configuration for a group of watched devices.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupConfig {
    /// Devices to watch.
    pub devices: Vec<DeviceEntry>,
    /// Number of events buffered per subscriber.
    pub event_capacity: Option<usize>,
}

impl GroupConfig {
    /// Parses a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the document is malformed.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Checks every entry and rejects duplicate names.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.event_capacity == Some(0) {
            return Err(ConfigError::Invalid(
                "event_capacity must be greater than zero".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for entry in &self.devices {
            if !seen.insert(entry.name.as_str()) {
                return Err(ConfigError::DuplicateDevice(entry.name.clone()));
            }
            if entry.username.is_some() != entry.password.is_some() {
                return Err(ConfigError::Invalid(format!(
                    "{}: username and password must be set together",
                    entry.name
                )));
            }
            entry.endpoint()?;
            entry.watch_config().validate()?;
        }
        Ok(())
    }
}

/// One watched device.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeviceEntry {
    /// Name used in events and log records.
    pub name: String,
    /// Hostname or IP address.
    pub host: String,
    /// Port, defaults to 80 (443 with `https`).
    pub port: Option<u16>,
    /// Use HTTPS instead of HTTP.
    #[serde(default)]
    pub https: bool,
    /// Basic-auth user name.
    pub username: Option<String>,
    /// Basic-auth password.
    pub password: Option<String>,
    /// State path, defaults to the Enigma2 power state path.
    pub path: Option<String>,
    /// Online marker, defaults to the Enigma2 marker.
    pub marker: Option<String>,
    /// Seconds between probes.
    pub interval_secs: Option<u64>,
    /// Probe timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Whether the first sample is reported.
    #[serde(default)]
    pub first_observation: FirstObservation,
}

impl DeviceEntry {
    /// Returns the device address described by this entry.
    #[must_use]
    pub fn device(&self) -> Device {
        let mut device = Device::new(self.host.clone());
        if let Some(port) = self.port {
            device = device.with_port(port);
        }
        if self.https {
            device = device.with_https();
        }
        if let (Some(username), Some(password)) = (&self.username, &self.password) {
            device = device.with_credentials(username.clone(), password.clone());
        }
        device
    }

    /// Returns the state endpoint described by this entry.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyMarker`] if an empty marker is configured.
    pub fn endpoint(&self) -> Result<StateEndpoint, ConfigError> {
        StateEndpoint::new(
            self.path
                .clone()
                .unwrap_or_else(|| StateEndpoint::ENIGMA2_PATH.to_string()),
            self.marker
                .clone()
                .unwrap_or_else(|| StateEndpoint::ENIGMA2_ONLINE_MARKER.to_string()),
        )
    }

    /// Returns the watcher settings described by this entry.
    #[must_use]
    pub fn watch_config(&self) -> WatchConfig {
        WatchConfig::new()
            .with_interval(
                self.interval_secs
                    .map_or(WatchConfig::DEFAULT_INTERVAL, Duration::from_secs),
            )
            .with_first_observation(self.first_observation)
    }

    /// Returns the probe timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout_secs
            .map_or(HttpProbe::DEFAULT_TIMEOUT, Duration::from_secs)
    }
}
