// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Watcher settings.

use std::time::Duration;

use crate::error::ConfigError;

use super::FirstObservation;

/// Settings for a single state watcher.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use stbwatch::watcher::{FirstObservation, WatchConfig};
///
/// let config = WatchConfig::new()
///     .with_interval(Duration::from_secs(2))
///     .with_first_observation(FirstObservation::Report);
///
/// assert_eq!(config.interval(), Duration::from_secs(2));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchConfig {
    interval: Duration,
    first_observation: FirstObservation,
}

impl WatchConfig {
    /// Default polling interval.
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            interval: Self::DEFAULT_INTERVAL,
            first_observation: FirstObservation::default(),
        }
    }

    /// Sets the delay between two probes.
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Sets how the first sample is treated.
    #[must_use]
    pub fn with_first_observation(mut self, first: FirstObservation) -> Self {
        self.first_observation = first;
        self
    }

    /// Returns the polling interval.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns the first-sample policy.
    #[must_use]
    pub fn first_observation(&self) -> FirstObservation {
        self.first_observation
    }

    /// Checks that the configuration can drive a watcher.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroInterval`] if the interval is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval.is_zero() {
            return Err(ConfigError::ZeroInterval);
        }
        Ok(())
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self::new()
    }
}
