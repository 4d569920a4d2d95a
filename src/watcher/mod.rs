// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Polling a device and streaming its state transitions.
//!
//! A [`StateWatcher`] turns a one-shot [`Probe`] into a change-notification
//! stream. It runs in its own tokio task: probe, compare with the last known
//! state, emit on change, sleep, repeat.
//!
//! Failed probes are logged and skipped. They never count as a transition
//! and leave the last known state untouched, so the next successful probe is
//! compared with the state from before the failure.
//!
//! Delivery is lossy on purpose: the channel holds a single value and a
//! transition detected while the previous one is still unread is dropped.
//!
//! # Examples
//!
//! ```no_run
//! use std::time::Duration;
//! use stbwatch::Device;
//! use stbwatch::probe::StateEndpoint;
//!
//! # async fn example() -> stbwatch::Result<()> {
//! let mut states = stbwatch::watch(
//!     &Device::new("192.168.1.20"),
//!     &StateEndpoint::enigma2(),
//!     Duration::from_secs(5),
//! )?;
//!
//! while let Some(online) = states.recv().await {
//!     println!("set-top box is now {}", if online { "on" } else { "in standby" });
//! }
//! # Ok(())
//! # }
//! ```

mod config;
mod stream;
mod transition;

pub use config::WatchConfig;
pub use stream::StateStream;
pub use transition::{FirstObservation, TransitionDetector};

use std::time::Duration;

use tokio::sync::mpsc::{self, error::TrySendError};
use tokio_util::sync::CancellationToken;

use crate::device::Device;
use crate::error::Result;
use crate::probe::{HttpProbe, Probe, StateEndpoint};

/// Capacity of the transition channel.
const SLOT_CAPACITY: usize = 1;

/// Periodically probes one device and reports state transitions.
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use stbwatch::Device;
/// use stbwatch::probe::{HttpProbe, StateEndpoint};
/// use stbwatch::watcher::{FirstObservation, StateWatcher, WatchConfig};
///
/// # async fn example() -> stbwatch::Result<()> {
/// let probe = HttpProbe::new(
///     Device::new("192.168.1.20"),
///     &StateEndpoint::enigma2(),
///     Duration::from_secs(3),
/// )?;
/// let config = WatchConfig::new()
///     .with_interval(Duration::from_secs(10))
///     .with_first_observation(FirstObservation::Report);
///
/// let mut states = StateWatcher::new(probe, config)?
///     .with_label("living room")
///     .spawn();
/// let initial = states.recv().await;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct StateWatcher<P> {
    probe: P,
    config: WatchConfig,
    label: String,
}

impl<P: Probe + 'static> StateWatcher<P> {
    /// Creates a watcher for the given probe.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroInterval`](crate::error::ConfigError::ZeroInterval)
    /// if the configured interval is zero.
    pub fn new(probe: P, config: WatchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            probe,
            config,
            label: "device".to_string(),
        })
    }

    /// Sets the name used in log records.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Returns the watcher configuration.
    #[must_use]
    pub fn config(&self) -> &WatchConfig {
        &self.config
    }

    /// Starts polling in a background task.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn spawn(self) -> StateStream {
        self.spawn_with_token(CancellationToken::new())
    }

    /// Starts polling in a background task stopped by `cancel_token`.
    ///
    /// The stream holds a child of `cancel_token`: dropping or shutting down
    /// the stream stops this watcher only.
    #[must_use]
    pub fn spawn_with_token(self, cancel_token: CancellationToken) -> StateStream {
        let (tx, rx) = mpsc::channel(SLOT_CAPACITY);
        let cancel_token = cancel_token.child_token();

        let task_cancel = cancel_token.clone();
        let task = tokio::spawn(async move {
            watch_loop(self.probe, self.config, self.label, tx, task_cancel).await;
        });

        StateStream::new(rx, cancel_token, task)
    }
}

/// Watches a device's state endpoint over HTTP.
///
/// The first sample is taken as the baseline and not reported. Each probe
/// uses [`HttpProbe::DEFAULT_TIMEOUT`]; build a [`StateWatcher`] directly for
/// other settings.
///
/// # Errors
///
/// Returns error if the interval is zero or the HTTP client cannot be
/// created.
pub fn watch(
    device: &Device,
    endpoint: &StateEndpoint,
    interval: Duration,
) -> Result<StateStream> {
    let probe = HttpProbe::new(device.clone(), endpoint, HttpProbe::DEFAULT_TIMEOUT)?;
    let config = WatchConfig::new().with_interval(interval);
    Ok(StateWatcher::new(probe, config)?
        .with_label(device.host())
        .spawn())
}

async fn watch_loop<P: Probe>(
    probe: P,
    config: WatchConfig,
    label: String,
    tx: mpsc::Sender<bool>,
    cancel_token: CancellationToken,
) {
    tracing::info!(
        device = %label,
        interval = ?config.interval(),
        "Monitoring power state"
    );

    let mut detector = TransitionDetector::new(config.first_observation());

    loop {
        let outcome = tokio::select! {
            biased;
            () = cancel_token.cancelled() => break,
            outcome = probe.probe() => outcome,
        };

        match outcome {
            Ok(online) => {
                if let Some(state) = detector.observe(online) {
                    tracing::info!(device = %label, online = state, "Device state changed");
                    match tx.try_send(state) {
                        Ok(()) => {}
                        Err(TrySendError::Full(_)) => {
                            tracing::debug!(
                                device = %label,
                                online = state,
                                "Previous transition not consumed, dropping"
                            );
                        }
                        Err(TrySendError::Closed(_)) => {
                            tracing::debug!(device = %label, "State receiver dropped");
                            break;
                        }
                    }
                }
            }
            Err(e) => {
                tracing::warn!(
                    device = %label,
                    error = %e,
                    "Probe failed, keeping last known state"
                );
            }
        }

        tokio::select! {
            biased;
            () = cancel_token.cancelled() => break,
            () = tokio::time::sleep(config.interval()) => {}
        }
    }

    tracing::info!(device = %label, "Stopped monitoring power state");
}
