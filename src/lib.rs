// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `stbwatch` - watch the power state of set-top boxes and other devices
//! that expose their state over HTTP.
//!
//! The library polls a device's state endpoint, decodes the answer into
//! online/offline and reports only the transitions.
//!
//! # Building Blocks
//!
//! - **Probes**: one request, one boolean ([`probe`](probe::probe), [`probe::HttpProbe`])
//! - **Watchers**: a background task per device streaming transitions ([`watch`], [`watcher::StateWatcher`])
//! - **Groups**: many watchers feeding one event bus ([`event::WatchGroup`])
//! - **Enigma2**: power and message calls for Enigma2 boxes ([`enigma2::Enigma2Client`])
//!
//! # Quick Start
//!
//! ```no_run
//! use std::time::Duration;
//! use stbwatch::Device;
//! use stbwatch::probe::StateEndpoint;
//!
//! #[tokio::main]
//! async fn main() -> stbwatch::Result<()> {
//!     let mut states = stbwatch::watch(
//!         &Device::new("192.168.1.20"),
//!         &StateEndpoint::enigma2(),
//!         Duration::from_secs(5),
//!     )?;
//!
//!     while let Some(online) = states.recv().await {
//!         println!("set-top box online: {online}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Several Devices
//!
//! ```no_run
//! use stbwatch::config::GroupConfig;
//! use stbwatch::event::WatchGroup;
//!
//! #[tokio::main]
//! async fn main() -> stbwatch::Result<()> {
//!     let config = GroupConfig::from_json(r#"{
//!         "devices": [
//!             { "name": "living room", "host": "192.168.1.20" },
//!             { "name": "bedroom", "host": "192.168.1.21", "interval_secs": 30 }
//!         ]
//!     }"#)?;
//!
//!     let group = WatchGroup::from_config(&config)?;
//!     let mut events = group.subscribe();
//!     while let Ok(event) = events.recv().await {
//!         println!("{event}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
mod device;
pub mod enigma2;
pub mod error;
pub mod event;
pub mod probe;
pub mod protocol;
pub mod watcher;

pub use device::Device;
pub use error::{ConfigError, DecodeError, DeviceError, Error, NetworkError, Result};
pub use event::{StateChangeEvent, WatchGroup};
pub use probe::{Probe, StateEndpoint};
pub use watcher::{FirstObservation, StateStream, StateWatcher, WatchConfig, watch};
