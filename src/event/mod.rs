// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Group-level state change events.
//!
//! A [`WatchGroup`] runs one watcher per device and republishes their
//! transitions as [`StateChangeEvent`]s on an [`EventBus`], so a single
//! subscriber can follow every device.
//!
//! # Examples
//!
//! ```
//! use stbwatch::event::{EventBus, StateChangeEvent};
//!
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe();
//!
//! bus.publish(StateChangeEvent::new("living room", false));
//! ```

mod event_bus;
mod group;
mod state_change;

pub use event_bus::EventBus;
pub use group::WatchGroup;
pub use state_change::StateChangeEvent;
