// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Single-shot state probes.
//!
//! A probe performs one request/response cycle against a device and reduces
//! the answer to a boolean: online or offline. The [`Probe`] trait is the
//! seam the [watcher](crate::watcher) polls through; [`HttpProbe`] is the
//! implementation used for real devices.
//!
//! # Examples
//!
//! ```no_run
//! use std::time::Duration;
//! use stbwatch::Device;
//! use stbwatch::probe::{self, StateEndpoint};
//!
//! # async fn example() -> stbwatch::Result<()> {
//! let online = probe::probe(
//!     &Device::new("192.168.1.20"),
//!     &StateEndpoint::enigma2(),
//!     Duration::from_secs(3),
//! )
//! .await?;
//! println!("set-top box online: {online}");
//! # Ok(())
//! # }
//! ```

mod decoder;
mod http_probe;

use std::future::Future;

pub use decoder::{MarkerDecoder, StateDecoder};
pub use http_probe::{HttpProbe, StateEndpoint, probe};

use crate::error::Result;

/// Something that can report whether a device is currently online.
pub trait Probe: Send + Sync {
    /// Performs one probe.
    ///
    /// # Errors
    ///
    /// Returns an error if the device could not be reached or its answer
    /// could not be read. An answer that does not indicate "online" is
    /// `Ok(false)`, not an error.
    fn probe(&self) -> impl Future<Output = Result<bool>> + Send;
}
