// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Probing a device's state endpoint over HTTP.

use std::time::Duration;

use crate::device::Device;
use crate::error::{ConfigError, Result};
use crate::protocol::HttpClient;

use super::{MarkerDecoder, Probe, StateDecoder};

/// Where a device exposes its state and how to recognise "online".
///
/// Path and marker are integration details; the Enigma2 preset covers the
/// set-top boxes this crate was written for.
///
/// # Examples
///
/// ```
/// use stbwatch::probe::StateEndpoint;
///
/// let endpoint = StateEndpoint::enigma2();
/// assert_eq!(endpoint.path(), "web/powerstate");
///
/// let custom = StateEndpoint::new("status", "\"power\":\"on\"").unwrap();
/// assert_eq!(custom.marker(), "\"power\":\"on\"");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateEndpoint {
    path: String,
    marker: String,
}

impl StateEndpoint {
    /// Power state path of the Enigma2 web interface.
    pub const ENIGMA2_PATH: &'static str = "web/powerstate";
    /// Fragment an Enigma2 box returns while it is switched on.
    pub const ENIGMA2_ONLINE_MARKER: &'static str = "<e2instandby>false</e2instandby>";

    /// Creates an endpoint from a path and a marker substring.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyMarker`] if the marker is empty, since an
    /// empty marker would match every body.
    pub fn new(
        path: impl Into<String>,
        marker: impl Into<String>,
    ) -> std::result::Result<Self, ConfigError> {
        let marker = marker.into();
        if marker.is_empty() {
            return Err(ConfigError::EmptyMarker);
        }
        Ok(Self {
            path: path.into(),
            marker,
        })
    }

    /// The Enigma2 `web/powerstate` endpoint.
    #[must_use]
    pub fn enigma2() -> Self {
        Self {
            path: Self::ENIGMA2_PATH.to_string(),
            marker: Self::ENIGMA2_ONLINE_MARKER.to_string(),
        }
    }

    /// Returns the request path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the marker substring.
    #[must_use]
    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Returns a decoder matching this endpoint's marker.
    #[must_use]
    pub fn decoder(&self) -> MarkerDecoder {
        MarkerDecoder::new(self.marker.clone())
    }
}

impl Default for StateEndpoint {
    fn default() -> Self {
        Self::enigma2()
    }
}

/// Probe that GETs a state path and decodes the body.
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use stbwatch::Device;
/// use stbwatch::probe::{HttpProbe, Probe, StateEndpoint};
///
/// # async fn example() -> stbwatch::Result<()> {
/// let probe = HttpProbe::new(
///     Device::new("192.168.1.20"),
///     &StateEndpoint::enigma2(),
///     Duration::from_secs(3),
/// )?;
/// let online = probe.probe().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpProbe<D = MarkerDecoder> {
    client: HttpClient,
    path: String,
    decoder: D,
}

impl HttpProbe<MarkerDecoder> {
    /// Default probe timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Creates a probe for the given device and endpoint.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new(device: Device, endpoint: &StateEndpoint, timeout: Duration) -> Result<Self> {
        let client = device.into_client(timeout)?;
        Ok(Self::with_client(client, endpoint.path(), endpoint.decoder()))
    }
}

impl<D: StateDecoder> HttpProbe<D> {
    /// Creates a probe from an existing client, path and decoder.
    #[must_use]
    pub fn with_client(client: HttpClient, path: impl Into<String>, decoder: D) -> Self {
        Self {
            client,
            path: path.into(),
            decoder,
        }
    }

    /// Returns the base URL of the probed device.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }
}

impl<D: StateDecoder> Probe for HttpProbe<D> {
    async fn probe(&self) -> Result<bool> {
        let body = self.client.get(&self.path, &[]).await?;
        let online = self.decoder.decode(&body);
        tracing::debug!(url = %self.client.base_url(), online, "Probed device state");
        Ok(online)
    }
}

/// Probes a device once.
///
/// Returns `true` if the endpoint's marker is present in the response body
/// and `false` if it is absent.
///
/// # Errors
///
/// Returns [`Error::Network`](crate::Error::Network) on connection failure, timeout or an error
/// status, and [`Error::Decode`](crate::Error::Decode) if the body cannot be read.
pub async fn probe(device: &Device, endpoint: &StateEndpoint, timeout: Duration) -> Result<bool> {
    HttpProbe::new(device.clone(), endpoint, timeout)?
        .probe()
        .await
}
