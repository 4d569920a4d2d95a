// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Network address of a watched device.

use std::time::Duration;

use reqwest::Client;

use crate::error::NetworkError;
use crate::protocol::HttpClient;

/// A device on the local network, identified by its address.
///
/// A device carries only what is needed to form requests: host, port,
/// scheme and optional basic-auth credentials.
///
/// # Examples
///
/// ```
/// use stbwatch::Device;
///
/// let stb = Device::new("192.168.1.20");
/// assert_eq!(stb.base_url(), "http://192.168.1.20");
///
/// let stb = Device::new("192.168.1.20")
///     .with_port(8080)
///     .with_credentials("root", "dreambox");
/// assert_eq!(stb.base_url(), "http://192.168.1.20:8080");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    host: String,
    port: u16,
    use_https: bool,
    credentials: Option<(String, String)>,
}

impl Device {
    /// Port of the plain HTTP web interface.
    pub const DEFAULT_PORT: u16 = 80;
    /// Port of the HTTPS web interface.
    pub const DEFAULT_HTTPS_PORT: u16 = 443;

    /// A device answering plain HTTP on [`DEFAULT_PORT`](Self::DEFAULT_PORT).
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: Self::DEFAULT_PORT,
            use_https: false,
            credentials: None,
        }
    }

    #[must_use]
    pub fn with_port(self, port: u16) -> Self {
        Self { port, ..self }
    }

    /// Talks to the web interface over TLS.
    ///
    /// A device still on port 80 moves to 443; any other port is kept.
    #[must_use]
    pub fn with_https(self) -> Self {
        let port = match self.port {
            Self::DEFAULT_PORT => Self::DEFAULT_HTTPS_PORT,
            port => port,
        };
        Self {
            use_https: true,
            port,
            ..self
        }
    }

    /// Basic-auth login of the web interface.
    #[must_use]
    pub fn with_credentials(
        self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            credentials: Some((username.into(), password.into())),
            ..self
        }
    }

    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    #[must_use]
    pub fn use_https(&self) -> bool {
        self.use_https
    }

    /// Username and password, when the web interface is protected.
    #[must_use]
    pub fn credentials(&self) -> Option<(&str, &str)> {
        self.credentials
            .as_ref()
            .map(|(user, password)| (user.as_str(), password.as_str()))
    }

    fn scheme(&self) -> (&'static str, u16) {
        if self.use_https {
            ("https", Self::DEFAULT_HTTPS_PORT)
        } else {
            ("http", Self::DEFAULT_PORT)
        }
    }

    /// Root URL of the web interface, e.g. `http://192.168.1.20`.
    ///
    /// The port is only spelled out when it differs from the scheme's.
    #[must_use]
    pub fn base_url(&self) -> String {
        let (scheme, implied_port) = self.scheme();
        if self.port == implied_port {
            format!("{scheme}://{}", self.host)
        } else {
            format!("{scheme}://{}:{}", self.host, self.port)
        }
    }

    /// Creates an [`HttpClient`] for this device with the given request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidAddress`] if the host is empty, or
    /// [`NetworkError::Http`] if the underlying client cannot be built.
    pub fn into_client(self, timeout: Duration) -> Result<HttpClient, NetworkError> {
        if self.host.trim().is_empty() {
            return Err(NetworkError::InvalidAddress("host is empty".to_string()));
        }

        let base_url = self.base_url();

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(NetworkError::Http)?;

        Ok(HttpClient::new(base_url, client, self.credentials, timeout))
    }
}
