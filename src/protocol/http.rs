// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP transport shared by probes and device clients.

use std::time::Duration;

use reqwest::Client;

use crate::error::{DecodeError, Error, NetworkError};

/// HTTP client bound to a single device.
///
/// Created with [`Device::into_client`](crate::Device::into_client). Every
/// request is a plain GET without a body; the response body is returned as
/// text.
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
    client: Client,
    credentials: Option<(String, String)>,
    timeout: Duration,
}

impl HttpClient {
    pub(crate) fn new(
        base_url: String,
        client: Client,
        credentials: Option<(String, String)>,
        timeout: Duration,
    ) -> Self {
        Self {
            base_url,
            client,
            credentials,
            timeout,
        }
    }

    /// Returns the base URL of the device.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the URL for a path and its query parameters.
    fn build_url(&self, path: &str, query: &[(&str, String)]) -> String {
        let mut url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));

        for (i, (key, value)) in query.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(&urlencoding::encode(key));
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }

        url
    }

    /// Sends a GET request and returns the response body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Network`] if the device cannot be reached, the request
    /// times out or the status is not a success, and [`Error::Decode`] if the
    /// body cannot be read as UTF-8 text.
    pub async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<String, Error> {
        let url = self.build_url(path, query);

        tracing::debug!(url = %url, "Sending HTTP request");

        let mut request = self.client.get(&url);
        if let Some((username, password)) = &self.credentials {
            request = request.basic_auth(username, Some(password));
        }

        let response = request.send().await.map_err(|e| self.classify(e))?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(NetworkError::AuthenticationFailed.into());
        }

        if !response.status().is_success() {
            return Err(NetworkError::UnexpectedStatus {
                status: response.status().as_u16(),
                reason: response
                    .status()
                    .canonical_reason()
                    .unwrap_or("Unknown")
                    .to_string(),
            }
            .into());
        }

        let bytes = response.bytes().await.map_err(DecodeError::Body)?;
        let body = String::from_utf8(bytes.to_vec()).map_err(DecodeError::from)?;

        tracing::debug!(body = %body, "Received HTTP response");

        Ok(body)
    }

    fn classify(&self, err: reqwest::Error) -> NetworkError {
        if err.is_timeout() {
            NetworkError::Timeout(u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX))
        } else if err.is_connect() {
            NetworkError::ConnectionFailed(err.to_string())
        } else {
            NetworkError::Http(err)
        }
    }
}
