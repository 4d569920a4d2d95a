// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `stbwatch` library.
//!
//! Failures are split by where they happen: reaching the device
//! ([`NetworkError`]), reading what it sent back ([`DecodeError`]), the device
//! refusing a command ([`DeviceError`]) and invalid watcher settings
//! ([`ConfigError`]).

use std::string::FromUtf8Error;

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// The device could not be reached or answered with an error status.
    #[error("network error: {0}")]
    Network(#[from] NetworkError),

    /// The response body could not be read.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// The device answered but did not carry out the request.
    #[error("device error: {0}")]
    Device(#[from] DeviceError),

    /// Watcher or group configuration is invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl Error {
    /// Returns `true` for failures a polling loop should simply retry on the
    /// next tick.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Decode(_))
    }
}

/// Errors raised while talking to a device over HTTP.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[source] reqwest::Error),

    /// Connection to the device failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// The device answered with a non-success status.
    #[error("unexpected HTTP status {status} ({reason})")]
    UnexpectedStatus {
        /// Numeric status code.
        status: u16,
        /// Canonical reason phrase, if known.
        reason: String,
    },

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,
}

/// Errors raised while reading a response body.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The body stream could not be read to the end.
    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),

    /// The body is not valid UTF-8 text.
    #[error("response body is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] FromUtf8Error),
}

/// Errors reported by the device itself.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// Command was rejected by the device.
    #[error("command rejected: {0}")]
    CommandRejected(String),
}

/// Errors in watcher configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The polling interval must be greater than zero.
    #[error("polling interval must be greater than zero")]
    ZeroInterval,

    /// The marker substring must not be empty.
    #[error("state marker must not be empty")]
    EmptyMarker,

    /// Two devices in a group share the same name.
    #[error("duplicate device name: {0}")]
    DuplicateDevice(String),

    /// The configuration document could not be parsed.
    #[error("invalid configuration document: {0}")]
    Invalid(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
