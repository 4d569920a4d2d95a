// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Turning a response body into an online/offline sample.

/// Decodes a response body into a boolean state sample.
///
/// Decoding never fails: a body the decoder does not recognise is simply
/// "offline".
pub trait StateDecoder: Send + Sync {
    /// Returns `true` if the body indicates the device is online.
    fn decode(&self, body: &str) -> bool;
}

impl<F> StateDecoder for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn decode(&self, body: &str) -> bool {
        self(body)
    }
}

/// Decoder that reports online when a marker substring appears in the body.
///
/// # Examples
///
/// ```
/// use stbwatch::probe::{MarkerDecoder, StateDecoder};
///
/// let decoder = MarkerDecoder::new("<e2instandby>false</e2instandby>");
/// assert!(decoder.decode("<e2powerstate><e2instandby>false</e2instandby></e2powerstate>"));
/// assert!(!decoder.decode("<e2powerstate><e2instandby>true</e2instandby></e2powerstate>"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerDecoder {
    marker: String,
}

impl MarkerDecoder {
    /// Creates a decoder for the given marker.
    #[must_use]
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    /// Returns the marker substring.
    #[must_use]
    pub fn marker(&self) -> &str {
        &self.marker
    }
}

impl StateDecoder for MarkerDecoder {
    fn decode(&self, body: &str) -> bool {
        body.contains(&self.marker)
    }
}
