// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Client for the Enigma2 set-top-box web interface.
//!
//! Covers the calls needed around power-state monitoring: reading and
//! changing the power state and putting a message on screen. The client is
//! also a [`Probe`], so it can be handed to a
//! [`StateWatcher`](crate::watcher::StateWatcher) directly.
//!
//! # Examples
//!
//! ```no_run
//! use std::time::Duration;
//! use stbwatch::Device;
//! use stbwatch::enigma2::{Enigma2Client, Message, PowerAction};
//!
//! # async fn example() -> stbwatch::Result<()> {
//! let stb = Enigma2Client::new(Device::new("192.168.1.20"), Duration::from_secs(5))?;
//!
//! if !stb.power_state().await? {
//!     stb.set_power(PowerAction::Wakeup).await?;
//! }
//! stb.send_message(&Message::new("Good evening")).await?;
//! # Ok(())
//! # }
//! ```

mod message;
mod power;

pub use message::{Message, MessageType};
pub use power::PowerAction;

use std::time::Duration;

use crate::device::Device;
use crate::error::{DeviceError, Result};
use crate::probe::{MarkerDecoder, Probe, StateDecoder, StateEndpoint};
use crate::protocol::HttpClient;

/// Path of the message endpoint.
const MESSAGE_PATH: &str = "web/message";

/// Fragment returned when a message was displayed.
const MESSAGE_SENT_MARKER: &str = "<e2statetext>Message sent successfully!</e2statetext>";

/// Client for one Enigma2 box.
#[derive(Debug, Clone)]
pub struct Enigma2Client {
    client: HttpClient,
    decoder: MarkerDecoder,
}

impl Enigma2Client {
    /// Creates a client for the given box.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new(device: Device, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: device.into_client(timeout)?,
            decoder: StateEndpoint::enigma2().decoder(),
        })
    }

    /// Returns the base URL of the box.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    /// Returns `true` if the box is running, `false` if it is in standby.
    ///
    /// # Errors
    ///
    /// Returns error if the box cannot be reached or its answer cannot be read.
    pub async fn power_state(&self) -> Result<bool> {
        let body = self.client.get(StateEndpoint::ENIGMA2_PATH, &[]).await?;
        let online = self.decoder.decode(&body);
        tracing::debug!(url = %self.base_url(), online, "Read power state");
        Ok(online)
    }

    /// Requests a power transition and returns the state reported afterwards.
    ///
    /// The answer is read with the same marker as [`power_state`](Self::power_state):
    /// a body without `<e2instandby>false</e2instandby>` counts as standby, so a
    /// wakeup answered by an empty or unrelated body is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::CommandRejected`] if a wakeup leaves the box in
    /// standby or a standby leaves it running, and a network or decode error
    /// if the request fails.
    pub async fn set_power(&self, action: PowerAction) -> Result<bool> {
        let body = self
            .client
            .get(
                StateEndpoint::ENIGMA2_PATH,
                &[("newstate", action.code().to_string())],
            )
            .await?;
        let online = self.decoder.decode(&body);

        if let Some(expected) = action.expected_online()
            && expected != online
        {
            tracing::warn!(url = %self.base_url(), %action, online, "Power action had no effect");
            return Err(DeviceError::CommandRejected(format!(
                "{action} left the box {}",
                if online { "running" } else { "in standby" }
            ))
            .into());
        }

        tracing::info!(url = %self.base_url(), %action, online, "Power action sent");
        Ok(online)
    }

    /// Displays a message on screen.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::CommandRejected`] if the box does not confirm
    /// the message, and a network or decode error if the request fails.
    pub async fn send_message(&self, message: &Message) -> Result<()> {
        let body = self.client.get(MESSAGE_PATH, &message.query()).await?;

        if !body.contains(MESSAGE_SENT_MARKER) {
            tracing::warn!(url = %self.base_url(), text = %message.text(), "Message not confirmed");
            return Err(DeviceError::CommandRejected("message was not confirmed".to_string()).into());
        }

        tracing::info!(url = %self.base_url(), text = %message.text(), "Message sent");
        Ok(())
    }
}

impl Probe for Enigma2Client {
    async fn probe(&self) -> Result<bool> {
        self.power_state().await
    }
}
