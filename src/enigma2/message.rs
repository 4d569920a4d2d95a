// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! On-screen messages shown through `web/message`.

use std::time::Duration;

/// Icon and behaviour of an on-screen message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MessageType {
    /// Yes/no question.
    YesNo,
    /// Informational message.
    #[default]
    Info,
    /// Plain message.
    Message,
    /// Warning.
    Attention,
}

impl MessageType {
    /// Returns the numeric `type` value.
    #[must_use]
    pub const fn code(&self) -> u8 {
        match self {
            Self::YesNo => 0,
            Self::Info => 1,
            Self::Message => 2,
            Self::Attention => 3,
        }
    }
}

/// A message to display on the TV attached to the box.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use stbwatch::enigma2::{Message, MessageType};
///
/// let msg = Message::new("Dinner is ready")
///     .with_type(MessageType::Attention)
///     .with_timeout(Duration::from_secs(10));
///
/// assert_eq!(msg.text(), "Dinner is ready");
/// assert_eq!(msg.message_type(), MessageType::Attention);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    text: String,
    message_type: MessageType,
    timeout: Duration,
}

impl Message {
    /// Default display time.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Creates an informational message shown for five seconds.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            message_type: MessageType::default(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets the message type.
    #[must_use]
    pub fn with_type(mut self, message_type: MessageType) -> Self {
        self.message_type = message_type;
        self
    }

    /// Sets how long the message stays on screen. Whole seconds only.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the message text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the message type.
    #[must_use]
    pub fn message_type(&self) -> MessageType {
        self.message_type
    }

    /// Returns the display time.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub(crate) fn query(&self) -> [(&'static str, String); 3] {
        [
            ("text", self.text.clone()),
            ("type", self.message_type.code().to_string()),
            ("timeout", self.timeout.as_secs().to_string()),
        ]
    }
}
