// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State change events published by a watch group.

use std::fmt;

/// A device went online or offline.
///
/// # Examples
///
/// ```
/// use stbwatch::event::StateChangeEvent;
///
/// let event = StateChangeEvent::new("living room", true);
/// assert_eq!(event.device(), "living room");
/// assert!(event.is_online());
/// assert_eq!(event.to_string(), "living room is online");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StateChangeEvent {
    device: String,
    online: bool,
}

impl StateChangeEvent {
    /// Creates an event for the named device.
    #[must_use]
    pub fn new(device: impl Into<String>, online: bool) -> Self {
        Self {
            device: device.into(),
            online,
        }
    }

    /// Returns the name the device was registered under.
    #[must_use]
    pub fn device(&self) -> &str {
        &self.device
    }

    /// Returns the new state.
    #[must_use]
    pub fn is_online(&self) -> bool {
        self.online
    }
}

impl fmt::Display for StateChangeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.online { "online" } else { "offline" };
        write!(f, "{} is {state}", self.device)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_offline() {
        let event = StateChangeEvent::new("bedroom", false);
        assert_eq!(event.to_string(), "bedroom is offline");
        assert!(!event.is_online());
    }
}
