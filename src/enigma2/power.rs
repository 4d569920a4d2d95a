// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Power actions understood by `web/powerstate`.

use std::fmt;

/// A power transition requested through the `newstate` parameter.
///
/// # Examples
///
/// ```
/// use stbwatch::enigma2::PowerAction;
///
/// assert_eq!(PowerAction::Wakeup.code(), 4);
/// assert_eq!(PowerAction::Standby.code(), 5);
/// assert_eq!(PowerAction::Toggle.to_string(), "toggle");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerAction {
    /// Switch between standby and running.
    Toggle,
    /// Shut down into deep standby.
    DeepStandby,
    /// Reboot the box.
    Reboot,
    /// Restart the Enigma2 user interface.
    RestartGui,
    /// Leave standby.
    Wakeup,
    /// Enter standby.
    Standby,
}

impl PowerAction {
    /// Returns the numeric `newstate` value.
    #[must_use]
    pub const fn code(&self) -> u8 {
        match self {
            Self::Toggle => 0,
            Self::DeepStandby => 1,
            Self::Reboot => 2,
            Self::RestartGui => 3,
            Self::Wakeup => 4,
            Self::Standby => 5,
        }
    }

    /// Returns a short lowercase name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Toggle => "toggle",
            Self::DeepStandby => "deep standby",
            Self::Reboot => "reboot",
            Self::RestartGui => "restart gui",
            Self::Wakeup => "wakeup",
            Self::Standby => "standby",
        }
    }

    /// The online state the box must report after the action, if any.
    #[must_use]
    pub(crate) const fn expected_online(&self) -> Option<bool> {
        match self {
            Self::Wakeup => Some(true),
            Self::Standby => Some(false),
            Self::Toggle | Self::DeepStandby | Self::Reboot | Self::RestartGui => None,
        }
    }
}

impl fmt::Display for PowerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
