// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport used to reach devices.
//!
//! Devices are only ever spoken to with HTTP GET requests against their web
//! control interface; [`HttpClient`] wraps one `reqwest` client per device.

mod http;

pub use http::HttpClient;
