// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Consumer side of a running watcher.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Handle to a running watcher, yielding one value per state transition.
///
/// The watcher runs in a background task. Values are delivered through a
/// single slot: if the previous transition has not been taken yet, newer ones
/// are dropped. Dropping the stream (or calling [`shutdown`](Self::shutdown))
/// stops the task, including a probe or sleep in progress.
///
/// The stream ends (`None`) once the watcher has stopped.
pub struct StateStream {
    rx: mpsc::Receiver<bool>,
    cancel_token: CancellationToken,
    task: JoinHandle<()>,
}

impl std::fmt::Debug for StateStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateStream")
            .field("cancel_token", &self.cancel_token)
            .finish_non_exhaustive()
    }
}

impl StateStream {
    pub(super) fn new(
        rx: mpsc::Receiver<bool>,
        cancel_token: CancellationToken,
        task: JoinHandle<()>,
    ) -> Self {
        Self {
            rx,
            cancel_token,
            task,
        }
    }

    /// Waits for the next transition.
    ///
    /// Returns `None` once the watcher has been shut down.
    pub async fn recv(&mut self) -> Option<bool> {
        self.rx.recv().await
    }

    /// Takes the pending transition, if any, without waiting.
    pub fn try_recv(&mut self) -> Option<bool> {
        self.rx.try_recv().ok()
    }

    /// Stops the watcher.
    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }

    /// Returns the token that stops this watcher when cancelled.
    #[must_use]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    /// Returns `true` once the background task has exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Stream for StateStream {
    type Item = bool;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

impl Drop for StateStream {
    fn drop(&mut self) {
        self.cancel_token.cancel();
    }
}
