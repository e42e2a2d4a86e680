// Copyright (C) 2020-2026  The Blockhouse Technology Limited (TBTL).
//
// This program is free software: you can redistribute it and/or modify it
// under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or (at your
// option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public
// License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Delivery of presentation updates onto the UI execution context.
//!
//! The [`AuthenticationFlow`][crate::AuthenticationFlow] runs on whatever
//! executor drives the SDK futures.  It never mutates presentation state
//! itself; instead it sends [`UiEvent`]s through a [`UiDispatcher`], and the
//! UI context applies them from the matching [`UiReceiver`].

use bh_id_token::UserPassport;
use futures::{
    channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender},
    FutureExt as _, StreamExt as _,
};

use crate::presentation::Alert;

/// An update of the presentation state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Show or hide the loading state of the authenticate button.
    SetLoading(bool),
    /// Present a blocking alert.
    ShowAlert(Alert),
    /// Present the claims of the authenticated user.
    ShowPassport(UserPassport),
    /// Dismiss the claims of the authenticated user.
    DismissPassport,
}

/// Sending half, owned by the authentication flow.
#[derive(Debug, Clone)]
pub struct UiDispatcher {
    sender: UnboundedSender<UiEvent>,
}

/// Receiving half, owned by the UI context.
#[derive(Debug)]
pub struct UiReceiver {
    receiver: UnboundedReceiver<UiEvent>,
}

impl UiDispatcher {
    /// Creates a connected dispatcher and receiver pair.
    pub fn channel() -> (Self, UiReceiver) {
        let (sender, receiver) = unbounded();
        (Self { sender }, UiReceiver { receiver })
    }

    /// Queues the `event` for the UI context.
    ///
    /// Events sent after the receiver is dropped are discarded.
    pub fn deliver(&self, event: UiEvent) {
        if let Err(error) = self.sender.unbounded_send(event) {
            tracing::debug!(event = ?error.into_inner(), "UI is gone, dropping event");
        }
    }
}

impl UiReceiver {
    /// Waits for the next event.  Returns [`None`] once every dispatcher is
    /// dropped and the queue is drained.
    pub async fn next(&mut self) -> Option<UiEvent> {
        self.receiver.next().await
    }

    /// Returns the next already queued event without waiting.
    pub fn try_next(&mut self) -> Option<UiEvent> {
        self.receiver.next().now_or_never().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_arrive_in_order() {
        let (dispatcher, mut receiver) = UiDispatcher::channel();

        dispatcher.deliver(UiEvent::SetLoading(true));
        dispatcher.deliver(UiEvent::DismissPassport);

        assert_eq!(receiver.try_next(), Some(UiEvent::SetLoading(true)));
        assert_eq!(receiver.try_next(), Some(UiEvent::DismissPassport));
        assert_eq!(receiver.try_next(), None);
    }

    #[test]
    fn test_deliver_after_receiver_dropped() {
        let (dispatcher, receiver) = UiDispatcher::channel();
        drop(receiver);

        dispatcher.deliver(UiEvent::SetLoading(false));
    }

    #[tokio::test]
    async fn test_events_cross_threads() {
        let (dispatcher, mut receiver) = UiDispatcher::channel();

        let sdk_thread = std::thread::spawn(move || {
            dispatcher.deliver(UiEvent::SetLoading(false));
        });
        sdk_thread.join().unwrap();

        assert_eq!(receiver.next().await, Some(UiEvent::SetLoading(false)));
        // The only dispatcher is gone
        assert_eq!(receiver.next().await, None);
    }
}
