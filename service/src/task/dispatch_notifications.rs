//! [`DispatchNotifications`] [`Task`].

use std::convert::Infallible;

use tracing as log;

#[cfg(doc)]
use super::Task;
use crate::infra::notification::{Dispatcher, Inbox};

/// [`Task`] draining the notification [`Inbox`] and delivering every
/// [`Message`] via the provided [`Dispatcher`].
///
/// Delivery failures are logged and swallowed, so a broken gateway never
/// affects the requests producing notifications.
///
/// [`Message`]: crate::infra::notification::Message
#[derive(Debug)]
pub struct DispatchNotifications<D> {
    /// [`Inbox`] to drain.
    inbox: Inbox,

    /// [`Dispatcher`] delivering the messages.
    dispatcher: D,
}

impl<D: Dispatcher> DispatchNotifications<D> {
    /// Creates a new [`DispatchNotifications`] [`Task`].
    #[must_use]
    pub fn new(inbox: Inbox, dispatcher: D) -> Self {
        Self { inbox, dispatcher }
    }

    /// Runs this [`Task`] until every [`Outbox`] is dropped.
    ///
    /// [`Outbox`]: crate::infra::notification::Outbox
    pub async fn run(mut self) -> Result<(), Infallible> {
        while let Some(message) = self.inbox.recv().await {
            _ = self.dispatcher.dispatch(&message).await.map_err(|e| {
                log::warn!(
                    recipient = %message.recipient(),
                    "dropping undeliverable notification: {e}",
                );
            });
        }
        Ok(())
    }
}
