//! Best-effort outbound notifications.
//!
//! Lifecycle events enqueue a [`Message`] into the [`Outbox`]; delivery
//! happens off the request path and failures never propagate back to the
//! triggering operation.

use std::future::Future;

use common::{Date, Money};
use derive_more::{Display, Error};
use tokio::sync::mpsc;
use tracing as log;

use crate::domain::{booking, schedule::Slot, user};

/// Single outbound notification.
#[derive(Clone, Debug)]
pub enum Message {
    /// A [`User`] registered an account.
    ///
    /// [`User`]: crate::domain::User
    Welcome {
        /// Displayed name of the recipient.
        name: user::Name,

        /// Email of the recipient.
        email: user::Email,
    },

    /// A [`Booking`] was placed and awaits confirmation.
    ///
    /// [`Booking`]: crate::domain::Booking
    BookingPlaced {
        /// Displayed name of the recipient.
        name: user::Name,

        /// Email of the recipient.
        email: user::Email,

        /// Phone of the recipient.
        phone: user::Phone,

        /// Booked sport.
        sport: booking::Sport,

        /// Booked date.
        date: Date,

        /// Booked slot.
        slot: Slot,

        /// Quoted amount due.
        amount: Money,
    },

    /// An administrator decided on a [`Booking`].
    ///
    /// [`Booking`]: crate::domain::Booking
    BookingDecided {
        /// Displayed name of the recipient.
        name: user::Name,

        /// Email of the recipient.
        email: user::Email,

        /// Phone of the recipient.
        phone: user::Phone,

        /// Booked sport.
        sport: booking::Sport,

        /// Booked date.
        date: Date,

        /// New status of the booking.
        status: booking::Status,
    },
}

impl Message {
    /// Returns the email address this [`Message`] is addressed to.
    #[must_use]
    pub fn recipient(&self) -> &user::Email {
        match self {
            Self::Welcome { email, .. }
            | Self::BookingPlaced { email, .. }
            | Self::BookingDecided { email, .. } => email,
        }
    }

    /// Renders the email subject of this [`Message`].
    #[must_use]
    pub fn subject(&self) -> String {
        match self {
            Self::Welcome { .. } => "Welcome to the turf!".into(),
            Self::BookingPlaced { sport, date, .. } => {
                format!("Booking received: {sport} on {date}")
            }
            Self::BookingDecided {
                sport,
                date,
                status,
                ..
            } => format!("Booking {status}: {sport} on {date}"),
        }
    }

    /// Renders the plain-text body of this [`Message`], also used as the
    /// WhatsApp text.
    #[must_use]
    pub fn body(&self) -> String {
        match self {
            Self::Welcome { name, .. } => format!(
                "Hi {name}, your account is ready. \
                 See you on the turf!",
            ),
            Self::BookingPlaced {
                name,
                sport,
                date,
                slot,
                amount,
                ..
            } => format!(
                "Hi {name}, we received your {sport} booking on {date}, \
                 {start} - {end}. Amount due: {amount}. \
                 We'll confirm it shortly.",
                start = slot.start,
                end = slot.end,
            ),
            Self::BookingDecided {
                name,
                sport,
                date,
                status,
                ..
            } => format!(
                "Hi {name}, your {sport} booking on {date} is now {status}.",
            ),
        }
    }
}

/// Delivery channel of [`Message`]s, like email or WhatsApp.
pub trait Dispatcher {
    /// Delivers the provided [`Message`].
    ///
    /// # Errors
    ///
    /// If delivery fails. The error is logged and the [`Message`] is dropped,
    /// never retried.
    fn dispatch(
        &self,
        message: &Message,
    ) -> impl Future<Output = Result<(), DispatchError>>;
}

/// Error of a [`Dispatcher`] failing to deliver a [`Message`].
#[derive(Debug, Display, Error)]
#[display("failed to deliver notification: {_0}")]
pub struct DispatchError(#[error(not(source))] pub String);

/// [`Dispatcher`] writing every [`Message`] to the log instead of delivering
/// it anywhere.
///
/// Stands in until a real email/WhatsApp gateway is wired up.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogDispatcher;

impl Dispatcher for LogDispatcher {
    async fn dispatch(&self, message: &Message) -> Result<(), DispatchError> {
        log::info!(
            recipient = %message.recipient(),
            subject = %message.subject(),
            body = %message.body(),
            "outbound notification",
        );
        Ok(())
    }
}

/// Sending side of the notification channel.
#[derive(Clone, Debug)]
pub struct Outbox(mpsc::UnboundedSender<Message>);

impl Outbox {
    /// Enqueues the provided [`Message`] for delivery.
    ///
    /// Best effort: a closed channel only logs a warning.
    pub fn enqueue(&self, message: Message) {
        if self.0.send(message).is_err() {
            log::warn!("notification outbox is closed, dropping message");
        }
    }
}

/// Receiving side of the notification channel.
pub type Inbox = mpsc::UnboundedReceiver<Message>;

/// Creates a new notification channel.
#[must_use]
pub fn channel() -> (Outbox, Inbox) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Outbox(tx), rx)
}

#[cfg(test)]
mod spec {
    use common::{money::Currency, Date, Money, TimeOfDay};

    use super::{channel, Message};
    use crate::domain::{booking, schedule::Slot, user};

    fn placed() -> Message {
        Message::BookingPlaced {
            name: user::Name::new("Rahul").unwrap(),
            email: user::Email::new("rahul@example.com").unwrap(),
            phone: user::Phone::new("+91 9876543210").unwrap(),
            sport: booking::Sport::new("Football").unwrap(),
            date: Date::parse("2025-08-23").unwrap(),
            slot: Slot {
                start: TimeOfDay::parse("18:00").unwrap(),
                end: TimeOfDay::parse("20:00").unwrap(),
            },
            amount: Money::from_units(1125, Currency::Inr),
        }
    }

    #[test]
    fn renders_booking_details() {
        let message = placed();

        assert_eq!(
            message.subject(),
            "Booking received: Football on 2025-08-23",
        );
        let body = message.body();
        assert!(body.contains("18:00 - 20:00"));
        assert!(body.contains("1125INR"));
        assert_eq!(
            AsRef::<str>::as_ref(message.recipient()),
            "rahul@example.com",
        );
    }

    #[test]
    fn enqueue_survives_a_closed_inbox() {
        let (outbox, inbox) = channel();
        drop(inbox);

        // Must not panic.
        outbox.enqueue(placed());
    }
}
