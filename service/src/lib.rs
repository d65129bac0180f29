//! Service contains the business logic of the application.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod command;
pub mod domain;
pub mod infra;
pub mod query;
pub mod read;
pub mod task;

use derive_more::Debug;

use infra::notification;

pub use self::{command::Command, query::Query, task::Task};

/// [`Service`] configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// [JWT] encoding key.
    ///
    /// [JWT]: https://datatracker.ietf.org/doc/html/rfc7519
    #[debug(skip)]
    pub jwt_encoding_key: jsonwebtoken::EncodingKey,

    /// [JWT] decoding key.
    ///
    /// [JWT]: https://datatracker.ietf.org/doc/html/rfc7519
    #[debug(skip)]
    pub jwt_decoding_key: jsonwebtoken::DecodingKey,

    /// [UPI] merchant details used for payment links.
    ///
    /// [UPI]: https://en.wikipedia.org/wiki/Unified_Payments_Interface
    pub upi: domain::payment::UpiDetails,
}

/// Domain service.
#[derive(Clone, Debug)]
pub struct Service<Db> {
    /// Configuration of this [`Service`].
    config: Config,

    /// [`Database`] of this [`Service`].
    ///
    /// [`Database`]: infra::Database
    database: Db,

    /// [`notification::Outbox`] for best-effort outbound messages.
    outbox: notification::Outbox,
}

impl<Db> Service<Db> {
    /// Creates a new [`Service`] with the provided parameters.
    ///
    /// Outbound notifications are drained by a [`task::DispatchNotifications`]
    /// spawned on the returned [`task::Background`] environment, delivering
    /// them via the provided [`notification::Dispatcher`].
    pub fn new<D>(
        config: Config,
        database: Db,
        dispatcher: D,
    ) -> (Self, task::Background)
    where
        D: notification::Dispatcher + 'static,
    {
        let (outbox, inbox) = notification::channel();
        let this = Service {
            config,
            database,
            outbox,
        };

        let mut bg = task::Background::default();
        bg.spawn(task::DispatchNotifications::new(inbox, dispatcher).run());

        (this, bg)
    }

    /// Returns [`Config`] of this [`Service`].
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns [`Database`] of this [`Service`].
    ///
    /// [`Database`]: infra::Database
    #[must_use]
    pub fn database(&self) -> &Db {
        &self.database
    }

    /// Returns the [`notification::Outbox`] of this [`Service`].
    #[must_use]
    pub fn outbox(&self) -> &notification::Outbox {
        &self.outbox
    }
}
