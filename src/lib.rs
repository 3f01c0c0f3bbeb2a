//! Riposte is a typed object model for the Discord API, centred on the interaction response
//! protocol.
//!
//! An [`Interaction`] is built from the wire JSON of an `INTERACTION_CREATE` event. Application
//! code then answers it exactly once through one of the initial response methods
//! ([`Interaction::acknowledge`], [`Interaction::defer`], [`Interaction::defer_update`],
//! [`Interaction::create_message`] or [`Interaction::edit_parent`]) and may follow up any number
//! of times afterwards with [`Interaction::create_followup`], [`Interaction::edit`] and
//! [`Interaction::delete`].
//!
//! Every method that sends message content routes it through the [`ContentNormalizer`], which
//! turns a loosely-typed reply into a canonical request body and applies the configured
//! allowed-mentions policy. Payloads are validated before any request is made.
//!
//! The transport is an external collaborator: anything implementing [`RequestHandler`] can be
//! plugged in. With the `http` feature enabled, [`Http`] provides a reqwest-backed
//! implementation.
//!
//! # Timing
//!
//! Discord requires the initial response within 3 seconds of receiving the interaction, and the
//! interaction token is valid for 15 minutes. Neither deadline is measured here; a late request
//! fails like any other rejected request.
//!
//! [`ContentNormalizer`]: crate::builder::ContentNormalizer
//! [`Http`]: crate::http::Http
//! [`Interaction`]: crate::model::application::Interaction
//! [`Interaction::acknowledge`]: crate::model::application::Interaction::acknowledge
//! [`Interaction::defer`]: crate::model::application::Interaction::defer
//! [`Interaction::defer_update`]: crate::model::application::Interaction::defer_update
//! [`Interaction::create_message`]: crate::model::application::Interaction::create_message
//! [`Interaction::edit_parent`]: crate::model::application::Interaction::edit_parent
//! [`Interaction::create_followup`]: crate::model::application::Interaction::create_followup
//! [`Interaction::edit`]: crate::model::application::Interaction::edit
//! [`Interaction::delete`]: crate::model::application::Interaction::delete
//! [`RequestHandler`]: crate::http::RequestHandler
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(unsafe_code)]
#![warn(
    unused,
    rust_2018_idioms,
    clippy::unwrap_used,
    clippy::clone_on_ref_ptr,
    clippy::non_ascii_literal,
    clippy::fallible_impl_from,
    clippy::let_underscore_must_use,
    clippy::format_push_string,
    clippy::pedantic
)]
#![allow(
    // Allowed as they are too pedantic
    clippy::module_name_repetitions,
    clippy::unreadable_literal,
    clippy::doc_markdown,
    clippy::missing_panics_doc
)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

#[macro_use]
extern crate serde;

#[macro_use]
mod internal;

pub mod builder;
pub mod constants;
pub mod http;
pub mod json;
pub mod model;
pub mod prelude;
pub mod settings;

mod error;
mod secret_string;

pub use crate::error::{Error, Result};
pub use crate::secret_string::SecretString;
pub use crate::settings::Settings;

// For the procedural macros on `RequestHandler` implementations.
pub use async_trait::async_trait;
