//! A set of exports which can be helpful to use.
//!
//! Note that the `RiposteError` re-export is equivalent to [`riposte::Error`], although is
//! re-exported as a separate name to remove likely ambiguity with other crate error enums.
//!
//! # Examples
//!
//! Import all of the exports:
//!
//! ```rust
//! use riposte::prelude::*;
//! ```
//!
//! [`riposte::Error`]: crate::Error

pub use crate::builder::{AllowedMentions, ContentNormalizer, CreateAttachment, CreateReply};
pub use crate::error::Error as RiposteError;
#[cfg(feature = "http")]
pub use crate::http::Http;
pub use crate::http::{HttpError, RequestHandler};
pub use crate::model::application::{Interaction, StrictInteraction};
pub use crate::model::channel::MessageFlags;
pub use crate::model::id::MessageTarget;
pub use crate::model::ModelError;
pub use crate::settings::Settings;
