//! Mappings of objects received from the API, with helper methods for responding to and acting
//! on them.
//!
//! Entities that act on the API, such as [`Interaction`] and [`Emoji`], hold the
//! [`RequestHandler`] they were built with and delegate every request to it.
//!
//! [`Emoji`]: guild::Emoji
//! [`Interaction`]: application::Interaction
//! [`RequestHandler`]: crate::http::RequestHandler

pub mod application;
pub mod channel;
pub mod guild;
pub mod id;
pub mod prelude;
pub mod user;
pub mod utils;

mod error;
mod timestamp;

pub use self::error::{Error as ModelError, MentionKind};
pub use self::timestamp::{ParseError as TimestampParseError, Timestamp};
