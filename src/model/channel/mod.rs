//! Models relating to channels and the messages sent in them.

mod message;

pub use self::message::*;
