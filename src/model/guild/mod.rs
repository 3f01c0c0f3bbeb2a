//! Models relating to guilds and types that it owns.

mod emoji;
mod member;

pub use self::emoji::*;
pub use self::member::*;
