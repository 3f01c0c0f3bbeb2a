//! Interactions and the protocol for responding to them.

mod factory;
mod interaction;
mod strict;

pub use self::factory::*;
pub use self::interaction::*;
pub use self::strict::*;
