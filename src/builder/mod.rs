//! A set of builders used to make using methods on certain structs simpler to use.
//!
//! These are used when not all parameters are required, all parameters are optional, and/or sane
//! default values for required parameters can be applied by a builder.
//!
//! Interaction replies are assembled with [`CreateReply`] (or given as bare text) and are
//! turned into request bodies by the [`ContentNormalizer`].

mod content_normalizer;
mod create_allowed_mentions;
mod create_attachment;
mod create_reply;
mod edit_emoji;

pub use content_normalizer::*;
pub use create_allowed_mentions::*;
pub use create_attachment::*;
pub use create_reply::*;
pub use edit_emoji::*;
