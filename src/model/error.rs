//! Error enum definition wrapping potential model implementation errors.

use std::error::Error as StdError;
use std::fmt;

use super::application::InteractionType;

/// The kind of mention an allowed-mentions id list applies to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum MentionKind {
    Roles,
    Users,
}

impl fmt::Display for MentionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Roles => f.write_str("role"),
            Self::Users => f.write_str("user"),
        }
    }
}

/// An error returned from the [`model`] module.
///
/// This is always wrapped within the library's [`Error::Model`] variant, and is always raised
/// before a request is handed to the transport.
///
/// # Examples
///
/// Matching an [`Error`] with this variant would look something like the following for the
/// [`Interaction::create_message`] method:
///
/// ```rust,no_run
/// # async fn run(interaction: riposte::model::application::Interaction) {
/// use riposte::builder::CreateReply;
/// use riposte::model::ModelError;
/// use riposte::Error;
///
/// match interaction.create_message(CreateReply::new()).await {
///     Ok(_) => {},
///     Err(Error::Model(ModelError::MissingPayload)) => {
///         println!("A reply needs content, an embed or flags");
///     },
///     Err(why) => println!("Unexpected error: {why:?}"),
/// }
/// # }
/// ```
///
/// [`Error`]: crate::Error
/// [`Error::Model`]: crate::Error::Model
/// [`model`]: crate::model
/// [`Interaction::create_message`]: crate::model::application::Interaction::create_message
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// A structured reply carried no content, embed or flags.
    MissingPayload,
    /// An allowed-mentions id list was longer than [`MAX_ALLOWED_MENTIONS`].
    ///
    /// [`MAX_ALLOWED_MENTIONS`]: crate::constants::MAX_ALLOWED_MENTIONS
    TooManyMentions { kind: MentionKind, count: usize },
    /// A required field was absent from the data an entity was built from.
    MissingField(&'static str),
    /// The initial response was already sent. Only raised by [`StrictInteraction`].
    ///
    /// [`StrictInteraction`]: crate::model::application::StrictInteraction
    AlreadyResponded,
    /// A followup, edit or delete was attempted before the initial response. Only raised by
    /// [`StrictInteraction`].
    ///
    /// [`StrictInteraction`]: crate::model::application::StrictInteraction
    NotResponded,
    /// The operation only applies to another interaction type. Only raised by
    /// [`StrictInteraction`].
    ///
    /// [`StrictInteraction`]: crate::model::application::StrictInteraction
    InvalidInteractionType { expected: InteractionType, found: InteractionType },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPayload => f.write_str("No content, embed or flags"),
            Self::TooManyMentions {
                kind,
                count,
            } => write!(f, "Allowed {kind} mentions cannot exceed 100, got {count}"),
            Self::MissingField(field) => write!(f, "Missing field `{field}`"),
            Self::AlreadyResponded => f.write_str("The interaction was already responded to"),
            Self::NotResponded => f.write_str("The interaction has not been responded to yet"),
            Self::InvalidInteractionType {
                expected,
                found,
            } => write!(f, "Expected a {expected:?} interaction, found {found:?}"),
        }
    }
}

impl StdError for Error {}
