//! A collection of newtypes defining type-strong IDs.

use std::fmt;
use std::num::{NonZeroU64, ParseIntError};
use std::str::FromStr;

use super::Timestamp;
use crate::constants::ORIGINAL_MESSAGE;

macro_rules! id_u64 {
    ($($name:ident;)*) => {
        $(
            impl $name {
                /// Creates a new Id from a u64
                ///
                /// # Panics
                /// Panics if `id` is zero.
                #[inline]
                #[must_use]
                #[track_caller]
                pub const fn new(id: u64) -> Self {
                    match NonZeroU64::new(id) {
                        Some(inner) => Self(inner),
                        None => panic!(concat!("Attempted to call ", stringify!($name), "::new with invalid (0) value"))
                    }
                }

                /// Retrieves the inner `id` as a [`u64`].
                #[inline]
                #[must_use]
                pub const fn get(self) -> u64 {
                    self.0.get()
                }

                /// Retrieves the time that the Id was created at.
                #[must_use]
                pub fn created_at(&self) -> Timestamp {
                    Timestamp::from_discord_id(self.get())
                }
            }

            impl From<u64> for $name {
                /// Panics if `id` is zero, like [`Self::new`].
                #[track_caller]
                fn from(id: u64) -> $name {
                    $name::new(id)
                }
            }

            impl From<NonZeroU64> for $name {
                fn from(id: NonZeroU64) -> $name {
                    $name(id)
                }
            }

            impl From<$name> for NonZeroU64 {
                fn from(id: $name) -> NonZeroU64 {
                    id.0
                }
            }

            impl From<$name> for u64 {
                fn from(id: $name) -> u64 {
                    id.get()
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    fmt::Display::fmt(&self.0, f)
                }
            }

            impl FromStr for $name {
                type Err = ParseIdError;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    s.parse::<NonZeroU64>().map(Self).map_err(ParseIdError)
                }
            }

            // Snowflakes are sent as strings so they survive JavaScript clients.
            impl serde::Serialize for $name {
                fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    serializer.collect_str(&self.0)
                }
            }

            impl<'de> serde::Deserialize<'de> for $name {
                fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                    deserializer.deserialize_any(SnowflakeVisitor).map(Self)
                }
            }
        )*
    }
}

struct SnowflakeVisitor;

impl serde::de::Visitor<'_> for SnowflakeVisitor {
    type Value = NonZeroU64;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a non-zero string or integer snowflake")
    }

    fn visit_u64<E: serde::de::Error>(self, value: u64) -> Result<Self::Value, E> {
        NonZeroU64::new(value).ok_or_else(|| E::custom("invalid value, expected non-zero"))
    }

    fn visit_i64<E: serde::de::Error>(self, value: i64) -> Result<Self::Value, E> {
        let value = u64::try_from(value).map_err(E::custom)?;
        self.visit_u64(value)
    }

    fn visit_str<E: serde::de::Error>(self, value: &str) -> Result<Self::Value, E> {
        value.parse().map_err(E::custom)
    }
}

/// An error returned when parsing an Id from a string fails.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseIdError(ParseIntError);

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ParseIdError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

/// An identifier for an Application.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ApplicationId(NonZeroU64);

/// An identifier for a Channel.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ChannelId(NonZeroU64);

/// An identifier for an Emoji.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct EmojiId(NonZeroU64);

/// An identifier for an unspecific entity.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct GenericId(NonZeroU64);

/// An identifier for a Guild.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct GuildId(NonZeroU64);

/// An identifier for an interaction.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct InteractionId(NonZeroU64);

/// An identifier for a Message.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct MessageId(NonZeroU64);

/// An identifier for a Role.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct RoleId(NonZeroU64);

/// An identifier for a User.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct UserId(NonZeroU64);

id_u64! {
    ApplicationId;
    ChannelId;
    EmojiId;
    GenericId;
    GuildId;
    InteractionId;
    MessageId;
    RoleId;
    UserId;
}

/// The message addressed by the webhook message endpoints of an interaction.
///
/// [`MessageTarget::Original`] is the reserved `@original` id standing for the message created
/// by the initial response. Discord rejects it for ephemeral responses.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MessageTarget {
    /// The message created by the initial response.
    Original,
    /// A specific followup message.
    Id(MessageId),
}

impl fmt::Display for MessageTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Original => f.write_str(ORIGINAL_MESSAGE),
            Self::Id(id) => fmt::Display::fmt(id, f),
        }
    }
}

impl FromStr for MessageTarget {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ORIGINAL_MESSAGE {
            Ok(Self::Original)
        } else {
            s.parse().map(Self::Id)
        }
    }
}

impl From<MessageId> for MessageTarget {
    fn from(id: MessageId) -> Self {
        Self::Id(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snowflakes_deserialize_from_strings_and_integers() {
        let from_str: GuildId = serde_json::from_value(serde_json::json!("175928847299117063")).unwrap();
        let from_int: GuildId = serde_json::from_value(serde_json::json!(175928847299117063_u64)).unwrap();

        assert_eq!(from_str, from_int);
        assert_eq!(serde_json::to_value(from_str).unwrap(), serde_json::json!("175928847299117063"));
    }

    #[test]
    fn zero_snowflake_is_rejected() {
        assert!(serde_json::from_value::<UserId>(serde_json::json!("0")).is_err());
        assert!("0".parse::<UserId>().is_err());
    }

    #[test]
    fn message_target_parses_the_original_sentinel() {
        assert_eq!("@original".parse::<MessageTarget>().unwrap(), MessageTarget::Original);
        assert_eq!(MessageTarget::Original.to_string(), "@original");

        let target: MessageTarget = "81384788765712384".parse().unwrap();
        assert_eq!(target, MessageTarget::Id(MessageId::new(81384788765712384)));
        assert_eq!(target.to_string(), "81384788765712384");

        assert!("@latest".parse::<MessageTarget>().is_err());
    }

    #[test]
    fn created_at_uses_the_discord_epoch() {
        assert_eq!(GuildId::new(175928847299117063).created_at().unix_timestamp(), 1462015105);
    }
}
