//! Models relating to Discord channels.

use bitflags::bitflags;
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

use crate::internal::prelude::*;
use crate::model::guild::Member;
use crate::model::id::{ChannelId, GuildId, MessageId};
use crate::model::user::User;
use crate::model::Timestamp;

/// A representation of a message over a guild's text channel, a group, or a private channel.
///
/// Embeds and components are carried as opaque JSON.
///
/// [Discord docs](https://discord.com/developers/docs/resources/channel#message-object).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[non_exhaustive]
pub struct Message {
    /// The unique Id of the message. Can be used to calculate the creation date of the message.
    pub id: MessageId,
    /// The Id of the [`Channel`] that the message was sent to.
    ///
    /// [`Channel`]: https://discord.com/developers/docs/resources/channel#channel-object
    pub channel_id: ChannelId,
    /// The Id of the guild that the message was sent in, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<GuildId>,
    /// The user that sent the message.
    pub author: User,
    /// A partial amount of data about the user's member data, if this message was sent in a
    /// guild.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member: Option<Member>,
    /// The content of the message.
    #[serde(default)]
    pub content: String,
    /// Initial message creation timestamp, calculated from its Id.
    pub timestamp: Timestamp,
    /// The timestamp of the last time the message was updated, if it was.
    #[serde(default)]
    pub edited_timestamp: Option<Timestamp>,
    /// Indicator of whether the command is to be played back via text-to-speech.
    #[serde(default)]
    pub tts: bool,
    /// Array of embeds sent with the message.
    #[serde(default)]
    pub embeds: Vec<Value>,
    /// Array of component rows sent with the message.
    #[serde(default)]
    pub components: Vec<Value>,
    /// Bit flags describing extra features of the message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<MessageFlags>,
}

impl Message {
    /// Whether the message is only visible to the user it answered.
    #[must_use]
    pub fn is_ephemeral(&self) -> bool {
        self.flags.is_some_and(|flags| flags.contains(MessageFlags::EPHEMERAL))
    }

    /// Gets a link to the message.
    #[must_use]
    pub fn link(&self) -> String {
        match self.guild_id {
            Some(guild_id) => format!(
                "https://discord.com/channels/{}/{}/{}",
                guild_id, self.channel_id, self.id
            ),
            None => format!("https://discord.com/channels/@me/{}/{}", self.channel_id, self.id),
        }
    }
}

impl PartialEq for Message {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Message {}

bitflags! {
    /// Describes extra features of the message.
    ///
    /// [Discord docs](https://discord.com/developers/docs/resources/channel#message-object-message-flags).
    #[derive(Copy, Clone, Default, Debug, Eq, Hash, PartialEq)]
    pub struct MessageFlags: u64 {
        /// This message has been published to subscribed channels (via Channel Following).
        const CROSSPOSTED = 1 << 0;
        /// This message originated from a message in another channel (via Channel Following).
        const IS_CROSSPOST = 1 << 1;
        /// Do not include any embeds when serializing this message.
        const SUPPRESS_EMBEDS = 1 << 2;
        /// The source message for this crosspost has been deleted (via Channel Following).
        const SOURCE_MESSAGE_DELETED = 1 << 3;
        /// This message came from the urgent message system.
        const URGENT = 1 << 4;
        /// This message has an associated thread, with the same id as the message.
        const HAS_THREAD = 1 << 5;
        /// This message is only visible to the user who invoked the Interaction, and cannot be
        /// addressed as `@original` afterwards.
        const EPHEMERAL = 1 << 6;
        /// This message is an Interaction Response and the bot is "thinking".
        const LOADING = 1 << 7;
        /// This message will not trigger push and desktop notifications.
        const SUPPRESS_NOTIFICATIONS = 1 << 12;
    }
}

impl Serialize for MessageFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> StdResult<S::Ok, S::Error> {
        serializer.serialize_u64(self.bits())
    }
}

impl<'de> Deserialize<'de> for MessageFlags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> StdResult<Self, D::Error> {
        Ok(Self::from_bits_retain(u64::deserialize(deserializer)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::{from_value, json, to_value};

    #[test]
    fn flags_keep_unknown_bits() {
        let flags: MessageFlags = from_value(json!(64_u64 | (1 << 40))).unwrap();
        assert!(flags.contains(MessageFlags::EPHEMERAL));
        assert_eq!(to_value(flags).unwrap(), json!(64_u64 | (1 << 40)));
    }

    #[test]
    fn ephemeral_messages() {
        let message: Message = from_value(json!({
            "id": "3",
            "channel_id": "2",
            "author": {"id": "1", "username": "bot", "bot": true},
            "content": "only for you",
            "timestamp": "2021-05-02T10:00:00+00:00",
            "flags": 64,
        }))
        .unwrap();

        assert!(message.is_ephemeral());
        assert_eq!(message.link(), "https://discord.com/channels/@me/2/3");
    }
}
