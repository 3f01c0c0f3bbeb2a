use std::fmt;

use crate::model::id::{GuildId, RoleId};
use crate::model::user::User;
use crate::model::Timestamp;

/// Information about a member of a guild.
///
/// [Discord docs](https://discord.com/developers/docs/resources/guild#guild-member-object).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[non_exhaustive]
pub struct Member {
    /// Attached User struct. Absent from members embedded in message payloads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    /// The unique Id of the guild that the member is a part of. Filled in from the surrounding
    /// payload, as Discord omits it on embedded members.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<GuildId>,
    /// The member's nickname, if present.
    ///
    /// Can't be longer than 32 characters.
    #[serde(default)]
    pub nick: Option<String>,
    /// Vector of Ids of roles given to the member.
    #[serde(default)]
    pub roles: Vec<RoleId>,
    /// Timestamp representing the date when the member joined.
    #[serde(default)]
    pub joined_at: Option<Timestamp>,
    /// Indicator of whether the member can hear in voice channels.
    #[serde(default)]
    pub deaf: bool,
    /// Indicator of whether the member can speak in voice channels.
    #[serde(default)]
    pub mute: bool,
    /// The total permissions of the member in the channel an interaction was sent from, as a
    /// bitset string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<String>,
}

impl Member {
    /// Returns the nickname of the member, falling back to the user's display name.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.nick.as_deref().or_else(|| self.user.as_ref().map(User::display_name))
    }
}

impl fmt::Display for Member {
    /// Mentions the user so that they receive a notification.
    ///
    /// This is in the format of `<@USER_ID>`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.user {
            Some(user) => fmt::Display::fmt(user, f),
            None => f.write_str("<@unknown>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Member;
    use crate::json::{from_value, json};

    #[test]
    fn display_name_prefers_the_nickname() {
        let mut member: Member = from_value(json!({
            "user": {"id": "1", "username": "blob", "global_name": "Blob"},
            "roles": ["2"],
            "joined_at": "2021-05-02T10:00:00.000000+00:00",
        }))
        .unwrap();

        assert_eq!(member.display_name(), Some("Blob"));
        member.nick = Some("blobby".into());
        assert_eq!(member.display_name(), Some("blobby"));
        assert_eq!(member.to_string(), "<@1>");
    }
}
