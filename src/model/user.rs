//! User information-related models.

use std::fmt;

use super::id::UserId;
use super::Timestamp;

/// Information about a user.
///
/// [Discord docs](https://discord.com/developers/docs/resources/user#user-object).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[non_exhaustive]
pub struct User {
    /// The unique Id of the user. Can be used to calculate the account's creation date.
    pub id: UserId,
    /// The account's username.
    #[serde(rename = "username")]
    pub name: String,
    /// The legacy four digit discriminator, `None` (or `"0"`) for migrated accounts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<String>,
    /// The account's display name, if it is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_name: Option<String>,
    /// Optional avatar hash.
    #[serde(default)]
    pub avatar: Option<String>,
    /// Indicator of whether the user is a bot.
    #[serde(default)]
    pub bot: bool,
}

impl User {
    /// Returns the formatted URL of the user's icon, if one exists.
    ///
    /// This will produce a WEBP image URL, or GIF if the user has a GIF avatar.
    #[must_use]
    pub fn avatar_url(&self) -> Option<String> {
        self.avatar.as_ref().map(|hash| {
            let ext = if hash.starts_with("a_") { "gif" } else { "webp" };
            cdn!("/avatars/{}/{}.{}?size=1024", self.id, hash, ext)
        })
    }

    /// Returns the formatted URL to the user's default avatar URL.
    ///
    /// This will produce a PNG URL.
    #[must_use]
    pub fn default_avatar_url(&self) -> String {
        let index = match self.discriminator.as_deref().map(str::parse::<u16>) {
            Some(Ok(discriminator)) if discriminator != 0 => u64::from(discriminator % 5),
            _ => (self.id.get() >> 22) % 6,
        };

        cdn!("/embed/avatars/{}.png", index)
    }

    /// Retrieves the URL to the user's avatar, falling back to the default avatar if needed.
    #[must_use]
    pub fn face(&self) -> String {
        self.avatar_url().unwrap_or_else(|| self.default_avatar_url())
    }

    /// Retrieves the time that this user was created at.
    #[must_use]
    pub fn created_at(&self) -> Timestamp {
        self.id.created_at()
    }

    /// The name shown in clients: the global display name if set, the username otherwise.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.global_name.as_deref().unwrap_or(&self.name)
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for User {}

impl fmt::Display for User {
    /// Formats a string which will mention the user.
    // This is in the format of: `<@USER_ID>`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<@{}>", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::User;
    use crate::json::{from_value, json};

    fn user(discriminator: Option<&str>, avatar: Option<&str>) -> User {
        from_value(json!({
            "id": "210",
            "username": "test",
            "discriminator": discriminator,
            "avatar": avatar,
        }))
        .unwrap()
    }

    #[test]
    fn test_core() {
        let mut user = user(Some("1432"), Some("abc"));

        assert!(user.avatar_url().unwrap().ends_with("/avatars/210/abc.webp?size=1024"));

        user.avatar = Some("a_aaa".to_string());
        assert!(user.avatar_url().unwrap().ends_with("/avatars/210/a_aaa.gif?size=1024"));

        user.avatar = None;
        assert!(user.avatar_url().is_none());
        assert!(user.face().ends_with("/embed/avatars/2.png"));
    }

    #[test]
    fn migrated_accounts_use_the_id_for_default_avatars() {
        let user = user(Some("0"), None);
        assert!(user.default_avatar_url().ends_with("/embed/avatars/0.png"));
    }

    #[test]
    fn mention_and_display_name() {
        let mut user = user(None, None);
        assert_eq!(user.to_string(), "<@210>");
        assert_eq!(user.display_name(), "test");

        user.global_name = Some("Tester".into());
        assert_eq!(user.display_name(), "Tester");
    }
}
