use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::builder::EditEmoji;
use crate::http::{LightMethod, Request, RequestHandler, Route};
use crate::internal::prelude::*;
use crate::json::{from_value, to_value};
use crate::model::id::{EmojiId, GuildId, RoleId};
use crate::model::user::User;
use crate::model::utils::deserialize_some;
use crate::model::Timestamp;

/// A sparse set of emoji attributes, as sent in emoji create and update payloads.
///
/// A field that is absent leaves the attribute unchanged when applied with [`Emoji::update`].
/// For nullable attributes, an explicit `null` is kept apart from an absent field and clears the
/// attribute.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[non_exhaustive]
pub struct EmojiUpdate {
    #[serde(default, deserialize_with = "deserialize_some")]
    pub name: Option<Option<String>>,
    #[serde(default)]
    pub roles: Option<Vec<RoleId>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub user: Option<Option<User>>,
    #[serde(default)]
    pub require_colons: Option<bool>,
    #[serde(default)]
    pub managed: Option<bool>,
    #[serde(default)]
    pub animated: Option<bool>,
    #[serde(default)]
    pub available: Option<bool>,
}

#[derive(Deserialize)]
struct EmojiData {
    id: EmojiId,
    #[serde(flatten)]
    update: EmojiUpdate,
}

/// Represents a custom guild emoji, which can either be created using the API, or via an
/// integration. Emojis created using the API only work within the guild it was created in.
///
/// Attributes mirror the data the emoji was built from; those never received stay `None`.
///
/// [Discord docs](https://discord.com/developers/docs/resources/emoji#emoji-object).
#[derive(Clone, Serialize)]
#[non_exhaustive]
pub struct Emoji {
    /// The Id of the emoji.
    pub id: EmojiId,
    /// The name of the emoji. It must be at least 2 characters long and can only contain
    /// alphanumeric characters and underscores.
    pub name: Option<String>,
    /// A list of role Ids that are allowed to use the emoji. If there are no roles specified,
    /// then usage is unrestricted.
    pub roles: Option<Vec<RoleId>>,
    /// The user who created the emoji.
    pub user: Option<User>,
    /// Whether the emoji name needs to be surrounded by colons in order to be used by the client.
    pub require_colons: Option<bool>,
    /// Whether the emoji is managed via an integration service.
    pub managed: Option<bool>,
    /// Whether the emoji is animated.
    pub animated: Option<bool>,
    /// Whether the emoji can be used. This may be false when the guild loses boosts.
    pub available: Option<bool>,
    #[serde(skip)]
    guild_id: GuildId,
    #[serde(skip)]
    http: Arc<dyn RequestHandler>,
}

impl Emoji {
    /// Builds an emoji of the given guild from its wire data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if the data has no `id` or a field of the wrong shape.
    pub fn new(guild_id: GuildId, http: Arc<dyn RequestHandler>, data: Value) -> Result<Self> {
        let EmojiData {
            id,
            update,
        } = from_value(data)?;

        let mut emoji = Self {
            id,
            name: None,
            roles: None,
            user: None,
            require_colons: None,
            managed: None,
            animated: None,
            available: None,
            guild_id,
            http,
        };
        emoji.update(update);

        Ok(emoji)
    }

    /// Copies the attributes present in `update` onto the emoji, leaving the others unchanged.
    pub fn update(&mut self, update: EmojiUpdate) {
        let EmojiUpdate {
            name,
            roles,
            user,
            require_colons,
            managed,
            animated,
            available,
        } = update;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(roles) = roles {
            self.roles = Some(roles);
        }
        if let Some(user) = user {
            self.user = user;
        }
        if let Some(require_colons) = require_colons {
            self.require_colons = Some(require_colons);
        }
        if let Some(managed) = managed {
            self.managed = Some(managed);
        }
        if let Some(animated) = animated {
            self.animated = Some(animated);
        }
        if let Some(available) = available {
            self.available = Some(available);
        }
    }

    /// The guild owning the emoji.
    #[must_use]
    pub fn guild_id(&self) -> GuildId {
        self.guild_id
    }

    /// Retrieves the time that the emoji was created at.
    #[must_use]
    pub fn created_at(&self) -> Timestamp {
        self.id.created_at()
    }

    /// The string that renders the emoji in a Discord message: `<:name:id>`, or `<a:name:id>`
    /// for animated emojis.
    #[must_use]
    pub fn format(&self) -> String {
        let prefix = if self.is_animated() { "a" } else { "" };
        format!("<{prefix}:{}:{}>", self.name.as_deref().unwrap_or_default(), self.id)
    }

    /// Generates a URL to the emoji's image.
    #[must_use]
    pub fn url(&self) -> String {
        let extension = if self.is_animated() { "gif" } else { "png" };
        cdn!("/emojis/{}.{}", self.id, extension)
    }

    fn is_animated(&self) -> bool {
        self.animated.unwrap_or(false)
    }

    /// Deletes the emoji, returning the transport's response unchanged.
    ///
    /// **Note**: The [Manage Emojis and Stickers] permission is required.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks permission or the emoji no longer
    /// exists.
    ///
    /// [Manage Emojis and Stickers]: https://discord.com/developers/docs/topics/permissions
    pub async fn delete(&self, audit_log_reason: Option<&str>) -> Result<Value> {
        debug!(guild_id = %self.guild_id, emoji_id = %self.id, "deleting emoji");

        let request = Request::new(LightMethod::Delete, self.route())
            .audit_log_reason(audit_log_reason);
        self.http.request(request).await
    }

    /// Edits the emoji's name or roles.
    ///
    /// The emoji itself is left untouched: the raw updated representation is returned for the
    /// caller to apply, for example through [`EmojiUpdate`] and [`Self::update`].
    ///
    /// **Note**: The [Manage Emojis and Stickers] permission is required.
    ///
    /// # Examples
    ///
    /// Change the name of an emoji:
    ///
    /// ```rust,no_run
    /// # use riposte::model::guild::Emoji;
    /// # async fn run(mut emoji: Emoji) -> riposte::Result<()> {
    /// use riposte::builder::EditEmoji;
    /// use riposte::json::from_value;
    ///
    /// let raw = emoji.edit(EditEmoji::new().name("blobuwu")).await?;
    /// emoji.update(from_value(raw)?);
    /// assert_eq!(emoji.name.as_deref(), Some("blobuwu"));
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the current user lacks permission or the name is invalid.
    ///
    /// [Manage Emojis and Stickers]: https://discord.com/developers/docs/topics/permissions
    pub async fn edit(&self, builder: EditEmoji<'_>) -> Result<Value> {
        debug!(guild_id = %self.guild_id, emoji_id = %self.id, "editing emoji");

        let request = Request::new(LightMethod::Patch, self.route())
            .body(Some(to_value(&builder)?))
            .audit_log_reason(builder.reason());
        self.http.request(request).await
    }

    /// Serializes the mirrored attributes, including the creation time derived from the id.
    ///
    /// Attributes never received are left out. `created_at` is an RFC 3339 string, like every
    /// other [`Timestamp`] in the models, not a number of milliseconds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<Value> {
        let mut value = to_value(self)?;
        if let Some(map) = value.as_object_mut() {
            map.retain(|_, v| !v.is_null());
            map.insert("created_at".into(), to_value(self.created_at())?);
        }

        Ok(value)
    }

    fn route(&self) -> Route<'static> {
        Route::GuildEmoji {
            guild_id: self.guild_id,
            emoji_id: self.id,
        }
    }
}

impl fmt::Debug for Emoji {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emoji")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("roles", &self.roles)
            .field("user", &self.user)
            .field("require_colons", &self.require_colons)
            .field("managed", &self.managed)
            .field("animated", &self.animated)
            .field("available", &self.available)
            .field("guild_id", &self.guild_id)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Emoji {
    /// Formats the emoji into a string that will cause Discord clients to render the emoji.
    ///
    /// This is in the format of either `<:NAME:EMOJI_ID>` for normal emojis, or
    /// `<a:NAME:EMOJI_ID>` for animated emojis.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

impl PartialEq for Emoji {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Emoji {}

impl From<&Emoji> for EmojiId {
    /// Gets the Id of an [`Emoji`].
    fn from(emoji: &Emoji) -> EmojiId {
        emoji.id
    }
}
