use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use super::{ModelFactory, StrictInteraction};
use crate::builder::{ContentNormalizer, CreateAttachment, NormalizedReply, ReplyContent};
use crate::constants::{INITIAL_RESPONSE_DEADLINE_SECS, INTERACTION_TOKEN_LIFETIME_SECS};
use crate::http::{LightMethod, Request, RequestHandler, Route};
use crate::internal::prelude::*;
use crate::json::{from_value, json};
use crate::model::channel::{Message, MessageFlags};
use crate::model::guild::Member;
use crate::model::id::{
    ApplicationId,
    ChannelId,
    GenericId,
    GuildId,
    InteractionId,
    MessageTarget,
};
use crate::model::user::User;
use crate::model::{ModelError, Timestamp};

enum_number! {
    /// The type of an Interaction.
    ///
    /// [Discord docs](https://discord.com/developers/docs/interactions/receiving-and-responding#interaction-object-interaction-type).
    pub enum InteractionType {
        Ping = 1,
        ApplicationCommand = 2,
        MessageComponent = 3,
        _ => Unknown(u8),
    }
}

enum_number! {
    /// The available responses types for an interaction response.
    ///
    /// [Discord docs](https://discord.com/developers/docs/interactions/receiving-and-responding#interaction-response-object-interaction-callback-type).
    pub enum InteractionResponseType {
        /// Acknowledges a Ping.
        Pong = 1,
        /// Responds with a message.
        ChannelMessageWithSource = 4,
        /// Acknowledges, showing a loading state to the user. The message is edited in later.
        DeferredChannelMessageWithSource = 5,
        /// Acknowledges a component interaction without a loading state.
        DeferredUpdateMessage = 6,
        /// Edits the message the component was attached to.
        UpdateMessage = 7,
        _ => Unknown(u8),
    }
}

enum_number! {
    /// The type of a message component.
    ///
    /// [Discord docs](https://discord.com/developers/docs/interactions/message-components#component-object-component-types).
    pub enum ComponentType {
        ActionRow = 1,
        Button = 2,
        StringSelect = 3,
        InputText = 4,
        UserSelect = 5,
        RoleSelect = 6,
        MentionableSelect = 7,
        ChannelSelect = 8,
        _ => Unknown(u8),
    }
}

/// The part of an interaction's `data` the models read.
///
/// Only the fields below are kept; everything else Discord sends is dropped on construction.
/// Command options are left as raw JSON.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[non_exhaustive]
pub struct InteractionData {
    /// The id of the invoked command.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<GenericId>,
    /// The name of the invoked command (application commands only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// The options the command was invoked with (application commands only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<Value>>,
    /// The type of the component (message components only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_type: Option<ComponentType>,
    /// The developer-defined id of the component (message components only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_id: Option<String>,
}

#[derive(Deserialize)]
struct InteractionPayload {
    id: InteractionId,
    application_id: ApplicationId,
    #[serde(rename = "type")]
    kind: InteractionType,
    #[serde(default)]
    channel_id: Option<ChannelId>,
    #[serde(default)]
    guild_id: Option<GuildId>,
    #[serde(default)]
    member: Option<Value>,
    #[serde(default)]
    user: Option<User>,
    #[serde(default)]
    message: Option<Value>,
    #[serde(default)]
    data: Option<InteractionData>,
    #[serde(default)]
    token: Option<SecretString>,
    #[serde(default = "default_version")]
    version: u8,
}

fn default_version() -> u8 {
    1
}

/// A user-triggered event, such as a slash command invocation or a button click, awaiting a
/// reply.
///
/// # Responding
///
/// Exactly one initial response is honoured by Discord per interaction:
/// [`Self::acknowledge`], [`Self::defer`], [`Self::defer_update`], [`Self::create_message`] or
/// [`Self::edit_parent`]. After it, any number of followups can be sent with
/// [`Self::create_followup`], and sent messages can be changed with [`Self::edit`] and
/// [`Self::delete`].
///
/// None of this is checked here. Answering twice, addressing an ephemeral response as
/// [`MessageTarget::Original`], or calling a component-only method on a command all reach
/// Discord, which rejects them with an [`Error::Http`]. Use [`Self::into_strict`] for a wrapper
/// that tracks the protocol locally.
///
/// The initial response must be sent within 3 seconds of the interaction being created, and the
/// token stays valid for 15 minutes; see [`Self::respond_by`] and [`Self::token_expires_at`].
///
/// Interactions compare equal when their ids are.
///
/// [Discord docs](https://discord.com/developers/docs/interactions/receiving-and-responding#interaction-object).
#[derive(Clone)]
#[non_exhaustive]
pub struct Interaction {
    /// Id of the interaction.
    pub id: InteractionId,
    /// Id of the application this interaction is for.
    pub application_id: ApplicationId,
    /// The type of interaction.
    pub kind: InteractionType,
    /// The channel the interaction was sent from.
    pub channel_id: Option<ChannelId>,
    /// The guild the interaction was sent from.
    pub guild_id: Option<GuildId>,
    /// The member who triggered the interaction, when sent from a guild.
    pub member: Option<Member>,
    /// The user who triggered the interaction, when sent from a direct message.
    pub user: Option<User>,
    /// The message the component was attached to (message components only).
    pub message: Option<Message>,
    /// The command or component data.
    pub data: Option<InteractionData>,
    /// Always `1`.
    pub version: u8,
    token: SecretString,
    http: Arc<dyn RequestHandler>,
    normalizer: Arc<ContentNormalizer>,
}

impl Interaction {
    /// Builds an interaction from the `d` field of an `INTERACTION_CREATE` event.
    ///
    /// The embedded `member` and `message` objects are built through `factory`, and `data` is
    /// narrowed to [`InteractionData`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::sync::Arc;
    ///
    /// use riposte::builder::ContentNormalizer;
    /// use riposte::http::{Request, RequestHandler};
    /// use riposte::json::{json, Value};
    /// use riposte::model::application::{DefaultModelFactory, Interaction, InteractionType};
    /// use riposte::{async_trait, Result};
    ///
    /// struct Noop;
    ///
    /// #[async_trait]
    /// impl RequestHandler for Noop {
    ///     async fn request(&self, _: Request<'_>) -> Result<Value> {
    ///         Ok(Value::Null)
    ///     }
    /// }
    ///
    /// let interaction = Interaction::from_value(
    ///     json!({
    ///         "id": "846462639134605312",
    ///         "application_id": "772115283915735061",
    ///         "type": 2,
    ///         "token": "aW50ZXJhY3Rpb246ODQ2NDYyNjM5MTM0NjA1MzEy",
    ///         "data": {"id": "771825006014889984", "name": "blep", "type": 1},
    ///         "version": 1,
    ///     }),
    ///     Arc::new(Noop),
    ///     Arc::new(ContentNormalizer::default()),
    ///     &DefaultModelFactory,
    /// )?;
    ///
    /// assert_eq!(interaction.kind, InteractionType::ApplicationCommand);
    /// assert_eq!(interaction.data.unwrap().name.as_deref(), Some("blep"));
    /// # Ok::<(), riposte::Error>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::MissingField`] if there is no token, [`Error::Json`] if a field has
    /// the wrong shape, or any error of the factory.
    pub fn from_value(
        value: Value,
        http: Arc<dyn RequestHandler>,
        normalizer: Arc<ContentNormalizer>,
        factory: &dyn ModelFactory,
    ) -> Result<Self> {
        let InteractionPayload {
            id,
            application_id,
            kind,
            channel_id,
            guild_id,
            member,
            user,
            message,
            data,
            token,
            version,
        } = from_value(value)?;

        let token = token.ok_or(Error::Model(ModelError::MissingField("token")))?;
        let member = member.map(|m| factory.member(m, guild_id)).transpose()?;
        let message = message.map(|m| factory.message(m)).transpose()?;

        Ok(Self {
            id,
            application_id,
            kind,
            channel_id,
            guild_id,
            member,
            user,
            message,
            data,
            version,
            token,
            http,
            normalizer,
        })
    }

    /// The token authorizing every response to this interaction.
    #[must_use]
    pub fn token(&self) -> &SecretString {
        &self.token
    }

    /// The user who triggered the interaction, through the member when sent from a guild.
    #[must_use]
    pub fn author(&self) -> Option<&User> {
        self.member.as_ref().and_then(|m| m.user.as_ref()).or(self.user.as_ref())
    }

    /// The latest time at which Discord accepts the initial response.
    #[must_use]
    pub fn respond_by(&self) -> Timestamp {
        let created = *self.id.created_at();
        Timestamp::from(created + Duration::from_secs(INITIAL_RESPONSE_DEADLINE_SECS))
    }

    /// The time after which the token no longer authorizes followups, edits or deletes.
    #[must_use]
    pub fn token_expires_at(&self) -> Timestamp {
        let created = *self.id.created_at();
        Timestamp::from(created + Duration::from_secs(INTERACTION_TOKEN_LIFETIME_SECS))
    }

    /// Wraps the interaction into a [`StrictInteraction`], which rejects out-of-order responses
    /// before sending them.
    #[must_use]
    pub fn into_strict(self) -> StrictInteraction {
        StrictInteraction::new(self)
    }

    /// Acknowledges the interaction without replying, leaving the loading state out.
    ///
    /// This sends a [`InteractionResponseType::DeferredUpdateMessage`] response. It is meant for
    /// message components, but is sent for any interaction type.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if Discord rejects the response.
    pub async fn acknowledge(&self) -> Result<Value> {
        self.respond(InteractionResponseType::DeferredUpdateMessage, None, Vec::new()).await
    }

    /// Defers the response, showing a loading state until the reply is sent with [`Self::edit`]
    /// on [`MessageTarget::Original`].
    ///
    /// Pass [`MessageFlags::EPHEMERAL`] to make the eventual reply visible to the user only.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if Discord rejects the response.
    pub async fn defer(&self, flags: Option<MessageFlags>) -> Result<Value> {
        let bits = flags.map_or(0, |flags| flags.bits());
        let data = json!({ "flags": bits });

        self.respond(InteractionResponseType::DeferredChannelMessageWithSource, Some(data), Vec::new())
            .await
    }

    /// Defers the update of the message a component is attached to.
    ///
    /// This only applies to [`InteractionType::MessageComponent`] interactions; for other
    /// types the request is sent anyway and Discord rejects it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if Discord rejects the response.
    pub async fn defer_update(&self) -> Result<Value> {
        self.respond(InteractionResponseType::DeferredUpdateMessage, None, Vec::new()).await
    }

    /// Responds with a message.
    ///
    /// Passing `None` sends the response without `data`.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # async fn run(interaction: riposte::model::application::Interaction) -> riposte::Result<()> {
    /// use riposte::builder::CreateReply;
    ///
    /// interaction.create_message("Pong!").await?;
    /// # interaction.create_message(CreateReply::new().content("Only you").ephemeral(true)).await?;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::MissingPayload`] before sending anything if a [`CreateReply`] has no
    /// content, embed or flags, and [`Error::Http`] if Discord rejects the response.
    ///
    /// [`CreateReply`]: crate::builder::CreateReply
    pub async fn create_message(&self, content: impl Into<ReplyContent>) -> Result<Value> {
        let (data, files) = into_parts(self.normalize(content.into())?);
        self.respond(InteractionResponseType::ChannelMessageWithSource, data, files).await
    }

    /// Edits the message a component is attached to, as the initial response.
    ///
    /// Passing `None` sends the response without `data`, leaving the message as it is.
    ///
    /// This only applies to [`InteractionType::MessageComponent`] interactions; for other
    /// types the request is sent anyway and Discord rejects it. Use [`Self::edit`] once the
    /// interaction has been answered.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::MissingPayload`] before sending anything if a [`CreateReply`] has no
    /// content, embed or flags, and [`Error::Http`] if Discord rejects the response.
    ///
    /// [`CreateReply`]: crate::builder::CreateReply
    pub async fn edit_parent(&self, content: impl Into<ReplyContent>) -> Result<Value> {
        let (data, files) = into_parts(self.normalize(content.into())?);
        self.respond(InteractionResponseType::UpdateMessage, data, files).await
    }

    /// Sends a followup message, returning the created message.
    ///
    /// Followups can be sent any number of times once the interaction has been answered, for as
    /// long as the token is valid.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::MissingPayload`] before sending anything if a [`CreateReply`] has no
    /// content, embed or flags, and [`Error::Http`] if Discord rejects the message.
    ///
    /// [`CreateReply`]: crate::builder::CreateReply
    pub async fn create_followup(&self, content: impl Into<ReplyContent>) -> Result<Value> {
        let (body, files) = into_parts(self.normalize(content.into())?);
        debug!(interaction_id = %self.id, files = files.len(), "creating followup");

        let route = Route::WebhookFollowupMessages {
            application_id: self.application_id,
            token: &self.token,
        };
        let request =
            Request::new(LightMethod::Post, route).body(body).files(files).param("wait", "true");

        self.http.request(request).await
    }

    /// Edits a message sent in response to the interaction, either the initial response
    /// ([`MessageTarget::Original`]) or a followup.
    ///
    /// [`MessageTarget::Original`] cannot address an ephemeral initial response. Passing `None`
    /// as the content sends the edit without a body.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::MissingPayload`] before sending anything if a [`CreateReply`] has no
    /// content, embed or flags, and [`Error::Http`] if Discord rejects the edit.
    ///
    /// [`CreateReply`]: crate::builder::CreateReply
    pub async fn edit(
        &self,
        message: impl Into<MessageTarget>,
        content: impl Into<ReplyContent>,
    ) -> Result<Value> {
        let message = message.into();
        let (body, files) = into_parts(self.normalize(content.into())?);
        debug!(interaction_id = %self.id, %message, "editing response");

        let request = Request::new(LightMethod::Patch, self.message_route(message))
            .body(body)
            .files(files);

        self.http.request(request).await
    }

    /// Deletes a message sent in response to the interaction, either the initial response
    /// ([`MessageTarget::Original`]) or a followup.
    ///
    /// [`MessageTarget::Original`] cannot address an ephemeral initial response.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if Discord rejects the deletion.
    pub async fn delete(&self, message: impl Into<MessageTarget>) -> Result<Value> {
        let message = message.into();
        debug!(interaction_id = %self.id, %message, "deleting response");

        let request = Request::new(LightMethod::Delete, self.message_route(message));
        self.http.request(request).await
    }

    fn normalize(&self, content: ReplyContent) -> Result<Option<NormalizedReply>> {
        self.normalizer.normalize(content)
    }

    fn message_route(&self, message: MessageTarget) -> Route<'_> {
        Route::WebhookMessage {
            application_id: self.application_id,
            token: &self.token,
            message,
        }
    }

    async fn respond(
        &self,
        kind: InteractionResponseType,
        data: Option<Value>,
        files: Vec<CreateAttachment>,
    ) -> Result<Value> {
        debug!(interaction_id = %self.id, ?kind, files = files.len(), "sending initial response");

        let mut body = json!({ "type": kind });
        if let Some(data) = data {
            body["data"] = data;
        }

        let route = Route::InteractionResponse {
            interaction_id: self.id,
            token: &self.token,
        };
        let request = Request::new(LightMethod::Post, route).body(Some(body)).files(files);

        self.http.request(request).await
    }
}

fn into_parts(reply: Option<NormalizedReply>) -> (Option<Value>, Vec<CreateAttachment>) {
    match reply.map(NormalizedReply::into_parts) {
        Some((body, files)) => (Some(body), files),
        None => (None, Vec::new()),
    }
}

impl fmt::Debug for Interaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interaction")
            .field("id", &self.id)
            .field("application_id", &self.application_id)
            .field("kind", &self.kind)
            .field("channel_id", &self.channel_id)
            .field("guild_id", &self.guild_id)
            .field("member", &self.member)
            .field("user", &self.user)
            .field("message", &self.message)
            .field("data", &self.data)
            .field("version", &self.version)
            .field("token", &self.token)
            .finish_non_exhaustive()
    }
}

impl PartialEq for Interaction {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Interaction {}

impl From<&Interaction> for InteractionId {
    /// Gets the Id of an [`Interaction`].
    fn from(interaction: &Interaction) -> InteractionId {
        interaction.id
    }
}
