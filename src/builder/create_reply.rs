use super::{AllowedMentions, CreateAttachment};
use crate::internal::prelude::*;
use crate::json::{stringify, stringify_f64};
use crate::model::channel::MessageFlags;
use crate::model::utils::deserialize_some;

/// A structured reply to an interaction.
///
/// Every field is optional, but a reply must carry at least content, an embed or flags to pass
/// normalization. Embeds and any unrecognised fields are passed through to Discord untouched.
///
/// # Examples
///
/// ```rust
/// use riposte::builder::{AllowedMentions, CreateReply};
/// use riposte::model::channel::MessageFlags;
///
/// let reply = CreateReply::new()
///     .content("Only you can see this")
///     .flags(MessageFlags::EPHEMERAL)
///     .allowed_mentions(AllowedMentions::new().everyone(false));
/// ```
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[must_use]
pub struct CreateReply {
    /// The message text. Values other than strings are converted to their string form when the
    /// reply is normalized: numbers as `12` or `2.5`, booleans and `null` by name, and objects or
    /// arrays as their JSON text.
    #[serde(default, deserialize_with = "deserialize_some")]
    pub content: Option<Value>,
    /// A single embed object, passed through as-is.
    #[serde(default)]
    pub embed: Option<Value>,
    #[serde(default)]
    pub flags: Option<MessageFlags>,
    #[serde(default, rename = "allowedMentions")]
    pub allowed_mentions: Option<AllowedMentions>,
    #[serde(default)]
    pub tts: Option<bool>,
    /// Message components, passed through as-is.
    #[serde(default)]
    pub components: Option<Vec<Value>>,
    /// Files uploaded next to the body.
    #[serde(skip)]
    pub files: Vec<CreateAttachment>,
    /// Any other fields, sent unchanged.
    #[serde(flatten)]
    pub extra: JsonMap,
}

impl CreateReply {
    /// Equivalent to [`Self::default`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the content of the message.
    ///
    /// Values other than strings are sent as text. Integral numbers lose their fraction (`2.0`
    /// is sent as `"2"`), and objects or arrays are sent as their JSON text (`{"a":1}`, `[1,2]`).
    ///
    /// **Note**: Message contents must be under 2000 unicode code points.
    pub fn content(mut self, content: impl Into<Value>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Set an embed for the message.
    pub fn embed(mut self, embed: impl Into<Value>) -> Self {
        self.embed = Some(embed.into());
        self
    }

    /// Sets the message flags, e.g. [`MessageFlags::EPHEMERAL`].
    pub fn flags(mut self, flags: MessageFlags) -> Self {
        self.flags = Some(flags);
        self
    }

    /// Shorthand for toggling [`MessageFlags::EPHEMERAL`] on or off.
    pub fn ephemeral(mut self, ephemeral: bool) -> Self {
        let mut flags = self.flags.unwrap_or_else(MessageFlags::empty);
        flags.set(MessageFlags::EPHEMERAL, ephemeral);
        self.flags = Some(flags);
        self
    }

    /// Set the allowed mentions for the message, overriding the configured default.
    pub fn allowed_mentions(mut self, allowed_mentions: AllowedMentions) -> Self {
        self.allowed_mentions = Some(allowed_mentions);
        self
    }

    /// Set whether the message is text-to-speech.
    ///
    /// Think carefully before setting this to `true`.
    pub fn tts(mut self, tts: bool) -> Self {
        self.tts = Some(tts);
        self
    }

    /// Sets the component rows of the message.
    pub fn components(mut self, components: Vec<Value>) -> Self {
        self.components = Some(components);
        self
    }

    /// Appends a file to upload with the message.
    pub fn add_file(mut self, file: CreateAttachment) -> Self {
        self.files.push(file);
        self
    }

    /// Appends a list of files to upload with the message.
    pub fn add_files(mut self, files: impl IntoIterator<Item = CreateAttachment>) -> Self {
        self.files.extend(files);
        self
    }
}

/// Anything an interaction can be answered with: nothing, bare text (or any other scalar, which
/// is sent as text) or a structured [`CreateReply`].
///
/// `None` converts into [`ReplyContent::Empty`], so `interaction.edit(target, None)` sends the
/// request without a body.
#[derive(Clone, Debug, PartialEq)]
pub enum ReplyContent {
    /// No content: the request is sent without a body.
    Empty,
    Text(String),
    Reply(CreateReply),
}

impl ReplyContent {
    /// Interprets loosely-typed JSON as a reply.
    ///
    /// Objects are read as a [`CreateReply`] (with the `allowedMentions` key in camel case);
    /// anything else, `null` included, becomes its string form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if an object holds a field of the wrong shape, such as
    /// non-numeric `flags`.
    pub fn from_json(value: Value) -> Result<Self> {
        match value {
            Value::Object(_) => Ok(Self::Reply(serde_json::from_value(value)?)),
            other => Ok(Self::Text(stringify(&other))),
        }
    }
}

impl From<Option<ReplyContent>> for ReplyContent {
    fn from(content: Option<ReplyContent>) -> Self {
        content.unwrap_or(Self::Empty)
    }
}

impl From<CreateReply> for ReplyContent {
    fn from(reply: CreateReply) -> Self {
        Self::Reply(reply)
    }
}

impl From<String> for ReplyContent {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for ReplyContent {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<&String> for ReplyContent {
    fn from(text: &String) -> Self {
        Self::Text(text.clone())
    }
}

macro_rules! reply_from_display {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ReplyContent {
                fn from(value: $t) -> Self {
                    Self::Text(value.to_string())
                }
            }
        )*
    };
}

reply_from_display!(bool, char, i32, i64, u32, u64, usize);

impl From<f64> for ReplyContent {
    fn from(value: f64) -> Self {
        Self::Text(stringify_f64(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::json;

    #[test]
    fn scalars_become_text() {
        assert_eq!(ReplyContent::from(42_i64), ReplyContent::Text("42".into()));
        assert_eq!(ReplyContent::from(true), ReplyContent::Text("true".into()));
        assert_eq!(ReplyContent::from_json(json!(1.5)).unwrap(), ReplyContent::Text("1.5".into()));
        assert_eq!(ReplyContent::from_json(json!(null)).unwrap(), ReplyContent::Text("null".into()));
    }

    #[test]
    fn integral_floats_render_alike() {
        let expected = ReplyContent::Text("2".into());

        assert_eq!(ReplyContent::from(2.0_f64), expected);
        assert_eq!(ReplyContent::from_json(json!(2.0)).unwrap(), expected);
    }

    #[test]
    fn none_is_empty() {
        assert_eq!(ReplyContent::from(None), ReplyContent::Empty);
        assert_eq!(
            ReplyContent::from(Some(ReplyContent::from("hi"))),
            ReplyContent::Text("hi".into())
        );
    }

    #[test]
    fn objects_become_replies() {
        let content = ReplyContent::from_json(json!({
            "content": 7,
            "flags": 64,
            "allowedMentions": {"everyone": false},
            "nonce": "abc",
        }))
        .unwrap();

        let ReplyContent::Reply(reply) = content else {
            panic!("expected a structured reply");
        };
        assert_eq!(reply.content, Some(json!(7)));
        assert_eq!(reply.flags, Some(MessageFlags::EPHEMERAL));
        assert_eq!(reply.allowed_mentions, Some(AllowedMentions::new().everyone(false)));
        assert_eq!(reply.extra.get("nonce"), Some(&json!("abc")));
    }

    #[test]
    fn explicit_null_content_is_present() {
        let ReplyContent::Reply(reply) = ReplyContent::from_json(json!({"content": null})).unwrap()
        else {
            panic!("expected a structured reply");
        };
        assert_eq!(reply.content, Some(Value::Null));
    }

    #[test]
    fn non_numeric_flags_are_rejected() {
        assert!(ReplyContent::from_json(json!({"flags": "ephemeral"})).is_err());
    }

    #[test]
    fn ephemeral_toggles_the_flag() {
        let reply = CreateReply::new().ephemeral(true);
        assert_eq!(reply.flags, Some(MessageFlags::EPHEMERAL));

        let reply = reply.ephemeral(false);
        assert_eq!(reply.flags, Some(MessageFlags::empty()));
    }
}
