use tracing::{debug, trace};

use super::{AllowedMentionsFormatter, CreateAttachment, CreateReply, ReplyContent};
use crate::internal::prelude::*;
use crate::json::{stringify, to_value};
use crate::model::utils::is_truthy;
use crate::model::ModelError;

/// A reply turned into the canonical request body, with its files kept to the side.
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct NormalizedReply {
    pub body: JsonMap,
    pub files: Vec<CreateAttachment>,
}

impl NormalizedReply {
    /// Splits the reply into its JSON body and its files.
    #[must_use]
    pub fn into_parts(self) -> (Value, Vec<CreateAttachment>) {
        (Value::Object(self.body), self.files)
    }
}

/// Turns loosely-typed replies into the canonical request body shared by every interaction
/// method that sends content.
///
/// Normalization is pure: it reads nothing but its input and the allowed-mentions policy held by
/// the normalizer, and fails before any request is made.
#[derive(Clone, Debug, Default)]
pub struct ContentNormalizer {
    mentions: AllowedMentionsFormatter,
}

impl ContentNormalizer {
    #[must_use]
    pub fn new(mentions: AllowedMentionsFormatter) -> Self {
        Self {
            mentions,
        }
    }

    /// The formatter supplying the default mention policy.
    #[must_use]
    pub fn mentions(&self) -> &AllowedMentionsFormatter {
        &self.mentions
    }

    /// Normalizes a reply.
    ///
    /// - [`ReplyContent::Empty`] becomes `None`, for requests with an empty body.
    /// - Text becomes `{"content": text}`.
    /// - A [`CreateReply`] has non-string content converted to a string; it must carry content,
    ///   a truthy embed, or flags.
    ///
    /// `allowed_mentions` is always recomputed for a present reply, falling back to the default
    /// policy when the reply supplies none.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::MissingPayload`] for a [`CreateReply`] with no content, embed or
    /// flags, and [`ModelError::TooManyMentions`] if an allowed-mentions id list is too long.
    pub fn normalize(&self, content: impl Into<ReplyContent>) -> Result<Option<NormalizedReply>> {
        let reply = match content.into() {
            ReplyContent::Empty => return Ok(None),
            ReplyContent::Text(text) => CreateReply::new().content(text),
            ReplyContent::Reply(reply) => reply,
        };

        self.normalize_reply(reply).map(Some)
    }

    fn normalize_reply(&self, reply: CreateReply) -> Result<NormalizedReply> {
        let CreateReply {
            content,
            embed,
            flags,
            allowed_mentions,
            tts,
            components,
            files,
            extra,
        } = reply;

        let content = match content {
            Some(Value::String(text)) => Some(text),
            Some(other) => {
                trace!(?other, "coercing non-string content");
                Some(stringify(&other))
            },
            None => None,
        };

        if content.is_none() && !embed.as_ref().is_some_and(is_truthy) && flags.is_none() {
            debug!("rejecting reply without content, embed or flags");
            return Err(Error::Model(ModelError::MissingPayload));
        }

        let mentions = self.mentions.format(allowed_mentions.as_ref())?;

        let mut body = extra;
        if let Some(content) = content {
            body.insert("content".into(), Value::String(content));
        }
        if let Some(embed) = embed {
            body.insert("embed".into(), embed);
        }
        if let Some(flags) = flags {
            body.insert("flags".into(), Value::from(flags.bits()));
        }
        if let Some(tts) = tts {
            body.insert("tts".into(), Value::Bool(tts));
        }
        if let Some(components) = components {
            body.insert("components".into(), Value::Array(components));
        }
        body.insert("allowed_mentions".into(), to_value(mentions)?);

        Ok(NormalizedReply {
            body,
            files,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::AllowedMentions;
    use crate::json::json;
    use crate::model::channel::MessageFlags;

    fn normalize(content: impl Into<ReplyContent>) -> Result<NormalizedReply> {
        ContentNormalizer::default().normalize(content).map(|n| n.unwrap())
    }

    fn default_mentions() -> Value {
        json!({"parse": ["roles", "users"]})
    }

    #[test]
    fn absent_reply_stays_absent() {
        assert_eq!(ContentNormalizer::default().normalize(ReplyContent::Empty).unwrap(), None);
        assert_eq!(ContentNormalizer::default().normalize(None).unwrap(), None);
    }

    #[test]
    fn text_becomes_content() {
        let normalized = normalize("hi").unwrap();
        assert_eq!(
            Value::Object(normalized.body),
            json!({"content": "hi", "allowed_mentions": default_mentions()})
        );
    }

    #[test]
    fn scalars_are_stringified() {
        for (input, expected) in [
            (ReplyContent::from(12_i64), "12"),
            (ReplyContent::from(false), "false"),
            (ReplyContent::from(2.5_f64), "2.5"),
        ] {
            let normalized = normalize(input).unwrap();
            assert_eq!(normalized.body["content"], json!(expected));
        }
    }

    #[test]
    fn non_string_content_is_coerced() {
        let normalized = normalize(CreateReply::new().content(1234)).unwrap();
        assert_eq!(
            Value::Object(normalized.body),
            json!({"content": "1234", "allowed_mentions": default_mentions()})
        );
    }

    #[test]
    fn integral_float_content_matches_bare_floats() {
        let nested = normalize(CreateReply::new().content(2.0_f64)).unwrap();
        let bare = normalize(2.0_f64).unwrap();

        assert_eq!(nested.body["content"], json!("2"));
        assert_eq!(bare.body["content"], nested.body["content"]);
    }

    #[test]
    fn structured_content_is_sent_as_json_text() {
        let normalized = normalize(CreateReply::new().content(json!({"a": 1}))).unwrap();
        assert_eq!(normalized.body["content"], json!(r#"{"a":1}"#));

        let normalized = normalize(CreateReply::new().content(json!([1, 2]))).unwrap();
        assert_eq!(normalized.body["content"], json!("[1,2]"));
    }

    #[test]
    fn empty_reply_is_rejected() {
        let err = normalize(CreateReply::new().tts(true)).unwrap_err();
        assert!(matches!(err, Error::Model(ModelError::MissingPayload)));
    }

    #[test]
    fn falsy_embed_does_not_count() {
        let err = normalize(CreateReply::new().embed(json!(null))).unwrap_err();
        assert!(matches!(err, Error::Model(ModelError::MissingPayload)));

        let normalized = normalize(CreateReply::new().embed(json!({"title": "t"}))).unwrap();
        assert_eq!(normalized.body["embed"], json!({"title": "t"}));
    }

    #[test]
    fn flags_alone_are_enough() {
        let normalized = normalize(CreateReply::new().flags(MessageFlags::EPHEMERAL)).unwrap();
        assert_eq!(
            Value::Object(normalized.body),
            json!({"flags": 64, "allowed_mentions": default_mentions()})
        );
    }

    #[test]
    fn caller_mentions_override_the_default() {
        let reply = CreateReply::new()
            .content("<@80351110224678912>")
            .allowed_mentions(AllowedMentions::new().users([80351110224678912_u64]));

        let normalized = normalize(reply).unwrap();
        assert_eq!(
            normalized.body["allowed_mentions"],
            json!({"parse": [], "users": ["80351110224678912"]})
        );
    }

    #[test]
    fn configured_default_is_applied() {
        let formatter = AllowedMentionsFormatter::new(&AllowedMentions::new()).unwrap();
        let normalizer = ContentNormalizer::new(formatter);

        let normalized = normalizer.normalize("hi").unwrap().unwrap();
        assert_eq!(normalized.body["allowed_mentions"], json!({"parse": []}));
    }

    #[test]
    fn files_stay_out_of_the_body() {
        let file = CreateAttachment::bytes(b"data".to_vec(), "a.txt");
        let normalized = normalize(CreateReply::new().content("f").add_file(file.clone())).unwrap();

        assert_eq!(normalized.files, vec![file]);
        assert!(!normalized.body.contains_key("file"));
        assert!(!normalized.body.contains_key("files"));
    }

    #[test]
    fn unknown_fields_pass_through() {
        let content = ReplyContent::from_json(json!({"content": "x", "nonce": "n1"})).unwrap();
        let normalized = normalize(content).unwrap();

        assert_eq!(normalized.body["nonce"], json!("n1"));
    }
}
