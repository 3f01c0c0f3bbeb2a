use std::borrow::Cow;

use crate::model::id::{ApplicationId, EmojiId, GuildId, InteractionId, MessageTarget};
use crate::secret_string::SecretString;

/// A macro for defining routes. Takes as input a list of route definitions, and generates a
/// definition for the `Route` enum and implements methods on it.
macro_rules! routes {
    ($lt:lifetime, {
        $(
            $name:ident $({ $($field_name:ident: $field_type:ty),* })?,
            $path:expr;
        )+
    }) => {
        /// An endpoint of the API, parameterised by the ids and tokens it is addressed with.
        ///
        /// The [`Debug`] output never includes tokens; use [`Route::kind`] when logging.
        #[derive(Clone, Copy, Debug)]
        #[non_exhaustive]
        pub enum Route<$lt> {
            $(
                $name $({ $($field_name: $field_type),* })?,
            )+
        }

        impl<$lt> Route<$lt> {
            /// The name of the endpoint, without any of its parameters.
            #[must_use]
            pub fn kind(&self) -> &'static str {
                match self {
                    $(
                        Self::$name {..} => stringify!($name),
                    )+
                }
            }

            /// The path of the endpoint relative to the API base, tokens included.
            #[must_use]
            pub fn path(self) -> Cow<'static, str> {
                match self {
                    $(
                        Self::$name $({ $($field_name),* })? => $path.into(),
                    )+
                }
            }
        }
    };
}

// This macro takes as input a list of route definitions, represented in the following way:
// 1. The first line defines an enum variant representing an endpoint.
// 2. The second line provides the path for that endpoint.
routes! ('a, {
    InteractionResponse { interaction_id: InteractionId, token: &'a SecretString },
    format!("/interactions/{}/{}/callback", interaction_id, token.expose_secret());

    WebhookFollowupMessages { application_id: ApplicationId, token: &'a SecretString },
    format!("/webhooks/{}/{}", application_id, token.expose_secret());

    WebhookMessage { application_id: ApplicationId, token: &'a SecretString, message: MessageTarget },
    format!("/webhooks/{}/{}/messages/{}", application_id, token.expose_secret(), message);

    GuildEmoji { guild_id: GuildId, emoji_id: EmojiId },
    format!("/guilds/{}/emojis/{}", guild_id, emoji_id);
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_embed_ids_and_tokens() {
        let token = SecretString::from("tok");

        let route = Route::InteractionResponse {
            interaction_id: InteractionId::new(5),
            token: &token,
        };
        assert_eq!(route.path(), "/interactions/5/tok/callback");
        assert_eq!(route.kind(), "InteractionResponse");

        let route = Route::WebhookMessage {
            application_id: ApplicationId::new(9),
            token: &token,
            message: MessageTarget::Original,
        };
        assert_eq!(route.path(), "/webhooks/9/tok/messages/@original");
    }

    #[test]
    fn debug_output_hides_tokens() {
        let token = SecretString::from("very-secret");
        let route = Route::WebhookFollowupMessages {
            application_id: ApplicationId::new(9),
            token: &token,
        };

        assert!(!format!("{route:?}").contains("very-secret"));
    }
}
