//! Client-wide configuration.

use std::env::{self, VarError};

use crate::builder::{AllowedMentions, AllowedMentionsFormatter, ContentNormalizer};
use crate::constants;
#[cfg(feature = "http")]
use crate::http::{Http, HttpBuilder};
use crate::internal::prelude::*;

/// Settings shared by every entity a client builds.
///
/// `Settings` can be deserialized from any serde source; fields other than `token` fall back to
/// their defaults when missing.
///
/// # Examples
///
/// ```rust
/// use riposte::builder::AllowedMentions;
/// use riposte::Settings;
///
/// let settings = Settings::new("my-token")
///     .default_allowed_mentions(AllowedMentions::new().all_users());
/// let normalizer = settings.normalizer()?;
/// # Ok::<(), riposte::Error>(())
/// ```
#[derive(Clone, Debug, Deserialize)]
#[non_exhaustive]
#[must_use]
pub struct Settings {
    /// The bot token used for authenticated requests.
    pub token: SecretString,
    /// The base URL every route is appended to.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// The mention policy applied to replies that do not carry their own.
    #[serde(default = "default_allowed_mentions", alias = "defaultAllowedMentions")]
    pub default_allowed_mentions: AllowedMentions,
}

fn default_api_base() -> String {
    constants::API_BASE.to_string()
}

fn default_allowed_mentions() -> AllowedMentions {
    AllowedMentions::new().all_users().all_roles()
}

impl Settings {
    /// Creates settings with the given token and every other field at its default.
    pub fn new(token: impl Into<SecretString>) -> Self {
        Self {
            token: token.into(),
            api_base: default_api_base(),
            default_allowed_mentions: default_allowed_mentions(),
        }
    }

    /// Reads the token from `DISCORD_TOKEN` and, if set, the API base from
    /// `DISCORD_API_BASE`.
    ///
    /// # Errors
    ///
    /// Returns a [`VarError`] if `DISCORD_TOKEN` is unset or not unicode.
    pub fn from_env() -> StdResult<Self, VarError> {
        let mut settings = Self::new(env::var("DISCORD_TOKEN")?);

        match env::var("DISCORD_API_BASE") {
            Ok(api_base) => settings.api_base = api_base,
            Err(VarError::NotPresent) => {},
            Err(why) => return Err(why),
        }

        Ok(settings)
    }

    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn default_allowed_mentions(mut self, allowed_mentions: AllowedMentions) -> Self {
        self.default_allowed_mentions = allowed_mentions;
        self
    }

    /// Builds the content normalizer applying [`Self::default_allowed_mentions`].
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::TooManyMentions`] if the default policy lists more than 100 ids.
    ///
    /// [`ModelError::TooManyMentions`]: crate::model::ModelError::TooManyMentions
    pub fn normalizer(&self) -> Result<ContentNormalizer> {
        AllowedMentionsFormatter::new(&self.default_allowed_mentions).map(ContentNormalizer::new)
    }

    /// Builds a reqwest-backed transport using these settings.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Request`] if the TLS backend cannot be initialised.
    ///
    /// [`HttpError::Request`]: crate::http::HttpError::Request
    #[cfg(feature = "http")]
    pub fn http(&self) -> Result<Http> {
        HttpBuilder::from_settings(self).build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::{from_value, json, to_value};

    #[test]
    fn missing_fields_use_defaults() {
        let settings: Settings = from_value(json!({"token": "abc"})).unwrap();

        assert_eq!(settings.token.expose_secret(), "abc");
        assert_eq!(settings.api_base, "https://discord.com/api/v10");
        assert_eq!(settings.default_allowed_mentions, default_allowed_mentions());
    }

    #[test]
    fn default_policy_allows_roles_and_users() {
        let normalizer = Settings::new("abc").normalizer().unwrap();

        assert_eq!(
            to_value(normalizer.mentions().default_mentions()).unwrap(),
            json!({"parse": ["roles", "users"]})
        );
    }

    #[test]
    fn configured_policy_reaches_the_normalizer() {
        let settings: Settings = from_value(json!({
            "token": "abc",
            "default_allowed_mentions": {"everyone": false, "users": ["80351110224678912"]},
        }))
        .unwrap();

        let normalizer = settings.normalizer().unwrap();
        assert_eq!(
            to_value(normalizer.mentions().default_mentions()).unwrap(),
            json!({"parse": [], "users": ["80351110224678912"]})
        );
    }

    #[test]
    fn too_many_default_mentions_are_rejected() {
        let settings = Settings::new("abc").default_allowed_mentions(
            AllowedMentions::new().roles((1..=101_u64).collect::<Vec<_>>()),
        );

        assert!(settings.normalizer().is_err());
    }
}
