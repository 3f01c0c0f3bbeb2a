use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::constants::MAX_ALLOWED_MENTIONS;
use crate::internal::prelude::*;
use crate::model::id::{RoleId, UserId};
use crate::model::{MentionKind, ModelError};

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseValue {
    Everyone,
    Users,
    Roles,
}

/// Whether a class of mentions notifies: all of them, none of them, or only listed ids.
///
/// Deserializes from either a boolean or an array of ids, matching how mention policies are
/// usually written in configuration.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MentionPolicy<T> {
    /// `true` allows every mention of this class, `false` none.
    Toggle(bool),
    /// Only the listed ids are allowed. At most 100 entries are accepted.
    Only(Vec<T>),
}

/// The caller-facing description of which mentions in a message notify anyone.
///
/// This is converted into the wire [`CreateAllowedMentions`] by an [`AllowedMentionsFormatter`].
/// Absent fields contribute nothing to the result; an absent `AllowedMentions` altogether falls
/// back to the formatter's default.
///
/// # Examples
///
/// ```rust
/// use riposte::builder::AllowedMentions;
///
/// // Mention everyone and the user 110372470472613888
/// let mentions = AllowedMentions::new().everyone(true).users([110372470472613888_u64]);
///
/// // Mention all roles and nothing else
/// let mentions = AllowedMentions::new().all_roles();
/// ```
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[must_use]
pub struct AllowedMentions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub everyone: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<MentionPolicy<RoleId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<MentionPolicy<UserId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replied_user: Option<bool>,
}

impl AllowedMentions {
    /// Equivalent to [`Self::default`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `@everyone` and `@here` notify.
    pub fn everyone(mut self, everyone: bool) -> Self {
        self.everyone = Some(everyone);
        self
    }

    /// Allows every role mention.
    pub fn all_roles(mut self) -> Self {
        self.roles = Some(MentionPolicy::Toggle(true));
        self
    }

    /// Sets the *specific* roles that will be allowed mentionable.
    pub fn roles(mut self, roles: impl IntoIterator<Item = impl Into<RoleId>>) -> Self {
        self.roles = Some(MentionPolicy::Only(roles.into_iter().map(Into::into).collect()));
        self
    }

    /// Allows every user mention.
    pub fn all_users(mut self) -> Self {
        self.users = Some(MentionPolicy::Toggle(true));
        self
    }

    /// Sets the *specific* users that will be allowed mentionable.
    pub fn users(mut self, users: impl IntoIterator<Item = impl Into<UserId>>) -> Self {
        self.users = Some(MentionPolicy::Only(users.into_iter().map(Into::into).collect()));
        self
    }

    /// Makes the reply mention/ping the user.
    pub fn replied_user(mut self, mention_user: bool) -> Self {
        self.replied_user = Some(mention_user);
        self
    }
}

/// The `allowed_mentions` object as sent to Discord.
///
/// [Discord docs](https://discord.com/developers/docs/resources/channel#allowed-mentions-object).
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[non_exhaustive]
pub struct CreateAllowedMentions {
    pub parse: Vec<ParseValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<RoleId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<UserId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replied_user: Option<bool>,
}

impl CreateAllowedMentions {
    /// Converts a caller-supplied [`AllowedMentions`] into its wire form.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::TooManyMentions`] if an explicit role or user list holds more than
    /// 100 ids.
    pub fn from_spec(spec: &AllowedMentions) -> Result<Self> {
        let mut result = Self::default();

        if spec.everyone == Some(true) {
            result.parse.push(ParseValue::Everyone);
        }

        match &spec.roles {
            Some(MentionPolicy::Toggle(true)) => result.parse.push(ParseValue::Roles),
            Some(MentionPolicy::Only(roles)) => {
                check_len(MentionKind::Roles, roles.len())?;
                result.roles = Some(roles.clone());
            },
            Some(MentionPolicy::Toggle(false)) | None => {},
        }

        match &spec.users {
            Some(MentionPolicy::Toggle(true)) => result.parse.push(ParseValue::Users),
            Some(MentionPolicy::Only(users)) => {
                check_len(MentionKind::Users, users.len())?;
                result.users = Some(users.clone());
            },
            Some(MentionPolicy::Toggle(false)) | None => {},
        }

        result.replied_user = spec.replied_user;

        Ok(result)
    }
}

fn check_len(kind: MentionKind, count: usize) -> Result<()> {
    if count > MAX_ALLOWED_MENTIONS {
        return Err(Error::Model(ModelError::TooManyMentions {
            kind,
            count,
        }));
    }

    Ok(())
}

/// Formats allowed-mentions specs, applying a default policy when a reply carries none.
///
/// The default is fixed at construction, so independent clients (or tests) can hold different
/// policies side by side.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AllowedMentionsFormatter {
    default: CreateAllowedMentions,
}

impl AllowedMentionsFormatter {
    /// Creates a formatter whose default policy is `default`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::TooManyMentions`] if the default lists more than 100 ids.
    pub fn new(default: &AllowedMentions) -> Result<Self> {
        Ok(Self {
            default: CreateAllowedMentions::from_spec(default)?,
        })
    }

    /// The wire policy used when a reply carries no allowed mentions.
    #[must_use]
    pub fn default_mentions(&self) -> &CreateAllowedMentions {
        &self.default
    }

    /// Formats `spec`, or returns the default policy when it is absent.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::TooManyMentions`] if an explicit id list holds more than 100 ids.
    pub fn format(&self, spec: Option<&AllowedMentions>) -> Result<CreateAllowedMentions> {
        match spec {
            Some(spec) => CreateAllowedMentions::from_spec(spec),
            None => {
                trace!("applying default allowed mentions");
                Ok(self.default.clone())
            },
        }
    }
}

impl Default for AllowedMentionsFormatter {
    /// Allows role and user mentions but not `@everyone`.
    fn default() -> Self {
        Self {
            default: CreateAllowedMentions {
                parse: vec![ParseValue::Roles, ParseValue::Users],
                ..Default::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::{assert_json, json};

    #[test]
    fn booleans_become_parse_values() {
        let spec = AllowedMentions::new().everyone(true).all_roles().all_users();
        let wire = CreateAllowedMentions::from_spec(&spec).unwrap();

        assert_json(&wire, json!({"parse": ["everyone", "roles", "users"]}));
    }

    #[test]
    fn id_lists_are_kept_apart_from_parse() {
        let spec = AllowedMentions::new().users([110372470472613888_u64]).replied_user(false);
        let wire = CreateAllowedMentions::from_spec(&spec).unwrap();

        assert_json(
            &wire,
            json!({"parse": [], "users": ["110372470472613888"], "replied_user": false}),
        );
    }

    #[test]
    fn false_toggles_contribute_nothing() {
        let spec = AllowedMentions {
            everyone: Some(false),
            roles: Some(MentionPolicy::Toggle(false)),
            users: None,
            replied_user: None,
        };

        assert_json(&CreateAllowedMentions::from_spec(&spec).unwrap(), json!({"parse": []}));
    }

    #[test]
    fn more_than_a_hundred_ids_are_rejected() {
        let spec = AllowedMentions::new().roles((1..=101).map(RoleId::new));
        let err = CreateAllowedMentions::from_spec(&spec).unwrap_err();

        assert!(matches!(
            err,
            Error::Model(ModelError::TooManyMentions {
                kind: MentionKind::Roles,
                count: 101
            })
        ));
    }

    #[test]
    fn absent_spec_uses_the_default() {
        let formatter = AllowedMentionsFormatter::new(&AllowedMentions::new().all_users()).unwrap();

        assert_json(&formatter.format(None).unwrap(), json!({"parse": ["users"]}));
        assert_json(
            &formatter.format(Some(&AllowedMentions::new().everyone(true))).unwrap(),
            json!({"parse": ["everyone"]}),
        );
    }

    #[test]
    fn policy_deserializes_from_booleans_or_ids() {
        let spec: AllowedMentions =
            serde_json::from_value(json!({"roles": true, "users": ["80351110224678912"]})).unwrap();

        assert_eq!(spec.roles, Some(MentionPolicy::Toggle(true)));
        assert_eq!(spec.users, Some(MentionPolicy::Only(vec![UserId::new(80351110224678912)])));
    }
}
