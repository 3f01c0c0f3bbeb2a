use crate::model::id::RoleId;

/// A builder to edit a guild [`Emoji`], used by [`Emoji::edit`].
///
/// [`Emoji`]: crate::model::guild::Emoji
/// [`Emoji::edit`]: crate::model::guild::Emoji::edit
#[derive(Clone, Debug, Default, Serialize)]
#[must_use]
pub struct EditEmoji<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    roles: Option<Vec<RoleId>>,

    #[serde(skip)]
    audit_log_reason: Option<&'a str>,
}

impl<'a> EditEmoji<'a> {
    /// Equivalent to [`Self::default`].
    pub fn new() -> Self {
        Self::default()
    }

    /// The name of the emoji to set.
    ///
    /// **Note**: Must be between 2 and 32 characters long.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The roles allowed to use the emoji. An empty list makes it usable by everyone.
    pub fn roles(mut self, roles: impl IntoIterator<Item = impl Into<RoleId>>) -> Self {
        self.roles = Some(roles.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the request's audit log reason.
    pub fn audit_log_reason(mut self, reason: &'a str) -> Self {
        self.audit_log_reason = Some(reason);
        self
    }

    pub(crate) fn reason(&self) -> Option<&'a str> {
        self.audit_log_reason
    }
}
