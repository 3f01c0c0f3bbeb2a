use std::sync::Arc;

/// A cheaply clonable String whose [`Debug`] output never reveals the contents.
///
/// Interaction tokens and bot tokens are credentials; holding them in this newtype keeps them
/// out of `tracing` spans and panic messages.
#[derive(Clone, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(transparent)]
pub struct SecretString(Arc<str>);

impl SecretString {
    #[must_use]
    pub fn new(inner: Arc<str>) -> Self {
        Self(inner)
    }

    #[must_use]
    pub fn expose_secret(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecretString {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fmt.debug_tuple(std::any::type_name::<Self>()).field(&"<secret>").finish()
    }
}

impl From<&str> for SecretString {
    fn from(value: &str) -> Self {
        Self(Arc::from(value))
    }
}

impl From<String> for SecretString {
    fn from(value: String) -> Self {
        Self(Arc::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::SecretString;

    #[test]
    fn debug_is_redacted() {
        let secret = SecretString::from("aW50ZXJhY3Rpb24");
        let debug = format!("{secret:?}");

        assert!(!debug.contains("aW50ZXJhY3Rpb24"));
        assert!(debug.contains("<secret>"));
        assert_eq!(secret.expose_secret(), "aW50ZXJhY3Rpb24");
    }
}
