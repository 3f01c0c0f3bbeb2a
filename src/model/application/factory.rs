use crate::internal::prelude::*;
use crate::json::from_value;
use crate::model::channel::Message;
use crate::model::guild::Member;
use crate::model::id::GuildId;

/// Builds the entities embedded in an interaction payload.
///
/// [`Interaction::from_value`] hands the raw `member` and `message` objects to a factory instead
/// of constructing them itself, so that callers can plug in their own entity graph (or a cache)
/// and tests can do without one.
///
/// [`Interaction::from_value`]: super::Interaction::from_value
pub trait ModelFactory: Send + Sync {
    /// Builds the member who triggered an interaction in `guild_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the data does not describe a member.
    fn member(&self, data: Value, guild_id: Option<GuildId>) -> Result<Member>;

    /// Builds the message a component interaction was triggered from.
    ///
    /// # Errors
    ///
    /// Returns an error if the data does not describe a message.
    fn message(&self, data: Value) -> Result<Message>;
}

/// A [`ModelFactory`] deserializing entities straight from their wire data.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultModelFactory;

impl ModelFactory for DefaultModelFactory {
    fn member(&self, data: Value, guild_id: Option<GuildId>) -> Result<Member> {
        let mut member: Member = from_value(data)?;
        if member.guild_id.is_none() {
            member.guild_id = guild_id;
        }

        Ok(member)
    }

    fn message(&self, data: Value) -> Result<Message> {
        from_value(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::json;

    #[test]
    fn members_inherit_the_interaction_guild() {
        let member = DefaultModelFactory
            .member(json!({"user": {"id": "1", "username": "a"}}), Some(GuildId::new(2)))
            .unwrap();

        assert_eq!(member.guild_id, Some(GuildId::new(2)));
    }

    #[test]
    fn invalid_messages_are_rejected() {
        assert!(DefaultModelFactory.message(json!({"id": "1"})).is_err());
    }
}
