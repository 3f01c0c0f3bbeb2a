use std::future::Future;
use std::sync::atomic::{AtomicU8, Ordering};

use tracing::warn;

use super::{Interaction, InteractionType};
use crate::builder::ReplyContent;
use crate::internal::prelude::*;
use crate::model::channel::MessageFlags;
use crate::model::id::MessageTarget;
use crate::model::ModelError;

const UNANSWERED: u8 = 0;
const RESPONDING: u8 = 1;
const ANSWERED: u8 = 2;

/// Where a [`StrictInteraction`] stands in the response protocol.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum ResponseState {
    /// No initial response has been sent.
    Unanswered,
    /// An initial response is in flight.
    Responding,
    /// The initial response was accepted.
    Answered,
}

/// An [`Interaction`] that tracks the response protocol locally and rejects illegal calls before
/// sending them.
///
/// - A second initial response fails with [`ModelError::AlreadyResponded`].
/// - Followups, edits and deletes before the initial response fail with
///   [`ModelError::NotResponded`].
/// - [`Self::defer_update`] and [`Self::edit_parent`] on anything but a message component fail
///   with [`ModelError::InvalidInteractionType`].
///
/// State lives in this wrapper only. If the initial response fails (including when the reply
/// is rejected before sending) or its future is dropped before completing, the interaction is
/// unanswered again and may be retried.
///
/// ```rust,no_run
/// # async fn run(interaction: riposte::model::application::Interaction) -> riposte::Result<()> {
/// use riposte::model::ModelError;
///
/// let interaction = interaction.into_strict();
/// interaction.create_message("first").await?;
///
/// let err = interaction.create_message("second").await.unwrap_err();
/// assert_eq!(err.as_model_error(), Some(&ModelError::AlreadyResponded));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct StrictInteraction {
    inner: Interaction,
    state: AtomicU8,
}

impl StrictInteraction {
    #[must_use]
    pub fn new(inner: Interaction) -> Self {
        Self {
            inner,
            state: AtomicU8::new(UNANSWERED),
        }
    }

    /// The wrapped interaction.
    ///
    /// Calls made directly on it are not tracked.
    #[must_use]
    pub fn interaction(&self) -> &Interaction {
        &self.inner
    }

    #[must_use]
    pub fn into_inner(self) -> Interaction {
        self.inner
    }

    #[must_use]
    pub fn state(&self) -> ResponseState {
        match self.state.load(Ordering::Acquire) {
            UNANSWERED => ResponseState::Unanswered,
            RESPONDING => ResponseState::Responding,
            _ => ResponseState::Answered,
        }
    }

    /// See [`Interaction::acknowledge`].
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::AlreadyResponded`] if an initial response was already sent.
    pub async fn acknowledge(&self) -> Result<Value> {
        self.initial_response(None, self.inner.acknowledge()).await
    }

    /// See [`Interaction::defer`].
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::AlreadyResponded`] if an initial response was already sent.
    pub async fn defer(&self, flags: Option<MessageFlags>) -> Result<Value> {
        self.initial_response(None, self.inner.defer(flags)).await
    }

    /// See [`Interaction::defer_update`].
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidInteractionType`] unless the interaction is a message
    /// component, and [`ModelError::AlreadyResponded`] if an initial response was already sent.
    pub async fn defer_update(&self) -> Result<Value> {
        self.initial_response(Some(InteractionType::MessageComponent), self.inner.defer_update())
            .await
    }

    /// See [`Interaction::create_message`].
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::AlreadyResponded`] if an initial response was already sent.
    pub async fn create_message(&self, content: impl Into<ReplyContent>) -> Result<Value> {
        self.initial_response(None, self.inner.create_message(content)).await
    }

    /// See [`Interaction::edit_parent`].
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidInteractionType`] unless the interaction is a message
    /// component, and [`ModelError::AlreadyResponded`] if an initial response was already sent.
    pub async fn edit_parent(&self, content: impl Into<ReplyContent>) -> Result<Value> {
        self.initial_response(
            Some(InteractionType::MessageComponent),
            self.inner.edit_parent(content),
        )
        .await
    }

    /// See [`Interaction::create_followup`].
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NotResponded`] before the initial response.
    pub async fn create_followup(&self, content: impl Into<ReplyContent>) -> Result<Value> {
        self.require_answered("create_followup")?;
        self.inner.create_followup(content).await
    }

    /// See [`Interaction::edit`].
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NotResponded`] before the initial response.
    pub async fn edit(
        &self,
        message: impl Into<MessageTarget>,
        content: impl Into<ReplyContent>,
    ) -> Result<Value> {
        self.require_answered("edit")?;
        self.inner.edit(message, content).await
    }

    /// See [`Interaction::delete`].
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NotResponded`] before the initial response.
    pub async fn delete(&self, message: impl Into<MessageTarget>) -> Result<Value> {
        self.require_answered("delete")?;
        self.inner.delete(message).await
    }

    async fn initial_response(
        &self,
        expected: Option<InteractionType>,
        response: impl Future<Output = Result<Value>>,
    ) -> Result<Value> {
        if let Some(expected) = expected {
            if self.inner.kind != expected {
                warn!(interaction_id = %self.inner.id, kind = ?self.inner.kind, "wrong interaction type");
                return Err(Error::Model(ModelError::InvalidInteractionType {
                    expected,
                    found: self.inner.kind,
                }));
            }
        }

        if self
            .state
            .compare_exchange(UNANSWERED, RESPONDING, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!(interaction_id = %self.inner.id, "interaction was already responded to");
            return Err(Error::Model(ModelError::AlreadyResponded));
        }

        let guard = RespondingGuard(&self.state);
        let result = response.await;
        if result.is_ok() {
            guard.answered();
        }

        result
    }

    fn require_answered(&self, operation: &'static str) -> Result<()> {
        if self.state() == ResponseState::Answered {
            Ok(())
        } else {
            warn!(interaction_id = %self.inner.id, operation, "interaction was not responded to");
            Err(Error::Model(ModelError::NotResponded))
        }
    }
}

/// Resets the state to unanswered when dropped, unless the response was accepted.
struct RespondingGuard<'a>(&'a AtomicU8);

impl RespondingGuard<'_> {
    fn answered(self) {
        self.0.store(ANSWERED, Ordering::Release);
        std::mem::forget(self);
    }
}

impl Drop for RespondingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(UNANSWERED, Ordering::Release);
    }
}

impl From<Interaction> for StrictInteraction {
    fn from(inner: Interaction) -> Self {
        Self::new(inner)
    }
}
