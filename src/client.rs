//! Narrow seam to the chat platform.
//!
//! Menus never talk to the platform client directly; they go through
//! [`ChatClient`] so the engine stays testable and independent of any one
//! HTTP client. The host bot implements this trait over its real client.

use async_trait::async_trait;
use thiserror::Error;
use twilight_model::channel::message::embed::Embed;
use twilight_model::id::{
    Id,
    marker::{ChannelMarker, MessageMarker, UserMarker},
};

/// Failures from outbound platform calls.
///
/// Apart from a menu's very first render these are treated as "affordance
/// unavailable", logged and tolerated rather than propagated.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("missing permission for {action}")]
    MissingPermission { action: &'static str },
    #[error("target message or channel is gone")]
    TargetGone,
    #[error("platform call failed: {0}")]
    Platform(String),
}

/// Opaque message body produced by a caller-supplied render function.
///
/// The engine never inspects content, it only sends and edits it.
#[derive(Debug, Clone, Default)]
pub struct MessageContent {
    pub text: String,
    pub embed: Option<Embed>,
}

impl MessageContent {
    /// Plain-text content.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            embed: None,
        }
    }

    /// Attach a rich embed block.
    pub fn with_embed(mut self, embed: Embed) -> Self {
        self.embed = Some(embed);
        self
    }
}

/// Location of a displayed menu message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageRef {
    pub channel_id: Id<ChannelMarker>,
    pub message_id: Id<MessageMarker>,
}

/// Outbound platform operations the menu engine consumes.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Send a new message to a channel.
    async fn create_message(
        &self,
        channel_id: Id<ChannelMarker>,
        content: &MessageContent,
    ) -> Result<MessageRef, ClientError>;

    /// Edit an existing message in place.
    async fn update_message(
        &self,
        message: &MessageRef,
        content: &MessageContent,
    ) -> Result<(), ClientError>;

    /// Attach a reaction glyph to a message.
    async fn add_reaction(&self, message: &MessageRef, emoji: &str) -> Result<(), ClientError>;

    /// Remove one user's reaction glyph from a message.
    async fn remove_reaction(
        &self,
        message: &MessageRef,
        emoji: &str,
        user_id: Id<UserMarker>,
    ) -> Result<(), ClientError>;

    /// Advisory probe: whether the bot can attach reactions in a channel.
    ///
    /// Only used to skip a doomed attachment sequence; never gates state
    /// transitions.
    async fn can_add_reactions(&self, channel_id: Id<ChannelMarker>) -> bool {
        let _ = channel_id;
        true
    }
}

/// `ChatClient` that accepts every call and does nothing.
///
/// Useful as a placeholder in wiring and tests.
#[derive(Debug, Default)]
pub struct NoopChatClient;

#[async_trait]
impl ChatClient for NoopChatClient {
    async fn create_message(
        &self,
        channel_id: Id<ChannelMarker>,
        _content: &MessageContent,
    ) -> Result<MessageRef, ClientError> {
        Ok(MessageRef {
            channel_id,
            message_id: Id::new(1),
        })
    }

    async fn update_message(
        &self,
        _message: &MessageRef,
        _content: &MessageContent,
    ) -> Result<(), ClientError> {
        Ok(())
    }

    async fn add_reaction(&self, _message: &MessageRef, _emoji: &str) -> Result<(), ClientError> {
        Ok(())
    }

    async fn remove_reaction(
        &self,
        _message: &MessageRef,
        _emoji: &str,
        _user_id: Id<UserMarker>,
    ) -> Result<(), ClientError> {
        Ok(())
    }
}
