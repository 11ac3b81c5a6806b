//! Engine-side projection of the inbound gateway events menus consume.
//!
//! The host bot maps its gateway payloads (reaction added, message created)
//! into these structs before handing them to [`EventWaiter::dispatch`].
//!
//! [`EventWaiter::dispatch`]: crate::waiter::EventWaiter::dispatch

use twilight_model::id::{
    Id,
    marker::{ChannelMarker, GuildMarker, MessageMarker, RoleMarker, UserMarker},
};

/// Identity of whoever produced an input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// User that added the reaction or sent the message.
    pub user_id: Id<UserMarker>,
    /// Whether the platform marks this account as a bot.
    pub is_bot: bool,
    /// Guild the event happened in, if any.
    pub guild_id: Option<Id<GuildMarker>>,
    /// Guild roles held by the actor. Empty outside guild context.
    pub roles: Vec<Id<RoleMarker>>,
}

impl Actor {
    /// Plain non-bot actor without guild context.
    pub fn user(user_id: Id<UserMarker>) -> Self {
        Self {
            user_id,
            is_bot: false,
            guild_id: None,
            roles: Vec::new(),
        }
    }
}

/// A reaction added to a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionEvent {
    pub actor: Actor,
    pub channel_id: Id<ChannelMarker>,
    pub message_id: Id<MessageMarker>,
    /// Unicode emoji the actor reacted with.
    pub emoji: String,
}

/// A plain message sent to a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageEvent {
    pub actor: Actor,
    pub channel_id: Id<ChannelMarker>,
    pub message_id: Id<MessageMarker>,
    /// Raw text content.
    pub content: String,
}

/// Bucket key for pending awaits, one per consumed gateway event type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    ReactionAdd,
    MessageCreate,
}

/// An inbound event a menu can wait for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEvent {
    Reaction(ReactionEvent),
    Message(MessageEvent),
}

impl MenuEvent {
    /// The bucket this event dispatches into.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Reaction(_) => EventKind::ReactionAdd,
            Self::Message(_) => EventKind::MessageCreate,
        }
    }

    /// Who produced the event.
    pub fn actor(&self) -> &Actor {
        match self {
            Self::Reaction(reaction) => &reaction.actor,
            Self::Message(message) => &message.actor,
        }
    }

    /// Channel the event originated in.
    pub fn channel_id(&self) -> Id<ChannelMarker> {
        match self {
            Self::Reaction(reaction) => reaction.channel_id,
            Self::Message(message) => message.channel_id,
        }
    }

    /// Message the event targets (the reacted-to message, or the sent one).
    pub fn message_id(&self) -> Id<MessageMarker> {
        match self {
            Self::Reaction(reaction) => reaction.message_id,
            Self::Message(message) => message.message_id,
        }
    }
}
