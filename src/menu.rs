//! Shared shape and plumbing for all menu variants.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};
use twilight_model::id::{
    Id,
    marker::{ChannelMarker, UserMarker},
};

use crate::client::{ChatClient, MessageRef};
use crate::config::MenuConfig;
use crate::event::{Actor, EventKind, MenuEvent};
use crate::waiter::{EventWaiter, WaitOutcome};

/// Terminal callback, invoked exactly once when a menu's interactive loop
/// ends via stop, cancel, or timeout.
pub type FinalAction = Box<dyn FnOnce(MessageRef) -> Pin<Box<dyn Future<Output = ()> + Send>> + Send>;

/// Box an async closure into a [`FinalAction`].
pub fn final_action<F, Fut>(action: F) -> FinalAction
where
    F: FnOnce(MessageRef) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    Box::new(move |message| Box::pin(action(message)))
}

/// Terminal action that does nothing.
pub fn no_final_action() -> FinalAction {
    final_action(|_| async {})
}

/// Common capability surface of every menu variant.
///
/// A menu owns its state for exactly one `display_*` call; nothing
/// persists once the wait loop ends.
#[async_trait]
pub trait Menu {
    fn config(&self) -> &MenuConfig;

    /// Render the first page into a channel and run the interactive loop.
    ///
    /// Failure of this very first render aborts the display; everything
    /// after it is best-effort.
    async fn display_in(self, channel_id: Id<ChannelMarker>) -> anyhow::Result<()>;

    /// Take over an existing message and run the interactive loop.
    async fn display_as(self, message: MessageRef) -> anyhow::Result<()>;

    /// Authorization predicate gating every input event.
    fn is_authorized(&self, actor: &Actor) -> bool {
        self.config().is_authorized(actor)
    }
}

/// Boxed waiter predicate shared by the input helpers.
pub(crate) type InputPredicate = Box<dyn Fn(&MenuEvent) -> bool + Send + Sync>;

/// Attach reaction affordances sequentially, best-effort.
///
/// Stops at the first failure and returns the prefix that succeeded; the
/// caller decides which input modes remain available. An advisory
/// permission probe short-circuits a doomed sequence.
pub(crate) async fn attach_affordances(
    client: &Arc<dyn ChatClient>,
    message: MessageRef,
    glyphs: &[&'static str],
) -> Vec<&'static str> {
    if glyphs.is_empty() {
        return Vec::new();
    }

    if !client.can_add_reactions(message.channel_id).await {
        debug!(
            channel_id = message.channel_id.get(),
            "reaction permission probe failed, skipping affordance attachment"
        );
        return Vec::new();
    }

    let mut attached = Vec::with_capacity(glyphs.len());
    for glyph in glyphs {
        match client.add_reaction(&message, glyph).await {
            Ok(()) => attached.push(*glyph),
            Err(source) => {
                warn!(
                    %source,
                    emoji = glyph,
                    message_id = message.message_id.get(),
                    "failed to attach reaction affordance, continuing with partial set"
                );
                break;
            }
        }
    }
    attached
}

/// Wait for the next qualifying input on either input mode.
///
/// Registers a reaction await and, when typed input is enabled, a message
/// await, and races them. The loser is cancelled so no stale registration
/// lingers. Returns `None` on timeout.
pub(crate) async fn next_input(
    waiter: &EventWaiter,
    timeout: Duration,
    reaction_predicate: InputPredicate,
    message_predicate: Option<InputPredicate>,
) -> Option<MenuEvent> {
    let reaction_wait = waiter
        .register(EventKind::ReactionAdd, reaction_predicate, timeout)
        .await;

    let Some(message_predicate) = message_predicate else {
        return into_event(reaction_wait.wait().await);
    };

    let message_wait = waiter
        .register(EventKind::MessageCreate, message_predicate, timeout)
        .await;

    let reaction_handle = reaction_wait.handle();
    let message_handle = message_wait.handle();

    tokio::select! {
        outcome = reaction_wait.wait() => {
            waiter.cancel(&message_handle).await;
            into_event(outcome)
        }
        outcome = message_wait.wait() => {
            waiter.cancel(&reaction_handle).await;
            into_event(outcome)
        }
    }
}

fn into_event(outcome: WaitOutcome) -> Option<MenuEvent> {
    match outcome {
        WaitOutcome::Event(event) => Some(event),
        WaitOutcome::TimedOut => None,
    }
}

/// Remove a handled reaction so the actor can press the same glyph again.
pub(crate) async fn clear_actor_reaction(
    client: &Arc<dyn ChatClient>,
    message: MessageRef,
    emoji: &str,
    user_id: Id<UserMarker>,
) {
    if let Err(source) = client.remove_reaction(&message, emoji, user_id).await {
        debug!(%source, emoji, "failed to remove handled reaction");
    }
}
