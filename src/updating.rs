//! Timer-refreshed display with a single cancel affordance.

use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;
use twilight_model::id::{Id, marker::ChannelMarker};

use crate::client::{MessageContent, MessageRef};
use crate::config::MenuConfig;
use crate::error::MenuError;
use crate::event::{EventKind, MenuEvent};
use crate::glyphs::CANCEL;
use crate::menu::{FinalAction, Menu, attach_affordances};
use crate::waiter::WaitOutcome;

/// Renders the current state into an opaque message body, called once per
/// refresh tick.
pub type RefreshRender = Box<dyn Fn() -> MessageContent + Send + Sync>;

/// Validated-at-construction updating-menu settings.
pub struct UpdatingMenuConfig {
    pub menu: MenuConfig,
    /// Delay between refresh edits.
    pub interval: Duration,
}

impl UpdatingMenuConfig {
    pub fn new(menu: MenuConfig, interval: Duration) -> Self {
        Self { menu, interval }
    }
}

/// Self-refreshing display.
///
/// After the first render two activities run concurrently: a fixed-interval
/// re-render loop, and one await for a cancel reaction bounded by the
/// configured timeout. Whichever finishes tears the other down, then the
/// terminal action runs exactly once.
pub struct UpdatingMenu {
    config: UpdatingMenuConfig,
    render: RefreshRender,
    final_action: FinalAction,
}

impl UpdatingMenu {
    pub fn new(
        config: UpdatingMenuConfig,
        render: RefreshRender,
        final_action: FinalAction,
    ) -> Result<Self, MenuError> {
        if config.interval.is_zero() {
            return Err(MenuError::ZeroInterval);
        }

        Ok(Self {
            config,
            render,
            final_action,
        })
    }

    async fn run(self, message: MessageRef) -> anyhow::Result<()> {
        attach_affordances(self.config.menu.client(), message, &[CANCEL]).await;

        let menu = self.config.menu.clone();
        let cancel_wait = menu
            .waiter()
            .register(
                EventKind::ReactionAdd,
                {
                    let menu = menu.clone();
                    move |event: &MenuEvent| {
                        let MenuEvent::Reaction(reaction) = event else {
                            return false;
                        };
                        reaction.message_id == message.message_id
                            && reaction.emoji == CANCEL
                            && menu.is_authorized(&reaction.actor)
                    }
                },
                menu.timeout(),
            )
            .await;

        let refresh = async {
            let mut ticker = tokio::time::interval(self.config.interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            // First tick fires immediately; the message was just rendered.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let content = (self.render)();
                if let Err(source) = menu.client().update_message(&message, &content).await {
                    warn!(
                        %source,
                        message_id = message.message_id.get(),
                        "failed to refresh updating menu"
                    );
                }
            }
        };

        // select! drops the refresh loop the moment the wait resolves, so a
        // cancelled menu can never keep editing its message.
        let outcome = tokio::select! {
            outcome = cancel_wait.wait() => outcome,
            _ = refresh => unreachable!("refresh loop never completes"),
        };

        match outcome {
            WaitOutcome::Event(_) | WaitOutcome::TimedOut => {
                (self.final_action)(message).await;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl Menu for UpdatingMenu {
    fn config(&self) -> &MenuConfig {
        &self.config.menu
    }

    async fn display_in(self, channel_id: Id<ChannelMarker>) -> anyhow::Result<()> {
        let content = (self.render)();
        let message = self
            .config
            .menu
            .client()
            .create_message(channel_id, &content)
            .await?;
        self.run(message).await
    }

    async fn display_as(self, message: MessageRef) -> anyhow::Result<()> {
        let content = (self.render)();
        self.config
            .menu
            .client()
            .update_message(&message, &content)
            .await?;
        self.run(message).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::client::NoopChatClient;
    use crate::menu::no_final_action;
    use crate::waiter::EventWaiter;

    #[test]
    fn rejects_zero_interval() {
        let menu = MenuConfig::new(EventWaiter::new(), Arc::new(NoopChatClient));
        let result = UpdatingMenu::new(
            UpdatingMenuConfig::new(menu, Duration::ZERO),
            Box::new(MessageContent::default),
            no_final_action(),
        );
        assert!(matches!(result, Err(MenuError::ZeroInterval)));
    }
}
