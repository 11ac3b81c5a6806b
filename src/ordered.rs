//! Single-shot menu of up to ten labeled choices.

use std::future::Future;
use std::pin::Pin;

use async_trait::async_trait;
use tracing::debug;
use twilight_model::id::{Id, marker::ChannelMarker};

use crate::client::{MessageContent, MessageRef};
use crate::config::MenuConfig;
use crate::error::MenuError;
use crate::event::MenuEvent;
use crate::glyphs::{self, CANCEL};
use crate::menu::{
    FinalAction, InputPredicate, Menu, attach_affordances, clear_actor_reaction, next_input,
};

/// Most distinct selector glyphs available.
pub const MAX_CHOICES: usize = 10;

/// Action bound to one choice, run when it is selected.
pub type ChoiceAction = Box<dyn FnOnce(MessageRef) -> Pin<Box<dyn Future<Output = ()> + Send>> + Send>;

/// One selectable entry.
pub struct Choice {
    label: String,
    action: ChoiceAction,
}

impl Choice {
    pub fn new<F, Fut>(label: impl Into<String>, action: F) -> Self
    where
        F: FnOnce(MessageRef) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self {
            label: label.into(),
            action: Box::new(move |message| Box::pin(action(message))),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Renders the choice labels into an opaque message body.
pub type ChoiceRender = Box<dyn Fn(&[String]) -> MessageContent + Send + Sync>;

/// Validated-at-construction ordered-menu settings.
pub struct OrderedMenuConfig {
    pub menu: MenuConfig,
    /// Use 🇦–🇯 selector glyphs instead of keycap digits.
    pub use_letters: bool,
    /// Offer a cancel glyph that ends the menu via the terminal action.
    pub use_cancel: bool,
    /// Accept a typed 1-based index or exact label alongside reactions.
    pub allow_typed_input: bool,
}

impl OrderedMenuConfig {
    /// Settings with defaults: keycap digits, cancel enabled, reactions
    /// only.
    pub fn new(menu: MenuConfig) -> Self {
        Self {
            menu,
            use_letters: false,
            use_cancel: true,
            allow_typed_input: false,
        }
    }
}

/// Finite list of named choices bound to callback actions.
///
/// Single-shot: the first valid selection runs its bound action and the
/// menu terminates. Cancel or timeout runs the terminal action instead.
pub struct OrderedMenu {
    config: OrderedMenuConfig,
    choices: Vec<Choice>,
    render: ChoiceRender,
    final_action: FinalAction,
}

impl OrderedMenu {
    pub fn new(
        config: OrderedMenuConfig,
        choices: Vec<Choice>,
        render: ChoiceRender,
        final_action: FinalAction,
    ) -> Result<Self, MenuError> {
        if choices.is_empty() {
            return Err(MenuError::NoChoices);
        }
        if choices.len() > MAX_CHOICES {
            return Err(MenuError::TooManyChoices {
                max: MAX_CHOICES,
                got: choices.len(),
            });
        }

        Ok(Self {
            config,
            choices,
            render,
            final_action,
        })
    }

    fn labels(&self) -> Vec<String> {
        self.choices.iter().map(|choice| choice.label.clone()).collect()
    }

    fn reaction_predicate(
        &self,
        message: MessageRef,
        attached: &[&'static str],
    ) -> InputPredicate {
        let menu = self.config.menu.clone();
        let attached = attached.to_vec();
        Box::new(move |event| {
            let MenuEvent::Reaction(reaction) = event else {
                return false;
            };
            reaction.message_id == message.message_id
                && attached.contains(&reaction.emoji.as_str())
                && menu.is_authorized(&reaction.actor)
        })
    }

    fn message_predicate(&self, message: MessageRef) -> Option<InputPredicate> {
        if !self.config.allow_typed_input {
            return None;
        }

        let menu = self.config.menu.clone();
        let labels = self.labels();
        Some(Box::new(move |event| {
            let MenuEvent::Message(typed) = event else {
                return false;
            };
            typed.channel_id == message.channel_id
                && menu.is_authorized(&typed.actor)
                && glyphs::choice_from_text(&typed.content, &labels).is_some()
        }))
    }

    async fn run(self, message: MessageRef) -> anyhow::Result<()> {
        let count = self.choices.len();
        let lettered = self.config.use_letters;

        let mut wanted: Vec<&'static str> =
            glyphs::choice_glyphs(count, lettered).to_vec();
        if self.config.use_cancel {
            wanted.push(CANCEL);
        }
        let attached = attach_affordances(self.config.menu.client(), message, &wanted).await;

        if attached.is_empty() && !self.config.allow_typed_input {
            debug!(
                message_id = message.message_id.get(),
                "no affordances available for ordered menu, terminating"
            );
            return self.finish(message).await;
        }

        let event = next_input(
            self.config.menu.waiter(),
            self.config.menu.timeout(),
            self.reaction_predicate(message, &attached),
            self.message_predicate(message),
        )
        .await;

        let selected = match event {
            None => return self.finish(message).await,
            Some(MenuEvent::Reaction(reaction)) => {
                clear_actor_reaction(
                    self.config.menu.client(),
                    message,
                    &reaction.emoji,
                    reaction.actor.user_id,
                )
                .await;
                if reaction.emoji == CANCEL {
                    return self.finish(message).await;
                }
                glyphs::choice_from_reaction(&reaction.emoji, count, lettered)
            }
            Some(MenuEvent::Message(typed)) => {
                glyphs::choice_from_text(&typed.content, &self.labels())
            }
        };

        match selected {
            Some(index) => {
                let mut choices = self.choices;
                let choice = choices.swap_remove(index);
                (choice.action)(message).await;
                Ok(())
            }
            None => self.finish(message).await,
        }
    }

    async fn finish(self, message: MessageRef) -> anyhow::Result<()> {
        (self.final_action)(message).await;
        Ok(())
    }
}

#[async_trait]
impl Menu for OrderedMenu {
    fn config(&self) -> &MenuConfig {
        &self.config.menu
    }

    async fn display_in(self, channel_id: Id<ChannelMarker>) -> anyhow::Result<()> {
        let content = (self.render)(&self.labels());
        let message = self
            .config
            .menu
            .client()
            .create_message(channel_id, &content)
            .await?;
        self.run(message).await
    }

    async fn display_as(self, message: MessageRef) -> anyhow::Result<()> {
        let content = (self.render)(&self.labels());
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

    fn menu_config() -> MenuConfig {
        MenuConfig::new(EventWaiter::new(), Arc::new(NoopChatClient))
    }

    fn render() -> ChoiceRender {
        Box::new(|labels| MessageContent::text(labels.join("\n")))
    }

    fn choices(count: usize) -> Vec<Choice> {
        (1..=count)
            .map(|index| Choice::new(format!("choice {index}"), |_| async {}))
            .collect()
    }

    #[test]
    fn rejects_empty_choice_list() {
        let result = OrderedMenu::new(
            OrderedMenuConfig::new(menu_config()),
            Vec::new(),
            render(),
            no_final_action(),
        );
        assert!(matches!(result, Err(MenuError::NoChoices)));
    }

    #[test]
    fn rejects_more_than_ten_choices() {
        let result = OrderedMenu::new(
            OrderedMenuConfig::new(menu_config()),
            choices(11),
            render(),
            no_final_action(),
        );
        assert!(matches!(
            result,
            Err(MenuError::TooManyChoices { max: 10, got: 11 })
        ));
    }

    #[test]
    fn ten_choices_are_accepted() {
        assert!(
            OrderedMenu::new(
                OrderedMenuConfig::new(menu_config()),
                choices(10),
                render(),
                no_final_action(),
            )
            .is_ok()
        );
    }
}
