//! Paged list menu with prev/next/stop/jump navigation.

use async_trait::async_trait;
use tracing::warn;
use twilight_model::id::{Id, marker::ChannelMarker};

use crate::client::{MessageContent, MessageRef};
use crate::config::MenuConfig;
use crate::error::MenuError;
use crate::event::MenuEvent;
use crate::glyphs::{self, NavInput};
use crate::menu::{
    FinalAction, InputPredicate, Menu, attach_affordances, clear_actor_reaction, next_input,
};
use crate::page::{
    bulk_back, bulk_forward, clamp_page, page_window, step_back, step_forward, total_pages,
};

/// State handed to the caller-supplied render function.
#[derive(Debug)]
pub struct PageView<'a> {
    /// Current page, 1-based.
    pub page: usize,
    pub total_pages: usize,
    /// Items on the current page.
    pub items: &'a [String],
}

/// Renders the current page into an opaque message body.
pub type PageRender = Box<dyn Fn(&PageView<'_>) -> MessageContent + Send + Sync>;

/// Validated-at-construction paginator settings.
pub struct PaginatorConfig {
    pub menu: MenuConfig,
    pub items: Vec<String>,
    pub items_per_page: usize,
    /// Page shown first, 1-based.
    pub start_page: usize,
    /// Navigation past an end re-enters at the opposite end.
    pub wrap_ends: bool,
    /// Pages skipped by the bulk glyphs; values above 1 enable them.
    pub bulk_skip: usize,
    /// Accept typed keywords and page numbers alongside reactions.
    pub allow_text_input: bool,
    /// Typed keyword equivalent of the left glyph.
    pub text_left: Option<String>,
    /// Typed keyword equivalent of the right glyph.
    pub text_right: Option<String>,
    /// Keep waiting (stop affordance only) even when there is one page.
    pub wait_on_single_page: bool,
}

impl PaginatorConfig {
    /// Settings with defaults: 10 items per page, no wrap, no bulk skip,
    /// reactions only.
    pub fn new(menu: MenuConfig, items: Vec<String>) -> Self {
        Self {
            menu,
            items,
            items_per_page: 10,
            start_page: 1,
            wrap_ends: false,
            bulk_skip: 0,
            allow_text_input: false,
            text_left: None,
            text_right: None,
            wait_on_single_page: false,
        }
    }
}

/// Paged list menu.
///
/// Renders one page of items at a time and drives a wait loop over the
/// navigation affordances until stop or timeout runs the terminal action.
pub struct Paginator {
    config: PaginatorConfig,
    render: PageRender,
    final_action: FinalAction,
    page: usize,
}

impl Paginator {
    pub fn new(
        config: PaginatorConfig,
        render: PageRender,
        final_action: FinalAction,
    ) -> Result<Self, MenuError> {
        if config.items.is_empty() {
            return Err(MenuError::NoItems);
        }
        if config.items_per_page == 0 {
            return Err(MenuError::ZeroItemsPerPage);
        }
        if (config.text_left.is_some() || config.text_right.is_some()) && !config.allow_text_input {
            return Err(MenuError::KeywordsWithoutTextInput);
        }

        let total = total_pages(config.items.len(), config.items_per_page);
        if config.start_page < 1 || config.start_page > total {
            return Err(MenuError::StartPageOutOfRange {
                page: config.start_page,
                total_pages: total,
            });
        }

        let page = config.start_page;
        Ok(Self {
            config,
            render,
            final_action,
            page,
        })
    }

    fn total_pages(&self) -> usize {
        total_pages(self.config.items.len(), self.config.items_per_page)
    }

    fn render_current(&self) -> MessageContent {
        let (start, end) = page_window(
            self.config.items.len(),
            self.config.items_per_page,
            self.page,
        );
        (self.render)(&PageView {
            page: self.page,
            total_pages: self.total_pages(),
            items: &self.config.items[start..end],
        })
    }

    fn reaction_predicate(
        &self,
        message: MessageRef,
        attached: &[&'static str],
        bulk_enabled: bool,
    ) -> InputPredicate {
        let menu = self.config.menu.clone();
        let attached = attached.to_vec();
        Box::new(move |event| {
            let MenuEvent::Reaction(reaction) = event else {
                return false;
            };
            reaction.message_id == message.message_id
                && attached.contains(&reaction.emoji.as_str())
                && glyphs::nav_from_reaction(&reaction.emoji, bulk_enabled).is_some()
                && menu.is_authorized(&reaction.actor)
        })
    }

    fn message_predicate(&self, message: MessageRef) -> Option<InputPredicate> {
        if !self.config.allow_text_input {
            return None;
        }

        let menu = self.config.menu.clone();
        let left = self.config.text_left.clone();
        let right = self.config.text_right.clone();
        let total = self.total_pages();
        let current = self.page;
        Some(Box::new(move |event| {
            let MenuEvent::Message(typed) = event else {
                return false;
            };
            if typed.channel_id != message.channel_id || !menu.is_authorized(&typed.actor) {
                return false;
            }
            match glyphs::nav_from_text(&typed.content, left.as_deref(), right.as_deref(), total) {
                // A jump to the page already shown does not qualify.
                Some(NavInput::Jump(page)) => page != current,
                Some(_) => true,
                None => false,
            }
        }))
    }

    async fn run(mut self, message: MessageRef) -> anyhow::Result<()> {
        let total = self.total_pages();
        let bulk_enabled = self.config.bulk_skip > 1;

        let attached = if total > 1 {
            let mut wanted: Vec<&'static str> = Vec::new();
            if bulk_enabled {
                wanted.push(glyphs::BIG_LEFT);
            }
            wanted.extend([glyphs::LEFT, glyphs::STOP, glyphs::RIGHT]);
            if bulk_enabled {
                wanted.push(glyphs::BIG_RIGHT);
            }
            attach_affordances(self.config.menu.client(), message, &wanted).await
        } else if self.config.wait_on_single_page {
            attach_affordances(self.config.menu.client(), message, &[glyphs::STOP]).await
        } else {
            return self.finish(message).await;
        };

        // Strictly sequential per menu instance: each accepted input is
        // fully applied before the next await is registered, with a fresh
        // deadline every round.
        loop {
            let event = next_input(
                self.config.menu.waiter(),
                self.config.menu.timeout(),
                self.reaction_predicate(message, &attached, bulk_enabled),
                self.message_predicate(message),
            )
            .await;

            let Some(event) = event else {
                return self.finish(message).await;
            };

            let nav = match &event {
                MenuEvent::Reaction(reaction) => {
                    clear_actor_reaction(
                        self.config.menu.client(),
                        message,
                        &reaction.emoji,
                        reaction.actor.user_id,
                    )
                    .await;
                    glyphs::nav_from_reaction(&reaction.emoji, bulk_enabled)
                }
                MenuEvent::Message(typed) => glyphs::nav_from_text(
                    &typed.content,
                    self.config.text_left.as_deref(),
                    self.config.text_right.as_deref(),
                    total,
                ),
            };

            let Some(nav) = nav else {
                continue;
            };

            let next = match nav {
                NavInput::Left => step_back(self.page, total, self.config.wrap_ends),
                NavInput::Right => step_forward(self.page, total, self.config.wrap_ends),
                NavInput::BigLeft => {
                    bulk_back(self.page, total, self.config.wrap_ends, self.config.bulk_skip)
                }
                NavInput::BigRight => {
                    bulk_forward(self.page, total, self.config.wrap_ends, self.config.bulk_skip)
                }
                NavInput::Jump(page) => clamp_page(page, total),
                NavInput::Stop => return self.finish(message).await,
            };

            if next != self.page {
                self.page = next;
                let content = self.render_current();
                if let Err(source) = self
                    .config
                    .menu
                    .client()
                    .update_message(&message, &content)
                    .await
                {
                    warn!(
                        %source,
                        message_id = message.message_id.get(),
                        "failed to edit paginated message"
                    );
                }
            }
        }
    }

    async fn finish(self, message: MessageRef) -> anyhow::Result<()> {
        (self.final_action)(message).await;
        Ok(())
    }
}

#[async_trait]
impl Menu for Paginator {
    fn config(&self) -> &MenuConfig {
        &self.config.menu
    }

    async fn display_in(self, channel_id: Id<ChannelMarker>) -> anyhow::Result<()> {
        let content = self.render_current();
        let message = self
            .config
            .menu
            .client()
            .create_message(channel_id, &content)
            .await?;
        self.run(message).await
    }

    async fn display_as(self, message: MessageRef) -> anyhow::Result<()> {
        let content = self.render_current();
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

    fn render() -> PageRender {
        Box::new(|view| MessageContent::text(format!("page {}/{}", view.page, view.total_pages)))
    }

    fn items(count: usize) -> Vec<String> {
        (1..=count).map(|index| format!("item {index}")).collect()
    }

    #[test]
    fn rejects_empty_item_list() {
        let config = PaginatorConfig::new(menu_config(), Vec::new());
        let result = Paginator::new(config, render(), no_final_action());
        assert!(matches!(result, Err(MenuError::NoItems)));
    }

    #[test]
    fn rejects_zero_items_per_page() {
        let mut config = PaginatorConfig::new(menu_config(), items(5));
        config.items_per_page = 0;
        let result = Paginator::new(config, render(), no_final_action());
        assert!(matches!(result, Err(MenuError::ZeroItemsPerPage)));
    }

    #[test]
    fn rejects_keywords_without_text_input() {
        let mut config = PaginatorConfig::new(menu_config(), items(5));
        config.text_left = Some("prev".to_owned());
        let result = Paginator::new(config, render(), no_final_action());
        assert!(matches!(result, Err(MenuError::KeywordsWithoutTextInput)));
    }

    #[test]
    fn rejects_out_of_range_start_page() {
        let mut config = PaginatorConfig::new(menu_config(), items(25));
        config.start_page = 4;
        let result = Paginator::new(config, render(), no_final_action());
        assert!(matches!(
            result,
            Err(MenuError::StartPageOutOfRange { page: 4, total_pages: 3 })
        ));
    }

    #[test]
    fn twenty_five_items_at_ten_per_page_is_three_pages() {
        let config = PaginatorConfig::new(menu_config(), items(25));
        let paginator = Paginator::new(config, render(), no_final_action()).unwrap();
        assert_eq!(paginator.total_pages(), 3);
        let view = paginator.render_current();
        assert_eq!(view.text, "page 1/3");
    }
}
