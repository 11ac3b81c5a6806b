//! Image slideshow: paginator chrome, one image per page.

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
use crate::page::{bulk_back, bulk_forward, clamp_page, step_back, step_forward};

/// State handed to the caller-supplied render function.
#[derive(Debug)]
pub struct SlideView<'a> {
    /// Current slide, 1-based.
    pub page: usize,
    pub total_pages: usize,
    /// Image reference for the current slide.
    pub url: &'a str,
}

/// Renders the current slide into an opaque message body.
pub type SlideRender = Box<dyn Fn(&SlideView<'_>) -> MessageContent + Send + Sync>;

/// Validated-at-construction slideshow settings.
///
/// Mirrors [`PaginatorConfig`] minus the items-per-page concept: each page
/// is exactly one image.
///
/// [`PaginatorConfig`]: crate::paginator::PaginatorConfig
pub struct SlideshowConfig {
    pub menu: MenuConfig,
    /// Image references, one per slide.
    pub images: Vec<String>,
    /// Slide shown first, 1-based.
    pub start_page: usize,
    pub wrap_ends: bool,
    pub bulk_skip: usize,
    pub allow_text_input: bool,
    pub text_left: Option<String>,
    pub text_right: Option<String>,
    pub wait_on_single_page: bool,
}

impl SlideshowConfig {
    pub fn new(menu: MenuConfig, images: Vec<String>) -> Self {
        Self {
            menu,
            images,
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

/// Slideshow menu over a fixed image list.
pub struct Slideshow {
    config: SlideshowConfig,
    render: SlideRender,
    final_action: FinalAction,
    page: usize,
}

impl Slideshow {
    pub fn new(
        config: SlideshowConfig,
        render: SlideRender,
        final_action: FinalAction,
    ) -> Result<Self, MenuError> {
        if config.images.is_empty() {
            return Err(MenuError::NoItems);
        }
        if (config.text_left.is_some() || config.text_right.is_some()) && !config.allow_text_input {
            return Err(MenuError::KeywordsWithoutTextInput);
        }

        let total = config.images.len();
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
        self.config.images.len()
    }

    fn render_current(&self) -> MessageContent {
        (self.render)(&SlideView {
            page: self.page,
            total_pages: self.total_pages(),
            url: &self.config.images[self.page - 1],
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
                        "failed to edit slideshow message"
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
impl Menu for Slideshow {
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

    fn render() -> SlideRender {
        Box::new(|view| MessageContent::text(format!("{} ({}/{})", view.url, view.page, view.total_pages)))
    }

    #[test]
    fn rejects_empty_image_list() {
        let config = SlideshowConfig::new(menu_config(), Vec::new());
        let result = Slideshow::new(config, render(), no_final_action());
        assert!(matches!(result, Err(MenuError::NoItems)));
    }

    #[test]
    fn each_image_is_its_own_page() {
        let images = vec!["a.png".to_owned(), "b.png".to_owned(), "c.png".to_owned()];
        let slideshow =
            Slideshow::new(SlideshowConfig::new(menu_config(), images), render(), no_final_action())
                .unwrap();
        assert_eq!(slideshow.total_pages(), 3);
        assert_eq!(slideshow.render_current().text, "a.png (1/3)");
    }
}
