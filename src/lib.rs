//! Reaction-driven interactive menus for Discord bots.
//!
//! A menu renders a message, attaches reaction affordances (and optionally
//! accepts typed replies), then drives a multi-turn conversation with a
//! remote user over an unreliable event stream, subject to timeouts,
//! cancellation, and authorization. The host bot feeds inbound gateway
//! events into a shared [`EventWaiter`]; menus register awaits against it
//! and suspend until the next qualifying input.
//!
//! Variants: [`Paginator`] (paged item list), [`OrderedMenu`] (numbered
//! choices bound to actions), [`Slideshow`] (one image per page), and
//! [`UpdatingMenu`] (timer-refreshed display with a cancel affordance).

/// Default timeout for menu wait loops.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Seam to the chat platform (send/edit/react operations).
pub mod client;
/// Shared menu configuration and the authorization predicate.
pub mod config;
/// Construction-time validation errors.
pub mod error;
/// Inbound event model consumed by the waiter.
pub mod event;
/// Reaction glyph inventory and typed-input parsing.
pub mod glyphs;
/// Shared menu trait and terminal-action plumbing.
pub mod menu;
/// Single-shot menu of labeled choices.
pub mod ordered;
/// Pure pagination math.
pub mod page;
/// Paged list menu.
pub mod paginator;
/// Image slideshow menu.
pub mod slideshow;
/// Timer-refreshed display.
pub mod updating;
/// Event multiplexer for awaiting qualifying inputs.
pub mod waiter;

pub use client::{ChatClient, ClientError, MessageContent, MessageRef, NoopChatClient};
pub use config::MenuConfig;
pub use error::MenuError;
pub use event::{Actor, EventKind, MenuEvent, MessageEvent, ReactionEvent};
pub use menu::{FinalAction, Menu, final_action, no_final_action};
pub use ordered::{Choice, MAX_CHOICES, OrderedMenu, OrderedMenuConfig};
pub use paginator::{PageView, Paginator, PaginatorConfig};
pub use slideshow::{SlideView, Slideshow, SlideshowConfig};
pub use updating::{UpdatingMenu, UpdatingMenuConfig};
pub use waiter::{AwaitHandle, EventWaiter, PendingWait, WaitOutcome};
