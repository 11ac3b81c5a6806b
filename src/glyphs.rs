//! Reaction glyph inventory and typed-input parsing.
//!
//! A glyph doubles as an affordance: attaching it to a message advertises
//! the input, and a matching reaction-added event selects it. Typed input
//! covers the same actions for channels where reactions are unavailable.

/// Navigate one page toward page 1.
pub const LEFT: &str = "◀";
/// Navigate one page toward the last page.
pub const RIGHT: &str = "▶";
/// Bulk-skip toward page 1.
pub const BIG_LEFT: &str = "⏪";
/// Bulk-skip toward the last page.
pub const BIG_RIGHT: &str = "⏩";
/// End the menu and run its terminal action.
pub const STOP: &str = "⏹";
/// Cancel affordance for choice and updating menus.
pub const CANCEL: &str = "❌";

/// Keycap selector glyphs for up to ten enumerated choices.
pub const NUMBERS: [&str; 10] = ["1️⃣", "2️⃣", "3️⃣", "4️⃣", "5️⃣", "6️⃣", "7️⃣", "8️⃣", "9️⃣", "🔟"];

/// Regional-indicator selector glyphs for lettered choice lists.
pub const LETTERS: [&str; 10] = ["🇦", "🇧", "🇨", "🇩", "🇪", "🇫", "🇬", "🇭", "🇮", "🇯"];

/// A single qualifying navigation input, from either input mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavInput {
    Left,
    Right,
    BigLeft,
    BigRight,
    Stop,
    /// Direct jump to a 1-based page.
    Jump(usize),
}

/// Map a reaction emoji onto a navigation action.
///
/// Bulk-skip glyphs only qualify when the menu offers bulk skipping.
pub fn nav_from_reaction(emoji: &str, bulk_enabled: bool) -> Option<NavInput> {
    match emoji {
        LEFT => Some(NavInput::Left),
        RIGHT => Some(NavInput::Right),
        STOP => Some(NavInput::Stop),
        BIG_LEFT if bulk_enabled => Some(NavInput::BigLeft),
        BIG_RIGHT if bulk_enabled => Some(NavInput::BigRight),
        _ => None,
    }
}

/// Parse typed text into a navigation action.
///
/// Accepts the configured left/right keywords and a bare page number in
/// `1..=total_pages`. Anything else does not qualify.
pub fn nav_from_text(
    content: &str,
    left_word: Option<&str>,
    right_word: Option<&str>,
    total_pages: usize,
) -> Option<NavInput> {
    let trimmed = content.trim();

    if left_word.is_some_and(|word| trimmed.eq_ignore_ascii_case(word)) {
        return Some(NavInput::Left);
    }
    if right_word.is_some_and(|word| trimmed.eq_ignore_ascii_case(word)) {
        return Some(NavInput::Right);
    }

    trimmed
        .parse::<usize>()
        .ok()
        .filter(|page| *page >= 1 && *page <= total_pages)
        .map(NavInput::Jump)
}

/// Selector glyphs for an ordered menu of `count` choices.
pub fn choice_glyphs(count: usize, lettered: bool) -> &'static [&'static str] {
    let set: &'static [&'static str] = if lettered { &LETTERS } else { &NUMBERS };
    &set[..count.min(set.len())]
}

/// Map a selector emoji onto a 0-based choice index.
pub fn choice_from_reaction(emoji: &str, count: usize, lettered: bool) -> Option<usize> {
    choice_glyphs(count, lettered)
        .iter()
        .position(|glyph| *glyph == emoji)
}

/// Parse typed text into a 0-based choice index.
///
/// Accepts a 1-based integer or the exact label text.
pub fn choice_from_text(content: &str, labels: &[String]) -> Option<usize> {
    let trimmed = content.trim();

    if let Ok(index) = trimmed.parse::<usize>()
        && index >= 1
        && index <= labels.len()
    {
        return Some(index - 1);
    }

    labels.iter().position(|label| label == trimmed)
}
