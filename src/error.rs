use thiserror::Error;

/// Validation failures raised when constructing a menu.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MenuError {
    #[error("a paginated menu needs at least one item")]
    NoItems,
    #[error("items_per_page must be at least 1")]
    ZeroItemsPerPage,
    #[error("an ordered menu needs at least one choice")]
    NoChoices,
    #[error("an ordered menu supports at most {max} choices, got {got}")]
    TooManyChoices { max: usize, got: usize },
    #[error("navigation keywords require allow_text_input")]
    KeywordsWithoutTextInput,
    #[error("start_page {page} is outside 1..={total_pages}")]
    StartPageOutOfRange { page: usize, total_pages: usize },
    #[error("refresh interval must be non-zero")]
    ZeroInterval,
}
