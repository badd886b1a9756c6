//! Utility functions.
//!
//! Formatting and page-scraping helpers used by the command handlers.

pub mod format;
pub mod html;

/// Whether a reply should be treated as a cancellation.
pub fn is_cancel(text: &str) -> bool {
    matches!(text.trim().to_lowercase().as_str(), "отмена" | "cancel")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_keywords_any_case() {
        assert!(is_cancel("Отмена"));
        assert!(is_cancel("CANCEL "));
        assert!(!is_cancel("отменить"));
    }
}
