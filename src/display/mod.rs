//! Terminal formatting for expenses and categories

pub mod category;
pub mod expense;

pub use category::{format_category_details, format_category_table};
pub use expense::{format_expense_details, format_expense_table};

/// Shorten `text` to at most `max` characters, marking the cut with `...`
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let head: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", head)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a much longer description", 10), "a much ...");
        assert_eq!(truncate("ééééééééééé", 5), "éé...");
    }
}
