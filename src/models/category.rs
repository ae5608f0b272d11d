//! Category model
//!
//! Categories label expenses. Color and icon are presentation-only; the name
//! must be unique (case-insensitively), which the category service enforces.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;

/// Color assigned to categories created without one
pub const DEFAULT_CATEGORY_COLOR: &str = "#0D9488";

/// Icon tag assigned to categories created without one
pub const DEFAULT_CATEGORY_ICON: &str = "tag";

/// Colors offered when creating or editing a category
pub const CATEGORY_COLOR_PALETTE: &[&str] = &[
    "#0D9488", // teal
    "#8B5CF6", // purple
    "#F59E0B", // yellow
    "#EF4444", // red
    "#10B981", // green
    "#3B82F6", // blue
    "#EC4899", // pink
    "#6B7280", // gray
];

const MAX_NAME_LEN: usize = 50;

/// An expense category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,

    /// Display name, unique among categories ignoring case
    pub name: String,

    /// `#RRGGBB` color used when presenting the category
    #[serde(default = "default_color")]
    pub color: String,

    /// Icon tag used when presenting the category
    #[serde(default = "default_icon")]
    pub icon: String,
}

fn default_color() -> String {
    DEFAULT_CATEGORY_COLOR.to_string()
}

fn default_icon() -> String {
    DEFAULT_CATEGORY_ICON.to_string()
}

impl Category {
    /// Create a new category with the default color and icon
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            color: default_color(),
            icon: default_icon(),
        }
    }

    pub fn with_style(name: impl Into<String>, color: &str, icon: &str) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            color: color.to_string(),
            icon: icon.to_string(),
        }
    }

    /// Case-insensitive name comparison used for uniqueness checks
    pub fn name_matches(&self, name: &str) -> bool {
        self.name.trim().to_lowercase() == name.trim().to_lowercase()
    }

    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if name.chars().count() > MAX_NAME_LEN {
            return Err(CategoryValidationError::NameTooLong(name.chars().count()));
        }

        if !is_hex_color(&self.color) {
            return Err(CategoryValidationError::InvalidColor(self.color.clone()));
        }

        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Check for a `#RRGGBB` color
pub fn is_hex_color(color: &str) -> bool {
    color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Categories seeded into a fresh store: (name, color, icon)
pub const DEFAULT_CATEGORIES: &[(&str, &str, &str)] = &[
    ("Food & Dining", "#0D9488", "utensils"),
    ("Transportation", "#8B5CF6", "car"),
    ("Shopping", "#F59E0B", "shopping-bag"),
    ("Entertainment", "#EC4899", "film"),
    ("Housing", "#3B82F6", "home"),
    ("Utilities", "#10B981", "plug"),
    ("Healthcare", "#EF4444", "heart"),
    ("Other", "#6B7280", "more-horizontal"),
];

/// Build the default category set with fresh IDs
pub fn default_categories() -> Vec<Category> {
    DEFAULT_CATEGORIES
        .iter()
        .map(|(name, color, icon)| Category::with_style(*name, color, icon))
        .collect()
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
    InvalidColor(String),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name is required"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max {})", len, MAX_NAME_LEN)
            }
            Self::InvalidColor(color) => {
                write!(f, "Invalid color '{}': expected #RRGGBB", color)
            }
        }
    }
}

impl std::error::Error for CategoryValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_category() {
        let category = Category::new("Groceries");
        assert_eq!(category.name, "Groceries");
        assert_eq!(category.color, DEFAULT_CATEGORY_COLOR);
        assert_eq!(category.icon, DEFAULT_CATEGORY_ICON);
    }

    #[test]
    fn test_validation() {
        let mut category = Category::new("Valid");
        assert!(category.validate().is_ok());

        category.name = "   ".to_string();
        assert_eq!(category.validate(), Err(CategoryValidationError::EmptyName));

        category.name = "a".repeat(51);
        assert!(matches!(
            category.validate(),
            Err(CategoryValidationError::NameTooLong(51))
        ));

        category.name = "Valid".to_string();
        category.color = "teal".to_string();
        assert!(matches!(
            category.validate(),
            Err(CategoryValidationError::InvalidColor(_))
        ));
    }

    #[test]
    fn test_name_matches_ignores_case() {
        let category = Category::new("Food & Dining");
        assert!(category.name_matches("food & dining"));
        assert!(category.name_matches("  FOOD & DINING "));
        assert!(!category.name_matches("Food"));
    }

    #[test]
    fn test_hex_color() {
        assert!(is_hex_color("#0D9488"));
        assert!(is_hex_color("#abcdef"));
        assert!(!is_hex_color("0D9488"));
        assert!(!is_hex_color("#0D948"));
        assert!(!is_hex_color("#GGGGGG"));
    }

    #[test]
    fn test_default_categories() {
        let defaults = default_categories();
        assert_eq!(defaults.len(), 8);
        assert_eq!(defaults[0].name, "Food & Dining");
        assert_eq!(defaults[7].name, "Other");
        assert!(defaults.iter().all(|c| c.validate().is_ok()));
    }

    #[test]
    fn test_missing_style_fields_use_defaults() {
        let json = r#"{"id":"550e8400-e29b-41d4-a716-446655440000","name":"Pets"}"#;
        let category: Category = serde_json::from_str(json).unwrap();
        assert_eq!(category.color, DEFAULT_CATEGORY_COLOR);
        assert_eq!(category.icon, DEFAULT_CATEGORY_ICON);
    }
}
