//! Category tables and detail views

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Category;

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Color")]
    color: String,
    #[tabled(rename = "Icon")]
    icon: String,
    #[tabled(rename = "Expenses")]
    expenses: usize,
}

/// Table of categories paired with how many expenses use each
pub fn format_category_table(categories: &[(Category, usize)]) -> String {
    if categories.is_empty() {
        return "No categories found.\n\nCreate one with 'moneytrack category create <NAME>'.\n"
            .to_string();
    }

    let rows = categories.iter().map(|(category, count)| CategoryRow {
        id: category.id.short(),
        name: category.name.clone(),
        color: category.color.clone(),
        icon: category.icon.clone(),
        expenses: *count,
    });

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}

pub fn format_category_details(category: &Category, expense_count: usize) -> String {
    let mut output = String::new();

    output.push_str(&format!("Category: {}\n", category.name));
    output.push_str(&format!("  ID:       {}\n", category.id.short()));
    output.push_str(&format!("  Color:    {}\n", category.color));
    output.push_str(&format!("  Icon:     {}\n", category.icon));
    output.push_str(&format!("  Expenses: {}\n", expense_count));

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table() {
        assert!(format_category_table(&[]).contains("No categories found"));
    }

    #[test]
    fn test_table_contents() {
        let pets = Category::with_style("Pets", "#8B5CF6", "paw");
        let table = format_category_table(&[(pets.clone(), 3)]);
        assert!(table.contains("Pets"));
        assert!(table.contains("#8B5CF6"));
        assert!(table.contains("paw"));
        assert!(table.contains(&pets.id.short()));
    }

    #[test]
    fn test_details() {
        let details = format_category_details(&Category::new("Travel"), 0);
        assert!(details.contains("Category: Travel"));
        assert!(details.contains("Expenses: 0"));
    }
}
