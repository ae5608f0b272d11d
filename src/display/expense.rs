//! Expense tables and detail views

use std::collections::HashMap;

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{format_amount, Category, CategoryId, Expense};

use super::truncate;

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Label for an expense's category, flagging references to deleted ones
pub fn category_label(expense: &Expense, categories: &HashMap<CategoryId, &Category>) -> String {
    categories
        .get(&expense.category_id)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| "(unknown)".to_string())
}

/// Table of expenses with amounts in `currency` and dates in `date_format`
pub fn format_expense_table(
    expenses: &[Expense],
    categories: &[Category],
    currency: &str,
    date_format: &str,
) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let lookup: HashMap<CategoryId, &Category> = categories.iter().map(|c| (c.id, c)).collect();

    let rows = expenses.iter().map(|expense| ExpenseRow {
        id: expense.id.short(),
        date: expense.date.format(date_format).to_string(),
        description: truncate(&expense.description, 32),
        category: category_label(expense, &lookup),
        amount: format_amount(expense.amount, currency),
    });

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}

pub fn format_expense_details(
    expense: &Expense,
    category: Option<&Category>,
    currency: &str,
    date_format: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense: {}\n", expense.id.short()));
    output.push_str(&format!("  Description: {}\n", expense.description));
    output.push_str(&format!(
        "  Amount:      {}\n",
        format_amount(expense.amount, currency)
    ));
    output.push_str(&format!("  Date:        {}\n", expense.date.format(date_format)));
    match category {
        Some(category) => output.push_str(&format!("  Category:    {}\n", category.name)),
        None => output.push_str("  Category:    (unknown)\n"),
    }
    if let Some(notes) = &expense.notes {
        output.push_str(&format!("  Notes:       {}\n", notes));
    }

    output.push('\n');
    output.push_str(&format!("  Full ID:  {}\n", expense.id.as_uuid()));
    output.push_str(&format!(
        "  Created:  {}\n",
        expense.created_at.format("%Y-%m-%d %H:%M UTC")
    ));
    output.push_str(&format!(
        "  Modified: {}\n",
        expense.updated_at.format("%Y-%m-%d %H:%M UTC")
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;

    fn sample() -> (Expense, Category) {
        let category = Category::new("Food & Dining");
        let expense = Expense::new(
            Money::from_cents(123456),
            "Anniversary dinner",
            NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
            category.id,
        )
        .with_notes("Booked weeks ahead");
        (expense, category)
    }

    #[test]
    fn test_empty_table() {
        assert!(format_expense_table(&[], &[], "USD", "%Y-%m-%d").contains("No expenses"));
    }

    #[test]
    fn test_table_contents() {
        let (expense, category) = sample();
        let table = format_expense_table(&[expense.clone()], &[category], "USD", "%b %-d, %Y");

        assert!(table.contains("Description"));
        assert!(table.contains(&expense.id.short()));
        assert!(table.contains("Mar 9, 2024"));
        assert!(table.contains("Food & Dining"));
        assert!(table.contains("$1,234.56"));
    }

    #[test]
    fn test_unknown_category_is_flagged() {
        let (expense, _) = sample();
        let table = format_expense_table(&[expense], &[], "EUR", "%Y-%m-%d");
        assert!(table.contains("(unknown)"));
        assert!(table.contains("€1,234.56"));
    }

    #[test]
    fn test_details() {
        let (expense, category) = sample();
        let details = format_expense_details(&expense, Some(&category), "GBP", "%Y-%m-%d");
        assert!(details.contains("Anniversary dinner"));
        assert!(details.contains("£1,234.56"));
        assert!(details.contains("2024-03-09"));
        assert!(details.contains("Booked weeks ahead"));
    }
}
