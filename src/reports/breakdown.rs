//! Category breakdown
//!
//! Groups expenses by category and computes each category's share of the
//! total. [`group_by_category`] is the pure aggregation; the report wraps it
//! with range resolution and output formatting.

use std::collections::HashMap;
use std::io::Write;

use chrono::NaiveDateTime;

use crate::error::{MoneyTrackError, MoneyTrackResult};
use crate::models::{format_amount, Category, CategoryId, DateRange, Expense, Money, TimeRange};

/// Summed spending for one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: Money,
    /// Share of the grand total, rounded to one decimal place
    pub percentage: f64,
    pub expense_count: usize,
}

/// Sum of every expense amount
pub fn total_amount(expenses: &[Expense]) -> Money {
    expenses.iter().map(|e| e.amount).sum()
}

/// `part` as a percentage of `whole`, rounded to one decimal; 0 when `whole` is 0
pub fn percentage_of(part: Money, whole: Money) -> f64 {
    if whole.is_zero() {
        return 0.0;
    }
    let raw = part.cents() as f64 / whole.cents() as f64 * 100.0;
    (raw * 10.0).round() / 10.0
}

/// Expenses whose date falls inside `range`, in input order
pub fn expenses_in_range(expenses: &[Expense], range: &DateRange) -> Vec<Expense> {
    expenses
        .iter()
        .filter(|e| range.contains_date(e.date))
        .cloned()
        .collect()
}

/// One total per known category, largest first
///
/// Every category appears, including those with no expenses. Expenses whose
/// category is unknown add to no bucket but still count toward the grand
/// total used for percentages. Equal totals keep category order.
pub fn group_by_category(expenses: &[Expense], categories: &[Category]) -> Vec<CategoryTotal> {
    let mut sums: HashMap<CategoryId, (Money, usize)> = categories
        .iter()
        .map(|c| (c.id, (Money::zero(), 0)))
        .collect();

    for expense in expenses {
        if let Some((sum, count)) = sums.get_mut(&expense.category_id) {
            *sum += expense.amount;
            *count += 1;
        }
    }

    let grand_total = total_amount(expenses);

    let mut totals: Vec<CategoryTotal> = categories
        .iter()
        .map(|category| {
            let (total, expense_count) = sums
                .get(&category.id)
                .copied()
                .unwrap_or((Money::zero(), 0));
            CategoryTotal {
                category: category.clone(),
                total,
                percentage: percentage_of(total, grand_total),
                expense_count,
            }
        })
        .collect();

    totals.sort_by(|a, b| b.total.cmp(&a.total));
    totals
}

/// Category breakdown for one resolved range
#[derive(Debug, Clone)]
pub struct CategoryBreakdownReport {
    pub range: TimeRange,
    pub period: DateRange,
    pub rows: Vec<CategoryTotal>,
    /// Sum of every expense in the period
    pub total: Money,
    pub expense_count: usize,
    /// Expenses in the period whose category no longer exists
    pub uncategorized_total: Money,
    pub uncategorized_count: usize,
}

impl CategoryBreakdownReport {
    pub fn generate(
        expenses: &[Expense],
        categories: &[Category],
        range: TimeRange,
        now: NaiveDateTime,
    ) -> Self {
        let period = DateRange::resolve(&range, now);
        let in_range = expenses_in_range(expenses, &period);
        let rows = group_by_category(&in_range, categories);

        let (uncategorized_total, uncategorized_count) = in_range
            .iter()
            .filter(|e| !categories.iter().any(|c| c.id == e.category_id))
            .fold((Money::zero(), 0), |(sum, n), e| (sum + e.amount, n + 1));

        if uncategorized_count > 0 {
            tracing::warn!(
                count = uncategorized_count,
                "expenses reference categories that no longer exist"
            );
        }

        Self {
            range,
            period,
            total: total_amount(&in_range),
            expense_count: in_range.len(),
            rows,
            uncategorized_total,
            uncategorized_count,
        }
    }

    /// Rows with at least one expense
    pub fn non_empty_rows(&self) -> impl Iterator<Item = &CategoryTotal> {
        self.rows.iter().filter(|row| row.expense_count > 0)
    }

    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Spending by Category: {} ({})\n",
            self.range.label(),
            self.period
        ));
        output.push_str(&"=".repeat(64));
        output.push('\n');
        output.push_str(&format!(
            "{:<30} {:>15} {:>8} {:>7}\n",
            "Category", "Amount", "Count", "%"
        ));
        output.push_str(&"-".repeat(64));
        output.push('\n');

        for row in &self.rows {
            output.push_str(&format!(
                "{:<30} {:>15} {:>8} {:>6.1}%\n",
                row.category.name,
                format_amount(row.total, currency),
                row.expense_count,
                row.percentage
            ));
        }

        if self.uncategorized_count > 0 {
            output.push_str(&format!(
                "{:<30} {:>15} {:>8}\n",
                "UNCATEGORIZED",
                format_amount(self.uncategorized_total, currency),
                self.uncategorized_count
            ));
        }

        output.push_str(&"-".repeat(64));
        output.push('\n');
        output.push_str(&format!(
            "{:<30} {:>15} {:>8}\n",
            "TOTAL",
            format_amount(self.total, currency),
            self.expense_count
        ));

        output
    }

    pub fn export_csv<W: Write>(&self, writer: W) -> MoneyTrackResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        let start = self.period.start_date().to_string();
        let end = self.period.end_date().to_string();
        let record = |category: &str, amount: Money, count: usize, percentage: String| {
            [
                start.clone(),
                end.clone(),
                category.to_string(),
                amount.to_string(),
                count.to_string(),
                percentage,
            ]
        };

        csv.write_record([
            "Start Date",
            "End Date",
            "Category",
            "Amount",
            "Expense Count",
            "Percentage",
        ])
        .map_err(export_error)?;

        for row in &self.rows {
            csv.write_record(record(
                &row.category.name,
                row.total,
                row.expense_count,
                format!("{:.1}", row.percentage),
            ))
            .map_err(export_error)?;
        }

        if self.uncategorized_count > 0 {
            csv.write_record(record(
                "UNCATEGORIZED",
                self.uncategorized_total,
                self.uncategorized_count,
                String::new(),
            ))
            .map_err(export_error)?;
        }

        let total_share = if self.total.is_zero() { "0.0" } else { "100.0" };
        csv.write_record(record(
            "TOTAL",
            self.total,
            self.expense_count,
            total_share.to_string(),
        ))
        .map_err(export_error)?;

        csv.flush()
            .map_err(|e| MoneyTrackError::Export(e.to_string()))
    }
}

fn export_error(err: csv::Error) -> MoneyTrackError {
    MoneyTrackError::Export(err.to_string())
}
