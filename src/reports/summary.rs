//! Month-over-month dashboard summary

use chrono::NaiveDate;

use crate::models::{format_amount, DateRange, Expense, Money};
use crate::models::range::shift_months;

use super::breakdown::{expenses_in_range, total_amount};

/// Current month against the previous one
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySummary {
    pub current_period: DateRange,
    pub current_total: Money,
    pub current_count: usize,
    pub previous_total: Money,
    pub previous_count: usize,
    /// Change from the previous month in percent, one decimal; 0 when the
    /// previous month had no spending
    pub change_percent: f64,
    /// Sum of every stored expense
    pub all_time_total: Money,
}

impl MonthlySummary {
    pub fn generate(expenses: &[Expense], today: NaiveDate) -> Self {
        let current_period = DateRange::for_month(today);
        let previous_period = DateRange::for_month(shift_months(today, -1));

        let current = expenses_in_range(expenses, &current_period);
        let previous = expenses_in_range(expenses, &previous_period);

        let current_total = total_amount(&current);
        let previous_total = total_amount(&previous);

        Self {
            current_period,
            current_total,
            current_count: current.len(),
            previous_total,
            previous_count: previous.len(),
            change_percent: change_percent(current_total, previous_total),
            all_time_total: total_amount(expenses),
        }
    }

    pub fn format_terminal(&self, currency: &str) -> String {
        let month = self.current_period.start_date().format("%B %Y");
        let direction = if self.change_percent > 0.0 {
            "up"
        } else if self.change_percent < 0.0 {
            "down"
        } else {
            "flat"
        };

        let mut output = String::new();
        output.push_str(&format!("Summary for {}\n", month));
        output.push_str(&"=".repeat(40));
        output.push('\n');
        output.push_str(&format!(
            "This month:   {} ({} expenses)\n",
            format_amount(self.current_total, currency),
            self.current_count
        ));
        output.push_str(&format!(
            "Last month:   {} ({} expenses)\n",
            format_amount(self.previous_total, currency),
            self.previous_count
        ));
        output.push_str(&format!(
            "Change:       {:+.1}% ({})\n",
            self.change_percent, direction
        ));
        output.push_str(&format!(
            "All time:     {}\n",
            format_amount(self.all_time_total, currency)
        ));
        output
    }
}

/// Percent change from `previous` to `current`, rounded to one decimal
pub fn change_percent(current: Money, previous: Money) -> f64 {
    if previous.is_zero() {
        return 0.0;
    }
    let raw = (current.cents() - previous.cents()) as f64 / previous.cents() as f64 * 100.0;
    (raw * 10.0).round() / 10.0
}
