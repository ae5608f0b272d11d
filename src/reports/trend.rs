//! Calendar-aligned spending series
//!
//! Daily totals across a month (with a running cumulative series) and monthly
//! totals across a year. Every calendar bucket is present even when no
//! expense falls in it.

use chrono::{Datelike, NaiveDate};

use crate::models::range::{month_end, month_start, shift_months};
use crate::models::{format_amount, Expense, Money};

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Per-day totals for one calendar month
#[derive(Debug, Clone, PartialEq)]
pub struct DailyRollup {
    /// First day of the month
    pub month: NaiveDate,
    pub days: Vec<NaiveDate>,
    /// `daily[i]` is the spending on `days[i]`
    pub daily: Vec<Money>,
    /// `cumulative[i]` is the sum of `daily[0..=i]`
    pub cumulative: Vec<Money>,
}

impl DailyRollup {
    /// Roll up the month `offset` months from the month containing `today`
    ///
    /// Offset 0 is the current month and negative offsets look back. Positive
    /// offsets are computed like any other month.
    pub fn for_month(expenses: &[Expense], today: NaiveDate, offset: i32) -> Self {
        Self::for_month_starting(expenses, shift_months(today, offset))
    }

    /// Roll up the calendar month containing `month`
    pub fn for_month_starting(expenses: &[Expense], month: NaiveDate) -> Self {
        let first = month_start(month);
        let last = month_end(first);
        let days: Vec<NaiveDate> = first.iter_days().take_while(|d| *d <= last).collect();

        let daily: Vec<Money> = days
            .iter()
            .map(|day| {
                expenses
                    .iter()
                    .filter(|e| e.date == *day)
                    .map(|e| e.amount)
                    .sum::<Money>()
            })
            .collect();

        let cumulative = daily
            .iter()
            .scan(Money::zero(), |running, amount| {
                *running += *amount;
                Some(*running)
            })
            .collect();

        Self {
            month: first,
            days,
            daily,
            cumulative,
        }
    }

    pub fn total(&self) -> Money {
        self.cumulative.last().copied().unwrap_or_default()
    }

    /// e.g. "March 2024"
    pub fn title(&self) -> String {
        self.month.format("%B %Y").to_string()
    }

    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Daily Spending: {}\n", self.title()));
        output.push_str(&"=".repeat(48));
        output.push('\n');
        output.push_str(&format!("{:<12} {:>16} {:>16}\n", "Date", "Spent", "Cumulative"));
        output.push_str(&"-".repeat(48));
        output.push('\n');

        for ((day, amount), running) in self.days.iter().zip(&self.daily).zip(&self.cumulative) {
            output.push_str(&format!(
                "{:<12} {:>16} {:>16}\n",
                day.format("%b %d"),
                format_amount(*amount, currency),
                format_amount(*running, currency)
            ));
        }

        output.push_str(&"-".repeat(48));
        output.push('\n');
        output.push_str(&format!(
            "{:<12} {:>16}\n",
            "TOTAL",
            format_amount(self.total(), currency)
        ));

        output
    }
}

/// Per-month totals for one calendar year
#[derive(Debug, Clone, PartialEq)]
pub struct YearlyRollup {
    pub year: i32,
    /// Twelve totals, January first
    pub months: Vec<Money>,
    pub total: Money,
    /// Total divided by the number of months with spending; zero if none
    pub average: Money,
}

impl YearlyRollup {
    /// Roll up the year containing `today`
    pub fn for_current_year(expenses: &[Expense], today: NaiveDate) -> Self {
        Self::for_year(expenses, today.year())
    }

    pub fn for_year(expenses: &[Expense], year: i32) -> Self {
        let mut months = vec![Money::zero(); 12];
        for expense in expenses.iter().filter(|e| e.date.year() == year) {
            months[expense.date.month0() as usize] += expense.amount;
        }

        let total: Money = months.iter().sum();
        let active_months = months.iter().filter(|m| m.is_positive()).count();
        let average = if active_months == 0 {
            Money::zero()
        } else {
            let cents = total.cents() as f64 / active_months as f64;
            Money::from_cents(cents.round() as i64)
        };

        Self {
            year,
            months,
            total,
            average,
        }
    }

    /// Number of months with any spending
    pub fn active_months(&self) -> usize {
        self.months.iter().filter(|m| m.is_positive()).count()
    }

    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Yearly Overview: {}\n", self.year));
        output.push_str(&"=".repeat(32));
        output.push('\n');

        for (name, amount) in MONTH_NAMES.iter().zip(&self.months) {
            output.push_str(&format!(
                "{:<8} {:>22}\n",
                name,
                format_amount(*amount, currency)
            ));
        }

        output.push_str(&"-".repeat(32));
        output.push('\n');
        output.push_str(&format!(
            "{:<8} {:>22}\n",
            "Total",
            format_amount(self.total, currency)
        ));
        output.push_str(&format!(
            "{:<8} {:>22}\n",
            "Average",
            format_amount(self.average, currency)
        ));

        output
    }
}
