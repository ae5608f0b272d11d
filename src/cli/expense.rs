//! Expense CLI commands

use clap::Subcommand;

use super::{parse_amount_arg, parse_date_arg};
use crate::clock::Clock;
use crate::config::settings::Settings;
use crate::display::expense::{format_expense_details, format_expense_table};
use crate::error::MoneyTrackResult;
use crate::models::{DateRange, TimeRange};
use crate::services::{
    CategoryService, CreateExpenseInput, ExpenseFilter, ExpenseService, UpdateExpenseInput,
};
use crate::storage::Storage;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// Amount (e.g., "12.50")
        amount: String,
        /// What the money was spent on
        description: String,
        /// Category name or ID
        #[arg(short, long)]
        category: String,
        /// Expense date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Free-form notes
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// List expenses, newest first
    List {
        /// Search description and notes
        #[arg(short, long)]
        search: Option<String>,
        /// Filter by category name or ID
        #[arg(short = 'C', long)]
        category: Option<String>,
        /// Restrict to a period: day, week, month, year or custom
        #[arg(short, long)]
        range: Option<String>,
        /// Start date for a custom range (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,
        /// End date for a custom range (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,
        /// Number of expenses to show
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show expense details
    Show {
        /// Expense ID
        id: String,
    },
    /// Edit an expense
    Edit {
        /// Expense ID
        id: String,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New category name or ID
        #[arg(short, long)]
        category: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// New notes
        #[arg(short, long)]
        notes: Option<String>,
        /// Remove the notes
        #[arg(long, conflicts_with = "notes")]
        clear_notes: bool,
    },
    /// Delete an expense
    Delete {
        /// Expense ID
        id: String,
    },
    /// Show the most recent expenses
    Recent {
        /// Number of expenses to show (defaults to the configured limit)
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    clock: &dyn Clock,
    cmd: ExpenseCommands,
) -> MoneyTrackResult<()> {
    let service = ExpenseService::new(storage);
    let categories = CategoryService::new(storage);
    let currency = settings.currency.as_str();

    match cmd {
        ExpenseCommands::Add {
            amount,
            description,
            category,
            date,
            notes,
        } => {
            let category = categories.require(&category)?;
            let date = match date {
                Some(value) => parse_date_arg(&value)?,
                None => clock.today(),
            };

            let expense = service.create(CreateExpenseInput {
                amount: parse_amount_arg(&amount)?,
                description,
                date,
                category_id: category.id,
                notes,
            })?;

            println!(
                "Added expense: {} {} ({})",
                expense.description,
                settings.currency.format(expense.amount),
                category.name
            );
            println!("  ID: {}", expense.id);
        }

        ExpenseCommands::List {
            search,
            category,
            range,
            start,
            end,
            limit,
        } => {
            let mut filter = ExpenseFilter::new();
            if let Some(term) = search {
                filter = filter.search(term);
            }
            if let Some(category) = category {
                filter = filter.category(categories.require(&category)?.id);
            }
            if let Some(token) = range {
                let start = start.as_deref().map(parse_date_arg).transpose()?;
                let end = end.as_deref().map(parse_date_arg).transpose()?;
                let range = TimeRange::from_token(&token, start, end)?;
                filter = filter.range(DateRange::resolve(&range, clock.now()));
            }
            if let Some(limit) = limit {
                filter = filter.limit(limit);
            }

            let expenses = service.list(filter)?;
            let categories = categories.list()?;
            print!(
                "{}",
                format_expense_table(&expenses, &categories, currency, &settings.date_format)
            );
        }

        ExpenseCommands::Show { id } => {
            let expense = service.require(&id)?;
            let category = categories.get(expense.category_id)?;
            print!(
                "{}",
                format_expense_details(&expense, category.as_ref(), currency, &settings.date_format)
            );
        }

        ExpenseCommands::Edit {
            id,
            amount,
            description,
            category,
            date,
            notes,
            clear_notes,
        } => {
            let expense = service.require(&id)?;

            if amount.is_none()
                && description.is_none()
                && category.is_none()
                && date.is_none()
                && notes.is_none()
                && !clear_notes
            {
                println!("No changes specified. Use --amount, --description, --category, --date,");
                println!("--notes or --clear-notes.");
                return Ok(());
            }

            let input = UpdateExpenseInput {
                amount: amount.as_deref().map(parse_amount_arg).transpose()?,
                description,
                date: date.as_deref().map(parse_date_arg).transpose()?,
                category_id: match category {
                    Some(category) => Some(categories.require(&category)?.id),
                    None => None,
                },
                notes: if clear_notes { Some(None) } else { notes.map(Some) },
            };

            let updated = service.update(expense.id, input)?;
            println!("Updated expense: {}", updated.description);
        }

        ExpenseCommands::Delete { id } => {
            let expense = service.require(&id)?;
            service.delete(expense.id)?;
            println!(
                "Deleted expense: {} ({})",
                expense.description,
                settings.currency.format(expense.amount)
            );
        }

        ExpenseCommands::Recent { limit } => {
            let expenses = service.recent(limit.unwrap_or(settings.recent_limit))?;
            let categories = categories.list()?;
            print!(
                "{}",
                format_expense_table(&expenses, &categories, currency, &settings.date_format)
            );
        }
    }

    Ok(())
}
