//! CLI commands for reports
//!
//! Every report is computed from a snapshot of the stored collections and
//! the current time from the injected clock.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Subcommand;

use super::parse_date_arg;
use crate::clock::Clock;
use crate::config::settings::Settings;
use crate::error::{MoneyTrackError, MoneyTrackResult};
use crate::models::TimeRange;
use crate::reports::{CategoryBreakdownReport, DailyRollup, MonthlySummary, YearlyRollup};
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// This month against last month
    Summary,

    /// Spending by category for a period
    #[command(alias = "categories")]
    Breakdown {
        /// Period: day, week, month, year or custom
        #[arg(short, long, default_value = "month")]
        range: String,

        /// Start date for a custom range (YYYY-MM-DD)
        #[arg(short, long)]
        start: Option<String>,

        /// End date for a custom range (YYYY-MM-DD)
        #[arg(short, long)]
        end: Option<String>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Daily and cumulative spending for one month
    Monthly {
        /// Months back from the current one (0 or negative)
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        offset: i32,
    },

    /// Monthly totals for the current year
    Yearly,
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    clock: &dyn Clock,
    cmd: ReportCommands,
) -> MoneyTrackResult<()> {
    let expenses = storage.expenses.get_all()?;
    let currency = settings.currency.as_str();

    match cmd {
        ReportCommands::Summary => {
            let summary = MonthlySummary::generate(&expenses, clock.today());
            println!("{}", summary.format_terminal(currency));
        }

        ReportCommands::Breakdown {
            range,
            start,
            end,
            output,
        } => {
            let start = start.as_deref().map(parse_date_arg).transpose()?;
            let end = end.as_deref().map(parse_date_arg).transpose()?;
            let range = TimeRange::from_token(&range, start, end)?;

            let categories = storage.categories.get_all()?;
            let report =
                CategoryBreakdownReport::generate(&expenses, &categories, range, clock.now());

            match output {
                Some(path) => {
                    let file = File::create(&path).map_err(|e| {
                        MoneyTrackError::Export(format!(
                            "Failed to create file {}: {}",
                            path.display(),
                            e
                        ))
                    })?;
                    report.export_csv(BufWriter::new(file))?;
                    println!("Category breakdown exported to: {}", path.display());
                }
                None => println!("{}", report.format_terminal(currency)),
            }
        }

        ReportCommands::Monthly { offset } => {
            if offset > 0 {
                return Err(MoneyTrackError::Validation(format!(
                    "Offset must be 0 or negative, got {}",
                    offset
                )));
            }
            let rollup = DailyRollup::for_month(&expenses, clock.today(), offset);
            println!("{}", rollup.format_terminal(currency));
        }

        ReportCommands::Yearly => {
            let rollup = YearlyRollup::for_current_year(&expenses, clock.today());
            println!("{}", rollup.format_terminal(currency));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::NaiveDate;

    fn create_test_storage() -> Storage {
        let storage = Storage::in_memory();
        storage.load_all().unwrap();
        storage
    }

    #[test]
    fn test_monthly_rejects_positive_offset() {
        let storage = create_test_storage();
        let clock = FixedClock::on(NaiveDate::from_ymd_opt(2024, 3, 14).unwrap());

        let err = handle_report_command(
            &storage,
            &Settings::default(),
            &clock,
            ReportCommands::Monthly { offset: 1 },
        )
        .unwrap_err();
        assert!(err.is_validation());

        assert!(handle_report_command(
            &storage,
            &Settings::default(),
            &clock,
            ReportCommands::Monthly { offset: -2 },
        )
        .is_ok());
    }

    #[test]
    fn test_breakdown_csv_output() {
        let storage = create_test_storage();
        let clock = FixedClock::on(NaiveDate::from_ymd_opt(2024, 3, 14).unwrap());
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("breakdown.csv");

        handle_report_command(
            &storage,
            &Settings::default(),
            &clock,
            ReportCommands::Breakdown {
                range: "week".into(),
                start: None,
                end: None,
                output: Some(path.clone()),
            },
        )
        .unwrap();

        let csv = std::fs::read_to_string(path).unwrap();
        assert!(csv.contains("2024-03-11,2024-03-17,TOTAL,0.00,0,0.0"));
    }
}
