use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use moneytrack::cli::{
    handle_audit_command, handle_category_command, handle_export_command, handle_expense_command,
    handle_report_command, handle_settings_command, CategoryCommands, ExpenseCommands, ExportArgs,
    ReportCommands, SettingsCommands,
};
use moneytrack::clock::SystemClock;
use moneytrack::config::{paths::MoneyTrackPaths, settings::Settings};
use moneytrack::storage::Storage;

#[derive(Parser)]
#[command(
    name = "moneytrack",
    version,
    about = "Terminal-based personal expense tracker",
    long_about = "MoneyTrack records everyday expenses, groups them into categories \
                  and shows where the money went: category breakdowns for any \
                  period, daily and monthly trends, and month-over-month summaries."
)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Expense management commands
    #[command(subcommand, alias = "exp")]
    Expense(ExpenseCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Spending reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Show or change preferences
    #[command(subcommand)]
    Settings(SettingsCommands),

    /// Export all data
    Export(ExportArgs),

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Initialize the data directory and default categories
    Init,

    /// Show current configuration and paths
    Config,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("moneytrack=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Initialize paths and settings
    let paths = MoneyTrackPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;
    tracing::debug!(base_dir = %paths.base_dir().display(), "storage loaded");

    let clock = SystemClock;

    match cli.command {
        Some(Commands::Expense(cmd)) => {
            handle_expense_command(&storage, &settings, &clock, cmd)?;
        }
        Some(Commands::Category(cmd)) => {
            handle_category_command(&storage, cmd)?;
        }
        Some(Commands::Report(cmd)) => {
            handle_report_command(&storage, &settings, &clock, cmd)?;
        }
        Some(Commands::Settings(cmd)) => {
            handle_settings_command(&storage, &paths, &mut settings, cmd)?;
        }
        Some(Commands::Export(args)) => {
            handle_export_command(&storage, &settings, args)?;
        }
        Some(Commands::Audit { limit }) => {
            handle_audit_command(&storage, limit)?;
        }
        Some(Commands::Init) => {
            println!("Initializing MoneyTrack at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            storage.save_all()?;
            println!("Initialization complete!");
            println!();
            println!("Categories:");
            for category in storage.categories.get_all()? {
                println!("  - {}", category.name);
            }
            println!();
            println!("Record an expense with:");
            println!("  moneytrack expense add <AMOUNT> <DESCRIPTION> -c <CATEGORY>");
        }
        Some(Commands::Config) => {
            println!("MoneyTrack Configuration");
            println!("========================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!("Initialized:    {}", paths.is_initialized());
            println!();
            println!("Settings:");
            println!("  Theme:    {}", settings.theme_mode);
            println!("  Currency: {}", settings.currency);
        }
        None => {
            println!("MoneyTrack - Terminal-based personal expense tracker");
            println!();
            println!("Run 'moneytrack --help' for usage information.");
        }
    }

    Ok(())
}
