use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use expense_tracker::cli::{
    handle_add, handle_delete, handle_export, handle_list, handle_show, handle_summary, AddArgs,
};
use expense_tracker::config::{ExpensePaths, Settings};
use expense_tracker::models::ExpenseId;
use expense_tracker::storage::Storage;

#[derive(Parser)]
#[command(
    name = "expense-tracker",
    version,
    about = "Personal expense tracker",
    long_about = "Expense Tracker records your expenses in a local SQLite database, \
                  exports them as a PDF table and charts spending by category."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a new expense
    Add(AddArgs),

    /// List all expenses, newest first
    #[command(alias = "ls")]
    List,

    /// Show a single expense
    Show {
        /// Expense ID
        id: ExpenseId,
    },

    /// Delete an expense
    #[command(alias = "rm")]
    Delete {
        /// Expense ID
        id: ExpenseId,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Export all expenses to a PDF report
    Export {
        /// Output file path (".pdf" is added when missing)
        output: PathBuf,
    },

    /// Show spending by category and save the pie chart
    Summary {
        /// Chart output path (default: ExpenseSummary.svg in the data directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the configured payment modes and categories
    Options,

    /// Show current configuration and paths
    Config,

    /// Create the data directory, settings file and database
    Init,
}

fn main() -> Result<()> {
    expense_tracker::init_tracing();
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = ExpensePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    // The store must open before any command runs
    let storage = Storage::open(&paths).context("Could not open the expense database")?;

    run(cli.command, &paths, &settings, &storage)?;

    storage.close()?;
    Ok(())
}

fn run(
    command: Option<Commands>,
    paths: &ExpensePaths,
    settings: &Settings,
    storage: &Storage,
) -> Result<()> {
    match command {
        Some(Commands::Add(args)) => handle_add(storage, settings, args)?,
        Some(Commands::List) => handle_list(storage, settings)?,
        Some(Commands::Show { id }) => handle_show(storage, settings, id)?,
        Some(Commands::Delete { id, force }) => handle_delete(storage, settings, id, force)?,
        Some(Commands::Export { output }) => {
            handle_export(storage, &output)?;
        }
        Some(Commands::Summary { output }) => {
            let output = output.unwrap_or_else(|| paths.summary_chart_file());
            handle_summary(storage, settings, &output)?;
        }
        Some(Commands::Options) => {
            println!("Payment modes:");
            for mode in &settings.payment_modes {
                println!("  {}", mode);
            }
            println!();
            println!("Categories:");
            for category in &settings.categories {
                println!("  {}", category);
            }
        }
        Some(Commands::Config) => {
            println!("Expense Tracker Configuration");
            println!("=============================");
            println!("Data directory: {}", paths.base_dir().display());
            match storage.path() {
                Some(path) => println!("Database:       {}", path.display()),
                None => println!("Database:       (in memory)"),
            }
            println!("Expenses:       {}", storage.expenses().count()?);
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Summary chart:  {}", paths.summary_chart_file().display());
            println!("Initialized:    {}", if paths.is_initialized() { "yes" } else { "no" });
            println!();
            println!("Settings:");
            println!("  Currency symbol: {:?}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!("  Payment modes:   {}", settings.payment_modes.len());
            println!("  Categories:      {}", settings.categories.len());
        }
        Some(Commands::Init) => {
            println!("Initializing Expense Tracker at: {}", paths.base_dir().display());
            settings.save(paths)?;
            println!("Database: {}", paths.database_file().display());
            println!("Settings: {}", paths.settings_file().display());
            println!("Initialization complete!");
            println!();
            println!("Run 'expense-tracker add --help' to record your first expense.");
        }
        None => {
            println!("Expense Tracker - personal expense tracking");
            println!();
            println!("Run 'expense-tracker --help' for usage information.");
        }
    }

    Ok(())
}
