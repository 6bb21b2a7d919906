use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use tally_cli::cli::{
    handle_add_command, handle_category_command, handle_config_command, handle_export_command,
    handle_report_command, handle_summary_command, handle_transaction_command,
};
use tally_cli::config::{Settings, TallyPaths};
use tally_cli::storage::{initialize_storage, needs_initialization, Storage};

#[derive(Parser)]
#[command(
    name = "tally",
    version,
    about = "Terminal-based personal finance tracker",
    long_about = "Tally tracks income and expenses against named categories. \
                  Record transactions from the command line, browse and edit \
                  them in the TUI, and export per-type reports as text or CSV."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive TUI
    #[command(alias = "ui")]
    Tui,

    /// Initialize storage and create default categories
    Init,

    /// Add a transaction (shorthand for 'transaction add')
    Add {
        /// Transaction type (income or expense)
        kind: String,

        /// Amount (e.g., 42.50)
        amount: String,

        /// Category name
        category: String,

        /// Optional description
        #[arg(short = 'D', long)]
        description: Option<String>,

        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(tally_cli::cli::TransactionCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(tally_cli::cli::CategoryCommands),

    /// Show income, expense, and balance totals
    Summary,

    /// Export a report for one transaction type
    Report {
        /// Transaction type to report on (income or expense)
        kind: String,

        /// Output file path (defaults to a dated name in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Report format (text or csv)
        #[arg(short, long)]
        format: Option<String>,

        /// Print to stdout instead of writing a file
        #[arg(long)]
        stdout: bool,
    },

    /// Data export commands
    #[command(subcommand)]
    Export(tally_cli::cli::ExportCommands),

    /// Configuration commands
    #[command(subcommand)]
    Config(tally_cli::cli::ConfigCommands),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = TallyPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        None | Some(Commands::Tui) => {
            // First launch goes straight into the TUI with seeded categories.
            if needs_initialization(&paths) {
                initialize_storage(&paths)?;
                storage.load_all()?;
            }
            tally_cli::tui::run_tui(&storage, &settings)?;
        }

        Some(Commands::Init) => {
            if needs_initialization(&paths) {
                println!("Initializing Tally at: {}", paths.base_dir().display());
                initialize_storage(&paths)?;
                settings.save(&paths)?;
                storage.load_all()?;
                println!("Initialization complete!");
                println!();
                println!("Default categories have been created:");
                println!("  Income:  Salary, Freelance");
                println!("  Expense: Food, Transportation, Entertainment, Utilities");
                println!();
                println!("Run 'tally category list' to see all categories.");
            } else {
                println!("Already initialized at: {}", paths.base_dir().display());
            }
        }

        Some(Commands::Add {
            kind,
            amount,
            category,
            description,
            date,
        }) => {
            handle_add_command(&storage, kind, amount, category, description, date)?;
        }

        Some(Commands::Transaction(cmd)) => {
            handle_transaction_command(&storage, cmd)?;
        }

        Some(Commands::Category(cmd)) => {
            handle_category_command(&storage, cmd)?;
        }

        Some(Commands::Summary) => {
            handle_summary_command(&storage)?;
        }

        Some(Commands::Report {
            kind,
            output,
            format,
            stdout,
        }) => {
            handle_report_command(&storage, &settings, kind, output, format, stdout)?;
        }

        Some(Commands::Export(cmd)) => {
            handle_export_command(&storage, cmd)?;
        }

        Some(Commands::Config(cmd)) => {
            handle_config_command(&paths, &mut settings, cmd)?;
        }
    }

    Ok(())
}
