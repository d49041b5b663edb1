use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use budget_planner::cli::{
    handle_budget_command, handle_convert_command, handle_expense_command,
    handle_savings_command, BudgetCommands, ExpenseCommands, SavingsCommands,
};
use budget_planner::config::{paths::DATA_DIR_ENV, PlannerPaths, Settings};
use budget_planner::logging::init_tracing;
use budget_planner::storage::Storage;

#[derive(Parser)]
#[command(
    name = "budget",
    version,
    about = "Period-aware budgets, expenses and savings goals",
    long_about = "Track expenses, budgets and savings goals that each repeat on their own \
                  schedule. Every amount is rescaled to the period of the budget it counts \
                  against, so weekly, monthly and yearly costs can share one budget."
)]
struct Cli {
    /// Directory holding settings, data and the audit log
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Expense management commands
    #[command(subcommand, alias = "exp")]
    Expense(ExpenseCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Savings goal management commands
    #[command(subcommand, alias = "save")]
    Savings(SavingsCommands),

    /// Convert an amount between frequencies
    Convert {
        /// Amount to convert
        amount: String,
        /// Frequency the amount is given in
        #[arg(short, long)]
        from: String,
        /// Frequency to express it in
        #[arg(short, long)]
        to: String,
    },

    /// Show recent changes from the audit log
    Audit {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        count: usize,
    },

    /// Initialize the data directory and settings file
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(dir) => PlannerPaths::with_base_dir(dir),
        None => PlannerPaths::new()?,
    };
    let settings = Settings::load_or_create(&paths)?;

    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Expense(cmd)) => handle_expense_command(&storage, &settings, cmd)?,
        Some(Commands::Budget(cmd)) => handle_budget_command(&storage, &settings, cmd)?,
        Some(Commands::Savings(cmd)) => handle_savings_command(&storage, &settings, cmd)?,
        Some(Commands::Convert { amount, from, to }) => {
            handle_convert_command(&settings, &amount, &from, &to)?
        }
        Some(Commands::Audit { count }) => {
            let entries = storage.audit().read_recent(count)?;
            if entries.is_empty() {
                println!("No changes recorded yet.");
            }
            for entry in entries {
                println!("{}", entry);
            }
        }
        Some(Commands::Init) => {
            let already = paths.is_initialized();
            settings.save(&paths)?;
            storage.save_all()?;

            if already {
                println!("Already initialized at: {}", paths.base_dir().display());
            } else {
                println!("Initialized budget planner at: {}", paths.base_dir().display());
            }
            println!();
            println!("Next steps:");
            println!("  budget expense add \"Rent\" 1200 --category housing --recurring monthly");
            println!("  budget budget add \"Household\" 2000 --period monthly");
            println!("  budget budget link Household Rent");
        }
        Some(Commands::Config) => {
            println!("Budget Planner Configuration");
            println!("============================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!("Audit log:       {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:         {}", settings.currency_symbol);
            println!(
                "  Default category:        {}",
                settings.category_or_default(None)
            );
            println!("  Default budget period:   {}", settings.default_budget_period);
            println!("  Default alert threshold: {}%", settings.default_alert_threshold);
            println!("  Round suggestions:       {}", settings.round_suggestions);
            println!("  Date format:             {}", settings.date_format);
        }
        None => {
            println!("Budget planner - period-aware budgets from the command line");
            println!();
            println!("Run 'budget --help' for usage information.");
        }
    }

    Ok(())
}
