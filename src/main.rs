use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};

use kiosk_cli::cli::{
    handle_atm_command, handle_audit_command, handle_backup_command, handle_export_command,
    handle_product_command, handle_report_command, handle_stock_command, handle_user_command,
    login, AtmArgs, AuditArgs, BackupCommands, Credentials, ExportCommands, ProductCommands,
    ReportCommands, StockCommands, UserCommands,
};
use kiosk_cli::config::{paths::KioskPaths, settings::Settings};
use kiosk_cli::logging;
use kiosk_cli::storage::init::{DEFAULT_ADMIN_PASSWORD, DEFAULT_ADMIN_USER};
use kiosk_cli::storage::{initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "kiosk",
    version,
    about = "Terminal ATM simulator and inventory manager",
    long_about = "kiosk bundles two small tools over local JSON files: an ATM \
                  simulator with a PIN-protected keypad, and an inventory \
                  manager with stock tracking, reports and an audit trail."
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Inventory username
    #[arg(short, long, env = "KIOSK_USER", global = true)]
    user: Option<String>,

    /// Inventory password (prompted when absent)
    #[arg(long, env = "KIOSK_PASSWORD", hide_env_values = true, global = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data files with starter data
    Init,

    /// Show current configuration and paths
    Config,

    /// ATM operations
    Atm(AtmArgs),

    /// Product catalogue management
    #[command(subcommand)]
    Product(ProductCommands),

    /// Stock movements
    #[command(subcommand)]
    Stock(StockCommands),

    /// Inventory reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// User account management
    #[command(subcommand)]
    User(UserCommands),

    /// Show the audit log
    Audit(AuditArgs),

    /// Export inventory data
    #[command(subcommand)]
    Export(ExportCommands),

    /// Backup management
    #[command(subcommand)]
    Backup(BackupCommands),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let paths = KioskPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let Some(command) = cli.command else {
        println!("kiosk - ATM simulator and inventory manager");
        println!();
        println!("Run 'kiosk --help' for usage information.");
        println!("Run 'kiosk atm session' to use the ATM keypad.");
        return Ok(());
    };

    match command {
        Commands::Init => {
            println!("Initializing kiosk at: {}", paths.base_dir().display());
            let report = initialize_storage(&paths, &settings)?;
            if !report.created_anything() {
                println!("Already initialized; existing data was left untouched.");
                return Ok(());
            }
            println!("Initialization complete!");
            if report.users {
                println!();
                println!(
                    "Administrator login: {} / {}",
                    DEFAULT_ADMIN_USER, DEFAULT_ADMIN_PASSWORD
                );
                println!("Change it with: kiosk user passwd");
            }
            if report.atm {
                println!(
                    "ATM account opened with {} (PIN {})",
                    settings.atm.opening_balance.format_whole(),
                    settings.atm.default_pin
                );
            }
            if report.products {
                println!("Three sample products were added; see 'kiosk product list'.");
            }
        }

        Commands::Config => {
            println!("kiosk Configuration");
            println!("===================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Backup directory: {}", paths.backup_dir().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!("Initialized:      {}", if paths.is_initialized() { "yes" } else { "no" });
            println!();
            println!("Settings:");
            println!("  Currency symbol:   {}", settings.currency_symbol);
            println!("  Date format:       {}", settings.date_format);
            println!("  Withdrawal step:   {}", settings.atm.withdrawal_step.format_whole());
            println!("  Minimum balance:   {}", settings.atm.minimum_balance.format_whole());
            println!("  ATM history size:  {}", settings.atm.history_limit);
            println!("  Statement size:    {}", settings.atm.statement_size);
            println!("  Recent activity:   {}", settings.inventory.recent_activity);
            println!("  Default min stock: {}", settings.inventory.default_threshold);
            println!(
                "  Backup retention:  {} daily, {} monthly",
                settings.backup_retention.daily_count, settings.backup_retention.monthly_count
            );
        }

        command => {
            if !paths.is_initialized() {
                initialize_storage(&paths, &settings)?;
                eprintln!(
                    "First run: created data in {} (login {} / {})",
                    paths.base_dir().display(),
                    DEFAULT_ADMIN_USER,
                    DEFAULT_ADMIN_PASSWORD
                );
            }
            let storage = Storage::open(paths.clone()).context("Failed to load data files")?;
            let credentials = Credentials {
                user: cli.user,
                password: cli.password,
            };
            run(&storage, &paths, &settings, &credentials, command)?;
        }
    }

    Ok(())
}

fn run(
    storage: &Storage,
    paths: &KioskPaths,
    settings: &Settings,
    credentials: &Credentials,
    command: Commands,
) -> Result<()> {
    match command {
        Commands::Atm(args) => handle_atm_command(storage, settings, args)?,
        Commands::Product(cmd) => {
            let user = login(storage, credentials)?;
            handle_product_command(storage, settings, &user, cmd)?;
        }
        Commands::Stock(cmd) => {
            let user = login(storage, credentials)?;
            handle_stock_command(storage, settings, &user, cmd)?;
        }
        Commands::Report(cmd) => {
            login(storage, credentials)?;
            handle_report_command(storage, settings, cmd)?;
        }
        Commands::User(cmd) => {
            let user = login(storage, credentials)?;
            handle_user_command(storage, settings, &user, cmd)?;
        }
        Commands::Audit(args) => {
            login(storage, credentials)?;
            handle_audit_command(storage, args)?;
        }
        Commands::Export(cmd) => {
            login(storage, credentials)?;
            handle_export_command(storage, cmd)?;
        }
        Commands::Backup(cmd) => {
            let user = login(storage, credentials)?;
            handle_backup_command(paths, settings, &user, cmd)?;
        }
        Commands::Init | Commands::Config => {}
    }
    Ok(())
}
