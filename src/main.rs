// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! MyMoney: personal expense tracker
//!
//! Runs the API server, administers the local database and talks to a
//! running server as a terminal client.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use dialoguer::{Confirm, Password};
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use mymoney::analytics::DEFAULT_TREND_MONTHS;
use mymoney::client::ApiClient;
use mymoney::config::AppConfig;
use mymoney::db::Database;
use mymoney::format;
use mymoney::logging::init_logging;
use mymoney::models::{
    parse_datetime, Month, NewBudget, NewTransaction, NewUser, TransactionFilter, TransactionPatch,
    TransactionType, Validate,
};
use mymoney::session::{Session, SessionStore};
use mymoney::{MyMoneyError, Result};

/// MyMoney CLI - personal expense tracker
#[derive(Parser, Debug)]
#[command(name = "mymoney")]
#[command(author = "Jonathan D. A. Jewell <hyperpolymath>")]
#[command(version)]
#[command(about = "Track income, expenses and monthly budgets", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file (JSON format)
    #[arg(short, long, default_value = "config.json", global = true)]
    config: PathBuf,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format for results
    #[arg(long, global = true, default_value = "text", value_parser = ["text", "json"])]
    format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the API server
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Write a config.json with a freshly generated secret
    Init {
        /// Directory to initialize (default: current)
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Overwrite an existing config.json
        #[arg(long)]
        force: bool,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Local database maintenance
    Db {
        #[command(subcommand)]
        action: DbCommands,
    },

    /// Account administration on the local database
    User {
        #[command(subcommand)]
        action: UserCommands,
    },

    /// Check that the API server is reachable
    Health,

    /// Create an account on the server
    Register {
        #[arg(long)]
        email: String,

        #[arg(long)]
        username: String,

        /// Prompted for (hidden) when omitted
        #[arg(long)]
        password: Option<String>,
    },

    /// Log in and remember the access token
    Login {
        username: String,

        /// Prompted for (hidden) when omitted
        #[arg(long)]
        password: Option<String>,
    },

    /// Forget the saved access token
    Logout,

    /// Show the logged-in account
    Whoami,

    /// Transactions
    Tx {
        #[command(subcommand)]
        action: TxCommands,
    },

    /// Income, expense and balance for a month
    Summary {
        /// Month as YYYY-MM (default: current)
        month: Option<Month>,
    },

    /// Expense totals per category
    Breakdown {
        /// Month as YYYY-MM (default: all time)
        #[arg(short, long)]
        month: Option<Month>,
    },

    /// Monthly totals over several months
    Trend {
        /// Number of months
        #[arg(short = 'n', long, default_value_t = DEFAULT_TREND_MONTHS)]
        months: usize,

        /// Last month of the window (default: current)
        #[arg(long)]
        end: Option<Month>,
    },

    /// Budget goals
    Budget {
        #[command(subcommand)]
        action: BudgetCommands,
    },

    /// Delete the logged-in account and all its data
    DeleteAccount {
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Generate default configuration file
    Generate {
        /// Output file path
        #[arg(short, long, default_value = "config.json")]
        output: PathBuf,
    },

    /// Validate configuration file
    Validate,
}

#[derive(Subcommand, Debug)]
enum DbCommands {
    /// Show row counts
    Stats,

    /// Vacuum database (reclaim space)
    Vacuum,

    /// Export one user's data to JSON
    Export {
        username: String,

        /// Output file
        output: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
enum UserCommands {
    /// List accounts
    List,

    /// Allow an account to log in again
    Activate { username: String },

    /// Block an account from logging in
    Deactivate { username: String },
}

#[derive(Subcommand, Debug)]
enum TxCommands {
    /// List transactions, newest first
    List {
        #[arg(short, long, default_value = "20")]
        limit: u32,

        #[arg(long, default_value = "0")]
        skip: u32,

        /// income or expense
        #[arg(short = 't', long = "type")]
        kind: Option<TransactionType>,

        #[arg(long)]
        category: Option<String>,

        /// First day, YYYY-MM-DD
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Last day, YYYY-MM-DD
        #[arg(long)]
        to: Option<NaiveDate>,
    },

    /// Record a transaction
    Add {
        amount: Decimal,

        #[arg(long)]
        category: String,

        /// income or expense
        #[arg(short = 't', long = "type", default_value = "expense")]
        kind: TransactionType,

        #[arg(short, long)]
        description: Option<String>,

        /// Date or date-time (default: now)
        #[arg(long)]
        date: Option<String>,
    },

    /// Change fields of a transaction
    Edit {
        id: i64,

        #[arg(long)]
        amount: Option<Decimal>,

        #[arg(long)]
        category: Option<String>,

        #[arg(short = 't', long = "type")]
        kind: Option<TransactionType>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(long)]
        date: Option<String>,
    },

    /// Delete a transaction
    Delete { id: i64 },

    /// Download all transactions as CSV
    Export {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Upload a CSV of date,description,amount[,category]
    Import {
        file: PathBuf,

        #[arg(long, default_value = ",")]
        delimiter: String,

        /// chrono pattern such as %d/%m/%Y
        #[arg(long)]
        date_format: Option<String>,

        /// The first row is data, not a header
        #[arg(long)]
        no_header: bool,
    },
}

#[derive(Subcommand, Debug)]
enum BudgetCommands {
    /// List budget goals
    List {
        #[arg(short, long)]
        month: Option<Month>,
    },

    /// Set the goal for a category (replaces an existing one)
    Set {
        category: String,

        amount: Decimal,

        /// Month as YYYY-MM (default: current)
        #[arg(short, long)]
        month: Option<Month>,
    },

    /// Delete a budget goal
    Delete { id: i64 },

    /// Spending against each goal
    Status {
        /// Month as YYYY-MM (default: current)
        month: Option<Month>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Ignoring unreadable .env file: {}", e);
        }
    }
    init_logging(cli.verbose, cli.quiet);

    let config = AppConfig::load_with_env(&cli.config)?;
    let json = cli.format == "json";

    match cli.command {
        Commands::Serve { host, port } => run_serve(config, host, port).await,
        Commands::Init { dir, force } => run_init(dir, force),
        Commands::Config { action } => run_config_command(config, action, &cli.config),
        Commands::Db { action } => run_db_command(config, action),
        Commands::User { action } => run_user_command(config, action, json),
        Commands::Health => run_health(config, json).await,
        Commands::Register { email, username, password } => {
            run_register(config, email, username, password, json).await
        }
        Commands::Login { username, password } => run_login(config, username, password).await,
        Commands::Logout => run_logout(config),
        Commands::Whoami => {
            let user = authed_client(&config)?.me().await?;
            if json {
                print_json(&user)
            } else {
                println!("{} <{}> (id {}, joined {})", user.username, user.email, user.id, format::date(&user.created_at));
                Ok(())
            }
        }
        Commands::Tx { action } => run_tx_command(config, action, json).await,
        Commands::Summary { month } => run_summary(config, month, json).await,
        Commands::Breakdown { month } => run_breakdown(config, month, json).await,
        Commands::Trend { months, end } => run_trend(config, months, end, json).await,
        Commands::Budget { action } => run_budget_command(config, action, json).await,
        Commands::DeleteAccount { force } => run_delete_account(config, force).await,
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn session_store(config: &AppConfig) -> SessionStore {
    SessionStore::new(PathBuf::from(&config.client.session_file))
}

/// Client carrying the saved token
fn authed_client(config: &AppConfig) -> Result<ApiClient> {
    let session = session_store(config)
        .load()?
        .ok_or_else(|| MyMoneyError::Config("Not logged in. Run `mymoney login <username>` first".to_string()))?;
    if !session.is_for(&config.client.base_url) {
        warn!(
            "Saved session belongs to {}, using it against {}",
            session.base_url, config.client.base_url
        );
    }
    Ok(ApiClient::from_config(&config.client)?.with_token(session.token))
}

/// The password flag, or a hidden prompt. New passwords are asked twice.
fn read_password(given: Option<String>, new_password: bool) -> Result<String> {
    if let Some(password) = given {
        return Ok(password);
    }
    let mut prompt = Password::new().with_prompt("Password");
    if new_password {
        prompt = prompt.with_confirmation("Repeat password", "Passwords do not match");
    }
    Ok(prompt.interact()?)
}

fn confirm(prompt: &str) -> Result<bool> {
    Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
}

fn month_or_current(month: Option<Month>) -> Month {
    month.unwrap_or_else(Month::current)
}

fn parse_date_arg(raw: Option<String>) -> Result<Option<chrono::DateTime<chrono::Utc>>> {
    raw.map(|value| {
        parse_datetime(&value)
            .ok_or_else(|| MyMoneyError::validation(format!("Invalid date '{}'", value)))
    })
    .transpose()
}

async fn run_serve(mut config: AppConfig, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(host) = host {
        config.web.host = host;
    }
    if let Some(port) = port {
        config.web.port = port;
    }
    config.validate()?;

    let db = Database::from_config(&config.database)?;
    info!("Database: {}", config.database.url);
    mymoney::web::start_server(config, db).await
}

fn run_init(dir: Option<PathBuf>, force: bool) -> Result<()> {
    let target = dir.unwrap_or_else(|| PathBuf::from("."));
    let config_path = target.join("config.json");

    if config_path.exists() && !force {
        return Err(MyMoneyError::Config(
            "config.json already exists. Use --force to overwrite".to_string(),
        ));
    }
    std::fs::create_dir_all(&target)?;

    let mut config = AppConfig::default();
    config.auth.secret_key = format!(
        "{}{}",
        uuid::Uuid::new_v4().simple(),
        uuid::Uuid::new_v4().simple()
    );
    config.save(&config_path)?;

    println!("MyMoney initialized in {:?}", target);
    println!("\nCreated:");
    println!("  - config.json (with a random secret key)");
    println!("\nNext steps:");
    println!("  1. Start the server: mymoney serve");
    println!("  2. Create an account: mymoney register --email you@example.com --username you");
    Ok(())
}

fn run_config_command(config: AppConfig, action: ConfigCommands, config_path: &Path) -> Result<()> {
    match action {
        ConfigCommands::Show => {
            let mut shown = config;
            shown.auth.secret_key = "********".to_string();
            print_json(&shown)?;
        }
        ConfigCommands::Generate { output } => {
            AppConfig::default().save(&output)?;
            println!("Generated config at {:?}", output);
        }
        ConfigCommands::Validate => {
            config.validate()?;
            println!("Configuration at {:?} is valid", config_path);
            println!("  Database: {}", config.database.url);
            println!("  Listen: {}:{}", config.web.host, config.web.port);
            println!("  Token algorithm: {}", config.auth.algorithm);
            if config.uses_default_secret() {
                println!("  Warning: the built-in secret key is in use");
            }
        }
    }
    Ok(())
}

fn run_db_command(config: AppConfig, action: DbCommands) -> Result<()> {
    let db = Database::from_config(&config.database)?;

    match action {
        DbCommands::Stats => {
            let stats = db.get_stats()?;
            println!("Database Statistics:");
            println!("  Users: {}", stats.user_count);
            println!("  Transactions: {}", stats.transaction_count);
            println!("  Budgets: {}", stats.budget_count);
        }
        DbCommands::Vacuum => {
            db.vacuum()?;
            println!("Database vacuumed successfully");
        }
        DbCommands::Export { username, output } => {
            let user = db
                .get_user_by_username(&username)?
                .ok_or_else(|| MyMoneyError::NotFound(format!("User '{}'", username)))?;
            let export = db
                .export_user(user.id)?
                .ok_or_else(|| MyMoneyError::NotFound(format!("User '{}'", username)))?;
            std::fs::write(&output, serde_json::to_string_pretty(&export)?)?;
            println!(
                "Exported {} transactions and {} budgets to {:?}",
                export.transactions.len(),
                export.budgets.len(),
                output
            );
        }
    }
    Ok(())
}

fn run_user_command(config: AppConfig, action: UserCommands, json: bool) -> Result<()> {
    let db = Database::from_config(&config.database)?;

    match action {
        UserCommands::List => {
            let users = db.list_users()?;
            if json {
                return print_json(&users);
            }
            let rows: Vec<Vec<String>> = users
                .iter()
                .map(|u| {
                    vec![
                        u.id.to_string(),
                        u.username.clone(),
                        u.email.clone(),
                        if u.is_active { "active" } else { "inactive" }.to_string(),
                        format::date(&u.created_at),
                    ]
                })
                .collect();
            print!("{}", format::table(&["ID", "Username", "Email", "Status", "Joined"], &rows));
        }
        UserCommands::Activate { username } => set_active(&db, &username, true)?,
        UserCommands::Deactivate { username } => set_active(&db, &username, false)?,
    }
    Ok(())
}

fn set_active(db: &Database, username: &str, active: bool) -> Result<()> {
    if !db.set_user_active(username, active)? {
        return Err(MyMoneyError::NotFound(format!("User '{}'", username)));
    }
    let state = if active { "activated" } else { "deactivated" };
    info!(username, state, "Changed account state");
    println!("User {} {}", username, state);
    Ok(())
}

async fn run_health(config: AppConfig, json: bool) -> Result<()> {
    let client = ApiClient::from_config(&config.client)?;
    let health = client.health().await?;
    if json {
        return print_json(&health);
    }
    println!("{}: {} (version {})", client.base_url(), health.status, health.version);
    Ok(())
}

async fn run_register(
    config: AppConfig,
    email: String,
    username: String,
    password: Option<String>,
    json: bool,
) -> Result<()> {
    let new = NewUser { email, username, password: read_password(password, true)? };
    new.validate()?;
    let user = ApiClient::from_config(&config.client)?.register(&new).await?;
    if json {
        return print_json(&user);
    }
    println!("Registered {} (id {}). Log in with: mymoney login {}", user.username, user.id, user.username);
    Ok(())
}

async fn run_login(config: AppConfig, username: String, password: Option<String>) -> Result<()> {
    let password = read_password(password, false)?;
    let client = ApiClient::from_config(&config.client)?;
    let token = client.login(&username, &password).await?;

    let store = session_store(&config);
    store.save(&Session::new(&username, &token.access_token, client.base_url()))?;
    println!("Logged in as {}", username);
    Ok(())
}

fn run_logout(config: AppConfig) -> Result<()> {
    if session_store(&config).clear()? {
        println!("Logged out");
    } else {
        println!("No saved session");
    }
    Ok(())
}

async fn run_tx_command(config: AppConfig, action: TxCommands, json: bool) -> Result<()> {
    let client = authed_client(&config)?;

    match action {
        TxCommands::List { limit, skip, kind, category, from, to } => {
            let filter = TransactionFilter {
                skip: Some(skip),
                limit: Some(limit),
                transaction_type: kind,
                category,
                from,
                to,
            };
            let txns = client.list_transactions(&filter).await?;
            if json {
                return print_json(&txns);
            }
            if txns.is_empty() {
                println!("No transactions found");
                return Ok(());
            }
            let rows: Vec<Vec<String>> = txns
                .iter()
                .map(|t| {
                    let signed = match t.transaction_type {
                        TransactionType::Income => t.amount,
                        TransactionType::Expense => -t.amount,
                    };
                    vec![
                        t.id.to_string(),
                        format::date(&t.date),
                        t.transaction_type.to_string(),
                        t.category.clone(),
                        format::currency(signed),
                        t.description.clone().unwrap_or_default(),
                    ]
                })
                .collect();
            print!(
                "{}",
                format::table(&["ID", "Date", "Type", "Category", "Amount", "Description"], &rows)
            );
        }
        TxCommands::Add { amount, category, kind, description, date } => {
            let new = NewTransaction {
                amount,
                category,
                description,
                transaction_type: kind,
                date: parse_date_arg(date)?,
            };
            new.validate()?;
            let txn = client.add_transaction(&new).await?;
            if json {
                return print_json(&txn);
            }
            println!(
                "Added {} {} in {} (id {})",
                txn.transaction_type,
                format::currency(txn.amount),
                txn.category,
                txn.id
            );
        }
        TxCommands::Edit { id, amount, category, kind, description, date } => {
            let patch = TransactionPatch {
                amount,
                category,
                description,
                transaction_type: kind,
                date: parse_date_arg(date)?,
            };
            if patch.is_empty() {
                return Err(MyMoneyError::validation("Nothing to change"));
            }
            patch.validate()?;
            let txn = client.update_transaction(id, &patch).await?;
            if json {
                return print_json(&txn);
            }
            println!("Updated transaction {}", txn.id);
        }
        TxCommands::Delete { id } => {
            let message = client.delete_transaction(id).await?;
            println!("{}", message.message);
        }
        TxCommands::Export { output } => {
            let csv = client.export_csv().await?;
            match output {
                Some(path) => {
                    std::fs::write(&path, csv)?;
                    println!("Exported transactions to {:?}", path);
                }
                None => print!("{}", csv),
            }
        }
        TxCommands::Import { file, delimiter, date_format, no_header } => {
            let data = std::fs::read_to_string(&file)?;
            let summary = client
                .import_csv(data, &delimiter, !no_header, date_format.as_deref())
                .await?;
            println!("Imported {} transactions from {:?}", summary.imported, file);
        }
    }
    Ok(())
}

async fn run_summary(config: AppConfig, month: Option<Month>, json: bool) -> Result<()> {
    let month = month_or_current(month);
    let summary = authed_client(&config)?.monthly_summary(month).await?;
    if json {
        return print_json(&summary);
    }
    println!("{}", month.label());
    println!("  Income:       {}", format::currency(summary.income));
    println!("  Expenses:     {}", format::currency(summary.expense));
    println!("  Balance:      {}", format::currency(summary.balance));
    println!("  Savings rate: {}", format::percentage(summary.savings_rate));
    Ok(())
}

async fn run_breakdown(config: AppConfig, month: Option<Month>, json: bool) -> Result<()> {
    let totals = authed_client(&config)?.category_breakdown(month).await?;
    if json {
        return print_json(&totals);
    }
    if totals.is_empty() {
        println!("No expenses recorded");
        return Ok(());
    }
    let all: Decimal = totals.iter().map(|c| c.total).sum();
    let rows: Vec<Vec<String>> = totals
        .iter()
        .map(|c| {
            let share = if all.is_zero() {
                Decimal::ZERO
            } else {
                c.total / all * Decimal::ONE_HUNDRED
            };
            vec![c.category.clone(), format::currency(c.total), format::percentage(share)]
        })
        .collect();
    print!("{}", format::table(&["Category", "Total", "Share"], &rows));
    Ok(())
}

async fn run_trend(config: AppConfig, months: usize, end: Option<Month>, json: bool) -> Result<()> {
    let trend = authed_client(&config)?.monthly_trend(months, end).await?;
    if json {
        return print_json(&trend);
    }
    let rows: Vec<Vec<String>> = trend
        .iter()
        .map(|s| {
            vec![
                s.month.to_string(),
                format::currency(s.income),
                format::currency(s.expense),
                format::currency(s.balance),
            ]
        })
        .collect();
    print!("{}", format::table(&["Month", "Income", "Expenses", "Balance"], &rows));
    Ok(())
}

async fn run_budget_command(config: AppConfig, action: BudgetCommands, json: bool) -> Result<()> {
    let client = authed_client(&config)?;

    match action {
        BudgetCommands::List { month } => {
            let budgets = client.list_budgets(month).await?;
            if json {
                return print_json(&budgets);
            }
            let rows: Vec<Vec<String>> = budgets
                .iter()
                .map(|b| vec![b.id.to_string(), b.month.to_string(), b.category.clone(), format::currency(b.amount)])
                .collect();
            print!("{}", format::table(&["ID", "Month", "Category", "Amount"], &rows));
        }
        BudgetCommands::Set { category, amount, month } => {
            let new = NewBudget { category, amount, month: month_or_current(month) };
            new.validate()?;
            let budget = client.set_budget(&new).await?;
            if json {
                return print_json(&budget);
            }
            println!(
                "Budget for {} in {} set to {}",
                budget.category,
                budget.month,
                format::currency(budget.amount)
            );
        }
        BudgetCommands::Delete { id } => {
            let message = client.delete_budget(id).await?;
            println!("{}", message.message);
        }
        BudgetCommands::Status { month } => {
            let month = month_or_current(month);
            let report = client.budget_status(month).await?;
            if json {
                return print_json(&report);
            }
            if report.is_empty() {
                println!("No budgets set for {}", month.label());
                return Ok(());
            }
            let rows: Vec<Vec<String>> = report
                .iter()
                .map(|s| {
                    vec![
                        s.category.clone(),
                        format::currency(s.budget),
                        format::currency(s.spent),
                        format::currency(s.remaining),
                        format::percentage(s.percentage),
                        format!("{:?}", s.health).to_lowercase(),
                    ]
                })
                .collect();
            println!("{}", month.label());
            print!(
                "{}",
                format::table(&["Category", "Budget", "Spent", "Remaining", "Used", "Health"], &rows)
            );
        }
    }
    Ok(())
}

async fn run_delete_account(config: AppConfig, force: bool) -> Result<()> {
    if !force && !confirm("Delete your account and every transaction and budget?")? {
        println!("Cancelled");
        return Ok(());
    }
    let message = authed_client(&config)?.delete_account().await?;
    session_store(&config).clear()?;
    println!("{}", message.message);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_serve_command() {
        let cli = Cli::try_parse_from(["mymoney", "serve", "--port", "9000"]).unwrap();
        assert!(!cli.verbose);
        match cli.command {
            Commands::Serve { port, host } => {
                assert_eq!(port, Some(9000));
                assert!(host.is_none());
            }
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_cli_tx_add_command() {
        let cli = Cli::try_parse_from([
            "mymoney", "tx", "add", "12.50", "--category", "Food", "--type", "expense",
        ])
        .unwrap();

        match cli.command {
            Commands::Tx { action: TxCommands::Add { amount, category, kind, .. } } => {
                assert_eq!(amount, Decimal::new(1250, 2));
                assert_eq!(category, "Food");
                assert_eq!(kind, TransactionType::Expense);
            }
            _ => panic!("Expected tx add command"),
        }
    }

    #[test]
    fn test_password_flag_skips_prompt() {
        assert_eq!(read_password(Some("Secret123".to_string()), true).unwrap(), "Secret123");
        assert_eq!(read_password(Some(String::new()), false).unwrap(), "");
    }

    #[test]
    fn test_cli_rejects_bad_month() {
        assert!(Cli::try_parse_from(["mymoney", "summary", "2024-13"]).is_err());
        let cli = Cli::try_parse_from(["mymoney", "--format", "json", "budget", "status", "2024-02"]).unwrap();
        assert_eq!(cli.format, "json");
        match cli.command {
            Commands::Budget { action: BudgetCommands::Status { month } } => {
                assert_eq!(month.unwrap().to_string(), "2024-02");
            }
            _ => panic!("Expected budget status command"),
        }
    }
}
