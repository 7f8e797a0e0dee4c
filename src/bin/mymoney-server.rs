// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! MyMoney API server
//!
//! Standalone entry point for deployments that only need the HTTP API.

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use mymoney::config::AppConfig;
use mymoney::db::Database;
use mymoney::logging::init_logging;
use mymoney::Result;

#[derive(Parser, Debug)]
#[command(name = "mymoney-server")]
#[command(author = "Jonathan D. A. Jewell <hyperpolymath>")]
#[command(version)]
#[command(about = "MyMoney expense tracker API server")]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// Host to bind to
    #[arg(short = 'H', long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Database URL, e.g. sqlite:///./mymoney.db
    #[arg(long)]
    database_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let dotenv = dotenvy::dotenv();
    init_logging(args.verbose, false);
    if let Ok(path) = dotenv {
        info!("Loaded environment from {:?}", path);
    }

    info!("MyMoney API server v{}", env!("CARGO_PKG_VERSION"));

    let mut config = AppConfig::load_with_env(&args.config)?;

    // Command-line flags win over file and environment
    if let Some(host) = args.host {
        config.web.host = host;
    }
    if let Some(port) = args.port {
        config.web.port = port;
    }
    if let Some(url) = args.database_url {
        config.database.url = url;
    }
    config.validate()?;

    let db = Database::from_config(&config.database)?;
    info!("Database: {}", config.database.url);

    mymoney::web::start_server(config, db).await
}
