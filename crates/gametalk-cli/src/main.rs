//! GameTalk CLI
//!
//! Command-line front end for the GameTalk forum client

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod app;
mod commands;
mod render;

#[derive(Debug, Parser)]
#[command(name = "gametalk")]
#[command(about = "GameTalk - gaming forum client", long_about = None)]
struct Cli {
    /// TOML configuration file (optional; GAMETALK_* variables override it)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Local database path, overriding the configured one
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Forum categories (local)
    Categories(commands::categories::CategoriesArgs),
    /// Discussion topics
    Topics(commands::topics::TopicsArgs),
    /// Accounts
    Users(commands::users::UsersArgs),
    /// Backend server address
    Server(commands::server::ServerArgs),
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let result = match app::App::build(cli.config.as_deref(), cli.db) {
        Ok(app) => match cli.command {
            Commands::Categories(args) => commands::categories::execute(&app, args).await,
            Commands::Topics(args) => commands::topics::execute(&app, args).await,
            Commands::Users(args) => commands::users::execute(&app, args).await,
            Commands::Server(args) => commands::server::execute(&app, args),
        },
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
