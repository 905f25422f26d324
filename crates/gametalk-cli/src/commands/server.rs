//! Backend address commands
//!
//! The address chosen with `server set` is saved in the local database and
//! wins over configuration on every later run.

use crate::app::App;
use clap::{Args, Subcommand};
use gametalk_core::config::SERVER_URL_SETTING;

#[derive(Debug, Args)]
pub struct ServerArgs {
    #[command(subcommand)]
    pub command: ServerCommand,
}

#[derive(Debug, Subcommand)]
pub enum ServerCommand {
    /// Print the address in use
    Show,
    /// Use and remember another address
    Set { url: String },
    /// Forget the saved address and go back to the configured one
    Reset,
}

pub fn execute(app: &App, args: ServerArgs) -> anyhow::Result<()> {
    match args.command {
        ServerCommand::Show => {
            println!("{}", app.client.base_url());
        }
        ServerCommand::Set { url } => {
            let normalized = app.client.set_base_url(&url)?;
            app.store.set_setting(SERVER_URL_SETTING, &normalized)?;
            println!("Servidor: {}", normalized);
        }
        ServerCommand::Reset => {
            app.store.remove_setting(SERVER_URL_SETTING)?;
            let configured = app.client.set_base_url(&app.config.base_url)?;
            println!("Servidor: {}", configured);
        }
    }
    Ok(())
}
