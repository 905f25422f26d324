//! Category commands

use crate::app::App;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct CategoriesArgs {
    #[command(subcommand)]
    pub command: CategoriesCommand,
}

#[derive(Debug, Subcommand)]
pub enum CategoriesCommand {
    /// List categories, seeding the defaults on first use
    List,
    /// Seed the default catalogue into an empty store
    Seed,
}

pub async fn execute(app: &App, args: CategoriesArgs) -> anyhow::Result<()> {
    match args.command {
        CategoriesCommand::List => execute_list(app).await,
        CategoriesCommand::Seed => execute_seed(app),
    }
}

async fn execute_list(app: &App) -> anyhow::Result<()> {
    app.categories.initialize_default_categories()?;
    let categories = app.categories.observe_categories().next().await?;
    for category in categories {
        println!(
            "{:>3}  {} {}  ({} temas)",
            category.id, category.icon, category.name, category.topics_count
        );
        println!("     {}", category.description);
    }
    Ok(())
}

fn execute_seed(app: &App) -> anyhow::Result<()> {
    if app.categories.initialize_default_categories()? {
        println!("Categorías por defecto creadas");
    } else {
        println!("Las categorías ya existen");
    }
    Ok(())
}
