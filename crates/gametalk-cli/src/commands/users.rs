//! Account commands
//!
//! `register`, `login` and `passwd` work against the local database unless
//! `--remote` is given.

use crate::app::App;
use crate::render::render;
use clap::{Args, Subcommand};
use gametalk_core::User;

#[derive(Debug, Args)]
pub struct UsersArgs {
    #[command(subcommand)]
    pub command: UsersCommand,
}

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        username: String,
        /// Create the account on the server (it is also kept locally)
        #[arg(long)]
        remote: bool,
    },
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Accounts known to the server
    List,
    /// Change a password
    Passwd {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        password: String,
        #[arg(long)]
        remote: bool,
    },
}

pub async fn execute(app: &App, args: UsersArgs) -> anyhow::Result<()> {
    match args.command {
        UsersCommand::Register {
            email,
            password,
            username,
            remote: false,
        } => {
            let user = app.users.register(&email, &password, &username)?;
            println!("Usuario registrado:");
            print_user(&user);
            Ok(())
        }
        UsersCommand::Register {
            email,
            password,
            username,
            remote: true,
        } => {
            render(app.users.create_user(&email, &password, &username), |user| {
                println!("Usuario creado en el servidor:");
                print_user(user);
            })
            .await
        }
        UsersCommand::Login { email, password } => {
            let user = app.users.login(&email, &password)?;
            println!("Bienvenido, {}", user.username);
            Ok(())
        }
        UsersCommand::List => {
            render(app.users.list_users(), |users| {
                for user in users {
                    print_user(user);
                }
            })
            .await
        }
        UsersCommand::Passwd {
            id,
            password,
            remote: false,
        } => {
            app.users.change_password(id, &password)?;
            println!("Contraseña actualizada");
            Ok(())
        }
        UsersCommand::Passwd {
            id,
            password,
            remote: true,
        } => {
            render(app.users.change_password_remote(id, &password), |_| {
                println!("Contraseña actualizada")
            })
            .await
        }
    }
}

fn print_user(user: &User) {
    println!("{:>5}  {} <{}>", user.id, user.username, user.email);
}
