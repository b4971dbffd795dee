use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod auth;
mod cli;
mod config;
mod error;
mod nav;
mod resources;
mod session;
mod upload;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "edushare=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => cli::commands::init().await,
        Commands::Login { username } => cli::commands::login(username).await,
        Commands::Logout => cli::commands::logout().await,
        Commands::Register {
            username,
            school,
            subject,
            audit_material,
        } => cli::commands::register(username, school, subject, audit_material).await,
        Commands::Whoami => cli::commands::whoami().await,
        Commands::Upload {
            file,
            subject,
            grade,
        } => cli::commands::upload(file, subject, grade).await,
        Commands::Uploads {
            status,
            page,
            format,
        } => cli::commands::uploads(status, page, format).await,
        Commands::Status { target } => cli::commands::status(target).await,
        Commands::Recall { id, reason, yes } => cli::commands::recall(id, reason, yes).await,
        Commands::Show { id, format } => cli::commands::show(id, format).await,
    }
}
