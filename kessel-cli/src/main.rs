mod cli;
mod commands;
mod error;
mod reference;

use clap::Parser;
use cli::{Cli, Commands};
use colored::Colorize;
use commands::ReportOptions;
use error::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{} {}", "Error:".red(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let client = commands::connect(&cli.connection).await?;

    match cli.command {
        Commands::Report {
            resource,
            reporter_instance_id,
            api_href,
            console_href,
            reporter_version,
            common,
            attributes,
            immediate,
        } => {
            let options = ReportOptions {
                resource,
                reporter_instance_id,
                api_href,
                console_href,
                reporter_version,
                common,
                attributes,
                immediate,
            };
            commands::handle_report(&client, options, cli.json).await
        }
        Commands::Check(args) => commands::handle_check(&client, args, cli.json).await,
        Commands::CheckForUpdate(args) => {
            commands::handle_check_for_update(&client, args, cli.json).await
        }
        Commands::Delete { resource } => commands::handle_delete(&client, resource, cli.json).await,
        Commands::ListObjects {
            object_type,
            relation,
            subject,
            subject_relation,
            limit,
        } => {
            commands::handle_list_objects(
                &client,
                object_type,
                relation,
                subject,
                subject_relation,
                limit,
                cli.json,
            )
            .await
        }
    }
}
