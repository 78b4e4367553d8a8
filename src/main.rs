//! support-desk - Customer support ticket desk
//!
//! Entry point for the `support-desk` CLI. Parses arguments, loads
//! configuration, installs logging and dispatches to the command handlers.

use anyhow::Context;
use clap::Parser;
use std::process;
use support_desk::cli::handlers::{
    CreateParams, HandlerContext, handle_board_command, handle_comment_command,
    handle_create_command, handle_export_command, handle_list_command, handle_metrics_command,
    handle_seed_command, handle_show_command, handle_status_command,
};
use support_desk::cli::{Cli, Commands, OutputFormatter};
use support_desk::config::SupportDeskConfig;
use support_desk::error::{Result, SupportDeskError};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let formatter = OutputFormatter::new(cli.json, cli.no_color);

    let ctx = match bootstrap(&cli).await {
        Ok(ctx) => ctx,
        Err(e) => {
            formatter.error(&format!("{e:#}"));
            process::exit(1);
        },
    };

    if let Err(e) = dispatch_command(cli.command, &ctx, &formatter).await {
        handle_error(&e, &formatter);
        process::exit(1);
    }
}

/// Load configuration, install logging and open the store
async fn bootstrap(cli: &Cli) -> anyhow::Result<HandlerContext> {
    let config = SupportDeskConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    init_logging(&config, cli.verbose);

    HandlerContext::new(config)
        .await
        .context("Failed to open ticket store")
}

/// `RUST_LOG` wins; otherwise the configured level, or `debug` with `--verbose`
fn init_logging(config: &SupportDeskConfig, verbose: bool) {
    let default_level = if verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn dispatch_command(
    command: Commands,
    ctx: &HandlerContext,
    formatter: &OutputFormatter,
) -> Result<()> {
    match command {
        Commands::Create {
            title,
            description,
            category,
            priority,
            email,
            name,
        } => {
            let params = CreateParams {
                title,
                description,
                category,
                priority,
                email,
                name,
            };
            handle_create_command(ctx, params, formatter).await
        },
        Commands::List { filter } => handle_list_command(ctx, &filter, formatter).await,
        Commands::Show { id } => handle_show_command(ctx, &id, formatter).await,
        Commands::Status { id, status, actor } => {
            handle_status_command(ctx, &id, &status, actor.as_deref(), formatter).await
        },
        Commands::Comment {
            id,
            content,
            author_id,
            author_name,
        } => {
            handle_comment_command(
                ctx,
                &id,
                &content,
                author_id.as_deref(),
                author_name.as_deref(),
                formatter,
            )
            .await
        },
        Commands::Board { filter } => handle_board_command(ctx, &filter, formatter).await,
        Commands::Metrics => handle_metrics_command(ctx, formatter).await,
        Commands::Export {
            format,
            output,
            filter,
        } => handle_export_command(ctx, format, output.as_deref(), &filter, formatter).await,
        Commands::Seed => handle_seed_command(ctx, formatter).await,
    }
}

/// Handle errors and display them to the user
///
/// Prints the message and any suggestions; in JSON mode also emits a
/// structured error object naming the offending field or resource.
fn handle_error(error: &SupportDeskError, formatter: &OutputFormatter) {
    formatter.error(&error.to_string());

    let suggestions = error.suggestions();
    if !suggestions.is_empty() && !formatter.is_json() {
        formatter.info("\nSuggestions:");
        for suggestion in &suggestions {
            formatter.info(&format!("  • {suggestion}"));
        }
    }

    if formatter.is_json() {
        let _ = formatter.print_json(&serde_json::json!({
            "status": "error",
            "error": error.to_string(),
            "field": error.field(),
            "resourceId": error.resource_id(),
            "retryable": error.is_retryable(),
            "suggestions": suggestions,
        }));
    }

    if tracing::enabled!(tracing::Level::DEBUG) {
        eprintln!("\nDebug information:");
        eprintln!("{error:?}");
    }
}
