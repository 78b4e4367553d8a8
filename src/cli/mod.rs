//! Command-line interface
//!
//! Argument definitions live here; each command's behaviour lives in
//! [`handlers`].

pub mod handlers;
pub mod output;

pub use output::OutputFormatter;

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Customer support ticket desk
#[derive(Parser, Debug)]
#[command(name = "support-desk", version, about, long_about = None)]
pub struct Cli {
    /// Output results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable coloured output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (defaults to ./support-desk.yaml if present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open a new ticket
    Create {
        #[arg(short, long)]
        title: String,

        #[arg(short, long)]
        description: String,

        /// Technical, Billing or General
        #[arg(short, long)]
        category: String,

        /// Low, Medium, High or Critical
        #[arg(short, long)]
        priority: String,

        /// Customer email address
        #[arg(short, long)]
        email: String,

        /// Customer display name
        #[arg(short, long)]
        name: Option<String>,
    },

    /// List tickets, newest first
    List {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Show a ticket with its comment thread
    Show {
        /// Ticket ID
        id: String,
    },

    /// Move a ticket to another status
    Status {
        /// Ticket ID
        id: String,

        /// Open, "In Progress", Resolved or Closed
        status: String,

        /// Agent recorded on the audit comment (defaults to agent.id)
        #[arg(long)]
        actor: Option<String>,
    },

    /// Add a comment to a ticket
    Comment {
        /// Ticket ID
        id: String,

        content: String,

        #[arg(long)]
        author_id: Option<String>,

        #[arg(long)]
        author_name: Option<String>,
    },

    /// Kanban board: status columns, category groups, priority order
    Board {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Dashboard metrics
    Metrics,

    /// Export tickets
    Export {
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Populate the store with demo tickets and comments
    Seed,
}

/// Ticket filter flags shared by list, board and export
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    #[arg(long)]
    pub status: Option<String>,

    #[arg(long)]
    pub priority: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    /// Exact customer email
    #[arg(long = "customer-email", visible_alias = "email")]
    pub customer_email: Option<String>,

    /// Created at or after (YYYY-MM-DD or RFC 3339)
    #[arg(long)]
    pub since: Option<String>,

    /// Created at or before (YYYY-MM-DD covers the whole day)
    #[arg(long)]
    pub until: Option<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Yaml,
    Csv,
}
