//! Terminal output
//!
//! Every command prints through [`OutputFormatter`], which renders either
//! coloured human-readable text or pretty JSON depending on `--json`.

use crate::core::{Priority, Status, Ticket};
use crate::error::Result;
use colored::{ColoredString, Colorize};
use serde::Serialize;

/// Output formatter shared by all command handlers
#[derive(Debug, Clone)]
pub struct OutputFormatter {
    json: bool,
}

impl OutputFormatter {
    /// Create a formatter; `no_color` disables ANSI colouring globally
    pub fn new(json: bool, no_color: bool) -> Self {
        if no_color || json {
            colored::control::set_override(false);
        }
        Self { json }
    }

    pub const fn is_json(&self) -> bool {
        self.json
    }

    /// Plain informational line
    pub fn info(&self, message: &str) {
        if !self.json {
            println!("{message}");
        }
    }

    pub fn success(&self, message: &str) {
        if !self.json {
            println!("{}", message.green());
        }
    }

    pub fn warning(&self, message: &str) {
        if !self.json {
            eprintln!("{} {message}", "Warning:".yellow().bold());
        }
    }

    /// Errors always go to stderr, in JSON mode too
    pub fn error(&self, message: &str) {
        eprintln!("{} {message}", "Error:".red().bold());
    }

    /// Pretty-print `value` as JSON on stdout
    pub fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    /// One summary line for a ticket in a listing
    pub fn ticket_line(&self, ticket: &Ticket) -> String {
        format!(
            "{}  {:<11}  {:<8}  {:<9}  {}  ({})",
            ticket.id.short().dimmed(),
            colored_status(ticket.status),
            colored_priority(ticket.priority),
            ticket.category.as_str(),
            ticket.title.bold(),
            ticket.customer_display_name()
        )
    }
}

pub fn colored_status(status: Status) -> ColoredString {
    match status {
        Status::Open => status.as_str().blue(),
        Status::InProgress => status.as_str().yellow(),
        Status::Resolved => status.as_str().green(),
        Status::Closed => status.as_str().dimmed(),
    }
}

pub fn colored_priority(priority: Priority) -> ColoredString {
    match priority {
        Priority::Critical => priority.as_str().red().bold(),
        Priority::High => priority.as_str().red(),
        Priority::Medium => priority.as_str().yellow(),
        Priority::Low => priority.as_str().normal(),
    }
}
