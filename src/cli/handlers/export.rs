//! Handler for the `export` command

use super::HandlerContext;
use crate::cli::{ExportFormat, FilterArgs, OutputFormatter};
use crate::core::Ticket;
use crate::error::{Result, SupportDeskError};
use crate::storage::format_timestamp;
use csv::Writer;
use std::path::Path;

const CSV_HEADER: [&str; 11] = [
    "id",
    "title",
    "description",
    "category",
    "priority",
    "status",
    "customerEmail",
    "customerName",
    "createdAt",
    "updatedAt",
    "resolvedAt",
];

impl ExportFormat {
    /// Serialize `tickets` in this format
    pub fn export(self, tickets: &[Ticket]) -> Result<String> {
        match self {
            Self::Json => Ok(serde_json::to_string_pretty(tickets)?),
            Self::Yaml => Ok(serde_yaml::to_string(tickets)?),
            Self::Csv => export_csv(tickets),
        }
    }
}

/// One row per ticket with the JSON field names as header
pub fn export_csv(tickets: &[Ticket]) -> Result<String> {
    let mut writer = Writer::from_writer(vec![]);
    writer.write_record(CSV_HEADER)?;

    for ticket in tickets {
        writer.write_record([
            ticket.id.to_string(),
            ticket.title.clone(),
            ticket.description.clone(),
            ticket.category.to_string(),
            ticket.priority.to_string(),
            ticket.status.to_string(),
            ticket.customer_email.clone(),
            ticket.customer_name.clone().unwrap_or_default(),
            format_timestamp(&ticket.created_at),
            format_timestamp(&ticket.updated_at),
            ticket
                .resolved_at
                .as_ref()
                .map(format_timestamp)
                .unwrap_or_default(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| SupportDeskError::Io(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| SupportDeskError::Storage(format!("Invalid UTF-8 in CSV: {e}")))
}

/// Handler for the `export` command
///
/// Writes to `destination` when given, otherwise to stdout.
pub async fn handle_export_command(
    ctx: &HandlerContext,
    format: ExportFormat,
    destination: Option<&Path>,
    args: &FilterArgs,
    output: &OutputFormatter,
) -> Result<()> {
    let tickets = ctx.service.list_tickets(&args.to_filter()?).await?;
    let content = format.export(&tickets)?;

    match destination {
        Some(path) => {
            tokio::fs::write(path, content).await?;
            if output.is_json() {
                output.print_json(&serde_json::json!({
                    "status": "success",
                    "exported": tickets.len(),
                    "path": path.display().to_string(),
                }))?;
            } else {
                output.success(&format!(
                    "Exported {} ticket(s) to {}",
                    tickets.len(),
                    path.display()
                ));
            }
        },
        None => print!("{content}"),
    }
    Ok(())
}
