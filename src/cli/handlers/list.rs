//! Handler for the `list` command

use super::HandlerContext;
use crate::cli::{FilterArgs, OutputFormatter};
use crate::error::Result;

/// Handler for the `list` command
///
/// Prints the tickets matching the filter flags, newest first.
pub async fn handle_list_command(
    ctx: &HandlerContext,
    args: &FilterArgs,
    output: &OutputFormatter,
) -> Result<()> {
    let filter = args.to_filter()?;
    let tickets = ctx.service.list_tickets(&filter).await?;

    if output.is_json() {
        return output.print_json(&tickets);
    }

    if tickets.is_empty() {
        output.info("No tickets found");
        return Ok(());
    }

    for ticket in &tickets {
        output.info(&output.ticket_line(ticket));
    }
    output.info(&format!("\n{} ticket(s)", tickets.len()));
    Ok(())
}
