//! Handler for the `status` command

use super::{HandlerContext, resolve_ticket_id};
use crate::board::{MoveOutcome, move_ticket};
use crate::cli::OutputFormatter;
use crate::error::Result;
use crate::validation;

/// Handler for the `status` command
///
/// Moving a ticket to the status it already has writes nothing.
pub async fn handle_status_command(
    ctx: &HandlerContext,
    id: &str,
    status: &str,
    actor: Option<&str>,
    output: &OutputFormatter,
) -> Result<()> {
    let status = validation::status(status)?;
    let id = resolve_ticket_id(id)?;
    let actor = actor.unwrap_or(&ctx.config.agent.id);

    let outcome = move_ticket(&ctx.service, &id, status, actor).await?;

    if output.is_json() {
        return output.print_json(outcome.ticket());
    }

    match outcome {
        MoveOutcome::Unchanged(ticket) => {
            output.warning(&format!("Ticket {} is already {}", ticket.id.short(), ticket.status));
        },
        MoveOutcome::Moved(ticket) => {
            output.success(&format!("Ticket {} moved to {}", ticket.id.short(), ticket.status));
        },
    }
    Ok(())
}
