//! Handler for the `create` command

use super::HandlerContext;
use crate::cli::OutputFormatter;
use crate::error::Result;
use crate::validation::TicketInput;

/// Parameters for creating a ticket
#[derive(Debug, Clone)]
pub struct CreateParams {
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: String,
    pub email: String,
    pub name: Option<String>,
}

impl From<CreateParams> for TicketInput {
    fn from(params: CreateParams) -> Self {
        Self {
            title: params.title,
            description: params.description,
            category: params.category,
            priority: params.priority,
            customer_email: params.email,
            customer_name: params.name,
        }
    }
}

/// Handler for the `create` command
///
/// Validates the input, stores a new `Open` ticket and prints it.
///
/// # Errors
///
/// Returns a validation error naming the first invalid field, or a store
/// error if the ticket cannot be written.
pub async fn handle_create_command(
    ctx: &HandlerContext,
    params: CreateParams,
    output: &OutputFormatter,
) -> Result<()> {
    let ticket = ctx.service.create_ticket(&params.into()).await?;

    if output.is_json() {
        return output.print_json(&ticket);
    }

    output.success(&format!("Created ticket {}", ticket.id));
    output.info(&output.ticket_line(&ticket));
    Ok(())
}
