//! Handler for the `show` command

use super::{HandlerContext, resolve_ticket_id};
use crate::cli::OutputFormatter;
use crate::cli::output::{colored_priority, colored_status};
use crate::core::{Comment, TicketDetail};
use crate::error::Result;
use colored::Colorize;

/// Handler for the `show` command
///
/// Prints a ticket and its comment thread, oldest comment first.
pub async fn handle_show_command(
    ctx: &HandlerContext,
    id: &str,
    output: &OutputFormatter,
) -> Result<()> {
    let id = resolve_ticket_id(id)?;
    let detail = ctx.service.get_ticket_detail(&id).await?;

    if output.is_json() {
        return output.print_json(&detail);
    }

    print_detail(&detail, output);
    Ok(())
}

fn print_detail(detail: &TicketDetail, output: &OutputFormatter) {
    let ticket = &detail.ticket;

    output.info(&format!("{}", ticket.title.bold()));
    output.info(&format!("ID:        {}", ticket.id));
    output.info(&format!("Status:    {}", colored_status(ticket.status)));
    output.info(&format!("Priority:  {}", colored_priority(ticket.priority)));
    output.info(&format!("Category:  {}", ticket.category));
    output.info(&format!(
        "Customer:  {} <{}>",
        ticket.customer_display_name(),
        ticket.customer_email
    ));
    output.info(&format!("Created:   {}", ticket.created_at.format("%Y-%m-%d %H:%M UTC")));
    output.info(&format!("Updated:   {}", ticket.updated_at.format("%Y-%m-%d %H:%M UTC")));
    if let Some(resolved_at) = ticket.resolved_at {
        output.info(&format!("Resolved:  {}", resolved_at.format("%Y-%m-%d %H:%M UTC")));
    }

    output.info(&format!("\n{}\n", ticket.description));

    if detail.comments.is_empty() {
        output.info("No comments");
        return;
    }

    output.info(&format!("Comments ({}):", detail.comments.len()));
    for comment in &detail.comments {
        output.info(&comment_line(comment));
    }
}

fn comment_line(comment: &Comment) -> String {
    let timestamp = comment.created_at.format("%Y-%m-%d %H:%M");
    if comment.is_system {
        format!("  {timestamp}  {}", comment.content.italic().dimmed())
    } else {
        format!(
            "  {timestamp}  {}: {}",
            comment.author_name.cyan(),
            comment.content
        )
    }
}
