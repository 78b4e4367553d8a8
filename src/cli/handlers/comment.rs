//! Handler for the `comment` command

use super::{HandlerContext, resolve_ticket_id};
use crate::cli::OutputFormatter;
use crate::error::Result;

/// Handler for the `comment` command
///
/// The author defaults to the configured agent.
pub async fn handle_comment_command(
    ctx: &HandlerContext,
    id: &str,
    content: &str,
    author_id: Option<&str>,
    author_name: Option<&str>,
    output: &OutputFormatter,
) -> Result<()> {
    let id = resolve_ticket_id(id)?;
    let author_id = author_id.unwrap_or(&ctx.config.agent.id);
    let author_name = author_name.unwrap_or(&ctx.config.agent.name);

    let comment = ctx
        .service
        .add_comment(&id, content, author_id, author_name)
        .await?;

    if output.is_json() {
        return output.print_json(&comment);
    }

    output.success(&format!("Comment added to ticket {}", id.short()));
    Ok(())
}
