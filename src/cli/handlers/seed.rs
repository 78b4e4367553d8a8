//! Handler for the `seed` command

use super::HandlerContext;
use crate::cli::OutputFormatter;
use crate::error::Result;
use crate::seed::{DEMO_AGENTS, seed_demo_data};

/// Handler for the `seed` command
pub async fn handle_seed_command(ctx: &HandlerContext, output: &OutputFormatter) -> Result<()> {
    let summary = seed_demo_data(&ctx.service).await?;

    if output.is_json() {
        return output.print_json(&summary);
    }

    output.success(&format!(
        "Seeded {} tickets, {} status changes and {} comments",
        summary.tickets, summary.status_changes, summary.comments
    ));
    output.info("Demo agents:");
    for agent in DEMO_AGENTS {
        output.info(&format!("  {} ({})", agent.name, agent.id));
    }
    Ok(())
}
