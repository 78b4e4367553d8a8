//! Handler for the `metrics` command

use super::HandlerContext;
use crate::cli::OutputFormatter;
use crate::cli::output::colored_priority;
use crate::error::Result;
use colored::Colorize;

/// Handler for the `metrics` command
pub async fn handle_metrics_command(ctx: &HandlerContext, output: &OutputFormatter) -> Result<()> {
    let metrics = ctx.service.dashboard_metrics().await?;

    if output.is_json() {
        return output.print_json(&metrics);
    }

    output.info(&format!("{}", "Dashboard".bold()));
    output.info(&format!("Open tickets:            {}", metrics.total_open));
    output.info(&format!(
        "Avg. resolution time:    {:.2} h",
        metrics.average_resolution_time
    ));

    output.info("\nBy priority:");
    // most urgent first
    for (priority, count) in &metrics.by_priority {
        output.info(&format!("  {:<10} {count}", colored_priority(*priority)));
    }

    output.info("\nBy category:");
    for (category, count) in &metrics.by_category {
        output.info(&format!("  {:<10} {count}", category.as_str()));
    }
    Ok(())
}
