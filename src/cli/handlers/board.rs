//! Handler for the `board` command
//!
//! Renders the Kanban view: one section per status, tickets grouped by
//! category inside each section and ordered most urgent first.

use super::HandlerContext;
use crate::board::{Board, BoardColumn};
use crate::cli::output::{colored_priority, colored_status};
use crate::cli::{FilterArgs, OutputFormatter};
use crate::error::Result;
use colored::Colorize;

/// Handler for the `board` command
///
/// # Errors
///
/// Returns an error if a filter flag is invalid or the store cannot be read.
pub async fn handle_board_command(
    ctx: &HandlerContext,
    args: &FilterArgs,
    output: &OutputFormatter,
) -> Result<()> {
    let tickets = ctx.service.list_tickets(&args.to_filter()?).await?;
    let board = Board::build(&tickets);

    if output.is_json() {
        return output.print_json(&board);
    }

    for column in &board.columns {
        output_column(column, output);
    }
    Ok(())
}

fn output_column(column: &BoardColumn<'_>, output: &OutputFormatter) {
    output.info(&format!(
        "{} {}",
        colored_status(column.status).bold(),
        format!("({})", column.count).dimmed()
    ));
    output.info(&"─".repeat(40));

    if column.count == 0 {
        output.info("  (empty)\n");
        return;
    }

    for group in column.groups.iter().filter(|g| !g.cards.is_empty()) {
        output.info(&format!("  {}", group.category.as_str().underline()));
        for card in &group.cards {
            output.info(&format!(
                "    [{}] {}  {}  {}",
                colored_priority(card.priority),
                card.id.short().dimmed(),
                card.title,
                card.customer_name.dimmed()
            ));
        }
    }
    output.info("");
}
