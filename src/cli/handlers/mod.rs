//! Command handlers
//!
//! One module per subcommand. Handlers receive a [`HandlerContext`] holding
//! the lifecycle service and configuration, and print through the shared
//! [`OutputFormatter`](crate::cli::OutputFormatter).

mod board;
mod comment;
mod common;
mod create;
mod export;
mod list;
mod metrics;
mod seed;
mod show;
mod status;

pub use board::handle_board_command;
pub use comment::handle_comment_command;
pub use common::{HandlerContext, resolve_ticket_id};
pub use create::{CreateParams, handle_create_command};
pub use export::{export_csv, handle_export_command};
pub use list::handle_list_command;
pub use metrics::handle_metrics_command;
pub use seed::handle_seed_command;
pub use show::handle_show_command;
pub use status::handle_status_command;
