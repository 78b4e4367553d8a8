//! support-desk - Customer support ticket lifecycle, Kanban views and metrics
//!
//! This crate provides the core of a customer-support ticketing system:
//! - Validation of incoming tickets and comments
//! - A lifecycle engine with an append-only audit trail of status changes
//! - Filtering, a three-stage Kanban pipeline, and dashboard metrics
//! - Pluggable storage: in-memory, YAML files, or SQLite

// Allow missing error documentation for internal implementations
#![allow(clippy::missing_errors_doc)]
// Allow some pedantic lints that don't improve code quality
#![allow(clippy::option_if_let_else)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::redundant_closure_for_method_calls)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::module_name_repetitions)]

//! # Writes and their audit trail
//!
//! Every status change goes through [`lifecycle::TicketService::update_status`],
//! which stamps the ticket and appends a system comment using a single clock
//! reading. Comments are append-only and ordered by creation time, ties by
//! insertion order.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use support_desk::lifecycle::TicketService;
//! use support_desk::storage::MemoryStore;
//! use support_desk::core::Status;
//!
//! let service = TicketService::new(Arc::new(MemoryStore::new()));
//! let ticket = service.create_ticket(&input).await?;
//! let ticket = service.update_status(&ticket.id, Status::Resolved, "agent1").await?;
//! assert!(ticket.resolved_at.is_some());
//! ```

pub mod board;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod events;
pub mod lifecycle;
pub mod metrics;
pub mod query;
pub mod seed;
pub mod storage;
pub mod validation;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use error::{Result, SupportDeskError};
pub use lifecycle::TicketService;
