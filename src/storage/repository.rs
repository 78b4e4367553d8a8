use crate::core::{Comment, Status, Ticket, TicketId};
use crate::error::Result;
use crate::query::TicketFilter;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Partial update applied to a stored ticket
///
/// Only the fields the lifecycle engine mutates are patchable; identity,
/// content and `created_at` are fixed once a ticket is inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketPatch {
    pub status: Option<Status>,
    pub updated_at: Option<DateTime<Utc>>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl TicketPatch {
    /// True when the patch changes nothing
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.status.is_none() && self.updated_at.is_none() && self.resolved_at.is_none()
    }

    /// Apply the patch to an in-memory ticket
    pub fn apply_to(&self, ticket: &mut Ticket) {
        if let Some(status) = self.status {
            ticket.status = status;
        }
        if let Some(updated_at) = self.updated_at {
            ticket.updated_at = updated_at;
        }
        if let Some(resolved_at) = self.resolved_at {
            ticket.resolved_at = Some(resolved_at);
        }
    }
}

/// Store adapter for tickets and their comments
///
/// Implementations provide single-row atomicity only; the lifecycle engine
/// does not rely on multi-row transactions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TicketStore: Send + Sync {
    /// Loads a ticket by ID, `None` if it does not exist
    async fn get_by_id(&self, id: &TicketId) -> Result<Option<Ticket>>;

    /// Inserts a new ticket; fails if the id is already present
    async fn insert(&self, ticket: &Ticket) -> Result<()>;

    /// Applies a partial update; fails with `TicketNotFound` for unknown ids
    async fn update_fields(&self, id: &TicketId, patch: TicketPatch) -> Result<()>;

    /// Tickets matching `filter`, newest first
    async fn query_all(&self, filter: &TicketFilter) -> Result<Vec<Ticket>>;

    /// Appends a comment to its ticket's thread
    async fn insert_comment(&self, comment: &Comment) -> Result<()>;

    /// Comments on a ticket, oldest first, ties in insertion order
    async fn comments_by_ticket(&self, id: &TicketId) -> Result<Vec<Comment>>;
}
