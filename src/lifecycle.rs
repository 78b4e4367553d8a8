//! Ticket lifecycle engine
//!
//! [`TicketService`] owns every write: creating tickets, moving them between
//! statuses with an audit trail, and appending comments. Any status may move
//! to any other; there is no terminal state.

use crate::core::{Clock, Comment, Status, SystemClock, Ticket, TicketDetail, TicketId};
use crate::error::{Result, SupportDeskError};
use crate::events::EventBus;
use crate::metrics::{DashboardMetrics, compute_metrics};
use crate::query::TicketFilter;
use crate::storage::{TicketPatch, TicketStore};
use crate::validation::{self, TicketInput};
use std::sync::Arc;

/// Lifecycle operations over an injected store and clock
#[derive(Clone)]
pub struct TicketService {
    store: Arc<dyn TicketStore>,
    clock: Arc<dyn Clock>,
    events: Option<EventBus>,
}

impl std::fmt::Debug for TicketService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TicketService")
            .field("store", &"Arc<dyn TicketStore>")
            .field("clock", &"Arc<dyn Clock>")
            .field("events", &self.events.is_some())
            .finish()
    }
}

impl TicketService {
    /// Create a service using the system clock
    pub fn new(store: Arc<dyn TicketStore>) -> Self {
        Self {
            store,
            clock: Arc::new(SystemClock),
            events: None,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Publish change notifications on `events`
    #[must_use]
    pub fn with_events(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    pub fn store(&self) -> &Arc<dyn TicketStore> {
        &self.store
    }

    pub const fn events(&self) -> Option<&EventBus> {
        self.events.as_ref()
    }

    /// Validate `input` and persist a new `Open` ticket
    pub async fn create_ticket(&self, input: &TicketInput) -> Result<Ticket> {
        let valid = validation::ticket_input(input)?;
        let now = self.clock.now();

        let ticket = Ticket {
            id: TicketId::new(),
            title: valid.title,
            description: valid.description,
            category: valid.category,
            priority: valid.priority,
            status: Status::Open,
            customer_email: valid.customer_email,
            customer_name: valid.customer_name,
            created_at: now,
            updated_at: now,
            resolved_at: None,
        };

        self.store.insert(&ticket).await?;
        tracing::info!(ticket_id = %ticket.id, priority = %ticket.priority, "Created ticket");

        if let Some(events) = &self.events {
            events.notify_ticket_created(&ticket);
        }
        Ok(ticket)
    }

    /// Load a ticket, failing with `TicketNotFound` if it does not exist
    pub async fn get_ticket(&self, id: &TicketId) -> Result<Ticket> {
        tracing::debug!(ticket_id = %id, "Loading ticket");
        self.store
            .get_by_id(id)
            .await?
            .ok_or_else(|| SupportDeskError::not_found(id))
    }

    /// Load a ticket with its comment thread, oldest comment first
    pub async fn get_ticket_detail(&self, id: &TicketId) -> Result<TicketDetail> {
        let ticket = self.get_ticket(id).await?;
        let comments = self.store.comments_by_ticket(id).await?;
        Ok(TicketDetail { ticket, comments })
    }

    /// Tickets matching `filter`, newest first
    pub async fn list_tickets(&self, filter: &TicketFilter) -> Result<Vec<Ticket>> {
        let tickets = self.store.query_all(filter).await?;
        tracing::debug!(count = tickets.len(), "Listed tickets");
        Ok(tickets)
    }

    /// Move a ticket to `new_status` and append the audit comment
    ///
    /// The write happens even when `new_status` equals the current status;
    /// callers wanting no-op semantics check first. `resolved_at` is set only
    /// when the target is `Resolved` and is never cleared.
    ///
    /// The status write and the comment insert are two store calls. If the
    /// comment insert fails, the status change stays applied and the error is
    /// returned.
    pub async fn update_status(
        &self,
        id: &TicketId,
        new_status: Status,
        actor_id: &str,
    ) -> Result<Ticket> {
        let mut ticket = self.get_ticket(id).await?;
        let old_status = ticket.status;
        let now = self.clock.now();

        let patch = TicketPatch {
            status: Some(new_status),
            updated_at: Some(now),
            resolved_at: (new_status == Status::Resolved).then_some(now),
        };
        self.store.update_fields(id, patch.clone()).await?;
        patch.apply_to(&mut ticket);

        tracing::info!(
            ticket_id = %id,
            from = %old_status,
            to = %new_status,
            actor = actor_id,
            "Updated ticket status"
        );

        let audit = Comment::status_change(*id, new_status, actor_id.to_string(), now);
        if let Err(e) = self.store.insert_comment(&audit).await {
            tracing::error!(
                ticket_id = %id,
                error = %e,
                "Status updated but audit comment could not be recorded"
            );
            return Err(e);
        }

        if let Some(events) = &self.events {
            events.notify_status_changed(id, old_status, new_status);
            events.notify_comment_added(&audit);
        }
        Ok(ticket)
    }

    /// [`update_status`](Self::update_status) with an unparsed status name
    pub async fn update_status_str(
        &self,
        id: &TicketId,
        new_status: &str,
        actor_id: &str,
    ) -> Result<Ticket> {
        let status = validation::status(new_status)?;
        self.update_status(id, status, actor_id).await
    }

    /// Append an agent comment; the ticket's `updated_at` is left alone
    pub async fn add_comment(
        &self,
        id: &TicketId,
        content: &str,
        author_id: &str,
        author_name: &str,
    ) -> Result<Comment> {
        let content = validation::comment_content(content)?;
        self.get_ticket(id).await?;

        let comment = Comment::new(
            *id,
            content,
            author_id.to_string(),
            author_name.to_string(),
            self.clock.now(),
        );
        self.store.insert_comment(&comment).await?;
        tracing::info!(ticket_id = %id, author = author_name, "Added comment");

        if let Some(events) = &self.events {
            events.notify_comment_added(&comment);
        }
        Ok(comment)
    }

    /// Dashboard metrics over every stored ticket
    pub async fn dashboard_metrics(&self) -> Result<DashboardMetrics> {
        let tickets = self.store.query_all(&TicketFilter::new()).await?;
        Ok(compute_metrics(&tickets))
    }
}
