use super::{Category, Comment, CommentId, Priority, Status, Ticket, TicketId};
use chrono::{DateTime, Utc};

/// Builder for creating Ticket instances
///
/// Bypasses validation; intended for fixtures, seeding and benchmarks.
/// Production writes go through [`crate::lifecycle::TicketService`].
#[derive(Default)]
pub struct TicketBuilder {
    id: Option<TicketId>,
    title: Option<String>,
    description: Option<String>,
    category: Option<Category>,
    priority: Option<Priority>,
    status: Option<Status>,
    customer_email: Option<String>,
    customer_name: Option<String>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    resolved_at: Option<DateTime<Utc>>,
}

impl TicketBuilder {
    /// Create a new ticket builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ticket ID
    #[must_use]
    pub fn id(mut self, id: TicketId) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the title
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the category
    #[must_use]
    pub const fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Set the priority
    #[must_use]
    pub const fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Set the status
    #[must_use]
    pub const fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    /// Set the customer email
    #[must_use]
    pub fn customer_email(mut self, email: impl Into<String>) -> Self {
        self.customer_email = Some(email.into());
        self
    }

    /// Set the customer name
    #[must_use]
    pub fn customer_name(mut self, name: impl Into<String>) -> Self {
        self.customer_name = Some(name.into());
        self
    }

    /// Set `created_at`; `updated_at` defaults to the same instant
    #[must_use]
    pub const fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Set `updated_at` timestamp
    #[must_use]
    pub const fn updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = Some(updated_at);
        self
    }

    /// Set `resolved_at` timestamp
    #[must_use]
    pub const fn resolved_at(mut self, resolved_at: DateTime<Utc>) -> Self {
        self.resolved_at = Some(resolved_at);
        self
    }

    /// Build the ticket
    pub fn build(self) -> Ticket {
        let created_at = self.created_at.unwrap_or_else(Utc::now);
        Ticket {
            id: self.id.unwrap_or_default(),
            title: self.title.unwrap_or_else(|| "Untitled".to_string()),
            description: self.description.unwrap_or_else(|| "No description".to_string()),
            category: self.category.unwrap_or(Category::General),
            priority: self.priority.unwrap_or(Priority::Medium),
            status: self.status.unwrap_or_default(),
            customer_email: self
                .customer_email
                .unwrap_or_else(|| "customer@example.com".to_string()),
            customer_name: self.customer_name,
            created_at,
            updated_at: self.updated_at.unwrap_or(created_at),
            resolved_at: self.resolved_at,
        }
    }
}

/// Builder for creating Comment instances
#[derive(Default)]
pub struct CommentBuilder {
    ticket_id: Option<TicketId>,
    content: Option<String>,
    author_id: Option<String>,
    author_name: Option<String>,
    is_system: bool,
    created_at: Option<DateTime<Utc>>,
}

impl CommentBuilder {
    /// Create a new comment builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the owning ticket
    #[must_use]
    pub fn ticket_id(mut self, ticket_id: TicketId) -> Self {
        self.ticket_id = Some(ticket_id);
        self
    }

    /// Set the content
    #[must_use]
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Set the author
    #[must_use]
    pub fn author(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.author_id = Some(id.into());
        self.author_name = Some(name.into());
        self
    }

    /// Mark as a system comment
    #[must_use]
    pub const fn system(mut self, is_system: bool) -> Self {
        self.is_system = is_system;
        self
    }

    /// Set `created_at` timestamp
    #[must_use]
    pub const fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Build the comment
    pub fn build(self) -> Comment {
        Comment {
            id: CommentId::new(),
            ticket_id: self.ticket_id.unwrap_or_default(),
            content: self.content.unwrap_or_default(),
            author_id: self.author_id.unwrap_or_default(),
            author_name: self.author_name.unwrap_or_default(),
            is_system: self.is_system,
            created_at: self.created_at.unwrap_or_else(Utc::now),
        }
    }
}
