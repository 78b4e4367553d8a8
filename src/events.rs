//! Ticket change notifications
//!
//! A [`TicketService`](crate::lifecycle::TicketService) holding an
//! [`EventBus`] publishes one [`TicketEvent`] per successful write. Delivery is
//! best effort: a send with no subscribers is not an error.

use crate::core::{Comment, Status, Ticket, TicketId};
use tokio::sync::broadcast;

const DEFAULT_CAPACITY: usize = 100;

/// Change applied to a ticket
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketEvent {
    Created {
        ticket: Ticket,
    },
    StatusChanged {
        ticket_id: TicketId,
        old_status: Status,
        new_status: Status,
    },
    CommentAdded {
        comment: Comment,
    },
}

/// Broadcast channel for [`TicketEvent`]s
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<TicketEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl EventBus {
    /// Create a bus that buffers up to `capacity` events per lagging receiver
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TicketEvent> {
        self.sender.subscribe()
    }

    pub fn notify_ticket_created(&self, ticket: &Ticket) {
        self.publish(TicketEvent::Created {
            ticket: ticket.clone(),
        });
    }

    pub fn notify_status_changed(&self, ticket_id: &TicketId, old_status: Status, new_status: Status) {
        self.publish(TicketEvent::StatusChanged {
            ticket_id: *ticket_id,
            old_status,
            new_status,
        });
    }

    pub fn notify_comment_added(&self, comment: &Comment) {
        self.publish(TicketEvent::CommentAdded {
            comment: comment.clone(),
        });
    }

    // the write itself is logged by the lifecycle engine
    fn publish(&self, event: TicketEvent) {
        let receivers = self.sender.send(event).unwrap_or(0);
        tracing::trace!(receivers, "Published ticket event");
    }
}
