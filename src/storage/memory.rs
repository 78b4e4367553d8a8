use super::repository::{TicketPatch, TicketStore};
use crate::core::{Comment, Ticket, TicketId};
use crate::error::{Result, SupportDeskError};
use crate::query::TicketFilter;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

#[derive(Debug, Default)]
struct MemoryState {
    tickets: HashMap<TicketId, Ticket>,
    // insertion order is the tiebreaker for equal timestamps
    comments: Vec<Comment>,
}

/// In-process store used by tests and the `memory` backend
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tickets held
    pub fn len(&self) -> usize {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .tickets
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl TicketStore for MemoryStore {
    async fn get_by_id(&self, id: &TicketId) -> Result<Option<Ticket>> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        Ok(state.tickets.get(id).cloned())
    }

    async fn insert(&self, ticket: &Ticket) -> Result<()> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if state.tickets.contains_key(&ticket.id) {
            return Err(SupportDeskError::Storage(format!(
                "Ticket {} already exists",
                ticket.id
            )));
        }
        state.tickets.insert(ticket.id, ticket.clone());
        Ok(())
    }

    async fn update_fields(&self, id: &TicketId, patch: TicketPatch) -> Result<()> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let ticket = state
            .tickets
            .get_mut(id)
            .ok_or_else(|| SupportDeskError::not_found(id))?;
        patch.apply_to(ticket);
        Ok(())
    }

    async fn query_all(&self, filter: &TicketFilter) -> Result<Vec<Ticket>> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        Ok(filter.apply(state.tickets.values().cloned().collect()))
    }

    async fn insert_comment(&self, comment: &Comment) -> Result<()> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if !state.tickets.contains_key(&comment.ticket_id) {
            return Err(SupportDeskError::not_found(comment.ticket_id));
        }
        state.comments.push(comment.clone());
        Ok(())
    }

    async fn comments_by_ticket(&self, id: &TicketId) -> Result<Vec<Comment>> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        let mut comments: Vec<Comment> = state
            .comments
            .iter()
            .filter(|comment| comment.ticket_id == *id)
            .cloned()
            .collect();
        comments.sort_by_key(|comment| comment.created_at);
        Ok(comments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CommentBuilder, Status};
    use crate::test_utils::{at_hour, sample_tickets};

    async fn seeded() -> MemoryStore {
        let store = MemoryStore::new();
        for ticket in sample_tickets() {
            store.insert(&ticket).await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = MemoryStore::new();
        assert!(store.is_empty());

        let ticket = sample_tickets().remove(0);
        store.insert(&ticket).await.unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get_by_id(&ticket.id).await.unwrap(), Some(ticket));
        assert_eq!(store.get_by_id(&TicketId::new()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_duplicate_insert_fails() {
        let store = MemoryStore::new();
        let ticket = sample_tickets().remove(0);
        store.insert(&ticket).await.unwrap();
        assert!(store.insert(&ticket).await.is_err());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_query_is_newest_first_and_filtered() {
        let store = seeded().await;

        let all = store.query_all(&TicketFilter::new()).await.unwrap();
        assert_eq!(all.len(), 6);
        assert!(all.windows(2).all(|w| w[0].created_at >= w[1].created_at));

        let open = store
            .query_all(&TicketFilter::new().with_status(Status::Open))
            .await
            .unwrap();
        assert_eq!(open.len(), 3);
        assert_eq!(open[0].title, "Slow dashboard");
    }

    #[tokio::test]
    async fn test_update_unknown_ticket() {
        let store = MemoryStore::new();
        let err = store
            .update_fields(&TicketId::new(), TicketPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, SupportDeskError::TicketNotFound { .. }));
    }

    #[tokio::test]
    async fn test_comments_keep_insertion_order_on_ties() {
        let store = seeded().await;
        let ticket = store.query_all(&TicketFilter::new()).await.unwrap().remove(0);

        for (hour, text) in [(2, "second"), (1, "first"), (2, "third")] {
            let comment = CommentBuilder::new()
                .ticket_id(ticket.id)
                .content(text)
                .created_at(at_hour(hour))
                .build();
            store.insert_comment(&comment).await.unwrap();
        }

        let thread: Vec<String> = store
            .comments_by_ticket(&ticket.id)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.content)
            .collect();
        assert_eq!(thread, ["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_comment_on_unknown_ticket_fails() {
        let store = MemoryStore::new();
        let comment = CommentBuilder::new().ticket_id(TicketId::new()).build();
        assert!(store.insert_comment(&comment).await.is_err());
    }
}
