use super::TicketId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Author name recorded on audit comments
pub const SYSTEM_AUTHOR_NAME: &str = "System";

/// Unique identifier for a comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(Uuid);

impl CommentId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse_str(s: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(s).map(Self)
    }
}

impl Default for CommentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An entry in a ticket's append-only thread
///
/// Comments are either written by an agent or generated by the lifecycle
/// engine to record a status change (`is_system`). They are never edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub ticket_id: TicketId,
    pub content: String,
    pub author_id: String,
    pub author_name: String,
    pub is_system: bool,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Agent-authored comment
    #[must_use]
    pub fn new(
        ticket_id: TicketId,
        content: String,
        author_id: String,
        author_name: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: CommentId::new(),
            ticket_id,
            content,
            author_id,
            author_name,
            is_system: false,
            created_at,
        }
    }

    /// Audit entry for a status change performed by `actor_id`
    #[must_use]
    pub fn status_change(
        ticket_id: TicketId,
        status: super::Status,
        actor_id: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: CommentId::new(),
            ticket_id,
            content: format!("Status changed to {status}"),
            author_id: actor_id,
            author_name: SYSTEM_AUTHOR_NAME.to_string(),
            is_system: true,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Status;

    #[test]
    fn test_status_change_comment() {
        let now = Utc::now();
        let comment =
            Comment::status_change(TicketId::new(), Status::InProgress, "agent1".into(), now);

        assert_eq!(comment.content, "Status changed to In Progress");
        assert_eq!(comment.author_name, "System");
        assert_eq!(comment.author_id, "agent1");
        assert!(comment.is_system);
        assert_eq!(comment.created_at, now);
    }

    #[test]
    fn test_comment_json_field_names() {
        let comment = Comment::new(
            TicketId::new(),
            "Looking into it".into(),
            "u1".into(),
            "Alice".into(),
            Utc::now(),
        );
        let json = serde_json::to_value(&comment).unwrap();
        for key in ["id", "ticketId", "content", "authorId", "authorName", "isSystem", "createdAt"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert_eq!(json["isSystem"], false);
    }
}
