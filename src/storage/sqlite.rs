//! SQLite store built on sqlx

use super::record::{
    CommentRecord, TicketRecord, decode_comment, decode_ticket, format_timestamp,
};
use super::repository::{TicketPatch, TicketStore};
use crate::core::{Comment, Ticket, TicketId};
use crate::error::{Result, SupportDeskError};
use crate::query::{TicketFilter, round_up_to_millis, truncate_to_millis};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{QueryBuilder, Sqlite};
use std::path::Path;

const SCHEMA: [&str; 7] = [
    "CREATE TABLE IF NOT EXISTS tickets (
        id TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        description TEXT NOT NULL,
        category TEXT NOT NULL CHECK (category IN ('Technical', 'Billing', 'General')),
        priority TEXT NOT NULL CHECK (priority IN ('Low', 'Medium', 'High', 'Critical')),
        status TEXT NOT NULL CHECK (status IN ('Open', 'In Progress', 'Resolved', 'Closed')),
        customer_email TEXT NOT NULL,
        customer_name TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        resolved_at TEXT
    )",
    "CREATE TABLE IF NOT EXISTS comments (
        seq INTEGER PRIMARY KEY AUTOINCREMENT,
        id TEXT NOT NULL UNIQUE,
        ticket_id TEXT NOT NULL REFERENCES tickets(id),
        content TEXT NOT NULL,
        author_id TEXT NOT NULL,
        author_name TEXT NOT NULL,
        is_system INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_tickets_status ON tickets(status)",
    "CREATE INDEX IF NOT EXISTS idx_tickets_priority ON tickets(priority)",
    "CREATE INDEX IF NOT EXISTS idx_tickets_category ON tickets(category)",
    "CREATE INDEX IF NOT EXISTS idx_tickets_created_at ON tickets(created_at)",
    "CREATE INDEX IF NOT EXISTS idx_comments_ticket_id ON comments(ticket_id)",
];

const TICKET_COLUMNS: &str = "id, title, description, category, priority, status, \
     customer_email, customer_name, created_at, updated_at, resolved_at";

/// Store backed by a SQLite database file
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open or create the database at `path` and apply the schema
    pub async fn open(path: &Path) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;
        tracing::debug!(path = %path.display(), "Opened SQLite store");
        Self::with_pool(pool).await
    }

    /// Private in-memory database; a single connection keeps it alive
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .in_memory(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        Self::with_pool(pool).await
    }

    /// Wrap an existing pool, creating tables if missing
    pub async fn with_pool(pool: SqlitePool) -> Result<Self> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&pool).await?;
        }
        Ok(Self { pool })
    }
}

#[async_trait]
impl TicketStore for SqliteStore {
    async fn get_by_id(&self, id: &TicketId) -> Result<Option<Ticket>> {
        let record: Option<TicketRecord> =
            sqlx::query_as(&format!("SELECT {TICKET_COLUMNS} FROM tickets WHERE id = ?"))
                .bind(id.to_string())
                .fetch_optional(&self.pool)
                .await?;

        Ok(record.map(decode_ticket).transpose()?)
    }

    async fn insert(&self, ticket: &Ticket) -> Result<()> {
        let record = TicketRecord::from(ticket);
        sqlx::query(&format!(
            "INSERT INTO tickets ({TICKET_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
        ))
        .bind(record.id)
        .bind(record.title)
        .bind(record.description)
        .bind(record.category)
        .bind(record.priority)
        .bind(record.status)
        .bind(record.customer_email)
        .bind(record.customer_name)
        .bind(record.created_at)
        .bind(record.updated_at)
        .bind(record.resolved_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update_fields(&self, id: &TicketId, patch: TicketPatch) -> Result<()> {
        if patch.is_empty() {
            return match self.get_by_id(id).await? {
                Some(_) => Ok(()),
                None => Err(SupportDeskError::not_found(id)),
            };
        }

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE tickets SET ");
        let mut sets = builder.separated(", ");
        if let Some(status) = patch.status {
            sets.push("status = ").push_bind_unseparated(status.as_str());
        }
        if let Some(updated_at) = patch.updated_at {
            sets.push("updated_at = ")
                .push_bind_unseparated(format_timestamp(&updated_at));
        }
        if let Some(resolved_at) = patch.resolved_at {
            sets.push("resolved_at = ")
                .push_bind_unseparated(format_timestamp(&resolved_at));
        }
        builder.push(" WHERE id = ").push_bind(id.to_string());

        let result = builder.build().execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(SupportDeskError::not_found(id));
        }
        Ok(())
    }

    async fn query_all(&self, filter: &TicketFilter) -> Result<Vec<Ticket>> {
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {TICKET_COLUMNS} FROM tickets WHERE 1=1"));

        if let Some(status) = filter.status {
            builder.push(" AND status = ").push_bind(status.as_str());
        }
        if let Some(priority) = filter.priority {
            builder.push(" AND priority = ").push_bind(priority.as_str());
        }
        if let Some(category) = filter.category {
            builder.push(" AND category = ").push_bind(category.as_str());
        }
        if let Some(ref email) = filter.customer_email {
            builder.push(" AND customer_email = ").push_bind(email.clone());
        }
        if let Some(start) = filter.start_date {
            builder
                .push(" AND created_at >= ")
                .push_bind(format_timestamp(&round_up_to_millis(start)));
        }
        if let Some(end) = filter.end_date {
            builder
                .push(" AND created_at <= ")
                .push_bind(format_timestamp(&truncate_to_millis(end)));
        }
        builder.push(" ORDER BY created_at DESC, id ASC");

        let records: Vec<TicketRecord> = builder.build_query_as().fetch_all(&self.pool).await?;
        records
            .into_iter()
            .map(|record| decode_ticket(record).map_err(SupportDeskError::from))
            .collect()
    }

    async fn insert_comment(&self, comment: &Comment) -> Result<()> {
        let record = CommentRecord::from(comment);
        let result = sqlx::query(
            "INSERT INTO comments (id, ticket_id, content, author_id, author_name, is_system, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(record.id)
        .bind(record.ticket_id)
        .bind(record.content)
        .bind(record.author_id)
        .bind(record.author_name)
        .bind(record.is_system)
        .bind(record.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_foreign_key_violation() => {
                Err(SupportDeskError::not_found(comment.ticket_id))
            },
            Err(e) => Err(e.into()),
        }
    }

    async fn comments_by_ticket(&self, id: &TicketId) -> Result<Vec<Comment>> {
        let records: Vec<CommentRecord> = sqlx::query_as(
            "SELECT id, ticket_id, content, author_id, author_name, is_system, created_at
             FROM comments WHERE ticket_id = ? ORDER BY created_at ASC, seq ASC",
        )
        .bind(id.to_string())
        .fetch_all(&self.pool)
        .await?;

        records
            .into_iter()
            .map(|record| decode_comment(record).map_err(SupportDeskError::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CommentBuilder, Priority, Status};
    use crate::test_utils::{at_hour, sample_tickets};
    use tempfile::TempDir;

    async fn seeded() -> SqliteStore {
        let store = SqliteStore::in_memory().await.unwrap();
        for ticket in sample_tickets() {
            store.insert(&ticket).await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = SqliteStore::in_memory().await.unwrap();
        let ticket = sample_tickets().remove(3);
        store.insert(&ticket).await.unwrap();

        assert_eq!(store.get_by_id(&ticket.id).await.unwrap(), Some(ticket));
        assert_eq!(store.get_by_id(&TicketId::new()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_query_all_builds_where_clause() {
        let store = seeded().await;

        let all = store.query_all(&TicketFilter::new()).await.unwrap();
        assert_eq!(all.len(), 6);
        assert_eq!(all[0].title, "Slow dashboard");

        let filtered = store
            .query_all(
                &TicketFilter::new()
                    .with_status(Status::Open)
                    .with_priority(Priority::High),
            )
            .await
            .unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title, "Cannot log in");

        let window = store
            .query_all(&TicketFilter::new().created_between(Some(at_hour(1)), Some(at_hour(3))))
            .await
            .unwrap();
        assert_eq!(window.len(), 3);
    }

    #[tokio::test]
    async fn test_update_fields() {
        let store = seeded().await;
        let ticket = store.query_all(&TicketFilter::new()).await.unwrap().remove(0);

        store
            .update_fields(
                &ticket.id,
                TicketPatch {
                    status: Some(Status::InProgress),
                    updated_at: Some(at_hour(10)),
                    resolved_at: None,
                },
            )
            .await
            .unwrap();

        let loaded = store.get_by_id(&ticket.id).await.unwrap().unwrap();
        assert_eq!(loaded.status, Status::InProgress);
        assert_eq!(loaded.updated_at, at_hour(10));
        assert_eq!(loaded.created_at, ticket.created_at);

        let err = store
            .update_fields(&TicketId::new(), TicketPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, SupportDeskError::TicketNotFound { .. }));
    }

    #[tokio::test]
    async fn test_comment_order_uses_insertion_tiebreak() {
        let store = seeded().await;
        let ticket = store.query_all(&TicketFilter::new()).await.unwrap().remove(0);

        for text in ["a", "b", "c"] {
            let comment = CommentBuilder::new()
                .ticket_id(ticket.id)
                .content(text)
                .created_at(at_hour(7))
                .build();
            store.insert_comment(&comment).await.unwrap();
        }

        let texts: Vec<String> = store
            .comments_by_ticket(&ticket.id)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.content)
            .collect();
        assert_eq!(texts, ["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_comment_for_unknown_ticket() {
        let store = SqliteStore::in_memory().await.unwrap();
        let comment = CommentBuilder::new().ticket_id(TicketId::new()).build();
        let err = store.insert_comment(&comment).await.unwrap_err();
        assert!(matches!(err, SupportDeskError::TicketNotFound { .. }));
    }

    #[tokio::test]
    async fn test_file_database_persists() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tickets.db");
        let ticket = sample_tickets().remove(0);

        {
            let store = SqliteStore::open(&path).await.unwrap();
            store.insert(&ticket).await.unwrap();
            store.pool.close().await;
        }

        let reopened = SqliteStore::open(&path).await.unwrap();
        assert_eq!(reopened.get_by_id(&ticket.id).await.unwrap(), Some(ticket));
    }
}
