//! Raw stored records and their decoding
//!
//! Stores persist tickets and comments as flat string columns. Every load
//! goes through [`decode_ticket`] / [`decode_comment`], which check enum
//! membership, timestamps and ids before handing out a domain value.

use crate::core::{Category, Comment, CommentId, Priority, Status, Ticket, TicketId};
use crate::error::DecodeError;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Ticket row as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(sqlx::FromRow))]
pub struct TicketRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: String,
    pub status: String,
    pub customer_email: String,
    #[serde(default)]
    pub customer_name: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub resolved_at: Option<String>,
}

/// Comment row as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(sqlx::FromRow))]
pub struct CommentRecord {
    pub id: String,
    pub ticket_id: String,
    pub content: String,
    pub author_id: String,
    pub author_name: String,
    pub is_system: bool,
    pub created_at: String,
}

/// Encode a timestamp so that lexical order equals chronological order
#[must_use]
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_timestamp(field: &'static str, value: &str) -> Result<DateTime<Utc>, DecodeError> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| DecodeError::InvalidTimestamp {
            field,
            value: value.to_string(),
        })
}

fn parse_variant<T: FromStr>(field: &'static str, value: &str) -> Result<T, DecodeError> {
    value.parse::<T>().map_err(|_| DecodeError::InvalidEnum {
        field,
        value: value.to_string(),
    })
}

fn require(field: &'static str, value: String) -> Result<String, DecodeError> {
    if value.trim().is_empty() {
        return Err(DecodeError::EmptyField { field });
    }
    Ok(value)
}

impl From<&Ticket> for TicketRecord {
    fn from(ticket: &Ticket) -> Self {
        Self {
            id: ticket.id.to_string(),
            title: ticket.title.clone(),
            description: ticket.description.clone(),
            category: ticket.category.to_string(),
            priority: ticket.priority.to_string(),
            status: ticket.status.to_string(),
            customer_email: ticket.customer_email.clone(),
            customer_name: ticket.customer_name.clone(),
            created_at: format_timestamp(&ticket.created_at),
            updated_at: format_timestamp(&ticket.updated_at),
            resolved_at: ticket.resolved_at.as_ref().map(format_timestamp),
        }
    }
}

impl From<&Comment> for CommentRecord {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id.to_string(),
            ticket_id: comment.ticket_id.to_string(),
            content: comment.content.clone(),
            author_id: comment.author_id.clone(),
            author_name: comment.author_name.clone(),
            is_system: comment.is_system,
            created_at: format_timestamp(&comment.created_at),
        }
    }
}

/// Decode a stored ticket row
///
/// An empty stored `customer_name` decodes as absent.
pub fn decode_ticket(record: TicketRecord) -> Result<Ticket, DecodeError> {
    let id = TicketId::parse_str(&record.id).map_err(|_| DecodeError::InvalidId {
        value: record.id.clone(),
    })?;

    Ok(Ticket {
        id,
        title: require("title", record.title)?,
        description: require("description", record.description)?,
        category: parse_variant::<Category>("category", &record.category)?,
        priority: parse_variant::<Priority>("priority", &record.priority)?,
        status: parse_variant::<Status>("status", &record.status)?,
        customer_email: require("customer_email", record.customer_email)?,
        customer_name: record.customer_name.filter(|name| !name.is_empty()),
        created_at: parse_timestamp("created_at", &record.created_at)?,
        updated_at: parse_timestamp("updated_at", &record.updated_at)?,
        resolved_at: record
            .resolved_at
            .as_deref()
            .map(|value| parse_timestamp("resolved_at", value))
            .transpose()?,
    })
}

/// Decode a stored comment row
pub fn decode_comment(record: CommentRecord) -> Result<Comment, DecodeError> {
    let id = CommentId::parse_str(&record.id).map_err(|_| DecodeError::InvalidId {
        value: record.id.clone(),
    })?;
    let ticket_id = TicketId::parse_str(&record.ticket_id).map_err(|_| DecodeError::InvalidId {
        value: record.ticket_id.clone(),
    })?;

    Ok(Comment {
        id,
        ticket_id,
        content: require("content", record.content)?,
        author_id: record.author_id,
        author_name: record.author_name,
        is_system: record.is_system,
        created_at: parse_timestamp("created_at", &record.created_at)?,
    })
}
