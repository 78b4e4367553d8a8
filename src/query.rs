//! Ticket filtering
//!
//! A [`TicketFilter`] is a set of independently optional predicates combined
//! with logical AND. An empty filter matches every ticket. Filtering never
//! mutates its input and always returns matches newest first.

use crate::core::{Category, Priority, Status, Ticket};
use crate::error::{Result, SupportDeskError};
use chrono::{DateTime, Duration, NaiveDate, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Criteria for selecting tickets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    /// Inclusive lower bound on `created_at`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `created_at`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
}

impl TicketFilter {
    /// Filter that matches everything
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    #[must_use]
    pub const fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    #[must_use]
    pub fn with_customer_email(mut self, email: impl Into<String>) -> Self {
        self.customer_email = Some(email.into());
        self
    }

    /// Bound `created_at` on both sides, inclusive
    ///
    /// Stored timestamps carry millisecond precision, so the start is rounded
    /// up and the end truncated to whole milliseconds.
    #[must_use]
    pub fn created_between(
        mut self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Self {
        self.start_date = start.map(round_up_to_millis);
        self.end_date = end.map(truncate_to_millis);
        self
    }

    /// True when no predicate is active
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.priority.is_none()
            && self.category.is_none()
            && self.customer_email.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
    }

    /// Check if a ticket satisfies every active predicate
    #[must_use]
    pub fn matches(&self, ticket: &Ticket) -> bool {
        if self.status.is_some_and(|s| ticket.status != s) {
            return false;
        }
        if self.priority.is_some_and(|p| ticket.priority != p) {
            return false;
        }
        if self.category.is_some_and(|c| ticket.category != c) {
            return false;
        }
        if let Some(ref email) = self.customer_email {
            if ticket.customer_email != *email {
                return false;
            }
        }
        if self.start_date.is_some_and(|start| ticket.created_at < start) {
            return false;
        }
        if self.end_date.is_some_and(|end| ticket.created_at > end) {
            return false;
        }
        true
    }

    /// Apply the filter to an owned collection, newest first
    #[must_use]
    pub fn apply(&self, tickets: Vec<Ticket>) -> Vec<Ticket> {
        let mut filtered: Vec<Ticket> = tickets.into_iter().filter(|t| self.matches(t)).collect();
        filtered.sort_by(|a, b| newest_first(a, b));
        filtered
    }
}

/// Select the tickets matching `filter` without copying them, newest first
#[must_use]
pub fn filter_tickets<'a>(tickets: &'a [Ticket], filter: &TicketFilter) -> Vec<&'a Ticket> {
    let mut filtered: Vec<&Ticket> = tickets.iter().filter(|t| filter.matches(t)).collect();
    filtered.sort_by(|a, b| newest_first(a, b));
    filtered
}

/// `created_at` descending, ties by id ascending
fn newest_first(a: &Ticket, b: &Ticket) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| a.id.cmp(&b.id))
}

/// Drop anything below a millisecond
#[must_use]
pub fn truncate_to_millis(timestamp: DateTime<Utc>) -> DateTime<Utc> {
    timestamp.trunc_subsecs(3)
}

/// Smallest whole-millisecond instant not before `timestamp`
#[must_use]
pub fn round_up_to_millis(timestamp: DateTime<Utc>) -> DateTime<Utc> {
    let truncated = timestamp.trunc_subsecs(3);
    if truncated < timestamp {
        truncated + Duration::milliseconds(1)
    } else {
        truncated
    }
}

#[derive(Debug, Clone, Copy)]
enum Bound {
    Start,
    End,
}

/// Parse a lower date bound: `YYYY-MM-DD` (start of day, UTC) or RFC 3339,
/// rounded up to whole milliseconds
pub fn parse_start_date(value: &str) -> Result<DateTime<Utc>> {
    parse_bound(value, Bound::Start)
}

/// Parse an upper date bound: `YYYY-MM-DD` (last millisecond of the day,
/// UTC) or RFC 3339, truncated to whole milliseconds
pub fn parse_end_date(value: &str) -> Result<DateTime<Utc>> {
    parse_bound(value, Bound::End)
}

fn parse_bound(value: &str, bound: Bound) -> Result<DateTime<Utc>> {
    let value = value.trim();
    let field = match bound {
        Bound::Start => "startDate",
        Bound::End => "endDate",
    };

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        let timestamp = timestamp.with_timezone(&Utc);
        return Ok(match bound {
            Bound::Start => round_up_to_millis(timestamp),
            Bound::End => truncate_to_millis(timestamp),
        });
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        let bound_of_day = match bound {
            Bound::Start => date.and_hms_opt(0, 0, 0),
            Bound::End => date.and_hms_milli_opt(23, 59, 59, 999),
        };
        if let Some(datetime) = bound_of_day {
            return Ok(datetime.and_utc());
        }
    }

    Err(SupportDeskError::validation(
        field,
        format!("'{value}' is not a date. Use YYYY-MM-DD or an RFC 3339 timestamp"),
    ))
}
