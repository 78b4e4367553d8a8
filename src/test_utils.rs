//! Test utilities for support-desk
//!
//! Common fixtures, strategies and helpers shared by unit tests across the
//! crate.

#![cfg(test)]

use crate::core::{Category, FixedClock, Priority, Status, Ticket, TicketBuilder};
use crate::lifecycle::TicketService;
use crate::storage::MemoryStore;
use crate::validation::TicketInput;
use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use std::sync::Arc;

/// Fixed reference instant used by every fixture
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

/// `epoch()` plus `hours`
pub fn at_hour(hours: u32) -> DateTime<Utc> {
    epoch() + Duration::hours(i64::from(hours))
}

/// Create a test ticket with default values
pub fn create_test_ticket(
    title: &str,
    category: Category,
    priority: Priority,
    status: Status,
) -> Ticket {
    TicketBuilder::new()
        .title(title)
        .description(format!("Description for {title}"))
        .category(category)
        .priority(priority)
        .status(status)
        .customer_email(format!(
            "{}@example.com",
            title.to_lowercase().replace(' ', ".")
        ))
        .build()
}

/// A small, varied collection with distinct creation times
pub fn sample_tickets() -> Vec<Ticket> {
    let specs = [
        ("Cannot log in", Category::Technical, Priority::High, Status::Open),
        ("Invoice mismatch", Category::Billing, Priority::Medium, Status::InProgress),
        ("Feature request", Category::General, Priority::Low, Status::Open),
        ("Site down", Category::Technical, Priority::Critical, Status::Resolved),
        ("Refund", Category::Billing, Priority::High, Status::Closed),
        ("Slow dashboard", Category::Technical, Priority::Medium, Status::Open),
    ];

    specs
        .into_iter()
        .enumerate()
        .map(|(i, (title, category, priority, status))| {
            let mut ticket = create_test_ticket(title, category, priority, status);
            ticket.created_at = at_hour(u32::try_from(i).unwrap_or(0));
            ticket.updated_at = ticket.created_at;
            ticket
        })
        .collect()
}

/// Valid creation input matching the documented example
pub fn valid_input() -> TicketInput {
    TicketInput {
        title: "X".to_string(),
        description: "Y".to_string(),
        category: "Technical".to_string(),
        priority: "High".to_string(),
        customer_email: "a@b.com".to_string(),
        customer_name: None,
    }
}

/// Service over an empty in-memory store and a clock fixed at `epoch()`
pub fn memory_service() -> (TicketService, Arc<MemoryStore>, Arc<FixedClock>) {
    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(FixedClock::new(epoch()));
    let service = TicketService::new(store.clone()).with_clock(clock.clone());
    (service, store, clock)
}

/// Arbitrary ticket with random classification and creation time
pub fn ticket_strategy() -> impl Strategy<Value = Ticket> {
    (
        proptest::sample::select(Category::ALL.to_vec()),
        proptest::sample::select(Priority::ALL.to_vec()),
        proptest::sample::select(Status::ALL.to_vec()),
        0u32..72,
        proptest::option::of("[a-z]{1,8}"),
    )
        .prop_map(|(category, priority, status, hour, name)| {
            let mut builder = TicketBuilder::new()
                .category(category)
                .priority(priority)
                .status(status)
                .created_at(at_hour(hour));
            if let Some(name) = name {
                builder = builder.customer_name(name);
            }
            builder.build()
        })
}

/// Collections of up to `max` arbitrary tickets
pub fn tickets_strategy(max: usize) -> impl Strategy<Value = Vec<Ticket>> {
    proptest::collection::vec(ticket_strategy(), 0..=max)
}

/// Assert that two tickets are equal apart from their mutable bookkeeping
pub fn assert_same_identity(left: &Ticket, right: &Ticket) {
    assert_eq!(left.id, right.id, "Ticket IDs don't match");
    assert_eq!(left.title, right.title, "Ticket titles don't match");
    assert_eq!(
        left.description, right.description,
        "Ticket descriptions don't match"
    );
    assert_eq!(left.category, right.category, "Ticket categories don't match");
    assert_eq!(left.priority, right.priority, "Ticket priorities don't match");
    assert_eq!(
        left.customer_email, right.customer_email,
        "Customer emails don't match"
    );
    assert_eq!(
        left.customer_name, right.customer_name,
        "Customer names don't match"
    );
    assert_eq!(left.created_at, right.created_at, "Creation times don't match");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_tickets_are_chronological() {
        let tickets = sample_tickets();
        assert_eq!(tickets.len(), 6);
        assert!(tickets.windows(2).all(|w| w[0].created_at < w[1].created_at));
    }

    #[test]
    fn test_at_hour() {
        assert_eq!(at_hour(2) - epoch(), Duration::hours(2));
    }
}
