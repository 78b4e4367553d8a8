//! Dashboard metrics
//!
//! Reduces a ticket collection into workload counts and the average time to
//! resolution.

use crate::core::{Category, Priority, Status, Ticket};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Aggregated view of a ticket collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    /// Tickets whose status is `Open`
    pub total_open: usize,
    /// Count per priority; every priority is present
    pub by_priority: BTreeMap<Priority, usize>,
    /// Count per category; every category is present
    pub by_category: BTreeMap<Category, usize>,
    /// Mean hours from creation to resolution, rounded to 2 decimals
    pub average_resolution_time: f64,
}

/// Compute dashboard metrics for `tickets`
///
/// Only tickets that are currently `Resolved` and carry a `resolved_at`
/// contribute to the average. A ticket that was resolved and later reopened
/// keeps its timestamp but is not counted.
#[must_use]
pub fn compute_metrics<'a, I>(tickets: I) -> DashboardMetrics
where
    I: IntoIterator<Item = &'a Ticket>,
{
    let mut by_priority: BTreeMap<Priority, usize> = Priority::ALL.iter().map(|p| (*p, 0)).collect();
    let mut by_category: BTreeMap<Category, usize> = Category::ALL.iter().map(|c| (*c, 0)).collect();
    let mut total_open = 0;
    let mut resolved_count: u32 = 0;
    let mut resolution_millis: i64 = 0;

    for ticket in tickets {
        if ticket.status == Status::Open {
            total_open += 1;
        }
        *by_priority.entry(ticket.priority).or_default() += 1;
        *by_category.entry(ticket.category).or_default() += 1;

        if ticket.status == Status::Resolved {
            if let Some(duration) = ticket.resolution_time() {
                resolution_millis += duration.num_milliseconds();
                resolved_count += 1;
            }
        }
    }

    DashboardMetrics {
        total_open,
        by_priority,
        by_category,
        average_resolution_time: average_hours(resolution_millis, resolved_count),
    }
}

#[allow(clippy::cast_precision_loss)]
fn average_hours(total_millis: i64, count: u32) -> f64 {
    if count == 0 {
        return 0.0;
    }
    let avg_millis = total_millis as f64 / f64::from(count);
    round_to_hundredths(avg_millis / MILLIS_PER_HOUR)
}

/// Round half away from zero to two decimal places
#[must_use]
pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
