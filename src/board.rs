//! Kanban board organization
//!
//! The board is built in three stages, each usable on its own:
//!
//! 1. [`partition_by_status`] splits tickets into the four status columns
//! 2. [`partition_by_category`] splits any collection into three category groups
//! 3. [`sort_by_priority`] orders a group Critical first, keeping input order
//!    among equal priorities
//!
//! No stage copies or mutates tickets; groupings hold references into the
//! caller's collection. Every input ticket lands in exactly one group.

use crate::core::{Category, Priority, Status, Ticket, TicketId};
use crate::error::Result;
use crate::lifecycle::TicketService;
use serde::Serialize;

/// Tickets split into one column per status
#[derive(Debug, Clone, Default)]
pub struct StatusColumns<'a> {
    columns: [Vec<&'a Ticket>; 4],
}

impl<'a> StatusColumns<'a> {
    /// Tickets in the column for `status`
    #[must_use]
    pub fn get(&self, status: Status) -> &[&'a Ticket] {
        &self.columns[status.index()]
    }

    /// Columns in board order, including empty ones
    pub fn iter(&self) -> impl Iterator<Item = (Status, &[&'a Ticket])> + '_ {
        Status::ALL
            .into_iter()
            .map(move |status| (status, self.get(status)))
    }

    /// Total number of tickets across all columns
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Tickets split into one group per category
#[derive(Debug, Clone, Default)]
pub struct CategoryGroups<'a> {
    groups: [Vec<&'a Ticket>; 3],
}

impl<'a> CategoryGroups<'a> {
    /// Tickets in the group for `category`
    #[must_use]
    pub fn get(&self, category: Category) -> &[&'a Ticket] {
        &self.groups[category.index()]
    }

    /// Groups in board order, including empty ones
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[&'a Ticket])> + '_ {
        Category::ALL
            .into_iter()
            .map(move |category| (category, self.get(category)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Split tickets into the four status columns, preserving input order
pub fn partition_by_status<'a, I>(tickets: I) -> StatusColumns<'a>
where
    I: IntoIterator<Item = &'a Ticket>,
{
    let mut columns = StatusColumns::default();
    for ticket in tickets {
        columns.columns[ticket.status.index()].push(ticket);
    }
    columns
}

/// Split tickets into the three category groups, preserving input order
pub fn partition_by_category<'a, I>(tickets: I) -> CategoryGroups<'a>
where
    I: IntoIterator<Item = &'a Ticket>,
{
    let mut groups = CategoryGroups::default();
    for ticket in tickets {
        groups.groups[ticket.category.index()].push(ticket);
    }
    groups
}

/// Order tickets Critical, High, Medium, Low
///
/// The sort is stable: tickets of equal priority keep their input order.
/// Callers wanting a secondary order (e.g. newest first) sort before calling.
#[must_use]
pub fn sort_by_priority<'a>(tickets: &[&'a Ticket]) -> Vec<&'a Ticket> {
    let mut sorted = tickets.to_vec();
    sorted.sort_by_key(|t| t.priority.rank());
    sorted
}

/// Display projection of a ticket on a board card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Card<'a> {
    pub id: &'a TicketId,
    pub title: &'a str,
    /// Customer name when present and non-empty, else the customer email
    pub customer_name: &'a str,
    pub priority: Priority,
}

impl<'a> From<&'a Ticket> for Card<'a> {
    fn from(ticket: &'a Ticket) -> Self {
        Self {
            id: &ticket.id,
            title: &ticket.title,
            customer_name: ticket.customer_display_name(),
            priority: ticket.priority,
        }
    }
}

/// Priority-sorted cards for one category within a column
#[derive(Debug, Clone, Serialize)]
pub struct BoardGroup<'a> {
    pub category: Category,
    pub cards: Vec<Card<'a>>,
}

/// One status column of the board
#[derive(Debug, Clone, Serialize)]
pub struct BoardColumn<'a> {
    pub status: Status,
    pub count: usize,
    pub groups: Vec<BoardGroup<'a>>,
}

/// The full Kanban board: status, then category, then priority
#[derive(Debug, Clone, Serialize)]
pub struct Board<'a> {
    pub columns: Vec<BoardColumn<'a>>,
}

impl<'a> Board<'a> {
    /// Run the three-stage pipeline over `tickets`
    pub fn build<I>(tickets: I) -> Self
    where
        I: IntoIterator<Item = &'a Ticket>,
    {
        let columns = partition_by_status(tickets)
            .iter()
            .map(|(status, column)| BoardColumn {
                status,
                count: column.len(),
                groups: partition_by_category(column.iter().copied())
                    .iter()
                    .map(|(category, group)| BoardGroup {
                        category,
                        cards: sort_by_priority(group).into_iter().map(Card::from).collect(),
                    })
                    .collect(),
            })
            .collect();

        Self { columns }
    }

    /// Column for `status`
    #[must_use]
    pub fn column(&self, status: Status) -> Option<&BoardColumn<'a>> {
        self.columns.iter().find(|c| c.status == status)
    }

    /// Total number of cards on the board
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.iter().map(|c| c.count).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Result of dropping a card onto a column
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The ticket was already in the target column; nothing was written
    Unchanged(Ticket),
    /// The status was updated and an audit comment appended
    Moved(Ticket),
}

impl MoveOutcome {
    #[must_use]
    pub const fn ticket(&self) -> &Ticket {
        match self {
            Self::Unchanged(ticket) | Self::Moved(ticket) => ticket,
        }
    }
}

/// Move a ticket to the column for `target`
///
/// Reads the ticket's current status from the store. Dropping a card on its
/// own column is a no-op; any other column goes through
/// [`TicketService::update_status`].
pub async fn move_ticket(
    service: &TicketService,
    ticket_id: &TicketId,
    target: Status,
    actor_id: &str,
) -> Result<MoveOutcome> {
    let current = service.get_ticket(ticket_id).await?;
    if current.status == target {
        tracing::debug!(ticket = %ticket_id, status = %target, "Drop on same column ignored");
        return Ok(MoveOutcome::Unchanged(current));
    }

    let moved = service.update_status(ticket_id, target, actor_id).await?;
    Ok(MoveOutcome::Moved(moved))
}
