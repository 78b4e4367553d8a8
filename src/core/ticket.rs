use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(Uuid);

impl TicketId {
    /// Generate a fresh random id
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse a ticket id from its string form
    pub fn parse_str(s: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(s).map(Self)
    }

    /// First eight characters, for compact display
    #[must_use]
    pub fn short(&self) -> String {
        self.0.to_string()[..8].to_string()
    }

    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TicketId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Area of the customer's problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Technical,
    Billing,
    General,
}

impl Category {
    /// All categories in board order
    pub const ALL: [Self; 3] = [Self::Technical, Self::Billing, Self::General];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Technical => "Technical",
            Self::Billing => "Billing",
            Self::General => "General",
        }
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

/// Urgency of a ticket
///
/// Variants are declared from most to least urgent, so the derived `Ord`
/// sorts `Critical` first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    /// All priorities from least to most urgent, the order dashboards list them
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }

    /// Sort rank: Critical = 0, High = 1, Medium = 2, Low = 3
    #[must_use]
    pub const fn rank(self) -> u8 {
        self as u8
    }
}

/// Lifecycle state of a ticket
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Status {
    #[default]
    Open,
    #[serde(rename = "In Progress")]
    InProgress,
    Resolved,
    Closed,
}

impl Status {
    /// All statuses in column order
    pub const ALL: [Self; 4] = [Self::Open, Self::InProgress, Self::Resolved, Self::Closed];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
            Self::Closed => "Closed",
        }
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

macro_rules! impl_display_and_parse {
    ($ty:ty, $label:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .into_iter()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| UnknownVariant {
                        kind: $label,
                        value: s.to_string(),
                        expected: Self::ALL.iter().map(|v| v.as_str()).collect(),
                    })
            }
        }
    };
}

impl_display_and_parse!(Category, "category");
impl_display_and_parse!(Priority, "priority");
impl_display_and_parse!(Status, "status");

/// A string did not name any variant of a ticket enum
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
    pub expected: Vec<&'static str>,
}

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid {}. Must be one of: {}",
            self.kind,
            self.expected.join(", ")
        )
    }
}

impl std::error::Error for UnknownVariant {}

/// A customer-reported issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: TicketId,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub priority: Priority,
    pub status: Status,
    pub customer_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Set when the ticket last moved into `Resolved`; kept when it leaves
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
}

impl Ticket {
    /// Name shown for the customer: the name when present, else the email
    #[must_use]
    pub fn customer_display_name(&self) -> &str {
        match self.customer_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.customer_email,
        }
    }

    /// Elapsed time between creation and resolution, if the ticket has a
    /// resolution timestamp
    #[must_use]
    pub fn resolution_time(&self) -> Option<chrono::Duration> {
        self.resolved_at.map(|resolved| resolved - self.created_at)
    }
}

/// A ticket together with its comment thread
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketDetail {
    #[serde(flatten)]
    pub ticket: Ticket,
    pub comments: Vec<super::Comment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_display_names() {
        for status in Status::ALL {
            assert_eq!(status.to_string().parse::<Status>().unwrap(), status);
        }
        assert_eq!(Status::InProgress.to_string(), "In Progress");
    }

    #[test]
    fn test_unknown_variant_lists_valid_set() {
        let err = "Urgent".parse::<Priority>().unwrap_err();
        assert_eq!(err.kind, "priority");
        assert_eq!(
            err.to_string(),
            "Invalid priority. Must be one of: Low, Medium, High, Critical"
        );
        assert!("technical".parse::<Category>().is_err());
    }

    #[test]
    fn test_priority_rank() {
        assert_eq!(Priority::Critical.rank(), 0);
        assert_eq!(Priority::High.rank(), 1);
        assert_eq!(Priority::Medium.rank(), 2);
        assert_eq!(Priority::Low.rank(), 3);
        assert!(Priority::Critical < Priority::Low);
    }

    #[test]
    fn test_ticket_json_field_names() {
        let ticket = crate::core::TicketBuilder::new()
            .title("Printer on fire")
            .customer_email("a@b.com")
            .status(Status::InProgress)
            .build();
        let json = serde_json::to_value(&ticket).unwrap();

        assert_eq!(json["status"], "In Progress");
        assert_eq!(json["customerEmail"], "a@b.com");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("resolvedAt").is_none());
        assert!(json.get("customerName").is_none());
    }

    #[test]
    fn test_customer_display_name_falls_back_to_email() {
        let mut ticket = crate::core::TicketBuilder::new()
            .customer_email("jane@example.com")
            .build();
        assert_eq!(ticket.customer_display_name(), "jane@example.com");

        ticket.customer_name = Some(String::new());
        assert_eq!(ticket.customer_display_name(), "jane@example.com");

        ticket.customer_name = Some("Jane".to_string());
        assert_eq!(ticket.customer_display_name(), "Jane");
    }
}
