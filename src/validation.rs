//! Input validation
//!
//! Pure checks that run before anything reaches the lifecycle engine. Each
//! check returns the normalized (trimmed, typed) value or a
//! [`SupportDeskError::Validation`] naming the offending field.

use crate::core::{Category, Priority, Status};
use crate::error::{Result, SupportDeskError};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// `local@domain.tld`: one `@`, a dot after it, no whitespace
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap_or_else(|e| panic!("invalid email regex: {e}"))
});

/// Raw ticket creation input, as received from a collaborator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketInput {
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: String,
    pub customer_email: String,
    #[serde(default)]
    pub customer_name: Option<String>,
}

/// Ticket input after validation and normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidTicketInput {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub priority: Priority,
    pub customer_email: String,
    pub customer_name: Option<String>,
}

/// Trim `value` and reject it if nothing is left
pub fn non_empty(value: &str, field: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(SupportDeskError::validation(
            field,
            format!("{field} cannot be empty"),
        ));
    }
    Ok(trimmed.to_string())
}

/// Trim and check the `local@domain.tld` shape
pub fn email(value: &str) -> Result<String> {
    let trimmed = value.trim();
    if !EMAIL_PATTERN.is_match(trimmed) {
        return Err(SupportDeskError::validation(
            "customerEmail",
            "Invalid email format",
        ));
    }
    Ok(trimmed.to_string())
}

fn parse_variant<T>(value: &str, field: &str) -> Result<T>
where
    T: FromStr<Err = crate::core::UnknownVariant>,
{
    value
        .parse::<T>()
        .map_err(|e| SupportDeskError::validation(field, e.to_string()))
}

/// Exact-match a category name
pub fn category(value: &str) -> Result<Category> {
    parse_variant(value, "category")
}

/// Exact-match a priority name
pub fn priority(value: &str) -> Result<Priority> {
    parse_variant(value, "priority")
}

/// Exact-match a status name (`"In Progress"` with the space)
pub fn status(value: &str) -> Result<Status> {
    parse_variant(value, "status")
}

/// Validate comment content, returning it trimmed
pub fn comment_content(value: &str) -> Result<String> {
    non_empty(value, "content")
}

/// Validate every field of a ticket creation request
///
/// Fields are checked in a fixed order (title, description, category,
/// priority, customerEmail, customerName) and the first failure is reported.
pub fn ticket_input(input: &TicketInput) -> Result<ValidTicketInput> {
    let title = non_empty(&input.title, "title")?;
    let description = non_empty(&input.description, "description")?;
    let category = category(&input.category)?;
    let priority = priority(&input.priority)?;
    let customer_email = email(&input.customer_email)?;
    let customer_name = input
        .customer_name
        .as_deref()
        .map(|name| non_empty(name, "customerName"))
        .transpose()?;

    Ok(ValidTicketInput {
        title,
        description,
        category,
        priority,
        customer_email,
        customer_name,
    })
}
