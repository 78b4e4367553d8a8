//! Demo data
//!
//! Populates a store with a handful of tickets across every category and
//! priority, moves some of them through the workflow and adds agent comments.

use crate::core::{Status, Ticket};
use crate::error::Result;
use crate::lifecycle::TicketService;
use crate::validation::TicketInput;
use serde::Serialize;

/// Demo support agent
#[derive(Debug, Clone, Copy)]
pub struct DemoAgent {
    pub id: &'static str,
    pub name: &'static str,
}

pub const DEMO_AGENTS: [DemoAgent; 2] = [
    DemoAgent {
        id: "agent1@example.com",
        name: "Alice Johnson",
    },
    DemoAgent {
        id: "agent2@example.com",
        name: "Bob Smith",
    },
];

const DEMO_TICKETS: [(&str, &str, &str, &str, &str, &str); 8] = [
    (
        "Cannot login to my account",
        "I have been trying to login for the past hour but keep getting an \"Invalid credentials\" error. I am sure my password is correct.",
        "Technical",
        "High",
        "customer1@example.com",
        "John Doe",
    ),
    (
        "Billing discrepancy on last invoice",
        "My last invoice shows a charge of $150 but I was expecting $100 based on my plan. Can you please review this?",
        "Billing",
        "Medium",
        "customer2@example.com",
        "Jane Smith",
    ),
    (
        "Feature request: Dark mode",
        "It would be great if the application had a dark mode option. My eyes get tired using the bright interface at night.",
        "General",
        "Low",
        "customer3@example.com",
        "Mike Wilson",
    ),
    (
        "Critical: Data loss after update",
        "After the latest update, all my saved data has disappeared. This is urgent as I need this data for my business operations.",
        "Technical",
        "Critical",
        "customer4@example.com",
        "Sarah Brown",
    ),
    (
        "How do I export my data?",
        "I need to export all my data to a CSV file. I cannot find this option in the settings. Can you guide me?",
        "General",
        "Low",
        "customer5@example.com",
        "Tom Anderson",
    ),
    (
        "Payment method not updating",
        "I am trying to update my credit card information but the form keeps showing an error. I have tried multiple times.",
        "Billing",
        "High",
        "customer6@example.com",
        "Emily Davis",
    ),
    (
        "Mobile app crashes on startup",
        "The mobile app crashes immediately after I open it. I have tried reinstalling but the problem persists. Using iPhone 13 with iOS 17.",
        "Technical",
        "High",
        "customer7@example.com",
        "David Lee",
    ),
    (
        "Question about enterprise plan",
        "I am interested in upgrading to the enterprise plan. Can you provide more details about the features and pricing?",
        "General",
        "Medium",
        "customer8@example.com",
        "Lisa Martinez",
    ),
];

/// Workflow applied after creation: ticket index, agent, comments, final status
const DEMO_ACTIVITY: [(usize, usize, &[&str], Status); 5] = [
    (
        0,
        0,
        &[
            "I have looked into this issue. It appears your account was temporarily locked due to multiple failed login attempts. I have unlocked it for you.",
            "Please try logging in again and let me know if you still face any issues.",
        ],
        Status::InProgress,
    ),
    (
        1,
        1,
        &["I have reviewed your invoice. The extra $50 charge was for the premium support add-on that was activated last month."],
        Status::Resolved,
    ),
    (
        3,
        0,
        &["This is a critical issue. Our engineering team is investigating the data loss. We will update you within the next hour."],
        Status::InProgress,
    ),
    (
        5,
        1,
        &["The issue was caused by a browser caching problem. Please clear your browser cache and try again."],
        Status::Resolved,
    ),
    (
        6,
        0,
        &["Thank you for reporting this. We have identified the issue and are working on a fix. A new version will be released tomorrow."],
        Status::InProgress,
    ),
];

/// What a seed run created
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedSummary {
    pub tickets: usize,
    pub status_changes: usize,
    pub comments: usize,
}

/// Creation inputs for the demo tickets
#[must_use]
pub fn demo_inputs() -> Vec<TicketInput> {
    DEMO_TICKETS
        .iter()
        .map(
            |(title, description, category, priority, email, name)| TicketInput {
                title: (*title).to_string(),
                description: (*description).to_string(),
                category: (*category).to_string(),
                priority: (*priority).to_string(),
                customer_email: (*email).to_string(),
                customer_name: Some((*name).to_string()),
            },
        )
        .collect()
}

/// Create the demo tickets and walk some of them through the workflow
///
/// Tickets that end up `Resolved` pass through `In Progress` first, with the
/// agent's comment in between.
pub async fn seed_demo_data(service: &TicketService) -> Result<SeedSummary> {
    let mut summary = SeedSummary::default();
    let mut tickets: Vec<Ticket> = Vec::with_capacity(DEMO_TICKETS.len());

    for input in demo_inputs() {
        tickets.push(service.create_ticket(&input).await?);
        summary.tickets += 1;
    }

    for (index, agent, comments, final_status) in DEMO_ACTIVITY {
        let (Some(ticket), Some(agent)) = (tickets.get(index), DEMO_AGENTS.get(agent)) else {
            continue;
        };

        service
            .update_status(&ticket.id, Status::InProgress, agent.id)
            .await?;
        summary.status_changes += 1;

        for content in comments {
            service
                .add_comment(&ticket.id, content, agent.id, agent.name)
                .await?;
            summary.comments += 1;
        }

        if final_status != Status::InProgress {
            service
                .update_status(&ticket.id, final_status, agent.id)
                .await?;
            summary.status_changes += 1;
        }
    }

    tracing::info!(
        tickets = summary.tickets,
        comments = summary.comments,
        "Seeded demo data"
    );
    Ok(summary)
}
