use crate::cli::FilterArgs;
use crate::config::SupportDeskConfig;
use crate::core::TicketId;
use crate::error::{Result, SupportDeskError};
use crate::lifecycle::TicketService;
use crate::query::{TicketFilter, parse_end_date, parse_start_date};
use crate::storage::open_store;
use crate::validation;

/// Common context for all handler operations
#[derive(Debug)]
pub struct HandlerContext {
    pub service: TicketService,
    pub config: SupportDeskConfig,
}

impl HandlerContext {
    /// Open the configured store and wrap it in a service
    pub async fn new(config: SupportDeskConfig) -> Result<Self> {
        let store = open_store(&config).await?;
        Ok(Self {
            service: TicketService::new(store),
            config,
        })
    }
}

/// Parse a ticket id given on the command line
///
/// An unparseable id cannot name a stored ticket, so it is reported as not
/// found.
pub fn resolve_ticket_id(value: &str) -> Result<TicketId> {
    TicketId::parse_str(value.trim()).map_err(|_| SupportDeskError::not_found(value))
}

impl FilterArgs {
    /// Validate the flags and turn them into a [`TicketFilter`]
    pub fn to_filter(&self) -> Result<TicketFilter> {
        let mut filter = TicketFilter::new();
        if let Some(ref status) = self.status {
            filter = filter.with_status(validation::status(status)?);
        }
        if let Some(ref priority) = self.priority {
            filter = filter.with_priority(validation::priority(priority)?);
        }
        if let Some(ref category) = self.category {
            filter = filter.with_category(validation::category(category)?);
        }
        if let Some(ref email) = self.customer_email {
            filter = filter.with_customer_email(email.trim());
        }

        let start = self.since.as_deref().map(parse_start_date).transpose()?;
        let end = self.until.as_deref().map(parse_end_date).transpose()?;
        Ok(filter.created_between(start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Category, Status};

    #[test]
    fn test_filter_args_to_filter() {
        let args = FilterArgs {
            status: Some("In Progress".to_string()),
            category: Some("Billing".to_string()),
            since: Some("2025-01-01".to_string()),
            until: Some("2025-01-31".to_string()),
            ..FilterArgs::default()
        };

        let filter = args.to_filter().unwrap();
        assert_eq!(filter.status, Some(Status::InProgress));
        assert_eq!(filter.category, Some(Category::Billing));
        assert!(filter.start_date.is_some());
        assert!(filter.end_date.is_some());
        assert!(filter.priority.is_none());
    }

    #[test]
    fn test_filter_args_reject_bad_values() {
        let args = FilterArgs {
            priority: Some("urgent".to_string()),
            ..FilterArgs::default()
        };
        assert_eq!(args.to_filter().unwrap_err().field(), Some("priority"));

        let args = FilterArgs {
            since: Some("last tuesday".to_string()),
            ..FilterArgs::default()
        };
        assert_eq!(args.to_filter().unwrap_err().field(), Some("startDate"));
    }

    #[test]
    fn test_resolve_ticket_id() {
        let id = TicketId::new();
        assert_eq!(resolve_ticket_id(&id.to_string()).unwrap(), id);
        assert!(matches!(
            resolve_ticket_id("nope").unwrap_err(),
            SupportDeskError::TicketNotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_context_service_has_no_event_bus() {
        let mut config = SupportDeskConfig::default();
        config.storage.backend = crate::config::StorageBackend::Memory;

        let ctx = HandlerContext::new(config).await.unwrap();
        assert!(ctx.service.events().is_none());
    }
}
