use async_trait::async_trait;

use crate::domain::ticket::{Ticket, User};
use crate::error::AppResult;

/// Everything one fetch returns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketFeed {
    pub tickets: Vec<Ticket>,
    pub users: Vec<User>,
}

#[async_trait]
pub trait TicketSource: Send + Sync {
    async fn fetch_tickets(&self) -> AppResult<TicketFeed>;
}
