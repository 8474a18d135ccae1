use tracing::warn;

use crate::domain::ticket::{Ticket, User};
use crate::error::AppResult;
use crate::services::TicketSource;

/// The last successfully fetched tickets.
#[derive(Debug, Default)]
pub struct TicketStore {
    tickets: Vec<Ticket>,
    users: Vec<User>,
}

impl TicketStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole collection with a fresh fetch. On failure the
    /// previous collection is kept and the error is returned.
    pub async fn fetch_all(&mut self, source: &dyn TicketSource) -> AppResult<&[Ticket]> {
        match source.fetch_tickets().await {
            Ok(feed) => {
                self.tickets = feed.tickets;
                self.users = feed.users;
                Ok(&self.tickets)
            }
            Err(err) => {
                warn!(error = %err, kept = self.tickets.len(), "ticket fetch failed");
                Err(err)
            }
        }
    }

    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|user| user.id == id)
    }
}
