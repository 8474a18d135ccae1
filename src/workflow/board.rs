use tracing::info;

use crate::context::AppContext;
use crate::domain::view::ViewOptions;
use crate::error::AppResult;
use crate::store::TicketStore;
use crate::workflow::options::{apply_overrides, persist_or_warn};

#[derive(Debug, Clone, Default)]
pub struct BoardRequest {
    pub grouping: Option<String>,
    pub sorting: Option<String>,
    pub save: bool,
}

pub struct BoardOutcome {
    pub store: TicketStore,
    pub options: ViewOptions,
    pub saved: bool,
}

/// Resolves the view options, fetches the tickets once and hands both back
/// for rendering. Options are validated before any network traffic.
pub async fn load_board(ctx: &AppContext, request: BoardRequest) -> AppResult<BoardOutcome> {
    let stored = ctx.view_options.load();
    let options = apply_overrides(
        stored,
        request.grouping.as_deref(),
        request.sorting.as_deref(),
    )?;

    let saved = if request.save {
        persist_or_warn(&ctx.view_options, &options)?
    } else {
        false
    };

    let mut store = TicketStore::new();
    let count = store.fetch_all(ctx.ticket_source.as_ref()).await?.len();
    info!(
        endpoint = %ctx.config.endpoint,
        tickets = count,
        grouping = %options.grouping,
        sorting = %options.sorting,
        "board loaded"
    );

    Ok(BoardOutcome {
        store,
        options,
        saved,
    })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::config::AppConfig;
    use crate::domain::board::compute_view;
    use crate::domain::ticket::{Priority, Ticket, TicketStatus};
    use crate::domain::view::{GroupingKey, SortingKey};
    use crate::error::AppError;
    use crate::infra::memory_store::MemoryStore;
    use crate::services::{TicketFeed, TicketSource};
    use crate::view_state::ViewOptionsStore;

    struct FixedSource(Option<Vec<Ticket>>);

    #[async_trait]
    impl TicketSource for FixedSource {
        async fn fetch_tickets(&self) -> AppResult<TicketFeed> {
            match &self.0 {
                Some(tickets) => Ok(TicketFeed {
                    tickets: tickets.clone(),
                    users: Vec::new(),
                }),
                None => Err(AppError::Fetch("connection refused".to_string())),
            }
        }
    }

    fn ticket(id: &str, title: &str, status: TicketStatus, priority: u8) -> Ticket {
        Ticket {
            id: id.to_string(),
            title: title.to_string(),
            description: None,
            status,
            assigned_user: None,
            team: None,
            priority: Priority::new(priority).unwrap(),
            due_date: None,
            tags: Vec::new(),
        }
    }

    fn context(source: FixedSource) -> AppContext {
        let config = AppConfig {
            endpoint: "http://localhost/tickets".to_string(),
            timeout: Duration::from_secs(1),
            state_dir: PathBuf::from("/tmp"),
        };
        AppContext::new(
            config,
            Arc::new(source),
            ViewOptionsStore::new(Arc::new(MemoryStore::new())),
            PathBuf::from("<memory>"),
        )
    }

    fn tickets() -> Vec<Ticket> {
        vec![
            ticket("A", "Zip release", TicketStatus::Todo, 2),
            ticket("B", "Audit", TicketStatus::Done, 4),
            ticket("C", "Bump deps", TicketStatus::Todo, 5),
        ]
    }

    #[tokio::test]
    async fn uses_stored_options_by_default() {
        let ctx = context(FixedSource(Some(tickets())));
        ctx.view_options
            .save(&ViewOptions::new(GroupingKey::Status, SortingKey::Title))
            .unwrap();

        let outcome = load_board(&ctx, BoardRequest::default()).await.unwrap();
        assert_eq!(outcome.options.sorting, SortingKey::Title);
        assert!(!outcome.saved);

        let groups = compute_view(outcome.store.tickets(), &outcome.options);
        let todo = groups[0]
            .tickets
            .iter()
            .map(|ticket| ticket.id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(todo, vec!["C", "A"]);
    }

    #[tokio::test]
    async fn save_flag_persists_overrides() {
        let ctx = context(FixedSource(Some(tickets())));
        let request = BoardRequest {
            grouping: Some("priority".to_string()),
            sorting: None,
            save: true,
        };

        let outcome = load_board(&ctx, request).await.unwrap();
        assert!(outcome.saved);
        assert_eq!(
            ctx.view_options.load(),
            ViewOptions::new(GroupingKey::Priority, SortingKey::Priority)
        );
    }

    #[tokio::test]
    async fn invalid_option_fails_before_fetching() {
        let ctx = context(FixedSource(None));
        let request = BoardRequest {
            sorting: Some("bogus".to_string()),
            ..BoardRequest::default()
        };

        let err = load_board(&ctx, request).await.err().unwrap();
        assert!(matches!(err, AppError::InvalidOption(_)));
    }

    #[tokio::test]
    async fn fetch_failure_is_reported() {
        let ctx = context(FixedSource(None));
        let err = load_board(&ctx, BoardRequest::default()).await.err().unwrap();
        assert!(matches!(err, AppError::Fetch(_)));
    }
}
