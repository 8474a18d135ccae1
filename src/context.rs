use std::path::PathBuf;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::TicketSource;
use crate::view_state::ViewOptionsStore;

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub ticket_source: Arc<dyn TicketSource>,
    pub view_options: ViewOptionsStore,
    /// Where the view options live, for display only.
    pub state_location: PathBuf,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        ticket_source: Arc<dyn TicketSource>,
        view_options: ViewOptionsStore,
        state_location: PathBuf,
    ) -> Self {
        Self {
            config,
            ticket_source,
            view_options,
            state_location,
        }
    }
}
