pub mod key_value;
pub mod ticket_source;

pub use key_value::KeyValueStore;
pub use ticket_source::{TicketFeed, TicketSource};
