use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, header::ACCEPT};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::domain::ticket::{Ticket, User};
use crate::error::{AppError, AppResult};
use crate::services::{TicketFeed, TicketSource};

pub struct HttpTicketSource {
    http: Client,
    endpoint: String,
}

impl HttpTicketSource {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let endpoint = endpoint.into();
        if endpoint.trim().is_empty() {
            return Err(AppError::Configuration(
                "ticket endpoint must not be empty".to_string(),
            ));
        }
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| AppError::Configuration(format!("failed to build HTTP client: {err}")))?;
        Ok(Self { http, endpoint })
    }
}

#[async_trait]
impl TicketSource for HttpTicketSource {
    async fn fetch_tickets(&self) -> AppResult<TicketFeed> {
        debug!(endpoint = %self.endpoint, "requesting tickets");

        let response = self
            .http
            .get(&self.endpoint)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|err| AppError::Fetch(format!("request to {} failed: {err}", self.endpoint)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::Fetch(format!(
                "endpoint responded with {status}: {body}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|err| AppError::Fetch(format!("failed to read response body: {err}")))?;
        let feed = parse_feed(&body)?;

        info!(
            tickets = feed.tickets.len(),
            users = feed.users.len(),
            "fetched tickets"
        );
        Ok(feed)
    }
}

/// Accepts either a bare array of tickets or an object carrying `tickets`
/// and, optionally, `users`.
///
/// Tickets are read one by one: an unreadable ticket is logged and left out,
/// and the fetch only fails when the payload shape is wrong or no ticket at
/// all could be read.
pub fn parse_feed(body: &str) -> AppResult<TicketFeed> {
    let payload: Value = serde_json::from_str(body)
        .map_err(|err| AppError::Fetch(format!("malformed ticket payload: {err}")))?;

    let (raw_tickets, users) = match payload {
        Value::Array(items) => (items, Vec::new()),
        Value::Object(mut fields) => {
            let tickets = match fields.remove("tickets") {
                Some(Value::Array(items)) => items,
                _ => {
                    return Err(AppError::Fetch(
                        "ticket payload has no `tickets` array".to_string(),
                    ));
                }
            };
            let users = match fields.remove("users") {
                None | Some(Value::Null) => Vec::new(),
                Some(users) => serde_json::from_value::<Vec<User>>(users)
                    .map_err(|err| AppError::Fetch(format!("malformed users list: {err}")))?,
            };
            (tickets, users)
        }
        _ => {
            return Err(AppError::Fetch(
                "ticket payload must be an array or an object".to_string(),
            ));
        }
    };

    let total = raw_tickets.len();
    let mut first_error = None;
    let tickets = raw_tickets
        .into_iter()
        .enumerate()
        .filter_map(|(index, raw)| {
            let id = raw
                .get("id")
                .and_then(Value::as_str)
                .unwrap_or("<no id>")
                .to_string();
            match serde_json::from_value::<Ticket>(raw) {
                Ok(ticket) => Some(ticket),
                Err(err) => {
                    warn!(index, id = %id, error = %err, "skipping unreadable ticket");
                    first_error.get_or_insert_with(|| format!("ticket {id}: {err}"));
                    None
                }
            }
        })
        .collect::<Vec<_>>();

    if tickets.is_empty() {
        if let Some(reason) = first_error {
            return Err(AppError::Fetch(format!(
                "none of the {total} tickets could be read ({reason})"
            )));
        }
    }
    Ok(TicketFeed { tickets, users })
}
