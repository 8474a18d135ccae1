use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: TicketStatus,
    #[serde(default, alias = "userId")]
    pub assigned_user: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
    pub priority: Priority,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default, rename = "tag", skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Workflow state of a ticket.
///
/// Labels the board does not know about are kept verbatim in `Other` so an
/// upstream addition never fails a fetch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TicketStatus {
    Backlog,
    Todo,
    InProgress,
    Done,
    Canceled,
    Other(String),
}

impl TicketStatus {
    pub fn as_str(&self) -> &str {
        match self {
            TicketStatus::Backlog => "Backlog",
            TicketStatus::Todo => "Todo",
            TicketStatus::InProgress => "In progress",
            TicketStatus::Done => "Done",
            TicketStatus::Canceled => "Canceled",
            TicketStatus::Other(label) => label,
        }
    }

    pub fn parse(value: &str) -> Self {
        let normalized = value
            .trim()
            .to_lowercase()
            .replace(['-', '_'], " ");
        match normalized.as_str() {
            "backlog" => TicketStatus::Backlog,
            "todo" | "to do" => TicketStatus::Todo,
            "in progress" | "inprogress" => TicketStatus::InProgress,
            "done" => TicketStatus::Done,
            "canceled" | "cancelled" => TicketStatus::Canceled,
            _ => TicketStatus::Other(value.trim().to_string()),
        }
    }
}

impl From<String> for TicketStatus {
    fn from(value: String) -> Self {
        TicketStatus::parse(&value)
    }
}

impl From<TicketStatus> for String {
    fn from(status: TicketStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ticket priority on a 1..=5 scale, 5 being the most pressing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Priority(u8);

impl Priority {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Priority {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Priority::new(value).ok_or_else(|| {
            format!(
                "priority {value} is outside {}..={}",
                Priority::MIN,
                Priority::MAX
            )
        })
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        priority.0
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub available: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_ticket() {
        let json = r#"{
            "id": "CAM-1",
            "title": "Update user profile page UI",
            "description": "Refresh the layout",
            "status": "In progress",
            "assignedUser": "usr-1",
            "team": "web",
            "priority": 4,
            "dueDate": "2024-05-01",
            "tag": ["Feature request"]
        }"#;

        let ticket: Ticket = serde_json::from_str(json).unwrap();
        assert_eq!(ticket.status, TicketStatus::InProgress);
        assert_eq!(ticket.assigned_user.as_deref(), Some("usr-1"));
        assert_eq!(ticket.priority.value(), 4);
        assert_eq!(
            ticket.due_date,
            Some(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
        );
        assert_eq!(ticket.tags, vec!["Feature request".to_string()]);
    }

    #[test]
    fn accepts_user_id_alias_and_missing_optionals() {
        let json = r#"{"id": "CAM-2", "title": "Add tests", "status": "Todo", "userId": "usr-2", "priority": 1}"#;

        let ticket: Ticket = serde_json::from_str(json).unwrap();
        assert_eq!(ticket.assigned_user.as_deref(), Some("usr-2"));
        assert_eq!(ticket.description, None);
        assert_eq!(ticket.team, None);
        assert_eq!(ticket.due_date, None);
        assert!(ticket.tags.is_empty());
    }

    #[test]
    fn rejects_priority_out_of_range() {
        let json = r#"{"id": "CAM-3", "title": "Bad", "status": "Todo", "priority": 9}"#;
        assert!(serde_json::from_str::<Ticket>(json).is_err());
        assert_eq!(Priority::new(0), None);
        assert_eq!(Priority::new(5).map(Priority::value), Some(5));
    }

    #[test]
    fn parses_status_labels() {
        assert_eq!(TicketStatus::parse("backlog"), TicketStatus::Backlog);
        assert_eq!(TicketStatus::parse("in-progress"), TicketStatus::InProgress);
        assert_eq!(TicketStatus::parse("Cancelled"), TicketStatus::Canceled);
        assert_eq!(
            TicketStatus::parse(" Blocked "),
            TicketStatus::Other("Blocked".to_string())
        );
        assert_eq!(TicketStatus::InProgress.to_string(), "In progress");
    }
}
