use std::fmt;
use std::str::FromStr;

use crate::error::{AppError, AppResult};

/// Ticket field used to split the board into columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupingKey {
    #[default]
    Status,
    User,
    Priority,
    Team,
    DueDate,
}

impl GroupingKey {
    pub const ALL: [GroupingKey; 5] = [
        GroupingKey::Status,
        GroupingKey::User,
        GroupingKey::Priority,
        GroupingKey::Team,
        GroupingKey::DueDate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GroupingKey::Status => "status",
            GroupingKey::User => "user",
            GroupingKey::Priority => "priority",
            GroupingKey::Team => "team",
            GroupingKey::DueDate => "dueDate",
        }
    }
}

impl FromStr for GroupingKey {
    type Err = AppError;

    fn from_str(value: &str) -> AppResult<Self> {
        GroupingKey::ALL
            .into_iter()
            .find(|key| key.as_str() == value.trim())
            .ok_or_else(|| {
                AppError::InvalidOption(format!(
                    "unknown grouping '{value}' (expected one of {})",
                    expected(GroupingKey::ALL.iter().map(GroupingKey::as_str))
                ))
            })
    }
}

impl fmt::Display for GroupingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order applied to tickets inside a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortingKey {
    #[default]
    Priority,
    Title,
}

impl SortingKey {
    pub const ALL: [SortingKey; 2] = [SortingKey::Priority, SortingKey::Title];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortingKey::Priority => "priority",
            SortingKey::Title => "title",
        }
    }
}

impl FromStr for SortingKey {
    type Err = AppError;

    fn from_str(value: &str) -> AppResult<Self> {
        SortingKey::ALL
            .into_iter()
            .find(|key| key.as_str() == value.trim())
            .ok_or_else(|| {
                AppError::InvalidOption(format!(
                    "unknown sorting '{value}' (expected one of {})",
                    expected(SortingKey::ALL.iter().map(SortingKey::as_str))
                ))
            })
    }
}

impl fmt::Display for SortingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewOptions {
    pub grouping: GroupingKey,
    pub sorting: SortingKey,
}

impl ViewOptions {
    pub fn new(grouping: GroupingKey, sorting: SortingKey) -> Self {
        Self { grouping, sorting }
    }

    /// Builds options from raw key strings, rejecting anything outside the
    /// known key sets.
    pub fn parse(grouping: &str, sorting: &str) -> AppResult<Self> {
        Ok(Self {
            grouping: grouping.parse()?,
            sorting: sorting.parse()?,
        })
    }
}

fn expected<'a>(keys: impl Iterator<Item = &'a str>) -> String {
    keys.collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_status_and_priority() {
        let options = ViewOptions::default();
        assert_eq!(options.grouping, GroupingKey::Status);
        assert_eq!(options.sorting, SortingKey::Priority);
    }

    #[test]
    fn parses_every_known_key() {
        for key in GroupingKey::ALL {
            assert_eq!(key.as_str().parse::<GroupingKey>().unwrap(), key);
        }
        for key in SortingKey::ALL {
            assert_eq!(key.as_str().parse::<SortingKey>().unwrap(), key);
        }
    }

    #[test]
    fn rejects_unknown_grouping() {
        let err = ViewOptions::parse("bogus", "priority").unwrap_err();
        assert!(matches!(err, AppError::InvalidOption(message) if message.contains("bogus")));
    }

    #[test]
    fn rejects_unknown_sorting() {
        let err = ViewOptions::parse("user", "dueDate").unwrap_err();
        assert!(matches!(err, AppError::InvalidOption(_)));
    }

    #[test]
    fn grouping_keys_are_case_sensitive() {
        assert!("DueDate".parse::<GroupingKey>().is_err());
        assert_eq!(
            "dueDate".parse::<GroupingKey>().unwrap(),
            GroupingKey::DueDate
        );
    }
}
