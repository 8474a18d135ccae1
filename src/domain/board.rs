use std::collections::HashMap;

use tracing::debug;

use crate::domain::collation::compare_titles;
use crate::domain::ticket::Ticket;
use crate::domain::view::{GroupingKey, SortingKey, ViewOptions};

/// Column name for tickets that have no value for the grouping field.
pub const UNASSIGNED_GROUP: &str = "Unassigned";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group<'a> {
    pub name: String,
    pub tickets: Vec<&'a Ticket>,
}

/// Splits `tickets` into named columns and orders each column.
///
/// Columns appear in the order their first ticket appears in the input, and
/// every ticket lands in exactly one column.
pub fn compute_view<'a>(tickets: &'a [Ticket], options: &ViewOptions) -> Vec<Group<'a>> {
    // Buckets are keyed on the raw value so a real value spelled like the
    // unassigned column never merges with it.
    let mut buckets: Vec<(Option<String>, Vec<&'a Ticket>)> = Vec::new();
    let mut index_by_value: HashMap<Option<String>, usize> = HashMap::new();

    for ticket in tickets {
        let value = group_value(ticket, options.grouping);
        match index_by_value.get(&value) {
            Some(&index) => buckets[index].1.push(ticket),
            None => {
                index_by_value.insert(value.clone(), buckets.len());
                buckets.push((value, vec![ticket]));
            }
        }
    }

    let groups = buckets
        .into_iter()
        .map(|(value, mut tickets)| {
            sort_tickets(&mut tickets, options.sorting);
            Group {
                name: value.unwrap_or_else(|| UNASSIGNED_GROUP.to_string()),
                tickets,
            }
        })
        .collect::<Vec<_>>();

    debug!(
        grouping = %options.grouping,
        sorting = %options.sorting,
        tickets = tickets.len(),
        groups = groups.len(),
        "computed board view"
    );
    groups
}

/// The ticket's value for the grouping field; `None` when it has none.
pub fn group_value(ticket: &Ticket, key: GroupingKey) -> Option<String> {
    let value = match key {
        GroupingKey::Status => Some(ticket.status.to_string()),
        GroupingKey::User => ticket.assigned_user.clone(),
        GroupingKey::Priority => Some(ticket.priority.to_string()),
        GroupingKey::Team => ticket.team.clone(),
        GroupingKey::DueDate => ticket.due_date.map(|date| date.to_string()),
    };
    value.filter(|value| !value.trim().is_empty())
}

/// Stable sort, so tickets that compare equal keep their input order.
pub fn sort_tickets(tickets: &mut [&Ticket], key: SortingKey) {
    match key {
        SortingKey::Priority => tickets.sort_by(|a, b| b.priority.cmp(&a.priority)),
        SortingKey::Title => tickets.sort_by(|a, b| compare_titles(&a.title, &b.title)),
    }
}
