use crate::domain::ticket::Priority;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityColor {
    Blue,
    Green,
    Yellow,
    Orange,
    Red,
}

/// Card color for each priority, lowest first.
const PRIORITY_COLORS: [PriorityColor; 5] = [
    PriorityColor::Blue,
    PriorityColor::Green,
    PriorityColor::Yellow,
    PriorityColor::Orange,
    PriorityColor::Red,
];

const PRIORITY_LABELS: [&str; 5] = ["No priority", "Low", "Medium", "Urgent", "High"];

pub fn priority_color(priority: Priority) -> PriorityColor {
    PRIORITY_COLORS[table_index(priority)]
}

pub fn priority_label(priority: Priority) -> &'static str {
    PRIORITY_LABELS[table_index(priority)]
}

fn table_index(priority: Priority) -> usize {
    usize::from(priority.value() - Priority::MIN)
}
