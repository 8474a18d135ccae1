use std::fmt::Write as _;

use console::{Color, Style};

use crate::domain::board::Group;
use crate::domain::priority::{PriorityColor, priority_color, priority_label};
use crate::domain::ticket::Ticket;
use crate::domain::view::ViewOptions;
use crate::store::TicketStore;

pub struct BoardRenderer<'a> {
    store: &'a TicketStore,
    colors: bool,
}

impl<'a> BoardRenderer<'a> {
    pub fn new(store: &'a TicketStore, colors: bool) -> Self {
        Self { store, colors }
    }

    pub fn render(&self, options: &ViewOptions, groups: &[Group<'_>]) -> String {
        let mut out = String::new();
        let title = format!(
            "Kanban Board (grouped by {}, sorted by {})",
            options.grouping, options.sorting
        );
        let _ = writeln!(out, "{}", self.style(Style::new().bold()).apply_to(title));

        if groups.is_empty() {
            let _ = writeln!(out, "\nNo tickets to display.");
            return out;
        }

        for group in groups {
            let _ = writeln!(
                out,
                "\n{} ({})",
                self.style(Style::new().bold().cyan()).apply_to(&group.name),
                group.tickets.len()
            );
            for ticket in &group.tickets {
                self.render_card(&mut out, ticket);
            }
        }
        out
    }

    fn render_card(&self, out: &mut String, ticket: &Ticket) {
        let _ = writeln!(
            out,
            "  + {} {}",
            self.dim().apply_to(&ticket.id),
            ticket.title
        );
        let description = ticket.description.as_deref().map(str::trim);
        if let Some(description) = description.filter(|d| !d.is_empty()) {
            let _ = writeln!(out, "  | {description}");
        }

        let color = terminal_color(priority_color(ticket.priority));
        let priority = format!("{} ({})", priority_label(ticket.priority), ticket.priority);
        let mut details = vec![format!(
            "Priority: {}",
            self.style(Style::new().fg(color)).apply_to(priority)
        )];
        if let Some(id) = ticket.assigned_user.as_deref() {
            let assignee = match self.store.user(id) {
                Some(user) if user.available => user.name.clone(),
                Some(user) => format!("{} (away)", user.name),
                None => id.to_string(),
            };
            details.push(format!("Assigned to: {assignee}"));
        }
        if let Some(team) = ticket.team.as_deref() {
            details.push(format!("Team: {team}"));
        }
        if let Some(due) = ticket.due_date {
            details.push(format!("Due Date: {due}"));
        }
        details.push(format!("Status: {}", ticket.status));
        if !ticket.tags.is_empty() {
            details.push(format!("Tags: {}", ticket.tags.join(", ")));
        }
        let _ = writeln!(out, "  | {}", details.join("  "));
    }

    fn dim(&self) -> Style {
        self.style(Style::new().dim())
    }

    fn style(&self, style: Style) -> Style {
        style.force_styling(self.colors)
    }
}

/// Terminals have no orange in the basic palette, so it comes from the
/// 256-color table.
pub fn terminal_color(color: PriorityColor) -> Color {
    match color {
        PriorityColor::Blue => Color::Blue,
        PriorityColor::Green => Color::Green,
        PriorityColor::Yellow => Color::Yellow,
        PriorityColor::Orange => Color::Color256(208),
        PriorityColor::Red => Color::Red,
    }
}
