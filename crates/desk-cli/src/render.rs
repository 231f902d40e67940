//! Plain-text rendering for the command line

use desk_core::{AdminOverview, Board, CharityNav, CharitySummary};
use desk_model::{Message, TaskActivity};
use std::fmt::Write;

pub(crate) fn board(board: &Board<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Board for {}", board.charity_id());
    for column in board.columns() {
        let _ = writeln!(out, "\n{} ({})", column.title(), column.count());
        for task in &column.tasks {
            let assignee = task.assignee_name.as_deref().unwrap_or("unassigned");
            let _ = writeln!(out, "  [{}] {} - {}", task.id, task.title, assignee);
        }
    }
    out
}

pub(crate) fn timeline(entries: &[&TaskActivity]) -> String {
    let mut out = String::new();
    for entry in entries {
        let _ = writeln!(
            out,
            "{} {:<8} {}: {}",
            entry.timestamp.format("%Y-%m-%d %H:%M"),
            entry.kind.as_str(),
            entry.user_name,
            entry.content
        );
    }
    out
}

pub(crate) fn sidebar(entries: &[CharityNav]) -> String {
    entries
        .iter()
        .map(|e| format!("{:<12} {}\n", e.label(), e.path()))
        .collect()
}

pub(crate) fn mailbox(messages: &[&Message], unread: usize) -> String {
    let mut out = format!("{} message(s), {unread} unread\n", messages.len());
    for message in messages {
        let marker = if message.is_read { ' ' } else { '*' };
        let _ = writeln!(
            out,
            "{marker} {} {} -> {}: {}",
            message.timestamp.format("%Y-%m-%d"),
            message.sender_name,
            message.receiver_id,
            message.subject
        );
    }
    out
}

pub(crate) fn overview(overview: &AdminOverview, summaries: &[CharitySummary]) -> String {
    let mut out = format!(
        "Approved: {}  In progress: {}\n",
        overview.approved, overview.in_progress
    );
    for summary in summaries {
        let _ = writeln!(
            out,
            "{:<20} tasks {:>3}  done {:>3}%  employees {}",
            summary.name,
            summary.counts.total(),
            summary.completion_rate,
            summary.employees
        );
    }
    out
}
