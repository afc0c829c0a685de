use std::error::Error;

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::error::StoreError;

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// One-line message for a store failure: the operation plus the immediate
/// cause SQLite or the filesystem reported.
pub(crate) fn surface_error(err: &StoreError) -> String {
    match err.source() {
        Some(cause) => format!("{err}: {cause}"),
        None => err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn database_errors_include_the_sqlite_reason() {
        let conn = Connection::open_in_memory().unwrap();
        let source = conn.execute("SELECT * FROM exercises", []).unwrap_err();
        let err = StoreError::Database {
            operation: "failed to load exercises",
            source,
        };
        let message = surface_error(&err);
        assert!(message.starts_with("failed to load exercises: "), "{message}");
        assert!(message.contains("no such table"), "{message}");
    }

    #[test]
    fn errors_without_source_are_unchanged() {
        assert_eq!(
            surface_error(&StoreError::UnknownExercise(7)),
            "exercise #7 does not exist"
        );
    }
}
