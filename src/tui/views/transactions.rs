//! Transactions view
//!
//! Shows the transaction table, newest first, with the type filter applied

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use chrono::NaiveDate;

use crate::models::TransactionType;
use crate::tui::app::{App, FocusedPanel};
use crate::tui::layout::MainPanelLayout;

/// Render the transactions view
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let layout = MainPanelLayout::new(area);

    render_header(frame, app, layout.header);
    render_transaction_table(frame, app, layout.content);
}

/// Render the header with the active filter
fn render_header(frame: &mut Frame, app: &mut App, area: Rect) {
    let filter_label = match app.kind_filter {
        None => "All",
        Some(TransactionType::Income) => "Income",
        Some(TransactionType::Expense) => "Expense",
    };

    let title = format!(" Transactions ({}) ", filter_label);
    let block = Block::default()
        .title(title)
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let hints = "a:Add  e:Edit  d:Delete  f:Filter  r:Report";

    let paragraph = Paragraph::new(hints)
        .block(block)
        .style(Style::default().fg(Color::DarkGray));

    frame.render_widget(paragraph, area);
}

/// Render the transaction table
fn render_transaction_table(frame: &mut Frame, app: &mut App, area: Rect) {
    let is_focused = app.focused_panel == FocusedPanel::Main;
    let border_color = if is_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let transactions = app.visible_transactions();

    if transactions.is_empty() {
        let message = match app.kind_filter {
            Some(kind) => format!(
                "No {} transactions. Press 'f' to change the filter.",
                kind.to_string().to_lowercase()
            ),
            None => "No transactions. Press 'a' to add one.".to_string(),
        };
        let text = Paragraph::new(message)
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(text, area);
        return;
    }

    let widths = [
        Constraint::Length(12), // Date
        Constraint::Length(9),  // Type
        Constraint::Length(12), // Amount
        Constraint::Length(16), // Category
        Constraint::Min(10),    // Description
    ];

    let header = Row::new(vec![
        Cell::from("Date").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Type").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Amount").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Category").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Description").style(Style::default().add_modifier(Modifier::BOLD)),
    ])
    .style(Style::default().fg(Color::Yellow))
    .height(1);

    let date_pattern = app.settings.date_format.clone();
    let symbol = app.settings.currency_symbol.clone();

    let rows: Vec<Row> = transactions
        .iter()
        .map(|txn| {
            let kind_style = match txn.kind {
                TransactionType::Income => Style::default().fg(Color::Green),
                TransactionType::Expense => Style::default().fg(Color::Red),
            };

            let description = if txn.description.is_empty() {
                "-".to_string()
            } else {
                truncate_string(&txn.description, 30)
            };

            Row::new(vec![
                Cell::from(format_date(txn.date, &date_pattern)),
                Cell::from(txn.kind.to_string()).style(kind_style),
                Cell::from(txn.amount.format_with_symbol(&symbol)).style(kind_style),
                Cell::from(truncate_string(&txn.category, 16)),
                Cell::from(description),
            ])
        })
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(
        app.selected_transaction_index
            .min(transactions.len().saturating_sub(1)),
    ));

    frame.render_stateful_widget(table, area, &mut state);
}

/// Format a date with the user-configured pattern, falling back to ISO if
/// the pattern fails to format
fn format_date(date: NaiveDate, pattern: &str) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    if write!(out, "{}", date.format(pattern)).is_err() || out.is_empty() {
        return date.format("%Y-%m-%d").to_string();
    }
    out
}

/// Truncate a string to a maximum number of characters
fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}
