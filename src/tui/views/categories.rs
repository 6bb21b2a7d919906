//! Categories view
//!
//! Shows the category table with per-category usage

use std::collections::HashMap;

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::models::{CategoryId, Money, TransactionType};
use crate::reports::LedgerSummary;
use crate::tui::app::{App, FocusedPanel};
use crate::tui::layout::MainPanelLayout;

/// Render the categories view
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let layout = MainPanelLayout::new(area);

    render_header(frame, layout.header);
    render_category_table(frame, app, layout.content);
}

/// Render the header
fn render_header(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Categories ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let paragraph = Paragraph::new("a:Add  e:Edit  d:Delete")
        .block(block)
        .style(Style::default().fg(Color::DarkGray));

    frame.render_widget(paragraph, area);
}

/// Render the category table
fn render_category_table(frame: &mut Frame, app: &mut App, area: Rect) {
    let is_focused = app.focused_panel == FocusedPanel::Main;
    let border_color = if is_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let categories = app.visible_categories();

    if categories.is_empty() {
        let text = Paragraph::new("No categories. Press 'a' to add one.")
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(text, area);
        return;
    }

    // Usage per category, keyed by ID so duplicate names stay distinct
    let usage: HashMap<CategoryId, (usize, Money)> = LedgerSummary::generate(app.storage)
        .map(|summary| {
            summary
                .activity
                .iter()
                .filter_map(|a| {
                    a.category_id
                        .map(|id| (id, (a.transactions.len(), a.subtotal)))
                })
                .collect()
        })
        .unwrap_or_default();

    let widths = [
        Constraint::Length(22), // Name
        Constraint::Length(9),  // Type
        Constraint::Length(14), // Transactions
        Constraint::Min(12),    // Subtotal
    ];

    let header = Row::new(vec![
        Cell::from("Name").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Type").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Transactions").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Subtotal").style(Style::default().add_modifier(Modifier::BOLD)),
    ])
    .style(Style::default().fg(Color::Yellow))
    .height(1);

    let symbol = app.settings.currency_symbol.clone();

    let rows: Vec<Row> = categories
        .iter()
        .map(|cat| {
            let kind_style = match cat.kind {
                TransactionType::Income => Style::default().fg(Color::Green),
                TransactionType::Expense => Style::default().fg(Color::Red),
            };

            let (count, subtotal) = usage
                .get(&cat.id)
                .copied()
                .unwrap_or((0, Money::zero()));

            Row::new(vec![
                Cell::from(truncate_string(&cat.name, 22)),
                Cell::from(cat.kind.to_string()).style(kind_style),
                Cell::from(count.to_string()),
                Cell::from(subtotal.format_with_symbol(&symbol)),
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
        app.selected_category_index
            .min(categories.len().saturating_sub(1)),
    ));

    frame.render_stateful_widget(table, area, &mut state);
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
