//! Help dialog
//!
//! Shows contextual keyboard shortcuts built from the keybinding table

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::app::{ActiveView, App};
use crate::tui::keybindings::{format_keybinding, KeyContext, KEYBINDINGS};
use crate::tui::layout::centered_rect;

/// Render the help dialog
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = centered_rect(60, 70, frame.area());

    // Clear the background
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let help_lines = get_help_lines(app);

    let paragraph = Paragraph::new(help_lines)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

/// Get help lines for the current context
fn get_help_lines(app: &App) -> Vec<Line<'static>> {
    let mut lines = section("Global Keys", KeyContext::Global);

    match app.active_view {
        ActiveView::Transactions => {
            lines.extend(section("Transactions View", KeyContext::TransactionsView));
        }
        ActiveView::Categories => {
            lines.extend(section("Categories View", KeyContext::CategoriesView));
        }
    }

    lines.extend(section("Sidebar", KeyContext::Sidebar));
    lines.extend(section("Dialogs", KeyContext::Dialog));

    lines.push(Line::from(vec![Span::styled(
        "Press any key to close",
        Style::default().fg(Color::DarkGray),
    )]));

    lines
}

/// Build a titled section from the keybinding table
fn section(title: &'static str, context: KeyContext) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(vec![Span::styled(
            title,
            Style::default()
                .add_modifier(Modifier::BOLD)
                .fg(Color::Yellow),
        )]),
        Line::from(""),
    ];

    for kb in KEYBINDINGS.iter().filter(|kb| kb.context == context) {
        lines.push(key_line(&format_keybinding(kb), kb.description));
    }

    lines.push(Line::from(""));
    lines
}

/// Create a formatted key line
fn key_line(key: &str, description: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:>12}", key), Style::default().fg(Color::Cyan)),
        Span::raw("  "),
        Span::styled(description.to_string(), Style::default().fg(Color::White)),
    ])
}
