//! Sidebar view
//!
//! Shows running totals and the view switcher

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::reports::LedgerSummary;
use crate::tui::app::{ActiveView, App, FocusedPanel};
use crate::tui::layout::SidebarLayout;

/// Render the sidebar
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let layout = SidebarLayout::new(area);

    render_header(frame, layout.header);
    render_totals(frame, app, layout.totals);
    render_view_switcher(frame, app, layout.view_switcher);
}

/// Render sidebar header
fn render_header(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Tally ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let version = Paragraph::new(concat!("v", env!("CARGO_PKG_VERSION")))
        .block(block)
        .style(Style::default().fg(Color::DarkGray));

    frame.render_widget(version, area);
}

/// Render income/expense/balance totals
fn render_totals(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .title(" Totals ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let summary = match LedgerSummary::generate(app.storage) {
        Ok(summary) => summary,
        Err(_) => {
            let text = Paragraph::new("(unavailable)")
                .block(block)
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(text, area);
            return;
        }
    };

    let symbol = &app.settings.currency_symbol;
    let income = summary.total_income.format_with_symbol(symbol);
    let expense = summary.total_expense.format_with_symbol(symbol);
    let balance = summary.balance.format_with_symbol(symbol);

    let balance_color = if summary.balance.is_negative() {
        Color::Red
    } else {
        Color::Green
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(format!("{:<10}", "Income"), Style::default().fg(Color::Green)),
            Span::styled(format!("{:>14}", income), Style::default().fg(Color::White)),
        ]),
        Line::from(vec![
            Span::styled(format!("{:<10}", "Expenses"), Style::default().fg(Color::Red)),
            Span::styled(format!("{:>14}", expense), Style::default().fg(Color::White)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("{:<10}", "Balance"),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("{:>14}", balance),
                Style::default()
                    .fg(balance_color)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    ];

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

/// Render view switcher
fn render_view_switcher(frame: &mut Frame, app: &mut App, area: Rect) {
    let is_focused = app.focused_panel == FocusedPanel::Sidebar;

    let border_color = if is_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let block = Block::default()
        .title(" Views ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let views = [
        ("1", "Transactions", ActiveView::Transactions),
        ("2", "Categories", ActiveView::Categories),
    ];

    let items: Vec<ListItem> = views
        .iter()
        .map(|(key, name, view)| {
            let style = if app.active_view == *view {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            let indicator = if app.active_view == *view { "▶" } else { " " };

            let line = Line::from(vec![
                Span::styled(format!("{} ", indicator), style),
                Span::styled(format!("[{}] ", key), Style::default().fg(Color::Yellow)),
                Span::styled(*name, style),
            ]);

            ListItem::new(line)
        })
        .collect();

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    );

    if is_focused {
        let mut state = ListState::default();
        state.select(Some(app.sidebar_view_index.min(views.len() - 1)));
        frame.render_stateful_widget(list, area, &mut state);
    } else {
        frame.render_widget(list, area);
    }
}
