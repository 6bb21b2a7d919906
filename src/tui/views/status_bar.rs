//! Status bar view
//!
//! Shows running totals, the active filter, and key hints

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::models::TransactionType;
use crate::reports::LedgerSummary;
use crate::tui::app::App;

/// Render the status bar
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let symbol = &app.settings.currency_symbol;
    let mut spans = vec![];

    if let Ok(summary) = LedgerSummary::generate(app.storage) {
        let balance_color = if summary.balance.is_negative() {
            Color::Red
        } else {
            Color::Green
        };

        spans.push(Span::styled(" Balance: ", Style::default().fg(Color::White)));
        spans.push(Span::styled(
            summary.balance.format_with_symbol(symbol),
            Style::default()
                .fg(balance_color)
                .add_modifier(Modifier::BOLD),
        ));

        spans.push(Span::raw(" │ "));
        spans.push(Span::styled("In: ", Style::default().fg(Color::White)));
        spans.push(Span::styled(
            summary.total_income.format_with_symbol(symbol),
            Style::default().fg(Color::Green),
        ));

        spans.push(Span::raw(" │ "));
        spans.push(Span::styled("Out: ", Style::default().fg(Color::White)));
        spans.push(Span::styled(
            summary.total_expense.format_with_symbol(symbol),
            Style::default().fg(Color::Red),
        ));
    }

    let filter_label = match app.kind_filter {
        None => "All",
        Some(TransactionType::Income) => "Income",
        Some(TransactionType::Expense) => "Expense",
    };
    spans.push(Span::raw(" │ "));
    spans.push(Span::styled("Filter: ", Style::default().fg(Color::White)));
    spans.push(Span::styled(filter_label, Style::default().fg(Color::Cyan)));

    // Key hints (right-aligned)
    let hints = " q:Quit  ?:Help  Tab:Focus ";

    let left_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let padding_len = (area.width as usize)
        .saturating_sub(left_len)
        .saturating_sub(hints.chars().count());
    let padding = " ".repeat(padding_len.max(1));

    spans.push(Span::raw(padding));
    spans.push(Span::styled(hints, Style::default().fg(Color::White)));

    let line = Line::from(spans);
    let paragraph = Paragraph::new(line);

    frame.render_widget(paragraph, area);
}
