//! Transaction entry/edit dialog
//!
//! Modal dialog for adding or editing transactions with form fields,
//! tab navigation, validation, and save/cancel functionality.

use chrono::{Local, NaiveDate};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::models::{Money, Transaction, TransactionType};
use crate::services::{CreateTransactionInput, TransactionService};
use crate::tui::app::{ActiveDialog, App};
use crate::tui::layout::centered_rect;
use crate::tui::widgets::TextInput;

/// Which field is currently focused in the transaction form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransactionField {
    #[default]
    Date,
    Kind,
    Amount,
    Category,
    Description,
}

impl TransactionField {
    /// Get the next field (for Tab navigation)
    pub fn next(self) -> Self {
        match self {
            Self::Date => Self::Kind,
            Self::Kind => Self::Amount,
            Self::Amount => Self::Category,
            Self::Category => Self::Description,
            Self::Description => Self::Date,
        }
    }

    /// Get the previous field (for Shift+Tab navigation)
    pub fn prev(self) -> Self {
        match self {
            Self::Date => Self::Description,
            Self::Kind => Self::Date,
            Self::Amount => Self::Kind,
            Self::Category => Self::Amount,
            Self::Description => Self::Category,
        }
    }
}

/// State for the transaction form dialog
#[derive(Debug, Clone)]
pub struct TransactionFormState {
    /// Currently focused field
    pub focused_field: TransactionField,

    /// Date input
    pub date_input: TextInput,

    /// Transaction type chosen with the selector field
    pub kind: TransactionType,

    /// Amount input
    pub amount_input: TextInput,

    /// Category search input
    pub category_input: TextInput,

    /// Category name picked from the dropdown
    pub selected_category: Option<String>,

    /// Category selection index (for dropdown)
    pub category_list_index: usize,

    /// Description input
    pub description_input: TextInput,

    /// Whether this is an edit (vs new transaction)
    pub is_edit: bool,

    /// Error message to display
    pub error_message: Option<String>,
}

impl Default for TransactionFormState {
    fn default() -> Self {
        Self::new(TransactionType::default())
    }
}

impl TransactionFormState {
    /// Create a new form state with default values
    pub fn new(kind: TransactionType) -> Self {
        let today = Local::now().date_naive();
        Self {
            focused_field: TransactionField::Date,
            date_input: TextInput::new()
                .label("Date")
                .placeholder("YYYY-MM-DD")
                .content(today.format("%Y-%m-%d").to_string()),
            kind,
            amount_input: TextInput::new().label("Amount").placeholder("0.00"),
            category_input: TextInput::new()
                .label("Category")
                .placeholder("Type to search..."),
            selected_category: None,
            category_list_index: 0,
            description_input: TextInput::new()
                .label("Description")
                .placeholder("Optional note"),
            is_edit: false,
            error_message: None,
        }
    }

    /// Create form state pre-populated from an existing transaction
    pub fn from_transaction(txn: &Transaction) -> Self {
        let mut state = Self::new(txn.kind);
        state.is_edit = true;
        state.date_input = TextInput::new()
            .label("Date")
            .content(txn.date.format("%Y-%m-%d").to_string());
        state.amount_input = TextInput::new().label("Amount").content(format!(
            "{}.{:02}",
            txn.amount.dollars(),
            txn.amount.cents_part()
        ));
        state.category_input = TextInput::new().label("Category").content(&txn.category);
        state.selected_category = Some(txn.category.clone());
        state.description_input = TextInput::new()
            .label("Description")
            .content(&txn.description);
        state
    }

    /// Move to the next field
    pub fn next_field(&mut self) {
        self.focused_field = self.focused_field.next();
        self.update_focus();
    }

    /// Move to the previous field
    pub fn prev_field(&mut self) {
        self.focused_field = self.focused_field.prev();
        self.update_focus();
    }

    /// Update which input has focus
    fn update_focus(&mut self) {
        self.date_input.focused = self.focused_field == TransactionField::Date;
        self.amount_input.focused = self.focused_field == TransactionField::Amount;
        self.category_input.focused = self.focused_field == TransactionField::Category;
        self.description_input.focused = self.focused_field == TransactionField::Description;
    }

    /// Toggle the transaction type selector
    ///
    /// Clears the category pick because the dropdown is filtered by type.
    pub fn toggle_kind(&mut self) {
        self.kind = self.kind.toggled();
        self.selected_category = None;
        self.category_input.clear();
        self.category_list_index = 0;
    }

    /// Get the currently focused text input, if the field has one
    pub fn focused_input(&mut self) -> Option<&mut TextInput> {
        match self.focused_field {
            TransactionField::Date => Some(&mut self.date_input),
            TransactionField::Kind => None,
            TransactionField::Amount => Some(&mut self.amount_input),
            TransactionField::Category => Some(&mut self.category_input),
            TransactionField::Description => Some(&mut self.description_input),
        }
    }

    /// Validate the form and return any error
    pub fn validate(&self) -> Result<(), String> {
        if NaiveDate::parse_from_str(self.date_input.value(), "%Y-%m-%d").is_err() {
            return Err("Invalid date format. Use YYYY-MM-DD".to_string());
        }

        let amount_str = self.amount_input.value().trim();
        if amount_str.is_empty() {
            return Err("Enter an amount".to_string());
        }
        match Money::parse(amount_str) {
            Ok(amount) if amount.is_negative() => {
                return Err("Amount must not be negative".to_string());
            }
            Ok(_) => {}
            Err(_) => return Err("Invalid amount format".to_string()),
        }

        if self.selected_category.is_none() {
            return Err("Select a category from the list".to_string());
        }

        Ok(())
    }

    /// Clear any error message
    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    /// Set an error message
    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error_message = Some(msg.into());
    }
}

/// Render the transaction dialog
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = centered_rect(70, 70, frame.area());

    // Clear the background
    frame.render_widget(Clear, area);

    let title = match &app.active_dialog {
        ActiveDialog::AddTransaction => " Add Transaction ",
        ActiveDialog::EditTransaction(_) => " Edit Transaction ",
        _ => " Transaction ",
    };

    let block = Block::default()
        .title(title)
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(block, area);

    // Inner area for content
    let inner = Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(4),
        height: area.height.saturating_sub(2),
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Date
            Constraint::Length(1), // Type selector
            Constraint::Length(1), // Amount
            Constraint::Length(1), // Category input
            Constraint::Length(6), // Category dropdown
            Constraint::Length(1), // Description
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Error
            Constraint::Length(1), // Buttons
            Constraint::Min(0),    // Remaining
        ])
        .split(inner);

    // Extract values we need from form (to avoid borrow conflicts)
    let date_value = app.transaction_form.date_input.value().to_string();
    let date_focused = app.transaction_form.focused_field == TransactionField::Date;
    let date_cursor = app.transaction_form.date_input.cursor;
    let date_placeholder = app.transaction_form.date_input.placeholder.clone();

    let amount_value = app.transaction_form.amount_input.value().to_string();
    let amount_focused = app.transaction_form.focused_field == TransactionField::Amount;
    let amount_cursor = app.transaction_form.amount_input.cursor;
    let amount_placeholder = app.transaction_form.amount_input.placeholder.clone();

    let description_value = app.transaction_form.description_input.value().to_string();
    let description_focused =
        app.transaction_form.focused_field == TransactionField::Description;
    let description_cursor = app.transaction_form.description_input.cursor;
    let description_placeholder = app.transaction_form.description_input.placeholder.clone();

    let error_message = app.transaction_form.error_message.clone();

    render_field_simple(
        frame,
        chunks[0],
        "Date",
        &date_value,
        date_focused,
        date_cursor,
        &date_placeholder,
    );

    render_kind_selector(frame, app, chunks[1]);

    render_field_simple(
        frame,
        chunks[2],
        "Amount",
        &amount_value,
        amount_focused,
        amount_cursor,
        &amount_placeholder,
    );

    render_category_field(frame, app, chunks[3], chunks[4]);

    render_field_simple(
        frame,
        chunks[5],
        "Description",
        &description_value,
        description_focused,
        description_cursor,
        &description_placeholder,
    );

    if let Some(ref error) = error_message {
        let error_line = Line::from(Span::styled(
            error.as_str(),
            Style::default().fg(Color::Red),
        ));
        frame.render_widget(Paragraph::new(error_line), chunks[7]);
    }

    let hints = Line::from(vec![
        Span::styled("[Tab]", Style::default().fg(Color::Yellow)),
        Span::raw(" Next  "),
        Span::styled("[Shift+Tab]", Style::default().fg(Color::Yellow)),
        Span::raw(" Prev  "),
        Span::styled("[Enter]", Style::default().fg(Color::Green)),
        Span::raw(" Save  "),
        Span::styled("[Esc]", Style::default().fg(Color::Red)),
        Span::raw(" Cancel"),
    ]);
    frame.render_widget(Paragraph::new(hints), chunks[8]);
}

/// Render a single form field with extracted values
pub(super) fn render_field_simple(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    focused: bool,
    cursor: usize,
    placeholder: &str,
) {
    let label_style = if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };

    let label_span = Span::styled(format!("{:>12}: ", label), label_style);

    let value_style = if focused {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Yellow)
    };

    let display_value = if value.is_empty() && !focused {
        placeholder.to_string()
    } else {
        value.to_string()
    };

    let mut spans = vec![label_span];

    if focused {
        // Cursor is kept on a char boundary by TextInput
        let cursor_pos = cursor.min(display_value.len());
        let (before, after) = display_value.split_at(cursor_pos);

        spans.push(Span::styled(before.to_string(), value_style));

        let cursor_char = after.chars().next().unwrap_or(' ');
        spans.push(Span::styled(
            cursor_char.to_string(),
            Style::default().fg(Color::Black).bg(Color::Cyan),
        ));

        let rest = after.chars().skip(1).collect::<String>();
        if !rest.is_empty() {
            spans.push(Span::styled(rest, value_style));
        }
    } else {
        spans.push(Span::styled(display_value, value_style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the income/expense selector field
fn render_kind_selector(frame: &mut Frame, app: &App, area: Rect) {
    let form = &app.transaction_form;
    let focused = form.focused_field == TransactionField::Kind;

    let label_style = if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };

    let kind_color = match form.kind {
        TransactionType::Income => Color::Green,
        TransactionType::Expense => Color::Red,
    };

    let mut spans = vec![
        Span::styled(format!("{:>12}: ", "Type"), label_style),
        Span::styled(
            form.kind.to_string(),
            Style::default().fg(kind_color).add_modifier(Modifier::BOLD),
        ),
    ];

    if focused {
        spans.push(Span::styled(
            "  ◀ j/k ▶",
            Style::default().fg(Color::Yellow),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the category field with dropdown
fn render_category_field(frame: &mut Frame, app: &mut App, input_area: Rect, dropdown_area: Rect) {
    let form = &app.transaction_form;
    let focused = form.focused_field == TransactionField::Category;

    let label_style = if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };

    let display_value = if let Some(ref name) = form.selected_category {
        name.clone()
    } else if form.category_input.value().is_empty() && !focused {
        form.category_input.placeholder.clone()
    } else {
        form.category_input.value().to_string()
    };

    let value_style = if focused {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Yellow)
    };

    let mut spans = vec![Span::styled(format!("{:>12}: ", "Category"), label_style)];

    if focused && form.selected_category.is_none() {
        let cursor_pos = form.category_input.cursor.min(display_value.len());
        let (before, after) = display_value.split_at(cursor_pos);

        spans.push(Span::styled(before.to_string(), value_style));

        let cursor_char = after.chars().next().unwrap_or(' ');
        spans.push(Span::styled(
            cursor_char.to_string(),
            Style::default().fg(Color::Black).bg(Color::Cyan),
        ));

        let rest = after.chars().skip(1).collect::<String>();
        if !rest.is_empty() {
            spans.push(Span::styled(rest, value_style));
        }
    } else {
        spans.push(Span::styled(display_value, value_style));
        if focused && form.selected_category.is_some() {
            spans.push(Span::styled(
                " (Backspace to clear)",
                Style::default().fg(Color::Yellow),
            ));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), input_area);

    if focused {
        render_category_dropdown(frame, app, dropdown_area);
    }
}

/// Render the category dropdown list, filtered by the form's type
fn render_category_dropdown(frame: &mut Frame, app: &mut App, area: Rect) {
    let categories = app
        .storage
        .ledger
        .get_categories_by_kind(app.transaction_form.kind)
        .unwrap_or_default();

    let search = app.transaction_form.category_input.value().to_lowercase();
    let filtered: Vec<_> = categories
        .iter()
        .filter(|c| search.is_empty() || c.name.to_lowercase().contains(&search))
        .take(5)
        .collect();

    if filtered.is_empty() {
        let hint = if search.is_empty() {
            "No categories for this type. Add one in the Categories view."
        } else {
            "No matching categories"
        };
        let text = Paragraph::new(hint).style(Style::default().fg(Color::Yellow));
        frame.render_widget(text, area);
        return;
    }

    let items: Vec<ListItem> = filtered
        .iter()
        .map(|cat| {
            ListItem::new(Line::from(Span::styled(
                format!("  {}", cat.name),
                Style::default().fg(Color::White),
            )))
        })
        .collect();

    let list = List::new(items)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = ListState::default();
    let idx = app
        .transaction_form
        .category_list_index
        .min(filtered.len().saturating_sub(1));
    state.select(Some(idx));

    frame.render_stateful_widget(list, area, &mut state);
}

/// Handle key input for the transaction dialog
/// Returns true if the key was handled, false otherwise
pub fn handle_key(app: &mut App, key: crossterm::event::KeyEvent) -> bool {
    use crossterm::event::{KeyCode, KeyModifiers};

    let form = &mut app.transaction_form;

    match key.code {
        KeyCode::Esc => {
            app.close_dialog();
            return true;
        }

        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                form.prev_field();
            } else {
                form.next_field();
            }
            return true;
        }

        KeyCode::BackTab => {
            form.prev_field();
            return true;
        }

        KeyCode::Enter => {
            // On the category field, Enter picks from the dropdown first
            if form.focused_field == TransactionField::Category
                && form.selected_category.is_none()
            {
                select_category_from_dropdown(app);
                return true;
            }

            if let Err(e) = save_transaction(app) {
                app.transaction_form.set_error(e);
            }
            return true;
        }

        KeyCode::Up => {
            if form.focused_field == TransactionField::Category
                && form.selected_category.is_none()
            {
                if form.category_list_index > 0 {
                    form.category_list_index -= 1;
                }
                return true;
            }
        }

        KeyCode::Down => {
            if form.focused_field == TransactionField::Category
                && form.selected_category.is_none()
            {
                form.category_list_index += 1;
                return true;
            }
        }

        KeyCode::Left => {
            if form.focused_field == TransactionField::Kind {
                form.toggle_kind();
            } else if let Some(input) = form.focused_input() {
                input.move_left();
            }
            return true;
        }

        KeyCode::Right => {
            if form.focused_field == TransactionField::Kind {
                form.toggle_kind();
            } else if let Some(input) = form.focused_input() {
                input.move_right();
            }
            return true;
        }

        KeyCode::Backspace => {
            form.clear_error();

            if form.focused_field == TransactionField::Category
                && form.selected_category.is_some()
            {
                form.selected_category = None;
                form.category_input.clear();
                return true;
            }

            if let Some(input) = form.focused_input() {
                input.backspace();
            }
            return true;
        }

        KeyCode::Delete => {
            form.clear_error();
            if let Some(input) = form.focused_input() {
                input.delete();
            }
            return true;
        }

        KeyCode::Home => {
            if let Some(input) = form.focused_input() {
                input.move_start();
            }
            return true;
        }

        KeyCode::End => {
            if let Some(input) = form.focused_input() {
                input.move_end();
            }
            return true;
        }

        KeyCode::Char(c) => {
            form.clear_error();

            if form.focused_field == TransactionField::Kind {
                if matches!(c, 'j' | 'k' | 'h' | 'l' | ' ') {
                    form.toggle_kind();
                }
                return true;
            }

            if form.focused_field == TransactionField::Category
                && form.selected_category.is_some()
            {
                form.selected_category = None;
                form.category_input.clear();
            }

            if let Some(input) = form.focused_input() {
                input.insert(c);
            }

            if form.focused_field == TransactionField::Category {
                form.category_list_index = 0;
            }

            return true;
        }

        _ => {}
    }

    false
}

/// Select the currently highlighted category from the dropdown
fn select_category_from_dropdown(app: &mut App) {
    let categories = app
        .storage
        .ledger
        .get_categories_by_kind(app.transaction_form.kind)
        .unwrap_or_default();

    let search = app.transaction_form.category_input.value().to_lowercase();
    let filtered: Vec<_> = categories
        .iter()
        .filter(|c| search.is_empty() || c.name.to_lowercase().contains(&search))
        .take(5)
        .collect();

    let idx = app
        .transaction_form
        .category_list_index
        .min(filtered.len().saturating_sub(1));
    if let Some(cat) = filtered.get(idx) {
        app.transaction_form.selected_category = Some(cat.name.clone());
        app.transaction_form.category_input =
            TextInput::new().label("Category").content(&cat.name);
        app.transaction_form.next_field();
    }
}

/// Save the transaction through the service layer
fn save_transaction(app: &mut App) -> Result<(), String> {
    app.transaction_form.validate()?;

    let date = NaiveDate::parse_from_str(app.transaction_form.date_input.value(), "%Y-%m-%d")
        .map_err(|_| "Invalid date")?;
    let amount = Money::parse(app.transaction_form.amount_input.value().trim())
        .map_err(|_| "Invalid amount")?;
    let kind = app.transaction_form.kind;
    let category = app
        .transaction_form
        .selected_category
        .clone()
        .ok_or("Select a category from the list")?;
    let description = app
        .transaction_form
        .description_input
        .value()
        .trim()
        .to_string();

    let is_edit = matches!(app.active_dialog, ActiveDialog::EditTransaction(_));

    {
        let service = TransactionService::new(app.storage);
        if let ActiveDialog::EditTransaction(txn_id) = app.active_dialog {
            service
                .update(
                    txn_id,
                    Some(kind),
                    Some(date),
                    Some(amount),
                    Some(category),
                    Some(description),
                )
                .map_err(|e| e.to_string())?;
        } else {
            let description = if description.is_empty() {
                None
            } else {
                Some(description)
            };
            service
                .create(CreateTransactionInput {
                    kind,
                    date,
                    amount,
                    category,
                    description,
                })
                .map_err(|e| e.to_string())?;
        }
    }

    app.close_dialog();
    app.notify_success(if is_edit {
        "Transaction updated"
    } else {
        "Transaction created"
    });

    Ok(())
}
