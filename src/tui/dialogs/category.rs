//! Category entry dialog
//!
//! Modal dialog for adding or editing categories with form validation,
//! type selection, and save/cancel functionality.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::models::{Category, CategoryId, TransactionType};
use crate::services::CategoryService;
use crate::tui::app::App;
use crate::tui::layout::centered_rect;
use crate::tui::widgets::TextInput;

/// Which field is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryField {
    #[default]
    Name,
    Kind,
}

/// State for the category form dialog
#[derive(Debug, Clone)]
pub struct CategoryFormState {
    /// Name input
    pub name_input: TextInput,

    /// Selected transaction type
    pub kind: TransactionType,

    /// Currently focused field
    pub focused_field: CategoryField,

    /// Error message to display
    pub error_message: Option<String>,

    /// Category ID being edited (None for new category)
    pub editing_id: Option<CategoryId>,
}

impl Default for CategoryFormState {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryFormState {
    /// Create a new form state with default values
    pub fn new() -> Self {
        Self {
            name_input: TextInput::new()
                .label("Name")
                .placeholder("Category name (e.g., Groceries, Rent)"),
            kind: TransactionType::default(),
            focused_field: CategoryField::Name,
            error_message: None,
            editing_id: None,
        }
    }

    /// Create form state pre-populated from an existing category
    pub fn from_category(category: &Category) -> Self {
        let mut state = Self::new();
        state.name_input = TextInput::new()
            .label("Name")
            .placeholder("Category name (e.g., Groceries, Rent)")
            .content(&category.name);
        state.kind = category.kind;
        state.editing_id = Some(category.id);
        state
    }

    /// Move to next field
    pub fn next_field(&mut self) {
        self.focused_field = match self.focused_field {
            CategoryField::Name => CategoryField::Kind,
            CategoryField::Kind => CategoryField::Name,
        };
    }

    /// Move to previous field
    pub fn prev_field(&mut self) {
        self.focused_field = match self.focused_field {
            CategoryField::Name => CategoryField::Kind,
            CategoryField::Kind => CategoryField::Name,
        };
    }

    /// Flip the type selector
    pub fn toggle_kind(&mut self) {
        self.kind = self.kind.toggled();
    }

    /// Validate the form and return any error
    pub fn validate(&self) -> Result<(), String> {
        let name = self.name_input.value().trim();
        if name.is_empty() {
            return Err("Category name is required".to_string());
        }
        if name.len() > 50 {
            return Err("Category name too long (max 50 chars)".to_string());
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

/// Render the category dialog
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = centered_rect(50, 30, frame.area());

    // Clear the background
    frame.render_widget(Clear, area);

    let title = if app.category_form.editing_id.is_some() {
        " Edit Category "
    } else {
        " Add Category "
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
            Constraint::Length(1), // Name
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Type selector
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Error
            Constraint::Length(1), // Buttons
            Constraint::Min(0),    // Remaining
        ])
        .split(inner);

    // Extract values to avoid borrow conflicts
    let name_value = app.category_form.name_input.value().to_string();
    let name_cursor = app.category_form.name_input.cursor;
    let name_placeholder = app.category_form.name_input.placeholder.clone();
    let focused_field = app.category_form.focused_field;
    let error_message = app.category_form.error_message.clone();
    let kind = app.category_form.kind;

    render_text_field(
        frame,
        chunks[0],
        "Name",
        &name_value,
        focused_field == CategoryField::Name,
        name_cursor,
        &name_placeholder,
    );

    render_kind_field(frame, chunks[2], kind, focused_field == CategoryField::Kind);

    if let Some(ref error) = error_message {
        let error_line = Line::from(Span::styled(
            error.as_str(),
            Style::default().fg(Color::Red),
        ));
        frame.render_widget(Paragraph::new(error_line), chunks[4]);
    }

    let hints = Line::from(vec![
        Span::styled("[Tab]", Style::default().fg(Color::Yellow)),
        Span::raw(" Next  "),
        Span::styled("[Enter]", Style::default().fg(Color::Green)),
        Span::raw(" Save  "),
        Span::styled("[Esc]", Style::default().fg(Color::Red)),
        Span::raw(" Cancel"),
    ]);
    frame.render_widget(Paragraph::new(hints), chunks[5]);
}

/// Render a text field
fn render_text_field(
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
        Style::default().fg(Color::Yellow)
    };

    let label_span = Span::styled(format!("{}: ", label), label_style);
    let value_style = Style::default().fg(Color::White);

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
fn render_kind_field(frame: &mut Frame, area: Rect, kind: TransactionType, focused: bool) {
    let label_style = if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow)
    };

    let kind_color = match kind {
        TransactionType::Income => Color::Green,
        TransactionType::Expense => Color::Red,
    };

    let value_style = if focused {
        Style::default().fg(kind_color).bg(Color::DarkGray)
    } else {
        Style::default().fg(kind_color)
    };

    let hint = if focused { " ◀ j/k ▶" } else { "" };

    let line = Line::from(vec![
        Span::styled("Type: ", label_style),
        Span::styled(format!(" {} ", kind), value_style),
        Span::styled(hint, Style::default().fg(Color::Yellow)),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Handle key input for the category dialog
pub fn handle_key(app: &mut App, key: crossterm::event::KeyEvent) -> bool {
    use crossterm::event::KeyCode;

    match key.code {
        KeyCode::Esc => {
            app.close_dialog();
            return true;
        }

        KeyCode::Tab | KeyCode::Down if app.category_form.focused_field == CategoryField::Name => {
            app.category_form.next_field();
            return true;
        }

        KeyCode::BackTab | KeyCode::Up
            if app.category_form.focused_field == CategoryField::Kind =>
        {
            app.category_form.prev_field();
            return true;
        }

        KeyCode::Enter => {
            if let Err(e) = save_category(app) {
                app.category_form.set_error(e);
            }
            return true;
        }

        _ => {}
    }

    // Field-specific handling
    match app.category_form.focused_field {
        CategoryField::Name => handle_name_input(app, key),
        CategoryField::Kind => handle_kind_selector(app, key),
    }
}

/// Handle input for the name field
fn handle_name_input(app: &mut App, key: crossterm::event::KeyEvent) -> bool {
    use crossterm::event::KeyCode;

    let form = &mut app.category_form;

    match key.code {
        KeyCode::Backspace => {
            form.clear_error();
            form.name_input.backspace();
            true
        }

        KeyCode::Delete => {
            form.clear_error();
            form.name_input.delete();
            true
        }

        KeyCode::Left => {
            form.name_input.move_left();
            true
        }

        KeyCode::Right => {
            form.name_input.move_right();
            true
        }

        KeyCode::Home => {
            form.name_input.move_start();
            true
        }

        KeyCode::End => {
            form.name_input.move_end();
            true
        }

        KeyCode::Char(c) => {
            form.clear_error();
            form.name_input.insert(c);
            true
        }

        _ => false,
    }
}

/// Handle input for the type selector
fn handle_kind_selector(app: &mut App, key: crossterm::event::KeyEvent) -> bool {
    use crossterm::event::KeyCode;

    let form = &mut app.category_form;

    match key.code {
        KeyCode::Char('j') | KeyCode::Char('k') | KeyCode::Left | KeyCode::Right => {
            form.toggle_kind();
            true
        }

        _ => false,
    }
}

/// Save the category through the service layer
fn save_category(app: &mut App) -> Result<(), String> {
    app.category_form.validate()?;

    let name = app.category_form.name_input.value().trim().to_string();
    let kind = app.category_form.kind;

    let service = CategoryService::new(app.storage);

    if let Some(category_id) = app.category_form.editing_id {
        service
            .update(category_id, Some(&name), Some(kind))
            .map_err(|e| e.to_string())?;

        app.close_dialog();
        app.notify_success(format!("Category '{}' updated", name));
    } else {
        service
            .create(&name, kind)
            .map_err(|e| e.to_string())?;

        app.close_dialog();
        app.notify_success(format!("Category '{}' created", name));
    }

    Ok(())
}
