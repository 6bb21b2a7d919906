//! Event handler for the TUI
//!
//! Routes keyboard and mouse events to the appropriate handlers
//! based on the current application state.

use std::path::Path;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use crate::reports::Statement;
use crate::services::{CategoryService, TransactionService};

use super::app::{ActiveDialog, ActiveView, App, ConfirmAction, FocusedPanel, InputMode};
use super::event::Event;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) -> Result<()> {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Mouse(_mouse) => Ok(()),
        Event::Tick => {
            app.notifications.remove_expired();
            Ok(())
        }
        Event::Resize(_, _) => Ok(()),
    }
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    // Dialogs capture all input first
    if app.has_dialog() {
        return handle_dialog_key(app, key);
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_key(app, key),
        InputMode::Editing => handle_editing_key(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_key(app: &mut App, key: KeyEvent) -> Result<()> {
    // Global keys (work everywhere)
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            app.quit();
            return Ok(());
        }

        KeyCode::Char('?') => {
            app.open_dialog(ActiveDialog::Help);
            return Ok(());
        }

        KeyCode::Tab => {
            app.toggle_panel_focus();
            return Ok(());
        }
        KeyCode::Char('h') | KeyCode::Left if key.modifiers.is_empty() => {
            if app.focused_panel == FocusedPanel::Main {
                app.focused_panel = FocusedPanel::Sidebar;
                return Ok(());
            }
        }
        KeyCode::Char('l') | KeyCode::Right if key.modifiers.is_empty() => {
            if app.focused_panel == FocusedPanel::Sidebar {
                app.focused_panel = FocusedPanel::Main;
                return Ok(());
            }
        }

        KeyCode::Char('1') => {
            app.switch_view(ActiveView::Transactions);
            app.focused_panel = FocusedPanel::Main;
            return Ok(());
        }
        KeyCode::Char('2') => {
            app.switch_view(ActiveView::Categories);
            app.focused_panel = FocusedPanel::Main;
            return Ok(());
        }

        _ => {}
    }

    match app.focused_panel {
        FocusedPanel::Sidebar => handle_sidebar_key(app, key),
        FocusedPanel::Main => handle_main_panel_key(app, key),
    }
}

/// Handle keys when the sidebar is focused
fn handle_sidebar_key(app: &mut App, key: KeyEvent) -> Result<()> {
    const VIEW_COUNT: usize = 2;

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            app.move_down(VIEW_COUNT);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.move_up();
        }

        KeyCode::Enter => {
            let view = match app.sidebar_view_index {
                0 => ActiveView::Transactions,
                _ => ActiveView::Categories,
            };
            app.switch_view(view);
            app.focused_panel = FocusedPanel::Main;
        }

        _ => {}
    }

    Ok(())
}

/// Handle keys when the main panel is focused
fn handle_main_panel_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match app.active_view {
        ActiveView::Transactions => handle_transactions_view_key(app, key),
        ActiveView::Categories => handle_categories_view_key(app, key),
    }
}

/// Handle keys in the transactions view
fn handle_transactions_view_key(app: &mut App, key: KeyEvent) -> Result<()> {
    // Display order, so the index lines up with the table
    let txns = app.visible_transactions();
    let txn_count = txns.len();

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            app.move_down(txn_count);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.move_up();
        }

        KeyCode::Char('g') => {
            app.selected_transaction_index = 0;
        }
        KeyCode::Char('G') => {
            app.selected_transaction_index = txn_count.saturating_sub(1);
        }

        KeyCode::Char('f') => {
            app.cycle_kind_filter();
        }

        KeyCode::Char('r') => {
            export_statement(app);
        }

        KeyCode::Char('a') | KeyCode::Char('n') => {
            app.open_dialog(ActiveDialog::AddTransaction);
        }

        KeyCode::Char('e') | KeyCode::Enter => {
            if let Some(txn) = txns.get(app.selected_transaction_index) {
                app.open_dialog(ActiveDialog::EditTransaction(txn.id));
            }
        }

        KeyCode::Char('d') => {
            if let Some(txn) = txns.get(app.selected_transaction_index) {
                app.open_dialog(ActiveDialog::Confirm(ConfirmAction::DeleteTransaction(
                    txn.id,
                )));
            }
        }

        _ => {}
    }

    Ok(())
}

/// Handle keys in the categories view
fn handle_categories_view_key(app: &mut App, key: KeyEvent) -> Result<()> {
    let categories = app.visible_categories();
    let category_count = categories.len();

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            app.move_down(category_count);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.move_up();
        }

        KeyCode::Char('g') => {
            app.selected_category_index = 0;
        }
        KeyCode::Char('G') => {
            app.selected_category_index = category_count.saturating_sub(1);
        }

        KeyCode::Char('a') | KeyCode::Char('n') => {
            app.open_dialog(ActiveDialog::AddCategory);
        }

        KeyCode::Char('e') | KeyCode::Enter => {
            if let Some(cat) = categories.get(app.selected_category_index) {
                app.open_dialog(ActiveDialog::EditCategory(cat.id));
            }
        }

        KeyCode::Char('d') => {
            if let Some(cat) = categories.get(app.selected_category_index) {
                app.open_dialog(ActiveDialog::Confirm(ConfirmAction::DeleteCategory(
                    cat.id,
                )));
            }
        }

        _ => {}
    }

    Ok(())
}

/// Export the statement for the currently filtered type
///
/// Requires an active type filter so the export target is unambiguous, and
/// refuses to write a statement with no transactions.
fn export_statement(app: &mut App) {
    let kind = match app.kind_filter {
        Some(kind) => kind,
        None => {
            app.notify_info("Press 'f' to filter by type, then 'r' to export that report");
            return;
        }
    };

    let format = app.settings.default_report_format;

    let statement = match Statement::generate(app.storage, kind) {
        Ok(statement) => statement,
        Err(_) => {
            app.notify_error("Could not export the report. Nothing was saved.");
            return;
        }
    };

    if statement.is_empty() {
        app.notify_warning(format!(
            "No {} transactions to report",
            kind.to_string().to_lowercase()
        ));
        return;
    }

    let file_name = statement.file_name(format);
    match statement.write_to_file(Path::new(&file_name), format) {
        Ok(()) => app.notify_success(format!("Report saved to {}", file_name)),
        Err(_) => app.notify_error("Could not export the report. Nothing was saved."),
    }
}

/// Handle keys in editing mode
///
/// Editing happens inside dialogs, which are handled before this; Esc is a
/// safety hatch in case the mode and dialog state ever disagree.
fn handle_editing_key(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.code == KeyCode::Esc {
        app.input_mode = InputMode::Normal;
    }
    Ok(())
}

/// Handle keys when a dialog is open
fn handle_dialog_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match &app.active_dialog {
        ActiveDialog::Help => {
            // Close help on any key
            app.close_dialog();
        }
        ActiveDialog::Confirm(action) => {
            let action = *action;
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    app.close_dialog();
                    execute_confirm(app, action);
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    app.close_dialog();
                }
                _ => {}
            }
        }
        ActiveDialog::AddTransaction | ActiveDialog::EditTransaction(_) => {
            super::dialogs::transaction::handle_key(app, key);
        }
        ActiveDialog::AddCategory | ActiveDialog::EditCategory(_) => {
            super::dialogs::category::handle_key(app, key);
        }
        ActiveDialog::None => {}
    }
    Ok(())
}

/// Execute an action after user confirmation
fn execute_confirm(app: &mut App, action: ConfirmAction) {
    match action {
        ConfirmAction::DeleteTransaction(txn_id) => {
            let result = TransactionService::new(app.storage).delete(txn_id);
            match result {
                Ok(_) => {
                    let count = app.visible_transactions().len();
                    if app.selected_transaction_index >= count {
                        app.selected_transaction_index = count.saturating_sub(1);
                    }
                    app.notify_success("Transaction deleted");
                }
                Err(e) => {
                    app.notify_error(format!("Failed to delete: {}", e));
                }
            }
        }
        ConfirmAction::DeleteCategory(cat_id) => {
            let result = CategoryService::new(app.storage).delete(cat_id);
            match result {
                Ok(removed) => {
                    let count = app.visible_categories().len();
                    if app.selected_category_index >= count {
                        app.selected_category_index = count.saturating_sub(1);
                    }
                    app.notify_success(format!("Category '{}' deleted", removed.name));
                }
                Err(e) => {
                    app.notify_error(format!("Failed to delete: {}", e));
                }
            }
        }
    }
}
