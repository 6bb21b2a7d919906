//! TUI Views module
//!
//! Contains the transactions and categories views plus the sidebar and
//! status bar, and owns top-level render orchestration.

pub mod categories;
pub mod sidebar;
pub mod status_bar;
pub mod transactions;

use ratatui::Frame;

use super::app::{ActiveDialog, ActiveView, App};
use super::dialogs;
use super::layout::AppLayout;
use super::widgets::{notification_area, NotificationWidget};

/// Render the entire application
pub fn render(frame: &mut Frame, app: &mut App) {
    let layout = AppLayout::new(frame.area());

    sidebar::render(frame, app, layout.sidebar);

    match app.active_view {
        ActiveView::Transactions => {
            transactions::render(frame, app, layout.main);
        }
        ActiveView::Categories => {
            categories::render(frame, app, layout.main);
        }
    }

    status_bar::render(frame, app, layout.status_bar);

    if app.has_dialog() {
        render_dialog(frame, app);
    }

    // Toasts draw last so they sit on top of everything
    render_notification(frame, app);
}

/// Render active dialog
fn render_dialog(frame: &mut Frame, app: &mut App) {
    match &app.active_dialog {
        ActiveDialog::Help => {
            dialogs::help::render(frame, app);
        }
        ActiveDialog::Confirm(action) => {
            let message = action.message(app.storage);
            dialogs::confirm::render(frame, &message);
        }
        ActiveDialog::AddTransaction | ActiveDialog::EditTransaction(_) => {
            dialogs::transaction::render(frame, app);
        }
        ActiveDialog::AddCategory | ActiveDialog::EditCategory(_) => {
            dialogs::category::render(frame, app);
        }
        ActiveDialog::None => {}
    }
}

/// Render the current toast, if one is live
fn render_notification(frame: &mut Frame, app: &mut App) {
    if let Some(notification) = app.notifications.current() {
        let area = notification_area(frame.area());
        frame.render_widget(NotificationWidget::new(notification), area);
    }
}
