//! Application state for the TUI
//!
//! The App struct holds all state needed for rendering and handling events.

use crate::config::Settings;
use crate::models::{Category, CategoryId, Transaction, TransactionId, TransactionType};
use crate::storage::Storage;

use super::dialogs::category::CategoryFormState;
use super::dialogs::transaction::TransactionFormState;
use super::widgets::{Notification, NotificationQueue};

/// Which view is currently active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Transactions,
    Categories,
}

/// Which panel currently has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusedPanel {
    Sidebar,
    #[default]
    Main,
}

/// Mode of input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// Action pending user confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteTransaction(TransactionId),
    DeleteCategory(CategoryId),
}

impl ConfirmAction {
    /// Build the question shown in the confirm dialog
    pub fn message(&self, storage: &Storage) -> String {
        match self {
            Self::DeleteTransaction(id) => match storage.ledger.get_transaction(*id) {
                Ok(Some(txn)) => {
                    format!("Delete {} of {} ({})?", txn.kind, txn.amount, txn.category)
                }
                _ => "Delete this transaction?".to_string(),
            },
            Self::DeleteCategory(id) => match storage.ledger.get_category(*id) {
                Ok(Some(cat)) => format!("Delete category '{}'?", cat.name),
                _ => "Delete this category?".to_string(),
            },
        }
    }
}

/// Currently active dialog (if any)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActiveDialog {
    #[default]
    None,
    AddTransaction,
    EditTransaction(TransactionId),
    AddCategory,
    EditCategory(CategoryId),
    Confirm(ConfirmAction),
    Help,
}

/// Main application state
pub struct App<'a> {
    /// The storage layer
    pub storage: &'a Storage,

    /// Application settings
    pub settings: &'a Settings,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Currently active view
    pub active_view: ActiveView,

    /// Which panel is focused
    pub focused_panel: FocusedPanel,

    /// Current input mode
    pub input_mode: InputMode,

    /// Currently active dialog
    pub active_dialog: ActiveDialog,

    /// Transaction type filter (None shows everything)
    pub kind_filter: Option<TransactionType>,

    /// Selected transaction index in the table
    pub selected_transaction_index: usize,

    /// Selected category index in the table
    pub selected_category_index: usize,

    /// Selected view index in the sidebar switcher
    pub sidebar_view_index: usize,

    /// Toast notifications
    pub notifications: NotificationQueue,

    /// Transaction form state
    pub transaction_form: TransactionFormState,

    /// Category form state
    pub category_form: CategoryFormState,
}

impl<'a> App<'a> {
    /// Create a new App instance
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        Self {
            storage,
            settings,
            should_quit: false,
            active_view: ActiveView::default(),
            focused_panel: FocusedPanel::default(),
            input_mode: InputMode::default(),
            active_dialog: ActiveDialog::default(),
            kind_filter: None,
            selected_transaction_index: 0,
            selected_category_index: 0,
            sidebar_view_index: 0,
            notifications: NotificationQueue::new(),
            transaction_form: TransactionFormState::new(TransactionType::default()),
            category_form: CategoryFormState::new(),
        }
    }

    /// Request to quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Push a success toast
    pub fn notify_success(&mut self, message: impl Into<String>) {
        self.notifications.push(Notification::success(message));
    }

    /// Push an error toast
    pub fn notify_error(&mut self, message: impl Into<String>) {
        self.notifications.push(Notification::error(message));
    }

    /// Push an info toast
    pub fn notify_info(&mut self, message: impl Into<String>) {
        self.notifications.push(Notification::info(message));
    }

    /// Push a warning toast
    pub fn notify_warning(&mut self, message: impl Into<String>) {
        self.notifications.push(Notification::warning(message));
    }

    /// Switch to a different view
    pub fn switch_view(&mut self, view: ActiveView) {
        self.active_view = view;
        match view {
            ActiveView::Transactions => self.selected_transaction_index = 0,
            ActiveView::Categories => self.selected_category_index = 0,
        }
    }

    /// Toggle focus between sidebar and main panel
    pub fn toggle_panel_focus(&mut self) {
        self.focused_panel = match self.focused_panel {
            FocusedPanel::Sidebar => FocusedPanel::Main,
            FocusedPanel::Main => FocusedPanel::Sidebar,
        };
    }

    /// Cycle the transaction type filter: all -> income -> expense -> all
    pub fn cycle_kind_filter(&mut self) {
        self.kind_filter = match self.kind_filter {
            None => Some(TransactionType::Income),
            Some(TransactionType::Income) => Some(TransactionType::Expense),
            Some(TransactionType::Expense) => None,
        };
        self.selected_transaction_index = 0;
    }

    /// Transactions in display order (newest first, honoring the filter)
    pub fn visible_transactions(&self) -> Vec<Transaction> {
        let mut txns = self.storage.ledger.get_all_transactions().unwrap_or_default();
        if let Some(kind) = self.kind_filter {
            txns.retain(|t| t.kind == kind);
        }
        txns
    }

    /// Categories in display order (income first, then by name)
    pub fn visible_categories(&self) -> Vec<Category> {
        self.storage.ledger.get_all_categories().unwrap_or_default()
    }

    /// Open a dialog
    pub fn open_dialog(&mut self, dialog: ActiveDialog) {
        match &dialog {
            ActiveDialog::AddTransaction => {
                let kind = self.kind_filter.unwrap_or_default();
                self.transaction_form = TransactionFormState::new(kind);
                self.input_mode = InputMode::Editing;
            }
            ActiveDialog::EditTransaction(txn_id) => {
                if let Ok(Some(txn)) = self.storage.ledger.get_transaction(*txn_id) {
                    self.transaction_form = TransactionFormState::from_transaction(&txn);
                }
                self.input_mode = InputMode::Editing;
            }
            ActiveDialog::AddCategory => {
                self.category_form = CategoryFormState::new();
                self.input_mode = InputMode::Editing;
            }
            ActiveDialog::EditCategory(cat_id) => {
                if let Ok(Some(cat)) = self.storage.ledger.get_category(*cat_id) {
                    self.category_form = CategoryFormState::from_category(&cat);
                }
                self.input_mode = InputMode::Editing;
            }
            _ => {}
        }
        self.active_dialog = dialog;
    }

    /// Close the current dialog
    pub fn close_dialog(&mut self) {
        self.active_dialog = ActiveDialog::None;
        self.input_mode = InputMode::Normal;
    }

    /// Check if a dialog is active
    pub fn has_dialog(&self) -> bool {
        !matches!(self.active_dialog, ActiveDialog::None)
    }

    /// Move selection up in the current view
    pub fn move_up(&mut self) {
        match self.focused_panel {
            FocusedPanel::Sidebar => {
                if self.sidebar_view_index > 0 {
                    self.sidebar_view_index -= 1;
                }
            }
            FocusedPanel::Main => match self.active_view {
                ActiveView::Transactions => {
                    if self.selected_transaction_index > 0 {
                        self.selected_transaction_index -= 1;
                    }
                }
                ActiveView::Categories => {
                    if self.selected_category_index > 0 {
                        self.selected_category_index -= 1;
                    }
                }
            },
        }
    }

    /// Move selection down in the current view
    pub fn move_down(&mut self, max: usize) {
        match self.focused_panel {
            FocusedPanel::Sidebar => {
                if self.sidebar_view_index < max.saturating_sub(1) {
                    self.sidebar_view_index += 1;
                }
            }
            FocusedPanel::Main => match self.active_view {
                ActiveView::Transactions => {
                    if self.selected_transaction_index < max.saturating_sub(1) {
                        self.selected_transaction_index += 1;
                    }
                }
                ActiveView::Categories => {
                    if self.selected_category_index < max.saturating_sub(1) {
                        self.selected_category_index += 1;
                    }
                }
            },
        }
    }
}
