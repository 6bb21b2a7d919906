//! Centralized keybinding definitions
//!
//! Single source of truth for key handling and the help dialog.

use crossterm::event::{KeyCode, KeyModifiers};

/// A keybinding with its description
#[derive(Debug, Clone)]
pub struct Keybinding {
    /// The key code
    pub key: KeyCode,
    /// Required modifiers
    pub modifiers: KeyModifiers,
    /// Description of what the key does
    pub description: &'static str,
    /// Context where this keybinding is active
    pub context: KeyContext,
}

/// Context in which a keybinding is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyContext {
    /// Active everywhere
    Global,
    /// Active in the sidebar
    Sidebar,
    /// Active in the transactions view
    TransactionsView,
    /// Active in the categories view
    CategoriesView,
    /// Active inside dialogs
    Dialog,
}

/// All keybindings
pub static KEYBINDINGS: &[Keybinding] = &[
    // Global
    Keybinding {
        key: KeyCode::Char('q'),
        modifiers: KeyModifiers::NONE,
        description: "Quit",
        context: KeyContext::Global,
    },
    Keybinding {
        key: KeyCode::Char('?'),
        modifiers: KeyModifiers::NONE,
        description: "Show help",
        context: KeyContext::Global,
    },
    Keybinding {
        key: KeyCode::Tab,
        modifiers: KeyModifiers::NONE,
        description: "Switch panel focus",
        context: KeyContext::Global,
    },
    Keybinding {
        key: KeyCode::Char('1'),
        modifiers: KeyModifiers::NONE,
        description: "Transactions view",
        context: KeyContext::Global,
    },
    Keybinding {
        key: KeyCode::Char('2'),
        modifiers: KeyModifiers::NONE,
        description: "Categories view",
        context: KeyContext::Global,
    },
    // Sidebar
    Keybinding {
        key: KeyCode::Char('j'),
        modifiers: KeyModifiers::NONE,
        description: "Next view",
        context: KeyContext::Sidebar,
    },
    Keybinding {
        key: KeyCode::Char('k'),
        modifiers: KeyModifiers::NONE,
        description: "Previous view",
        context: KeyContext::Sidebar,
    },
    Keybinding {
        key: KeyCode::Enter,
        modifiers: KeyModifiers::NONE,
        description: "Open selected view",
        context: KeyContext::Sidebar,
    },
    // Transactions view
    Keybinding {
        key: KeyCode::Char('j'),
        modifiers: KeyModifiers::NONE,
        description: "Next transaction",
        context: KeyContext::TransactionsView,
    },
    Keybinding {
        key: KeyCode::Char('k'),
        modifiers: KeyModifiers::NONE,
        description: "Previous transaction",
        context: KeyContext::TransactionsView,
    },
    Keybinding {
        key: KeyCode::Char('g'),
        modifiers: KeyModifiers::NONE,
        description: "First transaction",
        context: KeyContext::TransactionsView,
    },
    Keybinding {
        key: KeyCode::Char('G'),
        modifiers: KeyModifiers::SHIFT,
        description: "Last transaction",
        context: KeyContext::TransactionsView,
    },
    Keybinding {
        key: KeyCode::Char('a'),
        modifiers: KeyModifiers::NONE,
        description: "Add transaction",
        context: KeyContext::TransactionsView,
    },
    Keybinding {
        key: KeyCode::Char('e'),
        modifiers: KeyModifiers::NONE,
        description: "Edit transaction",
        context: KeyContext::TransactionsView,
    },
    Keybinding {
        key: KeyCode::Char('d'),
        modifiers: KeyModifiers::NONE,
        description: "Delete transaction",
        context: KeyContext::TransactionsView,
    },
    Keybinding {
        key: KeyCode::Char('f'),
        modifiers: KeyModifiers::NONE,
        description: "Cycle type filter",
        context: KeyContext::TransactionsView,
    },
    Keybinding {
        key: KeyCode::Char('r'),
        modifiers: KeyModifiers::NONE,
        description: "Export report for filtered type",
        context: KeyContext::TransactionsView,
    },
    // Categories view
    Keybinding {
        key: KeyCode::Char('j'),
        modifiers: KeyModifiers::NONE,
        description: "Next category",
        context: KeyContext::CategoriesView,
    },
    Keybinding {
        key: KeyCode::Char('k'),
        modifiers: KeyModifiers::NONE,
        description: "Previous category",
        context: KeyContext::CategoriesView,
    },
    Keybinding {
        key: KeyCode::Char('a'),
        modifiers: KeyModifiers::NONE,
        description: "Add category",
        context: KeyContext::CategoriesView,
    },
    Keybinding {
        key: KeyCode::Char('e'),
        modifiers: KeyModifiers::NONE,
        description: "Edit category",
        context: KeyContext::CategoriesView,
    },
    Keybinding {
        key: KeyCode::Char('d'),
        modifiers: KeyModifiers::NONE,
        description: "Delete category",
        context: KeyContext::CategoriesView,
    },
    // Dialog
    Keybinding {
        key: KeyCode::Esc,
        modifiers: KeyModifiers::NONE,
        description: "Cancel",
        context: KeyContext::Dialog,
    },
    Keybinding {
        key: KeyCode::Tab,
        modifiers: KeyModifiers::NONE,
        description: "Next field",
        context: KeyContext::Dialog,
    },
    Keybinding {
        key: KeyCode::Enter,
        modifiers: KeyModifiers::NONE,
        description: "Save",
        context: KeyContext::Dialog,
    },
];

/// Get keybindings for a context, including global ones
pub fn get_keybindings(context: KeyContext) -> Vec<&'static Keybinding> {
    KEYBINDINGS
        .iter()
        .filter(|kb| kb.context == context || kb.context == KeyContext::Global)
        .collect()
}

/// Format a keybinding for display
pub fn format_keybinding(kb: &Keybinding) -> String {
    let key = match kb.key {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        _ => format!("{:?}", kb.key),
    };

    if kb.modifiers.contains(KeyModifiers::CONTROL) {
        format!("Ctrl+{}", key)
    } else {
        key
    }
}
