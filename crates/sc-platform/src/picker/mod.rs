//! Interactive pickers: a desktop dialog and a terminal menu.

mod dialog;
mod terminal;

pub use dialog::{dialog_args, parse_selection, DialogPicker, DialogProvider};
pub use terminal::TerminalPicker;
