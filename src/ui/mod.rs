//! User Interface module for the browser.
//!
//! Contains the terminal implementation of the presenter and selector,
//! terminal lifecycle management, event handling, and logging setup.
mod app;
mod event;
mod guard;
pub mod logging;
mod table;
mod terminal;

pub use app::{App, KeyOutcome};
pub use event::{Event, EventHandler};
pub use guard::{CrosstermTerminal, TerminalGuard, init_panic_hook, init_tui};
pub use table::EntityTable;
pub use terminal::Tui;
