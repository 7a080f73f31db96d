//! Provides a RAII guard for safe terminal lifecycle management.
//!
//! A guard object is created before the TUI starts drawing, and its `Drop`
//! implementation restores the terminal when it goes out of scope, either
//! on normal exit, on an error bubbling out of the navigator, or during a
//! panic unwind.
use std::io::{Result as IoResult, Stdout, stdout};
use std::panic::{set_hook, take_hook};

use crossterm::ExecutableCommand;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode,
};
use log::error;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

/// The terminal type the browser draws on.
pub type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

/// RAII wrapper for terminal state.
///
/// Holding this instance guarantees the terminal is restored when it is
/// dropped.
pub struct TerminalGuard;

impl TerminalGuard
{
    /// Enters raw mode and switches to the alternate screen buffer.
    ///
    /// # Errors
    ///
    /// On failure to enter raw mode or switch screens.
    pub fn new() -> IoResult<Self>
    {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard
{
    fn drop(&mut self)
    {
        restore_terminal();
    }
}

/// Initialize the terminal
///
/// Terminal modes are handled by [`TerminalGuard`]; this only wraps stdout
/// in a ratatui terminal.
///
/// # Errors
///
/// Returns an error if the terminal size cannot be queried.
pub fn init_tui() -> IoResult<CrosstermTerminal>
{
    let backend = CrosstermBackend::new(stdout());
    Terminal::new(backend)
}

/// Installs a panic hook that restores the terminal before the default
/// hook prints the panic message.
pub fn init_panic_hook()
{
    let original_hook = take_hook();
    set_hook(Box::new(move |panic_info| {
        restore_terminal();

        error!("Application panicked: {panic_info}");

        original_hook(panic_info);
    }));
}

/// Leaves raw mode and the alternate screen, logging any failure.
fn restore_terminal()
{
    // Terminal will be borked on failure, at least leave a trace
    if let Err(err) = disable_raw_mode()
    {
        error!("Failed to disable raw mode: {err}");
    }

    if let Err(err) = stdout().execute(LeaveAlternateScreen)
    {
        error!("Failed to leave alternate screen: {err}");
    }
}
