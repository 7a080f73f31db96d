//! The full-screen front end: draws screens and reads menu choices.
use anyhow::{Result, bail};
use log::info;

use super::app::{App, KeyOutcome};
use super::event::{Event, EventHandler};
use super::guard::CrosstermTerminal;
use super::table::EntityTable;
use crate::display::{FieldSpec, Presenter, Selector};
use crate::entity::Entity;

/// Presenter and selector backed by a ratatui terminal.
pub struct Tui
{
    /// Where frames are drawn
    terminal: CrosstermTerminal,
    /// Source of key presses
    events: EventHandler,
    /// Screen currently on display
    app: App,
}

impl Tui
{
    /// Creates the front end.
    ///
    /// # Arguments
    ///
    /// * `terminal` - An initialized terminal, see [`super::init_tui`]
    /// * `events` - Terminal event reader
    #[must_use]
    pub fn new(terminal: CrosstermTerminal, events: EventHandler) -> Self
    {
        Self {
            terminal,
            events,
            app: App::new(),
        }
    }

    fn draw(&mut self) -> Result<()>
    {
        self.terminal
            .draw(|frame| self.app.render(frame))?;
        Ok(())
    }
}

impl Presenter for Tui
{
    fn heading(&mut self, title: &str) -> Result<()>
    {
        self.app.start_screen(title);
        self.draw()
    }

    fn render(&mut self, entity: &Entity, fields: &[FieldSpec]) -> Result<()>
    {
        self.app
            .push_table(EntityTable::new(entity, fields));
        self.draw()
    }

    fn status(&mut self, message: &str) -> Result<()>
    {
        self.app.set_status(message);
        self.draw()
    }
}

impl Selector for Tui
{
    fn choose(&mut self, prompt: &str, labels: &[String]) -> Result<usize>
    {
        self.app.open_menu(prompt, labels);
        self.events.drain();

        loop
        {
            self.draw()?;

            // Resizes only need the redraw above
            let Event::Key(key) = self.events.next()?
            else
            {
                continue;
            };

            match self.app.handle_key(key)
            {
                KeyOutcome::Pending =>
                {}
                KeyOutcome::Chosen(index) =>
                {
                    self.app.close_menu();
                    return Ok(index);
                }
                KeyOutcome::Interrupted =>
                {
                    info!("Session interrupted at prompt {prompt:?}");
                    bail!("Interrupted by user");
                }
            }
        }
    }
}
