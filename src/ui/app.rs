//! Application module for the browser screens.
//!
//! Holds what the current screen shows (heading, tables, status line and
//! menu) and draws it. Navigation logic lives elsewhere; this module only
//! knows about one screen at a time.
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use super::table::EntityTable;

const HEADING_STYLE: Style = Style::new()
    .fg(Color::Yellow)
    .add_modifier(Modifier::BOLD);

const MENU_HIGHLIGHT_STYLE: Style = Style::new()
    .fg(Color::LightYellow)
    .add_modifier(Modifier::BOLD);

const STATUS_STYLE: Style = Style::new().fg(Color::Cyan);

const HINT_STYLE: Style = Style::new().fg(Color::DarkGray);

const MENU_HIGHLIGHT_SYMBOL: &str = "> ";

const HINT: &str = "↑/↓ or j/k: Move  g/G: First/last  Enter: Select  Ctrl-C: Quit";

/// What a key press did to the open menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome
{
    /// Nothing chosen yet
    Pending,
    /// The option at this index was chosen
    Chosen(usize),
    /// The user asked to quit
    Interrupted,
}

/// A prompt and its options.
#[derive(Debug, Default)]
struct Menu
{
    /// Question shown above the options
    prompt: String,
    /// Option labels in display order
    labels: Vec<String>,
    /// Highlighted option
    state: ListState,
}

/// State of the screen currently on display.
#[derive(Debug, Default)]
pub struct App
{
    /// Title of the screen
    heading: String,
    /// Tables shown under the heading, in render order
    tables: Vec<EntityTable>,
    /// Transient progress message
    status: Option<String>,
    /// Open prompt, if any
    menu: Option<Menu>,
}

impl App
{
    /// Creates an empty screen.
    #[must_use]
    pub fn new() -> Self
    {
        Self::default()
    }

    /// Replaces the screen with a fresh one titled `title`.
    pub fn start_screen(&mut self, title: &str)
    {
        *self = Self {
            heading: title.to_owned(),
            ..Self::default()
        };
    }

    /// Adds a table under whatever is already shown.
    pub fn push_table(&mut self, table: EntityTable)
    {
        self.tables.push(table);
    }

    /// Shows a progress message until the next menu opens.
    pub fn set_status(&mut self, message: &str)
    {
        self.status = Some(message.to_owned());
    }

    /// Opens a menu with the first option highlighted.
    pub fn open_menu(&mut self, prompt: &str, labels: &[String])
    {
        let mut state = ListState::default();
        if !labels.is_empty()
        {
            state.select(Some(0));
        }

        self.status = None;
        self.menu = Some(Menu {
            prompt: prompt.to_owned(),
            labels: labels.to_vec(),
            state,
        });
    }

    /// Closes the menu, keeping the rest of the screen.
    pub fn close_menu(&mut self)
    {
        self.menu = None;
    }

    /// Index of the highlighted option.
    #[must_use]
    pub fn selected(&self) -> Option<usize>
    {
        self.menu
            .as_ref()
            .and_then(|menu| menu.state.selected())
    }

    /// Applies a key press to the open menu.
    pub fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome
    {
        if key.kind != KeyEventKind::Press
        {
            return KeyOutcome::Pending;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
        {
            return KeyOutcome::Interrupted;
        }

        let Some(menu) = self.menu.as_mut()
        else
        {
            return KeyOutcome::Pending;
        };
        let last = menu.labels.len().saturating_sub(1);

        match key.code
        {
            KeyCode::Char('j') | KeyCode::Down =>
            {
                let next = menu
                    .state
                    .selected()
                    .map_or(0, |index| index.saturating_add(1).min(last));
                menu.state.select(Some(next));
            }
            KeyCode::Char('k') | KeyCode::Up =>
            {
                let previous = menu
                    .state
                    .selected()
                    .map_or(0, |index| index.saturating_sub(1));
                menu.state.select(Some(previous));
            }
            KeyCode::Char('g') | KeyCode::Home =>
            {
                menu.state.select(Some(0));
            }
            KeyCode::Char('G') | KeyCode::End =>
            {
                menu.state.select(Some(last));
            }
            KeyCode::Enter =>
            {
                if let Some(index) = menu
                    .state
                    .selected()
                    .filter(|index| *index < menu.labels.len())
                {
                    return KeyOutcome::Chosen(index);
                }
            }
            _ =>
            {}
        }

        KeyOutcome::Pending
    }

    /// Renders the screen to the provided frame.
    pub fn render(&mut self, frame: &mut Frame)
    {
        let area = frame.area();
        let width = area.width;

        let mut constraints = vec![Constraint::Length(3)];
        constraints.extend(
            self.tables
                .iter()
                .map(|table| Constraint::Length(table.height(width))),
        );
        constraints.push(Constraint::Length(u16::from(self.status.is_some())));
        constraints.push(Constraint::Min(3));
        constraints.push(Constraint::Length(1));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        let heading = Paragraph::new(Line::styled(
            format!("=== {} ===", self.heading),
            HEADING_STYLE,
        ))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
        frame.render_widget(heading, chunks[0]);

        for (table, chunk) in self
            .tables
            .iter()
            .zip(chunks.iter().skip(1))
        {
            frame.render_widget(table.widget(width), *chunk);
        }

        let tail = &chunks[self.tables.len().saturating_add(1)..];

        if let Some(status) = &self.status
        {
            frame.render_widget(
                Paragraph::new(Line::styled(status.clone(), STATUS_STYLE)),
                tail[0],
            );
        }

        if let Some(menu) = self.menu.as_mut()
        {
            Self::render_menu(frame, menu, tail[1]);
        }

        frame.render_widget(
            Paragraph::new(Line::styled(HINT, HINT_STYLE)),
            tail[2],
        );
    }

    /// Renders the prompt and its options.
    fn render_menu(frame: &mut Frame, menu: &mut Menu, area: Rect)
    {
        let items: Vec<ListItem> = menu
            .labels
            .iter()
            .map(|label| ListItem::new(label.as_str()))
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .title(menu.prompt.as_str())
                    .title_style(
                        Style::new()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD),
                    ),
            )
            .highlight_style(MENU_HIGHLIGHT_STYLE)
            .highlight_symbol(MENU_HIGHLIGHT_SYMBOL);

        frame.render_stateful_widget(list, area, &mut menu.state);
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::display::FieldSpec;
    use crate::entity::Entity;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use serde_json::json;

    fn press(code: KeyCode) -> KeyEvent
    {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn labels(items: &[&str]) -> Vec<String>
    {
        items
            .iter()
            .map(|item| (*item).to_owned())
            .collect()
    }

    fn screen_text(app: &mut App) -> String
    {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|frame| app.render(frame))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for row in 0..buffer.area.height
        {
            for column in 0..buffer.area.width
            {
                text.push_str(buffer[(column, row)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn arrows_move_within_bounds()
    {
        let mut app = App::new();
        app.open_menu("Select a planet:", &labels(&["Tatooine", "Alderaan", "Back"]));

        assert_eq!(app.handle_key(press(KeyCode::Up)), KeyOutcome::Pending);
        assert_eq!(app.selected(), Some(0));

        for _ in 0..5
        {
            app.handle_key(press(KeyCode::Char('j')));
        }
        assert_eq!(app.selected(), Some(2));

        app.handle_key(press(KeyCode::Char('g')));
        assert_eq!(app.handle_key(press(KeyCode::Enter)), KeyOutcome::Chosen(0));
    }

    #[test]
    fn end_selects_last_option()
    {
        let mut app = App::new();
        app.open_menu("What would you like to do?", &labels(&["Back", "Main Menu"]));

        app.handle_key(press(KeyCode::End));

        assert_eq!(app.handle_key(press(KeyCode::Enter)), KeyOutcome::Chosen(1));
    }

    #[test]
    fn ctrl_c_interrupts()
    {
        let mut app = App::new();
        app.open_menu("Select a film to learn more:", &labels(&["Exit"]));

        let outcome = app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));

        assert_eq!(outcome, KeyOutcome::Interrupted);
    }

    #[test]
    fn enter_without_menu_does_nothing()
    {
        let mut app = App::new();

        assert_eq!(app.handle_key(press(KeyCode::Enter)), KeyOutcome::Pending);
    }

    #[test]
    fn start_screen_drops_previous_content()
    {
        let mut app = App::new();
        app.start_screen("A New Hope");
        app.set_status("Loading films...");
        app.open_menu("Pick", &labels(&["Back"]));

        app.start_screen("Tatooine");

        assert_eq!(app.selected(), None);
        assert!(!screen_text(&mut app).contains("Loading films"));
    }

    #[test]
    fn renders_heading_table_and_menu()
    {
        let fields = [
            FieldSpec::new("Climate", "climate"),
            FieldSpec::new("Terrain", "terrain"),
        ];
        let planet = Entity::new(json!({"name": "Tatooine", "climate": "arid"}));

        let mut app = App::new();
        app.start_screen("Tatooine");
        app.push_table(EntityTable::new(&planet, &fields));
        app.open_menu("What would you like to do?", &labels(&["Back", "Main Menu"]));

        let text = screen_text(&mut app);

        assert!(text.contains("=== Tatooine ==="));
        assert!(text.contains("Climate"));
        assert!(text.contains("arid"));
        assert!(text.contains("N/A"));
        assert!(text.contains("> Back"));
        assert!(text.contains("Main Menu"));
    }
}
