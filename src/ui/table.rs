//! Single-row entity tables.
//!
//! One column per field, headers in yellow, and cells wrapped to the
//! column width so long prose such as the opening crawl stays readable.
use ratatui::layout::Constraint;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Text;
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use textwrap::wrap;

use crate::display::{FieldSpec, project};
use crate::entity::Entity;

const HEADER_STYLE: Style = Style::new()
    .fg(Color::Yellow)
    .add_modifier(Modifier::BOLD);

const BORDER_STYLE: Style = Style::new().fg(Color::Gray);

const COLUMN_SPACING: u16 = 1;

/// Border rows plus the header row and its margin.
const CHROME_HEIGHT: u16 = 4;

/// An entity projected onto a set of columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityTable
{
    /// Column headers
    headers: Vec<String>,
    /// One value per column, already substituted with the placeholder
    cells: Vec<String>,
}

impl EntityTable
{
    /// Projects `fields` out of `entity`.
    #[must_use]
    pub fn new(entity: &Entity, fields: &[FieldSpec]) -> Self
    {
        Self {
            headers: fields
                .iter()
                .map(|field| field.label.to_owned())
                .collect(),
            cells: project(entity, fields),
        }
    }

    /// Column headers in display order.
    #[must_use]
    pub fn headers(&self) -> &[String]
    {
        &self.headers
    }

    /// Cell values in display order.
    #[must_use]
    pub fn cells(&self) -> &[String]
    {
        &self.cells
    }

    /// Rows needed to draw the table `width` columns wide.
    #[must_use]
    pub fn height(&self, width: u16) -> u16
    {
        self.row_height(width)
            .saturating_add(CHROME_HEIGHT)
    }

    /// Builds the widget for an area `width` columns wide.
    #[must_use]
    pub fn widget(&self, width: u16) -> Table<'static>
    {
        let column_width = self.column_width(width);

        let header = Row::new(self.headers.clone())
            .style(HEADER_STYLE)
            .bottom_margin(1);

        let cells: Vec<Cell> = self
            .wrapped_cells(column_width)
            .into_iter()
            .map(|lines| Cell::from(Text::from(lines.join("\n"))))
            .collect();
        let row = Row::new(cells).height(self.row_height(width));

        let widths = vec![Constraint::Length(column_width); self.headers.len()];

        Table::new([row], widths)
            .header(header)
            .column_spacing(COLUMN_SPACING)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(BORDER_STYLE),
            )
    }

    /// Width of every column when the table spans `width` columns.
    fn column_width(&self, width: u16) -> u16
    {
        let columns = u16::try_from(self.headers.len())
            .unwrap_or(u16::MAX)
            .max(1);
        let spacing = COLUMN_SPACING.saturating_mul(columns.saturating_sub(1));
        // 2 for the borders
        let usable = width
            .saturating_sub(2)
            .saturating_sub(spacing);

        (usable / columns).max(1)
    }

    fn wrapped_cells(&self, column_width: u16) -> Vec<Vec<String>>
    {
        self.cells
            .iter()
            .map(|cell| {
                wrap(cell, usize::from(column_width))
                    .into_iter()
                    .map(|line| line.into_owned())
                    .collect()
            })
            .collect()
    }

    fn row_height(&self, width: u16) -> u16
    {
        let tallest = self
            .wrapped_cells(self.column_width(width))
            .iter()
            .map(Vec::len)
            .max()
            .unwrap_or(1)
            .max(1);

        u16::try_from(tallest).unwrap_or(u16::MAX)
    }
}
