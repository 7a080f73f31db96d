//! Contracts between the navigator and whatever draws the screens.
//!
//! The navigator only ever talks to a [`Presenter`] (tables and headings)
//! and a [`Selector`] (menus). The terminal UI implements both; tests use
//! scripted stand-ins.
use std::sync::LazyLock;

use anyhow::{Result, anyhow};
use regex::Regex;

use crate::entity::Entity;

/// Text shown for a field the entity does not have.
pub const PLACEHOLDER: &str = "N/A";

// The API hard-wraps long prose (the opening crawl) with CRLF pairs.
static LINE_BREAKS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[ \t]*(?:\r\n|\r|\n)+[ \t]*").expect("Invalid line break regex")
});

/// A table column: the header shown and the entity key it is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec
{
    /// Column header
    pub label: &'static str,
    /// JSON key on the entity
    pub key: &'static str,
}

impl FieldSpec
{
    /// Shorthand constructor used by the static column lists.
    #[must_use]
    pub const fn new(label: &'static str, key: &'static str) -> Self
    {
        Self { label, key }
    }
}

/// Draws headings and entity tables.
pub trait Presenter
{
    /// Starts a new screen titled `title`, dropping whatever was shown.
    ///
    /// # Errors
    ///
    /// Returns an error if the output device fails.
    fn heading(&mut self, title: &str) -> Result<()>;

    /// Shows `entity` as a single-row table with one column per field.
    ///
    /// # Errors
    ///
    /// Returns an error if the output device fails.
    fn render(&mut self, entity: &Entity, fields: &[FieldSpec]) -> Result<()>;

    /// Shows a transient progress message, e.g. while waiting on the network.
    ///
    /// # Errors
    ///
    /// Returns an error if the output device fails.
    fn status(&mut self, _message: &str) -> Result<()>
    {
        Ok(())
    }
}

/// Asks the user to pick one of several labeled options.
pub trait Selector
{
    /// Shows `labels` in order under `prompt` and blocks until one is
    /// picked.
    ///
    /// # Returns
    ///
    /// The index of the chosen label.
    ///
    /// # Errors
    ///
    /// Returns an error if input cannot be read or the user aborts.
    fn choose(&mut self, prompt: &str, labels: &[String]) -> Result<usize>;
}

/// Offers `options` through `selector` and returns the value behind the
/// chosen label.
///
/// # Errors
///
/// Returns the selector's error, or an error if it answers with an index
/// outside of the options.
pub fn select<S, V>(selector: &mut S, prompt: &str, options: Vec<(String, V)>) -> Result<V>
where
    S: Selector + ?Sized,
{
    let labels: Vec<String> = options
        .iter()
        .map(|(label, _)| label.clone())
        .collect();
    let index = selector.choose(prompt, &labels)?;

    options
        .into_iter()
        .nth(index)
        .map(|(_, value)| value)
        .ok_or_else(|| anyhow!("Selected option {index} is not one of the {} offered", labels.len()))
}

/// Projects `fields` out of `entity` as display text.
///
/// Missing or empty values become [`PLACEHOLDER`]; the result always has
/// exactly one cell per field.
#[must_use]
pub fn project(entity: &Entity, fields: &[FieldSpec]) -> Vec<String>
{
    fields
        .iter()
        .map(|field| {
            entity
                .field(field.key)
                .map_or_else(|| PLACEHOLDER.to_owned(), |value| normalize_text(&value))
        })
        .collect()
}

/// Joins hard-wrapped lines into one paragraph so it can be rewrapped to
/// the available width.
#[must_use]
pub fn normalize_text(text: &str) -> String
{
    LINE_BREAKS
        .replace_all(text.trim(), " ")
        .into_owned()
}
