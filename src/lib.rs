//! SWAPI Browser Library
//!
//! A library for browsing the Star Wars API from a terminal: films, and the
//! characters, planets and starships that appear in them.
//!
//! # Modules
//!
//! - `client`: HTTP transport for the API
//! - `cache`: memoizing fetcher in front of the transport
//! - `entity`: read-only views of fetched resources
//! - `display`: presenter and selector contracts plus field projection
//! - `navigator`: the menu state machine
//! - `ui`: terminal implementation of the presenter and selector
pub mod cache;
pub mod client;
pub mod display;
pub mod entity;
pub mod navigator;
pub mod ui;

pub use cache::{EntityCache, Fetcher};
pub use client::{DEFAULT_BASE_URL, SwapiClient, Transport};
pub use display::{FieldSpec, Presenter, Selector};
pub use entity::Entity;
pub use navigator::{Navigator, Resource, Screen};
pub use ui::logging;
