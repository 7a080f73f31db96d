//! Client module for fetching resources from the Star Wars API.
//!
//! Handles network requests for the browser. Everything above this module
//! talks to a [`Transport`], so tests can swap the network out.
use anyhow::{Context, Result};
use serde_json::Value;
use std::io::Read;
use std::time::Duration;
use ureq::Agent;
use ureq::tls::{TlsConfig, TlsProvider};

/// Base endpoint of the public SWAPI mirror.
pub const DEFAULT_BASE_URL: &str = "https://swapi.py4e.com/api";

/// Builds the locator of the film list for a given API base.
///
/// # Arguments
///
/// * `base_url` - The API base, with or without a trailing slash.
///
/// # Returns
///
/// The `films` collection locator.
#[must_use]
pub fn films_url(base_url: &str) -> String
{
    format!("{}/films", base_url.trim_end_matches('/'))
}

/// A way of turning a locator into parsed JSON.
///
/// Implementations must be shareable between threads since list screens
/// resolve their locators concurrently.
pub trait Transport: Sync
{
    /// Performs a single GET for `locator` and parses the body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the server answers with a
    /// non-success status, or the body is not valid JSON.
    fn get_json(&self, locator: &str) -> Result<Value>;
}

/// Client for fetching SWAPI resources over HTTP.
pub struct SwapiClient
{
    client: Agent,
}

impl SwapiClient
{
    /// Create a new SWAPI client.
    ///
    /// # Arguments
    ///
    /// * `timeout` - Global per-request timeout, `None` waits forever.
    ///
    /// # Returns
    ///
    /// A new SWAPI client.
    #[must_use]
    pub fn new(timeout: Option<Duration>) -> Self
    {
        // Only native-tls is compiled in, so it has to be selected explicitly
        let tls = TlsConfig::builder()
            .provider(TlsProvider::NativeTls)
            .build();

        let client = Agent::config_builder()
            .tls_config(tls)
            .timeout_global(timeout)
            .build();

        Self {
            client: client.into(),
        }
    }
}

impl Transport for SwapiClient
{
    fn get_json(&self, locator: &str) -> Result<Value>
    {
        let response = self
            .client
            .get(locator)
            .call()
            .context(format!("Failed to fetch {locator}"))?;

        let mut response_body = String::new();
        response
            .into_body()
            .into_reader()
            .read_to_string(&mut response_body)
            .context(format!("Failed to read response from {locator}"))?;

        serde_json::from_str(&response_body)
            .context(format!("Response from {locator} is not valid JSON"))
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn films_url_joins_base()
    {
        assert_eq!(
            films_url(DEFAULT_BASE_URL),
            "https://swapi.py4e.com/api/films"
        );
    }

    #[test]
    fn films_url_ignores_trailing_slash()
    {
        assert_eq!(
            films_url("http://localhost:8080/api/"),
            "http://localhost:8080/api/films"
        );
    }
}
