//! Read-only snapshots of SWAPI resources.
use anyhow::{Context, Result, anyhow};
use serde_json::Value;
use std::sync::Arc;

/// A resource returned by the API (film, character, planet, starship).
///
/// Cloning is cheap; every screen that shows an entity keeps its own handle
/// so it can render itself again later.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity(Arc<Value>);

impl Entity
{
    /// Wraps a parsed JSON document.
    #[must_use]
    pub fn new(value: Value) -> Self
    {
        Self(Arc::new(value))
    }

    /// Looks up `key` and renders it as display text.
    ///
    /// Strings are returned verbatim, other scalars as their JSON text.
    ///
    /// # Returns
    ///
    /// `None` when the key is missing, `null` or an empty string.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<String>
    {
        match self.0.get(key)?
        {
            Value::Null => None,
            Value::String(text) if text.is_empty() => None,
            Value::String(text) => Some(text.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Name used when the entity appears in a menu or a heading.
    #[must_use]
    pub fn name(&self) -> String
    {
        self.field("name")
            .or_else(|| self.field("title"))
            .unwrap_or_else(|| String::from("N/A"))
    }

    /// Reads the locator sequence stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is missing, is not an array, or holds
    /// anything other than strings.
    pub fn locators(&self, key: &str) -> Result<Vec<String>>
    {
        let items = self
            .0
            .get(key)
            .and_then(Value::as_array)
            .with_context(|| format!("`{}` has no `{key}` list", self.name()))?;

        items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_owned)
                    .ok_or_else(|| anyhow!("`{key}` of `{}` holds a non-string locator", self.name()))
            })
            .collect()
    }

    /// Reads an embedded array of objects, such as `results` of a list page.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is missing or not an array.
    pub fn children(&self, key: &str) -> Result<Vec<Self>>
    {
        let items = self
            .0
            .get(key)
            .and_then(Value::as_array)
            .with_context(|| format!("Response has no `{key}` list"))?;

        Ok(items
            .iter()
            .cloned()
            .map(Self::new)
            .collect())
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use serde_json::json;

    #[test]
    fn field_renders_scalars()
    {
        let film = Entity::new(json!({
            "title": "A New Hope",
            "episode_id": 4,
            "director": "",
            "producer": null,
        }));

        assert_eq!(film.field("title").as_deref(), Some("A New Hope"));
        assert_eq!(film.field("episode_id").as_deref(), Some("4"));
        assert_eq!(film.field("director"), None);
        assert_eq!(film.field("producer"), None);
        assert_eq!(film.field("missing"), None);
    }

    #[test]
    fn name_falls_back_to_title_then_placeholder()
    {
        assert_eq!(Entity::new(json!({"name": "Tatooine"})).name(), "Tatooine");
        assert_eq!(Entity::new(json!({"title": "Return of the Jedi"})).name(), "Return of the Jedi");
        assert_eq!(Entity::new(json!({})).name(), "N/A");
    }

    #[test]
    fn locators_keep_order()
    {
        let film = Entity::new(json!({
            "planets": ["https://x/planets/1/", "https://x/planets/2/"],
        }));

        assert_eq!(
            film.locators("planets").unwrap(),
            vec!["https://x/planets/1/", "https://x/planets/2/"]
        );
    }

    #[test]
    fn missing_locator_list_is_an_error()
    {
        let film = Entity::new(json!({"title": "A New Hope"}));
        let err = film.locators("starships").unwrap_err();

        assert!(err.to_string().contains("starships"));
    }

    #[test]
    fn children_requires_array()
    {
        let page = Entity::new(json!({"results": [{"title": "A"}, {"title": "B"}]}));
        assert_eq!(page.children("results").unwrap().len(), 2);

        let broken = Entity::new(json!({"detail": "Not found"}));
        assert!(broken.children("results").is_err());
    }
}
