//! Test doubles shared by the integration tests.
#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use anyhow::{Result, anyhow, bail};
use serde_json::{Value, json};
use swapi_browser::display::project;
use swapi_browser::{Entity, FieldSpec, Presenter, Selector, Transport};

pub const BASE_URL: &str = "https://swapi.test/api";

/// Serves canned JSON documents and records every request.
#[derive(Default)]
pub struct MockTransport
{
    documents: HashMap<String, Value>,
    requests: Mutex<Vec<String>>,
}

impl MockTransport
{
    pub fn insert(&mut self, locator: &str, document: Value)
    {
        self.documents
            .insert(locator.to_owned(), document);
    }

    pub fn requests_for(&self, locator: &str) -> usize
    {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|request| *request == locator)
            .count()
    }

    pub fn total_requests(&self) -> usize
    {
        self.requests.lock().unwrap().len()
    }
}

impl Transport for MockTransport
{
    fn get_json(&self, locator: &str) -> Result<Value>
    {
        self.requests
            .lock()
            .unwrap()
            .push(locator.to_owned());

        self.documents
            .get(locator)
            .cloned()
            .ok_or_else(|| anyhow!("http status: 404 for {locator}"))
    }
}

/// A rendered table as the presenter received it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTable
{
    pub headers: Vec<String>,
    pub cells: Vec<String>,
}

/// One prompt as the selector received it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt
{
    pub prompt: String,
    pub labels: Vec<String>,
}

/// Answers prompts from a script of labels and records what it was shown.
#[derive(Default)]
pub struct ScriptedUi
{
    answers: VecDeque<String>,
    pub headings: Vec<String>,
    pub tables: Vec<RenderedTable>,
    pub prompts: Vec<Prompt>,
}

impl ScriptedUi
{
    pub fn answering(answers: &[&str]) -> Self
    {
        Self {
            answers: answers
                .iter()
                .map(|answer| (*answer).to_owned())
                .collect(),
            ..Self::default()
        }
    }

    pub fn last_prompt(&self) -> &Prompt
    {
        self.prompts.last().unwrap()
    }

    pub fn last_table(&self) -> &RenderedTable
    {
        self.tables.last().unwrap()
    }
}

impl Presenter for ScriptedUi
{
    fn heading(&mut self, title: &str) -> Result<()>
    {
        self.headings.push(title.to_owned());
        Ok(())
    }

    fn render(&mut self, entity: &Entity, fields: &[FieldSpec]) -> Result<()>
    {
        self.tables.push(RenderedTable {
            headers: fields
                .iter()
                .map(|field| field.label.to_owned())
                .collect(),
            cells: project(entity, fields),
        });
        Ok(())
    }
}

impl Selector for ScriptedUi
{
    fn choose(&mut self, prompt: &str, labels: &[String]) -> Result<usize>
    {
        self.prompts.push(Prompt {
            prompt: prompt.to_owned(),
            labels: labels.to_vec(),
        });

        let Some(answer) = self.answers.pop_front()
        else
        {
            bail!("Script exhausted at prompt {prompt:?}");
        };

        labels
            .iter()
            .position(|label| *label == answer)
            .ok_or_else(|| anyhow!("{answer:?} is not offered at {prompt:?}: {labels:?}"))
    }
}

pub fn people(id: u32) -> String
{
    format!("{BASE_URL}/people/{id}/")
}

pub fn planet(id: u32) -> String
{
    format!("{BASE_URL}/planets/{id}/")
}

pub fn starship(id: u32) -> String
{
    format!("{BASE_URL}/starships/{id}/")
}

pub fn a_new_hope() -> Value
{
    json!({
        "title": "A New Hope",
        "episode_id": 4,
        "opening_crawl": "It is a period of civil war.\r\nRebel spaceships, striking\r\nfrom a hidden base",
        "director": "George Lucas",
        "release_date": "1977-05-25",
        "characters": [people(1), people(2)],
        "planets": [planet(1), planet(2)],
        "starships": [starship(9)],
    })
}

pub fn empire_strikes_back() -> Value
{
    json!({
        "title": "The Empire Strikes Back",
        "episode_id": 5,
        "director": "Irvin Kershner",
        "release_date": "1980-05-17",
        "characters": [],
        "planets": [planet(4)],
        "starships": [],
    })
}

/// A small but complete API: two films and everything they link to.
pub fn catalog() -> MockTransport
{
    let mut transport = MockTransport::default();

    transport.insert(
        &format!("{BASE_URL}/films"),
        json!({
            "count": 2,
            "results": [a_new_hope(), empire_strikes_back()],
        }),
    );
    transport.insert(
        &people(1),
        json!({
            "name": "Luke Skywalker",
            "height": "172",
            "mass": "77",
            "hair_color": "blond",
            "eye_color": "blue",
            "birth_year": "19BBY",
        }),
    );
    transport.insert(
        &people(2),
        json!({
            "name": "C-3PO",
            "height": "167",
            "mass": "75",
            "hair_color": "n/a",
            "eye_color": "yellow",
        }),
    );
    transport.insert(
        &planet(1),
        json!({
            "name": "Tatooine",
            "climate": "arid",
            "terrain": "desert",
            "population": "200000",
            "diameter": "10465",
        }),
    );
    transport.insert(
        &planet(2),
        json!({
            "name": "Alderaan",
            "climate": "temperate",
            "terrain": "grasslands, mountains",
        }),
    );
    transport.insert(
        &planet(4),
        json!({
            "name": "Hoth",
            "climate": "frozen",
            "terrain": "tundra, ice caves, mountain ranges",
            "population": "unknown",
            "diameter": "7200",
        }),
    );
    transport.insert(
        &starship(9),
        json!({
            "name": "Death Star",
            "model": "DS-1 Orbital Battle Station",
            "manufacturer": "Imperial Department of Military Research, Sienar Fleet Systems",
            "crew": "342,953",
            "passengers": "843,342",
            "starship_class": "Deep Space Mobile Battlestation",
        }),
    );

    transport
}
