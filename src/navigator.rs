//! The menu engine.
//!
//! Each screen of the browser is a [`Screen`] value carrying whatever it
//! needs to be drawn again. [`Navigator::step`] runs one screen and returns
//! the next; [`Navigator::run`] loops until the user exits from the main
//! menu.
use anyhow::Result;
use log::{debug, info};

use crate::cache::Fetcher;
use crate::client::{Transport, films_url};
use crate::display::{FieldSpec, Presenter, Selector, select};
use crate::entity::Entity;

/// Heading of the main menu.
pub const MAIN_MENU_TITLE: &str = "Star Wars Information System";

const FILM_FIELDS: [FieldSpec; 4] = [
    FieldSpec::new("Episode", "episode_id"),
    FieldSpec::new("Director", "director"),
    FieldSpec::new("Release Date", "release_date"),
    FieldSpec::new("Opening Crawl", "opening_crawl"),
];

const CHARACTER_FIELDS: [FieldSpec; 5] = [
    FieldSpec::new("Height", "height"),
    FieldSpec::new("Mass", "mass"),
    FieldSpec::new("Hair Color", "hair_color"),
    FieldSpec::new("Eye Color", "eye_color"),
    FieldSpec::new("Birth Year", "birth_year"),
];

const PLANET_FIELDS: [FieldSpec; 4] = [
    FieldSpec::new("Climate", "climate"),
    FieldSpec::new("Terrain", "terrain"),
    FieldSpec::new("Population", "population"),
    FieldSpec::new("Diameter", "diameter"),
];

const SHIP_FIELDS: [FieldSpec; 5] = [
    FieldSpec::new("Model", "model"),
    FieldSpec::new("Manufacturer", "manufacturer"),
    FieldSpec::new("Crew", "crew"),
    FieldSpec::new("Passengers", "passengers"),
    FieldSpec::new("Class", "starship_class"),
];

/// The sub-resources a film links to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource
{
    /// People appearing in the film
    Characters,
    /// Planets visited in the film
    Planets,
    /// Starships seen in the film
    Starships,
}

impl Resource
{
    /// Key of the film's locator list for this resource.
    #[must_use]
    pub const fn film_key(self) -> &'static str
    {
        match self
        {
            Self::Characters => "characters",
            Self::Planets => "planets",
            Self::Starships => "starships",
        }
    }

    /// Menu label on the film screen.
    #[must_use]
    pub const fn label(self) -> &'static str
    {
        match self
        {
            Self::Characters => "Characters",
            Self::Planets => "Planets",
            Self::Starships => "Starships",
        }
    }

    /// Prompt of the list screen.
    #[must_use]
    pub const fn prompt(self) -> &'static str
    {
        match self
        {
            Self::Characters => "Select a character:",
            Self::Planets => "Select a planet:",
            Self::Starships => "Select a starship:",
        }
    }

    /// Columns of the detail table.
    #[must_use]
    pub const fn fields(self) -> &'static [FieldSpec]
    {
        match self
        {
            Self::Characters => &CHARACTER_FIELDS,
            Self::Planets => &PLANET_FIELDS,
            Self::Starships => &SHIP_FIELDS,
        }
    }

    /// The list screen of this resource for `film`.
    #[must_use]
    pub const fn list(self, film: Entity) -> Screen
    {
        match self
        {
            Self::Characters => Screen::CharacterList(film),
            Self::Planets => Screen::PlanetList(film),
            Self::Starships => Screen::ShipList(film),
        }
    }

    /// The detail screen of `item`, reached from `film`.
    #[must_use]
    pub const fn detail(self, film: Entity, item: Entity) -> Screen
    {
        match self
        {
            Self::Characters => Screen::CharacterDetail { film, character: item },
            Self::Planets => Screen::PlanetDetail { film, planet: item },
            Self::Starships => Screen::ShipDetail { film, ship: item },
        }
    }
}

/// A point in the menu graph.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen
{
    /// Film list, the starting screen
    MainMenu,
    /// A film's details and its sub-resource menu
    FilmDetail(Entity),
    /// Characters of a film
    CharacterList(Entity),
    /// One character, reached from a film
    CharacterDetail
    {
        /// Film the character list belongs to
        film: Entity,
        /// Character shown
        character: Entity,
    },
    /// Planets of a film
    PlanetList(Entity),
    /// One planet, reached from a film
    PlanetDetail
    {
        /// Film the planet list belongs to
        film: Entity,
        /// Planet shown
        planet: Entity,
    },
    /// Starships of a film
    ShipList(Entity),
    /// One starship, reached from a film
    ShipDetail
    {
        /// Film the starship list belongs to
        film: Entity,
        /// Starship shown
        ship: Entity,
    },
}

/// What the film screen offers.
#[derive(Debug, Clone, Copy)]
enum FilmAction
{
    /// Show one of the film's lists
    Open(Resource),
    /// Leave the film
    MainMenu,
}

/// What a detail screen offers.
#[derive(Debug, Clone, Copy)]
enum DetailAction
{
    /// Return to the list the item came from
    Back,
    /// Leave the film
    MainMenu,
}

/// Drives the browser from screen to screen.
pub struct Navigator<T, U>
{
    /// Memoized access to the API
    fetcher: Fetcher<T>,
    /// Presenter and selector
    ui: U,
    /// Locator of the film list
    films_url: String,
}

impl<T, U> Navigator<T, U>
where
    T: Transport,
    U: Presenter + Selector,
{
    /// Creates a navigator.
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Used for every API access
    /// * `ui` - Draws screens and reads choices
    /// * `base_url` - API base the film list is read from
    #[must_use]
    pub fn new(fetcher: Fetcher<T>, ui: U, base_url: &str) -> Self
    {
        Self {
            fetcher,
            ui,
            films_url: films_url(base_url),
        }
    }

    /// Runs screens from the main menu until the user exits.
    ///
    /// # Errors
    ///
    /// Returns the first error from any screen; the session ends there.
    pub fn run(&mut self) -> Result<()>
    {
        let mut screen = Screen::MainMenu;

        while let Some(next) = self.step(screen)?
        {
            screen = next;
        }

        info!("User exited from the main menu");
        Ok(())
    }

    /// Runs one screen.
    ///
    /// # Returns
    ///
    /// The next screen, or `None` when the user chose to exit.
    ///
    /// # Errors
    ///
    /// Returns an error if fetching, drawing or reading input fails.
    pub fn step(&mut self, screen: Screen) -> Result<Option<Screen>>
    {
        debug!("Entering {}", screen_name(&screen));

        let next = match screen
        {
            Screen::MainMenu => return self.main_menu(),
            Screen::FilmDetail(film) => self.film_detail(film)?,
            Screen::CharacterList(film) => self.list(Resource::Characters, film)?,
            Screen::PlanetList(film) => self.list(Resource::Planets, film)?,
            Screen::ShipList(film) => self.list(Resource::Starships, film)?,
            Screen::CharacterDetail { film, character } =>
            {
                self.detail(Resource::Characters, film, &character)?
            }
            Screen::PlanetDetail { film, planet } => self.detail(Resource::Planets, film, &planet)?,
            Screen::ShipDetail { film, ship } => self.detail(Resource::Starships, film, &ship)?,
        };

        Ok(Some(next))
    }

    /// The fetcher, mostly for inspecting the cache.
    #[must_use]
    pub const fn fetcher(&self) -> &Fetcher<T>
    {
        &self.fetcher
    }

    /// The UI the navigator draws on.
    #[must_use]
    pub const fn ui(&self) -> &U
    {
        &self.ui
    }

    fn main_menu(&mut self) -> Result<Option<Screen>>
    {
        self.ui.heading(MAIN_MENU_TITLE)?;
        self.ui.status("Loading films...")?;

        let films = self
            .fetcher
            .fetch(&self.films_url)?
            .children("results")?;

        let mut options: Vec<(String, Option<Entity>)> = films
            .into_iter()
            .map(|film| (film_label(&film), Some(film)))
            .collect();
        options.push((String::from("Exit"), None));

        let choice = select(&mut self.ui, "Select a film to learn more:", options)?;
        Ok(choice.map(Screen::FilmDetail))
    }

    fn film_detail(&mut self, film: Entity) -> Result<Screen>
    {
        self.ui.heading(&film.name())?;
        self.ui.render(&film, &FILM_FIELDS)?;

        let options = vec![
            (Resource::Characters.label().to_owned(), FilmAction::Open(Resource::Characters)),
            (Resource::Planets.label().to_owned(), FilmAction::Open(Resource::Planets)),
            (Resource::Starships.label().to_owned(), FilmAction::Open(Resource::Starships)),
            (String::from("Back to Main Menu"), FilmAction::MainMenu),
        ];

        Ok(match select(&mut self.ui, "What would you like to view?", options)?
        {
            FilmAction::Open(resource) => resource.list(film),
            FilmAction::MainMenu => Screen::MainMenu,
        })
    }

    fn list(&mut self, resource: Resource, film: Entity) -> Result<Screen>
    {
        let locators = film.locators(resource.film_key())?;
        self.ui.status(&format!(
            "Loading {} {}...",
            locators.len(),
            resource.film_key()
        ))?;

        let items = self.fetcher.fetch_all(&locators)?;

        let mut options: Vec<(String, Option<Entity>)> = items
            .into_iter()
            .map(|item| (item.name(), Some(item)))
            .collect();
        options.push((String::from("Back"), None));

        Ok(match select(&mut self.ui, resource.prompt(), options)?
        {
            Some(item) => resource.detail(film, item),
            None => Screen::FilmDetail(film),
        })
    }

    fn detail(&mut self, resource: Resource, film: Entity, item: &Entity) -> Result<Screen>
    {
        self.ui.heading(&item.name())?;
        self.ui.render(item, resource.fields())?;

        let options = vec![
            (String::from("Back"), DetailAction::Back),
            (String::from("Main Menu"), DetailAction::MainMenu),
        ];

        Ok(match select(&mut self.ui, "What would you like to do?", options)?
        {
            DetailAction::Back => resource.list(film),
            DetailAction::MainMenu => Screen::MainMenu,
        })
    }
}

/// Menu label of a film, e.g. `Episode 4: A New Hope (1977-05-25)`.
#[must_use]
pub fn film_label(film: &Entity) -> String
{
    let field = |key: &str| {
        film.field(key)
            .unwrap_or_else(|| String::from("N/A"))
    };

    format!(
        "Episode {}: {} ({})",
        field("episode_id"),
        field("title"),
        field("release_date")
    )
}

/// Short name of a screen for the log.
const fn screen_name(screen: &Screen) -> &'static str
{
    match screen
    {
        Screen::MainMenu => "main menu",
        Screen::FilmDetail(_) => "film detail",
        Screen::CharacterList(_) => "character list",
        Screen::CharacterDetail { .. } => "character detail",
        Screen::PlanetList(_) => "planet list",
        Screen::PlanetDetail { .. } => "planet detail",
        Screen::ShipList(_) => "starship list",
        Screen::ShipDetail { .. } => "starship detail",
    }
}
