use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};

use deskboard_core::Config;
use deskboard_services::{TodoList, TodoService, TodoStorage};
use deskboard_ui::dashboard::LINE_HEIGHT_PX;
use deskboard_ui::local_store::LOCATION_KEY;
use deskboard_ui::views::format_todo;
use deskboard_ui::{Dashboard, LocalStore, NoteModel};
use deskboard_weather::{Location, WeatherProvider, FALLBACK_LOCATION_NAME};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "deskboard",
    version,
    about = "Personal dashboard: todos, weather, notes and a clock"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the todo API server.
    Serve {
        /// Port to listen on instead of the configured one.
        #[arg(long)]
        port: Option<u16>,
    },

    /// Add a new todo.
    Add {
        #[arg(required = true)]
        text: Vec<String>,

        /// Countdown in minutes.
        #[arg(long)]
        timer: Option<f64>,
    },

    /// Show all todos.
    List,

    /// Mark a todo as completed.
    Done { id: u64 },

    /// Delete a todo. Later todos move up one id.
    Delete { id: u64 },

    /// Show the dashboard.
    Dashboard {
        /// Draw a single frame and exit.
        #[arg(long)]
        once: bool,

        /// Start scrolled down by this many rows.
        #[arg(long, default_value_t = 0)]
        scroll: u16,
    },

    /// Choose the weather location.
    Location {
        #[command(subcommand)]
        action: LocationCommand,
    },

    /// Manage notes.
    Note {
        #[command(subcommand)]
        action: NoteCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum LocationCommand {
    /// Look up places by name.
    Search {
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Use explicit coordinates.
    Set {
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        #[arg(allow_negative_numbers = true)]
        lon: f64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        country: Option<String>,
    },

    /// Use coordinates and name them by reverse geocoding.
    Here {
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        #[arg(allow_negative_numbers = true)]
        lon: f64,
    },
}

#[derive(Debug, Subcommand)]
pub enum NoteCommand {
    /// Add a note.
    Add {
        #[arg(long)]
        title: Option<String>,
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Show the newest notes.
    List,
}

impl Cli {
    pub async fn run(self, config: Config) -> Result<()> {
        match self.command {
            Command::Serve { port } => serve(&config, port).await,
            Command::Add { text, timer } => {
                let todo = open_list(&config.storage.todos_path)?.add(&text.join(" "), timer)?;
                println!("Added: {}", format_todo(&todo));
                Ok(())
            }
            Command::List => {
                let todos = open_list(&config.storage.todos_path)?.list()?;
                if todos.is_empty() {
                    println!("No todos yet");
                }
                for todo in &todos {
                    println!("{}", format_todo(todo));
                }
                Ok(())
            }
            Command::Done { id } => {
                open_list(&config.storage.todos_path)?.done(id)?;
                println!("Marked #{} as done", id);
                Ok(())
            }
            Command::Delete { id } => {
                open_list(&config.storage.todos_path)?.delete(id)?;
                println!("Deleted #{}", id);
                Ok(())
            }
            Command::Dashboard { once, scroll } => {
                let mut dashboard = Dashboard::from_config(&config)?;
                dashboard.scroll_to(f64::from(scroll) * LINE_HEIGHT_PX);
                let stdout = std::io::stdout();
                let mut out = stdout.lock();
                dashboard.run(&mut out, once).await?;
                Ok(())
            }
            Command::Location { action } => location(&config, action).await,
            Command::Note { action } => note(&config, action),
        }
    }
}

async fn serve(config: &Config, port: Option<u16>) -> Result<()> {
    let mut addr = config.server.socket_addr()?;
    if let Some(port) = port {
        addr.set_port(port);
    }

    let service = TodoService::open(&config.storage.todos_path).with_context(|| {
        format!(
            "Failed to open todo file {}",
            config.storage.todos_path.display()
        )
    })?;

    deskboard_api::serve(service, addr, deskboard_api::shutdown_signal()).await
}

fn open_list(path: &Path) -> Result<TodoList> {
    let list = TodoList::new(TodoStorage::new(path));
    list.init()
        .with_context(|| format!("Failed to open todo file {}", path.display()))?;
    Ok(list)
}

async fn location(config: &Config, action: LocationCommand) -> Result<()> {
    let store = LocalStore::new(config.local_store_path());

    let location = match action {
        LocationCommand::Search { query } => {
            let provider = WeatherProvider::from_config(&config.weather)?;
            let candidates = provider.search_locations(&query.join(" ")).await?;
            if candidates.is_empty() {
                println!("No matching places");
            }
            for (i, place) in candidates.iter().enumerate() {
                let region = match &place.state {
                    Some(state) => format!("{}, {}", state, place.country),
                    None => place.country.clone(),
                };
                println!(
                    "{}. {} ({})  {:.4} {:.4}",
                    i + 1,
                    place.name,
                    region,
                    place.lat,
                    place.lon
                );
            }
            return Ok(());
        }
        LocationCommand::Set {
            lat,
            lon,
            name,
            country,
        } => Location {
            lat,
            lon,
            name: name.unwrap_or_else(|| FALLBACK_LOCATION_NAME.to_string()),
            country: country.unwrap_or_default(),
        },
        LocationCommand::Here { lat, lon } => {
            let provider = WeatherProvider::from_config(&config.weather)?;
            provider.reverse_geocode(lat, lon).await
        }
    };

    store.set(LOCATION_KEY, &location)?;
    println!("Location set to {}", location.display_name());
    Ok(())
}

fn note(config: &Config, action: NoteCommand) -> Result<()> {
    let store = LocalStore::new(config.local_store_path());
    let mut notes = NoteModel::load(&store);

    match action {
        NoteCommand::Add { title, text } => {
            let title = title.unwrap_or_default();
            match notes.add(&title, &text.join(" "), Utc::now()) {
                Some(note) => println!("Added note: {}", note.display_title()),
                None => {
                    println!("Nothing added: note text is empty");
                    return Ok(());
                }
            }
            notes.save(&store)?;
        }
        NoteCommand::List => {
            if notes.notes().is_empty() {
                println!("No notes yet");
            }
            for note in notes.visible() {
                println!("{}\n  {}", note.display_title(), note.text);
            }
        }
    }

    Ok(())
}
