//! The dashboard: clients, models and local state wired together.

use std::io::Write;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local, Utc};

use deskboard_core::Config;
use deskboard_services::TodoClient;
use deskboard_weather::{Location, WeatherProvider};

use crate::barrier;
use crate::error::ShellError;
use crate::local_store::{LocalStore, LOCATION_KEY};
use crate::models::{Note, NoteModel, TodoModel, WeatherModel};
use crate::scroll::{ScrollMetrics, ScrollTracker};
use crate::services::{
    request_todo_create, request_todo_delete, request_todo_done, request_todo_fetch,
    request_weather_fetch, TodoServiceMessage, WeatherServiceMessage,
};
use crate::views;

/// Height of one rendered line when converting rows to scroll pixels.
pub const LINE_HEIGHT_PX: f64 = 20.0;

const TICK: Duration = Duration::from_secs(1);
const SETTLE_POLL: Duration = Duration::from_millis(25);
const ONCE_TIMEOUT: Duration = Duration::from_secs(15);
const CLEAR_SCREEN: &str = "\x1B[2J\x1B[H";

pub struct Dashboard {
    todo_client: Arc<TodoClient>,
    weather_provider: Arc<WeatherProvider>,
    store: LocalStore,

    todos: TodoModel,
    weather: WeatherModel,
    notes: NoteModel,

    scroll: ScrollTracker,
    scroll_y: f64,
    viewport_rows: u16,

    todo_tx: Sender<TodoServiceMessage>,
    todo_rx: Receiver<TodoServiceMessage>,
    weather_tx: Sender<WeatherServiceMessage>,
    weather_rx: Receiver<WeatherServiceMessage>,
}

impl Dashboard {
    /// Build a dashboard, rehydrating notes and the location from `store`.
    pub fn new(
        todo_client: TodoClient,
        weather_provider: WeatherProvider,
        store: LocalStore,
        viewport_rows: u16,
    ) -> Self {
        let notes = NoteModel::load(&store);
        let location: Option<Location> = store.get(LOCATION_KEY);
        let (todo_tx, todo_rx) = mpsc::channel();
        let (weather_tx, weather_rx) = mpsc::channel();

        Self {
            todo_client: Arc::new(todo_client),
            weather_provider: Arc::new(weather_provider),
            store,
            todos: TodoModel::new(),
            weather: WeatherModel::new(location),
            notes,
            scroll: ScrollTracker::new(),
            scroll_y: 0.0,
            viewport_rows,
            todo_tx,
            todo_rx,
            weather_tx,
            weather_rx,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, ShellError> {
        let todo_client = TodoClient::new(&config.ui.api_url)?;
        let weather_provider = WeatherProvider::from_config(&config.weather)?;
        let store = LocalStore::new(config.local_store_path());

        Ok(Self::new(
            todo_client,
            weather_provider,
            store,
            config.ui.viewport_rows,
        ))
    }

    pub fn todos(&self) -> &TodoModel {
        &self.todos
    }

    pub fn weather(&self) -> &WeatherModel {
        &self.weather
    }

    pub fn notes(&self) -> &NoteModel {
        &self.notes
    }

    /// Fetch todos, and weather if a location is selected.
    pub fn refresh(&mut self) {
        self.todos.begin_request();
        request_todo_fetch(&self.todo_tx, self.todo_client.clone());
        self.refresh_weather();
    }

    pub fn refresh_weather(&mut self) {
        if let Some(location) = self.weather.location().cloned() {
            self.weather.begin_fetch();
            request_weather_fetch(&self.weather_tx, self.weather_provider.clone(), location);
        }
    }

    pub fn add_todo(&mut self, text: String, timer_minutes: Option<f64>) {
        self.todos.begin_request();
        request_todo_create(&self.todo_tx, self.todo_client.clone(), text, timer_minutes);
    }

    pub fn mark_done(&mut self, id: u64) {
        self.todos.begin_request();
        request_todo_done(&self.todo_tx, self.todo_client.clone(), id);
    }

    pub fn delete_todo(&mut self, id: u64) {
        self.todos.begin_request();
        request_todo_delete(&self.todo_tx, self.todo_client.clone(), id);
    }

    /// Select and persist a location, then fetch its weather.
    pub fn set_location(&mut self, location: Location) -> Result<(), ShellError> {
        self.store.set(LOCATION_KEY, &location)?;
        tracing::info!("Location set to {}", location.display_name());
        self.weather.set_location(location);
        self.refresh_weather();
        Ok(())
    }

    /// Add and persist a note. Returns the note, or `None` if the text was blank.
    pub fn add_note(&mut self, title: &str, text: &str) -> Result<Option<Note>, ShellError> {
        let Some(note) = self.notes.add(title, text, Utc::now()).cloned() else {
            return Ok(None);
        };
        self.notes.save(&self.store)?;
        Ok(Some(note))
    }

    /// Apply every result that has arrived. Returns how many were applied.
    pub fn poll(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(msg) = self.todo_rx.try_recv() {
            self.todos.apply(msg);
            applied += 1;
        }
        while let Ok(msg) = self.weather_rx.try_recv() {
            self.weather.apply(msg);
            applied += 1;
        }
        applied
    }

    pub fn is_busy(&self) -> bool {
        self.todos.is_loading() || self.weather.is_loading()
    }

    /// Poll until no request is outstanding or `timeout` passes.
    pub async fn settle(&mut self, timeout: Duration) {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            self.poll();
            if !self.is_busy() {
                return;
            }
            if tokio::time::Instant::now() >= deadline {
                tracing::warn!("Gave up waiting for pending requests");
                return;
            }
            tokio::time::sleep(SETTLE_POLL).await;
        }
    }

    /// Set the vertical scroll offset in pixels used by the next render.
    pub fn scroll_to(&mut self, scroll_y: f64) {
        self.scroll_y = scroll_y.max(0.0);
    }

    /// Render the whole dashboard as text.
    pub fn render(&mut self, now: DateTime<Local>) -> String {
        let utc_now = now.with_timezone(&Utc);

        let panels = [
            barrier::guard("todos", || views::render_todos(&self.todos, utc_now)),
            barrier::guard("weather", || views::render_weather(&self.weather)),
            barrier::guard("notes", || views::render_notes(&self.notes)),
        ];
        let body = panels.join("\n\n");

        // Header and footer each take a line plus a blank separator
        let document_rows = body.lines().count() + 4;
        self.scroll.on_scroll(ScrollMetrics {
            scroll_y: self.scroll_y,
            viewport_height: f64::from(self.viewport_rows) * LINE_HEIGHT_PX,
            document_height: document_rows as f64 * LINE_HEIGHT_PX,
        });

        let mut out = String::new();
        if self.scroll.header_visible() {
            out.push_str(&views::render_header(&now));
            out.push_str("\n\n");
        }
        out.push_str(&body);
        if self.scroll.footer_visible() {
            out.push_str("\n\n");
            out.push_str(&views::render_footer());
        }
        out.push('\n');
        out
    }

    /// Draw to `out`. With `once`, wait for the initial fetches and draw a
    /// single frame; otherwise redraw every second until Ctrl-C.
    pub async fn run<W: Write>(&mut self, out: &mut W, once: bool) -> Result<(), ShellError> {
        self.refresh();

        if once {
            self.settle(ONCE_TIMEOUT).await;
            write!(out, "{}", self.render(Local::now()))?;
            out.flush()?;
            return Ok(());
        }

        let mut tick = tokio::time::interval(TICK);
        loop {
            tokio::select! {
                _ = tick.tick() => {
                    self.poll();
                    write!(out, "{}{}", CLEAR_SCREEN, self.render(Local::now()))?;
                    out.flush()?;
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Dashboard closed");
                    return Ok(());
                }
            }
        }
    }
}
