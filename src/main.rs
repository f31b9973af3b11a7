use iced::widget::{column, horizontal_space, row, text, Column};
use iced::{Alignment, Element, Length, Task, Theme};
use tracing::{debug, info};

mod config;
mod error;
mod logging;
mod source;
mod state;
mod ui;

use config::Config;
use error::LoadFailure;
use state::browser::Browser;
use state::data::{Dimension, Material};
use state::debounce::Ticket;

/// Main application state
struct CatalogBrowser {
    config: Config,
    /// Records, filters and visibility
    browser: Browser,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// Background fetch finished
    Loaded(Result<Vec<Material>, LoadFailure>),
    /// User asked to reload after an error
    Reload,
    /// A filter picker changed (empty value = "All")
    FilterSelected(Dimension, String),
    /// Search box edited
    SearchChanged(String),
    /// Search quiet period elapsed for this ticket
    SearchSettled(Ticket),
    /// A chip's close button was pressed
    RemoveFilter(Dimension),
    ResetFilters,
    /// Copy a material's download link to the clipboard
    CopyLink(String),
}

impl CatalogBrowser {
    fn new() -> (Self, Task<Message>) {
        let config = Config::load();
        let browser = Browser::new(config.search_debounce());

        info!(
            source = ?config.source.as_ref().map(source_label),
            debounce_ms = config.search_debounce_ms,
            "Bells Note starting"
        );

        let task = Self::fetch(&config);
        (CatalogBrowser { config, browser }, task)
    }

    /// Launch the one-shot catalog fetch
    fn fetch(config: &Config) -> Task<Message> {
        let configured = config.source.clone();
        Task::perform(
            async move {
                source::fetch_materials(configured)
                    .await
                    .map_err(LoadFailure::from)
            },
            Message::Loaded,
        )
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Loaded(result) => {
                self.browser.finish_load(result);
                Task::none()
            }
            Message::Reload => {
                info!("reloading catalog");
                self.browser.begin_load();
                Self::fetch(&self.config)
            }
            Message::FilterSelected(dimension, value) => {
                self.browser.select(dimension, value);
                Task::none()
            }
            Message::SearchChanged(text) => {
                let ticket = self.browser.type_search(text);
                let quiet = self.browser.search_quiet_period();
                Task::perform(tokio::time::sleep(quiet), move |_| {
                    Message::SearchSettled(ticket)
                })
            }
            Message::SearchSettled(ticket) => {
                if self.browser.settle_search(ticket) {
                    debug!(
                        search = self.browser.predicates().search(),
                        evaluations = self.browser.evaluations(),
                        "search committed"
                    );
                }
                Task::none()
            }
            Message::RemoveFilter(dimension) => {
                self.browser.remove(dimension);
                Task::none()
            }
            Message::ResetFilters => {
                self.browser.reset();
                Task::none()
            }
            Message::CopyLink(link) => iced::clipboard::write(link),
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let header = row![
            text("Bells Note").size(32),
            horizontal_space(),
            text(ui::status_line(&self.browser)).size(14),
        ]
        .align_y(Alignment::Center);

        let content: Column<'_, Message> = column![
            header,
            ui::filters::controls(&self.browser),
            ui::filters::chips(&self.browser),
            ui::body(&self.browser),
        ]
        .spacing(16)
        .padding(24)
        .width(Length::Fill)
        .height(Length::Fill);

        content.into()
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn source_label(source: &config::SourceConfig) -> String {
    match source {
        config::SourceConfig::Supabase { url, table, .. } => format!("{url} ({table})"),
        config::SourceConfig::Sqlite { path } => path.display().to_string(),
    }
}

fn main() -> iced::Result {
    logging::init();

    iced::application("Bells Note", CatalogBrowser::update, CatalogBrowser::view)
        .theme(CatalogBrowser::theme)
        .centered()
        .run_with(CatalogBrowser::new)
}
