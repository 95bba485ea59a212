use iced::widget::image::Handle;
use iced::widget::{button, column, container, row, stack, text, Space};
use iced::{Alignment, Color, ContentFit, Element, Length, Task, Theme};
use log::{debug, error, info};
use rfd::FileDialog;
use std::path::PathBuf;
use std::sync::Arc;

mod api;
mod color;
mod error;
mod state;
mod ui;

use api::{ApiClient, Backdrop};
use error::PaintError;
use state::{ensure_client_id, RequestToken, SqliteIdentityStore, ViewState};

// Fixed user-facing messages. Diagnostic detail goes to the log only.
const ERR_NO_FILE: &str = "No file selected for upload.";
const ERR_FETCH: &str = "Failed to fetch image";
const ERR_UPLOAD: &str = "Failed to upload image";
const ERR_RECOLOR: &str = "Failed to set background color";

/// Main application state
struct RoomPainter {
    /// The image / error / loading triple driving the view
    view: ViewState,
    /// Backend client, shared with in-flight tasks
    api: Arc<ApiClient>,
    /// Photo picked in the file dialog but not yet uploaded
    selected_file: Option<PathBuf>,
    /// Decoded pixels of the current photo, ready to draw
    backdrop: Option<Handle>,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User clicked "Browse" to pick a photo
    BrowsePhoto,
    /// User clicked "Upload"
    UploadPhoto,
    /// User clicked a wall-color swatch
    SwatchPicked(&'static str),
    /// Startup fetch resolved (`None` = backend has no image for us)
    FetchFinished(RequestToken, Result<Option<Backdrop>, PaintError>),
    /// Upload resolved
    UploadFinished(RequestToken, Result<Backdrop, PaintError>),
    /// Recolor resolved
    RecolorFinished(RequestToken, Result<Backdrop, PaintError>),
}

impl RoomPainter {
    /// Create the application and kick off the startup fetch.
    ///
    /// Identity bootstrap runs synchronously here, before any network call:
    /// the backend correlates everything by this identifier, so the app
    /// cannot function without it.
    fn new() -> (Self, Task<Message>) {
        let mut store = SqliteIdentityStore::new()
            .expect("Failed to open identity store. Check permissions and disk space.");
        let user_id =
            ensure_client_id(&mut store).expect("Failed to bootstrap client identity.");

        let api = Arc::new(ApiClient::new(api::base_url(), user_id));
        info!("Client identity ready, fetching stored image");

        let mut painter = RoomPainter {
            view: ViewState::new(),
            api: Arc::clone(&api),
            selected_file: None,
            backdrop: None,
        };

        let token = painter.view.begin();
        let task = Task::perform(
            async move { api.fetch_current_backdrop().await },
            move |result| Message::FetchFinished(token, result),
        );

        (painter, task)
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::BrowsePhoto => {
                let picked = FileDialog::new()
                    .set_title("Select a Room Photo")
                    .add_filter("Images", &["jpg", "jpeg", "png"])
                    .pick_file();

                if let Some(path) = picked {
                    debug!("Photo chosen: {}", path.display());
                    self.selected_file = Some(path);
                }

                Task::none()
            }

            Message::UploadPhoto => {
                let Some(path) = self.selected_file.clone() else {
                    // Caught before any network call.
                    self.view.reject(ERR_NO_FILE);
                    return Task::none();
                };

                let token = self.view.begin();
                let api = Arc::clone(&self.api);

                Task::perform(
                    async move { api.upload_backdrop(path).await },
                    move |result| Message::UploadFinished(token, result),
                )
            }

            Message::SwatchPicked(hex) => {
                // No local check that a photo exists; the server rejects a
                // recolor with nothing stored.
                let token = self.view.begin();
                let api = Arc::clone(&self.api);

                Task::perform(
                    async move { api.recolor_backdrop(hex).await },
                    move |result| Message::RecolorFinished(token, result),
                )
            }

            Message::FetchFinished(token, result) => {
                match result {
                    Ok(Some(backdrop)) => self.show_backdrop(token, backdrop),
                    Ok(None) => {
                        // 204: nothing uploaded yet. Not an error.
                        self.view.finish(token, Ok(None));
                    }
                    Err(err) => self.fail(token, ERR_FETCH, err),
                }
                Task::none()
            }

            Message::UploadFinished(token, result) => {
                match result {
                    Ok(backdrop) => self.show_backdrop(token, backdrop),
                    Err(err) => self.fail(token, ERR_UPLOAD, err),
                }
                Task::none()
            }

            Message::RecolorFinished(token, result) => {
                match result {
                    Ok(backdrop) => self.show_backdrop(token, backdrop),
                    Err(err) => self.fail(token, ERR_RECOLOR, err),
                }
                Task::none()
            }
        }
    }

    fn show_backdrop(&mut self, token: RequestToken, backdrop: Backdrop) {
        if self.view.finish(token, Ok(Some(backdrop.url.clone()))) {
            self.backdrop = Some(Handle::from_rgba(
                backdrop.width,
                backdrop.height,
                backdrop.rgba,
            ));
        } else {
            debug!("Discarding stale response for {}", backdrop.url);
        }
    }

    fn fail(&mut self, token: RequestToken, message: &str, err: PaintError) {
        error!("{}: {}", message, err);
        self.view.finish(token, Err(message.to_string()));
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let mut content = column![].spacing(16).align_x(Alignment::Center);

        if let Some(message) = self.view.error() {
            content = content.push(text(message).color(Color::from_rgb8(230, 80, 80)));
        }

        if self.view.loading() {
            content = content.push(text("Working...").size(14));
        }

        let chosen = self
            .selected_file
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "No photo chosen".to_string());

        content = content.push(
            row![
                text(chosen).size(14),
                button("Browse").on_press(Message::BrowsePhoto).padding(8),
                button("Upload").on_press(Message::UploadPhoto).padding(8),
            ]
            .spacing(8)
            .align_y(Alignment::Center),
        );

        content = content.push(ui::palette::swatch_bar());

        let base: Element<Message> = match &self.backdrop {
            Some(handle) => iced::widget::image(handle.clone())
                .width(Length::Fill)
                .height(Length::Fill)
                .content_fit(ContentFit::Cover)
                .into(),
            None => Space::new(Length::Fill, Length::Fill).into(),
        };

        stack![
            base,
            container(content)
                .width(Length::Fill)
                .height(Length::Fill)
                .center_x(Length::Fill)
                .center_y(Length::Fill)
                .padding(24),
        ]
        .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting room-painter...");

    iced::application("Room Painter", RoomPainter::update, RoomPainter::view)
        .theme(RoomPainter::theme)
        .centered()
        .run_with(RoomPainter::new)
}
