//! Main application state and update loop

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Context;
use iced::widget::{column, container, row, scrollable, stack, text, Space};
use iced::{event, time, window, Element, Event, Length, Size, Subscription, Task, Theme};
use keyscope_core::api::ApiClient;
use keyscope_core::config::{self, ClientConfig};
use keyscope_core::upload::UploadCandidate;
use keyscope_core::VariationResult;
use keyscope_widgets::theme;

use super::message::Message;
use super::results::{self, Visualizations};
use super::toast::{self, ToastQueue};
use super::upload_panel;
use super::variation::{self, VariationState};
use crate::controller::{RequestId, Started, Transition, UploadController, REVEAL_DELAY};

/// Initial window size
pub const WINDOW_SIZE: Size = Size::new(1200.0, 800.0);
/// Outer padding around the page content
const PAGE_PADDING: f32 = 20.0;
/// Toast expiry check interval
const TICK_INTERVAL: Duration = Duration::from_millis(250);

pub struct KeyscopeApp {
    config: ClientConfig,
    client: ApiClient,
    controller: UploadController,
    visualizations: Visualizations,
    variation: VariationState,
    toasts: ToastQueue,
    /// Contents of the path field
    path_input: String,
    /// A file is being dragged over the window
    hovering: bool,
}

impl KeyscopeApp {
    /// Create a new application instance
    pub fn new() -> (Self, Task<Message>) {
        let config_path = config::default_config_path();
        if !config_path.exists() {
            if let Err(e) = write_default_config(&config_path) {
                log::warn!("{:#}", e);
            }
        }

        let mut config: ClientConfig = config::load_config(&config_path);
        config.apply_env_override();
        log::info!(
            "Loaded config: server {}, upload limit {} MB",
            config.server.base_url,
            config.upload.max_file_size_mb
        );

        (Self::with_config(config), Task::none())
    }

    pub fn with_config(config: ClientConfig) -> Self {
        let content_width = content_width(WINDOW_SIZE.width);
        Self {
            client: ApiClient::new(&config.server),
            controller: UploadController::new(config.upload.clone()),
            visualizations: Visualizations::new(content_width, config.display.retain_on_resize),
            variation: VariationState::from_defaults(&config.variation),
            toasts: ToastQueue::new(Duration::from_secs(config.display.toast_seconds)),
            path_input: String::new(),
            hovering: false,
            config,
        }
    }

    pub fn title(&self) -> String {
        String::from("Keyscope - Audio Analysis")
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    /// Update state based on message
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            // Upload
            Message::PathInputChanged(value) => {
                self.path_input = value;
                Task::none()
            }
            Message::SubmitPath => {
                let path = PathBuf::from(self.path_input.trim());
                if path.as_os_str().is_empty() {
                    return Task::none();
                }
                self.handle_file(&path)
            }
            Message::FileHovered => {
                self.hovering = true;
                Task::none()
            }
            Message::FilesHoveredLeft => {
                self.hovering = false;
                Task::none()
            }
            Message::FileDropped(path) => {
                self.hovering = false;
                self.path_input = path.display().to_string();
                self.handle_file(&path)
            }
            Message::UploadFinished(request, outcome) => {
                let transition = self.controller.upload_finished(request, outcome);
                self.handle_transition(transition)
            }
            Message::AnalysisFinished(request, outcome) => {
                let transition = self.controller.analysis_finished(request, outcome);
                self.handle_transition(transition)
            }
            Message::RevealResults(request) => self.handle_reveal(request),

            // Results
            Message::CopyProgression => self.handle_copy_progression(),

            // Variations
            Message::VariationAmountChanged(amount) => {
                self.variation.set_amount(amount);
                Task::none()
            }
            Message::VariationStyleSelected(style) => {
                self.variation.style = style;
                Task::none()
            }
            Message::RequestVariation => self.handle_request_variation(),
            Message::VariationFinished(file_id, outcome) => {
                self.handle_variation_finished(file_id, outcome)
            }

            // Misc
            Message::DismissToast(id) => {
                self.toasts.dismiss(id);
                Task::none()
            }
            Message::Tick => {
                self.toasts.prune(Instant::now());
                Task::none()
            }
            Message::WindowResized(size) => {
                self.visualizations.resize(content_width(size.width));
                Task::none()
            }
        }
    }

    /// Validate a file and start uploading it
    fn handle_file(&mut self, path: &Path) -> Task<Message> {
        let started = UploadCandidate::from_path(path)
            .and_then(|candidate| self.controller.begin(&candidate));

        match started {
            Ok(started) => self.start_upload(started),
            Err(e) => {
                log::warn!("Rejected {:?}: {}", path, e);
                self.toasts.error(e.to_string());
                Task::none()
            }
        }
    }

    fn start_upload(&mut self, started: Started) -> Task<Message> {
        let Started { request, plan } = started;
        if let Some(notice) = plan.conversion_notice() {
            self.toasts.info(notice);
        }

        let client = self.client.clone();
        Task::perform(
            async move {
                tokio::task::spawn_blocking(move || {
                    client.upload(&plan).map_err(|e| e.to_string())
                })
                .await
                .unwrap_or_else(|e| Err(format!("upload task failed: {}", e)))
            },
            move |outcome| Message::UploadFinished(request, outcome),
        )
    }

    fn handle_transition(&mut self, transition: Transition) -> Task<Message> {
        match transition {
            Transition::Stale => Task::none(),
            Transition::Analyze { request, file_id } => {
                self.toasts
                    .info("File uploaded successfully. Starting analysis...");
                let client = self.client.clone();
                Task::perform(
                    async move {
                        tokio::task::spawn_blocking(move || {
                            client.analyze(&file_id).map_err(|e| e.to_string())
                        })
                        .await
                        .unwrap_or_else(|e| Err(format!("analysis task failed: {}", e)))
                    },
                    move |outcome| Message::AnalysisFinished(request, outcome),
                )
            }
            // The timer must be created on the executor, not in update()
            Transition::Reveal { request } => Task::perform(
                async move { tokio::time::sleep(REVEAL_DELAY).await },
                move |_| Message::RevealResults(request),
            ),
            Transition::Failed { message } => {
                self.toasts.error(message);
                Task::none()
            }
        }
    }

    fn handle_reveal(&mut self, request: RequestId) -> Task<Message> {
        let Some(result) = self.controller.reveal(request).cloned() else {
            return Task::none();
        };

        self.variation.last_result = None;
        self.variation.pending = false;
        match self.visualizations.show(&result) {
            Ok(()) => {
                self.toasts.success("Analysis completed successfully!");
            }
            Err(e) => {
                self.toasts.warning(format!("Melodic pattern could not be drawn: {}", e));
            }
        }
        Task::none()
    }

    fn handle_copy_progression(&mut self) -> Task<Message> {
        let Some(result) = self.controller.result() else {
            return Task::none();
        };
        if result.chord_progression.is_empty() {
            self.toasts.warning("No chord progression to copy");
            return Task::none();
        }

        // The clipboard write reports nothing back, so the toast only
        // announces the attempt
        let progression = result.progression_text();
        log::info!("Copying chord progression: {}", progression);
        self.toasts.info(format!("Copying to clipboard: {}", progression));
        iced::clipboard::write(progression)
    }

    fn handle_request_variation(&mut self) -> Task<Message> {
        let Some(file_id) = self.controller.current_file_id() else {
            self.toasts.warning("Analyze a file before requesting variations");
            return Task::none();
        };

        let request = self.variation.request(file_id);
        let file_id = request.file_id.clone();
        self.variation.pending = true;
        let client = self.client.clone();
        Task::perform(
            async move {
                tokio::task::spawn_blocking(move || {
                    client.generate_variation(&request).map_err(|e| e.to_string())
                })
                .await
                .unwrap_or_else(|e| Err(format!("variation task failed: {}", e)))
            },
            move |outcome| Message::VariationFinished(file_id, outcome),
        )
    }

    fn handle_variation_finished(
        &mut self,
        file_id: String,
        outcome: Result<VariationResult, String>,
    ) -> Task<Message> {
        if self.controller.current_file_id() != Some(file_id.as_str()) {
            log::debug!("Ignoring variation reply for {}, no longer on screen", file_id);
            return Task::none();
        }

        match outcome {
            Ok(value) => {
                self.variation.store_result(&value);
                self.toasts.success("Variation generated successfully!");
            }
            Err(e) => {
                self.variation.pending = false;
                log::warn!("Variation request failed: {}", e);
                self.toasts.error(format!("Error generating variation: {}", e));
            }
        }
        Task::none()
    }

    /// Render the UI
    pub fn view(&self) -> Element<'_, Message> {
        let header = column![
            text("Keyscope").size(28),
            text(format!("Analysis service: {}", self.client.base_url()))
                .size(12)
                .color(theme::TEXT_SECONDARY),
        ]
        .spacing(4);

        let upload = upload_panel::view(&self.controller, &self.path_input, self.hovering);

        let mut page = column![header, upload].spacing(20);
        if let Some(result) = self.controller.result() {
            page = page
                .push(results::view(result, &self.visualizations))
                .push(variation::view(
                    &self.variation,
                    self.controller.current_file_id().is_some(),
                ));
        }

        let base: Element<Message> = container(scrollable(
            container(page).padding(PAGE_PADDING).width(Length::Fill),
        ))
        .width(Length::Fill)
        .height(Length::Fill)
        .into();

        if self.toasts.is_empty() {
            return base;
        }

        let overlay = column![
            Space::new().height(Length::Fill),
            row![Space::new().width(Length::Fill), toast::view(&self.toasts)],
        ]
        .padding(PAGE_PADDING);

        stack![base, overlay].into()
    }

    /// Window events plus a tick while toasts are visible
    pub fn subscription(&self) -> Subscription<Message> {
        let window_events = event::listen_with(window_event);
        if self.toasts.is_empty() {
            window_events
        } else {
            Subscription::batch([
                window_events,
                time::every(TICK_INTERVAL).map(|_| Message::Tick),
            ])
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

fn window_event(event: Event, _status: event::Status, _id: window::Id) -> Option<Message> {
    match event {
        Event::Window(window::Event::FileHovered(_)) => Some(Message::FileHovered),
        Event::Window(window::Event::FilesHoveredLeft) => Some(Message::FilesHoveredLeft),
        Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
        Event::Window(window::Event::Resized(size)) => Some(Message::WindowResized(size)),
        _ => None,
    }
}

/// Width available to the visualizations inside the page padding
fn content_width(window_width: f32) -> f32 {
    (window_width - 2.0 * PAGE_PADDING).max(0.0)
}

/// Seed the config file so users have something to edit
fn write_default_config(path: &Path) -> anyhow::Result<()> {
    config::save_config(&ClientConfig::default(), path)
        .with_context(|| format!("Failed to write default config to {:?}", path))?;
    log::info!("Wrote default config to {:?}", path);
    Ok(())
}
