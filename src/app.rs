//! Main application state and egui integration.
//!
//! Wires UI events into tracker operations: map clicks open the form, form
//! submissions add workouts, card clicks focus or delete workouts.

use std::time::Duration;

use crossbeam::channel::Receiver;
use eframe::egui;
use trailmark::location::{self, ConfiguredLocation, LocationEvent};
use trailmark::storage::config::{self, AppConfig};
use trailmark::storage::{FileStore, KeyValueStore, MemoryStore};
use trailmark::tracker::{SortField, TrackerError, WorkoutTracker};
use trailmark::ui::theme;
use trailmark::ui::{CardAction, CardList, FormEvent, PlotMap, Theme, TimedBanner, WorkoutFormPanel};
use trailmark::workouts::SystemClock;

type Tracker = WorkoutTracker<PlotMap, CardList, Box<dyn KeyValueStore>>;

/// State of the one-shot position request.
#[derive(Debug, Clone, PartialEq, Eq)]
enum LocationState {
    /// Waiting for the worker thread
    Pending,
    /// Map attached
    Ready,
    /// No position; the alert is shown until acknowledged
    Failed { acknowledged: bool },
}

/// Main application state.
pub struct TrailmarkApp {
    /// UI theme
    theme: Theme,
    /// Workout tracker owning the map and the card list
    tracker: Tracker,
    /// Entry form
    form: WorkoutFormPanel,
    /// Validation and error banner
    banner: TimedBanner,
    /// Position request result
    location_rx: Option<Receiver<LocationEvent>>,
    /// Position request state
    location_state: LocationState,
    /// Delete-all confirmation visible
    confirm_clear: bool,
}

impl TrailmarkApp {
    /// Create a new application instance.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = config::load_config().unwrap_or_else(|e| {
            tracing::warn!("Failed to load config, using defaults: {}", e);
            AppConfig::default()
        });
        // Write the defaults out on first launch so there is a file to edit
        if !config::get_config_path().exists() {
            if let Err(e) = config::save_config(&config) {
                tracing::warn!("Failed to write default config: {}", e);
            }
        }

        let theme = Theme::Dark;
        cc.egui_ctx.set_visuals(theme.visuals());

        let storage: Box<dyn KeyValueStore> = match FileStore::open(config.storage_dir()) {
            Ok(store) => Box::new(store),
            Err(e) => {
                tracing::error!("Storage unavailable, workouts will not be saved: {}", e);
                Box::new(MemoryStore::new())
            }
        };

        let mut banner = TimedBanner::new(Duration::from_secs(config.ui.validation_banner_secs));

        let mut tracker = WorkoutTracker::new(
            CardList::new(),
            storage,
            Box::new(SystemClock),
            config.map.clone(),
        );
        if let Err(e) = tracker.rehydrate() {
            tracing::error!("Failed to load saved workouts: {}", e);
            banner.show("Saved workouts could not be read");
        }

        let provider = ConfiguredLocation::from_env_or(config.map.home_position);
        let location_rx = Some(location::request_position(provider));

        Self {
            theme,
            tracker,
            form: WorkoutFormPanel::new(),
            banner,
            location_rx,
            location_state: LocationState::Pending,
            confirm_clear: false,
        }
    }

    /// Attach the map once the position request completes.
    fn process_location_events(&mut self) {
        let Some(rx) = &self.location_rx else {
            return;
        };
        let Ok(event) = rx.try_recv() else {
            return;
        };

        match event {
            LocationEvent::Acquired(position) => {
                self.tracker.attach_map(PlotMap::new(), position);
                self.location_state = LocationState::Ready;
            }
            LocationEvent::Failed(_) => {
                self.location_state = LocationState::Failed {
                    acknowledged: false,
                };
            }
        }
        self.location_rx = None;
    }

    fn handle_form_event(&mut self, event: FormEvent) {
        match event {
            FormEvent::Submit(coordinates, submission) => {
                match self.tracker.submit(coordinates, submission) {
                    Ok(_) => self.form.close(),
                    Err(TrackerError::Validation(e)) => {
                        self.banner.show(format!("Inputs have to be positive numbers: {e}"));
                    }
                    Err(e) => {
                        self.form.close();
                        self.banner.show(format!("Workout could not be saved: {e}"));
                    }
                }
            }
            FormEvent::Cancel => self.form.close(),
        }
    }

    fn handle_card_action(&mut self, action: CardAction) {
        match action {
            CardAction::Focus(id) => {
                self.tracker.focus(&id);
            }
            CardAction::Delete(id) => {
                if let Err(e) = self.tracker.remove_by_id(&id) {
                    self.banner.show(format!("Workout could not be deleted: {e}"));
                }
            }
        }
    }

    fn show_sidebar(&mut self, ui: &mut egui::Ui) {
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            let has_workouts = !self.tracker.store().is_empty();
            if ui
                .add_enabled(has_workouts, egui::Button::new("View all"))
                .clicked()
            {
                self.tracker.view_all();
            }
            if ui
                .add_enabled(has_workouts, egui::Button::new("Delete all"))
                .clicked()
            {
                self.confirm_clear = true;
            }

            let current = self.tracker.sort_field();
            let mut picked = None;
            egui::ComboBox::from_id_salt("sort_field")
                .selected_text(match current {
                    Some(field) => format!("Sort: {}", field),
                    None => "Sort".to_string(),
                })
                .show_ui(ui, |ui| {
                    for field in SortField::ALL {
                        if ui
                            .selectable_label(current == Some(field), field.to_string())
                            .clicked()
                        {
                            picked = Some(field);
                        }
                    }
                });
            if let Some(field) = picked {
                if let Err(e) = self.tracker.sort_by(field) {
                    self.banner.show(format!("Workout order could not be saved: {e}"));
                }
            }
        });
        ui.separator();

        if let Some(message) = self.banner.visible() {
            ui.label(egui::RichText::new(message).color(theme::ERROR).strong());
            ui.add_space(4.0);
        }

        if let Some(event) = self.form.show(ui) {
            self.handle_form_event(event);
        }
        if self.form.is_open() {
            ui.separator();
        }

        if let Some(action) = self.tracker.list().show(ui) {
            self.handle_card_action(action);
        }
    }

    fn show_map(&mut self, ui: &mut egui::Ui) {
        match self.tracker.map_mut() {
            Some(map) => {
                if let Some(clicked) = map.show(ui) {
                    self.form.open(clicked);
                }
            }
            None => {
                let text = match self.location_state {
                    LocationState::Pending => "Locating…",
                    _ => "Map unavailable: could not get location",
                };
                ui.centered_and_justified(|ui| {
                    ui.label(egui::RichText::new(text).weak());
                });
            }
        }
    }

    fn show_dialogs(&mut self, ctx: &egui::Context) {
        if self.confirm_clear {
            egui::Window::new("Delete all workouts?")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label("This removes every workout and its saved data.");
                    ui.add_space(8.0);
                    ui.horizontal(|ui| {
                        if ui
                            .button(egui::RichText::new("Yes").color(theme::ERROR))
                            .clicked()
                        {
                            if let Err(e) = self.tracker.clear_all() {
                                self.banner.show(format!("Saved data could not be removed: {e}"));
                            }
                            self.form.close();
                            self.confirm_clear = false;
                        }
                        if ui.button("No").clicked() {
                            self.confirm_clear = false;
                        }
                    });
                });
        }

        if self.location_state == (LocationState::Failed { acknowledged: false }) {
            egui::Window::new("Location")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(
                        egui::RichText::new("⚠ Could not get location").color(theme::WARNING),
                    );
                    ui.label(format!(
                        "Set {} or map.home_position in {}.",
                        location::POSITION_ENV_VAR,
                        config::get_config_path().display()
                    ));
                    if ui.button("OK").clicked() {
                        self.location_state = LocationState::Failed { acknowledged: true };
                    }
                });
        }
    }
}

impl eframe::App for TrailmarkApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_location_events();

        // Keep polling the position request and expire the banner on time
        if self.location_rx.is_some() || self.banner.visible().is_some() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Trailmark");

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let theme_icon = match self.theme {
                        Theme::Dark => "🌙",
                        Theme::Light => "☀",
                    };
                    if ui.button(theme_icon).clicked() {
                        self.theme = self.theme.toggled();
                        ctx.set_visuals(self.theme.visuals());
                    }
                    ui.label(format!("{} workouts", self.tracker.store().len()));
                });
            });
        });

        egui::SidePanel::left("sidebar")
            .default_width(380.0)
            .resizable(true)
            .show(ctx, |ui| self.show_sidebar(ui));

        egui::CentralPanel::default().show(ctx, |ui| self.show_map(ui));

        self.show_dialogs(ctx);
    }
}
