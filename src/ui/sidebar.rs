//! Sidebar list of workout cards.

use egui::{Align, Frame, Label, Layout, RichText, ScrollArea, Sense, Ui};

use super::theme::{kind_color, ERROR};
use crate::tracker::ListView;
use crate::workouts::{WorkoutId, WorkoutKind, WorkoutRecord};

/// Handle to a rendered card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardId(u64);

/// Snapshot of the values shown on one card.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutCard {
    /// Card handle
    pub id: CardId,
    /// Workout the card belongs to
    pub workout_id: WorkoutId,
    /// Workout kind
    pub kind: WorkoutKind,
    /// Card title
    pub title: String,
    /// Distance in km
    pub distance_km: f64,
    /// Duration in minutes
    pub duration_min: f64,
    /// Pace or speed
    pub metric: f64,
    /// Cadence or elevation gain
    pub intensity: f64,
}

impl WorkoutCard {
    fn from_record(id: CardId, record: &WorkoutRecord) -> Self {
        Self {
            id,
            workout_id: record.id,
            kind: record.kind(),
            title: record.label.clone(),
            distance_km: record.distance_km,
            duration_min: record.duration_min,
            metric: record.metric(),
            intensity: record.intensity(),
        }
    }
}

/// Action requested from a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    /// Move the map to the workout
    Focus(WorkoutId),
    /// Delete the workout
    Delete(WorkoutId),
}

/// List of workout cards, newest first.
#[derive(Debug, Default)]
pub struct CardList {
    cards: Vec<WorkoutCard>,
    next_id: u64,
}

impl CardList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cards in display order.
    pub fn cards(&self) -> &[WorkoutCard] {
        &self.cards
    }

    /// Draw the cards. Returns the action the user picked, if any.
    pub fn show(&self, ui: &mut Ui) -> Option<CardAction> {
        if self.cards.is_empty() {
            ui.label(RichText::new("Click on the map to log a workout.").weak());
            return None;
        }

        let mut action = None;

        ScrollArea::vertical().show(ui, |ui| {
            for card in &self.cards {
                if let Some(picked) = render_card(ui, card) {
                    action = Some(picked);
                }
                ui.add_space(8.0);
            }
        });

        action
    }
}

impl ListView for CardList {
    type Element = CardId;

    fn render_entry(&mut self, record: &WorkoutRecord) -> CardId {
        self.next_id += 1;
        let id = CardId(self.next_id);
        self.cards.insert(0, WorkoutCard::from_record(id, record));
        id
    }

    fn remove_entry(&mut self, element: CardId) {
        self.cards.retain(|card| card.id != element);
    }

    fn reset(&mut self) {
        self.cards.clear();
    }
}

/// Render one card.
fn render_card(ui: &mut Ui, card: &WorkoutCard) -> Option<CardAction> {
    let mut action = None;
    let accent = kind_color(card.kind);

    Frame::new()
        .fill(ui.visuals().faint_bg_color)
        .stroke(egui::Stroke::new(1.0, accent))
        .inner_margin(12.0)
        .corner_radius(6.0)
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());

            ui.horizontal(|ui| {
                let title = ui
                    .add(Label::new(RichText::new(&card.title).size(15.0).strong()).sense(Sense::click()))
                    .on_hover_text("Show on map");
                if title.clicked() {
                    action = Some(CardAction::Focus(card.workout_id));
                }

                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if ui
                        .button(RichText::new("x").color(ERROR))
                        .on_hover_text("Delete workout")
                        .clicked()
                    {
                        action = Some(CardAction::Delete(card.workout_id));
                    }
                });
            });

            ui.add_space(4.0);

            ui.horizontal_wrapped(|ui| {
                detail(ui, card.kind.icon(), &format_value(card.distance_km), "km");
                detail(ui, "⏱", &format_value(card.duration_min), "min");
                detail(ui, "⚡", &format!("{:.1}", card.metric), card.kind.metric_unit());
                let intensity_icon = match card.kind {
                    WorkoutKind::Running => "👣",
                    WorkoutKind::Cycling => "⛰",
                };
                detail(
                    ui,
                    intensity_icon,
                    &format_value(card.intensity),
                    card.kind.intensity_unit(),
                );
            });
        });

    action
}

/// One icon/value/unit triple.
fn detail(ui: &mut Ui, icon: &str, value: &str, unit: &str) {
    ui.label(icon);
    ui.label(RichText::new(value).strong());
    ui.label(RichText::new(unit).small().weak());
    ui.add_space(6.0);
}

/// Format a user-entered value without trailing zeros.
fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        return format!("{:.0}", value);
    }
    let text = format!("{:.2}", value);
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
