//! Workout entry form.

use egui::{Key, Response, RichText, TextEdit, Ui};

use crate::workouts::{Coordinates, WorkoutForm, WorkoutKind, WorkoutSubmission};

/// Outcome of a frame of form interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormEvent {
    /// User submitted the form for the given map position
    Submit(Coordinates, WorkoutSubmission),
    /// User dismissed the form
    Cancel,
}

/// Form shown after clicking the map.
#[derive(Debug, Default)]
pub struct WorkoutFormPanel {
    form: WorkoutForm,
    target: Option<Coordinates>,
    needs_focus: bool,
}

impl WorkoutFormPanel {
    /// Create a hidden form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reveal the form for a workout at `coordinates`.
    pub fn open(&mut self, coordinates: Coordinates) {
        self.target = Some(coordinates);
        self.needs_focus = true;
    }

    /// Hide the form and clear its fields.
    pub fn close(&mut self) {
        self.target = None;
        self.form.clear();
    }

    /// Whether the form is visible.
    pub fn is_open(&self) -> bool {
        self.target.is_some()
    }

    /// Position the form is collecting a workout for.
    pub fn target(&self) -> Option<Coordinates> {
        self.target
    }

    /// Draw the form if it is open.
    pub fn show(&mut self, ui: &mut Ui) -> Option<FormEvent> {
        let target = self.target?;
        let mut event = None;
        let mut committed = false;

        egui::Grid::new("workout_form")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.label("Type");
                egui::ComboBox::from_id_salt("workout_kind")
                    .selected_text(self.form.kind.to_string())
                    .show_ui(ui, |ui| {
                        for kind in [WorkoutKind::Running, WorkoutKind::Cycling] {
                            ui.selectable_value(&mut self.form.kind, kind, kind.to_string());
                        }
                    });
                ui.end_row();

                ui.label("Distance");
                let distance = ui.add(
                    TextEdit::singleline(&mut self.form.distance)
                        .hint_text("km")
                        .desired_width(80.0),
                );
                committed |= committed_with_enter(ui, &distance);
                if self.needs_focus {
                    distance.request_focus();
                    self.needs_focus = false;
                }
                ui.end_row();

                ui.label("Duration");
                let duration = ui.add(
                    TextEdit::singleline(&mut self.form.duration)
                        .hint_text("min")
                        .desired_width(80.0),
                );
                committed |= committed_with_enter(ui, &duration);
                ui.end_row();

                // Only the field matching the selected kind is shown
                match self.form.kind {
                    WorkoutKind::Running => {
                        ui.label("Cadence");
                        let cadence = ui.add(
                            TextEdit::singleline(&mut self.form.cadence)
                                .hint_text("step/min")
                                .desired_width(80.0),
                        );
                        committed |= committed_with_enter(ui, &cadence);
                    }
                    WorkoutKind::Cycling => {
                        ui.label("Elev Gain");
                        let elevation = ui.add(
                            TextEdit::singleline(&mut self.form.elevation)
                                .hint_text("meters")
                                .desired_width(80.0),
                        );
                        committed |= committed_with_enter(ui, &elevation);
                    }
                }
                ui.end_row();
            });

        ui.horizontal(|ui| {
            if ui.button("OK").clicked() || committed {
                event = Some(FormEvent::Submit(target, self.form.submission()));
            }
            if ui.button(RichText::new("Cancel").weak()).clicked()
                || ui.input(|i| i.key_pressed(Key::Escape))
            {
                event = Some(FormEvent::Cancel);
            }
        });

        event
    }
}

/// Enter pressed while editing `field`. A single-line edit gives up focus on
/// Enter, so this only fires for the field being typed in.
fn committed_with_enter(ui: &Ui, field: &Response) -> bool {
    field.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter))
}
