use eframe::egui::{self, RichText, Ui};

use crate::data::filter::{
    PayloadRange, PAYLOAD_SLIDER_MARK_STEP, PAYLOAD_SLIDER_MAX, PAYLOAD_SLIDER_MIN,
    PAYLOAD_SLIDER_STEP,
};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – selection controls
// ---------------------------------------------------------------------------

/// Render the site select and payload range controls.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Selection");
    ui.separator();

    // ---- Launch site ----
    ui.strong("Launch Site");
    let current = state.selection.site.clone();
    let mut picked = None;
    egui::ComboBox::from_id_salt("site_select")
        .selected_text(current.label())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for option in &state.site_options {
                if ui
                    .selectable_label(*option == current, option.label())
                    .clicked()
                {
                    picked = Some(option.clone());
                }
            }
        });
    if let Some(site) = picked {
        state.select_site(site);
    }

    ui.add_space(12.0);

    // ---- Payload range ----
    ui.strong("Payload range (Kg):");
    let range = state.selection.payload_range;
    let (mut low, mut high) = (range.low(), range.high());

    let low_changed = ui
        .add(
            egui::Slider::new(&mut low, PAYLOAD_SLIDER_MIN..=PAYLOAD_SLIDER_MAX)
                .step_by(PAYLOAD_SLIDER_STEP)
                .text("from"),
        )
        .changed();
    let high_changed = ui
        .add(
            egui::Slider::new(&mut high, PAYLOAD_SLIDER_MIN..=PAYLOAD_SLIDER_MAX)
                .step_by(PAYLOAD_SLIDER_STEP)
                .text("to"),
        )
        .changed();

    if low_changed || high_changed {
        state.set_payload_range(linked_range(low, high, low_changed));
    }

    ui.label(RichText::new(slider_marks()).weak().monospace());

    ui.add_space(12.0);
    ui.separator();
    ui.label(format!(
        "{} launches, {} in view",
        state.dataset.len(),
        state.scatter.points.len()
    ));
}

/// Keep the two handles ordered: the handle being dragged pushes the other.
fn linked_range(low: f64, high: f64, low_moved: bool) -> PayloadRange {
    if low <= high {
        PayloadRange::clamped(low, high)
    } else if low_moved {
        PayloadRange::clamped(low, low)
    } else {
        PayloadRange::clamped(high, high)
    }
}

/// Labels for the slider marks, e.g. `0  2500  5000  7500  10000`.
fn slider_marks() -> String {
    let mut marks = Vec::new();
    let mut v = PAYLOAD_SLIDER_MIN;
    while v <= PAYLOAD_SLIDER_MAX {
        marks.push(format!("{v}"));
        v += PAYLOAD_SLIDER_MARK_STEP;
    }
    marks.join("  ")
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the dashboard title.
pub fn top_bar(ui: &mut Ui) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(
            RichText::new("Launch Records Dashboard")
                .size(28.0)
                .color(egui::Color32::from_rgb(0x50, 0x3D, 0x36))
                .strong(),
        );
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dragged_handle_pushes_the_other() {
        let r = linked_range(6000.0, 4000.0, true);
        assert_eq!((r.low(), r.high()), (6000.0, 6000.0));
        let r = linked_range(6000.0, 4000.0, false);
        assert_eq!((r.low(), r.high()), (4000.0, 4000.0));
        let r = linked_range(1000.0, 4000.0, true);
        assert_eq!((r.low(), r.high()), (1000.0, 4000.0));
    }

    #[test]
    fn marks_every_2500() {
        assert_eq!(slider_marks(), "0  2500  5000  7500  10000");
    }
}
