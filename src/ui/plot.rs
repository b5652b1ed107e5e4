use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Color32, RichText, Stroke, Ui, Vec2};
use egui_plot::{
    GridMark, Legend, Plot, PlotPoint, PlotPoints, PlotResponse, Points, Polygon, Text,
};

use crate::query::ScatterSeries;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Success distribution (pie)
// ---------------------------------------------------------------------------

/// Largest angle of a single polygon; egui only fills convex shapes.
const MAX_PIECE_ANGLE: f64 = FRAC_PI_2;
/// Angular resolution of the arc.
const ARC_STEP: f64 = TAU / 180.0;

/// Outline of a pie wedge of the unit circle, split into convex pieces.
///
/// Angles are in radians, `start` measured counter-clockwise from +x and the
/// wedge sweeping clockwise.
pub fn wedge_pieces(start: f64, sweep: f64) -> Vec<Vec<[f64; 2]>> {
    let n = (sweep / MAX_PIECE_ANGLE).ceil().max(1.0) as usize;
    let piece = sweep / n as f64;
    let steps = ((piece / ARC_STEP).ceil() as usize).max(1);

    (0..n)
        .map(|k| {
            let a0 = start - piece * k as f64;
            let mut outline = Vec::with_capacity(steps + 2);
            outline.push([0.0, 0.0]);
            for i in 0..=steps {
                let a = a0 - piece * i as f64 / steps as f64;
                outline.push([a.cos(), a.sin()]);
            }
            outline
        })
        .collect()
}

/// Render the pie chart for the current site selection.
pub fn success_pie(ui: &mut Ui, state: &AppState, height: f32) {
    let pie = &state.pie;
    ui.heading(&pie.title);

    let total = pie.total();
    if total == 0 {
        ui.allocate_ui(eframe::egui::vec2(ui.available_width(), height), |ui: &mut Ui| {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.label(RichText::new("No launches for this selection").weak());
            });
        });
        return;
    }

    Plot::new("success_pie")
        .height(height)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            // Start at 12 o'clock and go clockwise.
            let mut start = FRAC_PI_2;
            for slice in &pie.slices {
                if slice.value == 0 {
                    continue;
                }
                let fraction = slice.value as f64 / total as f64;
                let sweep = fraction * TAU;
                let color = state.slice_colors.color_for(&slice.label);

                for outline in wedge_pieces(start, sweep) {
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::from(outline))
                            .name(&slice.label)
                            .fill_color(color)
                            .stroke(Stroke::new(1.0, Color32::WHITE)),
                    );
                }

                let mid = start - sweep / 2.0;
                plot_ui.text(Text::new(
                    PlotPoint::new(0.65 * mid.cos(), 0.65 * mid.sin()),
                    RichText::new(format!("{:.1}%", fraction * 100.0))
                        .color(Color32::WHITE)
                        .strong(),
                ));
                start -= sweep;
            }
        });
}

// ---------------------------------------------------------------------------
// Payload vs. outcome (scatter)
// ---------------------------------------------------------------------------

/// Hover text for the point under the cursor, looked up by booster category
/// (the plot item name) and coordinates.
fn hover_text(series: &ScatterSeries, name: &str, value: &PlotPoint) -> String {
    let hit = series.points.iter().find(|p| {
        p.color == name && (p.x - value.x).abs() < 1e-9 && f64::from(p.y) == value.y
    });
    match hit {
        Some(p) => {
            let mut lines = vec![
                format!("{}: {}", series.x_label, p.x),
                format!("Outcome: {}", p.y),
                format!("Booster Version Category: {}", p.color),
            ];
            lines.extend(p.tooltip_fields().into_iter().map(|(k, v)| format!("{k}: {v}")));
            lines.join("\n")
        }
        None => format!("{:.0} kg", value.x),
    }
}

/// Render the payload vs. outcome scatter chart.
///
/// The y axis is pinned to the outcome axis range: no y margin, and drag,
/// zoom and scroll only act on the payload axis.
pub fn payload_scatter(ui: &mut Ui, state: &AppState) -> PlotResponse<()> {
    let series = &state.scatter;
    ui.heading(&series.title);

    let ticks = series.y_axis.tick_values;
    let [y_min, y_max] = series.y_axis.range;
    let range = state.selection.payload_range;

    Plot::new("payload_scatter")
        .legend(Legend::default())
        .x_axis_label(series.x_label)
        .y_axis_label(series.y_label)
        .include_x(range.low())
        .include_x(range.high())
        .include_y(y_min)
        .include_y(y_max)
        .y_grid_spacer(move |_input| {
            ticks
                .iter()
                .map(|&value| GridMark {
                    value,
                    step_size: 1.0,
                })
                .collect()
        })
        .label_formatter(|name, value| hover_text(series, name, value))
        .set_margin_fraction(Vec2::new(0.05, 0.0))
        .allow_boxed_zoom(false)
        .allow_drag([true, false])
        .allow_scroll([true, false])
        .allow_zoom([true, false])
        .show(ui, |plot_ui| {
            for category in state.dataset.booster_categories() {
                let points: Vec<[f64; 2]> = series
                    .points
                    .iter()
                    .filter(|p| &p.color == category)
                    .map(|p| [p.x, f64::from(p.y)])
                    .collect();
                if points.is_empty() {
                    continue;
                }
                plot_ui.points(
                    Points::new(PlotPoints::from(points))
                        .name(category)
                        .color(state.booster_colors.color_for(category))
                        .filled(true)
                        .radius(4.0),
                );
            }
        })
}
