use std::sync::Arc;

use crate::color::ColorMap;
use crate::data::filter::{site_options, PayloadRange, SelectionState, SiteSelector};
use crate::data::model::Dataset;
use crate::query::{aggregate_success_by_site, filter_payload_outcome, PieSeries, ScatterSeries};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full dashboard state, independent of rendering.
pub struct AppState {
    /// Dataset loaded at start-up, shared read-only.
    pub dataset: Arc<Dataset>,

    /// Current control values.
    pub selection: SelectionState,

    /// Options of the site select control.
    pub site_options: Vec<SiteSelector>,

    /// Series for the two chart slots, recomputed from scratch whenever the
    /// selection changes.
    pub pie: PieSeries,
    pub scatter: ScatterSeries,

    /// Booster category colours for the scatter chart.
    pub booster_colors: ColorMap,

    /// Pie slice colours: every site plus `Success` / `Failure`.
    pub slice_colors: ColorMap,
}

impl AppState {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        let selection = SelectionState::initial(&dataset);
        let pie = aggregate_success_by_site(&dataset, &selection.site);
        let scatter = filter_payload_outcome(&dataset, &selection.site, selection.payload_range);

        let booster_colors = ColorMap::new(dataset.booster_categories());
        let mut slice_labels: Vec<String> = dataset.site_names().to_vec();
        slice_labels.extend(["Success".to_string(), "Failure".to_string()]);
        let slice_colors = ColorMap::new(&slice_labels);

        AppState {
            site_options: site_options(&dataset),
            dataset,
            selection,
            pie,
            scatter,
            booster_colors,
            slice_colors,
        }
    }

    /// Select a site; both charts depend on it.
    pub fn select_site(&mut self, site: SiteSelector) {
        if site == self.selection.site {
            return;
        }
        log::debug!("Site selection changed to {site}");
        self.selection.site = site;
        self.pie = aggregate_success_by_site(&self.dataset, &self.selection.site);
        self.refresh_scatter();
    }

    /// Set the payload range; only the scatter chart depends on it.
    pub fn set_payload_range(&mut self, range: PayloadRange) {
        if range == self.selection.payload_range {
            return;
        }
        log::debug!(
            "Payload range changed to [{}, {}]",
            range.low(),
            range.high()
        );
        self.selection.payload_range = range;
        self.refresh_scatter();
    }

    fn refresh_scatter(&mut self) {
        self.scatter = filter_payload_outcome(
            &self.dataset,
            &self.selection.site,
            self.selection.payload_range,
        );
    }
}
