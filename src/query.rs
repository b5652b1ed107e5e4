//! Chart series derived from the dataset and the current selection.
//!
//! Both queries are pure: they read the dataset, never cache, and return the
//! same series for the same inputs.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::data::filter::{by_site, by_site_and_payload, PayloadRange, SiteSelector};
use crate::data::model::{Dataset, Outcome};

// ---------------------------------------------------------------------------
// Success distribution (pie)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSeries {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

impl PieSeries {
    /// Sum of all slice values.
    pub fn total(&self) -> u64 {
        self.slices.iter().map(|s| s.value).sum()
    }
}

/// Success distribution for the pie chart.
///
/// * `All` – one slice per site counting its successful launches. Slices are
///   ordered by site name; sites with no success do not appear.
/// * a site – exactly `Success` and `Failure` slices for that site, both zero
///   when the site has no records (or is unknown).
pub fn aggregate_success_by_site(dataset: &Dataset, site: &SiteSelector) -> PieSeries {
    match site {
        SiteSelector::All => {
            let mut per_site: BTreeMap<&str, u64> = BTreeMap::new();
            for rec in dataset.records().iter().filter(|r| r.outcome.is_success()) {
                *per_site.entry(rec.site.as_str()).or_default() += 1;
            }
            PieSeries {
                title: "Total Successful Launches by Site".to_string(),
                slices: per_site
                    .into_iter()
                    .map(|(label, value)| PieSlice {
                        label: label.to_string(),
                        value,
                    })
                    .collect(),
            }
        }
        SiteSelector::Site(name) => {
            let (mut success, mut failure) = (0u64, 0u64);
            for rec in by_site(dataset, site) {
                match rec.outcome {
                    Outcome::Success => success += 1,
                    Outcome::Failure => failure += 1,
                }
            }
            PieSeries {
                title: format!("Success vs Failure for {name}"),
                slices: vec![
                    PieSlice {
                        label: Outcome::Success.to_string(),
                        value: success,
                    },
                    PieSlice {
                        label: Outcome::Failure.to_string(),
                        value: failure,
                    },
                ],
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Payload vs. outcome (scatter)
// ---------------------------------------------------------------------------

pub const PAYLOAD_AXIS_LABEL: &str = "Payload Mass (kg)";
pub const OUTCOME_AXIS_LABEL: &str = "Outcome (1=Success, 0=Failure)";

/// Rendering contract for the outcome axis: only the two classes are ticked
/// and the visible range is padded so points at 0 and 1 are not clipped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OutcomeAxis {
    pub tick_values: [f64; 2],
    pub range: [f64; 2],
}

impl Default for OutcomeAxis {
    fn default() -> Self {
        OutcomeAxis {
            tick_values: [0.0, 1.0],
            range: [-0.2, 1.2],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    /// Payload mass in kg.
    pub x: f64,
    /// Outcome class, 0 or 1.
    pub y: u8,
    /// Booster version category; points are coloured by it.
    pub color: String,
    pub site: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flight_number: Option<u32>,
}

impl ScatterPoint {
    /// Hover fields: the site, then the flight number when the record has one.
    pub fn tooltip_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![("Launch Site", self.site.clone())];
        if let Some(n) = self.flight_number {
            fields.push(("Flight Number", n.to_string()));
        }
        fields
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSeries {
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub y_axis: OutcomeAxis,
    /// One point per matching record, in dataset order.
    pub points: Vec<ScatterPoint>,
}

/// Payload vs. outcome points for records inside `range` (inclusive) at the
/// selected site.
pub fn filter_payload_outcome(
    dataset: &Dataset,
    site: &SiteSelector,
    range: PayloadRange,
) -> ScatterSeries {
    let title = match site {
        SiteSelector::All => "Payload vs. Outcome for All Sites".to_string(),
        SiteSelector::Site(name) => format!("Payload vs. Outcome for {name}"),
    };

    let points = by_site_and_payload(dataset, site, range)
        .map(|rec| ScatterPoint {
            x: rec.payload_mass_kg,
            y: rec.outcome.class(),
            color: rec.booster_category.clone(),
            site: rec.site.clone(),
            flight_number: rec.flight_number,
        })
        .collect();

    ScatterSeries {
        title,
        x_label: PAYLOAD_AXIS_LABEL,
        y_label: OUTCOME_AXIS_LABEL,
        y_axis: OutcomeAxis::default(),
        points,
    }
}
