use std::fmt;

use serde::Deserialize;

use super::model::{Dataset, LaunchRecord};
use crate::error::SelectionError;

// ---------------------------------------------------------------------------
// Payload range control bounds
// ---------------------------------------------------------------------------

pub const PAYLOAD_SLIDER_MIN: f64 = 0.0;
pub const PAYLOAD_SLIDER_MAX: f64 = 10_000.0;
pub const PAYLOAD_SLIDER_STEP: f64 = 1_000.0;
/// Spacing of the labelled marks under the range control.
pub const PAYLOAD_SLIDER_MARK_STEP: f64 = 2_500.0;

/// Value of the site selector meaning "every site".
pub const ALL_SITES: &str = "ALL";

// ---------------------------------------------------------------------------
// Site selector
// ---------------------------------------------------------------------------

/// Either every site or exactly one site by name.
///
/// Any name is accepted; a name that is not in the dataset simply matches
/// no records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SiteSelector {
    #[default]
    All,
    Site(String),
}

impl SiteSelector {
    /// Parse the wire/UI value: `"ALL"` or a site name.
    pub fn parse(value: &str) -> Self {
        if value == ALL_SITES {
            SiteSelector::All
        } else {
            SiteSelector::Site(value.to_string())
        }
    }

    /// The value sent over the wire (`"ALL"` or the site name).
    pub fn value(&self) -> &str {
        match self {
            SiteSelector::All => ALL_SITES,
            SiteSelector::Site(name) => name,
        }
    }

    /// Human-readable label for the select control.
    pub fn label(&self) -> &str {
        match self {
            SiteSelector::All => "All Sites",
            SiteSelector::Site(name) => name,
        }
    }

    pub fn matches(&self, record: &LaunchRecord) -> bool {
        match self {
            SiteSelector::All => true,
            SiteSelector::Site(name) => record.site == *name,
        }
    }
}

impl fmt::Display for SiteSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl<'de> Deserialize<'de> for SiteSelector {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(SiteSelector::parse(&value))
    }
}

// ---------------------------------------------------------------------------
// Payload range
// ---------------------------------------------------------------------------

/// Inclusive payload mass range in kg, always within the slider bounds
/// and never inverted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    low: f64,
    high: f64,
}

impl PayloadRange {
    /// The whole slider span, `[0, 10000]`.
    pub const FULL: PayloadRange = PayloadRange {
        low: PAYLOAD_SLIDER_MIN,
        high: PAYLOAD_SLIDER_MAX,
    };

    /// Validate a bound pair coming from an untrusted caller.
    pub fn new(low: f64, high: f64) -> Result<Self, SelectionError> {
        for bound in [low, high] {
            if bound.is_nan() {
                return Err(SelectionError::NotANumber);
            }
            if !(PAYLOAD_SLIDER_MIN..=PAYLOAD_SLIDER_MAX).contains(&bound) {
                return Err(SelectionError::OutOfBounds(bound));
            }
        }
        if low > high {
            return Err(SelectionError::Inverted { low, high });
        }
        Ok(PayloadRange { low, high })
    }

    /// Build a range from arbitrary bounds by clamping them into the slider
    /// span and swapping if inverted. Used by interactive controls.
    pub fn clamped(low: f64, high: f64) -> Self {
        let clamp = |v: f64| {
            if v.is_nan() {
                PAYLOAD_SLIDER_MIN
            } else {
                v.clamp(PAYLOAD_SLIDER_MIN, PAYLOAD_SLIDER_MAX)
            }
        };
        let (a, b) = (clamp(low), clamp(high));
        PayloadRange {
            low: a.min(b),
            high: a.max(b),
        }
    }

    /// Default range control value: the dataset's payload bounds, clamped
    /// into the slider span. Falls back to the full span for an empty dataset.
    pub fn dataset_default(dataset: &Dataset) -> Self {
        match (dataset.min_payload(), dataset.max_payload()) {
            (Some(lo), Some(hi)) => Self::clamped(lo, hi),
            _ => Self::FULL,
        }
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    /// Inclusive on both ends.
    pub fn contains(&self, payload_mass_kg: f64) -> bool {
        payload_mass_kg >= self.low && payload_mass_kg <= self.high
    }
}

// ---------------------------------------------------------------------------
// Selection state
// ---------------------------------------------------------------------------

/// Current values of the site select and payload range controls.
///
/// Owned by a single interaction (one UI frame or one HTTP request).
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionState {
    pub site: SiteSelector,
    pub payload_range: PayloadRange,
}

impl SelectionState {
    /// Control defaults: all sites, payload range spanning the dataset.
    pub fn initial(dataset: &Dataset) -> Self {
        SelectionState {
            site: SiteSelector::All,
            payload_range: PayloadRange::dataset_default(dataset),
        }
    }
}

/// Site select options: "All Sites" first, then every site sorted by name.
pub fn site_options(dataset: &Dataset) -> Vec<SiteSelector> {
    std::iter::once(SiteSelector::All)
        .chain(
            dataset
                .site_names()
                .iter()
                .map(|s| SiteSelector::Site(s.clone())),
        )
        .collect()
}

/// Records matching the site selector, in source order.
pub fn by_site<'a>(
    dataset: &'a Dataset,
    site: &'a SiteSelector,
) -> impl Iterator<Item = &'a LaunchRecord> + 'a {
    dataset.records().iter().filter(move |r| site.matches(r))
}

/// Records within the payload range that also match the site selector,
/// in source order.
pub fn by_site_and_payload<'a>(
    dataset: &'a Dataset,
    site: &'a SiteSelector,
    range: PayloadRange,
) -> impl Iterator<Item = &'a LaunchRecord> + 'a {
    dataset
        .records()
        .iter()
        .filter(move |r| range.contains(r.payload_mass_kg) && site.matches(r))
}
