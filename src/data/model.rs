use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Outcome – the binary class of a launch
// ---------------------------------------------------------------------------

/// Mission outcome as encoded in the `class` column (1 = success, 0 = failure).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Decode the numeric class value. Anything other than 0 or 1 is rejected.
    pub fn from_class(class: i64) -> Option<Self> {
        match class {
            0 => Some(Outcome::Failure),
            1 => Some(Outcome::Success),
            _ => None,
        }
    }

    /// Numeric class value, used as the scatter y coordinate.
    pub fn class(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    pub fn is_success(self) -> bool {
        self == Outcome::Success
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success => write!(f, "Success"),
            Outcome::Failure => write!(f, "Failure"),
        }
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single launch event (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    /// Launch site name.
    pub site: String,
    /// Payload mass in kilograms, never negative.
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    /// Booster version category, e.g. `FT` or `B5`.
    pub booster_category: String,
    pub flight_number: Option<u32>,
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed bounds and distinct values.
///
/// Built once at start-up and shared read-only afterwards; there are no
/// mutating methods.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<LaunchRecord>,
    /// `(min, max)` payload mass, `None` for an empty dataset.
    payload_bounds: Option<(f64, f64)>,
    site_names: Vec<String>,
    booster_categories: Vec<String>,
}

impl Dataset {
    /// Derive bounds and distinct values from the loaded records.
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        let mut sites: BTreeSet<&str> = BTreeSet::new();
        let mut boosters: BTreeSet<&str> = BTreeSet::new();
        let mut payload_bounds: Option<(f64, f64)> = None;

        for rec in &records {
            sites.insert(&rec.site);
            boosters.insert(&rec.booster_category);
            let p = rec.payload_mass_kg;
            payload_bounds = Some(match payload_bounds {
                Some((lo, hi)) => (lo.min(p), hi.max(p)),
                None => (p, p),
            });
        }

        let site_names = sites.into_iter().map(str::to_string).collect();
        let booster_categories = boosters.into_iter().map(str::to_string).collect();

        Dataset {
            records,
            payload_bounds,
            site_names,
            booster_categories,
        }
    }

    /// All records in source order.
    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    /// Smallest payload mass, `None` when there are no records.
    pub fn min_payload(&self) -> Option<f64> {
        self.payload_bounds.map(|(lo, _)| lo)
    }

    /// Largest payload mass, `None` when there are no records.
    pub fn max_payload(&self) -> Option<f64> {
        self.payload_bounds.map(|(_, hi)| hi)
    }

    /// Sorted distinct launch sites.
    pub fn site_names(&self) -> &[String] {
        &self.site_names
    }

    /// Sorted distinct booster version categories.
    pub fn booster_categories(&self) -> &[String] {
        &self.booster_categories
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
