//! Property-based tests for the two chart queries using proptest

use proptest::prelude::*;

use launch_dash::data::filter::{PayloadRange, SiteSelector};
use launch_dash::data::model::{Dataset, LaunchRecord, Outcome};
use launch_dash::query::{aggregate_success_by_site, filter_payload_outcome};

const SITES: [&str; 4] = ["CCAFS LC-40", "CCAFS SLC-40", "KSC LC-39A", "VAFB SLC-4E"];
const BOOSTERS: [&str; 5] = ["v1.0", "v1.1", "FT", "B4", "B5"];

/// Generate a launch record with a payload inside the slider span
fn record_strategy() -> impl Strategy<Value = LaunchRecord> {
    (
        prop::sample::select(SITES.to_vec()),
        0.0..=10_000.0f64,
        any::<bool>(),
        prop::sample::select(BOOSTERS.to_vec()),
        prop::option::of(1..200u32),
    )
        .prop_map(|(site, payload, success, booster, flight)| LaunchRecord {
            site: site.to_string(),
            payload_mass_kg: payload,
            outcome: if success { Outcome::Success } else { Outcome::Failure },
            booster_category: booster.to_string(),
            flight_number: flight,
        })
}

fn dataset_strategy() -> impl Strategy<Value = Dataset> {
    prop::collection::vec(record_strategy(), 0..60).prop_map(Dataset::from_records)
}

fn count(ds: &Dataset, pred: impl Fn(&LaunchRecord) -> bool) -> u64 {
    ds.records().iter().filter(|r| pred(*r)).count() as u64
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn site_pie_sums_to_site_launch_count(ds in dataset_strategy()) {
        for site in ds.site_names() {
            let pie = aggregate_success_by_site(&ds, &SiteSelector::Site(site.clone()));
            prop_assert_eq!(pie.slices.len(), 2);
            prop_assert_eq!(pie.total(), count(&ds, |r| &r.site == site));
        }
    }

    #[test]
    fn all_sites_pie_sums_to_success_count(ds in dataset_strategy()) {
        let pie = aggregate_success_by_site(&ds, &SiteSelector::All);
        prop_assert_eq!(pie.total(), count(&ds, |r| r.outcome.is_success()));
        prop_assert!(pie.slices.iter().all(|s| s.value > 0));
    }

    #[test]
    fn full_range_keeps_every_record(ds in dataset_strategy()) {
        let scatter = filter_payload_outcome(&ds, &SiteSelector::All, PayloadRange::FULL);
        prop_assert_eq!(scatter.points.len(), ds.len());
    }

    #[test]
    fn scatter_points_respect_selection(
        ds in dataset_strategy(),
        a in 0.0..=10_000.0f64,
        b in 0.0..=10_000.0f64,
        site_idx in 0..SITES.len(),
    ) {
        let range = PayloadRange::clamped(a, b);
        let site = SiteSelector::Site(SITES[site_idx].to_string());
        let scatter = filter_payload_outcome(&ds, &site, range);
        for p in &scatter.points {
            prop_assert!(p.x >= range.low() && p.x <= range.high());
            prop_assert_eq!(p.site.as_str(), SITES[site_idx]);
        }
        prop_assert_eq!(
            scatter.points.len() as u64,
            count(&ds, |r| range.contains(r.payload_mass_kg) && r.site == SITES[site_idx])
        );
    }

    #[test]
    fn queries_are_idempotent(
        ds in dataset_strategy(),
        a in 0.0..=10_000.0f64,
        b in 0.0..=10_000.0f64,
        site_idx in 0..=SITES.len(),
    ) {
        let site = SITES
            .get(site_idx)
            .map(|s| SiteSelector::Site(s.to_string()))
            .unwrap_or(SiteSelector::All);
        let range = PayloadRange::clamped(a, b);

        let pie1 = serde_json::to_string(&aggregate_success_by_site(&ds, &site)).unwrap();
        let pie2 = serde_json::to_string(&aggregate_success_by_site(&ds, &site)).unwrap();
        prop_assert_eq!(pie1, pie2);

        let sc1 = serde_json::to_string(&filter_payload_outcome(&ds, &site, range)).unwrap();
        let sc2 = serde_json::to_string(&filter_payload_outcome(&ds, &site, range)).unwrap();
        prop_assert_eq!(sc1, sc2);
    }

    #[test]
    fn degenerate_range_returns_exact_payload(ds in dataset_strategy(), idx in any::<prop::sample::Index>()) {
        prop_assume!(!ds.is_empty());
        let target = &ds.records()[idx.index(ds.len())];
        let p = target.payload_mass_kg;
        let range = PayloadRange::new(p, p).unwrap();
        let site = SiteSelector::Site(target.site.clone());
        let scatter = filter_payload_outcome(&ds, &site, range);
        prop_assert!(scatter.points.iter().any(|pt| pt.x == p && pt.site == target.site));
    }
}

#[test]
fn three_record_scenario() {
    let rec = |site: &str, payload: f64, outcome: Outcome, booster: &str| LaunchRecord {
        site: site.to_string(),
        payload_mass_kg: payload,
        outcome,
        booster_category: booster.to_string(),
        flight_number: None,
    };
    let ds = Dataset::from_records(vec![
        rec("A", 500.0, Outcome::Success, "v1"),
        rec("A", 1500.0, Outcome::Failure, "v1"),
        rec("B", 800.0, Outcome::Success, "v2"),
    ]);

    let all = aggregate_success_by_site(&ds, &SiteSelector::All);
    let all: Vec<(&str, u64)> = all.slices.iter().map(|s| (s.label.as_str(), s.value)).collect();
    assert_eq!(all, [("A", 1), ("B", 1)]);

    let a = aggregate_success_by_site(&ds, &SiteSelector::parse("A"));
    let a: Vec<(&str, u64)> = a.slices.iter().map(|s| (s.label.as_str(), s.value)).collect();
    assert_eq!(a, [("Success", 1), ("Failure", 1)]);

    let scatter = filter_payload_outcome(
        &ds,
        &SiteSelector::All,
        PayloadRange::new(0.0, 1000.0).unwrap(),
    );
    let pts: Vec<(&str, f64)> = scatter.points.iter().map(|p| (p.site.as_str(), p.x)).collect();
    assert_eq!(pts, [("A", 500.0), ("B", 800.0)]);
}
