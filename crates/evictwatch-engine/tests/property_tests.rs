//! Property-based tests for the summary pipeline.

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};
use evictwatch_core::window::DateSpan;
use evictwatch_core::{Filing, PartyRole, select_windows};
use evictwatch_engine::{compute_summary, filter_counties, filter_window};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

const COUNTIES: &[&str] = &["Multnomah", "Washington", "Clackamas"];
const PARTIES: &[&str] = &[
    "Acme Property Mgmt",
    "Smith, LLC",
    "Jones",
    "Rose City Rentals",
    "Doe & Roe",
    "Alder Apartments",
    "Burnside Holdings",
    "Cedar Mill Homes",
    "Division Partners",
    "Everett Court",
    "Flanders LLC",
    "Glisan Group",
    "Hawthorne Housing",
];

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
}

fn span() -> DateSpan {
    DateSpan {
        min: base_date(),
        max: base_date() + Duration::days(120),
    }
}

fn names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop::sample::select(PARTIES), 0..3)
        .prop_map(|v| {
            let mut out: Vec<String> = Vec::new();
            for n in v {
                if !out.iter().any(|o| o == n) {
                    out.push(n.to_string());
                }
            }
            out
        })
}

fn filing(index: usize) -> impl Strategy<Value = Filing> {
    (
        0i64..=120,
        prop::option::of(prop::sample::select(COUNTIES)),
        names(),
        names(),
        names(),
    )
        .prop_map(move |(offset, county, landlords, managers, lawyers)| {
            let mut f = Filing::new(format!("23LT{index:05}"), base_date() + Duration::days(offset));
            f.county = county.map(str::to_string);
            f.evicting_landlords = landlords;
            f.evicting_property_managers = managers;
            f.evicting_lawyers = lawyers;
            f
        })
}

fn filings() -> impl Strategy<Value = Vec<Filing>> {
    (0usize..60).prop_flat_map(|n| (0..n).map(filing).collect::<Vec<_>>())
}

fn county_selection() -> impl Strategy<Value = BTreeSet<String>> {
    prop::sample::subsequence(COUNTIES, 0..=COUNTIES.len())
        .prop_map(|v| v.into_iter().map(str::to_string).collect())
}

/// (start offset, length) pairs that stay inside [`span`].
fn window_offsets() -> impl Strategy<Value = (i64, i64)> {
    (0i64..=120).prop_flat_map(|start| (Just(start), 0i64..=(120 - start)))
}

// ============================================================================
// Filter properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn county_filter_is_idempotent(fs in filings(), counties in county_selection()) {
        let once = filter_counties(&fs, &counties);
        let twice = filter_counties(once.iter().copied(), &counties);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn comparison_window_mirrors_selection((start, len) in window_offsets()) {
        let s = base_date() + Duration::days(start);
        let e = s + Duration::days(len);
        let pair = select_windows(span(), s, e).unwrap();
        prop_assert_eq!(pair.comparison.end, s);
        prop_assert_eq!(pair.comparison.duration(), pair.current.duration());
    }

    #[test]
    fn current_total_counts_doubly_filtered_cases(
        fs in filings(),
        counties in county_selection(),
        (start, len) in window_offsets()
    ) {
        let s = base_date() + Duration::days(start);
        let pair = select_windows(span(), s, s + Duration::days(len)).unwrap();
        let summary = compute_summary(&fs, &counties, &pair, 10);

        let in_counties = filter_counties(&fs, &counties);
        let working = filter_window(&in_counties, pair.current);
        let distinct: BTreeSet<&str> = working.iter().map(|f| f.case_code.as_str()).collect();
        prop_assert_eq!(summary.current_total, distinct.len() as u64);

        if counties.is_empty() {
            prop_assert_eq!(summary.current_total, 0);
            prop_assert_eq!(summary.comparison_total, 0);
        }
    }
}

// ============================================================================
// Ranking properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn rankings_are_capped_and_non_increasing(
        fs in filings(),
        counties in county_selection(),
        top_n in 1usize..12
    ) {
        let pair = select_windows(span(), span().min, span().max).unwrap();
        let summary = compute_summary(&fs, &counties, &pair, top_n);
        for ranking in &summary.rankings {
            prop_assert!(ranking.rows.len() <= top_n);
            for w in ranking.rows.windows(2) {
                prop_assert!(w[0].count >= w[1].count);
                if w[0].count == w[1].count {
                    prop_assert!(w[0].name < w[1].name);
                }
            }
        }
    }

    #[test]
    fn clearing_one_role_leaves_others_unchanged(
        fs in filings(),
        counties in county_selection()
    ) {
        let pair = select_windows(span(), span().min, span().max).unwrap();
        let before = compute_summary(&fs, &counties, &pair, 10);

        let cleared: Vec<Filing> = fs
            .iter()
            .cloned()
            .map(|mut f| {
                f.evicting_lawyers.clear();
                f
            })
            .collect();
        let after = compute_summary(&cleared, &counties, &pair, 10);

        prop_assert!(after.ranking(PartyRole::Lawyer).unwrap().rows.is_empty());
        prop_assert_eq!(before.ranking(PartyRole::Landlord), after.ranking(PartyRole::Landlord));
        prop_assert_eq!(
            before.ranking(PartyRole::PropertyManager),
            after.ranking(PartyRole::PropertyManager)
        );
        prop_assert_eq!(before.current_total, after.current_total);
    }

    #[test]
    fn summary_is_deterministic(
        fs in filings(),
        counties in county_selection(),
        (start, len) in window_offsets()
    ) {
        let s = base_date() + Duration::days(start);
        let pair = select_windows(span(), s, s + Duration::days(len)).unwrap();
        let a = compute_summary(&fs, &counties, &pair, 10);
        let b = compute_summary(&fs, &counties, &pair, 10);
        prop_assert_eq!(serde_json::to_vec(&a).unwrap(), serde_json::to_vec(&b).unwrap());
        prop_assert_eq!(a, b);
    }
}
