//! The summary pipeline: jurisdiction filter, window filters, totals, delta,
//! and per-role party rankings.
//!
//! Everything here is a pure function of its inputs. The source slice is only
//! read; every filter returns a new view of borrowed filings.

use std::collections::{BTreeMap, BTreeSet};

use evictwatch_core::{Filing, PartyRole, Window, WindowPair};
use tracing::debug;

use crate::summary::{Delta, RankedParty, Ranking, Summary};

/// Filings whose county is in `counties`. An empty selection yields nothing.
pub fn filter_counties<'a, I>(filings: I, counties: &BTreeSet<String>) -> Vec<&'a Filing>
where
    I: IntoIterator<Item = &'a Filing>,
{
    filings
        .into_iter()
        .filter(|f| f.county.as_ref().is_some_and(|c| counties.contains(c)))
        .collect()
}

/// Filings filed within `window`, both bounds inclusive.
pub fn filter_window<'a>(filings: &[&'a Filing], window: Window) -> Vec<&'a Filing> {
    filings
        .iter()
        .copied()
        .filter(|f| window.contains(f.filed_date))
        .collect()
}

/// Number of distinct case codes.
fn distinct_cases(filings: &[&Filing]) -> u64 {
    filings
        .iter()
        .map(|f| f.case_code.as_str())
        .collect::<BTreeSet<_>>()
        .len() as u64
}

/// `round((current - comparison) / current * 100)`, rounding half to even.
///
/// Normalised by the current total, not the comparison total.
pub fn delta_percent(current: u64, comparison: u64) -> Delta {
    if current == 0 {
        return Delta::Undefined;
    }
    let change = current as f64 - comparison as f64;
    let pct = (change / current as f64) * 100.0;
    Delta::Percent(pct.round_ties_even() as i64)
}

/// Top `top_n` parties for `role`, counted by distinct case code.
///
/// Filings that name nobody for `role` contribute nothing. Ties are broken by
/// party name ascending.
pub fn rank_parties(filings: &[&Filing], role: PartyRole, top_n: usize) -> Ranking {
    let mut cases_by_party: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for filing in filings {
        for name in filing.parties(role) {
            cases_by_party
                .entry(name.as_str())
                .or_default()
                .insert(filing.case_code.as_str());
        }
    }

    let mut rows: Vec<RankedParty> = cases_by_party
        .into_iter()
        .map(|(name, cases)| RankedParty {
            name: name.to_string(),
            count: cases.len() as u64,
        })
        .collect();
    // BTreeMap iteration is already name-ascending; a stable sort keeps it
    // within equal counts.
    rows.sort_by(|a, b| b.count.cmp(&a.count));
    rows.truncate(top_n);

    Ranking { role, rows }
}

/// Compute the full summary for one selection.
pub fn compute_summary(
    filings: &[Filing],
    counties: &BTreeSet<String>,
    windows: &WindowPair,
    top_n: usize,
) -> Summary {
    let in_counties = filter_counties(filings, counties);

    let comparison = filter_window(&in_counties, windows.comparison);
    let comparison_total = distinct_cases(&comparison);

    let working = filter_window(&in_counties, windows.current);
    let current_total = distinct_cases(&working);

    let delta = delta_percent(current_total, comparison_total);

    let rankings = PartyRole::RANKED
        .iter()
        .map(|&role| rank_parties(&working, role, top_n))
        .collect();

    debug!(
        counties = counties.len(),
        current = %windows.current,
        comparison = %windows.comparison,
        current_total,
        comparison_total,
        %delta,
        "computed summary"
    );

    Summary {
        counties: counties.iter().cloned().collect(),
        current_window: windows.current,
        comparison_window: windows.comparison,
        current_total,
        comparison_total,
        delta,
        rankings,
    }
}
