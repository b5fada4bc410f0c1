//! Result types handed to the presentation layer.

use std::fmt;

use evictwatch_core::{PartyRole, Window};
use serde::{Deserialize, Serialize};

/// Period-over-period change, as a percentage of the current total.
///
/// `Undefined` when the current total is zero. Serialises as an integer or
/// `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<i64>", into = "Option<i64>")]
pub enum Delta {
    Percent(i64),
    Undefined,
}

impl Delta {
    pub fn percent(self) -> Option<i64> {
        match self {
            Delta::Percent(p) => Some(p),
            Delta::Undefined => None,
        }
    }
}

impl From<Delta> for Option<i64> {
    fn from(delta: Delta) -> Self {
        delta.percent()
    }
}

impl From<Option<i64>> for Delta {
    fn from(value: Option<i64>) -> Self {
        value.map_or(Delta::Undefined, Delta::Percent)
    }
}

impl fmt::Display for Delta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delta::Percent(p) => write!(f, "{p}%"),
            Delta::Undefined => f.write_str("n/a"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedParty {
    pub name: String,
    /// Distinct filings naming this party.
    pub count: u64,
}

/// Top-N parties for one role, count descending then name ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ranking {
    pub role: PartyRole,
    pub rows: Vec<RankedParty>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub counties: Vec<String>,
    pub current_window: Window,
    pub comparison_window: Window,
    pub current_total: u64,
    pub comparison_total: u64,
    pub delta: Delta,
    /// One ranking per entry of [`PartyRole::RANKED`], same order.
    pub rankings: Vec<Ranking>,
}

impl Summary {
    pub fn ranking(&self, role: PartyRole) -> Option<&Ranking> {
        self.rankings.iter().find(|r| r.role == role)
    }
}
