//! Eviction filing records and the immutable record set they are loaded into.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::window::DateSpan;

/// One eviction case filing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filing {
    pub case_code: String,
    pub filed_date: NaiveDate,
    pub case_description: Option<String>,
    pub status: Option<String>,
    pub county: Option<String>,
    pub city: Option<String>,
    pub directional: Option<String>,
    pub zip: Option<String>,
    pub evicting_property_managers: Vec<String>,
    pub evicting_landlords: Vec<String>,
    pub evicting_lawyers: Vec<String>,
    pub evicting_agents: Vec<String>,
    pub first_appearance_date: Option<NaiveDate>,
    pub next_appearance_date: Option<NaiveDate>,
    pub last_appearance_date: Option<NaiveDate>,
}

impl Filing {
    /// A filing with only the required fields set.
    pub fn new(case_code: impl Into<String>, filed_date: NaiveDate) -> Self {
        Self {
            case_code: case_code.into(),
            filed_date,
            case_description: None,
            status: None,
            county: None,
            city: None,
            directional: None,
            zip: None,
            evicting_property_managers: Vec::new(),
            evicting_landlords: Vec::new(),
            evicting_lawyers: Vec::new(),
            evicting_agents: Vec::new(),
            first_appearance_date: None,
            next_appearance_date: None,
            last_appearance_date: None,
        }
    }

    pub fn with_county(mut self, county: impl Into<String>) -> Self {
        self.county = Some(county.into());
        self
    }

    pub fn with_parties(mut self, role: PartyRole, names: &[&str]) -> Self {
        let names = names.iter().map(|n| n.to_string()).collect();
        *self.parties_mut(role) = names;
        self
    }

    /// Party names recorded for `role`. Empty when nobody is named.
    pub fn parties(&self, role: PartyRole) -> &[String] {
        match role {
            PartyRole::PropertyManager => &self.evicting_property_managers,
            PartyRole::Landlord => &self.evicting_landlords,
            PartyRole::Lawyer => &self.evicting_lawyers,
            PartyRole::Agent => &self.evicting_agents,
        }
    }

    pub fn parties_mut(&mut self, role: PartyRole) -> &mut Vec<String> {
        match role {
            PartyRole::PropertyManager => &mut self.evicting_property_managers,
            PartyRole::Landlord => &mut self.evicting_landlords,
            PartyRole::Lawyer => &mut self.evicting_lawyers,
            PartyRole::Agent => &mut self.evicting_agents,
        }
    }
}

/// The role a named party plays in a filing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartyRole {
    PropertyManager,
    Landlord,
    Lawyer,
    Agent,
}

impl PartyRole {
    /// Roles that get a top-N table, in display order.
    pub const RANKED: [PartyRole; 3] = [
        PartyRole::Landlord,
        PartyRole::PropertyManager,
        PartyRole::Lawyer,
    ];

    /// Dataset column holding this role's names.
    pub fn column(self) -> &'static str {
        match self {
            PartyRole::PropertyManager => "evicting_property_managers",
            PartyRole::Landlord => "evicting_landlords",
            PartyRole::Lawyer => "evicting_lawyers",
            PartyRole::Agent => "evicting_agents",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PartyRole::PropertyManager => "Property Managers",
            PartyRole::Landlord => "Landlords",
            PartyRole::Lawyer => "Lawyers",
            PartyRole::Agent => "Agents",
        }
    }
}

/// Counts of source rows that were not admitted into a [`FilingSet`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exclusions {
    pub missing_filed_date: usize,
    pub missing_case_code: usize,
    pub duplicate_case_code: usize,
}

impl Exclusions {
    pub fn total(&self) -> usize {
        self.missing_filed_date + self.missing_case_code + self.duplicate_case_code
    }
}

/// The full loaded record set. Never mutated after construction.
#[derive(Debug, Clone, Default)]
pub struct FilingSet {
    filings: Vec<Filing>,
    by_case_code: HashMap<String, usize>,
    exclusions: Exclusions,
}

impl FilingSet {
    pub fn new(filings: Vec<Filing>) -> Self {
        Self::from_filings(filings, Exclusions::default())
    }

    /// Build a set from already-cast filings, keeping the first record for each
    /// `case_code`. Later duplicates are added to `exclusions`.
    pub fn from_filings(filings: Vec<Filing>, mut exclusions: Exclusions) -> Self {
        let mut kept = Vec::with_capacity(filings.len());
        let mut by_case_code = HashMap::with_capacity(filings.len());

        for filing in filings {
            if by_case_code.contains_key(&filing.case_code) {
                exclusions.duplicate_case_code += 1;
                continue;
            }
            by_case_code.insert(filing.case_code.clone(), kept.len());
            kept.push(filing);
        }

        if exclusions.total() > 0 {
            warn!(
                missing_filed_date = exclusions.missing_filed_date,
                missing_case_code = exclusions.missing_case_code,
                duplicate_case_code = exclusions.duplicate_case_code,
                "excluded unusable filings"
            );
        }

        Self {
            filings: kept,
            by_case_code,
            exclusions,
        }
    }

    pub fn len(&self) -> usize {
        self.filings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filings.is_empty()
    }

    pub fn filings(&self) -> &[Filing] {
        &self.filings
    }

    pub fn exclusions(&self) -> Exclusions {
        self.exclusions
    }

    /// Fetch a single filing by its case code.
    pub fn get(&self, case_code: &str) -> Option<&Filing> {
        self.by_case_code.get(case_code).map(|&i| &self.filings[i])
    }

    /// Earliest and latest `filed_date`, or `None` for an empty set.
    pub fn date_span(&self) -> Option<DateSpan> {
        let min = self.filings.iter().map(|f| f.filed_date).min()?;
        let max = self.filings.iter().map(|f| f.filed_date).max()?;
        Some(DateSpan { min, max })
    }

    /// Distinct counties present in the set, sorted.
    pub fn counties(&self) -> Vec<String> {
        self.filings
            .iter()
            .filter_map(|f| f.county.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
