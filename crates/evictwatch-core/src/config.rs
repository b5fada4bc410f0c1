use serde::{Deserialize, Serialize};

use crate::window::{DateSpan, Selection};

pub const DEFAULT_WINDOW_DAYS: u32 = 90;
pub const DEFAULT_TOP_N: usize = 10;
pub const DEFAULT_COUNTIES: &[&str] = &["Multnomah", "Washington", "Clackamas"];

/// Tunables for the summary view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SummaryConfig {
    /// Length of the default selection, counted back from the latest filing.
    pub default_window_days: u32,
    /// Rows per party ranking.
    pub top_n: usize,
    pub default_counties: Vec<String>,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            default_window_days: DEFAULT_WINDOW_DAYS,
            top_n: DEFAULT_TOP_N,
            default_counties: DEFAULT_COUNTIES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl SummaryConfig {
    pub fn default_selection(&self, span: DateSpan) -> Selection {
        Selection::default_for(span, &self.default_counties, self.default_window_days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SummaryConfig::default();
        assert_eq!(config.default_window_days, 90);
        assert_eq!(config.top_n, 10);
        assert_eq!(config.default_counties.len(), 3);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: SummaryConfig = serde_json::from_str(r#"{"topN": 5}"#).unwrap();
        assert_eq!(config.top_n, 5);
        assert_eq!(config.default_window_days, 90);
        assert!(config.default_counties.contains(&"Washington".to_string()));
    }

    #[test]
    fn window_days_option() {
        let config: SummaryConfig =
            serde_json::from_str(r#"{"defaultWindowDays": 30, "defaultCounties": []}"#).unwrap();
        assert_eq!(config.default_window_days, 30);
        assert!(config.default_counties.is_empty());
    }
}
