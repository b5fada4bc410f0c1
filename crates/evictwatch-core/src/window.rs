//! Selection and comparison date windows.
//!
//! The user picks a closed interval `[start, end]` on filing dates. The
//! comparison window has the same length and ends on `start`:
//! `[start - (end - start), start]`. Both bounds of both windows are inclusive,
//! so the boundary day `start` belongs to both.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which end of a requested window failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bound {
    Start,
    End,
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Start => f.write_str("start"),
            Bound::End => f.write_str("end"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WindowError {
    #[error("start date {start} is after end date {end}")]
    Inverted { start: NaiveDate, end: NaiveDate },

    #[error("{bound} date {requested} is outside the available data (limit {limit})")]
    OutOfRange {
        bound: Bound,
        requested: NaiveDate,
        limit: NaiveDate,
    },

    #[error("dataset has no filings to select a window from")]
    EmptyDataset,
}

/// Earliest and latest filing dates observed in a record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateSpan {
    pub min: NaiveDate,
    pub max: NaiveDate,
}

/// A closed interval of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Window {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Window {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, WindowError> {
        if start > end {
            return Err(WindowError::Inverted { start, end });
        }
        Ok(Self { start, end })
    }

    /// `end - start`. Zero for a single-day window.
    pub fn duration(&self) -> Duration {
        self.end.signed_duration_since(self.start)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// The equal-length window immediately preceding this one, sharing its
    /// start day as the comparison end.
    pub fn comparison(&self) -> Window {
        let start = self
            .start
            .checked_sub_signed(self.duration())
            .unwrap_or(NaiveDate::MIN);
        Window {
            start,
            end: self.start,
        }
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} .. {}", self.start, self.end)
    }
}

/// Current window plus its comparison window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowPair {
    pub current: Window,
    pub comparison: Window,
}

/// Validate a requested window against the observed data span and derive the
/// comparison window.
pub fn select_windows(
    span: DateSpan,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<WindowPair, WindowError> {
    let current = Window::new(start, end)?;
    if start < span.min {
        return Err(WindowError::OutOfRange {
            bound: Bound::Start,
            requested: start,
            limit: span.min,
        });
    }
    if end > span.max {
        return Err(WindowError::OutOfRange {
            bound: Bound::End,
            requested: end,
            limit: span.max,
        });
    }
    Ok(WindowPair {
        current,
        comparison: current.comparison(),
    })
}

/// `window_days` before `end`, but never earlier than `min`.
pub fn trailing_start(end: NaiveDate, min: NaiveDate, window_days: u32) -> NaiveDate {
    end.checked_sub_signed(Duration::days(i64::from(window_days)))
        .unwrap_or(min)
        .max(min)
}

/// User-facing inputs to one summary computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub counties: BTreeSet<String>,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Selection {
    /// Default selection: the last `window_days` days of data, clamped to the
    /// earliest filing so it always validates.
    pub fn default_for(span: DateSpan, counties: &[String], window_days: u32) -> Self {
        Self {
            counties: counties.iter().cloned().collect(),
            start: trailing_start(span.max, span.min, window_days),
            end: span.max,
        }
    }

    pub fn windows(&self, span: DateSpan) -> Result<WindowPair, WindowError> {
        select_windows(span, self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn span() -> DateSpan {
        DateSpan {
            min: date(2023, 1, 1),
            max: date(2023, 12, 31),
        }
    }

    #[test]
    fn comparison_precedes_with_same_duration() {
        let pair = select_windows(span(), date(2023, 6, 11), date(2023, 6, 20)).unwrap();
        assert_eq!(pair.comparison.end, date(2023, 6, 11));
        assert_eq!(pair.comparison.start, date(2023, 6, 2));
        assert_eq!(pair.comparison.duration(), pair.current.duration());
    }

    #[test]
    fn single_day_window_compares_to_itself() {
        let pair = select_windows(span(), date(2023, 3, 5), date(2023, 3, 5)).unwrap();
        assert_eq!(pair.current.duration(), Duration::zero());
        assert_eq!(pair.comparison, pair.current);
    }

    #[test]
    fn comparison_may_extend_before_data() {
        let pair = select_windows(span(), date(2023, 1, 1), date(2023, 1, 31)).unwrap();
        assert_eq!(pair.comparison.start, date(2022, 12, 2));
    }

    #[test]
    fn inverted_window_rejected() {
        let err = select_windows(span(), date(2023, 5, 2), date(2023, 5, 1)).unwrap_err();
        assert!(matches!(err, WindowError::Inverted { .. }));
    }

    #[test]
    fn start_before_data_names_start_bound() {
        let err = select_windows(span(), date(2022, 12, 31), date(2023, 5, 1)).unwrap_err();
        assert_eq!(
            err,
            WindowError::OutOfRange {
                bound: Bound::Start,
                requested: date(2022, 12, 31),
                limit: date(2023, 1, 1),
            }
        );
    }

    #[test]
    fn end_after_data_names_end_bound() {
        let err = select_windows(span(), date(2023, 5, 1), date(2024, 1, 1)).unwrap_err();
        assert!(matches!(
            err,
            WindowError::OutOfRange {
                bound: Bound::End,
                ..
            }
        ));
        assert!(err.to_string().starts_with("end date 2024-01-01"));
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let w = Window::new(date(2023, 1, 1), date(2023, 1, 2)).unwrap();
        assert!(w.contains(date(2023, 1, 1)));
        assert!(w.contains(date(2023, 1, 2)));
        assert!(!w.contains(date(2023, 1, 3)));
    }

    #[test]
    fn default_selection_covers_trailing_days() {
        let sel = Selection::default_for(span(), &["Multnomah".to_string()], 90);
        assert_eq!(sel.end, date(2023, 12, 31));
        assert_eq!(sel.start, date(2023, 10, 2));
        assert!(sel.windows(span()).is_ok());
    }

    #[test]
    fn trailing_start_never_precedes_min() {
        assert_eq!(trailing_start(date(2023, 3, 31), date(2023, 1, 1), 30), date(2023, 3, 1));
        assert_eq!(trailing_start(date(2023, 1, 10), date(2023, 1, 1), 30), date(2023, 1, 1));
        assert_eq!(trailing_start(date(2023, 1, 10), date(2023, 1, 1), 0), date(2023, 1, 10));
    }

    #[test]
    fn default_selection_clamps_to_short_span() {
        let short = DateSpan {
            min: date(2023, 12, 1),
            max: date(2023, 12, 31),
        };
        let sel = Selection::default_for(short, &[], 90);
        assert_eq!(sel.start, date(2023, 12, 1));
        assert!(sel.windows(short).is_ok());
    }
}
