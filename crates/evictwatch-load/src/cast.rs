//! Casting of raw cells onto the declared column types.
//!
//! Rows arrive as JSON objects regardless of source encoding: CSV cells are
//! strings (empty cells become `null`), JSON cells are whatever the file held.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use evictwatch_core::{Exclusions, Filing, FilingSet, PartyRole, normalize_parties, split_parties};
use serde_json::{Map, Value};

use crate::LoadError;

pub type Row = Map<String, Value>;

static NULL: Value = Value::Null;

/// Text cell. Numbers are rendered (zip codes often arrive as numbers).
pub fn cast_text(value: &Value) -> Result<Option<String>, String> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => {
            let s = s.trim();
            Ok((!s.is_empty()).then(|| s.to_string()))
        }
        Value::Number(n) => Ok(Some(render_number(n))),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Array(_) | Value::Object(_) => Err(format!("expected text, got {value}")),
    }
}

/// Date cell: `YYYY-MM-DD`, an ISO/RFC 3339 datetime, or epoch milliseconds.
pub fn cast_date(value: &Value) -> Result<Option<NaiveDate>, String> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => match n.as_i64() {
            Some(ms) => from_epoch_millis(ms).map(Some),
            None => Err(format!("expected integer epoch milliseconds, got {n}")),
        },
        Value::String(s) => parse_date_str(s.trim()),
        other => Err(format!("expected date, got {other}")),
    }
}

/// Multi-valued party cell.
pub fn cast_parties(value: &Value) -> Result<Vec<String>, String> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::String(s) => Ok(split_parties(s)),
        Value::Array(items) => {
            let mut names = Vec::with_capacity(items.len());
            for item in items {
                if let Some(name) = cast_text(item)? {
                    names.push(name);
                }
            }
            Ok(normalize_parties(names))
        }
        other => Err(format!("expected list of names, got {other}")),
    }
}

fn render_number(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        _ => n.to_string(),
    }
}

fn parse_date_str(s: &str) -> Result<Option<NaiveDate>, String> {
    if s.is_empty() || s == "NaT" {
        return Ok(None);
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(Some(d));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(Some(dt.date_naive()));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(Some(dt.date()));
        }
    }
    if let Ok(ms) = s.parse::<i64>() {
        return from_epoch_millis(ms).map(Some);
    }
    Err(format!("unrecognised date {s:?}"))
}

fn from_epoch_millis(ms: i64) -> Result<NaiveDate, String> {
    DateTime::from_timestamp_millis(ms)
        .map(|dt| dt.date_naive())
        .ok_or_else(|| format!("epoch milliseconds {ms} out of range"))
}

enum Outcome {
    Accepted(Filing),
    MissingFiledDate,
    MissingCaseCode,
}

/// Cast one raw row into a filing.
fn cast_row(row: &Row, index: usize) -> Result<Outcome, LoadError> {
    let cell = |column: &str| row.get(column).unwrap_or(&NULL);
    let err = |column: &'static str| {
        move |reason: String| LoadError::Cast {
            row: index,
            column,
            reason,
        }
    };
    let text = |column: &'static str| cast_text(cell(column)).map_err(err(column));
    let date = |column: &'static str| cast_date(cell(column)).map_err(err(column));
    let parties = |role: PartyRole| cast_parties(cell(role.column())).map_err(err(role.column()));

    let Some(case_code) = text("case_code")? else {
        return Ok(Outcome::MissingCaseCode);
    };
    let Some(filed_date) = date("filed_date")? else {
        return Ok(Outcome::MissingFiledDate);
    };

    Ok(Outcome::Accepted(Filing {
        case_code,
        filed_date,
        case_description: text("case_description")?,
        status: text("status")?,
        county: text("county")?,
        city: text("city")?,
        directional: text("directional")?,
        zip: text("zip")?,
        evicting_property_managers: parties(PartyRole::PropertyManager)?,
        evicting_landlords: parties(PartyRole::Landlord)?,
        evicting_lawyers: parties(PartyRole::Lawyer)?,
        evicting_agents: parties(PartyRole::Agent)?,
        first_appearance_date: date("first_appearance_date")?,
        next_appearance_date: date("next_appearance_date")?,
        last_appearance_date: date("last_appearance_date")?,
    }))
}

/// Cast all rows. Any malformed cell fails the whole load; rows without a
/// case code or filing date are excluded and counted.
pub fn cast_rows(rows: &[Row]) -> Result<FilingSet, LoadError> {
    let mut filings = Vec::with_capacity(rows.len());
    let mut exclusions = Exclusions::default();

    for (index, row) in rows.iter().enumerate() {
        match cast_row(row, index)? {
            Outcome::Accepted(filing) => filings.push(filing),
            Outcome::MissingFiledDate => exclusions.missing_filed_date += 1,
            Outcome::MissingCaseCode => exclusions.missing_case_code += 1,
        }
    }

    Ok(FilingSet::from_filings(filings, exclusions))
}
