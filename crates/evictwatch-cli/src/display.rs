//! Terminal rendering of summaries, county listings, and single filings.
//!
//! Filings are rendered from a single-row RecordBatch as a grouped,
//! human-readable card with type-aware formatting for scalars and lists.

use arrow::array::*;
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use arrow::util::display::{ArrayFormatter, FormatOptions};
use evictwatch_core::FilingSet;
use evictwatch_engine::{Delta, Summary};

const MAX_LIST_ITEMS: usize = 10;

// ── Card section groupings ──

const CASE: &[&str] = &["case_code", "case_description", "status"];

const LOCATION: &[&str] = &["county", "city", "directional", "zip"];

const DATES: &[&str] = &[
    "filed_date",
    "first_appearance_date",
    "next_appearance_date",
    "last_appearance_date",
];

const PARTIES: &[&str] = &[
    "evicting_landlords",
    "evicting_property_managers",
    "evicting_lawyers",
    "evicting_agents",
];

// ── Public API ──

/// Print the headline metric followed by one table per ranked role.
pub fn print_summary(summary: &Summary) -> anyhow::Result<()> {
    println!("=== Evictions Filed ===");
    println!("  {:<26} {}", "total", format_count(summary.current_total));
    println!("  {:<26} {}", "change", format_delta(summary.delta));
    println!("  {:<26} {}", "selected", summary.current_window);
    println!(
        "  {:<26} {} ({} filed)",
        "previous period",
        summary.comparison_window,
        format_count(summary.comparison_total)
    );
    println!("  {:<26} {}", "counties", summary.counties.join(", "));
    println!();

    for ranking in &summary.rankings {
        println!("Top {}", ranking.role.label());
        if ranking.rows.is_empty() {
            println!("  (none named)");
            println!();
            continue;
        }
        let batch = ranking.to_record_batch()?;
        println!("{}", arrow::util::pretty::pretty_format_batches(&[batch])?);
        println!();
    }
    Ok(())
}

/// Print the county picker options and the observed filing span.
pub fn print_counties(filings: &FilingSet) {
    println!("Counties");
    for county in filings.counties() {
        println!("  {county}");
    }
    println!();
    if let Some(span) = filings.date_span() {
        println!("  {:<26} {}", "earliest filing", span.min);
        println!("  {:<26} {}", "latest filing", span.max);
    }
    println!("  {:<26} {}", "filings", format_count(filings.len() as u64));
    let excluded = filings.exclusions();
    if excluded.total() > 0 {
        println!(
            "  {:<26} {} (no filed date: {}, no case code: {}, duplicate: {})",
            "excluded",
            excluded.total(),
            excluded.missing_filed_date,
            excluded.missing_case_code,
            excluded.duplicate_case_code
        );
    }
}

/// Print a single filing as a vertical card grouped by section.
pub fn print_filing_card(batch: &RecordBatch) -> anyhow::Result<()> {
    let code = get_utf8(batch, "case_code").unwrap_or_default();
    let description = get_utf8(batch, "case_description").unwrap_or_default();

    println!("=== {} ===", code);
    if !description.is_empty() {
        println!("{}", description);
    }
    println!();

    print_section(batch, "Case", CASE);
    print_section(batch, "Location", LOCATION);
    print_section(batch, "Dates", DATES);
    print_section(batch, "Parties", PARTIES);

    Ok(())
}

// ── Formatting ──

/// Thousands-separated count, e.g. `12,345`.
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// A rise in filings is bad news, so the sign is spelled out.
pub fn format_delta(delta: Delta) -> String {
    match delta {
        Delta::Percent(p) if p > 0 => format!("+{p}% vs previous period"),
        Delta::Percent(p) => format!("{p}% vs previous period"),
        Delta::Undefined => "n/a (no filings in selected period)".to_string(),
    }
}

// ── Section rendering ──

fn print_section(batch: &RecordBatch, header: &str, cols: &[&str]) {
    // Skip sections where every column is null.
    let has_data = cols.iter().any(|&col| {
        batch
            .column_by_name(col)
            .is_some_and(|c| !c.is_null(0) && !is_empty_list(c.as_ref()))
    });
    if !has_data {
        return;
    }

    println!("{header}");
    for &col_name in cols {
        let Some(col) = batch.column_by_name(col_name) else {
            continue;
        };
        if col.is_null(0) {
            continue;
        }

        match col.data_type() {
            DataType::List(inner) if inner.data_type() == &DataType::Utf8 => {
                print_list_utf8(col.as_ref(), col_name)
            }
            _ => match ArrayFormatter::try_new(col.as_ref(), &FormatOptions::default()) {
                Ok(fmt) => println!("  {:<26} {}", col_name, fmt.value(0)),
                Err(_) => println!("  {:<26} ({})", col_name, col.data_type()),
            },
        }
    }
    println!();
}

// ── List<Utf8> ──

fn print_list_utf8(col: &dyn Array, col_name: &str) {
    let Some(items) = list_items(col) else {
        return;
    };
    if items.is_empty() {
        return;
    }
    let shown: Vec<&str> = items.iter().take(MAX_LIST_ITEMS).map(String::as_str).collect();
    print!("  {:<26} {}", col_name, shown.join("; "));
    if items.len() > MAX_LIST_ITEMS {
        print!(" ... and {} more", items.len() - MAX_LIST_ITEMS);
    }
    println!();
}

// ── Helpers ──

fn list_items(col: &dyn Array) -> Option<Vec<String>> {
    let list = col.as_any().downcast_ref::<ListArray>()?;
    let values = list.value(0);
    let strings = values.as_any().downcast_ref::<StringArray>()?;
    Some(
        (0..strings.len())
            .filter(|&i| !strings.is_null(i))
            .map(|i| strings.value(i).to_string())
            .collect(),
    )
}

fn is_empty_list(col: &dyn Array) -> bool {
    list_items(col).is_some_and(|items| items.is_empty())
}

fn get_utf8(batch: &RecordBatch, col_name: &str) -> Option<String> {
    let col = batch.column_by_name(col_name)?;
    if col.is_null(0) {
        return None;
    }
    col.as_any()
        .downcast_ref::<StringArray>()
        .map(|arr| arr.value(0).to_string())
}
