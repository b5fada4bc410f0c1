//! Splitting of multi-valued party cells into lists of names.
//!
//! Party columns (landlords, property managers, lawyers, agents) hold zero or
//! more names per filing. Sources encode them in a few ways:
//!
//! - A native JSON array: `["Smith Properties LLC", "Jones"]`
//! - A list literal stored as text, either JSON or single-quoted:
//!   `"['Smith Properties LLC', 'Jones']"`
//! - A plain string, possibly `;`-delimited: `"Smith Properties LLC; Jones"`
//!
//! Commas are never delimiters in plain strings: business names such as
//! `"Smith, Jones & Co, LLC"` contain them.

/// Split a raw text cell into party names.
///
/// Output is normalised with [`normalize_parties`].
pub fn split_parties(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.starts_with('[') && trimmed.ends_with(']') {
        if let Some(items) = parse_list_literal(trimmed) {
            return normalize_parties(items);
        }
    }
    normalize_parties(trimmed.split(';'))
}

/// Trim names, drop empty and placeholder entries, and remove repeats
/// while keeping first-seen order.
pub fn normalize_parties<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for item in items {
        let name = item.as_ref().trim();
        if name.is_empty() || is_placeholder(name) {
            continue;
        }
        if !out.iter().any(|existing| existing == name) {
            out.push(name.to_string());
        }
    }
    out
}

/// Null markers that leak into text exports of list columns.
fn is_placeholder(name: &str) -> bool {
    matches!(name, "None" | "null" | "nan" | "NaN")
}

/// Parse `[...]` as a JSON array first, then as a quoted list literal.
fn parse_list_literal(s: &str) -> Option<Vec<String>> {
    if let Ok(items) = serde_json::from_str::<Vec<Option<String>>>(s) {
        return Some(items.into_iter().flatten().collect());
    }
    parse_quoted_list(&s[1..s.len() - 1])
}

/// Hand parser for `'a', "b", 'c\'d'` style bodies.
///
/// Bare tokens (e.g. `None`) are kept and later filtered as placeholders.
/// Returns `None` on an unterminated quote so the caller can fall back to
/// treating the cell as a plain string.
fn parse_quoted_list(body: &str) -> Option<Vec<String>> {
    let mut items = Vec::new();
    let mut chars = body.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        let Some(&first) = chars.peek() else {
            break;
        };

        let mut item = String::new();
        if first == '\'' || first == '"' {
            chars.next();
            let mut closed = false;
            while let Some(c) = chars.next() {
                match c {
                    '\\' => {
                        if let Some(escaped) = chars.next() {
                            item.push(escaped);
                        }
                    }
                    c if c == first => {
                        closed = true;
                        break;
                    }
                    c => item.push(c),
                }
            }
            if !closed {
                return None;
            }
            while chars.next_if(|c| *c != ',').is_some() {}
        } else {
            while let Some(c) = chars.next_if(|c| *c != ',') {
                item.push(c);
            }
        }
        items.push(item);

        if chars.next().is_none() {
            break;
        }
    }

    Some(items)
}
