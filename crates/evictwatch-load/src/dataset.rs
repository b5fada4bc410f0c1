//! Known datasets and resolution of where and how to read them.

use std::fmt;
use std::path::PathBuf;

use evictwatch_core::evictions;
use evictwatch_core::schema::ColumnType;

use crate::LoadError;

pub const EVICTIONS_URL: &str = "https://storage.googleapis.com/depdx_data/evictions.json";

/// A named dataset with its default location and declared column types.
#[derive(Debug)]
pub struct DatasetSpec {
    pub name: &'static str,
    pub location: &'static str,
    pub columns: &'static [(&'static str, ColumnType)],
}

pub const DATASETS: &[DatasetSpec] = &[DatasetSpec {
    name: "evictions",
    location: EVICTIONS_URL,
    columns: evictions::COLUMNS,
}];

/// Look up a dataset by key.
pub fn dataset(name: &str) -> Result<&'static DatasetSpec, LoadError> {
    DATASETS
        .iter()
        .find(|d| d.name == name)
        .ok_or_else(|| LoadError::UnknownDataset(name.to_string()))
}

/// Supported encodings, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Csv,
    Json,
}

impl Format {
    /// Infer the format from the extension of a URL or path.
    ///
    /// Query strings and fragments are ignored; matching is case-insensitive.
    pub fn from_location(location: &str) -> Result<Self, LoadError> {
        let path = location
            .split(['?', '#'])
            .next()
            .unwrap_or(location);
        let file_name = path.rsplit('/').next().unwrap_or(path);
        let ext = match file_name.rsplit_once('.') {
            Some((_, ext)) => ext.to_ascii_lowercase(),
            None => String::new(),
        };
        match ext.as_str() {
            "csv" => Ok(Format::Csv),
            "json" => Ok(Format::Json),
            _ => Err(LoadError::UnsupportedFormat(ext)),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Csv => f.write_str("csv"),
            Format::Json => f.write_str("json"),
        }
    }
}

/// Where the bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Remote(String),
    Local(PathBuf),
}

impl Source {
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            Source::Remote(location.to_string())
        } else {
            Source::Local(PathBuf::from(location))
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Remote(url) => f.write_str(url),
            Source::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

/// A dataset key resolved to a concrete source and encoding.
#[derive(Debug)]
pub struct Resolved {
    pub dataset: &'static DatasetSpec,
    pub source: Source,
    pub format: Format,
}

/// Resolve a dataset key, optionally reading it from `location` instead of
/// its registered default.
pub fn resolve(name: &str, location: Option<&str>) -> Result<Resolved, LoadError> {
    let dataset = dataset(name)?;
    let location = location.unwrap_or(dataset.location);
    let format = Format::from_location(location)?;
    Ok(Resolved {
        dataset,
        source: Source::parse(location),
        format,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evictions_resolves_to_remote_json() {
        let resolved = resolve("evictions", None).unwrap();
        assert_eq!(resolved.format, Format::Json);
        assert_eq!(resolved.source, Source::Remote(EVICTIONS_URL.to_string()));
        assert_eq!(resolved.dataset.columns.len(), 15);
    }

    #[test]
    fn unknown_dataset() {
        let err = resolve("foreclosures", None).unwrap_err();
        assert!(matches!(err, LoadError::UnknownDataset(ref n) if n == "foreclosures"));
    }

    #[test]
    fn override_location_changes_format() {
        let resolved = resolve("evictions", Some("/tmp/evictions.CSV")).unwrap();
        assert_eq!(resolved.format, Format::Csv);
        assert_eq!(
            resolved.source,
            Source::Local(PathBuf::from("/tmp/evictions.CSV"))
        );
    }

    #[test]
    fn query_string_ignored() {
        assert_eq!(
            Format::from_location("https://example.org/data.csv?alt=media#x").unwrap(),
            Format::Csv
        );
    }

    #[test]
    fn unsupported_extension() {
        let err = Format::from_location("https://example.org/evictions.parquet").unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat(ref e) if e == "parquet"));
    }

    #[test]
    fn missing_extension() {
        let err = Format::from_location("https://example.org/evictions").unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat(ref e) if e.is_empty()));
    }

    #[test]
    fn dotted_host_without_file_extension() {
        assert!(Format::from_location("https://storage.googleapis.com/").is_err());
    }
}
