/// Logical column types cast onto a loaded dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Free text, kept as-is.
    Text,
    /// Calendar date.
    Date,
    /// Small fixed-ish vocabulary (status, county).
    Category,
    /// Zero or more party names sharing one filing.
    TextList,
}

impl ColumnType {
    /// The Arrow type used when a column of this kind is exported.
    pub fn arrow_type(self) -> arrow::datatypes::DataType {
        use arrow::datatypes::{DataType, Field};
        use std::sync::Arc;

        match self {
            ColumnType::Text => DataType::Utf8,
            ColumnType::Date => DataType::Date32,
            ColumnType::Category => {
                DataType::Dictionary(Box::new(DataType::Int32), Box::new(DataType::Utf8))
            }
            ColumnType::TextList => {
                DataType::List(Arc::new(Field::new("item", DataType::Utf8, true)))
            }
        }
    }
}

/// Schema definitions for the eviction filings dataset.
pub mod evictions {
    use super::ColumnType;
    use arrow::datatypes::{Field, Schema};

    /// Declared column types, in export order.
    pub const COLUMNS: &[(&str, ColumnType)] = &[
        ("case_code", ColumnType::Text),
        ("filed_date", ColumnType::Date),
        ("case_description", ColumnType::Text),
        ("status", ColumnType::Category),
        ("county", ColumnType::Category),
        ("city", ColumnType::Text),
        ("directional", ColumnType::Text),
        ("zip", ColumnType::Text),
        ("evicting_property_managers", ColumnType::TextList),
        ("evicting_landlords", ColumnType::TextList),
        ("evicting_lawyers", ColumnType::TextList),
        ("evicting_agents", ColumnType::TextList),
        ("first_appearance_date", ColumnType::Date),
        ("next_appearance_date", ColumnType::Date),
        ("last_appearance_date", ColumnType::Date),
    ];

    /// Columns that may never be null once a filing is accepted.
    const REQUIRED: &[&str] = &["case_code", "filed_date"];

    /// Look up the declared type of a column.
    pub fn column_type(name: &str) -> Option<ColumnType> {
        COLUMNS
            .iter()
            .find(|(col, _)| *col == name)
            .map(|(_, ty)| *ty)
    }

    /// Arrow schema for exported filing records.
    pub fn filing_schema() -> Schema {
        Schema::new(
            COLUMNS
                .iter()
                .map(|(name, ty)| Field::new(*name, ty.arrow_type(), !REQUIRED.contains(name)))
                .collect::<Vec<_>>(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{ColumnType, evictions};
    use arrow::datatypes::DataType;

    #[test]
    fn filing_schema_has_expected_fields() {
        let schema = evictions::filing_schema();
        assert_eq!(schema.fields().len(), 15);
        assert!(schema.field_with_name("case_code").is_ok());
        assert!(schema.field_with_name("evicting_agents").is_ok());
    }

    #[test]
    fn required_columns_are_not_nullable() {
        let schema = evictions::filing_schema();
        assert!(!schema.field_with_name("case_code").unwrap().is_nullable());
        assert!(!schema.field_with_name("filed_date").unwrap().is_nullable());
        assert!(schema.field_with_name("zip").unwrap().is_nullable());
    }

    #[test]
    fn categorical_columns_are_dictionaries() {
        let schema = evictions::filing_schema();
        let county = schema.field_with_name("county").unwrap();
        assert!(matches!(county.data_type(), DataType::Dictionary(_, _)));
    }

    #[test]
    fn column_type_lookup() {
        assert_eq!(evictions::column_type("filed_date"), Some(ColumnType::Date));
        assert_eq!(
            evictions::column_type("evicting_lawyers"),
            Some(ColumnType::TextList)
        );
        assert_eq!(evictions::column_type("no_such_column"), None);
    }
}
