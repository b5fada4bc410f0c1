//! Arrow export of summary tables for display or downstream tooling.

use std::sync::Arc;

use arrow::array::{ArrayRef, StringArray, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;

use crate::EngineError;
use crate::summary::Ranking;

impl Ranking {
    /// Two columns: the party column name (e.g. `evicting_landlords`) and `count`.
    pub fn to_record_batch(&self) -> Result<RecordBatch, EngineError> {
        let schema = Schema::new(vec![
            Field::new(self.role.column(), DataType::Utf8, false),
            Field::new("count", DataType::UInt64, false),
        ]);
        let names: StringArray = self.rows.iter().map(|r| Some(r.name.as_str())).collect();
        let counts: UInt64Array = self.rows.iter().map(|r| Some(r.count)).collect();
        let columns: Vec<ArrayRef> = vec![Arc::new(names), Arc::new(counts)];
        Ok(RecordBatch::try_new(Arc::new(schema), columns)?)
    }
}
