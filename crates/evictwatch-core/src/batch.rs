//! Arrow export of filing records in the declared schema.

use std::sync::Arc;

use arrow::array::{
    ArrayRef, Date32Builder, ListBuilder, StringBuilder, StringDictionaryBuilder,
};
use arrow::datatypes::Int32Type;
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use chrono::{Datelike, NaiveDate};

use crate::filing::{Filing, PartyRole};
use crate::schema::evictions;

/// Days from 0001-01-01 (CE) to 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Days since the Unix epoch, as stored in `Date32`.
pub fn date32(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

/// Build a RecordBatch with one row per filing, columns in
/// [`evictions::COLUMNS`] order.
pub fn filings_to_batch(filings: &[&Filing]) -> Result<RecordBatch, ArrowError> {
    let text = |f: fn(&Filing) -> Option<&str>| -> ArrayRef {
        let mut b = StringBuilder::new();
        for &filing in filings {
            b.append_option(f(filing));
        }
        Arc::new(b.finish())
    };
    let category = |f: fn(&Filing) -> Option<&str>| -> ArrayRef {
        let mut b = StringDictionaryBuilder::<Int32Type>::new();
        for &filing in filings {
            match f(filing) {
                Some(v) => {
                    b.append_value(v);
                }
                None => b.append_null(),
            }
        }
        Arc::new(b.finish())
    };
    let dates = |f: fn(&Filing) -> Option<NaiveDate>| -> ArrayRef {
        let mut b = Date32Builder::new();
        for &filing in filings {
            b.append_option(f(filing).map(date32));
        }
        Arc::new(b.finish())
    };
    let parties = |role: PartyRole| -> ArrayRef {
        let mut b = ListBuilder::new(StringBuilder::new());
        for filing in filings {
            for name in filing.parties(role) {
                b.values().append_value(name);
            }
            b.append(true);
        }
        Arc::new(b.finish())
    };

    let columns: Vec<ArrayRef> = vec![
        text(|f| Some(f.case_code.as_str())),
        dates(|f| Some(f.filed_date)),
        text(|f| f.case_description.as_deref()),
        category(|f| f.status.as_deref()),
        category(|f| f.county.as_deref()),
        text(|f| f.city.as_deref()),
        text(|f| f.directional.as_deref()),
        text(|f| f.zip.as_deref()),
        parties(PartyRole::PropertyManager),
        parties(PartyRole::Landlord),
        parties(PartyRole::Lawyer),
        parties(PartyRole::Agent),
        dates(|f| f.first_appearance_date),
        dates(|f| f.next_appearance_date),
        dates(|f| f.last_appearance_date),
    ];

    RecordBatch::try_new(Arc::new(evictions::filing_schema()), columns)
}
