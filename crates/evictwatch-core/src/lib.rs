pub mod batch;
pub mod config;
pub mod filing;
pub mod party;
pub mod schema;
pub mod window;

pub use config::SummaryConfig;
pub use filing::{Exclusions, Filing, FilingSet, PartyRole};
pub use party::{normalize_parties, split_parties};
pub use schema::evictions;
pub use window::{Bound, DateSpan, Selection, Window, WindowError, WindowPair, select_windows};
