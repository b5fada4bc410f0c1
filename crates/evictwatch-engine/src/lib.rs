//! Filter & aggregate engine over an immutable filing set.

mod error;
pub use error::EngineError;

pub mod aggregate;
pub mod snapshot;
pub mod summary;
pub mod table;

pub use aggregate::{compute_summary, delta_percent, filter_counties, filter_window, rank_parties};
pub use snapshot::{Engine, Snapshot};
pub use summary::{Delta, RankedParty, Ranking, Summary};
