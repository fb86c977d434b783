//! Form persistence.
//!
//! [`FormStore`] is the storage interface; [`SqliteFormStore`] keeps whole
//! documents as JSON rows in a single SQLite file.

mod sqlite;
mod traits;
mod types;

pub use sqlite::SqliteFormStore;
pub use traits::FormStore;
pub use types::{FormFilter, FormSummary, StoreMetadata, FORMAT_VERSION};
