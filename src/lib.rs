pub mod error;
pub mod export;
pub mod flatten;
pub mod stats;

pub use error::FlattenError;
pub use flatten::{flatten_or_empty, flatten_stats_file, FlattenedRecord};
