pub mod document;
pub mod table;

pub use document::StatsDocument;
pub use table::FeatureTable;
