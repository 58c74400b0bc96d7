//! Reading `esl-alistat` reports and writing per-residue feature tables.

pub mod alistat;
pub mod features;

pub use alistat::{read_statistics, ColumnStatistics};
pub use features::{render_features, write_feature};
