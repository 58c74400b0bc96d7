pub mod config;
pub mod paths;
pub mod pipeline;
pub mod sampler;
pub mod stages;

pub use config::Config;
pub use pipeline::{ConservationPipeline, PipelineReport, PipelineRequest, StatisticsOutcome};
