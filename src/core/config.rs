use serde::{Deserialize, Serialize};
use std::path::Path;

/// Seed used for every sampling run so results are reproducible.
pub const DEFAULT_SAMPLING_SEED: u64 = 666;

/// Value written for every residue when no conservation signal is available.
pub const DEFAULT_SENTINEL: &str = "-1000.0";

pub const DEFAULT_FREQGAP_SUFFIX: &str = ".freqgap";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tools: ToolsConfig,
    pub sampling: SamplingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Prefix prepended verbatim to each HMMER executable name
    pub hmmer_dir: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    pub seed: u64,
    /// Alignments with more sequences than this are subsampled
    pub max_seqs: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub sentinel: String,
    pub freqgap_suffix: String,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SAMPLING_SEED,
            max_seqs: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            sentinel: DEFAULT_SENTINEL.to_string(),
            freqgap_suffix: DEFAULT_FREQGAP_SUFFIX.to_string(),
        }
    }
}

pub fn default_config() -> Config {
    Config::default()
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, crate::ConservationError> {
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)
        .map_err(|e| crate::ConservationError::Config(format!("Failed to parse config: {}", e)))?;
    Ok(config)
}

pub fn save_config<P: AsRef<Path>>(path: P, config: &Config) -> Result<(), crate::ConservationError> {
    let contents = toml::to_string_pretty(config)
        .map_err(|e| crate::ConservationError::Config(format!("Failed to serialize config: {}", e)))?;
    std::fs::write(path, contents)?;
    Ok(())
}
