//! TOML Scenario Files
//!
//! A scenario lists the UEs to generate and the shared analysis settings:
//!
//! ```toml
//! subframe = 4
//!
//! [[ue]]
//! label = "UE0"
//! cell_id = 0
//! bandwidth_config = 2
//! subframe_config = 2
//! b_hop = 1
//! group_hopping_enabled = true
//! sequence_hopping_enabled = false
//! transmission_comb = 0
//! cyclic_shift = 0.0
//! srs_bandwidth = 0
//! n_ul_rb = 50
//! ```

use serde::{Deserialize, Serialize};
use srs::{SrsConfig, DEFAULT_CORRELATION_THRESHOLD, DEFAULT_TRANSFORM_SIZE};

/// Scenario description
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Scenario {
    /// Subframe shared by all UEs
    #[serde(default = "default_subframe")]
    pub subframe: u32,
    /// IDFT size
    #[serde(default = "default_transform_size")]
    pub transform_size: usize,
    /// Correlation threshold for pair highlighting
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Report clipping and dropped samples as errors
    #[serde(default)]
    pub strict: bool,
    /// UEs to generate
    #[serde(rename = "ue", default)]
    pub ues: Vec<UeEntry>,
}

/// One UE of a scenario
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UeEntry {
    /// Display label, defaults to "UE<index>"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Validated SRS configuration
    #[serde(flatten)]
    pub config: SrsConfig,
}

fn default_subframe() -> u32 {
    4
}

fn default_transform_size() -> usize {
    DEFAULT_TRANSFORM_SIZE
}

fn default_threshold() -> f64 {
    DEFAULT_CORRELATION_THRESHOLD
}

impl Scenario {
    /// Load a scenario from a TOML file
    pub fn from_toml_file(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse a scenario from TOML text
    pub fn from_toml_str(contents: &str) -> anyhow::Result<Self> {
        let scenario: Scenario = toml::from_str(contents)?;
        if scenario.ues.is_empty() {
            return Err(anyhow::anyhow!("Scenario defines no UEs"));
        }
        Ok(scenario)
    }

    /// Built-in four-UE suite
    pub fn reference() -> anyhow::Result<Self> {
        let ues = srs::batch::reference_suite()?
            .into_iter()
            .map(|config| UeEntry { label: None, config })
            .collect();

        Ok(Self {
            subframe: default_subframe(),
            transform_size: default_transform_size(),
            threshold: default_threshold(),
            strict: false,
            ues,
        })
    }

    /// Labels of all UEs, in scenario order
    pub fn labels(&self) -> Vec<String> {
        self.ues.iter()
            .enumerate()
            .map(|(i, ue)| ue.label.clone().unwrap_or_else(|| format!("UE{}", i)))
            .collect()
    }

    pub fn configs(&self) -> Vec<SrsConfig> {
        self.ues.iter().map(|ue| ue.config.clone()).collect()
    }
}
