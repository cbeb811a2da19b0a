//! Tester Reports
//!
//! Runs a scenario through the SRS generator and the correlation analysis and
//! renders the outcome as text or JSON.

use anyhow::{Context, Result};
use serde::Serialize;
use srs::{
    correlation_matrix, generate_batch, CorrelatedPair, CorrelationMatrix, GenerationOptions,
    MappingInfo, MappingPolicy, SrsConfig,
};
use std::fmt;
use tracing::{info, warn};

use crate::scenario::Scenario;

/// Per-UE entry of a report
#[derive(Debug, Serialize)]
pub struct UeReport {
    pub label: String,
    pub config: SrsConfig,
    pub info: MappingInfo,
}

/// Outcome of one scenario run
#[derive(Debug, Serialize)]
pub struct Report {
    pub subframe: u32,
    pub threshold: f64,
    pub ues: Vec<UeReport>,
    pub correlation: Vec<Vec<f64>>,
    pub pairs: Vec<CorrelatedPair>,
    #[serde(skip)]
    matrix: CorrelationMatrix,
}

impl Report {
    /// Generate every UE of the scenario and correlate the symbols
    pub fn run(scenario: &Scenario) -> Result<Self> {
        let options = GenerationOptions {
            transform_size: scenario.transform_size,
            policy: if scenario.strict { MappingPolicy::Strict } else { MappingPolicy::Permissive },
        };

        let labels = scenario.labels();
        let configs = scenario.configs();

        info!("Generating SRS for subframe {} ({} UEs)", scenario.subframe, configs.len());
        info!("  Transform size: {}", options.transform_size);
        info!("  Mapping policy: {:?}", options.policy);

        let mut ues = Vec::with_capacity(configs.len());
        let mut samples = Vec::with_capacity(configs.len());
        let results = generate_batch(&configs, scenario.subframe, options);
        for ((label, config), result) in labels.into_iter().zip(configs).zip(results) {
            let (signal, info) = result
                .with_context(|| format!("{}: SRS generation failed", label))?
                .into_parts();
            samples.push(signal);
            ues.push(UeReport { label, config, info });
        }

        let matrix = correlation_matrix(&samples)?;
        let pairs = matrix.highlight_pairs(scenario.threshold);
        if !pairs.is_empty() {
            warn!("{} UE pairs exceed correlation threshold {}", pairs.len(), scenario.threshold);
        }

        Ok(Self {
            subframe: scenario.subframe,
            threshold: scenario.threshold,
            ues,
            correlation: matrix.rows(),
            pairs,
            matrix,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Generating SRS for subframe {}\n", self.subframe)?;
        for ue in &self.ues {
            writeln!(f, "{}: {}", ue.label, ue.config)?;
            writeln!(f, "{}  {}", " ".repeat(ue.label.len()), ue.info)?;
        }

        writeln!(f, "\nCorrelation matrix (magnitude):")?;
        write!(f, "{}", self.matrix)?;

        if self.pairs.is_empty() {
            return writeln!(f, "\nNo highly correlated pairs detected.");
        }

        writeln!(f, "\nHighly correlated pairs (>{}):", self.threshold)?;
        for pair in &self.pairs {
            writeln!(
                f,
                "  {} vs {}: {:.3}",
                self.ues[pair.i].label, self.ues[pair.j].label, pair.value
            )?;
        }
        Ok(())
    }
}
