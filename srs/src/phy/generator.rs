//! SRS Symbol Generation
//!
//! Ties the PHY building blocks together:
//! gating -> hopping -> Zadoff-Chu -> cyclic shift -> comb mapping -> IDFT.

use super::bandwidth::SubcarrierAllocation;
use super::cyclic_shift::apply_cyclic_shift;
use super::grid::map_to_frequency_grid;
use super::hopping::{group_and_sequence_hopping, HoppingState};
use super::ofdm::InverseTransform;
use super::zadoff_chu::generate_zadoff_chu;
use crate::config::SrsConfig;
use crate::SrsError;
use num_complex::Complex64;
use rustfft::FftPlanner;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, PoisonError};
use tracing::{debug, trace};

/// Default IDFT size
pub const DEFAULT_TRANSFORM_SIZE: usize = 2048;

/// Handling of bandwidth clipping and out-of-window samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MappingPolicy {
    /// Clip and drop silently (reference test vector behaviour)
    #[default]
    Permissive,
    /// Report clipping, dropped samples and short base sequences as errors
    Strict,
}

/// Per-call generation options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationOptions {
    /// IDFT size
    pub transform_size: usize,
    /// Mapping policy
    pub policy: MappingPolicy,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            transform_size: DEFAULT_TRANSFORM_SIZE,
            policy: MappingPolicy::Permissive,
        }
    }
}

impl GenerationOptions {
    pub fn with_transform_size(transform_size: usize) -> Self {
        Self { transform_size, ..Self::default() }
    }

    pub fn strict(mut self) -> Self {
        self.policy = MappingPolicy::Strict;
        self
    }
}

/// Metadata describing how an SRS symbol was mapped
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MappingInfo {
    pub subframe_index: u32,
    pub slot_index: u64,
    /// Zadoff-Chu root index
    pub root_index: u32,
    /// Cyclic shift in radians
    pub alpha: f64,
    /// Occupied subcarriers from the bandwidth configuration
    pub m_sc: usize,
    /// Transmission comb k_TC
    pub comb: usize,
    pub transform_size: usize,
    /// Starting subcarrier in the centered grid
    pub k0: i64,
    pub hopping: HoppingState,
}

impl MappingInfo {
    /// One-line summary for logs and reports
    pub fn summary(&self) -> String {
        format!(
            "subframe={} slot={} root={} alpha={:.3} M_sc={} comb={} k0={}",
            self.subframe_index, self.slot_index, self.root_index, self.alpha, self.m_sc, self.comb, self.k0
        )
    }
}

impl fmt::Display for MappingInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

/// One generated SRS symbol
#[derive(Debug, Clone)]
pub struct SrsSignal {
    /// Time-domain samples, length = transform size
    pub samples: Vec<Complex64>,
    pub info: MappingInfo,
}

impl SrsSignal {
    pub fn into_parts(self) -> (Vec<Complex64>, MappingInfo) {
        (self.samples, self.info)
    }
}

/// SRS generator
///
/// Keeps planned inverse transforms per size; safe to share between threads.
#[derive(Debug, Default)]
pub struct SrsGenerator {
    /// IDFT processors by transform size
    transforms: Mutex<HashMap<usize, InverseTransform>>,
}

impl SrsGenerator {
    /// Create a new SRS generator
    pub fn new() -> Self {
        Self::default()
    }

    /// Get (or plan) the inverse transform for a size
    fn transform(&self, size: usize) -> Result<InverseTransform, SrsError> {
        let mut transforms = self.transforms.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(idft) = transforms.get(&size) {
            return Ok(idft.clone());
        }

        let mut planner = FftPlanner::new();
        let idft = InverseTransform::with_planner(&mut planner, size)?;
        transforms.insert(size, idft.clone());
        debug!("Cached {}-point IDFT ({} sizes planned)", size, transforms.len());
        Ok(idft)
    }

    /// Generate the SRS symbol of a subframe with default options
    pub fn generate(&self, config: &SrsConfig, subframe: u32) -> Result<SrsSignal, SrsError> {
        self.generate_with_options(config, subframe, GenerationOptions::default())
    }

    /// Generate the SRS symbol of a subframe
    pub fn generate_with_options(
        &self,
        config: &SrsConfig,
        subframe: u32,
        options: GenerationOptions,
    ) -> Result<SrsSignal, SrsError> {
        if !config.is_active_subframe(subframe) {
            return Err(SrsError::InactiveSubframe {
                subframe,
                periodicity: config.subframe_config(),
            });
        }

        let idft = self.transform(options.transform_size)?;
        let strict = options.policy == MappingPolicy::Strict;

        // Two slots per subframe, SRS uses the first one
        let slot = u64::from(subframe) * 2;

        let hopping = group_and_sequence_hopping(config, slot)?;
        let root_index = hopping.sequence_number;

        let allocation: SubcarrierAllocation = config.bandwidth_allocation();
        if strict && allocation.is_clipped() {
            return Err(SrsError::BandwidthClipped {
                requested: allocation.requested,
                limit: allocation.limit,
            });
        }
        let m_sc = allocation.occupied;

        let n_zc = config.zc_length();
        let mut base = generate_zadoff_chu(root_index, n_zc);
        if base.len() < m_sc {
            if strict {
                return Err(SrsError::SequenceTooShort { available: base.len(), required: m_sc });
            }
            debug!("Base sequence of length {} shorter than M_sc={}, mapping {} samples", n_zc, m_sc, n_zc);
        }
        base.truncate(m_sc);

        let shifted = apply_cyclic_shift(&base, config.alpha());

        let mapping = map_to_frequency_grid(&shifted, config.transmission_comb(), options.transform_size);
        if strict && mapping.dropped > 0 {
            return Err(SrsError::SamplesDropped { dropped: mapping.dropped, total: shifted.len() });
        }

        let samples = idft.process(mapping.grid)?;

        let info = MappingInfo {
            subframe_index: subframe,
            slot_index: slot,
            root_index,
            alpha: config.alpha(),
            m_sc,
            comb: config.transmission_comb().k_tc(),
            transform_size: options.transform_size,
            k0: mapping.k0,
            hopping,
        };

        trace!("Generated SRS cell={} {}", config.cell_id().value(), info);

        Ok(SrsSignal { samples, info })
    }
}

/// Generate the time-domain SRS of a subframe with a 2048-point transform
pub fn generate_srs(config: &SrsConfig, subframe: u32) -> Result<SrsSignal, SrsError> {
    SrsGenerator::new().generate(config, subframe)
}

/// Generate the time-domain SRS of a subframe with explicit options
pub fn generate_srs_with_options(
    config: &SrsConfig,
    subframe: u32,
    options: GenerationOptions,
) -> Result<SrsSignal, SrsError> {
    SrsGenerator::new().generate_with_options(config, subframe, options)
}
