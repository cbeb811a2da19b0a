//! LTE Sounding Reference Signal Library
//!
//! This crate generates uplink SRS symbols according to 3GPP TS 36.211 Section 5.5
//! and analyses the cross-correlation between UEs sharing a band.

pub mod phy;
pub mod config;
pub mod correlation;
pub mod batch;

pub use config::{SrsConfig, SrsParams, DEFAULT_ZC_LENGTH};
pub use phy::{
    generate_srs, generate_srs_with_options, GenerationOptions, HoppingState, MappingInfo, MappingPolicy, SrsGenerator,
    SrsSignal, DEFAULT_TRANSFORM_SIZE,
};
pub use correlation::{
    correlation_matrix, normalized_cross_correlation, CorrelatedPair, CorrelationMatrix,
    DEFAULT_CORRELATION_THRESHOLD,
};
pub use batch::generate_batch;

use thiserror::Error;

/// Errors raised by SRS generation and analysis
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SrsError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Subframe {subframe} is not active for this UE (T_srs={periodicity})")]
    InactiveSubframe { subframe: u32, periodicity: u32 },

    #[error("Signals must be the same length for correlation: signal {index} has {found} samples, expected {expected}")]
    LengthMismatch { index: usize, expected: usize, found: usize },

    #[error("Invalid sequence length: {0}")]
    InvalidLength(usize),

    #[error("SRS bandwidth clipped from {requested} to {limit} subcarriers")]
    BandwidthClipped { requested: u64, limit: usize },

    #[error("{dropped} of {total} SRS samples fall outside the transform window")]
    SamplesDropped { dropped: usize, total: usize },

    #[error("Base sequence of length {available} is shorter than the {required} occupied subcarriers")]
    SequenceTooShort { available: usize, required: usize },
}
