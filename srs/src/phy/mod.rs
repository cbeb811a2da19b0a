//! Physical Layer (PHY) Submodules
//! 
//! This module contains the uplink sounding reference signal chain
//! according to 3GPP TS 36.211 Sections 5.5 and 7.2.

pub mod gold;
pub mod hopping;
pub mod zadoff_chu;
pub mod cyclic_shift;
pub mod bandwidth;
pub mod grid;
pub mod ofdm;
pub mod generator;

// Re-export commonly used types
pub use gold::generate_prs;
pub use hopping::{group_and_sequence_hopping, HoppingState};
pub use zadoff_chu::generate_zadoff_chu;
pub use cyclic_shift::{apply_cyclic_shift, CyclicShift};
pub use bandwidth::{resolve_bandwidth, SubcarrierAllocation};
pub use grid::{map_to_frequency_grid, GridMapping};
pub use ofdm::InverseTransform;
pub use generator::{
    generate_srs, generate_srs_with_options, GenerationOptions, MappingInfo, MappingPolicy,
    SrsGenerator, SrsSignal, DEFAULT_TRANSFORM_SIZE,
};
