//! Batch Generation
//!
//! Runs the SRS chain for many UEs at a shared subframe. UEs are independent,
//! so the batch is generated in parallel; results keep the input order.

use crate::config::{SrsConfig, SrsParams};
use crate::phy::{GenerationOptions, SrsGenerator, SrsSignal};
use crate::SrsError;
use rayon::prelude::*;
use std::f64::consts::PI;
use tracing::debug;

/// Generate the SRS of every UE at `subframe`
///
/// Returns one result per configuration, in input order.
pub fn generate_batch(
    configs: &[SrsConfig],
    subframe: u32,
    options: GenerationOptions,
) -> Vec<Result<SrsSignal, SrsError>> {
    let generator = SrsGenerator::new();

    let results: Vec<Result<SrsSignal, SrsError>> = configs
        .par_iter()
        .map(|config| generator.generate_with_options(config, subframe, options))
        .collect();

    let generated = results.iter().filter(|r| r.is_ok()).count();
    debug!(
        "Generated {} of {} SRS symbols for subframe {}",
        generated, configs.len(), subframe
    );

    results
}

/// Small suite of diverse UE configurations sharing one cell bandwidth
///
/// Four UEs (cells 0, 1, 12, 37) with mixed hopping flags, combs, cyclic shifts
/// and SRS bandwidths, all with B_srs = 2, T_srs = 2 and 50 uplink RBs.
pub fn reference_suite() -> Result<Vec<SrsConfig>, SrsError> {
    let ues = [
        (0, true, false, 0, 0.0, 0),
        (1, true, true, 1, PI / 4.0, 1),
        (12, false, true, 0, PI / 2.0, 2),
        (37, false, false, 1, 3.0 * PI / 4.0, 3),
    ];

    ues.iter()
        .map(|&(cell_id, gh, sh, comb, alpha, n_b)| {
            SrsConfig::new(SrsParams {
                cell_id,
                bandwidth_config: 2,
                subframe_config: 2,
                b_hop: 1,
                group_hopping_enabled: gh,
                sequence_hopping_enabled: sh,
                transmission_comb: comb,
                cyclic_shift: alpha,
                srs_bandwidth: n_b,
                n_ul_rb: 50,
                n_zc: None,
            })
        })
        .collect()
}
