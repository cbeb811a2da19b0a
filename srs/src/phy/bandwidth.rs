//! SRS Bandwidth Resolution
//!
//! M_sc = min((N_b + 1) * 12 * 2^B_srs, N_UL_RB * 12)
//!
//! Requests above the uplink bandwidth are clipped, not rejected.

use common::types::SUBCARRIERS_PER_RB;
use tracing::debug;

/// Result of the bandwidth resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubcarrierAllocation {
    /// Subcarriers requested by (B_srs, N_b), saturating at u64::MAX
    pub requested: u64,
    /// Upper bound given by the uplink bandwidth
    pub limit: usize,
    /// Occupied subcarriers after clipping
    pub occupied: usize,
}

impl SubcarrierAllocation {
    /// True if the request exceeded the uplink bandwidth
    pub fn is_clipped(&self) -> bool {
        self.requested > self.limit as u64
    }
}

/// Resolve the number of occupied SRS subcarriers
pub fn resolve_bandwidth(bandwidth_config: u32, srs_bandwidth: u32, n_ul_rb: u32) -> SubcarrierAllocation {
    let scaling = 1u64.checked_shl(bandwidth_config).unwrap_or(u64::MAX);
    let requested = (srs_bandwidth as u64 + 1)
        .saturating_mul(SUBCARRIERS_PER_RB as u64)
        .saturating_mul(scaling);
    let limit = n_ul_rb as usize * SUBCARRIERS_PER_RB;
    let occupied = requested.min(limit as u64) as usize;

    if requested > limit as u64 {
        debug!(
            "SRS bandwidth clipped: requested {} subcarriers, uplink supports {}",
            requested, limit
        );
    }

    SubcarrierAllocation { requested, limit, occupied }
}
