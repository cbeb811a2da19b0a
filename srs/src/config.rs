//! SRS Configuration
//!
//! UE-specific SRS settings from 3GPP TS 36.211 Section 5.5.3 and TS 36.213 Section 8.2.
//! The raw record ([`SrsParams`]) is what configuration front-ends produce; it only
//! becomes usable for generation once validated into an [`SrsConfig`].

use crate::phy::{bandwidth, grid};
use crate::SrsError;
use common::types::{CellId, TransmissionComb};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of the Zadoff-Chu base sequence when no override is configured
pub const DEFAULT_ZC_LENGTH: usize = 839;

/// Unvalidated SRS configuration record
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SrsParams {
    /// Physical cell identity (0-503)
    pub cell_id: i64,
    /// B_SRS bandwidth configuration index
    pub bandwidth_config: i64,
    /// T_SRS periodicity in subframes, 0 disables the SRS
    pub subframe_config: i64,
    /// Frequency hopping parameter b_hop
    pub b_hop: i64,
    /// Group hopping enabled
    pub group_hopping_enabled: bool,
    /// Sequence hopping enabled
    pub sequence_hopping_enabled: bool,
    /// Transmission comb k_TC (0 or 1)
    pub transmission_comb: i64,
    /// Cyclic shift alpha in radians
    pub cyclic_shift: f64,
    /// N_b, selects the occupied SRS bandwidth
    pub srs_bandwidth: i64,
    /// Uplink bandwidth in resource blocks
    pub n_ul_rb: i64,
    /// Optional Zadoff-Chu length override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n_zc: Option<i64>,
}

/// Validated, immutable SRS configuration of one UE
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(try_from = "SrsParams", into = "SrsParams")]
pub struct SrsConfig {
    cell_id: CellId,
    bandwidth_config: u32,
    subframe_config: u32,
    b_hop: u32,
    group_hopping_enabled: bool,
    sequence_hopping_enabled: bool,
    transmission_comb: TransmissionComb,
    cyclic_shift: f64,
    srs_bandwidth: u32,
    n_ul_rb: u32,
    n_zc: Option<usize>,
}

fn non_negative(value: i64, name: &str) -> Result<u32, SrsError> {
    u32::try_from(value).map_err(|_| {
        SrsError::InvalidConfig(format!("{} must be non-negative and fit in 32 bits, got {}", name, value))
    })
}

impl SrsConfig {
    /// Validate a raw configuration record
    pub fn new(params: SrsParams) -> Result<Self, SrsError> {
        let cell_id = u16::try_from(params.cell_id)
            .ok()
            .and_then(CellId::new)
            .ok_or_else(|| SrsError::InvalidConfig(
                format!("cell_id must be between 0 and {}, got {}", CellId::MAX, params.cell_id)
            ))?;

        let transmission_comb = TransmissionComb::from_k_tc(params.transmission_comb)
            .ok_or_else(|| SrsError::InvalidConfig(
                format!("transmission_comb (k_tc) must be 0 or 1, got {}", params.transmission_comb)
            ))?;

        let bandwidth_config = non_negative(params.bandwidth_config, "bandwidth_config (B_srs)")?;
        let subframe_config = non_negative(params.subframe_config, "subframe_config (T_srs)")?;
        let b_hop = non_negative(params.b_hop, "b_hop")?;
        let srs_bandwidth = non_negative(params.srs_bandwidth, "srs_bandwidth (N_b)")?;

        let n_ul_rb = non_negative(params.n_ul_rb, "n_ul_rb")?;
        if n_ul_rb == 0 {
            return Err(SrsError::InvalidConfig("n_ul_rb must be positive".to_string()));
        }

        let n_zc = match params.n_zc {
            Some(len) if len <= 0 => {
                return Err(SrsError::InvalidConfig(format!("n_zc must be positive, got {}", len)));
            }
            Some(len) => Some(usize::try_from(len).map_err(|_| {
                SrsError::InvalidConfig(format!("n_zc out of range: {}", len))
            })?),
            None => None,
        };

        if !params.cyclic_shift.is_finite() {
            return Err(SrsError::InvalidConfig(
                format!("cyclic_shift must be finite, got {}", params.cyclic_shift)
            ));
        }

        Ok(Self {
            cell_id,
            bandwidth_config,
            subframe_config,
            b_hop,
            group_hopping_enabled: params.group_hopping_enabled,
            sequence_hopping_enabled: params.sequence_hopping_enabled,
            transmission_comb,
            cyclic_shift: params.cyclic_shift,
            srs_bandwidth,
            n_ul_rb,
            n_zc,
        })
    }

    /// Physical cell identity N_ID
    pub fn cell_id(&self) -> CellId {
        self.cell_id
    }

    /// SRS bandwidth configuration B_srs
    pub fn bandwidth_config(&self) -> u32 {
        self.bandwidth_config
    }

    /// SRS periodicity T_srs in subframes, 0 when disabled
    pub fn subframe_config(&self) -> u32 {
        self.subframe_config
    }

    /// Frequency hopping bandwidth b_hop
    pub fn b_hop(&self) -> u32 {
        self.b_hop
    }

    /// Whether group hopping is enabled
    pub fn group_hopping_enabled(&self) -> bool {
        self.group_hopping_enabled
    }

    /// Whether sequence hopping is enabled
    pub fn sequence_hopping_enabled(&self) -> bool {
        self.sequence_hopping_enabled
    }

    /// Transmission comb k_TC
    pub fn transmission_comb(&self) -> TransmissionComb {
        self.transmission_comb
    }

    /// SRS bandwidth index N_b
    pub fn srs_bandwidth(&self) -> u32 {
        self.srs_bandwidth
    }

    /// Uplink bandwidth in resource blocks
    pub fn n_ul_rb(&self) -> u32 {
        self.n_ul_rb
    }

    /// Zadoff-Chu length override, if any
    pub fn n_zc(&self) -> Option<usize> {
        self.n_zc
    }

    /// Check whether the UE transmits SRS in this subframe
    ///
    /// T_SRS = 0 disables the SRS. Otherwise the SRS is sent every T_SRS subframes,
    /// counted from subframe 0.
    pub fn is_active_subframe(&self, subframe: u32) -> bool {
        if self.subframe_config == 0 {
            return false;
        }
        subframe % self.subframe_config == 0
    }

    /// Cyclic shift alpha in radians
    pub fn alpha(&self) -> f64 {
        self.cyclic_shift
    }

    /// Length of the underlying Zadoff-Chu sequence
    pub fn zc_length(&self) -> usize {
        self.n_zc.unwrap_or(DEFAULT_ZC_LENGTH)
    }

    /// Number of occupied SRS subcarriers M_sc
    pub fn bandwidth_in_subcarriers(&self) -> usize {
        self.bandwidth_allocation().occupied
    }

    /// Full bandwidth resolution, including the unclipped request
    pub fn bandwidth_allocation(&self) -> bandwidth::SubcarrierAllocation {
        bandwidth::resolve_bandwidth(self.bandwidth_config, self.srs_bandwidth, self.n_ul_rb)
    }

    /// Subcarrier distance between consecutive SRS samples
    pub fn comb_spacing(&self) -> usize {
        grid::comb_spacing(self.transmission_comb)
    }
}

impl TryFrom<SrsParams> for SrsConfig {
    type Error = SrsError;

    fn try_from(params: SrsParams) -> Result<Self, Self::Error> {
        Self::new(params)
    }
}

impl From<SrsConfig> for SrsParams {
    fn from(config: SrsConfig) -> Self {
        Self {
            cell_id: config.cell_id.value() as i64,
            bandwidth_config: config.bandwidth_config as i64,
            subframe_config: config.subframe_config as i64,
            b_hop: config.b_hop as i64,
            group_hopping_enabled: config.group_hopping_enabled,
            sequence_hopping_enabled: config.sequence_hopping_enabled,
            transmission_comb: config.transmission_comb.k_tc() as i64,
            cyclic_shift: config.cyclic_shift,
            srs_bandwidth: config.srs_bandwidth as i64,
            n_ul_rb: config.n_ul_rb as i64,
            n_zc: config.n_zc.map(|len| len as i64),
        }
    }
}

impl fmt::Display for SrsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SrsConfig(cell_id={}, B_srs={}, T_srs={}, b_hop={}, gh={}, sh={}, k_tc={}, alpha={:.3}, N_b={}, n_ul_rb={}, N_zc={})",
            self.cell_id.value(),
            self.bandwidth_config,
            self.subframe_config,
            self.b_hop,
            self.group_hopping_enabled,
            self.sequence_hopping_enabled,
            self.transmission_comb.k_tc(),
            self.cyclic_shift,
            self.srs_bandwidth,
            self.n_ul_rb,
            self.zc_length(),
        )
    }
}
