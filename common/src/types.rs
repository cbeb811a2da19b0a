//! Common Types for LTE uplink reference signals
//!
//! Defines fundamental types shared by the SRS generator and its drivers

use serde::{Deserialize, Serialize};
use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::{FromPrimitive, ToPrimitive};

/// Number of subcarriers in one resource block
pub const SUBCARRIERS_PER_RB: usize = 12;

/// Number of sequence groups used by group hopping
pub const NUM_SEQUENCE_GROUPS: u32 = 30;

/// Physical layer cell identity (LTE)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellId(pub u16);

impl CellId {
    /// Maximum valid LTE cell identity (0-503)
    pub const MAX: u16 = 503;

    /// Create a new cell identity with validation
    pub fn new(value: u16) -> Option<Self> {
        if value <= Self::MAX {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Get the cell identity value
    pub fn value(&self) -> u16 {
        self.0
    }
}

/// Transmission comb k_TC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive, Serialize, Deserialize)]
pub enum TransmissionComb {
    /// Even subcarriers (k_TC = 0)
    Even = 0,
    /// Odd subcarriers (k_TC = 1)
    Odd = 1,
}

impl TransmissionComb {
    /// Convert a raw k_TC value
    pub fn from_k_tc(k_tc: i64) -> Option<Self> {
        Self::from_i64(k_tc)
    }

    /// Get the raw k_TC value
    pub fn k_tc(&self) -> usize {
        self.to_usize().unwrap_or(0)
    }
}
