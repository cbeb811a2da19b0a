//! Cyclic Shift Rotation
//!
//! r(n) = e^(j*alpha*n) * r_base(n). Any alpha is accepted here; the discrete
//! values signalled by higher layers are alpha = 2*pi*n_cs/8.

use num_complex::Complex64;
use std::f64::consts::PI;

/// Number of cyclic shifts defined for SRS
pub const NUM_CYCLIC_SHIFTS: u8 = 8;

/// Signalled SRS cyclic shift n_cs (0-7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CyclicShift(u8);

impl CyclicShift {
    /// Create a new cyclic shift with validation
    pub fn new(n_cs: u8) -> Option<Self> {
        if n_cs < NUM_CYCLIC_SHIFTS {
            Some(Self(n_cs))
        } else {
            None
        }
    }

    pub fn n_cs(&self) -> u8 {
        self.0
    }

    /// alpha = 2*pi*n_cs/8
    pub fn alpha(&self) -> f64 {
        2.0 * PI * self.0 as f64 / NUM_CYCLIC_SHIFTS as f64
    }

    /// All eight shifts in ascending order
    pub fn all() -> impl Iterator<Item = CyclicShift> {
        (0..NUM_CYCLIC_SHIFTS).map(CyclicShift)
    }
}

/// Apply the phase ramp e^(j*alpha*n) to a sequence
pub fn apply_cyclic_shift(sequence: &[Complex64], alpha: f64) -> Vec<Complex64> {
    sequence.iter()
        .enumerate()
        .map(|(n, &value)| value * Complex64::from_polar(1.0, alpha * n as f64))
        .collect()
}
