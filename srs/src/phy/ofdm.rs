//! OFDM Symbol Synthesis
//!
//! Inverse DFT of a mapped frequency grid into one time-domain SRS symbol.
//! The output is scaled by 1/N so that a grid holding M unit-magnitude samples
//! produces a symbol of energy M/N.

use crate::SrsError;
use num_complex::Complex64;
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;
use tracing::trace;

/// Planned inverse DFT of a fixed size
#[derive(Clone)]
pub struct InverseTransform {
    /// Transform size
    size: usize,
    /// IDFT processor
    idft: Arc<dyn Fft<f64>>,
}

impl std::fmt::Debug for InverseTransform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InverseTransform").field("size", &self.size).finish()
    }
}

impl InverseTransform {
    /// Plan an inverse transform of `size` points
    pub fn new(size: usize) -> Result<Self, SrsError> {
        let mut planner = FftPlanner::new();
        Self::with_planner(&mut planner, size)
    }

    /// Plan an inverse transform reusing an existing planner
    pub fn with_planner(planner: &mut FftPlanner<f64>, size: usize) -> Result<Self, SrsError> {
        if size == 0 {
            return Err(SrsError::InvalidConfig("transform size must be positive".to_string()));
        }

        let idft = planner.plan_fft_inverse(size);
        trace!("Planned {}-point IDFT", size);

        Ok(Self { size, idft })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Transform a grid in DC-first order into time-domain samples
    pub fn process(&self, mut grid: Vec<Complex64>) -> Result<Vec<Complex64>, SrsError> {
        if grid.len() != self.size {
            return Err(SrsError::InvalidLength(grid.len()));
        }

        // Perform IDFT (in-place)
        self.idft.process(&mut grid);

        let scale = 1.0 / self.size as f64;
        for sample in grid.iter_mut() {
            *sample *= scale;
        }

        Ok(grid)
    }
}
