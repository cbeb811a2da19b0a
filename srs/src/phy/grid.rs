//! Frequency Grid Mapping
//!
//! Places an SRS sequence on a transmission comb around DC:
//!
//! ```text
//! spacing = 2 + 2 * k_tc
//! k0      = floor(N_fft / 2) - floor(M_sc / 2) * spacing + k_tc
//! k(m)    = k0 + m * spacing
//! ```
//!
//! Indices are relative to the centered (FFT-shifted) grid. Samples whose index
//! falls outside 0..N_fft are dropped.

use common::types::TransmissionComb;
use num_complex::Complex64;
use tracing::debug;

/// Subcarrier distance between consecutive SRS samples for a comb
pub fn comb_spacing(comb: TransmissionComb) -> usize {
    2 + 2 * comb.k_tc()
}

/// Frequency grid holding one mapped SRS symbol
#[derive(Debug, Clone)]
pub struct GridMapping {
    /// Grid in inverse-transform order (DC at index 0)
    pub grid: Vec<Complex64>,
    /// Starting subcarrier in the centered grid, may be negative
    pub k0: i64,
    /// Number of samples mapped inside the window
    pub mapped: usize,
    /// Number of samples dropped outside the window
    pub dropped: usize,
}

/// Rotate a centered grid so that DC moves to index 0
pub fn ifft_shift(centered: &mut [Complex64]) {
    let half = centered.len() / 2;
    centered.rotate_left(half);
}

/// Map a sequence onto a zero-filled grid of `transform_size` subcarriers
pub fn map_to_frequency_grid(
    sequence: &[Complex64],
    comb: TransmissionComb,
    transform_size: usize,
) -> GridMapping {
    let spacing = comb_spacing(comb) as i64;
    let k_tc = comb.k_tc() as i64;
    let center = (transform_size / 2) as i64;
    let m_sc = sequence.len() as i64;
    let k0 = center - (m_sc / 2) * spacing + k_tc;

    let mut grid = vec![Complex64::new(0.0, 0.0); transform_size];
    let mut mapped = 0;

    for (m, &value) in sequence.iter().enumerate() {
        let k = k0 + m as i64 * spacing;
        if k >= 0 && (k as usize) < transform_size {
            grid[k as usize] = value;
            mapped += 1;
        }
    }

    let dropped = sequence.len() - mapped;
    if dropped > 0 {
        debug!(
            "Dropped {} of {} SRS samples outside the {}-point grid (k0={})",
            dropped, sequence.len(), transform_size, k0
        );
    }

    ifft_shift(&mut grid);

    GridMapping { grid, k0, mapped, dropped }
}
