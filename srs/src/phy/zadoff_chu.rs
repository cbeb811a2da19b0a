//! Zadoff-Chu Base Sequence
//!
//! x_u(n) = exp(-j * pi * u * n * (n + 1) / N_zc), n = 0..N_zc-1

use num_complex::Complex64;
use std::f64::consts::PI;

/// Generate the Zadoff-Chu sequence of root `u` and length `n_zc`
///
/// The phase numerator u*n*(n+1) is reduced modulo 2*N_zc in integer arithmetic
/// before conversion, so late samples of long sequences keep full precision.
pub fn generate_zadoff_chu(u: u32, n_zc: usize) -> Vec<Complex64> {
    if n_zc == 0 {
        return Vec::new();
    }

    let period = 2 * n_zc as u128;
    let root = u as u128 % period;
    let length = n_zc as f64;

    (0..n_zc)
        .map(|n| {
            let n = n as u128;
            let numerator = root * ((n * (n + 1)) % period) % period;
            let phase = -PI * numerator as f64 / length;
            Complex64::from_polar(1.0, phase)
        })
        .collect()
}
