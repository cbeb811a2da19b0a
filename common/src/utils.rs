//! Common Utilities
//!
//! Provides bit-level helpers used by the sequence generators

use tracing::trace;

/// Render binary chips as a compact string for debugging ("1001...")
pub fn bits_to_string(bits: &[u8]) -> String {
    bits.iter()
        .map(|&b| if b & 1 == 1 { '1' } else { '0' })
        .collect()
}

/// Fold binary chips into an integer, first chip is the least significant bit
pub fn fold_bits_le(bits: &[u8]) -> u32 {
    let value = bits.iter()
        .take(32)
        .enumerate()
        .fold(0u32, |acc, (i, &bit)| acc | (((bit & 1) as u32) << i));

    trace!("Folded {} chips ({}) into {}", bits.len(), bits_to_string(bits), value);

    value
}
