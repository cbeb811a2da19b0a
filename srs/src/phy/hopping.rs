//! Group and Sequence Hopping
//!
//! Implements the per-slot selection of the sequence group u and the base
//! sequence number v according to 3GPP TS 36.211 Section 5.5.1.3 / 5.5.1.4.
//! Nothing is cached between slots: every query jumps the Gold sequence to the
//! slot's 8-chip window.

use super::gold;
use crate::config::SrsConfig;
use crate::SrsError;
use common::types::NUM_SEQUENCE_GROUPS;
use common::utils::{bits_to_string, fold_bits_le};
use serde::Serialize;
use tracing::trace;

/// Pseudo-random chips consumed per slot
const CHIPS_PER_SLOT: u64 = 8;

/// Hopping indices of one slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HoppingState {
    /// Sequence group number u
    pub group_number: u32,
    /// Sequence number, used as the Zadoff-Chu root index
    pub sequence_number: u32,
    /// Group hopping pattern f_gh
    pub f_gh: u32,
    /// Sequence shift pattern f_ss
    pub f_ss: u32,
}

/// Gold sequence initialisation for group hopping
/// c_init = ((floor(n_s/2) + 1) * (N_ID + 1) * 2^9 + N_ID) mod 2^31
pub fn group_hopping_cinit(cell_id: u16, slot: u64) -> u32 {
    let n_id = cell_id as u64;
    let pair = slot / 2 + 1;
    ((pair.wrapping_mul(n_id + 1) << 9).wrapping_add(n_id) & 0x7FFF_FFFF) as u32
}

/// Group hopping pattern f_gh for a slot
///
/// Folds chips 8*n_s .. 8*n_s+7 LSB first and reduces modulo 30.
pub fn group_hopping_pattern(cell_id: u16, slot: u64) -> Result<u32, SrsError> {
    let c_init = group_hopping_cinit(cell_id, slot);
    let start = slot.checked_mul(CHIPS_PER_SLOT).ok_or_else(|| {
        SrsError::InvalidConfig(format!("slot {} out of range", slot))
    })?;
    let chips = gold::generate_prs_window(c_init, start, CHIPS_PER_SLOT as usize)?;
    let window = chips.as_slice();

    trace!(
        "Slot {} c_init={} hopping chips {}",
        slot, c_init, bits_to_string(window)
    );

    Ok(fold_bits_le(window) % NUM_SEQUENCE_GROUPS)
}

/// Compute the group and sequence hopping indices of a slot
pub fn group_and_sequence_hopping(config: &SrsConfig, slot: u64) -> Result<HoppingState, SrsError> {
    let cell_id = config.cell_id().value();
    let f_ss = cell_id as u32 % NUM_SEQUENCE_GROUPS;

    let f_gh = if config.group_hopping_enabled() {
        group_hopping_pattern(cell_id, slot)?
    } else {
        0
    };

    let group_number = (f_ss + f_gh) % NUM_SEQUENCE_GROUPS;

    // Sequence hopping offsets the base sequence by the same pattern
    let seq_shift = if config.sequence_hopping_enabled() {
        f_gh % NUM_SEQUENCE_GROUPS
    } else {
        0
    };

    let sequence_number = (group_number + seq_shift) % NUM_SEQUENCE_GROUPS;

    trace!(
        "Hopping slot={} f_ss={} f_gh={} u={} v={}",
        slot, f_ss, f_gh, group_number, sequence_number
    );

    Ok(HoppingState {
        group_number,
        sequence_number,
        f_gh,
        f_ss,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::reference_params;
    use crate::config::SrsParams;

    fn config_with(cell_id: i64, gh: bool, sh: bool) -> SrsConfig {
        SrsConfig::new(SrsParams {
            cell_id,
            group_hopping_enabled: gh,
            sequence_hopping_enabled: sh,
            ..reference_params()
        })
        .unwrap()
    }

    #[test]
    fn test_cinit() {
        assert_eq!(group_hopping_cinit(0, 0), 512);
        assert_eq!(group_hopping_cinit(0, 1), 512);
        assert_eq!(group_hopping_cinit(42, 16), 9 * 43 * 512 + 42);
        // Large slot numbers wrap modulo 2^31
        let wrapped = ((1_000_001u64 * 504 * 512 + 503) % (1u64 << 31)) as u32;
        assert_eq!(group_hopping_cinit(503, 2_000_000), wrapped);
    }

    #[test]
    fn test_reference_ue_slot16() {
        let state = group_and_sequence_hopping(&config_with(42, true, false), 16).unwrap();
        assert_eq!(state, HoppingState { group_number: 14, sequence_number: 14, f_gh: 2, f_ss: 12 });
    }

    #[test]
    fn test_batch_ues_slot8() {
        let cases = [
            (0, true, false, HoppingState { group_number: 4, sequence_number: 4, f_gh: 4, f_ss: 0 }),
            (1, true, true, HoppingState { group_number: 6, sequence_number: 11, f_gh: 5, f_ss: 1 }),
            (12, false, true, HoppingState { group_number: 12, sequence_number: 12, f_gh: 0, f_ss: 12 }),
            (37, false, false, HoppingState { group_number: 7, sequence_number: 7, f_gh: 0, f_ss: 7 }),
        ];
        for (cell_id, gh, sh, expected) in cases {
            let state = group_and_sequence_hopping(&config_with(cell_id, gh, sh), 8).unwrap();
            assert_eq!(state, expected, "cell {}", cell_id);
        }
    }

    #[test]
    fn test_no_group_hopping() {
        for cell_id in [0, 29, 30, 59, 503] {
            let state = group_and_sequence_hopping(&config_with(cell_id, false, true), 5).unwrap();
            assert_eq!(state.f_gh, 0);
            assert_eq!(state.f_ss, cell_id as u32 % 30);
            assert_eq!(state.group_number, state.f_ss);
            assert_eq!(state.sequence_number, state.group_number);
        }
    }

    #[test]
    fn test_pattern_matches_full_prefix() {
        for cell_id in [0u16, 42, 311, 503] {
            for slot in [0u64, 1, 7, 16, 19] {
                let c_init = group_hopping_cinit(cell_id, slot);
                let start = 8 * slot as usize;
                let prefix = gold::generate_prs(c_init, start + 8).unwrap();
                let expected = fold_bits_le(&prefix[start..]) % 30;
                assert_eq!(group_hopping_pattern(cell_id, slot).unwrap(), expected);
            }
        }
    }

    #[test]
    fn test_large_slot() {
        // Slot of the last subframe index representable as u32
        let slot = 2 * u32::MAX as u64;
        let state = group_and_sequence_hopping(&config_with(42, true, true), slot).unwrap();
        assert!(state.f_gh < 30 && state.group_number < 30 && state.sequence_number < 30);
        assert_eq!(state, group_and_sequence_hopping(&config_with(42, true, true), slot).unwrap());

        assert!(matches!(group_hopping_pattern(42, u64::MAX), Err(SrsError::InvalidConfig(_))));
    }

    #[test]
    fn test_indices_in_range_and_repeatable() {
        let config = config_with(311, true, true);
        for slot in 0..40 {
            let a = group_and_sequence_hopping(&config, slot).unwrap();
            let b = group_and_sequence_hopping(&config, slot).unwrap();
            assert_eq!(a, b);
            assert!(a.f_gh < 30 && a.group_number < 30 && a.sequence_number < 30);
            assert_eq!(a.sequence_number, (a.group_number + a.f_gh) % 30);
        }
    }
}
