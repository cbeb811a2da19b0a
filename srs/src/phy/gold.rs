/// Pseudo-random sequence generation for SRS group hopping
/// Based on 3GPP TS 36.211 Section 7.2

use crate::SrsError;

/// Length of both shift registers
pub const REGISTER_LENGTH: usize = 31;

/// Mask keeping the 31 register bits
const REGISTER_MASK: u32 = 0x7FFF_FFFF;

/// Advance the first register: x1(n) = (x1(n-3) + x1(n-31)) mod 2
///
/// Bit i of the register holds x1(n-31+i), so x1(n-3) sits at bit 28.
#[inline]
fn step_x1(x1: u32) -> (u32, u32) {
    let new_bit = ((x1 >> 28) ^ x1) & 1;
    (((x1 >> 1) | (new_bit << 30)) & REGISTER_MASK, new_bit)
}

/// Advance the second register: x2(n) = (x2(n-3) + x2(n-2) + x2(n-1) + x2(n-31)) mod 2
#[inline]
fn step_x2(x2: u32) -> (u32, u32) {
    let new_bit = ((x2 >> 28) ^ (x2 >> 29) ^ (x2 >> 30) ^ x2) & 1;
    (((x2 >> 1) | (new_bit << 30)) & REGISTER_MASK, new_bit)
}

/// Linear map of one register step over GF(2)
///
/// Column i holds the image of the basis state with only bit i set.
#[derive(Clone, Copy)]
struct Transition([u32; REGISTER_LENGTH]);

impl Transition {
    fn from_step(step: fn(u32) -> (u32, u32)) -> Self {
        let mut columns = [0u32; REGISTER_LENGTH];
        for (i, column) in columns.iter_mut().enumerate() {
            *column = step(1 << i).0;
        }
        Self(columns)
    }

    fn apply(&self, state: u32) -> u32 {
        self.0.iter()
            .enumerate()
            .filter(|(i, _)| (state >> i) & 1 == 1)
            .fold(0, |acc, (_, column)| acc ^ column)
    }

    /// `self` applied after `other`
    fn compose(&self, other: &Self) -> Self {
        let mut columns = [0u32; REGISTER_LENGTH];
        for (column, &image) in columns.iter_mut().zip(other.0.iter()) {
            *column = self.apply(image);
        }
        Self(columns)
    }
}

/// Advance a register by `steps` in O(log steps) matrix squarings
fn jump(state: u32, step: fn(u32) -> (u32, u32), mut steps: u64) -> u32 {
    let mut power = Transition::from_step(step);
    let mut state = state;
    while steps > 0 {
        if steps & 1 == 1 {
            state = power.apply(state);
        }
        steps >>= 1;
        if steps > 0 {
            power = power.compose(&power);
        }
    }
    state
}

fn chips_from(mut x1: u32, mut x2: u32, length: usize) -> Vec<u8> {
    let mut chips = Vec::with_capacity(length);
    for _ in 0..length {
        let (next_x1, bit1) = step_x1(x1);
        let (next_x2, bit2) = step_x2(x2);
        chips.push((bit1 ^ bit2) as u8);
        x1 = next_x1;
        x2 = next_x2;
    }
    chips
}

/// Generate `length` chips of the Gold sequence seeded with `c_init`
///
/// The first register starts from the one-hot state x1(0) = 1, the second from the
/// bits of `c_init` (LSB first). The 31 initial values of each register are the
/// warm-up region, chip k is x1(31 + k) XOR x2(31 + k).
pub fn generate_prs(c_init: u32, length: usize) -> Result<Vec<u8>, SrsError> {
    generate_prs_window(c_init, 0, length)
}

/// Generate chips `start .. start + length` of the Gold sequence seeded with `c_init`
///
/// Identical to `generate_prs(c_init, start + length)[start..]`, but the registers
/// jump directly to chip `start`, so memory and time do not grow with `start`.
pub fn generate_prs_window(c_init: u32, start: u64, length: usize) -> Result<Vec<u8>, SrsError> {
    if length == 0 {
        return Err(SrsError::InvalidLength(length));
    }

    let x1 = jump(1, step_x1, start);
    let x2 = jump(c_init & REGISTER_MASK, step_x2, start);

    Ok(chips_from(x1, x2, length))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Straight transcription of the recurrences over full-length arrays
    fn reference_prs(c_init: u32, length: usize) -> Vec<u8> {
        let total = length + REGISTER_LENGTH;
        let mut x1 = vec![0u8; total];
        let mut x2 = vec![0u8; total];
        x1[0] = 1;
        for n in 0..REGISTER_LENGTH {
            x2[n] = ((c_init >> n) & 1) as u8;
        }
        for n in REGISTER_LENGTH..total {
            x1[n] = (x1[n - 3] + x1[n - 31]) % 2;
            x2[n] = (x2[n - 3] + x2[n - 2] + x2[n - 1] + x2[n - 31]) % 2;
        }
        (0..length)
            .map(|k| (x1[k + REGISTER_LENGTH] + x2[k + REGISTER_LENGTH]) % 2)
            .collect()
    }

    #[test]
    fn test_golden_vector_cell0_slot0() {
        // c_init for cell 0, slot 0: (0 + 1) * (0 + 1) * 2^9 + 0
        let chips = generate_prs(512, 10).unwrap();
        assert_eq!(chips, vec![1, 0, 0, 1, 0, 0, 1, 0, 0, 0]);
    }

    #[test]
    fn test_matches_array_recurrence() {
        for &c_init in &[0u32, 1, 512, 0x1234_5678, 0x7FFF_FFFF, 21_546] {
            for &length in &[1usize, 8, 31, 32, 160, 1000] {
                assert_eq!(generate_prs(c_init, length).unwrap(), reference_prs(c_init, length));
            }
        }
    }

    #[test]
    fn test_deterministic_and_length() {
        let a = generate_prs(98_765, 300).unwrap();
        let b = generate_prs(98_765, 300).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 300);
        assert!(a.iter().all(|&c| c <= 1));
    }

    #[test]
    fn test_prefix_consistency() {
        // Shorter requests are prefixes of longer ones
        let long = generate_prs(4242, 256).unwrap();
        let short = generate_prs(4242, 17).unwrap();
        assert_eq!(&long[..17], &short[..]);
    }

    #[test]
    fn test_seed_upper_bit_ignored() {
        assert_eq!(
            generate_prs(0x8000_0200, 64).unwrap(),
            generate_prs(0x0000_0200, 64).unwrap()
        );
    }

    #[test]
    fn test_zero_length_rejected() {
        assert_eq!(generate_prs(512, 0), Err(SrsError::InvalidLength(0)));
        assert_eq!(generate_prs_window(512, 1 << 40, 0), Err(SrsError::InvalidLength(0)));
    }

    #[test]
    fn test_window_matches_prefix() {
        for &c_init in &[0u32, 512, 9 * 43 * 512 + 42, 0x7FFF_FFFF] {
            let full = generate_prs(c_init, 2048).unwrap();
            for &start in &[0usize, 1, 2, 30, 31, 32, 128, 1000, 2040] {
                let window = generate_prs_window(c_init, start as u64, 8).unwrap();
                assert_eq!(&window[..], &full[start..start + 8], "c_init {} start {}", c_init, start);
            }
        }
    }

    #[test]
    fn test_window_far_start() {
        // Jumping in two hops lands on the same chips as a single jump
        let start = (1u64 << 35) + 12_345;
        let direct = generate_prs_window(21_546, start, 16).unwrap();
        let x1 = jump(jump(1, step_x1, 1 << 35), step_x1, 12_345);
        let x2 = jump(jump(21_546, step_x2, 1 << 35), step_x2, 12_345);
        assert_eq!(direct, chips_from(x1, x2, 16));

        // Consecutive windows join up
        let head = generate_prs_window(21_546, start, 8).unwrap();
        let tail = generate_prs_window(21_546, start + 8, 8).unwrap();
        assert_eq!([head, tail].concat(), direct);
    }
}
