//! Dice used by the combat rules.

use crate::core::DiceRng;

/// Roll a d20.
pub fn roll_d20(rng: &mut DiceRng) -> u32 {
    rng.roll(20)
}

/// Roll `count` d4 and sum them. Zero dice sum to 0.
pub fn roll_d4(rng: &mut DiceRng, count: u32) -> u32 {
    (0..count).map(|_| rng.roll(4)).sum()
}
