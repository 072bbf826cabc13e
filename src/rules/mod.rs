//! Combat rules.
//!
//! Pure functions of their inputs plus an injected `DiceRng`:
//! - Dice rolls
//! - Hit resolution (d20 against effective AC)
//! - Card duels with suit-advantage tie-breaks
//! - Reaction costs
//! - Theoretical damage bounds

pub mod dice;
pub mod duel;
pub mod economy;
pub mod hit;
pub mod theoretical;

pub use dice::{roll_d20, roll_d4};
pub use duel::{resolve_card_duel, DuelKind, DuelOutcome};
pub use economy::{reaction_cost, DIAMONDS_COST_SURCHARGE};
pub use hit::{resolve_hit_roll, HitRoll};
pub use theoretical::TheoreticalDamage;
