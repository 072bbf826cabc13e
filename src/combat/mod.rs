//! Combatants and their damage bookkeeping.

pub mod combatant;
pub mod damage;

pub use combatant::{Combatant, DEFEND_AC_BONUS};
pub use damage::DamageStats;
