//! Resource costs of reactions and counters.

use crate::cards::Suit;

/// Extra cost of reacting to a suit that raises reaction costs.
pub const DIAMONDS_COST_SURCHARGE: i32 = 2;

/// Resources a defender with `danger` pays to react to or counter an
/// attack made with `attack_suit`.
pub fn reaction_cost(danger: i32, attack_suit: Suit) -> i32 {
    if attack_suit.raises_reaction_cost() {
        danger + DIAMONDS_COST_SURCHARGE
    } else {
        danger
    }
}
