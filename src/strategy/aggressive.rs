//! Aggressive policy: lead with the strongest card, only defend to win.

use super::{highest, lowest_where};
use crate::cards::Card;
use crate::combat::Combatant;
use crate::core::DiceRng;

/// Chance of keeping cards back when no card beats the attack.
const DECLINE_CHANCE: f64 = 0.5;

const DEFEND_ACTION_CHANCE: f64 = 0.1;

pub(super) fn select_attack_card(combatant: &mut Combatant, _rng: &mut DiceRng) -> Option<Card> {
    let index = highest(combatant.deck.peek())?;
    combatant.deck.take(index)
}

/// Win the exchange with the cheapest card that beats the attack.
pub(super) fn select_defense_card(
    combatant: &mut Combatant,
    attack: &Card,
    rng: &mut DiceRng,
) -> Option<Card> {
    let cards = combatant.deck.peek();
    if cards.is_empty() {
        return None;
    }

    let index = match lowest_where(cards, |c| c.value > attack.value) {
        Some(index) => index,
        None if rng.chance(DECLINE_CHANCE) => return None,
        None => lowest_where(cards, |_| true)?,
    };
    combatant.deck.take(index)
}

pub(super) fn should_defend(_combatant: &Combatant, rng: &mut DiceRng) -> bool {
    rng.chance(DEFEND_ACTION_CHANCE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Suit;
    use crate::strategy::tests::combatant;
    use crate::strategy::StrategyKind;

    #[test]
    fn test_attacks_with_highest() {
        let mut rng = DiceRng::new(1);
        let mut c = combatant("5s 9h 2c 9d", StrategyKind::Aggressive);

        assert_eq!(select_attack_card(&mut c, &mut rng), Some(Card::new(Suit::Hearts, 9)));
        assert_eq!(select_attack_card(&mut c, &mut rng), Some(Card::new(Suit::Diamonds, 9)));
        assert_eq!(select_attack_card(&mut c, &mut rng).map(|c| c.value), Some(5));
    }

    #[test]
    fn test_defends_with_lowest_winner() {
        let mut rng = DiceRng::new(2);
        let mut c = combatant("4s 5h 8c", StrategyKind::Aggressive);

        // 4 only ties, so the cheapest winner is 5
        let chosen = select_defense_card(&mut c, &Card::new(Suit::Spades, 4), &mut rng);
        assert_eq!(chosen, Some(Card::new(Suit::Hearts, 5)));
    }

    #[test]
    fn test_outmatched_declines_half_the_time() {
        let mut rng = DiceRng::new(3);
        let attack = Card::new(Suit::Spades, 6);
        let mut declined = 0;

        for _ in 0..2000 {
            let mut c = combatant("6c 2h", StrategyKind::Aggressive);
            match select_defense_card(&mut c, &attack, &mut rng) {
                Some(card) => assert_eq!(card, Card::new(Suit::Hearts, 2)),
                None => declined += 1,
            }
        }

        assert!((850..1150).contains(&declined), "declined {declined} of 2000");
    }

    #[test]
    fn test_rarely_defends() {
        let mut rng = DiceRng::new(4);
        let c = combatant("2d", StrategyKind::Aggressive);
        let defends = (0..4000).filter(|_| should_defend(&c, &mut rng)).count();
        assert!((250..550).contains(&defends), "defended {defends} of 4000");
    }
}
