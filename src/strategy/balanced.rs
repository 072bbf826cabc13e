//! Balanced policy: plays whatever is on top of the shuffled deck.

use crate::cards::Card;
use crate::combat::Combatant;
use crate::core::DiceRng;

/// Chance of playing a card when reacting.
const DEFENSE_CARD_CHANCE: f64 = 0.7;

/// Chance of spending a turn defending.
const DEFEND_ACTION_CHANCE: f64 = 0.2;

pub(super) fn select_attack_card(combatant: &mut Combatant, _rng: &mut DiceRng) -> Option<Card> {
    combatant.deck.draw()
}

pub(super) fn select_defense_card(
    combatant: &mut Combatant,
    _attack: &Card,
    rng: &mut DiceRng,
) -> Option<Card> {
    if combatant.deck.is_empty() || !rng.chance(DEFENSE_CARD_CHANCE) {
        return None;
    }
    combatant.deck.draw()
}

pub(super) fn should_defend(_combatant: &Combatant, rng: &mut DiceRng) -> bool {
    rng.chance(DEFEND_ACTION_CHANCE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::tests::combatant;
    use crate::strategy::StrategyKind;

    #[test]
    fn test_attack_draws_top_card() {
        let mut rng = DiceRng::new(10);
        let mut c = combatant("1s 2s 3s 4s", StrategyKind::Balanced);

        let top = *c.deck.peek().last().unwrap();
        assert_eq!(select_attack_card(&mut c, &mut rng), Some(top));
        assert_eq!(c.deck.remaining(), 3);
    }

    #[test]
    fn test_shuffled_attack_covers_deck() {
        let mut rng = DiceRng::new(13);
        let mut seen = [false; 4];

        for _ in 0..200 {
            let mut c = combatant("1s 2s 3s 4s", StrategyKind::Balanced);
            c.reset(&mut rng);
            let card = select_attack_card(&mut c, &mut rng).unwrap();
            seen[(card.value - 1) as usize] = true;
        }

        assert_eq!(seen, [true; 4]);
    }

    #[test]
    fn test_defense_rate() {
        let mut rng = DiceRng::new(11);
        let attack = Card::new(crate::cards::Suit::Spades, 3);
        let mut played = 0;

        for _ in 0..2000 {
            let mut c = combatant("2d 5h", StrategyKind::Balanced);
            if select_defense_card(&mut c, &attack, &mut rng).is_some() {
                played += 1;
                assert_eq!(c.deck.remaining(), 1);
            } else {
                assert_eq!(c.deck.remaining(), 2);
            }
        }

        assert!((1250..1550).contains(&played), "played {played} of 2000");
    }

    #[test]
    fn test_defend_rate() {
        let mut rng = DiceRng::new(12);
        let c = combatant("2d", StrategyKind::Balanced);
        let defends = (0..2000).filter(|_| should_defend(&c, &mut rng)).count();
        assert!((300..500).contains(&defends), "defended {defends} of 2000");
    }
}
