//! Turn engine for a single match.
//!
//! Each turn one side attacks and the other defends. An attack is resolved in
//! two layers: a d20 hit roll against the defender's effective AC, then a card
//! duel. The defender may pay resources to react with a card of its own, and
//! may counter once per attack, either after a miss or after taking damage.

use tracing::{debug, trace};

use crate::cards::{Card, Deck};
use crate::combat::Combatant;
use crate::core::{DiceRng, Result, Side, SimError, SimulationConfig, Sides};
use crate::rules::{resolve_card_duel, resolve_hit_roll, TheoreticalDamage};

use super::snapshot::{
    AttackRecord, CounterRecord, SideSnapshot, SimulationResult, TurnAction, TurnSnapshot,
};

/// A match between a protagonist and an antagonist.
///
/// ```
/// use card_duel_sim::core::{CombatantConfig, DiceRng, SimulationConfig};
/// use card_duel_sim::simulation::CombatSimulation;
///
/// let config = SimulationConfig::new(
///     CombatantConfig::new("2d 3h 4s"),
///     CombatantConfig::new("5c 1s"),
/// )
/// .with_turns(6);
///
/// let result = CombatSimulation::from_config(&config, DiceRng::new(7))?.run();
/// assert_eq!(result.turns.len(), 6);
/// # Ok::<(), card_duel_sim::core::SimError>(())
/// ```
#[derive(Clone, Debug)]
pub struct CombatSimulation {
    combatants: Sides<Combatant>,
    num_turns: usize,
    protagonist_starts: bool,
    current_turn: usize,
    turns: Vec<TurnSnapshot>,
    rng: DiceRng,
}

impl CombatSimulation {
    pub fn new(
        protagonist: Combatant,
        antagonist: Combatant,
        num_turns: usize,
        protagonist_starts: bool,
        rng: DiceRng,
    ) -> Self {
        Self {
            combatants: Sides::new(protagonist, antagonist),
            num_turns,
            protagonist_starts,
            current_turn: 0,
            turns: Vec::with_capacity(num_turns),
            rng,
        }
    }

    /// Build both combatants from `config`.
    pub fn from_config(config: &SimulationConfig, rng: DiceRng) -> Result<Self> {
        let decks = parse_decks(config)?;
        Ok(Self::with_decks(config, decks, rng))
    }

    /// Build both combatants around decks that are already parsed.
    pub(crate) fn with_decks(config: &SimulationConfig, decks: Sides<Deck>, rng: DiceRng) -> Self {
        let configs = config.combatants();
        let combatants = decks.map(|side, deck| Combatant::with_deck(side, configs[side], deck));
        Self {
            combatants,
            num_turns: config.num_turns,
            protagonist_starts: config.protagonist_starts,
            current_turn: 0,
            turns: Vec::with_capacity(config.num_turns),
            rng,
        }
    }

    #[must_use]
    pub fn combatant(&self, side: Side) -> &Combatant {
        &self.combatants[side]
    }

    /// Mutable access, for setting up a position before playing turns.
    pub fn combatant_mut(&mut self, side: Side) -> &mut Combatant {
        &mut self.combatants[side]
    }

    #[must_use]
    pub fn current_turn(&self) -> usize {
        self.current_turn
    }

    #[must_use]
    pub fn num_turns(&self) -> usize {
        self.num_turns
    }

    /// Snapshots of every turn played so far.
    #[must_use]
    pub fn turns(&self) -> &[TurnSnapshot] {
        &self.turns
    }

    /// Side that attacks on `turn`. Sides alternate, starting with the
    /// protagonist when `protagonist_starts` is set.
    #[must_use]
    pub fn attacker_for_turn(&self, turn: usize) -> Side {
        if (turn % 2 == 0) == self.protagonist_starts {
            Side::Protagonist
        } else {
            Side::Antagonist
        }
    }

    /// Play one turn and record its snapshot.
    ///
    /// Does not reset or shuffle anything; [`run`](Self::run) does that
    /// before the first turn.
    pub fn run_turn(&mut self) -> &TurnSnapshot {
        let turn = self.current_turn;
        let attacker_side = self.attacker_for_turn(turn);
        let rng = &mut self.rng;
        let (attacker, defender) = self.combatants.pair_mut(attacker_side);

        attacker.clear_temp_bonuses();

        let strategy = attacker.strategy;
        let defends = attacker.deck.is_empty() || strategy.should_defend(attacker, rng);

        let (action, attack) = if defends {
            attacker.apply_defend();
            (TurnAction::Defend, None)
        } else {
            match resolve_attack(attacker, defender, rng) {
                Some(record) => (TurnAction::Attack, Some(record)),
                None => {
                    attacker.apply_defend();
                    (TurnAction::NoCards, None)
                }
            }
        };

        trace!(
            turn,
            attacker = %attacker_side,
            ?action,
            dealt = attack.map_or(0, |a| a.damage_dealt),
            "turn resolved"
        );

        self.turns.push(TurnSnapshot {
            turn,
            attacker: attacker_side,
            action,
            sides: self.combatants.as_ref().map(|_, c| SideSnapshot::of(c)),
            attack,
        });
        self.current_turn += 1;

        &self.turns[self.turns.len() - 1]
    }

    /// Reset both combatants and play the full match.
    pub fn run(mut self) -> SimulationResult {
        // Each side can take at most what the opposing deck deals.
        let theoretical = Sides::new(
            TheoreticalDamage::of_deck(self.combatants.antagonist.deck.original()),
            TheoreticalDamage::of_deck(self.combatants.protagonist.deck.original()),
        );

        for side in Side::BOTH {
            self.combatants[side].reset(&mut self.rng);
        }
        self.current_turn = 0;
        self.turns.clear();

        debug!(seed = self.rng.seed(), turns = self.num_turns, "simulation started");

        while self.current_turn < self.num_turns {
            self.run_turn();
        }

        let damage = self.combatants.map(|_, c| c.damage_taken);

        debug!(
            seed = self.rng.seed(),
            protagonist_damage = damage.protagonist.total,
            antagonist_damage = damage.antagonist.total,
            "simulation finished"
        );

        SimulationResult {
            seed: self.rng.seed(),
            total_turns: self.num_turns,
            turns: self.turns,
            damage,
            theoretical,
        }
    }
}

/// Resolve an attack. Returns `None` if the attacker had no card to play.
fn resolve_attack(
    attacker: &mut Combatant,
    defender: &mut Combatant,
    rng: &mut DiceRng,
) -> Option<AttackRecord> {
    let strategy = attacker.strategy;
    let attack_card = strategy.select_attack_card(attacker, rng)?;
    attacker.cards_played += 1;

    let hit = resolve_hit_roll(rng, attacker, defender, &attack_card);
    let mut record = AttackRecord::new(attack_card, hit);
    let mut guard = CounterGuard::new();

    if !hit.success {
        record.counter = guard.try_counter(defender, attacker, &attack_card, rng);
        return Some(record);
    }

    let reacts = rng.chance(defender.reaction_chance)
        && defender.can_react(attack_card.suit)
        && !defender.deck.is_empty();

    if reacts {
        // The cost is paid even if the strategy then declines to play a card.
        defender.pay_reaction_cost(attack_card.suit);
        record.reaction = true;

        let strategy = defender.strategy;
        record.defense_card = strategy.select_defense_card(defender, &attack_card, rng);
        if record.defense_card.is_some() {
            defender.cards_played += 1;
        }
    }

    let duel = resolve_card_duel(rng, &attack_card, record.defense_card.as_ref(), false);
    attacker.take_damage(duel.attacker_damage);
    defender.take_damage(duel.defender_damage);

    record.damage_dealt = duel.defender_damage;
    record.damage_taken = duel.attacker_damage;
    record.duel = Some(duel.kind);

    if duel.defender_damage > 0 {
        record.counter = guard.try_counter(defender, attacker, &attack_card, rng);
    }

    Some(record)
}

/// Allows at most one counter per attack.
#[derive(Debug, Default)]
pub(crate) struct CounterGuard {
    spent: bool,
}

impl CounterGuard {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Let `defender` strike back at `attacker`, if it wants to and can pay.
    ///
    /// The counter costs the same as a reaction to `attack`, and once paid it
    /// counts as having happened even if it misses. The target of a counter
    /// cannot react to it.
    pub(crate) fn try_counter(
        &mut self,
        defender: &mut Combatant,
        attacker: &mut Combatant,
        attack: &Card,
        rng: &mut DiceRng,
    ) -> Option<CounterRecord> {
        if self.spent {
            return None;
        }

        let wants = rng.chance(defender.counter_chance);
        if !wants || !defender.can_react(attack.suit) || defender.deck.is_empty() {
            return None;
        }

        self.spent = true;
        defender.pay_counter_cost(attack.suit);

        let strategy = defender.strategy;
        let card = strategy.select_attack_card(defender, rng)?;
        defender.cards_played += 1;

        let hit = resolve_hit_roll(rng, defender, attacker, &card);
        let damage = if hit.success {
            resolve_card_duel(rng, &card, None, true).defender_damage
        } else {
            0
        };
        attacker.take_damage(damage);

        trace!(by = %defender.side(), %card, hit = hit.success, damage, "counter");

        Some(CounterRecord { card, hit, damage })
    }
}

/// Parse both decks, naming the side of the first one that fails.
pub(crate) fn parse_decks(config: &SimulationConfig) -> Result<Sides<Deck>> {
    let configs = config.combatants();
    let parse = |side: Side| {
        Deck::parse(&configs[side].deck).map_err(|source| SimError::Deck { side, source })
    };
    Ok(Sides::new(parse(Side::Protagonist)?, parse(Side::Antagonist)?))
}

/// Run one match as described by `config`.
///
/// Uses `config.seed` when set; otherwise seeds from the OS and records the
/// chosen seed in the result.
pub fn run_single_simulation(config: &SimulationConfig) -> Result<SimulationResult> {
    let rng = config.seed.map_or_else(DiceRng::from_entropy, DiceRng::new);
    Ok(CombatSimulation::from_config(config, rng)?.run())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Suit;
    use crate::combat::DEFEND_AC_BONUS;
    use crate::core::CombatantConfig;
    use crate::rules::DuelKind;
    use crate::strategy::StrategyKind;

    fn quiet(deck: &str) -> CombatantConfig {
        CombatantConfig::new(deck)
            .with_reaction_chance(0.0)
            .with_counter_chance(0.0)
    }

    fn fighter(side: Side, config: &CombatantConfig) -> Combatant {
        Combatant::new(side, config).unwrap()
    }

    // =========================================================================
    // Turn order
    // =========================================================================

    #[test]
    fn test_attacker_alternates() {
        let config = SimulationConfig::new(quiet("2s"), quiet("2s"));
        let sim = CombatSimulation::from_config(&config, DiceRng::new(1)).unwrap();
        assert_eq!(sim.attacker_for_turn(0), Side::Protagonist);
        assert_eq!(sim.attacker_for_turn(1), Side::Antagonist);
        assert_eq!(sim.attacker_for_turn(2), Side::Protagonist);

        let config = config.with_protagonist_starts(false);
        let sim = CombatSimulation::from_config(&config, DiceRng::new(1)).unwrap();
        assert_eq!(sim.attacker_for_turn(0), Side::Antagonist);
        assert_eq!(sim.attacker_for_turn(1), Side::Protagonist);
    }

    #[test]
    fn test_empty_deck_forces_defend() {
        let config = SimulationConfig::new(quiet(""), quiet("3h")).with_turns(3);
        let mut sim = CombatSimulation::from_config(&config, DiceRng::new(2)).unwrap();

        let snap = sim.run_turn().clone();
        assert_eq!(snap.action, TurnAction::Defend);
        assert_eq!(snap.attacker, Side::Protagonist);
        assert_eq!(sim.combatant(Side::Protagonist).temp_ac_bonus, DEFEND_AC_BONUS);

        // The bonus lasts through the opponent's turn and clears on the next own turn
        sim.run_turn();
        assert_eq!(sim.combatant(Side::Protagonist).temp_ac_bonus, DEFEND_AC_BONUS);
        sim.run_turn();
        assert_eq!(sim.combatant(Side::Protagonist).temp_ac_bonus, DEFEND_AC_BONUS);
        assert_eq!(sim.current_turn(), 3);
    }

    #[test]
    fn test_runs_exact_turn_count() {
        let config = SimulationConfig::new(CombatantConfig::new("2d"), CombatantConfig::new("3s"))
            .with_turns(25);
        let result = CombatSimulation::from_config(&config, DiceRng::new(3)).unwrap().run();

        assert_eq!(result.total_turns, 25);
        assert_eq!(result.turns.len(), 25);
        for (i, snap) in result.turns.iter().enumerate() {
            assert_eq!(snap.turn, i);
        }
    }

    #[test]
    fn test_zero_turns() {
        let config = SimulationConfig::new(quiet("2s"), quiet("2s")).with_turns(0);
        let result = CombatSimulation::from_config(&config, DiceRng::new(4)).unwrap().run();
        assert!(result.turns.is_empty());
        assert_eq!(result.total_damage(Side::Protagonist), 0);
        assert_eq!(result.total_damage(Side::Antagonist), 0);
    }

    // =========================================================================
    // Attacks
    // =========================================================================

    #[test]
    fn test_attack_consumes_card_and_records_hit() {
        let config = SimulationConfig::new(quiet("1s 2s 3s 4s 5s"), quiet("2s"));

        for seed in 0..50 {
            let mut sim = CombatSimulation::from_config(&config, DiceRng::new(seed)).unwrap();
            let snap = sim.run_turn().clone();
            let Some(attack) = snap.attack else {
                assert_eq!(snap.action, TurnAction::Defend);
                continue;
            };

            assert_eq!(snap.action, TurnAction::Attack);
            assert_eq!(snap.sides.protagonist.cards_remaining, 4);
            assert_eq!(sim.combatant(Side::Protagonist).cards_played, 1);
            assert!(!attack.reaction);
            assert!(attack.counter.is_none());
            assert_eq!(attack.defense_card, None);

            if attack.hit.success {
                assert!(attack.damage_dealt >= attack.attack_card.value);
                assert_eq!(snap.sides.antagonist.damage_taken, attack.damage_dealt);
            } else {
                assert_eq!(attack.duel, None);
                assert_eq!(snap.sides.antagonist.damage_taken, 0);
            }
        }
    }

    #[test]
    fn test_reaction_pays_cost() {
        let attacker = quiet("5d 5d 5d").with_hit_bonus(30);
        let defender = quiet("9s 9s").with_reaction_chance(1.0).with_resources(10);
        let config = SimulationConfig::new(attacker, defender).with_turns(1);

        for seed in 0..30 {
            let mut sim = CombatSimulation::from_config(&config, DiceRng::new(seed)).unwrap();
            let snap = sim.run_turn().clone();
            let Some(attack) = snap.attack else { continue };

            assert!(attack.hit.success);
            assert!(attack.reaction);
            // Diamonds raise the cost from 3 to 5
            assert_eq!(snap.sides.antagonist.resources, 5);
            assert_eq!(snap.sides.antagonist.reactions_used, 1);
            assert_eq!(snap.sides.antagonist.counters_used, 0);
        }
    }

    #[test]
    fn test_reaction_needs_resources() {
        let attacker = quiet("5s").with_hit_bonus(30);
        let defender = quiet("9s 9s 9s").with_reaction_chance(1.0).with_resources(2);
        let config = SimulationConfig::new(attacker, defender);
        let mut attacks = 0;

        for seed in 0..30 {
            let mut sim = CombatSimulation::from_config(&config, DiceRng::new(seed)).unwrap();
            let snap = sim.run_turn().clone();
            let Some(attack) = snap.attack else { continue };
            attacks += 1;

            // Cards are available, only the cost of 3 is not
            assert_eq!(snap.sides.antagonist.cards_remaining, 3);
            assert!(!attack.reaction);
            assert_eq!(attack.defense_card, None);
            assert_eq!(snap.sides.antagonist.resources, 2);
        }

        assert!(attacks > 0);
    }

    // =========================================================================
    // Counters
    // =========================================================================

    #[test]
    fn test_counter_guard_allows_one() {
        let mut rng = DiceRng::new(6);
        let mut attacker = fighter(Side::Protagonist, &quiet("2s"));
        let mut defender = fighter(
            Side::Antagonist,
            &quiet("3s 4s 5s").with_counter_chance(1.0).with_resources(20),
        );
        let attack = Card::new(Suit::Spades, 2);

        let mut guard = CounterGuard::new();
        assert!(guard.try_counter(&mut defender, &mut attacker, &attack, &mut rng).is_some());
        assert!(guard.try_counter(&mut defender, &mut attacker, &attack, &mut rng).is_none());

        assert_eq!(defender.counters_used, 1);
        assert_eq!(defender.reactions_used, 1);
        assert_eq!(defender.resources, 17);
        assert_eq!(defender.deck.remaining(), 2);
    }

    #[test]
    fn test_counter_requires_resources_and_cards() {
        let mut rng = DiceRng::new(7);
        let mut attacker = fighter(Side::Protagonist, &quiet("2s"));
        let attack = Card::new(Suit::Diamonds, 2);

        let mut broke = fighter(
            Side::Antagonist,
            &quiet("3s").with_counter_chance(1.0).with_resources(4),
        );
        assert!(CounterGuard::new()
            .try_counter(&mut broke, &mut attacker, &attack, &mut rng)
            .is_none());
        assert_eq!(broke.resources, 4);

        let mut empty = fighter(Side::Antagonist, &quiet("").with_counter_chance(1.0));
        assert!(CounterGuard::new()
            .try_counter(&mut empty, &mut attacker, &attack, &mut rng)
            .is_none());
        assert_eq!(empty.counters_used, 0);
    }

    #[test]
    fn test_counter_damages_original_attacker() {
        let mut rng = DiceRng::new(8);
        let attack = Card::new(Suit::Spades, 2);

        for _ in 0..50 {
            let mut attacker = fighter(Side::Protagonist, &quiet("2s"));
            let mut defender = fighter(
                Side::Antagonist,
                &quiet("3h").with_counter_chance(1.0).with_hit_bonus(30),
            );
            let record = CounterGuard::new()
                .try_counter(&mut defender, &mut attacker, &attack, &mut rng)
                .unwrap();

            assert!(record.hit.success);
            assert_eq!(record.card, Card::new(Suit::Hearts, 3));
            // 3d4 + 2, never a tie since nothing defends a counter
            assert!((5..=14).contains(&record.damage));
            assert_eq!(attacker.damage_taken.total, record.damage);
        }
    }

    #[test]
    fn test_counter_after_miss() {
        let attacker = quiet("4s 4s 4s").with_hit_bonus(-100);
        let defender = quiet("3s 3s 3s").with_counter_chance(1.0).with_resources(10);
        let config = SimulationConfig::new(attacker, defender);
        let mut attacks = 0;

        for seed in 0..50 {
            let mut sim = CombatSimulation::from_config(&config, DiceRng::new(seed)).unwrap();
            let snap = sim.run_turn().clone();
            let Some(attack) = snap.attack else { continue };
            attacks += 1;

            assert!(!attack.hit.success);
            assert_eq!(attack.duel, None);
            assert_eq!(attack.damage_dealt, 0);

            let counter = attack.counter.unwrap();
            assert_eq!(counter.card, Card::new(Suit::Spades, 3));
            assert_eq!(snap.sides.protagonist.damage_taken, counter.damage);
            assert_eq!(snap.sides.antagonist.counters_used, 1);
            assert_eq!(snap.sides.antagonist.resources, 7);
            assert_eq!(snap.sides.antagonist.cards_remaining, 2);
        }

        assert!(attacks > 0);
    }

    #[test]
    fn test_no_counter_when_defense_wins() {
        let attacker = quiet("1s").with_hit_bonus(30);
        let defender = CombatantConfig::new("9s")
            .with_reaction_chance(1.0)
            .with_counter_chance(1.0)
            .with_resources(20)
            .with_strategy(StrategyKind::Aggressive);
        let config = SimulationConfig::new(attacker, defender);
        let mut attacks = 0;

        for seed in 0..50 {
            let mut sim = CombatSimulation::from_config(&config, DiceRng::new(seed)).unwrap();
            let snap = sim.run_turn().clone();
            let Some(attack) = snap.attack else { continue };
            attacks += 1;

            assert!(attack.hit.success);
            assert!(attack.reaction);
            assert_eq!(attack.defense_card, Some(Card::new(Suit::Spades, 9)));
            assert_eq!(attack.duel, Some(DuelKind::DefenseWins { margin: 8 }));
            assert_eq!(attack.damage_dealt, 0);
            assert!((8..=32).contains(&attack.damage_taken));

            // The defender took nothing, so there is nothing to counter
            assert!(attack.counter.is_none());
            assert_eq!(snap.sides.antagonist.counters_used, 0);
            assert_eq!(snap.sides.antagonist.resources, 17);
        }

        assert!(attacks > 0);
    }

    #[test]
    fn test_at_most_one_counter_per_turn() {
        let eager = CombatantConfig::new("1s 2c 3d 4h 5s 6c 7d 8h")
            .with_reaction_chance(1.0)
            .with_counter_chance(1.0)
            .with_resources(100);
        let config = SimulationConfig::new(eager.clone(), eager).with_turns(16);

        for seed in 0..40 {
            let result = CombatSimulation::from_config(&config, DiceRng::new(seed)).unwrap().run();
            let mut previous = Sides::<u32>::default();

            for snap in &result.turns {
                let defender = snap.defender();
                let counters = snap.sides[defender].counters_used;
                assert!(counters - previous[defender] <= 1);
                assert_eq!(snap.sides[snap.attacker].counters_used, previous[snap.attacker]);
                previous = snap.sides.as_ref().map(|_, s| s.counters_used);
            }

            let counters = previous.protagonist + previous.antagonist;
            assert_eq!(result.counter_count(), counters as usize);
        }
    }

    // =========================================================================
    // Results
    // =========================================================================

    #[test]
    fn test_same_seed_same_result() {
        let config = SimulationConfig::new(
            CombatantConfig::new("2d 3h 4s 5c 6d"),
            CombatantConfig::new("1s 7h 2c"),
        )
        .with_turns(12);

        let a = CombatSimulation::from_config(&config, DiceRng::new(99)).unwrap().run();
        let b = CombatSimulation::from_config(&config, DiceRng::new(99)).unwrap().run();
        assert_eq!(a, b);
    }

    #[test]
    fn test_theoretical_comes_from_opposing_deck() {
        let config = SimulationConfig::new(quiet("3h"), quiet("2s 2s"));
        let result = CombatSimulation::from_config(&config, DiceRng::new(10)).unwrap().run();

        assert_eq!(result.theoretical.protagonist.max, 16);
        assert_eq!(result.theoretical.antagonist.min, 5);
        assert_eq!(result.theoretical.antagonist.avg, 9.5);
        assert_eq!(result.theoretical.antagonist.max, 14);
    }

    #[test]
    fn test_parse_decks_names_side() {
        let config = SimulationConfig::new(CombatantConfig::new("2s"), CombatantConfig::new("2s 9x"));
        let err = parse_decks(&config).unwrap_err();
        assert!(matches!(err, SimError::Deck { side: Side::Antagonist, .. }));
    }

    #[test]
    fn test_run_single_simulation_uses_seed() {
        let config = SimulationConfig::new(CombatantConfig::new("2d 3h"), CombatantConfig::new("4s"))
            .with_seed(1234);
        let result = run_single_simulation(&config).unwrap();
        assert_eq!(result.seed, 1234);
        assert_eq!(result, run_single_simulation(&config).unwrap());
    }
}
