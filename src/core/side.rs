//! Combatant identification and per-side data storage.
//!
//! ## Side
//!
//! A match always has exactly two combatants: the protagonist and the
//! antagonist.
//!
//! ## Sides
//!
//! Per-side storage with one slot for each combatant, indexable by `Side`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two combatants in a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Protagonist,
    Antagonist,
}

impl Side {
    /// Both sides, protagonist first.
    pub const BOTH: [Side; 2] = [Side::Protagonist, Side::Antagonist];

    /// The other combatant.
    #[must_use]
    pub const fn opponent(self) -> Side {
        match self {
            Side::Protagonist => Side::Antagonist,
            Side::Antagonist => Side::Protagonist,
        }
    }

    /// Display name used in snapshots and logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Side::Protagonist => "Protagonist",
            Side::Antagonist => "Antagonist",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One value per combatant.
///
/// ```
/// use card_duel_sim::core::{Side, Sides};
///
/// let mut damage = Sides::new(0, 0);
/// damage[Side::Antagonist] += 5;
/// assert_eq!(damage[Side::Antagonist], 5);
/// assert_eq!(damage[Side::Protagonist], 0);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sides<T> {
    pub protagonist: T,
    pub antagonist: T,
}

impl<T> Sides<T> {
    /// Create from explicit values.
    pub const fn new(protagonist: T, antagonist: T) -> Self {
        Self {
            protagonist,
            antagonist,
        }
    }

    /// Create with a factory called once per side, protagonist first.
    pub fn from_fn(mut factory: impl FnMut(Side) -> T) -> Self {
        let protagonist = factory(Side::Protagonist);
        let antagonist = factory(Side::Antagonist);
        Self::new(protagonist, antagonist)
    }

    /// Get a reference to one side's value.
    #[must_use]
    pub fn get(&self, side: Side) -> &T {
        match side {
            Side::Protagonist => &self.protagonist,
            Side::Antagonist => &self.antagonist,
        }
    }

    /// Get a mutable reference to one side's value.
    pub fn get_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::Protagonist => &mut self.protagonist,
            Side::Antagonist => &mut self.antagonist,
        }
    }

    /// Borrow both values mutably, `first` side first.
    pub fn pair_mut(&mut self, first: Side) -> (&mut T, &mut T) {
        match first {
            Side::Protagonist => (&mut self.protagonist, &mut self.antagonist),
            Side::Antagonist => (&mut self.antagonist, &mut self.protagonist),
        }
    }

    /// Transform both values.
    pub fn map<U>(self, mut f: impl FnMut(Side, T) -> U) -> Sides<U> {
        Sides::new(
            f(Side::Protagonist, self.protagonist),
            f(Side::Antagonist, self.antagonist),
        )
    }

    /// Borrow both values.
    pub fn as_ref(&self) -> Sides<&T> {
        Sides::new(&self.protagonist, &self.antagonist)
    }

    /// Iterate over (Side, &T) pairs, protagonist first.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        [
            (Side::Protagonist, &self.protagonist),
            (Side::Antagonist, &self.antagonist),
        ]
        .into_iter()
    }
}

impl<T> Index<Side> for Sides<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        self.get(side)
    }
}

impl<T> IndexMut<Side> for Sides<T> {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        self.get_mut(side)
    }
}
