//! Running damage statistics.

use serde::{Deserialize, Serialize};

/// Damage taken by one combatant over a match.
///
/// Only positive hits count: recording 0 changes nothing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageStats {
    /// Sum of all recorded hits.
    pub total: u32,

    /// Smallest recorded hit.
    pub min: Option<u32>,

    /// Largest recorded hit.
    pub max: Option<u32>,

    /// Number of recorded hits.
    pub count: u32,
}

impl DamageStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one damage event.
    pub fn record(&mut self, damage: u32) {
        if damage == 0 {
            return;
        }

        self.total = self.total.saturating_add(damage);
        self.count += 1;
        self.min = Some(self.min.map_or(damage, |m| m.min(damage)));
        self.max = Some(self.max.map_or(damage, |m| m.max(damage)));
    }

    /// Average damage per hit, 0 when nothing has landed.
    #[must_use]
    pub fn average(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total as f64 / self.count as f64
        }
    }

    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_average_is_zero() {
        let stats = DamageStats::new();
        assert_eq!(stats.average(), 0.0);
        assert_eq!(stats.min, None);
        assert_eq!(stats.max, None);
    }

    #[test]
    fn test_zero_damage_is_ignored() {
        let mut stats = DamageStats::new();
        stats.record(0);
        stats.record(0);

        assert_eq!(stats, DamageStats::default());
        assert_eq!(stats.average(), 0.0);
    }

    #[test]
    fn test_record() {
        let mut stats = DamageStats::new();
        stats.record(4);
        stats.record(0);
        stats.record(1);
        stats.record(7);

        assert_eq!(stats.total, 12);
        assert_eq!(stats.count, 3);
        assert_eq!(stats.min, Some(1));
        assert_eq!(stats.max, Some(7));
        assert_eq!(stats.average(), 4.0);
    }

    #[test]
    fn test_total_saturates() {
        let mut stats = DamageStats::new();
        stats.record(u32::MAX - 1);
        stats.record(5);
        assert_eq!(stats.total, u32::MAX);
        assert_eq!(stats.max, Some(u32::MAX - 1));
    }

    #[test]
    fn test_reset() {
        let mut stats = DamageStats::new();
        stats.record(3);
        stats.reset();
        assert_eq!(stats.count, 0);
        assert_eq!(stats.total, 0);
    }

    #[test]
    fn test_serialization() {
        let mut stats = DamageStats::new();
        stats.record(5);

        let json = serde_json::to_string(&stats).unwrap();
        let deserialized: DamageStats = serde_json::from_str(&json).unwrap();
        assert_eq!(stats, deserialized);
    }
}
