use strum::{AsRefStr, Display, EnumString};

/// How the gauge scheduler behaves while actions are resolving.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumString, AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AtbMode {
    /// Gauges fill every tick regardless of what else is happening.
    #[default]
    Active,
    /// Gauges freeze while the queue is busy or a player is choosing a command.
    Wait,
}

/// Battle configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Gauge value at which a combatant becomes ready to act.
    pub gauge_full: u32,
    /// Lower bound of the per-combatant speed band.
    pub speed_base: u32,
    /// Width of the random speed band rolled once at battle start.
    pub speed_spread: u32,
    /// Agility points per extra speed unit. Zero disables the agility term.
    pub agility_divisor: u32,
    /// Ticks per battle turn, used by turn-count rule conditions.
    pub turn_length: u32,
    /// Ticks the executor holds a result on screen before finishing.
    pub result_hold_ticks: u32,
    /// Ticks a start-of-action notification stays visible.
    pub notification_ticks: u32,
    /// Variance level for basic attacks (each level is 5%).
    pub attack_variance: u32,
    pub atb_mode: AtbMode,
    /// Allies open the battle with a full gauge.
    pub first_strike: bool,
    pub escape_allowed: bool,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_ALLIES: usize = 4;
    pub const MAX_ENEMIES: usize = 8;
    pub const MAX_COMBATANTS: usize = Self::MAX_ALLIES + Self::MAX_ENEMIES;
    pub const MAX_STATUSES: usize = 16;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_GAUGE_FULL: u32 = 3000;
    pub const DEFAULT_SPEED_BASE: u32 = 25;
    pub const DEFAULT_SPEED_SPREAD: u32 = 10;
    pub const DEFAULT_AGILITY_DIVISOR: u32 = 20;
    pub const DEFAULT_TURN_LENGTH: u32 = 100;
    pub const DEFAULT_RESULT_HOLD_TICKS: u32 = 30;
    pub const DEFAULT_NOTIFICATION_TICKS: u32 = 60;
    pub const DEFAULT_ATTACK_VARIANCE: u32 = 4;

    pub fn new() -> Self {
        Self {
            gauge_full: Self::DEFAULT_GAUGE_FULL,
            speed_base: Self::DEFAULT_SPEED_BASE,
            speed_spread: Self::DEFAULT_SPEED_SPREAD,
            agility_divisor: Self::DEFAULT_AGILITY_DIVISOR,
            turn_length: Self::DEFAULT_TURN_LENGTH,
            result_hold_ticks: Self::DEFAULT_RESULT_HOLD_TICKS,
            notification_ticks: Self::DEFAULT_NOTIFICATION_TICKS,
            attack_variance: Self::DEFAULT_ATTACK_VARIANCE,
            atb_mode: AtbMode::Active,
            first_strike: false,
            escape_allowed: true,
        }
    }

    /// Speed increment for a combatant, given its agility and a band roll in
    /// `[0, speed_spread)`.
    pub fn speed_for(&self, agility: i32, band_roll: u32) -> u32 {
        let agility_bonus = match self.agility_divisor {
            0 => 0,
            divisor => agility.max(0) as u32 / divisor,
        };
        (self.speed_base + band_roll + agility_bonus).max(1)
    }

    /// Elapsed battle turns for a tick clock value.
    pub fn turns_at(&self, clock: u64) -> u32 {
        (clock / u64::from(self.turn_length.max(1))) as u32
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_stays_inside_band_without_agility() {
        let config = BattleConfig {
            agility_divisor: 0,
            ..BattleConfig::default()
        };
        for roll in 0..config.speed_spread {
            let speed = config.speed_for(999, roll);
            assert!((25..35).contains(&speed));
        }
    }

    #[test]
    fn agility_raises_speed() {
        let config = BattleConfig::default();
        assert_eq!(config.speed_for(0, 0), 25);
        assert_eq!(config.speed_for(100, 3), 33);
        assert_eq!(config.speed_for(-40, 0), 25);
    }

    #[test]
    fn turn_length_zero_does_not_divide_by_zero() {
        let config = BattleConfig {
            turn_length: 0,
            ..BattleConfig::default()
        };
        assert_eq!(config.turns_at(7), 7);
        assert_eq!(BattleConfig::default().turns_at(250), 2);
    }
}
