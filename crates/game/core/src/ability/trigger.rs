use bitflags::bitflags;

bitflags! {
    /// Phases at which an ability is evaluated.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Trigger: u8 {
        const TURN_START = 1 << 0;
        const TURN_END = 1 << 1;
        /// Player-initiated, resolved through a target query.
        const ACTION = 1 << 2;
        /// Counter-response to being damaged.
        const ON_DAMAGE = 1 << 3;
    }
}

impl Trigger {
    pub fn from_phases(phases: &[Phase]) -> Self {
        phases
            .iter()
            .fold(Trigger::empty(), |acc, phase| acc | phase.trigger())
    }

    pub fn matches(self, phase: Phase) -> bool {
        self.contains(phase.trigger())
    }

    pub fn is_interactive(self) -> bool {
        self.contains(Trigger::ACTION)
    }
}

/// A single trigger occurrence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    TurnStart,
    Action,
    TurnEnd,
    Damage,
}

impl Phase {
    pub const fn trigger(self) -> Trigger {
        match self {
            Phase::TurnStart => Trigger::TURN_START,
            Phase::Action => Trigger::ACTION,
            Phase::TurnEnd => Trigger::TURN_END,
            Phase::Damage => Trigger::ON_DAMAGE,
        }
    }

    /// Phases bound to the active creature's own turn.
    pub const fn requires_active_owner(self) -> bool {
        !matches!(self, Phase::Damage)
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_fold_into_trigger_set() {
        let trigger = Trigger::from_phases(&[Phase::TurnEnd, Phase::Damage]);
        assert!(trigger.matches(Phase::TurnEnd));
        assert!(trigger.matches(Phase::Damage));
        assert!(!trigger.matches(Phase::Action));
        assert!(!trigger.is_interactive());
    }
}
