use crate::state::{Creature, Side};

/// Declarative side filter evaluated against the acting creature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetTeam {
    /// The actor's own side.
    Ally,
    Enemy,
    Both,
}

impl TargetTeam {
    pub fn matches(self, actor: Side, candidate: Side) -> bool {
        match self {
            TargetTeam::Ally => actor == candidate,
            TargetTeam::Enemy => actor != candidate,
            TargetTeam::Both => true,
        }
    }
}

/// Per-candidate predicate on top of the team filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Condition {
    Moveable,
    Fatigued,
    NotFatigued,
    /// Footprint no larger than the given size.
    MaxSize(u8),
}

impl Condition {
    pub fn holds(self, candidate: &Creature) -> bool {
        match self {
            Condition::Moveable => candidate.is_moveable(),
            Condition::Fatigued => candidate.is_fatigued(),
            Condition::NotFatigued => !candidate.is_fatigued(),
            Condition::MaxSize(size) => candidate.size <= size,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetFilter {
    pub team: TargetTeam,
    pub conditions: Vec<Condition>,
}

impl TargetFilter {
    pub fn new(team: TargetTeam) -> Self {
        Self {
            team,
            conditions: Vec::new(),
        }
    }

    pub fn with(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Team and liveness only; the actor itself never qualifies.
    pub fn accepts_team(&self, actor: &Creature, candidate: &Creature) -> bool {
        candidate.id != actor.id
            && candidate.is_alive()
            && self.team.matches(actor.side, candidate.side)
    }

    pub fn accepts(&self, actor: &Creature, candidate: &Creature) -> bool {
        self.accepts_team(actor, candidate)
            && self.conditions.iter().all(|condition| condition.holds(candidate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex::HexCoord;
    use crate::state::CreatureId;

    #[test]
    fn conditions_narrow_team_matches() {
        let actor = Creature::new(CreatureId(1), Side(0), 1, HexCoord::new(0, 0));
        let heavy = Creature::new(CreatureId(2), Side(1), 3, HexCoord::new(4, 0)).with_moveable(false);

        let enemies = TargetFilter::new(TargetTeam::Enemy);
        assert!(enemies.accepts(&actor, &heavy));
        assert!(!enemies.accepts(&actor, &actor));
        assert!(!TargetFilter::new(TargetTeam::Ally).accepts(&actor, &heavy));

        let pullable = enemies.clone().with(Condition::Moveable);
        assert!(pullable.accepts_team(&actor, &heavy));
        assert!(!pullable.accepts(&actor, &heavy));
        assert!(!enemies.with(Condition::MaxSize(2)).accepts(&actor, &heavy));
    }
}
