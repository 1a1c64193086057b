use std::fmt;

use arrayvec::ArrayVec;

use crate::ability::{AbilityKind, AbilitySlot};
use crate::config::EngineConfig;
use crate::hex::{Direction, Facing, HexCoord, footprint};

use super::EffectList;

/// Unique identifier for a creature on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreatureId(pub u32);

impl fmt::Display for CreatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Owning player of a creature. Team filters compare sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Side(pub u8);

/// Stats that effects can alter.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::EnumIter, strum::IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stat {
    Health,
    Endurance,
    Movement,
    /// Positive while the creature can be moved by others.
    Moveable,
    PierceMitigation,
    SlashMitigation,
    CrushMitigation,
}

/// Signed resource meter; endurance may drop to or below zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Meter {
    pub current: i32,
    pub maximum: i32,
}

impl Meter {
    pub const fn new(current: i32, maximum: i32) -> Self {
        Self { current, maximum }
    }

    pub const fn full(maximum: i32) -> Self {
        Self::new(maximum, maximum)
    }
}

/// Base values for stats that are not tracked by a meter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BaseStats {
    pub movement: i32,
    pub pierce: i32,
    pub slash: i32,
    pub crush: i32,
}

pub type AbilitySlots = ArrayVec<AbilitySlot, { EngineConfig::MAX_ABILITIES }>;

/// A unit on the board.
///
/// Position is the anchor (right-most hex) plus facing. The grid's occupancy
/// map is authoritative for who stands where; `anchor` is kept in sync by
/// [`MatchState`](super::MatchState) and never written directly by abilities.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Creature {
    pub id: CreatureId,
    pub side: Side,
    /// Footprint in hexes (1 to 3).
    pub size: u8,
    pub anchor: HexCoord,
    pub facing: Facing,
    pub health: Meter,
    pub endurance: Meter,
    pub stats: BaseStats,
    pub moveable: bool,
    pub effects: EffectList,
    /// Blocks abilities on the turn the creature enters play.
    pub materialization_sickness: bool,
    /// Round in which the creature entered play.
    pub entered_round: u32,
    pub abilities: AbilitySlots,
}

impl Creature {
    pub fn new(id: CreatureId, side: Side, size: u8, anchor: HexCoord) -> Self {
        Self {
            id,
            side,
            size,
            anchor,
            facing: Facing::Right,
            health: Meter::full(10),
            endurance: Meter::full(5),
            stats: BaseStats::default(),
            moveable: true,
            effects: EffectList::default(),
            materialization_sickness: false,
            entered_round: 0,
            abilities: AbilitySlots::new(),
        }
    }

    pub fn with_facing(mut self, facing: Facing) -> Self {
        self.facing = facing;
        self
    }

    pub fn with_health(mut self, maximum: i32) -> Self {
        self.health = Meter::full(maximum);
        self
    }

    pub fn with_endurance(mut self, endurance: Meter) -> Self {
        self.endurance = endurance;
        self
    }

    pub fn with_stats(mut self, stats: BaseStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_moveable(mut self, moveable: bool) -> Self {
        self.moveable = moveable;
        self
    }

    /// Marks the creature as freshly summoned in `round`.
    pub fn summoned(mut self, round: u32) -> Self {
        self.materialization_sickness = true;
        self.entered_round = round;
        self
    }

    /// Adds an ability slot; extra slots beyond capacity are ignored.
    pub fn with_ability(mut self, kind: AbilityKind, upgraded: bool) -> Self {
        let _ = self.abilities.try_push(AbilitySlot::new(kind, upgraded));
        self
    }

    pub fn footprint(&self) -> ArrayVec<HexCoord, { EngineConfig::MAX_FOOTPRINT }> {
        footprint(self.anchor, self.size)
    }

    /// Left-most hex of the body.
    pub fn tail(&self) -> HexCoord {
        HexCoord::new(self.anchor.x - (self.size.max(1) as i32 - 1), self.anchor.y)
    }

    /// Hex the creature faces out of.
    pub fn front_hex(&self) -> HexCoord {
        match self.facing {
            Facing::Right => self.anchor,
            Facing::Left => self.tail(),
        }
    }

    /// Hex at the back of the body.
    pub fn rear_hex(&self) -> HexCoord {
        match self.facing {
            Facing::Right => self.tail(),
            Facing::Left => self.anchor,
        }
    }

    /// Body edge that leads when moving or looking along `direction`.
    pub fn edge_toward(&self, direction: Direction) -> HexCoord {
        if direction.points_right() {
            self.anchor
        } else {
            self.tail()
        }
    }

    pub fn occupies(&self, hex: HexCoord) -> bool {
        hex.y == self.anchor.y && hex.x <= self.anchor.x && hex.x >= self.tail().x
    }

    pub fn is_alive(&self) -> bool {
        self.health.current > 0
    }

    /// Endurance at or below zero.
    pub fn is_fatigued(&self) -> bool {
        self.endurance.current <= 0
    }

    /// Base value of `stat` before effect alterations.
    pub fn base_stat(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Health => self.health.maximum,
            Stat::Endurance => self.endurance.maximum,
            Stat::Movement => self.stats.movement,
            Stat::Moveable => i32::from(self.moveable),
            Stat::PierceMitigation => self.stats.pierce,
            Stat::SlashMitigation => self.stats.slash,
            Stat::CrushMitigation => self.stats.crush,
        }
    }

    /// Base value plus every active alteration.
    pub fn stat(&self, stat: Stat) -> i32 {
        self.base_stat(stat) + self.effects.alteration(stat)
    }

    pub fn is_moveable(&self) -> bool {
        self.stat(Stat::Moveable) > 0
    }

    pub fn slot(&self, slot: u8) -> Option<&AbilitySlot> {
        self.abilities.get(slot as usize)
    }

    pub fn slot_mut(&mut self, slot: u8) -> Option<&mut AbilitySlot> {
        self.abilities.get_mut(slot as usize)
    }
}
