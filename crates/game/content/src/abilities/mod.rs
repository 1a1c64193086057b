//! Ability behaviours and the catalog that serves them to the engine.
//!
//! Each ability is a unit type implementing [`AbilityBehavior`]; its
//! numbers (trigger set, team, range, damage table) come from an
//! [`AbilityDefinition`] so tuning never touches code.

mod bramble_hide;
mod exhausting_blow;
mod grappling_hook;
mod sweeping_cleave;

use std::collections::BTreeMap;

pub use bramble_hide::{BrambleHide, FLANK_DEPTH};
pub use exhausting_blow::ExhaustingBlow;
pub use grappling_hook::GrapplingHook;
pub use sweeping_cleave::{SECONDARY_PERCENT, SweepingCleave};

use arena_core::{AbilityBehavior, AbilityDefinition, AbilityKind, AbilityOracle};

/// Builds the behaviour for `kind`.
pub fn behavior_for(kind: AbilityKind) -> Box<dyn AbilityBehavior> {
    match kind {
        AbilityKind::GrapplingHook => Box::new(GrapplingHook),
        AbilityKind::SweepingCleave => Box::new(SweepingCleave),
        AbilityKind::ExhaustingBlow => Box::new(ExhaustingBlow),
        AbilityKind::BrambleHide => Box::new(BrambleHide),
    }
}

/// Definitions plus behaviours, keyed by ability kind.
pub struct AbilityCatalog {
    definitions: BTreeMap<AbilityKind, AbilityDefinition>,
    behaviors: BTreeMap<AbilityKind, Box<dyn AbilityBehavior>>,
}

impl AbilityCatalog {
    /// Registers `definitions`; a later definition of the same kind wins.
    pub fn new(definitions: impl IntoIterator<Item = AbilityDefinition>) -> Self {
        let definitions: BTreeMap<_, _> = definitions
            .into_iter()
            .map(|definition| (definition.kind, definition))
            .collect();
        let behaviors = definitions
            .keys()
            .map(|&kind| (kind, behavior_for(kind)))
            .collect();
        Self {
            definitions,
            behaviors,
        }
    }

    /// Catalog built from the definitions embedded in the crate.
    #[cfg(feature = "loaders")]
    pub fn load() -> crate::loaders::LoadResult<Self> {
        Ok(Self::new(crate::loaders::AbilityLoader::builtin()?))
    }

    pub fn kinds(&self) -> impl Iterator<Item = AbilityKind> + '_ {
        self.definitions.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl AbilityOracle for AbilityCatalog {
    fn definition(&self, kind: AbilityKind) -> Option<&AbilityDefinition> {
        self.definitions.get(&kind)
    }

    fn behavior(&self, kind: AbilityKind) -> Option<&dyn AbilityBehavior> {
        self.behaviors.get(&kind).map(|behavior| behavior.as_ref())
    }
}

impl std::fmt::Debug for AbilityCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AbilityCatalog")
            .field("kinds", &self.definitions.keys().collect::<Vec<_>>())
            .finish()
    }
}
