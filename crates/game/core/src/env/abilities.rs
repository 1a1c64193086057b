//! Ability catalog oracle.

use crate::ability::{AbilityBehavior, AbilityDefinition, AbilityKind};

/// Oracle mapping an ability kind to its definition and behaviour.
///
/// Definitions are data loaded by the content layer; behaviours are the typed
/// implementations of the capability interface.
pub trait AbilityOracle: Send + Sync {
    fn definition(&self, kind: AbilityKind) -> Option<&AbilityDefinition>;

    fn behavior(&self, kind: AbilityKind) -> Option<&dyn AbilityBehavior>;
}
