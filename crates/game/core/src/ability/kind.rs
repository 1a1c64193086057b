/// Identity of an ability variant.
///
/// The set is closed: every kind maps to exactly one behaviour registered
/// with the [`AbilityOracle`](crate::env::AbilityOracle).
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::EnumIter,
    strum::IntoStaticStr,
    strum::Display,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityKind {
    /// Inline pull toward the user, then pierce damage.
    GrapplingHook,
    /// Slash damage across the front arc.
    SweepingCleave,
    /// Crush damage that punishes fatigue.
    ExhaustingBlow,
    /// Passive thorns: retaliation and end-of-turn hardening.
    BrambleHide,
}

impl AbilityKind {
    pub fn all() -> impl Iterator<Item = AbilityKind> {
        <AbilityKind as strum::IntoEnumIterator>::iter()
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }
}
