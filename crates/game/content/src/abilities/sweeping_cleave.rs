//! Sweeping Cleave: slash every enemy in the front arc.
//!
//! The player picks the primary victim; the rest of the arc is struck in a
//! first, retaliation-free pass and the primary in a second one, so the
//! sweep provokes at most one counter-response.

use arena_core::combat::DamageArea;
use arena_core::targeting::{ChoiceQuery, at_least_one_target, creatures_in, pattern_hexes};
use arena_core::{
    AbilityBehavior, AbilityContext, AbilityKind, Activation, Creature, Eligibility, EngineError,
    HexCoord, MatchState, MessageCode, OffsetMatrix, ResolvedTarget, TargetFilter, TargetRequest,
    ValidationError,
};

/// Share of the base damage taken by enemies other than the primary target.
pub const SECONDARY_PERCENT: u32 = 50;

pub struct SweepingCleave;

impl SweepingCleave {
    fn arc(state: &MatchState, owner: &Creature) -> Vec<HexCoord> {
        pattern_hexes(owner, &OffsetMatrix::front_arc(), false)
            .into_iter()
            .filter(|hex| state.grid.contains(*hex))
            .collect()
    }
}

impl AbilityBehavior for SweepingCleave {
    fn kind(&self) -> AbilityKind {
        AbilityKind::SweepingCleave
    }

    fn check_eligible(&self, ctx: &AbilityContext<'_>) -> Eligibility {
        let filter = TargetFilter::new(ctx.definition.team);
        let arc = Self::arc(ctx.state, ctx.owner);
        Eligibility::check(
            at_least_one_target(ctx.state, ctx.owner, arc, &filter),
            MessageCode::NoTarget,
        )
    }

    /// One option per enemy in the arc: its hex first, then the rest of the arc.
    fn resolve_target(&self, ctx: &AbilityContext<'_>) -> Option<TargetRequest> {
        let filter = TargetFilter::new(ctx.definition.team);
        let arc = Self::arc(ctx.state, ctx.owner);

        let mut options = Vec::new();
        let mut offered = Vec::new();
        for &hex in &arc {
            let Some(candidate) = ctx.state.creature_at(hex) else {
                continue;
            };
            if !filter.accepts(ctx.owner, candidate) || offered.contains(&candidate.id) {
                continue;
            }
            offered.push(candidate.id);
            let mut option = vec![hex];
            option.extend(arc.iter().copied().filter(|other| *other != hex));
            options.push(option);
        }

        Some(TargetRequest::Choice(ChoiceQuery {
            actor: ctx.owner.id,
            options,
        }))
    }

    fn apply(
        &self,
        activation: &mut Activation<'_>,
        target: &ResolvedTarget,
    ) -> Result<(), EngineError> {
        let ResolvedTarget::Hexes(hexes) = target else {
            return Err(ValidationError::UnexpectedTarget(activation.ability()).into());
        };
        let Some((&first, rest)) = hexes.split_first() else {
            return Err(ValidationError::UnexpectedTarget(activation.ability()).into());
        };

        let owner = activation.owner()?;
        let filter = TargetFilter::new(activation.definition().team);
        let primary = activation
            .state()
            .creature_at(first)
            .filter(|candidate| filter.accepts(owner, candidate))
            .map(|candidate| candidate.id)
            .ok_or(ValidationError::UnexpectedTarget(activation.ability()))?;
        let secondary: Vec<_> =
            creatures_in(activation.state(), owner, rest.iter().copied(), &filter)
                .into_iter()
                .filter(|id| *id != primary)
                .collect();

        if !secondary.is_empty() {
            let sweep = activation.base_damage().area(DamageArea::Area {
                percent: SECONDARY_PERCENT,
            });
            activation.damage(&sweep, &secondary, true)?;
        }
        let strike = activation.base_damage();
        activation.damage(&strike, &[primary], false)?;
        Ok(())
    }
}
