//! Exhausting Blow: a crushing hit that hurts tired creatures twice as much.

use arena_core::combat::DamageType;
use arena_core::targeting::{CreatureQuery, creatures_in, pattern_targets};
use arena_core::{
    AbilityBehavior, AbilityContext, AbilityKind, Activation, CreatureId, EffectDuration,
    EffectKind, Eligibility, EngineError, MessageCode, OffsetMatrix, ResolvedTarget, Stat,
    TargetFilter, TargetRequest, ValidationError,
};

pub struct ExhaustingBlow;

impl ExhaustingBlow {
    fn candidates(ctx: &AbilityContext<'_>) -> Vec<CreatureId> {
        let filter = TargetFilter::new(ctx.definition.team);
        let reach = pattern_targets(ctx.state, ctx.owner, &OffsetMatrix::adjacent(), false);
        creatures_in(ctx.state, ctx.owner, reach, &filter)
    }
}

impl AbilityBehavior for ExhaustingBlow {
    fn kind(&self) -> AbilityKind {
        AbilityKind::ExhaustingBlow
    }

    fn check_eligible(&self, ctx: &AbilityContext<'_>) -> Eligibility {
        Eligibility::check(!Self::candidates(ctx).is_empty(), MessageCode::NoTarget)
    }

    fn resolve_target(&self, ctx: &AbilityContext<'_>) -> Option<TargetRequest> {
        Some(TargetRequest::Creature(CreatureQuery {
            actor: ctx.owner.id,
            team: ctx.definition.team,
            candidates: Self::candidates(ctx),
        }))
    }

    fn apply(
        &self,
        activation: &mut Activation<'_>,
        target: &ResolvedTarget,
    ) -> Result<(), EngineError> {
        let &ResolvedTarget::Creature(victim) = target else {
            return Err(ValidationError::UnexpectedTarget(activation.ability()).into());
        };

        let winded = activation
            .effect(EffectKind::Winded, victim)
            .lasting(EffectDuration::UntilTurnStart)
            .alter(Stat::Endurance, -1);
        let damage = activation
            .base_damage()
            .endurance_sensitive(DamageType::Crush)
            .with_effect(winded);
        activation.damage(&damage, &[victim], false)?;
        Ok(())
    }
}
