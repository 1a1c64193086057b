//! Bramble Hide: thorns that answer blows and harden when flanked.

use arena_core::targeting::{at_least_one_target, pattern_targets};
use arena_core::{
    AbilityBehavior, AbilityContext, AbilityKind, Activation, EffectDuration, EffectKind,
    Eligibility, EngineError, MessageCode, OffsetMatrix, Phase, ResolvedTarget, Stat,
    TargetFilter, TargetTeam, ValidationError,
};

/// Hexes watched at turn end.
pub const FLANK_DEPTH: u32 = 2;

pub struct BrambleHide;

impl AbilityBehavior for BrambleHide {
    fn kind(&self) -> AbilityKind {
        AbilityKind::BrambleHide
    }

    fn check_eligible(&self, ctx: &AbilityContext<'_>) -> Eligibility {
        match ctx.phase {
            Phase::Damage => {
                let attacker = ctx
                    .instigator
                    .and_then(|id| ctx.state.creature(id))
                    .filter(|attacker| {
                        TargetFilter::new(ctx.definition.team).accepts_team(ctx.owner, attacker)
                    });
                Eligibility::check(attacker.is_some(), MessageCode::NoTarget)
            }
            Phase::TurnEnd => {
                let flank = pattern_targets(
                    ctx.state,
                    ctx.owner,
                    &OffsetMatrix::behind(FLANK_DEPTH),
                    false,
                );
                let enemies = TargetFilter::new(TargetTeam::Enemy);
                Eligibility::check(
                    at_least_one_target(ctx.state, ctx.owner, flank, &enemies),
                    MessageCode::NoTarget,
                )
            }
            _ => Eligibility::Blocked(MessageCode::WrongPhase),
        }
    }

    fn apply(
        &self,
        activation: &mut Activation<'_>,
        target: &ResolvedTarget,
    ) -> Result<(), EngineError> {
        match (activation.phase(), target) {
            (Phase::Damage, &ResolvedTarget::Creature(attacker)) => {
                let entangled = activation
                    .effect(EffectKind::Entangled, attacker)
                    .lasting(EffectDuration::UntilTurnEnd)
                    .alter(Stat::Moveable, -1);
                let thorns = activation.base_damage().with_effect(entangled);
                let outcomes = activation.damage(&thorns, &[attacker], true)?;

                let survived = outcomes.iter().all(|outcome| !outcome.killed);
                if activation.upgraded() && survived {
                    activation.zero_endurance(attacker)?;
                }
                Ok(())
            }
            (Phase::TurnEnd, ResolvedTarget::None) => {
                let owner = activation.owner_id();
                let bark = activation
                    .effect(EffectKind::Bramble, owner)
                    .stackable()
                    .alter(Stat::PierceMitigation, 1);
                activation.add_effect(bark)?;
                Ok(())
            }
            _ => Err(ValidationError::UnexpectedTarget(activation.ability()).into()),
        }
    }
}
