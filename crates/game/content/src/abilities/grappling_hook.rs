//! Grappling Hook: drag a creature along the row, then pierce it.

use arena_core::targeting::{DirectionQuery, scan_directions};
use arena_core::{
    AbilityBehavior, AbilityContext, AbilityKind, Activation, Condition, Direction,
    DirectionScan, Eligibility, EngineError, MessageCode, ResolvedTarget, TargetFilter,
    TargetRequest, ValidationError,
};

pub struct GrapplingHook;

impl GrapplingHook {
    fn scans(ctx: &AbilityContext<'_>) -> Vec<DirectionScan> {
        let filter = TargetFilter::new(ctx.definition.team).with(Condition::Moveable);
        scan_directions(
            ctx.state,
            ctx.owner,
            &Direction::inline(),
            ctx.definition.range.minimum,
            ctx.max_range(),
            &filter,
        )
    }
}

impl AbilityBehavior for GrapplingHook {
    fn kind(&self) -> AbilityKind {
        AbilityKind::GrapplingHook
    }

    fn check_eligible(&self, ctx: &AbilityContext<'_>) -> Eligibility {
        let scans = Self::scans(ctx);
        if scans.iter().any(DirectionScan::has_target) {
            return Eligibility::Ready;
        }

        // A hookable creature that merely refuses to move gets its own message.
        let team = TargetFilter::new(ctx.definition.team);
        let anchored = scans
            .iter()
            .filter_map(|scan| scan.blocker)
            .filter_map(|id| ctx.state.creature(id))
            .any(|blocker| team.accepts_team(ctx.owner, blocker) && !blocker.is_moveable());
        if anchored {
            Eligibility::Blocked(MessageCode::NotMoveable)
        } else {
            Eligibility::Blocked(MessageCode::NoTarget)
        }
    }

    fn resolve_target(&self, ctx: &AbilityContext<'_>) -> Option<TargetRequest> {
        let options = Self::scans(ctx)
            .into_iter()
            .filter(DirectionScan::has_target)
            .collect();
        Some(TargetRequest::Direction(DirectionQuery {
            actor: ctx.owner.id,
            team: ctx.definition.team,
            facing: ctx.owner.facing,
            minimum: ctx.definition.range.minimum,
            maximum: ctx.max_range(),
            options,
        }))
    }

    fn apply(
        &self,
        activation: &mut Activation<'_>,
        target: &ResolvedTarget,
    ) -> Result<(), EngineError> {
        let ResolvedTarget::Direction(scan) = target else {
            return Err(ValidationError::UnexpectedTarget(activation.ability()).into());
        };
        let victim = scan
            .target
            .ok_or(ValidationError::ScanWithoutTarget(scan.direction))?;

        activation.pull(scan)?;
        let damage = activation.base_damage();
        activation.damage(&damage, &[victim], false)?;
        Ok(())
    }
}
