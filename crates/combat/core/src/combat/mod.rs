//! Damage and block numbers.
//!
//! Modifier collection reads statuses and stances from the state in a declared order
//! and hands them to the pure [`compute_damage`] / [`BlockCalc::compute`] functions.
mod block;
mod damage;

pub use block::BlockCalc;
pub use damage::{DamageClass, DamageEvent, DamageModifiers, DamageReport, compute_damage};

use crate::env::{CombatEnv, OracleError};
use crate::state::{CombatState, EntityId, Stance, StatusId};

/// Attacker statuses contributing flat damage, in application order.
pub const ATTACKER_ADDITIVE: &[StatusId] = &[StatusId::Strength, StatusId::Vigor];

/// Attacker statuses contributing a damage factor, in application order.
pub const ATTACKER_MULTIPLICATIVE: &[StatusId] =
    &[StatusId::Weak, StatusId::PenNib, StatusId::DoubleDamage];

/// Defender statuses contributing a damage factor, in application order.
pub const DEFENDER_MULTIPLICATIVE: &[StatusId] = &[StatusId::Vulnerable];

/// Defender statuses capping incoming damage at their descriptor multiplier (or 1).
pub const DEFENDER_CAP: &[StatusId] = &[StatusId::Intangible];

/// Owner statuses contributing flat block.
pub const BLOCK_ADDITIVE: &[StatusId] = &[StatusId::Dexterity];

/// Owner statuses contributing a block factor.
pub const BLOCK_MULTIPLICATIVE: &[StatusId] = &[StatusId::Frail];

/// Gathers every modifier that applies to damage from `attacker` to `defender`.
///
/// Either side may be absent (environmental damage, or an intent preview with no
/// defender). Only NORMAL damage picks up attacker statuses, stances and Vulnerable.
pub fn damage_modifiers(
    state: &CombatState,
    env: &CombatEnv<'_>,
    attacker: Option<EntityId>,
    defender: Option<EntityId>,
    class: DamageClass,
) -> Result<DamageModifiers, OracleError> {
    let mut mods = DamageModifiers::default();
    let normal = class == DamageClass::Normal;

    if normal && let Some(source) = attacker.and_then(|id| state.creature(id)) {
        for &id in ATTACKER_ADDITIVE {
            if let Some(status) = source.statuses.get(id) {
                mods.additive.push(status.amount);
            }
        }
        for &id in ATTACKER_MULTIPLICATIVE {
            if source.statuses.has(id) {
                mods.attacker.push(factor(env, id)?);
            }
        }
    }

    if normal {
        let given = match attacker {
            Some(id) if id.is_player() => state.player.stance.damage_given(),
            _ => Stance::Neutral.damage_given(),
        };
        let received = match defender {
            Some(id) if id.is_player() => state.player.stance.damage_received(),
            _ => Stance::Neutral.damage_received(),
        };
        mods.stance = given * received;
    }

    if let Some(target) = defender.and_then(|id| state.creature(id)) {
        if normal {
            for &id in DEFENDER_MULTIPLICATIVE {
                if target.statuses.has(id) {
                    mods.defender.push(factor(env, id)?);
                }
            }
        }
        for &id in DEFENDER_CAP {
            if target.statuses.has(id) {
                let cap = env.status(id)?.multiplier.map_or(1, |m| m as i32);
                mods.cap = Some(mods.cap.map_or(cap, |c: i32| c.min(cap)));
            }
        }
    }

    Ok(mods)
}

/// Gathers block modifiers for `owner`.
pub fn block_calc(
    state: &CombatState,
    env: &CombatEnv<'_>,
    owner: EntityId,
) -> Result<BlockCalc, OracleError> {
    let mut calc = BlockCalc::default();
    let Some(creature) = state.creature(owner) else {
        return Ok(calc);
    };
    for &id in BLOCK_ADDITIVE {
        calc.additive += creature.statuses.amount(id);
    }
    for &id in BLOCK_MULTIPLICATIVE {
        if creature.statuses.has(id) {
            calc.factors.push(factor(env, id)?);
        }
    }
    Ok(calc)
}

/// Damage `attacker` would deal to `defender` from `base`, as shown on intents and cards.
pub fn preview_damage(
    state: &CombatState,
    env: &CombatEnv<'_>,
    attacker: EntityId,
    defender: Option<EntityId>,
    base: i32,
) -> Result<i32, OracleError> {
    let mods = damage_modifiers(state, env, Some(attacker), defender, DamageClass::Normal)?;
    Ok(compute_damage(&mods, base, DamageClass::Normal))
}

fn factor(env: &CombatEnv<'_>, id: StatusId) -> Result<f32, OracleError> {
    Ok(env.status(id)?.multiplier.unwrap_or(1.0))
}
