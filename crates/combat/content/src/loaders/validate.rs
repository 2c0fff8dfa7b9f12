//! Cross-table checks run after loading.
//!
//! The engine treats a content miss as fatal, so every reference between tables is
//! resolved once here instead of surfacing mid-combat.

use anyhow::{Context, bail, ensure};
use combat_core::{
    AiPattern, CardEffect, CombatEnv, ContentSnapshot, EnemyDefinition, MoveEffect, RelicId,
    StatusId,
};
use strum::IntoEnumIterator;

use crate::loaders::LoadResult;

/// Checks that the snapshot is complete and internally consistent.
///
/// # Errors
///
/// The first problem found: a status or relic without an entry, a hook without a
/// declared firing slot, a dangling card or move reference, or a malformed enemy.
pub fn validate(content: &ContentSnapshot) -> LoadResult<()> {
    let env = CombatEnv::from_snapshot(content);
    env.validate_hooks(StatusId::iter(), RelicId::iter())
        .context("status/relic tables are incomplete")?;

    for card in content.cards() {
        check_effects(&env, &card.effects)
            .and_then(|()| check_effects(&env, &card.end_of_turn))
            .and_then(|()| check_effects(&env, &card.on_draw))
            .with_context(|| format!("card `{}`", card.id))?;
    }
    for potion in content.potions() {
        check_effects(&env, &potion.effects).with_context(|| format!("potion `{}`", potion.id))?;
    }
    for enemy in content.enemies() {
        check_enemy(&env, enemy).with_context(|| format!("enemy `{}`", enemy.id))?;
    }
    Ok(())
}

fn check_effects(env: &CombatEnv<'_>, effects: &[CardEffect]) -> LoadResult<()> {
    for effect in effects {
        if let CardEffect::AddCard { card, .. } = effect {
            env.card(card)?;
        }
    }
    Ok(())
}

fn check_enemy(env: &CombatEnv<'_>, enemy: &EnemyDefinition) -> LoadResult<()> {
    ensure!(
        0 < enemy.hp_min && enemy.hp_min <= enemy.hp_max,
        "hp range {}..={} is empty or non-positive",
        enemy.hp_min,
        enemy.hp_max
    );
    ensure!(!enemy.moves.is_empty(), "no moves");

    for mv in &enemy.moves {
        for effect in &mv.effects {
            if let MoveEffect::AddCard { card, .. } = effect {
                env.card(card).with_context(|| format!("move `{}`", mv.name))?;
            }
        }
    }

    let mut referenced = Vec::new();
    collect_moves(&enemy.ai, &mut referenced);
    for id in referenced {
        if enemy.move_def(id).is_none() {
            bail!("ai refers to unknown move {id}");
        }
    }
    Ok(())
}

fn collect_moves(ai: &AiPattern, out: &mut Vec<u8>) {
    match ai {
        AiPattern::Cycle(order) => out.extend(order),
        AiPattern::Weighted { moves, .. } => out.extend(moves.iter().map(|m| m.move_id)),
        AiPattern::FirstThen { first, then } => {
            out.push(*first);
            collect_moves(then, out);
        }
    }
}
