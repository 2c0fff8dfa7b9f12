//! Relic behaviors, keyed by `(hook, relic)`. Relics always belong to the player.

use super::{HookEvent, Reaction};
use crate::combat::DamageClass;
use crate::engine::{ExecContext, ExecuteError};
use crate::env::{CardType, RelicDefinition};
use crate::state::{EntityId, RelicId, StatusId};

const PLAYER: EntityId = EntityId::PLAYER;

pub(super) fn on_hook(
    ctx: &mut ExecContext<'_, '_>,
    def: &RelicDefinition,
    event: &mut HookEvent,
) -> Result<(), ExecuteError> {
    use RelicId as R;

    match (event, def.id) {
        (HookEvent::CombatStart, R::Anchor) => ctx.push(Reaction::GainBlock {
            target: PLAYER,
            amount: def.amount,
            modified: false,
        }),
        (HookEvent::CombatStart, R::Vajra) => ctx.push(Reaction::ApplyStatus {
            source: Some(PLAYER),
            target: PLAYER,
            status: StatusId::Strength,
            amount: def.amount,
        }),
        (HookEvent::CombatStart, R::BagOfMarbles) => ctx.push(Reaction::ApplyStatusAllEnemies {
            source: Some(PLAYER),
            status: StatusId::Vulnerable,
            amount: def.amount,
        }),
        (HookEvent::CombatStart, R::CentennialPuzzle) => ctx.relic_state(R::CentennialPuzzle)?.armed = true,
        // A counter carried in one short of the threshold arms the next attack.
        (HookEvent::CombatStart, R::PenNib) => {
            if ctx.relic_state(R::PenNib)?.counter == def.threshold - 1 {
                ctx.push(arm_pen_nib());
            }
        }

        (HookEvent::TurnStart, R::Lantern) if ctx.state.turn == 1 => {
            ctx.push(Reaction::GainEnergy(def.amount));
        }
        (HookEvent::TurnStart, R::HappyFlower) => {
            if tick(ctx, def)? {
                ctx.push(Reaction::GainEnergy(def.amount));
            }
        }
        (HookEvent::TurnStart, R::ArtOfWar) => {
            if ctx.state.turn > 1 && ctx.state.last_turn_attacks == 0 {
                ctx.push(Reaction::GainEnergy(def.amount));
            }
        }
        (HookEvent::TurnStart, R::Kunai | R::Shuriken | R::OrnamentalFan | R::LetterOpener) => {
            ctx.relic_state(def.id)?.counter = 0;
        }

        (HookEvent::AfterCardPlayed(card), R::PenNib) if card.card_type == CardType::Attack => {
            let relic = ctx.relic_state(R::PenNib)?;
            relic.counter += 1;
            if relic.counter >= def.threshold {
                relic.counter = 0;
            } else if relic.counter == def.threshold - 1 {
                ctx.push(arm_pen_nib());
            }
        }
        (HookEvent::AfterCardPlayed(card), R::Kunai | R::Shuriken | R::OrnamentalFan)
            if card.card_type == CardType::Attack =>
        {
            if tick(ctx, def)? {
                let reaction = match def.id {
                    R::Kunai => Reaction::ApplyStatus {
                        source: Some(PLAYER),
                        target: PLAYER,
                        status: StatusId::Dexterity,
                        amount: def.amount,
                    },
                    R::Shuriken => Reaction::ApplyStatus {
                        source: Some(PLAYER),
                        target: PLAYER,
                        status: StatusId::Strength,
                        amount: def.amount,
                    },
                    _ => Reaction::GainBlock {
                        target: PLAYER,
                        amount: def.amount,
                        modified: false,
                    },
                };
                ctx.push(reaction);
            }
        }
        (HookEvent::AfterCardPlayed(card), R::LetterOpener) if card.card_type == CardType::Skill => {
            if tick(ctx, def)? {
                ctx.push(Reaction::DamageAllEnemies {
                    source: Some(PLAYER),
                    base: def.amount,
                    class: DamageClass::Thorns,
                });
            }
        }

        (
            HookEvent::AttackedToChangeDamage {
                source: Some(_),
                class: DamageClass::Normal,
                amount,
            },
            R::Torii,
        ) if *amount > def.lower && *amount <= def.threshold => *amount = def.amount,
        (HookEvent::LoseHpModify { amount, .. }, R::TungstenRod) if *amount > 0 => {
            *amount = (*amount - def.amount).max(0);
        }
        (HookEvent::HpLost { amount, .. }, R::CentennialPuzzle) if *amount > 0 => {
            let relic = ctx.relic_state(R::CentennialPuzzle)?;
            if relic.armed {
                relic.armed = false;
                ctx.push(Reaction::Draw(def.amount.max(0) as u32));
            }
        }

        (HookEvent::TurnEnd, R::Orichalcum) if ctx.state.player.creature.block == 0 => {
            ctx.push(Reaction::GainBlock {
                target: PLAYER,
                amount: def.amount,
                modified: false,
            });
        }
        (HookEvent::Shuffle, R::Sundial) => {
            if tick(ctx, def)? {
                ctx.push(Reaction::GainEnergy(def.amount));
            }
        }
        (HookEvent::Victory, R::BurningBlood) => ctx.push(Reaction::Heal {
            target: PLAYER,
            amount: def.amount,
        }),

        _ => {}
    }
    Ok(())
}

fn arm_pen_nib() -> Reaction {
    Reaction::ApplyStatus {
        source: Some(PLAYER),
        target: PLAYER,
        status: StatusId::PenNib,
        amount: 1,
    }
}

/// Advances a counting relic; returns true (and resets) when it reaches its threshold.
fn tick(ctx: &mut ExecContext<'_, '_>, def: &RelicDefinition) -> Result<bool, ExecuteError> {
    let relic = ctx.relic_state(def.id)?;
    relic.counter += 1;
    if relic.counter >= def.threshold.max(1) {
        relic.counter = 0;
        return Ok(true);
    }
    Ok(false)
}
