//! Status behaviors, keyed by `(hook, status)`.

use super::{HookEvent, Reaction};
use crate::combat::DamageClass;
use crate::engine::{ExecContext, ExecuteError};
use crate::env::CardType;
use crate::state::{EntityId, Stance, StatusId};

/// Threshold at which Mantra converts into Divinity.
const MANTRA_FOR_DIVINITY: i32 = 10;

/// Values of the listening instance, read when the listener fires.
#[derive(Clone, Copy, Debug)]
pub(super) struct ActiveStatus {
    pub id: StatusId,
    pub owner: EntityId,
    pub amount: i32,
    pub just_applied: bool,
}

pub(super) fn on_hook(
    ctx: &mut ExecContext<'_, '_>,
    s: ActiveStatus,
    event: &mut HookEvent,
) -> Result<(), ExecuteError> {
    use StatusId as S;

    let owner = s.owner;
    match (event, s.id) {
        // ---- turn start -------------------------------------------------------
        (HookEvent::TurnStart, S::Poison) => {
            ctx.push(Reaction::Damage {
                source: None,
                target: owner,
                base: s.amount,
                class: DamageClass::HpLoss,
            });
            ctx.push(reduce(owner, S::Poison, 1));
        }
        (HookEvent::TurnStart, S::FlameBarrier) => ctx.push(remove(owner, S::FlameBarrier)),
        (HookEvent::TurnStart, S::NextTurnBlock) => {
            ctx.push(raw_block(owner, s.amount));
            ctx.push(remove(owner, S::NextTurnBlock));
        }

        // ---- post draw --------------------------------------------------------
        (HookEvent::PostDraw, S::DemonForm) => ctx.push(apply(owner, owner, S::Strength, s.amount)),
        (HookEvent::PostDraw, S::NoxiousFumes) => ctx.push(Reaction::ApplyStatusAllEnemies {
            source: Some(owner),
            status: S::Poison,
            amount: s.amount,
        }),

        // ---- cards ------------------------------------------------------------
        (HookEvent::CardPlayed(card), S::Rage) if card.card_type == CardType::Attack => {
            ctx.push(raw_block(owner, s.amount));
        }
        (HookEvent::CardPlayed(card), S::SharpHide) if card.card_type == CardType::Attack => {
            ctx.push(Reaction::Damage {
                source: Some(owner),
                target: EntityId::PLAYER,
                base: s.amount,
                class: DamageClass::Thorns,
            });
        }
        (HookEvent::AfterCardPlayed(card), S::Vigor | S::PenNib)
            if card.card_type == CardType::Attack =>
        {
            ctx.push(remove(owner, s.id));
        }

        // ---- damage -----------------------------------------------------------
        (
            HookEvent::DamageGiven {
                target,
                class: DamageClass::Normal,
                amount,
            },
            S::Envenom,
        ) if *amount > 0 => {
            ctx.push(apply(owner, *target, S::Poison, s.amount));
        }
        (HookEvent::AttackedToChangeDamage { amount, .. }, S::Buffer) if *amount > 0 => {
            *amount = 0;
            ctx.consume_status(owner, S::Buffer, 1)?;
        }
        (
            HookEvent::Attacked {
                source: Some(attacker),
                class: DamageClass::Normal,
                ..
            },
            S::Thorns | S::FlameBarrier,
        ) => {
            ctx.push(Reaction::Damage {
                source: Some(owner),
                target: *attacker,
                base: s.amount,
                class: DamageClass::Thorns,
            });
        }
        (
            HookEvent::DamageReceived {
                source: Some(_),
                class: DamageClass::Normal,
                amount,
            },
            S::PlatedArmor,
        ) if *amount > 0 => ctx.push(reduce(owner, S::PlatedArmor, 1)),
        (
            HookEvent::DamageReceived {
                class: DamageClass::Normal,
                amount,
                ..
            },
            S::CurlUp,
        ) if *amount > 0 && *amount < ctx.hp(owner) => {
            ctx.push(raw_block(owner, s.amount));
            ctx.push(remove(owner, S::CurlUp));
        }
        (
            HookEvent::DamageReceived {
                class: DamageClass::Normal,
                amount,
                ..
            },
            S::Angry,
        ) if *amount > 0 => ctx.push(apply(owner, owner, S::Strength, s.amount)),

        // ---- turn end ---------------------------------------------------------
        (HookEvent::TurnEnd, S::Metallicize | S::PlatedArmor) => {
            ctx.push(raw_block(owner, s.amount));
        }
        (HookEvent::TurnEnd, S::Regen) => {
            ctx.push(Reaction::Heal {
                target: owner,
                amount: s.amount,
            });
            ctx.push(reduce(owner, S::Regen, 1));
        }
        (HookEvent::TurnEndPostDiscard, S::Rage) => ctx.push(remove(owner, S::Rage)),
        (HookEvent::TurnEndPostDiscard, S::LoseStrength) => {
            ctx.push(apply(owner, owner, S::Strength, -s.amount));
            ctx.push(remove(owner, S::LoseStrength));
        }
        (HookEvent::TurnEndPostDiscard, S::LoseDexterity) => {
            ctx.push(apply(owner, owner, S::Dexterity, -s.amount));
            ctx.push(remove(owner, S::LoseDexterity));
        }

        // ---- round end --------------------------------------------------------
        (HookEvent::RoundEnd, S::Ritual) if !s.just_applied => {
            ctx.push(apply(owner, owner, S::Strength, s.amount));
        }

        // ---- stacks and stances -----------------------------------------------
        (HookEvent::StackChanged(change), S::Mantra)
            if change.id == S::Mantra && change.after >= MANTRA_FOR_DIVINITY =>
        {
            ctx.push(reduce(owner, S::Mantra, MANTRA_FOR_DIVINITY));
            ctx.push(Reaction::ChangeStance(Stance::Divinity));
        }
        (HookEvent::StanceChange { from, to }, S::MentalFortress) if from != to => {
            ctx.push(raw_block(owner, s.amount));
        }
        (HookEvent::StanceChange { from, to }, S::Rushdown)
            if from != to && *to == Stance::Wrath =>
        {
            ctx.push(Reaction::Draw(s.amount.max(0) as u32));
        }
        (HookEvent::Exhaust { .. }, S::FeelNoPain) => ctx.push(raw_block(owner, s.amount)),

        // ---- status application -----------------------------------------------
        (HookEvent::ApplyStatusModify { negated, .. }, S::Artifact) if !*negated => {
            *negated = true;
            ctx.consume_status(owner, S::Artifact, 1)?;
        }

        _ => {}
    }
    Ok(())
}

fn raw_block(target: EntityId, amount: i32) -> Reaction {
    Reaction::GainBlock {
        target,
        amount,
        modified: false,
    }
}

fn apply(source: EntityId, target: EntityId, status: StatusId, amount: i32) -> Reaction {
    Reaction::ApplyStatus {
        source: Some(source),
        target,
        status,
        amount,
    }
}

fn reduce(target: EntityId, status: StatusId, amount: i32) -> Reaction {
    Reaction::ReduceStatus {
        target,
        status,
        amount,
    }
}

fn remove(target: EntityId, status: StatusId) -> Reaction {
    Reaction::RemoveStatus { target, status }
}
