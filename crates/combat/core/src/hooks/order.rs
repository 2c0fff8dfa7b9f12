//! Declared firing order per hook.
//!
//! Each hook has one static list of listeners. Firing walks the list front to back
//! and skips listeners that are absent on the subject or whose content entry does not
//! declare the hook. Reordering an entry here is a rules change.

use super::{HookKind, Listener};
use crate::state::{RelicId as R, StatusId as S};

use Listener::{Relic, Status};

const COMBAT_START: &[Listener] = &[
    Relic(R::Anchor),
    Relic(R::Vajra),
    Relic(R::BagOfMarbles),
    Relic(R::CentennialPuzzle),
    Relic(R::PenNib),
];

const TURN_START: &[Listener] = &[
    Status(S::Poison),
    Status(S::FlameBarrier),
    Status(S::NextTurnBlock),
    Relic(R::Lantern),
    Relic(R::HappyFlower),
    Relic(R::ArtOfWar),
    Relic(R::Kunai),
    Relic(R::Shuriken),
    Relic(R::OrnamentalFan),
    Relic(R::LetterOpener),
];

const POST_DRAW: &[Listener] = &[Status(S::DemonForm), Status(S::NoxiousFumes)];

const CARD_PLAYED: &[Listener] = &[Status(S::Rage), Status(S::SharpHide)];

const AFTER_CARD_PLAYED: &[Listener] = &[
    Status(S::Vigor),
    Status(S::PenNib),
    Relic(R::PenNib),
    Relic(R::Kunai),
    Relic(R::Shuriken),
    Relic(R::OrnamentalFan),
    Relic(R::LetterOpener),
];

const DAMAGE_GIVEN: &[Listener] = &[Status(S::Envenom)];

/// Relics see the post-block value first, then Buffer.
const ATTACKED_TO_CHANGE_DAMAGE: &[Listener] = &[Relic(R::Torii), Status(S::Buffer)];

const ATTACKED: &[Listener] = &[Status(S::Thorns), Status(S::FlameBarrier)];

const DAMAGE_RECEIVED: &[Listener] = &[
    Status(S::PlatedArmor),
    Status(S::CurlUp),
    Status(S::Angry),
];

const LOSE_HP_MODIFY: &[Listener] = &[Relic(R::TungstenRod)];

const HP_LOST: &[Listener] = &[Relic(R::CentennialPuzzle)];

/// Pre-discard: Orichalcum reads block before any turn-end block is granted.
const TURN_END: &[Listener] = &[
    Relic(R::Orichalcum),
    Status(S::Metallicize),
    Status(S::PlatedArmor),
    Status(S::Regen),
];

const TURN_END_POST_DISCARD: &[Listener] = &[
    Status(S::Rage),
    Status(S::LoseStrength),
    Status(S::LoseDexterity),
];

const ROUND_END: &[Listener] = &[Status(S::Ritual)];

const STACK_CHANGED: &[Listener] = &[Status(S::Mantra)];

const STANCE_CHANGE: &[Listener] = &[Status(S::MentalFortress), Status(S::Rushdown)];

const SHUFFLE: &[Listener] = &[Relic(R::Sundial)];

const EXHAUST: &[Listener] = &[Status(S::FeelNoPain)];

const APPLY_STATUS_MODIFY: &[Listener] = &[Status(S::Artifact)];

const VICTORY: &[Listener] = &[Relic(R::BurningBlood)];

const DEFEAT: &[Listener] = &[];

/// Declared listeners of `kind`, in firing order.
pub const fn listeners(kind: HookKind) -> &'static [Listener] {
    match kind {
        HookKind::CombatStart => COMBAT_START,
        HookKind::TurnStart => TURN_START,
        HookKind::PostDraw => POST_DRAW,
        HookKind::CardPlayed => CARD_PLAYED,
        HookKind::AfterCardPlayed => AFTER_CARD_PLAYED,
        HookKind::DamageGiven => DAMAGE_GIVEN,
        HookKind::AttackedToChangeDamage => ATTACKED_TO_CHANGE_DAMAGE,
        HookKind::Attacked => ATTACKED,
        HookKind::DamageReceived => DAMAGE_RECEIVED,
        HookKind::LoseHpModify => LOSE_HP_MODIFY,
        HookKind::HpLost => HP_LOST,
        HookKind::TurnEnd => TURN_END,
        HookKind::TurnEndPostDiscard => TURN_END_POST_DISCARD,
        HookKind::RoundEnd => ROUND_END,
        HookKind::StackChanged => STACK_CHANGED,
        HookKind::StanceChange => STANCE_CHANGE,
        HookKind::Shuffle => SHUFFLE,
        HookKind::Exhaust => EXHAUST,
        HookKind::ApplyStatusModify => APPLY_STATUS_MODIFY,
        HookKind::Victory => VICTORY,
        HookKind::Defeat => DEFEAT,
    }
}

/// True when `listener` has a declared slot in `kind`.
pub fn declares(kind: HookKind, listener: Listener) -> bool {
    listeners(kind).contains(&listener)
}
