//! Content and setups shared by unit tests.

use crate::cards::{Amount, CardEffect, EffectTarget};
use crate::combat::DamageClass;
use crate::config::CombatConfig;
use crate::engine::{CardSpec, CombatEngine, CombatSetup, EnemySetup, PlayerSetup};
use crate::env::{
    AiPattern, CardDefinition, CardFlags, CardTarget, CardType, CardUpgrade, CombatEnv,
    ContentSnapshot, DecayStep, DecayTiming, EnemyDefinition, FreshGuard, IntentKind,
    MoveDefinition, MoveEffect, MoveTarget, Polarity, PotionDefinition, RelicDefinition,
    SignRule, StackingRule, StatusDescriptor, WeightedMove,
};
use crate::hooks::HookSet;
use crate::rng::Seed;
use crate::state::{CardId, EnemyId, PotionId, RelicId, Stance, StatusId};
use strum::IntoEnumIterator;

/// Descriptor for every status, mirroring the shipped data tables.
pub fn status(id: StatusId) -> StatusDescriptor {
    use StatusId as S;

    let debuff = matches!(
        id,
        S::Weak
            | S::Vulnerable
            | S::Frail
            | S::Poison
            | S::NoDraw
            | S::Entangled
            | S::LoseStrength
            | S::LoseDexterity
    );
    let mut d = StatusDescriptor::new(
        id,
        if debuff {
            Polarity::Debuff
        } else {
            Polarity::Buff
        },
    );
    match id {
        S::Strength | S::Dexterity => d.sign = SignRule::CanGoNegative,
        S::Weak | S::Frail => {
            d.decay = DecayTiming::RoundEnd;
            d.fresh_guard = FreshGuard::AfterPlayerTurn;
            d.multiplier = Some(0.75);
        }
        S::Vulnerable => {
            d.decay = DecayTiming::RoundEnd;
            d.fresh_guard = FreshGuard::AfterPlayerTurn;
            d.multiplier = Some(1.5);
        }
        S::Artifact => d.hooks = HookSet::APPLY_STATUS_MODIFY,
        S::Intangible => {
            d.decay = DecayTiming::RoundEnd;
            d.multiplier = Some(1.0);
        }
        S::Buffer => d.hooks = HookSet::ATTACKED_TO_CHANGE_DAMAGE,
        S::Thorns => d.hooks = HookSet::ATTACKED,
        S::Metallicize | S::Regen => d.hooks = HookSet::TURN_END,
        S::PlatedArmor => d.hooks = HookSet::TURN_END | HookSet::DAMAGE_RECEIVED,
        S::Poison | S::NextTurnBlock => d.hooks = HookSet::TURN_START,
        S::Ritual => {
            d.hooks = HookSet::ROUND_END;
            d.fresh_guard = FreshGuard::AfterPlayerTurn;
        }
        S::Vigor => d.hooks = HookSet::AFTER_CARD_PLAYED,
        S::DoubleDamage => {
            d.decay = DecayTiming::RoundEnd;
            d.fresh_guard = FreshGuard::AfterPlayerTurn;
            d.multiplier = Some(2.0);
        }
        S::PenNib => {
            d.stacking = StackingRule::BooleanPresence;
            d.hooks = HookSet::AFTER_CARD_PLAYED;
            d.multiplier = Some(2.0);
        }
        S::Blur => {
            d.decay = DecayTiming::TurnEnd;
            d.fresh_guard = FreshGuard::Always;
        }
        S::Barricade => d.stacking = StackingRule::BooleanPresence,
        S::NoDraw | S::Entangled => {
            d.stacking = StackingRule::BooleanPresence;
            d.decay = DecayTiming::TurnEnd;
            d.decay_step = DecayStep::All;
        }
        S::LoseStrength | S::LoseDexterity => d.hooks = HookSet::TURN_END_POST_DISCARD,
        S::Rage => d.hooks = HookSet::CARD_PLAYED | HookSet::TURN_END_POST_DISCARD,
        S::FlameBarrier => d.hooks = HookSet::ATTACKED | HookSet::TURN_START,
        S::FeelNoPain => d.hooks = HookSet::EXHAUST,
        S::DemonForm | S::NoxiousFumes => d.hooks = HookSet::POST_DRAW,
        S::Envenom => d.hooks = HookSet::DAMAGE_GIVEN,
        S::MentalFortress | S::Rushdown => d.hooks = HookSet::STANCE_CHANGE,
        S::Mantra => d.hooks = HookSet::STACK_CHANGED,
        S::CurlUp => {
            d.stacking = StackingRule::OverwriteIfGreater;
            d.hooks = HookSet::DAMAGE_RECEIVED;
        }
        S::Angry => d.hooks = HookSet::DAMAGE_RECEIVED,
        S::SharpHide => d.hooks = HookSet::CARD_PLAYED,
        S::Equilibrium => d.decay = DecayTiming::TurnEnd,
        S::Energized | S::DrawCardNextTurn => {}
    }
    d
}

pub fn relic(id: RelicId) -> RelicDefinition {
    use RelicId as R;

    let (hooks, amount, threshold, lower) = match id {
        R::Anchor => (HookSet::COMBAT_START, 10, 0, 0),
        R::Vajra | R::BagOfMarbles => (HookSet::COMBAT_START, 1, 0, 0),
        R::CentennialPuzzle => (HookSet::COMBAT_START | HookSet::HP_LOST, 3, 0, 0),
        R::Lantern | R::ArtOfWar => (HookSet::TURN_START, 1, 0, 0),
        R::HappyFlower => (HookSet::TURN_START, 1, 3, 0),
        R::PenNib => (HookSet::COMBAT_START | HookSet::AFTER_CARD_PLAYED, 0, 10, 0),
        R::Kunai | R::Shuriken => (HookSet::TURN_START | HookSet::AFTER_CARD_PLAYED, 1, 3, 0),
        R::OrnamentalFan => (HookSet::TURN_START | HookSet::AFTER_CARD_PLAYED, 4, 3, 0),
        R::LetterOpener => (HookSet::TURN_START | HookSet::AFTER_CARD_PLAYED, 5, 3, 0),
        R::Orichalcum => (HookSet::TURN_END, 6, 0, 0),
        R::Torii => (HookSet::ATTACKED_TO_CHANGE_DAMAGE, 1, 5, 1),
        R::TungstenRod => (HookSet::LOSE_HP_MODIFY, 1, 0, 0),
        R::BurningBlood => (HookSet::VICTORY, 6, 0, 0),
        R::Sundial => (HookSet::SHUFFLE, 2, 3, 0),
        R::RunicPyramid | R::IceCream => (HookSet::empty(), 0, 0, 0),
    };
    RelicDefinition {
        id,
        hooks,
        amount,
        threshold,
        lower,
    }
}

fn card(
    id: &str,
    card_type: CardType,
    target: CardTarget,
    cost: i32,
    effects: Vec<CardEffect>,
) -> CardDefinition {
    CardDefinition {
        id: CardId::from(id),
        card_type,
        target,
        cost,
        base_damage: 0,
        base_block: 0,
        magic: 0,
        flags: CardFlags::empty(),
        effects,
        end_of_turn: Vec::new(),
        on_draw: Vec::new(),
        upgrade: CardUpgrade::default(),
    }
}

fn hit() -> CardEffect {
    CardEffect::Damage {
        amount: Amount::Damage,
        hits: Amount::Fixed(1),
        target: EffectTarget::Chosen,
        class: DamageClass::Normal,
    }
}

fn block() -> CardEffect {
    CardEffect::Block {
        amount: Amount::Block,
    }
}

fn self_status(status: StatusId, amount: Amount) -> CardEffect {
    CardEffect::ApplyStatus {
        status,
        amount,
        target: EffectTarget::Player,
    }
}

pub fn cards() -> Vec<CardDefinition> {
    let mut strike = card("strike", CardType::Attack, CardTarget::Enemy, 1, vec![hit()]);
    strike.base_damage = 6;
    strike.upgrade.damage = 3;

    let mut defend = card("defend", CardType::Skill, CardTarget::SelfOnly, 1, vec![block()]);
    defend.base_block = 5;
    defend.upgrade.block = 3;

    let mut bash = card(
        "bash",
        CardType::Attack,
        CardTarget::Enemy,
        2,
        vec![
            hit(),
            CardEffect::ApplyStatus {
                status: StatusId::Vulnerable,
                amount: Amount::Magic,
                target: EffectTarget::Chosen,
            },
        ],
    );
    bash.base_damage = 8;
    bash.magic = 2;

    let mut dodge = card(
        "dodge",
        CardType::Skill,
        CardTarget::SelfOnly,
        1,
        vec![block(), self_status(StatusId::Blur, Amount::Magic)],
    );
    dodge.base_block = 5;
    dodge.magic = 1;

    let mut true_grit = card(
        "true_grit",
        CardType::Skill,
        CardTarget::SelfOnly,
        1,
        vec![
            block(),
            CardEffect::ExhaustFromHand {
                count: 1,
                random: false,
            },
        ],
    );
    true_grit.base_block = 7;

    let mut survivor = card(
        "survivor",
        CardType::Skill,
        CardTarget::SelfOnly,
        1,
        vec![block(), CardEffect::DiscardFromHand { count: 1 }],
    );
    survivor.base_block = 8;

    let mut whirlwind = card(
        "whirlwind",
        CardType::Attack,
        CardTarget::AllEnemies,
        CardDefinition::X_COST,
        vec![CardEffect::Damage {
            amount: Amount::Damage,
            hits: Amount::EnergySpent,
            target: EffectTarget::AllEnemies,
            class: DamageClass::Normal,
        }],
    );
    whirlwind.base_damage = 5;

    let mut flex = card(
        "flex",
        CardType::Skill,
        CardTarget::SelfOnly,
        0,
        vec![
            self_status(StatusId::Strength, Amount::Magic),
            self_status(StatusId::LoseStrength, Amount::Magic),
        ],
    );
    flex.magic = 2;

    let mut eruption = card(
        "eruption",
        CardType::Attack,
        CardTarget::Enemy,
        2,
        vec![hit(), CardEffect::EnterStance(Stance::Wrath)],
    );
    eruption.base_damage = 9;

    let mut inflame = card(
        "inflame",
        CardType::Power,
        CardTarget::SelfOnly,
        1,
        vec![self_status(StatusId::Strength, Amount::Magic)],
    );
    inflame.magic = 2;

    let mut worship = card(
        "worship",
        CardType::Skill,
        CardTarget::SelfOnly,
        2,
        vec![self_status(StatusId::Mantra, Amount::Magic)],
    );
    worship.magic = 5;

    let wound = card(
        "wound",
        CardType::Status,
        CardTarget::None,
        CardDefinition::UNPLAYABLE_COST,
        Vec::new(),
    );
    let mut dazed = card(
        "dazed",
        CardType::Status,
        CardTarget::None,
        CardDefinition::UNPLAYABLE_COST,
        Vec::new(),
    );
    dazed.flags = CardFlags::ETHEREAL;

    vec![
        strike, defend, bash, dodge, true_grit, survivor, whirlwind, flex, eruption, inflame,
        worship, wound, dazed,
    ]
}

pub fn enemies() -> Vec<EnemyDefinition> {
    let chomp = MoveDefinition {
        id: 1,
        name: "Chomp".into(),
        intent: IntentKind::Attack,
        damage: Some(6),
        hits: 1,
        block: 0,
        effects: Vec::new(),
    };
    let bellow = MoveDefinition {
        id: 2,
        name: "Bellow".into(),
        intent: IntentKind::DefendBuff,
        damage: None,
        hits: 1,
        block: 6,
        effects: vec![MoveEffect::ApplyStatus {
            status: StatusId::Strength,
            amount: 3,
            target: MoveTarget::Itself,
        }],
    };
    let dummy = EnemyDefinition {
        id: EnemyId::from("dummy"),
        name: "Training Dummy".into(),
        hp_min: 40,
        hp_max: 44,
        statuses: Vec::new(),
        moves: vec![chomp, bellow],
        ai: AiPattern::Cycle(vec![1, 2]),
    };

    let louse = EnemyDefinition {
        id: EnemyId::from("louse"),
        name: "Louse".into(),
        hp_min: 10,
        hp_max: 15,
        statuses: Vec::new(),
        moves: vec![
            MoveDefinition {
                id: 1,
                name: "Bite".into(),
                intent: IntentKind::Attack,
                damage: Some(5),
                hits: 1,
                block: 0,
                effects: Vec::new(),
            },
            MoveDefinition {
                id: 2,
                name: "Grow".into(),
                intent: IntentKind::Buff,
                damage: None,
                hits: 1,
                block: 0,
                effects: vec![MoveEffect::ApplyStatus {
                    status: StatusId::Strength,
                    amount: 3,
                    target: MoveTarget::Itself,
                }],
            },
        ],
        ai: AiPattern::Weighted {
            moves: vec![
                WeightedMove {
                    move_id: 1,
                    weight: 75,
                },
                WeightedMove {
                    move_id: 2,
                    weight: 25,
                },
            ],
            max_repeats: 2,
        },
    };
    vec![dummy, louse]
}

pub fn potions() -> Vec<PotionDefinition> {
    vec![
        PotionDefinition {
            id: PotionId::from("fire_potion"),
            target: CardTarget::Enemy,
            effects: vec![CardEffect::Damage {
                amount: Amount::Fixed(20),
                hits: Amount::Fixed(1),
                target: EffectTarget::Chosen,
                class: DamageClass::Thorns,
            }],
        },
        PotionDefinition {
            id: PotionId::from("block_potion"),
            target: CardTarget::SelfOnly,
            effects: vec![CardEffect::Block {
                amount: Amount::Fixed(12),
            }],
        },
    ]
}

/// Every status and relic plus a small card, potion and enemy pool.
pub fn content() -> ContentSnapshot {
    let mut content = ContentSnapshot::new(CombatConfig::default());
    StatusId::iter().for_each(|id| content.insert_status(status(id)));
    RelicId::iter().for_each(|id| content.insert_relic(relic(id)));
    cards().into_iter().for_each(|c| content.insert_card(c));
    potions().into_iter().for_each(|p| content.insert_potion(p));
    enemies().into_iter().for_each(|e| content.insert_enemy(e));
    content
}

/// Ironclad-like starter: 5 strikes, 4 defends, a bash, one dummy at 40 hp.
pub fn setup() -> CombatSetup {
    let mut deck = vec![CardSpec::new("strike"); 5];
    deck.extend(vec![CardSpec::new("defend"); 4]);
    deck.push(CardSpec::new("bash"));
    CombatSetup {
        seed: Seed::from(42),
        floor: 1,
        player: PlayerSetup {
            hp: 80,
            max_hp: 80,
            deck,
            relics: Vec::new(),
            potions: vec![PotionId::from("fire_potion")],
            energy_per_turn: None,
        },
        enemies: vec![EnemySetup::new("dummy").with_hp(40)],
        config: CombatConfig::default(),
    }
}

pub fn engine(content: &ContentSnapshot) -> CombatEngine {
    CombatEngine::start(&setup(), CombatEnv::from_snapshot(content)).expect("starter setup")
}
