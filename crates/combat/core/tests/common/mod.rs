//! Shared content for combat-core integration tests.
#![allow(dead_code)]

use combat_core::{
    AiPattern, Amount, CardDefinition, CardEffect, CardFlags, CardInstance, CardSpec, CardTarget,
    CardType, CardUpgrade, CombatConfig, CombatEngine, CombatEnv, CombatSetup, CombatState,
    ContentSnapshot, DamageClass, DecayTiming, EffectTarget, EnemyDefinition, EnemySetup,
    EntityId, FreshGuard, HookSet, IntentKind, MoveDefinition, PlayerSetup, Polarity,
    PotionDefinition, PotionId, RelicDefinition, RelicId, Seed, SignRule, StatusDescriptor,
    StatusId,
};

pub const SEED: &str = "TESTSEED";

fn debuff(id: StatusId, multiplier: f32) -> StatusDescriptor {
    let mut d = StatusDescriptor::new(id, Polarity::Debuff);
    d.decay = DecayTiming::RoundEnd;
    d.fresh_guard = FreshGuard::AfterPlayerTurn;
    d.multiplier = Some(multiplier);
    d
}

fn signed(id: StatusId) -> StatusDescriptor {
    let mut d = StatusDescriptor::new(id, Polarity::Buff);
    d.sign = SignRule::CanGoNegative;
    d
}

fn statuses() -> Vec<StatusDescriptor> {
    let mut blur = StatusDescriptor::new(StatusId::Blur, Polarity::Buff);
    blur.decay = DecayTiming::TurnEnd;
    blur.fresh_guard = FreshGuard::Always;

    let mut buffer = StatusDescriptor::new(StatusId::Buffer, Polarity::Buff);
    buffer.hooks = HookSet::ATTACKED_TO_CHANGE_DAMAGE;

    let mut artifact = StatusDescriptor::new(StatusId::Artifact, Polarity::Buff);
    artifact.hooks = HookSet::APPLY_STATUS_MODIFY;

    let mut lose_strength = StatusDescriptor::new(StatusId::LoseStrength, Polarity::Debuff);
    lose_strength.hooks = HookSet::TURN_END_POST_DISCARD;

    let mut thorns = StatusDescriptor::new(StatusId::Thorns, Polarity::Buff);
    thorns.hooks = HookSet::ATTACKED;

    vec![
        signed(StatusId::Strength),
        signed(StatusId::Dexterity),
        debuff(StatusId::Weak, 0.75),
        debuff(StatusId::Vulnerable, 1.5),
        debuff(StatusId::Frail, 0.75),
        blur,
        buffer,
        artifact,
        lose_strength,
        thorns,
    ]
}

fn card(id: &str, card_type: CardType, target: CardTarget, cost: i32) -> CardDefinition {
    CardDefinition {
        id: id.into(),
        card_type,
        target,
        cost,
        base_damage: 0,
        base_block: 0,
        magic: 0,
        flags: CardFlags::empty(),
        effects: Vec::new(),
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

fn cards() -> Vec<CardDefinition> {
    let mut strike = card("strike", CardType::Attack, CardTarget::Enemy, 1);
    strike.base_damage = 6;
    strike.effects = vec![hit()];
    strike.upgrade.damage = 3;

    let mut defend = card("defend", CardType::Skill, CardTarget::SelfOnly, 1);
    defend.base_block = 5;
    defend.effects = vec![CardEffect::Block {
        amount: Amount::Block,
    }];

    let mut bash = card("bash", CardType::Attack, CardTarget::Enemy, 2);
    bash.base_damage = 8;
    bash.magic = 2;
    bash.effects = vec![
        hit(),
        CardEffect::ApplyStatus {
            status: StatusId::Vulnerable,
            amount: Amount::Magic,
            target: EffectTarget::Chosen,
        },
    ];

    let mut dodge = card("dodge", CardType::Skill, CardTarget::SelfOnly, 1);
    dodge.base_block = 5;
    dodge.magic = 1;
    dodge.effects = vec![
        CardEffect::Block {
            amount: Amount::Block,
        },
        CardEffect::ApplyStatus {
            status: StatusId::Blur,
            amount: Amount::Magic,
            target: EffectTarget::Player,
        },
    ];

    let mut flex = card("flex", CardType::Skill, CardTarget::SelfOnly, 0);
    flex.magic = 2;
    flex.effects = vec![
        CardEffect::ApplyStatus {
            status: StatusId::Strength,
            amount: Amount::Magic,
            target: EffectTarget::Player,
        },
        CardEffect::ApplyStatus {
            status: StatusId::LoseStrength,
            amount: Amount::Magic,
            target: EffectTarget::Player,
        },
    ];

    let mut survivor = card("survivor", CardType::Skill, CardTarget::SelfOnly, 1);
    survivor.base_block = 8;
    survivor.effects = vec![
        CardEffect::Block {
            amount: Amount::Block,
        },
        CardEffect::DiscardFromHand { count: 1 },
    ];

    vec![strike, defend, bash, dodge, flex, survivor]
}

fn enemies() -> Vec<EnemyDefinition> {
    let chomp = MoveDefinition {
        id: 1,
        name: "Chomp".into(),
        intent: IntentKind::Attack,
        damage: Some(6),
        hits: 1,
        block: 0,
        effects: Vec::new(),
    };
    let brace = MoveDefinition {
        id: 2,
        name: "Brace".into(),
        intent: IntentKind::Defend,
        damage: None,
        hits: 1,
        block: 6,
        effects: Vec::new(),
    };
    vec![EnemyDefinition {
        id: "dummy".into(),
        name: "Training Dummy".into(),
        hp_min: 40,
        hp_max: 44,
        statuses: Vec::new(),
        moves: vec![chomp, brace],
        ai: AiPattern::Cycle(vec![1, 2]),
    }]
}

pub fn content() -> ContentSnapshot {
    let mut content = ContentSnapshot::new(CombatConfig::default());
    statuses().into_iter().for_each(|s| content.insert_status(s));
    cards().into_iter().for_each(|c| content.insert_card(c));
    enemies().into_iter().for_each(|e| content.insert_enemy(e));
    content.insert_relic(RelicDefinition {
        id: RelicId::Torii,
        hooks: HookSet::ATTACKED_TO_CHANGE_DAMAGE,
        amount: 1,
        threshold: 5,
        lower: 1,
    });
    content.insert_potion(PotionDefinition {
        id: PotionId::from("fire_potion"),
        target: CardTarget::Enemy,
        effects: vec![CardEffect::Damage {
            amount: Amount::Fixed(20),
            hits: Amount::Fixed(1),
            target: EffectTarget::Chosen,
            class: DamageClass::Thorns,
        }],
    });
    content
}

pub fn setup(deck: &[&str]) -> CombatSetup {
    CombatSetup {
        seed: Seed::parse(SEED).expect("literal seed"),
        floor: 1,
        player: PlayerSetup {
            hp: 80,
            max_hp: 80,
            deck: deck.iter().map(|id| CardSpec::new(id)).collect(),
            relics: Vec::new(),
            potions: vec![PotionId::from("fire_potion")],
            energy_per_turn: None,
        },
        enemies: vec![EnemySetup::new("dummy").with_hp(40)],
        config: CombatConfig::default(),
    }
}

pub fn starter() -> CombatSetup {
    setup(&[
        "strike", "strike", "strike", "strike", "strike", "defend", "defend", "defend", "defend",
        "bash",
    ])
}

pub fn start(content: &ContentSnapshot, setup: &CombatSetup) -> CombatEngine {
    CombatEngine::start(setup, CombatEnv::from_snapshot(content)).expect("setup starts")
}

/// Rearranges the piles so the hand holds exactly `ids`, in order. Every other card
/// goes back to the draw pile.
pub fn with_hand(mut state: CombatState, ids: &[&str]) -> CombatState {
    let mut pool: Vec<CardInstance> = state.piles.hand.drain(..).collect();
    pool.append(&mut state.piles.draw);
    for id in ids {
        let index = pool
            .iter()
            .position(|c| c.id.as_str() == *id)
            .unwrap_or_else(|| panic!("no `{id}` in deck"));
        state.piles.hand.push(pool.remove(index));
    }
    state.piles.draw = pool;
    state
}

pub fn apply(state: &mut CombatState, content: &ContentSnapshot, target: EntityId, id: StatusId, amount: i32) {
    let env = CombatEnv::from_snapshot(content);
    let desc = env.status(id).expect("status in content");
    let turn = state.turn;
    state
        .creature_mut(target)
        .expect("entity exists")
        .statuses
        .apply(desc, target, amount, turn, false);
}
