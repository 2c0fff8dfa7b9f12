//! The damage pipeline.
//!
//! [`compute_damage`] is the only place a damage number is produced. Every caller
//! (card effects, enemy moves, thorns, intent display) collects its modifiers and
//! routes through it, so the composition order and the single floor cannot drift
//! between call sites.

use crate::state::EntityId;

/// Damage tag controlling which pipeline steps apply.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageClass {
    /// Attack damage: every step applies, block absorbs it.
    #[default]
    Normal,
    /// Direct HP loss: bypasses block and attacker modifiers.
    HpLoss,
    /// Reflected damage: block absorbs it, attacker modifiers are skipped.
    Thorns,
}

impl DamageClass {
    pub const fn is_blockable(self) -> bool {
        !matches!(self, Self::HpLoss)
    }
}

/// Modifiers gathered for one damage computation, in application order.
#[derive(Clone, Debug, PartialEq)]
pub struct DamageModifiers {
    /// Attacker-side flat bonuses (Strength, Vigor).
    pub additive: Vec<i32>,
    /// Attacker-side factors in registration order (Weak, Pen Nib, Double Damage).
    pub attacker: Vec<f32>,
    /// Attacker stance given-multiplier times defender stance received-multiplier.
    pub stance: f32,
    /// Defender-side factors (Vulnerable).
    pub defender: Vec<f32>,
    /// Upper bound on the result (Intangible).
    pub cap: Option<i32>,
}

impl Default for DamageModifiers {
    fn default() -> Self {
        Self {
            additive: Vec::new(),
            attacker: Vec::new(),
            stance: 1.0,
            defender: Vec::new(),
            cap: None,
        }
    }
}

/// Runs the pipeline: attacker additive, attacker multiplicative, stance, defender
/// multiplicative, cap, then one floor and a clamp at zero.
///
/// Attacker and stance steps only apply to [`DamageClass::Normal`]; defender factors
/// are applied as collected and the cap always applies.
///
/// # Examples
///
/// ```
/// use combat_core::{DamageClass, DamageModifiers, compute_damage};
///
/// let mods = DamageModifiers {
///     additive: vec![3],
///     attacker: vec![0.75],
///     defender: vec![1.5],
///     ..DamageModifiers::default()
/// };
/// // floor((6 + 3) * 0.75 * 1.5) = floor(10.125)
/// assert_eq!(compute_damage(&mods, 6, DamageClass::Normal), 10);
/// ```
pub fn compute_damage(mods: &DamageModifiers, base: i32, class: DamageClass) -> i32 {
    let mut value = base as f32;
    if class == DamageClass::Normal {
        value += mods.additive.iter().sum::<i32>() as f32;
        for factor in &mods.attacker {
            value *= factor;
        }
        value *= mods.stance;
    }
    for factor in &mods.defender {
        value *= factor;
    }
    if let Some(cap) = mods.cap {
        value = value.min(cap as f32);
    }
    (value.floor() as i32).max(0)
}

/// One damage resolution, from pipeline output to hp change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageEvent {
    pub source: Option<EntityId>,
    pub target: EntityId,
    pub base: i32,
    pub class: DamageClass,
    pub computed: i32,
}

/// What a damage resolution did to its target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DamageReport {
    pub blocked: i32,
    pub hp_lost: i32,
    pub killed: bool,
}
