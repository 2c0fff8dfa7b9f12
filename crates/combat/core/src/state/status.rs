//! Status ("power") instances attached to a creature.
//!
//! The merge, clamp and removal rules here are driven entirely by the
//! [`StatusDescriptor`] supplied by content; behaviors (what a status *does* when a
//! hook fires) live in `hooks::status`.

use crate::env::{SignRule, StackingRule, StatusDescriptor};

use super::EntityId;

/// Every status the engine has behavior for.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusId {
    Strength,
    Dexterity,
    Weak,
    Vulnerable,
    Frail,
    Artifact,
    Intangible,
    Buffer,
    Thorns,
    Metallicize,
    PlatedArmor,
    Poison,
    Regen,
    Ritual,
    Vigor,
    DoubleDamage,
    PenNib,
    Blur,
    Barricade,
    NextTurnBlock,
    Energized,
    DrawCardNextTurn,
    NoDraw,
    Entangled,
    LoseStrength,
    LoseDexterity,
    Rage,
    FlameBarrier,
    FeelNoPain,
    DemonForm,
    NoxiousFumes,
    Envenom,
    MentalFortress,
    Rushdown,
    Mantra,
    CurlUp,
    Angry,
    SharpHide,
    Equilibrium,
}

/// One status on one creature.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusInstance {
    pub id: StatusId,
    pub amount: i32,
    pub owner: EntityId,
    pub turn_applied: u32,
    /// Set when the instance was gained in a phase whose own decay sweep must skip it.
    pub just_applied: bool,
}

/// Result of a stack mutation, used to fire `StackChanged`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StackChange {
    pub id: StatusId,
    pub owner: EntityId,
    pub before: i32,
    pub after: i32,
    pub created: bool,
    pub removed: bool,
}

impl StackChange {
    pub fn delta(&self) -> i32 {
        self.after - self.before
    }
}

/// Statuses of one creature, in order of first application.
///
/// Holds at most one instance per [`StatusId`]; re-application merges.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StatusSet {
    entries: Vec<StatusInstance>,
}

impl StatusSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: StatusId) -> Option<&StatusInstance> {
        self.entries.iter().find(|s| s.id == id)
    }

    pub fn get_mut(&mut self, id: StatusId) -> Option<&mut StatusInstance> {
        self.entries.iter_mut().find(|s| s.id == id)
    }

    /// Current amount, or 0 when absent.
    pub fn amount(&self, id: StatusId) -> i32 {
        self.get(id).map_or(0, |s| s.amount)
    }

    pub fn has(&self, id: StatusId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusInstance> {
        self.entries.iter()
    }

    pub fn ids(&self) -> Vec<StatusId> {
        self.entries.iter().map(|s| s.id).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn remove(&mut self, id: StatusId) -> Option<StatusInstance> {
        let index = self.entries.iter().position(|s| s.id == id)?;
        Some(self.entries.remove(index))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Applies `amount` stacks following the descriptor's stacking, sign and cap rules.
    ///
    /// Returns `None` when the application is a no-op (for example a non-positive
    /// amount of a clamped status that is not present). An instance that lands on its
    /// removal threshold is removed before returning.
    pub fn apply(
        &mut self,
        desc: &StatusDescriptor,
        owner: EntityId,
        amount: i32,
        turn: u32,
        fresh: bool,
    ) -> Option<StackChange> {
        let id = desc.id;
        let cap = desc.max_amount;
        let Some(index) = self.entries.iter().position(|s| s.id == id) else {
            let initial = match desc.stacking {
                StackingRule::BooleanPresence => 1,
                _ => clamp(desc, amount, cap),
            };
            if amount == 0 || desc.should_remove(initial) {
                return None;
            }
            self.entries.push(StatusInstance {
                id,
                amount: initial,
                owner,
                turn_applied: turn,
                just_applied: fresh,
            });
            return Some(StackChange {
                id,
                owner,
                before: 0,
                after: initial,
                created: true,
                removed: false,
            });
        };

        let instance = &mut self.entries[index];
        let before = instance.amount;
        let merged = match desc.stacking {
            StackingRule::Additive => before.saturating_add(amount),
            StackingRule::OverwriteIfGreater => before.max(amount),
            StackingRule::BooleanPresence => 1,
        };
        let after = clamp(desc, merged, cap);
        instance.amount = after;
        instance.just_applied |= fresh;
        let removed = desc.should_remove(after);
        if removed {
            self.entries.remove(index);
        }
        Some(StackChange {
            id,
            owner,
            before,
            after,
            created: false,
            removed,
        })
    }

    /// Subtracts `by` stacks without consulting the stacking rule.
    pub fn reduce(&mut self, desc: &StatusDescriptor, by: i32) -> Option<StackChange> {
        let index = self.entries.iter().position(|s| s.id == desc.id)?;
        let instance = &mut self.entries[index];
        let before = instance.amount;
        let owner = instance.owner;
        let after = clamp(desc, before.saturating_sub(by), desc.max_amount);
        instance.amount = after;
        let removed = desc.should_remove(after);
        if removed {
            self.entries.remove(index);
        }
        Some(StackChange {
            id: desc.id,
            owner,
            before,
            after,
            created: false,
            removed,
        })
    }

    /// Returns true when two instances share one id.
    pub fn has_duplicates(&self) -> bool {
        self.entries
            .iter()
            .enumerate()
            .any(|(i, a)| self.entries[i + 1..].iter().any(|b| b.id == a.id))
    }
}

fn clamp(desc: &StatusDescriptor, amount: i32, cap: i32) -> i32 {
    match desc.sign {
        SignRule::ClampedAtZero => amount.clamp(0, cap),
        SignRule::CanGoNegative => amount.clamp(-cap, cap),
    }
}
