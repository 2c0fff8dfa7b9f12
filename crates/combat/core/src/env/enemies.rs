//! Enemy definitions: HP range, starting statuses, move table and AI pattern.

use crate::state::{CardId, EnemyId, PileKind, StatusId};

/// Displayed intent category of a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IntentKind {
    Attack,
    AttackDefend,
    AttackBuff,
    AttackDebuff,
    Defend,
    DefendBuff,
    Buff,
    Debuff,
    StrongDebuff,
    Unknown,
}

/// Who a move effect lands on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveTarget {
    Player,
    Itself,
    AllEnemies,
}

/// Non-damage effects of an enemy move, resolved after its hits and block.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveEffect {
    ApplyStatus {
        status: StatusId,
        amount: i32,
        target: MoveTarget,
    },
    /// Shuffles status cards into one of the player's piles.
    AddCard {
        card: CardId,
        pile: PileKind,
        count: u32,
    },
    Heal {
        amount: i32,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveDefinition {
    pub id: u8,
    pub name: String,
    pub intent: IntentKind,
    /// Base damage per hit; `None` for moves that do not attack.
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage: Option<i32>,
    #[cfg_attr(feature = "serde", serde(default = "one"))]
    pub hits: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub block: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<MoveEffect>,
}

#[cfg(feature = "serde")]
fn one() -> u32 {
    1
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightedMove {
    pub move_id: u8,
    /// Share of a `0..100` roll.
    pub weight: u32,
}

/// Move selection rule. Every roll consumes exactly one `ai` draw, whatever the
/// pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AiPattern {
    /// Moves in a fixed rotation.
    Cycle(Vec<u8>),
    /// Roll-weighted choice; a move already used `max_repeats` times in a row is
    /// skipped in favour of the next entry.
    Weighted {
        moves: Vec<WeightedMove>,
        max_repeats: u8,
    },
    /// A fixed opening move, then another pattern.
    FirstThen { first: u8, then: Box<AiPattern> },
}

impl AiPattern {
    /// Picks the next move from a `0..100` roll and the enemy's history.
    pub fn pick(&self, roll: u32, moves_taken: u32, history: &[u8]) -> Option<u8> {
        match self {
            Self::Cycle(order) => {
                if order.is_empty() {
                    return None;
                }
                Some(order[moves_taken as usize % order.len()])
            }
            Self::Weighted { moves, max_repeats } => {
                let repeats = |id: u8| history.iter().rev().take_while(|&&m| m == id).count();
                let total: u32 = moves.iter().map(|m| m.weight).sum();
                if total == 0 {
                    return moves.first().map(|m| m.move_id);
                }
                let point = roll % total;
                let mut acc = 0;
                let start = moves
                    .iter()
                    .position(|m| {
                        acc += m.weight;
                        point < acc
                    })
                    .unwrap_or(0);
                (0..moves.len())
                    .map(|offset| moves[(start + offset) % moves.len()])
                    .find(|m| *max_repeats == 0 || repeats(m.move_id) < *max_repeats as usize)
                    .or_else(|| moves.get(start).copied())
                    .map(|m| m.move_id)
            }
            Self::FirstThen { first, then } => {
                if moves_taken == 0 {
                    Some(*first)
                } else {
                    then.pick(roll, moves_taken - 1, history)
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StartingStatus {
    pub status: StatusId,
    pub amount: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyDefinition {
    pub id: EnemyId,
    pub name: String,
    pub hp_min: i32,
    pub hp_max: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub statuses: Vec<StartingStatus>,
    pub moves: Vec<MoveDefinition>,
    pub ai: AiPattern,
}

impl EnemyDefinition {
    pub fn move_def(&self, id: u8) -> Option<&MoveDefinition> {
        self.moves.iter().find(|m| m.id == id)
    }
}

pub trait EnemyOracle: Send + Sync {
    fn enemy(&self, id: &EnemyId) -> Option<&EnemyDefinition>;
}
