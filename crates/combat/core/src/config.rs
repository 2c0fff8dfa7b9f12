/// Combat configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Maximum number of cards in hand. Draws past this limit are skipped and
    /// generated cards go to the discard pile instead.
    pub hand_limit: usize,
    /// Cards drawn at the start of every player turn.
    pub draw_per_turn: u32,
    /// Energy restored at the start of every player turn.
    pub base_energy: i32,
    /// Number of potion slots the player starts with.
    pub potion_slots: usize,
    /// Upper bound on any status amount (and lower bound for signed statuses).
    pub max_status_amount: i32,
    /// Reactions processed for a single action before the cascade is declared runaway.
    pub max_reactions: u32,
}

impl CombatConfig {
    // ===== compile-time constants used as type parameters =====
    /// Hard upper bound on potion slots.
    pub const MAX_POTION_SLOTS: usize = 5;
    /// Enemy move history kept for AI repeat rules.
    pub const MOVE_HISTORY: usize = 3;
    /// Maximum enemies in one encounter.
    pub const MAX_ENEMIES: usize = 6;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_HAND_LIMIT: usize = 10;
    pub const DEFAULT_DRAW_PER_TURN: u32 = 5;
    pub const DEFAULT_BASE_ENERGY: i32 = 3;
    pub const DEFAULT_POTION_SLOTS: usize = 3;
    pub const DEFAULT_MAX_STATUS_AMOUNT: i32 = 999;
    pub const DEFAULT_MAX_REACTIONS: u32 = 10_000;

    pub fn new() -> Self {
        Self {
            hand_limit: Self::DEFAULT_HAND_LIMIT,
            draw_per_turn: Self::DEFAULT_DRAW_PER_TURN,
            base_energy: Self::DEFAULT_BASE_ENERGY,
            potion_slots: Self::DEFAULT_POTION_SLOTS,
            max_status_amount: Self::DEFAULT_MAX_STATUS_AMOUNT,
            max_reactions: Self::DEFAULT_MAX_REACTIONS,
        }
    }

    pub fn with_potion_slots(mut self, slots: usize) -> Self {
        self.potion_slots = slots.min(Self::MAX_POTION_SLOTS);
        self
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
