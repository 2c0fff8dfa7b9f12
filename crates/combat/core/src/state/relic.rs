//! Relics owned by the player and their per-combat counters.

/// Every relic the engine has behavior for.
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
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RelicId {
    Anchor,
    Vajra,
    BagOfMarbles,
    Lantern,
    PenNib,
    Kunai,
    Shuriken,
    OrnamentalFan,
    LetterOpener,
    Orichalcum,
    Torii,
    TungstenRod,
    BurningBlood,
    HappyFlower,
    RunicPyramid,
    CentennialPuzzle,
    IceCream,
    Sundial,
    ArtOfWar,
}

/// A relic and its counter.
///
/// `counter` persists across turns (and across combats for relics such as Pen Nib);
/// `armed` is a single per-combat or per-turn flag whose meaning depends on the relic.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RelicState {
    pub id: RelicId,
    pub counter: i32,
    pub armed: bool,
}

impl RelicState {
    pub fn new(id: RelicId) -> Self {
        Self {
            id,
            counter: 0,
            armed: false,
        }
    }

    pub fn with_counter(mut self, counter: i32) -> Self {
        self.counter = counter;
        self
    }
}
