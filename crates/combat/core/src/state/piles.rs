//! Card instances and the four combat piles.

use super::CardId;

/// A card in combat.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardInstance {
    /// Combat-unique handle, stable while the card moves between piles.
    pub uid: u32,
    pub id: CardId,
    pub upgraded: bool,
    /// Current cost; `-1` is X-cost, `-2` is unplayable.
    pub cost: i32,
    /// Per-card scratch counter used by scaling cards.
    pub misc: i32,
}

impl CardInstance {
    /// Id with a `+` suffix for upgraded copies.
    pub fn label(&self) -> String {
        if self.upgraded {
            format!("{}+", self.id)
        } else {
            self.id.to_string()
        }
    }
}

/// Pile identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PileKind {
    Draw,
    Hand,
    Discard,
    Exhaust,
}

/// The combat piles. The top of the draw pile is the **last** element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Piles {
    pub draw: Vec<CardInstance>,
    pub hand: Vec<CardInstance>,
    pub discard: Vec<CardInstance>,
    pub exhaust: Vec<CardInstance>,
}

impl Piles {
    pub fn pile(&self, kind: PileKind) -> &Vec<CardInstance> {
        match kind {
            PileKind::Draw => &self.draw,
            PileKind::Hand => &self.hand,
            PileKind::Discard => &self.discard,
            PileKind::Exhaust => &self.exhaust,
        }
    }

    pub fn pile_mut(&mut self, kind: PileKind) -> &mut Vec<CardInstance> {
        match kind {
            PileKind::Draw => &mut self.draw,
            PileKind::Hand => &mut self.hand,
            PileKind::Discard => &mut self.discard,
            PileKind::Exhaust => &mut self.exhaust,
        }
    }

    /// Locates a card by uid.
    pub fn find(&self, uid: u32) -> Option<(PileKind, usize)> {
        [PileKind::Hand, PileKind::Draw, PileKind::Discard, PileKind::Exhaust]
            .into_iter()
            .find_map(|kind| {
                self.pile(kind)
                    .iter()
                    .position(|c| c.uid == uid)
                    .map(|i| (kind, i))
            })
    }

    /// Cards across all piles.
    pub fn total(&self) -> usize {
        self.draw.len() + self.hand.len() + self.discard.len() + self.exhaust.len()
    }

    /// Labels of a pile in storage order.
    pub fn labels(&self, kind: PileKind) -> Vec<String> {
        self.pile(kind).iter().map(CardInstance::label).collect()
    }
}
