//! External action API.
//!
//! Actions are a closed, versioned enum carrying only indices and small integers, so
//! every action serializes to a flat JSON record and replays byte-for-byte from a log.
mod error;

pub use error::ActionError;

use crate::observation::Observation;

/// Version of the action schema. Bumped on any incompatible change to [`Action`].
pub const ACTION_API_VERSION: u32 = 1;

/// One external decision.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum Action {
    /// Plays the card at `hand_index`.
    ///
    /// `target` is an enemy index in encounter order. `choices` are hand indices
    /// counted with the played card already removed from the hand.
    PlayCard {
        hand_index: usize,
        #[cfg_attr(feature = "serde", serde(default))]
        target: Option<usize>,
        #[cfg_attr(feature = "serde", serde(default))]
        choices: Vec<usize>,
    },
    UsePotion {
        slot: usize,
        #[cfg_attr(feature = "serde", serde(default))]
        target: Option<usize>,
    },
    DiscardPotion {
        slot: usize,
    },
    EndTurn,
}

impl Action {
    /// Play a card that needs no target or choices.
    pub fn play(hand_index: usize) -> Self {
        Self::PlayCard {
            hand_index,
            target: None,
            choices: Vec::new(),
        }
    }

    /// Play a card at an enemy.
    pub fn play_at(hand_index: usize, target: usize) -> Self {
        Self::PlayCard {
            hand_index,
            target: Some(target),
            choices: Vec::new(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PlayCard { .. } => "play_card",
            Self::UsePotion { .. } => "use_potion",
            Self::DiscardPotion { .. } => "discard_potion",
            Self::EndTurn => "end_turn",
        }
    }
}

/// An action tagged with the schema version it was written against.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionEnvelope {
    pub version: u32,
    pub action: Action,
}

impl ActionEnvelope {
    pub fn new(action: Action) -> Self {
        Self {
            version: ACTION_API_VERSION,
            action,
        }
    }

    /// Unwraps the action after checking the schema version.
    pub fn open(self) -> Result<Action, ActionError> {
        if self.version != ACTION_API_VERSION {
            return Err(ActionError::UnsupportedVersion {
                found: self.version,
                expected: ACTION_API_VERSION,
            });
        }
        Ok(self.action)
    }
}

/// What the caller must supply to complete an action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SelectionKind {
    /// An enemy index for `target`.
    Target,
    /// Exactly `count` hand indices for `choices`, to discard.
    Discard { count: usize },
    /// Exactly `count` hand indices for `choices`, to exhaust.
    Exhaust { count: usize },
}

/// Structured "need more input" response.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectionRequest {
    /// The action as received; re-send it with the missing field filled in.
    pub action: Action,
    pub kind: SelectionKind,
    /// Valid values for the missing field.
    pub options: Vec<usize>,
}

/// Successful result of executing an action.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "status", rename_all = "snake_case"))]
pub enum ActionOutcome {
    Applied(Box<Observation>),
    NeedsInput(SelectionRequest),
}

impl ActionOutcome {
    pub fn observation(&self) -> Option<&Observation> {
        match self {
            Self::Applied(obs) => Some(obs),
            Self::NeedsInput(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_rejects_other_versions() {
        let envelope = ActionEnvelope {
            version: 2,
            action: Action::EndTurn,
        };
        assert_eq!(
            envelope.open(),
            Err(ActionError::UnsupportedVersion {
                found: 2,
                expected: ACTION_API_VERSION
            })
        );
        assert_eq!(ActionEnvelope::new(Action::EndTurn).open(), Ok(Action::EndTurn));
    }

    #[test]
    fn actions_serialize_to_flat_records() {
        let json = serde_json::to_value(Action::play_at(2, 1)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "play_card", "hand_index": 2, "target": 1, "choices": []})
        );
        let back: Action = serde_json::from_str(r#"{"type":"end_turn"}"#).unwrap();
        assert_eq!(back, Action::EndTurn);
        let partial: Action = serde_json::from_str(r#"{"type":"play_card","hand_index":0}"#).unwrap();
        assert_eq!(partial, Action::play(0));
    }
}
