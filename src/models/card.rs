use serde::{Deserialize, Serialize};

use super::ids::CardId;

/// The immutable base stats of a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub title: String,
    pub cost: i32,
    pub attack: i32,
    pub health: i32,
}

/// A card sitting in the local player's hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDrawn {
    pub id: CardId,
    pub title: String,
    pub current_attack: i32,
    pub current_cost: i32,
    pub current_health: i32,
    pub definition: CardDefinition,
}

/// A card occupying a board slot, on either side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardOnBoard {
    pub id: CardId,
    pub title: String,
    pub current_attack: i32,
    pub current_cost: i32,
    pub current_health: i32,
    pub definition: CardDefinition,
    pub can_attack: bool,
}

impl CardOnBoard {
    /// Builds a freshly summoned card from its base stats. Summoned cards can't attack yet.
    pub fn from_definition(id: CardId, definition: CardDefinition) -> Self {
        Self {
            id,
            title: definition.title.clone(),
            current_attack: definition.attack,
            current_cost: definition.cost,
            current_health: definition.health,
            definition,
            can_attack: false,
        }
    }
}

impl From<CardDrawn> for CardOnBoard {
    fn from(card: CardDrawn) -> Self {
        Self {
            id: card.id,
            title: card.title,
            current_attack: card.current_attack,
            current_cost: card.current_cost,
            current_health: card.current_health,
            definition: card.definition,
            can_attack: false,
        }
    }
}
