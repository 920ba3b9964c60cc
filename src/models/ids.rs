use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifies one card instance for the whole game. Serialized as `{"id": "<uuid>"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId {
    pub id: Uuid,
}

impl CardId {
    pub fn new() -> Self {
        Self { id: Uuid::new_v4() }
    }
}

impl Default for CardId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// Identifies a player. Serialized as `{"guid": "<uuid>"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId {
    pub guid: Uuid,
}

impl PlayerId {
    pub fn new() -> Self {
        Self {
            guid: Uuid::new_v4(),
        }
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.guid)
    }
}

/// A position on a board side, as carried by summon events and requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardPos {
    SlotIndex(usize),
}

impl BoardPos {
    pub fn slot_index(&self) -> usize {
        match self {
            BoardPos::SlotIndex(index) => *index,
        }
    }
}
