use serde::Serialize;

use super::board::Side;

/// Emitted by the game context after each completed mutation so renderers know what to redraw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum StateChange {
    IdentitiesSet,
    HandChanged,
    BoardChanged { side: Side, slot: usize },
    TurnChanged { my_turn: bool, mana: i32 },
    DragChanged,
}
