use std::str::FromStr;

use crate::utils::errors::ProtocolError;

/// A command typed into the console client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    /// Drag the hand card at `hand_index` onto the local board slot `slot`.
    Summon { hand_index: usize, slot: usize },
    /// Drag the local card at `my_slot` onto the enemy card at `enemy_slot`.
    Attack { my_slot: usize, enemy_slot: usize },
    EndTurn,
    /// Print the current hand and both board sides.
    State,
}

impl FromStr for UserCommand {
    type Err = ProtocolError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts.as_slice() {
            ["summon", hand, slot] => Ok(UserCommand::Summon {
                hand_index: parse_index(hand)?,
                slot: parse_index(slot)?,
            }),
            ["attack", mine, enemy] => Ok(UserCommand::Attack {
                my_slot: parse_index(mine)?,
                enemy_slot: parse_index(enemy)?,
            }),
            ["end"] => Ok(UserCommand::EndTurn),
            ["state"] => Ok(UserCommand::State),
            _ => Err(ProtocolError::InvalidMessage(format!(
                "Unknown command `{}` (expected: summon <hand> <slot> | attack <mine> <enemy> | end | state)",
                line.trim()
            ))),
        }
    }
}

fn parse_index(raw: &str) -> Result<usize, ProtocolError> {
    raw.parse::<usize>()
        .map_err(|_| ProtocolError::InvalidMessage(format!("`{raw}` is not a slot index")))
}
