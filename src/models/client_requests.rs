use std::fmt;

use serde::{Deserialize, Serialize};

use super::ids::{BoardPos, CardId};
use crate::utils::errors::ProtocolError;

/// Requests the client sends to the server.
///
/// Serialized with serde's external tagging, which gives the shapes the server expects:
/// `{"SummonFromHand": {..}}`, `{"Attack": {..}}` and the bare string `"EndTurn"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ClientRequest {
    SummonFromHand {
        card_id: CardId,
        target_pos: BoardPos,
    },
    Attack {
        attacker_card_id: CardId,
        target_card_id: CardId,
    },
    EndTurn,
}

impl ClientRequest {
    pub fn to_json(&self) -> Result<String, ProtocolError> {
        serde_json::to_string(self).map_err(|e| ProtocolError::Serialization(e.to_string()))
    }
}

impl fmt::Display for ClientRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientRequest::SummonFromHand {
                card_id,
                target_pos,
            } => write!(
                f,
                "summon card {card_id} to slot {}",
                target_pos.slot_index()
            ),
            ClientRequest::Attack {
                attacker_card_id,
                target_card_id,
            } => write!(f, "card {attacker_card_id} attacks card {target_card_id}"),
            ClientRequest::EndTurn => write!(f, "end turn"),
        }
    }
}
