use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::card::{CardDefinition, CardDrawn};
use super::ids::{BoardPos, CardId, PlayerId};
use crate::utils::errors::ProtocolError;

pub const CARD_DRAWN: &str = "CardDrawnClientEvent";
pub const PLAYER_START_TURN: &str = "PlayerStartTurnEvent";
pub const PLAYER_END_TURN: &str = "PlayerEndTurnEvent";
pub const PLAYER_SUMMONS_CREATURE: &str = "PlayerSummonsCreatureClientEvent";
pub const CREATURE_ATTACKS_TARGET: &str = "CreatureAttacksTargetEvent";
pub const CREATURE_TAKES_DAMAGE: &str = "CreatureTakesDamageEvent";
pub const CREATURE_DESTROYED: &str = "CreatureDestroyedEvent";

// Names the game server's own event handlers forward unchanged.
pub const PLAYER_SUMMONS_CREATURE_HANDLER: &str = "PlayerSummonsCreatureEvent";
pub const CREATURE_TAKES_DAMAGE_HANDLER: &str = "CreatureTakesDamageEventHandler";

/// Top-level envelope of every message the server sends.
///
/// - `{"Hello": [{"guid": ..}, {"guid": ..}]}` carries the local identity first, then the opponent's.
/// - `{"Event": {"kind": .., "body": ..}}` carries a game event whose body is a JSON document
///   encoded as a string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum FromServer {
    Hello(Vec<PlayerId>),
    Event(EventEnvelope),
}

impl FromServer {
    pub fn parse(raw: &str) -> Result<Self, ProtocolError> {
        serde_json::from_str(raw).map_err(|e| ProtocolError::InvalidMessage(e.to_string()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub kind: String,
    pub body: String,
}

impl EventEnvelope {
    /// Packs an event the way the server does, with the body serialized a second time.
    pub fn wrap(event: &GameEvent) -> Result<Self, ProtocolError> {
        let body = match event {
            GameEvent::CardDrawn(e) => serde_json::to_string(e),
            GameEvent::PlayerStartTurn(e) => serde_json::to_string(e),
            GameEvent::PlayerEndTurn(e) => serde_json::to_string(e),
            GameEvent::PlayerSummonsCreature(e) => serde_json::to_string(e),
            GameEvent::CreatureAttacksTarget(e) => serde_json::to_string(e),
            GameEvent::CreatureTakesDamage(e) => serde_json::to_string(e),
            GameEvent::CreatureDestroyed(e) => serde_json::to_string(e),
        }
        .map_err(|e| ProtocolError::Serialization(e.to_string()))?;

        Ok(Self {
            kind: event.kind().to_string(),
            body,
        })
    }
}

/// Information one player may see and the other may not, like the card a player drew.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HiddenInfo<T> {
    Visible(T),
    Hidden,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardDrawnClientEvent {
    pub player_id: PlayerId,
    pub card_drawn: HiddenInfo<CardDrawn>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStartTurnEvent {
    pub player_id: PlayerId,
    pub starting_mana: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerEndTurnEvent {
    pub player_id: PlayerId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSummonsCreatureClientEvent {
    pub player_id: PlayerId,
    pub card_id: CardId,
    pub definition: CardDefinition,
    pub target_pos: BoardPos,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureAttacksTargetEvent {
    pub player_id: PlayerId,
    pub attacker: CardId,
    pub target: CardId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureTakesDamageEvent {
    pub card_to_damage: CardId,
    pub damage: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureDestroyedEvent {
    pub creature_destroyed: CardId,
}

/// A decoded game event, one variant per kind the client understands.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    CardDrawn(CardDrawnClientEvent),
    PlayerStartTurn(PlayerStartTurnEvent),
    PlayerEndTurn(PlayerEndTurnEvent),
    PlayerSummonsCreature(PlayerSummonsCreatureClientEvent),
    CreatureAttacksTarget(CreatureAttacksTargetEvent),
    CreatureTakesDamage(CreatureTakesDamageEvent),
    CreatureDestroyed(CreatureDestroyedEvent),
}

impl GameEvent {
    /// Decodes the nested body of an event envelope.
    ///
    /// Returns `Ok(None)` for kinds this client does not know, so newer servers can add events
    /// without breaking older clients.
    pub fn decode(envelope: &EventEnvelope) -> Result<Option<Self>, ProtocolError> {
        let kind = envelope.kind.as_str();
        let body = envelope.body.as_str();

        let event = match kind {
            CARD_DRAWN => GameEvent::CardDrawn(decode_body(kind, body)?),
            PLAYER_START_TURN => GameEvent::PlayerStartTurn(decode_body(kind, body)?),
            PLAYER_END_TURN => GameEvent::PlayerEndTurn(decode_body(kind, body)?),
            PLAYER_SUMMONS_CREATURE | PLAYER_SUMMONS_CREATURE_HANDLER => {
                GameEvent::PlayerSummonsCreature(decode_body(kind, body)?)
            }
            CREATURE_ATTACKS_TARGET => GameEvent::CreatureAttacksTarget(decode_body(kind, body)?),
            CREATURE_TAKES_DAMAGE | CREATURE_TAKES_DAMAGE_HANDLER => {
                GameEvent::CreatureTakesDamage(decode_body(kind, body)?)
            }
            CREATURE_DESTROYED => GameEvent::CreatureDestroyed(decode_body(kind, body)?),
            _ => return Ok(None),
        };

        Ok(Some(event))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            GameEvent::CardDrawn(_) => CARD_DRAWN,
            GameEvent::PlayerStartTurn(_) => PLAYER_START_TURN,
            GameEvent::PlayerEndTurn(_) => PLAYER_END_TURN,
            GameEvent::PlayerSummonsCreature(_) => PLAYER_SUMMONS_CREATURE,
            GameEvent::CreatureAttacksTarget(_) => CREATURE_ATTACKS_TARGET,
            GameEvent::CreatureTakesDamage(_) => CREATURE_TAKES_DAMAGE,
            GameEvent::CreatureDestroyed(_) => CREATURE_DESTROYED,
        }
    }
}

fn decode_body<T: DeserializeOwned>(kind: &str, body: &str) -> Result<T, ProtocolError> {
    serde_json::from_str(body).map_err(|e| ProtocolError::InvalidEventBody {
        kind: kind.to_string(),
        reason: e.to_string(),
    })
}
