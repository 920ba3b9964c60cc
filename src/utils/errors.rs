use thiserror::Error;

use crate::models::ids::CardId;

/// Rejected operations on the local hand. State is left untouched when one is returned.
#[derive(Debug, Error, PartialEq)]
pub enum HandError {
    #[error("Hand is full ({capacity} cards)")]
    Full { capacity: usize },
    #[error("Can't remove card at index {index} when size is {size}")]
    IndexOutOfRange { index: usize, size: usize },
    #[error("Did not find card with id {0} in hand")]
    CardNotFound(CardId),
}

#[derive(Debug, Error, PartialEq)]
pub enum BoardError {
    #[error("Slot {index} is outside of a board side of {size} slots")]
    SlotOutOfRange { index: usize, size: usize },
    #[error("Slot {0} is already occupied")]
    SlotOccupied(usize),
    #[error("Slot {0} is empty")]
    SlotEmpty(usize),
    #[error("Did not find card with id {0} on the board")]
    CardNotFound(CardId),
}

#[derive(Debug, Error, PartialEq)]
pub enum GameLogicError {
    #[error(transparent)]
    Hand(#[from] HandError),
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error("Player identities have not been received yet")]
    IdentityNotSet,
    #[error("Event references unknown player `{0}`")]
    UnknownPlayer(String),
    #[error("No card is being dragged")]
    NotDragging,
    #[error("Card {0} can't attack this turn")]
    CannotAttack(CardId),
    #[error("Card {0} is already on the board, waiting for the server")]
    AlreadySummoned(CardId),
}

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Invalid message: {0}")]
    InvalidMessage(String),
    #[error("Invalid body for `{kind}` ({reason})")]
    InvalidEventBody { kind: String, reason: String },
    #[error("Hello message carries {0} identities, expected 2")]
    InvalidHello(usize),
    #[error("Unable to serialize request: {0}")]
    Serialization(String),
}

#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Unable to connect to `{0}`")]
    ConnectionFailed(String),
    #[error("Transport channel is closed")]
    ChannelClosed,
    #[error("Unable to read from stream: {0}")]
    ReadError(String),
    #[error("Unable to write to stream: {0}")]
    WriteError(String),
}

#[derive(Debug, Error)]
pub enum ActionError {
    #[error(transparent)]
    GameLogic(#[from] GameLogicError),
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
    #[error(transparent)]
    Network(#[from] NetworkError),
}

impl From<HandError> for ActionError {
    fn from(error: HandError) -> Self {
        ActionError::GameLogic(GameLogicError::Hand(error))
    }
}

impl From<BoardError> for ActionError {
    fn from(error: BoardError) -> Self {
        ActionError::GameLogic(GameLogicError::Board(error))
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Unable to load settings: {0}")]
    Load(#[from] config::ConfigError),
    #[error("Settings were already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
    #[error(transparent)]
    GameLogic(#[from] GameLogicError),
}

impl From<HandError> for DispatchError {
    fn from(error: HandError) -> Self {
        DispatchError::GameLogic(GameLogicError::Hand(error))
    }
}

impl From<BoardError> for DispatchError {
    fn from(error: BoardError) -> Self {
        DispatchError::GameLogic(GameLogicError::Board(error))
    }
}
