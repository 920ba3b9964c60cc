use std::fmt;

use tokio::sync::{broadcast, mpsc::UnboundedSender};

use super::board::{BoardSide, Side};
use super::hand::Hand;
use super::state_change::StateChange;
use crate::models::card::{CardDrawn, CardOnBoard};
use crate::models::ids::{CardId, PlayerId};
use crate::models::settings::{DamagePolicy, Settings};
use crate::utils::errors::{BoardError, GameLogicError};

const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// Whose perspective an event is told from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Perspective {
    Local,
    Remote,
}

/// All client-side state of one game session.
///
/// Owns the hand and both board sides. Mutated only by the dispatcher's handlers and by the
/// outbound actions, one at a time.
pub struct GameContext {
    transport: UnboundedSender<String>,
    changes: broadcast::Sender<StateChange>,
    damage_policy: DamagePolicy,

    my_id: Option<PlayerId>,
    enemy_id: Option<PlayerId>,

    hand: Hand,
    mana: i32,
    is_my_turn: bool,
    my_board: BoardSide,
    enemy_board: BoardSide,

    dragging_card: Option<CardDrawn>,
    dragging_card_to_attack: Option<CardOnBoard>,
}

impl GameContext {
    /// Creates the context for a new session with an empty hand of `hand_size` slots and two
    /// board sides of `board_size` slots each.
    pub fn new(transport: UnboundedSender<String>, hand_size: usize, board_size: usize) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            transport,
            changes,
            damage_policy: DamagePolicy::default(),
            my_id: None,
            enemy_id: None,
            hand: Hand::new(hand_size),
            mana: 0,
            is_my_turn: false,
            my_board: BoardSide::new(board_size),
            enemy_board: BoardSide::new(board_size),
            dragging_card: None,
            dragging_card_to_attack: None,
        }
    }

    pub fn from_settings(transport: UnboundedSender<String>, settings: &Settings) -> Self {
        let mut context = GameContext::new(transport, settings.hand_size, settings.board_size);
        context.damage_policy = settings.damage_policy;
        context
    }

    pub fn with_damage_policy(mut self, policy: DamagePolicy) -> Self {
        self.damage_policy = policy;
        self
    }

    /// A receiver of every change made from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<StateChange> {
        self.changes.subscribe()
    }

    pub(crate) fn notify(&self, change: StateChange) {
        // No subscribers is fine: nobody is rendering.
        let _ = self.changes.send(change);
    }

    pub fn transport(&self) -> &UnboundedSender<String> {
        &self.transport
    }

    pub fn damage_policy(&self) -> DamagePolicy {
        self.damage_policy
    }
}

// Identities
impl GameContext {
    pub fn my_id(&self) -> Option<PlayerId> {
        self.my_id
    }

    pub fn enemy_id(&self) -> Option<PlayerId> {
        self.enemy_id
    }

    pub fn set_identities(&mut self, my_id: PlayerId, enemy_id: PlayerId) {
        self.my_id = Some(my_id);
        self.enemy_id = Some(enemy_id);
        self.notify(StateChange::IdentitiesSet);
    }

    /// Tells whether `player_id` is the local player or the opponent.
    pub fn perspective(&self, player_id: &PlayerId) -> Result<Perspective, GameLogicError> {
        let my_id = self.my_id.ok_or(GameLogicError::IdentityNotSet)?;
        if &my_id == player_id {
            return Ok(Perspective::Local);
        }

        match self.enemy_id {
            Some(enemy_id) if &enemy_id == player_id => Ok(Perspective::Remote),
            _ => Err(GameLogicError::UnknownPlayer(player_id.to_string())),
        }
    }
}

// Turn and mana
impl GameContext {
    pub fn mana(&self) -> i32 {
        self.mana
    }

    pub fn is_my_turn(&self) -> bool {
        self.is_my_turn
    }

    pub fn start_my_turn(&mut self, mana: i32) {
        self.mana = mana;
        self.is_my_turn = true;
        self.notify(StateChange::TurnChanged {
            my_turn: true,
            mana,
        });
    }

    pub fn end_my_turn(&mut self) {
        self.is_my_turn = false;
        self.notify(StateChange::TurnChanged {
            my_turn: false,
            mana: self.mana,
        });
    }

    /// A hand card can be played on the local player's turn when its cost fits in the mana.
    pub fn is_playable(&self, card: &CardDrawn) -> bool {
        self.is_my_turn && card.current_cost <= self.mana
    }

    pub fn playable_cards(&self) -> impl Iterator<Item = &CardDrawn> + '_ {
        self.hand.cards().filter(|card| self.is_playable(card))
    }
}

// Hand
impl GameContext {
    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    /// Mutable hand access. Callers emit `StateChange::HandChanged` once done.
    pub(crate) fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }
}

// Board
impl GameContext {
    pub fn my_board(&self) -> &BoardSide {
        &self.my_board
    }

    pub fn enemy_board(&self) -> &BoardSide {
        &self.enemy_board
    }

    pub fn board(&self, side: Side) -> &BoardSide {
        match side {
            Side::Mine => &self.my_board,
            Side::Enemy => &self.enemy_board,
        }
    }

    pub(crate) fn board_mut(&mut self, side: Side) -> &mut BoardSide {
        match side {
            Side::Mine => &mut self.my_board,
            Side::Enemy => &mut self.enemy_board,
        }
    }

    pub fn place_on_board(
        &mut self,
        side: Side,
        slot: usize,
        card: CardOnBoard,
    ) -> Result<(), BoardError> {
        self.board_mut(side).place(slot, card)?;
        self.notify(StateChange::BoardChanged { side, slot });
        Ok(())
    }

    /// Finds a card on the board by id, looking at the local side first.
    pub fn find_board_card(&self, id: &CardId) -> Option<(Side, usize)> {
        if let Some(index) = self.my_board.position_of(id) {
            return Some((Side::Mine, index));
        }
        self.enemy_board
            .position_of(id)
            .map(|index| (Side::Enemy, index))
    }

    pub fn board_card_mut(&mut self, id: &CardId) -> Option<(Side, usize, &mut CardOnBoard)> {
        let (side, index) = self.find_board_card(id)?;
        self.board_mut(side)
            .occupant_mut(index)
            .map(|card| (side, index, card))
    }

    /// Clears the slot holding `id`, on whichever side it is.
    pub fn remove_board_card(&mut self, id: &CardId) -> Result<(Side, usize, CardOnBoard), BoardError> {
        let (side, _) = self
            .find_board_card(id)
            .ok_or(BoardError::CardNotFound(*id))?;
        let (slot, card) = self.board_mut(side).remove_with_id(id)?;
        self.notify(StateChange::BoardChanged { side, slot });
        Ok((side, slot, card))
    }
}

// Drag state
impl GameContext {
    pub fn dragging_card(&self) -> Option<&CardDrawn> {
        self.dragging_card.as_ref()
    }

    pub fn dragging_card_to_attack(&self) -> Option<&CardOnBoard> {
        self.dragging_card_to_attack.as_ref()
    }

    pub(crate) fn set_dragging_card(&mut self, card: Option<CardDrawn>) {
        self.dragging_card = card;
        self.notify(StateChange::DragChanged);
    }

    pub(crate) fn set_dragging_card_to_attack(&mut self, card: Option<CardOnBoard>) {
        self.dragging_card_to_attack = card;
        self.notify(StateChange::DragChanged);
    }

    pub(crate) fn take_dragging_card(&mut self) -> Option<CardDrawn> {
        let card = self.dragging_card.take();
        if card.is_some() {
            self.notify(StateChange::DragChanged);
        }
        card
    }

    pub(crate) fn take_dragging_card_to_attack(&mut self) -> Option<CardOnBoard> {
        let card = self.dragging_card_to_attack.take();
        if card.is_some() {
            self.notify(StateChange::DragChanged);
        }
        card
    }
}

impl fmt::Display for GameContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let turn = if self.is_my_turn { "mine" } else { "enemy" };
        writeln!(f, "Turn: {turn}, mana: {}", self.mana)?;

        writeln!(f, "Hand ({}/{}):", self.hand.size(), self.hand.capacity())?;
        for (index, card) in self.hand.cards().enumerate() {
            let playable = if self.is_playable(card) { "*" } else { " " };
            writeln!(
                f,
                "  {playable}[{index}] {} (cost {}, {}/{})",
                card.title, card.current_cost, card.current_attack, card.current_health
            )?;
        }

        for (label, side) in [("Enemy board", &self.enemy_board), ("My board", &self.my_board)] {
            writeln!(f, "{label}:")?;
            for slot in side.slots() {
                if let Some(card) = slot.occupant() {
                    let ready = if card.can_attack { " ready" } else { "" };
                    writeln!(
                        f,
                        "  [{}] {} ({}/{}){ready}",
                        slot.slot_num(),
                        card.title,
                        card.current_attack,
                        card.current_health
                    )?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::card::CardDefinition;
    use tokio::sync::mpsc;

    fn context() -> GameContext {
        let (tx, _rx) = mpsc::unbounded_channel();
        GameContext::new(tx, 10, 12)
    }

    fn drawn(cost: i32) -> CardDrawn {
        CardDrawn {
            id: CardId::new(),
            title: format!("Cost {cost}"),
            current_attack: 1,
            current_cost: cost,
            current_health: 1,
            definition: CardDefinition {
                title: format!("Cost {cost}"),
                cost,
                attack: 1,
                health: 1,
            },
        }
    }

    fn creature() -> CardOnBoard {
        CardOnBoard::from_definition(
            CardId::new(),
            CardDefinition {
                title: "Prawn".to_string(),
                cost: 1,
                attack: 1,
                health: 1,
            },
        )
    }

    #[test]
    fn test_session_start_state() {
        let ctx = context();
        assert_eq!(ctx.hand().capacity(), 10);
        assert_eq!(ctx.hand().size(), 0);
        assert_eq!(ctx.my_board().len(), 12);
        assert_eq!(ctx.enemy_board().len(), 12);
        assert!(!ctx.is_my_turn());
        assert!(ctx.my_id().is_none());
    }

    #[test]
    fn test_perspective() {
        let mut ctx = context();
        let me = PlayerId::new();
        let enemy = PlayerId::new();
        assert_eq!(ctx.perspective(&me), Err(GameLogicError::IdentityNotSet));

        ctx.set_identities(me, enemy);
        assert_eq!(ctx.perspective(&me), Ok(Perspective::Local));
        assert_eq!(ctx.perspective(&enemy), Ok(Perspective::Remote));
        assert!(matches!(
            ctx.perspective(&PlayerId::new()),
            Err(GameLogicError::UnknownPlayer(_))
        ));
    }

    #[test]
    fn test_playability_is_derived() {
        let mut ctx = context();
        let cheap = drawn(1);
        let pricey = drawn(4);
        ctx.hand_mut().add_card(cheap.clone()).unwrap();
        ctx.hand_mut().add_card(pricey.clone()).unwrap();

        assert!(!ctx.is_playable(&cheap), "not playable outside our turn");

        ctx.start_my_turn(3);
        assert!(ctx.is_playable(&cheap));
        assert!(!ctx.is_playable(&pricey));
        let playable: Vec<CardId> = ctx.playable_cards().map(|c| c.id).collect();
        assert_eq!(playable, vec![cheap.id]);

        ctx.end_my_turn();
        assert_eq!(ctx.playable_cards().count(), 0);
    }

    #[test]
    fn test_find_board_card_searches_mine_first() {
        let mut ctx = context();
        let mine = creature();
        let theirs = creature();
        let mine_id = mine.id;
        let theirs_id = theirs.id;
        ctx.place_on_board(Side::Mine, 0, mine).unwrap();
        ctx.place_on_board(Side::Enemy, 4, theirs).unwrap();

        assert_eq!(ctx.find_board_card(&mine_id), Some((Side::Mine, 0)));
        assert_eq!(ctx.find_board_card(&theirs_id), Some((Side::Enemy, 4)));
        assert_eq!(ctx.find_board_card(&CardId::new()), None);
    }

    #[test]
    fn test_remove_board_card_notifies() {
        let mut ctx = context();
        let mut changes = ctx.subscribe();
        let card = creature();
        let id = card.id;
        ctx.place_on_board(Side::Enemy, 4, card).unwrap();
        ctx.remove_board_card(&id).unwrap();

        assert_eq!(
            changes.try_recv().unwrap(),
            StateChange::BoardChanged {
                side: Side::Enemy,
                slot: 4
            }
        );
        assert_eq!(
            changes.try_recv().unwrap(),
            StateChange::BoardChanged {
                side: Side::Enemy,
                slot: 4
            }
        );
        assert!(ctx.enemy_board().slot(4).unwrap().is_empty());
    }

    #[test]
    fn test_display_lists_hand_and_boards() {
        let mut ctx = context();
        ctx.hand_mut().add_card(drawn(2)).unwrap();
        ctx.place_on_board(Side::Enemy, 7, creature()).unwrap();

        let dump = ctx.to_string();
        assert!(dump.contains("Hand (1/10):"));
        assert!(dump.contains("[0] Cost 2 (cost 2, 1/1)"));
        assert!(dump.contains("[7] Prawn (1/1)"));
    }
}
