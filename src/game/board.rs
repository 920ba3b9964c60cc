use serde::Serialize;

use crate::models::card::CardOnBoard;
use crate::models::ids::CardId;
use crate::utils::errors::BoardError;

pub const DEFAULT_BOARD_SIZE: usize = 12;

/// Which half of the board a slot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Side {
    Mine,
    Enemy,
}

/// A single board position. Its index never changes and it holds at most one card.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardSlot {
    slot_num: usize,
    occupant: Option<CardOnBoard>,
}

impl BoardSlot {
    pub fn new(slot_num: usize) -> Self {
        Self {
            slot_num,
            occupant: None,
        }
    }

    pub fn slot_num(&self) -> usize {
        self.slot_num
    }

    pub fn occupant(&self) -> Option<&CardOnBoard> {
        self.occupant.as_ref()
    }

    pub fn occupant_mut(&mut self) -> Option<&mut CardOnBoard> {
        self.occupant.as_mut()
    }

    pub fn set_occupant(&mut self, card: CardOnBoard) {
        self.occupant = Some(card);
    }

    pub fn clear(&mut self) -> Option<CardOnBoard> {
        self.occupant.take()
    }

    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }
}

/// One player's row of board slots. Slots keep their absolute positions; clearing one
/// never moves the others.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardSide {
    slots: Vec<BoardSlot>,
}

impl BoardSide {
    pub fn new(size: usize) -> Self {
        Self {
            slots: (0..size).map(BoardSlot::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[BoardSlot] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Result<&BoardSlot, BoardError> {
        self.slots.get(index).ok_or(BoardError::SlotOutOfRange {
            index,
            size: self.slots.len(),
        })
    }

    fn slot_mut(&mut self, index: usize) -> Result<&mut BoardSlot, BoardError> {
        let size = self.slots.len();
        self.slots
            .get_mut(index)
            .ok_or(BoardError::SlotOutOfRange { index, size })
    }

    pub fn occupant(&self, index: usize) -> Option<&CardOnBoard> {
        self.slots.get(index).and_then(BoardSlot::occupant)
    }

    pub fn occupant_mut(&mut self, index: usize) -> Option<&mut CardOnBoard> {
        self.slots.get_mut(index).and_then(BoardSlot::occupant_mut)
    }

    /// Places `card` at `index`. An occupied slot is left alone and reported.
    pub fn place(&mut self, index: usize, card: CardOnBoard) -> Result<(), BoardError> {
        let slot = self.slot_mut(index)?;
        if !slot.is_empty() {
            return Err(BoardError::SlotOccupied(index));
        }
        slot.set_occupant(card);
        Ok(())
    }

    pub fn clear(&mut self, index: usize) -> Result<Option<CardOnBoard>, BoardError> {
        Ok(self.slot_mut(index)?.clear())
    }

    pub fn position_of(&self, id: &CardId) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.occupant().is_some_and(|card| &card.id == id))
    }

    pub fn find(&self, id: &CardId) -> Option<&CardOnBoard> {
        self.position_of(id).and_then(|index| self.occupant(index))
    }

    pub fn find_mut(&mut self, id: &CardId) -> Option<&mut CardOnBoard> {
        let index = self.position_of(id)?;
        self.occupant_mut(index)
    }

    /// Clears whichever slot holds the card `id` and returns the slot index with the card.
    pub fn remove_with_id(&mut self, id: &CardId) -> Result<(usize, CardOnBoard), BoardError> {
        let index = self.position_of(id).ok_or(BoardError::CardNotFound(*id))?;
        let card = self.slots[index]
            .clear()
            .ok_or(BoardError::CardNotFound(*id))?;
        Ok((index, card))
    }

    pub fn cards(&self) -> impl Iterator<Item = &CardOnBoard> + '_ {
        self.slots.iter().filter_map(BoardSlot::occupant)
    }

    /// Lets every card on this side attack again. Returns the slots that changed.
    pub fn ready_all(&mut self) -> Vec<usize> {
        self.slots
            .iter_mut()
            .filter_map(|slot| {
                let card = slot.occupant.as_mut()?;
                if card.can_attack {
                    return None;
                }
                card.can_attack = true;
                Some(slot.slot_num)
            })
            .collect()
    }
}

impl Default for BoardSide {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::card::CardDefinition;

    fn creature(title: &str) -> CardOnBoard {
        CardOnBoard::from_definition(
            CardId::new(),
            CardDefinition {
                title: title.to_string(),
                cost: 2,
                attack: 2,
                health: 2,
            },
        )
    }

    #[test]
    fn test_new_side_has_indexed_empty_slots() {
        let side = BoardSide::new(12);
        assert_eq!(side.len(), 12);
        for (index, slot) in side.slots().iter().enumerate() {
            assert_eq!(slot.slot_num(), index);
            assert!(slot.is_empty());
        }
    }

    #[test]
    fn test_place_does_not_touch_other_slots() {
        let mut side = BoardSide::new(12);
        let before = side.clone();
        side.place(5, creature("Prawn")).unwrap();

        for index in 0..12 {
            if index == 5 {
                assert_eq!(side.occupant(index).unwrap().title, "Prawn");
            } else {
                assert_eq!(side.slot(index).unwrap(), before.slot(index).unwrap());
            }
        }
    }

    #[test]
    fn test_place_on_occupied_slot_is_rejected() {
        let mut side = BoardSide::new(12);
        side.place(3, creature("Prawn")).unwrap();
        assert_eq!(
            side.place(3, creature("Indoor Cat")).unwrap_err(),
            BoardError::SlotOccupied(3)
        );
        assert_eq!(side.occupant(3).unwrap().title, "Prawn");
    }

    #[test]
    fn test_place_out_of_range_is_rejected() {
        let mut side = BoardSide::new(12);
        assert_eq!(
            side.place(12, creature("Prawn")).unwrap_err(),
            BoardError::SlotOutOfRange { index: 12, size: 12 }
        );
    }

    #[test]
    fn test_remove_with_id_leaves_gap() {
        let mut side = BoardSide::new(12);
        let first = creature("Prawn");
        let second = creature("Indoor Cat");
        let first_id = first.id;
        side.place(1, first).unwrap();
        side.place(2, second).unwrap();

        let (index, removed) = side.remove_with_id(&first_id).unwrap();
        assert_eq!(index, 1);
        assert_eq!(removed.id, first_id);
        assert!(side.slot(1).unwrap().is_empty());
        assert_eq!(side.occupant(2).unwrap().title, "Indoor Cat");
    }

    #[test]
    fn test_ready_all_reports_changed_slots() {
        let mut side = BoardSide::new(6);
        let mut ready = creature("Attack Dog");
        ready.can_attack = true;
        side.place(0, ready).unwrap();
        side.place(3, creature("Prawn")).unwrap();

        assert_eq!(side.ready_all(), vec![3]);
        assert!(side.cards().all(|card| card.can_attack));
        assert!(side.ready_all().is_empty());
    }

    #[test]
    fn test_find_mut_by_id() {
        let mut side = BoardSide::new(4);
        let card = creature("Prawn");
        let id = card.id;
        side.place(0, card).unwrap();

        side.find_mut(&id).unwrap().current_health = 1;
        assert_eq!(side.find(&id).unwrap().current_health, 1);
        assert!(side.find(&CardId::new()).is_none());
    }
}
