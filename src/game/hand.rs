use crate::models::card::CardDrawn;
use crate::models::ids::CardId;
use crate::utils::errors::HandError;

pub const DEFAULT_HAND_SIZE: usize = 10;

/// One fixed position in the hand.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HandSlot {
    occupant: Option<CardDrawn>,
}

impl HandSlot {
    pub fn occupant(&self) -> Option<&CardDrawn> {
        self.occupant.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }
}

/// The local player's hand: `capacity` fixed slots whose occupied ones always form the
/// prefix `[0, size)`.
///
/// Renderers can bind to slot indices; removals shift later cards left so the hand never
/// shows a gap.
#[derive(Debug, Clone, PartialEq)]
pub struct Hand {
    slots: Vec<HandSlot>,
    size: usize,
}

impl Hand {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![HandSlot::default(); capacity],
            size: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_full(&self) -> bool {
        self.size >= self.slots.len()
    }

    pub fn slots(&self) -> &[HandSlot] {
        &self.slots
    }

    pub fn get(&self, index: usize) -> Option<&CardDrawn> {
        self.slots.get(index).and_then(HandSlot::occupant)
    }

    /// The current cards, in slot order.
    pub fn cards(&self) -> impl Iterator<Item = &CardDrawn> + '_ {
        self.slots.iter().filter_map(HandSlot::occupant)
    }

    pub fn position_of(&self, id: &CardId) -> Option<usize> {
        self.slots[..self.size]
            .iter()
            .position(|slot| slot.occupant().is_some_and(|card| &card.id == id))
    }

    pub fn contains(&self, id: &CardId) -> bool {
        self.position_of(id).is_some()
    }

    /// Places `card` in the first free slot.
    pub fn add_card(&mut self, card: CardDrawn) -> Result<usize, HandError> {
        if self.is_full() {
            return Err(HandError::Full {
                capacity: self.capacity(),
            });
        }

        let index = self.size;
        self.slots[index].occupant = Some(card);
        self.size += 1;
        Ok(index)
    }

    /// Removes the card at `index` and shifts every later card one slot to the left.
    pub fn remove_at(&mut self, index: usize) -> Result<CardDrawn, HandError> {
        if index >= self.size {
            return Err(HandError::IndexOutOfRange {
                index,
                size: self.size,
            });
        }

        let removed = self.slots[index]
            .occupant
            .take()
            .ok_or(HandError::IndexOutOfRange {
                index,
                size: self.size,
            })?;

        for i in index..self.size - 1 {
            self.slots[i].occupant = self.slots[i + 1].occupant.take();
        }
        self.size -= 1;

        Ok(removed)
    }

    pub fn remove_with_id(&mut self, id: &CardId) -> Result<CardDrawn, HandError> {
        let index = self
            .position_of(id)
            .ok_or(HandError::CardNotFound(*id))?;
        self.remove_at(index)
    }
}

impl Default for Hand {
    fn default() -> Self {
        Self::new(DEFAULT_HAND_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::card::CardDefinition;

    fn card(title: &str) -> CardDrawn {
        CardDrawn {
            id: CardId::new(),
            title: title.to_string(),
            current_attack: 1,
            current_cost: 1,
            current_health: 1,
            definition: CardDefinition {
                title: title.to_string(),
                cost: 1,
                attack: 1,
                health: 1,
            },
        }
    }

    fn assert_contiguous(hand: &Hand) {
        let occupied = hand.slots().iter().filter(|s| !s.is_empty()).count();
        assert_eq!(hand.size(), occupied, "size must match occupied slots");
        for (index, slot) in hand.slots().iter().enumerate() {
            assert_eq!(
                !slot.is_empty(),
                index < hand.size(),
                "slot {index} breaks the contiguous prefix"
            );
        }
    }

    fn titles(hand: &Hand) -> Vec<String> {
        hand.cards().map(|c| c.title.clone()).collect()
    }

    #[test]
    fn test_add_card_fills_next_slot() {
        let mut hand = Hand::new(10);
        assert_eq!(hand.add_card(card("a")).unwrap(), 0);
        assert_eq!(hand.add_card(card("b")).unwrap(), 1);
        assert_eq!(hand.size(), 2);
        assert_eq!(hand.get(1).unwrap().title, "b");
        assert_contiguous(&hand);
    }

    #[test]
    fn test_add_card_to_full_hand_is_rejected() {
        let mut hand = Hand::new(2);
        hand.add_card(card("a")).unwrap();
        hand.add_card(card("b")).unwrap();

        let error = hand.add_card(card("c")).unwrap_err();
        assert_eq!(error, HandError::Full { capacity: 2 });
        assert_eq!(titles(&hand), vec!["a", "b"]);
        assert_contiguous(&hand);
    }

    #[test]
    fn test_remove_at_compacts_left() {
        let mut hand = Hand::new(10);
        for title in ["a", "b", "c", "d"] {
            hand.add_card(card(title)).unwrap();
        }

        let removed = hand.remove_at(1).unwrap();
        assert_eq!(removed.title, "b");
        assert_eq!(titles(&hand), vec!["a", "c", "d"]);
        assert_eq!(hand.get(1).unwrap().title, "c");
        assert!(hand.get(3).is_none());
        assert_contiguous(&hand);
    }

    #[test]
    fn test_remove_last_and_first() {
        let mut hand = Hand::new(10);
        for title in ["a", "b", "c"] {
            hand.add_card(card(title)).unwrap();
        }

        hand.remove_at(2).unwrap();
        assert_eq!(titles(&hand), vec!["a", "b"]);
        hand.remove_at(0).unwrap();
        assert_eq!(titles(&hand), vec!["b"]);
        assert_contiguous(&hand);
    }

    #[test]
    fn test_remove_at_empty_slot_within_capacity_is_noop() {
        let mut hand = Hand::new(10);
        hand.add_card(card("a")).unwrap();

        let error = hand.remove_at(5).unwrap_err();
        assert_eq!(error, HandError::IndexOutOfRange { index: 5, size: 1 });
        assert_eq!(hand.size(), 1);
        assert_contiguous(&hand);
    }

    #[test]
    fn test_remove_with_id() {
        let mut hand = Hand::new(10);
        let target = card("b");
        let target_id = target.id;
        hand.add_card(card("a")).unwrap();
        hand.add_card(target).unwrap();
        hand.add_card(card("c")).unwrap();

        let removed = hand.remove_with_id(&target_id).unwrap();
        assert_eq!(removed.id, target_id);
        assert!(!hand.contains(&target_id));
        assert_eq!(titles(&hand), vec!["a", "c"]);
        assert_contiguous(&hand);
    }

    #[test]
    fn test_remove_with_unknown_id_is_noop() {
        let mut hand = Hand::new(10);
        hand.add_card(card("a")).unwrap();
        let missing = CardId::new();

        assert_eq!(
            hand.remove_with_id(&missing).unwrap_err(),
            HandError::CardNotFound(missing)
        );
        assert_eq!(hand.size(), 1);
    }

    #[test]
    fn test_cards_reflect_live_state() {
        let mut hand = Hand::new(10);
        hand.add_card(card("a")).unwrap();
        assert_eq!(hand.cards().count(), 1);
        hand.add_card(card("b")).unwrap();
        assert_eq!(hand.cards().count(), 2);
        // Restartable: a second pass sees the same cards.
        assert_eq!(hand.cards().count(), 2);
    }

    #[test]
    fn test_contiguity_holds_over_mixed_sequence() {
        let mut hand = Hand::new(5);
        let mut ids = Vec::new();

        // Deterministic mix of adds and removals, including rejected ones.
        let script: [(char, usize); 16] = [
            ('a', 0), ('a', 0), ('a', 0), ('r', 1), ('a', 0), ('a', 0), ('a', 0), ('a', 0),
            ('r', 0), ('i', 2), ('r', 9), ('r', 3), ('i', 0), ('a', 0), ('r', 0), ('i', 1),
        ];

        for (op, arg) in script {
            match op {
                'a' => {
                    let c = card("x");
                    let id = c.id;
                    if hand.add_card(c).is_ok() {
                        ids.push(id);
                    }
                }
                'r' => {
                    if hand.remove_at(arg).is_ok() {
                        ids.remove(arg);
                    }
                }
                _ => {
                    if let Some(id) = ids.get(arg).copied() {
                        hand.remove_with_id(&id).unwrap();
                        ids.remove(arg);
                    }
                }
            }

            assert_contiguous(&hand);
            let in_hand: Vec<CardId> = hand.cards().map(|c| c.id).collect();
            assert_eq!(in_hand, ids);
        }
    }
}
