use super::board::Side;
use super::game_context::{GameContext, Perspective};
use super::state_change::StateChange;
use crate::models::card::CardOnBoard;
use crate::models::server_messages::{
    CardDrawnClientEvent, CreatureAttacksTargetEvent, CreatureDestroyedEvent,
    CreatureTakesDamageEvent, HiddenInfo, PlayerEndTurnEvent, PlayerStartTurnEvent,
    PlayerSummonsCreatureClientEvent,
};
use crate::models::settings::DamagePolicy;
use crate::utils::errors::{BoardError, GameLogicError};
use crate::{logger, utils::logger::Logger};

/// A local draw goes to the hand. The opponent's draws are hidden from us.
pub fn handle_card_drawn(
    ctx: &mut GameContext,
    event: CardDrawnClientEvent,
) -> Result<(), GameLogicError> {
    match ctx.perspective(&event.player_id)? {
        Perspective::Local => match event.card_drawn {
            HiddenInfo::Visible(card) => {
                logger!(INFO, "[GAME] I drew a card: `{}`", &card.title);
                ctx.hand_mut().add_card(card)?;
                ctx.notify(StateChange::HandChanged);
            }
            HiddenInfo::Hidden => {
                logger!(WARN, "[GAME] I drew a card but the server hid it");
            }
        },
        Perspective::Remote => {
            logger!(INFO, "[GAME] Enemy drew a card.");
        }
    }

    Ok(())
}

/// Starts the local turn: mana is reset, board cards may attack again and the hand is
/// re-evaluated for playable cards.
pub fn handle_player_start_turn(
    ctx: &mut GameContext,
    event: PlayerStartTurnEvent,
) -> Result<(), GameLogicError> {
    match ctx.perspective(&event.player_id)? {
        Perspective::Local => {
            logger!(INFO, "[GAME] My turn started. Mana: {}", event.starting_mana);
            ctx.start_my_turn(event.starting_mana);

            let refreshed = ctx.board_mut(Side::Mine).ready_all();
            for slot in refreshed {
                ctx.notify(StateChange::BoardChanged {
                    side: Side::Mine,
                    slot,
                });
            }

            let playable: Vec<&str> = ctx.playable_cards().map(|c| c.title.as_str()).collect();
            logger!(DEBUG, "[GAME] Playable cards: {:?}", playable);
        }
        Perspective::Remote => {
            logger!(INFO, "[GAME] Enemy turn started. Mana: {}", event.starting_mana);
        }
    }

    Ok(())
}

/// Confirms the end of the local turn. The flag was usually cleared already when the request
/// was sent.
pub fn handle_player_end_turn(
    ctx: &mut GameContext,
    event: PlayerEndTurnEvent,
) -> Result<(), GameLogicError> {
    match ctx.perspective(&event.player_id)? {
        Perspective::Local => {
            logger!(INFO, "[GAME] My turn ended.");
            if ctx.is_my_turn() {
                ctx.end_my_turn();
            }
        }
        Perspective::Remote => {
            logger!(INFO, "[GAME] Enemy turn ended.");
        }
    }

    Ok(())
}

/// The opponent's summons appear on the enemy side. Our own summons were already placed when
/// the card was dropped, so the echo only takes the card out of the hand.
///
/// An echo for a card that is neither in the hand nor on the board (summoned without a local
/// drop) is placed from the event, since the server's placement is authoritative.
pub fn handle_player_summons_creature(
    ctx: &mut GameContext,
    event: PlayerSummonsCreatureClientEvent,
) -> Result<(), GameLogicError> {
    let slot = event.target_pos.slot_index();

    match ctx.perspective(&event.player_id)? {
        Perspective::Remote => {
            logger!(INFO, "[GAME] Enemy summoned: `{}`", &event.definition.title);
            let card = CardOnBoard::from_definition(event.card_id, event.definition);
            ctx.place_on_board(Side::Enemy, slot, card)?;
        }
        Perspective::Local => {
            logger!(INFO, "[GAME] I summoned: `{}`", &event.definition.title);
            let already_placed = ctx.my_board().position_of(&event.card_id).is_some();
            if !already_placed && !ctx.my_board().slot(slot)?.is_empty() {
                return Err(BoardError::SlotOccupied(slot).into());
            }
            let card = match ctx.hand_mut().remove_with_id(&event.card_id) {
                Ok(card) => {
                    ctx.notify(StateChange::HandChanged);
                    CardOnBoard::from(card)
                }
                Err(error) => {
                    logger!(WARN, "[GAME] Summon echo without a hand card ({error})");
                    CardOnBoard::from_definition(event.card_id, event.definition)
                }
            };
            if !already_placed {
                ctx.place_on_board(Side::Mine, slot, card)?;
            }
        }
    }

    Ok(())
}

/// Marks the attacker as spent for this turn, on whichever side it stands.
pub fn handle_creature_attacks_target(
    ctx: &mut GameContext,
    event: CreatureAttacksTargetEvent,
) -> Result<(), GameLogicError> {
    let target_title = ctx
        .find_board_card(&event.target)
        .and_then(|(side, index)| ctx.board(side).occupant(index))
        .map(|card| card.title.clone())
        .unwrap_or_else(|| event.target.to_string());

    let (side, slot, attacker) = ctx
        .board_card_mut(&event.attacker)
        .ok_or(BoardError::CardNotFound(event.attacker))?;
    logger!(INFO, "[GAME] `{}` attacks `{}`", &attacker.title, target_title);

    if attacker.can_attack {
        attacker.can_attack = false;
        ctx.notify(StateChange::BoardChanged { side, slot });
    }

    Ok(())
}

pub fn handle_creature_takes_damage(
    ctx: &mut GameContext,
    event: CreatureTakesDamageEvent,
) -> Result<(), GameLogicError> {
    let amount = match ctx.damage_policy() {
        DamagePolicy::FixedDecrement => 1,
        DamagePolicy::CarriedAmount => event.damage,
    };

    let (side, slot, card) = ctx
        .board_card_mut(&event.card_to_damage)
        .ok_or(BoardError::CardNotFound(event.card_to_damage))?;

    card.current_health = (card.current_health - amount).max(0);
    logger!(
        INFO,
        "[GAME] `{}` takes {} damage, health is now {}",
        &card.title,
        amount,
        card.current_health
    );
    ctx.notify(StateChange::BoardChanged { side, slot });

    Ok(())
}

pub fn handle_creature_destroyed(
    ctx: &mut GameContext,
    event: CreatureDestroyedEvent,
) -> Result<(), GameLogicError> {
    let (side, slot, card) = ctx.remove_board_card(&event.creature_destroyed)?;
    logger!(
        INFO,
        "[GAME] `{}` was destroyed ({:?} slot {})",
        &card.title,
        side,
        slot
    );
    Ok(())
}
