use super::board::Side;
use super::game_context::GameContext;
use super::state_change::StateChange;
use crate::models::card::CardOnBoard;
use crate::models::client_requests::ClientRequest;
use crate::models::ids::{BoardPos, CardId};
use crate::models::user_command::UserCommand;
use crate::utils::errors::{ActionError, BoardError, GameLogicError, HandError, NetworkError};
use crate::{logger, utils::logger::Logger};

/// Serializes `request` and hands it to the transport.
fn send(ctx: &GameContext, request: &ClientRequest) -> Result<(), ActionError> {
    let json = request.to_json()?;
    logger!(INFO, "[SEND] {request}");
    logger!(DEBUG, "[SEND] {json}");
    ctx.transport()
        .send(json)
        .map_err(|_| NetworkError::ChannelClosed)?;
    Ok(())
}

/// Asks the server to summon the hand card `card_id` into the local slot `slot`.
///
/// The card is placed on the local board right away. It stays in the hand until the server
/// echoes the summon back, and can't be summoned a second time meanwhile.
pub fn summon_from_hand(
    ctx: &mut GameContext,
    card_id: CardId,
    slot: usize,
) -> Result<(), ActionError> {
    let card = ctx
        .hand()
        .position_of(&card_id)
        .and_then(|index| ctx.hand().get(index))
        .cloned()
        .ok_or(HandError::CardNotFound(card_id))?;

    if ctx.my_board().position_of(&card_id).is_some() {
        return Err(GameLogicError::AlreadySummoned(card_id).into());
    }
    if !ctx.my_board().slot(slot)?.is_empty() {
        return Err(BoardError::SlotOccupied(slot).into());
    }

    send(
        ctx,
        &ClientRequest::SummonFromHand {
            card_id,
            target_pos: BoardPos::SlotIndex(slot),
        },
    )?;
    logger!(DEBUG, "[ACTION] Placing `{}` on slot {slot}", &card.title);
    ctx.place_on_board(Side::Mine, slot, CardOnBoard::from(card))?;
    Ok(())
}

/// Asks the server for `attacker_id` (local side) to attack `target_id` (enemy side).
pub fn attack(
    ctx: &mut GameContext,
    attacker_id: CardId,
    target_id: CardId,
) -> Result<(), ActionError> {
    let attacker = ctx
        .my_board()
        .find(&attacker_id)
        .ok_or(BoardError::CardNotFound(attacker_id))?;
    if !attacker.can_attack {
        return Err(GameLogicError::CannotAttack(attacker_id).into());
    }
    let attacker_title = attacker.title.clone();

    let target_title = ctx
        .enemy_board()
        .find(&target_id)
        .map(|card| card.title.clone())
        .ok_or(BoardError::CardNotFound(target_id))?;

    send(
        ctx,
        &ClientRequest::Attack {
            attacker_card_id: attacker_id,
            target_card_id: target_id,
        },
    )?;
    logger!(DEBUG, "[ACTION] `{attacker_title}` attacks `{target_title}`");

    if let Some(slot) = ctx.my_board().position_of(&attacker_id) {
        if let Some(card) = ctx.board_mut(Side::Mine).occupant_mut(slot) {
            card.can_attack = false;
        }
        ctx.notify(StateChange::BoardChanged {
            side: Side::Mine,
            slot,
        });
    }

    Ok(())
}

/// Ends the local turn. Sent whether or not the client believes it is its turn; the server
/// decides.
pub fn end_turn(ctx: &mut GameContext) -> Result<(), ActionError> {
    send(ctx, &ClientRequest::EndTurn)?;
    ctx.end_my_turn();
    Ok(())
}

/// Picks up the hand card at `hand_index` for a summon.
pub fn begin_summon_drag(ctx: &mut GameContext, hand_index: usize) -> Result<(), ActionError> {
    let card = ctx
        .hand()
        .get(hand_index)
        .cloned()
        .ok_or(HandError::IndexOutOfRange {
            index: hand_index,
            size: ctx.hand().size(),
        })?;
    if ctx.my_board().position_of(&card.id).is_some() {
        return Err(GameLogicError::AlreadySummoned(card.id).into());
    }
    logger!(DEBUG, "[ACTION] Dragging `{}` from hand", &card.title);
    ctx.set_dragging_card(Some(card));
    Ok(())
}

/// Drops the dragged hand card on the local slot `slot`. The drag ends whatever the outcome.
pub fn drop_on_my_slot(ctx: &mut GameContext, slot: usize) -> Result<(), ActionError> {
    let card = ctx
        .take_dragging_card()
        .ok_or(GameLogicError::NotDragging)?;
    summon_from_hand(ctx, card.id, slot)
}

/// Picks up the local board card at `my_slot` for an attack.
pub fn begin_attack_drag(ctx: &mut GameContext, my_slot: usize) -> Result<(), ActionError> {
    let card = ctx
        .my_board()
        .slot(my_slot)?
        .occupant()
        .cloned()
        .ok_or(BoardError::SlotEmpty(my_slot))?;
    if !card.can_attack {
        return Err(GameLogicError::CannotAttack(card.id).into());
    }
    logger!(DEBUG, "[ACTION] Dragging `{}` to attack", &card.title);
    ctx.set_dragging_card_to_attack(Some(card));
    Ok(())
}

/// Drops the dragged attacker on the enemy slot `slot`. The drag ends whatever the outcome.
pub fn drop_on_enemy_slot(ctx: &mut GameContext, slot: usize) -> Result<(), ActionError> {
    let attacker = ctx
        .take_dragging_card_to_attack()
        .ok_or(GameLogicError::NotDragging)?;
    let target_id = ctx
        .enemy_board()
        .slot(slot)?
        .occupant()
        .map(|card| card.id)
        .ok_or(BoardError::SlotEmpty(slot))?;
    attack(ctx, attacker.id, target_id)
}

pub fn cancel_drag(ctx: &mut GameContext) {
    ctx.take_dragging_card();
    ctx.take_dragging_card_to_attack();
}

/// Runs one console command as the matching drag and drop.
pub fn execute(ctx: &mut GameContext, command: UserCommand) -> Result<(), ActionError> {
    match command {
        UserCommand::Summon { hand_index, slot } => {
            begin_summon_drag(ctx, hand_index)?;
            drop_on_my_slot(ctx, slot)
        }
        UserCommand::Attack {
            my_slot,
            enemy_slot,
        } => {
            begin_attack_drag(ctx, my_slot)?;
            drop_on_enemy_slot(ctx, enemy_slot)
        }
        UserCommand::EndTurn => end_turn(ctx),
        UserCommand::State => {
            logger!(INFO, "[GAME] Current state\n{ctx}");
            Ok(())
        }
    }
}
