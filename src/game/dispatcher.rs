use super::game_context::GameContext;
use super::handlers;
use crate::models::server_messages::{EventEnvelope, FromServer, GameEvent};
use crate::utils::errors::{DispatchError, ProtocolError};
use crate::{logger, utils::logger::Logger};

/// Routes messages received from the server to the handler of their event kind.
pub struct EventDispatcher;

impl EventDispatcher {
    pub fn new() -> Self {
        EventDispatcher
    }

    /// Handles one raw message from the transport.
    ///
    /// The message is logged verbatim first. Decoding failures and rejected state transitions
    /// are logged and leave the context as it was.
    pub fn handle_message(&self, ctx: &mut GameContext, raw: &str) {
        logger!(INFO, "[RECV] {raw}");

        let result = FromServer::parse(raw)
            .map_err(DispatchError::from)
            .and_then(|message| self.dispatch(ctx, message));

        if let Err(error) = result {
            logger!(WARN, "[DISPATCH] Message dropped ({error})");
        }
    }

    pub fn dispatch(&self, ctx: &mut GameContext, message: FromServer) -> Result<(), DispatchError> {
        match message {
            FromServer::Hello(ids) => self.handle_hello(ctx, ids.as_slice()),
            FromServer::Event(envelope) => self.dispatch_envelope(ctx, &envelope),
        }
    }

    fn handle_hello(
        &self,
        ctx: &mut GameContext,
        ids: &[crate::models::ids::PlayerId],
    ) -> Result<(), DispatchError> {
        match ids {
            [my_id, enemy_id] => {
                logger!(INFO, "[DISPATCH] I am `{my_id}`, my opponent is `{enemy_id}`");
                ctx.set_identities(*my_id, *enemy_id);
                Ok(())
            }
            _ => Err(ProtocolError::InvalidHello(ids.len()).into()),
        }
    }

    fn dispatch_envelope(
        &self,
        ctx: &mut GameContext,
        envelope: &EventEnvelope,
    ) -> Result<(), DispatchError> {
        match GameEvent::decode(envelope)? {
            Some(event) => Ok(self.dispatch_event(ctx, event)?),
            None => {
                logger!(DEBUG, "[DISPATCH] Ignoring unknown event kind `{}`", &envelope.kind);
                Ok(())
            }
        }
    }

    pub fn dispatch_event(
        &self,
        ctx: &mut GameContext,
        event: GameEvent,
    ) -> Result<(), crate::utils::errors::GameLogicError> {
        logger!(DEBUG, "[DISPATCH] Handling `{}`", event.kind());
        match event {
            GameEvent::CardDrawn(e) => handlers::handle_card_drawn(ctx, e),
            GameEvent::PlayerStartTurn(e) => handlers::handle_player_start_turn(ctx, e),
            GameEvent::PlayerEndTurn(e) => handlers::handle_player_end_turn(ctx, e),
            GameEvent::PlayerSummonsCreature(e) => handlers::handle_player_summons_creature(ctx, e),
            GameEvent::CreatureAttacksTarget(e) => handlers::handle_creature_attacks_target(ctx, e),
            GameEvent::CreatureTakesDamage(e) => handlers::handle_creature_takes_damage(ctx, e),
            GameEvent::CreatureDestroyed(e) => handlers::handle_creature_destroyed(ctx, e),
        }
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
