pub mod actions;
pub mod board;
pub mod dispatcher;
pub mod game_context;
pub mod hand;
pub mod handlers;
pub mod state_change;
