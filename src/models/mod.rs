pub mod card;
pub mod client_requests;
pub mod ids;
pub mod server_messages;
pub mod settings;
pub mod user_command;
