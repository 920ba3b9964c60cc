use std::process::ExitCode;

use ccg_client::game::dispatcher::EventDispatcher;
use ccg_client::game::game_context::GameContext;
use ccg_client::models::settings::Settings;
use ccg_client::models::user_command::UserCommand;
use ccg_client::tcp::connection::Connection;
use ccg_client::utils::errors::NetworkError;
use ccg_client::{init_settings, logger, utils::logger::Logger};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::{self, UnboundedSender};

#[tokio::main]
async fn main() -> ExitCode {
    let settings = match Settings::load().and_then(init_settings) {
        Ok(settings) => settings,
        Err(e) => {
            logger!(ERROR, "[CLIENT] {e}");
            return ExitCode::FAILURE;
        }
    };
    Logger::set_level(settings.log_level);

    match run(settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            logger!(ERROR, "[CLIENT] {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(settings: &Settings) -> Result<(), NetworkError> {
    let (transport, outbound) = mpsc::unbounded_channel();
    let mut ctx = GameContext::from_settings(transport, settings);
    let dispatcher = EventDispatcher::new();

    let (commands_tx, commands) = mpsc::unbounded_channel();
    tokio::spawn(read_console(commands_tx));

    let connection = Connection::connect(&settings.server_address).await?;
    connection.run(&mut ctx, &dispatcher, outbound, commands).await
}

/// Forwards console lines as commands until stdin closes.
async fn read_console(commands: UnboundedSender<UserCommand>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<UserCommand>() {
            Ok(command) => {
                if commands.send(command).is_err() {
                    break;
                }
            }
            Err(e) => logger!(WARN, "[CLIENT] {e}"),
        }
    }
}
