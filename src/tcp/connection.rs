use std::net::SocketAddr;

use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
    net::{
        tcp::{OwnedReadHalf, OwnedWriteHalf},
        TcpStream,
    },
    sync::mpsc::UnboundedReceiver,
};

use crate::game::{actions, dispatcher::EventDispatcher, game_context::GameContext};
use crate::models::user_command::UserCommand;
use crate::utils::errors::NetworkError;
use crate::{logger, utils::logger::Logger};

/// A connection to the game server.
///
/// Messages travel as one JSON document per line in both directions.
pub struct Connection {
    addr: SocketAddr,
    read_stream: OwnedReadHalf,
    write_stream: OwnedWriteHalf,
}

impl Connection {
    pub async fn connect(addr: &str) -> Result<Self, NetworkError> {
        let stream = TcpStream::connect(addr).await.map_err(|e| {
            logger!(ERROR, "[CONNECTION] Unable to connect to `{addr}` ({e})");
            NetworkError::ConnectionFailed(addr.to_string())
        })?;
        let peer = stream
            .peer_addr()
            .map_err(|_| NetworkError::ConnectionFailed(addr.to_string()))?;
        logger!(INFO, "[CONNECTION] Connected to `{peer}`");

        let (read_stream, write_stream) = stream.into_split();
        Ok(Self {
            addr: peer,
            read_stream,
            write_stream,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Runs the session until the server closes the connection.
    ///
    /// - `outbound` is the receiving end of the context's transport. A writer task drains it
    ///   onto the socket.
    /// - Server lines go to `dispatcher`, console commands to the outbound actions. Both touch
    ///   `ctx` from this task only, one at a time.
    pub async fn run(
        self,
        ctx: &mut GameContext,
        dispatcher: &EventDispatcher,
        outbound: UnboundedReceiver<String>,
        mut commands: UnboundedReceiver<UserCommand>,
    ) -> Result<(), NetworkError> {
        let addr = self.addr;
        tokio::spawn(Self::write_outbound(self.write_stream, outbound, addr));

        let mut lines = BufReader::new(self.read_stream).lines();
        let mut commands_open = true;

        loop {
            tokio::select! {
                line = lines.next_line() => match line {
                    Ok(Some(line)) => {
                        if !line.trim().is_empty() {
                            dispatcher.handle_message(ctx, line.trim());
                        }
                    }
                    Ok(None) => {
                        logger!(INFO, "[CONNECTION] `{addr}` closed the connection");
                        return Ok(());
                    }
                    Err(e) => {
                        logger!(ERROR, "[CONNECTION] Failed to read from `{addr}` ({e})");
                        return Err(NetworkError::ReadError(e.to_string()));
                    }
                },
                command = commands.recv(), if commands_open => match command {
                    Some(command) => {
                        if let Err(e) = actions::execute(ctx, command) {
                            logger!(WARN, "[ACTION] {e}");
                        }
                    }
                    None => commands_open = false,
                },
            }
        }
    }

    async fn write_outbound(
        mut write_stream: OwnedWriteHalf,
        mut outbound: UnboundedReceiver<String>,
        addr: SocketAddr,
    ) {
        while let Some(message) = outbound.recv().await {
            let line = format!("{message}\n");
            if let Err(e) = write_stream.write_all(line.as_bytes()).await {
                logger!(ERROR, "[CONNECTION] Failed to write to `{addr}` ({e})");
                break;
            }
        }
        logger!(DEBUG, "[CONNECTION] Writer for `{addr}` stopped");
    }
}
