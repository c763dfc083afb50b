// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! TCP connection management for the board.

use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};

use crate::error::ProtocolError;

/// Owns the socket's send path and the board endpoint.
///
/// The read half of each established connection is handed to the reader
/// loop; the write half stays here so every command, whether from the
/// caller or the poller, goes through one owner. Any send failure drops
/// the write half, which the reader observes as a disconnect.
#[derive(Debug)]
pub(crate) struct Connection {
    host: String,
    port: u16,
    writer: Option<OwnedWriteHalf>,
}

impl Connection {
    pub(crate) fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            writer: None,
        }
    }

    /// Returns `host:port` for log context.
    pub(crate) fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Opens a fresh connection, discarding any previous socket first,
    /// and returns the read half for the reader loop.
    pub(crate) async fn connect(&mut self) -> Result<OwnedReadHalf, ProtocolError> {
        self.writer = None;
        let stream = TcpStream::connect((self.host.as_str(), self.port)).await?;
        let (read_half, write_half) = stream.into_split();
        self.writer = Some(write_half);
        tracing::debug!(endpoint = %self.endpoint(), "connected to board");
        Ok(read_half)
    }

    pub(crate) fn is_connected(&self) -> bool {
        self.writer.is_some()
    }

    /// Drops the write half, marking the connection as down.
    pub(crate) fn disconnect(&mut self) {
        self.writer = None;
    }

    /// Writes a command with its carriage-return terminator.
    ///
    /// On any write failure the connection is marked disconnected; the
    /// error stays inside the reader loop and never reaches a caller.
    pub(crate) async fn send(&mut self, command: &str) -> Result<(), ProtocolError> {
        let Some(writer) = self.writer.as_mut() else {
            return Err(ProtocolError::NotConnected);
        };
        let mut wire = Vec::with_capacity(command.len() + 1);
        wire.extend_from_slice(command.as_bytes());
        wire.push(b'\r');
        if let Err(err) = writer.write_all(&wire).await {
            self.writer = None;
            return Err(ProtocolError::Io(err));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tokio::io::AsyncReadExt;
    use tokio::net::TcpListener;

    #[test]
    fn starts_disconnected() {
        let connection = Connection::new("127.0.0.1", 1234);
        assert!(!connection.is_connected());
        assert_eq!(connection.endpoint(), "127.0.0.1:1234");
    }

    #[tokio::test]
    async fn send_without_connection_fails() {
        let mut connection = Connection::new("127.0.0.1", 1234);
        assert!(matches!(
            connection.send("state=?").await,
            Err(ProtocolError::NotConnected)
        ));
    }

    #[tokio::test]
    async fn send_appends_carriage_return() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let mut connection = Connection::new(addr.ip().to_string(), addr.port());
        let _read_half = connection.connect().await.unwrap();
        assert!(connection.is_connected());

        let (mut socket, _) = listener.accept().await.unwrap();
        connection.send("state=?").await.unwrap();

        let mut received = [0_u8; 8];
        socket.read_exact(&mut received).await.unwrap();
        assert_eq!(&received, b"state=?\r");
    }

    #[tokio::test]
    async fn connect_failure_leaves_disconnected() {
        // Bind then drop to get a port nothing is listening on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let mut connection = Connection::new(addr.ip().to_string(), addr.port());
        assert!(connection.connect().await.is_err());
        assert!(!connection.is_connected());
    }
}
