//! UDP sender to every configured OSC client

use metrics::counter;
use rosc::OscMessage;
use std::net::SocketAddr;
use tokio::net::{lookup_host, UdpSocket};
use tracing::{info, trace, warn};

use crate::codec::encode_bundle;
use crate::error::OscError;

/// Sends every message to every client from one local socket.
///
/// Delivery is fire-and-forget. A client that cannot be reached is logged
/// and skipped.
pub struct OscSender {
    socket: UdpSocket,
    clients: Vec<SocketAddr>,
}

impl OscSender {
    /// Resolve `host:port` client addresses and bind an ephemeral socket
    pub async fn connect<S: AsRef<str>>(clients: &[S]) -> Result<Self, OscError> {
        let mut resolved = Vec::with_capacity(clients.len());
        for client in clients {
            let client = client.as_ref();
            let addr = lookup_host(client)
                .await?
                .next()
                .ok_or_else(|| OscError::BadAddress(client.to_string()))?;
            resolved.push(addr);
        }

        let socket = UdpSocket::bind("0.0.0.0:0").await?;
        info!(
            local = %socket.local_addr()?,
            clients = ?resolved,
            "OSC sender ready"
        );

        Ok(Self {
            socket,
            clients: resolved,
        })
    }

    pub fn clients(&self) -> &[SocketAddr] {
        &self.clients
    }

    pub fn local_addr(&self) -> Result<SocketAddr, OscError> {
        Ok(self.socket.local_addr()?)
    }

    /// Send one message, returning how many clients it reached
    pub async fn send(&self, message: &OscMessage) -> Result<usize, OscError> {
        let bytes = encode_bundle(message)?;
        let mut delivered = 0;

        for client in &self.clients {
            match self.socket.send_to(&bytes, client).await {
                Ok(_) => {
                    delivered += 1;
                    counter!("osc_messages_sent_total").increment(1);
                }
                Err(e) => {
                    counter!("osc_send_errors_total").increment(1);
                    warn!(%client, addr = %message.addr, error = %e, "OSC send failed");
                }
            }
        }

        trace!(addr = %message.addr, args = message.args.len(), delivered, "OSC message sent");
        Ok(delivered)
    }

    /// Send messages in order
    pub async fn send_all<'a, I>(&self, messages: I) -> Result<usize, OscError>
    where
        I: IntoIterator<Item = &'a OscMessage>,
    {
        let mut sent = 0;
        for message in messages {
            sent += self.send(message).await?;
        }
        Ok(sent)
    }
}
