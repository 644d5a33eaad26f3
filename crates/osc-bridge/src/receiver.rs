//! Non-blocking OSC control input

use metrics::counter;
use rosc::OscMessage;
use std::io::ErrorKind;
use std::net::SocketAddr;
use tokio::net::UdpSocket;
use tracing::{debug, info, warn};

use crate::codec::decode;
use crate::mapping::address;

const MAX_DATAGRAM: usize = 8192;

/// Commands accepted from OSC peers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCommand {
    /// Content changed upstream: restart every visible person's watch timer
    ResetTimers,
}

impl ControlCommand {
    pub fn from_message(message: &OscMessage) -> Option<Self> {
        match message.addr.as_str() {
            address::PLAYER_NEXT => Some(ControlCommand::ResetTimers),
            _ => None,
        }
    }
}

/// Listens on a set of UDP ports, drained once per frame
pub struct OscReceiver {
    sockets: Vec<UdpSocket>,
    buf: Vec<u8>,
}

impl OscReceiver {
    /// Bind every port on all interfaces. A port that cannot be bound is
    /// logged and left out.
    pub async fn bind(ports: &[u16]) -> Self {
        let mut sockets = Vec::with_capacity(ports.len());
        for &port in ports {
            match UdpSocket::bind(("0.0.0.0", port)).await {
                Ok(socket) => {
                    info!(port, "Listening for OSC");
                    sockets.push(socket);
                }
                Err(e) => warn!(port, error = %e, "Cannot open OSC port"),
            }
        }
        Self::from_sockets(sockets)
    }

    pub fn from_sockets(sockets: Vec<UdpSocket>) -> Self {
        Self {
            sockets,
            buf: vec![0; MAX_DATAGRAM],
        }
    }

    pub fn local_addrs(&self) -> Vec<SocketAddr> {
        self.sockets
            .iter()
            .filter_map(|s| s.local_addr().ok())
            .collect()
    }

    /// Every message already queued on every socket. Never waits.
    pub fn drain(&mut self) -> Vec<OscMessage> {
        let mut messages = Vec::new();

        for socket in &self.sockets {
            loop {
                match socket.try_recv_from(&mut self.buf) {
                    Ok((n, origin)) => match decode(&self.buf[..n]) {
                        Ok(decoded) => {
                            debug!(%origin, count = decoded.len(), "OSC packet received");
                            messages.extend(decoded);
                        }
                        Err(e) => {
                            counter!("osc_malformed_packets_total").increment(1);
                            warn!(%origin, error = %e, "Dropping OSC packet");
                        }
                    },
                    Err(e) if e.kind() == ErrorKind::WouldBlock => break,
                    Err(e) => {
                        warn!(error = %e, "OSC receive failed");
                        break;
                    }
                }
            }
        }

        messages
    }

    /// Drain and keep only recognized control commands
    pub fn poll_commands(&mut self) -> Vec<ControlCommand> {
        self.drain()
            .iter()
            .filter_map(ControlCommand::from_message)
            .collect()
    }
}
