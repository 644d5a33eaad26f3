//! OSC Messaging Boundary
//!
//! Publishes attention events to OSC clients over UDP and accepts control
//! messages from OSC peers. Transport is best effort.

mod codec;
mod error;
mod mapping;
mod receiver;
mod sender;

pub use codec::{arg_as_f32, decode, encode_bundle, float_message, type_tag, IMMEDIATE};
pub use error::OscError;
pub use mapping::{address, connection_test, event_message, gaze_message};
pub use receiver::{ControlCommand, OscReceiver};
pub use sender::OscSender;

pub use rosc::{OscMessage, OscType};
