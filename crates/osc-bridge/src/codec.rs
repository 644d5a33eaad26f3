//! OSC 1.0 packet encoding and decoding
//!
//! Outgoing messages travel one per datagram, each wrapped in a bundle with
//! the immediate time tag. Incoming datagrams may hold a bare message or a
//! (nested) bundle; both are flattened to a message list.

use rosc::{decoder, encoder, OscBundle, OscMessage, OscPacket, OscTime, OscType};

use crate::error::OscError;

/// Time tag meaning "process immediately"
pub const IMMEDIATE: OscTime = OscTime {
    seconds: 0,
    fractional: 1,
};

/// Message with every argument sent as a 32-bit float
pub fn float_message(addr: &str, values: impl IntoIterator<Item = f32>) -> OscMessage {
    OscMessage {
        addr: addr.to_string(),
        args: values.into_iter().map(OscType::Float).collect(),
    }
}

/// Encode one message as an immediate bundle
pub fn encode_bundle(message: &OscMessage) -> Result<Vec<u8>, OscError> {
    let packet = OscPacket::Bundle(OscBundle {
        timetag: IMMEDIATE,
        content: vec![OscPacket::Message(message.clone())],
    });
    Ok(encoder::encode(&packet)?)
}

/// Decode one datagram into its messages, in packet order
pub fn decode(datagram: &[u8]) -> Result<Vec<OscMessage>, OscError> {
    let (_, packet) = decoder::decode_udp(datagram)?;
    let mut messages = Vec::new();
    flatten(packet, &mut messages);
    Ok(messages)
}

fn flatten(packet: OscPacket, out: &mut Vec<OscMessage>) {
    match packet {
        OscPacket::Message(message) => out.push(message),
        OscPacket::Bundle(bundle) => {
            for inner in bundle.content {
                flatten(inner, out);
            }
        }
    }
}

/// Numeric argument as f32. Strings and other non-numeric types are
/// rejected with their type tag.
pub fn arg_as_f32(arg: &OscType) -> Result<f32, OscError> {
    match arg {
        OscType::Float(v) => Ok(*v),
        OscType::Int(v) => Ok(*v as f32),
        OscType::Double(v) => Ok(*v as f32),
        OscType::Long(v) => Ok(*v as f32),
        other => Err(OscError::UnsupportedType(type_tag(other))),
    }
}

/// OSC type tag character of an argument
pub fn type_tag(arg: &OscType) -> char {
    match arg {
        OscType::Int(_) => 'i',
        OscType::Float(_) => 'f',
        OscType::String(_) => 's',
        OscType::Blob(_) => 'b',
        OscType::Time(_) => 't',
        OscType::Long(_) => 'h',
        OscType::Double(_) => 'd',
        OscType::Char(_) => 'c',
        OscType::Color(_) => 'r',
        OscType::Midi(_) => 'm',
        OscType::Bool(true) => 'T',
        OscType::Bool(false) => 'F',
        OscType::Nil => 'N',
        OscType::Inf => 'I',
        _ => '?',
    }
}
