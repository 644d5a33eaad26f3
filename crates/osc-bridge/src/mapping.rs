//! Attention events to OSC messages

use attention::{AttentionEvent, GazeSample};
use rosc::OscMessage;

use crate::codec::float_message;

/// OSC addresses
pub mod address {
    /// `[person, screen, interest]`
    pub const USER_ATTENTION: &str = "/context/user/attention";
    /// `[person, previous screen, screen]`
    pub const USER_SCREEN: &str = "/context/user/screen";
    /// `[person, screen, x, y]`, meters in the gaze frame
    pub const USER_COORDINATES: &str = "/context/user/coordinates";
    /// `[1]` on start, `[0]` on end
    pub const JOINT_ATTENTION: &str = "/context/jointattention";
    /// `[count]`
    pub const NB_USERS: &str = "/context/nbusers";
    /// `[person...]`
    pub const FACE_TRACKED_USERS: &str = "/context/facetrackedusers";
    /// Sent once to every client at startup
    pub const CONNECTION_TEST: &str = "/connectiontest";
    /// Incoming: content changed, restart watch timers
    pub const PLAYER_NEXT: &str = "/player/next";
}

/// OSC message for an attention event
pub fn event_message(event: &AttentionEvent) -> OscMessage {
    match event {
        AttentionEvent::InterestChanged {
            person,
            screen,
            interest,
        } => float_message(
            address::USER_ATTENTION,
            [person.0 as f32, screen.0 as f32, interest.level() as f32],
        ),
        AttentionEvent::ScreenWatchedChanged {
            person,
            previous,
            screen,
        } => float_message(
            address::USER_SCREEN,
            [person.0 as f32, previous.0 as f32, screen.0 as f32],
        ),
        AttentionEvent::JointAttentionStart { .. } => {
            float_message(address::JOINT_ATTENTION, [1.0])
        }
        AttentionEvent::JointAttentionEnd => float_message(address::JOINT_ATTENTION, [0.0]),
        AttentionEvent::VisibleCountChanged { count } => {
            float_message(address::NB_USERS, [*count as f32])
        }
        AttentionEvent::FaceTrackedChanged { persons } => float_message(
            address::FACE_TRACKED_USERS,
            persons.iter().map(|p| p.0 as f32),
        ),
    }
}

/// Coordinates message for a gaze sample that hit a screen
pub fn gaze_message(sample: &GazeSample) -> Option<OscMessage> {
    let hit = sample.hit?;
    Some(float_message(
        address::USER_COORDINATES,
        [
            sample.person.0 as f32,
            hit.screen_id.0 as f32,
            hit.point.x as f32,
            hit.point.y as f32,
        ],
    ))
}

pub fn connection_test() -> OscMessage {
    float_message(address::CONNECTION_TEST, std::iter::empty())
}
