//! i3bar protocol header.

use serde::Serialize;

/// The only protocol version this crate speaks
pub const PROTOCOL_VERSION: u32 = 1;

/// First line of the output stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProtocolHeader {
    pub version: u32,
    /// Signal the bar sends to pause output (0 = bar default)
    #[serde(skip_serializing_if = "is_zero")]
    pub stop_signal: i32,
    /// Signal the bar sends to resume output (0 = bar default)
    #[serde(skip_serializing_if = "is_zero")]
    pub cont_signal: i32,
    #[serde(skip_serializing_if = "is_false")]
    pub click_events: bool,
}

fn is_zero(value: &i32) -> bool {
    *value == 0
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl ProtocolHeader {
    pub fn new(stop_signal: i32, cont_signal: i32, click_events: bool) -> Self {
        Self {
            version: PROTOCOL_VERSION,
            stop_signal,
            cont_signal,
            click_events,
        }
    }
}

impl Default for ProtocolHeader {
    fn default() -> Self {
        Self::new(0, 0, false)
    }
}
