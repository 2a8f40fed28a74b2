//! Message types for the gateway link
//!
//! Message types are divided into two categories:
//! - Gateway → Panel: state pushes, heartbeat responses
//! - Panel → Gateway: commands, heartbeat requests
//!
//! State and command payloads are record-encoded messages (see
//! [`crate::record`]); this layer only routes them, it never decodes them.

use crate::frame::{Frame, FrameError};

// Message type IDs: Panel → Gateway
pub const MSG_COMMAND: u8 = 0x01;
pub const MSG_PING: u8 = 0x02;

// Message type IDs: Gateway → Panel
pub const MSG_STATE: u8 = 0x10;
pub const MSG_PONG: u8 = 0x11;

/// Errors that can occur when interpreting a frame as a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MessageError {
    /// Frame type byte is not a known message
    UnknownType,
    /// Heartbeat frame carried a payload it should not have
    UnexpectedPayload,
}

/// Messages from the gateway to the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GatewayMessage<'a> {
    /// Record-encoded state snapshot or delta
    State(&'a [u8]),
    /// Heartbeat response
    Pong,
}

impl<'a> GatewayMessage<'a> {
    /// Parse a message from a frame, borrowing its payload
    pub fn from_frame(frame: &'a Frame) -> Result<Self, MessageError> {
        match frame.msg_type {
            MSG_STATE => Ok(GatewayMessage::State(&frame.payload)),
            MSG_PONG => {
                if !frame.payload.is_empty() {
                    return Err(MessageError::UnexpectedPayload);
                }
                Ok(GatewayMessage::Pong)
            }
            _ => Err(MessageError::UnknownType),
        }
    }

    /// Encode this message into a frame (for testing or simulation)
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            GatewayMessage::State(records) => Frame::new(MSG_STATE, records),
            GatewayMessage::Pong => Ok(Frame::empty(MSG_PONG)),
        }
    }
}

/// Messages from the panel to the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelMessage<'a> {
    /// Record-encoded command (e.g. a refresh request)
    Command(&'a [u8]),
    /// Heartbeat request
    Ping,
}

impl<'a> PanelMessage<'a> {
    /// Encode this message into a frame
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            PanelMessage::Command(records) => Frame::new(MSG_COMMAND, records),
            PanelMessage::Ping => Ok(Frame::empty(MSG_PING)),
        }
    }

    /// Parse a message from a frame (the gateway side of the link)
    pub fn from_frame(frame: &'a Frame) -> Result<Self, MessageError> {
        match frame.msg_type {
            MSG_COMMAND => Ok(PanelMessage::Command(&frame.payload)),
            MSG_PING => {
                if !frame.payload.is_empty() {
                    return Err(MessageError::UnexpectedPayload);
                }
                Ok(PanelMessage::Ping)
            }
            _ => Err(MessageError::UnknownType),
        }
    }
}
