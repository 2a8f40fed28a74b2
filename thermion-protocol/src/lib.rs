//! Thermion Gateway Link Protocol
//!
//! This crate defines the UART-based protocol between a Thermion wall panel
//! and the thermostat gateway. The protocol is designed for simplicity,
//! low latency, and robustness on a two-wire link.
//!
//! # Protocol Overview
//!
//! All messages use a simple binary frame format:
//! ```text
//! ┌───────┬────────┬──────┬─────────────┬──────────┐
//! │ START │ LENGTH │ TYPE │ PAYLOAD     │ CHECKSUM │
//! │ 1B    │ 1B     │ 1B   │ 0–64B       │ 1B       │
//! └───────┴────────┴──────┴─────────────┴──────────┘
//! ```
//!
//! State and command payloads are themselves sequences of typed records:
//! ```text
//! ┌─────────┬───────┬────────┬───────────────┐
//! │ KEY     │ TAG   │ LENGTH │ PAYLOAD       │
//! │ u16 LE  │ 1B    │ 1B     │ LENGTH bytes  │
//! └─────────┴───────┴────────┴───────────────┘
//! ```
//!
//! The panel acts as a mirror: it renders whatever values the gateway
//! pushes and only ever sends back small commands (refresh requests) and
//! heartbeats. All thermostat logic stays on the gateway.

#![no_std]
#![deny(unsafe_code)]

pub mod frame;
pub mod messages;
pub mod record;
pub mod value;

pub use frame::{Frame, FrameError, FrameParser, FRAME_START, MAX_FRAME_SIZE, MAX_PAYLOAD_SIZE};
pub use messages::{GatewayMessage, MessageError, PanelMessage};
pub use record::{
    decode_records, encode_record, encode_records, DecodeError, EncodeError, Record, RecordIter,
};
pub use value::{Key, Value, ValueRef, ValueTag, MAX_MESSAGE_SIZE, MAX_VALUE_LEN};
