//! Typed values exchanged between the gateway and the panel

use heapless::{String, Vec};

/// Numeric key identifying a synchronized value
///
/// Key assignments are a convention shared with the gateway and are never
/// renumbered once deployed.
pub type Key = u16;

/// Whole inbound or outbound message, including every record header
pub const MAX_MESSAGE_SIZE: usize = 64;

/// Per-record header: key (2) + tag (1) + length (1)
pub const RECORD_HEADER_LEN: usize = 4;

/// Largest payload a single record can carry
pub const MAX_VALUE_LEN: usize = MAX_MESSAGE_SIZE - RECORD_HEADER_LEN;

/// Most records a single message can hold (zero-length payloads)
pub const MAX_RECORDS: usize = MAX_MESSAGE_SIZE / RECORD_HEADER_LEN;

/// Wire length of an integer payload
pub const INT_PAYLOAD_LEN: usize = 4;

/// Value kind discriminator as it appears on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ValueTag {
    /// 32-bit signed integer, fixed 4-byte payload
    Int,
    /// UTF-8 text, no terminator
    Text,
    /// Raw bytes
    Bytes,
}

// Wire format values
const TAG_INT: u8 = 0x00;
const TAG_TEXT: u8 = 0x01;
const TAG_BYTES: u8 = 0x02;

impl ValueTag {
    /// Parse a tag from its wire format byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            TAG_INT => Some(ValueTag::Int),
            TAG_TEXT => Some(ValueTag::Text),
            TAG_BYTES => Some(ValueTag::Bytes),
            _ => None,
        }
    }

    /// Convert to wire format byte
    pub fn to_byte(self) -> u8 {
        match self {
            ValueTag::Int => TAG_INT,
            ValueTag::Text => TAG_TEXT,
            ValueTag::Bytes => TAG_BYTES,
        }
    }
}

/// Borrowed view of a value, as decoded from or encoded into a message
///
/// This is the zero-copy wire-side type; it never outlives the message
/// buffer it points into. Use [`Value`] to keep a copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ValueRef<'a> {
    Int(i32),
    Text(&'a str),
    Bytes(&'a [u8]),
}

impl<'a> ValueRef<'a> {
    /// The wire tag for this value
    pub fn tag(&self) -> ValueTag {
        match self {
            ValueRef::Int(_) => ValueTag::Int,
            ValueRef::Text(_) => ValueTag::Text,
            ValueRef::Bytes(_) => ValueTag::Bytes,
        }
    }

    /// Encoded payload length in bytes
    pub fn payload_len(&self) -> usize {
        match self {
            ValueRef::Int(_) => INT_PAYLOAD_LEN,
            ValueRef::Text(text) => text.len(),
            ValueRef::Bytes(bytes) => bytes.len(),
        }
    }
}

/// Owned value as stored in the panel's cache
///
/// Text and bytes are bounded by [`MAX_VALUE_LEN`], which matches the
/// largest payload the codec will ever produce.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Value {
    Int(i32),
    Text(String<MAX_VALUE_LEN>),
    Bytes(Vec<u8, MAX_VALUE_LEN>),
}

impl Value {
    /// Copy a borrowed value into an owned one
    ///
    /// Returns `None` only when text or bytes exceed [`MAX_VALUE_LEN`],
    /// which decoded values never do.
    pub fn from_ref(value: &ValueRef<'_>) -> Option<Self> {
        match value {
            ValueRef::Int(v) => Some(Value::Int(*v)),
            ValueRef::Text(text) => {
                let mut owned = String::new();
                owned.push_str(text).ok()?;
                Some(Value::Text(owned))
            }
            ValueRef::Bytes(bytes) => {
                let mut owned = Vec::new();
                owned.extend_from_slice(bytes).ok()?;
                Some(Value::Bytes(owned))
            }
        }
    }

    /// Borrow this value for encoding or comparison
    pub fn to_ref(&self) -> ValueRef<'_> {
        match self {
            Value::Int(v) => ValueRef::Int(*v),
            Value::Text(text) => ValueRef::Text(text.as_str()),
            Value::Bytes(bytes) => ValueRef::Bytes(bytes.as_slice()),
        }
    }

    /// The wire tag for this value
    pub fn tag(&self) -> ValueTag {
        self.to_ref().tag()
    }

    /// The integer, if this is an `Int`
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// The text, if this is a `Text`
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// The raw bytes, if this is a `Bytes`
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(bytes) => Some(bytes.as_slice()),
            _ => None,
        }
    }

    /// Structural equality against a borrowed value: same variant, same content
    pub fn matches(&self, other: &ValueRef<'_>) -> bool {
        self.to_ref() == *other
    }
}
