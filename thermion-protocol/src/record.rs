//! Record encoding and decoding for synchronized values.
//!
//! Record format, little-endian:
//! - KEY (2 bytes): value identifier
//! - TAG (1 byte): value kind (0 = Int, 1 = Text, 2 = Bytes)
//! - LENGTH (1 byte): payload length; always 4 for Int
//! - PAYLOAD (LENGTH bytes): i32 LE, UTF-8 text, or raw bytes
//!
//! A message is a plain concatenation of records, at most
//! [`MAX_MESSAGE_SIZE`] bytes in total. Decoding validates the whole
//! message before yielding anything: a single malformed record rejects the
//! message, so consumers never observe a partial apply.

use crate::value::{Key, ValueRef, ValueTag, INT_PAYLOAD_LEN, MAX_VALUE_LEN, RECORD_HEADER_LEN};

/// Errors that can occur while encoding records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodeError {
    /// Destination buffer cannot hold the encoded records
    BufferTooSmall,
    /// Text or bytes payload exceeds the per-record cap
    ValueTooLong,
}

/// Errors that can occur while decoding a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Message ends inside a record header or declared payload
    Truncated,
    /// Tag byte is not a known value kind
    UnknownTag,
    /// Declared length is impossible for the tag
    InvalidLength,
    /// Text payload is not valid UTF-8
    InvalidText,
}

/// One key/value pair within a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Record<'a> {
    pub key: Key,
    pub value: ValueRef<'a>,
}

impl<'a> Record<'a> {
    pub fn new(key: Key, value: ValueRef<'a>) -> Self {
        Self { key, value }
    }

    /// Encoded size of this record, header included
    pub fn encoded_len(&self) -> usize {
        RECORD_HEADER_LEN + self.value.payload_len()
    }
}

/// Encode a single record into `buffer`
///
/// Returns the number of bytes written.
pub fn encode_record(record: &Record<'_>, buffer: &mut [u8]) -> Result<usize, EncodeError> {
    let payload_len = record.value.payload_len();
    if payload_len > MAX_VALUE_LEN {
        return Err(EncodeError::ValueTooLong);
    }

    let total = RECORD_HEADER_LEN + payload_len;
    if buffer.len() < total {
        return Err(EncodeError::BufferTooSmall);
    }

    buffer[0..2].copy_from_slice(&record.key.to_le_bytes());
    buffer[2] = record.value.tag().to_byte();
    buffer[3] = payload_len as u8;

    let payload = &mut buffer[RECORD_HEADER_LEN..total];
    match record.value {
        ValueRef::Int(v) => payload.copy_from_slice(&v.to_le_bytes()),
        ValueRef::Text(text) => payload.copy_from_slice(text.as_bytes()),
        ValueRef::Bytes(bytes) => payload.copy_from_slice(bytes),
    }

    Ok(total)
}

/// Encode a sequence of records into `buffer` as one message
///
/// All-or-nothing: on error the buffer contents are unspecified and the
/// caller must not transmit them. Returns the total bytes written.
pub fn encode_records(records: &[Record<'_>], buffer: &mut [u8]) -> Result<usize, EncodeError> {
    let mut offset = 0;
    for record in records {
        offset += encode_record(record, &mut buffer[offset..])?;
    }
    Ok(offset)
}

/// Validate a whole message and return an iterator over its records
///
/// The entire buffer is checked up front: every header, every declared
/// length, every text payload. Only a fully well-formed message yields an
/// iterator, which then cannot fail. An empty message is valid and yields
/// nothing.
pub fn decode_records(buffer: &[u8]) -> Result<RecordIter<'_>, DecodeError> {
    let mut pos = 0;

    while pos < buffer.len() {
        if buffer.len() - pos < RECORD_HEADER_LEN {
            return Err(DecodeError::Truncated);
        }

        let tag = ValueTag::from_byte(buffer[pos + 2]).ok_or(DecodeError::UnknownTag)?;
        let len = buffer[pos + 3] as usize;

        match tag {
            ValueTag::Int => {
                if len != INT_PAYLOAD_LEN {
                    return Err(DecodeError::InvalidLength);
                }
            }
            ValueTag::Text | ValueTag::Bytes => {
                if len > MAX_VALUE_LEN {
                    return Err(DecodeError::InvalidLength);
                }
            }
        }

        let payload_start = pos + RECORD_HEADER_LEN;
        if buffer.len() - payload_start < len {
            return Err(DecodeError::Truncated);
        }

        if tag == ValueTag::Text
            && core::str::from_utf8(&buffer[payload_start..payload_start + len]).is_err()
        {
            return Err(DecodeError::InvalidText);
        }

        pos = payload_start + len;
    }

    Ok(RecordIter { buffer, pos: 0 })
}

/// Iterator over the records of a validated message
///
/// Produced only by [`decode_records`], so every step below operates on
/// bytes that already passed validation.
#[derive(Debug, Clone)]
pub struct RecordIter<'a> {
    buffer: &'a [u8],
    pos: usize,
}

impl<'a> Iterator for RecordIter<'a> {
    type Item = Record<'a>;

    fn next(&mut self) -> Option<Record<'a>> {
        if self.pos >= self.buffer.len() {
            return None;
        }

        let key = Key::from_le_bytes([self.buffer[self.pos], self.buffer[self.pos + 1]]);
        // Tag and length were checked by decode_records
        let tag = ValueTag::from_byte(self.buffer[self.pos + 2])?;
        let len = self.buffer[self.pos + 3] as usize;

        let payload_start = self.pos + RECORD_HEADER_LEN;
        let payload = &self.buffer[payload_start..payload_start + len];
        self.pos = payload_start + len;

        let value = match tag {
            ValueTag::Int => ValueRef::Int(i32::from_le_bytes(payload.try_into().ok()?)),
            ValueTag::Text => ValueRef::Text(core::str::from_utf8(payload).ok()?),
            ValueTag::Bytes => ValueRef::Bytes(payload),
        };

        Some(Record { key, value })
    }
}
