//! Single-slot outbound channel for panel commands
//!
//! The link carries at most one panel command at a time; a second send
//! while the first is still with the transport is refused rather than
//! queued. Success means "handed to the transport", never "delivered".

use thermion_protocol::{encode_record, Key, Record, ValueRef, MAX_MESSAGE_SIZE};

/// Errors that can occur when initiating a send
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SendError {
    /// A previous send has not completed yet
    Busy,
    /// Record did not fit the outbound buffer
    EncodeFailed,
}

/// One-message-deep outbound buffer
#[derive(Debug)]
pub struct Outbox {
    buffer: [u8; MAX_MESSAGE_SIZE],
    pending: Option<usize>,
}

impl Default for Outbox {
    fn default() -> Self {
        Self::new()
    }
}

impl Outbox {
    /// Create an empty outbox
    ///
    /// `const` so the firmware can park one in a static mutex.
    pub const fn new() -> Self {
        Self {
            buffer: [0; MAX_MESSAGE_SIZE],
            pending: None,
        }
    }

    /// Whether a send is waiting on the transport
    pub fn in_flight(&self) -> bool {
        self.pending.is_some()
    }

    /// Encode one record and claim the slot
    ///
    /// Returns the encoded message for the transport to frame and write.
    /// The slot stays claimed until [`complete`](Self::complete); a failed
    /// encode leaves the slot free.
    pub fn send(&mut self, key: Key, value: ValueRef<'_>) -> Result<&[u8], SendError> {
        if self.pending.is_some() {
            return Err(SendError::Busy);
        }

        let record = Record::new(key, value);
        let len = encode_record(&record, &mut self.buffer).map_err(|_| SendError::EncodeFailed)?;
        self.pending = Some(len);

        Ok(&self.buffer[..len])
    }

    /// The in-flight message bytes, if any
    pub fn pending(&self) -> Option<&[u8]> {
        self.pending.map(|len| &self.buffer[..len])
    }

    /// Release the slot after the transport finished with the message
    ///
    /// Called for successful and failed writes alike; the panel does not
    /// retry (the gateway re-pushes state on its own schedule).
    pub fn complete(&mut self) {
        self.pending = None;
    }
}
