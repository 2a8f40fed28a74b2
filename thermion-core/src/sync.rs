//! Applies inbound state messages to the cache and notifies on changes
//!
//! The synchronizer is single-threaded and callback-driven, mirroring how
//! the firmware drives it from one task. Reentrancy is not possible by
//! construction: `apply_inbound` holds the exclusive borrow for its whole
//! extent and observers only ever see `&Value`, never the synchronizer.

use thermion_protocol::{decode_records, DecodeError, FrameError, Key, Value, MAX_MESSAGE_SIZE};

use crate::cache::ValueCache;

/// Faults reported to the observer
///
/// `Capacity` and `Decode` are also returned from `apply_inbound`;
/// `UnknownKey` and `Transport` only ever reach the observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SyncError {
    /// Inbound message is larger than the scratch buffer
    Capacity,
    /// Message failed validation; nothing was applied
    Decode(DecodeError),
    /// Record addressed a key the cache does not track (record skipped)
    UnknownKey(Key),
    /// Link-layer fault forwarded by the transport
    Transport(FrameError),
}

/// Receives change notifications and fault reports
///
/// Callbacks fire while `apply_inbound` runs, one per changed record, in
/// record order. Implementations must not block.
pub trait SyncObserver {
    /// A tracked key now holds a different value
    fn value_changed(&mut self, key: Key, value: &Value);

    /// A fault occurred; the cache reflects everything applied so far
    fn sync_error(&mut self, error: SyncError);
}

/// Applies gateway state messages to the panel's value cache
///
/// Owns the cache, the observer, and a fixed scratch buffer the inbound
/// bytes are copied into, so the transport may reuse its own buffer the
/// moment `apply_inbound` returns.
pub struct Synchronizer<O: SyncObserver> {
    cache: ValueCache,
    observer: O,
    scratch: [u8; MAX_MESSAGE_SIZE],
}

impl<O: SyncObserver> Synchronizer<O> {
    /// Wrap a seeded cache and an observer
    ///
    /// Seeding the cache is not a change: no callbacks fire here.
    pub fn new(cache: ValueCache, observer: O) -> Self {
        Self {
            cache,
            observer,
            scratch: [0; MAX_MESSAGE_SIZE],
        }
    }

    /// Apply one inbound state message
    ///
    /// The whole message is validated before any write; a malformed
    /// message reports `Decode` once and leaves the cache untouched.
    /// Records for untracked keys report `UnknownKey` and are skipped
    /// without aborting the rest of the message. Returns the number of
    /// records stored, whether or not they changed anything.
    pub fn apply_inbound(&mut self, raw: &[u8]) -> Result<usize, SyncError> {
        if raw.len() > MAX_MESSAGE_SIZE {
            let error = SyncError::Capacity;
            self.observer.sync_error(error);
            return Err(error);
        }

        self.scratch[..raw.len()].copy_from_slice(raw);

        let records = match decode_records(&self.scratch[..raw.len()]) {
            Ok(records) => records,
            Err(e) => {
                let error = SyncError::Decode(e);
                self.observer.sync_error(error);
                return Err(error);
            }
        };

        let mut applied = 0;
        for record in records {
            match self.cache.set(record.key, record.value) {
                Ok(changed) => {
                    applied += 1;
                    if changed {
                        // Hand out the stored copy, not the wire view
                        if let Some(value) = self.cache.get(record.key) {
                            self.observer.value_changed(record.key, value);
                        }
                    }
                }
                Err(_) => {
                    // Decode already bounded every payload, so the only
                    // way set fails is an untracked key
                    self.observer.sync_error(SyncError::UnknownKey(record.key));
                }
            }
        }

        Ok(applied)
    }

    /// Forward a link-layer fault into the observer's error path
    ///
    /// Keeps one error funnel for the whole sync pipeline, framing
    /// included.
    pub fn transport_error(&mut self, error: FrameError) {
        self.observer.sync_error(SyncError::Transport(error));
    }

    /// The cached values
    pub fn cache(&self) -> &ValueCache {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;
    use thermion_protocol::{encode_records, Record, ValueRef};

    const CURRENT_TEMP: Key = 20;
    const COOL_SETPOINT: Key = 21;
    const HEAT_SETPOINT: Key = 22;

    #[derive(Default)]
    struct RecordingObserver {
        changes: Vec<(Key, Value), 16>,
        errors: Vec<SyncError, 16>,
    }

    impl SyncObserver for RecordingObserver {
        fn value_changed(&mut self, key: Key, value: &Value) {
            let _ = self.changes.push((key, value.clone()));
        }

        fn sync_error(&mut self, error: SyncError) {
            let _ = self.errors.push(error);
        }
    }

    fn seeded_sync() -> Synchronizer<RecordingObserver> {
        let cache = ValueCache::from_entries(&[
            (CURRENT_TEMP, ValueRef::Int(0)),
            (COOL_SETPOINT, ValueRef::Int(0)),
            (HEAT_SETPOINT, ValueRef::Int(0)),
        ])
        .unwrap();
        Synchronizer::new(cache, RecordingObserver::default())
    }

    fn encode<const N: usize>(records: &[Record<'_>]) -> Vec<u8, N> {
        let mut buffer = [0u8; MAX_MESSAGE_SIZE];
        let len = encode_records(records, &mut buffer).unwrap();
        let mut out = Vec::new();
        out.extend_from_slice(&buffer[..len]).unwrap();
        out
    }

    #[test]
    fn test_construction_fires_no_callbacks() {
        let sync = seeded_sync();
        assert!(sync.observer.changes.is_empty());
        assert!(sync.observer.errors.is_empty());
    }

    #[test]
    fn test_single_update_notifies_once() {
        let mut sync = seeded_sync();
        let raw: Vec<u8, 64> = encode(&[Record::new(CURRENT_TEMP, ValueRef::Int(21))]);

        assert_eq!(sync.apply_inbound(&raw), Ok(1));

        assert_eq!(sync.observer.changes.len(), 1);
        assert_eq!(sync.observer.changes[0].0, CURRENT_TEMP);
        assert_eq!(sync.observer.changes[0].1.as_int(), Some(21));
        assert_eq!(sync.cache().get(CURRENT_TEMP).unwrap().as_int(), Some(21));
        // Untouched keys keep their seed values
        assert_eq!(sync.cache().get(HEAT_SETPOINT).unwrap().as_int(), Some(0));
        assert!(sync.observer.errors.is_empty());
    }

    #[test]
    fn test_repeat_message_applies_without_callbacks() {
        let mut sync = seeded_sync();
        let raw: Vec<u8, 64> = encode(&[Record::new(CURRENT_TEMP, ValueRef::Int(21))]);

        assert_eq!(sync.apply_inbound(&raw), Ok(1));
        assert_eq!(sync.apply_inbound(&raw), Ok(1));

        // Second pass stored nothing new
        assert_eq!(sync.observer.changes.len(), 1);
    }

    #[test]
    fn test_malformed_message_is_atomic() {
        let mut sync = seeded_sync();

        // A valid record followed by one whose declared payload (10 bytes)
        // is cut off after 3
        let mut raw: Vec<u8, 64> = encode(&[Record::new(CURRENT_TEMP, ValueRef::Int(21))]);
        raw.extend_from_slice(&[21, 0, 0x02, 10, 0xAA, 0xBB, 0xCC]).unwrap();

        assert_eq!(
            sync.apply_inbound(&raw),
            Err(SyncError::Decode(DecodeError::Truncated))
        );

        // Nothing was written, not even the valid leading record
        assert_eq!(sync.cache().get(CURRENT_TEMP).unwrap().as_int(), Some(0));
        assert!(sync.observer.changes.is_empty());
        assert_eq!(sync.observer.errors.len(), 1);
    }

    #[test]
    fn test_callbacks_follow_record_order() {
        let mut sync = seeded_sync();
        let raw: Vec<u8, 64> = encode(&[
            Record::new(HEAT_SETPOINT, ValueRef::Int(68)),
            Record::new(COOL_SETPOINT, ValueRef::Int(75)),
            Record::new(CURRENT_TEMP, ValueRef::Int(72)),
        ]);

        assert_eq!(sync.apply_inbound(&raw), Ok(3));

        let keys: Vec<Key, 4> = sync.observer.changes.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys.as_slice(), &[HEAT_SETPOINT, COOL_SETPOINT, CURRENT_TEMP]);
    }

    #[test]
    fn test_unknown_key_skipped_not_fatal() {
        let mut sync = seeded_sync();
        let raw: Vec<u8, 64> = encode(&[
            Record::new(99, ValueRef::Int(1)),
            Record::new(CURRENT_TEMP, ValueRef::Int(73)),
        ]);

        // Only the tracked record counts as applied
        assert_eq!(sync.apply_inbound(&raw), Ok(1));
        assert_eq!(sync.observer.errors.as_slice(), &[SyncError::UnknownKey(99)]);
        assert_eq!(sync.cache().get(CURRENT_TEMP).unwrap().as_int(), Some(73));
    }

    #[test]
    fn test_oversize_message_reports_capacity() {
        let mut sync = seeded_sync();
        let raw = [0u8; MAX_MESSAGE_SIZE + 1];

        assert_eq!(sync.apply_inbound(&raw), Err(SyncError::Capacity));
        assert_eq!(sync.observer.errors.as_slice(), &[SyncError::Capacity]);
        assert!(sync.observer.changes.is_empty());
    }

    #[test]
    fn test_empty_message_applies_nothing() {
        let mut sync = seeded_sync();
        assert_eq!(sync.apply_inbound(&[]), Ok(0));
        assert!(sync.observer.changes.is_empty());
        assert!(sync.observer.errors.is_empty());
    }

    #[test]
    fn test_variant_overwrite_reports_change() {
        let mut sync = seeded_sync();
        let raw: Vec<u8, 64> = encode(&[Record::new(CURRENT_TEMP, ValueRef::Text("off"))]);

        assert_eq!(sync.apply_inbound(&raw), Ok(1));
        assert_eq!(sync.observer.changes.len(), 1);
        assert_eq!(sync.cache().get(CURRENT_TEMP).unwrap().as_str(), Some("off"));
    }

    #[test]
    fn test_transport_error_reaches_observer() {
        let mut sync = seeded_sync();
        sync.transport_error(FrameError::InvalidChecksum);

        assert_eq!(
            sync.observer.errors.as_slice(),
            &[SyncError::Transport(FrameError::InvalidChecksum)]
        );
    }

    #[test]
    fn test_message_of_only_unknown_keys_applies_zero() {
        let mut sync = seeded_sync();
        let raw: Vec<u8, 64> = encode(&[
            Record::new(7, ValueRef::Int(1)),
            Record::new(8, ValueRef::Int(2)),
        ]);

        assert_eq!(sync.apply_inbound(&raw), Ok(0));
        assert_eq!(
            sync.observer.errors.as_slice(),
            &[SyncError::UnknownKey(7), SyncError::UnknownKey(8)]
        );
        assert!(sync.observer.changes.is_empty());
    }
}
