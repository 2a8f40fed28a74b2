use core::cell::Cell;

use proptest::prelude::*;
use thermion_core::cache::ValueCache;
use thermion_core::sync::{SyncError, SyncObserver, Synchronizer};
use thermion_protocol::{encode_records, Key, Record, Value, ValueRef, MAX_MESSAGE_SIZE};

const TRACKED: [Key; 3] = [20, 21, 22];

struct CountingObserver<'a> {
    changes: &'a Cell<usize>,
    errors: &'a Cell<usize>,
}

impl SyncObserver for CountingObserver<'_> {
    fn value_changed(&mut self, _key: Key, _value: &Value) {
        self.changes.set(self.changes.get() + 1);
    }

    fn sync_error(&mut self, _error: SyncError) {
        self.errors.set(self.errors.get() + 1);
    }
}

fn seeded<'a>(changes: &'a Cell<usize>, errors: &'a Cell<usize>) -> Synchronizer<CountingObserver<'a>> {
    let cache = ValueCache::from_entries(&[
        (TRACKED[0], ValueRef::Int(0)),
        (TRACKED[1], ValueRef::Int(0)),
        (TRACKED[2], ValueRef::Int(0)),
    ])
    .unwrap();
    Synchronizer::new(cache, CountingObserver { changes, errors })
}

fn encode_ints(entries: &[(Key, i32)], buffer: &mut [u8; MAX_MESSAGE_SIZE]) -> usize {
    let records: Vec<Record> = entries
        .iter()
        .map(|&(key, value)| Record::new(key, ValueRef::Int(value)))
        .collect();
    encode_records(&records, buffer).unwrap()
}

// Property 1: Re-applying an identical message reports the same applied
// count and produces zero additional change callbacks. Distinct keys only:
// a message that writes a key twice may legitimately re-fire on re-apply.
proptest! {
    #[test]
    fn prop_repeat_apply_is_idempotent(
        keyed in prop::collection::hash_map(20u16..23, any::<i32>(), 0..=3)
    ) {
        let entries: Vec<(Key, i32)> = keyed.into_iter().collect();

        let changes = Cell::new(0);
        let errors = Cell::new(0);
        let mut sync = seeded(&changes, &errors);

        let mut buffer = [0u8; MAX_MESSAGE_SIZE];
        let len = encode_ints(&entries, &mut buffer);

        let first = sync.apply_inbound(&buffer[..len]).unwrap();
        let changes_after_first = changes.get();

        let second = sync.apply_inbound(&buffer[..len]).unwrap();

        prop_assert_eq!(first, second);
        prop_assert_eq!(changes.get(), changes_after_first);
        prop_assert_eq!(errors.get(), 0);
    }
}

// Property 2: When a message repeats a key, the cache ends up holding the
// last record's value
proptest! {
    #[test]
    fn prop_last_write_wins(
        entries in prop::collection::vec((20u16..23, any::<i32>()), 1..=7)
    ) {
        let changes = Cell::new(0);
        let errors = Cell::new(0);
        let mut sync = seeded(&changes, &errors);

        let mut buffer = [0u8; MAX_MESSAGE_SIZE];
        let len = encode_ints(&entries, &mut buffer);
        sync.apply_inbound(&buffer[..len]).unwrap();

        for &key in &TRACKED {
            let expected = entries
                .iter()
                .rev()
                .find(|(k, _)| *k == key)
                .map(|&(_, v)| v)
                .unwrap_or(0);
            prop_assert_eq!(sync.cache().get(key).unwrap().as_int(), Some(expected));
        }
    }
}

// Property 3: A message with a mangled tail writes nothing at all, even
// when it starts with valid records
proptest! {
    #[test]
    fn prop_mangled_tail_writes_nothing(
        entries in prop::collection::vec((20u16..23, any::<i32>()), 1..=6),
        tail in prop::collection::vec(any::<u8>(), 1..=3)
    ) {
        let changes = Cell::new(0);
        let errors = Cell::new(0);
        let mut sync = seeded(&changes, &errors);

        let mut buffer = [0u8; MAX_MESSAGE_SIZE];
        let len = encode_ints(&entries, &mut buffer);
        // 1-3 trailing bytes cannot form a record header
        buffer[len..len + tail.len()].copy_from_slice(&tail);

        let result = sync.apply_inbound(&buffer[..len + tail.len()]);

        prop_assert!(result.is_err());
        prop_assert_eq!(changes.get(), 0);
        prop_assert_eq!(errors.get(), 1);
        for &key in &TRACKED {
            prop_assert_eq!(sync.cache().get(key).unwrap().as_int(), Some(0));
        }
    }
}
