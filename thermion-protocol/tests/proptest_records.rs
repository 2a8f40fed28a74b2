use proptest::prelude::*;
use thermion_protocol::{
    decode_records, encode_record, encode_records, DecodeError, Record, ValueRef,
    MAX_MESSAGE_SIZE,
};

// Property 1: Integer records survive an encode/decode roundtrip exactly
proptest! {
    #[test]
    fn prop_roundtrip_int_record(key in any::<u16>(), value in any::<i32>()) {
        let original = Record::new(key, ValueRef::Int(value));
        let mut buffer = [0u8; MAX_MESSAGE_SIZE];
        let len = encode_record(&original, &mut buffer).unwrap();

        let mut iter = decode_records(&buffer[..len]).unwrap();
        prop_assert_eq!(iter.next(), Some(original));
        prop_assert_eq!(iter.next(), None);
    }
}

// Property 2: Text records roundtrip for any printable-ASCII payload up to the cap
proptest! {
    #[test]
    fn prop_roundtrip_text_record(key in any::<u16>(), text in "[ -~]{0,60}") {
        let original = Record::new(key, ValueRef::Text(&text));
        let mut buffer = [0u8; MAX_MESSAGE_SIZE];
        let len = encode_record(&original, &mut buffer).unwrap();

        let mut iter = decode_records(&buffer[..len]).unwrap();
        let decoded = iter.next().unwrap();
        prop_assert_eq!(decoded.key, key);
        prop_assert_eq!(decoded.value, ValueRef::Text(&text));
    }
}

// Property 3: Byte records roundtrip for any payload up to the cap
proptest! {
    #[test]
    fn prop_roundtrip_bytes_record(
        key in any::<u16>(),
        bytes in prop::collection::vec(any::<u8>(), 0..=60)
    ) {
        let original = Record::new(key, ValueRef::Bytes(&bytes));
        let mut buffer = [0u8; MAX_MESSAGE_SIZE];
        let len = encode_record(&original, &mut buffer).unwrap();

        let mut iter = decode_records(&buffer[..len]).unwrap();
        let decoded = iter.next().unwrap();
        prop_assert_eq!(decoded.key, key);
        prop_assert_eq!(decoded.value, ValueRef::Bytes(&bytes));
    }
}

// Property 4: Multi-record messages decode to the same records in the same order
proptest! {
    #[test]
    fn prop_roundtrip_message_order(
        entries in prop::collection::vec((any::<u16>(), any::<i32>()), 0..=7)
    ) {
        let records: Vec<Record> = entries
            .iter()
            .map(|&(key, value)| Record::new(key, ValueRef::Int(value)))
            .collect();

        let mut buffer = [0u8; MAX_MESSAGE_SIZE];
        let len = encode_records(&records, &mut buffer).unwrap();

        let decoded: Vec<Record> = decode_records(&buffer[..len]).unwrap().collect();
        prop_assert_eq!(decoded, records);
    }
}

// Property 5: Decoding arbitrary bytes never panics, and success implies the
// iterator walks the whole buffer without panicking either
proptest! {
    #[test]
    fn prop_decode_arbitrary_bytes_never_panics(
        raw in prop::collection::vec(any::<u8>(), 0..=MAX_MESSAGE_SIZE)
    ) {
        if let Ok(iter) = decode_records(&raw) {
            let _count = iter.count();
        }
    }
}

// Property 6: A truncated valid message is rejected as a whole, not partially
// decoded
proptest! {
    #[test]
    fn prop_truncation_rejects_whole_message(
        entries in prop::collection::vec((any::<u16>(), any::<i32>()), 1..=7),
        cut in 1usize..8
    ) {
        let records: Vec<Record> = entries
            .iter()
            .map(|&(key, value)| Record::new(key, ValueRef::Int(value)))
            .collect();

        let mut buffer = [0u8; MAX_MESSAGE_SIZE];
        let len = encode_records(&records, &mut buffer).unwrap();

        // Cut inside the final record (each record is 8 bytes)
        let cut_len = len - cut;
        prop_assert_eq!(
            decode_records(&buffer[..cut_len]).err(),
            Some(DecodeError::Truncated)
        );
    }
}
