#![no_main]
use btcindexer_wire::{decode, decode_borrowed, encode, encoded_len};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must fail cleanly or decode; never panic
    let owned = decode(data);
    let borrowed = decode_borrowed(data);

    // Both modes agree on every input
    match (&owned, &borrowed) {
        (Ok(records), Ok(views)) => {
            assert_eq!(records.len(), views.len());
            for (record, view) in records.iter().zip(views) {
                assert_eq!(record.height, view.height);
                assert_eq!(&record.block[..], view.block);
            }
        }
        (Err(a), Err(b)) => assert_eq!(a, b),
        _ => panic!("owned and borrowed decode disagree"),
    }

    if let Ok(records) = owned {
        // Re-encoding is canonical and decodes to the same batch
        let encoded = encode(&records);
        assert_eq!(encoded.len(), encoded_len(&records));
        let again = decode(&encoded).expect("canonical encoding must decode");
        assert_eq!(again, records);
        assert_eq!(encode(&again), encoded, "encoding must be deterministic");
    }
});
