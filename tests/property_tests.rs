//! Property-based tests for the put-blocks codec
//!
//! Uses PropTest for random batches and rand for random truncation offsets.


use btcindexer_wire::{decode, encode, encoded_len, DecodeErrorKind, PutBlock};
use proptest::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn arb_put_block() -> impl Strategy<Value = PutBlock> {
    (any::<i64>(), prop::collection::vec(any::<u8>(), 0..600))
        .prop_map(|(height, block)| PutBlock::new(height, block))
}

proptest! {
    #[test]
    fn decode_inverts_encode(batch in prop::collection::vec(arb_put_block(), 0..40)) {
        let bytes = encode(&batch);
        let decoded = decode(&bytes).unwrap();
        prop_assert_eq!(decoded, batch);
    }

    #[test]
    fn encoded_len_is_exact(batch in prop::collection::vec(arb_put_block(), 0..40)) {
        prop_assert_eq!(encode(&batch).len(), encoded_len(&batch));
    }

    #[test]
    fn encode_is_deterministic(batch in prop::collection::vec(arb_put_block(), 0..20)) {
        let copy = batch.clone();
        prop_assert_eq!(encode(&batch), encode(&copy));
    }

    #[test]
    fn every_strict_prefix_is_truncated(batch in prop::collection::vec(arb_put_block(), 1..5)) {
        let bytes = encode(&batch);
        for cut in 0..bytes.len() {
            let err = decode(&bytes[..cut]).unwrap_err();
            prop_assert_eq!(err.kind(), DecodeErrorKind::Truncated, "cut at {}", cut);
        }
    }

    #[test]
    fn arbitrary_input_never_panics(data in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = decode(&data);
    }
}

/// Payload lengths on both sides of every bin size-class boundary
#[test]
fn test_round_trip_across_size_classes() {
    for len in [0usize, 1, 254, 255, 256, 65535, 65536] {
        let block: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
        for count in [0usize, 1, 16] {
            let batch: Vec<PutBlock> = (0..count)
                .map(|i| PutBlock::new(i as i64, block.clone()))
                .collect();
            let bytes = encode(&batch);
            assert_eq!(bytes.len(), encoded_len(&batch), "len {len} count {count}");
            assert_eq!(decode(&bytes).unwrap(), batch, "len {len} count {count}");
        }
    }
}

#[test]
fn test_random_truncation_of_large_batch() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let genesis = test_helpers::genesis_block();
    let batch: Vec<PutBlock> = (0..20)
        .map(|i| {
            let len = rng.gen_range(0..70_000);
            let block = if i % 3 == 0 {
                genesis.clone()
            } else {
                (0..len).map(|_| rng.gen()).collect()
            };
            PutBlock::new(rng.gen(), block)
        })
        .collect();
    let bytes = encode(&batch);

    for _ in 0..2_000 {
        let cut = rng.gen_range(0..bytes.len());
        let err = decode(&bytes[..cut]).unwrap_err();
        assert_eq!(err.kind(), DecodeErrorKind::Truncated, "cut at {cut}: {err}");
    }
    assert_eq!(decode(&bytes).unwrap(), batch);
}
