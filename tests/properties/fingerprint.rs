//! Property tests for content fingerprinting.

use proptest::prelude::*;

use stackship::ContentFingerprinter;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: the same bytes always produce the same digest, whatever the chunk size.
    #[test]
    fn property_fingerprint_is_deterministic(
        bytes in proptest::collection::vec(any::<u8>(), 0..4096),
        chunk_a in 1usize..512,
        chunk_b in 1usize..512,
    ) {
        let a = ContentFingerprinter::new(chunk_a).fingerprint_reader(bytes.as_slice()).unwrap();
        let b = ContentFingerprinter::new(chunk_b).fingerprint_reader(bytes.as_slice()).unwrap();
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a.as_str().len(), 64);
    }

    /// PROPERTY: flipping any single byte changes the digest.
    #[test]
    fn property_single_byte_change_changes_digest(
        bytes in proptest::collection::vec(any::<u8>(), 1..2048),
        index in any::<prop::sample::Index>(),
        flip in 1u8..=255,
    ) {
        let mut changed = bytes.clone();
        let i = index.index(changed.len());
        changed[i] ^= flip;

        let fingerprinter = ContentFingerprinter::default();
        let before = fingerprinter.fingerprint_reader(bytes.as_slice()).unwrap();
        let after = fingerprinter.fingerprint_reader(changed.as_slice()).unwrap();
        prop_assert_ne!(before, after);
    }
}
