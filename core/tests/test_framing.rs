// Framing suite: padding, preamble/SFD, CRC placement and the
// fatal/non-fatal split in `deframe`.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use xgmii_core::{
        constants::{MIN_PAYLOAD_LEN, MIN_WIRE_LEN, PREAMBLE_SFD},
        framing::{deframe, deframe_strict, frame, pad_payload, Diagnostic, FramingError},
        utils::compute_crc32,
    };

// # ✅ 1. Layout of a minimum frame

    #[test]
    fn single_byte_frame_layout() {
        let wire = frame(&[0xAA]);
        assert_eq!(wire.len(), 71);
        assert_eq!(&wire[..7], &PREAMBLE_SFD);
        assert_eq!(wire[7], 0xAA);
        assert!(wire[8..67].iter().all(|b| *b == 0));

        let crc = compute_crc32(&wire[7..67]).to_le_bytes();
        assert_eq!(&wire[67..], &crc);
    }

// # ✅ 2. No padding at or above the minimum

    #[test]
    fn long_frames_are_not_padded() {
        for len in [MIN_PAYLOAD_LEN, MIN_PAYLOAD_LEN + 1, 1500] {
            let raw: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
            assert_eq!(pad_payload(&raw), raw);
            assert_eq!(frame(&raw).len(), len + 11);
        }
    }

// # ✅ 3. Clean deframe

    #[test]
    fn deframe_strips_preamble_and_crc() {
        let raw = b"hello xgmii".to_vec();
        let d = deframe(&frame(&raw)).unwrap();
        assert!(d.is_clean());
        assert_eq!(d.payload, pad_payload(&raw));
    }

// # ❌ 4. Truncated input is rejected

    #[test]
    fn truncated_frame_is_rejected() {
        let wire = frame(&[1, 2, 3]);
        assert_eq!(
            deframe(&wire[..11]),
            Err(FramingError::Truncated { len: 11, min: 12 })
        );
    }

// # ⚠️ 5. Runt frames are reported but delivered

    #[test]
    fn runt_frame_is_reported() {
        // valid preamble + 20 byte payload + matching CRC
        let payload = vec![0x42; 20];
        let mut wire = PREAMBLE_SFD.to_vec();
        wire.extend_from_slice(&payload);
        wire.extend_from_slice(&compute_crc32(&payload).to_le_bytes());
        assert!(wire.len() < MIN_WIRE_LEN);

        let d = deframe(&wire).unwrap();
        assert_eq!(d.payload, payload);
        assert_eq!(d.diagnostics, vec![Diagnostic::RuntFrame { len: wire.len() }]);
        assert!(d.checksum_ok());
    }

// # ⚠️ 6. CRC mismatch is reported, payload still delivered

    #[test]
    fn checksum_mismatch_still_delivers() {
        let mut wire = frame(&[0x11; 64]);
        let last = wire.len() - 1;
        wire[last] ^= 0xFF;

        let d = deframe(&wire).unwrap();
        assert_eq!(d.payload, vec![0x11; 64]);
        assert!(!d.checksum_ok());

        assert!(matches!(
            deframe_strict(&wire),
            Err(FramingError::Strict(Diagnostic::ChecksumMismatch { .. }))
        ));
    }

// # ❌ 7. Every preamble byte is checked

    #[test]
    fn corrupted_preamble_is_rejected() {
        let good = frame(&[0xAB; 80]);
        for i in 0..PREAMBLE_SFD.len() {
            let mut wire = good.clone();
            wire[i] ^= 0x01;
            match deframe(&wire) {
                Err(FramingError::BadPreamble { found }) => assert_eq!(&found[..], &wire[..7]),
                other => panic!("byte {}: unexpected result: {:?}", i, other),
            }
        }
    }

    proptest! {
        #[test]
        fn prop_reframe_is_identity(raw in proptest::collection::vec(any::<u8>(), 1..1500)) {
            let wire = frame(&raw);
            let d = deframe(&wire).unwrap();
            prop_assert!(d.is_clean());
            prop_assert_eq!(frame(&d.payload), wire);
        }

        #[test]
        fn prop_any_payload_bit_flip_breaks_crc(
            raw in proptest::collection::vec(any::<u8>(), 1..300),
            pick in any::<usize>(),
            bit in 0u8..8,
        ) {
            let mut wire = frame(&raw);
            let payload_len = wire.len() - 11;
            let at = 7 + pick % payload_len;
            wire[at] ^= 1 << bit;

            let d = deframe(&wire).unwrap();
            prop_assert!(!d.checksum_ok());
        }
    }
}
