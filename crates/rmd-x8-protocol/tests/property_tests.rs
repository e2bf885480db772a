//! Property-based tests for codec invariants.

use proptest::prelude::*;
use rmd_x8_protocol::layout::{rx, tx};
use rmd_x8_protocol::{ActuatorChannel, BitField, reverse_low_bytes};
use std::time::Duration;

fn any_field() -> impl Strategy<Value = BitField> {
    prop::sample::select(vec![
        tx::COMMAND_TYPE,
        tx::FEEDBACK_TYPE,
        tx::SPEED_COMMAND,
        tx::CURRENT_THRESHOLD,
        rx::FEEDBACK_TYPE,
        rx::ERROR_CODE,
        rx::SPEED_FEEDBACK,
        rx::CURRENT_FEEDBACK,
        rx::MOTOR_TEMPERATURE,
    ])
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(500))]

    #[test]
    fn prop_speed_survives_encode_decode(
        speed in -1.0e6f32..1.0e6f32,
        invert_tx in proptest::bool::ANY,
        invert_rx in proptest::bool::ANY,
    ) {
        let mut sender = ActuatorChannel::new(0x123, Duration::from_millis(500), invert_tx);
        let mut receiver = ActuatorChannel::new(0x123, Duration::from_millis(500), invert_rx);
        sender.set_speed_command(speed);

        let frame = sender.encode_velocity();
        prop_assert!(frame.is_some());
        if let Some(frame) = frame {
            let mut feedback = *frame.data();
            // Velocity feedback, no fault; speed bytes as encoded.
            feedback[0] = 0x60;
            prop_assert!(receiver.decode(&feedback, Duration::ZERO).is_ok());

            let expected = speed * sender.inversion_factor() * receiver.inversion_factor();
            prop_assert_eq!(receiver.speed_feedback().to_bits(), expected.to_bits());
        }
    }

    #[test]
    fn prop_byte_reversal_is_an_involution(value in any::<u64>(), len_bytes in 1usize..=8) {
        let twice = reverse_low_bytes(reverse_low_bytes(value, len_bytes), len_bytes);
        prop_assert_eq!(twice, value);
    }

    #[test]
    fn prop_field_write_is_isolated(
        field in any_field(),
        value in any::<u64>(),
        background in prop::sample::select(vec![u64::MAX, 0xA5A5_A5A5_A5A5_A5A5, 0x5A5A_5A5A_5A5A_5A5A]),
    ) {
        let mut word = background;
        field.write(&mut word, value);
        prop_assert_eq!(word & !field.mask(), background & !field.mask());
    }

    #[test]
    fn prop_field_read_returns_what_was_written(field in any_field(), value in any::<u64>()) {
        let masked = if field.length >= 64 { value } else { value & ((1u64 << field.length) - 1) };
        let mut word = 0xFFFF_FFFF_FFFF_FFFF;
        field.write(&mut word, masked);
        prop_assert_eq!(field.read(word), masked);
    }

    #[test]
    fn prop_staleness_boundary(last_ms in 0u64..10_000_000, timeout_ms in 1u64..60_000) {
        let mut channel = ActuatorChannel::new(1, Duration::from_millis(timeout_ms), false);
        let last = Duration::from_millis(last_ms);
        prop_assert!(channel.decode(&[0x60, 0, 0, 0, 0, 0, 0, 0], last).is_ok());

        let deadline = last + Duration::from_millis(timeout_ms);
        prop_assert!(!channel.is_stale(deadline));
        prop_assert!(channel.is_stale(deadline + Duration::from_nanos(1)));
    }
}
