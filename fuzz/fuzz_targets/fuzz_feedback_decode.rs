//! Fuzzes the RMD-X8 feedback decoder.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_feedback_decode
#![no_main]
use libfuzzer_sys::fuzz_target;
use rmd_x8_protocol::ActuatorChannel;
use std::time::Duration;

fuzz_target!(|data: &[u8]| {
    let mut channel = ActuatorChannel::with_default_timeout(0x141);
    // Must never panic on arbitrary bytes, whatever the length.
    let _ = channel.decode_bytes(data, Duration::from_millis(1));
    let _ = channel.is_stale(Duration::from_secs(1));
});
