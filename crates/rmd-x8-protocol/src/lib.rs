//! RMD-X8 CAN protocol codec for a single geared actuator.
//!
//! This crate is intentionally I/O-free and allocation-free on hot paths.
//! It turns command state into ready-to-send 8-byte CAN frames and parses the
//! drive's feedback frames, without opening a bus or reading a clock.
//!
//! # Key Features
//! - Velocity command encoding with optional current threshold
//! - Velocity feedback decoding: speed, phase current, motor temperature, faults
//! - Sign inversion for mirrored mounting, applied at the wire boundary
//! - Feedback staleness watchdog driven by caller-supplied timestamps
//!
//! # Example
//!
//! ```rust
//! use rmd_x8_protocol::ActuatorChannel;
//! use std::time::Duration;
//!
//! let mut channel = ActuatorChannel::new(0x141, Duration::from_millis(500), false);
//! channel.set_speed_command(10.0);
//! let frame = channel.encode_velocity();
//! assert!(frame.is_some());
//!
//! let feedback = [0x60, 0x42, 0xF6, 0xE9, 0x79, 0x15, 0x59, 0x66];
//! assert!(channel.decode(&feedback, Duration::from_millis(3)).is_ok());
//! assert!((channel.motor_temperature() - 26.0).abs() < 1e-3);
//! assert!(!channel.is_stale(Duration::from_millis(200)));
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(static_mut_refs)]

pub mod bitfield;
pub mod channel;
pub mod config;
pub mod error;
pub mod frame;
pub mod layout;
pub mod types;
pub mod watchdog;

pub use bitfield::{read_field, reverse_low_bytes, write_field};
pub use channel::{
    ActuatorChannel, CURRENT_SCALE, CURRENT_THRESHOLD_DISABLED, FeedbackState, TEMPERATURE_DIVISOR,
    TEMPERATURE_OFFSET,
};
pub use config::{ChannelConfig, ChannelConfigBuilder, DEFAULT_TIMEOUT_MS, MAX_STANDARD_ID};
pub use error::{RmdError, RmdResult};
pub use frame::{CAN_MAX_DLC, CanFrame};
pub use layout::BitField;
pub use types::{CommandType, ErrorFeedback, FeedbackType};
pub use watchdog::FeedbackWatchdog;
