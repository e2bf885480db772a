//! Actuator channel: command encoding, feedback decoding and staleness.
//!
//! A command frame (host to drive) carries:
//! - Bits 0-1: requested feedback type
//! - Bits 5-7: command type
//! - Bytes 1-4: speed command, IEEE-754 `f32`, big-endian
//! - Bytes 5-6: current threshold, `u16`, big-endian
//!
//! A feedback frame (drive to host) carries:
//! - Bits 0-4: fault code
//! - Bits 5-7: feedback type
//! - Bytes 1-4: speed, IEEE-754 `f32`, big-endian
//! - Bytes 5-6: phase current, `i16` in 0.01 A, big-endian
//! - Byte 7: motor temperature, `(raw - 50) / 2` degrees C
//!
//! Speed and current are multiplied by the inversion factor when crossing the
//! wire in either direction. Stored values are always in the caller's frame.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, trace, warn};

use crate::bitfield::{payload_from_word, word_from_payload};
use crate::config::{ChannelConfig, DEFAULT_TIMEOUT_MS};
use crate::error::{RmdError, RmdResult};
use crate::frame::{CAN_MAX_DLC, CanFrame};
use crate::layout::{rx, tx};
use crate::types::{CommandType, ErrorFeedback, FeedbackType};
use crate::watchdog::FeedbackWatchdog;

/// Phase current resolution in amps per count.
pub const CURRENT_SCALE: f64 = 0.01;

/// Raw temperature reading that corresponds to 0 degrees C.
pub const TEMPERATURE_OFFSET: f32 = 50.0;

/// Raw temperature counts per degree C.
pub const TEMPERATURE_DIVISOR: f32 = 2.0;

/// Current threshold value that disables the limit.
pub const CURRENT_THRESHOLD_DISABLED: u16 = u16::MAX;

/// Phase current in amps from raw counts.
///
/// The sign is applied in `f32` and the scaling in `f64`, then narrowed once.
#[inline]
fn scale_current(counts: i16, inversion_factor: f32) -> f32 {
    (f64::from(f32::from(counts) * inversion_factor) * CURRENT_SCALE) as f32
}

/// Physical readings from the last accepted feedback frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedbackState {
    pub speed: f32,
    pub position: f32,
    pub current: f32,
    pub motor_temperature: f32,
    pub error: ErrorFeedback,
}

/// One RMD-X8 actuator on the bus.
///
/// The channel holds no locks; callers sharing it across threads must
/// serialize access themselves.
#[derive(Debug, Clone)]
pub struct ActuatorChannel {
    id: u32,
    inversion_factor: f32,
    speed_cmd: f32,
    current_cmd: u32,
    current_threshold: u16,
    feedback: FeedbackState,
    watchdog: FeedbackWatchdog,
}

impl ActuatorChannel {
    pub fn new(id: u32, timeout: Duration, invert: bool) -> Self {
        Self {
            id,
            inversion_factor: if invert { -1.0 } else { 1.0 },
            speed_cmd: 0.0,
            current_cmd: 0,
            current_threshold: CURRENT_THRESHOLD_DISABLED,
            feedback: FeedbackState::default(),
            watchdog: FeedbackWatchdog::new(timeout),
        }
    }

    /// Channel with the drive's default 500 ms timeout and no inversion.
    pub fn with_default_timeout(id: u32) -> Self {
        Self::new(id, Duration::from_millis(DEFAULT_TIMEOUT_MS), false)
    }

    /// Validate `config` and build a channel from it.
    ///
    /// # Errors
    ///
    /// Returns [`RmdError::InvalidConfiguration`] if validation fails.
    pub fn from_config(config: &ChannelConfig) -> RmdResult<Self> {
        config.validate()?;
        Ok(Self::new(config.id, config.timeout(), config.invert))
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn timeout(&self) -> Duration {
        self.watchdog.timeout()
    }

    pub fn is_inverted(&self) -> bool {
        self.inversion_factor < 0.0
    }

    pub fn inversion_factor(&self) -> f32 {
        self.inversion_factor
    }

    /// Target speed in the caller's frame.
    pub fn set_speed_command(&mut self, speed: f32) {
        self.speed_cmd = speed;
    }

    pub fn speed_command(&self) -> f32 {
        self.speed_cmd
    }

    /// Raw current command. Only carried by current-mode frames.
    pub fn set_current_command(&mut self, current: u32) {
        self.current_cmd = current;
    }

    pub fn current_command(&self) -> u32 {
        self.current_cmd
    }

    pub fn set_current_threshold(&mut self, threshold: u16) {
        self.current_threshold = threshold;
    }

    pub fn current_threshold(&self) -> u16 {
        self.current_threshold
    }

    /// Build a command frame for the current command state.
    ///
    /// Returns `None` for command types other than [`CommandType::Velocity`].
    /// The feedback type is truncated to its 2-bit wire field.
    pub fn encode(&self, command: CommandType, feedback: FeedbackType) -> Option<CanFrame> {
        if command != CommandType::Velocity {
            debug!(
                id = self.id,
                ?command,
                "command type not supported by encoder"
            );
            return None;
        }

        let mut word = 0u64;
        tx::COMMAND_TYPE.write(&mut word, u64::from(command.to_u8()));
        tx::FEEDBACK_TYPE.write(&mut word, u64::from(feedback.to_u8()));

        let speed = self.speed_cmd * self.inversion_factor;
        tx::SPEED_COMMAND.write(&mut word, u64::from(speed.to_bits()));
        tx::CURRENT_THRESHOLD.write(&mut word, u64::from(self.current_threshold));

        let frame = CanFrame::new_data(self.id, payload_from_word(word), tx::FRAME_LEN);
        trace!(id = self.id, speed, data = ?frame.data(), "encoded velocity command");
        Some(frame)
    }

    /// Velocity command requesting velocity feedback.
    pub fn encode_velocity(&self) -> Option<CanFrame> {
        self.encode(CommandType::Velocity, FeedbackType::Velocity)
    }

    /// Decode a feedback payload received at `received_at`.
    ///
    /// State is only updated when the whole frame is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`RmdError::UnsupportedFeedbackType`] if the frame carries a
    /// feedback type other than [`FeedbackType::Velocity`].
    pub fn decode(&mut self, data: &[u8; CAN_MAX_DLC], received_at: Duration) -> RmdResult<()> {
        let word = word_from_payload(data);

        // Both casts below are lossless: fields are masked to their width.
        let feedback_type = rx::FEEDBACK_TYPE.read(word) as u8;
        match FeedbackType::from_u8(feedback_type) {
            Some(FeedbackType::Velocity) => {}
            kind => {
                debug!(
                    id = self.id,
                    feedback_type,
                    ?kind,
                    "feedback type not supported by decoder"
                );
                return Err(RmdError::UnsupportedFeedbackType(feedback_type));
            }
        }

        let error = ErrorFeedback::from_u8(rx::ERROR_CODE.read(word) as u8);
        if let ErrorFeedback::Unknown(code) = error {
            warn!(id = self.id, code, "drive reported an unknown fault code");
        }

        let speed_bits = rx::SPEED_FEEDBACK.read(word) as u32;
        let speed = f32::from_bits(speed_bits) * self.inversion_factor;

        let current_counts = rx::CURRENT_FEEDBACK.read(word) as u16 as i16;
        let current = scale_current(current_counts, self.inversion_factor);

        let raw_temperature = rx::MOTOR_TEMPERATURE.read(word) as u8;
        let motor_temperature =
            (f32::from(raw_temperature) - TEMPERATURE_OFFSET) / TEMPERATURE_DIVISOR;

        self.feedback = FeedbackState {
            speed,
            position: self.feedback.position,
            current,
            motor_temperature,
            error,
        };
        self.watchdog.record(received_at);

        trace!(
            id = self.id,
            speed,
            current,
            motor_temperature,
            %error,
            "decoded velocity feedback"
        );
        Ok(())
    }

    /// Decode the payload of a received frame.
    ///
    /// The frame identifier is not checked; routing frames to the right
    /// channel is the transport's job.
    ///
    /// # Errors
    ///
    /// See [`ActuatorChannel::decode`].
    pub fn decode_frame(&mut self, frame: &CanFrame, received_at: Duration) -> RmdResult<()> {
        self.decode(frame.data(), received_at)
    }

    /// Decode a payload delivered as a slice.
    ///
    /// # Errors
    ///
    /// Returns [`RmdError::InvalidLength`] unless `data` is exactly
    /// [`CAN_MAX_DLC`] bytes, otherwise see [`ActuatorChannel::decode`].
    pub fn decode_bytes(&mut self, data: &[u8], received_at: Duration) -> RmdResult<()> {
        let Ok(payload) = <&[u8; CAN_MAX_DLC]>::try_from(data) else {
            return Err(RmdError::InvalidLength {
                expected: CAN_MAX_DLC,
                actual: data.len(),
            });
        };
        self.decode(payload, received_at)
    }

    /// Returns `true` if no feedback was accepted within the timeout at `now`.
    pub fn is_stale(&self, now: Duration) -> bool {
        self.watchdog.is_stale(now)
    }

    pub fn time_since_feedback(&self, now: Duration) -> Option<Duration> {
        self.watchdog.time_since_feedback(now)
    }

    /// Receipt time of the last accepted feedback frame.
    pub fn feedback_time(&self) -> Duration {
        self.watchdog.last_feedback()
    }

    pub fn feedback(&self) -> FeedbackState {
        self.feedback
    }

    pub fn speed_feedback(&self) -> f32 {
        self.feedback.speed
    }

    /// Always zero in velocity mode; the frame carries no position.
    pub fn position_feedback(&self) -> f32 {
        self.feedback.position
    }

    pub fn current_feedback(&self) -> f32 {
        self.feedback.current
    }

    pub fn motor_temperature(&self) -> f32 {
        self.feedback.motor_temperature
    }

    pub fn error_feedback(&self) -> ErrorFeedback {
        self.feedback.error
    }
}
