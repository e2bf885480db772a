//! RMD-X8 frame layout tables.
//!
//! Offsets and lengths are in bits within the little-endian 64-bit frame
//! word. They are the wire contract with the drive and only change with a
//! protocol revision.

use crate::bitfield::{read_field, write_field};

/// Location of one field inside the frame word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitField {
    /// Field width in bits.
    pub length: u8,
    /// Position of the least significant bit.
    pub offset: u8,
    /// Big-endian multi-byte field.
    pub reversed: bool,
}

impl BitField {
    pub const fn new(length: u8, offset: u8, reversed: bool) -> Self {
        Self {
            length,
            offset,
            reversed,
        }
    }

    /// Word mask covering this field.
    pub const fn mask(self) -> u64 {
        let low = if self.length >= 64 {
            u64::MAX
        } else {
            (1u64 << self.length) - 1
        };
        low << self.offset
    }

    #[inline]
    pub fn read(self, word: u64) -> u64 {
        read_field(word, self.length, self.offset, self.reversed)
    }

    #[inline]
    pub fn write(self, word: &mut u64, value: u64) {
        write_field(word, value, self.length, self.offset, self.reversed);
    }
}

/// Command-direction fields (host to drive).
pub mod tx {
    use super::BitField;

    pub const COMMAND_TYPE: BitField = BitField::new(3, 5, false);
    pub const FEEDBACK_TYPE: BitField = BitField::new(2, 0, false);
    pub const SPEED_COMMAND: BitField = BitField::new(32, 8, true);
    pub const CURRENT_THRESHOLD: BitField = BitField::new(16, 40, true);

    pub const ALL: [BitField; 4] = [
        COMMAND_TYPE,
        FEEDBACK_TYPE,
        SPEED_COMMAND,
        CURRENT_THRESHOLD,
    ];

    /// Declared data length of a command frame.
    pub const FRAME_LEN: u8 = 7;
}

/// Feedback-direction fields (drive to host).
pub mod rx {
    use super::BitField;

    pub const FEEDBACK_TYPE: BitField = BitField::new(3, 5, false);
    pub const ERROR_CODE: BitField = BitField::new(5, 0, false);
    pub const SPEED_FEEDBACK: BitField = BitField::new(32, 8, true);
    pub const CURRENT_FEEDBACK: BitField = BitField::new(16, 40, true);
    pub const MOTOR_TEMPERATURE: BitField = BitField::new(8, 56, true);

    pub const ALL: [BitField; 5] = [
        FEEDBACK_TYPE,
        ERROR_CODE,
        SPEED_FEEDBACK,
        CURRENT_FEEDBACK,
        MOTOR_TEMPERATURE,
    ];
}
