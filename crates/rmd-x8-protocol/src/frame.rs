//! CAN frame value exchanged with the transport.
//!
//! The codec never touches a socket; it hands these to whatever sends them
//! and accepts their payloads back. Command frames are always standard-id
//! (11-bit) data frames.

/// Maximum data length of a classic CAN frame.
pub const CAN_MAX_DLC: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanFrame {
    id: u32,
    dlc: u8,
    data: [u8; CAN_MAX_DLC],
}

impl CanFrame {
    /// Standard-id data frame carrying `data` with a declared length of `dlc`.
    ///
    /// `dlc` is clamped to [`CAN_MAX_DLC`].
    pub fn new_data(id: u32, data: [u8; CAN_MAX_DLC], dlc: u8) -> Self {
        Self {
            id,
            dlc: dlc.min(CAN_MAX_DLC as u8),
            data,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// Declared data length code.
    pub fn dlc(&self) -> u8 {
        self.dlc
    }

    /// Full 8-byte payload, including bytes beyond the declared length.
    pub fn data(&self) -> &[u8; CAN_MAX_DLC] {
        &self.data
    }
}
