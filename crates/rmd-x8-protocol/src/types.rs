//! RMD-X8 command, feedback and fault enumerations.

use serde::{Deserialize, Serialize};

/// Control mode requested by a command frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CommandType {
    PositionHybrid,
    Position,
    #[default]
    Velocity,
    Current,
}

impl CommandType {
    pub fn to_u8(self) -> u8 {
        match self {
            Self::PositionHybrid => 0,
            Self::Position => 1,
            Self::Velocity => 2,
            Self::Current => 3,
        }
    }
}

/// Quantity the drive reports back in its feedback frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FeedbackType {
    PositionAndVelocity,
    Position,
    #[default]
    Velocity,
    Configuration,
    Current,
}

impl FeedbackType {
    pub fn from_u8(val: u8) -> Option<Self> {
        match val {
            1 => Some(Self::PositionAndVelocity),
            2 => Some(Self::Position),
            3 => Some(Self::Velocity),
            4 => Some(Self::Configuration),
            5 => Some(Self::Current),
            _ => None,
        }
    }

    pub fn to_u8(self) -> u8 {
        match self {
            Self::PositionAndVelocity => 1,
            Self::Position => 2,
            Self::Velocity => 3,
            Self::Configuration => 4,
            Self::Current => 5,
        }
    }
}

/// Fault code reported in the low bits of a feedback frame.
///
/// Codes outside the documented range are kept verbatim in `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ErrorFeedback {
    #[default]
    None,
    Overheating,
    Overcurrent,
    LowVoltage,
    EncoderError,
    BrakeVoltageHigh,
    DrvError,
    Unknown(u8),
}

impl ErrorFeedback {
    pub fn from_u8(val: u8) -> Self {
        match val {
            0 => Self::None,
            1 => Self::Overheating,
            2 => Self::Overcurrent,
            3 => Self::LowVoltage,
            4 => Self::EncoderError,
            5 => Self::BrakeVoltageHigh,
            6 => Self::DrvError,
            other => Self::Unknown(other),
        }
    }

    pub fn to_u8(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Overheating => 1,
            Self::Overcurrent => 2,
            Self::LowVoltage => 3,
            Self::EncoderError => 4,
            Self::BrakeVoltageHigh => 5,
            Self::DrvError => 6,
            Self::Unknown(raw) => raw,
        }
    }

    /// True for anything other than `None`, including unknown codes.
    pub fn is_fault(self) -> bool {
        !matches!(self, Self::None)
    }
}

impl std::fmt::Display for ErrorFeedback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "no fault"),
            Self::Overheating => write!(f, "overheating"),
            Self::Overcurrent => write!(f, "overcurrent"),
            Self::LowVoltage => write!(f, "low voltage"),
            Self::EncoderError => write!(f, "encoder error"),
            Self::BrakeVoltageHigh => write!(f, "brake voltage high"),
            Self::DrvError => write!(f, "gate driver error"),
            Self::Unknown(raw) => write!(f, "unknown fault code {raw}"),
        }
    }
}
