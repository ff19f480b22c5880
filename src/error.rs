//! Error types
//!
//! - [`ConfigurationError`] - a malformed or out-of-range override in a [`Config`](crate::config::Config)
//! - [`RegistryError`] - lookup or registration failures on a [`Registry`](crate::registry::Registry)
//! - [`SequenceError`] - a command table that does not fit the fixed-capacity sequence types
//! - [`Error`] - wraps the three above so `?` composes across them
//! - [`ErrorKind`] - transport errors while replaying a sequence over SPI
//!
//! A missing default option is never an error: see [`Model::get_default`](crate::model::Model::get_default).

use core::fmt::{Debug, Display, Formatter};

use embedded_hal::{digital, spi};

use crate::config::{Axis, PinOption};

/// Invalid configuration values, raised by the accessor that needed them
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigurationError {
    /// A dimension that is zero
    InvalidDimension {
        /// Offending axis
        axis: Axis,
        /// Value that was supplied
        value: u32,
    },
    /// A dimension that doesn't fit the panel's resolution encoding
    DimensionOutOfRange {
        /// Offending axis
        axis: Axis,
        /// Value that was supplied
        value: u32,
        /// Largest value the encoding can carry
        max: u32,
    },
    /// A pin number above [`MAX_GPIO`](crate::config::MAX_GPIO)
    InvalidPin {
        /// Option the pin was supplied for
        option: PinOption,
        /// Pin number that was supplied
        number: u8,
    },
    /// A pin mode enabling both pull-up and pull-down
    ConflictingPinMode {
        /// Option the pin was supplied for
        option: PinOption,
    },
    /// A frame buffer for these dimensions can't be addressed on this target
    FrameTooLarge {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },
}

impl Display for ConfigurationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidDimension { axis, value } => {
                write!(f, "invalid {axis} {value}: must be greater than zero")
            }
            Self::DimensionOutOfRange { axis, value, max } => {
                write!(f, "{axis} {value} exceeds the resolution encoding (max {max})")
            }
            Self::InvalidPin { option, number } => write!(
                f,
                "{option}: GPIO{number} is not a valid controller pin (max GPIO{})",
                crate::config::MAX_GPIO
            ),
            Self::ConflictingPinMode { option } => {
                write!(f, "{option}: pull-up and pull-down can't both be enabled")
            }
            Self::FrameTooLarge { width, height } => {
                write!(f, "{width}x{height} frame buffer doesn't fit in memory")
            }
        }
    }
}

impl core::error::Error for ConfigurationError {}

/// Errors from the model registry
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegistryError {
    /// No model is registered under the requested name
    NotFound,
    /// A model with this name is already registered
    Duplicate(&'static str),
    /// The registry has no room for another model
    Full {
        /// Number of models the registry can hold
        capacity: usize,
    },
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "no model registered under that name"),
            Self::Duplicate(name) => write!(f, "model `{name}` is already registered"),
            Self::Full { capacity } => write!(f, "registry is full ({capacity} models)"),
        }
    }
}

impl core::error::Error for RegistryError {}

/// A command table that exceeds the fixed sequence capacity
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequenceError {
    /// Opcode plus parameters exceed [`MAX_GROUP_LEN`](crate::sequence::MAX_GROUP_LEN)
    GroupTooLong {
        /// Opcode of the offending group
        opcode: u8,
        /// Total length that was requested
        len: usize,
    },
    /// More groups than [`MAX_GROUPS`](crate::sequence::MAX_GROUPS)
    TooManyGroups,
}

impl Display for SequenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GroupTooLong { opcode, len } => write!(
                f,
                "command group 0x{opcode:02X} is {len} bytes (max {})",
                crate::sequence::MAX_GROUP_LEN
            ),
            Self::TooManyGroups => write!(
                f,
                "sequence exceeds {} command groups",
                crate::sequence::MAX_GROUPS
            ),
        }
    }
}

impl core::error::Error for SequenceError {}

/// Any error produced while querying a model
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// See [`ConfigurationError`]
    Configuration(ConfigurationError),
    /// See [`RegistryError`]
    Registry(RegistryError),
    /// See [`SequenceError`]
    Sequence(SequenceError),
}

impl From<ConfigurationError> for Error {
    fn from(err: ConfigurationError) -> Self {
        Error::Configuration(err)
    }
}

impl From<RegistryError> for Error {
    fn from(err: RegistryError) -> Self {
        Error::Registry(err)
    }
}

impl From<SequenceError> for Error {
    fn from(err: SequenceError) -> Self {
        Error::Sequence(err)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Configuration(err) => Display::fmt(err, f),
            Self::Registry(err) => Display::fmt(err, f),
            Self::Sequence(err) => Display::fmt(err, f),
        }
    }
}

impl core::error::Error for Error {}

/// Transport error while replaying command groups
pub enum ErrorKind<SPI, BUSY, DC>
where
    SPI: spi::ErrorType,
    BUSY: digital::ErrorType,
    DC: digital::ErrorType,
{
    /// Encountered an SPI error
    SpiError(SPI::Error),

    /// Encountered an error on Busy GPIO
    BusyError(BUSY::Error),

    /// Encountered an error on DC GPIO
    DcError(DC::Error),

    /// The busy line didn't settle within the configured number of polls
    BusyTimeout,
}

impl<SPI, BUSY, DC> Debug for ErrorKind<SPI, BUSY, DC>
where
    SPI: spi::ErrorType,
    BUSY: digital::ErrorType,
    DC: digital::ErrorType,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::SpiError(err) => f.debug_tuple("SpiError").field(err).finish(),
            Self::BusyError(err) => f.debug_tuple("BusyError").field(err).finish(),
            Self::DcError(err) => f.debug_tuple("DcError").field(err).finish(),
            Self::BusyTimeout => write!(f, "BusyTimeout"),
        }
    }
}

impl<SPI, BUSY, DC> Display for ErrorKind<SPI, BUSY, DC>
where
    SPI: spi::ErrorType,
    BUSY: digital::ErrorType,
    DC: digital::ErrorType,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::SpiError(err) => write!(f, "SPI error: {err:?}"),
            Self::BusyError(err) => write!(f, "busy pin error: {err:?}"),
            Self::DcError(err) => write!(f, "DC pin error: {err:?}"),
            Self::BusyTimeout => write!(f, "timed out waiting for the busy line"),
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;
    use std::string::ToString;

    use super::*;

    #[test]
    fn configuration_error_display() {
        let err = ConfigurationError::DimensionOutOfRange {
            axis: Axis::Height,
            value: 65536,
            max: 65535,
        };
        assert_eq!(
            err.to_string(),
            "height 65536 exceeds the resolution encoding (max 65535)"
        );

        let err = ConfigurationError::InvalidPin {
            option: PinOption::Busy,
            number: 99,
        };
        assert_eq!(
            err.to_string(),
            "busy_pin: GPIO99 is not a valid controller pin (max GPIO48)"
        );
    }

    #[test]
    fn error_wraps_sources() {
        let err: Error = RegistryError::NotFound.into();
        assert_eq!(err, Error::Registry(RegistryError::NotFound));
        assert_eq!(err.to_string(), "no model registered under that name");

        let err: Error = SequenceError::TooManyGroups.into();
        assert!(matches!(err, Error::Sequence(SequenceError::TooManyGroups)));
    }
}
