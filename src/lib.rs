//! Panel models for UC81xx-class e-paper displays
//!
//! A [`Model`](model::Model) describes one panel: its name, native resolution, default
//! wiring and the command groups needed to bring it up. The command groups are plain
//! data; [`DisplayInterface`](interface::DisplayInterface) replays them over
//! [`embedded-hal`] SPI.
//!
//! [`embedded-hal`]: https://docs.rs/embedded-hal/1.0.0
//!
//! # Requirements
//!
//! ### SPI
//!
//! - MISO is not connected/available
//! - SPI_MODE_0 is used (CPHL = 0, CPOL = 0)
//! - 8 bits per word, MSB first
//!
//! ### Replay
//!
//! - The first byte of each group is the opcode and goes out with DC low
//! - The remaining bytes are parameters and go out with DC high
//! - The busy line is waited on after every group unless the group opts out
//!
//! # Examples
//!
//! ```
//! use epd_models::prelude::*;
//!
//! let registry = Registry::builtin()?;
//! let model = registry.get("inkplate2")?;
//!
//! let config = Config::new().height(256);
//! assert_eq!(model.dimensions(&config)?, Dimensions::new(104, 256));
//!
//! let sequence = model.init_sequence(&config)?;
//! assert_eq!(sequence[0].as_bytes(), &[0x04]);
//! assert_eq!(sequence[2].as_bytes(), &[0x61, 104, 0x01, 0x00]);
//! # Ok::<(), epd_models::error::Error>(())
//! ```
#![no_std]

pub mod color;
pub mod config;
pub mod error;
pub mod interface;
pub mod model;
pub mod registry;
pub mod sequence;

mod traits;

pub(crate) mod uc81xx;

pub mod epd2in13bc;
pub mod epd7in3f;
pub mod epd7in5_v2;
pub mod inkplate2;

/// Includes everything important besides the panel-specific modules
pub mod prelude {
    pub use crate::color::ColorMode;
    pub use crate::config::{
        Config, Defaults, Dimensions, PinConfig, PinDescriptor, PinMode, PinOption,
        ResolvedConfig,
    };
    pub use crate::error::{ConfigurationError, Error, RegistryError};
    pub use crate::model::{Model, Panel};
    pub use crate::registry::Registry;
    pub use crate::sequence::{CommandGroup, CommandSequence};
    pub use crate::SPI_MODE;
}

use embedded_hal::spi::{Mode, Phase, Polarity};

/// SPI mode -
/// For more infos see [Requirements: SPI](index.html#spi)
pub const SPI_MODE: Mode = Mode {
    phase: Phase::CaptureOnFirstTransition,
    polarity: Polarity::IdleLow,
};
