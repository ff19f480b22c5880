//! Panel models: the contract every supported panel satisfies
//!
//! A [`Model`] is an immutable descriptor: a registry name, a [`Panel`] family tag,
//! default dimensions and default pin wiring. All methods are pure functions of the
//! model and the caller's [`Config`]; overrides never mutate the model.
//!
//! # Example
//!
//! ```
//! use epd_models::prelude::*;
//!
//! let model = Model::new("inkplate2", Panel::Inkplate2);
//! let config = Config::new();
//!
//! assert_eq!(model.dimensions(&config)?, Dimensions::new(104, 212));
//!
//! let sequence = model.init_sequence(&config)?;
//! assert_eq!(sequence[0].as_bytes(), &[0x04]);
//! assert_eq!(sequence[2].as_bytes(), &[0x61, 104, 0x00, 0xD4]);
//! # Ok::<(), epd_models::error::Error>(())
//! ```

use log::{debug, warn};

use crate::color::ColorMode;
use crate::config::{Config, Defaults, Dimensions, PinConfig, PinOption, ResolvedConfig};
use crate::epd2in13bc::Epd2in13bc;
use crate::epd7in3f::Epd7in3f;
use crate::epd7in5_v2::Epd7in5V2;
use crate::error::{ConfigurationError, Error, SequenceError};
use crate::inkplate2::Inkplate2;
use crate::sequence::CommandSequence;
use crate::traits::PanelVariant;

/// Supported panel families
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Panel {
    /// Soldered Inkplate 2, see [`inkplate2`](crate::inkplate2)
    Inkplate2,
    /// Waveshare 2.13" (B/C), see [`epd2in13bc`](crate::epd2in13bc)
    Epd2in13bc,
    /// Waveshare 7.5" (V2), see [`epd7in5_v2`](crate::epd7in5_v2)
    Epd7in5V2,
    /// Waveshare 7.3" (F), see [`epd7in3f`](crate::epd7in3f)
    Epd7in3f,
}

/// Expands to `$body` with `$variant` bound to the marker type of `$panel`
macro_rules! dispatch {
    ($panel:expr, $variant:ident => $body:expr) => {
        match $panel {
            Panel::Inkplate2 => {
                type $variant = Inkplate2;
                $body
            }
            Panel::Epd2in13bc => {
                type $variant = Epd2in13bc;
                $body
            }
            Panel::Epd7in5V2 => {
                type $variant = Epd7in5V2;
                $body
            }
            Panel::Epd7in3f => {
                type $variant = Epd7in3f;
                $body
            }
        }
    };
}

impl Panel {
    /// Every supported family
    pub const ALL: [Panel; 4] = [
        Panel::Inkplate2,
        Panel::Epd2in13bc,
        Panel::Epd7in5V2,
        Panel::Epd7in3f,
    ];

    /// Registry name of the stock model
    pub const fn name(self) -> &'static str {
        dispatch!(self, V => V::NAME)
    }

    /// Native dimensions
    pub const fn native_dimensions(self) -> Dimensions {
        dispatch!(self, V => Dimensions::new(V::WIDTH, V::HEIGHT))
    }

    /// Largest dimensions the resolution command can encode
    pub const fn max_dimensions(self) -> Dimensions {
        dispatch!(self, V => V::MAX_DIMENSIONS)
    }

    /// Frame memory layout
    pub const fn color_mode(self) -> ColorMode {
        dispatch!(self, V => V::COLOR_MODE)
    }

    /// Stock pin wiring
    pub const fn defaults(self) -> Defaults {
        dispatch!(self, V => V::DEFAULTS)
    }

    /// Data start opcode of each frame plane, in transfer order
    pub const fn frame_opcodes(self) -> &'static [u8] {
        dispatch!(self, V => V::FRAME_OPCODES)
    }

    fn init_sequence(self, dimensions: Dimensions) -> Result<CommandSequence, SequenceError> {
        dispatch!(self, V => V::init_sequence(dimensions))
    }

    fn power_on_sequence(self) -> Result<CommandSequence, SequenceError> {
        dispatch!(self, V => V::power_on_sequence())
    }

    fn refresh_sequence(self) -> Result<CommandSequence, SequenceError> {
        dispatch!(self, V => V::refresh_sequence())
    }

    fn sleep_sequence(self) -> Result<CommandSequence, SequenceError> {
        dispatch!(self, V => V::sleep_sequence())
    }
}

/// An immutable panel descriptor
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Model {
    name: &'static str,
    panel: Panel,
    width: u32,
    height: u32,
    defaults: Defaults,
}

impl Model {
    /// A model for `panel` with the family's native dimensions and stock wiring
    pub const fn new(name: &'static str, panel: Panel) -> Self {
        let dimensions = panel.native_dimensions();
        Model {
            name,
            panel,
            width: dimensions.width,
            height: dimensions.height,
            defaults: panel.defaults(),
        }
    }

    /// Replace the default dimensions
    ///
    /// Not validated here; [`Model::dimensions`] checks whatever ends up active.
    pub const fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Replace the default pin wiring
    pub const fn with_defaults(mut self, defaults: Defaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Replace the default for a single pin
    pub fn with_pin(mut self, option: PinOption, pin: Option<PinConfig>) -> Self {
        match option {
            PinOption::Reset => self.defaults.reset_pin = pin,
            PinOption::Dc => self.defaults.dc_pin = pin,
            PinOption::Cs => self.defaults.cs_pin = pin,
            PinOption::Busy => self.defaults.busy_pin = pin,
        }
        self
    }

    /// Registry name
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Panel family
    pub const fn panel(&self) -> Panel {
        self.panel
    }

    /// Default width in pixels
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Default height in pixels
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Default pin wiring
    pub const fn defaults(&self) -> &Defaults {
        &self.defaults
    }

    /// Frame memory layout
    pub const fn color_mode(&self) -> ColorMode {
        self.panel.color_mode()
    }

    /// Active dimensions: the overrides in `config`, falling back to the model defaults
    /// per axis
    ///
    /// Fails if either axis is zero or doesn't fit the panel's resolution encoding.
    /// Values are never clamped.
    pub fn dimensions(&self, config: &Config) -> Result<Dimensions, ConfigurationError> {
        let dimensions = Dimensions::new(
            config.width.unwrap_or(self.width),
            config.height.unwrap_or(self.height),
        );
        dimensions
            .check(self.panel.max_dimensions())
            .inspect_err(|err| warn!("{}: {}", self.name, err))
    }

    /// Bring-up sequence, in the order this panel family requires
    ///
    /// The busy line has to settle after each group before the next one is sent.
    /// Dimensions embedded in the sequence come from [`Model::dimensions`].
    pub fn init_sequence(&self, config: &Config) -> Result<CommandSequence, Error> {
        let dimensions = self.dimensions(config)?;
        let sequence = self.panel.init_sequence(dimensions)?;
        debug!(
            "{}: init sequence for {}x{}, {} groups",
            self.name,
            dimensions.width,
            dimensions.height,
            sequence.len()
        );
        Ok(sequence)
    }

    /// Groups that power the panel before a refresh; empty if init already did
    pub fn power_on_sequence(&self) -> Result<CommandSequence, Error> {
        Ok(self.panel.power_on_sequence()?)
    }

    /// Groups that latch the transferred frame onto the panel
    ///
    /// Sent after the frame planes. Groups marked
    /// [`without_busy_wait`](crate::sequence::CommandGroup::without_busy_wait) are
    /// followed by the next group immediately.
    pub fn refresh_sequence(&self) -> Result<CommandSequence, Error> {
        Ok(self.panel.refresh_sequence()?)
    }

    /// Data start opcode for frame plane `plane`, `None` past the last plane
    ///
    /// ```
    /// use epd_models::prelude::*;
    ///
    /// let model = Model::new("inkplate2", Panel::Inkplate2);
    /// assert_eq!(model.plane_opcode(0), Some(0x10));
    /// assert_eq!(model.plane_opcode(1), Some(0x13));
    /// assert_eq!(model.plane_opcode(2), None);
    /// ```
    pub fn plane_opcode(&self, plane: usize) -> Option<u8> {
        self.panel.frame_opcodes().get(plane).copied()
    }

    /// Groups that power the panel off and enter deep sleep
    pub fn sleep_sequence(&self) -> Result<CommandSequence, Error> {
        Ok(self.panel.sleep_sequence()?)
    }

    /// Default for `option`, `None` if the panel has no opinion
    pub const fn default_option(&self, option: PinOption) -> Option<PinConfig> {
        self.defaults.pin(option)
    }

    /// Default for the option named `key`, or `fallback`
    ///
    /// Unknown keys and options without a default both return `fallback`.
    ///
    /// ```
    /// use epd_models::prelude::*;
    ///
    /// let model = Model::new("inkplate2", Panel::Inkplate2);
    /// assert_eq!(model.get_default("reset_pin", None), Some(PinConfig::Number(19)));
    /// assert_eq!(
    ///     model.get_default("nonexistent_key", Some(PinConfig::Number(0))),
    ///     Some(PinConfig::Number(0))
    /// );
    /// ```
    pub fn get_default(&self, key: &str, fallback: Option<PinConfig>) -> Option<PinConfig> {
        PinOption::from_key(key)
            .and_then(|option| self.default_option(option))
            .or(fallback)
    }

    /// Merge `config` over the model defaults and validate the result
    pub fn resolve(&self, config: &Config) -> Result<ResolvedConfig, ConfigurationError> {
        let resolve_pin = |option: PinOption| {
            config
                .pin(option)
                .or(self.default_option(option))
                .map(|pin| pin.validate(option))
                .transpose()
                .inspect_err(|err| warn!("{}: {}", self.name, err))
        };

        Ok(ResolvedConfig {
            dimensions: self.dimensions(config)?,
            reset_pin: resolve_pin(PinOption::Reset)?,
            dc_pin: resolve_pin(PinOption::Dc)?,
            cs_pin: resolve_pin(PinOption::Cs)?,
            busy_pin: resolve_pin(PinOption::Busy)?,
        })
    }

    /// Bytes of frame data for the active dimensions
    pub fn buffer_len(&self, config: &Config) -> Result<usize, ConfigurationError> {
        self.color_mode()
            .buffer_len(self.dimensions(config)?)
            .inspect_err(|err| warn!("{}: {}", self.name, err))
    }
}

impl From<Panel> for Model {
    /// The stock model of a family, registered under [`Panel::name`]
    fn from(panel: Panel) -> Self {
        Model::new(panel.name(), panel)
    }
}
