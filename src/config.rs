//! Configuration overrides, pin descriptors and resolved dimensions
//!
//! A [`Config`] carries the caller's per-display overrides. Every field is
//! optional: `None` means "use the model's default", never "invalid".
//! Values are validated lazily by the [`Model`](crate::model::Model) accessor
//! that consumes them.

use core::fmt::{Display, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Highest GPIO number accepted for a pin assignment
///
/// Matches the largest pin count across the supported controller boards (ESP32-S3).
pub const MAX_GPIO: u8 = 48;

/// Dimension axis, used to report which override was rejected
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Horizontal pixel count
    Width,
    /// Vertical pixel count
    Height,
}

impl Display for Axis {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Axis::Width => write!(f, "width"),
            Axis::Height => write!(f, "height"),
        }
    }
}

/// Active pixel dimensions of a panel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Dimensions {
    /// Construct new dimensions
    pub const fn new(width: u32, height: u32) -> Self {
        Dimensions { width, height }
    }

    /// Number of pixels covered
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Check both axes against `max`
    ///
    /// Zero is rejected on either axis, as is anything larger than the matching axis of `max`.
    pub fn check(self, max: Dimensions) -> Result<Self, ConfigurationError> {
        check_axis(Axis::Width, self.width, max.width)?;
        check_axis(Axis::Height, self.height, max.height)?;
        Ok(self)
    }
}

fn check_axis(axis: Axis, value: u32, max: u32) -> Result<(), ConfigurationError> {
    if value == 0 {
        return Err(ConfigurationError::InvalidDimension { axis, value });
    }
    if value > max {
        return Err(ConfigurationError::DimensionOutOfRange { axis, value, max });
    }
    Ok(())
}

impl From<Dimensions> for (u32, u32) {
    fn from(dimensions: Dimensions) -> Self {
        (dimensions.width, dimensions.height)
    }
}

#[cfg(feature = "graphics")]
impl From<Dimensions> for embedded_graphics_core::geometry::Size {
    fn from(dimensions: Dimensions) -> Self {
        embedded_graphics_core::geometry::Size::new(dimensions.width, dimensions.height)
    }
}

/// Hardware wiring options a model can carry a default for
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinOption {
    /// Reset line
    Reset,
    /// Data/command select line
    Dc,
    /// Chip select line
    Cs,
    /// Busy input
    Busy,
}

impl PinOption {
    /// Every pin option, in the order drivers usually claim them
    pub const ALL: [PinOption; 4] = [
        PinOption::Reset,
        PinOption::Dc,
        PinOption::Cs,
        PinOption::Busy,
    ];

    /// The option key, e.g. `busy_pin`
    pub const fn key(self) -> &'static str {
        match self {
            PinOption::Reset => "reset_pin",
            PinOption::Dc => "dc_pin",
            PinOption::Cs => "cs_pin",
            PinOption::Busy => "busy_pin",
        }
    }

    /// Parse an option key, returning `None` for keys no model knows about
    pub fn from_key(key: &str) -> Option<Self> {
        PinOption::ALL.into_iter().find(|option| option.key() == key)
    }
}

impl Display for PinOption {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.key())
    }
}

/// Electrical configuration of a GPIO
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PinMode {
    /// Configure as input
    pub input: bool,
    /// Configure as output
    pub output: bool,
    /// Enable the internal pull-up
    pub pullup: bool,
    /// Enable the internal pull-down
    pub pulldown: bool,
    /// Open-drain output
    pub open_drain: bool,
}

impl PinMode {
    /// Plain input
    pub const INPUT: PinMode = PinMode {
        input: true,
        output: false,
        pullup: false,
        pulldown: false,
        open_drain: false,
    };

    /// Input with the internal pull-up enabled
    pub const INPUT_PULLUP: PinMode = PinMode {
        pullup: true,
        ..PinMode::INPUT
    };

    /// Plain push-pull output
    pub const OUTPUT: PinMode = PinMode {
        input: false,
        output: true,
        pullup: false,
        pulldown: false,
        open_drain: false,
    };
}

/// Structured pin assignment
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinDescriptor {
    /// GPIO number
    pub number: u8,
    /// Flip the logical level, e.g. a busy line that reads LOW while busy
    #[cfg_attr(feature = "serde", serde(default))]
    pub inverted: bool,
    /// Electrical configuration
    #[cfg_attr(feature = "serde", serde(default))]
    pub mode: PinMode,
}

/// A pin assignment: either a bare GPIO number or a full descriptor
///
/// With the `serde` feature this reads and writes either an integer or a
/// [`PinDescriptor`] map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinConfig {
    /// Just the GPIO number, non-inverted with the driver's default mode
    Number(u8),
    /// Number, polarity and mode
    Descriptor(PinDescriptor),
}

impl PinConfig {
    /// GPIO number
    pub const fn number(&self) -> u8 {
        match self {
            PinConfig::Number(number) => *number,
            PinConfig::Descriptor(descriptor) => descriptor.number,
        }
    }

    /// Whether the logical level is flipped. A bare number is never inverted.
    pub const fn inverted(&self) -> bool {
        match self {
            PinConfig::Number(_) => false,
            PinConfig::Descriptor(descriptor) => descriptor.inverted,
        }
    }

    /// Explicit mode, if one was given
    pub const fn mode(&self) -> Option<PinMode> {
        match self {
            PinConfig::Number(_) => None,
            PinConfig::Descriptor(descriptor) => Some(descriptor.mode),
        }
    }

    /// Check the number and mode of a pin supplied for `option`
    pub fn validate(self, option: PinOption) -> Result<Self, ConfigurationError> {
        let number = self.number();
        if number > MAX_GPIO {
            return Err(ConfigurationError::InvalidPin { option, number });
        }
        if let Some(mode) = self.mode() {
            if mode.pullup && mode.pulldown {
                return Err(ConfigurationError::ConflictingPinMode { option });
            }
        }
        Ok(self)
    }
}

#[cfg(feature = "serde")]
impl Serialize for PinConfig {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PinConfig::Number(number) => serializer.serialize_u8(*number),
            PinConfig::Descriptor(descriptor) => descriptor.serialize(serializer),
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for PinConfig {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PinConfigVisitor)
    }
}

/// Integer or map, without buffering the input
#[cfg(feature = "serde")]
struct PinConfigVisitor;

#[cfg(feature = "serde")]
impl<'de> serde::de::Visitor<'de> for PinConfigVisitor {
    type Value = PinConfig;

    fn expecting(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str("a GPIO number or a pin descriptor")
    }

    fn visit_u64<E: serde::de::Error>(self, value: u64) -> Result<PinConfig, E> {
        u8::try_from(value)
            .map(PinConfig::Number)
            .map_err(|_| E::invalid_value(serde::de::Unexpected::Unsigned(value), &self))
    }

    fn visit_i64<E: serde::de::Error>(self, value: i64) -> Result<PinConfig, E> {
        u8::try_from(value)
            .map(PinConfig::Number)
            .map_err(|_| E::invalid_value(serde::de::Unexpected::Signed(value), &self))
    }

    fn visit_map<A: serde::de::MapAccess<'de>>(self, map: A) -> Result<PinConfig, A::Error> {
        PinDescriptor::deserialize(serde::de::value::MapAccessDeserializer::new(map))
            .map(PinConfig::Descriptor)
    }
}

impl From<u8> for PinConfig {
    fn from(number: u8) -> Self {
        PinConfig::Number(number)
    }
}

impl From<PinDescriptor> for PinConfig {
    fn from(descriptor: PinDescriptor) -> Self {
        PinConfig::Descriptor(descriptor)
    }
}

/// Pin assignments a model ships with
///
/// A `None` field means the panel has no opinion on that pin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Defaults {
    /// Reset line
    pub reset_pin: Option<PinConfig>,
    /// Data/command select line
    pub dc_pin: Option<PinConfig>,
    /// Chip select line
    pub cs_pin: Option<PinConfig>,
    /// Busy input
    pub busy_pin: Option<PinConfig>,
}

impl Defaults {
    /// No defaults at all
    pub const NONE: Defaults = Defaults {
        reset_pin: None,
        dc_pin: None,
        cs_pin: None,
        busy_pin: None,
    };

    /// Default for `option`
    pub const fn pin(&self, option: PinOption) -> Option<PinConfig> {
        match option {
            PinOption::Reset => self.reset_pin,
            PinOption::Dc => self.dc_pin,
            PinOption::Cs => self.cs_pin,
            PinOption::Busy => self.busy_pin,
        }
    }
}

/// Per-display overrides supplied by the caller
///
/// # Example
///
/// ```
/// use epd_models::config::{Config, PinOption};
///
/// let config = Config::new().height(256).busy_pin(4);
/// assert_eq!(config.width, None);
/// assert_eq!(config.pin(PinOption::Busy).map(|pin| pin.number()), Some(4));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Width override in pixels
    pub width: Option<u32>,
    /// Height override in pixels
    pub height: Option<u32>,
    /// Reset line override
    pub reset_pin: Option<PinConfig>,
    /// Data/command select override
    pub dc_pin: Option<PinConfig>,
    /// Chip select override
    pub cs_pin: Option<PinConfig>,
    /// Busy input override
    pub busy_pin: Option<PinConfig>,
}

impl Config {
    /// A config without overrides
    pub const fn new() -> Self {
        Config {
            width: None,
            height: None,
            reset_pin: None,
            dc_pin: None,
            cs_pin: None,
            busy_pin: None,
        }
    }

    /// Override the width
    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    /// Override the height
    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    /// Override the reset line
    pub fn reset_pin(mut self, pin: impl Into<PinConfig>) -> Self {
        self.reset_pin = Some(pin.into());
        self
    }

    /// Override the data/command line
    pub fn dc_pin(mut self, pin: impl Into<PinConfig>) -> Self {
        self.dc_pin = Some(pin.into());
        self
    }

    /// Override the chip select line
    pub fn cs_pin(mut self, pin: impl Into<PinConfig>) -> Self {
        self.cs_pin = Some(pin.into());
        self
    }

    /// Override the busy input
    pub fn busy_pin(mut self, pin: impl Into<PinConfig>) -> Self {
        self.busy_pin = Some(pin.into());
        self
    }

    /// Override for `option`, if any
    pub const fn pin(&self, option: PinOption) -> Option<PinConfig> {
        match option {
            PinOption::Reset => self.reset_pin,
            PinOption::Dc => self.dc_pin,
            PinOption::Cs => self.cs_pin,
            PinOption::Busy => self.busy_pin,
        }
    }
}

/// Model defaults merged with the caller's overrides, all validated
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Active dimensions
    pub dimensions: Dimensions,
    /// Reset line
    pub reset_pin: Option<PinConfig>,
    /// Data/command select line
    pub dc_pin: Option<PinConfig>,
    /// Chip select line
    pub cs_pin: Option<PinConfig>,
    /// Busy input
    pub busy_pin: Option<PinConfig>,
}

impl ResolvedConfig {
    /// Resolved pin for `option`
    pub const fn pin(&self, option: PinOption) -> Option<PinConfig> {
        match option {
            PinOption::Reset => self.reset_pin,
            PinOption::Dc => self.dc_pin,
            PinOption::Cs => self.cs_pin,
            PinOption::Busy => self.busy_pin,
        }
    }

    /// Whether the panel signals busy by pulling the busy line LOW
    pub fn busy_is_low(&self) -> bool {
        self.busy_pin.is_some_and(|pin| pin.inverted())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_bounds() {
        let max = Dimensions::new(255, 65535);
        assert_eq!(Dimensions::new(104, 212).check(max), Ok(Dimensions::new(104, 212)));
        assert_eq!(
            Dimensions::new(104, 0).check(max),
            Err(ConfigurationError::InvalidDimension {
                axis: Axis::Height,
                value: 0
            })
        );
        assert_eq!(
            Dimensions::new(256, 212).check(max),
            Err(ConfigurationError::DimensionOutOfRange {
                axis: Axis::Width,
                value: 256,
                max: 255
            })
        );
        assert_eq!(Dimensions::new(255, 65535).check(max), Ok(max));
    }

    #[test]
    fn option_keys() {
        for option in PinOption::ALL {
            assert_eq!(PinOption::from_key(option.key()), Some(option));
        }
        assert_eq!(PinOption::from_key("nonexistent_key"), None);
        assert_eq!(PinOption::from_key("width"), None);
    }

    #[test]
    fn bare_number_is_not_inverted() {
        let pin = PinConfig::from(19);
        assert_eq!(pin.number(), 19);
        assert!(!pin.inverted());
        assert_eq!(pin.mode(), None);
    }

    #[test]
    fn pin_validation() {
        assert!(PinConfig::Number(MAX_GPIO).validate(PinOption::Dc).is_ok());
        assert_eq!(
            PinConfig::Number(MAX_GPIO + 1).validate(PinOption::Dc),
            Err(ConfigurationError::InvalidPin {
                option: PinOption::Dc,
                number: MAX_GPIO + 1
            })
        );

        let floating = PinConfig::Descriptor(PinDescriptor {
            number: 4,
            inverted: false,
            mode: PinMode {
                pulldown: true,
                ..PinMode::INPUT_PULLUP
            },
        });
        assert_eq!(
            floating.validate(PinOption::Busy),
            Err(ConfigurationError::ConflictingPinMode {
                option: PinOption::Busy
            })
        );
    }

    #[test]
    fn builder_sets_only_given_fields() {
        let config = Config::new().width(128).cs_pin(5);
        assert_eq!(config.width, Some(128));
        assert_eq!(config.height, None);
        assert_eq!(config.pin(PinOption::Cs), Some(PinConfig::Number(5)));
        assert_eq!(config.pin(PinOption::Reset), None);
        assert_eq!(Config::new(), Config::default());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn busy_pin_from_toml() {
        let config: Config = toml::from_str("busy_pin = 24").unwrap();
        assert_eq!(config.busy_pin, Some(PinConfig::Number(24)));
        assert_eq!(config.width, None);

        let config: Config = toml::from_str(
            r#"
            height = 256

            [busy_pin]
            number = 32
            inverted = true
            mode = { input = true, pullup = true }
            "#,
        )
        .unwrap();
        assert_eq!(config.height, Some(256));
        assert_eq!(
            config.busy_pin,
            Some(PinConfig::Descriptor(PinDescriptor {
                number: 32,
                inverted: true,
                mode: PinMode::INPUT_PULLUP,
            }))
        );

        assert!(toml::from_str::<Config>("busy_pin = 300").is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn busy_pin_toml_round_trip() {
        let bare = Config::new().busy_pin(24);
        let descriptor = Config::new().busy_pin(PinDescriptor {
            number: 32,
            inverted: true,
            mode: PinMode::INPUT_PULLUP,
        });
        for config in [bare, descriptor] {
            let text = toml::to_string(&config).unwrap();
            assert_eq!(toml::from_str::<Config>(&text).unwrap(), config);
        }
    }

    #[cfg(feature = "graphics")]
    #[test]
    fn dimensions_to_size() {
        use embedded_graphics_core::geometry::Size;
        assert_eq!(Size::from(Dimensions::new(104, 212)), Size::new(104, 212));
    }
}
