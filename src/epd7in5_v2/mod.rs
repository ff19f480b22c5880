//! Model for the Waveshare 7.5" E-Ink Display (V2) via SPI
//!
//! # References
//!
//! - [Datasheet](https://www.waveshare.com/wiki/7.5inch_e-Paper_HAT)
//! - [Waveshare C driver](https://github.com/waveshare/e-Paper/blob/702def06bcb75983c98b0f9d25d43c552c248eb0/RaspberryPi%26JetsonNano/c/lib/e-Paper/EPD_7in5_V2.c)
//! - [Waveshare Python driver](https://github.com/waveshare/e-Paper/blob/702def06bcb75983c98b0f9d25d43c552c248eb0/RaspberryPi%26JetsonNano/python/lib/waveshare_epd/epd7in5_V2.py)
//!
//! Power setting and booster come first, then Power On, then the panel configuration.
//! The resolution is sent with a 16-bit width.
use crate::color::ColorMode;
use crate::config::{Defaults, Dimensions, PinConfig, PinDescriptor, PinMode};
use crate::error::SequenceError;
use crate::sequence::CommandSequence;
use crate::traits::PanelVariant;
use crate::uc81xx::{Command, PanelSetting, ResolutionFormat};

/// Width of the display
pub const WIDTH: u32 = 800;
/// Height of the display
pub const HEIGHT: u32 = 480;

const RESOLUTION_FORMAT: ResolutionFormat = ResolutionFormat::Wide;

const BOOSTER_SOFT_START: [u8; 4] = [0x17, 0x17, 0x27, 0x17];
const POWER_SETTING: [u8; 4] = [0x07, 0x17, 0x3F, 0x3F];
const PLL: u8 = 0x06;
const TCON: u8 = 0x22;
const VCOM_DATA_INTERVAL: [u8; 2] = [0x10, 0x07];

/// Raspberry Pi HAT wiring (BCM numbering)
pub const DEFAULTS: Defaults = Defaults {
    reset_pin: Some(PinConfig::Number(17)),
    dc_pin: Some(PinConfig::Number(25)),
    cs_pin: Some(PinConfig::Number(8)),
    busy_pin: Some(PinConfig::Descriptor(PinDescriptor {
        number: 24,
        inverted: true,
        mode: PinMode::INPUT,
    })),
};

/// Epd7in5 (V2) panel family
pub(crate) struct Epd7in5V2;

impl PanelVariant for Epd7in5V2 {
    const NAME: &'static str = "waveshare-7in5-v2";
    const WIDTH: u32 = WIDTH;
    const HEIGHT: u32 = HEIGHT;
    const MAX_DIMENSIONS: Dimensions = RESOLUTION_FORMAT.max();
    const COLOR_MODE: ColorMode = ColorMode::Monochrome;
    const DEFAULTS: Defaults = DEFAULTS;
    // new data only
    const FRAME_OPCODES: &'static [u8] = &[Command::DataStartTransmission2 as u8];

    fn init_sequence(dimensions: Dimensions) -> Result<CommandSequence, SequenceError> {
        let mut sequence = CommandSequence::new();
        sequence.push_command(Command::BoosterSoftStart, &BOOSTER_SOFT_START)?;
        sequence.push_command(Command::PowerSetting, &POWER_SETTING)?;
        sequence.push_command(Command::PowerOn, &[])?;
        // KW mode, LUT from OTP
        sequence.push_command(
            Command::PanelSetting,
            &[PanelSetting::new().black_white_only(true).0],
        )?;
        sequence.push_command(Command::PllControl, &[PLL])?;
        sequence.push_command(
            Command::ResolutionSetting,
            &RESOLUTION_FORMAT.encode(dimensions),
        )?;
        sequence.push_command(Command::DualSpi, &[0x00])?;
        sequence.push_command(Command::TconSetting, &[TCON])?;
        sequence.push_command(Command::VcomAndDataIntervalSetting, &VCOM_DATA_INTERVAL)?;
        Ok(sequence)
    }

    fn power_on_sequence() -> Result<CommandSequence, SequenceError> {
        Ok(CommandSequence::new())
    }

    fn refresh_sequence() -> Result<CommandSequence, SequenceError> {
        let mut sequence = CommandSequence::new();
        sequence.push_command(Command::DisplayRefresh, &[])?;
        Ok(sequence)
    }

    fn sleep_sequence() -> Result<CommandSequence, SequenceError> {
        let mut sequence = CommandSequence::new();
        sequence.push_command(Command::PowerOff, &[])?;
        sequence.push_command(Command::DeepSleep, &[0xA5])?;
        Ok(sequence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epd_size() {
        assert_eq!(WIDTH, 800);
        assert_eq!(HEIGHT, 480);
        assert_eq!(Epd7in5V2::COLOR_MODE, ColorMode::Monochrome);
    }

    #[test]
    fn resolution_has_wide_width() {
        let sequence = Epd7in5V2::init_sequence(Dimensions::new(WIDTH, HEIGHT)).unwrap();
        assert_eq!(sequence.len(), 9);
        assert_eq!(sequence[2].as_bytes(), &[0x04]);
        assert_eq!(sequence[3].as_bytes(), &[0x00, 0x1F]);
        assert_eq!(sequence[5].as_bytes(), &[0x61, 0x03, 0x20, 0x01, 0xE0]);
        assert_eq!(sequence[8].as_bytes(), &[0x50, 0x10, 0x07]);
    }

    #[test]
    fn single_plane_refresh() {
        assert_eq!(Epd7in5V2::FRAME_OPCODES, &[0x13]);
        let sequence = Epd7in5V2::refresh_sequence().unwrap();
        assert_eq!(sequence.len(), 1);
        assert_eq!(sequence[0].as_bytes(), &[0x12]);
    }
}
