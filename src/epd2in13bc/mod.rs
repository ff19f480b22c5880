//! Model for the Waveshare 2.13" (B/C) E-Ink Display
//! More information on this display can be found at the [Waveshare Wiki](https://www.waveshare.com/wiki/2.13inch_e-Paper_HAT_(B))
//! Values are for the 212x104, 2.13inch E-Ink display HAT for Raspberry Pi, three-color, SPI interface
//!
//! The booster is started before Power On, and the panel is configured afterwards.
use crate::color::ColorMode;
use crate::config::{Defaults, Dimensions, PinConfig, PinDescriptor, PinMode};
use crate::error::SequenceError;
use crate::sequence::CommandSequence;
use crate::traits::PanelVariant;
use crate::uc81xx::{Command, PanelSetting, ResolutionClass, ResolutionFormat};

/// Width of epd2in13bc in pixels
pub const WIDTH: u32 = 104;
/// Height of epd2in13bc in pixels
pub const HEIGHT: u32 = 212;

const RESOLUTION_FORMAT: ResolutionFormat = ResolutionFormat::WidthByte;

const VCOM_DATA_INTERVAL: u8 = 0x07;
const WHITE_BORDER: u8 = 0x70;
const FLOATING_BORDER: u8 = 0xF0;
const VCM_DC: u8 = 0x0A;
const BOOSTER_SOFT_START: [u8; 3] = [0x17, 0x17, 0x17];

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

/// Epd2in13bc panel family
pub(crate) struct Epd2in13bc;

impl PanelVariant for Epd2in13bc {
    const NAME: &'static str = "waveshare-2in13bc";
    const WIDTH: u32 = WIDTH;
    const HEIGHT: u32 = HEIGHT;
    const MAX_DIMENSIONS: Dimensions = RESOLUTION_FORMAT.max();
    const COLOR_MODE: ColorMode = ColorMode::TriColor;
    const DEFAULTS: Defaults = DEFAULTS;
    const FRAME_OPCODES: &'static [u8] = &[
        Command::DataStartTransmission1 as u8,
        Command::DataStartTransmission2 as u8,
    ];

    fn init_sequence(dimensions: Dimensions) -> Result<CommandSequence, SequenceError> {
        // Values taken from datasheet and sample code
        let mut sequence = CommandSequence::new();

        // start the booster
        sequence.push_command(Command::BoosterSoftStart, &BOOSTER_SOFT_START)?;

        // power on
        sequence.push_command(Command::PowerOn, &[])?;

        // set the panel settings
        let panel = PanelSetting::new().resolution(ResolutionClass::Res128x296);
        sequence.push_command(Command::PanelSetting, &[panel.0])?;

        sequence.push_command(
            Command::VcomAndDataIntervalSetting,
            &[WHITE_BORDER | VCOM_DATA_INTERVAL],
        )?;

        // set resolution
        sequence.push_command(
            Command::ResolutionSetting,
            &RESOLUTION_FORMAT.encode(dimensions),
        )?;

        sequence.push_command(Command::VcmDcSetting, &[VCM_DC])?;

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
        // Section 8.2 from datasheet
        let mut sequence = CommandSequence::new();
        sequence.push_command(
            Command::VcomAndDataIntervalSetting,
            &[FLOATING_BORDER | VCOM_DATA_INTERVAL],
        )?;
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
        assert_eq!(WIDTH, 104);
        assert_eq!(HEIGHT, 212);
    }

    #[test]
    fn power_on_follows_booster() {
        let sequence = Epd2in13bc::init_sequence(Dimensions::new(WIDTH, HEIGHT)).unwrap();
        assert_eq!(sequence.len(), 6);
        assert_eq!(sequence[0].as_bytes(), &[0x06, 0x17, 0x17, 0x17]);
        assert_eq!(sequence[1].as_bytes(), &[0x04]);
        assert_eq!(sequence[2].as_bytes(), &[0x00, 0x8F]);
        assert_eq!(sequence[3].as_bytes(), &[0x50, 0x77]);
        assert_eq!(sequence[4].as_bytes(), &[0x61, 104, 0x00, 0xD4]);
        assert_eq!(sequence[5].as_bytes(), &[0x82, 0x0A]);
    }

    #[test]
    fn sleep_floats_border() {
        let sequence = Epd2in13bc::sleep_sequence().unwrap();
        assert_eq!(sequence[0].as_bytes(), &[0x50, 0xF7]);
        assert_eq!(sequence.last().map(|group| group.opcode()), Some(0x07));
    }

    #[test]
    fn refresh_waits_for_idle() {
        let sequence = Epd2in13bc::refresh_sequence().unwrap();
        assert_eq!(sequence.len(), 1);
        assert_eq!(sequence[0].as_bytes(), &[0x12]);
        assert!(sequence[0].waits_for_idle());
        assert_eq!(Epd2in13bc::FRAME_OPCODES, &[0x10, 0x13]);
    }
}
