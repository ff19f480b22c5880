//! Model for the Waveshare 7.3inch e-Paper HAT (F), 7-color ACeP
//!
//! # References
//!
//! - [Datasheet](https://www.waveshare.com/wiki/7.3inch_e-Paper_HAT_(F))
//! - [Waveshare C driver](https://github.com/waveshareteam/e-Paper/blob/8be47b27f1a6808fd82ea9ceeac04c172e4ee9a8/RaspberryPi_JetsonNano/c/lib/e-Paper/EPD_7in3f.c)
//! - [Waveshare Python driver](https://github.com/waveshareteam/e-Paper/blob/8be47b27f1a6808fd82ea9ceeac04c172e4ee9a8/RaspberryPi_JetsonNano/python/lib/waveshare_epd/epd7in3f.py)
//!
//! The init sequence configures the panel without powering it. Power On is sent after
//! the frame data has been transferred, see
//! [`Model::power_on_sequence`](crate::model::Model::power_on_sequence).

use crate::color::ColorMode;
use crate::config::{Defaults, Dimensions, PinConfig, PinDescriptor, PinMode};
use crate::error::SequenceError;
use crate::sequence::CommandSequence;
use crate::traits::PanelVariant;
use crate::uc81xx::ResolutionFormat;

use self::command::Command;

mod command;

/// Width of the display
pub const WIDTH: u32 = 800;
/// Height of the display
pub const HEIGHT: u32 = 480;

const RESOLUTION_FORMAT: ResolutionFormat = ResolutionFormat::Wide;

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

/// Epd7in3f panel family
pub(crate) struct Epd7in3f;

impl PanelVariant for Epd7in3f {
    const NAME: &'static str = "waveshare-7in3f";
    const WIDTH: u32 = WIDTH;
    const HEIGHT: u32 = HEIGHT;
    const MAX_DIMENSIONS: Dimensions = RESOLUTION_FORMAT.max();
    const COLOR_MODE: ColorMode = ColorMode::SevenColor;
    const DEFAULTS: Defaults = DEFAULTS;
    const FRAME_OPCODES: &'static [u8] = &[Command::DataStartTransmission as u8];

    fn init_sequence(dimensions: Dimensions) -> Result<CommandSequence, SequenceError> {
        let mut sequence = CommandSequence::new();
        sequence.push_command(Command::CMDH, &[0x49, 0x55, 0x20, 0x08, 0x09, 0x18])?;
        sequence.push_command(Command::PowerSetting, &[0x3F, 0x00, 0x32, 0x2A, 0x0E, 0x2A])?;
        sequence.push_command(Command::PanelSetting, &[0x5F, 0x69])?;
        sequence.push_command(Command::PowerOffSequence, &[0x00, 0x54, 0x00, 0x44])?;
        sequence.push_command(Command::BoosterSoftStart1, &[0x40, 0x1F, 0x1F, 0x2C])?;
        sequence.push_command(Command::BoosterSoftStart2, &[0x6F, 0x1F, 0x1F, 0x22])?;
        sequence.push_command(Command::BoosterSoftStart3, &[0x6F, 0x1F, 0x1F, 0x22])?;
        sequence.push_command(Command::IPC, &[0x00, 0x04])?;
        sequence.push_command(Command::PllControl, &[0x3C])?;
        sequence.push_command(Command::TSE, &[0x00])?;
        sequence.push_command(Command::VcomAndDataIntervalSetting, &[0x3F])?;
        sequence.push_command(Command::TconSetting, &[0x02, 0x00])?;
        sequence.push_command(
            Command::ResolutionSetting,
            &RESOLUTION_FORMAT.encode(dimensions),
        )?;
        sequence.push_command(Command::VcmDcSetting, &[0x1E])?;
        sequence.push_command(Command::TVDCS, &[0x00])?;
        sequence.push_command(Command::AGID, &[0x00])?;
        sequence.push_command(Command::PWS, &[0x2F])?;
        sequence.push_command(Command::CCSET, &[0x00])?;
        sequence.push_command(Command::TSSET, &[0x00])?;
        Ok(sequence)
    }

    fn power_on_sequence() -> Result<CommandSequence, SequenceError> {
        let mut sequence = CommandSequence::new();
        sequence.push_command(Command::PowerOn, &[])?;
        Ok(sequence)
    }

    fn refresh_sequence() -> Result<CommandSequence, SequenceError> {
        // refresh, then power off until the next frame
        let mut sequence = CommandSequence::new();
        sequence.push_command(Command::DataFresh, &[0x00])?;
        sequence.push_command(Command::PowerOff, &[0x00])?;
        Ok(sequence)
    }

    fn sleep_sequence() -> Result<CommandSequence, SequenceError> {
        let mut sequence = CommandSequence::new();
        sequence.push_command(Command::PowerOff, &[0x00])?;
        sequence.push_command(Command::DeepSleep, &[0xA5])?;
        Ok(sequence)
    }
}
