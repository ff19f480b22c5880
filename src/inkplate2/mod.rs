//! Soldered Inkplate 2: 2.13" black/white/red panel on an ESP32 board
//!
//! Unlike most UC81xx panels, which are powered on after the frame data has been
//! transferred, the Inkplate 2 has to receive Power On (`0x04`) before any
//! configuration command. It therefore leads the init sequence, and
//! [`Model::power_on_sequence`](crate::model::Model::power_on_sequence) is empty.
//!
//! Data Stop (`0x11`) raises busy until the following refresh has completed, so it
//! is sent back to back with Display Refresh (`0x12`) without waiting in between.
//!
//! # References
//!
//! - [Soldered Inkplate library](https://github.com/SolderedElectronics/Inkplate-Arduino-library)
use crate::color::ColorMode;
use crate::config::{Defaults, Dimensions, PinConfig, PinDescriptor, PinMode};
use crate::error::SequenceError;
use crate::sequence::{CommandGroup, CommandSequence};
use crate::traits::PanelVariant;
use crate::uc81xx::{Command, PanelSetting, ResolutionFormat};

/// Width of the Inkplate 2 in pixels
pub const WIDTH: u32 = 104;
/// Height of the Inkplate 2 in pixels
pub const HEIGHT: u32 = 212;

const RESOLUTION_FORMAT: ResolutionFormat = ResolutionFormat::WidthByte;

/// Temperature sensor, boost and other related timing settings
const PANEL_TIMING: u8 = 0x89;
/// WBmode:VBDF 17|D7 VBDW 97 VBDB 57   WBRmode:VBDF F7 VBDW 77 VBDB 37  VBDR B7
const VCOM_DATA_INTERVAL: u8 = 0x77;
/// Border floating before power off
const POWER_OFF_VCOM_DATA_INTERVAL: u8 = 0xF7;
const DEEP_SLEEP_CHECK_CODE: u8 = 0xA5;
/// Minimum time before busy reflects the refresh (at least 200 µs)
const REFRESH_SETTLE_US: u32 = 500;

/// Inkplate 2 board wiring
pub const DEFAULTS: Defaults = Defaults {
    reset_pin: Some(PinConfig::Number(19)),
    dc_pin: Some(PinConfig::Number(33)),
    cs_pin: Some(PinConfig::Number(27)),
    // LOW = busy, HIGH = idle
    busy_pin: Some(PinConfig::Descriptor(PinDescriptor {
        number: 32,
        inverted: true,
        mode: PinMode::INPUT_PULLUP,
    })),
};

/// Inkplate 2 panel family
pub(crate) struct Inkplate2;

impl PanelVariant for Inkplate2 {
    const NAME: &'static str = "inkplate2";
    const WIDTH: u32 = WIDTH;
    const HEIGHT: u32 = HEIGHT;
    const MAX_DIMENSIONS: Dimensions = RESOLUTION_FORMAT.max();
    const COLOR_MODE: ColorMode = ColorMode::TriColor;
    const DEFAULTS: Defaults = DEFAULTS;
    // black/white plane, then red
    const FRAME_OPCODES: &'static [u8] = &[
        Command::DataStartTransmission1 as u8,
        Command::DataStartTransmission2 as u8,
    ];

    fn init_sequence(dimensions: Dimensions) -> Result<CommandSequence, SequenceError> {
        let mut sequence = CommandSequence::new();

        // Power on / wake from deep sleep - must be first
        sequence.push_command(Command::PowerOn, &[])?;

        // LUT from OTP
        sequence.push_command(Command::PanelSetting, &[PanelSetting::new().0, PANEL_TIMING])?;

        sequence.push_command(
            Command::ResolutionSetting,
            &RESOLUTION_FORMAT.encode(dimensions),
        )?;

        sequence.push_command(Command::VcomAndDataIntervalSetting, &[VCOM_DATA_INTERVAL])?;

        Ok(sequence)
    }

    fn power_on_sequence() -> Result<CommandSequence, SequenceError> {
        // already powered during init
        Ok(CommandSequence::new())
    }

    fn refresh_sequence() -> Result<CommandSequence, SequenceError> {
        let mut sequence = CommandSequence::new();
        // busy stays up until the refresh is done
        sequence.push(
            CommandGroup::with_command(Command::DataStop, &[0x00])?.without_busy_wait(),
        )?;
        sequence.push(
            CommandGroup::with_command(Command::DisplayRefresh, &[])?
                .with_settle_us(REFRESH_SETTLE_US),
        )?;
        Ok(sequence)
    }

    fn sleep_sequence() -> Result<CommandSequence, SequenceError> {
        let mut sequence = CommandSequence::new();
        sequence.push_command(
            Command::VcomAndDataIntervalSetting,
            &[POWER_OFF_VCOM_DATA_INTERVAL],
        )?;
        sequence.push_command(Command::PowerOff, &[])?;
        sequence.push_command(Command::DeepSleep, &[DEEP_SLEEP_CHECK_CODE])?;
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
        assert_eq!(Inkplate2::MAX_DIMENSIONS, Dimensions::new(255, 65535));
    }

    #[test]
    fn init_sequence() {
        let sequence = Inkplate2::init_sequence(Dimensions::new(WIDTH, HEIGHT)).unwrap();
        let groups: [&[u8]; 4] = [
            &[0x04],
            &[0x00, 0x0F, 0x89],
            &[0x61, 104, 0x00, 0xD4],
            &[0x50, 0x77],
        ];
        assert_eq!(sequence.len(), groups.len());
        for (group, expected) in sequence.iter().zip(groups) {
            assert_eq!(group.as_bytes(), expected);
        }
    }

    #[test]
    fn sleep_sequence() {
        let sequence = Inkplate2::sleep_sequence().unwrap();
        let groups: [&[u8]; 3] = [&[0x50, 0xF7], &[0x02], &[0x07, 0xA5]];
        assert_eq!(sequence.len(), groups.len());
        for (group, expected) in sequence.iter().zip(groups) {
            assert_eq!(group.as_bytes(), expected);
        }
        assert!(Inkplate2::power_on_sequence().unwrap().is_empty());
    }

    #[test]
    fn refresh_sends_stop_and_refresh_back_to_back() {
        let sequence = Inkplate2::refresh_sequence().unwrap();
        assert_eq!(sequence.len(), 2);

        assert_eq!(sequence[0].as_bytes(), &[0x11, 0x00]);
        assert!(!sequence[0].waits_for_idle());

        assert_eq!(sequence[1].as_bytes(), &[0x12]);
        assert!(sequence[1].waits_for_idle());
        assert!(sequence[1].settle_us() >= 200);
    }

    #[test]
    fn frame_planes() {
        assert_eq!(Inkplate2::FRAME_OPCODES, &[0x10, 0x13]);
        assert_eq!(
            Inkplate2::FRAME_OPCODES.len() as u64,
            Inkplate2::COLOR_MODE.planes()
        );
    }
}
