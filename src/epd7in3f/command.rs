//! SPI Commands for the Waveshare 7.3" (F) E-Ink Display
use crate::traits;

/// Epd7in3f commands
///
/// Several of these are only named in the Waveshare sample code, the datasheet
/// lists them by address.
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug)]
pub(crate) enum Command {
    PanelSetting = 0x00,
    PowerSetting = 0x01,
    PowerOff = 0x02,
    PowerOffSequence = 0x03,
    PowerOn = 0x04,

    BoosterSoftStart1 = 0x05,
    BoosterSoftStart2 = 0x06,
    DeepSleep = 0x07,
    BoosterSoftStart3 = 0x08,

    DataStartTransmission = 0x10,
    DataFresh = 0x12,
    /// Internal power control
    IPC = 0x13,

    PllControl = 0x30,
    /// Temperature sensor enable
    TSE = 0x41,
    VcomAndDataIntervalSetting = 0x50,
    TconSetting = 0x60,
    ResolutionSetting = 0x61,
    VcmDcSetting = 0x82,
    /// VCOM DC setting during power off
    TVDCS = 0x84,
    /// Gate driving time
    AGID = 0x86,
    /// Command header, unlocks the configuration registers
    CMDH = 0xAA,
    /// Cascade setting
    CCSET = 0xE0,
    /// Power saving
    PWS = 0xE3,
    /// Temperature sensor setting
    TSSET = 0xE6,
}

impl traits::Command for Command {
    /// Returns the address of the command
    fn address(self) -> u8 {
        self as u8
    }
}
