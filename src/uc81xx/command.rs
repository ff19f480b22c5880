//! SPI Commands shared by the UC81xx controller family (UC8151, UC8159, UC8179)

use core::ops::Deref;

use crate::config::Dimensions;
use crate::traits;

use bit_field::BitField;

/// UC81xx commands
///
/// For more infos about the addresses and what they are doing look into the PDFs.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Command {
    /// Set Resolution, LUT selection, BWR pixels, gate scan direction, source shift
    /// direction, booster switch, soft reset.
    PanelSetting = 0x00,

    /// Selecting internal and external power
    PowerSetting = 0x01,

    /// Turns off charge pump, T-con, source driver, gate driver, VCOM and the
    /// temperature sensor. Register data is kept until VDD goes off.
    PowerOff = 0x02,

    /// Turning On the Power
    ///
    /// Registers are not addressable on some panels until this has completed.
    PowerOn = 0x04,

    /// Starting data transmission
    BoosterSoftStart = 0x06,

    /// Enter deep-sleep. The only parameter is the check code `0xA5`.
    ///
    /// The deep sleep mode would return to stand-by by hardware reset.
    DeepSleep = 0x07,

    /// BLACK/WHITE or OLD_DATA
    DataStartTransmission1 = 0x10,
    /// Ends a data transmission
    DataStop = 0x11,
    /// Refresh the panel from SRAM and LUT
    DisplayRefresh = 0x12,
    /// RED or NEW_DATA
    DataStartTransmission2 = 0x13,
    /// Dual SPI mode
    DualSpi = 0x15,

    /// The command controls the PLL clock frequency.
    PllControl = 0x30,

    /// Interval of Vcom and data output, plus border output selection
    VcomAndDataIntervalSetting = 0x50,

    /// Non-overlap period of Gate and Source.
    TconSetting = 0x60,
    /// Resolution; takes priority over RES\[1:0\] in the panel setting
    ResolutionSetting = 0x61,

    /// This command sets `VCOM_DC` value.
    VcmDcSetting = 0x82,
}

impl traits::Command for Command {
    /// Returns the address of the command
    fn address(self) -> u8 {
        self as u8
    }
}

/// Resolution class selected by RES\[1:0\] of the panel setting
#[allow(dead_code)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum ResolutionClass {
    /// 96x230
    Res96x230 = 0b00,
    /// 96x252
    Res96x252 = 0b01,
    /// 128x296
    Res128x296 = 0b10,
    /// 160x296
    Res160x296 = 0b11,
}

/// Panel setting register (PSR)
///
/// ```text
/// [7|6|5|4|3|2|1|0]
///  | | | | | | | `--- RST_N: 1 = no soft reset
///  | | | | | | `----- SHD_N: 1 = booster on
///  | | | | | `------- SHL: source shift right
///  | | | | `--------- UD: gate scan up
///  | | | `----------- KW/R: 1 = black/white only, 0 = black/white/red
///  | | `------------- REG: 1 = LUT from register, 0 = LUT from OTP
///  `-`--------------- RES[1:0]: resolution class
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct PanelSetting(pub u8);

impl PanelSetting {
    /// Booster on, no soft reset, gate scan up, source shift right, LUT from OTP,
    /// black/white/red and the smallest resolution class.
    pub fn new() -> PanelSetting {
        let mut value = 0u8;
        value.set_bits(0..4, 0b1111);
        PanelSetting(value)
    }

    pub fn resolution(mut self, class: ResolutionClass) -> Self {
        self.0.set_bits(6..8, class as u8);
        self
    }

    #[allow(dead_code)]
    pub fn lut_from_register(mut self, enabled: bool) -> Self {
        self.0.set_bit(5, enabled);
        self
    }

    pub fn black_white_only(mut self, enabled: bool) -> Self {
        self.0.set_bit(4, enabled);
        self
    }
}

/// Encodes the ResolutionSetting parameters
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum ResolutionFormat {
    /// `width, height >> 8, height & 0xFF`, smaller UC8151-class panels
    WidthByte,
    /// `width >> 8, width & 0xFF, height >> 8, height & 0xFF`, UC8159/UC8179-class panels
    Wide,
}

impl ResolutionFormat {
    /// Largest dimensions the format can carry
    pub const fn max(self) -> Dimensions {
        match self {
            ResolutionFormat::WidthByte => Dimensions::new(0xFF, 0xFFFF),
            ResolutionFormat::Wide => Dimensions::new(0xFFFF, 0xFFFF),
        }
    }

    /// Parameter bytes, big-endian
    ///
    /// `dimensions` must have been checked against [`ResolutionFormat::max`].
    pub fn encode(self, dimensions: Dimensions) -> ResolutionBytes {
        let [_, _, w_hi, w_lo] = dimensions.width.to_be_bytes();
        let [_, _, h_hi, h_lo] = dimensions.height.to_be_bytes();
        match self {
            ResolutionFormat::WidthByte => ResolutionBytes {
                bytes: [w_lo, h_hi, h_lo, 0],
                len: 3,
            },
            ResolutionFormat::Wide => ResolutionBytes {
                bytes: [w_hi, w_lo, h_hi, h_lo],
                len: 4,
            },
        }
    }
}

/// Encoded ResolutionSetting parameters
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct ResolutionBytes {
    bytes: [u8; 4],
    len: usize,
}

impl Deref for ResolutionBytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Command as CommandTrait;

    #[test]
    fn command_addr() {
        assert_eq!(Command::PanelSetting.address(), 0x00);
        assert_eq!(Command::PowerOn.address(), 0x04);
        assert_eq!(Command::ResolutionSetting.address(), 0x61);
        assert_eq!(Command::VcmDcSetting.address(), 0x82);
    }

    #[test]
    fn panel_setting_bits() {
        assert_eq!(PanelSetting::new().0, 0x0F);
        assert_eq!(
            PanelSetting::new()
                .resolution(ResolutionClass::Res128x296)
                .0,
            0x8F
        );
        assert_eq!(PanelSetting::new().black_white_only(true).0, 0x1F);
        assert_eq!(
            PanelSetting::new()
                .lut_from_register(true)
                .black_white_only(true)
                .0,
            0x3F
        );
    }

    #[test]
    fn resolution_big_endian() {
        let bytes = ResolutionFormat::WidthByte.encode(Dimensions::new(104, 212));
        assert_eq!(&*bytes, &[104, 0x00, 0xD4]);

        let bytes = ResolutionFormat::WidthByte.encode(Dimensions::new(104, 256));
        assert_eq!(&*bytes, &[104, 0x01, 0x00]);

        let bytes = ResolutionFormat::Wide.encode(Dimensions::new(800, 480));
        assert_eq!(&*bytes, &[0x03, 0x20, 0x01, 0xE0]);
    }
}
