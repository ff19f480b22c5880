use crate::color::ColorMode;
use crate::config::{Defaults, Dimensions};
use crate::error::SequenceError;
use crate::sequence::CommandSequence;

/// All commands need to have this trait which gives the address of the command
/// which needs to be send via SPI with activated CommandsPin (Data/Command Pin in CommandMode)
pub(crate) trait Command: Copy {
    fn address(self) -> u8;
}

/// Constant data and command tables of one panel family
///
/// Implemented by a zero-sized marker per family. [`Panel`](crate::model::Panel)
/// dispatches to these, so the driver engine never sees panel specifics.
pub(crate) trait PanelVariant {
    /// Registry name of the stock model
    const NAME: &'static str;
    /// Native width in pixels
    const WIDTH: u32;
    /// Native height in pixels
    const HEIGHT: u32;
    /// Largest dimensions the resolution command can encode
    const MAX_DIMENSIONS: Dimensions;
    /// Frame memory layout
    const COLOR_MODE: ColorMode;
    /// Stock pin wiring
    const DEFAULTS: Defaults;
    /// Data start opcode of each frame plane, in transfer order
    const FRAME_OPCODES: &'static [u8];

    /// Bring-up sequence for already validated `dimensions`.
    ///
    /// The group order is fixed by the silicon and differs between families,
    /// in particular where power-on sits relative to the configuration groups.
    fn init_sequence(dimensions: Dimensions) -> Result<CommandSequence, SequenceError>;

    /// Groups that power the panel before a refresh
    ///
    /// Empty for families that power on during init.
    fn power_on_sequence() -> Result<CommandSequence, SequenceError>;

    /// Groups that latch the transferred frame onto the panel
    fn refresh_sequence() -> Result<CommandSequence, SequenceError>;

    /// Groups that power the panel off and put it into deep sleep
    ///
    /// Deep sleep is left with a hardware reset followed by the init sequence.
    fn sleep_sequence() -> Result<CommandSequence, SequenceError>;
}
