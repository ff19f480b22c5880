use core::marker::PhantomData;

use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiDevice,
};
use log::trace;

use crate::error::ErrorKind;
use crate::sequence::{CommandGroup, CommandSequence};

/// Default interval between two busy polls
pub const DEFAULT_POLL_INTERVAL_US: u32 = 10_000;
/// Default number of busy re-reads before giving up (~60 s at the default interval)
pub const DEFAULT_MAX_POLLS: u32 = 6_000;

/// Replays [`CommandSequence`]s over SPI
///
/// The opcode of each group is written with DC low, its parameters with DC high.
/// After every group that asks for it the busy line is polled until the panel
/// reports idle.
///
/// ```
/// # use embedded_hal_mock::eh1::{delay::NoopDelay, digital, spi};
/// # let mut spi = spi::Mock::<u8>::new(&[]);
/// # let busy = digital::Mock::new(&[]);
/// # let dc = digital::Mock::new(&[]);
/// use epd_models::{interface::DisplayInterface, prelude::*};
///
/// let model = Model::new("inkplate2", Panel::Inkplate2);
/// let resolved = model.resolve(&Config::new())?;
/// let interface: DisplayInterface<spi::Mock<u8>, _, _, _> =
///     DisplayInterface::new(busy, dc, NoopDelay::new(), resolved.busy_is_low());
/// # let (mut busy, mut dc) = interface.release();
/// # busy.done();
/// # dc.done();
/// # spi.done();
/// # Ok::<(), epd_models::error::ConfigurationError>(())
/// ```
pub struct DisplayInterface<SPI, BUSY, DC, DELAY> {
    /// SPI
    _spi: PhantomData<SPI>,
    /// Busy input, polled between command groups
    busy: BUSY,
    /// Data/Command Control Pin (High for data, Low for command)
    dc: DC,
    delay: DELAY,
    /// true if the panel pulls busy LOW while working
    is_busy_low: bool,
    poll_interval_us: u32,
    max_polls: u32,
}

impl<SPI, BUSY, DC, DELAY> DisplayInterface<SPI, BUSY, DC, DELAY> {
    /// Creates a new `DisplayInterface`
    ///
    /// `is_busy_low` usually comes from
    /// [`ResolvedConfig::busy_is_low`](crate::config::ResolvedConfig::busy_is_low).
    pub fn new(busy: BUSY, dc: DC, delay: DELAY, is_busy_low: bool) -> Self {
        DisplayInterface {
            _spi: PhantomData,
            busy,
            dc,
            delay,
            is_busy_low,
            poll_interval_us: DEFAULT_POLL_INTERVAL_US,
            max_polls: DEFAULT_MAX_POLLS,
        }
    }

    /// Change how often and how long the busy line is polled
    ///
    /// The line is always read once; `max_polls` counts the re-reads after that.
    /// An interval of 0 implies busy waiting.
    pub fn with_polling(mut self, poll_interval_us: u32, max_polls: u32) -> Self {
        self.poll_interval_us = poll_interval_us;
        self.max_polls = max_polls;
        self
    }

    /// Give back the busy and DC pins
    pub fn release(self) -> (BUSY, DC) {
        (self.busy, self.dc)
    }
}

impl<SPI, BUSY, DC, DELAY> DisplayInterface<SPI, BUSY, DC, DELAY>
where
    SPI: SpiDevice,
    BUSY: InputPin,
    DC: OutputPin,
    DELAY: DelayNs,
{
    /// Basic function for sending a command opcode
    pub fn cmd(&mut self, spi: &mut SPI, opcode: u8) -> Result<(), ErrorKind<SPI, BUSY, DC>> {
        // low for commands
        self.dc.set_low().map_err(ErrorKind::DcError)?;
        spi.write(&[opcode]).map_err(ErrorKind::SpiError)
    }

    /// Basic function for sending an array of u8-values of data over spi
    pub fn data(&mut self, spi: &mut SPI, data: &[u8]) -> Result<(), ErrorKind<SPI, BUSY, DC>> {
        // high for data
        self.dc.set_high().map_err(ErrorKind::DcError)?;
        spi.write(data).map_err(ErrorKind::SpiError)
    }

    /// Send one group: opcode, then its parameters if there are any
    ///
    /// Doesn't wait for the busy line.
    pub fn send_group(
        &mut self,
        spi: &mut SPI,
        group: &CommandGroup,
    ) -> Result<(), ErrorKind<SPI, BUSY, DC>> {
        trace!("cmd 0x{:02X} + {} bytes", group.opcode(), group.data().len());
        self.cmd(spi, group.opcode())?;
        if !group.data().is_empty() {
            self.data(spi, group.data())?;
        }
        Ok(())
    }

    /// Send every group in order
    ///
    /// After each group the settle delay is applied, then the busy line is waited on
    /// unless the group was built
    /// [`without_busy_wait`](CommandGroup::without_busy_wait).
    pub fn send_sequence(
        &mut self,
        spi: &mut SPI,
        sequence: &CommandSequence,
    ) -> Result<(), ErrorKind<SPI, BUSY, DC>> {
        for group in sequence {
            self.send_group(spi, group)?;
            if group.settle_us() > 0 {
                self.delay.delay_us(group.settle_us());
            }
            if group.waits_for_idle() {
                self.wait_until_idle()?;
            }
        }
        Ok(())
    }

    /// Checks if device is still busy
    pub fn is_busy(&mut self) -> Result<bool, ErrorKind<SPI, BUSY, DC>> {
        if self.is_busy_low {
            self.busy.is_low().map_err(ErrorKind::BusyError)
        } else {
            self.busy.is_high().map_err(ErrorKind::BusyError)
        }
    }

    /// Waits until device isn't busy anymore
    ///
    /// Fails with [`ErrorKind::BusyTimeout`] if the line is still busy after the
    /// configured number of re-reads.
    pub fn wait_until_idle(&mut self) -> Result<(), ErrorKind<SPI, BUSY, DC>> {
        let mut polls = 0;
        while self.is_busy()? {
            if polls == self.max_polls {
                return Err(ErrorKind::BusyTimeout);
            }
            polls += 1;
            if self.poll_interval_us > 0 {
                self.delay.delay_us(self.poll_interval_us);
            }
        }
        Ok(())
    }
}

#[cfg(feature = "async")]
mod asynch {
    use embedded_hal::digital::OutputPin;
    use embedded_hal_async::{delay::DelayNs, digital::Wait, spi::SpiDevice};
    use log::trace;

    use super::DisplayInterface;
    use crate::error::ErrorKind;
    use crate::sequence::{CommandGroup, CommandSequence};

    impl<SPI, BUSY, DC, DELAY> DisplayInterface<SPI, BUSY, DC, DELAY>
    where
        SPI: SpiDevice,
        BUSY: Wait,
        DC: OutputPin,
        DELAY: DelayNs,
    {
        /// Async variant of [`DisplayInterface::cmd`]
        pub async fn cmd_async(
            &mut self,
            spi: &mut SPI,
            opcode: u8,
        ) -> Result<(), ErrorKind<SPI, BUSY, DC>> {
            // low for commands
            self.dc.set_low().map_err(ErrorKind::DcError)?;
            spi.write(&[opcode]).await.map_err(ErrorKind::SpiError)
        }

        /// Async variant of [`DisplayInterface::data`]
        pub async fn data_async(
            &mut self,
            spi: &mut SPI,
            data: &[u8],
        ) -> Result<(), ErrorKind<SPI, BUSY, DC>> {
            // high for data
            self.dc.set_high().map_err(ErrorKind::DcError)?;
            spi.write(data).await.map_err(ErrorKind::SpiError)
        }

        /// Async variant of [`DisplayInterface::send_group`]
        pub async fn send_group_async(
            &mut self,
            spi: &mut SPI,
            group: &CommandGroup,
        ) -> Result<(), ErrorKind<SPI, BUSY, DC>> {
            trace!("cmd 0x{:02X} + {} bytes", group.opcode(), group.data().len());
            self.cmd_async(spi, group.opcode()).await?;
            if !group.data().is_empty() {
                self.data_async(spi, group.data()).await?;
            }
            Ok(())
        }

        /// Async variant of [`DisplayInterface::send_sequence`]
        ///
        /// Waits on the busy edge instead of polling, so no timeout applies.
        pub async fn send_sequence_async(
            &mut self,
            spi: &mut SPI,
            sequence: &CommandSequence,
        ) -> Result<(), ErrorKind<SPI, BUSY, DC>> {
            for group in sequence {
                self.send_group_async(spi, group).await?;
                if group.settle_us() > 0 {
                    self.delay.delay_us(group.settle_us()).await;
                }
                if group.waits_for_idle() {
                    self.wait_until_idle_async().await?;
                }
            }
            Ok(())
        }

        /// Async variant of [`DisplayInterface::wait_until_idle`]
        pub async fn wait_until_idle_async(&mut self) -> Result<(), ErrorKind<SPI, BUSY, DC>> {
            if self.is_busy_low {
                self.busy
                    .wait_for_high()
                    .await
                    .map_err(ErrorKind::BusyError)
            } else {
                self.busy.wait_for_low().await.map_err(ErrorKind::BusyError)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;
    use std::vec;
    use std::vec::Vec;

    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };
    use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};

    use super::*;
    use crate::config::Config;
    use crate::model::{Model, Panel};

    fn write(bytes: &[u8]) -> [SpiTransaction<u8>; 3] {
        [
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(bytes.to_vec()),
            SpiTransaction::transaction_end(),
        ]
    }

    /// SPI and DC traffic for `sequence`
    fn wire(sequence: &CommandSequence) -> (Vec<SpiTransaction<u8>>, Vec<PinTransaction>) {
        let mut spi = vec![];
        let mut dc = vec![];
        for group in sequence {
            spi.extend(write(&[group.opcode()]));
            dc.push(PinTransaction::set(PinState::Low));
            if !group.data().is_empty() {
                spi.extend(write(group.data()));
                dc.push(PinTransaction::set(PinState::High));
            }
        }
        (spi, dc)
    }

    fn inkplate2() -> Model {
        Model::new("inkplate2", Panel::Inkplate2)
    }

    #[test]
    fn replays_groups_with_busy_wait() {
        let sequence = inkplate2().init_sequence(&Config::new()).unwrap();
        let (spi_expectations, dc_expectations) = wire(&sequence);

        let mut busy_expectations = vec![];
        for _ in &sequence {
            // busy once, then idle
            busy_expectations.push(PinTransaction::get(PinState::Low));
            busy_expectations.push(PinTransaction::get(PinState::High));
        }

        let mut spi = SpiMock::new(&spi_expectations);
        let busy = PinMock::new(&busy_expectations);
        let dc = PinMock::new(&dc_expectations);

        let mut interface = DisplayInterface::new(busy, dc, NoopDelay::new(), true);
        interface.send_sequence(&mut spi, &sequence).unwrap();

        let (mut busy, mut dc) = interface.release();
        spi.done();
        busy.done();
        dc.done();
    }

    #[test]
    fn refresh_skips_wait_between_stop_and_refresh() {
        let sequence = inkplate2().refresh_sequence().unwrap();
        let (spi_expectations, dc_expectations) = wire(&sequence);

        // only read after Display Refresh
        let busy_expectations = [
            PinTransaction::get(PinState::Low),
            PinTransaction::get(PinState::High),
        ];

        let mut spi = SpiMock::new(&spi_expectations);
        let busy = PinMock::new(&busy_expectations);
        let dc = PinMock::new(&dc_expectations);

        let mut interface = DisplayInterface::new(busy, dc, NoopDelay::new(), true);
        interface.send_sequence(&mut spi, &sequence).unwrap();

        let (mut busy, mut dc) = interface.release();
        spi.done();
        busy.done();
        dc.done();
    }

    #[test]
    fn busy_high_polarity() {
        let busy = PinMock::new(&[
            PinTransaction::get(PinState::High),
            PinTransaction::get(PinState::Low),
        ]);
        let dc = PinMock::new(&[]);
        let mut spi = SpiMock::<u8>::new(&[]);

        let mut interface: DisplayInterface<SpiMock<u8>, _, _, _> =
            DisplayInterface::new(busy, dc, NoopDelay::new(), false);
        assert!(interface.is_busy().unwrap());
        interface.wait_until_idle().unwrap();

        let (mut busy, mut dc) = interface.release();
        spi.done();
        busy.done();
        dc.done();
    }

    #[test]
    fn busy_timeout() {
        // first read plus three re-reads
        let busy = PinMock::new(&[
            PinTransaction::get(PinState::Low),
            PinTransaction::get(PinState::Low),
            PinTransaction::get(PinState::Low),
            PinTransaction::get(PinState::Low),
        ]);
        let dc = PinMock::new(&[]);
        let mut spi = SpiMock::<u8>::new(&[]);

        let mut interface: DisplayInterface<SpiMock<u8>, _, _, _> =
            DisplayInterface::new(busy, dc, NoopDelay::new(), true).with_polling(0, 3);
        assert!(matches!(
            interface.wait_until_idle(),
            Err(ErrorKind::BusyTimeout)
        ));

        let (mut busy, mut dc) = interface.release();
        spi.done();
        busy.done();
        dc.done();
    }

    #[test]
    fn idle_line_is_read_without_retries() {
        let busy = PinMock::new(&[PinTransaction::get(PinState::High)]);
        let dc = PinMock::new(&[]);
        let mut spi = SpiMock::<u8>::new(&[]);

        let mut interface: DisplayInterface<SpiMock<u8>, _, _, _> =
            DisplayInterface::new(busy, dc, NoopDelay::new(), true).with_polling(0, 0);
        interface.wait_until_idle().unwrap();

        let (mut busy, mut dc) = interface.release();
        spi.done();
        busy.done();
        dc.done();
    }

    #[cfg(feature = "async")]
    #[test]
    fn async_replay_matches_blocking() {
        let sequence = inkplate2().refresh_sequence().unwrap();
        let (spi_expectations, dc_expectations) = wire(&sequence);

        let mut spi = SpiMock::new(&spi_expectations);
        let busy = PinMock::new(&[PinTransaction::wait_for_state(PinState::High)]);
        let dc = PinMock::new(&dc_expectations);

        let mut interface: DisplayInterface<SpiMock<u8>, _, _, _> =
            DisplayInterface::new(busy, dc, NoopDelay::new(), true);
        embassy_futures::block_on(interface.send_sequence_async(&mut spi, &sequence)).unwrap();

        let (mut busy, mut dc) = interface.release();
        spi.done();
        busy.done();
        dc.done();
    }

    #[cfg(feature = "async")]
    #[test]
    fn async_busy_high_polarity() {
        let busy = PinMock::new(&[PinTransaction::wait_for_state(PinState::Low)]);
        let dc = PinMock::new(&[]);
        let mut spi = SpiMock::<u8>::new(&[]);

        let mut interface: DisplayInterface<SpiMock<u8>, _, _, _> =
            DisplayInterface::new(busy, dc, NoopDelay::new(), false);
        embassy_futures::block_on(interface.wait_until_idle_async()).unwrap();

        let (mut busy, mut dc) = interface.release();
        spi.done();
        busy.done();
        dc.done();
    }
}
