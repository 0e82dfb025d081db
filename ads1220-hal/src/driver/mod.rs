use embedded_hal::delay::DelayNs;
use embedded_hal::spi::{Operation, SpiDevice};

use crate::commands::Command;
use crate::conversion;
use crate::error::Error;
use crate::registers::{REGISTER_COUNT, Registers, check_start_preconditions};

mod config;

/// Minimum wait after RESET before the next command, in microseconds.
///
/// The datasheet requires 50 µs + 32 · t(CLK); with the 4.096-MHz internal
/// oscillator that is just under 58 µs.
pub const RESET_SETTLE_TIME_US: u32 = 58;

/// Driver for the ADS1220.
///
/// # Quick start
///
/// Create the driver with [`Ads1220::new`], passing an [`SpiDevice`] configured for
/// SPI mode 1 ([`SPI_MODE`]). The constructor resets the ADS1220 and checks that
/// every configuration register reads back as zero.
///
/// Configure the device with the `set_*` methods, start a conversion with
/// [`Ads1220::start_or_sync`], wait for the DRDY pin to go low, and fetch the
/// result with [`Ads1220::read_conversion_data`]. The [`conversion`] module turns
/// the result into physical units.
///
/// [`SPI_MODE`]: crate::SPI_MODE
/// [`conversion`]: crate::conversion
///
/// # Register shadow
///
/// The driver keeps a decoded copy of the four configuration registers, available
/// from [`Ads1220::registers`]. It is refreshed from the device after every
/// configuration write, and each setter checks the refreshed value matches what
/// was written.
///
/// # Bus ownership
///
/// The driver takes the SPI device by value and never closes it. As `SpiDevice` is
/// implemented for `&mut T`, you can lend it a mutable reference instead, or take
/// the device back with [`Ads1220::release`]. Every method takes `&mut self`, so
/// calls on one driver cannot overlap; the driver does no locking of its own.
#[derive(Debug)]
pub struct Ads1220<SPI> {
    /// Underlying SPI device.
    spi: SPI,
    /// Last values read from the configuration registers.
    registers: Registers,
}

impl<SPI: SpiDevice> Ads1220<SPI> {
    ////////////////////////////////////////////////////////////////////////////////
    // Constructors
    ////////////////////////////////////////////////////////////////////////////////

    /// Reset the ADS1220 and create the driver.
    ///
    /// The registers are read immediately after the reset command. On Linux the
    /// delay between SPI transfers is well beyond the settling time; on faster
    /// hosts use [`Ads1220::new_with_delay`].
    ///
    /// # Errors
    ///
    /// [`Error::RegisterNotCleared`] is returned if any configuration register is
    /// not zero after the reset, which usually means nothing is answering on the
    /// bus.
    pub fn new(spi: SPI) -> Result<Self, Error<SPI::Error>> {
        let mut adc = Self::unchecked(spi);
        adc.reset()?;
        adc.check_cleared()?;
        Ok(adc)
    }

    /// Reset the ADS1220 and create the driver, waiting [`RESET_SETTLE_TIME_US`]
    /// after the reset command.
    ///
    /// # Errors
    ///
    /// As for [`Ads1220::new`].
    pub fn new_with_delay(spi: SPI, delay: &mut impl DelayNs) -> Result<Self, Error<SPI::Error>> {
        let mut adc = Self::unchecked(spi);
        adc.reset()?;
        delay.delay_us(RESET_SETTLE_TIME_US);
        adc.check_cleared()?;
        Ok(adc)
    }

    fn unchecked(spi: SPI) -> Self {
        Self {
            spi,
            registers: Registers::default(),
        }
    }

    /// Read all registers after reset, and adopt them as the shadow if all are zero.
    fn check_cleared(&mut self) -> Result<(), Error<SPI::Error>> {
        let registers = self.read_registers()?;
        let bytes = registers.to_bytes();
        if let Some((register, &value)) = (0..).zip(bytes.iter()).find(|(_, v)| **v != 0) {
            return Err(Error::RegisterNotCleared { register, value });
        }
        self.registers = registers;
        log::debug!("ADS1220 reset, all configuration registers cleared");
        Ok(())
    }

    fn check_register_index(register: u8) -> Result<(), Error<SPI::Error>> {
        if register < REGISTER_COUNT {
            Ok(())
        } else {
            Err(Error::InvalidRegister(register))
        }
    }

    /// Give back the SPI device.
    pub fn release(self) -> SPI {
        self.spi
    }

    ////////////////////////////////////////////////////////////////////////////////
    // SPI exchange with the ADS1220
    ////////////////////////////////////////////////////////////////////////////////

    /// Send a command that has no response.
    fn send(&mut self, command: Command) -> Result<(), Error<SPI::Error>> {
        debug_assert_eq!(command.response_len(), 0);
        let frame = command.frame();
        log::trace!("{command:?}: write {:02x?}", frame.as_bytes());
        self.spi.write(frame.as_bytes())?;
        Ok(())
    }

    /// Send a command and read its `N`-byte response in one transaction.
    ///
    /// Chip select stays asserted between the opcode and the response.
    fn query<const N: usize>(&mut self, command: Command) -> Result<[u8; N], Error<SPI::Error>> {
        debug_assert_eq!(command.response_len(), N);
        let opcode = command.opcode();
        let mut response = [0u8; N];
        self.spi.transaction(&mut [
            Operation::Write(&[opcode]),
            Operation::Read(&mut response),
        ])?;
        log::trace!("{command:?}: write [{opcode:02x}], read {response:02x?}");
        Ok(response)
    }

    ////////////////////////////////////////////////////////////////////////////////
    // Register access
    ////////////////////////////////////////////////////////////////////////////////

    /// Read one configuration register (`0..=3`) from the device.
    ///
    /// This does not update the register shadow.
    ///
    /// # Datasheet
    ///
    /// See section 8.5.3.6 for the RREG command.
    pub fn read_register(&mut self, register: u8) -> Result<u8, Error<SPI::Error>> {
        Self::check_register_index(register)?;
        let [value] = self.query(Command::ReadRegister(register))?;
        Ok(value)
    }

    /// Write one configuration register (`0..=3`).
    ///
    /// This does not update or verify the register shadow; prefer the `set_*`
    /// methods, which do both.
    ///
    /// # Datasheet
    ///
    /// See section 8.5.3.7 for the WREG command.
    pub fn write_register(&mut self, register: u8, value: u8) -> Result<(), Error<SPI::Error>> {
        Self::check_register_index(register)?;
        self.send(Command::WriteRegister { register, value })
    }

    /// Read all four configuration registers from the device.
    ///
    /// This does not update the register shadow; see [`Ads1220::refresh`].
    pub fn read_registers(&mut self) -> Result<Registers, Error<SPI::Error>> {
        let mut bytes = [0u8; REGISTER_COUNT as usize];
        for (register, byte) in (0..REGISTER_COUNT).zip(bytes.iter_mut()) {
            *byte = self.read_register(register)?;
        }
        Ok(Registers::from_bytes(bytes))
    }

    /// Re-read all four configuration registers into the register shadow.
    ///
    /// Use this after [`Ads1220::reset`] or [`Ads1220::write_register`] to bring
    /// the shadow back in line with the device.
    pub fn refresh(&mut self) -> Result<Registers, Error<SPI::Error>> {
        self.registers = self.read_registers()?;
        log::debug!("Register shadow refreshed: {:02x?}", self.registers.to_bytes());
        Ok(self.registers)
    }

    /// The register shadow, as last read from the device.
    pub fn registers(&self) -> Registers {
        self.registers
    }

    ////////////////////////////////////////////////////////////////////////////////
    // Conversion data
    ////////////////////////////////////////////////////////////////////////////////

    /// Read the latest conversion result, most significant byte first.
    ///
    /// The result is a 24-bit two's complement code, or a 14-bit temperature in
    /// the top bits when the temperature sensor is enabled.
    ///
    /// # Datasheet
    ///
    /// See section 8.5.3.5 for the RDATA command.
    pub fn read_conversion_data(&mut self) -> Result<[u8; 3], Error<SPI::Error>> {
        self.query(Command::ReadData)
    }

    /// Read the latest conversion result as a signed code.
    pub fn read_conversion(&mut self) -> Result<i32, Error<SPI::Error>> {
        self.read_conversion_data().map(conversion::sign_extend_24)
    }

    ////////////////////////////////////////////////////////////////////////////////
    // Commands
    ////////////////////////////////////////////////////////////////////////////////

    /// Reset the ADS1220 to its default configuration.
    ///
    /// Wait at least [`RESET_SETTLE_TIME_US`] before sending any other command.
    /// The register shadow is not touched; call [`Ads1220::refresh`] once the
    /// device has settled.
    ///
    /// # Datasheet
    ///
    /// See section 8.5.3.2 for the RESET command.
    pub fn reset(&mut self) -> Result<(), Error<SPI::Error>> {
        self.send(Command::Reset)
    }

    /// Start a conversion, or restart the current one.
    ///
    /// In single-shot mode this starts one conversion. In continuous mode it starts
    /// converting continuously; sent again it resets the digital filter and
    /// restarts.
    ///
    /// # Errors
    ///
    /// [`Error::Precondition`] is returned, without anything being sent, if the
    /// register shadow selects an AVSS-referenced input with the PGA enabled or
    /// a gain above 4. See [`check_start_preconditions`].
    ///
    /// # Datasheet
    ///
    /// See section 8.5.3.3 for the START/SYNC command and section 8.3.2 for the
    /// AINN = AVSS restrictions.
    pub fn start_or_sync(&mut self) -> Result<(), Error<SPI::Error>> {
        if let Err(violation) = check_start_preconditions(&self.registers) {
            return Err(Error::Precondition(violation));
        }
        self.send(Command::StartSync)
    }

    /// Enter power-down mode.
    ///
    /// Any ongoing conversion completes first. Register values are kept; the next
    /// START/SYNC powers the analog components back up.
    ///
    /// # Datasheet
    ///
    /// See section 8.5.3.4 for the POWERDOWN command.
    pub fn power_down(&mut self) -> Result<(), Error<SPI::Error>> {
        self.send(Command::PowerDown)
    }
}
