use embedded_hal::spi::SpiDevice;

use super::Ads1220;
use crate::error::Error;
use crate::registers::Field;

/// Configuration register setters.
///
/// Every setter follows the same sequence: check the value fits the field, read
/// the register from the device, replace the field's bits, write the register
/// back, re-read all four registers into the shadow, and check the field now
/// holds the new value.
///
/// Multi-bit fields take the raw encoding from the datasheet. The enums in the
/// [`settings`](crate::settings) module name those encodings and convert with
/// `.into()`.
impl<SPI: SpiDevice> Ads1220<SPI> {
    /// Set any configuration field to a raw value.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if `value` is above [`Field::max`]. Nothing is
    ///   sent to the device.
    /// - [`Error::VerificationFailed`] if the field reads back with a different
    ///   value after the write.
    pub fn set_field(&mut self, field: Field, value: u8) -> Result<(), Error<SPI::Error>> {
        if value > field.max() {
            return Err(Error::InvalidArgument { field, value });
        }

        // Modify the register as read from the device, not the shadow.
        let register = field.register();
        let current = self.read_register(register)?;
        self.write_register(register, field.insert(current, value))?;

        let actual = self.refresh()?.field(field);
        if actual != value {
            return Err(Error::VerificationFailed {
                field,
                expected: value,
                actual,
            });
        }
        log::debug!("{field} set to {value}");
        Ok(())
    }

    /// Input multiplexer configuration (`0..=14`).
    ///
    /// For settings 8 to 11, where AINN = AVSS, the PGA must be bypassed and only
    /// gains 1, 2 and 4 can be used. This is checked by
    /// [`start_or_sync`](Self::start_or_sync), not here.
    pub fn set_mux(&mut self, mux: u8) -> Result<(), Error<SPI::Error>> {
        self.set_field(Field::Mux, mux)
    }

    /// Gain configuration (`0..=7`), gain = 2^value.
    ///
    /// Gains 1, 2 and 4 can be used with the PGA bypassed. Gains 8 to 128 always
    /// use the PGA.
    pub fn set_gain(&mut self, gain: u8) -> Result<(), Error<SPI::Error>> {
        self.set_field(Field::Gain, gain)
    }

    /// Disable and bypass the internal low-noise PGA.
    pub fn set_pga_bypass(&mut self, bypass: bool) -> Result<(), Error<SPI::Error>> {
        self.set_field(Field::PgaBypass, bypass.into())
    }

    /// Data rate (`0..=7`). See table 18 of the datasheet.
    pub fn set_data_rate(&mut self, data_rate: u8) -> Result<(), Error<SPI::Error>> {
        self.set_field(Field::DataRate, data_rate)
    }

    /// Operating mode: 0 normal, 1 duty-cycle, 2 turbo.
    pub fn set_mode(&mut self, mode: u8) -> Result<(), Error<SPI::Error>> {
        self.set_field(Field::Mode, mode)
    }

    /// Continuous conversion mode if true, single-shot if false.
    pub fn set_conversion_mode(&mut self, continuous: bool) -> Result<(), Error<SPI::Error>> {
        self.set_field(Field::ConversionMode, continuous.into())
    }

    /// Enable the internal temperature sensor.
    ///
    /// While enabled, register 0 has no effect and the internal reference is used.
    pub fn set_temp_sensor_mode(&mut self, enabled: bool) -> Result<(), Error<SPI::Error>> {
        self.set_field(Field::TempSensorMode, enabled.into())
    }

    /// Turn the 10-µA burn-out current sources on or off.
    ///
    /// These can be used to detect sensor faults such as wire breaks and shorted
    /// sensors.
    pub fn set_burnout_current(&mut self, enabled: bool) -> Result<(), Error<SPI::Error>> {
        self.set_field(Field::BurnoutCurrent, enabled.into())
    }

    /// Voltage reference selection (`0..=3`).
    pub fn set_vref(&mut self, vref: u8) -> Result<(), Error<SPI::Error>> {
        self.set_field(Field::Vref, vref)
    }

    /// FIR filter configuration (`0..=3`).
    pub fn set_fir(&mut self, fir: u8) -> Result<(), Error<SPI::Error>> {
        self.set_field(Field::Fir, fir)
    }

    /// Low-side power switch between AIN3/REFN1 and AVSS.
    ///
    /// If true, the switch closes when START/SYNC is sent and opens on POWERDOWN.
    /// If false, it is always open.
    pub fn set_power_switch(&mut self, automatic: bool) -> Result<(), Error<SPI::Error>> {
        self.set_field(Field::PowerSwitch, automatic.into())
    }

    /// Current for both IDAC1 and IDAC2 (`0..=7`).
    pub fn set_idac_current(&mut self, current: u8) -> Result<(), Error<SPI::Error>> {
        self.set_field(Field::IdacCurrent, current)
    }

    /// IDAC1 routing (`0..=6`).
    pub fn set_idac1_mux(&mut self, routing: u8) -> Result<(), Error<SPI::Error>> {
        self.set_field(Field::Idac1Mux, routing)
    }

    /// IDAC2 routing (`0..=6`).
    pub fn set_idac2_mux(&mut self, routing: u8) -> Result<(), Error<SPI::Error>> {
        self.set_field(Field::Idac2Mux, routing)
    }

    /// Signal data ready on DOUT/DRDY as well as DRDY if true, DRDY only if false.
    pub fn set_drdy_mode(&mut self, both_pins: bool) -> Result<(), Error<SPI::Error>> {
        self.set_field(Field::DrdyMode, both_pins.into())
    }
}
