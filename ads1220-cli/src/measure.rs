use std::io::{self, Write};

use ads1220_hal::settings::{Gain, InputMux, VoltageReference};
use ads1220_hal::{Ads1220, Error, conversion};
use anyhow::anyhow;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;
use embedded_hal::spi::SpiDevice;
use rppal::hal::Delay;

use crate::bus::{Adc, Drdy};
use crate::util::FieldSetting;

/// Time allowed for the ADS1220 to settle after a reset, in milliseconds.
const RESET_SETTLE_MS: u32 = 100;

/// Wait for DRDY to go low, signalling a new conversion result.
fn wait_for_drdy<P: InputPin>(drdy: &mut P) -> Result<(), P::Error> {
    while drdy.is_high()? {}
    Ok(())
}

/// Set each field in order, stopping at the first that fails.
pub(crate) fn apply_settings<SPI: SpiDevice>(
    adc: &mut Ads1220<SPI>,
    settings: &[FieldSetting],
) -> Result<(), Error<SPI::Error>> {
    for setting in settings {
        adc.set_field(setting.field, setting.value)?;
    }
    Ok(())
}

/// Reset the ADS1220, bring the register shadow back in line, then apply `settings`.
pub(crate) fn reset_with_settings<SPI: SpiDevice>(
    adc: &mut Ads1220<SPI>,
    settings: &[FieldSetting],
    delay: &mut impl DelayNs,
) -> Result<(), Error<SPI::Error>> {
    adc.reset()?;
    delay.delay_ms(RESET_SETTLE_MS);
    adc.refresh()?;
    apply_settings(adc, settings)
}

/// Reset, measure the die temperature once, and print it.
///
/// `settings` are applied after the reset; the temperature sensor is then
/// enabled regardless.
pub(crate) fn temperature(
    adc: &mut Adc,
    drdy: &mut Drdy,
    settings: &[FieldSetting],
) -> anyhow::Result<()> {
    reset_with_settings(adc, settings, &mut Delay::new())?;
    adc.set_temp_sensor_mode(true)?;
    adc.start_or_sync()?;
    wait_for_drdy(drdy)?;
    let data = adc.read_conversion_data()?;
    tracing::debug!(?data, "temperature result");
    println!("Temperature: {:.5} C", conversion::temperature_celsius(data));
    Ok(())
}

/// Supply reading, written over the previous one on the same line.
fn supply_line(volts: f32) -> String {
    format!("\rAVDD: {volts:.6}V")
}

/// Reset, then show the analog supply voltage after every conversion.
///
/// `settings` are applied after the reset; the supply monitor input and
/// continuous conversion mode are then selected regardless.
///
/// With a `count`, stops after that many readings and powers the ADS1220 down.
/// Without one, runs until interrupted and leaves it converting.
pub(crate) fn supply(
    adc: &mut Adc,
    drdy: &mut Drdy,
    settings: &[FieldSetting],
    count: Option<u32>,
) -> anyhow::Result<()> {
    reset_with_settings(adc, settings, &mut Delay::new())?;
    adc.set_mux(InputMux::AvddMonitor.into())?;
    adc.set_conversion_mode(true)?;
    adc.start_or_sync()?;

    let mut stdout = io::stdout().lock();
    let mut readings = 0;
    while count.is_none_or(|count| readings < count) {
        wait_for_drdy(drdy)?;
        let data = adc.read_conversion_data()?;
        write!(stdout, "{}", supply_line(conversion::supply_voltage(data)))?;
        stdout.flush()?;
        readings += 1;
    }
    writeln!(stdout)?;
    adc.power_down()?;
    Ok(())
}

/// Run one conversion with the current configuration and print the result.
pub(crate) fn read(adc: &mut Adc, drdy: &mut Drdy) -> anyhow::Result<()> {
    adc.start_or_sync()?;
    wait_for_drdy(drdy)?;
    let code = adc.read_conversion()?;

    let registers = adc.registers();
    if registers.temp_sensor_mode() {
        let data = code.to_be_bytes();
        let celsius = conversion::temperature_celsius([data[1], data[2], data[3]]);
        println!("Code: {code} ({celsius:.5} C)");
    } else if registers.vref() == u8::from(VoltageReference::Internal) {
        let gain = Gain::try_from(registers.gain()).map_err(|e| anyhow!(e))?;
        let volts = conversion::code_to_volts(code, conversion::INTERNAL_REFERENCE_VOLTS, gain);
        println!("Code: {code} ({volts:.6} V)");
    } else {
        println!("Code: {code}");
    }
    Ok(())
}
