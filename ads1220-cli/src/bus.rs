use ads1220_hal::Ads1220;
use anyhow::{Context, bail};
use embedded_hal::spi::{Phase, Polarity};
use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};
use rppal::gpio::{Gpio, InputPin, OutputPin};
use rppal::hal::Delay;
use rppal::spi::{Bus, Mode, SlaveSelect, Spi};

use crate::cli::Cli;

/// Driver for an ADS1220 on a Linux spidev bus with a GPIO chip select.
pub(crate) type Adc = Ads1220<ExclusiveDevice<Spi, OutputPin, NoDelay>>;

/// GPIO input connected to the ADS1220's DRDY output.
pub(crate) type Drdy = InputPin;

/// Open the SPI bus and GPIO pins named on the command line and create the driver.
///
/// Returns the driver along with the DRDY input pin.
pub(crate) fn open(cli: &Cli) -> anyhow::Result<(Adc, Drdy)> {
    let mode = spi_mode(ads1220_hal::SPI_MODE);
    let spi = Spi::new(
        spi_bus(cli.bus)?,
        slave_select(cli.slave_select)?,
        cli.clock_hz,
        mode,
    )
    .with_context(|| format!("failed to open /dev/spidev{}.{}", cli.bus, cli.slave_select))?;
    tracing::debug!(bus = cli.bus, slave_select = cli.slave_select, clock_hz = cli.clock_hz, ?mode, "SPI bus open");

    let gpio = Gpio::new().context("failed to access GPIO")?;
    let cs = gpio
        .get(cli.cs_pin)
        .with_context(|| format!("failed to claim chip select GPIO {}", cli.cs_pin))?
        .into_output_high();
    let drdy = gpio
        .get(cli.drdy_pin)
        .with_context(|| format!("failed to claim DRDY GPIO {}", cli.drdy_pin))?
        .into_input();

    let device = ExclusiveDevice::new_no_delay(spi, cs);
    let adc = Ads1220::new_with_delay(device, &mut Delay::new())
        .context("ADS1220 did not come out of reset as expected")?;
    tracing::info!("ADS1220 ready");
    Ok((adc, drdy))
}

fn spi_bus(bus: u8) -> anyhow::Result<Bus> {
    Ok(match bus {
        0 => Bus::Spi0,
        1 => Bus::Spi1,
        2 => Bus::Spi2,
        3 => Bus::Spi3,
        4 => Bus::Spi4,
        5 => Bus::Spi5,
        6 => Bus::Spi6,
        _ => bail!("no SPI bus {bus}"),
    })
}

fn slave_select(slave_select: u8) -> anyhow::Result<SlaveSelect> {
    use SlaveSelect::*;
    Ok(match slave_select {
        0 => Ss0,
        1 => Ss1,
        2 => Ss2,
        3 => Ss3,
        4 => Ss4,
        5 => Ss5,
        6 => Ss6,
        7 => Ss7,
        8 => Ss8,
        9 => Ss9,
        10 => Ss10,
        11 => Ss11,
        12 => Ss12,
        13 => Ss13,
        14 => Ss14,
        15 => Ss15,
        _ => bail!("no slave select {slave_select}"),
    })
}

/// Map an embedded-hal SPI mode onto the rppal equivalent.
fn spi_mode(mode: embedded_hal::spi::Mode) -> Mode {
    match (mode.polarity, mode.phase) {
        (Polarity::IdleLow, Phase::CaptureOnFirstTransition) => Mode::Mode0,
        (Polarity::IdleLow, Phase::CaptureOnSecondTransition) => Mode::Mode1,
        (Polarity::IdleHigh, Phase::CaptureOnFirstTransition) => Mode::Mode2,
        (Polarity::IdleHigh, Phase::CaptureOnSecondTransition) => Mode::Mode3,
    }
}
