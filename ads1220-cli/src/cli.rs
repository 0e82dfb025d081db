use crate::util::{self, FieldSetting};

use clap::{Parser, value_parser};

/// CLI for the ADS1220 24-bit delta-sigma ADC on a Raspberry Pi
///
/// The ADS1220 is reached over a Linux spidev bus, with chip select driven from
/// a GPIO pin and the DRDY output read from another.
///
/// Every invocation resets the ADS1220 and checks its registers are cleared
/// before anything else happens, so configuration does not persist between
/// runs. Use --set to change configuration fields for the command; each change
/// is read back from the device and checked. Commands that reset the ADS1220
/// themselves (temperature, supply, demo, reset) apply the settings after that
/// reset, and the fields a measurement selects itself take precedence.
///
/// Field names for --set are those shown by the registers command, and values
/// are the raw datasheet encodings in decimal or 0x-prefixed hexadecimal.
#[derive(Debug, Parser)]
#[command(version, about)]
pub(crate) struct Cli {
    /// SPI bus number (/dev/spidevB.S)
    #[arg(short, long, default_value_t = 0, value_parser = value_parser!(u8).range(0..=6))]
    pub(crate) bus: u8,
    /// SPI slave select number (/dev/spidevB.S)
    #[arg(short, long, default_value_t = 0, value_parser = value_parser!(u8).range(0..=15))]
    pub(crate) slave_select: u8,
    /// SPI clock frequency in Hz
    #[arg(long, default_value_t = 1_000_000)]
    pub(crate) clock_hz: u32,
    /// BCM GPIO number of the chip select line
    #[arg(long, default_value_t = 8)]
    pub(crate) cs_pin: u8,
    /// BCM GPIO number of the DRDY line
    #[arg(long, default_value_t = 25)]
    pub(crate) drdy_pin: u8,
    /// Set a configuration field for the command, as FIELD=VALUE.
    ///
    /// May be given more than once; fields are set in order, after any reset
    /// the command performs.
    #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = util::field_setting)]
    pub(crate) settings: Vec<FieldSetting>,
    /// Log driver activity at debug level, overriding RUST_LOG.
    #[arg(short, long)]
    pub(crate) verbose: bool,
    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Debug, Parser)]
pub(crate) enum Commands {
    /// Measure the die temperature with the internal sensor.
    Temperature,
    /// Monitor the analog supply voltage through the (AVDD - AVSS) / 4 input.
    Supply {
        /// Stop after this many readings instead of running until interrupted.
        #[arg(short = 'n', long)]
        count: Option<u32>,
    },
    /// Measure the temperature once, then monitor the supply voltage.
    Demo,
    /// Run a single-shot conversion and print the result.
    ///
    /// The voltage is shown when the internal reference is selected.
    Read,
    /// Print the configuration registers.
    Registers,
    /// Enter power-down mode.
    PowerDown,
    /// Reset the ADS1220 to its default configuration.
    Reset,
}
