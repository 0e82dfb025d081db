use clap::Parser;
use rppal::hal::Delay;
use tracing_subscriber::EnvFilter;

use cli::Commands;

mod bus;
mod cli;
mod measure;
mod util;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_logging(cli.verbose);

    let (mut adc, mut drdy) = bus::open(&cli)?;
    let settings = &cli.settings;

    // Flows that reset the ADS1220 apply the settings after their own reset.
    match cli.command {
        Commands::Temperature => measure::temperature(&mut adc, &mut drdy, settings)?,
        Commands::Supply { count } => measure::supply(&mut adc, &mut drdy, settings, count)?,
        Commands::Demo => {
            measure::temperature(&mut adc, &mut drdy, settings)?;
            measure::supply(&mut adc, &mut drdy, settings, None)?;
        }
        Commands::Read => {
            measure::apply_settings(&mut adc, settings)?;
            measure::read(&mut adc, &mut drdy)?;
        }
        Commands::Registers => {
            measure::apply_settings(&mut adc, settings)?;
            print!("{}", adc.registers());
        }
        Commands::PowerDown => {
            measure::apply_settings(&mut adc, settings)?;
            adc.power_down()?;
        }
        Commands::Reset => measure::reset_with_settings(&mut adc, settings, &mut Delay::new())?,
    }
    Ok(())
}

/// Send log output to stderr, filtered by RUST_LOG (default `info`).
///
/// The driver logs through the `log` crate, which the subscriber picks up.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
