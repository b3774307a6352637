use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::{info, warn};

use gate_driver::hal::{ChipSelect, SpiPort};
use gate_driver::mock_hal::MockBus;
use gate_driver::{Drv8305Config, Drv8305Driver, RegisterAddress, RegisterSnapshot};

/// Read and print the registers of a DRV8305 gate driver.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Use a simulated chip instead of the SPI bus
    #[arg(long)]
    mock: bool,

    /// JSON configuration file (bus, chip select pin, clock)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Only read this register address, e.g. 0x07
    #[arg(long, value_parser = parse_address)]
    register: Option<RegisterAddress>,
}

fn parse_address(s: &str) -> Result<RegisterAddress, String> {
    let digits = s.trim_start_matches("0x").trim_start_matches("0X");
    let value = u8::from_str_radix(digits, 16).map_err(|e| format!("'{}': {}", s, e))?;
    RegisterAddress::try_from(value).map_err(|e| e.to_string())
}

type BoxedDriver = Drv8305Driver<Box<dyn SpiPort>, Box<dyn ChipSelect>>;

fn mock_driver(config: &Drv8305Config) -> anyhow::Result<BoxedDriver> {
    let bus = MockBus::new();
    // Power-on defaults of the control registers
    bus.set_register(RegisterAddress::HsGateDriveControl, 0x344);
    bus.set_register(RegisterAddress::LsGateDriveControl, 0x344);
    bus.set_register(RegisterAddress::GateDriveControl, 0x296);
    bus.set_register(RegisterAddress::VoltageRegulatorControl, 0x10A);
    bus.set_register(RegisterAddress::VdsSenseControl, 0x2C8);
    let spi: Box<dyn SpiPort> = Box::new(bus.spi());
    let cs: Box<dyn ChipSelect> = Box::new(bus.chip_select());
    Ok(Drv8305Driver::new(spi, cs, config)?)
}

#[cfg(feature = "pi-hardware")]
fn hardware_driver(config: &Drv8305Config) -> anyhow::Result<BoxedDriver> {
    let (spi, cs) = gate_driver::rppal_hal::open(config).context("Failed to open SPI bus")?;
    let spi: Box<dyn SpiPort> = Box::new(spi);
    let cs: Box<dyn ChipSelect> = Box::new(cs);
    Ok(Drv8305Driver::new(spi, cs, config)?)
}

#[cfg(not(feature = "pi-hardware"))]
fn hardware_driver(_config: &Drv8305Config) -> anyhow::Result<BoxedDriver> {
    anyhow::bail!("Built without the pi-hardware feature; use --mock")
}

fn report(snapshot: &RegisterSnapshot) {
    let wwr = &snapshot.warning_watchdog;
    if wwr.fault {
        warn!("fault: true");
    } else {
        info!("fault: false");
    }
    for (name, set) in [
        ("overtemperature", wwr.overtemp),
        ("PVDD overvoltage", wwr.pvdd_ov),
        ("PVDD undervoltage", wwr.pvdd_uv),
        ("charge pump undervoltage", wwr.vchp_uv),
        ("VDS overcurrent", wwr.vds_status),
    ] {
        if set {
            warn!("{}: true", name);
        }
    }
    if snapshot.overcurrent.any() {
        warn!("overcurrent: {:?}", snapshot.overcurrent);
    }

    println!("{:#?}", snapshot);
    println!("PWM mode: {}", snapshot.drive_control.pwm_mode());
}

fn main() -> anyhow::Result<()> {
    // Reads RUST_LOG
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Drv8305Config::load(path)
            .with_context(|| format!("Could not load configuration from {}", path.display()))?,
        None => Drv8305Config::default(),
    };
    info!("Configuration: {:?}", config);

    let mut driver = if args.mock { mock_driver(&config)? } else { hardware_driver(&config)? };

    match args.register {
        Some(address) => {
            let response = driver.read_raw(address)?;
            println!("{} raw [{}]", address, response);
            println!("{:#?}", gate_driver::RegisterValue::decode(address, response));
        }
        None => {
            let snapshot = driver.snapshot()?;
            report(&snapshot);
        }
    }
    Ok(())
}
