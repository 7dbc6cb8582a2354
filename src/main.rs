//! mtkeepmgr - MediaTek/Ralink EEPROM calibration data decoder
//!
//! Reads a calibration image from a dump file or straight from an MT76x0U
//! dongle, identifies the chip from the first EEPROM word and prints the
//! decoded fields.
//!
//! # Architecture
//!
//! - `mtkeepmgr-source` turns the `-s` argument into a connector and
//!   releases it when done
//! - `mtkeepmgr-core` holds the image, the chip registry and the decoders
//!
//! The run is strictly sequential: acquire, release, identify, decode, print.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use std::process::ExitCode;

fn main() -> ExitCode {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Set log level based on verbosity
    match cli.verbose {
        0 => {} // default (info)
        1 => log::set_max_level(log::LevelFilter::Debug),
        _ => log::set_max_level(log::LevelFilter::Trace),
    }

    let result = match cli.command {
        Commands::Decode { source } => commands::run_decode(&source),
        Commands::ListChips => {
            commands::list_chips();
            Ok(())
        }
        Commands::ListSources => {
            commands::list_sources();
            Ok(())
        }
        Commands::ListUsb => commands::list_usb(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("{:?}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
