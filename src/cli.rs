//! CLI argument parsing

use clap::{Parser, Subcommand};

/// Generate dynamic help text for the source argument
fn source_help() -> String {
    format!(
        "Image source: file:<path>, usb[:<selector>] or a dump path [available: {}]",
        mtkeepmgr_source::source_names_short()
    )
}

#[derive(Parser)]
#[command(name = "mtkeepmgr")]
#[command(author, version, about = "MediaTek/Ralink EEPROM calibration data decoder", long_about = None)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Read an EEPROM image, identify the chip and print the decoded fields
    Decode {
        /// Image source
        #[arg(short, long, help = source_help())]
        source: String,
    },

    /// List chips with a decoder
    ListChips,

    /// List image sources
    ListSources,

    /// List attached USB devices from the known device table
    ListUsb,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_decode() {
        let cli = Cli::try_parse_from(["mtkeepmgr", "-vv", "decode", "-s", "usb:1/2/"]).unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Decode { source } => assert_eq!(source, "usb:1/2/"),
            _ => panic!("expected decode"),
        }
    }

    #[test]
    fn test_decode_requires_source() {
        assert!(Cli::try_parse_from(["mtkeepmgr", "decode"]).is_err());
    }
}
