//! Source registry
//!
//! Resolves a source string to exactly one connector.

use crate::handle::SourceHandle;
use mtkeepmgr_core::{Error, Result};

/// Parsed source string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSpec {
    /// Canonical source name ("file", "usb")
    pub name: String,
    /// Everything after the first `:`, passed to the connector untouched
    pub arg: String,
}

/// Parse a source string
///
/// Format: `name` or `name:arg`. A string that does not start with a known
/// source name is taken as a dump file path.
///
/// # Example
/// ```
/// use mtkeepmgr_source::parse_source_spec;
///
/// let spec = parse_source_spec("usb:1/2/");
/// assert_eq!(spec.name, "usb");
/// assert_eq!(spec.arg, "1/2/");
///
/// let spec = parse_source_spec("dumps/eeprom.bin");
/// assert_eq!(spec.name, "file");
/// ```
pub fn parse_source_spec(s: &str) -> SourceSpec {
    let (name, arg) = s.split_once(':').unwrap_or((s, ""));
    let canonical = available_sources()
        .into_iter()
        .find(|info| info.name.eq_ignore_ascii_case(name) || info.aliases.contains(&name));

    match canonical {
        Some(info) if info.takes_bare_name || s.contains(':') => SourceSpec {
            name: info.name.to_string(),
            arg: arg.to_string(),
        },
        _ => SourceSpec {
            name: "file".to_string(),
            arg: s.to_string(),
        },
    }
}

/// Open an image source by string
///
/// # Example
/// ```ignore
/// use mtkeepmgr_source::open_source;
///
/// let mut handle = open_source("usb:148f:761a")?;
/// let image = handle.acquire()?;
/// // connector released when `handle` is dropped
/// ```
pub fn open_source(source: &str) -> Result<SourceHandle> {
    let spec = parse_source_spec(source);
    log::debug!("Source '{}' resolved to {}:{}", source, spec.name, spec.arg);

    match spec.name.as_str() {
        #[cfg(feature = "file")]
        "file" => Ok(SourceHandle::new(mtkeepmgr_file::open_file(&spec.arg)?)),

        #[cfg(feature = "usb")]
        "usb" => Ok(SourceHandle::new(mtkeepmgr_usb::open_usb(&spec.arg)?)),

        _ => Err(Error::Config(format!(
            "source '{}' is not available (supported: {})",
            spec.name,
            source_names_short()
        ))),
    }
}

/// Information about a source kind
pub struct SourceInfo {
    /// Primary name (used for matching)
    pub name: &'static str,
    /// Alternative names
    pub aliases: &'static [&'static str],
    /// Name alone, without `:`, selects this source
    pub takes_bare_name: bool,
    /// Short description
    pub description: &'static str,
}

/// Sources enabled at compile time
#[allow(unused_mut, clippy::vec_init_then_push)]
pub fn available_sources() -> Vec<SourceInfo> {
    let mut sources = Vec::new();

    #[cfg(feature = "file")]
    sources.push(SourceInfo {
        name: "file",
        aliases: &[],
        takes_bare_name: false,
        description: "Raw EEPROM dump file (file:<path>, or just <path>)",
    });

    #[cfg(feature = "usb")]
    sources.push(SourceInfo {
        name: "usb",
        aliases: &[],
        takes_bare_name: true,
        description: "MT76x0U dongle (usb[:<VID:PID|bus:addr|bus/port[/port...][/]>[,...]])",
    });

    sources
}

/// Short list of source names for CLI help
pub fn source_names_short() -> String {
    let sources = available_sources();
    if sources.is_empty() {
        return "none (recompile with features)".to_string();
    }
    let names: Vec<&str> = sources.iter().map(|s| s.name).collect();
    names.join(", ")
}
