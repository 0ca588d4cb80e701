//! CLI command implementations

pub mod config;
pub mod fireworks;
pub mod garden;
pub mod rangoli;

use anyhow::{bail, Result};
use serde::Serialize;

/// Output format shared by the reporting commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
}

impl Format {
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(Format::Text),
            "json" => Ok(Format::Json),
            _ => bail!("Unknown format: {} (expected text or json)", s),
        }
    }
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
