//! Print the effective configuration

use crate::config::FestivalConfig;
use anyhow::Result;

pub fn run(config: &FestivalConfig) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}
