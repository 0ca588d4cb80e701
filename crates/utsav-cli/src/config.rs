//! `utsav.toml` loading
//!
//! Every table is optional; missing tables and missing keys keep their defaults.
//! A partial `[firework]` or `[sparkle]` table overlays its own preset.

use serde::{Deserialize, Serialize};
use std::path::Path;
use utsav_core::Result;
use utsav_decor::{LampConfig, RangoliConfig};
use utsav_particles::config::{firework_table, sparkle_table};
use utsav_particles::{BurstConfig, EffectConfig, FlashConfig, RocketConfig};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FestivalConfig {
    pub rocket: RocketConfig,
    #[serde(deserialize_with = "firework_table")]
    pub firework: BurstConfig,
    #[serde(deserialize_with = "sparkle_table")]
    pub sparkle: BurstConfig,
    pub flash: FlashConfig,
    pub rangoli: RangoliConfig,
    pub lamps: LampConfig,
}

impl Default for FestivalConfig {
    fn default() -> Self {
        let effects = EffectConfig::default();
        Self {
            rocket: effects.rocket,
            firework: effects.firework,
            sparkle: effects.sparkle,
            flash: effects.flash,
            rangoli: RangoliConfig::default(),
            lamps: LampConfig::default(),
        }
    }
}

impl FestivalConfig {
    /// Read and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: FestivalConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.effects().validate()?;
        self.rangoli.validate()?;
        self.lamps.validate()
    }

    /// The subset owned by the effect registry
    pub fn effects(&self) -> EffectConfig {
        EffectConfig {
            rocket: self.rocket.clone(),
            firework: self.firework.clone(),
            sparkle: self.sparkle.clone(),
            flash: self.flash.clone(),
        }
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
