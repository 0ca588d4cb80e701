//! Tunables for rockets, bursts, and the explosion flash
//!
//! All tables deserialize from TOML with every field optional; the defaults
//! reproduce the festival scene as shipped.

use serde::{de, Deserialize, Deserializer, Serialize};
use utsav_core::{Color, Result, UtsavError};

/// Blend mode for particle rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticleBlendMode {
    Alpha,
    Additive,
}

/// Which burst preset to spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurstPreset {
    /// Large cloud left behind by an exploding rocket
    Firework,
    /// Small upward puff where the rangoli canvas was clicked
    Sparkle,
}

/// Rocket launch parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RocketConfig {
    /// Full width of the horizontal drift before normalization
    pub drift: f32,
    /// Distance covered per reference frame
    pub speed: f32,
    /// Frame rate the per-frame speed was tuned for
    pub reference_fps: f32,
    /// Height above the launch point where the apex window starts
    pub apex_base: f32,
    /// Random extra apex height in [0, apex_jitter)
    pub apex_jitter: f32,
    /// Colors an exploding rocket may burst into (`#rrggbb`)
    pub palette: Vec<String>,
}

impl Default for RocketConfig {
    fn default() -> Self {
        Self {
            drift: 0.25,
            speed: 0.35,
            reference_fps: 60.0,
            apex_base: 5.0,
            apex_jitter: 1.2,
            palette: (0..8)
                .map(|i| Color::from_hsl(i as f32 * 45.0, 1.0, 0.7).to_hex_string())
                .collect(),
        }
    }
}

impl RocketConfig {
    pub fn validate(&self) -> Result<()> {
        require_non_negative("rocket.drift", self.drift)?;
        require_positive("rocket.speed", self.speed)?;
        require_positive("rocket.reference_fps", self.reference_fps)?;
        require_positive("rocket.apex_base", self.apex_base)?;
        require_non_negative("rocket.apex_jitter", self.apex_jitter)?;
        self.colors().map(|_| ())
    }

    /// Parsed burst palette; rejects an empty list or malformed entries
    pub fn colors(&self) -> Result<Vec<Color>> {
        parse_palette("rocket.palette", &self.palette)
    }
}

/// Shape and timing of one burst preset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BurstConfig {
    /// Particles per burst
    pub count: usize,
    /// Seconds until the burst is gone
    pub lifetime: f64,
    /// Maximum angle from vertical, in degrees (180 = full sphere)
    pub spread: f32,
    pub offset_min: f32,
    pub offset_max: f32,
    pub horizontal_speed_min: f32,
    pub horizontal_speed_max: f32,
    pub vertical_speed_min: f32,
    pub vertical_speed_max: f32,
    /// Downward pull; the position term is `-gravity * t^2`
    pub gravity: f32,
    pub fade_exponent: f32,
    pub point_size: f32,
    pub blend_mode: ParticleBlendMode,
    /// Height at which a sparkle appears above the clicked canvas point
    pub spawn_height: f32,
    /// Draw one speed per particle from the horizontal range and apply it
    /// along the whole direction (a spherical shell) instead of per axis
    pub uniform_speed: bool,
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self::sparkle()
    }
}

impl BurstConfig {
    pub fn firework() -> Self {
        Self {
            count: 220,
            lifetime: 4.5,
            spread: 180.0,
            offset_min: 0.0,
            offset_max: 0.0,
            horizontal_speed_min: 6.0,
            horizontal_speed_max: 24.0,
            vertical_speed_min: 6.0,
            vertical_speed_max: 24.0,
            gravity: 1.5,
            fade_exponent: 1.0,
            point_size: 130.0,
            blend_mode: ParticleBlendMode::Alpha,
            spawn_height: 0.0,
            uniform_speed: true,
        }
    }

    pub fn sparkle() -> Self {
        Self {
            count: 64,
            lifetime: 1.1,
            spread: 45.0,
            offset_min: 0.02,
            offset_max: 0.08,
            horizontal_speed_min: 0.01,
            horizontal_speed_max: 0.14,
            vertical_speed_min: 0.054,
            vertical_speed_max: 0.5,
            gravity: 0.6,
            fade_exponent: 1.2,
            point_size: 40.0,
            blend_mode: ParticleBlendMode::Additive,
            spawn_height: 0.12,
            uniform_speed: false,
        }
    }

    pub fn spread_radians(&self) -> f32 {
        self.spread.to_radians()
    }

    pub fn validate(&self, table: &str) -> Result<()> {
        if self.count == 0 {
            return Err(UtsavError::invalid(format!(
                "{table}.count must be positive"
            )));
        }
        if !(self.lifetime.is_finite() && self.lifetime > 0.0) {
            return Err(UtsavError::invalid(format!(
                "{table}.lifetime must be positive, got {}",
                self.lifetime
            )));
        }
        require_non_negative(&format!("{table}.spread"), self.spread)?;
        require_ordered(table, "offset", self.offset_min, self.offset_max)?;
        require_ordered(
            table,
            "horizontal_speed",
            self.horizontal_speed_min,
            self.horizontal_speed_max,
        )?;
        require_ordered(
            table,
            "vertical_speed",
            self.vertical_speed_min,
            self.vertical_speed_max,
        )?;
        require_non_negative(&format!("{table}.gravity"), self.gravity)?;
        require_positive(&format!("{table}.fade_exponent"), self.fade_exponent)?;
        require_positive(&format!("{table}.point_size"), self.point_size)?;
        if !self.spawn_height.is_finite() {
            return Err(UtsavError::invalid(format!(
                "{table}.spawn_height must be finite, got {}",
                self.spawn_height
            )));
        }
        Ok(())
    }
}

/// Explosion flash timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlashConfig {
    pub duration: f64,
    pub peak: f32,
}

impl Default for FlashConfig {
    fn default() -> Self {
        Self {
            duration: 0.35,
            peak: 1.0,
        }
    }
}

impl FlashConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.duration.is_finite() && self.duration > 0.0) {
            return Err(UtsavError::invalid(format!(
                "flash.duration must be positive, got {}",
                self.duration
            )));
        }
        require_non_negative("flash.peak", self.peak)
    }
}

/// Everything the effect registry needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectConfig {
    pub rocket: RocketConfig,
    #[serde(deserialize_with = "firework_table")]
    pub firework: BurstConfig,
    #[serde(deserialize_with = "sparkle_table")]
    pub sparkle: BurstConfig,
    pub flash: FlashConfig,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            rocket: RocketConfig::default(),
            firework: BurstConfig::firework(),
            sparkle: BurstConfig::sparkle(),
            flash: FlashConfig::default(),
        }
    }
}

impl EffectConfig {
    pub fn validate(&self) -> Result<()> {
        self.rocket.validate()?;
        self.firework.validate("firework")?;
        self.sparkle.validate("sparkle")?;
        self.flash.validate()
    }

    pub fn burst(&self, preset: BurstPreset) -> &BurstConfig {
        match preset {
            BurstPreset::Firework => &self.firework,
            BurstPreset::Sparkle => &self.sparkle,
        }
    }
}

/// `deserialize_with` helper: a partial table overlays the firework preset
pub fn firework_table<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<BurstConfig, D::Error> {
    overlay_burst(BurstConfig::firework(), d)
}

/// `deserialize_with` helper: a partial table overlays the sparkle preset
pub fn sparkle_table<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<BurstConfig, D::Error> {
    overlay_burst(BurstConfig::sparkle(), d)
}

/// Fields missing from a burst table fall back to that preset, not to `Default`
fn overlay_burst<'de, D: Deserializer<'de>>(
    base: BurstConfig,
    d: D,
) -> std::result::Result<BurstConfig, D::Error> {
    let patch = toml::Table::deserialize(d)?;
    let mut merged = toml::Value::try_from(base).map_err(de::Error::custom)?;
    if let Some(table) = merged.as_table_mut() {
        for (key, value) in patch {
            table.insert(key, value);
        }
    }
    merged.try_into().map_err(de::Error::custom)
}

/// Parse a list of `#rrggbb` strings
pub fn parse_palette(field: &str, entries: &[String]) -> Result<Vec<Color>> {
    if entries.is_empty() {
        return Err(UtsavError::invalid(format!("{field} must not be empty")));
    }
    entries
        .iter()
        .map(|s| {
            Color::parse_hex(s).ok_or_else(|| {
                UtsavError::invalid(format!("{field}: '{s}' is not a #rrggbb color"))
            })
        })
        .collect()
}

fn require_positive(field: &str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(UtsavError::invalid(format!(
            "{field} must be positive, got {value}"
        )))
    }
}

fn require_non_negative(field: &str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(UtsavError::invalid(format!(
            "{field} must not be negative, got {value}"
        )))
    }
}

fn require_ordered(table: &str, name: &str, min: f32, max: f32) -> Result<()> {
    require_non_negative(&format!("{table}.{name}_min"), min)?;
    require_non_negative(&format!("{table}.{name}_max"), max)?;
    if min > max {
        return Err(UtsavError::invalid(format!(
            "{table}.{name}_min ({min}) exceeds {table}.{name}_max ({max})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = EffectConfig::default();
        config.validate().unwrap();
        assert_eq!(config.firework.count, 220);
        assert_eq!(config.sparkle.count, 64);
        assert_eq!(config.rocket.colors().unwrap().len(), 8);
    }

    #[test]
    fn parse_partial_toml() {
        let toml_str = r##"
[rocket]
apex_base = 8.0
palette = ["#ff0000", "#00ff00"]

[sparkle]
count = 12
blend_mode = "alpha"
"##;
        let config: EffectConfig = toml::from_str(toml_str).unwrap();
        assert!((config.rocket.apex_base - 8.0).abs() < 1e-6);
        assert!((config.rocket.speed - 0.35).abs() < 1e-6);
        assert_eq!(config.rocket.colors().unwrap().len(), 2);
        assert_eq!(config.sparkle.count, 12);
        assert_eq!(config.sparkle.blend_mode, ParticleBlendMode::Alpha);
        assert_eq!(config.firework, BurstConfig::firework());
        config.validate().unwrap();
    }

    #[test]
    fn non_finite_spawn_height_is_rejected() {
        let config: EffectConfig = toml::from_str("[sparkle]\nspawn_height = nan\n").unwrap();
        assert!(config.sparkle.spawn_height.is_nan());
        assert!(matches!(
            config.validate(),
            Err(UtsavError::InvalidArgument(_))
        ));

        let config: EffectConfig = toml::from_str("[sparkle]\nspawn_height = inf\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn only_the_firework_preset_uses_one_speed() {
        assert!(BurstConfig::firework().uniform_speed);
        assert!(!BurstConfig::sparkle().uniform_speed);
        let config: EffectConfig = toml::from_str("[firework]\nuniform_speed = false\n").unwrap();
        assert!(!config.firework.uniform_speed);
        assert_eq!(config.firework.count, 220);
    }

    #[test]
    fn partial_firework_table_keeps_firework_defaults() {
        let config: EffectConfig = toml::from_str("[firework]\ncount = 10\n").unwrap();
        assert_eq!(config.firework.count, 10);
        assert!((config.firework.lifetime - 4.5).abs() < 1e-9);
        assert_eq!(config.firework.blend_mode, ParticleBlendMode::Alpha);
        assert_eq!(config.sparkle, BurstConfig::sparkle());
    }

    #[test]
    fn rejects_non_positive_lifetime_and_count() {
        let mut burst = BurstConfig::sparkle();
        burst.lifetime = 0.0;
        assert!(matches!(
            burst.validate("sparkle"),
            Err(UtsavError::InvalidArgument(_))
        ));

        let mut burst = BurstConfig::firework();
        burst.count = 0;
        assert!(matches!(
            burst.validate("firework"),
            Err(UtsavError::InvalidArgument(_))
        ));
    }

    #[test]
    fn rejects_inverted_ranges() {
        let mut burst = BurstConfig::sparkle();
        burst.offset_min = 1.0;
        burst.offset_max = 0.5;
        let err = burst.validate("sparkle").unwrap_err();
        assert!(err.to_string().contains("offset_min"));
    }

    #[test]
    fn rejects_bad_palette() {
        let mut rocket = RocketConfig::default();
        rocket.palette = vec!["orange".into()];
        assert!(rocket.validate().is_err());
        rocket.palette.clear();
        assert!(rocket.validate().is_err());
    }
}
