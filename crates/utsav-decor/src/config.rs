//! Decoration tunables

use serde::{Deserialize, Serialize};
use utsav_core::{Color, Result, UtsavError};
use utsav_particles::config::parse_palette;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangoliConfig {
    /// Petals per click
    pub symmetry: u32,
    /// Petals float just above the canvas
    pub mark_height: f32,
    pub palette: Vec<String>,
}

impl Default for RangoliConfig {
    fn default() -> Self {
        Self {
            symmetry: 8,
            mark_height: 0.05,
            palette: ["#ff66aa", "#66ffcc", "#ffd966", "#66a3ff", "#ff9966", "#cc99ff"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl RangoliConfig {
    pub fn validate(&self) -> Result<()> {
        if self.symmetry == 0 {
            return Err(UtsavError::invalid("rangoli.symmetry must be at least 1"));
        }
        if !self.mark_height.is_finite() {
            return Err(UtsavError::invalid("rangoli.mark_height must be finite"));
        }
        self.colors().map(|_| ())
    }

    pub fn colors(&self) -> Result<Vec<Color>> {
        parse_palette("rangoli.palette", &self.palette)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LampConfig {
    pub count: usize,
    pub radius: f32,
}

impl Default for LampConfig {
    fn default() -> Self {
        Self {
            count: 10,
            radius: 3.2,
        }
    }
}

impl LampConfig {
    pub fn validate(&self) -> Result<()> {
        if self.count == 0 {
            return Err(UtsavError::invalid("lamps.count must be positive"));
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(UtsavError::invalid(format!(
                "lamps.radius must be positive, got {}",
                self.radius
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        RangoliConfig::default().validate().unwrap();
        LampConfig::default().validate().unwrap();
        assert_eq!(RangoliConfig::default().colors().unwrap().len(), 6);
    }

    #[test]
    fn zero_symmetry_is_rejected() {
        let config: RangoliConfig = toml::from_str("symmetry = 0").unwrap();
        assert!(matches!(
            config.validate(),
            Err(UtsavError::InvalidArgument(_))
        ));
    }

    #[test]
    fn lamp_ring_needs_lamps() {
        let config = LampConfig {
            count: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
