//! Diya garden command

use super::{print_json, Format};
use crate::config::FestivalConfig;
use crate::scene::FestivalScene;
use anyhow::Result;
use serde::Serialize;
use utsav_decor::{flame_intensity, Lamp};
use utsav_runtime::{GameEvent, InputEvent};

#[derive(Debug, Serialize)]
pub struct GardenReport {
    pub lamps: Vec<Lamp>,
    pub lit: usize,
    pub all_lit: bool,
    /// Position in the toggle list at which every lamp became lit
    pub all_lit_after: Option<usize>,
    pub flame_intensity: f32,
}

pub fn run(toggles: &[usize], format: &str, config: &FestivalConfig) -> Result<()> {
    let format = Format::parse(format)?;
    let report = toggle(toggles, config)?;
    match format {
        Format::Json => print_json(&report),
        Format::Text => {
            for lamp in &report.lamps {
                println!(
                    "  diya {:>2} at ({:>5.2}, {:>5.2})  {}",
                    lamp.index,
                    lamp.position.x,
                    lamp.position.z,
                    if lamp.lit { "lit" } else { "dark" }
                );
            }
            println!("{}/{} lit", report.lit, report.lamps.len());
            if let Some(step) = report.all_lit_after {
                println!("Every diya was lit after toggle #{}", step + 1);
            }
            Ok(())
        }
    }
}

pub fn toggle(toggles: &[usize], config: &FestivalConfig) -> Result<GardenReport> {
    let mut scene: FestivalScene = FestivalScene::new(config, 0)?;
    let mut all_lit_after = None;
    for (step, &index) in toggles.iter().enumerate() {
        scene.handle(InputEvent::LampClick { index })?;
        if scene.drain_events().contains(&GameEvent::AllLampsLit) && all_lit_after.is_none() {
            all_lit_after = Some(step);
        }
    }

    let ring = scene.lamps();
    Ok(GardenReport {
        lamps: ring.lamps().to_vec(),
        lit: ring.lit_count(),
        all_lit: ring.all_lit(),
        all_lit_after,
        flame_intensity: flame_intensity(scene.now()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use utsav_decor::LampConfig;

    fn config(count: usize) -> FestivalConfig {
        FestivalConfig {
            lamps: LampConfig { count, radius: 3.2 },
            ..Default::default()
        }
    }

    #[test]
    fn reports_the_all_lit_moment() {
        let report = toggle(&[0, 1, 1, 2, 1], &config(3)).unwrap();
        assert!(report.all_lit);
        assert_eq!(report.lit, 3);
        assert_eq!(report.all_lit_after, Some(4));
    }

    #[test]
    fn partial_garden_is_not_all_lit() {
        let report = toggle(&[0], &config(4)).unwrap();
        assert!(!report.all_lit);
        assert_eq!(report.all_lit_after, None);
        assert!(report.lamps[0].lit);
    }

    #[test]
    fn unknown_lamp_fails() {
        assert!(toggle(&[10], &config(10)).is_err());
    }
}
