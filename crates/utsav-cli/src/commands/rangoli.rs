//! Rangoli painting command

use super::{print_json, Format};
use crate::config::FestivalConfig;
use crate::scene::FestivalScene;
use anyhow::Result;
use serde::Serialize;
use utsav_core::Vec3;
use utsav_runtime::{GameEvent, InputEvent};

pub struct RangoliArgs {
    pub points: Vec<[f32; 2]>,
    pub symmetry: Option<u32>,
    pub undo: usize,
    pub clear: bool,
    pub seed: u32,
    pub format: String,
}

#[derive(Debug, Serialize)]
pub struct MarkRow {
    pub stroke: usize,
    pub position: Vec3,
    pub rotation: f32,
    pub color: String,
}

#[derive(Debug, Serialize)]
pub struct RangoliReport {
    pub symmetry: u32,
    pub strokes: usize,
    pub marks: Vec<MarkRow>,
    pub events: Vec<GameEvent>,
}

pub fn run(args: RangoliArgs, config: &FestivalConfig) -> Result<()> {
    let format = Format::parse(&args.format)?;
    let report = paint(&args, config)?;
    match format {
        Format::Json => print_json(&report),
        Format::Text => {
            println!(
                "Rangoli: {} stroke(s), {} petal(s), symmetry {}",
                report.strokes,
                report.marks.len(),
                report.symmetry
            );
            for mark in &report.marks {
                println!(
                    "  stroke {:>3}  ({:>6.3}, {:>6.3})  rot {:>6.3}  {}",
                    mark.stroke, mark.position.x, mark.position.z, mark.rotation, mark.color
                );
            }
            Ok(())
        }
    }
}

/// Paint every point, then apply the requested undos and the optional clear
pub fn paint(args: &RangoliArgs, config: &FestivalConfig) -> Result<RangoliReport> {
    let mut config = config.clone();
    if let Some(symmetry) = args.symmetry {
        config.rangoli.symmetry = symmetry;
    }
    let mut scene: FestivalScene = FestivalScene::new(&config, args.seed)?;

    for &[x, z] in &args.points {
        scene.handle(InputEvent::CanvasClick {
            point: Vec3::new(x, 0.0, z),
        })?;
    }
    for _ in 0..args.undo {
        scene.handle(InputEvent::Undo)?;
    }
    if args.clear {
        scene.handle(InputEvent::Clear)?;
    }

    let painter = scene.painter();
    let marks = painter
        .strokes()
        .iter()
        .flat_map(|stroke| {
            stroke.marks.iter().map(move |mark| MarkRow {
                stroke: stroke.number,
                position: mark.position(),
                rotation: mark.rotation(),
                color: mark.color().to_hex_string(),
            })
        })
        .collect();
    let strokes = painter.strokes().len();
    Ok(RangoliReport {
        symmetry: config.rangoli.symmetry,
        strokes,
        marks,
        events: scene.drain_events(),
    })
}
