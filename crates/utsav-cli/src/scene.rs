//! Scene controller: routes resolved input to the effect core and decorations,
//! and drives the frame loop.

use crate::config::FestivalConfig;
use log::{info, warn};
use utsav_core::{Color, EntityId, Result, UtsavError, Vec3};
use utsav_decor::{LampRing, SymmetryPainter};
use utsav_particles::{BurstPreset, FireworkSystem};
use utsav_runtime::{
    EventBus, GameClock, GameEvent, InputEvent, NullSink, RenderSink, RuntimeSystem, TimeSource,
    Visual,
};

/// Rocket launch positions, left to right
pub const LAUNCH_PADS: [Vec3; 3] = [
    Vec3::new(-3.0, -1.2, 0.0),
    Vec3::new(0.0, -1.2, 0.0),
    Vec3::new(3.0, -1.2, 0.0),
];

pub struct FestivalScene<S: RenderSink = NullSink> {
    fireworks: FireworkSystem<S>,
    painter: SymmetryPainter<S>,
    lamps: LampRing,
    symmetry: u32,
    rangoli_palette: Vec<Color>,
    clock: GameClock,
    events: EventBus,
}

impl<S: RenderSink + Default> FestivalScene<S> {
    pub fn new(config: &FestivalConfig, seed: u32) -> Result<Self> {
        config.validate()?;
        let mut fireworks = FireworkSystem::new(config.effects(), seed, S::default())?;
        fireworks.initialize()?;
        info!(
            "[scene] {} launch pads, {} lamps, rangoli symmetry {}",
            LAUNCH_PADS.len(),
            config.lamps.count,
            config.rangoli.symmetry
        );
        Ok(Self {
            fireworks,
            painter: SymmetryPainter::new(config.rangoli.mark_height, S::default()),
            lamps: LampRing::new(&config.lamps)?,
            symmetry: config.rangoli.symmetry,
            rangoli_palette: config.rangoli.colors()?,
            clock: GameClock::new(),
            events: EventBus::new(),
        })
    }
}

impl<S: RenderSink> FestivalScene<S> {
    /// Apply one input action.
    ///
    /// A refused action publishes `InputRejected` and leaves the scene unchanged.
    pub fn handle(&mut self, input: InputEvent) -> Result<()> {
        let result = self.apply(input);
        if let Err(err) = &result {
            warn!("[scene] input rejected: {err}");
            self.events.push(GameEvent::InputRejected {
                reason: err.to_string(),
            });
        }
        result
    }

    fn apply(&mut self, input: InputEvent) -> Result<()> {
        match input {
            InputEvent::LaunchPad { index } => {
                let pad = LAUNCH_PADS.get(index).copied().ok_or_else(|| {
                    UtsavError::invalid(format!(
                        "launch pad {index} does not exist (there are {})",
                        LAUNCH_PADS.len()
                    ))
                })?;
                self.fireworks.launch(pad, &mut self.events)?;
            }
            InputEvent::CanvasClick { point } => {
                self.paint(point)?;
            }
            InputEvent::Undo => {
                if let Some(stroke) = self.painter.undo() {
                    self.events.push(GameEvent::StrokeUndone {
                        stroke: stroke.number,
                        marks: stroke.marks.len(),
                    });
                }
            }
            InputEvent::Clear => {
                let marks = self.painter.clear();
                self.events.push(GameEvent::CanvasCleared { marks });
            }
            InputEvent::LampClick { index } => {
                let toggle = self.lamps.toggle(index)?;
                self.events.push(GameEvent::LampToggled {
                    index,
                    lit: toggle.lit,
                });
                if toggle.all_lit {
                    info!("[scene] every diya is lit");
                    self.events.push(GameEvent::AllLampsLit);
                }
            }
        }
        Ok(())
    }

    /// Paint a stroke and scatter a sparkle where the canvas was touched.
    ///
    /// The sparkle origin is checked before the stroke is recorded so a
    /// refused click leaves neither petals nor a burst behind.
    fn paint(&mut self, point: Vec3) -> Result<()> {
        let registry = self.fireworks.registry_mut();
        let origin = Vec3::new(point.x, registry.config().sparkle.spawn_height, point.z);
        if !origin.is_finite() {
            return Err(UtsavError::invalid(format!(
                "sparkle origin must be finite, got {origin:?}"
            )));
        }
        let stroke = self
            .painter
            .paint(point, self.symmetry, &self.rangoli_palette, registry.rng_mut())?;
        let (number, color, marks) = (stroke.number, stroke.color, stroke.marks.len());
        self.events.push(GameEvent::StrokePainted {
            stroke: number,
            marks,
        });

        let id = registry.spawn_burst(origin, color, BurstPreset::Sparkle, self.clock.now())?;
        self.events.push(GameEvent::BurstSpawned { id, origin });
        Ok(())
    }

    /// Longest step `step` applies without clamping
    pub fn max_step(&self) -> f64 {
        self.clock.max_delta
    }

    /// Advance the clock by `dt` and tick the effect core
    pub fn step(&mut self, dt: f64) -> Result<()> {
        self.clock.advance(dt);
        self.fireworks.update(&self.clock, &mut self.events)
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    pub fn fireworks(&self) -> &FireworkSystem<S> {
        &self.fireworks
    }

    pub fn painter(&self) -> &SymmetryPainter<S> {
        &self.painter
    }

    pub fn lamps(&self) -> &LampRing {
        &self.lamps
    }

    pub fn flash_intensity(&self) -> f32 {
        self.fireworks.flash().intensity(self.clock.now())
    }

    /// Every live visual: rockets, bursts, then rangoli petals
    pub fn visuals(&self) -> impl Iterator<Item = &dyn Visual> + '_ {
        self.fireworks
            .registry()
            .visuals()
            .chain(self.painter.visuals())
    }

    pub fn live_ids(&self) -> Vec<EntityId> {
        self.visuals().map(|v| v.id()).collect()
    }

    pub fn shutdown(&mut self) -> Result<()> {
        self.fireworks.shutdown()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use utsav_runtime::{RecordingSink, VisualKind};

    fn scene() -> FestivalScene<RecordingSink> {
        FestivalScene::new(&FestivalConfig::default(), 11).unwrap()
    }

    #[test]
    fn unknown_launch_pad_is_rejected() {
        let mut scene = scene();
        let err = scene.handle(InputEvent::LaunchPad { index: 3 }).unwrap_err();
        assert!(matches!(err, UtsavError::InvalidArgument(_)));
        assert!(matches!(
            scene.drain_events().as_slice(),
            [GameEvent::InputRejected { .. }]
        ));
        assert!(scene.fireworks().registry().is_idle());
    }

    #[test]
    fn rocket_from_pad_explodes_into_a_burst() {
        let mut scene = scene();
        scene.handle(InputEvent::LaunchPad { index: 2 }).unwrap();
        let launched = scene.fireworks().registry().projectiles()[0].position();
        assert_eq!(launched, LAUNCH_PADS[2]);

        while scene.fireworks().registry().bursts().is_empty() {
            scene.step(1.0 / 60.0).unwrap();
            assert!(scene.now() < 10.0, "rocket never exploded");
        }
        assert!(scene.fireworks().registry().projectiles().is_empty());
        assert!(scene.flash_intensity() > 0.0);
        let events = scene.drain_events();
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::RocketExploded { .. })));
    }

    #[test]
    fn painting_spawns_a_sparkle_in_the_stroke_color() {
        let mut scene = scene();
        scene
            .handle(InputEvent::CanvasClick {
                point: Vec3::new(1.0, 0.0, 0.5),
            })
            .unwrap();

        assert_eq!(scene.painter().mark_count(), 8);
        let stroke = scene.painter().strokes()[0].clone();
        let sparkle = &scene.fireworks().registry().bursts()[0];
        assert_eq!(sparkle.color(), stroke.color);
        assert!((sparkle.origin().x - 1.0).abs() < 1e-6);
        assert!((sparkle.origin().y - 0.12).abs() < 1e-6);
        assert!((sparkle.origin().z - 0.5).abs() < 1e-6);

        assert_eq!(sparkle.particles().len(), 64);

        let events = scene.drain_events();
        assert_eq!(
            events[0],
            GameEvent::StrokePainted {
                stroke: stroke.number,
                marks: 8
            }
        );
        assert!(matches!(events[1], GameEvent::BurstSpawned { .. }));
    }

    #[test]
    fn refused_click_leaves_no_petals_or_sparkle() {
        let mut scene = scene();
        let err = scene
            .handle(InputEvent::CanvasClick {
                point: Vec3::new(f32::NAN, 0.0, 1.0),
            })
            .unwrap_err();
        assert!(matches!(err, UtsavError::InvalidArgument(_)));
        assert_eq!(scene.painter().mark_count(), 0);
        assert!(scene.painter().sink().live().is_empty());
        assert!(scene.fireworks().registry().bursts().is_empty());
        assert!(matches!(
            scene.drain_events().as_slice(),
            [GameEvent::InputRejected { .. }]
        ));
    }

    #[test]
    fn non_finite_sparkle_height_never_reaches_the_scene() {
        let mut config = FestivalConfig::default();
        config.sparkle.spawn_height = f32::NAN;
        let scene: Result<FestivalScene> = FestivalScene::new(&config, 1);
        assert!(matches!(scene, Err(UtsavError::InvalidArgument(_))));
        assert!(FestivalConfig::from_toml("[sparkle]\nspawn_height = nan").is_err());
    }

    #[test]
    fn sparkle_fades_while_petals_persist() {
        let mut scene = scene();
        scene
            .handle(InputEvent::CanvasClick {
                point: Vec3::new(0.0, 0.0, 2.0),
            })
            .unwrap();
        for _ in 0..90 {
            scene.step(1.0 / 60.0).unwrap();
        }
        assert!(scene.fireworks().registry().bursts().is_empty());
        assert_eq!(scene.painter().mark_count(), 8);
        assert_eq!(
            scene
                .painter()
                .sink()
                .live_count(|k| matches!(k, VisualKind::Petal)),
            8
        );
    }

    #[test]
    fn undo_and_clear_publish_counts() {
        let mut scene = scene();
        for x in [1.0, 2.0] {
            scene
                .handle(InputEvent::CanvasClick {
                    point: Vec3::new(x, 0.0, 0.0),
                })
                .unwrap();
        }
        scene.drain_events();

        scene.handle(InputEvent::Undo).unwrap();
        scene.handle(InputEvent::Clear).unwrap();
        scene.handle(InputEvent::Undo).unwrap();
        let events = scene.drain_events();
        assert!(matches!(
            events.as_slice(),
            [
                GameEvent::StrokeUndone { marks: 8, .. },
                GameEvent::CanvasCleared { marks: 8 },
            ]
        ));
        assert_eq!(scene.painter().mark_count(), 0);
    }

    #[test]
    fn lighting_every_lamp_announces_it() {
        let config = FestivalConfig {
            lamps: utsav_decor::LampConfig {
                count: 2,
                radius: 1.0,
            },
            ..Default::default()
        };
        let mut scene: FestivalScene = FestivalScene::new(&config, 1).unwrap();
        scene.handle(InputEvent::LampClick { index: 0 }).unwrap();
        scene.handle(InputEvent::LampClick { index: 1 }).unwrap();
        assert!(scene.handle(InputEvent::LampClick { index: 5 }).is_err());

        let events = scene.drain_events();
        assert_eq!(events[1], GameEvent::LampToggled { index: 1, lit: true });
        assert_eq!(events[2], GameEvent::AllLampsLit);
        assert!(matches!(events[3], GameEvent::InputRejected { .. }));
    }

    #[test]
    fn visuals_cover_every_live_primitive() {
        let mut scene = scene();
        scene.handle(InputEvent::LaunchPad { index: 0 }).unwrap();
        scene
            .handle(InputEvent::CanvasClick {
                point: Vec3::new(1.0, 0.0, 1.0),
            })
            .unwrap();
        // rocket + sparkle + 8 petals
        assert_eq!(scene.live_ids().len(), 10);
    }
}
