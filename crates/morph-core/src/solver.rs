use std::sync::Arc;

use glam::{Mat4, Vec2};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{GlyphConfig, MorphConfig};
use crate::control::{control_value, ControlCell, HandData};
use crate::error::{MorphError, Result};
use crate::integrator::relax_toward;
use crate::math::smoothing_factor;
use crate::particle::ParticleSet;
use crate::render::{Color, RenderStyle};
use crate::shapes::dispatcher::ShapeModel;
use crate::shapes::glyph::{AlphaMask, GlyphCache, GlyphPointTable};
use crate::target::{TargetField, TargetSnapshot};

/// Owns the particle cloud and drives it one frame at a time.
pub struct Solver {
    pub particles: ParticleSet,
    pub config: MorphConfig,
    pub style: RenderStyle,
    targets: TargetField,
    control: ControlCell,
    glyphs: GlyphCache,
    rng: StdRng,
    rotation_y: f32,
    frames: u64,
}

impl Solver {
    pub fn new(config: MorphConfig) -> Result<Self> {
        config.validate()?;
        let count = config.particle_count;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut particles = ParticleSet::new(count);
        particles.scatter(&mut rng, config.spawn_extent);

        let mut solver = Self {
            particles,
            config,
            style: RenderStyle::default(),
            targets: TargetField::new(count),
            control: ControlCell::new(),
            glyphs: GlyphCache::new(GlyphConfig::default()),
            rng,
            rotation_y: 0.0,
            frames: 0,
        };

        // Rasterize every text model up front so switching to one later
        // does not stall a frame.
        for model in ShapeModel::ALL.into_iter().filter(|m| m.is_text()) {
            let table = solver.glyph_table(model);
            debug!("warmed {model}: {} glyph points", table.len());
        }
        solver.set_model(ShapeModel::default());

        info!("solver created: {count} particles");
        Ok(solver)
    }

    /// Default configuration with a different particle count.
    pub fn with_particle_count(count: usize) -> Result<Self> {
        Self::new(MorphConfig {
            particle_count: count,
            ..MorphConfig::default()
        })
    }

    /// Advance one rendered frame.
    ///
    /// `dt` is the frame length in seconds and only matters when
    /// `frame_rate_independent` is set. `time` is the elapsed animation time
    /// driving the jitter phase.
    pub fn step(&mut self, dt: f32, time: f32) {
        let hand = self.control.latest();
        let control = control_value(hand.as_ref());
        let targets = self.targets.snapshot();

        let k = smoothing_factor(
            self.config.smoothing,
            dt,
            self.config.reference_dt,
            self.config.frame_rate_independent,
        );
        let time = if time.is_finite() { time } else { 0.0 };

        relax_toward(
            &mut self.particles.position,
            &targets.points,
            control,
            k,
            self.config.jitter_amplitude,
            time,
        );

        let speed = if targets.model.is_text() {
            self.config.text_rotation_speed
        } else {
            self.config.rotation_speed
        };
        let frames = if self.config.frame_rate_independent && dt.is_finite() && dt > 0.0 {
            dt / self.config.reference_dt
        } else if self.config.frame_rate_independent {
            0.0
        } else {
            1.0
        };
        self.rotation_y = (self.rotation_y + speed * frames) % std::f32::consts::TAU;
        self.frames += 1;
    }

    /// Switch the target geometry. Targets are rebuilt before this returns.
    pub fn set_model(&mut self, model: ShapeModel) -> u64 {
        let table = self.glyph_table(model);
        if model.is_text() && table.is_empty() {
            warn!("{model} has no glyph points; its particles collapse to the origin");
        }
        let depth = self.glyphs.config().depth_jitter;
        self.targets.regenerate(model, &table, depth, &mut self.rng)
    }

    pub fn model(&self) -> ShapeModel {
        self.targets.model()
    }

    pub fn targets(&self) -> TargetSnapshot {
        self.targets.snapshot()
    }

    /// Handle for the hand tracker; it may live on another thread.
    pub fn control_cell(&self) -> ControlCell {
        self.control.clone()
    }

    pub fn publish_hand(&self, hand: Option<HandData>) {
        self.control.publish(hand);
    }

    /// Scale factor the next step will use.
    pub fn control_value(&self) -> f32 {
        control_value(self.control.latest().as_ref())
    }

    pub fn set_color(&mut self, hex: &str) -> Result<()> {
        match Color::from_hex(hex) {
            Ok(color) => {
                self.style.color = color;
                Ok(())
            }
            Err(err) => {
                warn!("keeping color {}: {err}", self.style.color.to_hex());
                Err(err)
            }
        }
    }

    /// Change the greeting text; the targets follow if it is on screen.
    pub fn set_greeting(&mut self, text: &str, font_size: u32) -> Result<()> {
        if font_size == 0 {
            return Err(MorphError::InvalidConfig(
                "greeting_font_size must be positive".into(),
            ));
        }
        let old_text = std::mem::replace(&mut self.config.greeting_text, text.to_string());
        let old_size = std::mem::replace(&mut self.config.greeting_font_size, font_size);
        let replaced = (old_text.as_str(), old_size) != (text, font_size);
        if replaced && !self.is_fixed_text(&old_text, old_size) {
            self.glyphs.remove(&old_text, old_size);
        }

        if self.model() == ShapeModel::GreetingText {
            self.set_model(ShapeModel::GreetingText);
        } else {
            self.glyph_table(ShapeModel::GreetingText);
        }
        Ok(())
    }

    /// Provide a host-rendered alpha mask for a text model, e.g. for scripts
    /// the built-in bitmap font lacks. Regenerates if that model is active.
    pub fn insert_text_mask(&mut self, model: ShapeModel, mask: &AlphaMask) -> Result<()> {
        let (text, size) = model
            .text_source(&self.config.greeting_text, self.config.greeting_font_size)
            .ok_or_else(|| MorphError::UnknownModel(format!("{model} is not a text model")))?;
        let text = text.to_string();
        self.glyphs.insert_mask(&text, size, mask, &mut self.rng);
        if self.model() == model {
            self.set_model(model);
        }
        Ok(())
    }

    /// Scatter live positions again, as at startup.
    pub fn reinitialize(&mut self) {
        self.particles.scatter(&mut self.rng, self.config.spawn_extent);
        self.rotation_y = 0.0;
    }

    /// Accumulated Y rotation of the whole cloud, in radians.
    pub fn rotation_y(&self) -> f32 {
        self.rotation_y
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_y(self.rotation_y)
    }

    pub fn glyph_cache(&self) -> &GlyphCache {
        &self.glyphs
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn positions_flat(&self) -> &[f32] {
        self.particles.as_flat()
    }

    /// True when a built-in text model draws `(text, size)`.
    fn is_fixed_text(&self, text: &str, size: u32) -> bool {
        ShapeModel::ALL
            .into_iter()
            .filter(|&m| m != ShapeModel::GreetingText)
            .filter_map(|m| m.text_source("", 0))
            .any(|source| source == (text, size))
    }

    fn glyph_table(&mut self, model: ShapeModel) -> GlyphPointTable {
        match model.text_source(&self.config.greeting_text, self.config.greeting_font_size) {
            Some((text, size)) => {
                let text = text.to_string();
                self.glyphs.table(&text, size, &mut self.rng)
            }
            None => Arc::<[Vec2]>::from(Vec::new()),
        }
    }
}
