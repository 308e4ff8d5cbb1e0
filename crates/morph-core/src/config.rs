use crate::error::{MorphError, Result};

/// Engine-wide tunables. `Default` reproduces the reference look at ~60 Hz.
#[derive(Clone, Debug, PartialEq)]
pub struct MorphConfig {
    pub particle_count: usize,
    /// Fraction of the remaining distance closed per frame (k).
    pub smoothing: f32,
    pub jitter_amplitude: f32,
    /// Y rotation per frame for geometric models, in radians.
    pub rotation_speed: f32,
    /// Y rotation per frame while a text model is shown.
    pub text_rotation_speed: f32,
    /// Edge length of the cube live positions are scattered in at startup.
    pub spawn_extent: f32,
    /// When set, smoothing and rotation are normalised against `reference_dt`.
    pub frame_rate_independent: bool,
    pub reference_dt: f32,
    pub seed: Option<u64>,
    pub greeting_text: String,
    pub greeting_font_size: u32,
}

impl Default for MorphConfig {
    fn default() -> Self {
        Self {
            particle_count: 15_000,
            smoothing: 0.08,
            jitter_amplitude: 0.01,
            rotation_speed: 0.002,
            text_rotation_speed: 0.0005,
            spawn_extent: 50.0,
            frame_rate_independent: false,
            reference_dt: 1.0 / 60.0,
            seed: None,
            greeting_text: "Happy Birthday, Friend".to_string(),
            greeting_font_size: 80,
        }
    }
}

impl MorphConfig {
    pub fn validate(&self) -> Result<()> {
        if self.particle_count == 0 {
            return Err(MorphError::InvalidConfig(
                "particle_count must be at least 1".into(),
            ));
        }
        if !(self.smoothing > 0.0 && self.smoothing <= 1.0) {
            return Err(MorphError::InvalidConfig(format!(
                "smoothing must be in (0, 1], got {}",
                self.smoothing
            )));
        }
        if !(self.reference_dt > 0.0 && self.reference_dt.is_finite()) {
            return Err(MorphError::InvalidConfig(format!(
                "reference_dt must be positive, got {}",
                self.reference_dt
            )));
        }
        if self.greeting_font_size == 0 {
            return Err(MorphError::InvalidConfig(
                "greeting_font_size must be positive".into(),
            ));
        }
        let finite = [
            ("jitter_amplitude", self.jitter_amplitude),
            ("rotation_speed", self.rotation_speed),
            ("text_rotation_speed", self.text_rotation_speed),
            ("spawn_extent", self.spawn_extent),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(MorphError::InvalidConfig(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Fixed constants of the text-to-point-cloud pipeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Sampling stride in pixels, both axes.
    pub step: u32,
    /// Pixels with alpha strictly above this are foreground.
    pub alpha_threshold: u8,
    /// Pixel to world units.
    pub world_scale: f32,
    /// Half-range of the random depth given to flat text.
    pub depth_jitter: f32,
}

impl Default for GlyphConfig {
    fn default() -> Self {
        Self {
            canvas_width: 1200,
            canvas_height: 400,
            step: 2,
            alpha_threshold: 128,
            world_scale: 0.08,
            depth_jitter: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(MorphConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_particles() {
        let config = MorphConfig {
            particle_count: 0,
            ..MorphConfig::default()
        };
        assert!(matches!(config.validate(), Err(MorphError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_out_of_range_smoothing() {
        for k in [0.0, -0.5, 1.5, f32::NAN] {
            let config = MorphConfig {
                smoothing: k,
                ..MorphConfig::default()
            };
            assert!(config.validate().is_err(), "smoothing {k} should be rejected");
        }
    }
}
