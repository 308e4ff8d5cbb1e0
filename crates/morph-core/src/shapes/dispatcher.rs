//! Shape model catalogue and per-particle target dispatch.

use std::f32::consts::TAU;
use std::fmt;
use std::str::FromStr;

use glam::{Vec2, Vec3};
use rand::Rng;

use crate::error::MorphError;
use crate::math::centered;
use crate::shapes::glyph::lookup;
use crate::shapes::primitives::*;

/// Curve density: the heart is traced this many times over the particle range.
const HEART_WINDINGS: f32 = 10.0;
const FLOWER_WINDINGS: f32 = 5.0;

/// The geometry the particle cloud is asked to form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ShapeModel {
    #[default]
    Heart,
    Flower,
    Saturn,
    Zen,
    Fireworks,
    Cake,
    Celebration,
    BirthdayText,
    BirthdayTextEn,
    /// Text taken from `MorphConfig::greeting_text`.
    GreetingText,
}

impl ShapeModel {
    pub const ALL: [ShapeModel; 10] = [
        ShapeModel::Heart,
        ShapeModel::Flower,
        ShapeModel::Saturn,
        ShapeModel::Zen,
        ShapeModel::Fireworks,
        ShapeModel::Cake,
        ShapeModel::Celebration,
        ShapeModel::BirthdayText,
        ShapeModel::BirthdayTextEn,
        ShapeModel::GreetingText,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ShapeModel::Heart => "Heart",
            ShapeModel::Flower => "Flower",
            ShapeModel::Saturn => "Saturn",
            ShapeModel::Zen => "Zen",
            ShapeModel::Fireworks => "Fireworks",
            ShapeModel::Cake => "Cake",
            ShapeModel::Celebration => "Celebration",
            ShapeModel::BirthdayText => "Birthday",
            ShapeModel::BirthdayTextEn => "Happy Birthday",
            ShapeModel::GreetingText => "Greeting",
        }
    }

    pub fn index(self) -> u32 {
        Self::ALL.iter().position(|&m| m == self).unwrap_or(0) as u32
    }

    pub fn from_index(index: u32) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn is_text(self) -> bool {
        matches!(
            self,
            ShapeModel::BirthdayText | ShapeModel::BirthdayTextEn | ShapeModel::GreetingText
        )
    }

    /// True when targets depend only on `(i, count)`.
    pub fn is_deterministic(self) -> bool {
        matches!(self, ShapeModel::Heart | ShapeModel::Flower)
    }

    /// The `(text, font size)` a text model is drawn from.
    pub fn text_source<'a>(self, greeting: &'a str, greeting_size: u32) -> Option<(&'a str, u32)> {
        match self {
            ShapeModel::BirthdayText => Some(("生日快乐", 120)),
            ShapeModel::BirthdayTextEn => Some(("Happy Birthday", 100)),
            ShapeModel::GreetingText => Some((greeting, greeting_size)),
            _ => None,
        }
    }
}

impl fmt::Display for ShapeModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShapeModel {
    type Err = MorphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| MorphError::UnknownModel(s.to_string()))
    }
}

/// Parametric angle of particle `i`, spanning one full turn over the set.
#[inline]
pub fn parametric_angle(i: usize, count: usize) -> f32 {
    i as f32 / count.max(1) as f32 * TAU
}

/// Target position of particle `i` of `count` for `model`.
///
/// `glyphs` is the point table for text models and is ignored otherwise; an
/// empty or missing table collapses text particles onto the origin plane.
pub fn target_for<R: Rng + ?Sized>(
    model: ShapeModel,
    i: usize,
    count: usize,
    glyphs: &[Vec2],
    depth_jitter: f32,
    rng: &mut R,
) -> Vec3 {
    let t = parametric_angle(i, count);
    match model {
        ShapeModel::Heart => shape_heart(t * HEART_WINDINGS),
        ShapeModel::Flower => shape_flower(t * FLOWER_WINDINGS),
        ShapeModel::Saturn => shape_saturn(i, count, rng),
        ShapeModel::Zen => shape_zen(rng),
        ShapeModel::Fireworks => shape_fireworks(rng),
        ShapeModel::Cake => shape_cake(i, count, rng),
        ShapeModel::Celebration => shape_celebration(i, count, rng),
        ShapeModel::BirthdayText | ShapeModel::BirthdayTextEn | ShapeModel::GreetingText => {
            if glyphs.is_empty() {
                return Vec3::ZERO;
            }
            let p = lookup(glyphs, i);
            Vec3::new(p.x, p.y, centered(rng, depth_jitter * 2.0))
        }
    }
}

/// Fill a fresh buffer with all `count` targets of `model`.
pub fn build_targets<R: Rng + ?Sized>(
    model: ShapeModel,
    count: usize,
    glyphs: &[Vec2],
    depth_jitter: f32,
    rng: &mut R,
) -> Vec<Vec3> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        if model.is_deterministic() {
            return (0..count)
                .into_par_iter()
                .map(|i| {
                    let t = parametric_angle(i, count);
                    match model {
                        ShapeModel::Flower => shape_flower(t * FLOWER_WINDINGS),
                        _ => shape_heart(t * HEART_WINDINGS),
                    }
                })
                .collect();
        }
    }

    (0..count)
        .map(|i| target_for(model, i, count, glyphs, depth_jitter, rng))
        .collect()
}
