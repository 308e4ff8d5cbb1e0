use std::str::FromStr;

use crate::error::MorphError;

/// Linear RGB tint in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color(pub [f32; 3]);

impl Color {
    /// Parse `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(s: &str) -> Result<Self, MorphError> {
        let digits = s.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(MorphError::InvalidColor(s.to_string()));
        }
        let mut rgb = [0.0; 3];
        for (c, channel) in rgb.iter_mut().enumerate() {
            let byte = u8::from_str_radix(&digits[c * 2..c * 2 + 2], 16)
                .map_err(|_| MorphError::InvalidColor(s.to_string()))?;
            *channel = f32::from(byte) / 255.0;
        }
        Ok(Self(rgb))
    }

    pub fn to_hex(self) -> String {
        let [r, g, b] = self.0.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

impl Default for Color {
    fn default() -> Self {
        // #4ade80
        Self([74.0 / 255.0, 222.0 / 255.0, 128.0 / 255.0])
    }
}

impl FromStr for Color {
    type Err = MorphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

/// How the renderer should draw the point cloud. Every particle shares it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderStyle {
    pub color: Color,
    pub point_size: f32,
    pub opacity: f32,
    pub transparent: bool,
    /// Overlapping points add up to brighter highlights.
    pub additive_blending: bool,
    pub depth_write: bool,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            color: Color::default(),
            point_size: 0.08,
            opacity: 0.8,
            transparent: true,
            additive_blending: true,
            depth_write: false,
        }
    }
}
