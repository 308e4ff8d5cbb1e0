//! Hand-openness control signal.
//!
//! The gesture tracker reports 21 hand landmarks in normalised image space.
//! Their fingertip spread is reduced to a bounded scale factor that expands
//! or contracts the whole shape. Missing readings always mean neutral scale.

use std::sync::{Arc, PoisonError, RwLock};

use glam::Vec2;

/// Scale applied when no hand is tracked.
pub const NEUTRAL_SPAN: f32 = 1.0;
pub const MIN_SPAN: f32 = 0.3;
pub const MAX_SPAN: f32 = 3.0;
/// Average fingertip distance of a closed fist.
pub const FIST_DISTANCE: f32 = 0.1;
/// Distance added on top of a fist by a fully open hand.
pub const OPEN_RANGE: f32 = 0.3;
/// Spans above this count as an open hand.
pub const OPEN_THRESHOLD: f32 = 0.8;

pub const PALM_CENTER: usize = 9;
pub const FINGERTIPS: [usize; 5] = [4, 8, 12, 16, 20];
pub const LANDMARK_COUNT: usize = 21;

/// Map an average fingertip-to-palm distance to a clamped span.
///
/// `None` and NaN give `NEUTRAL_SPAN`; infinities clamp like any other
/// out-of-range distance.
pub fn normalize_span(avg_distance: Option<f32>) -> f32 {
    match avg_distance {
        Some(d) if !d.is_nan() => ((d - FIST_DISTANCE) / OPEN_RANGE).clamp(MIN_SPAN, MAX_SPAN),
        _ => NEUTRAL_SPAN,
    }
}

pub fn is_open(span: f32) -> bool {
    span > OPEN_THRESHOLD
}

/// One tracked hand in normalised image coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandLandmarks(pub [Vec2; LANDMARK_COUNT]);

impl HandLandmarks {
    /// Build from a flat list of `[x, y]` pairs (42 floats) or `[x, y, z]`
    /// triples (63 floats, depth ignored).
    ///
    /// Any other length, or any non-finite coordinate, yields `None`.
    pub fn from_flat(coords: &[f32]) -> Option<Self> {
        let stride = match coords.len() {
            n if n == LANDMARK_COUNT * 2 => 2,
            n if n == LANDMARK_COUNT * 3 => 3,
            _ => return None,
        };
        let mut points = [Vec2::ZERO; LANDMARK_COUNT];
        for (p, chunk) in points.iter_mut().zip(coords.chunks_exact(stride)) {
            if !chunk.iter().all(|c| c.is_finite()) {
                return None;
            }
            *p = Vec2::new(chunk[0], chunk[1]);
        }
        Some(Self(points))
    }

    pub fn palm_center(&self) -> Vec2 {
        self.0[PALM_CENTER]
    }

    /// Mean 2-D distance from the five fingertips to the palm centre.
    pub fn average_fingertip_distance(&self) -> f32 {
        let palm = self.palm_center();
        FINGERTIPS
            .iter()
            .map(|&tip| self.0[tip].distance(palm))
            .sum::<f32>()
            / FINGERTIPS.len() as f32
    }
}

/// What the tracker publishes for a frame in which a hand was seen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandData {
    pub is_open: bool,
    pub span: f32,
    pub center_x: f32,
    pub center_y: f32,
}

impl HandData {
    pub fn from_landmarks(landmarks: &HandLandmarks) -> Self {
        let span = normalize_span(Some(landmarks.average_fingertip_distance()));
        let center = landmarks.palm_center();
        Self {
            is_open: is_open(span),
            span,
            center_x: center.x,
            center_y: center.y,
        }
    }
}

/// Scale factor the integrator applies this frame.
///
/// Always within `[MIN_SPAN, MAX_SPAN]`; a missing hand or a NaN span
/// yields `NEUTRAL_SPAN`.
pub fn control_value(hand: Option<&HandData>) -> f32 {
    match hand {
        Some(h) if !h.span.is_nan() => h.span.clamp(MIN_SPAN, MAX_SPAN),
        _ => NEUTRAL_SPAN,
    }
}

/// Single-slot hand-off from the tracker to the frame loop.
///
/// The tracker replaces the whole reading; the frame loop copies out the most
/// recent one. Older readings are simply overwritten.
#[derive(Clone, Debug, Default)]
pub struct ControlCell {
    slot: Arc<RwLock<Option<HandData>>>,
}

impl ControlCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, hand: Option<HandData>) {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = hand;
    }

    pub fn latest(&self) -> Option<HandData> {
        *self.slot.read().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_last_write_wins() {
        let cell = ControlCell::new();
        assert_eq!(cell.latest(), None);

        let tracker = cell.clone();
        for span in [0.5, 1.5, 2.0] {
            tracker.publish(Some(HandData {
                is_open: is_open(span),
                span,
                center_x: 0.5,
                center_y: 0.5,
            }));
        }
        assert_eq!(cell.latest().map(|h| h.span), Some(2.0));

        tracker.publish(None);
        assert_eq!(cell.latest(), None);
    }

    #[test]
    fn test_from_flat_requires_all_landmarks() {
        assert!(HandLandmarks::from_flat(&[0.0; 41]).is_none());
        assert!(HandLandmarks::from_flat(&[0.0; 42]).is_some());
    }
}
