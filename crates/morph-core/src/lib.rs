//! Real-time particle morphing.
//!
//! A fixed cloud of points is pulled every frame toward the targets of the
//! selected [`ShapeModel`], scaled by a hand-openness control value, with a
//! per-particle shimmer on top. The live position buffer is all a point
//! renderer needs.

pub mod config;
pub mod control;
pub mod error;
pub mod integrator;
pub mod math;
pub mod particle;
pub mod render;
pub mod shapes;
pub mod solver;
pub mod target;

pub use config::{GlyphConfig, MorphConfig};
pub use control::{ControlCell, HandData, HandLandmarks};
pub use error::{MorphError, Result};
pub use shapes::dispatcher::ShapeModel;
pub use solver::Solver;
