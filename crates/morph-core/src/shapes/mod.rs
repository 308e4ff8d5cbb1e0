/// Target geometry for the particle cloud.
///
/// Seven geometric generators, the text rasterizer behind the three text
/// models, and the dispatcher that maps a `ShapeModel` to its generator.
pub mod primitives;
pub mod glyph;
pub mod dispatcher;
