use thiserror::Error;

/// Errors raised at the configuration and command boundary of the engine.
///
/// None of these can occur inside a frame step; sensor dropouts and empty
/// glyph tables are recovered where they happen.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MorphError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("target buffer has {actual} points, expected {expected}")]
    TargetLengthMismatch { expected: usize, actual: usize },

    #[error("invalid color {0:?}, expected #rrggbb")]
    InvalidColor(String),

    #[error("unknown shape model {0:?}")]
    UnknownModel(String),

    #[error("alpha mask {width}x{height} does not match a buffer of {len} bytes")]
    MaskSize { width: u32, height: u32, len: usize },
}

pub type Result<T> = std::result::Result<T, MorphError>;
