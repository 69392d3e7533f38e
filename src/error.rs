use std::path::PathBuf;

use thiserror::Error;

/// Caller mistakes while driving a quiz. All of them leave the session untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    #[error("question {index} does not exist, the bank has {size} questions")]
    OutOfRange { index: usize, size: usize },

    #[error("option {option} is not available, the question has {available} options")]
    InvalidSelection { option: usize, available: usize },

    #[error("cannot {operation}: the quiz is already completed")]
    InvalidState { operation: &'static str },

    #[error("only {answered} of {required} questions are answered")]
    IncompleteSession { answered: usize, required: usize },

    #[error("weight {weight} is above the scale maximum {scale_max}")]
    WeightOutOfScale { weight: u8, scale_max: u8 },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse question bank: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid question bank: {0}")]
    InvalidBank(String),
}

/// Why a font file could not be used. Never surfaces from rendering itself.
#[derive(Debug, Error)]
pub enum FontError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("not a usable font: {0}")]
    Parse(#[from] ttf_parser::FaceParsingError),
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("cannot allocate a {width}x{height} canvas")]
    Canvas { width: u32, height: u32 },

    #[error("failed to encode PNG: {0}")]
    Encode(#[from] png::EncodingError),
}
