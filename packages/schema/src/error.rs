use thiserror::Error;

/// A settings value rejected by its schema. The document is left unchanged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Unknown setting '{field}'")]
    UnknownField { field: String },

    #[error("Setting '{field}' expects {expected}, got {found}")]
    KindMismatch {
        field: String,
        expected: &'static str,
        found: String,
    },

    #[error("Setting '{field}' value {value} is below minimum {min}")]
    BelowMinimum { field: String, value: f64, min: f64 },

    #[error("Setting '{field}' value {value} is above maximum {max}")]
    AboveMaximum { field: String, value: f64, max: f64 },

    #[error("Setting '{field}' value {value} is not an allowed option")]
    NotAnOption { field: String, value: String },

    #[error("Setting '{field}' is required")]
    Required { field: String },

    #[error("Setting '{field}': {message}")]
    PatternMismatch { field: String, message: String },

    #[error("Block type '{block_type}' is not allowed in section type '{section_type}'")]
    BlockNotPermitted {
        section_type: String,
        block_type: String,
    },

    #[error("Section type '{section_type}' allows at most {max} blocks")]
    TooManyBlocks { section_type: String, max: usize },

    #[error("Unknown preset '{preset}' for section type '{section_type}'")]
    UnknownPreset {
        section_type: String,
        preset: String,
    },
}
