use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocatorError {
    #[error("Empty locator")]
    Empty,

    #[error("Combinator without a segment on both sides in '{0}'")]
    DanglingCombinator(String),

    #[error("Unbalanced brackets or quotes in '{0}'")]
    Syntax(String),

    #[error("Unsupported locator segment '{0}'")]
    InvalidSegment(String),
}

/// Why a single strategy could not produce a target
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    /// The edit carries nothing this strategy can use
    #[error("{strategy} does not apply to this edit")]
    NotApplicable { strategy: &'static str },

    #[error("Invalid locator: {0}")]
    InvalidLocator(#[from] LocatorError),

    #[error("No element matches {0}")]
    NoMatch(String),

    #[error("Index {index} is out of range ({available} editable elements)")]
    IndexOutOfRange { index: usize, available: usize },

    #[error("Could not resolve edit '{id}' ({})", .attempts.join("; "))]
    AllStrategiesFailed { id: String, attempts: Vec<String> },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApplyError {
    #[error("Unknown edit property '{0}'")]
    UnknownProperty(String),

    #[error("Property {property} cannot be applied to <{tag}>")]
    Unsupported { property: String, tag: String },

    #[error("'{0}' is not a valid attribute name")]
    InvalidAttribute(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LiveEditError {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error(transparent)]
    Apply(#[from] ApplyError),
}
