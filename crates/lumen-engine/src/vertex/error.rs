use thiserror::Error;

/// Schema construction failure. Always a configuration bug at the call site.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Type string is not `<kind>` or `<kind><1-4>` for a known scalar kind.
    #[error("invalid attribute type `{ty}` for attribute `{attribute}`")]
    InvalidType { attribute: String, ty: String },

    #[error("duplicate attribute name `{0}`")]
    DuplicateAttribute(String),

    #[error("attribute at position {0} has an empty name")]
    EmptyName(usize),

    /// One vertex worth of the attribute does not fit inside its stride.
    #[error("attribute `{attribute}` spans {extent} bytes but its stride is {stride}")]
    StrideTooSmall {
        attribute: String,
        extent: usize,
        stride: usize,
    },

    /// Two attributes claim overlapping bytes of vertex 0.
    #[error("attributes `{first}` and `{second}` overlap at byte {at}")]
    Overlap {
        first: String,
        second: String,
        /// First byte claimed by both.
        at: usize,
    },

    /// `offset + extent` does not fit in `usize`.
    #[error("attribute `{attribute}` at offset {offset} runs past the addressable range")]
    OffsetOverflow { attribute: String, offset: usize },
}

/// Vertex write/read failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WriterError {
    #[error("unknown attribute `{0}`")]
    UnknownAttribute(String),

    #[error("attribute `{attribute}` expects {expected} components, got {got}")]
    ArityMismatch {
        attribute: String,
        expected: usize,
        got: usize,
    },

    /// The addressed bytes lie past the end of the bound buffer.
    #[error(
        "vertex {vertex} of attribute `{attribute}` ends at byte {end}, buffer holds {capacity}"
    )]
    OutOfBounds {
        attribute: String,
        vertex: usize,
        end: usize,
        capacity: usize,
    },
}

pub type SchemaResult<T> = Result<T, SchemaError>;
pub type WriterResult<T> = Result<T, WriterError>;
