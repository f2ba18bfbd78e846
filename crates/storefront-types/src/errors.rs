/// A document that parses but describes an impossible building.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SpecError {
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: String, value: f64 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: String, value: f64 },

    #[error("parapet spans sum to {total}, building depth is {depth}")]
    ParapetSpanMismatch { total: f64, depth: f64 },

    #[error("alcove must narrow toward the interior: front opening {front}, back opening {back}")]
    AlcoveNotNarrowing { front: f64, back: f64 },

    #[error("alcove y_back ({y_back}) must lie behind y_front ({y_front})")]
    AlcoveInverted { y_front: f64, y_back: f64 },

    #[error("opening fill {cutout} names no cutout")]
    UnknownFillTarget { cutout: String },

    #[error("opening fill {cutout} does not fit: {reason}")]
    FillDoesNotFit { cutout: String, reason: String },

    #[error("color for {role} is not #RRGGBB: {value:?}")]
    InvalidColor { role: String, value: String },
}

/// Errors during specification document loading.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LoadError {
    #[error("failed to parse document: {0}")]
    ParseError(String),

    #[error("unknown document format: {0}")]
    UnknownFormat(String),

    #[error("document version {file_version} is newer than supported version {supported_version}")]
    FutureVersion {
        file_version: u32,
        supported_version: u32,
    },

    #[error("migration failed from version {from} to {to}: {reason}")]
    MigrationFailed { from: u32, to: u32, reason: String },

    #[error("invalid building: {0}")]
    Invalid(#[from] SpecError),
}
