use building_ops::OpError;
use storefront_types::SpecError;

/// Errors that stop a build.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BuildError {
    #[error("invalid specification: {0}")]
    Invalid(#[from] SpecError),

    #[error(transparent)]
    Op(#[from] OpError),

    #[error("element {name} created twice")]
    DuplicateElement { name: String },
}
