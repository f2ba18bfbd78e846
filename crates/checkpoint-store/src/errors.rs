use std::path::PathBuf;

use crate::step::StepName;

/// Errors from the certification and gating rules.
#[derive(Debug, thiserror::Error)]
pub enum CheckpointError {
    #[error("required checkpoint {name} is missing")]
    Missing { name: StepName },

    #[error("checkpoint {name} rejected: {} critical failure(s): {}", failures.len(), failures.join(", "))]
    Rejected { name: StepName, failures: Vec<String> },

    #[error("checkpoint {name} already exists")]
    AlreadyExists { name: StepName },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors from a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("checkpoint I/O failed at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("checkpoint file {} is unreadable: {reason}", path.display())]
    Corrupt { path: PathBuf, reason: String },
}
