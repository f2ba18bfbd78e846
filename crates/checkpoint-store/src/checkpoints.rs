use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info, instrument};

use crate::errors::CheckpointError;
use crate::record::{CheckpointPayload, VerificationCheckpoint};
use crate::step::{Stage, StepName};
use crate::store::CheckpointStore;

/// Whether one required stage has been certified.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageStatus {
    pub name: StepName,
    pub certified_at: Option<DateTime<Utc>>,
}

impl StageStatus {
    pub fn exists(&self) -> bool {
        self.certified_at.is_some()
    }
}

/// Certification rules over a storage backend.
#[derive(Debug)]
pub struct Checkpoints<S> {
    store: S,
}

impl<S: CheckpointStore> Checkpoints<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Certify and persist a stage. A payload with critical failures is
    /// rejected and nothing is written.
    #[instrument(skip_all, fields(name = %name))]
    pub fn create(
        &mut self,
        name: StepName,
        payload: CheckpointPayload,
    ) -> Result<VerificationCheckpoint, CheckpointError> {
        let checkpoint = match VerificationCheckpoint::certify(name, payload) {
            Ok(c) => c,
            Err(e) => {
                error!("{}", e);
                return Err(e);
            }
        };
        if self.store.get(name)?.is_some() {
            return Err(CheckpointError::AlreadyExists { name });
        }
        self.store.put(&checkpoint)?;
        info!(passed = checkpoint.payload().passed.len(), "checkpoint created");
        Ok(checkpoint)
    }

    pub fn require(&self, name: StepName) -> Result<VerificationCheckpoint, CheckpointError> {
        self.store
            .get(name)?
            .ok_or(CheckpointError::Missing { name })
    }

    /// All three stages of an iteration, checked inline, batch, automated.
    pub fn require_all(
        &self,
        iteration: u32,
    ) -> Result<Vec<VerificationCheckpoint>, CheckpointError> {
        Stage::ALL
            .into_iter()
            .map(|stage| self.require(stage.step(iteration)))
            .collect()
    }

    /// Remove this iteration's checkpoints. Returns how many were removed.
    pub fn clear_iteration(&mut self, iteration: u32) -> Result<usize, CheckpointError> {
        let mut removed = 0;
        for name in self.list(iteration)? {
            if self.store.remove(name)? {
                removed += 1;
            }
        }
        if removed > 0 {
            info!(iteration, removed, "checkpoints cleared");
        }
        Ok(removed)
    }

    pub fn clear_all(&mut self) -> Result<usize, CheckpointError> {
        let mut removed = 0;
        for name in self.store.names()? {
            if self.store.remove(name)? {
                removed += 1;
            }
        }
        info!(removed, "all checkpoints cleared");
        Ok(removed)
    }

    /// Stored checkpoints of one iteration, in stage order.
    pub fn list(&self, iteration: u32) -> Result<Vec<StepName>, CheckpointError> {
        let mut names: Vec<StepName> = self
            .store
            .names()?
            .into_iter()
            .filter(|n| n.iteration == iteration)
            .collect();
        names.sort_by_key(|n| n.stage);
        Ok(names)
    }

    pub fn status(&self, iteration: u32) -> Result<Vec<StageStatus>, CheckpointError> {
        Stage::ALL
            .into_iter()
            .map(|stage| {
                let name = stage.step(iteration);
                let certified_at = self.store.get(name)?.map(|c| c.timestamp());
                Ok::<_, CheckpointError>(StageStatus { name, certified_at })
            })
            .collect()
    }
}
