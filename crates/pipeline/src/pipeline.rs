use building_engine::{BuildOutcome, ElementExpectation, FillReport, Scene};
use checkpoint_store::{CheckpointError, CheckpointStore, Checkpoints, Stage};
use dimension_verify::{verify_building, verify_elements, VerificationReport};
use scene_kernel::{ExportArtifact, KernelBundle};
use storefront_types::BuildingSpec;
use tracing::{error, info, instrument};

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::gate::{export_gate, export_path};
use crate::payload::payload_from;
use crate::state::IterationState;

/// Everything one successful run produced.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub iteration: u32,
    pub reports: Vec<VerificationReport>,
    pub cutouts_applied: usize,
    pub cutout_diagnostics: Vec<String>,
    pub fills: FillReport,
    pub artifact: ExportArtifact,
}

/// Build, verify in three stages, then export one iteration of a building.
///
/// Owns the kernel for the whole iteration. Steps must be called in order;
/// a rebuild starts the iteration over.
pub struct Pipeline<K, S> {
    kernel: K,
    checkpoints: Checkpoints<S>,
    config: PipelineConfig,
    iteration: u32,
    state: IterationState,
    spec: Option<BuildingSpec>,
    outcome: Option<BuildOutcome>,
}

impl<K: KernelBundle, S: CheckpointStore> Pipeline<K, S> {
    pub fn new(kernel: K, store: S, config: PipelineConfig) -> Self {
        Self {
            kernel,
            checkpoints: Checkpoints::new(store),
            config,
            iteration: 0,
            state: IterationState::NotStarted,
            spec: None,
            outcome: None,
        }
    }

    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    pub fn checkpoints(&self) -> &Checkpoints<S> {
        &self.checkpoints
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn state(&self) -> IterationState {
        self.state
    }

    pub fn iteration(&self) -> u32 {
        self.iteration
    }

    pub fn outcome(&self) -> Option<&BuildOutcome> {
        self.outcome.as_ref()
    }

    /// Build the scene for `iteration` from scratch.
    ///
    /// Clears that iteration's checkpoints and every solid in the kernel
    /// first. On failure the partial scene is left in the kernel.
    #[instrument(skip(self, spec))]
    pub fn build(
        &mut self,
        iteration: u32,
        spec: BuildingSpec,
    ) -> Result<&BuildOutcome, PipelineError> {
        self.iteration = iteration;
        self.state = IterationState::NotStarted;
        self.outcome = None;
        self.spec = None;

        self.checkpoints.clear_iteration(iteration)?;
        self.kernel.reset();

        let outcome = building_engine::build(&spec, &mut self.kernel)?;
        info!(
            elements = outcome.scene.len(),
            cutouts = outcome.cutouts.applied_count(),
            fill_pieces = outcome.fills.pieces,
            "geometry built"
        );

        self.spec = Some(spec);
        self.state = IterationState::GeometryBuilt;
        Ok(self.outcome.insert(outcome))
    }

    /// Per-element check right after the build.
    pub fn verify_inline(
        &mut self,
        expectations: &[ElementExpectation],
    ) -> Result<VerificationReport, PipelineError> {
        self.require_state("verify_inline", IterationState::GeometryBuilt)?;
        let report = self.element_report("Inline Verification", expectations)?;
        self.certify(Stage::InlineVerification, &report)?;
        self.state = IterationState::InlineVerified;
        Ok(report)
    }

    /// Per-element check over a wider set of expectations.
    pub fn verify_batch(
        &mut self,
        expectations: &[ElementExpectation],
    ) -> Result<VerificationReport, PipelineError> {
        self.require_state("verify_batch", IterationState::InlineVerified)?;
        let report = self.element_report("Batch Verification", expectations)?;
        self.certify(Stage::BatchVerification, &report)?;
        self.state = IterationState::BatchVerified;
        Ok(report)
    }

    /// Whole-building check against the document's validation targets.
    pub fn verify_automated(&mut self) -> Result<VerificationReport, PipelineError> {
        self.require_state("verify_automated", IterationState::BatchVerified)?;
        let (spec, scene) = self.built("verify_automated")?;
        let result = verify_building(
            self.kernel.as_query(),
            scene,
            &spec.effective_targets(),
            self.config.tolerance_floor,
        );
        let report = VerificationReport::from_building("Automated Verification", &result);
        self.certify(Stage::AutomatedVerification, &report)?;
        self.state = IterationState::AutomatedVerified;
        Ok(report)
    }

    /// Pass the export gate, then write `building_iter_NNN.stl`.
    #[instrument(skip(self), fields(iteration = self.iteration))]
    pub fn export(&mut self) -> Result<ExportArtifact, PipelineError> {
        self.require_state("export", IterationState::AutomatedVerified)?;
        let handles = {
            let (_, scene) = self.built("export")?;
            export_gate(&self.checkpoints, self.iteration, scene)?;
            scene.handles()
        };
        let path = export_path(&self.config.export_dir, self.iteration);
        let artifact = self
            .kernel
            .export(&handles, &path)
            .map_err(PipelineError::Export)?;
        info!(
            path = %artifact.path.display(),
            triangles = artifact.triangle_count,
            "building exported"
        );
        self.state = IterationState::Exported;
        Ok(artifact)
    }

    /// Every step in order: build, inline, batch, automated, export.
    pub fn run(
        &mut self,
        iteration: u32,
        spec: BuildingSpec,
        inline: &[ElementExpectation],
        batch: &[ElementExpectation],
    ) -> Result<RunSummary, PipelineError> {
        let outcome = self.build(iteration, spec)?;
        let cutouts_applied = outcome.cutouts.applied_count();
        let cutout_diagnostics = outcome
            .cutouts
            .diagnostics
            .iter()
            .map(|d| d.to_string())
            .collect();
        let fills = outcome.fills.clone();

        let reports = vec![
            self.verify_inline(inline)?,
            self.verify_batch(batch)?,
            self.verify_automated()?,
        ];
        let artifact = self.export()?;

        Ok(RunSummary {
            iteration,
            reports,
            cutouts_applied,
            cutout_diagnostics,
            fills,
            artifact,
        })
    }

    fn require_state(
        &self,
        operation: &'static str,
        expected: IterationState,
    ) -> Result<(), PipelineError> {
        if self.state != expected {
            return Err(PipelineError::OutOfOrder {
                operation,
                expected,
                actual: self.state,
            });
        }
        Ok(())
    }

    fn built(&self, operation: &'static str) -> Result<(&BuildingSpec, &Scene), PipelineError> {
        match (&self.spec, &self.outcome) {
            (Some(spec), Some(outcome)) => Ok((spec, &outcome.scene)),
            _ => Err(PipelineError::OutOfOrder {
                operation,
                expected: IterationState::GeometryBuilt,
                actual: IterationState::NotStarted,
            }),
        }
    }

    fn element_report(
        &self,
        title: &str,
        expectations: &[ElementExpectation],
    ) -> Result<VerificationReport, PipelineError> {
        let (_, scene) = self.built("verify")?;
        let batch = verify_elements(
            self.kernel.as_query(),
            scene,
            expectations,
            self.config.tolerance_floor,
        );
        Ok(VerificationReport::from_batch(title, &batch))
    }

    /// Record a stage. A report with critical failures stops the iteration.
    fn certify(&mut self, stage: Stage, report: &VerificationReport) -> Result<(), PipelineError> {
        let name = stage.step(self.iteration);
        let payload =
            payload_from(report).map_err(|source| PipelineError::Report { stage, source })?;
        match self.checkpoints.create(name, payload) {
            Ok(_) => Ok(()),
            Err(CheckpointError::Rejected { failures, .. }) => {
                error!(%stage, iteration = self.iteration, "stage failed with critical deviations");
                Err(PipelineError::CriticalDeviation { stage, failures })
            }
            Err(e) => Err(e.into()),
        }
    }
}
