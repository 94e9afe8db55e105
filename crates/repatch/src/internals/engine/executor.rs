//! Reconstruction driver.
//!
//! ## Purpose
//!
//! This module runs the full reconstruction of one case: pad the input
//! volume, generate the anchor grid for each overlap repetition, drop empty
//! patches, gather anchor batches, invoke the model, scatter the predicted
//! patches into a fresh accumulator, blend accumulators across repetitions,
//! and trim the result back to the input extents.
//!
//! ## Design notes
//!
//! * **Composition**: the model is an injected [`PatchModel`]; the engine
//!   never learns what is behind it.
//! * **Sequential**: batches run one after another in grid order. Model
//!   backends usually own the hardware parallelism, so the driver stays
//!   single-threaded and deterministic.
//! * **Fresh accumulators**: each repetition scatters into its own zeroed
//!   accumulator and is blended afterwards, so repetitions never read each
//!   other's partial state.
//!
//! ## Invariants
//!
//! * All geometry validation happens before the first model invocation; a
//!   case either reconstructs completely or returns an error.
//! * A model error aborts the case immediately and propagates unchanged.
//! * Two runs over the same volume, configuration, and model weights
//!   produce bitwise identical outputs.
//!
//! ## Non-goals
//!
//! * This module does not retry or time out model invocations.
//! * This module does not persist outputs; callers own serialization.

// External dependencies
use ndarray::{ArrayD, IxDyn};
use num_traits::Float;
use tracing::{debug, trace};

// Internal dependencies
use crate::input::VolumeInput;
use crate::internals::adapters::model::PatchModel;
use crate::internals::algorithms::blending::blend_running_mean;
use crate::internals::algorithms::emptiness::retain_nonempty;
use crate::internals::algorithms::patching::{gather_patches, scatter_patches};
use crate::internals::engine::output::RepatchResult;
use crate::internals::math::grid::corner_grid;
use crate::internals::math::padding::{pad_volume, trim_volume};
use crate::internals::math::plan::PatchPlan;
use crate::internals::primitives::errors::RepatchError;

// ============================================================================
// Configuration
// ============================================================================

/// Reconstruction configuration.
///
/// Normally produced by [`RepatchBuilder`](crate::internals::api::RepatchBuilder),
/// which applies the defaults; the fields stay public so configurations can
/// be stored and inspected.
#[derive(Debug, Clone)]
pub struct RepatchConfig {
    /// Full-rank shape of the patches fed to the model.
    pub input_patch_shape: Vec<usize>,
    /// Full-rank shape of the patches the model predicts.
    pub output_patch_shape: Vec<usize>,
    /// Tiled axes of the input volume; negative indices count from the end.
    pub patch_dimensions: Vec<isize>,
    /// Tiled axes of the output volume, paired with `patch_dimensions`.
    pub output_patch_dimensions: Vec<isize>,
    /// Number of shifted grid repetitions to average.
    pub patch_overlaps: usize,
    /// Zero-pad the volume borders so boundary patches stay full-sized.
    pub pad_borders: bool,
    /// Skip patches whose input is entirely zero.
    pub check_empty_patch: bool,
    /// Patches per model invocation.
    pub batch_size: usize,
}

// ============================================================================
// Engine
// ============================================================================

/// Patch reconstruction engine.
///
/// Immutable once built; one engine can reconstruct any number of cases of
/// any rank its axis configuration resolves against.
#[derive(Debug, Clone)]
pub struct RepatchEngine {
    config: RepatchConfig,
}

impl RepatchEngine {
    /// Create an engine from a configuration.
    ///
    /// Prefer [`Repatch::new`](crate::internals::api::Repatch::new), which
    /// validates the configuration while building it.
    pub fn new(config: RepatchConfig) -> Self {
        Self { config }
    }

    /// The engine's configuration.
    pub fn config(&self) -> &RepatchConfig {
        &self.config
    }

    /// Reconstruct one case: tile, predict in batches, stitch, trim.
    pub fn reconstruct<T, V, M>(
        &self,
        volume: &V,
        model: &M,
    ) -> Result<RepatchResult<T>, RepatchError>
    where
        T: Float,
        V: VolumeInput<T> + ?Sized,
        M: PatchModel<T>,
    {
        let input = volume.as_volume_view()?;
        let cfg = &self.config;
        let plan = PatchPlan::resolve(
            input.shape(),
            &cfg.input_patch_shape,
            &cfg.output_patch_shape,
            &cfg.patch_dimensions,
            &cfg.output_patch_dimensions,
            cfg.patch_overlaps,
            cfg.batch_size,
            cfg.pad_borders,
            cfg.check_empty_patch,
        )?;

        debug!(
            volume_shape = ?input.shape(),
            repetitions = plan.overlaps,
            batch_size = plan.batch_size,
            "starting patch reconstruction"
        );

        let padded = if plan.pad_borders {
            pad_volume(&input, &plan.input_pad)
        } else {
            input.to_owned()
        };

        let mut running: Option<ArrayD<T>> = None;
        let mut patches_predicted = 0;
        let mut patches_skipped = 0;
        let mut batches = 0;

        for repetition in 0..plan.overlaps {
            let grid = corner_grid(&plan, padded.shape(), repetition);
            let candidates = grid.len();

            let grid = if plan.check_empty_patch {
                retain_nonempty(&padded, &grid, &plan)
            } else {
                grid
            };
            patches_skipped += candidates - grid.len();

            debug!(
                repetition,
                anchors = grid.len(),
                skipped = candidates - grid.len(),
                "running prediction grid"
            );

            let mut accumulator = ArrayD::zeros(IxDyn(&plan.accumulator_shape));
            let chunk_len = plan.batch_size * plan.patch_axes.len();
            for chunk in grid.as_flat().chunks(chunk_len) {
                let count = chunk.len() / plan.patch_axes.len();
                trace!(batch = batches, patches = count, "predicting batch");

                let batch = gather_patches(&padded, chunk, &plan);
                let predicted = model.predict(batch)?;
                scatter_patches(&mut accumulator, &predicted, chunk, &plan)?;

                patches_predicted += count;
                batches += 1;
            }

            running = Some(match running.take() {
                None => accumulator,
                Some(mut blended) => {
                    blend_running_mean(&mut blended, &accumulator, repetition);
                    blended
                }
            });
        }

        // overlaps >= 1 is validated, so the fallback never runs in practice.
        let blended =
            running.unwrap_or_else(|| ArrayD::zeros(IxDyn(&plan.accumulator_shape)));
        let output = if plan.pad_borders {
            trim_volume(&blended, &plan.output_pad)
        } else {
            blended
        };

        debug!(
            output_shape = ?output.shape(),
            patches_predicted,
            patches_skipped,
            batches,
            "reconstruction complete"
        );

        Ok(RepatchResult {
            output,
            repetitions: plan.overlaps,
            patches_predicted,
            patches_skipped,
            batches,
        })
    }
}
