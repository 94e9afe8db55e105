//! Python bindings for repatch.
//!
//! Provides Python access to the repatch Rust library via PyO3.

#![deny(missing_docs)]

use ndarray::ArrayD;
use numpy::{IntoPyArray, PyArrayDyn, PyReadonlyArrayDyn};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use std::fmt::Display;

use ::repatch::prelude::{
    dice_coefficient, threshold_binarize, FnModel, Repatch, RepatchError, RepatchResult,
};

// ============================================================================
// Helper Functions
// ============================================================================

/// Convert a RepatchError to a PyErr
fn to_py_error(e: impl Display) -> PyErr {
    PyValueError::new_err(e.to_string())
}

// ============================================================================
// Python Classes
// ============================================================================

/// Result from a patch reconstruction.
#[pyclass(name = "RepatchResult")]
pub struct PyRepatchResult {
    inner: RepatchResult<f64>,
}

#[pymethods]
impl PyRepatchResult {
    /// Reconstructed volume
    #[getter]
    fn output<'py>(&self, py: Python<'py>) -> Bound<'py, PyArrayDyn<f64>> {
        self.inner.output.clone().into_pyarray(py)
    }

    /// Number of overlap repetitions blended into the output
    #[getter]
    fn repetitions(&self) -> usize {
        self.inner.repetitions
    }

    /// Patches submitted to the model across all repetitions
    #[getter]
    fn patches_predicted(&self) -> usize {
        self.inner.patches_predicted
    }

    /// Anchors dropped by the empty-patch filter
    #[getter]
    fn patches_skipped(&self) -> usize {
        self.inner.patches_skipped
    }

    /// Model invocations across all repetitions
    #[getter]
    fn batches(&self) -> usize {
        self.inner.batches
    }

    fn __repr__(&self) -> String {
        format!(
            "RepatchResult(shape={:?}, repetitions={}, patches_predicted={}, patches_skipped={})",
            self.inner.output.shape(),
            self.inner.repetitions,
            self.inner.patches_predicted,
            self.inner.patches_skipped
        )
    }
}

// ============================================================================
// Python Functions
// ============================================================================

/// Reconstruct a full volume from patch-wise model predictions.
///
/// Tiles the volume into overlapping patches, calls `model` on batches of
/// patches (stacked on a new leading axis), and stitches the predictions
/// back into a volume of the input's spatial extents.
///
/// Parameters
/// ----------
/// volume : numpy.ndarray
///     Input volume (float64, any rank).
/// model : callable
///     Called with a float64 array of shape (batch, *patch_shape); must
///     return an array with the same leading length.
/// input_patch_shape : list of int
///     Full-rank shape of the patches fed to the model.
/// output_patch_shape : list of int, optional
///     Full-rank shape of the predicted patches (default: input shape).
/// patch_dimensions : list of int, optional
///     Tiled axes of the input volume, negative counts from the end
///     (default: [-4, -3, -2]).
/// output_patch_dimensions : list of int, optional
///     Tiled axes of the output volume (default: patch_dimensions).
/// patch_overlaps : int, optional
///     Number of shifted grid repetitions to average (default: 1).
/// pad_borders : bool, optional
///     Zero-pad volume borders so boundary patches stay full-sized
///     (default: True).
/// check_empty_patch : bool, optional
///     Skip patches whose input is entirely zero (default: True).
/// batch_size : int, optional
///     Patches per model invocation (default: 32).
///
/// Returns
/// -------
/// RepatchResult
///     Result object with the reconstructed volume and run counters.
#[pyfunction]
#[pyo3(signature = (
    volume, model, input_patch_shape,
    output_patch_shape=None,
    patch_dimensions=None,
    output_patch_dimensions=None,
    patch_overlaps=1,
    pad_borders=true,
    check_empty_patch=true,
    batch_size=32
))]
#[allow(clippy::too_many_arguments)]
fn reconstruct<'py>(
    volume: PyReadonlyArrayDyn<'py, f64>,
    model: Bound<'py, PyAny>,
    input_patch_shape: Vec<usize>,
    output_patch_shape: Option<Vec<usize>>,
    patch_dimensions: Option<Vec<isize>>,
    output_patch_dimensions: Option<Vec<isize>>,
    patch_overlaps: usize,
    pad_borders: bool,
    check_empty_patch: bool,
    batch_size: usize,
) -> PyResult<PyRepatchResult> {
    let input: ArrayD<f64> = volume.as_array().to_owned();

    let mut builder = Repatch::new()
        .input_patch_shape(&input_patch_shape)
        .patch_overlaps(patch_overlaps)
        .pad_borders(pad_borders)
        .check_empty_patch(check_empty_patch)
        .batch_size(batch_size);
    if let Some(shape) = output_patch_shape {
        builder = builder.output_patch_shape(&shape);
    }
    if let Some(axes) = patch_dimensions {
        builder = builder.patch_dimensions(&axes);
    }
    if let Some(axes) = output_patch_dimensions {
        builder = builder.output_patch_dimensions(&axes);
    }
    let engine = builder.build().map_err(to_py_error)?;

    // The engine calls back into Python per batch; each call re-acquires the
    // GIL because the closure outlives this function's GIL token.
    let callable = model.unbind();
    let adapter = FnModel::new(move |batch: ArrayD<f64>| {
        Python::with_gil(|py| {
            let py_batch = batch.into_pyarray(py);
            let returned = callable
                .bind(py)
                .call1((py_batch,))
                .map_err(|e| RepatchError::model(e.to_string()))?;
            let predicted: PyReadonlyArrayDyn<'_, f64> = returned.extract().map_err(|e| {
                RepatchError::model(format!("model must return a float64 array: {}", e))
            })?;
            Ok(predicted.as_array().to_owned())
        })
    });

    let result = engine.reconstruct(&input, &adapter).map_err(to_py_error)?;
    Ok(PyRepatchResult { inner: result })
}

/// Binarize a volume: values strictly greater than `threshold` become 1.0.
///
/// Parameters
/// ----------
/// volume : numpy.ndarray
///     Input volume (float64, any rank).
/// threshold : float, optional
///     Binarization threshold (default: 0.5).
///
/// Returns
/// -------
/// numpy.ndarray
///     Binary mask of the same shape.
#[pyfunction]
#[pyo3(signature = (volume, threshold=0.5))]
fn binarize<'py>(
    py: Python<'py>,
    volume: PyReadonlyArrayDyn<'py, f64>,
    threshold: f64,
) -> Bound<'py, PyArrayDyn<f64>> {
    threshold_binarize(&volume.as_array().to_owned(), threshold).into_pyarray(py)
}

/// Dice coefficient between the non-zero masks of two volumes.
///
/// Parameters
/// ----------
/// a : numpy.ndarray
///     First volume (float64).
/// b : numpy.ndarray
///     Second volume (float64, same shape as `a`).
///
/// Returns
/// -------
/// float
///     Dice score in [0, 1]; two empty masks score 1.0.
#[pyfunction]
fn dice(a: PyReadonlyArrayDyn<'_, f64>, b: PyReadonlyArrayDyn<'_, f64>) -> PyResult<f64> {
    dice_coefficient(&a.as_array().to_owned(), &b.as_array().to_owned()).map_err(to_py_error)
}

// ============================================================================
// Module Registration
// ============================================================================

/// repatch: patch-based volumetric reconstruction for Python.
#[pymodule]
fn repatch(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyRepatchResult>()?;
    m.add_function(wrap_pyfunction!(reconstruct, m)?)?;
    m.add_function(wrap_pyfunction!(binarize, m)?)?;
    m.add_function(wrap_pyfunction!(dice, m)?)?;
    Ok(())
}
