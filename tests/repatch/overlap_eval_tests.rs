#![cfg(feature = "dev")]
use approx::assert_abs_diff_eq;
use ndarray::{Array4, ArrayD};
use repatch::prelude::*;
use std::cell::Cell;

fn ones_volume() -> Array4<f64> {
    Array4::from_elem((8, 8, 8, 1), 1.0)
}

#[test]
fn test_single_repetition_covers_every_voxel_once() {
    // With one repetition each trimmed voxel is written exactly once, so a
    // constant model paints the whole output.
    let volume = ones_volume();

    let result = Repatch::new()
        .input_patch_shape(&[4, 4, 4, 1])
        .patch_dimensions(&[0, 1, 2])
        .build()
        .unwrap()
        .reconstruct(&volume, &ConstantModel::new(2.5))
        .unwrap();

    assert!(result.output.iter().all(|&v| v == 2.5));
}

#[test]
fn test_overlap_dilutes_borders_not_interior() {
    // With two repetitions, the shifted grid covers interior voxels both
    // times but reaches some border voxels only in the first. A constant
    // model then shows the averaging directly: interior voxels stay at the
    // constant, diluted border voxels average it with the accumulator zero.
    let volume = ones_volume();

    let result = Repatch::new()
        .input_patch_shape(&[4, 4, 4, 1])
        .patch_dimensions(&[0, 1, 2])
        .patch_overlaps(2)
        .check_empty_patch(false)
        .build()
        .unwrap()
        .reconstruct(&volume, &ConstantModel::new(1.0))
        .unwrap();

    // Center voxel: covered in both repetitions -> mean(1, 1) = 1.
    assert_eq!(result.output[[4, 4, 4, 0]], 1.0);
    // Corner voxel: covered only by the unshifted grid -> mean(1, 0) = 0.5.
    assert_eq!(result.output[[0, 0, 0, 0]], 0.5);
}

#[test]
fn test_blend_matches_arithmetic_mean() {
    // A model that returns a different constant per invocation; with one
    // batch per repetition, repetition k gets the value k / 10. A voxel
    // covered by every repetition must equal the mean of all three values.
    let volume = ones_volume();
    let calls = Cell::new(0usize);
    let counting = FnModel::new(|batch: ArrayD<f64>| {
        let value = calls.get() as f64 / 10.0;
        calls.set(calls.get() + 1);
        Ok(batch.mapv(|_| value))
    });

    let result = Repatch::new()
        .input_patch_shape(&[4, 4, 4, 1])
        .patch_dimensions(&[0, 1, 2])
        .patch_overlaps(3)
        .check_empty_patch(false)
        .batch_size(64)
        .build()
        .unwrap()
        .reconstruct(&volume, &counting)
        .unwrap();

    // One batch per repetition.
    assert_eq!(result.batches, 3);
    assert_eq!(result.repetitions, 3);

    // The center voxel is covered by every repetition's grid.
    let expected = (0.0 + 0.1 + 0.2) / 3.0;
    assert_abs_diff_eq!(result.output[[4, 4, 4, 0]], expected, epsilon = 1e-9);
}

#[test]
fn test_overlap_counts_shifted_grids() {
    // Extent 4, three repetitions: offsets 0, 1, 3 give per-axis anchor
    // counts 3, 2, 2 -> 27 + 8 + 8 patches in total.
    let volume = ones_volume();

    let result = Repatch::new()
        .input_patch_shape(&[4, 4, 4, 1])
        .patch_dimensions(&[0, 1, 2])
        .patch_overlaps(3)
        .check_empty_patch(false)
        .batch_size(64)
        .build()
        .unwrap()
        .reconstruct(&volume, &IdentityModel)
        .unwrap();

    assert_eq!(result.patches_predicted, 43);
    assert_eq!(result.patches_skipped, 0);
}

#[test]
fn test_identity_overlap_is_exact_on_constant_volume() {
    // On a constant volume every gathered patch is constant, so identity
    // predictions agree wherever grids overlap and the average changes
    // nothing inside the fully covered interior.
    let volume = ones_volume();

    let result = Repatch::new()
        .input_patch_shape(&[4, 4, 4, 1])
        .patch_dimensions(&[0, 1, 2])
        .patch_overlaps(2)
        .build()
        .unwrap()
        .reconstruct(&volume, &IdentityModel)
        .unwrap();

    assert_eq!(result.output[[4, 4, 4, 0]], 1.0);
    assert_eq!(result.output[[3, 5, 2, 0]], 1.0);
}

#[test]
fn test_empty_skip_is_output_neutral() {
    // For a zero-preserving model, skipping empty patches changes the
    // counters but not a single output voxel.
    let mut volume = Array4::<f64>::zeros((8, 8, 8, 1));
    volume[[1, 6, 3, 0]] = 4.0;
    volume[[6, 1, 6, 0]] = 2.0;

    let base = Repatch::new()
        .input_patch_shape(&[4, 4, 4, 1])
        .patch_dimensions(&[0, 1, 2])
        .patch_overlaps(2);

    let skipped = base
        .clone()
        .check_empty_patch(true)
        .build()
        .unwrap()
        .reconstruct(&volume, &IdentityModel)
        .unwrap();
    let full = base
        .check_empty_patch(false)
        .build()
        .unwrap()
        .reconstruct(&volume, &IdentityModel)
        .unwrap();

    assert!(skipped.patches_skipped > 0);
    assert_eq!(full.patches_skipped, 0);
    assert!(full.patches_predicted > skipped.patches_predicted);
    assert_eq!(skipped.output, full.output);
}

#[test]
fn test_all_zero_volume_predicts_nothing() {
    let volume = Array4::<f64>::zeros((8, 8, 8, 1));

    let result = Repatch::new()
        .input_patch_shape(&[4, 4, 4, 1])
        .patch_dimensions(&[0, 1, 2])
        .build()
        .unwrap()
        .reconstruct(&volume, &IdentityModel)
        .unwrap();

    assert_eq!(result.patches_predicted, 0);
    assert_eq!(result.batches, 0);
    assert_eq!(result.patches_skipped, 27);
    assert!(result.output.iter().all(|&v| v == 0.0));
    assert_eq!(result.output.shape(), &[8, 8, 8, 1]);
}
