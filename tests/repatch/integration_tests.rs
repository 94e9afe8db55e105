#![cfg(feature = "dev")]
use ndarray::{Array3, Array4, Array5, ArrayD, IxDyn};
use repatch::prelude::*;

/// An 8x8x8 single-channel volume with a recognizable voxel pattern.
fn ramp_volume() -> Array4<f64> {
    Array4::from_shape_vec(
        (8, 8, 8, 1),
        (0..8 * 8 * 8).map(|i| (i % 97) as f64 + 1.0).collect(),
    )
    .unwrap()
}

#[test]
fn test_identity_reconstruction_exact() {
    // 8x8x8 volume, 4x4x4x1 patches, one repetition: the aligned grid
    // partitions the padded frame, so an identity model reproduces the
    // volume bit for bit.
    let volume = ramp_volume();

    let result = Repatch::new()
        .input_patch_shape(&[4, 4, 4, 1])
        .patch_dimensions(&[0, 1, 2])
        .build()
        .unwrap()
        .reconstruct(&volume, &IdentityModel)
        .unwrap();

    assert_eq!(result.output.shape(), &[8, 8, 8, 1]);
    assert_eq!(result.output, volume.clone().into_dyn());
    assert_eq!(result.repetitions, 1);
}

#[test]
fn test_default_axes_resolve_from_end() {
    // Default patch_dimensions are [-4, -3, -2]; on a rank-4 volume they
    // resolve to the leading three axes.
    let volume = ramp_volume();

    let result = Repatch::new()
        .input_patch_shape(&[4, 4, 4, 1])
        .build()
        .unwrap()
        .reconstruct(&volume, &IdentityModel)
        .unwrap();

    assert_eq!(result.output, volume.into_dyn());
}

#[test]
fn test_shape_restoration_without_padding() {
    // With padding off and patch extents dividing the volume extents, the
    // interior grid still covers everything.
    let volume = ramp_volume();

    let result = Repatch::new()
        .input_patch_shape(&[4, 4, 4, 1])
        .patch_dimensions(&[0, 1, 2])
        .pad_borders(false)
        .build()
        .unwrap()
        .reconstruct(&volume, &IdentityModel)
        .unwrap();

    assert_eq!(result.output.shape(), &[8, 8, 8, 1]);
    assert_eq!(result.output, volume.into_dyn());
}

#[test]
fn test_odd_patch_extents() {
    // 9x9x9 volume with 3x3x3 patches: asymmetric (1, 2) padding, exact
    // identity round trip.
    let volume = Array4::from_shape_vec(
        (9, 9, 9, 1),
        (0..9 * 9 * 9).map(|i| (i % 53) as f64 + 0.5).collect(),
    )
    .unwrap();

    let result = Repatch::new()
        .input_patch_shape(&[3, 3, 3, 1])
        .patch_dimensions(&[0, 1, 2])
        .build()
        .unwrap()
        .reconstruct(&volume, &IdentityModel)
        .unwrap();

    assert_eq!(result.output.shape(), &[9, 9, 9, 1]);
    assert_eq!(result.output, volume.into_dyn());
}

#[test]
fn test_asymmetric_output_patches() {
    // The model receives 4x4x4 patches and its centered 2x2x2 core is kept.
    // An identity model is center-cropped by the scatter, which still
    // reproduces the volume exactly because the cropped cores tile it.
    let volume = ramp_volume();

    let result = Repatch::new()
        .input_patch_shape(&[4, 4, 4, 1])
        .output_patch_shape(&[2, 2, 2, 1])
        .patch_dimensions(&[0, 1, 2])
        .check_empty_patch(false)
        .build()
        .unwrap()
        .reconstruct(&volume, &IdentityModel)
        .unwrap();

    assert_eq!(result.output.shape(), &[8, 8, 8, 1]);
    assert_eq!(result.output, volume.into_dyn());
}

#[test]
fn test_rank5_volume_with_leading_batch_axis() {
    // Rank-5 input (case, x, y, z, channel); default axes [-4, -3, -2]
    // resolve to the spatial axes 1, 2, 3.
    let volume = Array5::from_shape_vec(
        (1, 8, 8, 8, 2),
        (0..2 * 8 * 8 * 8).map(|i| (i % 31) as f64 + 1.0).collect(),
    )
    .unwrap();

    let result = Repatch::new()
        .input_patch_shape(&[1, 4, 4, 4, 2])
        .build()
        .unwrap()
        .reconstruct(&volume, &IdentityModel)
        .unwrap();

    assert_eq!(result.output.shape(), &[1, 8, 8, 8, 2]);
    assert_eq!(result.output, volume.into_dyn());
}

#[test]
fn test_batching_splits_the_grid() {
    // 27 anchors with batch_size 4 -> ceil(27 / 4) = 7 model invocations.
    let volume = ramp_volume();

    let result = Repatch::new()
        .input_patch_shape(&[4, 4, 4, 1])
        .patch_dimensions(&[0, 1, 2])
        .check_empty_patch(false)
        .batch_size(4)
        .build()
        .unwrap()
        .reconstruct(&volume, &IdentityModel)
        .unwrap();

    assert_eq!(result.patches_predicted, 27);
    assert_eq!(result.batches, 7);
    assert_eq!(result.patches_skipped, 0);
    assert_eq!(result.output, volume.into_dyn());
}

#[test]
fn test_empty_patch_skipping_counts() {
    // A single bright voxel: of the 27 padded-grid patches, exactly one
    // contains it; the rest are skipped and the output is still exact.
    let mut volume = Array4::<f64>::zeros((8, 8, 8, 1));
    volume[[4, 4, 4, 0]] = 3.5;

    let result = Repatch::new()
        .input_patch_shape(&[4, 4, 4, 1])
        .patch_dimensions(&[0, 1, 2])
        .build()
        .unwrap()
        .reconstruct(&volume, &IdentityModel)
        .unwrap();

    assert_eq!(result.patches_predicted, 1);
    assert_eq!(result.patches_skipped, 26);
    assert_eq!(result.batches, 1);
    assert_eq!(result.output, volume.into_dyn());
}

#[test]
fn test_determinism() {
    // Same volume, same configuration, same model: bitwise identical runs.
    let volume = ramp_volume();
    let engine = Repatch::new()
        .input_patch_shape(&[4, 4, 4, 1])
        .patch_dimensions(&[0, 1, 2])
        .patch_overlaps(3)
        .build()
        .unwrap();

    let first = engine.reconstruct(&volume, &IdentityModel).unwrap();
    let second = engine.reconstruct(&volume, &IdentityModel).unwrap();

    assert_eq!(first.output, second.output);
}

#[test]
fn test_dynamic_rank_input() {
    // ArrayD inputs work the same as fixed-rank arrays.
    let volume = ArrayD::from_shape_vec(
        IxDyn(&[8, 8, 8, 1]),
        (0..8 * 8 * 8).map(|i| (i % 11) as f64).collect(),
    )
    .unwrap();

    let result = Repatch::new()
        .input_patch_shape(&[4, 4, 4, 1])
        .patch_dimensions(&[0, 1, 2])
        .build()
        .unwrap()
        .reconstruct(&volume, &IdentityModel)
        .unwrap();

    assert_eq!(result.output, volume);
}

#[test]
fn test_threshold_and_dice_roundtrip() {
    // Reconstruct, binarize, and score against the input's own mask.
    let mut volume = Array4::<f64>::zeros((8, 8, 8, 1));
    volume[[2, 2, 2, 0]] = 0.9;
    volume[[5, 5, 5, 0]] = 0.8;

    let result = Repatch::new()
        .input_patch_shape(&[4, 4, 4, 1])
        .patch_dimensions(&[0, 1, 2])
        .build()
        .unwrap()
        .reconstruct(&volume, &IdentityModel)
        .unwrap();

    let mask = threshold_binarize(&result.output, 0.5);
    let reference = threshold_binarize(&volume.into_dyn(), 0.5);
    let score = dice_coefficient(&mask, &reference).unwrap();
    assert_eq!(score, 1.0);
}

#[test]
fn test_error_missing_patch_shape() {
    let err = Repatch::new().build();
    match err {
        Err(RepatchError::InvalidConfig(_)) => (), // Expected
        _ => panic!("Expected InvalidConfig error"),
    }
}

#[test]
fn test_error_axis_out_of_bounds() {
    // Default axes [-4, -3, -2] cannot resolve against a rank-3 volume.
    let volume = Array3::<f64>::zeros((8, 8, 8));

    let err = Repatch::new()
        .input_patch_shape(&[4, 4, 4])
        .build()
        .unwrap()
        .reconstruct(&volume, &IdentityModel);

    match err {
        Err(RepatchError::AxisOutOfBounds { axis: -4, rank: 3 }) => (), // Expected
        _ => panic!("Expected AxisOutOfBounds error"),
    }
}

#[test]
fn test_error_patch_shape_rank() {
    // Patch shape rank must match the volume rank.
    let volume = ramp_volume();

    let err = Repatch::new()
        .input_patch_shape(&[4, 4, 4])
        .patch_dimensions(&[0, 1, 2])
        .build()
        .unwrap()
        .reconstruct(&volume, &IdentityModel);

    match err {
        Err(RepatchError::RankMismatch { .. }) => (), // Expected
        _ => panic!("Expected RankMismatch error"),
    }
}

#[test]
fn test_error_model_failure_propagates() {
    let volume = ramp_volume();
    let failing = FnModel::new(|_batch: ArrayD<f64>| {
        Err(RepatchError::model("checkpoint not loaded".to_string()))
    });

    let err = Repatch::new()
        .input_patch_shape(&[4, 4, 4, 1])
        .patch_dimensions(&[0, 1, 2])
        .build()
        .unwrap()
        .reconstruct(&volume, &failing);

    match err {
        Err(RepatchError::Model(source)) => {
            assert_eq!(source.to_string(), "checkpoint not loaded");
        }
        _ => panic!("Expected Model error"),
    }
}

#[test]
fn test_error_misshapen_prediction() {
    // A model that drops the batch axis is rejected by the scatter.
    let volume = ramp_volume();
    let misshapen = FnModel::new(|batch: ArrayD<f64>| {
        let mut shape = batch.shape().to_vec();
        shape[0] += 1;
        Ok(ArrayD::zeros(IxDyn(&shape)))
    });

    let err = Repatch::new()
        .input_patch_shape(&[4, 4, 4, 1])
        .patch_dimensions(&[0, 1, 2])
        .build()
        .unwrap()
        .reconstruct(&volume, &misshapen);

    match err {
        Err(RepatchError::ShapeMismatch { .. }) => (), // Expected
        _ => panic!("Expected ShapeMismatch error"),
    }
}
