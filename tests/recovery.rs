use approx::assert_abs_diff_eq;
use rand::{rngs::StdRng, SeedableRng};

use cs_recovery::error::Error;
use cs_recovery::numerics::lbfgs::{LbfgsParameters, Status};
use cs_recovery::{Image, RecoveryDriver, RecoveryParameters, SampleSet, TransformKind};

fn parameters(sparsity_weight: f64) -> RecoveryParameters {
    RecoveryParameters {
        sparsity_weight,
        seed: Some(5),
        solver: LbfgsParameters { max_iterations: 500, ..LbfgsParameters::default() },
        ..RecoveryParameters::default()
    }
}

#[test]
fn full_sampling_restores_the_image_exactly() {
    let data = vec![
        10, 20, 30, 40,
        50, 60, 70, 80,
        90, 100, 110, 120,
        130, 140, 150, 160
    ];
    let image = Image::from_raw(4, 4, data).unwrap();

    for transform in [TransformKind::Fft, TransformKind::Direct, TransformKind::DirectUnnormalized] {
        let params = RecoveryParameters { transform, sample_fraction: 1.0, ..parameters(1e-6) };
        let mut rng = params.rng();
        let result = RecoveryDriver::run(image.clone(), params, &mut rng).unwrap();

        assert_eq!(result.samples.len(), 16);
        assert!(result.cost < 1e-2, "cost {} ({})", result.cost, result.status);
        assert_eq!(result.image, image, "{:?} did not restore the image", transform);
    }
}

#[test]
fn constant_image_is_recovered_from_its_dc_coefficient() {
    let image = Image::from_element(10, 10, 100);
    let params = RecoveryParameters {
        sample_count: Some(10),
        solver: LbfgsParameters { max_iterations: 2000, ..LbfgsParameters::default() },
        ..parameters(0.5)
    };
    let mut rng = params.rng();
    let result = RecoveryDriver::run(image.clone(), params, &mut rng).unwrap();

    assert_eq!(result.samples.len(), 10);
    let nonzero = result.coefficients.as_slice().iter().filter(|c| c.abs() > 1e-9).count();
    assert_eq!(nonzero, 1, "coefficients {:?} ({})", result.coefficients.as_slice(), result.status);
    assert!(result.coefficients.get(0, 0) > 0.0);
    assert_eq!(result.image, image);
}

#[test]
fn default_fraction_samples_a_tenth_of_the_pixels() {
    let image = Image::from_element(10, 10, 100);
    let mut rng = StdRng::seed_from_u64(8);
    let sampled = RecoveryDriver::new(image, RecoveryParameters::default()).unwrap().sample(&mut rng).unwrap();
    assert_eq!(sampled.samples().len(), 10);
}

#[test]
fn no_samples_leaves_only_the_l1_term() {
    let image = Image::from_element(4, 4, 200);
    let params = RecoveryParameters { sample_count: Some(0), ..parameters(5.0) };
    let mut rng = params.rng();
    let result = RecoveryDriver::run(image, params, &mut rng).unwrap();

    assert!(result.samples.is_empty());
    let l1 = result.coefficients.as_slice().iter().map(|c| c.abs()).sum::<f64>();
    assert_abs_diff_eq!(result.cost, 5.0*l1, epsilon = 1e-9);
    assert!(l1 <= 16.0, "L1 norm grew from the start: {}", l1);
}

#[test]
fn oversampling_is_an_invalid_argument() {
    let image = Image::from_element(3, 3, 1);
    let params = RecoveryParameters { sample_count: Some(10), ..parameters(5.0) };
    let mut rng = params.rng();
    match RecoveryDriver::run(image, params, &mut rng) {
        Err(Error::InvalidArgument(_)) => (),
        other => panic!("expected InvalidArgument, got {:?}", other.map(|r| r.status))
    }
}

#[test]
fn early_termination_still_reconstructs() {
    let data = (0..64).map(|i| (i*3 % 256) as u8).collect();
    let image = Image::from_raw(8, 8, data).unwrap();
    let params = RecoveryParameters {
        solver: LbfgsParameters { max_iterations: 1, ..LbfgsParameters::default() },
        ..parameters(5.0)
    };
    let mut rng = params.rng();
    let result = RecoveryDriver::run(image, params, &mut rng).unwrap();

    assert_eq!(result.status, Status::MaximumIterations);
    assert_eq!(result.image.size(), 64);
    match result.ensure_converged() {
        Err(Error::NumericFailure(_)) => (),
        other => panic!("expected NumericFailure, got {:?}", other)
    }
}

#[test]
fn stages_expose_samples_and_status() {
    let image = Image::from_element(6, 5, 42);
    let samples = SampleSet::full(&image);
    let optimized = RecoveryDriver::new(image.clone(), parameters(1e-6)).unwrap()
        .with_samples(samples).unwrap()
        .optimize().unwrap();
    assert!(optimized.status().is_success(), "{}", optimized.status());
    assert_eq!(optimized.coefficients().len(), 30);

    let result = optimized.reconstruct().unwrap();
    assert_eq!(result.image, image);
    assert!(result.ensure_converged().is_ok());
}

#[test]
fn foreign_sample_sets_are_rejected() {
    let image = Image::from_element(4, 4, 1);
    let other = SampleSet::full(&Image::from_element(5, 4, 1));
    assert!(RecoveryDriver::new(image, RecoveryParameters::default()).unwrap().with_samples(other).is_err());
}

#[test]
fn invalid_parameters_fail_before_sampling() {
    let image = Image::from_element(4, 4, 1);
    let bad_fraction = RecoveryParameters { sample_fraction: 1.5, ..RecoveryParameters::default() };
    assert!(RecoveryDriver::new(image.clone(), bad_fraction).is_err());
    let bad_weight = RecoveryParameters { sparsity_weight: -1.0, ..RecoveryParameters::default() };
    assert!(RecoveryDriver::new(image.clone(), bad_weight).is_err());
    let bad_history = RecoveryParameters {
        solver: LbfgsParameters { history: 0, ..LbfgsParameters::default() },
        ..RecoveryParameters::default()
    };
    match RecoveryDriver::new(image, bad_history) {
        Err(Error::InvalidArgument(_)) => (),
        other => panic!("expected InvalidArgument, got {:?}", other)
    }
}

#[test]
fn l1_weight_keeps_the_recovery_sparser() {
    let data = (0..36).map(|i| if i % 6 < 3 { 60 } else { 180 }).collect();
    let image = Image::from_raw(6, 6, data).unwrap();
    let count_nonzero = |weight: f64| {
        let params = RecoveryParameters { sample_count: Some(12), ..parameters(weight) };
        let mut rng = params.rng();
        let result = RecoveryDriver::run(image.clone(), params, &mut rng).unwrap();
        result.coefficients.as_slice().iter().filter(|c| c.abs() > 1e-6).count()
    };
    assert!(count_nonzero(5.0) <= count_nonzero(0.0));
}
