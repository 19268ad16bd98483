use qsim_core::{ConfigError, ExpVariate};

#[test]
fn test_same_seed_same_sequence() {
    let a: Vec<f64> = ExpVariate::new(42, 2.5).unwrap().take(1_000).collect();
    let b: Vec<f64> = ExpVariate::new(42, 2.5).unwrap().take(1_000).collect();
    assert_eq!(a, b);

    let c: Vec<f64> = ExpVariate::new(43, 2.5).unwrap().take(1_000).collect();
    assert_ne!(a, c);
}

#[test]
fn test_samples_are_exponential() {
    let rate = 4.0;
    let mut variate = ExpVariate::new(11, rate).unwrap();
    let n = 200_000;
    let samples: Vec<f64> = (0..n).map(|_| variate.sample()).collect();
    assert!(samples.iter().all(|&x| x >= 0.0 && x.is_finite()));

    let mean = samples.iter().sum::<f64>() / n as f64;
    assert!(
        (mean - 1.0 / rate).abs() < 0.01 * (1.0 / rate) * 2.0,
        "mean {mean} too far from {}",
        1.0 / rate
    );

    // P(X > 1/rate) = e^-1
    let tail = samples.iter().filter(|&&x| x > 1.0 / rate).count() as f64 / n as f64;
    assert!((tail - (-1.0f64).exp()).abs() < 0.01, "tail fraction {tail}");
}

#[test]
fn test_rate_scales_samples() {
    let slow: Vec<f64> = ExpVariate::new(5, 1.0).unwrap().take(10).collect();
    let fast: Vec<f64> = ExpVariate::new(5, 2.0).unwrap().take(10).collect();
    for (s, f) in slow.iter().zip(&fast) {
        assert!((s / 2.0 - f).abs() < 1e-12);
    }
}

#[test]
fn test_non_positive_rate_is_rejected() {
    for rate in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        match ExpVariate::new(1, rate) {
            Err(ConfigError::InvalidRate { .. }) => {}
            other => panic!("rate {rate} accepted: {other:?}"),
        }
    }
}
