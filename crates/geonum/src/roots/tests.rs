use super::*;
use proptest::prelude::*;

const SQRT2: f64 = std::f64::consts::SQRT_2;

#[test]
fn newton_quadratic_convergence() {
    let r = newton_raphson(|x| x * x - 2.0, |x| 2.0 * x, 1.0, RootCfg::default());
    assert!(r.converged);
    assert!(r.reason.is_none());
    assert!((r.x - SQRT2).abs() < 1e-6);
    assert!(r.iterations < 10);
    assert_eq!(r.history.len(), r.iterations);
    // Errors shrink quadratically once close: e_{k+1} <= C e_k^2.
    let errs: Vec<f64> = r.history.iter().map(|s| (s.x - SQRT2).abs()).collect();
    for w in errs.windows(2).skip(1) {
        if w[0] > 1e-8 {
            assert!(w[1] <= w[0] * w[0] + 1e-15);
        }
    }
}

#[test]
fn newton_zero_derivative() {
    let r = newton_raphson(|x| x * x + 1.0, |x| 2.0 * x, 0.0, RootCfg::default());
    assert!(!r.converged);
    assert_eq!(r.reason, Some(FailReason::DerivativeZero));
    assert_eq!(r.iterations, 0);
}

#[test]
fn newton_max_iterations() {
    // No real root: iterates wander forever.
    let cfg = RootCfg {
        tol: 1e-12,
        max_iter: 20,
    };
    let r = newton_raphson(|x| x * x + 1.0, |x| 2.0 * x, 0.5, cfg);
    assert!(!r.converged);
    assert_eq!(r.reason, Some(FailReason::MaxIterations));
    assert_eq!(r.iterations, 20);
    assert_eq!(r.history.len(), 20);
}

#[test]
fn bisection_basic_and_same_sign() {
    let r = bisection(|x| x * x - 2.0, 0.0, 2.0, RootCfg::default());
    assert!(r.converged);
    assert!((r.x - SQRT2).abs() < 1e-9);

    let bad = bisection(|x| x * x + 1.0, -1.0, 1.0, RootCfg::default());
    assert!(!bad.converged);
    assert_eq!(bad.reason, Some(FailReason::SameSign));

    // Root exactly at an endpoint.
    let edge = bisection(|x| x - 3.0, 3.0, 5.0, RootCfg::default());
    assert!(edge.converged);
    assert_eq!(edge.x, 3.0);
}

#[test]
fn secant_converges_and_detects_flat() {
    let r = secant(|x| x.cos() - x, 0.0, 1.0, RootCfg::default());
    assert!(r.converged);
    assert!((r.x.cos() - r.x).abs() < 1e-9);

    let flat = secant(|_| 1.0, 0.0, 1.0, RootCfg::default());
    assert!(!flat.converged);
    assert_eq!(flat.reason, Some(FailReason::DivisionByZero));
}

#[test]
fn brent_converges_faster_than_bisection() {
    let f = |x: f64| x * x * x - 2.0 * x - 5.0;
    let cfg = RootCfg::default();
    let rb = brent(f, 2.0, 3.0, cfg);
    let rbi = bisection(f, 2.0, 3.0, cfg);
    assert!(rb.converged && rbi.converged);
    assert!(f(rb.x).abs() < 1e-8);
    assert!((rb.x - rbi.x).abs() < 1e-8);
    assert!(rb.iterations < rbi.iterations);

    let bad = brent(f, 3.0, 4.0, cfg);
    assert_eq!(bad.reason, Some(FailReason::SameSign));
}

#[test]
fn brent_handles_flat_regions() {
    // Very flat near the root: interpolation is unreliable, bisection steps in.
    let f = |x: f64| (x - 1.0).powi(3);
    let cfg = RootCfg {
        tol: 1e-10,
        max_iter: 200,
    };
    let r = brent(f, 0.0, 3.0, cfg);
    assert!(r.converged);
    assert!((r.x - 1.0).abs() < 1e-3);
}

proptest! {
    #[test]
    fn bisection_always_converges(root in -400.0f64..400.0, left in 0.5f64..500.0, right in 0.5f64..500.0, k in 0.1f64..10.0) {
        let f = |x: f64| k * (x - root);
        let cfg = RootCfg { tol: 1e-10, max_iter: 100 };
        let r = bisection(f, root - left, root + right, cfg);
        prop_assert!(r.converged);
        prop_assert!(r.iterations <= 100);
    }
}
