use super::{FailReason, RootCfg, RootResult, RootStep};
use crate::cfg::ROOT_DENOM_EPS;

/// Newton-Raphson; converges when `|x_{k+1} - x_k| < tol`.
pub fn newton_raphson<F, D>(f: F, df: D, x0: f64, cfg: RootCfg) -> RootResult
where
    F: Fn(f64) -> f64,
    D: Fn(f64) -> f64,
{
    let mut x = x0;
    let mut history = Vec::new();
    for i in 0..cfg.max_iter {
        let fx = f(x);
        let dfx = df(x);
        history.push(RootStep { x, fx });
        if dfx.abs() < ROOT_DENOM_EPS {
            return RootResult::fail(x, FailReason::DerivativeZero, i, history);
        }
        let x_new = x - fx / dfx;
        if (x_new - x).abs() < cfg.tol {
            return RootResult::ok(x_new, i + 1, history);
        }
        x = x_new;
    }
    RootResult::fail(x, FailReason::MaxIterations, cfg.max_iter, history)
}

/// Bisection on a sign-changing bracket `[a, b]`.
///
/// Converges when `|f(c)| < tol` or the half-width drops below `tol`.
pub fn bisection<F>(f: F, a: f64, b: f64, cfg: RootCfg) -> RootResult
where
    F: Fn(f64) -> f64,
{
    let (mut a, mut b) = if a <= b { (a, b) } else { (b, a) };
    let mut fa = f(a);
    let fb = f(b);
    if fa * fb > 0.0 {
        return RootResult::fail(a, FailReason::SameSign, 0, Vec::new());
    }
    if fa == 0.0 {
        return RootResult::ok(a, 0, vec![RootStep { x: a, fx: fa }]);
    }
    if fb == 0.0 {
        return RootResult::ok(b, 0, vec![RootStep { x: b, fx: fb }]);
    }
    let mut history = Vec::new();
    let mut c = 0.5 * (a + b);
    for i in 0..cfg.max_iter {
        c = 0.5 * (a + b);
        let fc = f(c);
        history.push(RootStep { x: c, fx: fc });
        if fc.abs() < cfg.tol || 0.5 * (b - a) < cfg.tol {
            return RootResult::ok(c, i + 1, history);
        }
        if fa * fc < 0.0 {
            b = c;
        } else {
            a = c;
            fa = fc;
        }
    }
    RootResult::fail(c, FailReason::MaxIterations, cfg.max_iter, history)
}

/// Secant method from two starting points.
pub fn secant<F>(f: F, x0: f64, x1: f64, cfg: RootCfg) -> RootResult
where
    F: Fn(f64) -> f64,
{
    let (mut x_prev, mut x) = (x0, x1);
    let mut f_prev = f(x_prev);
    let mut history = vec![RootStep {
        x: x_prev,
        fx: f_prev,
    }];
    for i in 0..cfg.max_iter {
        let fx = f(x);
        history.push(RootStep { x, fx });
        let denom = fx - f_prev;
        if denom.abs() < ROOT_DENOM_EPS {
            return RootResult::fail(x, FailReason::DivisionByZero, i, history);
        }
        let x_new = x - fx * (x - x_prev) / denom;
        if (x_new - x).abs() < cfg.tol {
            return RootResult::ok(x_new, i + 1, history);
        }
        x_prev = x;
        f_prev = fx;
        x = x_new;
    }
    RootResult::fail(x, FailReason::MaxIterations, cfg.max_iter, history)
}

/// Brent's method: inverse quadratic interpolation / secant with a bisection
/// fallback whenever the interpolated step is not trustworthy.
pub fn brent<F>(f: F, a: f64, b: f64, cfg: RootCfg) -> RootResult
where
    F: Fn(f64) -> f64,
{
    let (mut a, mut b) = (a, b);
    let mut fa = f(a);
    let mut fb = f(b);
    if fa * fb > 0.0 {
        return RootResult::fail(b, FailReason::SameSign, 0, Vec::new());
    }
    if fa.abs() < fb.abs() {
        std::mem::swap(&mut a, &mut b);
        std::mem::swap(&mut fa, &mut fb);
    }
    let mut c = a;
    let mut fc = fa;
    let mut d = c;
    let mut bisected = true;
    let mut history = vec![RootStep { x: b, fx: fb }];

    for i in 0..cfg.max_iter {
        if fb == 0.0 || (b - a).abs() < cfg.tol {
            return RootResult::ok(b, i, history);
        }
        let mut s = if fa != fc && fb != fc {
            a * fb * fc / ((fa - fb) * (fa - fc))
                + b * fa * fc / ((fb - fa) * (fb - fc))
                + c * fa * fb / ((fc - fa) * (fc - fb))
        } else {
            b - fb * (b - a) / (fb - fa)
        };

        let lo = (3.0 * a + b) / 4.0;
        let cond1 = !((s > lo.min(b)) && (s < lo.max(b)));
        let cond2 = bisected && (s - b).abs() >= (b - c).abs() / 2.0;
        let cond3 = !bisected && (s - b).abs() >= (c - d).abs() / 2.0;
        let cond4 = bisected && (b - c).abs() < cfg.tol;
        let cond5 = !bisected && (c - d).abs() < cfg.tol;
        if cond1 || cond2 || cond3 || cond4 || cond5 {
            s = 0.5 * (a + b);
            bisected = true;
        } else {
            bisected = false;
        }

        let fs = f(s);
        history.push(RootStep { x: s, fx: fs });
        d = c;
        c = b;
        fc = fb;
        if fa * fs < 0.0 {
            b = s;
            fb = fs;
        } else {
            a = s;
            fa = fs;
        }
        if fa.abs() < fb.abs() {
            std::mem::swap(&mut a, &mut b);
            std::mem::swap(&mut fa, &mut fb);
        }
    }
    if fb == 0.0 || (b - a).abs() < cfg.tol {
        return RootResult::ok(b, cfg.max_iter, history);
    }
    RootResult::fail(b, FailReason::MaxIterations, cfg.max_iter, history)
}
