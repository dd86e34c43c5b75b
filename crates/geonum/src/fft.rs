//! Recursive radix-2 Cooley-Tukey FFT.
//!
//! Inputs of any length are zero-padded to the next power of two. Padding
//! changes the meaning of frequency bins; spectral-analysis callers must
//! account for it (convolution callers need not).

use nalgebra::Complex;
use std::f64::consts::PI;

/// Forward transform of a real signal.
pub fn forward(signal: &[f64]) -> Vec<Complex<f64>> {
    let x: Vec<Complex<f64>> = signal.iter().map(|&re| Complex::new(re, 0.0)).collect();
    forward_complex(&x)
}

/// Forward transform of a complex signal.
pub fn forward_complex(signal: &[Complex<f64>]) -> Vec<Complex<f64>> {
    if signal.is_empty() {
        return Vec::new();
    }
    let n = signal.len().next_power_of_two();
    let mut x = signal.to_vec();
    x.resize(n, Complex::new(0.0, 0.0));
    fft_recursive(&x)
}

/// Inverse transform: conj → forward → conj, scaled by `1/n`.
pub fn inverse(spectrum: &[Complex<f64>]) -> Vec<Complex<f64>> {
    if spectrum.is_empty() {
        return Vec::new();
    }
    let conj: Vec<Complex<f64>> = spectrum.iter().map(|z| z.conj()).collect();
    let y = forward_complex(&conj);
    let scale = 1.0 / y.len() as f64;
    y.into_iter().map(|z| z.conj() * scale).collect()
}

pub fn magnitude(spectrum: &[Complex<f64>]) -> Vec<f64> {
    spectrum.iter().map(|z| z.re.hypot(z.im)).collect()
}

pub fn phase(spectrum: &[Complex<f64>]) -> Vec<f64> {
    spectrum.iter().map(|z| z.im.atan2(z.re)).collect()
}

/// Linear convolution via pointwise spectrum products. Real parts only.
pub fn convolve(a: &[f64], b: &[f64]) -> Vec<f64> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let out_len = a.len() + b.len() - 1;
    let n = out_len.next_power_of_two();
    let mut pa = a.to_vec();
    pa.resize(n, 0.0);
    let mut pb = b.to_vec();
    pb.resize(n, 0.0);
    let fa = forward(&pa);
    let fb = forward(&pb);
    let prod: Vec<Complex<f64>> = fa.iter().zip(&fb).map(|(x, y)| x * y).collect();
    let mut out: Vec<f64> = inverse(&prod).into_iter().map(|z| z.re).collect();
    out.truncate(out_len);
    out
}

/// Even/odd split and twiddle recombination. `x.len()` must be a power of two.
fn fft_recursive(x: &[Complex<f64>]) -> Vec<Complex<f64>> {
    let n = x.len();
    if n == 1 {
        return x.to_vec();
    }
    let even: Vec<Complex<f64>> = x.iter().step_by(2).copied().collect();
    let odd: Vec<Complex<f64>> = x.iter().skip(1).step_by(2).copied().collect();
    let fe = fft_recursive(&even);
    let fo = fft_recursive(&odd);
    let mut out = vec![Complex::new(0.0, 0.0); n];
    let half = n / 2;
    for k in 0..half {
        let angle = -2.0 * PI * k as f64 / n as f64;
        let t = Complex::from_polar(1.0, angle) * fo[k];
        out[k] = fe[k] + t;
        out[k + half] = fe[k] - t;
    }
    out
}
