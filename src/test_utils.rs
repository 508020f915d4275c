//! Helpers shared by the unit tests.

use crate::common::{digit_rev_len, twiddle_len};
use crate::radix4::core::{precompute_digit_reversal, precompute_twiddles};

pub(crate) fn tables(pow2: u32) -> (Vec<f32>, Vec<u16>) {
    let mut twiddle = vec![0.0; twiddle_len(pow2)];
    let mut digits = vec![0; digit_rev_len(pow2)];
    precompute_twiddles(&mut twiddle, pow2);
    precompute_digit_reversal(&mut digits, pow2);
    (twiddle, digits)
}

/// Deterministic complex signal with several incommensurate tones.
pub(crate) fn signal(n: usize) -> (Vec<f32>, Vec<f32>) {
    let re = (0..n)
        .map(|i| {
            let t = i as f32;
            (0.37 * t).sin() + 0.5 * (1.3 * t + 0.2).cos()
        })
        .collect();
    let im = (0..n).map(|i| 0.25 * (2.1 * i as f32).sin()).collect();
    (re, im)
}

/// O(N^2) transform in double precision.
pub(crate) fn naive_dft(re: &[f32], im: &[f32], inverse: bool) -> (Vec<f64>, Vec<f64>) {
    let n = re.len();
    let sign = if inverse { 1.0 } else { -1.0 };
    let mut out_re = vec![0.0; n];
    let mut out_im = vec![0.0; n];
    for k in 0..n {
        for t in 0..n {
            let angle = sign * 2.0 * core::f64::consts::PI * ((k * t) % n) as f64 / n as f64;
            let (s, c) = angle.sin_cos();
            out_re[k] += f64::from(re[t]) * c - f64::from(im[t]) * s;
            out_im[k] += f64::from(re[t]) * s + f64::from(im[t]) * c;
        }
    }
    (out_re, out_im)
}

pub(crate) fn assert_close_f64(got: &[f32], expected: &[f64], tolerance: f64) {
    assert_eq!(got.len(), expected.len());
    for (i, (&g, &e)) in got.iter().zip(expected).enumerate() {
        assert!(
            (f64::from(g) - e).abs() < tolerance,
            "index {i}: {g} vs {e} (tolerance {tolerance})"
        );
    }
}

pub(crate) fn max_abs_diff(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| (x - y).abs()).fold(0.0, f32::max)
}
