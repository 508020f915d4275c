//! Helpers around the transform: scaling, real-signal unpacking, test signals.

use core::f32::consts::PI;

use num_complex::Complex32;

use crate::common::FftError;

/// Scales both arrays by `1 / re.len()`. Apply after an inverse transform.
pub fn normalize(re: &mut [f32], im: &mut [f32]) {
    let scale = 1.0 / re.len() as f32;
    for v in re.iter_mut().chain(im.iter_mut()) {
        *v *= scale;
    }
}

/// Separates the spectra of two real signals transformed together as
/// `z = x + j*y`.
///
/// `dual_re`/`dual_im` hold the N-point spectrum of `z`. Each output holds N/2
/// bins in packed form: index 0 carries DC in the real array and Nyquist in
/// the imaginary one.
pub fn unpack_dual_to_perm(
    dual_re: &[f32],
    dual_im: &[f32],
    perm0_re: &mut [f32],
    perm0_im: &mut [f32],
    perm1_re: &mut [f32],
    perm1_im: &mut [f32],
) -> Result<(), FftError> {
    let n = dual_re.len();
    if !n.is_power_of_two() || n < 2 {
        return Err(FftError::NotPowerOfTwo);
    }
    let half = n / 2;
    if dual_im.len() != n
        || [perm0_re.len(), perm0_im.len(), perm1_re.len(), perm1_im.len()]
            .iter()
            .any(|&len| len != half)
    {
        return Err(FftError::SizeMismatch);
    }

    perm0_re[0] = dual_re[0];
    perm0_im[0] = dual_re[half];
    perm1_re[0] = dual_im[0];
    perm1_im[0] = dual_im[half];
    for i in 1..half {
        let j = n - i;
        perm0_re[i] = 0.5 * (dual_re[i] + dual_re[j]);
        perm0_im[i] = 0.5 * (dual_im[i] - dual_im[j]);
        perm1_re[i] = 0.5 * (dual_im[i] + dual_im[j]);
        perm1_im[i] = 0.5 * (dual_re[j] - dual_re[i]);
    }
    Ok(())
}

/// Adds `gain * sin(2π·i·freq / sample_rate)` to every sample.
pub fn add_sine_wave(out: &mut [f32], gain: f32, freq: f32, sample_rate: f32) {
    let step = freq / sample_rate;
    for (i, v) in out.iter_mut().enumerate() {
        *v += gain * sin(2.0 * PI * i as f32 * step);
    }
}

/// Mean of `|a[i] - b[i]|`.
///
/// # Panics
/// If the lengths differ.
pub fn mean_abs_error(a: &[f32], b: &[f32]) -> f32 {
    assert_eq!(a.len(), b.len(), "compared buffers differ in length");
    if a.is_empty() {
        return 0.0;
    }
    let sum: f32 = a.iter().zip(b).map(|(x, y)| abs(x - y)).sum();
    sum / a.len() as f32
}

/// Splits complex samples into separate real and imaginary arrays.
pub fn deinterleave(input: &[Complex32], re: &mut [f32], im: &mut [f32]) -> Result<(), FftError> {
    if re.len() != input.len() || im.len() != input.len() {
        return Err(FftError::SizeMismatch);
    }
    for ((c, r), i) in input.iter().zip(re.iter_mut()).zip(im.iter_mut()) {
        *r = c.re;
        *i = c.im;
    }
    Ok(())
}

pub fn interleave(re: &[f32], im: &[f32], out: &mut [Complex32]) -> Result<(), FftError> {
    if re.len() != out.len() || im.len() != out.len() {
        return Err(FftError::SizeMismatch);
    }
    for ((c, &r), &i) in out.iter_mut().zip(re).zip(im) {
        *c = Complex32::new(r, i);
    }
    Ok(())
}

fn sin(x: f32) -> f32 {
    #[cfg(feature = "std")]
    return x.sin();

    #[cfg(not(feature = "std"))]
    return libm::sinf(x);
}

fn abs(x: f32) -> f32 {
    #[cfg(feature = "std")]
    return x.abs();

    #[cfg(not(feature = "std"))]
    return libm::fabsf(x);
}

#[cfg(test)]
#[path = "utils_tests.rs"]
mod tests;
