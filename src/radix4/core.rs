// src/radix4/core.rs

use core::f64::consts::PI;

use crate::common::{check_pow2, digit_rev_len, fft_len, twiddle_len, FftError};

/// Fills `out` with the DIT digit-reversal map of a `length`-point transform
/// followed by its DIF inverse.
pub fn build_digit_reversal(out: &mut [u16], length: usize, pow2: u32) -> Result<(), FftError> {
    check_pow2(pow2)?;
    if !length.is_power_of_two() {
        return Err(FftError::NotPowerOfTwo);
    }
    if length != fft_len(pow2) {
        return Err(FftError::SizeMismatch);
    }
    let out = out
        .get_mut(..digit_rev_len(pow2))
        .ok_or(FftError::BufferTooSmall)?;
    precompute_digit_reversal(out, pow2);
    Ok(())
}

/// Fills `out` with the `length` twiddle coefficients of a `2^pow2`-point transform.
pub fn build_twiddle(out: &mut [f32], length: usize, pow2: u32) -> Result<(), FftError> {
    check_pow2(pow2)?;
    if length != twiddle_len(pow2) {
        return Err(FftError::SizeMismatch);
    }
    let out = out.get_mut(..length).ok_or(FftError::BufferTooSmall)?;
    precompute_twiddles(out, pow2);
    Ok(())
}

/// Fills `out[..n]` with the DIT digit-reversal map and `out[n..2n]` with its inverse.
///
/// Digits are radix 4, except the lowest one which is radix 2 when `pow2` is odd.
pub(crate) fn precompute_digit_reversal(out: &mut [u16], pow2: u32) {
    let n = 1usize << pow2;
    let base = if pow2 % 2 == 1 { 2 } else { 4 };
    let (dit, rest) = out.split_at_mut(n);
    let dif = &mut rest[..n];

    for (i, slot) in dit.iter_mut().enumerate() {
        let mut k = i;
        let mut width = base;
        while width != n {
            let next = width * 4;
            k = (k * 4) % next + (k / width) % 4 + next * (k / next);
            width = next;
        }
        *slot = k as u16;
    }

    // The odd-power map is not an involution, so the inverse is stored explicitly.
    for (i, &k) in dit.iter().enumerate() {
        dif[usize::from(k)] = i as u16;
    }
}

/// Fills the twiddle table stage by stage, coarsest span first.
pub(crate) fn precompute_twiddles(out: &mut [f32], pow2: u32) {
    let mut step = 1usize << pow2;
    let mut offset = 0;
    loop {
        offset += twiddle_stage(&mut out[offset..], step);
        if step <= 16 {
            break;
        }
        step >>= 2;
    }
}

/// Writes the coefficients of one stage and returns how many floats were written.
pub(crate) fn twiddle_stage(out: &mut [f32], step: usize) -> usize {
    let phi = -2.0 * PI / step as f64;
    match step {
        8 => {
            // Index 0 is the identity and is skipped.
            for (m, pair) in out[..6].chunks_exact_mut(2).enumerate() {
                let (sin, cos) = sin_cos(phi * (m + 1) as f64);
                pair[0] = cos;
                pair[1] = sin;
            }
            6
        }
        16 => {
            // Index 0 is kept so the stage fills a 4-lane register.
            write_group(&mut out[..24], phi, 0, 4);
            24
        }
        _ => {
            let quarter = step / 4;
            for (g, block) in out[..6 * quarter].chunks_exact_mut(48).enumerate() {
                write_group(block, phi, g * 8, 8);
            }
            6 * quarter
        }
    }
}

/// Writes `cos(mθ)`, `sin(mθ)` for m = 1..3 as six runs of `width` values.
fn write_group(out: &mut [f32], phi: f64, first: usize, width: usize) {
    for m in 0..3 {
        let (cos_run, rest) = out[2 * m * width..].split_at_mut(width);
        let sin_run = &mut rest[..width];
        for k in 0..width {
            let angle = phi * ((m + 1) * (first + k)) as f64;
            let (sin, cos) = sin_cos(angle);
            cos_run[k] = cos;
            sin_run[k] = sin;
        }
    }
}

/// Computes in double precision and rounds on store.
fn sin_cos(angle: f64) -> (f32, f32) {
    #[cfg(feature = "std")]
    return (angle.sin() as f32, angle.cos() as f32);

    #[cfg(not(feature = "std"))]
    return (libm::sin(angle) as f32, libm::cos(angle) as f32);
}

#[cfg(test)]
#[path = "core_tests.rs"]
mod tests;
