use log::{debug, warn};

use super::core::{precompute_digit_reversal, precompute_twiddles};
use crate::backend::{run_dif, run_dit, Kernel, Scalar};
use crate::common::{
    buffer_len, check_pow2, digit_rev_len, fft_len, twiddle_len, Decimation, FftError, FftProcess,
    DECIMATION,
};

/// Complex radix-4 transform of a fixed power-of-two length.
///
/// Holds read-only references to the precomputed tables, so one context can be
/// shared between threads. Scratch space is supplied per call.
#[derive(Debug, Clone, Copy)]
pub struct Fft<'a, K: Kernel = Scalar> {
    twiddle: &'a [f32],
    digit_rev: &'a [u16],
    pow2: u32,
    kernel: K,
}

impl<'a, K: Kernel> Fft<'a, K> {
    /// Fills the caller's tables and builds a context over them.
    pub fn new(twiddle: &'a mut [f32], digit_rev: &'a mut [u16], pow2: u32) -> Result<Self, FftError> {
        check_pow2(pow2)?;
        let kernel = detect_kernel::<K>()?;
        if twiddle.len() < twiddle_len(pow2) || digit_rev.len() < digit_rev_len(pow2) {
            return Err(FftError::BufferTooSmall);
        }

        let twiddle = &mut twiddle[..twiddle_len(pow2)];
        let digit_rev = &mut digit_rev[..digit_rev_len(pow2)];
        precompute_twiddles(twiddle, pow2);
        precompute_digit_reversal(digit_rev, pow2);

        debug!(
            "fft context ready: n={}, backend={}, decimation={:?}",
            fft_len(pow2),
            K::NAME,
            DECIMATION
        );
        Ok(Self { twiddle, digit_rev, pow2, kernel })
    }

    /// Builds a context over tables that were filled beforehand.
    ///
    /// Lengths must match exactly and every digit-reversal entry must index into
    /// the transform.
    pub fn with_tables(twiddle: &'a [f32], digit_rev: &'a [u16], pow2: u32) -> Result<Self, FftError> {
        check_pow2(pow2)?;
        let kernel = detect_kernel::<K>()?;
        if twiddle.len() != twiddle_len(pow2) || digit_rev.len() != digit_rev_len(pow2) {
            return Err(FftError::SizeMismatch);
        }
        let n = fft_len(pow2);
        if digit_rev.iter().any(|&k| usize::from(k) >= n) {
            return Err(FftError::InvalidTable);
        }
        Ok(Self { twiddle, digit_rev, pow2, kernel })
    }

    pub fn len(&self) -> usize {
        fft_len(self.pow2)
    }

    pub fn pow2(&self) -> u32 {
        self.pow2
    }

    pub fn kernel(&self) -> K {
        self.kernel
    }

    pub fn twiddle(&self) -> &'a [f32] {
        self.twiddle
    }

    pub fn dit_map(&self) -> &'a [u16] {
        &self.digit_rev[..self.len()]
    }

    pub fn dif_map(&self) -> &'a [u16] {
        &self.digit_rev[self.len()..]
    }

    /// Forward transform in place. `scratch` must hold at least `2 * len()` floats.
    pub fn forward(&self, re: &mut [f32], im: &mut [f32], scratch: &mut [f32]) -> Result<(), FftError> {
        self.process_inner::<false>(re, im, scratch)
    }

    /// Inverse transform in place, without the `1/N` scaling.
    pub fn inverse(&self, re: &mut [f32], im: &mut [f32], scratch: &mut [f32]) -> Result<(), FftError> {
        self.process_inner::<true>(re, im, scratch)
    }

    fn process_inner<const INVERSE: bool>(
        &self,
        re: &mut [f32],
        im: &mut [f32],
        scratch: &mut [f32],
    ) -> Result<(), FftError> {
        let n = self.len();
        if re.len() != n || im.len() != n {
            return Err(FftError::SizeMismatch);
        }
        let scratch = scratch
            .get_mut(..buffer_len(self.pow2))
            .ok_or(FftError::BufferTooSmall)?;

        // SAFETY: signal and scratch lengths are checked above; table lengths and
        // index ranges were checked when the context was built.
        unsafe {
            match DECIMATION {
                Decimation::Time => {
                    self.kernel.gather(re, im, scratch, self.dit_map());
                    run_dit::<K, INVERSE>(self.kernel, re, im, self.twiddle, self.pow2);
                }
                Decimation::Frequency => {
                    run_dif::<K, INVERSE>(self.kernel, re, im, self.twiddle, self.pow2);
                    self.kernel.gather(re, im, scratch, self.dif_map());
                }
            }
        }
        Ok(())
    }
}

fn detect_kernel<K: Kernel>() -> Result<K, FftError> {
    K::detect().ok_or_else(|| {
        warn!("backend {} requested but not supported by this CPU", K::NAME);
        FftError::BackendUnavailable(K::NAME)
    })
}

impl<K: Kernel> FftProcess for Fft<'_, K> {
    fn process(
        &self,
        re: &mut [f32],
        im: &mut [f32],
        scratch: &mut [f32],
        inverse: bool,
    ) -> Result<(), FftError> {
        if inverse {
            self.inverse(re, im, scratch)
        } else {
            self.forward(re, im, scratch)
        }
    }
}

#[cfg(test)]
#[path = "complex_tests.rs"]
mod tests;
