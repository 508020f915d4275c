//! Butterfly engines.
//!
//! Every backend implements the same radix-4 stages over split real/imaginary
//! arrays. The stage schedule (which span, which slice of the twiddle table) is
//! shared here; backends only differ in how they move data through registers.

use core::fmt::Debug;

use crate::common::{fft_len, twiddle_len, twiddle_stage_size, MAX_POW2, MIN_POW2};

mod scalar;
#[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
mod vector;

#[cfg(target_arch = "x86_64")]
mod avx2;
#[cfg(target_arch = "aarch64")]
mod neon;
#[cfg(target_arch = "x86_64")]
mod sse;

#[cfg(target_arch = "x86_64")]
pub use avx2::Avx2;
#[cfg(target_arch = "aarch64")]
pub use neon::Neon;
pub use scalar::Scalar;
#[cfg(target_arch = "x86_64")]
pub use sse::Sse;

pub(crate) mod sealed {
    /// Stage primitives a backend provides.
    ///
    /// All methods share one contract: `re` and `im` have the same length `len`,
    /// a power of two in `[MIN_FFT_LEN, MAX_FFT_LEN]`, and `twiddle` holds at
    /// least `twiddle_stage_size(step)` floats of the matching stage.
    pub trait Stages: Copy {
        /// One strided radix-4 stage of span `step >= 32`.
        ///
        /// # Safety
        /// See the trait contract; `step` divides `len`.
        unsafe fn pass<const INVERSE: bool, const DIT: bool>(
            self,
            re: &mut [f32],
            im: &mut [f32],
            twiddle: &[f32],
            step: usize,
        );

        /// Span-16 stage with the 4-wide twiddle layout.
        ///
        /// # Safety
        /// See the trait contract.
        unsafe fn depth2<const INVERSE: bool, const DIT: bool>(
            self,
            re: &mut [f32],
            im: &mut [f32],
            twiddle: &[f32],
        );

        /// Span-8 stage on interleaved pairs, odd powers only.
        ///
        /// # Safety
        /// See the trait contract.
        unsafe fn depth2_odd<const INVERSE: bool, const DIT: bool>(
            self,
            re: &mut [f32],
            im: &mut [f32],
            twiddle: &[f32],
        );

        /// 4-point DFTs over consecutive groups of four.
        ///
        /// # Safety
        /// See the trait contract.
        unsafe fn radix4_depth1<const INVERSE: bool>(self, re: &mut [f32], im: &mut [f32]);

        /// 2-point DFTs over consecutive pairs.
        ///
        /// # Safety
        /// See the trait contract.
        unsafe fn radix2_depth1(self, re: &mut [f32], im: &mut [f32]);

        /// `re[i] = re[map[i]]`, `im[i] = im[map[i]]` through `scratch`.
        ///
        /// # Safety
        /// `map.len() == len`, every entry is below `len`, `scratch.len() >= 2 * len`.
        unsafe fn gather(self, re: &mut [f32], im: &mut [f32], scratch: &mut [f32], map: &[u16]);
    }
}

/// A butterfly backend.
///
/// Values of a kernel type are proof that the CPU supports it; obtain one with
/// [`Kernel::detect`]. The provided methods expose the raw permutation and the
/// two stage cores for callers that manage tables themselves. They panic when
/// their arguments do not describe a supported transform.
pub trait Kernel: sealed::Stages + Debug + Send + Sync + 'static {
    const NAME: &'static str;
    /// Floats processed per vector instruction.
    const LANES: usize;

    fn detect() -> Option<Self>;

    fn shuffle(self, re: &mut [f32], im: &mut [f32], scratch: &mut [f32], map: &[u16]) {
        let len = re.len();
        assert!(
            len.is_power_of_two() && (fft_len(MIN_POW2)..=fft_len(MAX_POW2)).contains(&len),
            "unsupported transform length {len}"
        );
        assert_eq!(im.len(), len, "re and im lengths differ");
        assert_eq!(map.len(), len, "permutation table length");
        assert!(scratch.len() >= 2 * len, "scratch holds fewer than 2N floats");
        assert!(
            map.iter().all(|&k| usize::from(k) < len),
            "permutation index out of range"
        );
        // SAFETY: lengths and index range checked above.
        unsafe { self.gather(re, im, scratch, map) }
    }

    /// Decimation-in-frequency core; output is left in digit-reversed order.
    fn dif<const INVERSE: bool>(self, re: &mut [f32], im: &mut [f32], twiddle: &[f32], pow2: u32) {
        check_core_args(re, im, twiddle, pow2);
        // SAFETY: arguments validated above.
        unsafe { run_dif::<Self, INVERSE>(self, re, im, twiddle, pow2) }
    }

    /// Decimation-in-time core; input must already be in digit-reversed order.
    fn dit<const INVERSE: bool>(self, re: &mut [f32], im: &mut [f32], twiddle: &[f32], pow2: u32) {
        check_core_args(re, im, twiddle, pow2);
        // SAFETY: arguments validated above.
        unsafe { run_dit::<Self, INVERSE>(self, re, im, twiddle, pow2) }
    }
}

fn check_core_args(re: &[f32], im: &[f32], twiddle: &[f32], pow2: u32) {
    assert!((MIN_POW2..=MAX_POW2).contains(&pow2), "unsupported pow2 {pow2}");
    assert_eq!(re.len(), fft_len(pow2), "re length");
    assert_eq!(im.len(), fft_len(pow2), "im length");
    assert_eq!(twiddle.len(), twiddle_len(pow2), "twiddle table length");
}

/// Runs every stage from span N down to the terminal kernels.
///
/// # Safety
/// `re`, `im` hold `2^pow2` floats, `pow2` is supported, and `twiddle` is the full table.
pub(crate) unsafe fn run_dif<K: sealed::Stages, const INVERSE: bool>(
    kernel: K,
    re: &mut [f32],
    im: &mut [f32],
    twiddle: &[f32],
    pow2: u32,
) {
    let mut step = re.len();
    let mut offset = 0;
    unsafe {
        while step > 16 {
            let size = twiddle_stage_size(step);
            kernel.pass::<INVERSE, false>(re, im, &twiddle[offset..offset + size], step);
            offset += size;
            step >>= 2;
        }
        let terminal = &twiddle[offset..];
        if pow2 % 2 == 1 {
            kernel.depth2_odd::<INVERSE, false>(re, im, terminal);
            kernel.radix2_depth1(re, im);
        } else {
            kernel.depth2::<INVERSE, false>(re, im, terminal);
            kernel.radix4_depth1::<INVERSE>(re, im);
        }
    }
}

/// Runs the terminal kernels, then every stage up to span N, walking the
/// twiddle table backward from its end.
///
/// # Safety
/// Same as [`run_dif`].
pub(crate) unsafe fn run_dit<K: sealed::Stages, const INVERSE: bool>(
    kernel: K,
    re: &mut [f32],
    im: &mut [f32],
    twiddle: &[f32],
    pow2: u32,
) {
    let len = re.len();
    let mut step = if pow2 % 2 == 1 { 8 } else { 16 };
    let mut end = twiddle.len();
    let mut start = end - twiddle_stage_size(step);
    unsafe {
        if pow2 % 2 == 1 {
            kernel.radix2_depth1(re, im);
            kernel.depth2_odd::<INVERSE, true>(re, im, &twiddle[start..end]);
        } else {
            kernel.radix4_depth1::<INVERSE>(re, im);
            kernel.depth2::<INVERSE, true>(re, im, &twiddle[start..end]);
        }
        while step != len {
            step <<= 2;
            end = start;
            start = end - twiddle_stage_size(step);
            kernel.pass::<INVERSE, true>(re, im, &twiddle[start..end], step);
        }
    }
}

#[cfg(test)]
#[path = "backend_tests.rs"]
mod tests;
