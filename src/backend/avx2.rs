//! AVX2 backend, 8 lanes.
//!
//! Only the strided stages and the permutation run 8 wide. The span-16 and
//! span-8 terminal kernels have too few independent butterflies per block and
//! reuse the 4-lane bodies from `sse`.

use core::arch::x86_64::*;

use super::sealed::Stages;
use super::vector::{self, SimdVector};
use super::{sse, Kernel};

#[derive(Debug, Clone, Copy)]
pub struct Avx2 {
    _private: (),
}

impl Kernel for Avx2 {
    const NAME: &'static str = "avx2";
    const LANES: usize = 8;

    fn detect() -> Option<Self> {
        #[cfg(feature = "std")]
        let available = std::arch::is_x86_feature_detected!("avx2");
        #[cfg(not(feature = "std"))]
        let available = cfg!(target_feature = "avx2");
        available.then_some(Avx2 { _private: () })
    }
}

impl SimdVector for __m256 {
    const LANES: usize = 8;

    #[inline(always)]
    unsafe fn load(ptr: *const f32) -> Self {
        unsafe { _mm256_loadu_ps(ptr) }
    }

    #[inline(always)]
    unsafe fn store(self, ptr: *mut f32) {
        unsafe { _mm256_storeu_ps(ptr, self) }
    }

    #[inline(always)]
    unsafe fn add(self, rhs: Self) -> Self {
        unsafe { _mm256_add_ps(self, rhs) }
    }

    #[inline(always)]
    unsafe fn sub(self, rhs: Self) -> Self {
        unsafe { _mm256_sub_ps(self, rhs) }
    }

    #[inline(always)]
    unsafe fn mul(self, rhs: Self) -> Self {
        unsafe { _mm256_mul_ps(self, rhs) }
    }
}

impl Stages for Avx2 {
    unsafe fn pass<const INVERSE: bool, const DIT: bool>(
        self,
        re: &mut [f32],
        im: &mut [f32],
        twiddle: &[f32],
        step: usize,
    ) {
        unsafe { strided::<INVERSE, DIT>(re.as_mut_ptr(), im.as_mut_ptr(), re.len(), twiddle.as_ptr(), step) }
    }

    unsafe fn depth2<const INVERSE: bool, const DIT: bool>(
        self,
        re: &mut [f32],
        im: &mut [f32],
        twiddle: &[f32],
    ) {
        unsafe {
            sse::strided::<INVERSE, DIT>(re.as_mut_ptr(), im.as_mut_ptr(), re.len(), twiddle.as_ptr(), 16, 4)
        }
    }

    unsafe fn depth2_odd<const INVERSE: bool, const DIT: bool>(
        self,
        re: &mut [f32],
        im: &mut [f32],
        twiddle: &[f32],
    ) {
        unsafe { sse::depth2_odd::<INVERSE, DIT>(re.as_mut_ptr(), im.as_mut_ptr(), re.len(), twiddle.as_ptr()) }
    }

    unsafe fn radix4_depth1<const INVERSE: bool>(self, re: &mut [f32], im: &mut [f32]) {
        unsafe { sse::radix4_depth1::<INVERSE>(re.as_mut_ptr(), im.as_mut_ptr(), re.len()) }
    }

    unsafe fn radix2_depth1(self, re: &mut [f32], im: &mut [f32]) {
        unsafe { sse::radix2_depth1(re.as_mut_ptr(), im.as_mut_ptr(), re.len()) }
    }

    unsafe fn gather(self, re: &mut [f32], im: &mut [f32], scratch: &mut [f32], map: &[u16]) {
        unsafe { gather(re.as_mut_ptr(), im.as_mut_ptr(), scratch.as_mut_ptr(), map.as_ptr(), re.len()) }
    }
}

#[target_feature(enable = "avx2")]
unsafe fn strided<const INVERSE: bool, const DIT: bool>(
    re: *mut f32,
    im: *mut f32,
    len: usize,
    twiddle: *const f32,
    step: usize,
) {
    unsafe { vector::pass::<__m256, INVERSE, DIT>(re, im, len, twiddle, step, 8) }
}

/// Widens eight `u16` indices and gathers through them.
#[target_feature(enable = "avx2")]
unsafe fn gather(re: *mut f32, im: *mut f32, scratch: *mut f32, map: *const u16, len: usize) {
    unsafe {
        let (tmp_re, tmp_im) = (scratch, scratch.add(len));
        for i in (0..len).step_by(8) {
            let idx = _mm256_cvtepu16_epi32(_mm_loadu_si128(map.add(i).cast()));
            _mm256_storeu_ps(tmp_re.add(i), _mm256_i32gather_ps(re, idx, 4));
            _mm256_storeu_ps(tmp_im.add(i), _mm256_i32gather_ps(im, idx, 4));
        }
        core::ptr::copy_nonoverlapping(tmp_re, re, len);
        core::ptr::copy_nonoverlapping(tmp_im, im, len);
    }
}
