//! SSE2 backend, 4 lanes.
//!
//! Strided stages go through the generic body in `vector`; the terminal
//! kernels transpose groups of four so each register holds one butterfly leg.

use core::arch::x86_64::*;

use super::sealed::Stages;
use super::vector::{self, butterfly4, radix4, SimdVector, Split};
use super::Kernel;

#[derive(Debug, Clone, Copy)]
pub struct Sse {
    _private: (),
}

impl Kernel for Sse {
    const NAME: &'static str = "sse2";
    const LANES: usize = 4;

    fn detect() -> Option<Self> {
        #[cfg(feature = "std")]
        let available = std::arch::is_x86_feature_detected!("sse2");
        #[cfg(not(feature = "std"))]
        let available = cfg!(target_feature = "sse2");
        available.then_some(Sse { _private: () })
    }
}

impl SimdVector for __m128 {
    const LANES: usize = 4;

    #[inline(always)]
    unsafe fn load(ptr: *const f32) -> Self {
        unsafe { _mm_loadu_ps(ptr) }
    }

    #[inline(always)]
    unsafe fn store(self, ptr: *mut f32) {
        unsafe { _mm_storeu_ps(ptr, self) }
    }

    #[inline(always)]
    unsafe fn add(self, rhs: Self) -> Self {
        unsafe { _mm_add_ps(self, rhs) }
    }

    #[inline(always)]
    unsafe fn sub(self, rhs: Self) -> Self {
        unsafe { _mm_sub_ps(self, rhs) }
    }

    #[inline(always)]
    unsafe fn mul(self, rhs: Self) -> Self {
        unsafe { _mm_mul_ps(self, rhs) }
    }
}

impl Stages for Sse {
    unsafe fn pass<const INVERSE: bool, const DIT: bool>(
        self,
        re: &mut [f32],
        im: &mut [f32],
        twiddle: &[f32],
        step: usize,
    ) {
        unsafe {
            strided::<INVERSE, DIT>(re.as_mut_ptr(), im.as_mut_ptr(), re.len(), twiddle.as_ptr(), step, 8)
        }
    }

    unsafe fn depth2<const INVERSE: bool, const DIT: bool>(
        self,
        re: &mut [f32],
        im: &mut [f32],
        twiddle: &[f32],
    ) {
        unsafe {
            strided::<INVERSE, DIT>(re.as_mut_ptr(), im.as_mut_ptr(), re.len(), twiddle.as_ptr(), 16, 4)
        }
    }

    unsafe fn depth2_odd<const INVERSE: bool, const DIT: bool>(
        self,
        re: &mut [f32],
        im: &mut [f32],
        twiddle: &[f32],
    ) {
        unsafe { depth2_odd::<INVERSE, DIT>(re.as_mut_ptr(), im.as_mut_ptr(), re.len(), twiddle.as_ptr()) }
    }

    unsafe fn radix4_depth1<const INVERSE: bool>(self, re: &mut [f32], im: &mut [f32]) {
        unsafe { radix4_depth1::<INVERSE>(re.as_mut_ptr(), im.as_mut_ptr(), re.len()) }
    }

    unsafe fn radix2_depth1(self, re: &mut [f32], im: &mut [f32]) {
        unsafe { radix2_depth1(re.as_mut_ptr(), im.as_mut_ptr(), re.len()) }
    }

    unsafe fn gather(self, re: &mut [f32], im: &mut [f32], scratch: &mut [f32], map: &[u16]) {
        unsafe { gather(re.as_mut_ptr(), im.as_mut_ptr(), scratch.as_mut_ptr(), map.as_ptr(), re.len()) }
    }
}

#[target_feature(enable = "sse2")]
pub(super) unsafe fn strided<const INVERSE: bool, const DIT: bool>(
    re: *mut f32,
    im: *mut f32,
    len: usize,
    twiddle: *const f32,
    step: usize,
    group: usize,
) {
    unsafe { vector::pass::<__m128, INVERSE, DIT>(re, im, len, twiddle, step, group) }
}

#[inline(always)]
unsafe fn transpose4(r: [__m128; 4]) -> [__m128; 4] {
    unsafe {
        let t0 = _mm_unpacklo_ps(r[0], r[1]);
        let t1 = _mm_unpackhi_ps(r[0], r[1]);
        let t2 = _mm_unpacklo_ps(r[2], r[3]);
        let t3 = _mm_unpackhi_ps(r[2], r[3]);
        [
            _mm_movelh_ps(t0, t2),
            _mm_movehl_ps(t2, t0),
            _mm_movelh_ps(t1, t3),
            _mm_movehl_ps(t3, t1),
        ]
    }
}

/// Four 4-point DFTs per iteration: load 4x4, transpose, combine, transpose back.
#[target_feature(enable = "sse2")]
pub(super) unsafe fn radix4_depth1<const INVERSE: bool>(re: *mut f32, im: *mut f32, len: usize) {
    for i in (0..len).step_by(16) {
        unsafe {
            let (re, im) = (re.add(i), im.add(i));
            let r = transpose4([0, 4, 8, 12].map(|k| _mm_loadu_ps(re.add(k))));
            let m = transpose4([0, 4, 8, 12].map(|k| _mm_loadu_ps(im.add(k))));
            let y = butterfly4::<__m128, INVERSE>([
                Split { re: r[0], im: m[0] },
                Split { re: r[1], im: m[1] },
                Split { re: r[2], im: m[2] },
                Split { re: r[3], im: m[3] },
            ]);
            let r = transpose4([y[0].re, y[1].re, y[2].re, y[3].re]);
            let m = transpose4([y[0].im, y[1].im, y[2].im, y[3].im]);
            for k in 0..4 {
                _mm_storeu_ps(re.add(4 * k), r[k]);
                _mm_storeu_ps(im.add(4 * k), m[k]);
            }
        }
    }
}

/// Two 8-point groups per iteration; lane pairs {0, 2} are untwiddled.
#[target_feature(enable = "sse2")]
pub(super) unsafe fn depth2_odd<const INVERSE: bool, const DIT: bool>(
    re: *mut f32,
    im: *mut f32,
    len: usize,
    twiddle: *const f32,
) {
    unsafe {
        let tw = core::slice::from_raw_parts(twiddle, 6);
        let w = [0, 1, 2].map(|m| Split {
            re: _mm_setr_ps(1.0, tw[2 * m], 1.0, tw[2 * m]),
            im: _mm_setr_ps(0.0, tw[2 * m + 1], 0.0, tw[2 * m + 1]),
        });
        for i in (0..len).step_by(16) {
            let (re, im) = (re.add(i), im.add(i));
            let x = legs(re);
            let y = legs(im);
            let x = [0, 1, 2, 3].map(|k| Split { re: x[k], im: y[k] });
            let out = radix4::<__m128, INVERSE, DIT>(x, w);
            unlegs(re, [out[0].re, out[1].re, out[2].re, out[3].re]);
            unlegs(im, [out[0].im, out[1].im, out[2].im, out[3].im]);
        }
    }
}

/// Splits 16 floats laid out as two groups `a a b b c c d d` into one register per leg.
#[inline(always)]
unsafe fn legs(ptr: *const f32) -> [__m128; 4] {
    unsafe {
        let g0 = _mm_loadu_ps(ptr);
        let g1 = _mm_loadu_ps(ptr.add(4));
        let g2 = _mm_loadu_ps(ptr.add(8));
        let g3 = _mm_loadu_ps(ptr.add(12));
        [
            _mm_movelh_ps(g0, g2),
            _mm_movehl_ps(g2, g0),
            _mm_movelh_ps(g1, g3),
            _mm_movehl_ps(g3, g1),
        ]
    }
}

#[inline(always)]
unsafe fn unlegs(ptr: *mut f32, v: [__m128; 4]) {
    unsafe {
        _mm_storeu_ps(ptr, _mm_movelh_ps(v[0], v[1]));
        _mm_storeu_ps(ptr.add(4), _mm_movelh_ps(v[2], v[3]));
        _mm_storeu_ps(ptr.add(8), _mm_movehl_ps(v[1], v[0]));
        _mm_storeu_ps(ptr.add(12), _mm_movehl_ps(v[3], v[2]));
    }
}

#[target_feature(enable = "sse2")]
pub(super) unsafe fn radix2_depth1(re: *mut f32, im: *mut f32, len: usize) {
    for i in (0..len).step_by(8) {
        unsafe {
            for ptr in [re.add(i), im.add(i)] {
                let lo = _mm_loadu_ps(ptr);
                let hi = _mm_loadu_ps(ptr.add(4));
                let even = _mm_shuffle_ps(lo, hi, 0b10_00_10_00);
                let odd = _mm_shuffle_ps(lo, hi, 0b11_01_11_01);
                let sum = _mm_add_ps(even, odd);
                let diff = _mm_sub_ps(even, odd);
                _mm_storeu_ps(ptr, _mm_unpacklo_ps(sum, diff));
                _mm_storeu_ps(ptr.add(4), _mm_unpackhi_ps(sum, diff));
            }
        }
    }
}

#[target_feature(enable = "sse2")]
unsafe fn gather(re: *mut f32, im: *mut f32, scratch: *mut f32, map: *const u16, len: usize) {
    unsafe {
        let (tmp_re, tmp_im) = (scratch, scratch.add(len));
        for i in (0..len).step_by(4) {
            let k = [0, 1, 2, 3].map(|j| usize::from(*map.add(i + j)));
            for (src, dst) in [(re, tmp_re), (im, tmp_im)] {
                let v = _mm_setr_ps(*src.add(k[0]), *src.add(k[1]), *src.add(k[2]), *src.add(k[3]));
                _mm_storeu_ps(dst.add(i), v);
            }
        }
        core::ptr::copy_nonoverlapping(tmp_re, re, len);
        core::ptr::copy_nonoverlapping(tmp_im, im, len);
    }
}
