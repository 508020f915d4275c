//! NEON backend, 4 lanes.

use core::arch::aarch64::*;

use super::sealed::Stages;
use super::vector::{self, butterfly4, radix4, SimdVector, Split};
use super::{scalar, Kernel};

#[derive(Debug, Clone, Copy)]
pub struct Neon {
    _private: (),
}

impl Kernel for Neon {
    const NAME: &'static str = "neon";
    const LANES: usize = 4;

    fn detect() -> Option<Self> {
        #[cfg(feature = "std")]
        let available = std::arch::is_aarch64_feature_detected!("neon");
        #[cfg(not(feature = "std"))]
        let available = cfg!(target_feature = "neon");
        available.then_some(Neon { _private: () })
    }
}

impl SimdVector for float32x4_t {
    const LANES: usize = 4;

    #[inline(always)]
    unsafe fn load(ptr: *const f32) -> Self {
        unsafe { vld1q_f32(ptr) }
    }

    #[inline(always)]
    unsafe fn store(self, ptr: *mut f32) {
        unsafe { vst1q_f32(ptr, self) }
    }

    #[inline(always)]
    unsafe fn add(self, rhs: Self) -> Self {
        unsafe { vaddq_f32(self, rhs) }
    }

    #[inline(always)]
    unsafe fn sub(self, rhs: Self) -> Self {
        unsafe { vsubq_f32(self, rhs) }
    }

    #[inline(always)]
    unsafe fn mul(self, rhs: Self) -> Self {
        unsafe { vmulq_f32(self, rhs) }
    }
}

impl Stages for Neon {
    unsafe fn pass<const INVERSE: bool, const DIT: bool>(
        self,
        re: &mut [f32],
        im: &mut [f32],
        twiddle: &[f32],
        step: usize,
    ) {
        unsafe { strided::<INVERSE, DIT>(re.as_mut_ptr(), im.as_mut_ptr(), re.len(), twiddle.as_ptr(), step, 8) }
    }

    unsafe fn depth2<const INVERSE: bool, const DIT: bool>(
        self,
        re: &mut [f32],
        im: &mut [f32],
        twiddle: &[f32],
    ) {
        unsafe { strided::<INVERSE, DIT>(re.as_mut_ptr(), im.as_mut_ptr(), re.len(), twiddle.as_ptr(), 16, 4) }
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
        scalar::gather_split(re, im, scratch, map);
    }
}

#[target_feature(enable = "neon")]
unsafe fn strided<const INVERSE: bool, const DIT: bool>(
    re: *mut f32,
    im: *mut f32,
    len: usize,
    twiddle: *const f32,
    step: usize,
    group: usize,
) {
    unsafe { vector::pass::<float32x4_t, INVERSE, DIT>(re, im, len, twiddle, step, group) }
}

/// De-interleaving loads put each butterfly leg of four groups in one register.
#[target_feature(enable = "neon")]
unsafe fn radix4_depth1<const INVERSE: bool>(re: *mut f32, im: *mut f32, len: usize) {
    for i in (0..len).step_by(16) {
        unsafe {
            let r = vld4q_f32(re.add(i));
            let m = vld4q_f32(im.add(i));
            let y = butterfly4::<float32x4_t, INVERSE>([
                Split { re: r.0, im: m.0 },
                Split { re: r.1, im: m.1 },
                Split { re: r.2, im: m.2 },
                Split { re: r.3, im: m.3 },
            ]);
            vst4q_f32(re.add(i), float32x4x4_t(y[0].re, y[1].re, y[2].re, y[3].re));
            vst4q_f32(im.add(i), float32x4x4_t(y[0].im, y[1].im, y[2].im, y[3].im));
        }
    }
}

#[target_feature(enable = "neon")]
unsafe fn depth2_odd<const INVERSE: bool, const DIT: bool>(
    re: *mut f32,
    im: *mut f32,
    len: usize,
    twiddle: *const f32,
) {
    unsafe {
        let tw = core::slice::from_raw_parts(twiddle, 6);
        let w = [0, 1, 2].map(|m| Split {
            re: vld1q_f32([1.0, tw[2 * m], 1.0, tw[2 * m]].as_ptr()),
            im: vld1q_f32([0.0, tw[2 * m + 1], 0.0, tw[2 * m + 1]].as_ptr()),
        });
        for i in (0..len).step_by(16) {
            let (re, im) = (re.add(i), im.add(i));
            let x = legs(re);
            let y = legs(im);
            let x = [0, 1, 2, 3].map(|k| Split { re: x[k], im: y[k] });
            let out = radix4::<float32x4_t, INVERSE, DIT>(x, w);
            unlegs(re, [out[0].re, out[1].re, out[2].re, out[3].re]);
            unlegs(im, [out[0].im, out[1].im, out[2].im, out[3].im]);
        }
    }
}

/// Splits two groups `a a b b c c d d` into one register per leg.
#[inline(always)]
unsafe fn legs(ptr: *const f32) -> [float32x4_t; 4] {
    unsafe {
        let g0 = vld1q_f32(ptr);
        let g1 = vld1q_f32(ptr.add(4));
        let g2 = vld1q_f32(ptr.add(8));
        let g3 = vld1q_f32(ptr.add(12));
        [
            vcombine_f32(vget_low_f32(g0), vget_low_f32(g2)),
            vcombine_f32(vget_high_f32(g0), vget_high_f32(g2)),
            vcombine_f32(vget_low_f32(g1), vget_low_f32(g3)),
            vcombine_f32(vget_high_f32(g1), vget_high_f32(g3)),
        ]
    }
}

#[inline(always)]
unsafe fn unlegs(ptr: *mut f32, v: [float32x4_t; 4]) {
    unsafe {
        vst1q_f32(ptr, vcombine_f32(vget_low_f32(v[0]), vget_low_f32(v[1])));
        vst1q_f32(ptr.add(4), vcombine_f32(vget_low_f32(v[2]), vget_low_f32(v[3])));
        vst1q_f32(ptr.add(8), vcombine_f32(vget_high_f32(v[0]), vget_high_f32(v[1])));
        vst1q_f32(ptr.add(12), vcombine_f32(vget_high_f32(v[2]), vget_high_f32(v[3])));
    }
}

#[target_feature(enable = "neon")]
unsafe fn radix2_depth1(re: *mut f32, im: *mut f32, len: usize) {
    for i in (0..len).step_by(8) {
        unsafe {
            for ptr in [re.add(i), im.add(i)] {
                let pair = vld2q_f32(ptr);
                let sum = vaddq_f32(pair.0, pair.1);
                let diff = vsubq_f32(pair.0, pair.1);
                vst2q_f32(ptr, float32x4x2_t(sum, diff));
            }
        }
    }
}
