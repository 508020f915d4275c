// src/backend/scalar.rs

use num_complex::Complex32;

use super::sealed::Stages;
use super::Kernel;

/// Portable reference backend; every other backend is checked against it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scalar;

impl Kernel for Scalar {
    const NAME: &'static str = "scalar";
    const LANES: usize = 1;

    fn detect() -> Option<Self> {
        Some(Scalar)
    }
}

impl Stages for Scalar {
    unsafe fn pass<const INVERSE: bool, const DIT: bool>(
        self,
        re: &mut [f32],
        im: &mut [f32],
        twiddle: &[f32],
        step: usize,
    ) {
        strided_pass::<INVERSE, DIT>(re, im, twiddle, step, 8);
    }

    unsafe fn depth2<const INVERSE: bool, const DIT: bool>(
        self,
        re: &mut [f32],
        im: &mut [f32],
        twiddle: &[f32],
    ) {
        strided_pass::<INVERSE, DIT>(re, im, twiddle, 16, 4);
    }

    unsafe fn depth2_odd<const INVERSE: bool, const DIT: bool>(
        self,
        re: &mut [f32],
        im: &mut [f32],
        twiddle: &[f32],
    ) {
        // Butterfly 0 of each group is untwiddled, butterfly 1 uses interleaved pairs.
        let w = [
            Complex32::new(twiddle[0], twiddle[1]),
            Complex32::new(twiddle[2], twiddle[3]),
            Complex32::new(twiddle[4], twiddle[5]),
        ];
        for (re, im) in re.chunks_exact_mut(8).zip(im.chunks_exact_mut(8)) {
            let x = load4(re, im, 0, 2);
            store4(re, im, 0, 2, butterfly4::<INVERSE>(x));

            let x = load4(re, im, 1, 2);
            store4(re, im, 1, 2, radix4::<INVERSE, DIT>(x, w));
        }
    }

    unsafe fn radix4_depth1<const INVERSE: bool>(self, re: &mut [f32], im: &mut [f32]) {
        for (re, im) in re.chunks_exact_mut(4).zip(im.chunks_exact_mut(4)) {
            let x = load4(re, im, 0, 1);
            store4(re, im, 0, 1, butterfly4::<INVERSE>(x));
        }
    }

    unsafe fn radix2_depth1(self, re: &mut [f32], im: &mut [f32]) {
        for (re, im) in re.chunks_exact_mut(2).zip(im.chunks_exact_mut(2)) {
            let (r0, r1) = (re[0], re[1]);
            re[0] = r0 + r1;
            re[1] = r0 - r1;
            let (i0, i1) = (im[0], im[1]);
            im[0] = i0 + i1;
            im[1] = i0 - i1;
        }
    }

    unsafe fn gather(self, re: &mut [f32], im: &mut [f32], scratch: &mut [f32], map: &[u16]) {
        gather_split(re, im, scratch, map);
    }
}

/// Scalar gather into scratch followed by a copy back.
pub(crate) fn gather_split(re: &mut [f32], im: &mut [f32], scratch: &mut [f32], map: &[u16]) {
    let len = re.len();
    let (tmp_re, rest) = scratch.split_at_mut(len);
    let tmp_im = &mut rest[..len];
    for (i, &k) in map.iter().enumerate() {
        let k = usize::from(k);
        tmp_re[i] = re[k];
        tmp_im[i] = im[k];
    }
    re.copy_from_slice(tmp_re);
    im.copy_from_slice(tmp_im);
}

/// Twiddles of butterfly `j` in a stage packed as groups of `group` lanes.
#[inline(always)]
fn stage_twiddles(twiddle: &[f32], j: usize, group: usize) -> [Complex32; 3] {
    let base = (j / group) * 6 * group + j % group;
    [0, 1, 2].map(|m| {
        Complex32::new(
            twiddle[base + 2 * m * group],
            twiddle[base + (2 * m + 1) * group],
        )
    })
}

fn strided_pass<const INVERSE: bool, const DIT: bool>(
    re: &mut [f32],
    im: &mut [f32],
    twiddle: &[f32],
    step: usize,
    group: usize,
) {
    let quarter = step / 4;
    for (re, im) in re.chunks_exact_mut(step).zip(im.chunks_exact_mut(step)) {
        for j in 0..quarter {
            let w = stage_twiddles(twiddle, j, group);
            let x = load4(re, im, j, quarter);
            store4(re, im, j, quarter, radix4::<INVERSE, DIT>(x, w));
        }
    }
}

#[inline(always)]
fn load4(re: &[f32], im: &[f32], first: usize, stride: usize) -> [Complex32; 4] {
    [0, 1, 2, 3].map(|k| Complex32::new(re[first + k * stride], im[first + k * stride]))
}

#[inline(always)]
fn store4(re: &mut [f32], im: &mut [f32], first: usize, stride: usize, y: [Complex32; 4]) {
    for (k, v) in y.into_iter().enumerate() {
        re[first + k * stride] = v.re;
        im[first + k * stride] = v.im;
    }
}

/// Multiplies by `w`, or by its conjugate for the inverse transform.
#[inline(always)]
fn rotate<const INVERSE: bool>(x: Complex32, w: Complex32) -> Complex32 {
    if INVERSE { x * w.conj() } else { x * w }
}

/// Untwiddled 4-point DFT; the sign of `t3` is flipped by direction.
#[inline(always)]
fn butterfly4<const INVERSE: bool>([a, b, c, d]: [Complex32; 4]) -> [Complex32; 4] {
    let t0 = a + c;
    let t1 = a - c;
    let t2 = b + d;
    let t3 = Complex32::new(b.im - d.im, d.re - b.re);
    if INVERSE {
        [t0 + t2, t1 - t3, t0 - t2, t1 + t3]
    } else {
        [t0 + t2, t1 + t3, t0 - t2, t1 - t3]
    }
}

/// DIT rotates the inputs before combining, DIF rotates the outputs after.
#[inline(always)]
fn radix4<const INVERSE: bool, const DIT: bool>(
    x: [Complex32; 4],
    w: [Complex32; 3],
) -> [Complex32; 4] {
    if DIT {
        butterfly4::<INVERSE>([
            x[0],
            rotate::<INVERSE>(x[1], w[0]),
            rotate::<INVERSE>(x[2], w[1]),
            rotate::<INVERSE>(x[3], w[2]),
        ])
    } else {
        let y = butterfly4::<INVERSE>(x);
        [
            y[0],
            rotate::<INVERSE>(y[1], w[0]),
            rotate::<INVERSE>(y[2], w[1]),
            rotate::<INVERSE>(y[3], w[2]),
        ]
    }
}

#[cfg(test)]
#[path = "scalar_tests.rs"]
mod tests;
