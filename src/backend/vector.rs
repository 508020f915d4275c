// src/backend/vector.rs

/// A register of `LANES` single-precision floats.
///
/// Lets one generic stage body serve every vector width. Implementations are
/// plain intrinsic wrappers and must be inlined into a caller compiled with the
/// matching target feature.
pub(crate) trait SimdVector: Copy {
    const LANES: usize;

    unsafe fn load(ptr: *const f32) -> Self;
    unsafe fn store(self, ptr: *mut f32);
    unsafe fn add(self, rhs: Self) -> Self;
    unsafe fn sub(self, rhs: Self) -> Self;
    unsafe fn mul(self, rhs: Self) -> Self;
}

/// Lanes of complex values held as separate real and imaginary registers.
#[derive(Clone, Copy)]
pub(crate) struct Split<V> {
    pub re: V,
    pub im: V,
}

impl<V: SimdVector> Split<V> {
    #[inline(always)]
    pub unsafe fn load(re: *const f32, im: *const f32) -> Self {
        unsafe {
            Split {
                re: V::load(re),
                im: V::load(im),
            }
        }
    }

    #[inline(always)]
    pub unsafe fn store(self, re: *mut f32, im: *mut f32) {
        unsafe {
            self.re.store(re);
            self.im.store(im);
        }
    }

    #[inline(always)]
    unsafe fn add(self, rhs: Self) -> Self {
        unsafe {
            Split {
                re: self.re.add(rhs.re),
                im: self.im.add(rhs.im),
            }
        }
    }

    #[inline(always)]
    unsafe fn sub(self, rhs: Self) -> Self {
        unsafe {
            Split {
                re: self.re.sub(rhs.re),
                im: self.im.sub(rhs.im),
            }
        }
    }

    /// Multiplies by `w`, or by its conjugate for the inverse transform.
    #[inline(always)]
    unsafe fn rotate<const INVERSE: bool>(self, w: Self) -> Self {
        unsafe {
            if INVERSE {
                Split {
                    re: self.re.mul(w.re).add(self.im.mul(w.im)),
                    im: self.im.mul(w.re).sub(self.re.mul(w.im)),
                }
            } else {
                Split {
                    re: self.re.mul(w.re).sub(self.im.mul(w.im)),
                    im: self.im.mul(w.re).add(self.re.mul(w.im)),
                }
            }
        }
    }
}

#[inline(always)]
pub(crate) unsafe fn butterfly4<V: SimdVector, const INVERSE: bool>(
    [a, b, c, d]: [Split<V>; 4],
) -> [Split<V>; 4] {
    unsafe {
        let t0 = a.add(c);
        let t1 = a.sub(c);
        let t2 = b.add(d);
        let t3 = Split {
            re: b.im.sub(d.im),
            im: d.re.sub(b.re),
        };
        if INVERSE {
            [t0.add(t2), t1.sub(t3), t0.sub(t2), t1.add(t3)]
        } else {
            [t0.add(t2), t1.add(t3), t0.sub(t2), t1.sub(t3)]
        }
    }
}

#[inline(always)]
pub(crate) unsafe fn radix4<V: SimdVector, const INVERSE: bool, const DIT: bool>(
    x: [Split<V>; 4],
    w: [Split<V>; 3],
) -> [Split<V>; 4] {
    unsafe {
        if DIT {
            butterfly4::<V, INVERSE>([
                x[0],
                x[1].rotate::<INVERSE>(w[0]),
                x[2].rotate::<INVERSE>(w[1]),
                x[3].rotate::<INVERSE>(w[2]),
            ])
        } else {
            let y = butterfly4::<V, INVERSE>(x);
            [
                y[0],
                y[1].rotate::<INVERSE>(w[0]),
                y[2].rotate::<INVERSE>(w[1]),
                y[3].rotate::<INVERSE>(w[2]),
            ]
        }
    }
}

/// Strided radix-4 stage over blocks of `step`, twiddles packed in groups of
/// `group` butterflies.
///
/// # Safety
/// `re` and `im` point to `len` floats, `len` is a multiple of `step`,
/// `V::LANES` divides both `group` and `step / 4`, and `twiddle` holds
/// `6 * step / 4` floats.
#[inline(always)]
pub(crate) unsafe fn pass<V: SimdVector, const INVERSE: bool, const DIT: bool>(
    re: *mut f32,
    im: *mut f32,
    len: usize,
    twiddle: *const f32,
    step: usize,
    group: usize,
) {
    let quarter = step / 4;
    for block in (0..len).step_by(step) {
        for j in (0..quarter).step_by(V::LANES) {
            unsafe {
                let tw = twiddle.add((j / group) * 6 * group + j % group);
                let w = [
                    Split::<V>::load(tw, tw.add(group)),
                    Split::<V>::load(tw.add(2 * group), tw.add(3 * group)),
                    Split::<V>::load(tw.add(4 * group), tw.add(5 * group)),
                ];
                let (re, im) = (re.add(block + j), im.add(block + j));
                let x = [
                    Split::<V>::load(re, im),
                    Split::<V>::load(re.add(quarter), im.add(quarter)),
                    Split::<V>::load(re.add(2 * quarter), im.add(2 * quarter)),
                    Split::<V>::load(re.add(3 * quarter), im.add(3 * quarter)),
                ];
                let y = radix4::<V, INVERSE, DIT>(x, w);
                for (k, v) in y.into_iter().enumerate() {
                    v.store(re.add(k * quarter), im.add(k * quarter));
                }
            }
        }
    }
}
