//! Transform objects carved out of a single memory block.
//!
//! The block is split into three regions, each starting on a
//! [`MEM_ALIGNMENT`] boundary: scratch (`2N` floats), digit reversal
//! (`2N` indices) and twiddles. [`object_size`] gives the block size, slack
//! for aligning the start included.

use core::slice;

use log::debug;

use super::complex::Fft;
use crate::backend::{Kernel, Scalar};
use crate::common::{
    aligned_size, buffer_len, check_pow2, digit_rev_len, object_size, twiddle_len, FftError,
    MEM_ALIGNMENT,
};

/// A transform context together with its own scratch buffer.
#[derive(Debug)]
pub struct FftObject<'a, K: Kernel = Scalar> {
    fft: Fft<'a, K>,
    scratch: &'a mut [f32],
}

impl<'a, K: Kernel> FftObject<'a, K> {
    /// Bytes `new` needs for a `2^pow2`-point transform.
    pub const fn required_size(pow2: u32) -> usize {
        object_size(pow2)
    }

    pub fn new(pow2: u32, memory: &'a mut [u8]) -> Result<Self, FftError> {
        check_pow2(pow2)?;
        let required = object_size(pow2);
        if memory.len() < required {
            return Err(FftError::MemoryTooSmall { required, actual: memory.len() });
        }
        debug!(
            "carving fft object: pow2={pow2}, required={required} bytes, supplied={} bytes",
            memory.len()
        );

        // `object_size` reserves MEM_ALIGNMENT bytes of slack, so the offset always fits.
        let offset = memory.as_ptr().align_offset(MEM_ALIGNMENT);
        if offset >= MEM_ALIGNMENT {
            return Err(FftError::MemoryTooSmall { required, actual: memory.len() });
        }
        let memory = &mut memory[offset..];

        let (scratch, rest) = memory.split_at_mut(aligned_size(buffer_len(pow2) * size_of::<f32>()));
        let (digits, rest) = rest.split_at_mut(aligned_size(digit_rev_len(pow2) * size_of::<u16>()));

        // SAFETY: every region starts on a 64-byte boundary, which satisfies the
        // alignment of f32 and u16, and any bit pattern is a valid value of both.
        let scratch = unsafe { cast_region::<f32>(scratch, buffer_len(pow2)) };
        let digits = unsafe { cast_region::<u16>(digits, digit_rev_len(pow2)) };
        let twiddle = unsafe { cast_region::<f32>(rest, twiddle_len(pow2)) };

        let fft = Fft::new(twiddle, digits, pow2)?;
        Ok(Self { fft, scratch })
    }

    pub fn forward(&mut self, re: &mut [f32], im: &mut [f32]) -> Result<(), FftError> {
        self.fft.forward(re, im, self.scratch)
    }

    pub fn inverse(&mut self, re: &mut [f32], im: &mut [f32]) -> Result<(), FftError> {
        self.fft.inverse(re, im, self.scratch)
    }

    pub fn fft(&self) -> &Fft<'a, K> {
        &self.fft
    }

    /// Splits into the shareable context and the embedded scratch buffer.
    pub fn into_parts(self) -> (Fft<'a, K>, &'a mut [f32]) {
        (self.fft, self.scratch)
    }
}

/// Reinterprets the front of `bytes` as `len` values of `T`.
///
/// # Safety
/// `bytes` must be aligned for `T`, and every bit pattern must be a valid `T`.
unsafe fn cast_region<T>(bytes: &mut [u8], len: usize) -> &mut [T] {
    assert!(bytes.len() >= len * size_of::<T>());
    debug_assert_eq!(bytes.as_ptr() as usize % align_of::<T>(), 0);
    unsafe { slice::from_raw_parts_mut(bytes.as_mut_ptr().cast::<T>(), len) }
}

#[cfg(feature = "std")]
mod owned {
    use log::debug;

    use super::FftObject;
    use crate::backend::Kernel;
    use crate::common::{check_pow2, object_size, FftError, MEM_ALIGNMENT};

    #[repr(C, align(64))]
    #[derive(Clone, Copy)]
    struct CacheLine([u8; MEM_ALIGNMENT]);

    /// Heap block sized and aligned for one [`FftObject`].
    pub struct FftMemory {
        lines: Vec<CacheLine>,
        pow2: u32,
    }

    impl FftMemory {
        pub fn allocate(pow2: u32) -> Result<Self, FftError> {
            check_pow2(pow2)?;
            let bytes = object_size(pow2);
            let count = bytes.div_ceil(MEM_ALIGNMENT);
            let mut lines = Vec::new();
            lines
                .try_reserve_exact(count)
                .map_err(|_| FftError::OutOfMemory(bytes))?;
            lines.resize(count, CacheLine([0; MEM_ALIGNMENT]));
            debug!("allocated {bytes} bytes for a 2^{pow2}-point fft");
            Ok(Self { lines, pow2 })
        }

        pub fn pow2(&self) -> u32 {
            self.pow2
        }

        pub fn size(&self) -> usize {
            self.lines.len() * MEM_ALIGNMENT
        }

        /// Builds an object inside this block; tables are recomputed on every call.
        pub fn create<K: Kernel>(&mut self) -> Result<FftObject<'_, K>, FftError> {
            let len = self.size();
            // SAFETY: CacheLine is a plain byte array with no padding.
            let bytes = unsafe {
                core::slice::from_raw_parts_mut(self.lines.as_mut_ptr().cast::<u8>(), len)
            };
            FftObject::new(self.pow2, bytes)
        }
    }
}

#[cfg(feature = "std")]
pub use owned::FftMemory;

#[cfg(test)]
#[path = "object_tests.rs"]
mod tests;
