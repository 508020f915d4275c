// src/common.rs

use core::fmt;

/// Smallest supported exponent (N = 32).
pub const MIN_POW2: u32 = 5;
/// Largest supported exponent (N = 16384). Digit-reversal indices must fit in `u16`.
pub const MAX_POW2: u32 = 14;
pub const MIN_FFT_LEN: usize = 1 << MIN_POW2;
pub const MAX_FFT_LEN: usize = 1 << MAX_POW2;

/// Alignment, in bytes, of every region carved out of a caller memory block.
pub const MEM_ALIGNMENT: usize = 64;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FftError {
    SizeMismatch,
    NotPowerOfTwo,
    UnsupportedPower(u32),
    BufferTooSmall,
    InvalidTable,
    MemoryTooSmall { required: usize, actual: usize },
    BackendUnavailable(&'static str),
    OutOfMemory(usize),
}

impl fmt::Display for FftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FftError::SizeMismatch => write!(f, "Data buffer size does not match FFT size"),
            FftError::NotPowerOfTwo => write!(f, "Size must be a power of 2"),
            FftError::UnsupportedPower(p) => write!(
                f,
                "Power of two {p} is outside the supported range [{MIN_POW2}, {MAX_POW2}]"
            ),
            FftError::BufferTooSmall => write!(f, "Auxiliary buffers are too small"),
            FftError::InvalidTable => {
                write!(f, "Digit-reversal table holds an index outside the transform")
            }
            FftError::MemoryTooSmall { required, actual } => write!(
                f,
                "Memory block of {actual} bytes is smaller than the required {required} bytes"
            ),
            FftError::BackendUnavailable(name) => {
                write!(f, "Backend '{name}' is not supported by this CPU")
            }
            FftError::OutOfMemory(bytes) => write!(f, "Failed to allocate {bytes} bytes"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FftError {}

/// Order in which the context sequences permutation and butterfly stages.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Decimation {
    /// Permute with the DIT map, then merge from the finest stage up.
    Time,
    /// Merge from the coarsest stage down, then permute with the DIF map.
    Frequency,
}

/// Ordering selected at build time through the `dif` feature.
pub const DECIMATION: Decimation = if cfg!(feature = "dif") {
    Decimation::Frequency
} else {
    Decimation::Time
};

pub trait FftProcess {
    fn process(
        &self,
        re: &mut [f32],
        im: &mut [f32],
        scratch: &mut [f32],
        inverse: bool,
    ) -> Result<(), FftError>;
}

/// Checks that `pow2` lies in `[MIN_POW2, MAX_POW2]`.
pub fn check_pow2(pow2: u32) -> Result<(), FftError> {
    if (MIN_POW2..=MAX_POW2).contains(&pow2) {
        Ok(())
    } else {
        Err(FftError::UnsupportedPower(pow2))
    }
}

pub const fn fft_len(pow2: u32) -> usize {
    1 << pow2
}

/// Scratch floats needed by one transform call.
pub const fn buffer_len(pow2: u32) -> usize {
    2 << pow2
}

/// Entries of the digit-reversal table: DIT map followed by DIF map.
pub const fn digit_rev_len(pow2: u32) -> usize {
    2 << pow2
}

pub const fn twiddle_len(pow2: u32) -> usize {
    let n = fft_len(pow2);
    if pow2 % 2 == 0 {
        (n - 1) * 2 - 6
    } else {
        (n - 1) * 2 - 8
    }
}

/// Floats consumed by the radix-4 stage of span `step`.
pub const fn twiddle_stage_size(step: usize) -> usize {
    if step == 8 { 6 } else { 6 * (step / 4) }
}

pub const fn aligned_size(bytes: usize) -> usize {
    (bytes + MEM_ALIGNMENT - 1) & !(MEM_ALIGNMENT - 1)
}

/// Bytes a caller block must provide for `FftObject::new`, alignment slack included.
pub const fn object_size(pow2: u32) -> usize {
    aligned_size(buffer_len(pow2) * size_of::<f32>())
        + aligned_size(digit_rev_len(pow2) * size_of::<u16>())
        + aligned_size(twiddle_len(pow2) * size_of::<f32>())
        + MEM_ALIGNMENT
}

#[cfg(test)]
#[path = "common_tests.rs"]
mod tests;
