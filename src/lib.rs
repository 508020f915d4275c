//! Radix-4 complex FFT for power-of-two lengths from 32 to 16384.
//!
//! Signals are split into separate real and imaginary `f32` arrays and
//! transformed in place. Tables are built once per length; the butterfly
//! backend is chosen by type (`Scalar`, `Sse`, `Avx2`, `Neon`).
//!
//! ```
//! use rs_radix4_fft::{normalize, Fft, Scalar};
//!
//! let pow2 = 6;
//! let mut twiddle = vec![0.0; rs_radix4_fft::twiddle_len(pow2)];
//! let mut digits = vec![0; rs_radix4_fft::digit_rev_len(pow2)];
//! let fft = Fft::<Scalar>::new(&mut twiddle, &mut digits, pow2).unwrap();
//!
//! let mut re: Vec<f32> = (0..64).map(|i| (i as f32 * 0.3).sin()).collect();
//! let mut im = vec![0.0; 64];
//! let original = re.clone();
//! let mut scratch = vec![0.0; rs_radix4_fft::buffer_len(pow2)];
//!
//! fft.forward(&mut re, &mut im, &mut scratch).unwrap();
//! fft.inverse(&mut re, &mut im, &mut scratch).unwrap();
//! normalize(&mut re, &mut im);
//! assert!(re.iter().zip(&original).all(|(a, b)| (a - b).abs() < 1e-5));
//! ```
#![cfg_attr(not(any(feature = "std", test)), no_std)]

pub mod backend;
pub mod common;
pub mod radix4;
pub mod utils;

#[cfg(test)]
mod test_utils;

pub use backend::{Kernel, Scalar};
#[cfg(target_arch = "x86_64")]
pub use backend::{Avx2, Sse};
#[cfg(target_arch = "aarch64")]
pub use backend::Neon;
pub use common::{
    aligned_size, buffer_len, digit_rev_len, fft_len, object_size, twiddle_len, twiddle_stage_size,
    Decimation, FftError, FftProcess, DECIMATION, MAX_FFT_LEN, MAX_POW2, MEM_ALIGNMENT, MIN_FFT_LEN,
    MIN_POW2,
};
#[cfg(feature = "std")]
pub use radix4::FftMemory;
pub use radix4::{build_digit_reversal, build_twiddle, Fft, FftObject};
pub use utils::normalize;
