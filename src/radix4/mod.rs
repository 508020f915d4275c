pub mod complex;
pub(crate) mod core;
pub mod object;

pub use crate::common::{FftError, FftProcess};
pub use self::core::{build_digit_reversal, build_twiddle};
pub use complex::Fft;
#[cfg(feature = "std")]
pub use object::FftMemory;
pub use object::FftObject;
