use super::*;
use crate::test_utils::signal;
use crate::utils::{mean_abs_error, normalize};

#[repr(C, align(64))]
struct Block([u8; 4096]);

#[test]
fn test_required_size() {
    assert_eq!(FftObject::<Scalar>::required_size(5), object_size(5));
    assert_eq!(object_size(5), 704);
}

#[test]
fn test_memory_too_small() {
    let mut memory = vec![0u8; object_size(6) - 1];
    let err = FftObject::<Scalar>::new(6, &mut memory).unwrap_err();
    assert_eq!(
        err,
        FftError::MemoryTooSmall { required: object_size(6), actual: object_size(6) - 1 }
    );
}

#[test]
fn test_unsupported_power() {
    let mut memory = vec![0u8; 1 << 20];
    assert_eq!(
        FftObject::<Scalar>::new(15, &mut memory).unwrap_err(),
        FftError::UnsupportedPower(15)
    );
}

#[test]
fn test_round_trip_at_every_misalignment() {
    let pow2 = 6;
    let n = 1usize << pow2;
    let mut block = Block([0; 4096]);
    let (x_re, x_im) = signal(n);

    for shift in 0..MEM_ALIGNMENT {
        let memory = &mut block.0[shift..shift + object_size(pow2)];
        let mut object = FftObject::<Scalar>::new(pow2, memory).unwrap();
        let (mut re, mut im) = (x_re.clone(), x_im.clone());
        object.forward(&mut re, &mut im).unwrap();
        object.inverse(&mut re, &mut im).unwrap();
        normalize(&mut re, &mut im);
        assert!(mean_abs_error(&re, &x_re) < 1e-6, "shift {shift}");
        assert!(mean_abs_error(&im, &x_im) < 1e-6, "shift {shift}");
    }
}

#[test]
fn test_regions_are_aligned() {
    let pow2 = 7;
    let mut block = Block([0; 4096]);
    let memory = &mut block.0[3..3 + object_size(pow2)];
    let object = FftObject::<Scalar>::new(pow2, memory).unwrap();
    let fft = object.fft();
    assert_eq!(fft.twiddle().as_ptr() as usize % MEM_ALIGNMENT, 0);
    assert_eq!(fft.dit_map().as_ptr() as usize % MEM_ALIGNMENT, 0);
    assert_eq!(fft.twiddle().len(), twiddle_len(pow2));

    let (_, scratch) = object.into_parts();
    assert_eq!(scratch.as_ptr() as usize % MEM_ALIGNMENT, 0);
    assert_eq!(scratch.len(), buffer_len(pow2));
}

#[test]
fn test_object_matches_context() {
    let pow2 = 9;
    let n = 1usize << pow2;
    let mut memory = vec![0u8; object_size(pow2)];
    let mut object = FftObject::<Scalar>::new(pow2, &mut memory).unwrap();

    let (mut twiddle, mut digits) = (vec![0.0; twiddle_len(pow2)], vec![0; digit_rev_len(pow2)]);
    let fft = Fft::<Scalar>::new(&mut twiddle, &mut digits, pow2).unwrap();

    let (x_re, x_im) = signal(n);
    let (mut a_re, mut a_im) = (x_re.clone(), x_im.clone());
    let (mut b_re, mut b_im) = (x_re, x_im);
    object.forward(&mut a_re, &mut a_im).unwrap();
    fft.forward(&mut b_re, &mut b_im, &mut vec![0.0; 2 * n]).unwrap();
    assert_eq!(a_re, b_re);
    assert_eq!(a_im, b_im);
}

#[cfg(feature = "std")]
#[test]
fn test_owned_memory() {
    let pow2 = 10;
    let n = 1usize << pow2;
    let mut memory = FftMemory::allocate(pow2).unwrap();
    assert_eq!(memory.pow2(), 10);
    assert!(memory.size() >= object_size(pow2));

    let mut object = memory.create::<Scalar>().unwrap();
    let (x_re, x_im) = signal(n);
    let (mut re, mut im) = (x_re.clone(), x_im.clone());
    object.forward(&mut re, &mut im).unwrap();
    object.inverse(&mut re, &mut im).unwrap();
    normalize(&mut re, &mut im);
    assert!(mean_abs_error(&re, &x_re) < 1e-6);

    assert_eq!(FftMemory::allocate(4).err(), Some(FftError::UnsupportedPower(4)));
}
