use super::*;
use crate::test_utils::{assert_close_f64, naive_dft, signal, tables};

#[test]
fn test_radix4_depth1_impulse() {
    let mut re = [1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0];
    let mut im = [0.0; 8];
    unsafe { Scalar.radix4_depth1::<false>(&mut re, &mut im) };
    // DFT4 of a unit impulse is flat.
    assert_eq!(&re[..4], &[1.0, 1.0, 1.0, 1.0]);
    // A delayed impulse rotates by -j per bin going forward.
    assert_eq!(&re[4..], &[1.0, 0.0, -1.0, 0.0]);
    assert_eq!(&im[4..], &[0.0, -1.0, 0.0, 1.0]);
}

#[test]
fn test_radix4_depth1_inverse_sign() {
    let mut re = [0.0, 1.0, 0.0, 0.0];
    let mut im = [0.0; 4];
    unsafe { Scalar.radix4_depth1::<true>(&mut re, &mut im) };
    assert_eq!(re, [1.0, 0.0, -1.0, 0.0]);
    assert_eq!(im, [0.0, 1.0, 0.0, -1.0]);
}

#[test]
fn test_radix2_depth1() {
    let mut re = [3.0, 1.0, -2.0, 5.0];
    let mut im = [1.0, 1.0, 0.5, -0.5];
    unsafe { Scalar.radix2_depth1(&mut re, &mut im) };
    assert_eq!(re, [4.0, 2.0, 3.0, -7.0]);
    assert_eq!(im, [2.0, 0.0, 0.0, 1.0]);
}

#[test]
fn test_gather() {
    let mut re = [10.0, 11.0, 12.0, 13.0];
    let mut im = [20.0, 21.0, 22.0, 23.0];
    let mut scratch = [0.0; 8];
    gather_split(&mut re, &mut im, &mut scratch, &[3, 0, 2, 1]);
    assert_eq!(re, [13.0, 10.0, 12.0, 11.0]);
    assert_eq!(im, [23.0, 20.0, 22.0, 21.0]);
}

fn check_against_dft(pow2: u32, inverse: bool) {
    let n = 1usize << pow2;
    let (twiddle, digits) = tables(pow2);
    let (dit_map, dif_map) = digits.split_at(n);
    let (x_re, x_im) = signal(n);
    let (want_re, want_im) = naive_dft(&x_re, &x_im, inverse);
    let tolerance = 1e-5 * n as f64;
    let mut scratch = vec![0.0; 2 * n];

    // Permute, then decimation in time.
    let (mut re, mut im) = (x_re.clone(), x_im.clone());
    Scalar.shuffle(&mut re, &mut im, &mut scratch, dit_map);
    if inverse {
        Scalar.dit::<true>(&mut re, &mut im, &twiddle, pow2);
    } else {
        Scalar.dit::<false>(&mut re, &mut im, &twiddle, pow2);
    }
    assert_close_f64(&re, &want_re, tolerance);
    assert_close_f64(&im, &want_im, tolerance);

    // Decimation in frequency, then permute.
    let (mut re, mut im) = (x_re, x_im);
    if inverse {
        Scalar.dif::<true>(&mut re, &mut im, &twiddle, pow2);
    } else {
        Scalar.dif::<false>(&mut re, &mut im, &twiddle, pow2);
    }
    Scalar.shuffle(&mut re, &mut im, &mut scratch, dif_map);
    assert_close_f64(&re, &want_re, tolerance);
    assert_close_f64(&im, &want_im, tolerance);
}

#[test]
fn test_forward_matches_dft_odd_and_even() {
    for pow2 in 5..=8 {
        check_against_dft(pow2, false);
    }
}

#[test]
fn test_inverse_matches_dft_odd_and_even() {
    for pow2 in 5..=8 {
        check_against_dft(pow2, true);
    }
}

#[test]
fn test_dif_forward_then_dit_inverse_without_permutation() {
    for pow2 in [5, 6, 9, 10] {
        let n = 1usize << pow2;
        let (twiddle, _) = tables(pow2);
        let (x_re, x_im) = signal(n);
        let (mut re, mut im) = (x_re.clone(), x_im.clone());
        Scalar.dif::<false>(&mut re, &mut im, &twiddle, pow2);
        Scalar.dit::<true>(&mut re, &mut im, &twiddle, pow2);
        let scale = n as f32;
        for i in 0..n {
            assert!((re[i] / scale - x_re[i]).abs() < 1e-5, "pow2 {pow2} re[{i}]");
            assert!((im[i] / scale - x_im[i]).abs() < 1e-5, "pow2 {pow2} im[{i}]");
        }
    }
}

#[test]
#[should_panic(expected = "twiddle table length")]
fn test_dit_rejects_short_twiddle() {
    let (twiddle, _) = tables(5);
    let mut re = vec![0.0; 32];
    let mut im = vec![0.0; 32];
    Scalar.dit::<false>(&mut re, &mut im, &twiddle[1..], 5);
}

#[test]
#[should_panic(expected = "permutation index out of range")]
fn test_shuffle_rejects_bad_map() {
    let mut re = vec![0.0; 32];
    let mut im = vec![0.0; 32];
    let mut scratch = vec![0.0; 64];
    let mut map: Vec<u16> = (0..32).collect();
    map[7] = 32;
    Scalar.shuffle(&mut re, &mut im, &mut scratch, &map);
}
