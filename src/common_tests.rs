use super::*;

#[test]
fn test_twiddle_len_matches_stage_sum() {
    for pow2 in MIN_POW2..=MAX_POW2 {
        let n = fft_len(pow2);
        let mut step = n;
        let mut total = 0;
        while step > 16 {
            total += twiddle_stage_size(step);
            step >>= 2;
        }
        total += twiddle_stage_size(step);
        assert_eq!(total, twiddle_len(pow2), "pow2 = {pow2}");
    }
}

#[test]
fn test_known_sizes() {
    assert_eq!(twiddle_len(5), 54);
    assert_eq!(twiddle_len(6), 120);
    assert_eq!(twiddle_stage_size(8), 6);
    assert_eq!(twiddle_stage_size(16), 24);
    assert_eq!(twiddle_stage_size(64), 96);
    assert_eq!(buffer_len(5), 64);
    assert_eq!(digit_rev_len(10), 2048);
}

#[test]
fn test_aligned_size() {
    assert_eq!(aligned_size(0), 0);
    assert_eq!(aligned_size(1), 64);
    assert_eq!(aligned_size(64), 64);
    assert_eq!(aligned_size(65), 128);
}

#[test]
fn test_object_size_n32() {
    // scratch 256 B, digits 128 B, twiddles 216 B -> 256 B, plus alignment slack
    assert_eq!(object_size(5), 256 + 128 + 256 + 64);
}

#[test]
fn test_check_pow2() {
    assert_eq!(check_pow2(4), Err(FftError::UnsupportedPower(4)));
    assert_eq!(check_pow2(15), Err(FftError::UnsupportedPower(15)));
    assert!(check_pow2(5).is_ok());
    assert!(check_pow2(14).is_ok());
}

#[test]
fn test_error_display() {
    let msg = FftError::MemoryTooSmall { required: 640, actual: 10 }.to_string();
    assert!(msg.contains("640") && msg.contains("10"));
    assert!(FftError::BackendUnavailable("avx2").to_string().contains("avx2"));
}
