use super::*;

#[test]
fn fnv_is_incremental_and_matches_reference() {
    let mut a = Fnv1a64::new();
    a.write_bytes(b"drape");
    let mut b = Fnv1a64::new();
    b.write_bytes(b"dr");
    b.write_bytes(b"ape");
    assert_eq!(a.finish(), b.finish());

    let mut empty = Fnv1a64::new();
    empty.write_bytes(b"");
    assert_eq!(empty.finish(), 0xcbf2_9ce4_8422_2325);

    let mut one = Fnv1a64::new();
    one.write_bytes(b"a");
    assert_eq!(one.finish(), 0xaf63_dc4c_8601_ec8c);
}

#[test]
fn clamp01_handles_out_of_range_and_nan() {
    assert_eq!(clamp01(1.5), 1.0);
    assert_eq!(clamp01(-0.2), 0.0);
    assert_eq!(clamp01(f64::NAN), 0.0);
    assert_eq!(clamp01(0.42), 0.42);
}

#[test]
fn fixed2_rounds_and_drops_negative_zero() {
    assert_eq!(fixed2(20.0), "20.00");
    assert_eq!(fixed2(333.3333), "333.33");
    assert_eq!(fixed2(-0.001), "0.00");
    assert_eq!(fixed2(-12.5), "-12.50");
}
