use super::*;

#[test]
fn width_is_capped_then_reduced_by_margin() {
    let p = ViewportPolicy::default();
    assert_eq!(p.display_width(1920), 900);
    assert_eq!(p.display_width(932), 900);
    assert_eq!(p.display_width(500), 468);
    assert_eq!(p.display_width(10), 1);
}

#[test]
fn fit_preserves_aspect_within_a_pixel() {
    let p = ViewportPolicy::default();
    let native = NativeSize::new(3024, 4032).unwrap();
    for w in [200u32, 375, 414, 768, 932, 1280, 2560] {
        let g = p.fit(native, w).unwrap();
        assert_eq!(g.width, 900u32.min(w - 32));
        let expected_h = f64::from(g.width) * 4032.0 / 3024.0;
        assert!((f64::from(g.height) - expected_h).abs() <= 1.0, "w={w}");
    }
}

#[test]
fn square_base_at_full_width() {
    let g = ViewportPolicy::default()
        .fit(NativeSize::new(1000, 1000).unwrap(), 932)
        .unwrap();
    assert_eq!((g.width, g.height), (900, 900));
}

#[test]
fn very_wide_image_keeps_one_pixel_height() {
    let g = ViewportPolicy::default()
        .fit(NativeSize::new(100_000, 1).unwrap(), 1200)
        .unwrap();
    assert_eq!(g.height, 1);
}

#[test]
fn zero_max_width_is_rejected() {
    let p = ViewportPolicy {
        max_width: 0,
        margin: 0,
    };
    assert!(p.fit(NativeSize::new(10, 10).unwrap(), 100).is_err());
}
