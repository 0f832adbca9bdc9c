use super::*;

fn field<'a>(fields: &'a [(&'static str, String)], name: &str) -> Option<&'a str> {
    fields
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, v)| v.as_str())
}

#[test]
fn defaults_follow_service_defaults() {
    let o = RenderOptions::default();
    assert_eq!(o.opacity, DEFAULT_OPACITY);
    assert!(o.shading);
    assert_eq!(o.bg_mode, BackgroundMode::None);
    assert_eq!(o.shading_strength, None);
}

#[test]
fn out_of_range_values_are_clamped_on_the_wire() {
    let o = RenderOptions {
        opacity: 1.5,
        bg_threshold: -5,
        shading_strength: Some(7.0),
        ..RenderOptions::default()
    };
    let fields = o.form_fields();
    assert_eq!(field(&fields, "opacity"), Some("1.00"));
    assert_eq!(field(&fields, "bg_thr"), Some("0"));
    assert_eq!(field(&fields, "shading_strength"), Some("1.00"));

    let c = RenderOptions {
        opacity: -0.3,
        bg_threshold: 250,
        ..RenderOptions::default()
    }
    .clamped();
    assert_eq!(c.opacity, 0.0);
    assert_eq!(c.bg_threshold, 100);
}

#[test]
fn field_order_and_optional_strength() {
    let o = RenderOptions {
        shading: false,
        bg_mode: BackgroundMode::White,
        ..RenderOptions::default()
    };
    let names: Vec<_> = o.form_fields().into_iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["opacity", "shading", "bg_mode", "bg_thr"]);
    let fields = o.form_fields();
    assert_eq!(field(&fields, "shading"), Some("0"));
    assert_eq!(field(&fields, "bg_mode"), Some("white"));
}

#[test]
fn background_mode_parses_case_insensitively() {
    assert_eq!("AUTO".parse::<BackgroundMode>().unwrap(), BackgroundMode::Auto);
    assert_eq!(" black ".parse::<BackgroundMode>().unwrap(), BackgroundMode::Black);
    assert!("green".parse::<BackgroundMode>().is_err());
}

#[test]
fn options_deserialize_with_defaults() {
    let o: RenderOptions = serde_json::from_str(r#"{"opacity": 0.5, "bg_mode": "auto"}"#).unwrap();
    assert_eq!(o.opacity, 0.5);
    assert_eq!(o.bg_mode, BackgroundMode::Auto);
    assert!(o.shading);
    assert_eq!(o.bg_threshold, DEFAULT_BG_THRESHOLD);
}
