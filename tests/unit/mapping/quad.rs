use super::*;

fn square() -> Quad {
    Quad::new([
        Point::new(20.0, 20.0),
        Point::new(220.0, 20.0),
        Point::new(220.0, 220.0),
        Point::new(20.0, 220.0),
    ])
}

#[test]
fn points_field_has_eight_fixed_two_decimal_numbers() {
    let s = square().to_points_field();
    assert_eq!(s, "20.00,20.00,220.00,20.00,220.00,220.00,20.00,220.00");
    assert_eq!(s.split(',').count(), 8);
    assert_eq!(square().to_string(), s);
}

#[test]
fn parse_tolerates_whitespace_and_empty_entries() {
    let q: Quad = " 20, 20 ,220,20,, 220,220,20,220 ".parse().unwrap();
    assert_eq!(q, square());
}

#[test]
fn parse_requires_exactly_eight_numbers() {
    let err = Quad::parse_points_field("1,2,3,4,5,6,7").unwrap_err();
    assert!(err.to_string().contains("8 numbers"), "{err}");
    assert!(Quad::parse_points_field("1,2,3,4,5,6,7,x").is_err());
}

#[test]
fn corner_lookup_matches_order() {
    let q = square();
    assert_eq!(q.corner(Corner::TopRight), Point::new(220.0, 20.0));
    assert_eq!(q.corner(Corner::BottomLeft), Point::new(20.0, 220.0));
    assert_eq!(
        q.scaled(Vec2::new(0.5, 2.0)).corner(Corner::BottomRight),
        Point::new(110.0, 440.0)
    );
}
