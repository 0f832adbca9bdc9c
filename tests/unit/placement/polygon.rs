use super::*;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

#[test]
fn fifth_pick_restarts_with_only_that_point() {
    let mut poly = FourPoint::new();
    assert!(poly.is_empty());
    for (i, p) in [pt(10.0, 10.0), pt(110.0, 10.0), pt(110.0, 110.0), pt(10.0, 110.0)]
        .into_iter()
        .enumerate()
    {
        assert_eq!(poly.pick(p), i + 1);
    }
    assert!(poly.is_complete());

    assert_eq!(poly.pick(pt(42.0, 43.0)), 1);
    assert_eq!(poly.points(), &[pt(42.0, 43.0)]);
    assert!(!poly.is_complete());
}

#[test]
fn order_is_preserved() {
    let mut poly = FourPoint::new();
    let picks = [pt(3.0, 0.0), pt(1.0, 0.0), pt(2.0, 0.0), pt(0.0, 0.0)];
    for p in picks {
        poly.pick(p);
    }
    assert_eq!(poly.corners(), Some(picks));
}

#[test]
fn pick_relative_subtracts_canvas_origin() {
    let mut poly = FourPoint::new();
    poly.pick_relative(pt(130.0, 75.0), pt(30.0, 25.0));
    assert_eq!(poly.points(), &[pt(100.0, 50.0)]);
}

#[test]
fn outline_only_when_complete_and_closed() {
    let mut poly = FourPoint::new();
    poly.pick(pt(0.0, 0.0));
    poly.pick(pt(1.0, 0.0));
    poly.pick(pt(1.0, 1.0));
    assert!(poly.outline().is_none());
    assert!(poly.corners().is_none());

    poly.pick(pt(0.0, 1.0));
    let path = poly.outline().unwrap();
    let els = path.elements();
    assert_eq!(els.len(), 5);
    assert_eq!(els[0], kurbo::PathEl::MoveTo(pt(0.0, 0.0)));
    assert_eq!(els[4], kurbo::PathEl::ClosePath);
}

#[test]
fn labels_are_one_based_and_reset_clears() {
    let mut poly = FourPoint::new();
    poly.pick(pt(5.0, 6.0));
    poly.pick(pt(7.0, 8.0));
    let labels: Vec<_> = poly.labels().collect();
    assert_eq!(labels, vec![(1, pt(5.0, 6.0)), (2, pt(7.0, 8.0))]);

    poly.reset();
    assert_eq!(poly.len(), 0);
    assert_eq!(poly.labels().count(), 0);
}
