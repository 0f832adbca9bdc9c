use super::*;
use crate::{
    assets::library::AssetPairKey,
    foundation::error::DrapeError,
    placement::{PlacementMode, affine::FreeTransform, polygon::FourPoint},
};

fn geom(w: u32, h: u32) -> DisplayGeometry {
    DisplayGeometry::new(w, h).unwrap()
}

fn native(w: u32, h: u32) -> NativeSize {
    NativeSize::new(w, h).unwrap()
}

#[test]
fn four_point_square_doubles_into_native_space() {
    let mut poly = FourPoint::new();
    for (x, y) in [(10.0, 10.0), (110.0, 10.0), (110.0, 110.0), (10.0, 110.0)] {
        poly.pick(Point::new(x, y));
    }
    let mapper = CoordinateMapper::new(geom(200, 200), native(400, 400));
    assert_eq!(mapper.scale(), Vec2::new(2.0, 2.0));
    let quad = mapper.map(&Placement::FourPoint(poly)).unwrap();
    assert_eq!(
        quad.to_points_field(),
        "20.00,20.00,220.00,20.00,220.00,220.00,20.00,220.00"
    );
}

#[test]
fn default_free_transform_maps_back_to_native_units() {
    let mut m = FreeTransform::new();
    m.initialize(
        AssetPairKey { base: 1, design: 1 },
        native(500, 500),
        geom(900, 900),
    );
    let mapper = CoordinateMapper::new(geom(900, 900), native(1000, 1000));
    let quad = mapper.map(&Placement::FreeTransform(m)).unwrap();
    let tl = quad.corners[0];
    let tr = quad.corners[1];
    assert!((tl.x - 300.0).abs() < 1e-9 && (tl.y - 350.0).abs() < 1e-9, "{tl:?}");
    assert!((tr.x - tl.x - 400.0).abs() < 1e-9);
}

#[test]
fn rotation_free_round_trip_reproduces_display_corners() {
    let mut m = FreeTransform::new();
    m.initialize(
        AssetPairKey { base: 3, design: 4 },
        native(640, 480),
        geom(777, 583),
    );
    let display = m.node().unwrap().corners();
    let mapper = CoordinateMapper::new(geom(777, 583), native(4032, 3024));
    let quad = mapper.map(&Placement::FreeTransform(m)).unwrap();
    for (mapped, shown) in quad.corners.iter().zip(display) {
        let back = mapper.to_display(*mapped);
        assert!((back.x - shown.x).abs() < 1e-9 && (back.y - shown.y).abs() < 1e-9);
    }
}

#[test]
fn mapping_does_not_round() {
    let mapper = CoordinateMapper::new(geom(3, 3), native(10, 10));
    let p = mapper.to_native(Point::new(1.0, 2.0));
    assert_eq!(p, Point::new(10.0 / 3.0, 20.0 / 3.0));
}

#[test]
fn refuses_incomplete_or_uninitialized_placements() {
    let mapper = CoordinateMapper::new(geom(10, 10), native(10, 10));

    let err = mapper
        .map(&Placement::new(PlacementMode::FreeTransform))
        .unwrap_err();
    assert!(matches!(
        err,
        DrapeError::Precondition(Precondition::PlacementUninitialized)
    ));

    let mut poly = FourPoint::new();
    for i in 0..3 {
        poly.pick(Point::new(f64::from(i), 0.0));
    }
    let err = mapper.map(&Placement::FourPoint(poly)).unwrap_err();
    assert!(matches!(
        err,
        DrapeError::Precondition(Precondition::IncompletePolygon { picked: 3 })
    ));
}

#[test]
fn try_new_reports_missing_assets_in_order() {
    let err = CoordinateMapper::try_new(None, None, None).unwrap_err();
    assert!(matches!(err, DrapeError::Precondition(Precondition::MissingBase)));

    let err =
        CoordinateMapper::try_new(Some(native(10, 10)), None, Some(geom(5, 5))).unwrap_err();
    assert!(matches!(
        err,
        DrapeError::Precondition(Precondition::MissingDesign)
    ));

    let ok = CoordinateMapper::try_new(Some(native(10, 10)), Some(native(1, 1)), Some(geom(5, 5)))
        .unwrap();
    assert_eq!(ok.scale(), Vec2::new(2.0, 2.0));
}
