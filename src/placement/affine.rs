//! Free-transform placement: one draggable, uniformly scalable, rotatable node.
//!
//! The node is drawn with its local origin at `position`; its local rectangle is
//! `(0, 0)..(base_width, base_height)` and the full transform is
//! `T(position) * R(rotation) * S(scale)`. Rotation and scale therefore act about the node's
//! own origin (the logical top-left corner), which stays "top-left" however far it is rotated.

use crate::{
    assets::library::AssetPairKey,
    foundation::core::{Affine, DisplayGeometry, NativeSize, Point, Size, Vec2},
};

/// Smallest on-screen width or height a resize may produce.
pub const MIN_BOX_SIZE: f64 = 20.0;
/// Initial on-screen width as a fraction of the display width.
pub const INITIAL_WIDTH_FRACTION: f64 = 0.40;
/// Initial node position as fractions of the display size.
pub const INITIAL_ORIGIN_FRACTION: Vec2 = Vec2::new(0.30, 0.35);
/// Side of a gizmo handle in display pixels.
pub const ANCHOR_SIZE: f64 = 12.0;
/// Distance from the top edge to the rotate handle.
pub const ROTATE_HANDLE_OFFSET: f64 = 50.0;

/// Node transform in display space.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AffinePlacement {
    /// Display-space position of the local origin.
    pub position: Point,
    /// Per-axis scale; both components stay `> 0`.
    pub scale: Vec2,
    /// Clockwise rotation in degrees (y axis points down).
    pub rotation_deg: f64,
    /// Untransformed design width in pixels.
    pub base_width: f64,
    /// Untransformed design height in pixels.
    pub base_height: f64,
}

impl AffinePlacement {
    /// Default placement for a freshly loaded pair: 40% of the display width, uniform scale,
    /// origin at `(0.30 * w, 0.35 * h)`, no rotation.
    pub fn initial(design: NativeSize, display: DisplayGeometry) -> Self {
        let target_width = f64::from(display.width) * INITIAL_WIDTH_FRACTION;
        let s = target_width / f64::from(design.width);
        Self {
            position: Point::new(
                f64::from(display.width) * INITIAL_ORIGIN_FRACTION.x,
                f64::from(display.height) * INITIAL_ORIGIN_FRACTION.y,
            ),
            scale: Vec2::new(s, s),
            rotation_deg: 0.0,
            base_width: f64::from(design.width),
            base_height: f64::from(design.height),
        }
    }

    /// Full local-to-display transform.
    pub fn to_affine(&self) -> Affine {
        Affine::translate(self.position.to_vec2())
            * Affine::rotate(self.rotation_deg.to_radians())
            * Affine::scale_non_uniform(self.scale.x, self.scale.y)
    }

    /// Effective on-screen size.
    pub fn on_screen_size(&self) -> Size {
        Size::new(
            self.base_width * self.scale.x,
            self.base_height * self.scale.y,
        )
    }

    /// Display-space corners in TL, TR, BR, BL order of the local rectangle.
    pub fn corners(&self) -> [Point; 4] {
        let a = self.to_affine();
        let local = Size::new(self.base_width, self.base_height);
        Corner::ALL.map(|c| a * c.local(local))
    }

    /// Display-space centre of the node.
    pub fn center(&self) -> Point {
        self.to_affine() * Point::new(self.base_width * 0.5, self.base_height * 0.5)
    }

    /// Whether display point `p` falls on the node.
    pub fn contains(&self, p: Point) -> bool {
        let local = self.to_affine().inverse() * p;
        (0.0..=self.base_width).contains(&local.x) && (0.0..=self.base_height).contains(&local.y)
    }

    /// Current on-screen box.
    pub fn bound_box(&self) -> BoundBox {
        let size = self.on_screen_size();
        BoundBox {
            x: self.position.x,
            y: self.position.y,
            width: size.width,
            height: size.height,
            rotation_deg: self.rotation_deg,
        }
    }

    /// Placement whose on-screen box is `b`, keeping the design's base size.
    pub fn with_bound_box(&self, b: BoundBox) -> Self {
        Self {
            position: Point::new(b.x, b.y),
            scale: Vec2::new(b.width / self.base_width, b.height / self.base_height),
            rotation_deg: b.rotation_deg,
            ..*self
        }
    }
}

/// On-screen box of the node: origin, size and rotation.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BoundBox {
    /// Origin x (the logical top-left corner).
    pub x: f64,
    /// Origin y.
    pub y: f64,
    /// On-screen width.
    pub width: f64,
    /// On-screen height.
    pub height: f64,
    /// Rotation in degrees.
    pub rotation_deg: f64,
}

/// Keep `candidate` unless it would shrink either side below [`MIN_BOX_SIZE`].
pub fn constrain_bound_box(previous: BoundBox, candidate: BoundBox) -> BoundBox {
    if !(candidate.width >= MIN_BOX_SIZE && candidate.height >= MIN_BOX_SIZE) {
        return previous;
    }
    candidate
}

/// Logical corner of the design rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Corner {
    /// Local `(0, 0)`.
    TopLeft,
    /// Local `(w, 0)`.
    TopRight,
    /// Local `(w, h)`.
    BottomRight,
    /// Local `(0, h)`.
    BottomLeft,
}

impl Corner {
    /// Corners in quad order.
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomRight,
        Corner::BottomLeft,
    ];

    /// Position of this corner on a rectangle of `size` anchored at the origin.
    pub fn local(self, size: Size) -> Point {
        match self {
            Self::TopLeft => Point::ZERO,
            Self::TopRight => Point::new(size.width, 0.0),
            Self::BottomRight => Point::new(size.width, size.height),
            Self::BottomLeft => Point::new(0.0, size.height),
        }
    }

    /// Diagonally opposite corner; stays fixed while this one is dragged.
    pub fn opposite(self) -> Self {
        match self {
            Self::TopLeft => Self::BottomRight,
            Self::TopRight => Self::BottomLeft,
            Self::BottomRight => Self::TopLeft,
            Self::BottomLeft => Self::TopRight,
        }
    }
}

/// Grabbable part of the gizmo.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GizmoHandle {
    /// Uniform-ratio corner scale handle.
    Corner(Corner),
    /// Rotate handle above the top edge.
    Rotate,
}

/// Manipulation overlay attached to the selected node.
#[derive(Clone, Debug, PartialEq)]
pub struct Gizmo {
    handles: [(GizmoHandle, Point); 5],
}

impl Gizmo {
    /// Lay out handles for `node`.
    pub fn attach(node: &AffinePlacement) -> Self {
        let [tl, tr, br, bl] = node.corners();
        let rot = Affine::rotate(node.rotation_deg.to_radians());
        let top_center = tl.midpoint(tr);
        let rotate = top_center + (rot * Point::new(0.0, -ROTATE_HANDLE_OFFSET)).to_vec2();
        Self {
            handles: [
                (GizmoHandle::Corner(Corner::TopLeft), tl),
                (GizmoHandle::Corner(Corner::TopRight), tr),
                (GizmoHandle::Corner(Corner::BottomRight), br),
                (GizmoHandle::Corner(Corner::BottomLeft), bl),
                (GizmoHandle::Rotate, rotate),
            ],
        }
    }

    /// Display position of `handle`.
    pub fn position(&self, handle: GizmoHandle) -> Point {
        self.handles
            .iter()
            .find(|(h, _)| *h == handle)
            .map(|(_, p)| *p)
            .unwrap_or(Point::ZERO)
    }

    /// Handle under `p`, if any. The rotate handle wins ties.
    pub fn handle_at(&self, p: Point) -> Option<GizmoHandle> {
        let reach = ANCHOR_SIZE * 0.5;
        self.handles
            .iter()
            .rev()
            .find(|(_, c)| (p.x - c.x).abs() <= reach && (p.y - c.y).abs() <= reach)
            .map(|(h, _)| *h)
    }
}

/// Lifecycle of the free-transform node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FreeTransformState {
    /// No (base, design) pair has been available yet.
    Uninitialized,
    /// Node placed, gizmo attached.
    Selected,
    /// Node placed, gizmo detached.
    Unselected,
}

/// What a pointer-down at some display point landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FreeTransformHit {
    /// A gizmo handle (only possible while selected).
    Handle(GizmoHandle),
    /// The node body.
    Node,
    /// Empty canvas.
    Empty,
}

/// Free-transform placement model.
#[derive(Clone, Debug, Default)]
pub struct FreeTransform {
    node: Option<AffinePlacement>,
    selected: bool,
    initialized_for: Option<AssetPairKey>,
    gizmo: Option<Gizmo>,
}

impl FreeTransform {
    /// Uninitialized model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> FreeTransformState {
        match (self.node.is_some(), self.selected) {
            (false, _) => FreeTransformState::Uninitialized,
            (true, true) => FreeTransformState::Selected,
            (true, false) => FreeTransformState::Unselected,
        }
    }

    /// Node transform once initialized.
    pub fn node(&self) -> Option<&AffinePlacement> {
        self.node.as_ref()
    }

    /// Whether the gizmo is attached.
    pub fn is_selected(&self) -> bool {
        self.selected && self.node.is_some()
    }

    /// Attached gizmo.
    pub fn gizmo(&self) -> Option<&Gizmo> {
        self.gizmo.as_ref()
    }

    /// Pair the node was initialized for.
    pub fn initialized_for(&self) -> Option<AssetPairKey> {
        self.initialized_for
    }

    /// One-shot default placement for `pair`. Returns `false` (and changes nothing) when this
    /// pair was already initialized.
    pub fn initialize(
        &mut self,
        pair: AssetPairKey,
        design: NativeSize,
        display: DisplayGeometry,
    ) -> bool {
        if self.initialized_for == Some(pair) {
            return false;
        }
        let node = AffinePlacement::initial(design, display);
        tracing::debug!(
            ?pair,
            x = node.position.x,
            y = node.position.y,
            scale = node.scale.x,
            "placement initialized"
        );
        self.node = Some(node);
        self.initialized_for = Some(pair);
        self.selected = true;
        self.refresh_gizmo();
        true
    }

    /// Forget the node; the next ready pair re-initializes.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Attach the gizmo. No-op before initialization.
    pub fn select(&mut self) -> bool {
        if self.node.is_none() {
            return false;
        }
        self.selected = true;
        self.refresh_gizmo();
        true
    }

    /// Detach the gizmo.
    pub fn deselect(&mut self) {
        self.selected = false;
        self.gizmo = None;
    }

    /// Re-attach the gizmo to the node, e.g. after the display geometry changed.
    /// Never re-runs the default placement.
    pub fn reattach_gizmo(&mut self) {
        self.refresh_gizmo();
    }

    /// Classify a pointer-down at `p`.
    pub fn hit(&self, p: Point) -> FreeTransformHit {
        if let Some(handle) = self.gizmo.as_ref().and_then(|g| g.handle_at(p)) {
            return FreeTransformHit::Handle(handle);
        }
        match self.node {
            Some(node) if node.contains(p) => FreeTransformHit::Node,
            _ => FreeTransformHit::Empty,
        }
    }

    /// Drag the node by `delta`. Unconstrained.
    pub fn translate(&mut self, delta: Vec2) -> bool {
        let Some(node) = self.node.as_mut() else {
            return false;
        };
        node.position += delta;
        self.refresh_gizmo();
        true
    }

    /// Propose a new on-screen box; applied only if it passes [`constrain_bound_box`].
    pub fn propose_box(&mut self, candidate: BoundBox) -> bool {
        let Some(node) = self.node else {
            return false;
        };
        let previous = node.bound_box();
        let accepted = constrain_bound_box(previous, candidate);
        if accepted != candidate {
            tracing::trace!(width = candidate.width, height = candidate.height, "resize rejected");
            return false;
        }
        self.node = Some(node.with_bound_box(accepted));
        self.refresh_gizmo();
        true
    }

    /// Drag corner handle `corner` to `pointer`, keeping the aspect ratio and the opposite
    /// corner fixed. Returns whether the resize was applied.
    pub fn resize_corner(&mut self, corner: Corner, pointer: Point) -> bool {
        let Some(node) = self.node else {
            return false;
        };
        let size = node.on_screen_size();
        let rot = Affine::rotate(node.rotation_deg.to_radians());
        let unrot = Affine::rotate(-node.rotation_deg.to_radians());

        let anchor_local = corner.opposite().local(size);
        let diagonal = corner.local(size) - anchor_local;
        let anchor = node.position + (rot * anchor_local).to_vec2();

        let reach = (unrot * (pointer - anchor).to_point()).to_vec2();
        let k = reach.dot(diagonal) / diagonal.hypot2();
        if !(k.is_finite() && k > 0.0) {
            return false;
        }

        let origin = anchor + (rot * (-anchor_local.to_vec2() * k).to_point()).to_vec2();
        self.propose_box(BoundBox {
            x: origin.x,
            y: origin.y,
            width: size.width * k,
            height: size.height * k,
            rotation_deg: node.rotation_deg,
        })
    }

    /// Rotate about the node centre to `rotation_deg`. Unconstrained.
    pub fn rotate_to(&mut self, rotation_deg: f64) -> bool {
        let Some(node) = self.node.as_mut() else {
            return false;
        };
        let center = node.center();
        let size = node.on_screen_size();
        let half = Point::new(size.width * 0.5, size.height * 0.5);
        let rotation_deg = normalize_degrees(rotation_deg);
        let offset = (Affine::rotate(rotation_deg.to_radians()) * half).to_vec2();
        node.position = center - offset;
        node.rotation_deg = rotation_deg;
        self.refresh_gizmo();
        true
    }

    /// Follow the rotate handle: the handle points from the centre towards `pointer`.
    pub fn rotate_toward(&mut self, pointer: Point) -> bool {
        let Some(node) = self.node else {
            return false;
        };
        let d = pointer - node.center();
        if d.hypot2() == 0.0 {
            return false;
        }
        self.rotate_to(d.y.atan2(d.x).to_degrees() + 90.0)
    }

    fn refresh_gizmo(&mut self) {
        self.gizmo = match (self.selected, self.node.as_ref()) {
            (true, Some(node)) => Some(Gizmo::attach(node)),
            _ => None,
        };
    }
}

fn normalize_degrees(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    if r > 180.0 { r - 360.0 } else { r }
}

#[cfg(test)]
#[path = "../../tests/unit/placement/affine.rs"]
mod tests;
