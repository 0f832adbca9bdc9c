//! drape places a flat design onto a garment photograph and asks a compositing service to
//! render the mockup.
//!
//! A [`Stage`] holds the two assets, fits the base into the viewport, and tracks one of two
//! placements:
//!
//! - [`FreeTransform`]: a single node dragged, uniformly scaled and rotated with a gizmo
//! - [`FourPoint`]: four corners picked in TL, TR, BR, BL order
//!
//! Either placement maps to a native-pixel [`Quad`] through a [`CoordinateMapper`]. Submitting
//! sends the original files, the quad and the [`RenderOptions`] to a [`MockupService`] and
//! resolves the returned path into a [`RenderedMockup`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Asset slots and decoding.
pub mod assets;
/// Stage configuration.
pub mod config;
/// Coordinate mapping.
pub mod mapping;
/// Placement models.
pub mod placement;
/// Request assembly and the service client.
pub mod request;
/// Interactive session.
pub mod stage;
/// Viewport sizing.
pub mod viewport;

pub use crate::foundation::core::{
    Affine, BezPath, DisplayGeometry, NativeSize, Point, Size, Vec2,
};
pub use crate::foundation::error::{DrapeError, DrapeResult, Precondition};

pub use crate::assets::decode::{decode_native_size, sniff_mime};
pub use crate::assets::display_url::{DisplayUrl, UrlRegistry};
pub use crate::assets::library::{
    AssetFile, AssetLibrary, AssetPairKey, AssetSlot, DecodeTicket, SlotKind,
};
pub use crate::config::StageConfig;
pub use crate::mapping::mapper::CoordinateMapper;
pub use crate::mapping::quad::Quad;
pub use crate::placement::affine::{
    AffinePlacement, BoundBox, Corner, FreeTransform, FreeTransformHit, FreeTransformState,
    Gizmo, GizmoHandle,
};
pub use crate::placement::polygon::FourPoint;
pub use crate::placement::{Placement, PlacementMode};
pub use crate::request::client::{HttpMockupService, MockupService};
pub use crate::request::form::{FormField, MockupRequest};
pub use crate::request::options::{BackgroundMode, RenderOptions};
pub use crate::request::response::{MockupResponse, RenderedMockup, interpret_response};
pub use crate::stage::session::{PointerTarget, Stage, SubmitState};
pub use crate::viewport::scaler::ViewportPolicy;
