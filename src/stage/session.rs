use url::Url;

use crate::{
    assets::decode::decode_native_size,
    assets::library::{AssetFile, AssetLibrary, AssetPairKey, DecodeTicket, SlotKind},
    config::StageConfig,
    foundation::core::{DisplayGeometry, NativeSize, Point},
    foundation::error::{DrapeError, DrapeResult, Precondition},
    mapping::mapper::CoordinateMapper,
    mapping::quad::Quad,
    placement::affine::{Corner, FreeTransformHit, GizmoHandle},
    placement::{Placement, PlacementMode},
    request::client::MockupService,
    request::form::MockupRequest,
    request::options::RenderOptions,
    request::response::RenderedMockup,
    viewport::scaler::ViewportPolicy,
};

/// Whether a submission is outstanding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmitState {
    /// Ready to submit.
    #[default]
    Idle,
    /// Waiting on the service; further submits are refused.
    InFlight,
}

/// What a pointer-down landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerTarget {
    /// A gizmo handle; a resize or rotate gesture started.
    Handle(GizmoHandle),
    /// The design node; it is selected and a drag started.
    Node,
    /// Empty canvas; the node was deselected.
    Empty,
    /// A four-point pick; carries the new point count.
    Pick(usize),
    /// Nothing to interact with yet.
    Ignored,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Gesture {
    Drag { last: Point },
    Resize(Corner),
    Rotate,
}

/// One interactive placement session: two asset slots, the display geometry, the placement,
/// render options and the last result.
///
/// All mutation happens through discrete input events on `&mut self`; nothing here is shared
/// across threads.
#[derive(Debug)]
pub struct Stage {
    policy: ViewportPolicy,
    viewport_width: u32,
    assets: AssetLibrary,
    geometry: Option<DisplayGeometry>,
    placement: Placement,
    options: RenderOptions,
    result: Option<RenderedMockup>,
    submit: SubmitState,
    submitted_for: Option<AssetPairKey>,
    gesture: Option<Gesture>,
    last_error: Option<String>,
}

impl Stage {
    /// Empty stage.
    pub fn new(mode: PlacementMode, policy: ViewportPolicy, viewport_width: u32) -> Self {
        Self {
            policy,
            viewport_width,
            assets: AssetLibrary::default(),
            geometry: None,
            placement: Placement::new(mode),
            options: RenderOptions::default(),
            result: None,
            submit: SubmitState::Idle,
            submitted_for: None,
            gesture: None,
            last_error: None,
        }
    }

    /// Empty stage using `cfg`'s mode, viewport and options.
    pub fn from_config(cfg: &StageConfig) -> Self {
        let mut stage = Self::new(cfg.mode, cfg.viewport, cfg.viewport_width);
        stage.options = cfg.options;
        stage
    }

    /// Active placement variant.
    pub fn mode(&self) -> PlacementMode {
        self.placement.mode()
    }

    /// Asset slots.
    pub fn assets(&self) -> &AssetLibrary {
        &self.assets
    }

    /// Current display geometry, once the base is decoded.
    pub fn geometry(&self) -> Option<DisplayGeometry> {
        self.geometry
    }

    /// Viewport width last reported.
    pub fn viewport_width(&self) -> u32 {
        self.viewport_width
    }

    /// Placement snapshot.
    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    /// Direct access for programmatic placement (e.g. from the command line).
    pub fn placement_mut(&mut self) -> &mut Placement {
        &mut self.placement
    }

    /// Render options as set (not yet clamped).
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Editable render options.
    pub fn options_mut(&mut self) -> &mut RenderOptions {
        &mut self.options
    }

    /// Displayed result.
    pub fn result(&self) -> Option<&RenderedMockup> {
        self.result.as_ref()
    }

    /// Submission state.
    pub fn submit_state(&self) -> SubmitState {
        self.submit
    }

    /// Whether a submission is in flight.
    pub fn is_busy(&self) -> bool {
        self.submit == SubmitState::InFlight
    }

    /// Reason of the last failed submission, cleared by the next attempt.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Replace the asset in `kind`. Invalidates the result and the free-transform node; a base
    /// swap also drops the display geometry and any four-point picks.
    pub fn set_asset(&mut self, kind: SlotKind, file: AssetFile) -> DecodeTicket {
        let ticket = self.assets.assign(kind, file);
        self.invalidate_for(kind);
        ticket
    }

    /// Replace the base image.
    pub fn set_base(&mut self, file: AssetFile) -> DecodeTicket {
        self.set_asset(SlotKind::Base, file)
    }

    /// Replace the design image.
    pub fn set_design(&mut self, file: AssetFile) -> DecodeTicket {
        self.set_asset(SlotKind::Design, file)
    }

    /// Remove the asset in `kind`, with the same invalidation as a replacement.
    pub fn clear_asset(&mut self, kind: SlotKind) -> bool {
        let had = self.assets.clear(kind);
        self.invalidate_for(kind);
        had
    }

    fn invalidate_for(&mut self, kind: SlotKind) {
        self.result = None;
        self.gesture = None;
        if kind == SlotKind::Base {
            self.geometry = None;
        }
        match &mut self.placement {
            Placement::FreeTransform(m) => m.reset(),
            Placement::FourPoint(poly) if kind == SlotKind::Base => poly.reset(),
            Placement::FourPoint(_) => {}
        }
        tracing::debug!(slot = %kind, "asset changed, dependent state invalidated");
    }

    /// Deliver an asynchronous decode completion. Stale tickets are ignored.
    pub fn complete_decode(
        &mut self,
        ticket: DecodeTicket,
        native: NativeSize,
    ) -> DrapeResult<bool> {
        if !self.assets.complete(ticket, native) {
            return Ok(false);
        }
        if ticket.slot == SlotKind::Base {
            self.recompute_geometry()?;
        }
        self.try_initialize();
        Ok(true)
    }

    /// Decode the pending asset in `kind` synchronously. Returns `false` if nothing was
    /// pending.
    pub fn decode_pending(&mut self, kind: SlotKind) -> DrapeResult<bool> {
        let slot = self.assets.slot(kind);
        let (Some(ticket), Some(file)) = (slot.pending_ticket(), slot.file()) else {
            return Ok(false);
        };
        let native = decode_native_size(file.bytes())?;
        self.complete_decode(ticket, native)
    }

    /// New viewport width. Recomputes display geometry and re-attaches the gizmo; the
    /// placement itself is left alone.
    pub fn resize_viewport(&mut self, viewport_width: u32) -> DrapeResult<()> {
        self.viewport_width = viewport_width;
        self.recompute_geometry()?;
        if let Placement::FreeTransform(m) = &mut self.placement {
            m.reattach_gizmo();
        }
        Ok(())
    }

    fn recompute_geometry(&mut self) -> DrapeResult<()> {
        self.geometry = match self.assets.slot(SlotKind::Base).native_size() {
            Some(native) => Some(self.policy.fit(native, self.viewport_width)?),
            None => None,
        };
        if let Some(g) = self.geometry {
            tracing::debug!(width = g.width, height = g.height, "display geometry");
        }
        Ok(())
    }

    fn try_initialize(&mut self) {
        let Placement::FreeTransform(m) = &mut self.placement else {
            return;
        };
        let (Some(pair), Some(display), Some(design)) = (
            self.assets.ready_pair(),
            self.geometry,
            self.assets.slot(SlotKind::Design).native_size(),
        ) else {
            return;
        };
        m.initialize(pair, design, display);
    }

    /// Switch placement variant. The new placement starts empty (a free-transform node is
    /// placed immediately if both assets are ready) and the result is cleared.
    pub fn switch_mode(&mut self, mode: PlacementMode) {
        if mode == self.mode() {
            return;
        }
        self.placement = Placement::new(mode);
        self.result = None;
        self.gesture = None;
        self.try_initialize();
    }

    /// Pointer pressed at display point `p`.
    pub fn pointer_down(&mut self, p: Point) -> PointerTarget {
        let Some(display) = self.geometry else {
            return PointerTarget::Ignored;
        };
        self.gesture = None;
        match &mut self.placement {
            Placement::FreeTransform(m) => match m.hit(p) {
                FreeTransformHit::Handle(h) => {
                    self.gesture = Some(match h {
                        GizmoHandle::Corner(c) => Gesture::Resize(c),
                        GizmoHandle::Rotate => Gesture::Rotate,
                    });
                    PointerTarget::Handle(h)
                }
                FreeTransformHit::Node => {
                    m.select();
                    self.gesture = Some(Gesture::Drag { last: p });
                    PointerTarget::Node
                }
                FreeTransformHit::Empty => {
                    m.deselect();
                    PointerTarget::Empty
                }
            },
            Placement::FourPoint(poly) => {
                if !display.contains(p) {
                    return PointerTarget::Ignored;
                }
                PointerTarget::Pick(poly.pick(p))
            }
        }
    }

    /// Pointer moved to `p` while pressed. Returns whether the placement changed.
    pub fn pointer_move(&mut self, p: Point) -> bool {
        let (Some(gesture), Placement::FreeTransform(m)) = (self.gesture, &mut self.placement)
        else {
            return false;
        };
        match gesture {
            Gesture::Drag { last } => {
                let moved = m.translate(p - last);
                self.gesture = Some(Gesture::Drag { last: p });
                moved
            }
            Gesture::Resize(corner) => m.resize_corner(corner, p),
            Gesture::Rotate => m.rotate_toward(p),
        }
    }

    /// Pointer released; ends any gesture.
    pub fn pointer_up(&mut self) {
        self.gesture = None;
    }

    /// Clear four-point picks and the result. No-op in free-transform mode.
    pub fn reset_points(&mut self) -> bool {
        let Placement::FourPoint(poly) = &mut self.placement else {
            return false;
        };
        poly.reset();
        self.result = None;
        true
    }

    /// Native-space quad for the current placement.
    pub fn quad(&self) -> DrapeResult<Quad> {
        let mapper = CoordinateMapper::try_new(
            self.assets.slot(SlotKind::Base).native_size(),
            self.assets.slot(SlotKind::Design).native_size(),
            self.geometry,
        )?;
        mapper.map(&self.placement)
    }

    /// Whether [`Stage::begin_submission`] would succeed.
    pub fn can_submit(&self) -> bool {
        !self.is_busy() && self.quad().is_ok()
    }

    /// Validate preconditions, snapshot the request and mark the stage busy. The previous
    /// result is cleared. Fails with [`DrapeError::Busy`] while a submission is in flight.
    pub fn begin_submission(&mut self) -> DrapeResult<MockupRequest> {
        if self.is_busy() {
            return Err(DrapeError::Busy);
        }
        let quad = self.quad()?;
        let base = self
            .assets
            .slot(SlotKind::Base)
            .file()
            .ok_or(Precondition::MissingBase)?
            .clone();
        let design = self
            .assets
            .slot(SlotKind::Design)
            .file()
            .ok_or(Precondition::MissingDesign)?
            .clone();

        let request = MockupRequest::new(base, design, quad, self.options);
        self.submit = SubmitState::InFlight;
        self.submitted_for = self.assets.ready_pair();
        self.result = None;
        self.last_error = None;
        Ok(request)
    }

    /// Record the service's answer. Clears the busy flag on every path; on success the new
    /// result replaces whatever was there.
    ///
    /// A success for an asset pair that has since been replaced is discarded with
    /// [`DrapeError::Superseded`].
    pub fn finish_submission(
        &mut self,
        api_base: &Url,
        outcome: DrapeResult<String>,
    ) -> DrapeResult<&RenderedMockup> {
        self.submit = SubmitState::Idle;
        let submitted_for = self.submitted_for.take();
        let still_current = submitted_for.is_some() && submitted_for == self.assets.ready_pair();
        let resolved = outcome.and_then(|path| RenderedMockup::resolve(api_base, &path));
        match resolved {
            Ok(rendered) if !still_current => {
                tracing::debug!(url = %rendered.url, "result for replaced assets discarded");
                Err(DrapeError::Superseded)
            }
            Ok(rendered) => {
                tracing::info!(url = %rendered.url, "mockup ready");
                Ok(self.result.insert(rendered))
            }
            Err(e) => {
                tracing::warn!(error = %e, "mockup submission failed");
                self.last_error = Some(match &e {
                    DrapeError::Service(msg) => msg.clone(),
                    other => other.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Full single-flight submission through `service`.
    #[tracing::instrument(skip_all, fields(mode = ?self.mode()))]
    pub fn submit(&mut self, service: &dyn MockupService) -> DrapeResult<&RenderedMockup> {
        let request = self.begin_submission()?;
        let outcome = service.submit(&request);
        self.finish_submission(service.api_base(), outcome)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/session.rs"]
mod tests;
