//! Edit dispatcher
//!
//! A [`Session`] owns the background image, the optional time series, the
//! mask history, the interaction mode and the parameters. Each call to
//! [`Session::handle`] runs one event to completion and reports what
//! happened. An edit either pushes exactly one new snapshot or leaves the
//! history untouched.
//!
//! Click behavior in normal mode depends on the pixel under the cursor:
//!
//! | Mask value under click | Effect |
//! |------------------------|--------|
//! | 0 | grow a new region |
//! | current mask number | report on that ROI (series required) |
//! | other label | relabel its component to the current number |
//!
//! A shift-click erases the component under the cursor in any mode.

use crate::error::{EditError, EditResult};
use crate::event::{Command, Event, Key, Keymap};
use crate::grow::{grow_region, legacy_grow_region};
use crate::history::History;
use crate::mode::{InteractionMode, ModeAction, ModeState};
use crate::overlay::{Overlay, render_overlay};
use crate::params::SessionParams;
use crate::refine::RefineOptions;
use crate::roi::{RoiReport, component_label_at, roi_correlation, roi_info};
use crate::shapes::{OverlapRule, circle_region, ensure_no_overlap, polygon_region, square_region};
use cellpick_core::{Image, Mask, Region, Series};
use cellpick_region::{ConnectivityType, component_at};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

/// Background shown under the mask
#[derive(Debug, Clone)]
pub enum Background {
    /// A single 2D image
    Image(Image),
    /// A stack, shown as its time average
    Stack(Series),
}

impl Background {
    fn into_image(self) -> Image {
        match self {
            Background::Image(image) => image,
            Background::Stack(stack) => Image::from_stack(&stack),
        }
    }
}

/// What an event did
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A new mask snapshot was pushed or the last one reverted
    Changed,
    /// The interaction mode changed
    ModeChanged(InteractionMode),
    /// A session parameter changed
    ParamsChanged,
    /// A shape vertex was recorded; carries the number collected so far
    PointAdded(usize),
    /// The event had no effect
    Unchanged,
    /// The edit was refused; the mask is unchanged
    Rejected(String),
    /// Revert with only the initial mask left
    NothingToRevert,
    /// ROI summary
    Report(RoiReport),
    /// The session is finished
    Closed,
}

/// Result of handling one event
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub outcome: Outcome,
    /// Fresh overlay when the mask changed
    pub overlay: Option<Overlay>,
}

/// Interactive mask-editing session
#[derive(Debug)]
pub struct Session {
    image: Image,
    series: Option<Series>,
    history: History,
    mode: ModeState,
    params: SessionParams,
    refine: RefineOptions,
    keymap: Keymap,
    rng: StdRng,
    closed: bool,
}

impl Session {
    /// Start a session
    ///
    /// Without `initial_mask` the session starts from an empty mask.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if the mask or series size differs from
    /// the background.
    pub fn new(
        background: Background,
        initial_mask: Option<Mask>,
        series: Option<Series>,
    ) -> EditResult<Self> {
        let image = background.into_image();
        let expected = image.dimensions();
        let mask = match initial_mask {
            Some(mask) => mask,
            None => Mask::new(expected.0, expected.1)?,
        };
        if mask.dimensions() != expected {
            return Err(cellpick_core::Error::DimensionMismatch {
                expected,
                actual: mask.dimensions(),
            }
            .into());
        }
        match series.as_ref().map(Series::dimensions) {
            Some(actual) if actual != expected => {
                return Err(cellpick_core::Error::DimensionMismatch { expected, actual }.into());
            }
            _ => {}
        }
        info!(
            width = expected.0,
            height = expected.1,
            labeled = mask.count_nonzero(),
            depth = series.as_ref().map(|s| s.depth()),
            "starting cell picking session"
        );
        Ok(Self {
            image,
            series,
            history: History::new(mask),
            mode: ModeState::new(),
            params: SessionParams::default(),
            refine: RefineOptions::default(),
            keymap: Keymap::default(),
            rng: StdRng::from_os_rng(),
            closed: false,
        })
    }

    pub fn with_params(mut self, params: SessionParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_refine_options(mut self, options: RefineOptions) -> Self {
        self.refine = options;
        self
    }

    pub fn with_keymap(mut self, keymap: Keymap) -> Self {
        self.keymap = keymap;
        self
    }

    /// Fix the random seed used by refinement
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn image(&self) -> &Image {
        &self.image
    }

    pub fn series(&self) -> Option<&Series> {
        self.series.as_ref()
    }

    pub fn current_mask(&self) -> &Mask {
        self.history.current()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn params(&self) -> &SessionParams {
        &self.params
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode.mode()
    }

    /// Points collected in the current shape mode
    pub fn points(&self) -> &[(u32, u32)] {
        self.mode.points()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Overlay of the current mask
    pub fn overlay(&self) -> Overlay {
        render_overlay(self.history.current())
    }

    /// Finish the session and hand back the current mask
    pub fn into_mask(self) -> Mask {
        self.history.into_current()
    }

    /// Handle one event
    ///
    /// Rejected edits come back as `Ok` with `Outcome::Rejected`.
    ///
    /// # Errors
    ///
    /// Returns `EditError::EmptyRoi` for an ROI query with nothing to
    /// report, and any internal error.
    pub fn handle(&mut self, event: Event) -> EditResult<Response> {
        if self.closed {
            warn!(?event, "event after session close ignored");
            return Ok(self.respond(Outcome::Unchanged));
        }
        debug!(?event, mode = %self.mode.mode(), "handling event");
        let result = match event {
            Event::Click { x, y } => self.click(x, y),
            Event::ShiftClick { x, y } => self.shift_click(x, y),
            Event::Key(key) => self.key(key),
        };
        match result {
            Ok(outcome) => Ok(self.respond(outcome)),
            Err(EditError::NothingToRevert) => {
                warn!("nothing to revert");
                Ok(self.respond(Outcome::NothingToRevert))
            }
            Err(e) if e.is_recoverable() => {
                warn!(error = %e, "edit rejected");
                Ok(self.respond(Outcome::Rejected(e.to_string())))
            }
            Err(e) => Err(e),
        }
    }

    fn respond(&self, outcome: Outcome) -> Response {
        let overlay = match outcome {
            Outcome::Changed => Some(self.overlay()),
            _ => None,
        };
        Response { outcome, overlay }
    }

    fn check_click(&self, x: u32, y: u32) -> EditResult<u16> {
        self.history
            .current()
            .get(x, y)
            .ok_or(EditError::OutOfBounds { x, y })
    }

    fn click(&mut self, x: u32, y: u32) -> EditResult<Outcome> {
        let value = self.check_click(x, y)?;
        match self.mode.mode() {
            InteractionMode::Normal => self.normal_click(x, y, value),
            InteractionMode::Square => {
                let collected = self.mode.add_point(x, y);
                if Some(collected) < InteractionMode::Square.points_to_complete() {
                    return Ok(Outcome::PointAdded(collected));
                }
                let (w, h) = self.image.dimensions();
                let (p0, p1) = (self.mode.points()[0], self.mode.points()[1]);
                let result = square_region(p0, p1, w, h).and_then(|region| {
                    ensure_no_overlap(&region, self.history.current(), OverlapRule::Exact)?;
                    Ok(region)
                });
                self.finish_shape(result)
            }
            InteractionMode::Circle => {
                let (w, h) = self.image.dimensions();
                let result = circle_region(x, y, self.params.disk_size, w, h).and_then(|region| {
                    ensure_no_overlap(&region, self.history.current(), OverlapRule::Dilated)?;
                    Ok(region)
                });
                self.finish_shape(result)
            }
            InteractionMode::Polygon => Ok(Outcome::PointAdded(self.mode.add_point(x, y))),
            InteractionMode::LegacyGrowth => {
                let region =
                    legacy_grow_region(&self.image, self.history.current(), x, y, &self.params)?;
                self.commit(&region)
            }
        }
    }

    fn normal_click(&mut self, x: u32, y: u32, value: u16) -> EditResult<Outcome> {
        let number = self.params.mask_number;
        if value == 0 {
            let region = grow_region(
                &self.image,
                self.series.as_ref(),
                self.history.current(),
                (x, y),
                self.params.disk_size,
                &self.refine,
                &mut self.rng,
            )?;
            return self.commit(&region);
        }
        if value == number {
            if self.series.is_none() {
                debug!(x, y, value, "click on current mask number without series");
                return Ok(Outcome::Unchanged);
            }
            let label = component_label_at(self.history.current(), x, y)?;
            let report = roi_info(&self.history, self.series.as_ref(), label)?;
            return Ok(Outcome::Report(report));
        }
        let component = self.component_under(x, y)?;
        info!(x, y, from = value, to = number, "relabeling component");
        self.commit(&component)
    }

    fn shift_click(&mut self, x: u32, y: u32) -> EditResult<Outcome> {
        if self.check_click(x, y)? == 0 {
            return Ok(Outcome::Unchanged);
        }
        let component = self.component_under(x, y)?;
        let erased = self.history.current().painted(&component, 0)?;
        self.history.push(erased)?;
        info!(x, y, pixels = component.count(), "erased component");
        Ok(Outcome::Changed)
    }

    fn key(&mut self, key: Key) -> EditResult<Outcome> {
        let Some(command) = self.keymap.lookup(key) else {
            debug!(?key, "unbound key");
            return Ok(Outcome::Unchanged);
        };
        match command {
            Command::SetMaskNumber(n) => match self.params.set_mask_number(n) {
                Ok(()) => {
                    info!(mask_number = n, "mask number selected");
                    Ok(Outcome::ParamsChanged)
                }
                Err(e) => {
                    warn!(error = %e, "mask number rejected");
                    Ok(Outcome::Rejected(e.to_string()))
                }
            },
            Command::Revert => {
                self.history.revert()?;
                info!(snapshots = self.history.len(), "reverted last edit");
                Ok(Outcome::Changed)
            }
            Command::DecrementContrast => self.adjust(|p| p.adjust_contrast(-1)),
            Command::IncrementContrast => self.adjust(|p| p.adjust_contrast(1)),
            Command::DecrementDiskSize => self.adjust(|p| p.adjust_disk_size(-1)),
            Command::IncrementDiskSize => self.adjust(|p| p.adjust_disk_size(1)),
            Command::DecrementCellRadius => self.adjust(|p| p.adjust_cell_radius(-1)),
            Command::IncrementCellRadius => self.adjust(|p| p.adjust_cell_radius(1)),
            Command::TogglePolygon => Ok(self.toggle(InteractionMode::Polygon)),
            Command::ToggleSquare => Ok(self.toggle(InteractionMode::Square)),
            Command::ToggleCircle => Ok(self.toggle(InteractionMode::Circle)),
            Command::ToggleLegacyGrowth => Ok(self.toggle(InteractionMode::LegacyGrowth)),
            Command::ClearMode => Ok(self.transition(ModeAction::Clear)),
            Command::FinalizePolygon => self.finalize_polygon(),
            Command::CorrelateLastRoi => Ok(Outcome::Report(roi_correlation(
                &self.history,
                self.series.as_ref(),
                None,
            )?)),
            Command::InfoLastRoi => Ok(Outcome::Report(roi_info(
                &self.history,
                self.series.as_ref(),
                None,
            )?)),
            Command::Close => {
                self.closed = true;
                info!(snapshots = self.history.len(), "session closed");
                Ok(Outcome::Closed)
            }
        }
    }

    fn adjust(&mut self, f: impl FnOnce(&mut SessionParams)) -> EditResult<Outcome> {
        f(&mut self.params);
        info!(
            disk_size = self.params.disk_size,
            contrast = self.params.contrast_threshold,
            cell_radius = self.params.cell_radius,
            "parameters changed"
        );
        Ok(Outcome::ParamsChanged)
    }

    fn toggle(&mut self, mode: InteractionMode) -> Outcome {
        self.transition(ModeAction::Toggle(mode))
    }

    fn transition(&mut self, action: ModeAction) -> Outcome {
        let mode = self.mode.apply(action);
        info!(%mode, "mode changed");
        Outcome::ModeChanged(mode)
    }

    fn finalize_polygon(&mut self) -> EditResult<Outcome> {
        if self.mode.mode() != InteractionMode::Polygon {
            debug!("finalize outside polygon mode");
            return Ok(Outcome::Unchanged);
        }
        let vertices = self.mode.vertices();
        if vertices.len() < 3 {
            // Points stay so the user can keep adding vertices
            return Err(EditError::InvalidRegion(format!(
                "polygon needs at least 3 vertices, got {}",
                vertices.len()
            )));
        }
        let (w, h) = self.image.dimensions();
        let result = polygon_region(&vertices, w, h).and_then(|region| {
            ensure_no_overlap(&region, self.history.current(), OverlapRule::Exact)?;
            Ok(region)
        });
        self.finish_shape(result)
    }

    /// Commit a completed shape and return to normal mode, or drop the
    /// collected points and stay in the mode if the shape was refused
    fn finish_shape(&mut self, result: EditResult<Region>) -> EditResult<Outcome> {
        match result {
            Ok(region) => {
                let outcome = self.commit(&region)?;
                self.mode.apply(ModeAction::Complete);
                Ok(outcome)
            }
            Err(e) => {
                self.mode.reset_points();
                Err(e)
            }
        }
    }

    fn component_under(&self, x: u32, y: u32) -> EditResult<Region> {
        let foreground = self.history.current().foreground();
        Ok(component_at(&foreground, x, y, ConnectivityType::FourWay)?)
    }

    fn commit(&mut self, region: &Region) -> EditResult<Outcome> {
        let number = self.params.mask_number;
        let next = self.history.current().painted(region, number)?;
        self.history.push(next)?;
        info!(
            pixels = region.count(),
            mask_number = number,
            snapshots = self.history.len(),
            "committed edit"
        );
        Ok(Outcome::Changed)
    }
}

/// Run a whole session over `events`
///
/// `on_overlay` receives the initial overlay and every overlay produced by a
/// mask change. The session ends at the close key or when `events` runs out.
/// An ROI query with nothing to report is logged and the session carries on.
///
/// # Errors
///
/// Propagates the first internal error from [`Session::handle`].
pub fn pick_cells<I, F>(
    background: Background,
    initial_mask: Option<Mask>,
    series: Option<Series>,
    events: I,
    mut on_overlay: F,
) -> EditResult<Mask>
where
    I: IntoIterator<Item = Event>,
    F: FnMut(&Overlay),
{
    let mut session = Session::new(background, initial_mask, series)?;
    on_overlay(&session.overlay());
    for event in events {
        let response = match session.handle(event) {
            Ok(response) => response,
            Err(EditError::EmptyRoi) => {
                warn!("ROI query found no pixels");
                continue;
            }
            Err(e) => return Err(e),
        };
        if let Some(overlay) = &response.overlay {
            on_overlay(overlay);
        }
        if response.outcome == Outcome::Closed {
            break;
        }
    }
    Ok(session.into_mask())
}
