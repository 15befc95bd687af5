//! Zoomable photo page with swipe-to-dismiss.

use plkit_core::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::image::Image;

/// Vertical travel before the dismiss gesture starts.
pub const DISMISS_SLOP: f32 = 20.0;

/// Vertical travel that maps to a progress of 1.
pub const DISMISS_DISTANCE: f32 = 200.0;

/// Progress at or above which releasing dismisses the page.
pub const DISMISS_THRESHOLD: f32 = 0.2;

/// Smallest scale the image shrinks to while dragged.
pub const DISMISS_MIN_SCALE: f32 = 0.6;

/// Zoom range of a page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomLimits {
    /// Fitted size
    pub min: f32,
    /// Largest zoom
    pub max: f32,
}

impl ZoomLimits {
    /// Limits for an image shown in `viewport`. Without an image the page does
    /// not zoom.
    #[must_use]
    pub fn for_image(image: Option<Size>, viewport: Size) -> Self {
        let Some(image) = image.filter(|s| !s.is_zero()) else {
            return Self { min: 1.0, max: 1.0 };
        };
        let fitted = image.aspect_fit(viewport);
        let ratio = (fitted.width / viewport.width).min(fitted.height / viewport.height);
        let max = if ratio > 0.0 && ratio.is_finite() {
            1.0 / ratio + 1.0
        } else {
            1.0
        };
        Self { min: 1.0, max }
    }

    /// Whether any zooming is possible.
    #[must_use]
    pub fn can_zoom(&self) -> bool {
        self.max > self.min
    }

    /// Clamp a zoom scale into range.
    #[must_use]
    pub fn clamp(&self, scale: f32) -> f32 {
        scale.clamp(self.min, self.max)
    }
}

/// Frame a presenting transition animates towards: the image aspect-fitted
/// and centred in the container.
#[must_use]
pub fn present_target(image: Size, container: Size) -> Rect {
    Rect::from_size(container).centered(image.aspect_fit(container))
}

/// Live feedback while the dismiss gesture runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DismissUpdate {
    /// Vertical travel over [`DISMISS_DISTANCE`]; negative when dragged up
    pub progress: f32,
    /// Image translation since the gesture began
    pub translation: Point,
    /// Image scale
    pub scale: f32,
}

impl DismissUpdate {
    fn at(anchor: Point, point: Point) -> Self {
        let translation = point - anchor;
        let progress = translation.y / DISMISS_DISTANCE;
        Self {
            progress,
            translation,
            scale: (1.0 - progress).clamp(DISMISS_MIN_SCALE, 1.0),
        }
    }

    /// Opacity for the backdrop and page chrome.
    #[must_use]
    pub fn backdrop_alpha(&self) -> f32 {
        (1.0 - self.progress).clamp(0.0, 1.0)
    }
}

/// How a finished dismiss gesture resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DismissOutcome {
    /// Close the browser
    Dismiss,
    /// Animate the image back into place
    Restore,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    Tracking { start: Point },
    Running { anchor: Point },
}

/// Vertical drag-to-dismiss recognizer.
///
/// Feed it touch positions in page coordinates. It only starts once the
/// touch has moved [`DISMISS_SLOP`] vertically, and the gesture anchor is
/// the position where it started, not the initial touch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DismissGesture {
    phase: Phase,
    enabled: bool,
}

impl Default for DismissGesture {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            enabled: true,
        }
    }
}

impl DismissGesture {
    /// Create an enabled recognizer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether touches are being recognized.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable. Disabling abandons any touch in progress.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.phase = Phase::Idle;
        }
    }

    /// Whether the gesture has started.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running { .. })
    }

    /// First touch. Later touches while one is tracked are ignored.
    pub fn touch_began(&mut self, point: Point) {
        if self.enabled && self.phase == Phase::Idle {
            self.phase = Phase::Tracking { start: point };
        }
    }

    /// Touch moved. Returns feedback once the gesture is running; the move
    /// that starts it reports no change.
    pub fn touch_moved(&mut self, point: Point) -> Option<DismissUpdate> {
        match self.phase {
            Phase::Idle => None,
            Phase::Tracking { start } => {
                if (point.y - start.y).abs() > DISMISS_SLOP {
                    self.phase = Phase::Running { anchor: point };
                    trace!("dismiss gesture began");
                }
                None
            }
            Phase::Running { anchor } => Some(DismissUpdate::at(anchor, point)),
        }
    }

    /// Touch lifted or cancelled. Returns the outcome if the gesture had
    /// started.
    pub fn touch_ended(&mut self, point: Point) -> Option<DismissOutcome> {
        let phase = std::mem::replace(&mut self.phase, Phase::Idle);
        let Phase::Running { anchor } = phase else {
            return None;
        };
        let progress = DismissUpdate::at(anchor, point).progress;
        let outcome = if progress >= DISMISS_THRESHOLD {
            DismissOutcome::Dismiss
        } else {
            DismissOutcome::Restore
        };
        debug!(progress, ?outcome, "dismiss gesture ended");
        Some(outcome)
    }
}

/// What a double tap did.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DoubleTap {
    /// Zoomed in around `focus`
    ZoomIn {
        /// New scale
        scale: f32,
        /// Tap position
        focus: Point,
    },
    /// Returned to the fitted size
    Reset,
    /// Nothing to zoom
    Ignored,
}

/// One zoomable page.
///
/// The image is aspect-fitted to the page bounds, scaled by the zoom, and
/// centred in the scrollable content area.
#[derive(Debug, Clone)]
pub struct PhotoPage<I> {
    image: Option<I>,
    bounds: Size,
    zoom: f32,
    limits: ZoomLimits,
    content_size: Size,
    image_frame: Rect,
    layout_suspended: bool,
    gesture: DismissGesture,
}

impl<I: Image> Default for PhotoPage<I> {
    fn default() -> Self {
        Self::new(Size::ZERO)
    }
}

impl<I: Image> PhotoPage<I> {
    /// Empty page of the given size.
    #[must_use]
    pub fn new(bounds: Size) -> Self {
        Self {
            image: None,
            bounds,
            zoom: 1.0,
            limits: ZoomLimits::for_image(None, bounds),
            content_size: bounds,
            image_frame: Rect::ZERO,
            layout_suspended: false,
            gesture: DismissGesture::new(),
        }
    }

    /// Image shown.
    #[must_use]
    pub const fn image(&self) -> Option<&I> {
        self.image.as_ref()
    }

    /// Replace the image and reset the zoom.
    pub fn set_image(&mut self, image: Option<I>) {
        self.image = image;
        self.reset_zoom();
    }

    /// Page size.
    #[must_use]
    pub const fn bounds(&self) -> Size {
        self.bounds
    }

    /// Resize the page. Ignored for layout while the dismiss gesture runs.
    pub fn set_bounds(&mut self, bounds: Size) {
        self.bounds = bounds;
        self.layout();
    }

    /// Current zoom scale.
    #[must_use]
    pub const fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Zoom range for the current image and bounds.
    #[must_use]
    pub const fn zoom_limits(&self) -> ZoomLimits {
        self.limits
    }

    /// Scrollable content size.
    #[must_use]
    pub const fn content_size(&self) -> Size {
        self.content_size
    }

    /// Frame of the image in content coordinates.
    #[must_use]
    pub const fn image_frame(&self) -> Rect {
        self.image_frame
    }

    /// Whether layout is on hold for the dismiss gesture.
    #[must_use]
    pub const fn is_layout_suspended(&self) -> bool {
        self.layout_suspended
    }

    /// The dismiss recognizer.
    #[must_use]
    pub const fn dismiss_gesture(&self) -> &DismissGesture {
        &self.gesture
    }

    /// Recompute limits and return to the fitted size.
    pub fn reset_zoom(&mut self) {
        let image_size = self.image.as_ref().map(Image::size);
        self.limits = ZoomLimits::for_image(image_size, self.bounds);
        self.zoom = self.limits.min;
        self.content_size = self.bounds;
        self.gesture.set_enabled(true);
        self.layout();
    }

    /// Set the zoom, clamped to the limits. Dismissing is disabled while
    /// zoomed in.
    pub fn set_zoom(&mut self, scale: f32) {
        self.zoom = self.limits.clamp(scale);
        self.gesture.set_enabled(self.zoom <= self.limits.min);
        self.layout();
    }

    /// Toggle between the fitted size and full zoom.
    pub fn double_tap(&mut self, focus: Point) -> DoubleTap {
        if !self.limits.can_zoom() {
            return DoubleTap::Ignored;
        }
        if self.zoom <= self.limits.min {
            self.set_zoom(self.limits.max);
            DoubleTap::ZoomIn {
                scale: self.zoom,
                focus,
            }
        } else {
            self.set_zoom(self.limits.min);
            DoubleTap::Reset
        }
    }

    /// Handle a long press. Returns the image to offer for sharing or
    /// saving; a page without an image has nothing to offer.
    #[must_use]
    pub fn long_press(&self) -> Option<&I> {
        let image = self.image.as_ref();
        if image.is_some() {
            debug!("long press on photo page");
        }
        image
    }

    fn layout(&mut self) {
        if self.layout_suspended {
            return;
        }
        let Some(image) = self.image.as_ref() else {
            self.image_frame = Rect::ZERO;
            return;
        };
        let size = image.size().aspect_fit(self.bounds).scale(self.zoom);
        self.content_size = Size::new(
            self.bounds.width.max(size.width),
            self.bounds.height.max(size.height),
        );
        self.image_frame = Rect::from_size(self.content_size).centered(size);
    }

    /// Forward a touch-down to the dismiss recognizer.
    pub fn touch_began(&mut self, point: Point) {
        self.gesture.touch_began(point);
    }

    /// Forward a move. Layout is suspended from the moment the gesture starts.
    pub fn touch_moved(&mut self, point: Point) -> Option<DismissUpdate> {
        let update = self.gesture.touch_moved(point);
        if self.gesture.is_running() {
            self.layout_suspended = true;
        }
        update
    }

    /// Forward a touch-up. A `Dismiss` resumes layout at once; after a
    /// `Restore` the host calls [`restore_finished`](Self::restore_finished)
    /// once its animation completes.
    pub fn touch_ended(&mut self, point: Point) -> Option<DismissOutcome> {
        let outcome = self.gesture.touch_ended(point)?;
        if outcome == DismissOutcome::Dismiss {
            self.layout_suspended = false;
        }
        Some(outcome)
    }

    /// Resume layout after the restore animation.
    pub fn restore_finished(&mut self) {
        self.layout_suspended = false;
        self.layout();
    }
}
