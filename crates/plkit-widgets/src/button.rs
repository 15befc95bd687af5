//! Button with a title and up to four state-dependent icons.
//!
//! Text measurement and drawing belong to the host: the button takes the
//! measured title size and computes where the title, icons and background go.

use bitflags::bitflags;
use plkit_core::{EdgeInsets, Point, Rect, Size};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::image::Image;

bitflags! {
    /// Interaction state of a control. The empty set is the normal state.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct ControlState: u8 {
        /// Touch is down inside the control
        const HIGHLIGHTED = 1 << 0;
        /// Control ignores input
        const DISABLED = 1 << 1;
        /// Toggled on
        const SELECTED = 1 << 2;
    }
}

impl ControlState {
    /// The normal state.
    pub const NORMAL: Self = Self::empty();

    /// States to try, in order, when resolving an icon for `self`.
    fn lookup_chain(self) -> &'static [Self] {
        const NORMAL: &[ControlState] = &[ControlState::NORMAL];
        const HIGHLIGHTED: &[ControlState] = &[ControlState::HIGHLIGHTED, ControlState::NORMAL];
        const SELECTED_HIGHLIGHTED: &[ControlState] = &[
            ControlState::SELECTED.union(ControlState::HIGHLIGHTED),
            ControlState::HIGHLIGHTED,
            ControlState::SELECTED,
        ];

        if self == Self::NORMAL {
            NORMAL
        } else if self == Self::HIGHLIGHTED {
            HIGHLIGHTED
        } else if self == Self::SELECTED | Self::HIGHLIGHTED {
            SELECTED_HIGHLIGHTED
        } else {
            &[]
        }
    }

    /// Whether a failed lookup clears the icon instead of keeping it.
    fn clears_on_miss(self) -> bool {
        self == Self::NORMAL || self == Self::HIGHLIGHTED
    }
}

/// Outcome of resolving an icon for a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconUpdate<'a, I> {
    /// Show this image
    Show(&'a I),
    /// Show nothing
    Clear,
    /// Leave whatever is displayed
    Keep,
}

/// State→image table for one icon position.
#[derive(Debug, Clone, PartialEq)]
pub struct IconSlot<I> {
    images: Vec<(ControlState, I)>,
    image_size: Option<Size>,
    displayed: Option<I>,
}

impl<I> Default for IconSlot<I> {
    fn default() -> Self {
        Self {
            images: Vec::new(),
            image_size: None,
            displayed: None,
        }
    }
}

impl<I: Image> IconSlot<I> {
    /// Create an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or remove the image for exactly `state`.
    pub fn set_image(&mut self, state: ControlState, image: Option<I>) {
        self.images.retain(|(s, _)| *s != state);
        if let Some(image) = image {
            self.images.push((state, image));
        }
    }

    /// Image registered for exactly `state`.
    #[must_use]
    pub fn image(&self, state: ControlState) -> Option<&I> {
        self.images.iter().find(|(s, _)| *s == state).map(|(_, i)| i)
    }

    /// Force a display size instead of the image's own.
    pub fn set_image_size(&mut self, size: Option<Size>) {
        self.image_size = size;
    }

    /// Explicit display size, if set.
    #[must_use]
    pub const fn image_size(&self) -> Option<Size> {
        self.image_size
    }

    /// Resolve the image for `state`.
    ///
    /// | state                  | tried in order                       | on miss |
    /// |------------------------|--------------------------------------|---------|
    /// | normal                 | normal                               | clear   |
    /// | highlighted            | highlighted, normal                  | clear   |
    /// | selected + highlighted | selected+highlighted, highlighted, selected | keep |
    /// | anything else          | exact state                          | keep    |
    #[must_use]
    pub fn resolve(&self, state: ControlState) -> IconUpdate<'_, I> {
        let chain = state.lookup_chain();
        let found = if chain.is_empty() {
            self.image(state)
        } else {
            chain.iter().find_map(|s| self.image(*s))
        };
        match found {
            Some(image) => IconUpdate::Show(image),
            None if state.clears_on_miss() => IconUpdate::Clear,
            None => IconUpdate::Keep,
        }
    }

    /// Apply [`resolve`](Self::resolve) to the displayed image.
    pub fn refresh(&mut self, state: ControlState) {
        match self.resolve(state) {
            IconUpdate::Show(image) => self.displayed = Some(image.clone()),
            IconUpdate::Clear => self.displayed = None,
            IconUpdate::Keep => {}
        }
    }

    /// Image currently displayed.
    #[must_use]
    pub const fn displayed(&self) -> Option<&I> {
        self.displayed.as_ref()
    }

    /// Size the displayed image occupies, `None` when nothing is displayed.
    #[must_use]
    pub fn displayed_size(&self) -> Option<Size> {
        self.displayed
            .as_ref()
            .map(|image| self.image_size.unwrap_or_else(|| image.size()))
    }
}

/// Icon position relative to the title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconEdge {
    /// Before the title
    Left,
    /// Above the title
    Top,
    /// After the title
    Right,
    /// Below the title
    Bottom,
}

impl IconEdge {
    /// All edges in layout order.
    pub const ALL: [Self; 4] = [Self::Left, Self::Top, Self::Right, Self::Bottom];

    const fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Top => 1,
            Self::Right => 2,
            Self::Bottom => 3,
        }
    }
}

/// Title and icon placement inside the content box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ContentLayout {
    /// Size of the content box
    pub size: Size,
    /// Title frame
    pub title: Rect,
    /// Icon frames, indexed like [`IconEdge::ALL`]
    pub icons: [Option<Rect>; 4],
}

impl ContentLayout {
    /// Frame of the icon at `edge`.
    #[must_use]
    pub const fn icon(&self, edge: IconEdge) -> Option<Rect> {
        self.icons[edge.index()]
    }
}

/// Full button geometry for one set of bounds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ButtonLayout {
    /// Background image frame (the whole bounds)
    pub background: Rect,
    /// Content box, centred in the padded bounds
    pub content_frame: Rect,
    /// Title and icons relative to `content_frame`
    pub content: ContentLayout,
    /// Resolved corner radius
    pub corner_radius: f32,
}

/// Button with a title and four state-dependent icon slots.
#[derive(Debug, Clone)]
pub struct IconButton<I> {
    title_size: Size,
    icons: [IconSlot<I>; 4],
    spacing: f32,
    padding: EdgeInsets,
    background_size: Option<Size>,
    touch_inset: EdgeInsets,
    corner_radius: f32,
    always_half_radius: bool,
    state: ControlState,
    applied_state: ControlState,
}

impl<I: Image> Default for IconButton<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Image> IconButton<I> {
    /// Create a button with no title and no icons.
    #[must_use]
    pub fn new() -> Self {
        Self {
            title_size: Size::ZERO,
            icons: Default::default(),
            spacing: 2.0,
            padding: EdgeInsets::ZERO,
            background_size: None,
            touch_inset: EdgeInsets::ZERO,
            corner_radius: 0.0,
            always_half_radius: false,
            state: ControlState::NORMAL,
            applied_state: ControlState::NORMAL,
        }
    }

    /// Set the measured title size.
    #[must_use]
    pub fn title_size(mut self, size: Size) -> Self {
        self.title_size = size;
        self
    }

    /// Set the title-to-icon spacing.
    #[must_use]
    pub fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Set the padding around the content box.
    #[must_use]
    pub fn padding(mut self, padding: EdgeInsets) -> Self {
        self.padding = padding;
        self
    }

    /// Set the background image size.
    #[must_use]
    pub fn background_size(mut self, size: Option<Size>) -> Self {
        self.background_size = size;
        self
    }

    /// Set the touch inset. Negative values grow the touch area.
    #[must_use]
    pub fn touch_inset(mut self, inset: EdgeInsets) -> Self {
        self.touch_inset = inset;
        self
    }

    /// Set a fixed corner radius.
    #[must_use]
    pub fn corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }

    /// Round the corners to half the height on every layout.
    #[must_use]
    pub fn always_half_radius(mut self, enabled: bool) -> Self {
        self.always_half_radius = enabled;
        self
    }

    /// Set the icon image for `edge` in `state` and refresh what is displayed.
    #[must_use]
    pub fn icon(mut self, edge: IconEdge, state: ControlState, image: I) -> Self {
        self.set_icon(edge, state, Some(image));
        self
    }

    /// Set or remove an icon image and refresh what is displayed.
    pub fn set_icon(&mut self, edge: IconEdge, state: ControlState, image: Option<I>) {
        let current = self.state;
        let slot = &mut self.icons[edge.index()];
        slot.set_image(state, image);
        slot.refresh(current);
    }

    /// Update the measured title size.
    pub fn set_title_size(&mut self, size: Size) {
        self.title_size = size;
    }

    /// Icon slot at `edge`.
    #[must_use]
    pub const fn slot(&self, edge: IconEdge) -> &IconSlot<I> {
        &self.icons[edge.index()]
    }

    /// Mutable icon slot at `edge`. Call [`refresh`](Self::refresh) after
    /// editing images directly.
    pub fn slot_mut(&mut self, edge: IconEdge) -> &mut IconSlot<I> {
        &mut self.icons[edge.index()]
    }

    /// Current control state.
    #[must_use]
    pub const fn state(&self) -> ControlState {
        self.state
    }

    /// Move to `state`. Icons are re-resolved only when the state differs from
    /// the one last applied; returns whether that happened.
    pub fn set_state(&mut self, state: ControlState) -> bool {
        self.state = state;
        if state == self.applied_state {
            return false;
        }
        self.refresh();
        trace!(?state, "button appearance refreshed");
        true
    }

    /// Re-resolve every icon for the current state.
    pub fn refresh(&mut self) {
        let state = self.state;
        for slot in &mut self.icons {
            slot.refresh(state);
        }
        self.applied_state = state;
    }

    /// Title and icon placement for the displayed icons.
    #[must_use]
    pub fn content_layout(&self) -> ContentLayout {
        let sizes = IconEdge::ALL.map(|edge| self.slot(edge).displayed_size());
        let [left, top, right, bottom] = sizes;
        let sp = self.spacing;

        let mut size = self.title_size;
        for (icon, horizontal) in [(left, true), (top, false), (right, true), (bottom, false)] {
            let Some(icon) = icon else { continue };
            if horizontal {
                size.height = size.height.max(icon.height);
                size.width += icon.width + sp;
            } else {
                size.width = size.width.max(icon.width);
                size.height += icon.height + sp;
            }
        }
        if size.is_zero() {
            if let Some(background) = self.background_size {
                size = background;
            }
        }

        let title_x = match (left.is_some(), right.is_some()) {
            (true, false) => size.width - self.title_size.width,
            (false, true) => 0.0,
            _ => (size.width - self.title_size.width) / 2.0,
        };
        let title_y = match (top.is_some(), bottom.is_some()) {
            (true, false) => size.height - self.title_size.height,
            (false, true) => 0.0,
            _ => (size.height - self.title_size.height) / 2.0,
        };
        let title = Rect::from_origin_size(Point::new(title_x, title_y), self.title_size);

        let icons = [
            left.map(|s| {
                Rect::new(title.x - s.width - sp, (size.height - s.height) / 2.0, s.width, s.height)
            }),
            top.map(|s| {
                Rect::new((size.width - s.width) / 2.0, title.y - s.height - sp, s.width, s.height)
            }),
            right.map(|s| Rect::new(title.max_x() + sp, (size.height - s.height) / 2.0, s.width, s.height)),
            bottom.map(|s| Rect::new((size.width - s.width) / 2.0, title.max_y() + sp, s.width, s.height)),
        ];

        ContentLayout { size, title, icons }
    }

    /// Content size plus padding.
    #[must_use]
    pub fn intrinsic_size(&self) -> Size {
        let content = self.content_layout().size;
        Size::new(
            content.width + self.padding.horizontal(),
            content.height + self.padding.vertical(),
        )
    }

    /// Lay the button out in `bounds` (in the button's own coordinates).
    #[must_use]
    pub fn layout(&self, bounds: Rect) -> ButtonLayout {
        let content = self.content_layout();
        let padded = bounds.inset_by(self.padding);
        let content_frame = Rect::new(
            self.padding.left + (padded.width - content.size.width) / 2.0,
            self.padding.top + (padded.height - content.size.height) / 2.0,
            content.size.width,
            content.size.height,
        );
        ButtonLayout {
            background: bounds,
            content_frame,
            content,
            corner_radius: self.resolved_corner_radius(bounds),
        }
    }

    /// Corner radius for `bounds`.
    #[must_use]
    pub fn resolved_corner_radius(&self, bounds: Rect) -> f32 {
        if self.always_half_radius {
            bounds.height / 2.0
        } else {
            self.corner_radius
        }
    }

    /// Whether `point` lands on the button laid out in `bounds`.
    #[must_use]
    pub fn hit_test(&self, bounds: Rect, point: Point) -> bool {
        bounds.inset_by(self.touch_inset).contains_point(&point)
    }
}
