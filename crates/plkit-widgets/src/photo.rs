//! Photo browser model.
//!
//! Paging, load state and page geometry for a full-screen photo browser.
//! Networking and decoding are supplied by the host through [`ImageLoader`]
//! and [`ImageDecoder`]; completions arrive on the caller's thread.

use plkit_core::{Rect, Size};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::str::FromStr;
use tracing::{debug, trace, warn};
use url::Url;

use crate::image::Image;

/// Completion for an [`ImageLoader`] request. `None` means the load failed.
pub type LoadCompletion<I> = Box<dyn FnOnce(Option<I>)>;

/// Callback fired with the new page index.
pub type PageChangeCallback = Box<dyn FnMut(usize)>;

/// Where a photo's pixels come from.
#[derive(Debug, Clone, PartialEq)]
pub enum PhotoSource<I> {
    /// Already decoded
    Image(I),
    /// Local (`file://`) or remote location
    Url(Url),
    /// Encoded image data
    Bytes(Vec<u8>),
}

impl<I> PhotoSource<I> {
    /// True for URLs the loader has to fetch.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Url(url) if url.scheme() != "file")
    }
}

impl<I> FromStr for PhotoSource<I> {
    type Err = url::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Url::parse(s).map(Self::Url)
    }
}

impl<I> From<Url> for PhotoSource<I> {
    fn from(url: Url) -> Self {
        Self::Url(url)
    }
}

impl<I> From<Vec<u8>> for PhotoSource<I> {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

/// One browsable photo: the full image plus an optional thumbnail shown while
/// it loads.
#[derive(Debug, Clone, PartialEq)]
pub struct Photo<I> {
    /// Full image
    pub data: Option<PhotoSource<I>>,
    /// Low-resolution stand-in
    pub thumbnail: Option<PhotoSource<I>>,
}

impl<I> Photo<I> {
    /// Photo with a full image and no thumbnail.
    #[must_use]
    pub const fn new(data: PhotoSource<I>) -> Self {
        Self {
            data: Some(data),
            thumbnail: None,
        }
    }

    /// Add a thumbnail.
    #[must_use]
    pub fn with_thumbnail(mut self, thumbnail: PhotoSource<I>) -> Self {
        self.thumbnail = Some(thumbnail);
        self
    }
}

/// Fetches remote images.
pub trait ImageLoader<I> {
    /// Start loading `url`. `completion` runs exactly once, possibly before
    /// `load` returns.
    fn load(&self, url: &Url, is_thumbnail: bool, completion: LoadCompletion<I>);
}

/// Turns encoded bytes into host images.
pub trait ImageDecoder<I> {
    /// Decode image data. `None` if the data is not an image.
    fn decode(&self, bytes: &[u8]) -> Option<I>;

    /// Read and decode a `file://` URL.
    fn read_file(&self, url: &Url) -> Option<I> {
        let path = url.to_file_path().ok()?;
        match std::fs::read(&path) {
            Ok(bytes) => self.decode(&bytes),
            Err(err) => {
                warn!(path = %path.display(), %err, "failed to read photo file");
                None
            }
        }
    }
}

struct SlotState<I> {
    image: Option<I>,
    pending: usize,
    generation: u64,
    revision: u64,
}

impl<I> SlotState<I> {
    fn show(&mut self, image: I) {
        self.image = Some(image);
        self.revision += 1;
    }
}

/// Load state of one browser page.
///
/// Clones share state, so a completion can land after the caller has moved
/// on; completions for a photo that is no longer shown are ignored.
pub struct PhotoSlot<I> {
    state: Rc<RefCell<SlotState<I>>>,
}

impl<I> Clone for PhotoSlot<I> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<I> Default for PhotoSlot<I> {
    fn default() -> Self {
        Self {
            state: Rc::new(RefCell::new(SlotState {
                image: None,
                pending: 0,
                generation: 0,
                revision: 0,
            })),
        }
    }
}

impl<I> fmt::Debug for PhotoSlot<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("PhotoSlot")
            .field("has_image", &state.image.is_some())
            .field("pending", &state.pending)
            .field("generation", &state.generation)
            .finish()
    }
}

impl<I: Image + 'static> PhotoSlot<I> {
    /// Create an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Image currently shown.
    #[must_use]
    pub fn image(&self) -> Option<I> {
        self.state.borrow().image.clone()
    }

    /// Bumped every time the shown image changes.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.state.borrow().revision
    }

    /// Whether the wait indicator should spin.
    #[must_use]
    pub fn is_waiting(&self) -> bool {
        self.state.borrow().pending > 0
    }

    /// Show `photo`, clearing whatever was shown before.
    ///
    /// The thumbnail is requested first, then the full image.
    pub fn set_photo(
        &self,
        photo: Option<&Photo<I>>,
        loader: &dyn ImageLoader<I>,
        decoder: &dyn ImageDecoder<I>,
    ) {
        {
            let mut state = self.state.borrow_mut();
            state.generation += 1;
            state.pending = 0;
            if state.image.take().is_some() {
                state.revision += 1;
            }
        }
        let Some(photo) = photo else {
            return;
        };
        if let Some(thumbnail) = &photo.thumbnail {
            self.load(thumbnail, true, loader, decoder);
        }
        if let Some(data) = &photo.data {
            self.load(data, false, loader, decoder);
        }
    }

    fn load(
        &self,
        source: &PhotoSource<I>,
        is_thumbnail: bool,
        loader: &dyn ImageLoader<I>,
        decoder: &dyn ImageDecoder<I>,
    ) {
        let resolved = match source {
            PhotoSource::Image(image) => Some(image.clone()),
            PhotoSource::Bytes(bytes) => decoder.decode(bytes),
            PhotoSource::Url(url) if url.scheme() == "file" => decoder.read_file(url),
            PhotoSource::Url(url) => {
                self.fetch(url, is_thumbnail, loader);
                return;
            }
        };
        match resolved {
            Some(image) => self.state.borrow_mut().show(image),
            None => warn!(is_thumbnail, "photo source could not be decoded"),
        }
    }

    fn fetch(&self, url: &Url, is_thumbnail: bool, loader: &dyn ImageLoader<I>) {
        let generation = {
            let mut state = self.state.borrow_mut();
            state.pending += 1;
            state.generation
        };
        let weak: Weak<RefCell<SlotState<I>>> = Rc::downgrade(&self.state);
        let url_text = url.to_string();
        trace!(url = %url_text, is_thumbnail, "photo load started");

        loader.load(
            url,
            is_thumbnail,
            Box::new(move |image| {
                let Some(state) = weak.upgrade() else {
                    return;
                };
                let mut state = state.borrow_mut();
                if state.generation != generation {
                    debug!(url = %url_text, "stale photo load ignored");
                    return;
                }
                state.pending = state.pending.saturating_sub(1);
                match image {
                    None => warn!(url = %url_text, is_thumbnail, "photo load failed"),
                    Some(_) if is_thumbnail && state.image.is_some() => {
                        trace!(url = %url_text, "thumbnail arrived after full image");
                    }
                    Some(image) => state.show(image),
                }
            }),
        );
    }
}

/// Paging state of a photo browser.
pub struct PhotoBrowser<I> {
    photos: Vec<Photo<I>>,
    current: usize,
    viewport: Size,
    page_spacing: f32,
    single_tap_close: bool,
    on_page_change: Option<PageChangeCallback>,
}

impl<I: fmt::Debug> fmt::Debug for PhotoBrowser<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhotoBrowser")
            .field("photos", &self.photos)
            .field("current", &self.current)
            .field("viewport", &self.viewport)
            .field("page_spacing", &self.page_spacing)
            .field("single_tap_close", &self.single_tap_close)
            .finish_non_exhaustive()
    }
}

impl<I> PhotoBrowser<I> {
    /// Create a browser opened at `initial` (clamped to the last page).
    #[must_use]
    pub fn new(photos: Vec<Photo<I>>, initial: usize) -> Self {
        let current = initial.min(photos.len().saturating_sub(1));
        Self {
            photos,
            current,
            viewport: Size::ZERO,
            page_spacing: 10.0,
            single_tap_close: true,
            on_page_change: None,
        }
    }

    /// Set the gap between pages.
    #[must_use]
    pub fn page_spacing(mut self, spacing: f32) -> Self {
        self.page_spacing = spacing;
        self
    }

    /// Whether a single tap closes the browser.
    #[must_use]
    pub fn single_tap_close(mut self, enabled: bool) -> Self {
        self.single_tap_close = enabled;
        self
    }

    /// Register the page change callback.
    #[must_use]
    pub fn on_page_change(mut self, callback: impl FnMut(usize) + 'static) -> Self {
        self.on_page_change = Some(Box::new(callback));
        self
    }

    /// Set the visible area.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    /// Number of photos.
    #[must_use]
    pub fn len(&self) -> usize {
        self.photos.len()
    }

    /// True when there is nothing to browse.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    /// Photo at `index`.
    #[must_use]
    pub fn photo(&self, index: usize) -> Option<&Photo<I>> {
        self.photos.get(index)
    }

    /// Index of the page on screen.
    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.current
    }

    /// Page indicator text, e.g. `"2 / 5"`.
    #[must_use]
    pub fn page_tip(&self) -> String {
        format!("{} / {}", self.current + 1, self.photos.len())
    }

    /// Move to `index`, clamped to the last page. The callback fires only
    /// when the page actually changes; returns whether it did.
    pub fn set_current_page(&mut self, index: usize) -> bool {
        let index = index.min(self.photos.len().saturating_sub(1));
        if index == self.current {
            return false;
        }
        self.current = index;
        debug!(page = index, "photo page changed");
        if let Some(callback) = self.on_page_change.as_mut() {
            callback(index);
        }
        true
    }

    /// Width of one page including the trailing spacing.
    #[must_use]
    pub fn page_stride(&self) -> f32 {
        self.viewport.width + self.page_spacing
    }

    /// Frame of the paging scroller, wider than the viewport by the spacing.
    #[must_use]
    pub fn scroller_frame(&self) -> Rect {
        Rect::new(0.0, 0.0, self.page_stride(), self.viewport.height)
    }

    /// Frame of page `index` in scroll-content coordinates.
    #[must_use]
    pub fn page_frame(&self, index: usize) -> Rect {
        Rect::new(
            index as f32 * self.page_stride(),
            0.0,
            self.viewport.width,
            self.viewport.height,
        )
    }

    /// Scroll offset that shows the current page.
    #[must_use]
    pub fn content_offset(&self) -> f32 {
        self.current as f32 * self.page_stride()
    }

    /// Track the scroll position, switching to the nearest page.
    pub fn did_scroll(&mut self, offset: f32) -> bool {
        let stride = self.page_stride();
        if stride <= 0.0 || self.photos.is_empty() {
            return false;
        }
        let page = (offset / stride).round().max(0.0) as usize;
        self.set_current_page(page)
    }

    /// Frame of the page indicator above the bottom safe area.
    #[must_use]
    pub fn page_tip_frame(&self, safe_area_bottom: f32, line_height: f32) -> Rect {
        Rect::new(
            0.0,
            self.viewport.height - safe_area_bottom - line_height - 30.0,
            self.viewport.width,
            line_height,
        )
    }

    /// Handle a single tap; returns whether the browser should close.
    #[must_use]
    pub const fn single_tap(&self) -> bool {
        self.single_tap_close
    }
}
