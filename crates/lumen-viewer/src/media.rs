#![forbid(unsafe_code)]

//! Media catalog: the ordered items the viewer can show.
//!
//! Items come from `(href, thumbnail)` link pairs. Only hrefs that point at an
//! image are kept. Natural sizes and load outcomes arrive later from the
//! host's asset loader and are recorded here.
//!
//! # Failure Modes
//!
//! - Updates addressed to an out-of-range index are ignored and report `false`.
//! - A failed full-resolution load settles the item (spinner hidden) but never
//!   promotes it; the thumbnail stays on screen.

use lumen_core::Size;

/// Extensions recognized as images (lowercase, without the dot).
pub const IMAGE_EXTENSIONS: [&str; 8] = ["jpg", "jpeg", "png", "webp", "gif", "bmp", "avif", "svg"];

/// Whether `href` names an image by its path extension.
///
/// Case-insensitive; query string and fragment are ignored.
#[must_use]
pub fn is_image_href(href: &str) -> bool {
    let path = href.split(['?', '#']).next().unwrap_or_default();
    let Some((stem, ext)) = path.rsplit_once('.') else {
        return false;
    };
    if stem.is_empty() || ext.contains('/') {
        return false;
    }
    IMAGE_EXTENSIONS
        .iter()
        .any(|known| ext.eq_ignore_ascii_case(known))
}

// ---------------------------------------------------------------------------
// MediaItem
// ---------------------------------------------------------------------------

/// Full-resolution load progress of one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum AssetState {
    #[default]
    Pending,
    Loaded,
    Failed,
}

impl AssetState {
    /// Loading has finished either way.
    #[must_use]
    pub const fn is_settled(self) -> bool {
        matches!(self, Self::Loaded | Self::Failed)
    }
}

/// One viewable item.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaItem {
    source_url: String,
    thumbnail_url: Option<String>,
    natural_size: Option<Size>,
    load: AssetState,
}

impl MediaItem {
    #[must_use]
    pub fn new(source_url: impl Into<String>, thumbnail_url: Option<String>) -> Self {
        Self {
            source_url: source_url.into(),
            thumbnail_url,
            natural_size: None,
            load: AssetState::Pending,
        }
    }

    #[must_use]
    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    #[must_use]
    pub fn thumbnail_url(&self) -> Option<&str> {
        self.thumbnail_url.as_deref()
    }

    /// URL to show before the full-resolution asset is ready.
    #[must_use]
    pub fn placeholder_url(&self) -> &str {
        self.thumbnail_url().unwrap_or(&self.source_url)
    }

    #[must_use]
    pub fn natural_size(&self) -> Option<Size> {
        self.natural_size
    }

    #[must_use]
    pub fn load_state(&self) -> AssetState {
        self.load
    }
}

// ---------------------------------------------------------------------------
// MediaCatalog
// ---------------------------------------------------------------------------

/// Ordered, index-addressed media items.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MediaCatalog {
    items: Vec<MediaItem>,
}

impl MediaCatalog {
    #[must_use]
    pub fn new(items: Vec<MediaItem>) -> Self {
        Self { items }
    }

    /// Build from `(href, thumbnail)` pairs, keeping image hrefs in order.
    pub fn from_links<I, H>(links: I) -> Self
    where
        I: IntoIterator<Item = (H, Option<String>)>,
        H: Into<String>,
    {
        let items = links
            .into_iter()
            .map(|(href, thumb)| (href.into(), thumb))
            .filter(|(href, _)| is_image_href(href))
            .map(|(href, thumb)| MediaItem::new(href, thumb))
            .collect();
        Self { items }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&MediaItem> {
        self.items.get(index)
    }

    #[must_use]
    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    /// Clamp `index` into range; `None` for an empty catalog.
    #[must_use]
    pub fn clamp_index(&self, index: usize) -> Option<usize> {
        self.items.len().checked_sub(1).map(|last| index.min(last))
    }

    /// Record the decoded pixel size of an item.
    pub fn set_natural_size(&mut self, index: usize, size: Size) -> bool {
        match self.items.get_mut(index) {
            Some(item) if !size.is_degenerate() => {
                item.natural_size = Some(size);
                true
            }
            _ => false,
        }
    }

    pub fn mark_loaded(&mut self, index: usize) -> bool {
        self.set_state(index, AssetState::Loaded)
    }

    pub fn mark_failed(&mut self, index: usize) -> bool {
        self.set_state(index, AssetState::Failed)
    }

    fn set_state(&mut self, index: usize, state: AssetState) -> bool {
        let Some(item) = self.items.get_mut(index) else {
            return false;
        };
        item.load = state;
        true
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
