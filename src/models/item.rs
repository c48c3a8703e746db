/// What the open request resolved to. Fixed for the life of a session,
/// except for the load-failure downgrade to `Element`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Image,
    Video,
    Url,
    Element,
    Object,
}

/// Explicit type hint carried by the triggering element.
///
/// Only these three values are recognized; video is always detected by
/// embed-host pattern, never by hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeHint {
    Image,
    Url,
    Element,
}

/// Natural (intrinsic) dimensions reported by the media loader or measured
/// by the renderer for inline content.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NaturalSize {
    pub width: f64,
    pub height: f64,
}

impl NaturalSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn aspect_ratio(&self) -> f64 {
        if self.height == 0.0 {
            1.0
        } else {
            self.width / self.height
        }
    }
}

/// One openable item: the anchor itself or a gallery entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemMeta {
    /// Source reference (href, data URI, or fragment).
    pub source: String,
    /// Caption source text, fed to the configured formatter.
    pub title: Option<String>,
    /// Per-item declared width override, if any.
    pub declared_width: Option<f64>,
    /// Per-item declared height override, if any.
    pub declared_height: Option<f64>,
}

impl Default for ItemMeta {
    fn default() -> Self {
        Self::new("")
    }
}

impl ItemMeta {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            title: None,
            declared_width: None,
            declared_height: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// An open request as delivered by the host.
///
/// The host resolves the document side of things up front: the triggering
/// item, its optional type hint, and (when the item declares a shared
/// gallery group) every item in that group in document order.
#[derive(Debug, Clone, Default)]
pub struct OpenRequest {
    pub item: ItemMeta,
    pub hint: Option<TypeHint>,
    /// Shared gallery group id, if the item declares one.
    pub gallery_id: Option<String>,
    /// All items sharing `gallery_id`, in document order (includes `item`).
    pub gallery_items: Vec<ItemMeta>,
    /// An already-resolved in-memory object accompanies the request.
    pub object: bool,
}

impl OpenRequest {
    pub fn for_item(item: ItemMeta) -> Self {
        Self {
            item,
            hint: None,
            gallery_id: None,
            gallery_items: Vec::new(),
            object: false,
        }
    }

    pub fn for_source(source: impl Into<String>) -> Self {
        Self::for_item(ItemMeta::new(source))
    }
}
