use std::fmt;
use std::rc::Rc;

use once_cell::sync::Lazy;

use crate::models::ItemMeta;

/// Image-classification allowlist used when no explicit hint is present.
static DEFAULT_EXTENSIONS: Lazy<Vec<String>> = Lazy::new(|| {
    ["jpg", "sjpg", "jpeg", "png", "gif"]
        .iter()
        .map(|e| e.to_string())
        .collect()
});

/// Display strings for the rendered controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    pub close: String,
    pub count: String,
    pub next: String,
    pub previous: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            close: "Close".into(),
            count: "of".into(),
            next: "Next".into(),
            previous: "Previous".into(),
        }
    }
}

/// Caption producer invoked with the active item.
pub type CaptionFormatter = Rc<dyn Fn(&ItemMeta) -> String>;

/// Configuration for the lightbox engine, merged over these defaults by
/// the host and validated once at `open()`.
#[derive(Clone)]
pub struct Options {
    /// Styling hook passed through to the renderer.
    pub custom_class: String,
    /// Image type extensions (default: jpg, sjpg, jpeg, png, gif).
    pub extensions: Vec<String>,
    /// Fixed positioning instead of absolute (default: false).
    pub fixed: bool,
    /// Caption format function; `None` falls back to the trimmed title.
    pub formatter: Option<CaptionFormatter>,
    pub labels: Labels,
    /// Single-side margin used when sizing (default: 50). Doubled at
    /// session creation for the symmetric reservation.
    pub margin: f64,
    /// Minimum height of the modal (default: 100).
    pub min_height: f64,
    /// Minimum width of the modal (default: 100).
    pub min_width: f64,
    /// Force "mobile" rendering (default: false).
    pub mobile: bool,
    /// Halve natural image dimensions (default: false).
    pub retina: bool,
    /// GET variable appended to URL-type sources (default: "boxer").
    pub request_key: String,
    /// Target top position; overrides vertical centering when > 0.
    pub top: f64,
    /// Video height / width ratio (default: 9/16 = 0.5625).
    pub video_ratio: f64,
    /// Video target width (default: 600).
    pub video_width: f64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            custom_class: String::new(),
            extensions: DEFAULT_EXTENSIONS.clone(),
            fixed: false,
            formatter: None,
            labels: Labels::default(),
            margin: 50.0,
            min_height: 100.0,
            min_width: 100.0,
            mobile: false,
            retina: false,
            request_key: "boxer".into(),
            top: 0.0,
            video_ratio: 0.5625,
            video_width: 600.0,
        }
    }
}

impl Options {
    /// Validates the merged options in place, falling back to defaults for
    /// values that cannot be sized against (non-finite or negative
    /// dimensions, a non-positive video ratio, mixed-case extensions).
    pub fn validate(&mut self) {
        let defaults = Options::default();
        if !self.margin.is_finite() || self.margin < 0.0 {
            self.margin = defaults.margin;
        }
        if !self.min_height.is_finite() || self.min_height < 0.0 {
            self.min_height = defaults.min_height;
        }
        if !self.min_width.is_finite() || self.min_width < 0.0 {
            self.min_width = defaults.min_width;
        }
        if !self.video_ratio.is_finite() || self.video_ratio <= 0.0 {
            self.video_ratio = defaults.video_ratio;
        }
        if !self.video_width.is_finite() || self.video_width <= 0.0 {
            self.video_width = defaults.video_width;
        }
        if !self.top.is_finite() {
            self.top = defaults.top;
        }
        for ext in &mut self.extensions {
            *ext = ext.to_lowercase();
        }
    }

    /// Produces the caption for `item` via the configured formatter, or the
    /// trimmed title when no formatter is set.
    pub fn caption_for(&self, item: &ItemMeta) -> String {
        match &self.formatter {
            Some(formatter) => formatter(item),
            None => item
                .title
                .as_deref()
                .map(str::trim)
                .unwrap_or("")
                .to_string(),
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("custom_class", &self.custom_class)
            .field("extensions", &self.extensions)
            .field("fixed", &self.fixed)
            .field("formatter", &self.formatter.as_ref().map(|_| "<fn>"))
            .field("labels", &self.labels)
            .field("margin", &self.margin)
            .field("min_height", &self.min_height)
            .field("min_width", &self.min_width)
            .field("mobile", &self.mobile)
            .field("retina", &self.retina)
            .field("request_key", &self.request_key)
            .field("top", &self.top)
            .field("video_ratio", &self.video_ratio)
            .field("video_width", &self.video_width)
            .finish()
    }
}
