use crate::gallery::GalleryNavigator;
use crate::gesture::GestureTracker;
use crate::models::item::{ContentKind, ItemMeta, NaturalSize};

/// Lifecycle phase of the active session. `Closed` is represented by the
/// absence of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Opening,
    Open,
    Closing,
}

/// Box metrics for the overlay and its content region.
///
/// `margin` is the doubled (both-sides) reservation; `previous_*` track the
/// last applied content size so an unchanged reveal can resolve inline.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Geometry {
    pub viewport_height: f64,
    pub viewport_width: f64,
    pub content_height: f64,
    pub content_width: f64,
    pub padding_vertical: f64,
    pub padding_horizontal: f64,
    pub margin: f64,
    pub meta_height: f64,
    pub previous_content_height: f64,
    pub previous_content_width: f64,
}

/// The single in-memory record of the currently open modal.
///
/// Created and dropped only by the controller; collaborating components
/// write only the fields they own (sizer: geometry, navigator: gallery,
/// tracker: gesture).
#[derive(Debug)]
pub struct Session {
    pub kind: ContentKind,
    pub phase: Phase,
    pub visible: bool,
    pub is_animating: bool,
    pub is_mobile: bool,
    pub geometry: Geometry,
    pub gallery: Option<GalleryNavigator>,
    pub gesture: Option<GestureTracker>,
    /// The item currently displayed (swapped on gallery navigation).
    pub item: ItemMeta,
    /// Natural media dimensions once acquisition succeeds (retina-adjusted).
    pub natural: Option<NaturalSize>,
    /// Session-local floors; lowered to the natural size when the media is
    /// smaller than the configured minimum.
    pub min_height: f64,
    pub min_width: f64,
    /// Explicit size overrides from `resize()`; consumed by inline sizing.
    pub target_height: Option<f64>,
    pub target_width: Option<f64>,
    /// Measured height of the previous/next controls, for vertical centering.
    pub control_height: f64,
}

impl Session {
    /// Lower the session floors to the natural size when the media is
    /// smaller than the configured minimum, so small images are not
    /// inflated to the floor.
    pub fn absorb_natural_minimums(&mut self, natural: NaturalSize) {
        if natural.height < self.min_height {
            self.min_height = natural.height;
        }
        if natural.width < self.min_width {
            self.min_width = natural.width;
        }
    }

    pub fn gallery_active(&self) -> bool {
        self.gallery.is_some()
    }
}
