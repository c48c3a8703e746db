//! Collaborator interfaces supplied by the host. The engine computes; the
//! host renders, fetches, animates, and keeps time.

use crate::config::Labels;
use crate::events::{LoadToken, Notification, TimerKind, Transition, TransitionToken};
use crate::layout::{ContentLayout, Position};
use crate::models::{ContentKind, NaturalSize};

/// Window environment as the host currently sees it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WindowMetrics {
    pub width: f64,
    pub height: f64,
    pub scroll_top: f64,
    /// Host-detected mobile environment; ORed with `options.mobile`.
    pub is_mobile: bool,
}

/// Box metrics the renderer measures right after mounting the surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceMetrics {
    /// Vertical padding of the overlay box (mobile: half the close control).
    pub padding_vertical: f64,
    pub padding_horizontal: f64,
    /// Outer size of the freshly mounted, still-loading box.
    pub initial_height: f64,
    pub initial_width: f64,
    /// Height of a previous/next control, for vertical centering.
    pub control_height: f64,
}

/// Everything the renderer needs to materialize the overlay tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSpec<'a> {
    pub kind: ContentKind,
    pub custom_class: &'a str,
    pub fixed: bool,
    pub mobile: bool,
    pub labels: &'a Labels,
    pub caption: &'a str,
    /// One-based (current, count) when a gallery is active.
    pub gallery_position: Option<(usize, usize)>,
}

/// Materializes and maintains the overlay surface. All methods are plain
/// synchronous DOM/style work; nothing here may call back into the engine.
pub trait Renderer {
    /// Builds the overlay tree and reports its measured metrics.
    fn mount(&mut self, spec: &SurfaceSpec<'_>) -> SurfaceMetrics;

    fn window(&self) -> WindowMetrics;

    /// Measured meta-region height when laid out at `width`.
    fn measure_meta(&mut self, width: f64) -> f64;

    /// Natural rendered size of inline content (element clone or supplied
    /// object), if it can be measured.
    fn measure_inline(&mut self, source: &str) -> Option<NaturalSize>;

    /// Applies content geometry, overlay position, and the vertical offset
    /// centering the gallery controls.
    fn apply_layout(&mut self, layout: &ContentLayout, position: Position, control_offset: f64);

    /// Re-centers the still-loading box (position only, no geometry).
    fn apply_position(&mut self, position: Position);

    fn set_caption(&mut self, caption: &str, visible: bool);

    /// One-based numeric position display.
    fn set_position_display(&mut self, current: usize, total: usize);

    fn set_control_state(&mut self, previous_enabled: bool, next_enabled: bool);

    /// Attaches the media for `source` to the content region, replacing
    /// whatever was displayed before (gallery swap).
    fn swap_media(&mut self, source: &str, kind: ContentKind);

    /// Live horizontal translation during a swipe.
    fn set_swipe_offset(&mut self, offset: f64);

    /// Toggles the swipe settle animation state.
    fn set_swiping(&mut self, animating: bool);

    /// Replaces the content with the fixed error placeholder and returns
    /// its rendered size.
    fn show_error_placeholder(&mut self) -> NaturalSize;

    /// Drops the meta region (load-failure downgrade).
    fn remove_meta(&mut self);

    /// Destroys the overlay tree and releases everything mounted.
    fn unmount(&mut self);
}

/// Resolves a source reference to natural dimensions, asynchronously. The
/// completion must be delivered back through `Lightbox::media_loaded` with
/// the same token.
pub trait MediaLoader {
    fn begin(&mut self, source: &str, kind: ContentKind, token: LoadToken);

    /// Best-effort cache warming; outcome is ignored.
    fn prefetch(&mut self, source: &str);
}

/// Runs a named transition and delivers its completion exactly once via
/// `Lightbox::transition_done`.
pub trait AnimationRunner {
    fn run(&mut self, transition: Transition, token: TransitionToken);
}

/// Named one-shot timers. `start` restarts the timer when it is already
/// running; completions arrive through `Lightbox::timer_fired`.
pub trait Timers {
    fn start(&mut self, kind: TimerKind, delay_ms: u64);
    fn cancel(&mut self, kind: TimerKind);
}

/// Process-wide notification bus.
pub trait EventBus {
    fn emit(&mut self, notification: Notification);
}
