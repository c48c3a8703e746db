/// Overlay placement in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub top: f64,
    pub left: f64,
}

/// Inputs for placement: current window box and scroll offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionContext {
    pub window_width: f64,
    pub window_height: f64,
    pub scroll_top: f64,
    pub is_mobile: bool,
    pub fixed: bool,
    /// Explicit top override; > 0 replaces vertical centering.
    pub top_override: f64,
}

/// Computes overlay placement.
///
/// Mobile is always full-screen at the origin. Desktop centers
/// horizontally and vertically (or uses the configured top verbatim), and
/// follows the scroll offset unless the overlay is fixed-positioned.
pub fn overlay_position(
    ctx: PositionContext,
    content_width: f64,
    content_height: f64,
    padding_horizontal: f64,
    padding_vertical: f64,
) -> Position {
    if ctx.is_mobile {
        return Position { top: 0.0, left: 0.0 };
    }

    let left = (ctx.window_width - content_width - padding_horizontal) / 2.0;
    let mut top = if ctx.top_override <= 0.0 {
        (ctx.window_height - content_height - padding_vertical) / 2.0
    } else {
        ctx.top_override
    };

    if !ctx.fixed {
        top += ctx.scroll_top;
    }

    Position { top, left }
}
