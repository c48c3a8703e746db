//! Content sizing: fits the displayed media plus its meta region into the
//! viewport, honoring minimum floors and orientation.

use crate::models::NaturalSize;

/// Window box and session floors the sizer works against.
///
/// `margin` is the doubled (both-sides) reservation; `min_*` are the
/// session-local floors, already lowered to the natural size when the
/// media is smaller than the configured minimum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizingContext {
    pub window_width: f64,
    pub window_height: f64,
    pub padding_vertical: f64,
    pub padding_horizontal: f64,
    pub margin: f64,
    pub is_mobile: bool,
    pub min_width: f64,
    pub min_height: f64,
}

/// Result of a sizing pass: the overlay content box, the media box inside
/// it, and the meta region the fit accounted for.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContentLayout {
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub content_width: f64,
    pub content_height: f64,
    pub media_width: f64,
    pub media_height: f64,
    pub media_margin_top: f64,
    pub media_margin_left: f64,
    pub meta_width: f64,
    pub meta_height: f64,
}

/// Inputs for inline (element/object/iframe) sizing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InlineInputs {
    /// Natural rendered size measured by the renderer, if available.
    pub natural: Option<NaturalSize>,
    pub target_width: Option<f64>,
    pub target_height: Option<f64>,
    /// External page shown in an iframe (Url kind).
    pub is_iframe: bool,
    /// Already-resolved in-memory object (Object kind).
    pub is_object: bool,
}

struct FitBounds {
    image_width: f64,
    image_height: f64,
    ratio_horizontal: f64,
    ratio_vertical: f64,
    is_wide: bool,
    avail_width: f64,
    avail_height: f64,
    min_width: f64,
    min_height: f64,
}

/// Orientation-aware aspect fit.
///
/// Wide media fits to width first and shrinks to height if still over;
/// tall media the reverse. Never exceeds the current image size (both axes
/// snap back together). The minimum floor overrides the fit: the floored
/// axis is pinned and the other re-derived from the ratio, which can push
/// the box past the viewport or leave the derived axis below its own
/// floor. That distortion at the floor is intentional, preserved behavior.
fn fit_image(b: &FitBounds) -> (f64, f64) {
    let mut width;
    let mut height;

    if b.is_wide {
        width = b.avail_width;
        height = width * b.ratio_horizontal;
        if height > b.avail_height {
            height = b.avail_height;
            width = height * b.ratio_vertical;
        }
    } else {
        height = b.avail_height;
        width = height * b.ratio_vertical;
        if width > b.avail_width {
            width = b.avail_width;
            height = width * b.ratio_horizontal;
        }
    }

    if width > b.image_width || height > b.image_height {
        width = b.image_width;
        height = b.image_height;
    }

    if width < b.min_width || height < b.min_height {
        if width < b.min_width {
            width = b.min_width;
            height = width * b.ratio_horizontal;
        } else {
            height = b.min_height;
            width = height * b.ratio_vertical;
        }
    }

    (width, height)
}

/// Sizes an image to fit the viewport.
///
/// Bounded two-pass fixed-point iteration. Pass 0 estimates with the
/// natural size and no meta region; once the width is fixed the caption
/// can wrap differently, so pass 1 re-measures the actual meta height via
/// `measure_meta` and refines the fit. Terminates after at most two passes
/// or as soon as the content fits the viewport.
pub fn size_image(
    ctx: &SizingContext,
    natural: NaturalSize,
    measure_meta: &mut dyn FnMut(f64) -> f64,
) -> ContentLayout {
    let natural = NaturalSize::new(natural.width.max(1.0), natural.height.max(1.0));

    let window_height = ctx.window_height - ctx.padding_vertical;
    let window_width = ctx.window_width - ctx.padding_horizontal;
    let mut viewport_height = window_height;
    let mut viewport_width = window_width;

    let mut content_height = f64::INFINITY;
    let mut content_width = f64::INFINITY;
    let mut media_margin_top = 0.0;
    let mut media_margin_left = 0.0;
    let mut meta_height = 0.0;

    let ratio_horizontal = natural.height / natural.width;
    let ratio_vertical = natural.width / natural.height;
    let is_wide = natural.width > natural.height;
    let min_width = ctx.min_width.min(natural.width);
    let min_height = ctx.min_height.min(natural.height);

    let mut target_width = natural.width;
    let mut target_height = natural.height;
    let mut pass = 0;

    while content_height > viewport_height && pass < 2 {
        let image_width = if pass == 0 { natural.width } else { target_width };
        let image_height = if pass == 0 { natural.height } else { target_height };
        if pass == 0 {
            meta_height = 0.0;
        }

        if ctx.is_mobile {
            // Meta wraps at the full window width before the fit.
            meta_height = measure_meta(window_width);

            content_height = viewport_height - ctx.padding_vertical;
            content_width = viewport_width - ctx.padding_horizontal;

            let (width, height) = fit_image(&FitBounds {
                image_width,
                image_height,
                ratio_horizontal,
                ratio_vertical,
                is_wide,
                avail_width: content_width,
                avail_height: content_height - meta_height,
                min_width,
                min_height,
            });
            target_width = width;
            target_height = height;

            media_margin_top = (content_height - target_height - meta_height) / 2.0;
            media_margin_left = (content_width - target_width) / 2.0;
        } else {
            // Viewport matches the window less margin, padding and meta.
            if pass == 0 {
                viewport_height -= ctx.margin + ctx.padding_vertical;
                viewport_width -= ctx.margin + ctx.padding_horizontal;
            }
            viewport_height -= meta_height;

            let (width, height) = fit_image(&FitBounds {
                image_width,
                image_height,
                ratio_horizontal,
                ratio_vertical,
                is_wide,
                avail_width: viewport_width,
                avail_height: viewport_height,
                min_width,
                min_height,
            });
            target_width = width;
            target_height = height;

            content_height = target_height;
            content_width = target_width;

            meta_height = measure_meta(content_width);
            content_height += meta_height;
        }

        pass += 1;
    }

    ContentLayout {
        viewport_width,
        viewport_height,
        content_width,
        content_height,
        media_width: target_width,
        media_height: target_height,
        media_margin_top,
        media_margin_left,
        meta_width: content_width,
        meta_height,
    }
}

/// Sizes a video embed.
///
/// Desktop: the configured preferred width clamped to the viewport and
/// raised to the minimum floor, height derived from the configured ratio.
/// Mobile: width fills the viewport, height derived then clamped to the
/// space left after the meta region, recomputing width from the clamped
/// height; the box is centered in the remainder.
pub fn size_video(
    ctx: &SizingContext,
    video_width: f64,
    video_ratio: f64,
    measure_meta: &mut dyn FnMut(f64) -> f64,
) -> ContentLayout {
    let window_height = ctx.window_height - ctx.padding_vertical;
    let window_width = ctx.window_width - ctx.padding_horizontal;
    let mut viewport_height = window_height;
    let mut viewport_width = window_width;
    let mut content_height = window_height;
    let mut content_width = window_width;
    let mut media_margin_top = 0.0;
    let mut media_margin_left = 0.0;
    let mut meta_height = 0.0;

    let target_width;
    let target_height;

    if ctx.is_mobile {
        meta_height = measure_meta(window_width);
        viewport_height -= meta_height;

        let mut width = viewport_width;
        let mut height = width * video_ratio;
        if height > viewport_height {
            height = viewport_height;
            width = height / video_ratio;
        }
        target_width = width;
        target_height = height;

        media_margin_top = (viewport_height - target_height) / 2.0;
        media_margin_left = (viewport_width - target_width) / 2.0;
    } else {
        viewport_height = window_height - ctx.margin;
        viewport_width = window_width - ctx.margin;

        let mut width = if video_width > viewport_width {
            viewport_width
        } else {
            video_width
        };
        if width < ctx.min_width {
            width = ctx.min_width;
        }
        target_width = width;
        target_height = width * video_ratio;

        content_width = target_width;
        meta_height = measure_meta(content_width);
        content_height = target_height + meta_height;
    }

    ContentLayout {
        viewport_width,
        viewport_height,
        content_width,
        content_height,
        media_width: target_width,
        media_height: target_height,
        media_margin_top,
        media_margin_left,
        meta_width: content_width,
        meta_height,
    }
}

/// Sizes inline content (element, object, or iframe).
///
/// Explicit overrides win; iframes and mobile fall back to the full
/// window; otherwise the natural rendered size is used. Iframes and
/// objects on mobile always fill the window; everything else is clamped
/// to not exceed it.
pub fn size_inline(ctx: &SizingContext, inputs: &InlineInputs) -> ContentLayout {
    let mut window_height = ctx.window_height - ctx.padding_vertical;
    let mut window_width = ctx.window_width - ctx.padding_horizontal;

    if !ctx.is_mobile {
        window_height -= ctx.margin;
        window_width -= ctx.margin;
    }

    let object_height = inputs.natural.map(|n| n.height).unwrap_or(0.0);
    let object_width = inputs.natural.map(|n| n.width).unwrap_or(0.0);
    let fill = inputs.is_iframe || ctx.is_mobile;

    let mut content_height = inputs
        .target_height
        .unwrap_or(if fill { window_height } else { object_height });
    let mut content_width = inputs
        .target_width
        .unwrap_or(if fill { window_width } else { object_width });

    if (inputs.is_iframe || inputs.is_object) && ctx.is_mobile {
        content_height = window_height;
        content_width = window_width;
    } else {
        // Declared and natural sizes never exceed the viewport.
        content_height = content_height.min(window_height);
        content_width = content_width.min(window_width);
    }

    ContentLayout {
        viewport_width: window_width,
        viewport_height: window_height,
        content_width,
        content_height,
        media_width: content_width,
        media_height: content_height,
        media_margin_top: 0.0,
        media_margin_left: 0.0,
        meta_width: content_width,
        meta_height: 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desktop_ctx() -> SizingContext {
        SizingContext {
            window_width: 1000.0,
            window_height: 800.0,
            padding_vertical: 0.0,
            padding_horizontal: 0.0,
            margin: 100.0,
            is_mobile: false,
            min_width: 100.0,
            min_height: 100.0,
        }
    }

    fn no_meta() -> impl FnMut(f64) -> f64 {
        |_| 0.0
    }

    #[test]
    fn image_never_upscales_past_natural() {
        let layout = size_image(
            &desktop_ctx(),
            NaturalSize::new(800.0, 600.0),
            &mut no_meta(),
        );
        assert_eq!(layout.media_width, 800.0);
        assert_eq!(layout.media_height, 600.0);
        assert!(layout.content_width <= 900.0);
    }

    #[test]
    fn wide_image_fits_width_then_height() {
        // Natural 3000x1500 in a 900x700 viewport: width-fit gives 450 of
        // height, already under the cap.
        let layout = size_image(
            &desktop_ctx(),
            NaturalSize::new(3000.0, 1500.0),
            &mut no_meta(),
        );
        assert_eq!(layout.media_width, 900.0);
        assert_eq!(layout.media_height, 450.0);
        let ratio = layout.media_width / layout.media_height;
        assert!((ratio - 2.0).abs() < 1e-9);
    }

    #[test]
    fn tall_image_fits_height_then_width() {
        let layout = size_image(
            &desktop_ctx(),
            NaturalSize::new(1000.0, 2000.0),
            &mut no_meta(),
        );
        assert_eq!(layout.media_height, 700.0);
        assert_eq!(layout.media_width, 350.0);
    }

    #[test]
    fn minimum_floor_overrides_viewport_fit() {
        let ctx = SizingContext {
            window_width: 320.0,
            window_height: 480.0,
            min_width: 300.0,
            min_height: 100.0,
            ..desktop_ctx()
        };
        // Viewport is 220x380 after the margin; width-fit would give 220,
        // below the 300 floor, so the floor wins and the height re-derives.
        let layout = size_image(&ctx, NaturalSize::new(2000.0, 1500.0), &mut no_meta());
        assert_eq!(layout.media_width, 300.0);
        assert_eq!(layout.media_height, 225.0);
        assert!(layout.media_width > layout.viewport_width);
    }

    #[test]
    fn floor_lowered_to_natural_for_small_images() {
        let layout = size_image(
            &desktop_ctx(),
            NaturalSize::new(64.0, 48.0),
            &mut no_meta(),
        );
        assert_eq!(layout.media_width, 64.0);
        assert_eq!(layout.media_height, 48.0);
    }

    #[test]
    fn second_pass_refits_under_meta_feedback() {
        // A 150px meta pushes pass 0 over the 700px viewport; pass 1
        // subtracts it and height-fits the image into the remainder.
        let mut meta = |_w: f64| 150.0;
        let layout = size_image(&desktop_ctx(), NaturalSize::new(800.0, 600.0), &mut meta);
        assert_eq!(layout.media_height, 550.0);
        let expected_width = 550.0 * (800.0 / 600.0);
        assert!((layout.media_width - expected_width).abs() < 1e-6);
        assert_eq!(layout.content_height, 550.0 + 150.0);
    }

    #[test]
    fn image_bounds_hold_across_viewports() {
        let natural = NaturalSize::new(1600.0, 1200.0);
        for (w, h) in [
            (320.0, 480.0),
            (768.0, 1024.0),
            (1280.0, 720.0),
            (1920.0, 1080.0),
            (2560.0, 1440.0),
        ] {
            let ctx = SizingContext {
                window_width: w,
                window_height: h,
                ..desktop_ctx()
            };
            let layout = size_image(&ctx, natural, &mut no_meta());
            assert!(layout.media_width <= natural.width, "viewport {w}x{h}");
            assert!(layout.media_height <= natural.height, "viewport {w}x{h}");
            assert!(layout.media_width >= ctx.min_width, "viewport {w}x{h}");
            assert!(layout.media_height >= ctx.min_height, "viewport {w}x{h}");
        }
    }

    #[test]
    fn mobile_image_centers_in_remainder() {
        let ctx = SizingContext {
            window_width: 400.0,
            window_height: 700.0,
            is_mobile: true,
            ..desktop_ctx()
        };
        let mut meta = |_w: f64| 60.0;
        let layout = size_image(&ctx, NaturalSize::new(800.0, 600.0), &mut meta);
        assert_eq!(layout.media_width, 400.0);
        assert_eq!(layout.media_height, 300.0);
        assert_eq!(
            layout.media_margin_top,
            (700.0 - 300.0 - 60.0) / 2.0
        );
        assert_eq!(layout.media_margin_left, 0.0);
    }

    #[test]
    fn video_uses_preferred_width_on_desktop() {
        let layout = size_video(&desktop_ctx(), 600.0, 0.5625, &mut no_meta());
        assert_eq!(layout.media_width, 600.0);
        assert_eq!(layout.media_height, 337.5);
        assert_eq!(layout.content_height, 337.5);
    }

    #[test]
    fn video_clamps_to_viewport_then_floor() {
        let narrow = SizingContext {
            window_width: 500.0,
            ..desktop_ctx()
        };
        let layout = size_video(&narrow, 600.0, 0.5625, &mut no_meta());
        assert_eq!(layout.media_width, 400.0);

        let floored = SizingContext {
            min_width: 450.0,
            ..narrow
        };
        let layout = size_video(&floored, 600.0, 0.5625, &mut no_meta());
        assert_eq!(layout.media_width, 450.0);
    }

    #[test]
    fn mobile_video_fills_width_and_clamps_height() {
        let ctx = SizingContext {
            window_width: 400.0,
            window_height: 300.0,
            is_mobile: true,
            ..desktop_ctx()
        };
        let mut meta = |_w: f64| 50.0;
        // Width-fill wants 400x225 but only 250 of height remain; height
        // clamps and width re-derives.
        let layout = size_video(&ctx, 600.0, 0.5625, &mut meta);
        assert_eq!(layout.media_height, 225.0);
        assert_eq!(layout.media_width, 400.0);

        let squat = SizingContext {
            window_height: 200.0,
            ..ctx
        };
        let layout = size_video(&squat, 600.0, 0.5625, &mut meta);
        assert_eq!(layout.media_height, 150.0);
        assert!((layout.media_width - 150.0 / 0.5625).abs() < 1e-9);
    }

    #[test]
    fn inline_prefers_explicit_override() {
        let layout = size_inline(
            &desktop_ctx(),
            &InlineInputs {
                natural: Some(NaturalSize::new(500.0, 400.0)),
                target_width: Some(320.0),
                target_height: Some(240.0),
                ..InlineInputs::default()
            },
        );
        assert_eq!(layout.content_width, 320.0);
        assert_eq!(layout.content_height, 240.0);
    }

    #[test]
    fn inline_iframe_fills_window() {
        let layout = size_inline(
            &desktop_ctx(),
            &InlineInputs {
                is_iframe: true,
                ..InlineInputs::default()
            },
        );
        assert_eq!(layout.content_width, 900.0);
        assert_eq!(layout.content_height, 700.0);
    }

    #[test]
    fn inline_object_clamps_to_window() {
        let layout = size_inline(
            &desktop_ctx(),
            &InlineInputs {
                natural: Some(NaturalSize::new(5000.0, 300.0)),
                is_object: true,
                ..InlineInputs::default()
            },
        );
        assert_eq!(layout.content_width, 900.0);
        assert_eq!(layout.content_height, 300.0);
    }

    #[test]
    fn inline_element_never_exceeds_window() {
        let layout = size_inline(
            &desktop_ctx(),
            &InlineInputs {
                natural: Some(NaturalSize::new(400.0, 1200.0)),
                ..InlineInputs::default()
            },
        );
        assert_eq!(layout.content_width, 400.0);
        assert_eq!(layout.content_height, 700.0);
    }

    #[test]
    fn inline_object_on_mobile_is_full_bleed() {
        let ctx = SizingContext {
            is_mobile: true,
            ..desktop_ctx()
        };
        let layout = size_inline(
            &ctx,
            &InlineInputs {
                natural: Some(NaturalSize::new(200.0, 100.0)),
                is_object: true,
                ..InlineInputs::default()
            },
        );
        assert_eq!(layout.content_width, 1000.0);
        assert_eq!(layout.content_height, 800.0);
    }
}
