//! Top-level lifecycle state machine. Owns the single active session,
//! classifies open requests, and orchestrates sizing, navigation, and
//! teardown through the host collaborators.
//!
//! Every async completion (media load, transition, timer) re-enters here
//! carrying a generation token; completions whose generation no longer
//! matches the live session are discarded before any state is touched.

use crate::classify::{classify, classify_gallery_source};
use crate::config::Options;
use crate::error::LightboxError;
use crate::events::{
    Direction, InputEvent, Key, LoadToken, Notification, TimerKind, Transition, TransitionToken,
};
use crate::gallery::GalleryNavigator;
use crate::gesture::{GestureOutcome, GestureTracker};
use crate::host::{AnimationRunner, EventBus, MediaLoader, Renderer, SurfaceSpec, Timers};
use crate::layout::{
    overlay_position, size_image, size_inline, size_video, InlineInputs, PositionContext,
    SizingContext,
};
use crate::models::{ContentKind, Geometry, NaturalSize, OpenRequest, Phase, Session};

/// Debounce before re-sizing after a window resize.
const RESIZE_DEBOUNCE_MS: u64 = 150;
/// Fallback that synthesizes a touch-end when the event stream stalls.
const TOUCH_FALLBACK_MS: u64 = 300;
/// Swipe settle animation hold.
const SETTLE_MS: u64 = 250;

/// What `open` did with the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    /// A session was created and is now opening.
    Opened,
    /// A session is already active; the request was ignored and the
    /// triggering action must not be suppressed.
    AlreadyActive,
    /// Nothing recognized the source; the triggering action must not be
    /// suppressed.
    Rejected,
}

/// The lightbox engine. One per overlay surface; holds at most one
/// session at a time.
pub struct Lightbox {
    options: Options,
    renderer: Box<dyn Renderer>,
    loader: Box<dyn MediaLoader>,
    animator: Box<dyn AnimationRunner>,
    timers: Box<dyn Timers>,
    bus: Box<dyn EventBus>,
    session: Option<Session>,
    /// Bumped on open, gallery swap, and close; stale completions carry an
    /// older value and are discarded.
    generation: u64,
}

impl Lightbox {
    pub fn new(
        options: Options,
        renderer: Box<dyn Renderer>,
        loader: Box<dyn MediaLoader>,
        animator: Box<dyn AnimationRunner>,
        timers: Box<dyn Timers>,
        bus: Box<dyn EventBus>,
    ) -> Self {
        Self {
            options,
            renderer,
            loader,
            animator,
            timers,
            bus,
            session: None,
            generation: 0,
        }
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Opens the overlay for `request`.
    ///
    /// No-op while a session exists; rejected when classification fails.
    /// Both non-`Opened` outcomes mean the host keeps its default action.
    pub fn open(&mut self, request: OpenRequest) -> OpenOutcome {
        if self.session.is_some() {
            tracing::debug!("open ignored, a session is already active");
            return OpenOutcome::AlreadyActive;
        }

        self.options.validate();

        let Some(classified) = classify(&request, &self.options.extensions) else {
            tracing::debug!(
                source = %request.item.source,
                "open rejected: {}",
                LightboxError::ClassificationRejected
            );
            return OpenOutcome::Rejected;
        };

        let window = self.renderer.window();
        let is_mobile = self.options.mobile || window.is_mobile;

        let gallery = match (&request.gallery_id, classified.kind) {
            (Some(id), ContentKind::Image | ContentKind::Video) => {
                let navigator = GalleryNavigator::build(
                    id.clone(),
                    request.gallery_items.clone(),
                    &request.item.source,
                );
                if navigator.is_none() {
                    tracing::debug!(
                        group = %id,
                        "gallery disabled: {}",
                        LightboxError::GalleryMalformed
                    );
                }
                navigator
            }
            _ => None,
        };

        let mut item = request.item;
        // Element references display the fragment, not the raw href.
        item.source = classified.source;

        let caption = self.options.caption_for(&item);
        let metrics = self.renderer.mount(&SurfaceSpec {
            kind: classified.kind,
            custom_class: &self.options.custom_class,
            fixed: self.options.fixed,
            mobile: is_mobile,
            labels: &self.options.labels,
            caption: &caption,
            gallery_position: gallery.as_ref().map(|g| g.position_display()),
        });

        self.generation = self.generation.wrapping_add(1);

        let session = Session {
            kind: classified.kind,
            phase: Phase::Opening,
            visible: false,
            is_animating: true,
            is_mobile,
            geometry: Geometry {
                content_height: metrics.initial_height - metrics.padding_vertical,
                content_width: metrics.initial_width - metrics.padding_horizontal,
                padding_vertical: metrics.padding_vertical,
                padding_horizontal: metrics.padding_horizontal,
                margin: self.options.margin * 2.0,
                ..Geometry::default()
            },
            gallery,
            gesture: None,
            item,
            natural: None,
            min_height: self.options.min_height,
            min_width: self.options.min_width,
            target_height: None,
            target_width: None,
            control_height: metrics.control_height,
        };

        let position = overlay_position(
            PositionContext {
                window_width: window.width,
                window_height: window.height,
                scroll_top: window.scroll_top,
                is_mobile: session.is_mobile,
                fixed: self.options.fixed,
                top_override: self.options.top,
            },
            session.geometry.content_width,
            session.geometry.content_height,
            session.geometry.padding_horizontal,
            session.geometry.padding_vertical,
        );
        self.renderer.apply_position(position);

        if let Some(navigator) = &session.gallery {
            let controls = navigator.controls();
            self.renderer
                .set_control_state(controls.previous_enabled, controls.next_enabled);
        }

        tracing::info!(kind = ?session.kind, source = %session.item.source, "lightbox opening");
        self.session = Some(session);

        self.animator.run(
            Transition::FadeIn,
            TransitionToken {
                transition: Transition::FadeIn,
                generation: self.generation,
            },
        );

        OpenOutcome::Opened
    }

    /// Closes the active session. Idempotent: repeated calls while closing
    /// (or with nothing open) are no-ops.
    pub fn close(&mut self) {
        let Some(session) = self.session.as_mut() else {
            tracing::debug!("close ignored, nothing open");
            return;
        };
        if session.phase == Phase::Closing {
            tracing::debug!("close ignored, already closing");
            return;
        }

        session.phase = Phase::Closing;
        session.is_animating = true;
        session.gesture = None;

        self.timers.cancel(TimerKind::ResizeDebounce);
        self.timers.cancel(TimerKind::TouchFallback);
        self.timers.cancel(TimerKind::SwipeSettle);

        // Invalidate any in-flight acquisition before the fade-out.
        self.generation = self.generation.wrapping_add(1);

        tracing::info!("lightbox closing");
        self.animator.run(
            Transition::FadeOut,
            TransitionToken {
                transition: Transition::FadeOut,
                generation: self.generation,
            },
        );
    }

    /// Re-runs the sizing algorithm for the current kind, optionally
    /// overriding the target dimensions. Kind and gallery index are never
    /// altered here.
    pub fn resize(&mut self, height: Option<f64>, width: Option<f64>) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.phase != Phase::Open {
            return;
        }
        session.target_height = height;
        session.target_width = width;
        self.size_and_apply();
    }

    /// Host-delivered input.
    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::CloseRequested => self.close(),
            InputEvent::Control(direction) => self.advance(direction),
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::WindowResized => {
                if self.session.is_some() {
                    self.timers
                        .start(TimerKind::ResizeDebounce, RESIZE_DEBOUNCE_MS);
                }
            }
            InputEvent::TouchStart { x } => self.gesture_start(x),
            InputEvent::TouchMove { x } => self.gesture_move(x),
            InputEvent::TouchEnd => self.gesture_end(),
        }
    }

    /// Media acquisition completion. Stale tokens are discarded.
    pub fn media_loaded(&mut self, token: LoadToken, result: Result<NaturalSize, LightboxError>) {
        if self.session.is_none() || token.generation != self.generation {
            tracing::debug!(?token, "stale load completion discarded");
            return;
        }

        match result {
            Ok(natural) => self.apply_natural_size(natural),
            Err(error) => {
                tracing::warn!(%error, "media acquisition failed, showing placeholder");
                self.downgrade_to_placeholder();
            }
        }
    }

    /// Transition completion. Stale tokens are discarded.
    pub fn transition_done(&mut self, token: TransitionToken) {
        if self.session.is_none() || token.generation != self.generation {
            tracing::debug!(?token, "stale transition completion discarded");
            return;
        }

        match token.transition {
            Transition::FadeIn => self.begin_acquisition(),
            Transition::Reveal => self.finish_open(),
            Transition::SwapFade => self.swap_current_item(),
            Transition::FadeOut => self.teardown(),
        }
    }

    /// Timer completion. Timers for an absent session were cancelled late
    /// and are ignored.
    pub fn timer_fired(&mut self, kind: TimerKind) {
        let Some(session) = self.session.as_ref() else {
            tracing::debug!(?kind, "timer for absent session ignored");
            return;
        };
        match kind {
            TimerKind::ResizeDebounce => {
                if session.phase == Phase::Open {
                    self.size_and_apply();
                }
            }
            TimerKind::TouchFallback => self.gesture_end(),
            TimerKind::SwipeSettle => self.renderer.set_swiping(false),
        }
    }

    fn handle_key(&mut self, key: Key) {
        match key {
            Key::Escape => self.close(),
            Key::ArrowLeft | Key::ArrowRight => {
                let gallery_active = self
                    .session
                    .as_ref()
                    .map(Session::gallery_active)
                    .unwrap_or(false);
                if gallery_active {
                    self.advance(match key {
                        Key::ArrowLeft => Direction::Previous,
                        _ => Direction::Next,
                    });
                }
            }
        }
    }

    /// Starts media acquisition once the fade-in lands. Images, videos and
    /// external pages go through the loader; inline content is measured
    /// synchronously by the renderer.
    fn begin_acquisition(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let kind = session.kind;
        let source = session.item.source.clone();

        match kind {
            ContentKind::Image | ContentKind::Video => {
                self.loader.begin(
                    &source,
                    kind,
                    LoadToken {
                        generation: self.generation,
                    },
                );
            }
            ContentKind::Url => {
                let keyed = append_request_key(&source, &self.options.request_key);
                self.loader.begin(
                    &keyed,
                    kind,
                    LoadToken {
                        generation: self.generation,
                    },
                );
            }
            ContentKind::Element | ContentKind::Object => {
                let natural = self.renderer.measure_inline(&source);
                if let Some(session) = self.session.as_mut() {
                    session.natural = natural;
                }
                self.size_and_apply();
                self.reveal_or_finish();
            }
        }
    }

    fn apply_natural_size(&mut self, natural: NaturalSize) {
        let retina = self.options.retina;
        let caption = {
            let Some(session) = self.session.as_mut() else {
                return;
            };
            let mut natural = natural;
            if session.kind == ContentKind::Image && retina {
                natural.width /= 2.0;
                natural.height /= 2.0;
            }
            session.natural = Some(natural);
            if session.kind == ContentKind::Image {
                session.absorb_natural_minimums(natural);
            }
            self.options.caption_for(&session.item)
        };

        // Empty captions collapse instead of reserving meta space.
        self.renderer.set_caption(&caption, !caption.is_empty());
        self.size_and_apply();
        self.reveal_or_finish();
    }

    /// MediaLoadFailed recovery: the session downgrades to an inline error
    /// placeholder and still opens.
    fn downgrade_to_placeholder(&mut self) {
        self.timers.cancel(TimerKind::TouchFallback);
        self.timers.cancel(TimerKind::SwipeSettle);

        let placeholder = self.renderer.show_error_placeholder();
        self.renderer.remove_meta();

        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.kind = ContentKind::Element;
        session.natural = Some(placeholder);
        session.gesture = None;
        session.geometry.meta_height = 0.0;

        self.size_and_apply();
        self.reveal_or_finish();
    }

    /// Runs the sizer for the current kind and pushes geometry + position
    /// to the renderer.
    fn size_and_apply(&mut self) {
        let window = self.renderer.window();
        let (ctx, kind, natural, inline) = {
            let Some(session) = self.session.as_mut() else {
                return;
            };
            // An image without natural dimensions is still loading (a
            // gallery swap cleared them); keep the previous geometry
            // until the new load lands rather than sizing a stand-in.
            if session.kind == ContentKind::Image && session.natural.is_none() {
                return;
            }
            session.geometry.previous_content_height = session.geometry.content_height;
            session.geometry.previous_content_width = session.geometry.content_width;
            let ctx = SizingContext {
                window_width: window.width,
                window_height: window.height,
                padding_vertical: session.geometry.padding_vertical,
                padding_horizontal: session.geometry.padding_horizontal,
                margin: session.geometry.margin,
                is_mobile: session.is_mobile,
                min_width: session.min_width,
                min_height: session.min_height,
            };
            let inline = InlineInputs {
                natural: session.natural,
                target_width: session.target_width.or(session.item.declared_width),
                target_height: session.target_height.or(session.item.declared_height),
                is_iframe: session.kind == ContentKind::Url,
                is_object: session.kind == ContentKind::Object,
            };
            (ctx, session.kind, session.natural, inline)
        };

        let renderer = &mut self.renderer;
        let mut measure = |width: f64| renderer.measure_meta(width);
        let layout = match kind {
            ContentKind::Image => {
                let Some(natural) = natural else { return };
                size_image(&ctx, natural, &mut measure)
            }
            ContentKind::Video => size_video(
                &ctx,
                self.options.video_width,
                self.options.video_ratio,
                &mut measure,
            ),
            ContentKind::Url | ContentKind::Element | ContentKind::Object => {
                size_inline(&ctx, &inline)
            }
        };

        let (position, control_offset) = {
            let Some(session) = self.session.as_mut() else {
                return;
            };
            session.geometry.viewport_height = layout.viewport_height;
            session.geometry.viewport_width = layout.viewport_width;
            session.geometry.content_height = layout.content_height;
            session.geometry.content_width = layout.content_width;
            session.geometry.meta_height = layout.meta_height;

            let control_offset = if session.is_mobile {
                0.0
            } else {
                (layout.content_height - session.control_height - layout.meta_height) / 2.0
            };
            let position = overlay_position(
                PositionContext {
                    window_width: window.width,
                    window_height: window.height,
                    scroll_top: window.scroll_top,
                    is_mobile: session.is_mobile,
                    fixed: self.options.fixed,
                    top_override: self.options.top,
                },
                layout.content_width,
                layout.content_height,
                session.geometry.padding_horizontal,
                session.geometry.padding_vertical,
            );
            (position, control_offset)
        };

        self.renderer.apply_layout(&layout, position, control_offset);
    }

    /// Applied geometry becomes visible either through the reveal
    /// transition or, when nothing changed (or on mobile), immediately.
    fn reveal_or_finish(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let geometry = &session.geometry;
        let changed = geometry.previous_content_height != geometry.content_height
            || geometry.previous_content_width != geometry.content_width;

        if session.is_mobile || !changed {
            self.finish_open();
        } else {
            self.animator.run(
                Transition::Reveal,
                TransitionToken {
                    transition: Transition::Reveal,
                    generation: self.generation,
                },
            );
        }
    }

    fn finish_open(&mut self) {
        let (first_open, prefetch): (bool, Vec<String>) = {
            let Some(session) = self.session.as_mut() else {
                return;
            };
            if session.phase == Phase::Closing {
                return;
            }
            let first_open = session.phase == Phase::Opening;
            session.phase = Phase::Open;
            session.visible = true;
            session.is_animating = false;
            let prefetch = session
                .gallery
                .as_ref()
                .map(|g| {
                    g.prefetch_sources()
                        .into_iter()
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default();
            (first_open, prefetch)
        };

        if first_open {
            tracing::info!("lightbox open");
            self.bus.emit(Notification::Opened);
        }

        for source in prefetch {
            self.loader.prefetch(&source);
        }
    }

    fn advance(&mut self, direction: Direction) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.phase != Phase::Open || session.is_animating {
            tracing::debug!(
                ?direction,
                "{}",
                LightboxError::NavigationBlocked("transition in flight")
            );
            return;
        }
        let Some(gallery) = session.gallery.as_mut() else {
            return;
        };
        if gallery.advance(direction).is_none() {
            tracing::debug!(
                ?direction,
                "{}",
                LightboxError::NavigationBlocked("at gallery bound")
            );
            return;
        }

        session.is_animating = true;
        session.gesture = None;
        self.timers.cancel(TimerKind::TouchFallback);
        self.animator.run(
            Transition::SwapFade,
            TransitionToken {
                transition: Transition::SwapFade,
                generation: self.generation,
            },
        );
    }

    /// The swap fade has landed: exchange the displayed item and start
    /// loading it.
    fn swap_current_item(&mut self) {
        // New acquisition, new generation; anything still in flight for
        // the previous item is now stale.
        self.generation = self.generation.wrapping_add(1);

        let (item, kind, display, controls) = {
            let Some(session) = self.session.as_mut() else {
                return;
            };
            let Some(gallery) = session.gallery.as_ref() else {
                return;
            };
            let item = gallery.current().clone();
            let kind = classify_gallery_source(&item.source);
            let display = gallery.position_display();
            let controls = gallery.controls();
            session.kind = kind;
            session.item = item.clone();
            session.natural = None;
            // Floors are per-item; an earlier small image must not keep
            // them lowered for the swapped-in one.
            session.min_height = self.options.min_height;
            session.min_width = self.options.min_width;
            (item, kind, display, controls)
        };

        let caption = self.options.caption_for(&item);
        self.renderer.set_caption(&caption, !caption.is_empty());
        self.renderer.set_position_display(display.0, display.1);
        self.renderer
            .set_control_state(controls.previous_enabled, controls.next_enabled);
        self.renderer.swap_media(&item.source, kind);

        let index = display.0 - 1;
        tracing::debug!(index, kind = ?kind, "gallery swapped");
        self.loader.begin(
            &item.source,
            kind,
            LoadToken {
                generation: self.generation,
            },
        );
    }

    fn teardown(&mut self) {
        self.renderer.unmount();
        self.session = None;
        tracing::info!("lightbox closed");
        self.bus.emit(Notification::Closed);
    }

    fn gesture_start(&mut self, x: f64) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if !session.is_mobile || session.phase != Phase::Open || session.is_animating {
            return;
        }
        let Some(gallery) = session.gallery.as_ref() else {
            return;
        };
        session.gesture = Some(GestureTracker::start(
            x,
            session.geometry.content_width,
            gallery.index(),
            gallery.total(),
        ));
        self.timers.cancel(TimerKind::TouchFallback);
    }

    fn gesture_move(&mut self, x: f64) {
        let offset = {
            let Some(session) = self.session.as_mut() else {
                return;
            };
            let Some(tracker) = session.gesture.as_mut() else {
                return;
            };
            tracker.track(x)
        };
        self.renderer.set_swipe_offset(offset);
        self.timers.start(TimerKind::TouchFallback, TOUCH_FALLBACK_MS);
    }

    fn gesture_end(&mut self) {
        self.timers.cancel(TimerKind::TouchFallback);

        let (tracker, content_width) = {
            let Some(session) = self.session.as_mut() else {
                return;
            };
            let Some(tracker) = session.gesture.take() else {
                return;
            };
            (tracker, session.geometry.content_width)
        };
        if !tracker.moved() {
            return;
        }

        self.renderer.set_swiping(true);
        match tracker.finish() {
            GestureOutcome::Commit(direction) => {
                let offscreen = match direction {
                    Direction::Previous => content_width,
                    Direction::Next => -content_width,
                };
                self.renderer.set_swipe_offset(offscreen);
                self.advance(direction);
            }
            GestureOutcome::Revert => self.renderer.set_swipe_offset(0.0),
        }
        self.timers.start(TimerKind::SwipeSettle, SETTLE_MS);
    }
}

/// Appends the configured request-key marker to a URL-type source so the
/// target page can detect the embedded load.
fn append_request_key(source: &str, key: &str) -> String {
    if source.contains('?') {
        format!("{source}&{key}=true")
    } else {
        format!("{source}?{key}=true")
    }
}
