//! Typed events exchanged with the host: inputs delivered into the
//! controller, tokens carried by async completions, and the notifications
//! published on the bus.

/// Gallery travel direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// Keys the engine reacts to. Everything else stays with the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Escape,
}

/// Host-delivered input, already stripped of DOM plumbing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Overlay or close-control activation.
    CloseRequested,
    /// Previous/next control activation.
    Control(Direction),
    Key(Key),
    /// Window geometry changed; debounced before re-sizing.
    WindowResized,
    TouchStart { x: f64 },
    TouchMove { x: f64 },
    TouchEnd,
}

/// Timers owned by the session. Cancelled on every exit path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    ResizeDebounce,
    /// Synthesizes a touch-end when the event stream stalls mid-gesture.
    TouchFallback,
    /// Holds the swipe settle animation before returning to idle.
    SwipeSettle,
}

/// Named transitions the host animates on the engine's behalf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Initial overlay fade-in, before media acquisition starts.
    FadeIn,
    /// Resize of the box to the fitted content geometry.
    Reveal,
    /// Container fade used while swapping gallery items.
    SwapFade,
    /// Fade-out on close; teardown completes when it does.
    FadeOut,
}

/// Identifies a media acquisition. Stale generations are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadToken {
    pub generation: u64,
}

/// Identifies a running transition. Stale generations are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionToken {
    pub transition: Transition,
    pub generation: u64,
}

/// Notifications published to the host bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    Opened,
    Closed,
}
