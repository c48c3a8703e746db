//! Headless modal lightbox engine.
//!
//! The engine owns every decision a lightbox makes: classifying what a
//! source reference points at, the open/close lifecycle, fitting media
//! into the viewport, gallery navigation, and touch-swipe recognition.
//! Everything platform-shaped (building the overlay tree, fetching media,
//! running animations, keeping time) lives behind the collaborator traits
//! in [`host`]; the engine never blocks and never calls back into itself.
//!
//! Hosts construct a [`Lightbox`] with their collaborator implementations,
//! feed it [`OpenRequest`]s and [`InputEvent`]s, and deliver async
//! completions back through `media_loaded`, `transition_done`, and
//! `timer_fired` with the tokens they were handed.

pub mod classify;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod gallery;
pub mod gesture;
pub mod host;
pub mod layout;
pub mod models;

pub use classify::{classify, Classified};
pub use config::{CaptionFormatter, Labels, Options};
pub use controller::{Lightbox, OpenOutcome};
pub use error::LightboxError;
pub use events::{
    Direction, InputEvent, Key, LoadToken, Notification, TimerKind, Transition, TransitionToken,
};
pub use host::{
    AnimationRunner, EventBus, MediaLoader, Renderer, SurfaceMetrics, SurfaceSpec, Timers,
    WindowMetrics,
};
pub use layout::{ContentLayout, Position};
pub use models::{
    ContentKind, Geometry, ItemMeta, NaturalSize, OpenRequest, Phase, Session, TypeHint,
};
