use thiserror::Error;

/// Failure taxonomy for the lightbox engine.
///
/// None of these are fatal to the host page; every variant is absorbed at
/// the session boundary. They exist so absorption sites have something
/// precise to log and so hosts can report load failures with context.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LightboxError {
    /// No recognized content kind; the triggering action is preserved.
    #[error("source did not classify to a known content kind")]
    ClassificationRejected,

    /// Media acquisition failed; recovered by downgrading to an inline
    /// error placeholder.
    #[error("media failed to load: {0}")]
    MediaLoadFailed(String),

    /// Advance requested while a transition is in flight or past a bound.
    #[error("navigation blocked: {0}")]
    NavigationBlocked(&'static str),

    /// A declared gallery group resolved to fewer than two items; gallery
    /// mode is disabled for the session.
    #[error("gallery group resolves to fewer than two items")]
    GalleryMalformed,
}
