//! Pure classification of an open request into a content kind.
//!
//! Classification is a function of the source string, the explicit type
//! hint, and the configured image-extension allowlist; nothing else. A
//! request that matches no rule is rejected and the host's default action
//! is preserved.

use crate::models::{ContentKind, OpenRequest, TypeHint};

/// Recognized video-embed host patterns.
const VIDEO_EMBED_PATTERNS: [&str; 2] = ["youtube.com/embed", "player.vimeo.com/video"];

/// Classification result: the kind plus the effective source (the fragment
/// for element references, the raw source otherwise).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    pub kind: ContentKind,
    pub source: String,
}

/// True when the source points at a recognized video embed host.
pub(crate) fn is_video_embed(source: &str) -> bool {
    VIDEO_EMBED_PATTERNS.iter().any(|p| source.contains(p))
}

/// Fragment portion of the source (`#...`), empty when there is none.
fn fragment_of(source: &str) -> &str {
    source.find('#').map(|i| &source[i..]).unwrap_or("")
}

/// Lowercased extension candidate: the last dot segment, stripped of any
/// query or fragment suffix.
fn extension_of(source: &str) -> String {
    let lower = source.to_lowercase();
    let tail = lower.rsplit('.').next().unwrap_or("");
    tail.split(['#', '?']).next().unwrap_or("").to_string()
}

/// Applies the ordered classification rules.
///
/// 1. An explicit hint wins (`image`/`url`/`element`).
/// 2. Extension in the allowlist, or a `data:image` URI, is an image.
/// 3. A recognized video-embed host is a video, regardless of extension.
/// 4. A fragment reference is an inline element; the fragment becomes the
///    effective source.
/// 5. An HTTP(S) source with no fragment is an external page.
/// 6. A supplied in-memory object is an object.
/// 7. Otherwise the request is rejected (`None`).
pub fn classify(request: &OpenRequest, extensions: &[String]) -> Option<Classified> {
    let source = request.item.source.as_str();
    let fragment = fragment_of(source);
    let extension = extension_of(source);

    let is_image = request.hint == Some(TypeHint::Image)
        || extensions.iter().any(|e| e == &extension)
        || source.starts_with("data:image");
    let is_video = is_video_embed(source);
    let is_url = request.hint == Some(TypeHint::Url)
        || (!is_image && !is_video && source.starts_with("http") && fragment.is_empty());
    let is_element = request.hint == Some(TypeHint::Element)
        || (!is_image && !is_video && !is_url && fragment.starts_with('#'));

    if is_image {
        Some(Classified {
            kind: ContentKind::Image,
            source: source.to_string(),
        })
    } else if is_video {
        Some(Classified {
            kind: ContentKind::Video,
            source: source.to_string(),
        })
    } else if is_url {
        Some(Classified {
            kind: ContentKind::Url,
            source: source.to_string(),
        })
    } else if is_element {
        Some(Classified {
            kind: ContentKind::Element,
            source: if fragment.is_empty() {
                source.to_string()
            } else {
                fragment.to_string()
            },
        })
    } else if request.object {
        Some(Classified {
            kind: ContentKind::Object,
            source: source.to_string(),
        })
    } else {
        None
    }
}

/// Gallery swap classification: a swapped-in item is a video embed or an
/// image, nothing else.
pub(crate) fn classify_gallery_source(source: &str) -> ContentKind {
    if is_video_embed(source) {
        ContentKind::Video
    } else {
        ContentKind::Image
    }
}
