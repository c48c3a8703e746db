//! Gallery navigation: ordered items sharing a group id, a clamped index,
//! and the control/prefetch state derived from it.

use crate::classify::is_video_embed;
use crate::events::Direction;
use crate::models::ItemMeta;

/// Enabled/disabled state of the previous/next controls.
///
/// "Previous" is disabled exactly at the first item, "next" exactly at
/// the last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlStates {
    pub previous_enabled: bool,
    pub next_enabled: bool,
}

/// Navigates an ordered gallery group without closing the modal.
///
/// Built only when the opened item declares a group id shared by at least
/// two items; a group resolving to fewer is malformed and the session
/// opens gallery-less.
#[derive(Debug, Clone)]
pub struct GalleryNavigator {
    id: String,
    items: Vec<ItemMeta>,
    index: usize,
    /// Last valid index (`item count - 1`).
    total: usize,
}

impl GalleryNavigator {
    /// Builds a navigator from the items sharing `id` in document order,
    /// locating the opened item by source. Returns `None` for groups of
    /// fewer than two items.
    pub fn build(id: impl Into<String>, items: Vec<ItemMeta>, opened_source: &str) -> Option<Self> {
        if items.len() < 2 {
            return None;
        }
        let index = items
            .iter()
            .position(|item| item.source == opened_source)
            .unwrap_or(0);
        let total = items.len() - 1;
        Some(Self {
            id: id.into(),
            items,
            index,
            total,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn current(&self) -> &ItemMeta {
        &self.items[self.index]
    }

    /// One-based position display: (current, count).
    pub fn position_display(&self) -> (usize, usize) {
        (self.index + 1, self.total + 1)
    }

    /// Moves the index one step, clamped to `[0, total]`. Returns the new
    /// index, or `None` when already at the targeted bound (the control is
    /// disabled there, so a press is a blocked navigation, not a wrap).
    pub fn advance(&mut self, direction: Direction) -> Option<usize> {
        let next = match direction {
            Direction::Previous => self.index.checked_sub(1)?,
            Direction::Next => {
                if self.index >= self.total {
                    return None;
                }
                self.index + 1
            }
        };
        self.index = next.min(self.total);
        Some(self.index)
    }

    pub fn controls(&self) -> ControlStates {
        ControlStates {
            previous_enabled: self.index > 0,
            next_enabled: self.index < self.total,
        }
    }

    /// Sources of the immediately adjacent items, for best-effort
    /// preloading. Video embeds are skipped; there is nothing to warm.
    pub fn prefetch_sources(&self) -> Vec<&str> {
        let mut sources = Vec::with_capacity(2);
        if self.index > 0 {
            let source = self.items[self.index - 1].source.as_str();
            if !is_video_embed(source) {
                sources.push(source);
            }
        }
        if self.index < self.total {
            let source = self.items[self.index + 1].source.as_str();
            if !is_video_embed(source) {
                sources.push(source);
            }
        }
        sources
    }
}
