// ── Content viewer state machine ──
//
// Tab selection, lightbox navigation over the photo subset, and
// swipe-gesture paging. All state is derived and recomputable; nothing
// here persists or touches the network. The UI surfaces own rendering,
// this module owns the transitions.

use std::sync::Arc;

use crate::model::{ContentItem, ContentKind, Locale};

/// Minimum horizontal displacement, in device-independent pixels, for a
/// drag to count as a swipe. Displacement must strictly exceed this.
pub const SWIPE_THRESHOLD: f32 = 50.0;

/// The three content tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display, strum::EnumIter)]
pub enum ViewerTab {
    Specifications,
    #[default]
    Photos,
    Videos,
}

impl ViewerTab {
    pub const ALL: [Self; 3] = [Self::Specifications, Self::Photos, Self::Videos];

    /// Which content kind this tab shows.
    pub fn kind(self) -> ContentKind {
        match self {
            Self::Specifications => ContentKind::Specification,
            Self::Photos => ContentKind::Photo,
            Self::Videos => ContentKind::Video,
        }
    }

    /// Localized tab label.
    pub fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Specifications, Locale::En) => "Specs",
            (Self::Specifications, Locale::Uk) => "Документи",
            (Self::Photos, Locale::En) => "Photos",
            (Self::Photos, Locale::Uk) => "Фото",
            (Self::Videos, Locale::En) => "Videos",
            (Self::Videos, Locale::Uk) => "Відео",
        }
    }

    /// Localized empty-state placeholder.
    pub fn empty_notice(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Specifications, Locale::En) => "Specifications coming soon",
            (Self::Specifications, Locale::Uk) => "Специфікації незабаром",
            (Self::Photos, Locale::En) => "Photos coming soon",
            (Self::Photos, Locale::Uk) => "Фото незабаром",
            (Self::Videos, Locale::En) => "Videos coming soon",
            (Self::Videos, Locale::Uk) => "Відео незабаром",
        }
    }
}

/// Outcome of a completed swipe gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Leftward drag (start > end): advance to the next photo.
    Left,
    /// Rightward drag: go back to the previous photo.
    Right,
}

/// Tracks one horizontal drag. Vertical movement is never reported to it,
/// so vertical drags are ignored by construction.
#[derive(Debug, Default)]
pub struct SwipeTracker {
    start: Option<f32>,
    last: Option<f32>,
}

impl SwipeTracker {
    /// Begin a drag at `x`. Clears any leftover end position first.
    pub fn begin(&mut self, x: f32) {
        self.last = None;
        self.start = Some(x);
    }

    /// Record drag movement.
    pub fn update(&mut self, x: f32) {
        self.last = Some(x);
    }

    /// Finish the drag. Returns a direction only when the displacement
    /// strictly exceeds [`SWIPE_THRESHOLD`]; a tap (no movement) or a
    /// short drag returns `None`.
    pub fn finish(&mut self) -> Option<SwipeDirection> {
        let start = self.start.take()?;
        let last = self.last.take()?;
        let distance = start - last;

        if distance > SWIPE_THRESHOLD {
            Some(SwipeDirection::Left)
        } else if distance < -SWIPE_THRESHOLD {
            Some(SwipeDirection::Right)
        } else {
            None
        }
    }
}

/// The tabbed content browser with its lightbox.
///
/// Partitioning is a pure function of the synchronized item array and is
/// recomputed on access. The lightbox index is deliberately NOT re-clamped
/// when the photo set shrinks underneath an open lightbox; all indexing is
/// guarded instead, so an out-of-range index renders as "no photo".
#[derive(Debug, Default)]
pub struct ContentBrowser {
    items: Arc<Vec<ContentItem>>,
    active_tab: ViewerTab,
    lightbox: Option<usize>,
    swipe: SwipeTracker,
}

impl ContentBrowser {
    /// Create with a caller-supplied initial-tab hint (default photos).
    pub fn new(hint: ViewerTab) -> Self {
        Self {
            active_tab: hint,
            ..Self::default()
        }
    }

    // ── Items ────────────────────────────────────────────────────────

    /// Replace the underlying synchronized array.
    pub fn set_items(&mut self, items: Arc<Vec<ContentItem>>) {
        self.items = items;
    }

    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    fn partition(&self, kind: ContentKind) -> Vec<&ContentItem> {
        self.items.iter().filter(|i| i.kind == kind).collect()
    }

    pub fn specifications(&self) -> Vec<&ContentItem> {
        self.partition(ContentKind::Specification)
    }

    pub fn photos(&self) -> Vec<&ContentItem> {
        self.partition(ContentKind::Photo)
    }

    pub fn videos(&self) -> Vec<&ContentItem> {
        self.partition(ContentKind::Video)
    }

    pub fn photo_count(&self) -> usize {
        self.photos().len()
    }

    /// Items under the currently active tab.
    pub fn active_items(&self) -> Vec<&ContentItem> {
        self.partition(self.active_tab.kind())
    }

    // ── Tabs ─────────────────────────────────────────────────────────

    pub fn active_tab(&self) -> ViewerTab {
        self.active_tab
    }

    /// User-driven tab selection.
    pub fn select_tab(&mut self, tab: ViewerTab) {
        self.active_tab = tab;
    }

    /// Apply a changed initial-tab hint. Always forces the tab, even if
    /// the user had manually navigated away since mount.
    pub fn set_hint(&mut self, hint: ViewerTab) {
        self.active_tab = hint;
    }

    // ── Lightbox ─────────────────────────────────────────────────────

    pub fn lightbox_index(&self) -> Option<usize> {
        self.lightbox
    }

    /// Open the lightbox at photo position `index`. Out-of-range requests
    /// are ignored.
    pub fn open_lightbox(&mut self, index: usize) {
        if index < self.photo_count() {
            self.lightbox = Some(index);
        }
    }

    pub fn close_lightbox(&mut self) {
        self.lightbox = None;
    }

    /// The photo under the lightbox, if the index is still in range.
    pub fn current_photo(&self) -> Option<&ContentItem> {
        let index = self.lightbox?;
        self.photos().get(index).copied()
    }

    /// Advance the lightbox. A no-op at the last photo.
    pub fn next_photo(&mut self) {
        if let Some(index) = self.lightbox {
            if index + 1 < self.photo_count() {
                self.lightbox = Some(index + 1);
            }
        }
    }

    /// Step the lightbox back. A no-op at the first photo.
    pub fn prev_photo(&mut self) {
        if let Some(index) = self.lightbox {
            if index > 0 {
                self.lightbox = Some(index - 1);
            }
        }
    }

    // ── Swipe gestures (lightbox only) ───────────────────────────────

    pub fn touch_start(&mut self, x: f32) {
        self.swipe.begin(x);
    }

    pub fn touch_move(&mut self, x: f32) {
        self.swipe.update(x);
    }

    /// End the drag, applying at most one navigation step.
    pub fn touch_end(&mut self) {
        let direction = self.swipe.finish();
        if self.lightbox.is_none() {
            return;
        }
        match direction {
            Some(SwipeDirection::Left) => self.next_photo(),
            Some(SwipeDirection::Right) => self.prev_photo(),
            None => {}
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::LocalizedText;

    fn item(id: &str, kind: ContentKind, order: i64) -> ContentItem {
        ContentItem {
            id: id.to_owned(),
            drone_id: "krok".to_owned(),
            kind,
            title: LocalizedText::new(id),
            description: None,
            file_url: format!("https://blobs.example/{id}"),
            thumbnail_url: None,
            order,
            created_at: Utc::now(),
        }
    }

    fn browser_with_photos(count: usize) -> ContentBrowser {
        let items: Vec<ContentItem> = (0..count)
            .map(|i| item(&format!("p{i}"), ContentKind::Photo, i64::try_from(i).unwrap()))
            .collect();
        let mut browser = ContentBrowser::new(ViewerTab::Photos);
        browser.set_items(Arc::new(items));
        browser
    }

    #[test]
    fn partitions_are_pure_filters() {
        let mut browser = ContentBrowser::default();
        browser.set_items(Arc::new(vec![
            item("s1", ContentKind::Specification, 1),
            item("p1", ContentKind::Photo, 1),
            item("v1", ContentKind::Video, 1),
            item("p2", ContentKind::Photo, 2),
        ]));

        assert_eq!(browser.specifications().len(), 1);
        assert_eq!(browser.photos().len(), 2);
        assert_eq!(browser.videos().len(), 1);
        assert_eq!(browser.photo_count(), 2);
    }

    #[test]
    fn default_tab_is_photos() {
        assert_eq!(ContentBrowser::default().active_tab(), ViewerTab::Photos);
    }

    #[test]
    fn hint_change_forces_tab_after_manual_navigation() {
        let mut browser = ContentBrowser::new(ViewerTab::Photos);
        browser.select_tab(ViewerTab::Videos);
        browser.set_hint(ViewerTab::Specifications);
        assert_eq!(browser.active_tab(), ViewerTab::Specifications);
    }

    #[test]
    fn next_is_a_noop_at_last_photo() {
        let mut browser = browser_with_photos(3);
        browser.open_lightbox(2);
        browser.next_photo();
        assert_eq!(browser.lightbox_index(), Some(2));
    }

    #[test]
    fn prev_is_a_noop_at_first_photo() {
        let mut browser = browser_with_photos(3);
        browser.open_lightbox(0);
        browser.prev_photo();
        assert_eq!(browser.lightbox_index(), Some(0));
    }

    #[test]
    fn open_out_of_range_is_ignored() {
        let mut browser = browser_with_photos(2);
        browser.open_lightbox(5);
        assert_eq!(browser.lightbox_index(), None);
    }

    #[test]
    fn close_resets_to_none() {
        let mut browser = browser_with_photos(2);
        browser.open_lightbox(1);
        browser.close_lightbox();
        assert_eq!(browser.lightbox_index(), None);
    }

    #[test]
    fn short_swipe_is_a_noop() {
        let mut browser = browser_with_photos(3);
        browser.open_lightbox(1);

        browser.touch_start(100.0);
        browser.touch_move(51.0); // 49px leftward, below threshold
        browser.touch_end();
        assert_eq!(browser.lightbox_index(), Some(1));

        // Exactly the threshold still does not navigate.
        browser.touch_start(100.0);
        browser.touch_move(50.0);
        browser.touch_end();
        assert_eq!(browser.lightbox_index(), Some(1));
    }

    #[test]
    fn swipe_past_threshold_navigates_exactly_once() {
        let mut browser = browser_with_photos(3);
        browser.open_lightbox(0);

        // 51px leftward → exactly one `next`.
        browser.touch_start(151.0);
        browser.touch_move(100.0);
        browser.touch_end();
        assert_eq!(browser.lightbox_index(), Some(1));

        // 51px rightward → exactly one `prev`.
        browser.touch_start(100.0);
        browser.touch_move(151.0);
        browser.touch_end();
        assert_eq!(browser.lightbox_index(), Some(0));
    }

    #[test]
    fn swipe_at_boundary_stays_in_range() {
        let mut browser = browser_with_photos(2);
        browser.open_lightbox(1);

        browser.touch_start(200.0);
        browser.touch_move(100.0);
        browser.touch_end();
        assert_eq!(browser.lightbox_index(), Some(1));
    }

    #[test]
    fn tap_without_movement_is_a_noop() {
        let mut browser = browser_with_photos(2);
        browser.open_lightbox(0);
        browser.touch_start(100.0);
        browser.touch_end();
        assert_eq!(browser.lightbox_index(), Some(0));
    }

    #[test]
    fn shrinking_photo_set_never_panics() {
        let mut browser = browser_with_photos(3);
        browser.open_lightbox(2);

        // Concurrent delete shrinks the photo set under the open lightbox.
        browser.set_items(Arc::new(vec![item("p0", ContentKind::Photo, 0)]));

        // Index is intentionally not re-clamped...
        assert_eq!(browser.lightbox_index(), Some(2));
        // ...but access is guarded, never out-of-bounds.
        assert!(browser.current_photo().is_none());
        browser.next_photo();
        browser.prev_photo();
    }
}
