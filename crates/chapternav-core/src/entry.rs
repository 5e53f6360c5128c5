#![forbid(unsafe_code)]

//! Chapter entries and the ordered list that holds them.
//!
//! The list is the single source of truth for markers. A host renders it by
//! reading [`EntryMarkers`] for each entry and projecting them onto whatever
//! surface it owns (DOM classes and inline styles in the web frontend).

/// One chapter link in the navigation bar.
#[derive(Debug, Clone, PartialEq)]
pub struct ChapterEntry {
    article_id: Option<String>,
    disabled: bool,
    read: bool,
    selected: bool,
    overlay_height: f64,
    overlay_top: Option<f64>,
}

impl ChapterEntry {
    /// Create an enabled entry linking to `article_id`.
    #[must_use]
    pub fn new(article_id: impl Into<String>) -> Self {
        Self {
            article_id: Some(article_id.into()),
            ..Self::placeholder()
        }
    }

    /// Create an entry with no article identifier. Such entries are never
    /// navigable or selectable, and the read store never marks them.
    #[must_use]
    pub const fn placeholder() -> Self {
        Self {
            article_id: None,
            disabled: false,
            read: false,
            selected: false,
            overlay_height: 0.0,
            overlay_top: None,
        }
    }

    /// Builder: set the disabled marker.
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Builder: seed the read marker, e.g. from markup rendered server-side.
    #[must_use]
    pub fn read(mut self, read: bool) -> Self {
        self.read = read;
        self
    }

    /// Builder: set the measured height of the hover overlay.
    #[must_use]
    pub fn overlay_height(mut self, height: f64) -> Self {
        self.overlay_height = height;
        self
    }

    /// Article identifier, if present and non-empty.
    #[must_use]
    pub fn article_id(&self) -> Option<&str> {
        self.article_id.as_deref().filter(|id| !id.is_empty())
    }

    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.disabled
    }

    #[must_use]
    pub const fn is_read(&self) -> bool {
        self.read
    }

    #[must_use]
    pub const fn is_selected(&self) -> bool {
        self.selected
    }

    /// Vertical offset applied to the hover overlay, in CSS pixels. `None`
    /// until the first re-alignment.
    #[must_use]
    pub const fn overlay_top(&self) -> Option<f64> {
        self.overlay_top
    }

    /// Update the disabled marker. Content rules outside this crate own it.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Update the measured overlay height. Takes effect at the next
    /// re-alignment.
    pub fn set_overlay_height(&mut self, height: f64) {
        self.overlay_height = height;
    }

    /// Set the read marker. There is no way back to unread.
    pub fn mark_read(&mut self) {
        self.read = true;
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    /// Place the overlay so its bottom edge sits `gap` pixels above the
    /// anchor's top edge.
    pub(crate) fn align_overlay(&mut self, gap: f64) {
        self.overlay_top = Some(-self.overlay_height + gap);
    }
}

/// Render-facing snapshot of one entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntryMarkers {
    pub selected: bool,
    pub read: bool,
    pub disabled: bool,
    /// Current opacity of the hover description, in [0.0, 1.0].
    pub description_opacity: f32,
    /// Overlay `top` offset in CSS pixels, once aligned.
    pub overlay_top: Option<f64>,
}

/// Ordered chapter entries. Order is visual order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChapterList {
    entries: Vec<ChapterEntry>,
}

impl ChapterList {
    #[must_use]
    pub fn new(entries: Vec<ChapterEntry>) -> Self {
        Self { entries }
    }

    /// Build an all-enabled list from article identifiers.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(ids.into_iter().map(ChapterEntry::new).collect())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ChapterEntry> {
        self.entries.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut ChapterEntry> {
        self.entries.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChapterEntry> + '_ {
        self.entries.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut ChapterEntry> + '_ {
        self.entries.iter_mut()
    }

    /// Index of the first entry linking to `article_id`.
    #[must_use]
    pub fn position_of(&self, article_id: &str) -> Option<usize> {
        if article_id.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .position(|entry| entry.article_id() == Some(article_id))
    }

    /// Index of the selected entry, if any.
    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.entries.iter().position(ChapterEntry::is_selected)
    }

    /// Number of entries without the disabled marker.
    #[must_use]
    pub fn enabled_count(&self) -> usize {
        self.entries.iter().filter(|entry| !entry.disabled).count()
    }

    /// Ordinal of `index` among enabled entries: the number of enabled
    /// entries that precede it.
    #[must_use]
    pub fn enabled_ordinal(&self, index: usize) -> usize {
        self.entries
            .iter()
            .take(index)
            .filter(|entry| !entry.disabled)
            .count()
    }

    /// Identifiers of disabled entries that carry a non-empty identifier.
    #[must_use]
    pub fn disabled_articles(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|entry| entry.disabled)
            .filter_map(|entry| entry.article_id().map(str::to_owned))
            .collect()
    }

    pub(crate) fn clear_selection(&mut self) {
        for entry in &mut self.entries {
            entry.set_selected(false);
        }
    }
}

impl FromIterator<ChapterEntry> for ChapterList {
    fn from_iter<T: IntoIterator<Item = ChapterEntry>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_id_is_treated_as_absent() {
        let entry = ChapterEntry::new("");
        assert_eq!(entry.article_id(), None);
    }

    #[test]
    fn position_of_ignores_empty_lookup() {
        let list = ChapterList::new(vec![ChapterEntry::placeholder(), ChapterEntry::new("a")]);
        assert_eq!(list.position_of(""), None);
        assert_eq!(list.position_of("a"), Some(1));
    }

    #[test]
    fn position_of_returns_first_duplicate() {
        let list = ChapterList::from_ids(["a", "b", "a"]);
        assert_eq!(list.position_of("a"), Some(0));
    }

    #[test]
    fn enabled_ordinal_skips_disabled() {
        let list = ChapterList::new(vec![
            ChapterEntry::new("a").disabled(true),
            ChapterEntry::new("b"),
            ChapterEntry::new("c"),
        ]);
        assert_eq!(list.enabled_count(), 2);
        assert_eq!(list.enabled_ordinal(0), 0);
        assert_eq!(list.enabled_ordinal(2), 1);
    }

    #[test]
    fn disabled_articles_skip_unnamed_entries() {
        let list = ChapterList::new(vec![
            ChapterEntry::placeholder().disabled(true),
            ChapterEntry::new("b").disabled(true),
            ChapterEntry::new("c"),
            ChapterEntry::new("d").disabled(true),
        ]);
        assert_eq!(list.disabled_articles(), vec!["b".to_string(), "d".to_string()]);
    }

    #[test]
    fn overlay_sits_above_anchor() {
        let mut entry = ChapterEntry::new("a").overlay_height(30.0);
        entry.align_overlay(4.0);
        assert_eq!(entry.overlay_top(), Some(-26.0));
    }

    #[test]
    fn overlay_is_unplaced_until_aligned() {
        let entry = ChapterEntry::new("a").overlay_height(30.0);
        assert_eq!(entry.overlay_top(), None);
    }

    #[test]
    fn seeded_read_marker_survives_mark_read() {
        let mut entry = ChapterEntry::new("a").read(true);
        assert!(entry.is_read());
        entry.mark_read();
        assert!(entry.is_read());
    }
}
