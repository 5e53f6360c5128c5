#![forbid(unsafe_code)]

//! Reading progress on a 0-1 scale.
//!
//! Progress is the ordinal position of a chapter among the enabled chapters,
//! normalized so the first enabled chapter is `0.0` and the last is `1.0`.
//! Page context overrides the position: the home page and the foreword are
//! always `0.0`, the credits and last page always `1.0`.

use crate::collaborators::Navigation;
use crate::entry::ChapterList;

/// Snapshot of the page classification flags that affect selection and
/// progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageContext {
    pub home: bool,
    pub foreword: bool,
    pub credits: bool,
    pub last_page: bool,
}

impl PageContext {
    /// Query the current classification from a navigation controller.
    pub fn from_navigation<N: Navigation + ?Sized>(navigation: &N) -> Self {
        Self {
            home: navigation.is_home_page(),
            foreword: navigation.is_foreword(),
            credits: navigation.is_credits_page(),
            last_page: navigation.is_last_page(),
        }
    }

    /// Home, credits, and foreword pages never show a selected chapter.
    #[must_use]
    pub const fn suppresses_selection(&self) -> bool {
        self.home || self.credits || self.foreword
    }
}

/// Progress for the entry at `target` (a list index).
///
/// With fewer than two enabled entries the position formula has no
/// denominator; a resolved target is then treated as the final chapter.
#[must_use]
pub fn progress_at(list: &ChapterList, target: Option<usize>, context: PageContext) -> f64 {
    if context.home || context.foreword {
        return 0.0;
    }
    let Some(index) = target.filter(|&index| index < list.len()) else {
        return 1.0;
    };
    if context.credits || context.last_page {
        return 1.0;
    }

    let enabled = list.enabled_count();
    if enabled < 2 {
        return 1.0;
    }

    let ordinal = list.enabled_ordinal(index) as f64;
    (ordinal / (enabled - 1) as f64).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::ChapterEntry;

    fn abcd() -> ChapterList {
        ChapterList::from_ids(["A", "B", "C", "D"])
    }

    #[test]
    fn home_and_foreword_are_zero() {
        let list = abcd();
        for context in [
            PageContext {
                home: true,
                ..PageContext::default()
            },
            PageContext {
                foreword: true,
                last_page: true,
                ..PageContext::default()
            },
        ] {
            assert_eq!(progress_at(&list, Some(2), context), 0.0);
            assert_eq!(progress_at(&list, None, context), 0.0);
        }
    }

    #[test]
    fn credits_last_page_and_missing_target_are_one() {
        let list = abcd();
        let credits = PageContext {
            credits: true,
            ..PageContext::default()
        };
        let last = PageContext {
            last_page: true,
            ..PageContext::default()
        };
        assert_eq!(progress_at(&list, Some(0), credits), 1.0);
        assert_eq!(progress_at(&list, Some(0), last), 1.0);
        assert_eq!(progress_at(&list, None, PageContext::default()), 1.0);
        assert_eq!(progress_at(&list, Some(99), PageContext::default()), 1.0);
    }

    #[test]
    fn position_over_enabled_entries() {
        let list = abcd();
        let ctx = PageContext::default();
        assert_eq!(progress_at(&list, Some(0), ctx), 0.0);
        assert!((progress_at(&list, Some(2), ctx) - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(progress_at(&list, Some(3), ctx), 1.0);
    }

    #[test]
    fn disabled_entries_shrink_denominator() {
        let list = ChapterList::new(vec![
            ChapterEntry::new("A"),
            ChapterEntry::new("B"),
            ChapterEntry::new("C"),
            ChapterEntry::new("D").disabled(true),
        ]);
        let ctx = PageContext::default();
        assert_eq!(progress_at(&list, Some(1), ctx), 0.5);
        // A disabled target past the last enabled entry clamps to 1.
        assert_eq!(progress_at(&list, Some(3), ctx), 1.0);
    }

    #[test]
    fn single_enabled_entry_is_complete() {
        let list = ChapterList::new(vec![
            ChapterEntry::new("A"),
            ChapterEntry::new("B").disabled(true),
        ]);
        let progress = progress_at(&list, Some(0), PageContext::default());
        assert_eq!(progress, 1.0);
    }

    #[test]
    fn suppression_flags() {
        assert!(!PageContext::default().suppresses_selection());
        assert!(
            !PageContext {
                last_page: true,
                ..PageContext::default()
            }
            .suppresses_selection()
        );
        assert!(
            PageContext {
                credits: true,
                ..PageContext::default()
            }
            .suppresses_selection()
        );
    }
}
