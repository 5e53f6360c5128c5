#![forbid(unsafe_code)]

//! The chapter navigation controller.
//!
//! [`ChapterNav`] owns the [`ChapterList`] model plus one
//! [`DescriptionFade`] per entry, and talks to the outside world only
//! through the collaborator traits it was constructed with. Hosts feed it
//! input (clicks, hovers, frame ticks), then render [`EntryMarkers`].

use std::num::NonZeroUsize;
use std::time::Duration;

use crate::collaborators::{
    EntryNode, Navigation, PageDirection, ProgressStack, ReadState, Sharer, resolve_entry,
};
use crate::config::ChapterNavConfig;
use crate::entry::{ChapterList, EntryMarkers};
use crate::fade::DescriptionFade;
use crate::progress::{PageContext, progress_at};

/// Which input handlers the host must attach to every entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventBindings {
    pub click: bool,
    /// Pointer-enter and pointer-leave. Hover is meaningless on touch.
    pub hover: bool,
}

/// Result of a click on the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickOutcome {
    /// Entry the click resolved to.
    pub entry: Option<usize>,
    /// Whether a page transition happened.
    pub navigated: bool,
    /// Entries render as links; the host always suppresses the default
    /// action.
    pub prevent_default: bool,
}

/// Chapter navigation bar controller.
#[derive(Debug)]
pub struct ChapterNav<N, R, P, S> {
    list: ChapterList,
    fades: Vec<DescriptionFade>,
    config: ChapterNavConfig,
    navigation: N,
    read_state: R,
    stack: P,
    sharer: S,
}

impl<N, R, P, S> ChapterNav<N, R, P, S>
where
    N: Navigation,
    R: ReadState,
    P: ProgressStack,
    S: Sharer,
{
    /// Create a controller with the default configuration.
    pub fn new(list: ChapterList, navigation: N, read_state: R, stack: P, sharer: S) -> Self {
        Self::with_config(
            list,
            ChapterNavConfig::default(),
            navigation,
            read_state,
            stack,
            sharer,
        )
    }

    pub fn with_config(
        list: ChapterList,
        config: ChapterNavConfig,
        navigation: N,
        read_state: R,
        stack: P,
        sharer: S,
    ) -> Self {
        let fades = (0..list.len())
            .map(|_| DescriptionFade::new(config.fade_duration()))
            .collect();
        Self {
            list,
            fades,
            config,
            navigation,
            read_state,
            stack,
            sharer,
        }
    }

    #[must_use]
    pub fn list(&self) -> &ChapterList {
        &self.list
    }

    /// Mutable access for host-side sync of disabled markers and overlay
    /// heights. The number of entries is fixed.
    pub fn list_mut(&mut self) -> &mut ChapterList {
        &mut self.list
    }

    #[must_use]
    pub fn config(&self) -> &ChapterNavConfig {
        &self.config
    }

    #[must_use]
    pub fn navigation(&self) -> &N {
        &self.navigation
    }

    #[must_use]
    pub fn read_state(&self) -> &R {
        &self.read_state
    }

    #[must_use]
    pub fn stack(&self) -> &P {
        &self.stack
    }

    #[must_use]
    pub fn sharer(&self) -> &S {
        &self.sharer
    }

    /// Hide every hover description and report which handlers to attach.
    ///
    /// Not guarded: calling twice asks the host to attach handlers twice.
    pub fn initialize(&mut self, touch_device: bool) -> EventBindings {
        for fade in &mut self.fades {
            fade.set_opacity(0.0);
        }
        crate::debug!(entries = self.list.len(), touch_device, "chapter nav initialized");
        EventBindings {
            click: true,
            hover: !touch_device,
        }
    }

    /// Mark every entry whose article has been read. Never clears a marker.
    pub fn update_read_markers(&mut self) {
        let read_state = &self.read_state;
        for entry in self.list.iter_mut() {
            let read = entry
                .article_id()
                .is_some_and(|id| read_state.has_article_been_read(id));
            if read {
                entry.mark_read();
            }
        }
    }

    /// Identifiers of disabled entries, in visual order.
    #[must_use]
    pub fn disabled_articles(&self) -> Vec<String> {
        self.list.disabled_articles()
    }

    /// Recompute the selected entry from the current page, or from
    /// `override_article` when given, then re-align every hover overlay.
    ///
    /// Returns the index of the newly selected entry.
    pub fn update_selection(&mut self, override_article: Option<&str>) -> Option<usize> {
        let target = match override_article.filter(|id| !id.is_empty()) {
            Some(id) => Some(id.to_owned()),
            None => self.navigation.current_article(),
        };

        self.list.clear_selection();

        let context = PageContext::from_navigation(&self.navigation);
        let selected = match target {
            Some(id) if !context.suppresses_selection() => self.list.position_of(&id),
            _ => None,
        };

        if let Some(index) = selected {
            if let Some(entry) = self.list.get_mut(index) {
                entry.set_selected(true);
            }
            let position = NonZeroUsize::MIN.saturating_add(index);
            self.sharer.update_sharer_index(position);
            crate::debug!(index, position = position.get(), "chapter selected");
        }

        let gap = self.config.description_gap_px;
        for entry in self.list.iter_mut() {
            entry.align_overlay(gap);
        }

        selected
    }

    /// Reading progress in [0, 1] for `override_article`, or for the
    /// selected entry when no override is given.
    #[must_use]
    pub fn progress(&self, override_article: Option<&str>) -> f64 {
        let target = match override_article.filter(|id| !id.is_empty()) {
            Some(id) => self.list.position_of(id),
            None => self.list.selected_index(),
        };
        progress_at(&self.list, target, PageContext::from_navigation(&self.navigation))
    }

    /// Click handler: navigate to the clicked chapter.
    pub fn on_chapter_click<T: EntryNode>(&mut self, target: T) -> ClickOutcome {
        let entry = resolve_entry(target);
        let mut outcome = ClickOutcome {
            entry,
            navigated: false,
            prevent_default: true,
        };

        let Some(index) = entry else {
            crate::debug!("click outside any chapter entry");
            return outcome;
        };
        let Some(chapter) = self.list.get(index) else {
            return outcome;
        };
        if chapter.is_disabled() {
            crate::debug!(index, "click on disabled chapter ignored");
            return outcome;
        }
        let Some(article) = chapter.article_id().map(str::to_owned) else {
            crate::debug!(index, "click on chapter without article ignored");
            return outcome;
        };

        let before = self.progress(None);
        if !self.navigation.go_to_page(&article, PageDirection::Forward) {
            crate::debug!(article = %article, "page transition refused");
            return outcome;
        }
        outcome.navigated = true;

        let next = self.progress(Some(&article));
        if next > before {
            self.stack.update_stack(next);
        }
        self.update_selection(Some(&article));
        outcome
    }

    /// Pointer-enter handler: reveal the entry's description.
    pub fn on_chapter_mouse_over<T: EntryNode>(&mut self, target: T) -> Option<usize> {
        let index = resolve_entry(target)?;
        let fade = self.fades.get_mut(index)?;
        fade.fade_in_now(1.0);
        crate::trace!(index, "description fade in");
        Some(index)
    }

    /// Pointer-leave handler: hide the entry's description.
    pub fn on_chapter_mouse_out<T: EntryNode>(&mut self, target: T) -> Option<usize> {
        let index = resolve_entry(target)?;
        let fade = self.fades.get_mut(index)?;
        fade.fade_queued(0.0);
        crate::trace!(index, "description fade out");
        Some(index)
    }

    /// Advance every description fade. Returns whether any still runs.
    pub fn tick(&mut self, dt: Duration) -> bool {
        self.fades
            .iter_mut()
            .fold(false, |animating, fade| fade.tick(dt) | animating)
    }

    /// Whether the bar should be shown. First-time visitors don't see it on
    /// the home page until they have navigated somewhere.
    #[must_use]
    pub fn should_be_visible(&self) -> bool {
        !self.read_state.is_first_time_visitor()
            || !self.navigation.is_home_page()
            || self.navigation.has_navigated()
    }

    /// Render snapshot for the entry at `index`.
    #[must_use]
    pub fn markers(&self, index: usize) -> Option<EntryMarkers> {
        let entry = self.list.get(index)?;
        let fade = self.fades.get(index)?;
        Some(EntryMarkers {
            selected: entry.is_selected(),
            read: entry.is_read(),
            disabled: entry.is_disabled(),
            description_opacity: fade.opacity(),
            overlay_top: entry.overlay_top(),
        })
    }

    /// Render snapshots for every entry, in order.
    pub fn all_markers(&self) -> impl Iterator<Item = EntryMarkers> + '_ {
        (0..self.list.len()).filter_map(|index| self.markers(index))
    }
}
