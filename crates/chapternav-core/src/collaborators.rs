#![forbid(unsafe_code)]

//! Capability contracts for the components the navigation bar talks to.
//!
//! The bar never owns page state, read history, the paper-stack visual, or
//! the sharer. It queries and pokes them through these traits, so hosts can
//! back them with JS objects and tests can back them with fakes.

use std::num::NonZeroUsize;

/// Direction hint passed along with a page transition request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageDirection {
    Backward,
    Forward,
}

impl PageDirection {
    /// Signed step understood by page controllers (`-1` / `1`).
    #[must_use]
    pub const fn step(self) -> i32 {
        match self {
            Self::Backward => -1,
            Self::Forward => 1,
        }
    }
}

/// Page/section navigation controller.
pub trait Navigation {
    /// Class name of the page currently on screen.
    fn current_page_class(&self) -> Option<String>;

    /// Map a page class name to the article it belongs to.
    fn class_to_article(&self, page_class: &str) -> Option<String>;

    fn is_home_page(&self) -> bool;

    fn is_credits_page(&self) -> bool;

    fn is_foreword(&self) -> bool;

    fn is_last_page(&self) -> bool;

    /// Request a transition to the first page of `article_id`. Returns
    /// whether the transition happened.
    fn go_to_page(&mut self, article_id: &str, direction: PageDirection) -> bool;

    /// Whether the reader has navigated at least once this session.
    fn has_navigated(&self) -> bool;

    /// Article of the page currently on screen.
    fn current_article(&self) -> Option<String> {
        let class = self.current_page_class()?;
        self.class_to_article(&class)
            .filter(|article| !article.is_empty())
    }
}

/// Persistent read-state store.
pub trait ReadState {
    fn has_article_been_read(&self, article_id: &str) -> bool;

    fn is_first_time_visitor(&self) -> bool;
}

/// The paper-stack visual that reflects reading progress.
pub trait ProgressStack {
    /// `progress` is in [0.0, 1.0].
    fn update_stack(&mut self, progress: f64);
}

/// Social-sharing widget.
pub trait Sharer {
    /// `position` is the 1-based position of the selected chapter.
    fn update_sharer_index(&mut self, position: NonZeroUsize);
}

/// A node in the host's element tree that an input event can target.
///
/// Implementors report whether the node itself is a chapter entry (and at
/// which list index), and how to reach its parent.
pub trait EntryNode: Sized {
    /// List index when this node is a chapter entry.
    fn entry_index(&self) -> Option<usize>;

    fn parent(&self) -> Option<Self>;
}

/// Resolve an event target to the chapter entry it belongs to.
///
/// The target is either the entry itself or contained within one; the
/// nearest entry on the ancestor chain wins. Returns `None` when no
/// ancestor is an entry.
pub fn resolve_entry<N: EntryNode>(target: N) -> Option<usize> {
    let mut node = Some(target);
    while let Some(current) = node {
        if let Some(index) = current.entry_index() {
            return Some(index);
        }
        node = current.parent();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Arena-backed tree: `(entry_index, parent)` per node.
    struct Tree(Vec<(Option<usize>, Option<usize>)>);

    #[derive(Clone, Copy)]
    struct Node<'a> {
        tree: &'a Tree,
        id: usize,
    }

    impl EntryNode for Node<'_> {
        fn entry_index(&self) -> Option<usize> {
            self.tree.0[self.id].0
        }

        fn parent(&self) -> Option<Self> {
            self.tree.0[self.id].1.map(|id| Node {
                tree: self.tree,
                id,
            })
        }
    }

    fn tree() -> Tree {
        // 0: ul, 1: li#0, 2: a, 3: span inside a, 4: li#1, 5: stray div
        Tree(vec![
            (None, None),
            (Some(0), Some(0)),
            (None, Some(1)),
            (None, Some(2)),
            (Some(1), Some(0)),
            (None, Some(0)),
        ])
    }

    #[test]
    fn entry_resolves_to_itself() {
        let t = tree();
        assert_eq!(resolve_entry(Node { tree: &t, id: 4 }), Some(1));
    }

    #[test]
    fn descendant_resolves_to_nearest_entry() {
        let t = tree();
        assert_eq!(resolve_entry(Node { tree: &t, id: 3 }), Some(0));
    }

    #[test]
    fn node_outside_entries_resolves_to_none() {
        let t = tree();
        assert_eq!(resolve_entry(Node { tree: &t, id: 5 }), None);
        assert_eq!(resolve_entry(Node { tree: &t, id: 0 }), None);
    }

    #[test]
    fn direction_steps() {
        assert_eq!(PageDirection::Forward.step(), 1);
        assert_eq!(PageDirection::Backward.step(), -1);
    }
}
