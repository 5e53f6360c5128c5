//! In-memory collaborators shared by the integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashSet;
use std::num::NonZeroUsize;
use std::rc::Rc;

use chapternav_core::{
    ChapterList, ChapterNav, EntryNode, Navigation, PageDirection, ProgressStack, ReadState,
    Sharer,
};

/// Navigation controller whose current page class is `"<article> current"`.
#[derive(Debug, Default)]
pub struct FakeNavigation {
    pub page_class: Option<String>,
    pub home: bool,
    pub credits: bool,
    pub foreword: bool,
    pub last_page: bool,
    pub navigated: bool,
    pub refuse_transitions: bool,
    pub transitions: Vec<(String, PageDirection)>,
}

impl FakeNavigation {
    pub fn on_article(article: &str) -> Self {
        Self {
            page_class: Some(format!("{article} current")),
            ..Self::default()
        }
    }

    pub fn home() -> Self {
        Self {
            page_class: Some("home current".to_string()),
            home: true,
            ..Self::default()
        }
    }
}

impl Navigation for FakeNavigation {
    fn current_page_class(&self) -> Option<String> {
        self.page_class.clone()
    }

    fn class_to_article(&self, page_class: &str) -> Option<String> {
        page_class.split_whitespace().next().map(str::to_owned)
    }

    fn is_home_page(&self) -> bool {
        self.home
    }

    fn is_credits_page(&self) -> bool {
        self.credits
    }

    fn is_foreword(&self) -> bool {
        self.foreword
    }

    fn is_last_page(&self) -> bool {
        self.last_page
    }

    fn go_to_page(&mut self, article_id: &str, direction: PageDirection) -> bool {
        self.transitions.push((article_id.to_owned(), direction));
        if self.refuse_transitions {
            return false;
        }
        self.page_class = Some(format!("{article_id} current"));
        self.home = false;
        self.foreword = false;
        self.credits = false;
        self.navigated = true;
        true
    }

    fn has_navigated(&self) -> bool {
        self.navigated
    }
}

/// Read-state store backed by a shared set so tests can change it while the
/// controller owns the store.
#[derive(Debug, Default, Clone)]
pub struct FakeReadState {
    pub read: Rc<RefCell<HashSet<String>>>,
    pub first_time: bool,
}

impl FakeReadState {
    pub fn with_read(ids: &[&str]) -> Self {
        let store = Self::default();
        store
            .read
            .borrow_mut()
            .extend(ids.iter().map(|id| (*id).to_owned()));
        store
    }
}

impl ReadState for FakeReadState {
    fn has_article_been_read(&self, article_id: &str) -> bool {
        self.read.borrow().contains(article_id)
    }

    fn is_first_time_visitor(&self) -> bool {
        self.first_time
    }
}

#[derive(Debug, Default)]
pub struct FakeStack {
    pub updates: Vec<f64>,
}

impl ProgressStack for FakeStack {
    fn update_stack(&mut self, progress: f64) {
        self.updates.push(progress);
    }
}

#[derive(Debug, Default)]
pub struct FakeSharer {
    pub indices: Vec<NonZeroUsize>,
}

impl Sharer for FakeSharer {
    fn update_sharer_index(&mut self, position: NonZeroUsize) {
        self.indices.push(position);
    }
}

/// Event target: an entry, an element nested inside an entry, or something
/// outside the list.
#[derive(Debug, Clone, Copy)]
pub enum Target {
    Entry(usize),
    Inside(usize),
    Outside,
}

impl EntryNode for Target {
    fn entry_index(&self) -> Option<usize> {
        match self {
            Self::Entry(index) => Some(*index),
            Self::Inside(_) | Self::Outside => None,
        }
    }

    fn parent(&self) -> Option<Self> {
        match self {
            Self::Inside(index) => Some(Self::Entry(*index)),
            Self::Entry(_) | Self::Outside => None,
        }
    }
}

pub type TestNav = ChapterNav<FakeNavigation, FakeReadState, FakeStack, FakeSharer>;

pub fn nav_with(list: ChapterList, navigation: FakeNavigation) -> TestNav {
    ChapterNav::new(
        list,
        navigation,
        FakeReadState::default(),
        FakeStack::default(),
        FakeSharer::default(),
    )
}

pub fn sharer_positions(nav: &TestNav) -> Vec<usize> {
    nav.sharer().indices.iter().map(|p| p.get()).collect()
}

pub fn selected(nav: &TestNav) -> Vec<usize> {
    nav.list()
        .iter()
        .enumerate()
        .filter(|(_, entry)| entry.is_selected())
        .map(|(index, _)| index)
        .collect()
}
