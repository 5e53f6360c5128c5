#![forbid(unsafe_code)]

//! Core: chapter navigation model, selection, reading progress, and hover
//! fades for a book reader's chapter bar.
//!
//! Everything here is host-independent. The web frontend
//! (`chapternav-web`) binds a [`ChapterNav`] to real DOM elements; tests
//! drive it with in-memory collaborators.

pub mod collaborators;
pub mod config;
pub mod entry;
pub mod fade;
pub mod logging;
pub mod nav;
pub mod progress;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, trace, warn};

pub use collaborators::{
    EntryNode, Navigation, PageDirection, ProgressStack, ReadState, Sharer, resolve_entry,
};
pub use config::{ChapterNavConfig, ConfigError};
pub use entry::{ChapterEntry, ChapterList, EntryMarkers};
pub use nav::{ChapterNav, ClickOutcome, EventBindings};
pub use progress::PageContext;
