#![forbid(unsafe_code)]

//! WASM frontend for the chapter navigation bar.
//!
//! [`ChapterNavWeb`] binds a [`chapternav_core::ChapterNav`] to an existing
//! chapter list in the page:
//! - entry elements are read once at construction, their `disabled` class
//!   and overlay heights are re-read before every operation,
//! - click/hover listeners are attached by `initialize()`,
//! - collaborators (navigation, storage, paper stack, sharing) are plain JS
//!   objects passed to the constructor,
//! - the host drives hover fades by calling `tick(dtMs)` from its frame loop,
//! - `updateSelection` called from inside a collaborator is deferred until
//!   the running operation finishes; other re-entrant calls throw.

pub mod deferred;
pub mod error;
pub mod render;

#[cfg(target_arch = "wasm32")]
mod collaborators;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod wasm;

pub use error::WebNavError;

#[cfg(target_arch = "wasm32")]
pub use wasm::ChapterNavWeb;

/// Native builds compile this crate as a stub so `cargo check --workspace` stays
/// green on non-wasm targets.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
pub struct ChapterNavWeb;

#[cfg(not(target_arch = "wasm32"))]
impl ChapterNavWeb {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self
    }
}
