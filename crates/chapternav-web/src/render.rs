#![forbid(unsafe_code)]

//! Projection of entry markers onto CSS.
//!
//! Kept free of `web-sys` so the mapping is testable on native targets.

use chapternav_core::EntryMarkers;
use chapternav_core::config::ClassNames;

/// Class writes for an entry, with whether each class should be present.
///
/// The selected class is forced either way. The read class is only ever
/// added: markup may carry it before the bar loads, and nothing here clears
/// it. The disabled class is owned by content rules and never written.
pub fn class_toggles<'a>(
    markers: &EntryMarkers,
    names: &'a ClassNames,
) -> impl Iterator<Item = (&'a str, bool)> + 'a {
    let read = markers.read.then_some((names.read.as_str(), true));
    std::iter::once((names.selected.as_str(), markers.selected)).chain(read)
}

/// CSS `opacity` value, rounded to three decimals.
#[must_use]
pub fn css_opacity(opacity: f32) -> String {
    let rounded = (opacity.clamp(0.0, 1.0) * 1000.0).round() / 1000.0;
    format!("{rounded}")
}

/// CSS pixel length.
#[must_use]
pub fn css_px(value: f64) -> String {
    if value == 0.0 {
        return "0px".to_string();
    }
    format!("{value}px")
}
