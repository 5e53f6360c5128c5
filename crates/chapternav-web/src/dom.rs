#![forbid(unsafe_code)]

//! The chapter list as it exists in the page.

use chapternav_core::config::ChapterNavConfig;
use chapternav_core::{ChapterEntry, ChapterList, EntryMarkers, EntryNode};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, Node};

use crate::error::WebNavError;
use crate::render::{class_toggles, css_opacity, css_px};

fn dom_error(err: wasm_bindgen::JsValue) -> WebNavError {
    WebNavError::Dom(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

fn select_all(root: &Element, selector: &str) -> Result<Vec<Element>, WebNavError> {
    let nodes = root.query_selector_all(selector).map_err(dom_error)?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// Entry elements in visual order, plus the selectors used to reach their
/// parts.
#[derive(Debug)]
pub(crate) struct DomEntries {
    entries: Vec<Element>,
    config: ChapterNavConfig,
}

impl DomEntries {
    pub(crate) fn collect(
        container: &Element,
        config: ChapterNavConfig,
    ) -> Result<Self, WebNavError> {
        let entries = select_all(container, &config.selectors.entries)?;
        Ok(Self { entries, config })
    }

    pub(crate) fn elements(&self) -> &[Element] {
        &self.entries
    }

    fn article_id(&self, entry: &Element) -> Option<String> {
        entry
            .query_selector(&self.config.selectors.anchor)
            .ok()
            .flatten()?
            .get_attribute(&self.config.selectors.article_attribute)
    }

    fn is_disabled(&self, entry: &Element) -> bool {
        entry
            .class_list()
            .contains(&self.config.class_names.disabled)
    }

    fn has_read_class(&self, entry: &Element) -> bool {
        entry.class_list().contains(&self.config.class_names.read)
    }

    fn overlay_height(&self, entry: &Element) -> f64 {
        entry
            .query_selector(&self.config.selectors.overlay)
            .ok()
            .flatten()
            .map_or(0.0, |overlay| overlay.get_bounding_client_rect().height())
    }

    /// Build the model from the page. Read markers already in the markup
    /// are kept.
    pub(crate) fn to_list(&self) -> ChapterList {
        self.entries
            .iter()
            .map(|entry| {
                let model = match self.article_id(entry) {
                    Some(id) => ChapterEntry::new(id),
                    None => ChapterEntry::placeholder(),
                };
                model
                    .disabled(self.is_disabled(entry))
                    .read(self.has_read_class(entry))
                    .overlay_height(self.overlay_height(entry))
            })
            .collect()
    }

    /// Refresh what content rules and layout may have changed since the
    /// last call.
    pub(crate) fn sync_into(&self, list: &mut ChapterList) {
        for (index, element) in self.entries.iter().enumerate() {
            if let Some(entry) = list.get_mut(index) {
                entry.set_disabled(self.is_disabled(element));
                entry.set_overlay_height(self.overlay_height(element));
                if self.has_read_class(element) {
                    entry.mark_read();
                }
            }
        }
    }

    /// Write markers back onto the page.
    pub(crate) fn render(&self, markers: impl Iterator<Item = EntryMarkers>) {
        for (element, markers) in self.entries.iter().zip(markers) {
            let classes = element.class_list();
            for (class, present) in class_toggles(&markers, &self.config.class_names) {
                if let Err(err) = classes.toggle_with_force(class, present) {
                    chapternav_core::warn!(class, error = ?err, "class toggle failed");
                }
            }

            let opacity = css_opacity(markers.description_opacity);
            for description in self.parts(element, &self.config.selectors.description) {
                set_style(&description, "opacity", &opacity);
            }

            let Some(top) = markers.overlay_top.map(css_px) else {
                continue;
            };
            for overlay in self.parts(element, &self.config.selectors.overlay) {
                set_style(&overlay, "top", &top);
            }
        }
    }

    fn parts(&self, entry: &Element, selector: &str) -> Vec<HtmlElement> {
        select_all(entry, selector)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|element| element.dyn_into::<HtmlElement>().ok())
            .collect()
    }
}

fn set_style(element: &HtmlElement, property: &str, value: &str) {
    if let Err(err) = element.style().set_property(property, value) {
        chapternav_core::warn!(property, error = ?err, "style update failed");
    }
}

/// An event target inside (or outside) the chapter list.
pub(crate) struct DomTarget<'a> {
    node: Node,
    entries: &'a [Element],
}

impl<'a> DomTarget<'a> {
    pub(crate) fn new(node: Node, entries: &'a [Element]) -> Self {
        Self { node, entries }
    }
}

impl EntryNode for DomTarget<'_> {
    fn entry_index(&self) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.is_same_node(Some(&self.node)))
    }

    fn parent(&self) -> Option<Self> {
        Some(Self {
            node: self.node.parent_node()?,
            entries: self.entries,
        })
    }
}
