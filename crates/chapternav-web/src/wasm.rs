#![forbid(unsafe_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use chapternav_core::config::ChapterNavConfig;
use chapternav_core::{ChapterNav, EventBindings};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, Node};

use crate::collaborators::{JsNavigation, JsPaperStack, JsReadState, JsSharer, member};
use crate::deferred::DeferredSelections;
use crate::dom::{DomEntries, DomTarget};
use crate::error::WebNavError;

type Controller = ChapterNav<JsNavigation, JsReadState, JsPaperStack, JsSharer>;

fn to_js(err: WebNavError) -> JsValue {
    JsError::new(&err.to_string()).into()
}

/// Controller plus the DOM it renders to.
struct Shared {
    nav: Controller,
    dom: DomEntries,
}

impl Shared {
    /// Sync layout-owned state in, run `f`, replay selections deferred while
    /// `f` ran, render markers out.
    fn run<T>(
        &mut self,
        deferred: &DeferredSelections,
        f: impl FnOnce(&mut Controller, &[Element]) -> T,
    ) -> T {
        self.dom.sync_into(self.nav.list_mut());
        let out = f(&mut self.nav, self.dom.elements());
        let nav = &mut self.nav;
        let replayed = deferred.drain(|article| {
            nav.update_selection(article);
        });
        if replayed > 0 {
            chapternav_core::debug!(replayed, "deferred selections applied");
        }
        self.dom.render(self.nav.all_markers());
        out
    }
}

/// State reachable from both the exported object and its listeners.
struct Host {
    shared: RefCell<Shared>,
    deferred: DeferredSelections,
}

#[derive(Debug, Clone, Copy)]
enum Handler {
    Click,
    MouseOver,
    MouseOut,
}

impl Handler {
    const fn event_type(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::MouseOver => "mouseenter",
            Self::MouseOut => "mouseleave",
        }
    }
}

/// An attached DOM listener. Detaches itself on drop.
struct Listener {
    target: Element,
    event_type: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self.target.remove_event_listener_with_callback(
            self.event_type,
            self.closure.as_ref().unchecked_ref(),
        );
    }
}

fn dispatch(host: &Host, handler: Handler, event: &Event) {
    let is_click = matches!(handler, Handler::Click);
    let Some(node) = event.target().and_then(|t| t.dyn_into::<Node>().ok()) else {
        if is_click {
            event.prevent_default();
        }
        return;
    };
    let Ok(mut shared) = host.shared.try_borrow_mut() else {
        chapternav_core::warn!(event = handler.event_type(), "re-entrant event ignored");
        if is_click {
            event.prevent_default();
        }
        return;
    };
    let prevent_default = shared.run(&host.deferred, |nav, entries| {
        let target = DomTarget::new(node, entries);
        match handler {
            Handler::Click => nav.on_chapter_click(target).prevent_default,
            Handler::MouseOver => {
                nav.on_chapter_mouse_over(target);
                false
            }
            Handler::MouseOut => {
                nav.on_chapter_mouse_out(target);
                false
            }
        }
    });
    if prevent_default {
        event.prevent_default();
    }
}

impl ChapterNavWeb {
    fn build(
        container: Element,
        collaborators: &JsValue,
        options: Option<&str>,
    ) -> Result<Self, WebNavError> {
        let config = match options {
            Some(json) => ChapterNavConfig::from_json(json)?,
            None => ChapterNavConfig::default(),
        };
        let window = web_sys::window().ok_or_else(|| WebNavError::Dom("no window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| WebNavError::Dom("no document".into()))?;

        let navigation = JsNavigation::new(
            member(collaborators, "navigation")?,
            document,
            config.selectors.current_page.clone(),
        );
        let read_state = JsReadState(member(collaborators, "storage")?);
        let stack = JsPaperStack(member(collaborators, "paperstack")?);
        let sharer = JsSharer(member(collaborators, "sharing")?);

        let touch_device = config.touch_device.unwrap_or_else(|| {
            js_sys::Reflect::has(&window, &JsValue::from_str("ontouchstart")).unwrap_or(false)
        });

        let dom = DomEntries::collect(&container, config.clone())?;
        let list = dom.to_list();
        let nav = ChapterNav::with_config(list, config, navigation, read_state, stack, sharer);

        Ok(Self {
            host: Rc::new(Host {
                shared: RefCell::new(Shared { nav, dom }),
                deferred: DeferredSelections::new(),
            }),
            touch_device,
            listeners: Vec::new(),
        })
    }

    fn with_shared<T>(
        &self,
        f: impl FnOnce(&mut Controller, &[Element]) -> T,
    ) -> Result<T, JsValue> {
        let mut shared = self
            .host
            .shared
            .try_borrow_mut()
            .map_err(|_| to_js(WebNavError::Reentrant))?;
        Ok(shared.run(&self.host.deferred, f))
    }
}

/// Chapter navigation bar bound to a DOM container.
///
/// ```js
/// const nav = new ChapterNavWeb(
///   document.getElementById('chapter-nav'),
///   { navigation, storage, paperstack, sharing },
///   JSON.stringify({ fade_duration_ms: 200 }),
/// );
/// nav.initialize();
/// nav.updateReadMarkers();
/// nav.updateSelection();
/// ```
///
/// Collaborators may call `updateSelection` from inside a callback the bar
/// is running (for instance from `goToPage`). Such a call is queued and
/// applied once the running operation is done; it does not throw. Any other
/// method called re-entrantly throws.
#[wasm_bindgen]
pub struct ChapterNavWeb {
    host: Rc<Host>,
    touch_device: bool,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl ChapterNavWeb {
    /// Bind to the entries under `container`.
    ///
    /// `collaborators` must carry `navigation`, `storage`, `paperstack` and
    /// `sharing` objects. `options` is an optional JSON string.
    #[wasm_bindgen(constructor)]
    pub fn new(
        container: Element,
        collaborators: JsValue,
        options: Option<String>,
    ) -> Result<ChapterNavWeb, JsValue> {
        Self::build(container, &collaborators, options.as_deref()).map_err(to_js)
    }

    /// Attach click (and, off touch devices, hover) listeners to every entry
    /// and hide all hover descriptions. Calling twice attaches twice.
    pub fn initialize(&mut self) -> Result<(), JsValue> {
        let touch_device = self.touch_device;
        let bindings = self.with_shared(|nav, _| nav.initialize(touch_device))?;
        let EventBindings { click, hover } = bindings;

        let mut handlers = Vec::with_capacity(3);
        if click {
            handlers.push(Handler::Click);
        }
        if hover {
            handlers.extend([Handler::MouseOver, Handler::MouseOut]);
        }

        let elements = self.host.shared.borrow().dom.elements().to_vec();
        for element in elements {
            for &handler in &handlers {
                let host = Rc::downgrade(&self.host);
                let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                    if let Some(host) = host.upgrade() {
                        dispatch(&host, handler, &event);
                    }
                });
                element
                    .add_event_listener_with_callback(
                        handler.event_type(),
                        closure.as_ref().unchecked_ref(),
                    )
                    .map_err(|err| to_js(WebNavError::Dom(format!("{err:?}"))))?;
                self.listeners.push(Listener {
                    target: element.clone(),
                    event_type: handler.event_type(),
                    closure,
                });
            }
        }
        Ok(())
    }

    /// Apply the `read` marker to every chapter the reader has finished.
    #[wasm_bindgen(js_name = updateReadMarkers)]
    pub fn update_read_markers(&self) -> Result<(), JsValue> {
        self.with_shared(|nav, _| nav.update_read_markers())
    }

    /// Article identifiers of disabled chapters, in visual order.
    #[wasm_bindgen(js_name = getDisabledArticles)]
    pub fn get_disabled_articles(&self) -> Result<Vec<String>, JsValue> {
        self.with_shared(|nav, _| nav.disabled_articles())
    }

    /// Select the chapter of the current page, or `override_article_id`.
    ///
    /// Called while the bar is busy, the request is deferred instead.
    #[wasm_bindgen(js_name = updateSelection)]
    pub fn update_selection(&self, override_article_id: Option<String>) -> Result<(), JsValue> {
        let Ok(mut shared) = self.host.shared.try_borrow_mut() else {
            chapternav_core::debug!("selection deferred while busy");
            self.host.deferred.defer(override_article_id);
            return Ok(());
        };
        shared.run(&self.host.deferred, |nav, _| {
            nav.update_selection(override_article_id.as_deref());
        });
        Ok(())
    }

    /// Reading progress on a 0-1 scale.
    #[wasm_bindgen(js_name = getProgress)]
    pub fn get_progress(&self, override_article_id: Option<String>) -> Result<f64, JsValue> {
        self.with_shared(|nav, _| nav.progress(override_article_id.as_deref()))
    }

    /// Advance hover fades by `dt_ms` milliseconds. Returns whether any fade
    /// is still running, so the host can stop its frame loop.
    pub fn tick(&self, dt_ms: f64) -> Result<bool, JsValue> {
        let dt = Duration::try_from_secs_f64(dt_ms / 1000.0).unwrap_or_default();
        self.with_shared(|nav, _| nav.tick(dt))
    }

    /// Whether the bar should be shown for the current visitor and page.
    #[wasm_bindgen(js_name = shouldBeVisible)]
    pub fn should_be_visible(&self) -> Result<bool, JsValue> {
        self.with_shared(|nav, _| nav.should_be_visible())
    }

    /// Explicit teardown for JS callers. Detaches every listener.
    pub fn destroy(&mut self) {
        self.listeners.clear();
    }
}
