#![forbid(unsafe_code)]

//! Core collaborator traits backed by plain JS objects.
//!
//! Each adapter holds the JS object and calls its methods by name. A
//! missing method, a throwing method, or a non-boolean result degrades to
//! the "nothing happened" answer (`false` / `None`) and is logged.

use std::num::NonZeroUsize;

use chapternav_core::{Navigation, PageDirection, ProgressStack, ReadState, Sharer};
use js_sys::{Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::Document;

use crate::error::WebNavError;

/// Fetch `collaborators[name]`, which must be an object.
pub(crate) fn member(collaborators: &JsValue, name: &'static str) -> Result<JsValue, WebNavError> {
    let value = Reflect::get(collaborators, &JsValue::from_str(name))
        .map_err(|_| WebNavError::MissingCollaborator(name))?;
    if value.is_object() {
        Ok(value)
    } else {
        Err(WebNavError::MissingCollaborator(name))
    }
}

fn call(target: &JsValue, method: &str, args: &[JsValue]) -> Option<JsValue> {
    let function = Reflect::get(target, &JsValue::from_str(method))
        .ok()
        .and_then(|value| value.dyn_into::<Function>().ok());
    let Some(function) = function else {
        chapternav_core::warn!(method, "collaborator method missing");
        return None;
    };
    let result = match args {
        [] => function.call0(target),
        [a] => function.call1(target, a),
        [a, b] => function.call2(target, a, b),
        _ => function.apply(target, &args.iter().collect::<js_sys::Array>()),
    };
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            chapternav_core::warn!(method, error = ?err, "collaborator method threw");
            None
        }
    }
}

fn call_bool(target: &JsValue, method: &str, args: &[JsValue]) -> bool {
    call(target, method, args).is_some_and(|value| value.is_truthy())
}

fn property_bool(target: &JsValue, name: &str) -> bool {
    Reflect::get(target, &JsValue::from_str(name)).is_ok_and(|value| value.is_truthy())
}

/// `collaborators.navigation`, plus the document for current-page lookup.
#[derive(Debug)]
pub(crate) struct JsNavigation {
    object: JsValue,
    document: Document,
    current_page_selector: String,
}

impl JsNavigation {
    pub(crate) fn new(object: JsValue, document: Document, current_page_selector: String) -> Self {
        Self {
            object,
            document,
            current_page_selector,
        }
    }
}

impl Navigation for JsNavigation {
    fn current_page_class(&self) -> Option<String> {
        self.document
            .query_selector(&self.current_page_selector)
            .ok()
            .flatten()?
            .get_attribute("class")
    }

    fn class_to_article(&self, page_class: &str) -> Option<String> {
        call(&self.object, "classToArticle", &[JsValue::from_str(page_class)])?.as_string()
    }

    fn is_home_page(&self) -> bool {
        call_bool(&self.object, "isHomePage", &[])
    }

    fn is_credits_page(&self) -> bool {
        call_bool(&self.object, "isCreditsPage", &[])
    }

    fn is_foreword(&self) -> bool {
        call_bool(&self.object, "isForeword", &[])
    }

    fn is_last_page(&self) -> bool {
        call_bool(&self.object, "isLastPage", &[])
    }

    fn go_to_page(&mut self, article_id: &str, direction: PageDirection) -> bool {
        call_bool(
            &self.object,
            "goToPage",
            &[
                JsValue::from_str(article_id),
                JsValue::from_f64(f64::from(direction.step())),
            ],
        )
    }

    fn has_navigated(&self) -> bool {
        property_bool(&self.object, "hasNavigated")
    }
}

/// `collaborators.storage`.
#[derive(Debug)]
pub(crate) struct JsReadState(pub(crate) JsValue);

impl ReadState for JsReadState {
    fn has_article_been_read(&self, article_id: &str) -> bool {
        call_bool(&self.0, "hasArticleBeenRead", &[JsValue::from_str(article_id)])
    }

    fn is_first_time_visitor(&self) -> bool {
        property_bool(&self.0, "isFirstTimeVisitor")
    }
}

/// `collaborators.paperstack`.
#[derive(Debug)]
pub(crate) struct JsPaperStack(pub(crate) JsValue);

impl ProgressStack for JsPaperStack {
    fn update_stack(&mut self, progress: f64) {
        call(&self.0, "updateStack", &[JsValue::from_f64(progress)]);
    }
}

/// `collaborators.sharing`.
#[derive(Debug)]
pub(crate) struct JsSharer(pub(crate) JsValue);

impl Sharer for JsSharer {
    fn update_sharer_index(&mut self, position: NonZeroUsize) {
        call(
            &self.0,
            "updateSharerIndex",
            &[JsValue::from_f64(position.get() as f64)],
        );
    }
}
