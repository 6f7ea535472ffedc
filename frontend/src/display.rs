use std::cell::RefCell;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, EventTarget, HtmlElement, Window};

use crate::controller::{Layout, ScrollSnapshot, Section, ShapeTransform, UiState};
use crate::error::UiError;

pub const HEADER_ID: &str = "header";
pub const PROGRESS_ID: &str = "scrollProgress";
pub const FAB_ID: &str = "fab";
/// Only top-level sections are tracked, so their intervals stack.
pub const SECTION_SELECTOR: &str = "main > section[id]";
pub const SHAPE_SELECTOR: &str = ".floating-shape";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    Scroll,
    Resize,
    VisibilityChange,
}

impl PageEvent {
    pub fn name(self) -> &'static str {
        match self {
            PageEvent::Scroll => "scroll",
            PageEvent::Resize => "resize",
            PageEvent::VisibilityChange => "visibilitychange",
        }
    }
}

/// Drop guard for an event listener. Dropping it unsubscribes.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self { cancel: Some(Box::new(cancel)) }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

/// Adds a DOM listener that lives as long as the returned guard.
pub fn listen<F>(target: &EventTarget, event: &'static str, handler: F) -> Result<Subscription, UiError>
where
    F: FnMut(web_sys::Event) + 'static,
{
    let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    let target = target.clone();
    Ok(Subscription::new(move || {
        let _ = target.remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    }))
}

/// Everything the scroll runtime needs from the page.
pub trait DisplayLayer {
    fn read_layout(&self) -> Result<Layout, UiError>;
    fn read_scroll(&self) -> ScrollSnapshot;
    /// Must be idempotent: applying the same state twice changes nothing.
    fn apply_ui_state(&self, state: &UiState);
    /// Runs `callback` once, on the next rendered frame.
    fn request_frame(&self, callback: Box<dyn FnOnce()>);
    fn subscribe(&self, event: PageEvent, callback: Box<dyn FnMut()>) -> Result<Subscription, UiError>;
    fn page_hidden(&self) -> bool;
    fn apply_visibility(&self, hidden: bool);
}

/// One concrete change to the page.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayOp {
    ProgressWidth(f64),
    HeaderScrolled(bool),
    FabVisible(bool),
    ActiveLink { previous: Option<String>, next: Option<String> },
    Shape { index: usize, transform: ShapeTransform },
}

/// Diffs `next` against what was last applied. With no previous state every
/// field is written.
pub fn reconcile(previous: Option<&UiState>, next: &UiState) -> Vec<DisplayOp> {
    let mut ops = Vec::new();
    let prev = match previous {
        Some(prev) => prev,
        None => {
            ops.push(DisplayOp::ProgressWidth(next.progress_percent));
            ops.push(DisplayOp::HeaderScrolled(next.header_scrolled));
            ops.push(DisplayOp::FabVisible(next.fab_visible));
            ops.push(DisplayOp::ActiveLink { previous: None, next: next.active_section_id.clone() });
            ops.extend(
                next.shapes
                    .iter()
                    .enumerate()
                    .map(|(index, t)| DisplayOp::Shape { index, transform: *t }),
            );
            return ops;
        }
    };

    if prev.progress_percent != next.progress_percent {
        ops.push(DisplayOp::ProgressWidth(next.progress_percent));
    }
    if prev.header_scrolled != next.header_scrolled {
        ops.push(DisplayOp::HeaderScrolled(next.header_scrolled));
    }
    if prev.fab_visible != next.fab_visible {
        ops.push(DisplayOp::FabVisible(next.fab_visible));
    }
    if prev.active_section_id != next.active_section_id {
        ops.push(DisplayOp::ActiveLink {
            previous: prev.active_section_id.clone(),
            next: next.active_section_id.clone(),
        });
    }
    for (index, transform) in next.shapes.iter().enumerate() {
        if prev.shapes.get(index) != Some(transform) {
            ops.push(DisplayOp::Shape { index, transform: *transform });
        }
    }
    ops
}

pub fn nav_link_selector(section_id: &str) -> String {
    format!(".nav__link[href=\"#{}\"]", section_id)
}

pub fn html_elements(document: &Document, selector: &str) -> Vec<HtmlElement> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

fn element_by_id(document: &Document, id: &str) -> Option<HtmlElement> {
    let found = document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok());
    if found.is_none() {
        log::warn!("{}", UiError::MissingElement(format!("#{}", id)));
    }
    found
}

pub fn set_class(element: &HtmlElement, class: &str, on: bool) {
    let _ = element.class_list().toggle_with_force(class, on);
}

/// The browser page. Missing optional elements are logged once at
/// construction and their updates skipped afterwards.
pub struct DomDisplay {
    window: Window,
    document: Document,
    header: Option<HtmlElement>,
    progress: Option<HtmlElement>,
    fab: Option<HtmlElement>,
    applied: RefCell<Option<UiState>>,
}

impl DomDisplay {
    pub fn new() -> Result<Self, UiError> {
        let window = web_sys::window().ok_or_else(|| UiError::MissingElement("window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| UiError::MissingElement("document".into()))?;
        Ok(Self {
            header: element_by_id(&document, HEADER_ID),
            progress: element_by_id(&document, PROGRESS_ID),
            fab: element_by_id(&document, FAB_ID),
            window,
            document,
            applied: RefCell::new(None),
        })
    }

    fn run(&self, op: &DisplayOp) {
        match op {
            DisplayOp::ProgressWidth(percent) => {
                if let Some(bar) = &self.progress {
                    let _ = bar.style().set_property("width", &format!("{}%", percent));
                }
            }
            DisplayOp::HeaderScrolled(on) => {
                if let Some(header) = &self.header {
                    set_class(header, "scrolled", *on);
                }
            }
            DisplayOp::FabVisible(on) => {
                if let Some(fab) = &self.fab {
                    set_class(fab, "visible", *on);
                }
            }
            DisplayOp::ActiveLink { previous, next } => {
                log::trace!("active section {:?} -> {:?}", previous, next);
                // Clear every lit link, not just `previous`: a nav click may
                // have lit one directly.
                for link in html_elements(&self.document, ".nav__link.active") {
                    set_class(&link, "active", false);
                }
                if let Some(id) = next {
                    for link in html_elements(&self.document, &nav_link_selector(id)) {
                        set_class(&link, "active", true);
                    }
                }
            }
            DisplayOp::Shape { index, transform } => {
                if let Some(shape) = html_elements(&self.document, SHAPE_SELECTOR).get(*index) {
                    let _ = shape.style().set_property("transform", &transform.css());
                }
            }
        }
    }
}

impl DisplayLayer for DomDisplay {
    fn read_layout(&self) -> Result<Layout, UiError> {
        let sections = html_elements(&self.document, SECTION_SELECTOR)
            .into_iter()
            .map(|el| Section::new(el.id(), el.offset_top() as f64, el.offset_height() as f64))
            .collect();
        Ok(Layout {
            sections,
            header_height: self.header.as_ref().map(|h| h.offset_height() as f64).unwrap_or(0.0),
            shape_count: html_elements(&self.document, SHAPE_SELECTOR).len(),
        })
    }

    fn read_scroll(&self) -> ScrollSnapshot {
        let viewport_height = self
            .window
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or(0.0);
        let document_height = self
            .document
            .document_element()
            .map(|root| root.scroll_height() as f64)
            .unwrap_or(0.0);
        ScrollSnapshot {
            scroll_y: self.window.scroll_y().unwrap_or(0.0),
            viewport_height,
            document_height,
        }
    }

    fn apply_ui_state(&self, state: &UiState) {
        let mut applied = self.applied.borrow_mut();
        for op in reconcile(applied.as_ref(), state) {
            self.run(&op);
        }
        *applied = Some(state.clone());
    }

    fn request_frame(&self, callback: Box<dyn FnOnce()>) {
        let closure = Closure::once_into_js(callback);
        if let Err(err) = self.window.request_animation_frame(closure.unchecked_ref()) {
            log::warn!("animation frame refused: {}", UiError::from(err));
        }
    }

    fn subscribe(&self, event: PageEvent, callback: Box<dyn FnMut()>) -> Result<Subscription, UiError> {
        let target: EventTarget = match event {
            PageEvent::VisibilityChange => self.document.clone().into(),
            PageEvent::Scroll | PageEvent::Resize => self.window.clone().into(),
        };
        let mut callback = callback;
        listen(&target, event.name(), move |_| callback())
    }

    fn page_hidden(&self) -> bool {
        self.document.hidden()
    }

    fn apply_visibility(&self, hidden: bool) {
        if let Some(body) = self.document.body() {
            set_class(&body, "page-hidden", hidden);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn state(progress: f64, active: Option<&str>) -> UiState {
        UiState {
            progress_percent: progress,
            header_scrolled: progress > 10.0,
            fab_visible: false,
            active_section_id: active.map(str::to_string),
            shapes: vec![ShapeTransform { translate_y: -progress, rotate_deg: 0.0 }],
        }
    }

    #[test]
    fn first_apply_writes_everything() {
        let ops = reconcile(None, &state(5.0, Some("intro")));
        assert_eq!(ops.len(), 5);
        assert!(ops.contains(&DisplayOp::ActiveLink { previous: None, next: Some("intro".into()) }));
    }

    #[test]
    fn reapplying_same_state_is_a_no_op() {
        let s = state(42.0, Some("intro"));
        assert!(reconcile(Some(&s), &s).is_empty());
    }

    #[test]
    fn only_changed_fields_are_written() {
        let before = state(5.0, Some("intro"));
        let after = UiState { progress_percent: 8.0, ..before.clone() };
        assert_eq!(reconcile(Some(&before), &after), vec![DisplayOp::ProgressWidth(8.0)]);

        let moved = state(20.0, Some("pricing"));
        let ops = reconcile(Some(&before), &moved);
        assert!(ops.contains(&DisplayOp::HeaderScrolled(true)));
        assert!(ops.contains(&DisplayOp::ActiveLink {
            previous: Some("intro".into()),
            next: Some("pricing".into()),
        }));
        assert!(ops.iter().any(|op| matches!(op, DisplayOp::Shape { index: 0, .. })));
    }

    #[test]
    fn subscription_cancels_on_drop() {
        let cancelled = Rc::new(Cell::new(false));
        let flag = cancelled.clone();
        let sub = Subscription::new(move || flag.set(true));
        assert!(!cancelled.get());
        drop(sub);
        assert!(cancelled.get());
    }

    #[test]
    fn nav_selector_targets_hash_links() {
        assert_eq!(nav_link_selector("about"), ".nav__link[href=\"#about\"]");
        assert_eq!(PageEvent::VisibilityChange.name(), "visibilitychange");
    }
}
