use wasm_bindgen::JsCast;
use web_sys::{window, HtmlElement, ScrollBehavior, ScrollToOptions};

use crate::config::NAV_SCROLL_GAP;
use crate::display::HEADER_ID;
use crate::error::UiError;

/// Where to scroll so a section's top sits just under the sticky header.
pub fn scroll_target(section_top: f64, header_height: f64) -> f64 {
    section_top - header_height - NAV_SCROLL_GAP
}

pub fn section_id_from_href(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

pub fn smooth_scroll_to(top: f64) -> Result<(), UiError> {
    let window = window().ok_or_else(|| UiError::MissingElement("window".into()))?;
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
    Ok(())
}

/// Smooth-scrolls to the section with `id`.
pub fn scroll_to_section(id: &str) -> Result<(), UiError> {
    let document = window()
        .and_then(|w| w.document())
        .ok_or_else(|| UiError::MissingElement("document".into()))?;
    let section = document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .ok_or_else(|| UiError::MissingElement(format!("#{}", id)))?;
    let header_height = document
        .get_element_by_id(HEADER_ID)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .map(|h| h.offset_height() as f64)
        .unwrap_or(0.0);
    smooth_scroll_to(scroll_target(section.offset_top() as f64, header_height))
}
