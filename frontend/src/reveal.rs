use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{window, HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};
use yew::prelude::*;

use crate::config::{REVEAL_ROOT_MARGIN, REVEAL_SELECTOR, REVEAL_THRESHOLD};
use crate::display::{html_elements, set_class};
use crate::error::{isolate, UiError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealKind {
    /// Position among all article cards on the page.
    ArticleCard(usize),
    FeaturedArticle,
    Other,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RevealEffect {
    pub class: Option<&'static str>,
    pub delay: Option<String>,
}

pub fn reveal_effect(kind: RevealKind) -> RevealEffect {
    match kind {
        RevealKind::ArticleCard(index) => RevealEffect {
            class: Some("slide-in"),
            delay: Some(format!("{}ms", index * 100)),
        },
        RevealKind::FeaturedArticle => RevealEffect {
            class: Some("scale-in"),
            delay: Some("0.2s".to_string()),
        },
        RevealKind::Other => RevealEffect { class: None, delay: None },
    }
}

fn classify(element: &HtmlElement, cards: &[HtmlElement]) -> RevealKind {
    let classes = element.class_list();
    if classes.contains("article-card") {
        let index = cards.iter().position(|c| c == element).unwrap_or(0);
        RevealKind::ArticleCard(index)
    } else if classes.contains("featured-article") {
        RevealKind::FeaturedArticle
    } else {
        RevealKind::Other
    }
}

fn reveal(element: &HtmlElement) {
    set_class(element, "revealed", true);
    let Some(document) = element.owner_document() else {
        return;
    };
    let cards = html_elements(&document, ".article-card");
    let effect = reveal_effect(classify(element, &cards));
    if let Some(delay) = effect.delay {
        let _ = element.style().set_property("animation-delay", &delay);
    }
    if let Some(class) = effect.class {
        set_class(element, class, true);
    }
}

/// Keeps the observer and its callback alive; disconnects on drop.
pub struct RevealObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl Drop for RevealObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

fn observe() -> Result<RevealObserver, UiError> {
    let document = window()
        .and_then(|w| w.document())
        .ok_or_else(|| UiError::MissingElement("document".into()))?;

    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(|entries: Array, _| {
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                continue;
            };
            if !entry.is_intersecting() {
                continue;
            }
            if let Ok(element) = entry.target().dyn_into::<HtmlElement>() {
                reveal(&element);
            }
        }
    });

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
    options.set_root_margin(REVEAL_ROOT_MARGIN);
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;

    let targets = html_elements(&document, REVEAL_SELECTOR);
    for element in &targets {
        set_class(element, "scroll-reveal", true);
        observer.observe(element);
    }
    log::debug!("observing {} elements for reveal", targets.len());

    Ok(RevealObserver { observer, _callback: callback })
}

/// Observes the page's cards, widgets and section headers and animates them
/// in as they scroll into view. Re-runs whenever `generation` changes so
/// newly rendered cards are picked up.
#[hook]
pub fn use_reveal_on_scroll(generation: usize) {
    use_effect_with_deps(
        move |_| {
            let observer = isolate("reveal animations", observe());
            move || drop(observer)
        },
        generation,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cards_stagger_by_position() {
        assert_eq!(reveal_effect(RevealKind::ArticleCard(0)).delay.as_deref(), Some("0ms"));
        assert_eq!(reveal_effect(RevealKind::ArticleCard(3)).delay.as_deref(), Some("300ms"));
        assert_eq!(reveal_effect(RevealKind::ArticleCard(2)).class, Some("slide-in"));
    }

    #[test]
    fn featured_scales_in_after_a_beat() {
        let effect = reveal_effect(RevealKind::FeaturedArticle);
        assert_eq!(effect.class, Some("scale-in"));
        assert_eq!(effect.delay.as_deref(), Some("0.2s"));
    }

    #[test]
    fn other_elements_only_reveal() {
        assert_eq!(reveal_effect(RevealKind::Other), RevealEffect { class: None, delay: None });
    }
}
