//! Decorative micro-interactions: hover lifts, press feedback, click
//! ripples and the keyboard shortcuts. None of these share state with
//! anything else; a failure here only costs an effect.

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, MouseEvent};
use yew::prelude::*;

use crate::config::{RIPPLE_LIFETIME_MS, TAG_STAGGER_MS};
use crate::error::UiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverTarget {
    Button,
    FeaturedArticle,
    ArticleCard,
    /// Category links, topic tags and social links.
    Chip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Enter,
    Leave,
    Down,
    Up,
}

/// Inline transform for a target in a given pointer phase; empty resets it.
pub fn hover_transform(target: HoverTarget, phase: PointerPhase) -> &'static str {
    match (target, phase) {
        (HoverTarget::Button, PointerPhase::Enter | PointerPhase::Up) => "translateY(-2px)",
        (HoverTarget::Button, PointerPhase::Down) => "translateY(0) scale(0.98)",
        (HoverTarget::FeaturedArticle, PointerPhase::Enter) => "translateY(-8px) scale(1.02)",
        (HoverTarget::ArticleCard, PointerPhase::Enter) => "translateX(8px) scale(1.01)",
        (HoverTarget::Chip, PointerPhase::Enter) => "scale(1.05)",
        _ => "",
    }
}

impl HoverTarget {
    pub fn selector(self) -> &'static str {
        match self {
            HoverTarget::Button => ".btn",
            HoverTarget::FeaturedArticle => ".featured-article",
            HoverTarget::ArticleCard => ".article-card",
            HoverTarget::Chip => ".category-link, .topic-tag, .social-link",
        }
    }
}

/// The element matching `selector` that the event happened in. Yew
/// delegates listeners to the app root, so `current_target` is not it.
pub fn event_element(event: &web_sys::Event, selector: &str) -> Option<HtmlElement> {
    event
        .target()
        .and_then(|t| t.dyn_into::<Element>().ok())
        .and_then(|el| el.closest(selector).ok().flatten())
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

fn set_transform(element: &HtmlElement, value: &str) {
    let _ = element.style().set_property("transform", value);
}

fn transform_on(target: HoverTarget, phase: PointerPhase) -> Callback<MouseEvent> {
    Callback::from(move |e: MouseEvent| {
        if let Some(el) = event_element(&e, target.selector()) {
            set_transform(&el, hover_transform(target, phase));
        }
    })
}

/// Mouse handlers that apply [`hover_transform`] to the event's current target.
#[derive(Clone)]
pub struct HoverHandlers {
    pub enter: Callback<MouseEvent>,
    pub leave: Callback<MouseEvent>,
    pub down: Callback<MouseEvent>,
    pub up: Callback<MouseEvent>,
}

impl HoverHandlers {
    pub fn new(target: HoverTarget) -> Self {
        Self {
            enter: transform_on(target, PointerPhase::Enter),
            leave: transform_on(target, PointerPhase::Leave),
            down: transform_on(target, PointerPhase::Down),
            up: transform_on(target, PointerPhase::Up),
        }
    }
}

/// Briefly applies `transform`, then clears it.
pub fn press_feedback(element: &HtmlElement, transform: &str, duration_ms: u32) {
    set_transform(element, transform);
    let element = element.clone();
    Timeout::new(duration_ms, move || set_transform(&element, "")).forget();
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RippleGeometry {
    pub size: f64,
    pub left: f64,
    pub top: f64,
}

/// A circle as large as the element's longer side, centered on the click.
pub fn ripple_geometry(rect_left: f64, rect_top: f64, width: f64, height: f64, click_x: f64, click_y: f64) -> RippleGeometry {
    let size = width.max(height);
    RippleGeometry {
        size,
        left: click_x - rect_left - size / 2.0,
        top: click_y - rect_top - size / 2.0,
    }
}

pub fn spawn_ripple(event: &MouseEvent, host: &HtmlElement) -> Result<(), UiError> {
    let document = host
        .owner_document()
        .ok_or_else(|| UiError::MissingElement("document".into()))?;
    let rect = host.get_bounding_client_rect();
    let geometry = ripple_geometry(
        rect.left(),
        rect.top(),
        rect.width(),
        rect.height(),
        event.client_x() as f64,
        event.client_y() as f64,
    );

    let ripple: HtmlElement = document.create_element("span")?.dyn_into().map_err(|_| UiError::Dom("span is not an HtmlElement".into()))?;
    ripple.set_class_name("ripple-effect");
    let style = ripple.style();
    style.set_property("width", &format!("{}px", geometry.size))?;
    style.set_property("height", &format!("{}px", geometry.size))?;
    style.set_property("left", &format!("{}px", geometry.left))?;
    style.set_property("top", &format!("{}px", geometry.top))?;

    host.style().set_property("position", "relative")?;
    host.style().set_property("overflow", "hidden")?;
    host.append_child(&ripple)?;

    Timeout::new(RIPPLE_LIFETIME_MS, move || ripple.remove()).forget();
    Ok(())
}

/// Hover glow on a card plus the avatar tilt and a staggered tag lift.
pub fn card_hover(card: &HtmlElement, entering: bool) {
    let _ = card.style().set_property(
        "box-shadow",
        if entering { "0 20px 40px rgba(166, 123, 91, 0.2)" } else { "" },
    );
    if let Ok(Some(avatar)) = card.query_selector(".author__avatar") {
        if let Ok(avatar) = avatar.dyn_into::<HtmlElement>() {
            set_transform(&avatar, if entering { "scale(1.1) rotate(5deg)" } else { "" });
        }
    }
    let Ok(tags) = card.query_selector_all(".tag, .topic-tag") else {
        return;
    };
    for index in 0..tags.length() {
        let Some(tag) = tags.get(index).and_then(|n| n.dyn_into::<HtmlElement>().ok()) else {
            continue;
        };
        if entering {
            Timeout::new(tag_delay_ms(index), move || set_transform(&tag, "translateY(-2px)")).forget();
        } else {
            set_transform(&tag, "");
        }
    }
}

pub fn tag_delay_ms(index: u32) -> u32 {
    index * TAG_STAGGER_MS
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    OpenSearch,
    CloseSearch,
}

pub fn shortcut_for(key: &str, ctrl: bool, meta: bool) -> Option<Shortcut> {
    match key {
        "Escape" => Some(Shortcut::CloseSearch),
        "/" if !ctrl && !meta => Some(Shortcut::OpenSearch),
        _ => None,
    }
}

/// True when the click landed inside an element matching `selector`.
pub fn click_inside(target: Option<Element>, selector: &str) -> bool {
    target
        .and_then(|el| el.closest(selector).ok().flatten())
        .is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_transforms_follow_pointer() {
        assert_eq!(hover_transform(HoverTarget::Button, PointerPhase::Enter), "translateY(-2px)");
        assert_eq!(hover_transform(HoverTarget::Button, PointerPhase::Down), "translateY(0) scale(0.98)");
        assert_eq!(hover_transform(HoverTarget::Button, PointerPhase::Up), "translateY(-2px)");
        assert_eq!(hover_transform(HoverTarget::Button, PointerPhase::Leave), "");
    }

    #[test]
    fn cards_lift_differently() {
        assert_eq!(hover_transform(HoverTarget::FeaturedArticle, PointerPhase::Enter), "translateY(-8px) scale(1.02)");
        assert_eq!(hover_transform(HoverTarget::ArticleCard, PointerPhase::Enter), "translateX(8px) scale(1.01)");
        assert_eq!(hover_transform(HoverTarget::Chip, PointerPhase::Down), "");
    }

    #[test]
    fn ripple_centers_on_click() {
        let g = ripple_geometry(100.0, 50.0, 300.0, 200.0, 250.0, 150.0);
        assert_eq!(g.size, 300.0);
        assert_eq!(g.left, 0.0);
        assert_eq!(g.top, -50.0);
    }

    #[test]
    fn shortcuts() {
        assert_eq!(shortcut_for("Escape", false, false), Some(Shortcut::CloseSearch));
        assert_eq!(shortcut_for("/", false, false), Some(Shortcut::OpenSearch));
        assert_eq!(shortcut_for("/", true, false), None);
        assert_eq!(shortcut_for("/", false, true), None);
        assert_eq!(shortcut_for("a", false, false), None);
    }

    #[test]
    fn tags_stagger() {
        assert_eq!(tag_delay_ms(0), 0);
        assert_eq!(tag_delay_ms(3), 150);
    }
}
