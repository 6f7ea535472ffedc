#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::collections::HashMap;

use gloo_timers::callback::Timeout;
use serde::{Deserialize, Serialize};
use web_sys::window;
use yew::prelude::*;

use crate::config::{PRESS_FEEDBACK_MS, THEME_STORAGE_KEY, THEME_TRANSITION_MS};
use crate::error::UiError;
use crate::interactions::press_feedback;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Theme> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Where the theme preference lives between page loads.
pub trait ThemeStore {
    fn load(&self) -> Result<Option<String>, UiError>;
    fn save(&self, value: &str) -> Result<(), UiError>;
}

pub struct LocalStorageStore;

impl LocalStorageStore {
    fn storage() -> Result<web_sys::Storage, UiError> {
        window()
            .ok_or_else(|| UiError::Storage("no window".into()))?
            .local_storage()?
            .ok_or_else(|| UiError::Storage("localStorage disabled".into()))
    }
}

impl ThemeStore for LocalStorageStore {
    fn load(&self) -> Result<Option<String>, UiError> {
        Ok(Self::storage()?.get_item(THEME_STORAGE_KEY)?)
    }

    fn save(&self, value: &str) -> Result<(), UiError> {
        Ok(Self::storage()?.set_item(THEME_STORAGE_KEY, value)?)
    }
}

/// In-memory store; survives "reloads" as long as the value is kept around.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

#[cfg(test)]
impl ThemeStore for MemoryStore {
    fn load(&self) -> Result<Option<String>, UiError> {
        Ok(self.values.borrow().get(THEME_STORAGE_KEY).cloned())
    }

    fn save(&self, value: &str) -> Result<(), UiError> {
        self.values
            .borrow_mut()
            .insert(THEME_STORAGE_KEY.to_string(), value.to_string());
        Ok(())
    }
}

/// Persisted theme, falling back to dark when nothing (or garbage) is stored.
pub fn load_theme(store: &impl ThemeStore) -> Theme {
    match store.load() {
        Ok(Some(value)) => Theme::parse(&value).unwrap_or_else(|| {
            log::warn!("ignoring stored theme {:?}", value);
            Theme::default()
        }),
        Ok(None) => Theme::default(),
        Err(err) => {
            log::warn!("theme preference unreadable: {}", err);
            Theme::default()
        }
    }
}

/// Flips `current` and persists the result. A failed write still flips the
/// theme for this page view.
pub fn toggle_theme(store: &impl ThemeStore, current: Theme) -> Theme {
    let next = current.toggled();
    if let Err(err) = store.save(next.as_str()) {
        log::warn!("theme preference not saved: {}", err);
    }
    next
}

fn apply_theme(theme: Theme, animate: bool) {
    let Some(root) = window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
    else {
        return;
    };
    if animate {
        let _ = root.class_list().add_1("theme-transition");
        let root = root.clone();
        Timeout::new(THEME_TRANSITION_MS, move || {
            let _ = root.class_list().remove_1("theme-transition");
        })
        .forget();
    }
    let _ = root.set_attribute("data-color-scheme", theme.as_str());
}

#[function_component(ThemeToggle)]
pub fn theme_toggle() -> Html {
    let theme = use_state(|| load_theme(&LocalStorageStore));
    let button = use_node_ref();

    {
        let current = *theme;
        use_effect_with_deps(
            move |_| {
                apply_theme(current, false);
                || ()
            },
            (),
        );
    }

    let onclick = {
        let theme = theme.clone();
        let button = button.clone();
        Callback::from(move |_: MouseEvent| {
            let next = toggle_theme(&LocalStorageStore, *theme);
            apply_theme(next, true);
            if let Some(el) = button.cast::<web_sys::HtmlElement>() {
                press_feedback(&el, "scale(0.9)", PRESS_FEEDBACK_MS);
            }
            theme.set(next);
        })
    };

    let icon = match *theme {
        Theme::Dark => "☀",
        Theme::Light => "☾",
    };

    html! {
        <button id="themeToggle" class="theme-toggle" ref={button} {onclick}
            aria-label={format!("Switch to {} theme", theme.toggled().as_str())}>
            {icon}
        </button>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_dark() {
        assert_eq!(load_theme(&MemoryStore::default()), Theme::Dark);
    }

    #[test]
    fn toggling_twice_restores_persisted_value() {
        let store = MemoryStore::default();
        store.save("light").unwrap();
        let start = load_theme(&store);
        let once = toggle_theme(&store, start);
        assert_eq!(once, Theme::Dark);
        assert_eq!(store.load().unwrap().as_deref(), Some("dark"));
        let twice = toggle_theme(&store, once);
        assert_eq!(twice, start);
        assert_eq!(store.load().unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn choice_survives_reload() {
        let store = MemoryStore::default();
        let chosen = toggle_theme(&store, load_theme(&store));
        // a fresh page view reads the same store back
        assert_eq!(load_theme(&store), chosen);
        assert_eq!(chosen, Theme::Light);
    }

    #[test]
    fn garbage_falls_back_to_default() {
        let store = MemoryStore::default();
        store.save("sepia").unwrap();
        assert_eq!(load_theme(&store), Theme::Dark);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Theme::Light).unwrap(), "\"light\"");
        assert_eq!(serde_json::from_str::<Theme>("\"dark\"").unwrap(), Theme::Dark);
    }

    struct BrokenStore;

    impl ThemeStore for BrokenStore {
        fn load(&self) -> Result<Option<String>, UiError> {
            Err(UiError::Storage("quota".into()))
        }
        fn save(&self, _: &str) -> Result<(), UiError> {
            Err(UiError::Storage("quota".into()))
        }
    }

    #[test]
    fn storage_failures_are_not_fatal() {
        assert_eq!(load_theme(&BrokenStore), Theme::Dark);
        assert_eq!(toggle_theme(&BrokenStore, Theme::Dark), Theme::Light);
    }
}
