use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use web_sys::{window, HtmlInputElement, KeyboardEvent};
use wasm_bindgen::JsCast;
use yew::prelude::*;

use crate::config::{SEARCH_DEBOUNCE_MS, SEARCH_FOCUS_DELAY_MS};
use crate::content::Article;
use crate::display::{listen, Subscription};
use crate::error::isolate;
use crate::interactions::{click_inside, shortcut_for, Shortcut};

/// Identifies one pending debounced value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Last-write-wins slot. Every `push` supersedes the previous ticket, and a
/// superseded ticket never yields its value.
#[derive(Debug, Default)]
pub struct DebounceSlot<T> {
    generation: u64,
    value: Option<T>,
}

impl<T> DebounceSlot<T> {
    pub fn push(&mut self, value: T) -> Ticket {
        self.generation += 1;
        self.value = Some(value);
        Ticket(self.generation)
    }

    pub fn fire(&mut self, ticket: Ticket) -> Option<T> {
        if ticket.0 == self.generation {
            self.value.take()
        } else {
            None
        }
    }
}

/// Defers `commit` until input has been quiet for `delay_ms`. Replacing the
/// timeout drops, and so cancels, the one still pending.
pub struct Debouncer<T: 'static> {
    delay_ms: u32,
    slot: Rc<RefCell<DebounceSlot<T>>>,
    pending: Option<Timeout>,
    commit: Callback<T>,
}

impl<T: 'static> Debouncer<T> {
    pub fn new(delay_ms: u32, commit: Callback<T>) -> Self {
        Self {
            delay_ms,
            slot: Rc::new(RefCell::new(DebounceSlot { generation: 0, value: None })),
            pending: None,
            commit,
        }
    }

    pub fn push(&mut self, value: T) {
        let ticket = self.slot.borrow_mut().push(value);
        let slot = Rc::clone(&self.slot);
        let commit = self.commit.clone();
        self.pending = Some(Timeout::new(self.delay_ms, move || {
            let ready = slot.borrow_mut().fire(ticket);
            if let Some(value) = ready {
                commit.emit(value);
            }
        }));
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchOutcome {
    pub hidden: HashSet<String>,
    pub show_no_results: bool,
}

pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Hides every article whose text does not contain `query`. An empty query
/// shows everything and never reports "no results".
pub fn filter_articles(query: &str, articles: &[Article]) -> SearchOutcome {
    if query.is_empty() {
        return SearchOutcome::default();
    }
    let hidden: HashSet<String> = articles
        .iter()
        .filter(|a| !a.search_text().contains(query))
        .map(|a| a.slug.clone())
        .collect();
    let show_no_results = hidden.len() == articles.len();
    SearchOutcome { hidden, show_no_results }
}

/// The committed (debounced, normalized) query, shared with whichever page
/// lists articles.
#[derive(Clone, PartialEq)]
pub struct SearchContext {
    pub query: String,
    pub commit: Callback<String>,
}

fn document_listeners(open: UseStateHandle<bool>, input: NodeRef) -> Vec<Subscription> {
    let Some(document) = window().and_then(|w| w.document()) else {
        return Vec::new();
    };
    let mut subscriptions = Vec::new();

    let outside_open = open.clone();
    subscriptions.extend(isolate(
        "search close on outside click",
        listen(&document, "click", move |e| {
            let target = e.target().and_then(|t| t.dyn_into::<web_sys::Element>().ok());
            if !click_inside(target, ".search-container") {
                outside_open.set(false);
            }
        }),
    ));

    subscriptions.extend(isolate(
        "search shortcuts",
        listen(&document, "keydown", move |e| {
            let Some(key) = e.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            match shortcut_for(&key.key(), key.ctrl_key(), key.meta_key()) {
                Some(Shortcut::CloseSearch) => {
                    open.set(false);
                    if let Some(el) = input.cast::<HtmlInputElement>() {
                        let _ = el.blur();
                    }
                }
                Some(Shortcut::OpenSearch) => {
                    // typing a slash into a field is just typing
                    let typing = e
                        .target()
                        .map(|t| t.has_type::<HtmlInputElement>() || t.has_type::<web_sys::HtmlTextAreaElement>())
                        .unwrap_or(false);
                    if !typing {
                        e.prevent_default();
                        open.set(true);
                    }
                }
                None => {}
            }
        }),
    ));
    subscriptions
}

#[function_component(SearchBox)]
pub fn search_box() -> Html {
    let context = use_context::<SearchContext>();
    let open = use_state(|| false);
    let input = use_node_ref();
    let debouncer = {
        let commit = context
            .as_ref()
            .map(|c| c.commit.clone())
            .unwrap_or_else(|| Callback::from(|_: String| ()));
        use_mut_ref(move || Debouncer::new(SEARCH_DEBOUNCE_MS, commit))
    };

    {
        let open = open.clone();
        let input = input.clone();
        use_effect_with_deps(
            move |_| {
                let subscriptions = document_listeners(open, input);
                move || drop(subscriptions)
            },
            (),
        );
    }

    // Focus once the slide-in transition has had time to run.
    {
        let input = input.clone();
        use_effect_with_deps(
            move |is_open| {
                let focus = if **is_open {
                    Some(Timeout::new(SEARCH_FOCUS_DELAY_MS, move || {
                        if let Some(el) = input.cast::<HtmlInputElement>() {
                            let _ = el.focus();
                        }
                    }))
                } else {
                    if let Some(el) = input.cast::<HtmlInputElement>() {
                        let _ = el.blur();
                    }
                    None
                };
                move || drop(focus)
            },
            open.clone(),
        );
    }

    let toggle = {
        let open = open.clone();
        Callback::from(move |_: MouseEvent| open.set(!*open))
    };

    let oninput = {
        let debouncer = debouncer.clone();
        Callback::from(move |e: InputEvent| {
            let value = e.target_unchecked_into::<HtmlInputElement>().value();
            debouncer.borrow_mut().push(normalize_query(&value));
        })
    };

    html! {
        <div class="search-container">
            <button id="searchToggle" class="search-toggle" onclick={toggle} aria-label="Search articles">
                {"⌕"}
            </button>
            <input
                id="searchInput"
                ref={input}
                type="search"
                class={classes!("search-input", (*open).then(|| "active"))}
                placeholder="Search articles..."
                {oninput}
            />
        </div>
    }
}
