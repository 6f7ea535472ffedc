use yew::prelude::*;
use yew_router::prelude::*;
use log::info;
use wasm_bindgen::JsCast;
use web_sys::{window, ErrorEvent};

mod config;
mod error;
mod controller;
mod display;
mod scroll_effects;
mod theme;
mod interactions;
mod content;
mod search;
mod forms;
mod reveal;
mod nav;
mod components {
    pub mod notification;
    pub mod header;
    pub mod fab;
}
mod pages {
    pub mod home;
    pub mod blog;
}

use components::notification::NotificationHost;
use display::listen;
use error::isolate;
use pages::{blog::Blog, home::Home};
use search::SearchContext;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/blog")]
    Blog,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering Home page");
            html! { <Home /> }
        },
        Route::Blog => {
            info!("Rendering Blog page");
            html! { <Blog /> }
        },
        Route::NotFound => {
            info!("Unknown route, rendering Home page");
            html! { <Redirect<Route> to={Route::Home} /> }
        },
    }
}

/// Logs uncaught script errors. A failing feature never takes the page down
/// with it, but it should still show up in the console.
#[hook]
fn use_global_error_log() {
    use_effect_with_deps(
        move |_| {
            let subscription = window().and_then(|w| {
                isolate(
                    "global error log",
                    listen(&w, "error", |e| {
                        match e.dyn_ref::<ErrorEvent>() {
                            Some(err) => log::error!(
                                "uncaught error: {} ({}:{})",
                                err.message(),
                                err.filename(),
                                err.lineno()
                            ),
                            None => log::error!("uncaught error event: {}", e.type_()),
                        }
                    }),
                )
            });
            move || drop(subscription)
        },
        (),
    );
}

#[function_component]
fn App() -> Html {
    use_global_error_log();

    let query = use_state(String::new);
    let search = {
        let setter = query.clone();
        SearchContext {
            query: (*query).clone(),
            commit: Callback::from(move |q: String| {
                log::debug!("search query committed: {:?}", q);
                setter.set(q);
            }),
        }
    };

    html! {
        <NotificationHost>
            <ContextProvider<SearchContext> context={search}>
                <BrowserRouter>
                    <Switch<Route> render={switch} />
                </BrowserRouter>
            </ContextProvider<SearchContext>>
            <style>
                {r#"
                :root, [data-color-scheme="dark"] {
                    --color-background: #1c1917;
                    --color-surface: #262220;
                    --color-text: #f5efe6;
                    --color-text-secondary: #b8ada0;
                    --color-primary: #d4a373;
                    --color-secondary: rgba(212, 163, 115, 0.15);
                    --color-border: rgba(245, 239, 230, 0.12);
                    --color-btn-primary-text: #1c1917;
                    --color-success: #7fb77e;
                    --color-error: #e5766a;
                    --shadow-md: 0 4px 12px rgba(0, 0, 0, 0.35);
                    --shadow-lg: 0 12px 32px rgba(0, 0, 0, 0.45);
                    --radius-lg: 12px;
                }
                [data-color-scheme="light"] {
                    --color-background: #fbf8f3;
                    --color-surface: #ffffff;
                    --color-text: #2b2420;
                    --color-text-secondary: #6b5f55;
                    --color-primary: #a67b5b;
                    --color-secondary: rgba(166, 123, 91, 0.12);
                    --color-border: rgba(43, 36, 32, 0.12);
                    --color-btn-primary-text: #ffffff;
                    --color-success: #3d8b3d;
                    --color-error: #c0392b;
                    --shadow-md: 0 4px 12px rgba(43, 36, 32, 0.08);
                    --shadow-lg: 0 12px 32px rgba(43, 36, 32, 0.12);
                }
                body {
                    margin: 0;
                    font-family: Georgia, 'Iowan Old Style', serif;
                    background: var(--color-background);
                    color: var(--color-text);
                    line-height: 1.6;
                }
                .theme-transition, .theme-transition * {
                    transition: background-color 0.5s ease, color 0.5s ease, border-color 0.5s ease !important;
                }
                .page-hidden * {
                    animation-play-state: paused !important;
                }
                .section {
                    max-width: 1200px;
                    margin: 0 auto;
                    padding: 80px 24px;
                }
                .section__header {
                    margin-bottom: 2rem;
                }
                .widget {
                    background: var(--color-surface);
                    border: 1px solid var(--color-border);
                    border-radius: var(--radius-lg);
                    padding: 24px;
                }
                .btn {
                    display: inline-block;
                    padding: 12px 24px;
                    border-radius: var(--radius-lg);
                    border: 1px solid transparent;
                    font-size: 1rem;
                    cursor: pointer;
                    text-decoration: none;
                    transition: transform 0.2s ease, opacity 0.2s ease;
                }
                .btn--primary {
                    background: var(--color-primary);
                    color: var(--color-btn-primary-text);
                }
                .btn--outline {
                    background: transparent;
                    border-color: var(--color-primary);
                    color: var(--color-primary);
                }
                .btn.loading, .btn:disabled {
                    opacity: 0.7;
                    cursor: progress;
                }
                .btn--success {
                    background: var(--color-success);
                    color: var(--color-btn-primary-text);
                }
                .form-control, .newsletter-input {
                    width: 100%;
                    box-sizing: border-box;
                    padding: 12px 14px;
                    border: 1px solid var(--color-border);
                    border-radius: var(--radius-lg);
                    background: var(--color-surface);
                    color: var(--color-text);
                    font: inherit;
                }
                .floating-shapes {
                    position: absolute;
                    inset: 0;
                    pointer-events: none;
                }
                .floating-shape {
                    position: absolute;
                    border-radius: 50%;
                    background: var(--color-secondary);
                    will-change: transform;
                }
                .floating-shape--1 { width: 220px; height: 220px; top: 10%; left: 6%; }
                .floating-shape--2 { width: 140px; height: 140px; top: 60%; left: 78%; }
                .floating-shape--3 { width: 90px; height: 90px; top: 25%; left: 65%; }
                .floating-shape--4 { width: 60px; height: 60px; top: 75%; left: 20%; }
                .scroll-reveal {
                    opacity: 0;
                    transform: translateY(24px);
                    transition: opacity 0.6s ease, transform 0.6s ease;
                }
                .scroll-reveal.revealed {
                    opacity: 1;
                    transform: none;
                }
                .slide-in {
                    animation: slide-in 0.6s ease both;
                }
                .scale-in {
                    animation: scale-in 0.6s ease both;
                }
                @keyframes slide-in {
                    from { opacity: 0; transform: translateX(-30px); }
                    to { opacity: 1; transform: translateX(0); }
                }
                @keyframes scale-in {
                    from { opacity: 0; transform: scale(0.95); }
                    to { opacity: 1; transform: scale(1); }
                }
                .ripple-effect {
                    position: absolute;
                    border-radius: 50%;
                    background: rgba(212, 163, 115, 0.3);
                    transform: scale(0);
                    animation: ripple 0.6s linear;
                    pointer-events: none;
                }
                @keyframes ripple {
                    to { transform: scale(4); opacity: 0; }
                }
                "#}
            </style>
        </NotificationHost>
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}
