use web_sys::{window, HtmlElement};
use yew::prelude::*;
use yew_router::components::Link;

use crate::display::{html_elements, set_class, HEADER_ID, PROGRESS_ID};
use crate::error::isolate;
use crate::interactions::event_element;
use crate::nav::{scroll_to_section, section_id_from_href};
use crate::search::SearchBox;
use crate::theme::ThemeToggle;
use crate::Route;

#[derive(Clone, PartialEq)]
pub struct NavLink {
    pub section_id: &'static str,
    pub label: &'static str,
}

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub links: Vec<NavLink>,
    #[prop_or_default]
    pub show_search: bool,
}

/// Lights the clicked link before the smooth scroll starts. This bypasses the
/// scroll tracker's applied state: the override holds until the tracked
/// section next changes, and the tracker then clears every lit link. A click
/// lands at `nav::scroll_target`, where the tracked section is the clicked one.
fn mark_active(link: &HtmlElement) {
    if let Some(document) = window().and_then(|w| w.document()) {
        for lit in html_elements(&document, ".nav__link.active") {
            set_class(&lit, "active", false);
        }
    }
    set_class(link, "active", true);
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let menu_open = use_state(|| false);

    let on_nav_click = {
        let menu_open = menu_open.clone();
        Callback::from(move |e: MouseEvent| {
            let Some(link) = event_element(&e, ".nav__link") else {
                return;
            };
            let href = link.get_attribute("href").unwrap_or_default();
            let Some(id) = section_id_from_href(&href) else {
                return;
            };
            e.prevent_default();
            if isolate("nav scroll", scroll_to_section(id)).is_some() {
                mark_active(&link);
            }
            menu_open.set(false);
        })
    };

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| menu_open.set(!*menu_open))
    };

    html! {
        <header id={HEADER_ID} class="header">
            <div id={PROGRESS_ID} class="scroll-progress"></div>
            <div class="header__inner">
                <Link<Route> to={Route::Home} classes="logo">
                    {"inkwell"}
                </Link<Route>>
                <button class="burger-menu" onclick={toggle_menu} aria-label="Menu">
                    <span></span>
                    <span></span>
                    <span></span>
                </button>
                <nav class={classes!("nav", (*menu_open).then(|| "nav--open"))}>
                    { for props.links.iter().map(|link| html! {
                        <a class="nav__link" href={format!("#{}", link.section_id)} onclick={on_nav_click.clone()}>
                            {link.label}
                        </a>
                    }) }
                    <Link<Route> to={Route::Home} classes="nav__route">{"Home"}</Link<Route>>
                    <Link<Route> to={Route::Blog} classes="nav__route">{"Journal"}</Link<Route>>
                </nav>
                <div class="header__actions">
                    if props.show_search {
                        <SearchBox />
                    }
                    <ThemeToggle />
                </div>
            </div>
            <style>
                {r#"
                .header {
                    position: fixed;
                    top: 0;
                    left: 0;
                    right: 0;
                    z-index: 1000;
                    background: transparent;
                    transition: background 0.3s ease, box-shadow 0.3s ease, padding 0.3s ease;
                    padding: 20px 0;
                }
                .header.scrolled {
                    background: var(--color-surface);
                    box-shadow: var(--shadow-md);
                    padding: 10px 0;
                }
                .scroll-progress {
                    position: absolute;
                    top: 0;
                    left: 0;
                    height: 3px;
                    width: 0;
                    background: var(--color-primary);
                }
                .header__inner {
                    max-width: 1200px;
                    margin: 0 auto;
                    padding: 0 24px;
                    display: flex;
                    align-items: center;
                    justify-content: space-between;
                    gap: 24px;
                }
                .logo {
                    font-size: 1.5rem;
                    font-weight: 700;
                    color: var(--color-text);
                    text-decoration: none;
                }
                .nav {
                    display: flex;
                    gap: 20px;
                }
                .nav__link, .nav__route {
                    color: var(--color-text-secondary);
                    text-decoration: none;
                    transition: color 0.2s ease;
                }
                .nav__link.active, .nav__link:hover, .nav__route:hover {
                    color: var(--color-primary);
                }
                .header__actions {
                    display: flex;
                    align-items: center;
                    gap: 12px;
                }
                .search-container {
                    position: relative;
                    display: flex;
                    align-items: center;
                }
                .search-input {
                    width: 0;
                    opacity: 0;
                    padding: 0;
                    border: 1px solid var(--color-border);
                    border-radius: var(--radius-lg);
                    background: var(--color-surface);
                    color: var(--color-text);
                    transition: width 0.3s ease, opacity 0.3s ease, padding 0.3s ease;
                }
                .search-input.active {
                    width: 220px;
                    opacity: 1;
                    padding: 8px 12px;
                }
                .search-toggle, .theme-toggle {
                    background: none;
                    border: none;
                    font-size: 1.25rem;
                    cursor: pointer;
                    color: var(--color-text);
                    transition: transform 0.15s ease;
                }
                .burger-menu {
                    display: none;
                    background: none;
                    border: none;
                    flex-direction: column;
                    gap: 4px;
                    cursor: pointer;
                }
                .burger-menu span {
                    width: 22px;
                    height: 2px;
                    background: var(--color-text);
                }
                @media (max-width: 768px) {
                    .burger-menu {
                        display: flex;
                    }
                    .nav {
                        display: none;
                        position: absolute;
                        top: 100%;
                        left: 0;
                        right: 0;
                        flex-direction: column;
                        padding: 16px 24px;
                        background: var(--color-surface);
                    }
                    .nav.nav--open {
                        display: flex;
                    }
                }
                "#}
            </style>
        </header>
    }
}
