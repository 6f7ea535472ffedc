use yew::prelude::*;

use crate::config::PRESS_FEEDBACK_MS;
use crate::display::FAB_ID;
use crate::error::isolate;
use crate::interactions::press_feedback;
use crate::nav::smooth_scroll_to;

/// Back-to-top button. Visibility is driven by the scroll controller.
#[function_component(Fab)]
pub fn fab() -> Html {
    let button = use_node_ref();

    let onclick = {
        let button = button.clone();
        Callback::from(move |_: MouseEvent| {
            isolate("back to top", smooth_scroll_to(0.0));
            if let Some(el) = button.cast::<web_sys::HtmlElement>() {
                press_feedback(&el, "scale(0.9)", PRESS_FEEDBACK_MS);
            }
        })
    };

    html! {
        <>
            <button id={FAB_ID} class="fab" ref={button} {onclick} aria-label="Back to top">
                {"↑"}
            </button>
            <style>
                {r#"
                .fab {
                    position: fixed;
                    bottom: 32px;
                    right: 32px;
                    width: 52px;
                    height: 52px;
                    border-radius: 50%;
                    border: none;
                    background: var(--color-primary);
                    color: var(--color-btn-primary-text);
                    font-size: 1.4rem;
                    cursor: pointer;
                    opacity: 0;
                    pointer-events: none;
                    transform: translateY(20px);
                    transition: opacity 0.3s ease, transform 0.3s ease;
                    z-index: 900;
                }
                .fab.visible {
                    opacity: 1;
                    pointer-events: auto;
                    transform: translateY(0);
                }
                "#}
            </style>
        </>
    }
}

#[derive(Properties, PartialEq)]
pub struct FloatingShapesProps {
    pub count: usize,
}

/// Decorative parallax layer behind a hero section.
#[function_component(FloatingShapes)]
pub fn floating_shapes(props: &FloatingShapesProps) -> Html {
    html! {
        <div class="floating-shapes" aria-hidden="true">
            { for (0..props.count).map(|i| html! {
                <div class={classes!("floating-shape", format!("floating-shape--{}", i + 1))}></div>
            }) }
        </div>
    }
}
