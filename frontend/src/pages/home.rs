use yew::prelude::*;
use yew_router::components::Link;

use crate::components::fab::{Fab, FloatingShapes};
use crate::components::header::{Header, NavLink};
use crate::forms::ContactFormView;
use crate::interactions::{HoverHandlers, HoverTarget};
use crate::reveal::use_reveal_on_scroll;
use crate::scroll_effects::use_scroll_effects;
use crate::Route;

const HOME_LINKS: &[NavLink] = &[
    NavLink { section_id: "hero", label: "Intro" },
    NavLink { section_id: "features", label: "Features" },
    NavLink { section_id: "about", label: "About" },
    NavLink { section_id: "contact", label: "Contact" },
];

const FEATURES: &[(&str, &str)] = &[
    ("Quiet by default", "No pop-ups, no autoplay, no tracking. Just the words and a little motion where it helps."),
    ("Fast everywhere", "Static pages, one small wasm bundle, and scroll effects that stay inside a single frame."),
    ("Readable at night", "A dark theme tuned for long sessions, remembered across visits."),
];

#[function_component(Home)]
pub fn home() -> Html {
    use_scroll_effects(0);
    use_reveal_on_scroll(FEATURES.len());
    let button = HoverHandlers::new(HoverTarget::Button);
    let chip = HoverHandlers::new(HoverTarget::Chip);

    html! {
        <div class="page page--home">
            <Header links={HOME_LINKS.to_vec()} />
            <main>
                <section id="hero" class="hero">
                    <FloatingShapes count={4} />
                    <div class="hero__content">
                        <h1>{"Writing worth slowing down for."}</h1>
                        <p>{"Inkwell is a small studio publishing essays on craft, design and the quieter side of the web."}</p>
                        <div class="hero__actions">
                            <Link<Route> to={Route::Blog} classes="btn btn--primary">
                                {"Read the journal"}
                            </Link<Route>>
                            <a class="btn btn--outline" href="#contact"
                                onmouseenter={button.enter.clone()} onmouseleave={button.leave.clone()}
                                onmousedown={button.down.clone()} onmouseup={button.up.clone()}>
                                {"Get in touch"}
                            </a>
                        </div>
                    </div>
                </section>

                <section id="features" class="section">
                    <div class="section__header">
                        <h2>{"What we care about"}</h2>
                    </div>
                    <div class="feature-grid">
                        { for FEATURES.iter().map(|(title, body)| html! {
                            <div class="widget feature">
                                <h3>{*title}</h3>
                                <p>{*body}</p>
                            </div>
                        }) }
                    </div>
                </section>

                <section id="about" class="section">
                    <div class="section__header">
                        <h2>{"About the studio"}</h2>
                    </div>
                    <p class="about__text">
                        {"Three writers, one editor and a strong opinion about line length. We publish every other week and never more than we can stand behind."}
                    </p>
                    <div class="social-links">
                        { for ["Mastodon", "RSS", "GitHub"].iter().map(|name| html! {
                            <a class="social-link" href="#" onmouseenter={chip.enter.clone()} onmouseleave={chip.leave.clone()}>
                                {*name}
                            </a>
                        }) }
                    </div>
                </section>

                <section id="contact" class="section">
                    <div class="section__header">
                        <h2>{"Say hello"}</h2>
                        <p>{"Pitches, corrections and kind words all welcome."}</p>
                    </div>
                    <ContactFormView />
                </section>
            </main>
            <Fab />
            <style>
                {r#"
                .hero {
                    position: relative;
                    min-height: 90vh;
                    display: flex;
                    align-items: center;
                    justify-content: center;
                    overflow: hidden;
                    padding: 120px 24px 60px;
                }
                .hero__content {
                    position: relative;
                    max-width: 720px;
                    text-align: center;
                    z-index: 1;
                }
                .hero h1 {
                    font-size: 3.2rem;
                    margin-bottom: 1.25rem;
                }
                .hero p {
                    font-size: 1.2rem;
                    color: var(--color-text-secondary);
                }
                .hero__actions {
                    display: flex;
                    gap: 16px;
                    justify-content: center;
                    margin-top: 2rem;
                }
                .feature-grid {
                    display: grid;
                    grid-template-columns: repeat(auto-fit, minmax(240px, 1fr));
                    gap: 24px;
                }
                .about__text {
                    max-width: 680px;
                    font-size: 1.1rem;
                    color: var(--color-text-secondary);
                }
                .social-links {
                    display: flex;
                    gap: 12px;
                    margin-top: 1.5rem;
                }
                .social-link {
                    padding: 6px 14px;
                    border: 1px solid var(--color-border);
                    border-radius: 999px;
                    color: var(--color-text);
                    text-decoration: none;
                    transition: transform 0.2s ease;
                }
                .contact-form {
                    display: flex;
                    flex-direction: column;
                    gap: 16px;
                    max-width: 640px;
                }
                .form-row {
                    display: flex;
                    gap: 16px;
                }
                .form-row .form-control {
                    flex: 1;
                }
                @media (max-width: 768px) {
                    .hero h1 {
                        font-size: 2.3rem;
                    }
                    .form-row {
                        flex-direction: column;
                    }
                }
                "#}
            </style>
        </div>
    }
}
