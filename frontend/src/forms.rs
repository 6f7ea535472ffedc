//! Newsletter and contact forms. Nothing is sent anywhere: "submitting"
//! waits on a [`Delay`] and then reports success.

use std::borrow::Cow;

use futures::future::LocalBoxFuture;
use futures::FutureExt;
use wasm_bindgen::JsCast;
use gloo_timers::future::TimeoutFuture;
use validator::{Validate, ValidationError, ValidationErrors};
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::components::notification::use_notifier;
use crate::config::{CONTACT_DELAY_MS, NEWSLETTER_DELAY_MS, NEWSLETTER_RESET_MS};
use crate::error::UiError;
use crate::interactions::{HoverHandlers, HoverTarget};

/// Source of simulated latency.
pub trait Delay {
    fn sleep(&self, ms: u32) -> LocalBoxFuture<'static, ()>;
}

#[derive(Clone, Copy, Default)]
pub struct TimerDelay;

impl Delay for TimerDelay {
    fn sleep(&self, ms: u32) -> LocalBoxFuture<'static, ()> {
        TimeoutFuture::new(ms).boxed_local()
    }
}

/// Domain must be dotted and end in an alphabetic label of two or more
/// letters; `validator`'s email rule alone accepts `a@b.12`.
fn public_domain(email: &str) -> Result<(), ValidationError> {
    let tld = email
        .rsplit_once('@')
        .and_then(|(_, domain)| domain.rsplit_once('.'))
        .map(|(_, tld)| tld);
    match tld {
        Some(tld) if tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()) => Ok(()),
        _ => {
            let mut err = ValidationError::new("public_domain");
            err.message = Some(Cow::from(INVALID_EMAIL));
            Err(err)
        }
    }
}

const INVALID_EMAIL: &str = "Please enter a valid email address.";

/// The first message reported for the first failing field in `order`.
fn first_message(errors: &ValidationErrors, order: &[&str]) -> UiError {
    let fields = errors.field_errors();
    let message = order
        .iter()
        .filter_map(|name| fields.get(name))
        .flat_map(|errs| errs.iter())
        .find_map(|err| err.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| INVALID_EMAIL.to_string());
    UiError::InvalidInput(message)
}

#[derive(Debug, Clone, PartialEq, Default, Validate)]
pub struct ContactForm {
    #[validate(length(min = 1, message = "Please enter your name."))]
    pub name: String,
    #[validate(
        length(min = 1, message = "Please enter your email address."),
        email(message = "Please enter a valid email address."),
        custom = "public_domain"
    )]
    pub email: String,
    pub subject: String,
    #[validate(length(min = 1, message = "Please enter a message."))]
    pub message: String,
}

impl ContactForm {
    const FIELD_ORDER: [&'static str; 3] = ["name", "email", "message"];

    /// First problem found, phrased for the reader. Surrounding whitespace
    /// does not count as input.
    pub fn validate(&self) -> Result<(), UiError> {
        let trimmed = ContactForm {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
        };
        <Self as Validate>::validate(&trimmed).map_err(|e| first_message(&e, &Self::FIELD_ORDER))
    }

    pub fn clear(&mut self) {
        *self = ContactForm::default();
    }
}

#[derive(Debug, Validate)]
pub struct NewsletterSignup {
    #[validate(email(message = "Please enter a valid email address."), custom = "public_domain")]
    pub email: String,
}

impl NewsletterSignup {
    pub fn new(email: &str) -> Self {
        Self { email: email.trim().to_string() }
    }

    pub fn validate(&self) -> Result<(), UiError> {
        <Self as Validate>::validate(self).map_err(|e| first_message(&e, &["email"]))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Sending,
    /// Newsletter only: the confirmation label is showing.
    Confirmed,
}

pub const CONTACT_LABEL: &str = "Send Message";
pub const NEWSLETTER_LABEL: &str = "Subscribe";

pub fn contact_label(phase: SubmitPhase) -> &'static str {
    match phase {
        SubmitPhase::Sending => "Sending...",
        SubmitPhase::Idle | SubmitPhase::Confirmed => CONTACT_LABEL,
    }
}

pub fn newsletter_label(phase: SubmitPhase) -> &'static str {
    match phase {
        SubmitPhase::Idle => NEWSLETTER_LABEL,
        SubmitPhase::Sending => "Subscribing...",
        SubmitPhase::Confirmed => "Subscribed!",
    }
}

/// Validates, then runs the simulated send. On invalid input nothing
/// changes: no phase is reported and the form keeps its contents.
pub async fn submit_contact<D: Delay>(
    delay: &D,
    form: &mut ContactForm,
    mut on_phase: impl FnMut(SubmitPhase),
) -> Result<(), UiError> {
    form.validate()?;
    on_phase(SubmitPhase::Sending);
    delay.sleep(CONTACT_DELAY_MS).await;
    form.clear();
    on_phase(SubmitPhase::Idle);
    Ok(())
}

/// `on_confirmed` runs when the subscription "lands", before the label
/// resets.
pub async fn submit_newsletter<D: Delay>(
    delay: &D,
    email: &mut String,
    mut on_phase: impl FnMut(SubmitPhase),
    on_confirmed: impl FnOnce(),
) -> Result<(), UiError> {
    NewsletterSignup::new(email).validate()?;
    on_phase(SubmitPhase::Sending);
    delay.sleep(NEWSLETTER_DELAY_MS).await;
    email.clear();
    on_phase(SubmitPhase::Confirmed);
    on_confirmed();
    delay.sleep(NEWSLETTER_RESET_MS).await;
    on_phase(SubmitPhase::Idle);
    Ok(())
}

#[function_component(NewsletterForm)]
pub fn newsletter_form() -> Html {
    let email = use_state(String::new);
    let phase = use_state(SubmitPhase::default);
    let notifier = use_notifier();
    let hover = HoverHandlers::new(HoverTarget::Button);

    let oninput = {
        let email = email.clone();
        Callback::from(move |e: InputEvent| {
            email.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };

    let onsubmit = {
        let email = email.clone();
        let phase = phase.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *phase != SubmitPhase::Idle {
                return;
            }
            let mut value = (*email).clone();
            let email = email.clone();
            let phase = phase.clone();
            let notifier = notifier.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let cleared = email.clone();
                let confirm = notifier.clone();
                let result = submit_newsletter(
                    &TimerDelay,
                    &mut value,
                    |p| phase.set(p),
                    move || {
                        cleared.set(String::new());
                        if let Some(n) = confirm {
                            n.success("Successfully subscribed to newsletter!");
                        }
                    },
                )
                .await;
                if let Err(err) = result {
                    log::debug!("newsletter rejected: {}", err);
                    if let Some(n) = notifier {
                        n.error(err.to_string());
                    }
                }
            });
        })
    };

    html! {
        <form id="newsletterForm" class="newsletter-form" {onsubmit}>
            <input
                class="newsletter-input"
                type="email"
                placeholder="you@example.com"
                value={(*email).clone()}
                {oninput}
            />
            <button
                type="submit"
                class={classes!(
                    "btn", "btn--primary",
                    (*phase == SubmitPhase::Sending).then(|| "loading"),
                    (*phase == SubmitPhase::Confirmed).then(|| "btn--success")
                )}
                disabled={*phase != SubmitPhase::Idle}
                onmouseenter={hover.enter}
                onmouseleave={hover.leave}
                onmousedown={hover.down}
                onmouseup={hover.up}
            >
                {newsletter_label(*phase)}
            </button>
        </form>
    }
}

#[function_component(ContactFormView)]
pub fn contact_form_view() -> Html {
    let form = use_state(ContactForm::default);
    let phase = use_state(SubmitPhase::default);
    let notifier = use_notifier();
    let hover = HoverHandlers::new(HoverTarget::Button);

    let on_field = |apply: fn(&mut ContactForm, String)| {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let target = e.target_unchecked_into::<web_sys::HtmlElement>();
            let value = match target.dyn_ref::<HtmlTextAreaElement>() {
                Some(area) => area.value(),
                None => target.unchecked_into::<HtmlInputElement>().value(),
            };
            let mut next = (*form).clone();
            apply(&mut next, value);
            form.set(next);
        })
    };

    let onsubmit = {
        let form = form.clone();
        let phase = phase.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *phase != SubmitPhase::Idle {
                return;
            }
            let mut draft = (*form).clone();
            // Reject synchronously so the reader sees the error right away.
            if let Err(err) = draft.validate() {
                if let Some(n) = &notifier {
                    n.error(err.to_string());
                }
                return;
            }
            let form = form.clone();
            let phase = phase.clone();
            let notifier = notifier.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match submit_contact(&TimerDelay, &mut draft, |p| phase.set(p)).await {
                    Ok(()) => {
                        form.set(draft);
                        if let Some(n) = notifier {
                            n.success("Thanks! Your message has been sent.");
                        }
                    }
                    Err(err) => log::warn!("contact form: {}", err),
                }
            });
        })
    };

    html! {
        <form id="contactForm" class="contact-form" {onsubmit}>
            <div class="form-row">
                <input class="form-control" type="text" placeholder="Name"
                    value={form.name.clone()} oninput={on_field(|f, v| f.name = v)} />
                <input class="form-control" type="email" placeholder="Email"
                    value={form.email.clone()} oninput={on_field(|f, v| f.email = v)} />
            </div>
            <input class="form-control" type="text" placeholder="Subject (optional)"
                value={form.subject.clone()} oninput={on_field(|f, v| f.subject = v)} />
            <textarea class="form-control" rows="5" placeholder="Message"
                value={form.message.clone()} oninput={on_field(|f, v| f.message = v)} />
            <button
                type="submit"
                class={classes!("btn", "btn--primary", (*phase == SubmitPhase::Sending).then(|| "loading"))}
                disabled={*phase == SubmitPhase::Sending}
                onmouseenter={hover.enter}
                onmouseleave={hover.leave}
                onmousedown={hover.down}
                onmouseup={hover.up}
            >
                {contact_label(*phase)}
            </button>
        </form>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::RefCell;

    /// Completes instantly and remembers what was asked for.
    #[derive(Default)]
    struct RecordingDelay {
        requested: RefCell<Vec<u32>>,
    }

    impl Delay for RecordingDelay {
        fn sleep(&self, ms: u32) -> LocalBoxFuture<'static, ()> {
            self.requested.borrow_mut().push(ms);
            futures::future::ready(()).boxed_local()
        }
    }

    fn filled() -> ContactForm {
        ContactForm {
            name: "Ada".into(),
            email: "a@b.co".into(),
            subject: "Hello".into(),
            message: "Loved the frame budget piece.".into(),
        }
    }

    fn is_valid_email(email: &str) -> bool {
        NewsletterSignup::new(email).validate().is_ok()
    }

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email(" reader@mail.example.org "));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("@b.co"));
        assert!(!is_valid_email("a@.co"));
        assert!(!is_valid_email("a@b.c"));
        assert!(!is_valid_email("a b@c.co"));
        assert!(!is_valid_email("a@b@c.co"));
    }

    #[test]
    fn malformed_addresses_are_rejected() {
        for bad in ["<script>@b.co", "a@-.co", "a\"b@c.co", "a@b.c-", "a@b.12"] {
            assert!(!is_valid_email(bad), "{} accepted", bad);
            let form = ContactForm { email: bad.into(), ..filled() };
            assert_eq!(form.validate(), Err(UiError::InvalidInput(INVALID_EMAIL.into())));
        }
    }

    #[test]
    fn first_failing_field_wins() {
        let empty = ContactForm::default();
        assert_eq!(empty.validate(), Err(UiError::InvalidInput("Please enter your name.".into())));
        let no_email = ContactForm { email: "  ".into(), message: String::new(), ..filled() };
        assert_eq!(
            no_email.validate(),
            Err(UiError::InvalidInput("Please enter your email address.".into()))
        );
    }

    #[test]
    fn newsletter_signup_trims_and_checks() {
        assert!(NewsletterSignup::new(" reader@inkwell.blog ").validate().is_ok());
        assert_eq!(
            NewsletterSignup::new("reader@inkwell").validate(),
            Err(UiError::InvalidInput(INVALID_EMAIL.into()))
        );
    }

    #[test]
    fn empty_message_is_rejected_and_nothing_clears() {
        let delay = RecordingDelay::default();
        let mut form = ContactForm { message: "   ".into(), ..filled() };
        let before = form.clone();
        let mut phases = Vec::new();

        let result = block_on(submit_contact(&delay, &mut form, |p| phases.push(p)));

        assert_eq!(result, Err(UiError::InvalidInput("Please enter a message.".into())));
        assert_eq!(form, before);
        assert!(phases.is_empty());
        assert!(delay.requested.borrow().is_empty());
    }

    #[test]
    fn valid_contact_sends_then_clears() {
        let delay = RecordingDelay::default();
        let mut form = filled();
        let mut labels = Vec::new();

        block_on(submit_contact(&delay, &mut form, |p| labels.push(contact_label(p)))).unwrap();

        assert_eq!(labels, vec!["Sending...", CONTACT_LABEL]);
        assert_eq!(form, ContactForm::default());
        assert_eq!(*delay.requested.borrow(), vec![CONTACT_DELAY_MS]);
    }

    #[test]
    fn subject_is_optional() {
        let form = ContactForm { subject: String::new(), ..filled() };
        assert!(form.validate().is_ok());
        let nameless = ContactForm { name: " ".into(), ..filled() };
        assert_eq!(nameless.validate(), Err(UiError::InvalidInput("Please enter your name.".into())));
    }

    #[test]
    fn newsletter_cycle() {
        let delay = RecordingDelay::default();
        let mut email = "reader@inkwell.dev".to_string();
        let mut labels = Vec::new();
        let mut confirmed = false;

        block_on(submit_newsletter(
            &delay,
            &mut email,
            |p| labels.push(newsletter_label(p)),
            || confirmed = true,
        ))
        .unwrap();

        assert_eq!(labels, vec!["Subscribing...", "Subscribed!", NEWSLETTER_LABEL]);
        assert!(confirmed);
        assert!(email.is_empty());
        assert_eq!(*delay.requested.borrow(), vec![NEWSLETTER_DELAY_MS, NEWSLETTER_RESET_MS]);
    }

    #[test]
    fn newsletter_keeps_bad_email() {
        let delay = RecordingDelay::default();
        let mut email = "not-an-email".to_string();
        let result = block_on(submit_newsletter(&delay, &mut email, |_| {}, || {}));
        assert!(matches!(result, Err(UiError::InvalidInput(_))));
        assert_eq!(email, "not-an-email");
    }
}
