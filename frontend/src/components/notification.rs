use std::rc::Rc;

use gloo_timers::callback::Timeout;
use yew::prelude::*;

use crate::config::{NOTIFICATION_EXIT_MS, NOTIFICATION_LIFETIME_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Error,
}

impl NotificationKind {
    fn modifier(self) -> &'static str {
        match self {
            NotificationKind::Info => "notification--info",
            NotificationKind::Success => "notification--success",
            NotificationKind::Error => "notification--error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
    /// Playing the exit transition.
    pub leaving: bool,
}

pub enum NotificationAction {
    Show(NotificationKind, String),
    Dismiss(u64),
    Remove(u64),
}

/// Single-slot toast queue: a new notification replaces whatever is on
/// screen. Actions carry the id they were issued for, so timers left over
/// from a replaced toast are ignored.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NotificationCenter {
    next_id: u64,
    pub current: Option<Notification>,
}

impl NotificationCenter {
    pub fn apply(&self, action: NotificationAction) -> Self {
        let mut next = self.clone();
        match action {
            NotificationAction::Show(kind, message) => {
                next.next_id += 1;
                next.current = Some(Notification { id: next.next_id, kind, message, leaving: false });
            }
            NotificationAction::Dismiss(id) => {
                if let Some(current) = next.current.as_mut().filter(|n| n.id == id) {
                    current.leaving = true;
                }
            }
            NotificationAction::Remove(id) => {
                if next.current.as_ref().map(|n| n.id) == Some(id) {
                    next.current = None;
                }
            }
        }
        next
    }
}

impl Reducible for NotificationCenter {
    type Action = NotificationAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new(self.apply(action))
    }
}

/// Handle handed to features through context.
#[derive(Clone, PartialEq)]
pub struct Notifier {
    dispatcher: UseReducerDispatcher<NotificationCenter>,
}

impl Notifier {
    pub fn show(&self, kind: NotificationKind, message: impl Into<String>) {
        self.dispatcher.dispatch(NotificationAction::Show(kind, message.into()));
    }

    pub fn info(&self, message: impl Into<String>) {
        self.show(NotificationKind::Info, message);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(NotificationKind::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(NotificationKind::Error, message);
    }
}

#[derive(Properties, PartialEq)]
pub struct NotificationHostProps {
    pub children: Children,
}

#[function_component(NotificationHost)]
pub fn notification_host(props: &NotificationHostProps) -> Html {
    let center = use_reducer(NotificationCenter::default);
    let notifier = Notifier { dispatcher: center.dispatcher() };

    // One timer per toast; a replaced toast's timer is dropped with the effect.
    {
        let dispatcher = center.dispatcher();
        let current = center.current.as_ref().map(|n| (n.id, n.leaving));
        use_effect_with_deps(
            move |current| {
                let timer = match *current {
                    Some((id, false)) => Some(Timeout::new(NOTIFICATION_LIFETIME_MS, move || {
                        dispatcher.dispatch(NotificationAction::Dismiss(id));
                    })),
                    Some((id, true)) => Some(Timeout::new(NOTIFICATION_EXIT_MS, move || {
                        dispatcher.dispatch(NotificationAction::Remove(id));
                    })),
                    None => None,
                };
                move || drop(timer)
            },
            current,
        );
    }

    let toast = match &center.current {
        Some(notification) => {
            let id = notification.id;
            let close = {
                let dispatcher = center.dispatcher();
                Callback::from(move |_: MouseEvent| dispatcher.dispatch(NotificationAction::Dismiss(id)))
            };
            html! {
                <div key={id} class={classes!(
                    "notification",
                    notification.kind.modifier(),
                    notification.leaving.then(|| "notification--leaving")
                )}>
                    <div class="notification__content">
                        <span class="notification__message">{notification.message.clone()}</span>
                        <button class="notification__close" onclick={close} aria-label="Dismiss">{"×"}</button>
                    </div>
                </div>
            }
        }
        None => html! {},
    };

    html! {
        <ContextProvider<Notifier> context={notifier}>
            { for props.children.iter() }
            { toast }
            <style>
                {r#"
                .notification {
                    position: fixed;
                    top: 100px;
                    right: 20px;
                    background: var(--color-surface);
                    border: 1px solid var(--color-border);
                    border-radius: var(--radius-lg);
                    padding: 16px 20px;
                    box-shadow: var(--shadow-lg);
                    z-index: 1001;
                    max-width: 400px;
                    animation: notification-in 0.3s ease;
                    transition: transform 0.3s ease;
                }
                .notification--success {
                    border-left: 4px solid var(--color-success);
                }
                .notification--info {
                    border-left: 4px solid var(--color-primary);
                }
                .notification--error {
                    border-left: 4px solid var(--color-error);
                }
                .notification--leaving {
                    transform: translateX(120%);
                }
                @keyframes notification-in {
                    from { transform: translateX(100%); }
                    to { transform: translateX(0); }
                }
                .notification__content {
                    display: flex;
                    align-items: center;
                    justify-content: space-between;
                    gap: 12px;
                }
                .notification__close {
                    background: none;
                    border: none;
                    font-size: 20px;
                    cursor: pointer;
                    color: var(--color-text-secondary);
                    padding: 0;
                    width: 24px;
                    height: 24px;
                }
                .notification__close:hover {
                    color: var(--color-text);
                }
                "#}
            </style>
        </ContextProvider<Notifier>>
    }
}

#[hook]
pub fn use_notifier() -> Option<Notifier> {
    use_context::<Notifier>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_replaces_current() {
        let center = NotificationCenter::default()
            .apply(NotificationAction::Show(NotificationKind::Info, "first".into()))
            .apply(NotificationAction::Show(NotificationKind::Success, "second".into()));
        let current = center.current.unwrap();
        assert_eq!(current.message, "second");
        assert_eq!(current.id, 2);
        assert!(!current.leaving);
    }

    #[test]
    fn stale_dismissal_is_ignored() {
        let center = NotificationCenter::default()
            .apply(NotificationAction::Show(NotificationKind::Info, "first".into()))
            .apply(NotificationAction::Show(NotificationKind::Error, "second".into()))
            // the first toast's timers fire late
            .apply(NotificationAction::Dismiss(1))
            .apply(NotificationAction::Remove(1));
        let current = center.current.unwrap();
        assert_eq!(current.message, "second");
        assert!(!current.leaving);
    }

    #[test]
    fn info_toasts_have_their_own_style() {
        let center = NotificationCenter::default()
            .apply(NotificationAction::Show(NotificationKind::Info, "No articles match \"zebra\".".into()));
        let current = center.current.unwrap();
        assert_eq!(current.kind, NotificationKind::Info);
        assert_eq!(current.kind.modifier(), "notification--info");
        assert_eq!(NotificationKind::Error.modifier(), "notification--error");
    }

    #[test]
    fn dismiss_then_remove() {
        let shown = NotificationCenter::default()
            .apply(NotificationAction::Show(NotificationKind::Success, "Subscribed".into()));
        let leaving = shown.apply(NotificationAction::Dismiss(1));
        assert!(leaving.current.as_ref().unwrap().leaving);
        let gone = leaving.apply(NotificationAction::Remove(1));
        assert_eq!(gone.current, None);
    }
}
