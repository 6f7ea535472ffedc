use std::cell::RefCell;
use std::rc::Rc;

use yew::prelude::*;

use crate::config::Thresholds;
use crate::controller::{FrameCoalescer, ScrollController};
use crate::display::{DisplayLayer, DomDisplay, PageEvent, Subscription};
use crate::error::{isolate, UiError};

/// Owns the controller and wires it to a display layer. Scroll events are
/// coalesced into one recompute per frame; resizes re-read the layout.
pub struct ScrollRuntime<D: DisplayLayer + 'static> {
    display: Rc<D>,
    controller: RefCell<ScrollController>,
    coalescer: FrameCoalescer,
}

impl<D: DisplayLayer + 'static> ScrollRuntime<D> {
    pub fn new(display: D, thresholds: Thresholds) -> Result<Rc<Self>, UiError> {
        let layout = display.read_layout()?;
        let controller = ScrollController::initialize(layout, thresholds)?;
        Ok(Rc::new(Self {
            display: Rc::new(display),
            controller: RefCell::new(controller),
            coalescer: FrameCoalescer::new(),
        }))
    }

    #[cfg(test)]
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Cheap enough to call on every scroll event.
    pub fn schedule_recompute(self: &Rc<Self>) {
        let snapshot = self.display.read_scroll();
        if self.coalescer.offer(snapshot) {
            let runtime = Rc::clone(self);
            self.display.request_frame(Box::new(move || runtime.run_frame()));
        }
    }

    fn run_frame(&self) {
        if let Some(snapshot) = self.coalescer.take() {
            let state = self.controller.borrow().on_scroll(&snapshot);
            self.display.apply_ui_state(&state);
        }
    }

    /// Synchronous recompute, used once right after mounting.
    pub fn recompute_now(&self) {
        let snapshot = self.display.read_scroll();
        let state = self.controller.borrow().on_scroll(&snapshot);
        self.display.apply_ui_state(&state);
    }

    /// Re-reads the section table, then schedules a tick with it. Runs on
    /// resize and whenever the page reports its sections moved.
    pub fn relayout(self: &Rc<Self>) {
        match self.display.read_layout() {
            Ok(layout) => self.controller.borrow_mut().relayout(layout),
            Err(err) => log::warn!("keeping stale layout: {}", err),
        }
        self.schedule_recompute();
    }

    fn visibility_changed(self: &Rc<Self>) {
        let hidden = self.display.page_hidden();
        self.display.apply_visibility(hidden);
        if !hidden {
            self.schedule_recompute();
        }
    }

    /// Subscribes to scroll, resize and visibility events. The runtime stays
    /// alive as long as the returned guards do.
    pub fn attach(self: &Rc<Self>) -> Result<Vec<Subscription>, UiError> {
        let on_scroll = {
            let runtime = Rc::clone(self);
            Box::new(move || runtime.schedule_recompute()) as Box<dyn FnMut()>
        };
        let on_resize = {
            let runtime = Rc::clone(self);
            Box::new(move || runtime.relayout()) as Box<dyn FnMut()>
        };
        let on_visibility = {
            let runtime = Rc::clone(self);
            Box::new(move || runtime.visibility_changed()) as Box<dyn FnMut()>
        };
        Ok(vec![
            self.display.subscribe(PageEvent::Scroll, on_scroll)?,
            self.display.subscribe(PageEvent::Resize, on_resize)?,
            self.display.subscribe(PageEvent::VisibilityChange, on_visibility)?,
        ])
    }
}

type DomRuntime = Rc<ScrollRuntime<DomDisplay>>;

fn start(thresholds: Thresholds) -> Result<(DomRuntime, Vec<Subscription>), UiError> {
    let runtime = ScrollRuntime::new(DomDisplay::new()?, thresholds)?;
    let subscriptions = runtime.attach()?;
    runtime.recompute_now();
    log::info!("scroll effects attached");
    Ok((runtime, subscriptions))
}

/// Drives the progress bar, header, FAB, active nav link and parallax
/// shapes of the page this hook is mounted in.
///
/// `layout_generation` changes whenever the page moves its sections without
/// a resize, e.g. when search hides cards; the section table is re-read then.
#[hook]
pub fn use_scroll_effects(layout_generation: usize) {
    let runtime = use_mut_ref(|| None::<DomRuntime>);
    {
        let runtime = runtime.clone();
        use_effect_with_deps(
            move |_| {
                let started = isolate("scroll effects", start(Thresholds::default()));
                let subscriptions = started.map(|(rt, subscriptions)| {
                    *runtime.borrow_mut() = Some(rt);
                    subscriptions
                });
                move || {
                    drop(subscriptions);
                    runtime.borrow_mut().take();
                }
            },
            (),
        );
    }
    use_effect_with_deps(
        move |generation| {
            if let Some(rt) = runtime.borrow().as_ref() {
                log::debug!("layout generation {}, re-reading sections", generation);
                rt.relayout();
            }
            || ()
        },
        layout_generation,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    use crate::controller::{Layout, ScrollSnapshot, Section, UiState};

    #[derive(Default)]
    struct FakeDisplay {
        layout: RefCell<Layout>,
        scroll: Cell<ScrollSnapshot>,
        frames: RefCell<Vec<Box<dyn FnOnce()>>>,
        applied: RefCell<Vec<UiState>>,
        listeners: RefCell<Vec<(PageEvent, Rc<RefCell<Box<dyn FnMut()>>>)>>,
        hidden: Cell<bool>,
        body_hidden: Cell<bool>,
    }

    impl FakeDisplay {
        fn with_sections(sections: Vec<Section>) -> Self {
            let display = FakeDisplay::default();
            *display.layout.borrow_mut() = Layout { sections, header_height: 0.0, shape_count: 2 };
            display
        }

        fn scroll_to(&self, scroll_y: f64) {
            self.scroll.set(ScrollSnapshot { scroll_y, viewport_height: 800.0, document_height: 2800.0 });
        }

        fn pump_frames(&self) -> usize {
            let frames: Vec<_> = self.frames.borrow_mut().drain(..).collect();
            let count = frames.len();
            for frame in frames {
                frame();
            }
            count
        }

        fn fire(&self, event: PageEvent) {
            let handlers: Vec<_> = self
                .listeners
                .borrow()
                .iter()
                .filter(|(e, _)| *e == event)
                .map(|(_, h)| Rc::clone(h))
                .collect();
            for handler in handlers {
                (*handler.borrow_mut())();
            }
        }
    }

    impl DisplayLayer for FakeDisplay {
        fn read_layout(&self) -> Result<Layout, UiError> {
            Ok(self.layout.borrow().clone())
        }

        fn read_scroll(&self) -> ScrollSnapshot {
            self.scroll.get()
        }

        fn apply_ui_state(&self, state: &UiState) {
            self.applied.borrow_mut().push(state.clone());
        }

        fn request_frame(&self, callback: Box<dyn FnOnce()>) {
            self.frames.borrow_mut().push(callback);
        }

        fn subscribe(&self, event: PageEvent, callback: Box<dyn FnMut()>) -> Result<Subscription, UiError> {
            self.listeners.borrow_mut().push((event, Rc::new(RefCell::new(callback))));
            Ok(Subscription::new(|| ()))
        }

        fn page_hidden(&self) -> bool {
            self.hidden.get()
        }

        fn apply_visibility(&self, hidden: bool) {
            self.body_hidden.set(hidden);
        }
    }

    fn sections() -> Vec<Section> {
        vec![Section::new("a", 0.0, 500.0), Section::new("b", 500.0, 500.0)]
    }

    #[test]
    fn burst_of_schedules_runs_once_with_latest_snapshot() {
        let runtime = ScrollRuntime::new(FakeDisplay::with_sections(sections()), Thresholds::default()).unwrap();
        for y in [10.0, 120.0, 380.0, 950.0] {
            runtime.display().scroll_to(y);
            runtime.schedule_recompute();
        }
        assert!(runtime.display().applied.borrow().is_empty());
        assert_eq!(runtime.display().pump_frames(), 1);

        let applied = runtime.display().applied.borrow();
        assert_eq!(applied.len(), 1);
        assert!(applied[0].fab_visible);
        assert_eq!(applied[0].progress_percent, 47.5);
    }

    #[test]
    fn next_frame_is_requested_after_the_previous_ran() {
        let runtime = ScrollRuntime::new(FakeDisplay::with_sections(sections()), Thresholds::default()).unwrap();
        runtime.schedule_recompute();
        runtime.display().pump_frames();
        runtime.schedule_recompute();
        assert_eq!(runtime.display().pump_frames(), 1);
        assert_eq!(runtime.display().applied.borrow().len(), 2);
    }

    #[test]
    fn events_route_to_the_runtime() {
        let runtime = ScrollRuntime::new(FakeDisplay::with_sections(sections()), Thresholds::default()).unwrap();
        let _subscriptions = runtime.attach().unwrap();
        let display = runtime.display();

        display.scroll_to(200.0);
        display.fire(PageEvent::Scroll);
        display.fire(PageEvent::Scroll);
        display.pump_frames();
        assert_eq!(display.applied.borrow().last().unwrap().active_section_id.as_deref(), Some("a"));

        // sections grow on resize; the same scroll position now lands elsewhere
        *display.layout.borrow_mut() = Layout {
            sections: vec![Section::new("a", 0.0, 200.0), Section::new("b", 200.0, 800.0)],
            header_height: 0.0,
            shape_count: 2,
        };
        display.fire(PageEvent::Resize);
        display.pump_frames();
        assert_eq!(display.applied.borrow().last().unwrap().active_section_id.as_deref(), Some("b"));
        assert_eq!(display.applied.borrow().last().unwrap().shapes.len(), 2);
    }

    #[test]
    fn layout_change_without_resize_is_picked_up() {
        let runtime = ScrollRuntime::new(FakeDisplay::with_sections(sections()), Thresholds::default()).unwrap();
        let _subscriptions = runtime.attach().unwrap();
        let display = runtime.display();
        display.scroll_to(450.0);
        display.fire(PageEvent::Scroll);
        display.pump_frames();
        assert_eq!(display.applied.borrow().last().unwrap().active_section_id.as_deref(), Some("b"));

        // filtering collapsed "a"; no resize fires
        *display.layout.borrow_mut() = Layout {
            sections: vec![Section::new("a", 0.0, 900.0), Section::new("b", 900.0, 300.0)],
            header_height: 0.0,
            shape_count: 2,
        };
        runtime.relayout();
        display.pump_frames();
        assert_eq!(display.applied.borrow().last().unwrap().active_section_id.as_deref(), Some("a"));

        display.fire(PageEvent::Scroll);
        display.pump_frames();
        assert_eq!(display.applied.borrow().last().unwrap().active_section_id.as_deref(), Some("a"));
    }

    #[test]
    fn hidden_page_skips_recompute() {
        let runtime = ScrollRuntime::new(FakeDisplay::with_sections(sections()), Thresholds::default()).unwrap();
        let _subscriptions = runtime.attach().unwrap();
        let display = runtime.display();

        display.hidden.set(true);
        display.fire(PageEvent::VisibilityChange);
        assert!(display.body_hidden.get());
        assert_eq!(display.pump_frames(), 0);

        display.hidden.set(false);
        display.fire(PageEvent::VisibilityChange);
        assert!(!display.body_hidden.get());
        assert_eq!(display.pump_frames(), 1);
    }

    #[test]
    fn recompute_now_applies_immediately() {
        let runtime = ScrollRuntime::new(FakeDisplay::with_sections(Vec::new()), Thresholds::default()).unwrap();
        runtime.display().scroll_to(0.0);
        runtime.recompute_now();
        let applied = runtime.display().applied.borrow();
        assert_eq!(applied.len(), 1);
        assert_eq!(applied[0].active_section_id, None);
        assert_eq!(applied[0].progress_percent, 0.0);
    }
}
