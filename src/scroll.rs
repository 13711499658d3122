//! Scroll-into-view coordination.
//!
//! A `ScrollToId` request is usually sent in the same update that renders
//! the target element, so measuring has to wait for that render to land.
//! The coordinator resolves the element immediately, defers measurement by
//! [`SCROLL_SETTLE_DELAY`], then issues at most one corrective scroll.
//!
//! The delay is a heuristic: on a device that renders slower than the
//! delay the measurement can see stale layout.

use std::rc::Rc;
use std::time::Duration;

use tracing::debug;

/// Time given to the application's render pass before measuring.
pub const SCROLL_SETTLE_DELAY: Duration = Duration::from_millis(20);

/// Share of the viewport height kept clear above and below the target.
pub const COMFORT_MARGIN_RATIO: f64 = 0.1;

/// Viewport and element measurements, in document pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    /// Current vertical scroll offset.
    pub view_top: f64,
    pub view_height: f64,
    /// Element offset from the top of the document.
    pub element_top: f64,
    pub element_height: f64,
}

impl Geometry {
    pub fn view_bottom(&self) -> f64 {
        self.view_top + self.view_height
    }

    pub fn element_bottom(&self) -> f64 {
        self.element_top + self.element_height
    }

    pub fn margin(&self, ratio: f64) -> f64 {
        self.view_height * ratio
    }
}

/// Decide where to scroll so the element sits inside the comfort margins.
///
/// Returns `None` when the element is already comfortably visible. The
/// top edge is checked first; the result may be negative, browsers clamp it.
pub fn corrective_scroll(geometry: &Geometry, margin_ratio: f64) -> Option<f64> {
    let margin = geometry.margin(margin_ratio);

    if geometry.element_top < geometry.view_top + margin {
        Some(geometry.element_top - margin)
    } else if geometry.element_bottom() > geometry.view_bottom() - margin {
        Some(geometry.element_bottom() - geometry.view_height + margin)
    } else {
        None
    }
}

/// Access to the document being scrolled.
pub trait Viewport {
    /// Handle to a resolved element, kept across the settle delay.
    type Element: 'static;

    fn find(&self, id: &str) -> Option<Self::Element>;

    /// Fresh geometry for `element`, or `None` if it can no longer be
    /// measured (e.g. it was removed from the document).
    fn measure(&self, element: &Self::Element) -> Option<Geometry>;

    fn scroll_to(&self, top: f64);
}

/// Timer facility used for the settle delay. Must not block.
pub trait Scheduler {
    fn defer(&self, delay: Duration, task: Box<dyn FnOnce()>);
}

pub struct ScrollCoordinator<V: Viewport> {
    viewport: Rc<V>,
    scheduler: Rc<dyn Scheduler>,
    delay: Duration,
    margin_ratio: f64,
}

impl<V: Viewport + 'static> ScrollCoordinator<V> {
    pub fn new(viewport: Rc<V>, scheduler: Rc<dyn Scheduler>) -> Self {
        Self {
            viewport,
            scheduler,
            delay: SCROLL_SETTLE_DELAY,
            margin_ratio: COMFORT_MARGIN_RATIO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_margin_ratio(mut self, margin_ratio: f64) -> Self {
        self.margin_ratio = margin_ratio;
        self
    }

    /// Scroll `element_id` into comfortable view once rendering settles.
    ///
    /// An unknown id is ignored. Pending requests are never coalesced or
    /// cancelled; each one measures and scrolls on its own.
    pub fn handle(&self, element_id: &str) {
        let Some(element) = self.viewport.find(element_id) else {
            debug!(id = element_id, "scroll target not found");
            return;
        };

        let viewport = Rc::clone(&self.viewport);
        let margin_ratio = self.margin_ratio;
        let id = element_id.to_string();

        self.scheduler.defer(
            self.delay,
            Box::new(move || {
                let Some(geometry) = viewport.measure(&element) else {
                    debug!(id = %id, "scroll target detached before measuring");
                    return;
                };
                match corrective_scroll(&geometry, margin_ratio) {
                    Some(top) => {
                        debug!(id = %id, top, "scrolling target into view");
                        viewport.scroll_to(top);
                    }
                    None => debug!(id = %id, "scroll target already visible"),
                }
            }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;

    fn geometry(
        view_top: f64,
        view_height: f64,
        element_top: f64,
        element_height: f64,
    ) -> Geometry {
        Geometry {
            view_top,
            view_height,
            element_top,
            element_height,
        }
    }

    #[test]
    fn test_scenario_element_above_view() {
        let g = geometry(300.0, 1000.0, 50.0, 20.0);
        assert_eq!(corrective_scroll(&g, COMFORT_MARGIN_RATIO), Some(-50.0));
    }

    #[test]
    fn test_visible_element_is_left_alone() {
        let g = geometry(0.0, 1000.0, 100.0, 800.0);
        assert_eq!(corrective_scroll(&g, COMFORT_MARGIN_RATIO), None);
    }

    #[test]
    fn test_element_below_view() {
        // bottom = 1180, view bottom - margin = 900
        let g = geometry(0.0, 1000.0, 1150.0, 30.0);
        assert_eq!(corrective_scroll(&g, COMFORT_MARGIN_RATIO), Some(280.0));
    }

    #[test]
    fn test_element_inside_bottom_margin() {
        let g = geometry(0.0, 1000.0, 880.0, 40.0);
        assert_eq!(corrective_scroll(&g, COMFORT_MARGIN_RATIO), Some(20.0));
    }

    #[test]
    fn test_top_check_wins_for_tall_element() {
        // Taller than the view: both edges are out, top alignment is chosen.
        let g = geometry(500.0, 1000.0, 550.0, 2000.0);
        assert_eq!(corrective_scroll(&g, COMFORT_MARGIN_RATIO), Some(450.0));
    }

    #[test]
    fn test_exact_margin_edges_are_comfortable() {
        let g = geometry(0.0, 1000.0, 100.0, 800.0);
        assert_eq!(g.element_bottom(), g.view_bottom() - g.margin(COMFORT_MARGIN_RATIO));
        assert_eq!(corrective_scroll(&g, COMFORT_MARGIN_RATIO), None);
    }

    #[test]
    fn test_new_view_lands_on_margin() {
        let cases = [(0.0, 1500.0, 60.0), (2000.0, 40.0, 10.0), (300.0, 1250.0, 5.0)];
        for (view_top, top, height) in cases {
            let g = geometry(view_top, 800.0, top, height);
            let margin = g.margin(COMFORT_MARGIN_RATIO);
            let new_top = corrective_scroll(&g, COMFORT_MARGIN_RATIO).unwrap();
            if top < view_top + margin {
                assert_eq!(new_top, top - margin);
            } else {
                assert_eq!(new_top + g.view_height, top + height + margin);
            }
        }
    }

    struct FakeViewport {
        view_top: f64,
        view_height: f64,
        elements: RefCell<HashMap<String, (f64, f64)>>,
        scrolls: RefCell<Vec<f64>>,
    }

    impl FakeViewport {
        fn new(view_top: f64, view_height: f64) -> Self {
            Self {
                view_top,
                view_height,
                elements: RefCell::new(HashMap::new()),
                scrolls: RefCell::new(Vec::new()),
            }
        }

        fn place(&self, id: &str, top: f64, height: f64) {
            self.elements.borrow_mut().insert(id.to_string(), (top, height));
        }
    }

    impl Viewport for FakeViewport {
        type Element = String;

        fn find(&self, id: &str) -> Option<String> {
            self.elements.borrow().contains_key(id).then(|| id.to_string())
        }

        fn measure(&self, element: &String) -> Option<Geometry> {
            let (top, height) = *self.elements.borrow().get(element)?;
            Some(geometry(self.view_top, self.view_height, top, height))
        }

        fn scroll_to(&self, top: f64) {
            self.scrolls.borrow_mut().push(top);
        }
    }

    #[derive(Default)]
    struct ManualScheduler {
        queue: RefCell<Vec<(Duration, Box<dyn FnOnce()>)>>,
        deferred: Cell<usize>,
    }

    impl ManualScheduler {
        fn run_all(&self) {
            let tasks: Vec<_> = self.queue.borrow_mut().drain(..).collect();
            for (_, task) in tasks {
                task();
            }
        }
    }

    impl Scheduler for ManualScheduler {
        fn defer(&self, delay: Duration, task: Box<dyn FnOnce()>) {
            self.deferred.set(self.deferred.get() + 1);
            self.queue.borrow_mut().push((delay, task));
        }
    }

    type Fixture = (
        Rc<FakeViewport>,
        Rc<ManualScheduler>,
        ScrollCoordinator<FakeViewport>,
    );

    fn coordinator() -> Fixture {
        let viewport = Rc::new(FakeViewport::new(300.0, 1000.0));
        let scheduler = Rc::new(ManualScheduler::default());
        let coordinator = ScrollCoordinator::new(viewport.clone(), scheduler.clone());
        (viewport, scheduler, coordinator)
    }

    #[test]
    fn test_missing_element_is_noop() {
        let (viewport, scheduler, coordinator) = coordinator();
        coordinator.handle("nowhere");
        scheduler.run_all();
        assert_eq!(scheduler.deferred.get(), 0);
        assert!(viewport.scrolls.borrow().is_empty());
    }

    #[test]
    fn test_scroll_waits_for_delay() {
        let (viewport, scheduler, coordinator) = coordinator();
        viewport.place("row", 50.0, 20.0);
        coordinator.handle("row");

        assert!(viewport.scrolls.borrow().is_empty());
        assert_eq!(scheduler.queue.borrow()[0].0, SCROLL_SETTLE_DELAY);

        scheduler.run_all();
        assert_eq!(*viewport.scrolls.borrow(), vec![-50.0]);
    }

    #[test]
    fn test_measures_after_render() {
        let (viewport, scheduler, coordinator) = coordinator();
        viewport.place("row", 50.0, 20.0);
        coordinator.handle("row");
        // Layout moves the element into view before the timer fires.
        viewport.place("row", 600.0, 20.0);
        scheduler.run_all();
        assert!(viewport.scrolls.borrow().is_empty());
    }

    #[test]
    fn test_detached_element_is_noop() {
        let (viewport, scheduler, coordinator) = coordinator();
        viewport.place("row", 50.0, 20.0);
        coordinator.handle("row");
        viewport.elements.borrow_mut().clear();
        scheduler.run_all();
        assert!(viewport.scrolls.borrow().is_empty());
    }

    #[test]
    fn test_pending_requests_run_independently() {
        let (viewport, scheduler, coordinator) = coordinator();
        viewport.place("a", 50.0, 20.0);
        viewport.place("b", 2000.0, 50.0);
        coordinator.handle("a");
        coordinator.handle("b");
        scheduler.run_all();
        assert_eq!(*viewport.scrolls.borrow(), vec![-50.0, 1150.0]);
    }

    #[test]
    fn test_custom_settings() {
        let (viewport, scheduler, coordinator) = coordinator();
        let coordinator = coordinator
            .with_delay(Duration::from_millis(100))
            .with_margin_ratio(0.0);
        viewport.place("row", 250.0, 20.0);
        coordinator.handle("row");
        assert_eq!(scheduler.queue.borrow()[0].0, Duration::from_millis(100));
        scheduler.run_all();
        assert_eq!(*viewport.scrolls.borrow(), vec![250.0]);
    }
}
