use crate::libtnpsc::session::ExamResult;
use crate::libtnpsc::timer::Scheduled;
use log::debug;
use std::time::{Duration, Instant};

pub const RESULTS_DELAY: Duration = Duration::from_millis(1000);
pub const SUCCESS_TOAST: Duration = Duration::from_millis(6000);
pub const SUCCESS_MESSAGE: &str = "Exam successfully completed!";

/// Screens of the app. `bank` is an index into the bank list.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Banks,
    Registration { bank: usize },
    Runner { bank: usize },
    Results { state: Option<ExamResult> },
}

impl Route {
    /// What the results screen shows; direct visits get zeros.
    pub fn exam_result(&self) -> ExamResult {
        match self {
            Route::Results { state } => state.unwrap_or_default(),
            _ => ExamResult::default(),
        }
    }
}

#[derive(Debug)]
pub struct Router {
    current: Route,
    pending: Option<Scheduled<Route>>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new(Route::Banks)
    }
}

impl Router {
    pub fn new(start: Route) -> Self {
        Self {
            current: start,
            pending: None,
        }
    }

    pub fn current(&self) -> &Route {
        &self.current
    }

    pub fn navigate(&mut self, route: Route) {
        if self.pending.take().is_some() {
            debug!("[Router] Dropped pending navigation.");
        }
        debug!("[Router] {:?} -> {:?}", self.current, route);
        self.current = route;
    }

    pub fn schedule(&mut self, route: Route, delay: Duration, now: Instant) {
        debug!("[Router] Scheduled {:?} in {} ms", route, delay.as_millis());
        self.pending = Some(Scheduled::new(route, delay, now));
    }

    pub fn cancel_pending(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn pending(&self) -> Option<&Scheduled<Route>> {
        self.pending.as_ref()
    }

    /// Performs a due scheduled navigation. Returns whether the route changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.pending.take() {
            Some(task) if task.is_due(now) => {
                self.navigate(task.into_payload());
                true
            }
            other => {
                self.pending = other;
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn results(score: u32) -> Route {
        Route::Results {
            state: Some(ExamResult {
                total_questions: 3,
                score,
            }),
        }
    }

    #[test]
    fn starts_on_banks() {
        assert_eq!(Router::default().current(), &Route::Banks);
    }

    #[test]
    fn scheduled_navigation_fires_once_due() {
        let start = Instant::now();
        let mut router = Router::new(Route::Runner { bank: 0 });
        router.schedule(results(2), RESULTS_DELAY, start);

        assert!(!router.tick(start + Duration::from_millis(500)));
        assert_eq!(router.current(), &Route::Runner { bank: 0 });
        assert!(router.pending().is_some());

        assert!(router.tick(start + RESULTS_DELAY));
        assert_eq!(router.current(), &results(2));
        assert!(router.pending().is_none());
        assert!(!router.tick(start + RESULTS_DELAY * 2));
    }

    #[test]
    fn cancelled_navigation_never_fires() {
        let start = Instant::now();
        let mut router = Router::new(Route::Runner { bank: 1 });
        router.schedule(results(1), RESULTS_DELAY, start);
        assert!(router.cancel_pending());
        assert!(!router.tick(start + RESULTS_DELAY));
        assert_eq!(router.current(), &Route::Runner { bank: 1 });
    }

    #[test]
    fn direct_navigation_drops_pending() {
        let start = Instant::now();
        let mut router = Router::new(Route::Runner { bank: 0 });
        router.schedule(results(3), RESULTS_DELAY, start);
        router.navigate(Route::Banks);
        assert!(!router.tick(start + RESULTS_DELAY));
        assert_eq!(router.current(), &Route::Banks);
    }

    #[test]
    fn results_default_to_zero() {
        assert_eq!(
            Route::Results { state: None }.exam_result(),
            ExamResult {
                total_questions: 0,
                score: 0
            }
        );
        assert_eq!(results(2).exam_result().score, 2);
    }
}
