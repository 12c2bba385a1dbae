//! Hero carousel.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tracing::debug;

use crate::timer::{self, TaskHandle};
use crate::StorefrontError;

/// Slide position over a fixed number of slides. Wraps in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    len: usize,
    current: usize,
}

impl Carousel {
    /// A carousel of `len` slides showing the first.
    pub fn new(len: usize) -> Result<Self, StorefrontError> {
        if len == 0 {
            return Err(StorefrontError::NoSlides);
        }
        Ok(Self { len, current: 0 })
    }

    pub fn next(&mut self) -> usize {
        self.current = (self.current + 1) % self.len;
        self.current
    }

    pub fn prev(&mut self) -> usize {
        self.current = (self.current + self.len - 1) % self.len;
        self.current
    }

    /// Jump to slide `index` (an indicator click).
    pub fn go_to(&mut self, index: usize) -> Result<usize, StorefrontError> {
        if index >= self.len {
            return Err(StorefrontError::SlideOutOfBounds {
                index,
                len: self.len,
            });
        }
        self.current = index;
        Ok(index)
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

/// A carousel that advances itself.
///
/// The slide advances every `interval`. Manual navigation restarts the
/// interval from zero. Hovering stops the timer until the pointer leaves.
#[derive(Debug)]
pub struct HeroSlider {
    state: Arc<Mutex<Carousel>>,
    interval: Duration,
    timer: Option<TaskHandle>,
}

fn lock(state: &Mutex<Carousel>) -> MutexGuard<'_, Carousel> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl HeroSlider {
    /// Create a slider and start its timer. Must run inside a tokio runtime.
    pub fn start(carousel: Carousel, interval: Duration) -> Self {
        let mut slider = Self {
            state: Arc::new(Mutex::new(carousel)),
            interval,
            timer: None,
        };
        slider.start_timer();
        slider
    }

    fn start_timer(&mut self) {
        let state = Arc::clone(&self.state);
        self.timer = Some(timer::interval(self.interval, move || {
            let index = lock(&state).next();
            debug!(index, "carousel auto-advanced");
        }));
    }

    fn stop_timer(&mut self) {
        if let Some(mut timer) = self.timer.take() {
            timer.cancel();
        }
    }

    fn restart_timer(&mut self) {
        self.stop_timer();
        self.start_timer();
    }

    /// Next-arrow click.
    pub fn next(&mut self) -> usize {
        let index = lock(&self.state).next();
        self.restart_timer();
        index
    }

    /// Previous-arrow click.
    pub fn prev(&mut self) -> usize {
        let index = lock(&self.state).prev();
        self.restart_timer();
        index
    }

    /// Indicator click.
    pub fn go_to(&mut self, index: usize) -> Result<usize, StorefrontError> {
        let index = lock(&self.state).go_to(index)?;
        self.restart_timer();
        Ok(index)
    }

    /// Pointer entered the slider: pause.
    pub fn mouse_enter(&mut self) {
        self.stop_timer();
    }

    /// Pointer left the slider: resume with a full interval.
    pub fn mouse_leave(&mut self) {
        if self.timer.is_none() {
            self.start_timer();
        }
    }

    /// Whether the auto-advance timer is running.
    pub fn is_playing(&self) -> bool {
        self.timer.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Slide currently shown.
    pub fn current(&self) -> usize {
        lock(&self.state).current()
    }

    pub fn len(&self) -> usize {
        lock(&self.state).len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    const TEN_SECONDS: Duration = Duration::from_secs(10);

    #[test]
    fn test_wraps_both_ways() {
        let mut c = Carousel::new(3).unwrap();
        assert_eq!(c.prev(), 2);
        assert_eq!(c.next(), 0);
        assert_eq!(c.next(), 1);
        assert_eq!(c.next(), 2);
        assert_eq!(c.next(), 0);
    }

    #[test]
    fn test_go_to_bounds() {
        let mut c = Carousel::new(3).unwrap();
        assert_eq!(c.go_to(2).unwrap(), 2);
        assert!(matches!(
            c.go_to(3),
            Err(StorefrontError::SlideOutOfBounds { index: 3, len: 3 })
        ));
        assert_eq!(c.current(), 2);
        assert!(matches!(Carousel::new(0), Err(StorefrontError::NoSlides)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_advance() {
        let slider = HeroSlider::start(Carousel::new(3).unwrap(), TEN_SECONDS);
        sleep(Duration::from_millis(9_900)).await;
        assert_eq!(slider.current(), 0);
        sleep(Duration::from_millis(200)).await;
        assert_eq!(slider.current(), 1);
        sleep(Duration::from_secs(20)).await;
        assert_eq!(slider.current(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_navigation_restarts_interval() {
        let mut slider = HeroSlider::start(Carousel::new(3).unwrap(), TEN_SECONDS);
        sleep(Duration::from_secs(8)).await;
        assert_eq!(slider.next(), 1);

        // The old deadline at 10s no longer applies.
        sleep(Duration::from_secs(8)).await;
        assert_eq!(slider.current(), 1);
        sleep(Duration::from_secs(3)).await;
        assert_eq!(slider.current(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hover_pauses() {
        let mut slider = HeroSlider::start(Carousel::new(3).unwrap(), TEN_SECONDS);
        slider.mouse_enter();
        assert!(!slider.is_playing());

        sleep(Duration::from_secs(60)).await;
        assert_eq!(slider.current(), 0);

        slider.mouse_leave();
        assert!(slider.is_playing());
        sleep(Duration::from_millis(10_100)).await;
        assert_eq!(slider.current(), 1);
    }
}
