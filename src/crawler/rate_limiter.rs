//! Jittered pacing between outbound requests
//!
//! Every page fetch and every enriched product is followed by a random pause
//! drawn from a configured range. The generator can be seeded so tests and
//! reproducible runs see the same delay sequence.

use crate::config::PacingConfig;
use std::sync::Mutex;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Random-delay policy shared by the crawler and the enricher
#[derive(Debug)]
pub struct RateLimiter {
    min: Duration,
    max: Duration,
    rng: Mutex<fastrand::Rng>,
}

impl RateLimiter {
    /// Creates a limiter drawing delays uniformly from `min..=max`
    ///
    /// The bounds are swapped if given in the wrong order.
    pub fn new(min: Duration, max: Duration) -> Self {
        Self::with_rng(min, max, fastrand::Rng::new())
    }

    /// Creates a limiter whose delay sequence is fully determined by `seed`
    pub fn with_seed(min: Duration, max: Duration, seed: u64) -> Self {
        Self::with_rng(min, max, fastrand::Rng::with_seed(seed))
    }

    /// A limiter that never waits
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    /// Limiter for the pause between two search pages
    pub fn for_pages(config: &PacingConfig) -> Self {
        Self::from_millis(config.page_delay_min_ms, config.page_delay_max_ms, config.seed)
    }

    /// Limiter for the pause between two enriched products
    pub fn for_details(config: &PacingConfig) -> Self {
        // Offset the seed so both limiters do not draw identical sequences
        let seed = config.seed.map(|seed| seed.wrapping_add(1));
        Self::from_millis(config.detail_delay_min_ms, config.detail_delay_max_ms, seed)
    }

    fn from_millis(min_ms: u64, max_ms: u64, seed: Option<u64>) -> Self {
        let min = Duration::from_millis(min_ms);
        let max = Duration::from_millis(max_ms);
        match seed {
            Some(seed) => Self::with_seed(min, max, seed),
            None => Self::new(min, max),
        }
    }

    fn with_rng(min: Duration, max: Duration, rng: fastrand::Rng) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            min,
            max,
            rng: Mutex::new(rng),
        }
    }

    /// Lower bound of the jitter range
    pub fn min_delay(&self) -> Duration {
        self.min
    }

    /// Upper bound of the jitter range
    pub fn max_delay(&self) -> Duration {
        self.max
    }

    /// Draws the next delay
    pub fn next_delay(&self) -> Duration {
        if self.min == self.max {
            return self.min;
        }

        let span_ms = (self.max - self.min).as_millis() as u64;
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        self.min + Duration::from_millis(rng.u64(0..=span_ms))
    }

    /// Sleeps for the next delay unless `cancel` fires first
    ///
    /// # Returns
    ///
    /// * `true` - The delay elapsed and work may continue
    /// * `false` - Cancellation was requested
    pub async fn wait(&self, cancel: &CancellationToken) -> bool {
        if cancel.is_cancelled() {
            return false;
        }

        let delay = self.next_delay();
        if delay.is_zero() {
            return true;
        }

        tracing::trace!("Pausing {:?}", delay);
        tokio::select! {
            biased;
            _ = cancel.cancelled() => false,
            _ = tokio::time::sleep(delay) => true,
        }
    }
}
