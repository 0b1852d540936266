//! Fixed pause between units of work
//!
//! Rows and changed entries are processed one at a time; the pause keeps the
//! request rate polite. It is not a correctness mechanism.

use std::time::Duration;

use crate::config::ThrottleConfig;

#[derive(Debug, Clone)]
pub struct Throttle {
    delay: Duration,
}

impl Throttle {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    #[cfg(test)]
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    #[cfg(test)]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub async fn pause(&self) {
        if self.delay.is_zero() {
            return;
        }
        log::trace!("Throttle: sleeping {:?}", self.delay);
        tokio::time::sleep(self.delay).await;
    }
}

impl From<&ThrottleConfig> for Throttle {
    fn from(config: &ThrottleConfig) -> Self {
        Self::new(config.delay())
    }
}
