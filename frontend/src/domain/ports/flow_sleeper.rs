//! Injectable timer used for animation ticks and deferred navigation.

use std::time::Duration;

use async_trait::async_trait;

/// Async sleep abstraction so tests can advance virtual time.
#[async_trait]
pub trait FlowSleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Tokio-based sleeper implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl FlowSleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn tokio_sleeper_waits_for_virtual_time() {
        let started = tokio::time::Instant::now();
        TokioSleeper.sleep(Duration::from_millis(500)).await;
        assert!(started.elapsed() >= Duration::from_millis(500));
    }
}
