use std::future::Future;
use std::time::Duration;

use super::discord::SessionRunner;
use super::error::GatewayError;

/// Reconnection policy layered above the session manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconnectPolicy {
    pub enabled: bool,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            enabled: false,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl ReconnectPolicy {
    pub fn should_retry(&self, err: &GatewayError) -> bool {
        self.enabled && !err.is_fatal()
    }

    /// Doubles `delay`, capped at `max_delay`. Never drops below
    /// `initial_delay`, even when `max_delay` is configured smaller.
    pub fn next_delay(&self, delay: Duration) -> Duration {
        (delay * 2).min(self.max_delay).max(self.initial_delay)
    }
}

/// Runs the gateway session until it ends for good and returns the error
/// that ended it. With reconnects disabled the first failure is terminal;
/// otherwise transient failures are retried with exponential backoff.
/// Auth failures are never retried.
pub async fn supervise<F, Fut>(policy: &ReconnectPolicy, mut connect: F) -> GatewayError
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<SessionRunner, GatewayError>>,
{
    let mut delay = policy.initial_delay;
    loop {
        let err = match connect().await {
            Ok(runner) => {
                // A session that made it to Ready resets the backoff.
                delay = policy.initial_delay;
                runner.finished().await
            }
            Err(e) => e,
        };

        if !policy.should_retry(&err) {
            return err;
        }

        tracing::warn!("gateway session lost: {err}, reconnecting in {:?}", delay);
        tokio::time::sleep(delay).await;
        delay = policy.next_delay(delay);
    }
}
