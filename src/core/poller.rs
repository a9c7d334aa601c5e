use crate::domain::model::Operation;
use crate::domain::ports::PeeringService;
use crate::utils::error::{PeeringError, Result};
use crate::utils::validation::{invalid_value, Validate};
use std::time::Duration;
use tokio::time::Instant;

/// Backoff schedule for polling a long-running operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PollPolicy {
    pub initial_delay: Duration,
    pub multiplier: f64,
    pub max_delay: Duration,
    pub timeout: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(1_000),
            multiplier: 1.1,
            max_delay: Duration::from_millis(10_000),
            timeout: Duration::from_secs(30 * 60),
        }
    }
}

impl PollPolicy {
    pub fn next_delay(&self, current: Duration) -> Duration {
        current.mul_f64(self.multiplier).min(self.max_delay)
    }
}

// Field names refer to the [operations] keys of the settings file.
impl Validate for PollPolicy {
    fn validate(&self) -> Result<()> {
        let initial_ms = self.initial_delay.as_millis();
        let max_ms = self.max_delay.as_millis();

        if initial_ms == 0 {
            return Err(invalid_value(
                "operations.initial_poll_ms",
                initial_ms,
                "the first poll interval must be at least 1ms",
            ));
        }
        if !self.multiplier.is_finite() || self.multiplier < 1.0 || self.multiplier > 10.0 {
            return Err(invalid_value(
                "operations.poll_multiplier",
                self.multiplier,
                "backoff must be between 1.0 (constant interval) and 10.0",
            ));
        }
        if max_ms < initial_ms {
            return Err(invalid_value(
                "operations.max_poll_ms",
                max_ms,
                format!("ceiling is below operations.initial_poll_ms ({})", initial_ms),
            ));
        }
        if self.timeout < self.initial_delay {
            return Err(invalid_value(
                "operations.timeout_secs",
                self.timeout.as_secs(),
                "the wait timeout must cover at least one poll interval",
            ));
        }

        Ok(())
    }
}

pub struct OperationPoller<'a, P: PeeringService + ?Sized> {
    service: &'a P,
    policy: PollPolicy,
}

impl<'a, P: PeeringService + ?Sized> OperationPoller<'a, P> {
    pub fn new(service: &'a P, policy: PollPolicy) -> Self {
        Self { service, policy }
    }

    /// Polls `name` until the operation reports `done`. Failed operations are
    /// returned as-is; interpreting the error is left to the printer.
    pub async fn wait(&self, name: &str) -> Result<Operation> {
        let started = Instant::now();
        let mut delay = self.policy.initial_delay;
        let mut attempt = 0u32;

        loop {
            attempt += 1;
            let operation = self.service.get_operation(name).await?;
            if operation.done {
                tracing::debug!("Operation {} finished after {} polls", name, attempt);
                return Ok(operation);
            }

            let elapsed = started.elapsed();
            if elapsed >= self.policy.timeout {
                return Err(PeeringError::OperationTimeout {
                    name: name.to_string(),
                    waited_secs: elapsed.as_secs(),
                });
            }

            let sleep_for = delay.min(self.policy.timeout - elapsed);
            tracing::debug!(
                "Operation {} still running (poll #{}), sleeping {:?}",
                name,
                attempt,
                sleep_for
            );
            tokio::time::sleep(sleep_for).await;
            delay = self.policy.next_delay(delay);
        }
    }
}
