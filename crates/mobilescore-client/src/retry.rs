use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// Why a retried operation gave up.
#[derive(Debug)]
pub enum RetryError<E> {
    /// Every allowed attempt failed with a transient error; `last` is the final one.
    Exhausted { attempts: u32, last: E },
    /// A non-transient error stopped the loop early.
    Permanent(E),
}

/// Bounded retry with a fixed delay between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl RetryPolicy {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
    pub const DEFAULT_DELAY: Duration = Duration::from_secs(5);

    /// `max_attempts` below 1 is raised to 1.
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Upper bound on time spent sleeping between attempts.
    pub fn worst_case_delay(&self) -> Duration {
        self.delay * (self.max_attempts - 1)
    }

    /// Run `operation` until it succeeds, fails permanently, or runs out of attempts.
    ///
    /// The operation receives the 1-based attempt number. There is no sleep
    /// after the final attempt.
    pub async fn run<T, E, F, Fut, P>(
        &self,
        mut operation: F,
        is_transient: P,
    ) -> std::result::Result<T, RetryError<E>>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
        P: Fn(&E) -> bool,
        E: Display,
    {
        let mut attempt = 1;
        loop {
            match operation(attempt).await {
                Ok(value) => return Ok(value),
                Err(err) if !is_transient(&err) => return Err(RetryError::Permanent(err)),
                Err(err) if attempt >= self.max_attempts => {
                    return Err(RetryError::Exhausted {
                        attempts: attempt,
                        last: err,
                    });
                }
                Err(err) => {
                    tracing::warn!(
                        "Attempt {}/{} failed: {}; retrying in {:?}",
                        attempt,
                        self.max_attempts,
                        err,
                        self.delay
                    );
                    tokio::time::sleep(self.delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_ATTEMPTS, Self::DEFAULT_DELAY)
    }
}
