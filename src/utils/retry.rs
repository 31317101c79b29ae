//! Bounded retry with an injectable delay.

use std::time::Duration;

/// Something that can wait.
pub trait Sleeper: Send + Sync {
    fn sleep(&self, duration: Duration);
}

/// Sleeps the current thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Run `op` up to `attempts` times, pausing `delay` between failed attempts.
///
/// `op` receives the 1-based attempt number. The last error is returned when
/// every attempt fails.
pub fn retry<T, E, F>(attempts: u32, delay: Duration, sleeper: &dyn Sleeper, mut op: F) -> Result<T, E>
where
    F: FnMut(u32) -> Result<T, E>,
{
    let attempts = attempts.max(1);
    let mut attempt = 1;
    loop {
        match op(attempt) {
            Ok(value) => return Ok(value),
            Err(e) if attempt >= attempts => return Err(e),
            Err(_) => {
                tracing::debug!("Attempt {}/{} failed, retrying in {:?}", attempt, attempts, delay);
                sleeper.sleep(delay);
                attempt += 1;
            }
        }
    }
}
