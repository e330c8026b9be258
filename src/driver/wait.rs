//! Polling waits over a page driver

use super::{DriverError, ElementHandle, PageDriver};
use crate::config::TimingConfig;
use std::time::Duration;
use tokio::time::{sleep, Instant};

/// Timeout budget plus polling cadence for waiting on the rendered page
#[derive(Debug, Clone, Copy)]
pub struct Wait {
    timeout: Duration,
    poll_interval: Duration,
}

impl Wait {
    pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            timeout,
            poll_interval,
        }
    }

    /// Element-presence wait from the timing configuration
    pub fn from_config(timing: &TimingConfig) -> Self {
        Self::new(timing.element_wait(), timing.poll_interval())
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Polls `probe` until it yields a value or the timeout elapses
    ///
    /// The probe is evaluated at least once, even with a zero timeout. Errors
    /// from the probe end the wait immediately.
    ///
    /// # Returns
    ///
    /// * `Ok(T)` - The first value the probe produced
    /// * `Err(DriverError::Timeout)` - The probe never produced a value
    pub async fn until<D, T, F>(
        &self,
        driver: &D,
        condition: &str,
        mut probe: F,
    ) -> Result<T, DriverError>
    where
        D: PageDriver + ?Sized,
        F: FnMut(&D) -> Result<Option<T>, DriverError>,
    {
        let deadline = Instant::now() + self.timeout;

        loop {
            if let Some(value) = probe(driver)? {
                return Ok(value);
            }

            if Instant::now() >= deadline {
                return Err(DriverError::Timeout {
                    condition: condition.to_string(),
                    waited_ms: self.timeout.as_millis() as u64,
                });
            }

            sleep(self.poll_interval).await;
        }
    }

    /// Waits until at least one element matches `selector` and returns all matches
    pub async fn presence_of_all<D>(
        &self,
        driver: &D,
        selector: &str,
    ) -> Result<Vec<ElementHandle>, DriverError>
    where
        D: PageDriver + ?Sized,
    {
        let condition = format!("presence of '{}'", selector);
        self.until(driver, &condition, |d| {
            let found = d.find_all(None, selector)?;
            Ok((!found.is_empty()).then_some(found))
        })
        .await
    }

    /// Waits until `element` is no longer part of the rendered page
    pub async fn staleness_of<D>(&self, driver: &D, element: &ElementHandle) -> Result<(), DriverError>
    where
        D: PageDriver + ?Sized,
    {
        self.until(driver, "staleness of element", |d| {
            Ok(d.is_stale(element).then_some(()))
        })
        .await
    }
}
