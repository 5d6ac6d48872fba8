//! Per-call deadlines for driven port calls.

use std::future::Future;
use std::time::Duration;

use super::ports::{CompanyProvisionerError, UserStoreError};

/// Upper bound applied to each individual store or provisioner call.
///
/// The deadline is scoped per call, so a registration that performs a
/// lookup, a provisioning request and an insert may take up to three times
/// the configured duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationDeadline(Duration);

impl OperationDeadline {
    /// Deadline used when none is configured.
    pub const DEFAULT: Duration = Duration::from_secs(10);

    /// Bound each call by `duration`.
    pub const fn new(duration: Duration) -> Self {
        Self(duration)
    }

    /// Configured bound.
    pub const fn duration(&self) -> Duration {
        self.0
    }

    /// Run a store call, mapping an elapsed deadline to
    /// [`UserStoreError::Timeout`].
    pub async fn store<T, F>(&self, operation: &'static str, call: F) -> Result<T, UserStoreError>
    where
        F: Future<Output = Result<T, UserStoreError>>,
    {
        match tokio::time::timeout(self.0, call).await {
            Ok(result) => result,
            Err(_) => Err(UserStoreError::timeout(operation)),
        }
    }

    /// Run a provisioner call, mapping an elapsed deadline to
    /// [`CompanyProvisionerError::Timeout`].
    pub async fn provisioner<T, F>(&self, call: F) -> Result<T, CompanyProvisionerError>
    where
        F: Future<Output = Result<T, CompanyProvisionerError>>,
    {
        match tokio::time::timeout(self.0, call).await {
            Ok(result) => result,
            Err(_) => Err(CompanyProvisionerError::timeout(format!(
                "no response within {}ms",
                self.0.as_millis()
            ))),
        }
    }
}

impl Default for OperationDeadline {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_is_ten_seconds() {
        assert_eq!(OperationDeadline::default().duration(), Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn store_calls_past_the_deadline_time_out() {
        let deadline = OperationDeadline::new(Duration::from_millis(50));
        let result: Result<(), _> = deadline
            .store("find_by_email", async {
                tokio::time::sleep(Duration::from_secs(1)).await;
                Ok(())
            })
            .await;
        assert_eq!(result, Err(UserStoreError::timeout("find_by_email")));
    }

    #[tokio::test(start_paused = true)]
    async fn provisioner_calls_past_the_deadline_time_out() {
        let deadline = OperationDeadline::new(Duration::from_millis(50));
        let result: Result<String, _> = deadline
            .provisioner(async {
                tokio::time::sleep(Duration::from_secs(1)).await;
                Ok("649060d540e3b169621e9629".to_owned())
            })
            .await;
        assert!(matches!(result, Err(CompanyProvisionerError::Timeout { .. })));
    }

    #[tokio::test]
    async fn calls_within_the_deadline_pass_through() {
        let deadline = OperationDeadline::default();
        let result = deadline
            .store("create", async { Err::<(), _>(UserStoreError::query("boom")) })
            .await;
        assert_eq!(result, Err(UserStoreError::query("boom")));
    }
}
