//! Offline submitter with simulated latency.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{AuthSubmitter, Credentials, SubmitOutcome};

/// Outcome the demo submitter answers with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DemoOutcome {
    Success,
    #[default]
    InvalidCredentials,
    ServiceError,
}

impl DemoOutcome {
    fn to_outcome(self) -> SubmitOutcome {
        match self {
            DemoOutcome::Success => SubmitOutcome::Success,
            DemoOutcome::InvalidCredentials => SubmitOutcome::InvalidCredentials,
            DemoOutcome::ServiceError => {
                SubmitOutcome::service_error("demo backend configured to fail")
            }
        }
    }
}

/// Waits `latency`, then returns the configured outcome regardless of input.
#[derive(Debug, Clone)]
pub struct DemoSubmitter {
    latency: Duration,
    outcome: DemoOutcome,
}

impl DemoSubmitter {
    pub const DEFAULT_LATENCY: Duration = Duration::from_millis(700);

    pub fn new(latency: Duration, outcome: DemoOutcome) -> Self {
        Self { latency, outcome }
    }
}

impl Default for DemoSubmitter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LATENCY, DemoOutcome::default())
    }
}

impl AuthSubmitter for DemoSubmitter {
    async fn submit(&self, credentials: Credentials) -> SubmitOutcome {
        tracing::debug!(email = %credentials.email, latency = ?self.latency, "demo submit");
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.outcome.to_outcome()
    }
}
