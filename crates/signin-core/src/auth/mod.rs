//! Authentication collaborator.
//!
//! The form core treats the backend as opaque: it hands over the current
//! credentials and gets back exactly one [`SubmitOutcome`]. Implementations
//! never return errors; transport problems are folded into
//! [`SubmitOutcome::ServiceError`] so the form always settles.

mod demo;
mod http;

use std::fmt;
use std::future::Future;

use anyhow::{Context, Result};
pub use demo::{DemoOutcome, DemoSubmitter};
pub use http::HttpSubmitter;
use serde::{Deserialize, Serialize};

use crate::config::{Config, SubmitterBackend};
use crate::validation::FieldValues;

/// Standard User-Agent header for sign-in requests.
pub const USER_AGENT: &str = concat!("signin/", env!("CARGO_PKG_VERSION"));

/// Credentials sent to the backend.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl From<&FieldValues> for Credentials {
    fn from(values: &FieldValues) -> Self {
        Self {
            email: values.email.clone(),
            password: values.password.clone(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Final result of a single submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// Credentials accepted.
    Success,
    /// Credentials rejected by the backend.
    InvalidCredentials,
    /// The backend could not be reached or failed.
    ServiceError { detail: String },
}

impl SubmitOutcome {
    pub fn service_error(detail: impl Into<String>) -> Self {
        SubmitOutcome::ServiceError {
            detail: detail.into(),
        }
    }
}

/// Backend that checks credentials.
///
/// One call per user-triggered submit; implementations do not retry.
pub trait AuthSubmitter: Send + Sync {
    fn submit(&self, credentials: Credentials) -> impl Future<Output = SubmitOutcome> + Send;
}

/// Submitter selected from configuration.
#[derive(Debug, Clone)]
pub enum Submitter {
    Demo(DemoSubmitter),
    Http(HttpSubmitter),
}

impl Submitter {
    /// Builds the configured submitter.
    ///
    /// # Errors
    /// Returns an error if the HTTP backend is selected without a usable endpoint.
    pub fn from_config(config: &Config) -> Result<Self> {
        match config.submitter.backend {
            SubmitterBackend::Demo => Ok(Submitter::Demo(DemoSubmitter::new(
                config.demo.latency(),
                config.demo.outcome,
            ))),
            SubmitterBackend::Http => {
                let endpoint = config
                    .submitter
                    .effective_endpoint()?
                    .context("The http backend requires [submitter].endpoint or SIGNIN_ENDPOINT")?;
                let submitter = HttpSubmitter::new(endpoint, config.submitter.timeout())?;
                Ok(Submitter::Http(submitter))
            }
        }
    }
}

impl AuthSubmitter for Submitter {
    async fn submit(&self, credentials: Credentials) -> SubmitOutcome {
        match self {
            Submitter::Demo(demo) => demo.submit(credentials).await,
            Submitter::Http(http) => http.submit(credentials).await,
        }
    }
}
