//! Form effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! The reducer itself never performs I/O or spawns tasks.

use signin_core::auth::Credentials;

use crate::common::TaskId;

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug, PartialEq, Eq)]
pub enum FormEffect {
    /// Send `credentials` to the auth backend as submission `task`.
    SubmitCredentials {
        task: TaskId,
        credentials: Credentials,
    },

    /// Credentials were accepted; hand the user over to session management.
    SessionEstablished { email: String },
}
